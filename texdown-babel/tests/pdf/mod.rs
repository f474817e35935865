#[cfg(all(unix, feature = "native-export"))]
mod unix {
    use std::collections::HashMap;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;
    use texdown_babel::format::{Format, SerializedDocument};
    use texdown_babel::formats::markdown::parse_from_markdown;
    use texdown_babel::formats::pdf::PdfFormat;

    fn write_stub_chrome() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let script_path = dir.path().join("fake-chrome.sh");
        let script = r#"#!/bin/sh
OUTPUT=""
for arg in "$@"; do
  case $arg in
    --print-to-pdf=*)
      OUTPUT="${arg#*=}"
      ;;
  esac
done
if [ -z "$OUTPUT" ]; then
  echo "missing output" >&2
  exit 1
fi
printf '%%PDF-1.7\n%%%%EOF\n' > "$OUTPUT"
exit 0
"#;
        fs::write(&script_path, script).unwrap();
        let mut perms = fs::metadata(&script_path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms).unwrap();
        (dir, script_path)
    }

    #[test]
    fn pdf_renderer_uses_chrome_stub() {
        let (_dir, chrome_stub) = write_stub_chrome();
        let prev = std::env::var("TEXDOWN_CHROME_BIN").ok();
        std::env::set_var("TEXDOWN_CHROME_BIN", &chrome_stub);

        let doc = parse_from_markdown("Half is $\\frac{1}{2}$.\n", true);
        let mut options = HashMap::new();
        options.insert("size".to_string(), "letter".to_string());
        options.insert("theme".to_string(), "serif".to_string());

        let result = PdfFormat::default().serialize_with_options(&doc, &options);

        if let Some(prev) = prev {
            std::env::set_var("TEXDOWN_CHROME_BIN", prev);
        } else {
            std::env::remove_var("TEXDOWN_CHROME_BIN");
        }

        match result.unwrap() {
            SerializedDocument::Binary(bytes) => assert!(bytes.starts_with(b"%PDF")),
            SerializedDocument::Text(_) => panic!("Expected binary PDF output"),
        }
    }

    #[test]
    fn pdf_has_no_text_serialization() {
        let doc = parse_from_markdown("x\n", true);
        assert!(PdfFormat::default().serialize(&doc).is_err());
    }
}
