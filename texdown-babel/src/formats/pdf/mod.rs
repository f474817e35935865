//! PDF export built on top of the HTML serializer + headless Chrome.
//!
//! Documents are rendered to HTML with the HTML format, page-size CSS is
//! injected, then a Chrome/Chromium binary running in headless mode prints
//! the page to PDF.

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::html::HtmlFormat;
use crate::formats::page::PageSize;
use crate::ir::nodes::Document;
use log::debug;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;
use url::Url;
use which::which;

/// Format implementation that shells out to Chrome/Chromium to generate PDFs.
#[derive(Debug, Clone, Default)]
pub struct PdfFormat {
    html: HtmlFormat,
    size: PageSize,
}

impl PdfFormat {
    pub fn new(html: HtmlFormat, size: PageSize) -> Self {
        Self { html, size }
    }
}

impl Format for PdfFormat {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "HTML-based PDF export via headless Chrome"
    }

    fn file_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "PDF serialization produces binary output".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let size = match options.get("size") {
            Some(value) => value.parse()?,
            None => self.size,
        };
        // Theme and css-path are forwarded; the HTML format ignores `size`.
        let html = self.html.serialize_with_options(doc, options)?.into_bytes();
        let html = String::from_utf8(html)
            .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))?;
        let final_html = inject_page_css(&html, &size.print_css());
        let pdf_bytes = render_html_to_pdf(&final_html, size)?;
        Ok(SerializedDocument::Binary(pdf_bytes))
    }
}

fn inject_page_css(html: &str, css: &str) -> String {
    let style_tag = format!("<style data-texdown-pdf>\n{css}\n</style>");
    if let Some(idx) = html.find("</head>") {
        let mut output = String::with_capacity(html.len() + style_tag.len());
        output.push_str(&html[..idx]);
        output.push_str(&style_tag);
        output.push_str(&html[idx..]);
        output
    } else {
        format!("{style_tag}{html}")
    }
}

fn render_html_to_pdf(html: &str, size: PageSize) -> Result<Vec<u8>, FormatError> {
    let chrome = resolve_chrome_binary()?;
    let temp_dir =
        tempdir().map_err(|e| FormatError::SerializationError(format!("Temp dir error: {e}")))?;
    let html_path = temp_dir.path().join("texdown-export.html");
    let mut html_file = fs::File::create(&html_path)?;
    html_file.write_all(html.as_bytes())?;

    let pdf_path = temp_dir.path().join("texdown-export.pdf");
    let file_url = Url::from_file_path(&html_path).map_err(|_| {
        FormatError::SerializationError(
            "Failed to construct file:// URL for HTML input".to_string(),
        )
    })?;

    let pdf_arg = format!("--print-to-pdf={}", pdf_path.display());
    let window_arg = {
        let (w, h) = size.viewport();
        format!("--window-size={w},{h}")
    };

    debug!("printing {} with {}", file_url, chrome.display());
    let status = Command::new(&chrome)
        .arg("--headless")
        .arg("--disable-gpu")
        .arg("--no-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--print-to-pdf-no-header")
        .arg(pdf_arg)
        .arg(window_arg)
        .arg(file_url.as_str())
        .status()
        .map_err(|e| {
            FormatError::SerializationError(format!(
                "Failed to launch Chrome ({}): {}",
                chrome.display(),
                e
            ))
        })?;

    if !status.success() {
        return Err(FormatError::SerializationError(format!(
            "Chrome exited with status {status}"
        )));
    }

    Ok(fs::read(&pdf_path)?)
}

fn resolve_chrome_binary() -> Result<PathBuf, FormatError> {
    for var in ["TEXDOWN_CHROME_BIN", "CHROME_BIN"] {
        if let Some(path) = env::var_os(var) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
    }

    for candidate in [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
        "chrome",
        "msedge",
    ] {
        if let Ok(path) = which(candidate) {
            return Ok(path);
        }
    }

    #[cfg(target_os = "macos")]
    {
        let candidate =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    #[cfg(target_os = "windows")]
    {
        for candidate in [
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ] {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    Err(FormatError::SerializationError(
        "Unable to locate a Chrome/Chromium binary. Set TEXDOWN_CHROME_BIN to override the detection."
            .to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_page_css_before_head_close() {
        let html = "<html><head><title>x</title></head><body></body></html>";
        let injected = inject_page_css(html, "@page {}");
        let style = injected.find("data-texdown-pdf").unwrap();
        let head_close = injected.find("</head>").unwrap();
        assert!(style < head_close);
    }

    #[test]
    fn test_inject_page_css_without_head() {
        let injected = inject_page_css("<p>x</p>", "@page {}");
        assert!(injected.starts_with("<style data-texdown-pdf>"));
    }

    #[test]
    fn test_invalid_size_option_fails_before_rendering() {
        let mut options = HashMap::new();
        options.insert("size".to_string(), "huge".to_string());
        let result = PdfFormat::default().serialize_with_options(&Document::default(), &options);
        assert!(matches!(result, Err(FormatError::SerializationError(_))));
    }
}
