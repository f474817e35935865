//! HTML format implementation
//!
//! Serializes the styled document into a self-contained HTML5 page. This is
//! the primary renderer: the PDF export prints this same page.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` ecosystem for serialization:
//! the document is built as an RcDom tree and serialized by html5ever, which
//! takes care of escaping and void elements.
//!
//! # Element Mapping Table
//!
//! | Block / Run   | HTML                                                       |
//! |---------------|------------------------------------------------------------|
//! | Document      | `<div class="td-document">`                                |
//! | Heading       | `<hN class="td-heading td-heading-N">`                     |
//! | Paragraph     | `<p class="td-paragraph">`                                 |
//! | ListItem      | `<p class="td-list-item">` + marker span, indented per depth |
//! | Quote         | `<blockquote class="td-quote"><p>`                         |
//! | CodeBlock     | `<div class="td-code">` + label + `<pre><code>`            |
//! | Table         | `<table class="td-table">`, header / zebra row classes     |
//! | Rule          | `<hr class="td-rule">`                                     |
//! | Text          | text, nested in `strong` / `em` / `s` / `code`             |
//! | Fraction      | MathML `<math><mfrac>`                                     |
//! | Link          | `<span class="td-link">` + muted ` (url)` annotation       |
//! | Image         | `[Image: label]` placeholder                               |
//! | LineBreak     | `<br>`                                                     |
//!
//! # CSS and Theming
//!
//! Export embeds `css/baseline.css` (page metrics, fonts, palette), then the
//! theme stylesheet from `css/themes/`, then any custom CSS.
//!
//! # Options
//!
//! - `theme`: `standard` (default) or `serif`
//! - `css-path`: a stylesheet file appended after the theme
//!
//! Other keys are ignored so that wrapping formats can pass their own options
//! through.

mod serializer;

pub use serializer::{serialize_to_html, serialize_to_html_with_options, HtmlOptions};

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::ir::nodes::Document;
use log::warn;
use std::collections::HashMap;
use std::str::FromStr;

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    /// CSS theme to use for export
    theme: HtmlTheme,
}

/// Available CSS themes for HTML export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlTheme {
    /// Baseline only (sans-serif body, the standard palette)
    #[default]
    Standard,
    /// Serif typography override (fonts only, layout comes from baseline)
    Serif,
}

impl HtmlTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            HtmlTheme::Standard => "standard",
            HtmlTheme::Serif => "serif",
        }
    }
}

impl FromStr for HtmlTheme {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" | "default" => Ok(HtmlTheme::Standard),
            "serif" => Ok(HtmlTheme::Serif),
            other => Err(FormatError::NotSupported(format!(
                "Unknown HTML theme '{other}'"
            ))),
        }
    }
}

/// The stylesheet every export embeds.
pub fn get_default_css() -> &'static str {
    serializer::baseline_css()
}

impl HtmlFormat {
    /// Create a new HTML format with the specified theme
    pub fn new(theme: HtmlTheme) -> Self {
        Self { theme }
    }

    pub fn with_serif() -> Self {
        Self::new(HtmlTheme::Serif)
    }

    /// Resolve serializer options from format parameters.
    pub fn options_from(&self, options: &HashMap<String, String>) -> Result<HtmlOptions, FormatError> {
        let theme = match options.get("theme") {
            Some(name) => name.parse().unwrap_or_else(|_| {
                warn!("unknown theme '{name}', using {}", self.theme.as_str());
                self.theme
            }),
            None => self.theme,
        };

        let mut html_options = HtmlOptions::new(theme);
        if let Some(path) = options.get("css-path") {
            let css = std::fs::read_to_string(path)?;
            html_options = html_options.with_custom_css(css);
        }
        Ok(html_options)
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 format with embedded CSS"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::serialize_to_html(doc, self.theme)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let html_options = self.options_from(options)?;
        serializer::serialize_to_html_with_options(doc, html_options).map(SerializedDocument::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{Block, Run};
    use std::io::Write;

    fn sample() -> Document {
        Document {
            blocks: vec![Block::Paragraph {
                runs: vec![Run::text("hello")],
            }],
        }
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("serif".parse::<HtmlTheme>().unwrap(), HtmlTheme::Serif);
        assert_eq!("Default".parse::<HtmlTheme>().unwrap(), HtmlTheme::Standard);
        assert!("fancy".parse::<HtmlTheme>().is_err());
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let mut options = HashMap::new();
        options.insert("theme".to_string(), "neon".to_string());
        let resolved = HtmlFormat::with_serif().options_from(&options).unwrap();
        assert_eq!(resolved.theme, HtmlTheme::Serif);
    }

    #[test]
    fn test_unrelated_options_ignored() {
        let mut options = HashMap::new();
        options.insert("size".to_string(), "letter".to_string());
        let output = HtmlFormat::default()
            .serialize_with_options(&sample(), &options)
            .unwrap();
        match output {
            SerializedDocument::Text(html) => assert!(html.contains("hello")),
            SerializedDocument::Binary(_) => panic!("expected text output"),
        }
    }

    #[test]
    fn test_css_path_is_appended() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ".extra-rule {{ margin: 0; }}").unwrap();

        let mut options = HashMap::new();
        options.insert(
            "css-path".to_string(),
            file.path().to_string_lossy().to_string(),
        );
        let output = HtmlFormat::default()
            .serialize_with_options(&sample(), &options)
            .unwrap();
        let html = String::from_utf8(output.into_bytes()).unwrap();
        assert!(html.contains(".extra-rule { margin: 0; }"));
    }

    #[test]
    fn test_missing_css_path_errors() {
        let mut options = HashMap::new();
        options.insert(
            "css-path".to_string(),
            "/nonexistent/texdown/style.css".to_string(),
        );
        assert!(HtmlFormat::default()
            .serialize_with_options(&sample(), &options)
            .is_err());
    }

    #[test]
    fn test_default_css_has_document_rules() {
        assert!(get_default_css().contains(".td-document"));
    }
}
