//! Format implementations
//!
//! This module contains all format implementations: Markdown as the input
//! format, and the serializers that render the styled document.

pub mod docx;
pub mod html;
pub mod json;
pub mod markdown;
pub mod page;
#[cfg(feature = "native-export")]
pub mod pdf;

pub use docx::DocxFormat;
pub use html::{get_default_css, HtmlFormat, HtmlOptions, HtmlTheme};
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use page::PageSize;
#[cfg(feature = "native-export")]
pub use pdf::PdfFormat;
