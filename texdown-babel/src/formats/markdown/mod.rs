//! Markdown format implementation
//!
//! Markdown is the only input format. Parsing runs the full conversion core:
//!
//! 1. math spans are normalized to Unicode ([`crate::latex::normalize`]),
//!    fractions travelling as markers through the tokenizer;
//! 2. the source is tokenized with comrak ([`parser::tokenize`]);
//! 3. the token stream is built into a styled document
//!    ([`crate::builder::DocumentBuilder`]).
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing. It is CommonMark compliant
//! and supports the extensions we need (tables, strikethrough, front matter).
//!
//! # Element Mapping Table
//!
//! | Markdown                | Token stream                          | Block / Run                |
//! |-------------------------|---------------------------------------|----------------------------|
//! | `#` .. `######`         | heading_open / inline / heading_close | Heading                    |
//! | Paragraph               | paragraph_open / inline / close       | Paragraph, ListItem, Quote |
//! | `-` / `1.` lists        | bullet/ordered_list_open, list_item   | ListItem with marker       |
//! | `>` quote               | blockquote_open / close               | Quote                      |
//! | Fenced / indented code  | fence / code_block                    | CodeBlock                  |
//! | Table                   | table/thead/tbody/tr/th/td            | Table                      |
//! | `---`                   | hr                                    | Rule                       |
//! | Front matter            | (skipped)                             |                            |
//! | Raw HTML                | text                                  | Text                       |
//!
//! # Options
//!
//! - `latex` (default `true`): normalize math spans before tokenizing.

pub mod parser;

use crate::builder::DocumentBuilder;
use crate::error::FormatError;
use crate::format::{parse_bool_option, Format};
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// Format implementation for Markdown
#[derive(Debug, Clone)]
pub struct MarkdownFormat {
    latex: bool,
}

impl Default for MarkdownFormat {
    fn default() -> Self {
        MarkdownFormat { latex: true }
    }
}

impl MarkdownFormat {
    pub fn new(latex: bool) -> Self {
        MarkdownFormat { latex }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown with LaTeX math"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_from_markdown(source, self.latex))
    }

    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<Document, FormatError> {
        if let Some(key) = options.keys().find(|key| key.as_str() != "latex") {
            return Err(FormatError::NotSupported(format!(
                "Unknown markdown option '{key}'"
            )));
        }
        let latex = parse_bool_option(options, "latex", self.latex)?;
        Ok(parse_from_markdown(source, latex))
    }
}

/// Convert Markdown source into a styled document.
pub fn parse_from_markdown(source: &str, latex: bool) -> Document {
    let tokens = if latex {
        parser::tokenize(&crate::latex::normalize(source))
    } else {
        parser::tokenize(source)
    };
    DocumentBuilder::new().build(&tokens)
}
