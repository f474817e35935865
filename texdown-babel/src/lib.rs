//! Markdown + LaTeX math to styled documents
//!
//!     This crate turns Markdown that embeds LaTeX-style math (`$…$`, `$$…$$`) into a styled,
//!     paginatable document tree, and serializes that tree to HTML, PDF, DOCX or JSON.
//!
//!     This is a pure lib, that is, it powers texdown-cli but is shell agnostic: no code here
//!     prints, reads env vars for configuration or assumes a terminal. (The PDF exporter is the one
//!     exception, as locating a browser binary is part of its job.)
//!
//! Architecture
//!
//!     The conversion is a straight pipeline:
//!
//!         Markdown source
//!           → latex::normalize      math spans rewritten to Unicode, fractions as markers
//!           → markdown::tokenize    comrak AST flattened to a markdown-it style token stream
//!           → builder               token stream → Document of Blocks and Runs
//!           → serializer            Document → HTML / PDF / DOCX / JSON
//!
//!     The core (normalizer, builder, inline renderer, table collector) never fails: malformed
//!     input degrades to literal text and is reported through the `log` facade. `Result` only
//!     appears at the format edges.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── latex                   # Math normalizer (symbols, scanner, fraction markers)
//!     ├── ir                      # Token stream and the styled Document tree
//!     ├── builder                 # Token stream → Document
//!     ├── common                  # Helpers shared by builder and serializers
//!     ├── formats
//!     │   ├── markdown            # Input: comrak tokenizer adapter
//!     │   ├── html                # Output: html5ever serializer + embedded CSS
//!     │   ├── pdf                 # Output: HTML printed by headless Chrome
//!     │   ├── docx                # Output: WordprocessingML with Office Math fractions
//!     │   ├── page.rs             # Page sizes and margins shared by pdf and docx
//!     │   └── json                # Output: the Document as JSON
//!     └── lib.rs
//!
//! Fractions
//!
//!     Fractions are the one piece of structure the normalizer produces that plain text cannot
//!     hold. The normalizer's real output is a list of [`latex::Segment`]s; to cross the Markdown
//!     tokenizer it is encoded as text with `⟦FRAC:num:den⟧` markers, and the inline renderer
//!     decodes those markers back into [`ir::nodes::Run::Fraction`].
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs                  # aggregates the per-area modules
//!     ├── common                  # shared fixtures
//!     ├── latex
//!     ├── builder
//!     ├── markdown
//!     ├── html
//!     ├── pdf
//!     └── properties              # proptest invariants
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub mod builder;
pub mod common;
pub mod ir;
pub mod latex;

pub use error::FormatError;
pub use format::{Format, SerializedDocument};
pub use ir::nodes::Document;
pub use registry::FormatRegistry;

/// Converts Markdown with LaTeX math into a styled document.
///
/// Shorthand for the `markdown` format with math normalization enabled.
pub fn parse_markdown(source: &str) -> Document {
    formats::markdown::parse_from_markdown(source, true)
}

/// Converts Markdown source straight to the named output format.
pub fn convert(
    source: &str,
    to: &str,
    options: &std::collections::HashMap<String, String>,
) -> Result<SerializedDocument, FormatError> {
    let registry = FormatRegistry::default();
    let doc = parse_markdown(source);
    registry.serialize_with_options(&doc, to, options)
}
