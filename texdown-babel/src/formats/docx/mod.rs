//! Word (`.docx`) export.
//!
//! The WordprocessingML is written directly as strings and zipped into an
//! OPC package. Fractions become native Office Math (`m:f`), which is the
//! reason this format exists next to PDF.

mod document;
mod package;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::page::PageSize;
use crate::ir::nodes::Document;
use log::debug;
use std::collections::HashMap;

pub use document::document_xml;

#[derive(Debug, Clone, Default)]
pub struct DocxFormat {
    size: PageSize,
}

impl DocxFormat {
    pub fn new(size: PageSize) -> Self {
        Self { size }
    }
}

impl Format for DocxFormat {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Word document with native equation fractions"
    }

    fn file_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "DOCX serialization produces binary output".to_string(),
        ))
    }

    /// Reads `size`; theme and css options belong to the HTML family and are
    /// ignored.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let size = match options.get("size") {
            Some(value) => value.parse()?,
            None => self.size,
        };
        debug!("writing docx: {} blocks, {} page", doc.blocks.len(), size.as_str());
        let body = document_xml(doc, size);
        let bytes = package::package(&body, &doc.title())?;
        Ok(SerializedDocument::Binary(bytes))
    }
}
