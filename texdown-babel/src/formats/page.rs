//! Page geometry shared by the paginated outputs (PDF and DOCX).
//!
//! Both use the same margins: 2.54cm top and bottom, 3.18cm left and right.

use crate::error::FormatError;
use std::str::FromStr;

/// Twips per centimetre (1440 per inch).
const TWIPS_PER_CM: f64 = 1440.0 / 2.54;

/// Vertical page margin, in centimetres.
pub const MARGIN_VERTICAL_CM: f64 = 2.54;
/// Horizontal page margin, in centimetres.
pub const MARGIN_HORIZONTAL_CM: f64 = 3.18;

/// Printed page size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl FromStr for PageSize {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" | "us-letter" => Ok(PageSize::Letter),
            other => Err(FormatError::SerializationError(format!(
                "Invalid page size '{other}', expected a4 or letter"
            ))),
        }
    }
}

impl PageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
        }
    }

    fn css_dimensions(&self) -> &'static str {
        match self {
            PageSize::A4 => "210mm 297mm",
            PageSize::Letter => "8.5in 11in",
        }
    }

    /// `@page` rule for print.
    pub fn print_css(&self) -> String {
        format!(
            "@page {{ size: {}; margin: {MARGIN_VERTICAL_CM}cm {MARGIN_HORIZONTAL_CM}cm; }}\nbody {{ margin: 0; padding: 0; }}\n",
            self.css_dimensions()
        )
    }

    /// Width and height in twips, as WordprocessingML `w:pgSz` wants them.
    pub fn twips(&self) -> (u32, u32) {
        match self {
            PageSize::A4 => (11906, 16838),
            PageSize::Letter => (12240, 15840),
        }
    }

    /// Vertical and horizontal margins in twips.
    pub fn margin_twips(&self) -> (u32, u32) {
        (cm_to_twips(MARGIN_VERTICAL_CM), cm_to_twips(MARGIN_HORIZONTAL_CM))
    }

    /// Browser window size used when printing, in CSS pixels at 150dpi.
    pub(crate) fn viewport(&self) -> (u32, u32) {
        match self {
            PageSize::A4 => (1240, 1754),
            PageSize::Letter => (1275, 1650),
        }
    }
}

/// Convert centimetres to whole twips.
pub fn cm_to_twips(cm: f64) -> u32 {
    (cm * TWIPS_PER_CM).round() as u32
}
