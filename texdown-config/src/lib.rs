//! Shared configuration loader for the texdown toolchain.
//!
//! `defaults/texdown.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`TexdownConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use texdown_babel::formats::{HtmlTheme, PageSize};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/texdown.default.toml");

/// Name of the per-directory configuration file picked up automatically.
pub const LOCAL_CONFIG_FILE: &str = "texdown.toml";

/// Top-level configuration consumed by texdown applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TexdownConfig {
    pub convert: ConvertConfig,
    pub logging: LoggingConfig,
}

/// Conversion knobs, shared across formats and per format.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub latex: bool,
    pub html: HtmlConfig,
    pub pdf: PdfConfig,
    pub docx: DocxConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub theme: ThemeName,
    #[serde(default)]
    pub custom_css: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Standard,
    Serif,
}

impl From<ThemeName> for HtmlTheme {
    fn from(theme: ThemeName) -> Self {
        match theme {
            ThemeName::Standard => HtmlTheme::Standard,
            ThemeName::Serif => HtmlTheme::Serif,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    pub size: PageSizeName,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocxConfig {
    pub size: PageSizeName,
}

/// Printed page size, shared by the paginated formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PageSizeName {
    #[serde(rename = "a4")]
    A4,
    #[serde(rename = "letter")]
    Letter,
}

impl From<PageSizeName> for PageSize {
    fn from(size: PageSizeName) -> Self {
        match size {
            PageSizeName::A4 => PageSize::A4,
            PageSizeName::Letter => PageSize::Letter,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ConvertConfig {
    /// Format options for the markdown parser.
    pub fn parse_options(&self) -> HashMap<String, String> {
        HashMap::from([("latex".to_string(), self.latex.to_string())])
    }

    /// Format options for a serializer, keyed the way the formats expect them.
    pub fn serialize_options(&self, format: &str) -> HashMap<String, String> {
        let mut options = HashMap::new();
        if matches!(format, "html" | "pdf") {
            let theme: HtmlTheme = self.html.theme.into();
            options.insert("theme".to_string(), theme.as_str().to_string());
            if let Some(css) = &self.html.custom_css {
                options.insert("css-path".to_string(), css.display().to_string());
            }
        }
        let size = match format {
            "pdf" => Some(self.pdf.size),
            "docx" => Some(self.docx.size),
            _ => None,
        };
        if let Some(size) = size {
            let size: PageSize = size.into();
            options.insert("size".to_string(), size.as_str().to_string());
        }
        options
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TexdownConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TexdownConfig, ConfigError> {
    Loader::new().build()
}
