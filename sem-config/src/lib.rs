//! Shared configuration loader for the SEM toolchain.
//!
//! `defaults/sem.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`SemConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use sem_babel::formats::html::HtmlOptions;
use sem_babel::formats::sem::ParseOptions;
use sem_babel::formats::{HtmlFormat, SemFormat, SynopsisFormat};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/sem.default.toml");

/// Top-level configuration consumed by SEM applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SemConfig {
    pub parse: ParseConfig,
    pub html: HtmlConfig,
    pub synopsis: SynopsisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    pub plain_fallback: bool,
}

impl From<&ParseConfig> for ParseOptions {
    fn from(config: &ParseConfig) -> Self {
        ParseOptions {
            plain_fallback: config.plain_fallback,
        }
    }
}

impl From<&ParseConfig> for SemFormat {
    fn from(config: &ParseConfig) -> Self {
        SemFormat::new(config.into())
    }
}

/// HTML import and export knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub escape: bool,
    pub fallback_to_plain_text: bool,
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        HtmlOptions {
            escape: config.escape,
        }
    }
}

impl From<&HtmlConfig> for HtmlFormat {
    fn from(config: &HtmlConfig) -> Self {
        HtmlFormat::new(config.into(), config.fallback_to_plain_text)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynopsisConfig {
    pub length: usize,
}

impl From<&SynopsisConfig> for SynopsisFormat {
    fn from(config: &SynopsisConfig) -> Self {
        SynopsisFormat::new(config.length)
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
    pub fn build(self) -> Result<SemConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SemConfig, ConfigError> {
    Loader::new().build()
}
