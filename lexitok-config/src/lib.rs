//! Configuration loader for lexitok.
//!
//! `defaults/lexitok.default.toml` is embedded into the binary so that the
//! documented defaults and runtime behavior stay in sync. Callers layer user
//! files and command-line overrides on top via [`Loader`] before
//! deserializing into [`LexitokConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use config::ConfigError as Error;

const DEFAULT_TOML: &str = include_str!("../defaults/lexitok.default.toml");

/// Top-level configuration consumed by the tokenizer session.
#[derive(Debug, Clone, Deserialize)]
pub struct LexitokConfig {
    pub dictionary: DictionaryConfig,
    pub output: OutputConfig,
    pub prompt: PromptConfig,
}

/// Where the classification dictionary lives and how it is seeded.
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    pub path: PathBuf,
    pub seed: bool,
    pub case: CaseConfig,
}

/// Case rule applied to lexemes after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseConfig {
    Lowercase,
    Preserve,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub format: OutputFormatConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormatConfig {
    Json,
    Lines,
}

/// Resolution of lexemes the dictionary does not know yet.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    pub interactive: bool,
    pub fallback: String,
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

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<LexitokConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LexitokConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.dictionary.path, PathBuf::from("data_dict.json"));
        assert!(config.dictionary.seed);
        assert_eq!(config.dictionary.case, CaseConfig::Lowercase);
        assert_eq!(config.output.format, OutputFormatConfig::Json);
        assert!(config.prompt.interactive);
        assert_eq!(config.prompt.fallback, "OTHER");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "lines")
            .expect("override to apply")
            .set_override("prompt.interactive", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormatConfig::Lines);
        assert!(!config.prompt.interactive);
    }

    #[test]
    fn user_file_layers_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[dictionary]\ncase = \"preserve\"\nseed = false").expect("write");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.dictionary.case, CaseConfig::Preserve);
        assert!(!config.dictionary.seed);
        // Untouched keys keep their defaults.
        assert_eq!(config.dictionary.path, PathBuf::from("data_dict.json"));
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("does/not/exist.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.directory, PathBuf::from("."));
    }
}
