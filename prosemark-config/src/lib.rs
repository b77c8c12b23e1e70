//! Shared configuration loader for the prosemark toolchain.
//!
//! `defaults/prosemark.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`ProsemarkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use prosemark_engine::tree::ElementKind;
use prosemark_engine::SanitizePolicy;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/prosemark.default.toml");

/// Top-level configuration consumed by prosemark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ProsemarkConfig {
    pub sanitize: SanitizeConfig,
    pub convert: ConvertConfig,
}

/// Mirrors the knobs exposed by the engine's sanitizer policy.
///
/// Element names use the spelled-out form (`"inline-code"`, not a tag
/// name) so a config file reads like the editor vocabulary it filters.
#[derive(Debug, Clone, Deserialize)]
pub struct SanitizeConfig {
    pub allowed_elements: Vec<String>,
    pub allowed_attributes: Vec<String>,
    pub allowed_url_schemes: Vec<String>,
}

/// Map a configured element name onto tree kinds. `"heading"` covers all
/// six levels. Unknown names map to nothing, so a config file can name
/// elements a newer binary understands without breaking an older one.
fn element_kinds(name: &str) -> Vec<ElementKind> {
    match name {
        "paragraph" => vec![ElementKind::Paragraph],
        "line-break" => vec![ElementKind::LineBreak],
        "heading" => (1..=6).map(ElementKind::Heading).collect(),
        "bold" => vec![ElementKind::Bold],
        "italic" => vec![ElementKind::Italic],
        "underline" => vec![ElementKind::Underline],
        "inline-code" => vec![ElementKind::InlineCode],
        "code-block" => vec![ElementKind::CodeBlock],
        "blockquote" => vec![ElementKind::Blockquote],
        "unordered-list" => vec![ElementKind::UnorderedList],
        "ordered-list" => vec![ElementKind::OrderedList],
        "list-item" => vec![ElementKind::ListItem],
        "link" => vec![ElementKind::Link],
        "container" => vec![ElementKind::Container],
        _ => Vec::new(),
    }
}

impl From<SanitizeConfig> for SanitizePolicy {
    fn from(config: SanitizeConfig) -> Self {
        Self::from(&config)
    }
}

impl From<&SanitizeConfig> for SanitizePolicy {
    fn from(config: &SanitizeConfig) -> Self {
        SanitizePolicy {
            allowed_kinds: config
                .allowed_elements
                .iter()
                .flat_map(|name| element_kinds(name))
                .collect(),
            allowed_attributes: config.allowed_attributes.iter().cloned().collect(),
            allowed_url_schemes: config.allowed_url_schemes.iter().cloned().collect(),
        }
    }
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub standalone: bool,
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
    pub fn build(self) -> Result<ProsemarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ProsemarkConfig, ConfigError> {
    Loader::new().build()
}
