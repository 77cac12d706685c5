//! Shared configuration loader for include-code.
//!
//! `defaults/include-code.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer a project file, user files, and
//! `INCLUDE_CODE_*` environment variables on top of those defaults via [`Loader`] before
//! deserializing into [`IncludeCodeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, Map, ValueKind};
use include_code::ResolverOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/include-code.default.toml");

/// Project-level configuration file picked up from the working directory.
pub const PROJECT_CONFIG_FILE: &str = "include-code.toml";

/// Prefix of environment variables read by [`Loader::with_environment`].
pub const ENV_PREFIX: &str = "INCLUDE_CODE";

/// Top-level configuration consumed by include-code applications.
#[derive(Debug, Clone, Deserialize)]
pub struct IncludeCodeConfig {
    pub resolver: ResolverConfig,
    pub source_link: SourceLinkConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    pub root_dir: PathBuf,
}

/// Where attribution links point.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceLinkConfig {
    pub repository: String,
    pub default_tag: String,
    #[serde(default)]
    pub commit_tag: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Registry name of the fallback output format
    pub format: String,
}

impl From<&IncludeCodeConfig> for ResolverOptions {
    fn from(config: &IncludeCodeConfig) -> Self {
        ResolverOptions {
            root_dir: config.resolver.root_dir.clone(),
            repository: config.source_link.repository.clone(),
            default_tag: config.source_link.default_tag.clone(),
            commit_tag: config.source_link.commit_tag.clone(),
        }
    }
}

impl From<IncludeCodeConfig> for ResolverOptions {
    fn from(config: IncludeCodeConfig) -> Self {
        ResolverOptions {
            root_dir: config.resolver.root_dir,
            repository: config.source_link.repository,
            default_tag: config.source_link.default_tag,
            commit_tag: config.source_link.commit_tag,
        }
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

    /// Layer `INCLUDE_CODE_*` variables from the process environment.
    ///
    /// `__` separates nesting levels: `INCLUDE_CODE_SOURCE_LINK__COMMIT_TAG`
    /// sets `source_link.commit_tag`.
    pub fn with_environment(self) -> Self {
        self.with_environment_source(None)
    }

    /// Like [`Loader::with_environment`], reading from `vars` instead of the process.
    pub fn with_environment_vars(self, vars: Map<String, String>) -> Self {
        self.with_environment_source(Some(vars))
    }

    fn with_environment_source(mut self, vars: Option<Map<String, String>>) -> Self {
        let source = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(vars);
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
    pub fn build(self) -> Result<IncludeCodeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<IncludeCodeConfig, ConfigError> {
    Loader::new().build()
}
