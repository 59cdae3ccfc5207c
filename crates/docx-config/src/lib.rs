//! Configuration management for DocX.
//!
//! Parses `docx.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.root`
//! - `content.href_prefix`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content root directory.
    pub root: Option<PathBuf>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
    /// Override search backend name.
    pub search_provider: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docx.toml";

const DEFAULT_ROOT: &str = "content/docs";
const DEFAULT_HREF_PREFIX: &str = "/docs";
const DEFAULT_ENTRY_FILE: &str = "main";
const DEFAULT_HIDDEN_MARKER: &str = ".hidden";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (root is a relative string from TOML).
    content: ContentConfigRaw,
    /// Cache configuration.
    pub cache: CacheConfig,
    /// Search configuration.
    pub search: SearchConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    root: Option<String>,
    href_prefix: Option<String>,
    entry_file: Option<String>,
    extensions: Option<Vec<String>>,
    hidden_marker: Option<String>,
}

/// Resolved content layout configuration with an absolute root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// Directory containing one subdirectory per version.
    pub root: PathBuf,
    /// URL prefix for every navigation href (e.g. `/docs`).
    pub href_prefix: String,
    /// Stem of the file that supplies a directory's own page.
    pub entry_file: String,
    /// Content file extensions in priority order, without dots.
    pub extensions: Vec<String>,
    /// Substring that hides an entry from scans.
    pub hidden_marker: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            href_prefix: DEFAULT_HREF_PREFIX.to_owned(),
            entry_file: DEFAULT_ENTRY_FILE.to_owned(),
            extensions: default_extensions(),
            hidden_marker: DEFAULT_HIDDEN_MARKER.to_owned(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["mdx".to_owned(), "md".to_owned()]
}

/// Cache configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether navigation and version lists are cached in memory.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Search configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Name of the search backend (`local` or `index`).
    pub provider: String,
    /// Default maximum number of results.
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: "local".to_owned(),
            limit: 20,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.root`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a name that can be used as a single path component.
fn require_plain_name(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain path separators"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docx.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            require_non_empty(&config.search.provider, "search.provider")?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.root {
            self.content_resolved.root.clone_from(root);
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.cache.enabled = cache_enabled;
        }
        if let Some(provider) = &settings.search_provider {
            self.search.provider.clone_from(provider);
        }
    }

    /// Search for a config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            cache: CacheConfig::default(),
            search: SearchConfig::default(),
            content_resolved: ContentConfig {
                root: base.join(DEFAULT_ROOT),
                ..ContentConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_content()?;
        self.validate_search()?;
        Ok(())
    }

    /// Validate content layout configuration.
    fn validate_content(&self) -> Result<(), ConfigError> {
        let content = &self.content_resolved;

        require_non_empty(&content.entry_file, "content.entry_file")?;
        require_plain_name(&content.entry_file, "content.entry_file")?;

        if content.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "content.extensions must list at least one extension".to_owned(),
            ));
        }
        for (i, ext) in content.extensions.iter().enumerate() {
            require_non_empty(ext, "content.extensions")?;
            require_plain_name(ext, "content.extensions")?;
            if ext.contains('.') {
                return Err(ConfigError::Validation(format!(
                    "content.extensions entry '{ext}' must not contain a dot"
                )));
            }
            if content.extensions[..i].contains(ext) {
                return Err(ConfigError::Validation(format!(
                    "content.extensions lists '{ext}' more than once"
                )));
            }
        }

        let prefix = &content.href_prefix;
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            return Err(ConfigError::Validation(
                "content.href_prefix must be empty or start with '/' and not end with '/'"
                    .to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate search configuration.
    fn validate_search(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.search.provider, "search.provider")?;
        if self.search.limit == 0 {
            return Err(ConfigError::Validation(
                "search.limit must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root) = self.content.root {
            self.content.root = Some(expand::expand_env(root, "content.root")?);
        }
        if let Some(ref prefix) = self.content.href_prefix {
            self.content.href_prefix = Some(expand::expand_env(prefix, "content.href_prefix")?);
        }
        Ok(())
    }

    /// Resolve raw values against the config directory and defaults.
    fn resolve(&mut self, config_dir: &Path) {
        let raw = std::mem::take(&mut self.content);
        self.content_resolved = ContentConfig {
            root: config_dir.join(raw.root.as_deref().unwrap_or(DEFAULT_ROOT)),
            href_prefix: raw
                .href_prefix
                .unwrap_or_else(|| DEFAULT_HREF_PREFIX.to_owned()),
            entry_file: raw
                .entry_file
                .unwrap_or_else(|| DEFAULT_ENTRY_FILE.to_owned()),
            extensions: raw.extensions.unwrap_or_else(default_extensions),
            hidden_marker: raw
                .hidden_marker
                .unwrap_or_else(|| DEFAULT_HIDDEN_MARKER.to_owned()),
        };
    }
}
