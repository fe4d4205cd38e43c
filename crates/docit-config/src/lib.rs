//! Configuration management for Docit.
//!
//! Parses `docit.toml` configuration files with serde and provides
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
//! - `menu.view`
//! - `links.base_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the menu view name.
    pub view: Option<String>,
    /// Override the menu definition file.
    pub definition: Option<PathBuf>,
    /// Override the base URL used for document links.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docit.toml";

/// View rendered when none is configured.
const DEFAULT_VIEW: &str = "docit::partials/menu";

/// Menu definition filename used when none is configured.
const DEFAULT_DEFINITION: &str = "menu.yml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Menu configuration (paths are relative strings from TOML).
    menu: MenuConfigRaw,
    /// View directories (relative strings from TOML).
    views: ViewsConfigRaw,
    /// Link generation configuration.
    pub links: LinksConfig,

    /// Resolved menu configuration (set after loading).
    #[serde(skip)]
    pub menu_resolved: MenuConfig,
    /// Resolved view configuration (set after loading).
    #[serde(skip)]
    pub views_resolved: ViewsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw menu configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct MenuConfigRaw {
    view: Option<String>,
    definition: Option<String>,
}

/// Resolved menu configuration with absolute paths.
#[derive(Debug, Default)]
pub struct MenuConfig {
    /// View name passed to the templating service.
    pub view: String,
    /// Menu definition file.
    pub definition: PathBuf,
}

/// Raw views configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ViewsConfigRaw {
    dirs: Option<Vec<String>>,
}

/// Resolved views configuration.
#[derive(Debug, Default)]
pub struct ViewsConfig {
    /// Template override directories, searched in order.
    pub dirs: Vec<PathBuf>,
}

/// Link generation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Prefix joined with document paths.
    pub base_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_owned(),
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
        /// Config field path (e.g., "`links.base_url`").
        field: String,
        /// Error message (e.g., "${`DOCIT_BASE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docit.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(view) = &settings.view {
            self.menu_resolved.view.clone_from(view);
        }
        if let Some(definition) = &settings.definition {
            self.menu_resolved.definition.clone_from(definition);
        }
        if let Some(base_url) = &settings.base_url {
            self.links.base_url.clone_from(base_url);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
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
            menu: MenuConfigRaw::default(),
            views: ViewsConfigRaw::default(),
            links: LinksConfig::default(),
            menu_resolved: MenuConfig {
                view: DEFAULT_VIEW.to_owned(),
                definition: base.join(DEFAULT_DEFINITION),
            },
            views_resolved: ViewsConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.menu_resolved.view, "menu.view")?;
        require_non_empty(&self.links.base_url, "links.base_url")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref view) = self.menu.view {
            self.menu.view = Some(expand::expand_env(view, "menu.view")?);
        }
        self.links.base_url = expand::expand_env(&self.links.base_url, "links.base_url")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.menu_resolved = MenuConfig {
            view: self
                .menu
                .view
                .clone()
                .unwrap_or_else(|| DEFAULT_VIEW.to_owned()),
            definition: config_dir.join(
                self.menu
                    .definition
                    .as_deref()
                    .unwrap_or(DEFAULT_DEFINITION),
            ),
        };

        self.views_resolved = ViewsConfig {
            dirs: self
                .views
                .dirs
                .iter()
                .flatten()
                .map(|d| config_dir.join(d))
                .collect(),
        };
    }
}
