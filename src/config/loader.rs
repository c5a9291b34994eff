//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (<platform config dir>/postscribe/config.toml)
//! 3. Project config (./postscribe.toml, or the file given with --config)
//! 4. Environment variables (POSTSCRIBE_* prefix, `__` between sections)

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::paths;
use crate::types::{Result, ScribeError};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_with(None)
    }

    /// Load configuration, replacing the project file with `project_file` when given
    pub fn load_with(project_file: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = project_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::project_config_path);
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        } else if project_file.is_some() {
            return Err(ScribeError::Config(format!(
                "Config file not found: {}",
                project_path.display()
            )));
        }

        // Merge environment variables (e.g., POSTSCRIBE_DOCS__TITLE -> docs.title)
        figment = figment.merge(Env::prefixed("POSTSCRIBE_").split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ScribeError::Config(format!("Configuration error: {}", e)))?;

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| ScribeError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory
    pub fn global_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "postscribe").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(paths::PROJECT_CONFIG)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Render the effective configuration as TOML or JSON
    pub fn render_config(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| ScribeError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write a starter project config into `dir`
    pub fn init_project_at(dir: &Path, force: bool) -> Result<PathBuf> {
        let config_path = dir.join(paths::PROJECT_CONFIG);
        if config_path.exists() && !force {
            return Err(ScribeError::Config(format!(
                "{} already exists. Use --force to overwrite.",
                config_path.display()
            )));
        }

        fs::write(&config_path, Self::default_project_config())?;
        info!("Created project config: {}", config_path.display());

        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default project config content (TOML)
    fn default_project_config() -> String {
        format!(
            r#"# postscribe project configuration
# Environment variables override these, e.g. POSTSCRIBE_DOCS__TITLE="My API".

version = "1.0"

[collection]
path = "{collection}"
# base_url = "http://localhost:8000/api"

[docs]
output = "{docs}"
# title = "My API"
max_raw_body_chars = 500

[log]
output = "{log}"

[scaffold]
output = "{collection}"
"#,
            collection = paths::DEFAULT_COLLECTION,
            docs = paths::DEFAULT_DOCS_OUTPUT,
            log = paths::DEFAULT_LOG_OUTPUT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    #[serial_test::serial]
    fn test_load_default_config() {
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.version, "1.0");
    }

    #[test]
    fn test_init_project_writes_loadable_file() {
        let temp_dir = TempDir::new().unwrap();

        let path = ConfigLoader::init_project_at(temp_dir.path(), false).unwrap();
        assert!(path.exists());

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.docs.max_raw_body_chars, 500);
        assert_eq!(config.log.output, PathBuf::from("API_VERIFICATION_LOG.md"));

        // Second init without force refuses to overwrite
        assert!(ConfigLoader::init_project_at(temp_dir.path(), false).is_err());
        assert!(ConfigLoader::init_project_at(temp_dir.path(), true).is_ok());
    }

    #[test]
    fn test_load_from_file_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(
            &path,
            "[docs]\ntitle = \"Petstore\"\n\n[collection]\nbase_url = \"https://pets.example.com\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.docs.title.as_deref(), Some("Petstore"));
        assert_eq!(
            config.collection.base_url.as_deref(),
            Some("https://pets.example.com")
        );
    }

    #[test]
    #[serial_test::serial]
    fn test_missing_explicit_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(ConfigLoader::load_with(Some(&missing)).is_err());
    }

    #[test]
    #[serial_test::serial]
    fn test_env_override() {
        // SAFETY: every test that loads from the environment is #[serial]
        unsafe {
            std::env::set_var("POSTSCRIBE_LOG__OUTPUT", "checklist.md");
        }
        let loaded = ConfigLoader::load();
        unsafe {
            std::env::remove_var("POSTSCRIBE_LOG__OUTPUT");
        }
        assert_eq!(loaded.unwrap().log.output, PathBuf::from("checklist.md"));
    }

    #[test]
    fn test_render_config_json() {
        let rendered = ConfigLoader::render_config(&Config::default(), true).unwrap();
        assert!(rendered.contains("\"max_raw_body_chars\": 500"));
    }
}
