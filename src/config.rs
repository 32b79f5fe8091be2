use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VodnavConfig {
    pub library: LibraryConfig,
    pub navigation: NavigationConfig,
    pub system: SystemConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LibraryConfig {
    /// Directory holding the recordings and their JSON metadata sidecars
    #[serde(default = "default_library_path")]
    pub path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NavigationConfig {
    /// Rows added to the visible list by each "show more" request
    #[serde(default = "default_videos_per_page")]
    pub videos_per_page: usize,

    /// File the selected category is persisted to
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SystemConfig {
    /// Read navigation keys from the terminal
    #[serde(default = "default_keyboard_input")]
    pub keyboard_input: bool,
}

impl VodnavConfig {
    /// Load configuration from default sources (file + environment variables)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("vodnav.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            .set_default("library.path", default_library_path())?
            .set_default(
                "navigation.videos_per_page",
                default_videos_per_page() as i64,
            )?
            .set_default("navigation.settings_path", default_settings_path())?
            .set_default("system.keyboard_input", default_keyboard_input())?
            .add_source(File::with_name(&path_str).required(false))
            // VODNAV_NAVIGATION__VIDEOS_PER_PAGE=20
            .add_source(
                Environment::with_prefix("VODNAV")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: VodnavConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.library.path.trim().is_empty() {
            return Err(ConfigError::Message(
                "Library path must not be empty".to_string(),
            ));
        }

        if self.navigation.videos_per_page == 0 {
            return Err(ConfigError::Message(
                "Videos per page must be greater than 0".to_string(),
            ));
        }

        if self.navigation.settings_path.trim().is_empty() {
            return Err(ConfigError::Message(
                "Settings path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for VodnavConfig {
    fn default() -> Self {
        Self {
            library: LibraryConfig {
                path: default_library_path(),
            },
            navigation: NavigationConfig {
                videos_per_page: default_videos_per_page(),
                settings_path: default_settings_path(),
            },
            system: SystemConfig {
                keyboard_input: default_keyboard_input(),
            },
        }
    }
}

/// Commented default configuration, printed by `--print-config`
pub const DEFAULT_CONFIG_TOML: &str = r#"[library]
# Directory holding the recordings and their JSON metadata sidecars
path = "./videos"

[navigation]
# Rows added to the visible list by each "show more" request
videos_per_page = 10
# File the selected category is persisted to
settings_path = "./vodnav-settings.toml"

[system]
# Read navigation keys from the terminal
keyboard_input = true
"#;

fn default_library_path() -> String {
    "./videos".to_string()
}

fn default_videos_per_page() -> usize {
    10
}
fn default_settings_path() -> String {
    "./vodnav-settings.toml".to_string()
}

fn default_keyboard_input() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = VodnavConfig::default();
        assert_eq!(config.navigation.videos_per_page, 10);
        assert!(config.system.keyboard_input);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = VodnavConfig::default();
        config.navigation.videos_per_page = 0;

        // Should fail validation due to empty pages
        assert!(config.validate().is_err());

        config.navigation.videos_per_page = 25;
        assert!(config.validate().is_ok());

        config.navigation.settings_path = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = VodnavConfig::load_from_file(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.library.path, "./videos");
        assert!(config.system.keyboard_input);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[navigation]\nvideos_per_page = 25\n[library]\npath = \"/srv/vods\"").unwrap();

        let config = VodnavConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.navigation.videos_per_page, 25);
        assert_eq!(config.library.path, "/srv/vods");
        assert_eq!(config.navigation.settings_path, "./vodnav-settings.toml");
    }

    #[test]
    fn test_default_toml_parses() {
        let parsed: VodnavConfig = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.navigation.videos_per_page, 10);
    }
}
