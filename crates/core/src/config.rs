//! Application configuration loaded from defaults, an optional file and the environment.

use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Folder created under the user config directory.
pub const DEFAULT_APP_FOLDER: &str = "GalaxiesBurnRate";

/// Prefix for environment overrides (e.g. `BURNRATE_CONFIG_ROOT`).
pub const ENV_PREFIX: &str = "BURNRATE";

/// Runtime configuration for the persistence layer and its front-ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the folder under the config root holding settings and saves.
    #[serde(default = "default_app_folder")]
    pub app_folder: String,
    /// Overrides the platform user config directory when set.
    #[serde(default)]
    pub config_root: Option<PathBuf>,
    /// Serve content from this directory instead of the embedded bundle.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_app_folder() -> String {
    DEFAULT_APP_FOLDER.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_folder: default_app_folder(),
            config_root: None,
            data_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration, layering `file` (if present) between defaults and the environment.
    ///
    /// Fails when `app_folder` is not a single plain folder name.
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("app_folder", DEFAULT_APP_FOLDER)
            .context("failed to seed default configuration")?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("failed to build configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("failed to deserialize configuration")?;
        config.normalized().validated()
    }

    /// Config pointing at an explicit root, bypassing platform lookup.
    pub fn with_config_root(root: impl Into<PathBuf>) -> Self {
        Self {
            config_root: Some(root.into()),
            ..Self::default()
        }
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.app_folder.trim();
        if trimmed.is_empty() {
            self.app_folder = default_app_folder();
        } else if trimmed.len() != self.app_folder.len() {
            self.app_folder = trimmed.to_string();
        }
        self
    }

    fn validated(self) -> Result<Self> {
        let mut components = Path::new(&self.app_folder).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self),
            _ => bail!(
                "app_folder must be a single folder name, got {:?}",
                self.app_folder
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_use_fixed_app_folder() {
        let config = AppConfig::default();
        assert_eq!(config.app_folder, "GalaxiesBurnRate");
        assert!(config.config_root.is_none());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn file_overrides_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("burnrate.toml");
        fs::write(
            &path,
            "app_folder = \"BurnRateDev\"\nconfig_root = \"/tmp/burnrate\"\n",
        )?;

        let config = AppConfig::load_from(Some(path.as_path()))?;
        assert_eq!(config.app_folder, "BurnRateDev");
        assert_eq!(config.config_root, Some(PathBuf::from("/tmp/burnrate")));
        Ok(())
    }

    #[test]
    fn missing_file_is_not_an_error() -> Result<()> {
        let dir = tempdir()?;
        let absent = dir.path().join("absent.toml");
        let config = AppConfig::load_from(Some(absent.as_path()))?;
        assert!(!config.app_folder.is_empty());
        Ok(())
    }

    #[test]
    fn blank_app_folder_falls_back() {
        let config = AppConfig {
            app_folder: "   ".to_string(),
            ..AppConfig::default()
        }
        .normalized();
        assert_eq!(config.app_folder, DEFAULT_APP_FOLDER);
    }

    #[test]
    fn app_folder_must_stay_under_config_root() -> Result<()> {
        let dir = tempdir()?;
        for folder in ["../escape", "/tmp/elsewhere", "nested/folder", ".."] {
            let path = dir.path().join("burnrate.toml");
            fs::write(&path, format!("app_folder = {folder:?}\n"))?;
            assert!(
                AppConfig::load_from(Some(path.as_path())).is_err(),
                "{folder} accepted"
            );
        }
        Ok(())
    }

    #[test]
    fn plain_app_folder_is_valid() -> Result<()> {
        let config = AppConfig {
            app_folder: " BurnRateDev ".to_string(),
            ..AppConfig::default()
        }
        .normalized()
        .validated()?;
        assert_eq!(config.app_folder, "BurnRateDev");
        Ok(())
    }
}
