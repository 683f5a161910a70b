//! On-disk layout under the user configuration directory.
//!
//! ```text
//! <config-root>/<app-folder>/client_settings.yaml
//! <config-root>/<app-folder>/saves/<save-id>/save_state.yaml
//! ```
//!
//! Resolution never touches the filesystem; callers create directories
//! at the point of first write.

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{
    config::AppConfig,
    diagnostics::{Diagnostics, Outcome, Warning},
    documents,
    save::SaveId,
};

/// Directory (below the app root) holding one subdirectory per save slot.
pub const SAVES_DIR: &str = "saves";

/// Resolved locations for one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    config_root: PathBuf,
    app_folder: String,
}

impl Paths {
    /// Build paths from an explicit config root and app folder name.
    pub fn new(config_root: impl Into<PathBuf>, app_folder: impl Into<String>) -> Self {
        Self {
            config_root: config_root.into(),
            app_folder: app_folder.into(),
        }
    }

    /// Resolve paths for `config`, consulting the platform when no root is configured.
    ///
    /// Falls back to the working directory with a
    /// [`Warning::ConfigDirUnavailable`] when the platform has no config dir.
    pub fn resolve(config: &AppConfig) -> Outcome<Self> {
        let mut diagnostics = Diagnostics::new();
        let root = match &config.config_root {
            Some(root) => root.clone(),
            None => platform_config_root(dirs::config_dir(), &mut diagnostics),
        };
        diagnostics.finish(Self::new(root, config.app_folder.clone()))
    }

    /// The user configuration directory everything lives under.
    pub fn config_root(&self) -> &Path {
        &self.config_root
    }

    /// `<config-root>/<app-folder>`.
    pub fn app_root(&self) -> PathBuf {
        self.config_root.join(&self.app_folder)
    }

    /// `<app-root>/client_settings.yaml`.
    pub fn settings_path(&self) -> PathBuf {
        self.app_root().join(documents::CLIENT_SETTINGS)
    }

    /// `<app-root>/saves`.
    pub fn saves_root(&self) -> PathBuf {
        self.app_root().join(SAVES_DIR)
    }

    /// `<app-root>/saves/<id>`.
    pub fn slot_path(&self, id: &SaveId) -> PathBuf {
        self.saves_root().join(id.as_str())
    }

    /// `<app-root>/saves/<id>/save_state.yaml`.
    pub fn state_path(&self, id: &SaveId) -> PathBuf {
        self.slot_path(id).join(documents::SAVE_STATE)
    }
}

fn platform_config_root(platform: Option<PathBuf>, diagnostics: &mut Diagnostics) -> PathBuf {
    if let Some(dir) = platform {
        return dir;
    }
    let fallback = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    diagnostics.push(Warning::ConfigDirUnavailable {
        fallback: fallback.clone(),
    });
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_expected_tree() {
        let paths = Paths::new("/home/rho/.config", "GalaxiesBurnRate");
        let id = SaveId::parse("save_1700000000").expect("valid id");

        assert_eq!(
            paths.app_root(),
            PathBuf::from("/home/rho/.config/GalaxiesBurnRate")
        );
        assert_eq!(
            paths.settings_path(),
            PathBuf::from("/home/rho/.config/GalaxiesBurnRate/client_settings.yaml")
        );
        assert_eq!(
            paths.saves_root(),
            PathBuf::from("/home/rho/.config/GalaxiesBurnRate/saves")
        );
        assert_eq!(
            paths.state_path(&id),
            PathBuf::from("/home/rho/.config/GalaxiesBurnRate/saves/save_1700000000/save_state.yaml")
        );
    }

    #[test]
    fn configured_root_skips_platform_lookup() {
        let config = AppConfig::with_config_root("/srv/portable");
        let outcome = Paths::resolve(&config);
        assert!(outcome.is_clean());
        assert_eq!(outcome.value.config_root(), Path::new("/srv/portable"));
    }

    #[test]
    fn missing_platform_dir_falls_back_with_warning() {
        let mut diagnostics = Diagnostics::new();
        let root = platform_config_root(None, &mut diagnostics);
        let outcome = diagnostics.finish(root);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(matches!(
            &outcome.warnings[0],
            Warning::ConfigDirUnavailable { fallback } if *fallback == outcome.value
        ));
    }
}
