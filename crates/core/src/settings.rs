//! First-launch extraction and loading of `client_settings.yaml`.

use std::{fs, io};

use tracing::{debug, info};

use crate::{
    bundle::ContentBundle,
    diagnostics::{Diagnostics, Outcome, Warning},
    documents::CLIENT_SETTINGS,
    models::ClientSettings,
    paths::Paths,
};

/// Return the effective client settings, extracting the bundled default on first launch.
///
/// The on-disk file is only ever created, never overwritten, so user edits
/// survive upgrades that change the bundled default. Any failure degrades
/// to `ClientSettings::default()` plus warnings; startup is never blocked.
pub fn load_client_settings(paths: &Paths, bundle: &dyn ContentBundle) -> Outcome<ClientSettings> {
    let mut diagnostics = Diagnostics::new();
    let app_root = paths.app_root();
    let settings_path = paths.settings_path();

    if let Err(err) = fs::create_dir_all(&app_root) {
        diagnostics.push(Warning::io("failed to create", &app_root, err));
    }

    match settings_path.try_exists() {
        Ok(true) => debug!("using existing {}", settings_path.display()),
        Ok(false) => extract_default(paths, bundle, &mut diagnostics),
        Err(err) => diagnostics.push(Warning::io("failed to inspect", &settings_path, err)),
    }

    let content = match fs::read(&settings_path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            // extraction already explained why the file is missing
            return diagnostics.finish(ClientSettings::default());
        }
        Err(err) => {
            diagnostics.push(Warning::io("failed to read", &settings_path, err));
            return diagnostics.finish(ClientSettings::default());
        }
    };

    let settings = match serde_yaml::from_slice::<ClientSettings>(&content) {
        Ok(settings) => settings,
        Err(err) => {
            diagnostics.push(Warning::parse(&settings_path, err));
            ClientSettings::default()
        }
    };
    diagnostics.finish(settings)
}

fn extract_default(paths: &Paths, bundle: &dyn ContentBundle, diagnostics: &mut Diagnostics) {
    let settings_path = paths.settings_path();
    info!(
        "first launch detected, extracting default {CLIENT_SETTINGS} to {}",
        settings_path.display()
    );

    let Some(default) = bundle.document(CLIENT_SETTINGS) else {
        diagnostics.push(Warning::MissingBundleDocument {
            name: CLIENT_SETTINGS.to_string(),
        });
        return;
    };

    if let Err(err) = fs::write(&settings_path, &*default) {
        diagnostics.push(Warning::io("failed to write", &settings_path, err));
    }
}
