//! Game content compiled into the binary.

use burnrate_core::StaticBundle;

macro_rules! game_data {
    ($($name:literal),+ $(,)?) => {
        &[$(($name, include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/game_data/", $name)) as &[u8])),+]
    };
}

static GAME_DATA: &[(&str, &[u8])] = game_data![
    "planets.yaml",
    "planet_traits.yaml",
    "commodities.yaml",
    "modules.yaml",
    "events.yaml",
    "crew_roles.yaml",
    "game_settings.yaml",
    "client_settings.yaml",
];

/// The bundle shipped with this build.
pub fn bundle() -> StaticBundle {
    StaticBundle::new(GAME_DATA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burnrate_core::{documents, load_embedded_game_data, ContentBundle, GameDefaults};

    #[test]
    fn every_known_document_is_embedded() {
        let bundle = bundle();
        for doc in documents::DOCUMENTS
            .iter()
            .filter(|doc| doc.kind != documents::DocumentKind::State)
        {
            assert!(bundle.document(doc.name).is_some(), "{} missing", doc.name);
        }
        assert!(load_embedded_game_data(&bundle).is_clean());
    }

    #[test]
    fn embedded_game_settings_parse() {
        let bundle = bundle();
        let raw = bundle
            .document(documents::GAME_SETTINGS)
            .expect("game settings embedded");
        let defaults = GameDefaults::from_yaml(&raw).expect("valid defaults");
        assert_eq!(defaults, GameDefaults::fallback());
    }
}
