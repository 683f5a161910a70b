//! Shared domain models.

use serde::{Deserialize, Serialize};

use crate::save::SaveId;

/// Starting credits used when the bundled game settings are unusable.
pub const FALLBACK_STARTING_CREDITS: i64 = 5000;
/// Starting location used when the bundled game settings are unusable.
pub const FALLBACK_STARTING_LOCATION: &str = "plt_prime";
/// Starting fuel used when the bundled game settings are unusable.
pub const FALLBACK_STARTING_FUEL: i64 = 100;

/// User-editable preferences stored in `client_settings.yaml`.
///
/// A value of `ClientSettings::default()` (all zeroes) means "no usable
/// settings"; the shell substitutes its own runtime defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Window configuration.
    pub display: DisplaySettings,
    /// Developer toggles.
    pub debug: DebugSettings,
}

/// Window size and mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Start in fullscreen.
    pub fullscreen: bool,
}

/// Developer toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Skip the splash screen on launch.
    pub skip_splash: bool,
    /// Enable developer tooling in the front-end.
    pub dev_mode: bool,
}

/// New-game starting values taken from `game_settings.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDefaults {
    /// Credits a new captain starts with.
    pub starting_credits: i64,
    /// Identifier of the planet a new game starts on.
    pub starting_location: String,
    /// Fuel a new ship starts with.
    pub starting_fuel: i64,
}

impl GameDefaults {
    /// Hard-coded values used when the bundled document is missing or broken.
    pub fn fallback() -> Self {
        Self {
            starting_credits: FALLBACK_STARTING_CREDITS,
            starting_location: FALLBACK_STARTING_LOCATION.to_string(),
            starting_fuel: FALLBACK_STARTING_FUEL,
        }
    }

    /// Parse the `player_defaults` section of a `game_settings.yaml` document.
    ///
    /// Other sections of the document are ignored.
    pub fn from_yaml(bytes: &[u8]) -> Result<Self, serde_yaml::Error> {
        let document: GameSettingsDocument = serde_yaml::from_slice(bytes)?;
        Ok(document.player_defaults)
    }
}

#[derive(Deserialize)]
struct GameSettingsDocument {
    player_defaults: GameDefaults,
}

/// Dynamic state of one save slot, stored as `save_state.yaml`.
///
/// Only the names are mandatory; counters and location written by older
/// builds may be absent and read as zero / empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    /// Player character name.
    pub captain_name: String,
    /// Name of the player's ship.
    pub ship_name: String,
    /// Current credit balance.
    #[serde(default)]
    pub credits: i64,
    /// In-game day, starting at 1.
    #[serde(default)]
    pub current_day: u32,
    /// Identifier of the current location.
    #[serde(default)]
    pub current_location: String,
    /// Remaining fuel.
    #[serde(default)]
    pub current_fuel: i64,
}

impl SaveState {
    /// Day-one state for a new captain.
    pub fn new_game(
        captain_name: impl Into<String>,
        ship_name: impl Into<String>,
        defaults: &GameDefaults,
    ) -> Self {
        Self {
            captain_name: captain_name.into(),
            ship_name: ship_name.into(),
            credits: defaults.starting_credits,
            current_day: 1,
            current_location: defaults.starting_location.clone(),
            current_fuel: defaults.starting_fuel,
        }
    }
}

/// Load-screen projection of a slot's [`SaveState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    /// Slot identifier (the directory name).
    pub save_id: String,
    /// Player character name.
    pub captain_name: String,
    /// Name of the player's ship.
    pub ship_name: String,
    /// Current credit balance.
    pub credits: i64,
    /// In-game day.
    pub current_day: u32,
    /// Identifier of the current location.
    pub current_location: String,
    /// Remaining fuel.
    pub current_fuel: i64,
}

impl SaveSummary {
    /// Project `state` for the slot `id`.
    pub fn new(id: &SaveId, state: SaveState) -> Self {
        Self {
            save_id: id.to_string(),
            captain_name: state.captain_name,
            ship_name: state.ship_name,
            credits: state.credits,
            current_day: state.current_day,
            current_location: state.current_location,
            current_fuel: state.current_fuel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_settings_parse_nested_sections() {
        let yaml = "display:\n  width: 1920\n  height: 1080\n  fullscreen: true\ndebug:\n  skip_splash: true\n  dev_mode: false\n";
        let settings: ClientSettings = serde_yaml::from_str(yaml).expect("valid settings");
        assert_eq!(settings.display.width, 1920);
        assert_eq!(settings.display.height, 1080);
        assert!(settings.display.fullscreen);
        assert!(settings.debug.skip_splash);
        assert!(!settings.debug.dev_mode);
    }

    #[test]
    fn client_settings_tolerate_missing_sections() {
        let settings: ClientSettings =
            serde_yaml::from_str("display:\n  width: 800\n").expect("valid settings");
        assert_eq!(settings.display.width, 800);
        assert_eq!(settings.display.height, 0);
        assert_eq!(settings.debug, DebugSettings::default());
    }

    #[test]
    fn game_defaults_read_player_section() {
        let yaml = b"player_defaults:\n  starting_credits: 7500\n  starting_location: plt_vesta\n  starting_fuel: 80\neconomy:\n  inflation: 0.02\n";
        let defaults = GameDefaults::from_yaml(yaml).expect("valid defaults");
        assert_eq!(defaults.starting_credits, 7500);
        assert_eq!(defaults.starting_location, "plt_vesta");
        assert_eq!(defaults.starting_fuel, 80);
    }

    #[test]
    fn game_defaults_reject_incomplete_section() {
        let yaml = b"player_defaults:\n  starting_credits: 7500\n";
        assert!(GameDefaults::from_yaml(yaml).is_err());
        assert!(GameDefaults::from_yaml(b"[not, a, map]").is_err());
    }

    #[test]
    fn new_game_starts_on_day_one() {
        let state = SaveState::new_game("Rho", "Wanderer", &GameDefaults::fallback());
        assert_eq!(state.current_day, 1);
        assert_eq!(state.credits, 5000);
        assert_eq!(state.current_location, "plt_prime");
        assert_eq!(state.current_fuel, 100);
    }

    #[test]
    fn save_state_requires_names_only() {
        let state: SaveState =
            serde_yaml::from_str("captain_name: Rho\nship_name: Wanderer\ncurrent_day: 12\n")
                .expect("lenient state");
        assert_eq!(state.current_day, 12);
        assert_eq!(state.current_fuel, 0);
        assert!(serde_yaml::from_str::<SaveState>("credits: 10\n").is_err());
    }

    #[test]
    fn summary_serializes_with_save_id() {
        let id = SaveId::parse("save_1700000000").expect("valid id");
        let state = SaveState::new_game("Rho", "Wanderer", &GameDefaults::fallback());
        let summary = SaveSummary::new(&id, state);
        let json = serde_json::to_value(&summary).expect("serializable");
        assert_eq!(json["save_id"], "save_1700000000");
        assert_eq!(json["captain_name"], "Rho");
        assert_eq!(json["current_day"], 1);
    }
}
