#![warn(clippy::all, missing_docs)]

//! Persistence core for Galaxies: Burn Rate.
//!
//! This crate hosts the on-disk layout, first-launch settings extraction,
//! and the save slot repository used by the game shell and any tooling
//! that needs to inspect or create saves.

pub mod bundle;
pub mod config;
pub mod diagnostics;
pub mod documents;
pub mod error;
pub mod models;
pub mod paths;
pub mod save;
pub mod settings;

pub use bundle::{load_embedded_game_data, ContentBundle, DirBundle, MemoryBundle, StaticBundle};
pub use config::AppConfig;
pub use diagnostics::{Outcome, Warning};
pub use error::SaveError;
pub use models::{ClientSettings, GameDefaults, SaveState, SaveSummary};
pub use paths::Paths;
pub use save::{SaveId, SaveRepository};
pub use settings::load_client_settings;
