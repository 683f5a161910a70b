//! Save slot persistence.
//!
//! Each slot is a directory under the saves root holding a frozen copy of
//! every static content document plus one `save_state.yaml`. The
//! repository assumes at most one mutating call in flight at a time.

use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::Path,
};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    bundle::ContentBundle,
    diagnostics::{Diagnostics, Outcome, Warning},
    documents::{self, GAME_SETTINGS},
    error::{Result, SaveError},
    models::{GameDefaults, SaveState, SaveSummary},
    paths::Paths,
};

/// Prefix shared by every generated save identifier.
pub const SAVE_ID_PREFIX: &str = "save_";

/// Upper bound on same-second identifiers tried before giving up.
const MAX_ID_ATTEMPTS: u32 = 1000;

static SAVE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("invalid save id regex"));

/// Identifier of a save slot, safe to join onto the saves root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SaveId(String);

impl SaveId {
    /// Validate an identifier received from a caller or read from disk.
    ///
    /// Only ASCII letters, digits, `_` and `-` are accepted, which rules
    /// out separators and `..`.
    pub fn parse(raw: &str) -> Option<Self> {
        SAVE_ID_RE.is_match(raw).then(|| Self(raw.to_string()))
    }

    /// `save_<timestamp>` for the first slot in a second, `save_<timestamp>_<n>` after that.
    fn for_timestamp(timestamp: i64, sequence: u32) -> Self {
        if sequence == 0 {
            Self(format!("{SAVE_ID_PREFIX}{timestamp}"))
        } else {
            Self(format!("{SAVE_ID_PREFIX}{timestamp}_{sequence}"))
        }
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SaveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SaveId {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid save id {value:?}"))
    }
}

impl From<SaveId> for String {
    fn from(id: SaveId) -> Self {
        id.0
    }
}

/// Creates, loads and enumerates save slots.
#[derive(Debug, Clone)]
pub struct SaveRepository {
    paths: Paths,
}

impl SaveRepository {
    /// Create a repository over the given layout.
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    /// Layout this repository reads and writes.
    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// Start a new game for `captain_name` aboard `ship_name`.
    ///
    /// See [`SaveRepository::create_new_save_at`].
    pub fn create_new_save(
        &self,
        bundle: &dyn ContentBundle,
        captain_name: &str,
        ship_name: &str,
    ) -> Result<Outcome<SaveId>> {
        self.create_new_save_at(bundle, captain_name, ship_name, Utc::now())
    }

    /// Start a new game, deriving the identifier from `now`.
    ///
    /// Static documents are copied best-effort: a missing or unwritable
    /// document becomes a warning. Failing to create the slot or to write
    /// the state document is an error. Partially populated slots are left
    /// in place.
    pub fn create_new_save_at(
        &self,
        bundle: &dyn ContentBundle,
        captain_name: &str,
        ship_name: &str,
        now: DateTime<Utc>,
    ) -> Result<Outcome<SaveId>> {
        let mut diagnostics = Diagnostics::new();
        let saves_root = self.paths.saves_root();
        fs::create_dir_all(&saves_root)
            .map_err(|err| SaveError::io("create", &saves_root, err))?;

        let id = self.allocate_slot(now.timestamp())?;
        let slot = self.paths.slot_path(&id);

        copy_static_documents(bundle, &slot, &mut diagnostics);

        let defaults = match bundle.document(GAME_SETTINGS) {
            Some(content) => game_defaults(&content, &mut diagnostics),
            // already reported while copying
            None => GameDefaults::fallback(),
        };
        let state = SaveState::new_game(captain_name, ship_name, &defaults);
        let serialized = serde_yaml::to_string(&state)?;
        let state_path = self.paths.state_path(&id);
        fs::write(&state_path, serialized)
            .map_err(|err| SaveError::io("write", &state_path, err))?;

        info!(save_id = %id, captain = %captain_name, ship = %ship_name, "new save created");
        Ok(diagnostics.finish(id))
    }

    /// Read every slot document for `id` as `{filename: content}`.
    ///
    /// Missing or unreadable files are omitted with a warning. An unknown
    /// or malformed identifier yields an empty map rather than an error.
    pub fn load_save_game(&self, id: &str) -> Outcome<BTreeMap<String, String>> {
        let mut diagnostics = Diagnostics::new();
        let mut data = BTreeMap::new();

        let Some(id) = SaveId::parse(id) else {
            diagnostics.push(Warning::InvalidSaveId { id: id.to_string() });
            return diagnostics.finish(data);
        };

        let slot = self.paths.slot_path(&id);
        for doc in documents::slot_documents() {
            let path = slot.join(doc.name);
            match fs::read_to_string(&path) {
                Ok(content) => {
                    debug!("loaded {}", path.display());
                    data.insert(doc.name.to_string(), content);
                }
                Err(err) => diagnostics.push(Warning::io("failed to read", &path, err)),
            }
        }

        diagnostics.finish(data)
    }

    /// Typed read of one slot's state document.
    pub fn load_save_state(&self, id: &SaveId) -> Outcome<Option<SaveState>> {
        let mut diagnostics = Diagnostics::new();
        let path = self.paths.state_path(id);
        let state = match read_state(&path) {
            Ok(Some(state)) => Some(state),
            Ok(None) => {
                diagnostics.push(Warning::io(
                    "failed to read",
                    &path,
                    io::Error::from(io::ErrorKind::NotFound),
                ));
                None
            }
            Err(warning) => {
                diagnostics.push(warning);
                None
            }
        };
        diagnostics.finish(state)
    }

    /// Summaries of every valid slot, sorted by identifier.
    ///
    /// Directories without a state document are not slots and are skipped
    /// silently; a corrupt state document is skipped with a warning. A
    /// missing saves root is the normal fresh-install case and yields an
    /// empty list.
    pub fn get_available_saves(&self) -> Outcome<Vec<SaveSummary>> {
        let mut diagnostics = Diagnostics::new();
        let mut saves = Vec::new();
        let saves_root = self.paths.saves_root();

        let entries = match fs::read_dir(&saves_root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return diagnostics.finish(saves);
            }
            Err(err) => {
                diagnostics.push(Warning::io("failed to list", &saves_root, err));
                return diagnostics.finish(saves);
            }
        };

        for entry in entries.filter_map(|entry| entry.ok()) {
            if !entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                continue;
            }
            let name = entry.file_name();
            let Some(id) = name.to_str().and_then(SaveId::parse) else {
                debug!("ignoring directory {:?} in saves root", name);
                continue;
            };

            let slot = entry.path();
            if let Some(doc) = documents::required_slot_documents()
                .find(|doc| !slot.join(doc.name).is_file())
            {
                debug!("skipping {id}: no {}", doc.name);
                continue;
            }

            let Outcome { value, warnings } = self.load_save_state(&id);
            diagnostics.extend(warnings);
            if let Some(state) = value {
                saves.push(SaveSummary::new(&id, state));
            }
        }

        saves.sort_by(|a, b| a.save_id.cmp(&b.save_id));
        diagnostics.finish(saves)
    }

    fn allocate_slot(&self, timestamp: i64) -> Result<SaveId> {
        for sequence in 0..MAX_ID_ATTEMPTS {
            let id = SaveId::for_timestamp(timestamp, sequence);
            let slot = self.paths.slot_path(&id);
            match fs::create_dir(&slot) {
                Ok(()) => return Ok(id),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(SaveError::io("create", &slot, err)),
            }
        }
        Err(SaveError::IdExhausted {
            timestamp,
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

/// Copy every static document into `slot`, recording what could not be copied.
fn copy_static_documents(bundle: &dyn ContentBundle, slot: &Path, diagnostics: &mut Diagnostics) {
    for doc in documents::static_documents() {
        let Some(content) = bundle.document(doc.name) else {
            diagnostics.push(Warning::MissingBundleDocument {
                name: doc.name.to_string(),
            });
            continue;
        };
        let target = slot.join(doc.name);
        if let Err(err) = fs::write(&target, &*content) {
            diagnostics.push(Warning::io("failed to write", &target, err));
        }
    }
}

fn game_defaults(content: &[u8], diagnostics: &mut Diagnostics) -> GameDefaults {
    GameDefaults::from_yaml(content).unwrap_or_else(|err| {
        diagnostics.push(Warning::parse(GAME_SETTINGS, err));
        GameDefaults::fallback()
    })
}

/// `Ok(None)` when the file does not exist, `Err` when it exists but is unusable.
fn read_state(path: &Path) -> std::result::Result<Option<SaveState>, Warning> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(Warning::io("failed to read", path, err)),
    };
    serde_yaml::from_slice(&content)
        .map(Some)
        .map_err(|err| Warning::parse(path, err))
}
