//! The fixed table of documents the persistence layer knows about.
//!
//! Extraction, slot creation, slot loading and bundle export all iterate
//! this table, so adding a content file means adding one row here.

/// Logical filename of the user-editable settings document.
pub const CLIENT_SETTINGS: &str = "client_settings.yaml";
/// Logical filename of the static new-game settings document.
pub const GAME_SETTINGS: &str = "game_settings.yaml";
/// Logical filename of the per-slot dynamic state document.
pub const SAVE_STATE: &str = "save_state.yaml";

/// Where a document comes from and where it ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Read-only game content, copied into every slot.
    Static,
    /// Installation-wide settings, extracted once to the app root.
    Settings,
    /// Per-slot dynamic state, written by the repository.
    State,
}

/// One row of the document table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSpec {
    /// Logical filename, identical in the bundle and on disk.
    pub name: &'static str,
    /// Document role.
    pub kind: DocumentKind,
    /// A slot without this document is not a valid slot.
    pub required: bool,
}

impl DocumentSpec {
    const fn new(name: &'static str, kind: DocumentKind, required: bool) -> Self {
        Self {
            name,
            kind,
            required,
        }
    }
}

/// Every document known to the persistence layer.
pub const DOCUMENTS: &[DocumentSpec] = &[
    DocumentSpec::new("planets.yaml", DocumentKind::Static, false),
    DocumentSpec::new("planet_traits.yaml", DocumentKind::Static, false),
    DocumentSpec::new("commodities.yaml", DocumentKind::Static, false),
    DocumentSpec::new("modules.yaml", DocumentKind::Static, false),
    DocumentSpec::new("events.yaml", DocumentKind::Static, false),
    DocumentSpec::new("crew_roles.yaml", DocumentKind::Static, false),
    DocumentSpec::new(GAME_SETTINGS, DocumentKind::Static, false),
    DocumentSpec::new(CLIENT_SETTINGS, DocumentKind::Settings, false),
    DocumentSpec::new(SAVE_STATE, DocumentKind::State, true),
];

/// Static content documents, in table order.
pub fn static_documents() -> impl Iterator<Item = &'static DocumentSpec> {
    of_kind(DocumentKind::Static)
}

/// Documents stored inside a save slot: static content plus the state document.
pub fn slot_documents() -> impl Iterator<Item = &'static DocumentSpec> {
    DOCUMENTS
        .iter()
        .filter(|doc| matches!(doc.kind, DocumentKind::Static | DocumentKind::State))
}

/// Slot documents whose absence means the directory is not a slot.
pub fn required_slot_documents() -> impl Iterator<Item = &'static DocumentSpec> {
    slot_documents().filter(|doc| doc.required)
}

fn of_kind(kind: DocumentKind) -> impl Iterator<Item = &'static DocumentSpec> {
    DOCUMENTS.iter().filter(move |doc| doc.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_documents_exclude_client_settings() {
        let names: Vec<_> = slot_documents().map(|doc| doc.name).collect();
        assert_eq!(names.len(), 8);
        assert!(names.contains(&SAVE_STATE));
        assert!(names.contains(&GAME_SETTINGS));
        assert!(!names.contains(&CLIENT_SETTINGS));
    }

    #[test]
    fn only_state_is_required() {
        let required: Vec<_> = required_slot_documents().map(|doc| doc.name).collect();
        assert_eq!(required, vec![SAVE_STATE]);
    }
}
