//! Read-only access to the game's bundled content documents.

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    fs, io,
    path::PathBuf,
};

use tracing::debug;

use crate::{
    diagnostics::{Diagnostics, Outcome, Warning},
    documents,
};

/// Lookup of bundled documents by logical filename.
///
/// The persistence layer only ever asks for names from
/// [`documents::DOCUMENTS`]; it never enumerates a bundle.
pub trait ContentBundle {
    /// Raw bytes of `name`, or `None` when the bundle does not carry it.
    fn document(&self, name: &str) -> Option<Cow<'_, [u8]>>;
}

/// Owned in-memory bundle.
#[derive(Debug, Clone, Default)]
pub struct MemoryBundle {
    documents: HashMap<String, Vec<u8>>,
}

impl MemoryBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document, returning the bundle for chaining.
    pub fn with(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }

    /// Add or replace a document.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.documents.insert(name.into(), content.into());
    }

    /// Drop a document from the bundle.
    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.documents.remove(name)
    }
}

impl ContentBundle for MemoryBundle {
    fn document(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.documents
            .get(name)
            .map(|bytes| Cow::Borrowed(bytes.as_slice()))
    }
}

/// Bundle backed by a compile-time table, typically built with `include_bytes!`.
#[derive(Debug, Clone, Copy)]
pub struct StaticBundle {
    entries: &'static [(&'static str, &'static [u8])],
}

impl StaticBundle {
    /// Wrap a static `(name, bytes)` table.
    pub const fn new(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { entries }
    }
}

impl ContentBundle for StaticBundle {
    fn document(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, bytes)| Cow::Borrowed(*bytes))
    }
}

/// Bundle that reads documents from a directory on every lookup.
#[derive(Debug, Clone)]
pub struct DirBundle {
    root: PathBuf,
}

impl DirBundle {
    /// Serve documents from files directly under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentBundle for DirBundle {
    fn document(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        let path = self.root.join(name);
        match fs::read(&path) {
            Ok(bytes) => Some(Cow::Owned(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                debug!("unable to read {}: {err}", path.display());
                None
            }
        }
    }
}

/// Collect every static content document from `bundle` as text.
///
/// This is the read-only data set a front-end needs before any save
/// exists. Missing or non-UTF-8 documents are omitted with a warning.
pub fn load_embedded_game_data(bundle: &dyn ContentBundle) -> Outcome<BTreeMap<String, String>> {
    let mut diagnostics = Diagnostics::new();
    let mut data = BTreeMap::new();

    for doc in documents::static_documents() {
        let Some(bytes) = bundle.document(doc.name) else {
            diagnostics.push(Warning::MissingBundleDocument {
                name: doc.name.to_string(),
            });
            continue;
        };
        match String::from_utf8(bytes.into_owned()) {
            Ok(text) => {
                data.insert(doc.name.to_string(), text);
            }
            Err(err) => diagnostics.push(Warning::parse(doc.name, err)),
        }
    }

    diagnostics.finish(data)
}
