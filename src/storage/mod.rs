//! Whole-collection persistence on top of a string key-value store.

mod file_backend;
mod memory_backend;

pub use file_backend::FileBackend;
pub use memory_backend::MemoryBackend;

use std::collections::HashSet;

use crate::entity::Note;
use crate::error::Result;

/// Key under which the collection is stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "notes";

/// A string key-value store in the shape of browser local storage.
pub trait KeyValueBackend {
    /// Read the value for `key`, `None` if it was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Serialize the collection as a JSON array of notes.
pub fn encode_notes(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Parse a stored collection.
///
/// Data that does not parse is treated as an empty collection so a damaged
/// store never prevents startup. A stored `null` is also empty. Duplicate ids
/// keep their first occurrence.
pub fn decode_notes(raw: &str) -> Vec<Note> {
    let parsed: Option<Vec<Note>> = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "stored notes are unreadable, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut notes = Vec::new();
    for note in parsed.unwrap_or_default() {
        if seen.insert(note.id.clone()) {
            notes.push(note);
        } else {
            tracing::warn!(id = %note.id, "dropping note with duplicate id");
        }
    }
    notes
}

/// Read the collection stored under `key`. A missing key is an empty
/// collection; backend read failures are propagated.
pub fn load_notes<B: KeyValueBackend + ?Sized>(backend: &B, key: &str) -> Result<Vec<Note>> {
    match backend.get_item(key)? {
        Some(raw) => Ok(decode_notes(&raw)),
        None => Ok(Vec::new()),
    }
}

/// Write the whole collection under `key`.
pub fn save_notes<B: KeyValueBackend + ?Sized>(backend: &mut B, key: &str, notes: &[Note]) -> Result<()> {
    let raw = encode_notes(notes)?;
    backend.set_item(key, &raw)?;
    tracing::debug!(key, count = notes.len(), bytes = raw.len(), "persisted notes");
    Ok(())
}
