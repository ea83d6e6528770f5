//! The authoritative in-memory note collection.
//!
//! Every mutation writes the whole collection back to the backend before
//! returning. Lookups by an unknown id are silent no-ops: the UI may hold a
//! stale id (a double click after a delete), and that is not an error.

use crate::clock::{Clock, SystemClock};
use crate::entity::Note;
use crate::error::Result;
use crate::search::filter_notes;
use crate::storage::{load_notes, save_notes, KeyValueBackend};

pub struct NoteStore<B, C = SystemClock> {
    notes: Vec<Note>,
    active_id: Option<String>,
    backend: B,
    key: String,
    clock: C,
    revision: u64,
}

impl<B: KeyValueBackend> NoteStore<B, SystemClock> {
    /// Load the collection stored under `key`, using the wall clock.
    pub fn load(backend: B, key: &str) -> Result<Self> {
        Self::load_with_clock(backend, key, SystemClock)
    }
}

impl<B: KeyValueBackend, C: Clock> NoteStore<B, C> {
    /// Load the collection stored under `key`. The first note, if any,
    /// becomes active.
    pub fn load_with_clock(backend: B, key: &str, clock: C) -> Result<Self> {
        let notes = load_notes(&backend, key)?;
        let active_id = notes.first().map(|n| n.id.clone());
        tracing::debug!(key, count = notes.len(), "loaded notes");

        Ok(Self {
            notes,
            active_id,
            backend,
            key: key.to_string(),
            clock,
            revision: 0,
        })
    }

    /// Notes in display order, most recently created first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// The selected id, as last set. May be stale after `select`; use
    /// [`NoteStore::active_note`] to resolve it.
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// The selected note. An id that no longer names a note means nothing is
    /// selected.
    pub fn active_note(&self) -> Option<&Note> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Bumped on every mutation of the collection. Views derived from the
    /// notes are valid only for the revision they were computed at.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Create an empty note at the front of the collection and select it.
    /// Returns the new id.
    pub fn create(&mut self) -> Result<String> {
        let mut note = Note::new(self.clock.now());
        let mut millis = note.updated_at.timestamp_millis();
        while self.get(&note.id).is_some() {
            // Two creations in the same millisecond: take the next free id.
            millis += 1;
            note.id = millis.to_string();
        }
        let id = note.id.clone();

        self.notes.insert(0, note);
        self.active_id = Some(id.clone());
        self.touch();
        tracing::debug!(id = %id, "created note");

        self.persist()?;
        Ok(id)
    }

    /// Overwrite title and body of `id`. Returns `false` when no such note
    /// exists.
    pub fn update(&mut self, id: &str, title: String, body: String) -> Result<bool> {
        let now = self.clock.now();
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            tracing::debug!(id, "update ignored, no such note");
            return Ok(false);
        };

        note.edit(title, body, now);
        self.touch();
        self.persist()?;
        Ok(true)
    }

    /// Remove `id`. If it was selected, the new first note (or nothing) is
    /// selected instead. Returns `false` when no such note exists.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.notes.iter().position(|n| n.id == id) else {
            tracing::debug!(id, "delete ignored, no such note");
            return Ok(false);
        };

        self.notes.remove(index);
        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.notes.first().map(|n| n.id.clone());
        }
        self.touch();
        tracing::debug!(id, remaining = self.notes.len(), "deleted note");

        self.persist()?;
        Ok(true)
    }

    /// Select `id` without checking that it exists.
    pub fn select(&mut self, id: impl Into<String>) {
        self.active_id = Some(id.into());
    }

    /// Notes whose title or body contains `query`, ignoring case, in
    /// collection order.
    pub fn filter(&self, query: &str) -> Vec<&Note> {
        filter_notes(&self.notes, query)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn persist(&mut self) -> Result<()> {
        save_notes(&mut self.backend, &self.key, &self.notes)
    }
}
