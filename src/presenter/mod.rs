//! Bridges user-interface events and the note store.
//!
//! The presenter owns the store and the current search query. Each event is
//! routed to one handler, after which the whole view is re-rendered through
//! the [`View`] trait, so any rendering technology can sit on top.

mod format;
mod greeting;

pub use format::{display_title, editor_content, list_item, EditorContent, ListItem};
pub use greeting::Greeting;

use chrono::Timelike;
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::config::DisplayConfig;
use crate::error::Result;
use crate::storage::KeyValueBackend;
use crate::store::NoteStore;

/// Asked before a note is deleted.
pub const DELETE_PROMPT: &str = "このノートを削除しますか？";

/// Input from the user interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// New-note button
    Create,
    /// Title or body field changed; carries both current values
    Edit { title: String, body: String },
    /// Search box changed
    Search(String),
    /// A list entry was clicked
    Select(String),
    /// Delete button
    Delete,
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Create => "create",
            UiEvent::Edit { .. } => "edit",
            UiEvent::Search(_) => "search",
            UiEvent::Select(_) => "select",
            UiEvent::Delete => "delete",
        }
    }
}

/// Render callbacks implemented by the user interface.
pub trait View {
    fn render_list(&mut self, items: &[ListItem]);

    /// `None` means nothing is selected and the editing surface is hidden.
    fn render_editor(&mut self, editor: Option<&EditorContent>);

    fn set_empty_state(&mut self, visible: bool);
}

/// Explicit user confirmation for destructive actions.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// A [`View`] that keeps the latest render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub list: Vec<ListItem>,
    pub editor: Option<EditorContent>,
    pub empty_state: bool,
}

impl View for Frame {
    fn render_list(&mut self, items: &[ListItem]) {
        self.list = items.to_vec();
    }

    fn render_editor(&mut self, editor: Option<&EditorContent>) {
        self.editor = editor.cloned();
    }

    fn set_empty_state(&mut self, visible: bool) {
        self.empty_state = visible;
    }
}

/// Ids visible for `query`, valid while the store stays at `revision`.
struct FilterCache {
    query: String,
    revision: u64,
    ids: Vec<String>,
}

pub struct Presenter<B, C = SystemClock> {
    store: NoteStore<B, C>,
    display: DisplayConfig,
    query: String,
    cache: Option<FilterCache>,
}

impl<B: KeyValueBackend, C: Clock> Presenter<B, C> {
    pub fn new(store: NoteStore<B, C>, display: DisplayConfig) -> Self {
        Self {
            store,
            display,
            query: String::new(),
            cache: None,
        }
    }

    pub fn store(&self) -> &NoteStore<B, C> {
        &self.store
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Current search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Initial render after load.
    pub fn start<V: View + ?Sized>(&mut self, view: &mut V) {
        self.render(view);
    }

    /// Route `event` to its handler, then re-render.
    ///
    /// A persistence failure is returned after the view has been refreshed,
    /// since the in-memory collection has already changed by then.
    pub fn dispatch<V, F>(&mut self, event: UiEvent, view: &mut V, confirm: &mut F) -> Result<()>
    where
        V: View + ?Sized,
        F: Confirm + ?Sized,
    {
        tracing::debug!(event = event.name(), "dispatching ui event");

        let outcome = match event {
            UiEvent::Create => self.on_create(),
            UiEvent::Edit { title, body } => self.on_edit(title, body),
            UiEvent::Search(query) => {
                self.on_search(query);
                Ok(())
            }
            UiEvent::Select(id) => {
                self.on_select(id);
                Ok(())
            }
            UiEvent::Delete => self.on_delete(confirm),
        };

        self.render(view);
        outcome
    }

    fn on_create(&mut self) -> Result<()> {
        // A new note is empty and would be hidden by most queries.
        self.query.clear();
        self.store.create()?;
        Ok(())
    }

    fn on_edit(&mut self, title: String, body: String) -> Result<()> {
        let Some(id) = self.store.active_note().map(|n| n.id.clone()) else {
            return Ok(());
        };
        self.store.update(&id, title, body)?;
        Ok(())
    }

    fn on_search(&mut self, query: String) {
        self.query = query;
    }

    fn on_select(&mut self, id: String) {
        self.store.select(id);
    }

    fn on_delete<F: Confirm + ?Sized>(&mut self, confirm: &mut F) -> Result<()> {
        let Some(id) = self.store.active_note().map(|n| n.id.clone()) else {
            return Ok(());
        };
        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(id = %id, "delete declined");
            return Ok(());
        }
        self.store.delete(&id)?;
        Ok(())
    }

    /// Push list, editor and empty-state to `view`.
    pub fn render<V: View + ?Sized>(&mut self, view: &mut V) {
        let items = self.list_items();
        let editor = self.editor();

        view.render_list(&items);
        view.render_editor(editor.as_ref());
        view.set_empty_state(editor.is_none());
    }

    /// Display rows for the notes matching the current query.
    pub fn list_items(&mut self) -> Vec<ListItem> {
        self.refresh_cache();
        let active = self.store.active_id();
        let ids = self.cache.as_ref().map(|c| c.ids.as_slice()).unwrap_or(&[]);

        ids.iter()
            .filter_map(|id| self.store.get(id))
            .map(|note| list_item(note, active == Some(note.id.as_str()), &self.display))
            .collect()
    }

    /// Editor contents for the active note, `None` when nothing is selected.
    pub fn editor(&self) -> Option<EditorContent> {
        self.store
            .active_note()
            .map(|note| editor_content(note, &self.display))
    }

    /// Greeting for the current hour in the display timezone.
    pub fn greeting(&self) -> Greeting {
        let now = self.display.localize(self.store.clock().now());
        Greeting::for_hour(now.hour())
    }

    fn refresh_cache(&mut self) {
        let revision = self.store.revision();
        let fresh = matches!(
            &self.cache,
            Some(cache) if cache.revision == revision && cache.query == self.query
        );
        if fresh {
            return;
        }

        let ids = self
            .store
            .filter(&self.query)
            .into_iter()
            .map(|n| n.id.clone())
            .collect();
        self.cache = Some(FilterCache {
            query: self.query.clone(),
            revision,
            ids,
        });
    }
}
