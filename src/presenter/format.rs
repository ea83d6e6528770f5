// src/presenter/format.rs
//! Turning notes into display-ready rows.

use serde::Serialize;

use crate::config::DisplayConfig;
use crate::entity::Note;

/// One row of the note list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub date: String,
    pub active: bool,
}

/// Contents of the editing surface for the selected note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorContent {
    pub id: String,
    pub title: String,
    pub body: String,
    pub updated: String,
}

/// The note title, or the placeholder for an empty one.
pub fn display_title<'a>(note: &'a Note, display: &'a DisplayConfig) -> &'a str {
    if note.title.is_empty() {
        &display.placeholder_title
    } else {
        &note.title
    }
}

pub fn list_item(note: &Note, active: bool, display: &DisplayConfig) -> ListItem {
    ListItem {
        id: note.id.clone(),
        title: display_title(note, display).to_string(),
        date: display
            .localize(note.updated_at)
            .format(&display.list_date_format)
            .to_string(),
        active,
    }
}

pub fn editor_content(note: &Note, display: &DisplayConfig) -> EditorContent {
    EditorContent {
        id: note.id.clone(),
        title: note.title.clone(),
        body: note.body.clone(),
        updated: display
            .localize(note.updated_at)
            .format(&display.editor_date_format)
            .to_string(),
    }
}
