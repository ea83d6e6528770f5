// src/entity/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{iso_millis, truncate_to_millis};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(rename = "updatedAt", with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Empty note created at `now`. The id is the creation instant in Unix
    /// milliseconds.
    pub fn new(now: DateTime<Utc>) -> Self {
        let now = truncate_to_millis(now);
        Self {
            id: now.timestamp_millis().to_string(),
            title: String::new(),
            body: String::new(),
            updated_at: now,
        }
    }

    /// Overwrite title and body. `updated_at` never moves backwards.
    pub fn edit(&mut self, title: String, body: String, now: DateTime<Utc>) {
        self.title = title;
        self.body = body;
        self.updated_at = truncate_to_millis(now).max(self.updated_at);
    }

    /// Case-insensitive substring match against title or body.
    pub fn matches(&self, query: &str) -> bool {
        crate::search::matches_text(&self.title, query)
            || crate::search::matches_text(&self.body, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_new_note_uses_millisecond_id() {
        let note = Note::new(at(1_760_000_000_000));
        assert_eq!(note.id, "1760000000000");
        assert!(note.title.is_empty());
        assert!(note.body.is_empty());
        assert_eq!(note.updated_at, at(1_760_000_000_000));
    }

    #[test]
    fn test_edit_refreshes_timestamp() {
        let mut note = Note::new(at(1_000));
        note.edit("Groceries".to_string(), "milk".to_string(), at(5_000));
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.body, "milk");
        assert_eq!(note.updated_at, at(5_000));
    }

    #[test]
    fn test_edit_never_moves_timestamp_backwards() {
        let mut note = Note::new(at(10_000));
        note.edit("a".to_string(), String::new(), at(10_000) - Duration::seconds(3));
        assert_eq!(note.updated_at, at(10_000));
    }

    #[test]
    fn test_serializes_with_camel_case_timestamp() {
        let note = Note::new(at(1_760_000_000_123));
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], "1760000000123");
        assert_eq!(json["updatedAt"], "2025-10-09T08:53:20.123Z");
        assert!(json.get("updated_at").is_none());
    }

    #[test]
    fn test_deserializes_browser_written_note() {
        let raw = r#"{"id":"1700000000000","title":"t","body":"b","updatedAt":"2023-11-14T22:13:20.000Z"}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.id, "1700000000000");
        assert_eq!(note.updated_at, at(1_700_000_000_000));
    }

    #[test]
    fn test_matches_title_or_body_ignoring_case() {
        let mut note = Note::new(at(0));
        note.edit("Groceries".to_string(), "Milk, eggs".to_string(), at(1));
        assert!(note.matches("grocer"));
        assert!(note.matches("MILK"));
        assert!(note.matches(""));
        assert!(!note.matches("bread"));
    }
}
