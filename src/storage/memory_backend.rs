use std::collections::HashMap;

use super::KeyValueBackend;
use crate::error::{NotaError, Result};

/// In-process key-value store. Counts writes and can be switched into a
/// failing mode to exercise write errors.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    items: HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with one item.
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut backend = Self::new();
        backend.items.insert(key.to_string(), value.to_string());
        backend
    }

    /// Number of successful `set_item` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(NotaError::Storage(format!("quota exceeded writing '{}'", key)));
        }
        self.items.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
