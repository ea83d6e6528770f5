pub mod cli;
pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod presenter;
pub mod search;
pub mod storage;
pub mod store;

pub use config::NotaConfig;
pub use entity::Note;
pub use error::{NotaError, Result};
pub use presenter::{Presenter, UiEvent};
pub use store::NoteStore;
