use std::env;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::config::NotaConfig;
use crate::error::{NotaError, Result};
use crate::presenter::{display_title, Confirm, EditorContent, Frame, Presenter, UiEvent};
use crate::storage::FileBackend;
use crate::store::NoteStore;

const NOTA_DIR: &str = ".nota";

/// Find the data directory by looking for .nota/ in the current directory
/// and its parents. Falls back to .nota/ in the current directory.
fn find_data_dir() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(NOTA_DIR);
        if candidate.is_dir() {
            return candidate;
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd.join(NOTA_DIR),
        }
    }
}

fn open_presenter() -> Result<Presenter<FileBackend>> {
    let dir = find_data_dir();
    let config = NotaConfig::load(&dir)?;
    let store = NoteStore::load(FileBackend::new(dir), &config.storage_key)?;
    Ok(Presenter::new(store, config.display))
}

/// Confirmation on the terminal, or unconditional with `--force`.
pub struct TerminalConfirm {
    force: bool,
}

impl TerminalConfirm {
    /// Fails when a prompt would be needed but stdin is not a terminal.
    pub fn new(force: bool) -> Result<Self> {
        if !force && !atty::is(atty::Stream::Stdin) {
            return Err(NotaError::ConfirmationRequired);
        }
        Ok(Self { force })
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        if self.force {
            return true;
        }

        eprint!("{} [y/N] ", message);
        if let Err(e) = io::stderr().flush() {
            tracing::warn!(error = %e, "could not flush confirmation prompt");
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(_) => input.trim().eq_ignore_ascii_case("y"),
            Err(e) => {
                tracing::warn!(error = %e, "could not read confirmation");
                false
            }
        }
    }
}

/// Events issued from the command line never ask for confirmation.
fn no_prompt(_: &str) -> bool {
    false
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

fn ensure_exists(presenter: &Presenter<FileBackend>, id: &str) -> Result<()> {
    if presenter.store().get(id).is_none() {
        return Err(NotaError::NoteNotFound(id.to_string()));
    }
    Ok(())
}

fn editor_title<'a>(editor: &'a EditorContent, placeholder: &'a str) -> &'a str {
    if editor.title.is_empty() {
        placeholder
    } else {
        &editor.title
    }
}

fn print_editor(editor: &EditorContent, placeholder: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(editor)?);
        return Ok(());
    }

    println!("{} ({})", editor_title(editor, placeholder), editor.id);
    println!("Updated: {}", editor.updated);
    if !editor.body.is_empty() {
        println!();
        println!("{}", editor.body);
    }
    Ok(())
}

pub fn handle_new(
    title: Option<String>,
    body: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let body = if stdin { Some(read_stdin()?) } else { body };

    let mut presenter = open_presenter()?;
    let mut frame = Frame::default();
    presenter.dispatch(UiEvent::Create, &mut frame, &mut no_prompt)?;

    if title.is_some() || body.is_some() {
        let event = UiEvent::Edit {
            title: title.unwrap_or_default(),
            body: body.unwrap_or_default(),
        };
        presenter.dispatch(event, &mut frame, &mut no_prompt)?;
    }

    let note = presenter
        .store()
        .active_note()
        .ok_or_else(|| NotaError::Storage("created note is not active".to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        println!(
            "Created note {} - {}",
            note.id,
            display_title(note, presenter.display())
        );
    }

    Ok(())
}

pub fn handle_list(search: Option<String>, json: bool) -> Result<()> {
    let mut presenter = open_presenter()?;
    let mut frame = Frame::default();

    match search {
        Some(query) => presenter.dispatch(UiEvent::Search(query), &mut frame, &mut no_prompt)?,
        None => presenter.start(&mut frame),
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&frame.list)?);
    } else if frame.list.is_empty() {
        println!("No notes found.");
    } else {
        println!("Notes:\n");
        for item in &frame.list {
            let marker = if item.active { '*' } else { ' ' };
            println!("{} {}  {:<10}  {}", marker, item.id, item.date, item.title);
        }
    }

    Ok(())
}

pub fn handle_show(id: String, json: bool) -> Result<()> {
    let mut presenter = open_presenter()?;
    ensure_exists(&presenter, &id)?;

    let mut frame = Frame::default();
    presenter.dispatch(UiEvent::Select(id.clone()), &mut frame, &mut no_prompt)?;

    let editor = frame.editor.ok_or(NotaError::NoteNotFound(id))?;
    print_editor(&editor, &presenter.display().placeholder_title, json)
}

pub fn handle_edit(
    id: String,
    title: Option<String>,
    body: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let mut presenter = open_presenter()?;
    ensure_exists(&presenter, &id)?;

    let body = if stdin { Some(read_stdin()?) } else { body };
    if title.is_none() && body.is_none() {
        println!("Nothing to update.");
        return Ok(());
    }

    let mut frame = Frame::default();
    presenter.dispatch(UiEvent::Select(id.clone()), &mut frame, &mut no_prompt)?;

    let current = frame
        .editor
        .take()
        .ok_or_else(|| NotaError::NoteNotFound(id.clone()))?;
    let event = UiEvent::Edit {
        title: title.unwrap_or(current.title),
        body: body.unwrap_or(current.body),
    };
    presenter.dispatch(event, &mut frame, &mut no_prompt)?;

    let editor = frame.editor.ok_or(NotaError::NoteNotFound(id))?;
    let placeholder = &presenter.display().placeholder_title;
    if json {
        print_editor(&editor, placeholder, true)
    } else {
        println!("Updated note {} - {}", editor.id, editor_title(&editor, placeholder));
        Ok(())
    }
}

pub fn handle_delete(id: String, force: bool) -> Result<()> {
    let mut presenter = open_presenter()?;
    ensure_exists(&presenter, &id)?;

    let mut confirm = TerminalConfirm::new(force)?;
    let mut frame = Frame::default();
    presenter.dispatch(UiEvent::Select(id.clone()), &mut frame, &mut no_prompt)?;
    presenter.dispatch(UiEvent::Delete, &mut frame, &mut confirm)?;

    if presenter.store().get(&id).is_some() {
        println!("Cancelled.");
    } else {
        println!("Deleted note {}", id);
    }

    Ok(())
}

pub fn handle_greet() -> Result<()> {
    let presenter = open_presenter()?;
    println!("{}", presenter.greeting());
    Ok(())
}
