//! The interactive state machine behind the three-pane browser.
//!
//! The controller owns the note store, the editor launcher and a render
//! sink. It keeps no copies of notebook or note data: every refresh reads
//! through the store using the store's selection.

use crate::editor::EditorLauncher;
use crate::error::StoreError;
use crate::store::NoteStore;
use std::error::Error;
use std::mem;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    BrowsingNotebooks,
    BrowsingNotes,
    EnteringTopic,
}

/// A discrete user action, already decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Up,
    Down,
    Activate,
    NewNote,
    Input(char),
    Erase,
    Submit,
    Cancel,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Notebooks,
    Notes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// Key hints shown while browsing.
    Keys,
    /// The topic typed so far for a new note.
    Topic(String),
}

/// Receives everything the browser displays. Implementations decide how
/// and when to draw.
pub trait RenderSink {
    fn notebooks(&mut self, names: Vec<String>, selected: Option<usize>);
    fn notes(&mut self, names: Vec<String>, selected: Option<usize>);
    fn preview(&mut self, text: String);
    fn focus(&mut self, pane: Pane);
    fn status(&mut self, status: StatusLine);
    /// Release the terminal before an external program takes it over.
    fn suspend(&mut self) -> Result<(), Box<dyn Error>>;
    /// Take the terminal back and redraw everything.
    fn resume(&mut self) -> Result<(), Box<dyn Error>>;
}

pub struct NavigationController<S, E, R> {
    store: S,
    editor: E,
    sink: R,
    mode: Mode,
    topic: String,
}

impl<S, E, R> NavigationController<S, E, R>
where
    S: NoteStore,
    E: EditorLauncher,
    R: RenderSink,
{
    pub fn new(store: S, editor: E, sink: R) -> Self {
        Self {
            store,
            editor,
            sink,
            mode: Mode::BrowsingNotebooks,
            topic: String::new(),
        }
    }

    /// Load notebooks, select the first one and show its notes. Any store
    /// failure here ends the session.
    pub fn start(&mut self) -> Result<(), StoreError> {
        self.store.list_notebooks()?;
        self.mode = Mode::BrowsingNotebooks;
        self.render_notebooks();
        if self.store.selection().notebook.is_some() {
            self.render_notes()?;
        } else {
            self.sink.notes(Vec::new(), None);
            self.render_preview();
        }
        self.sink.focus(Pane::Notebooks);
        self.sink.status(StatusLine::Keys);
        Ok(())
    }

    pub fn handle(&mut self, intent: Intent) -> Result<Flow, Box<dyn Error>> {
        debug!(mode = ?self.mode, ?intent, "intent");
        match (self.mode, intent) {
            (Mode::BrowsingNotebooks | Mode::BrowsingNotes, Intent::Quit) => {
                return Ok(Flow::Quit);
            }
            (Mode::BrowsingNotebooks, Intent::MoveRight) => {
                self.mode = Mode::BrowsingNotes;
                self.sink.focus(Pane::Notes);
            }
            (Mode::BrowsingNotebooks, Intent::Up) => self.step_notebook(-1)?,
            (Mode::BrowsingNotebooks, Intent::Down) => self.step_notebook(1)?,
            (Mode::BrowsingNotebooks, Intent::NewNote) => {
                self.topic.clear();
                self.mode = Mode::EnteringTopic;
                self.sink.status(StatusLine::Topic(String::new()));
            }
            (Mode::BrowsingNotes, Intent::MoveLeft) => {
                self.mode = Mode::BrowsingNotebooks;
                self.sink.focus(Pane::Notebooks);
            }
            (Mode::BrowsingNotes, Intent::Up) => self.step_note(-1),
            (Mode::BrowsingNotes, Intent::Down) => self.step_note(1),
            (Mode::BrowsingNotes, Intent::Activate) => self.open_selected()?,
            (Mode::EnteringTopic, Intent::Input(c)) => {
                self.topic.push(c);
                self.sink.status(StatusLine::Topic(self.topic.clone()));
            }
            (Mode::EnteringTopic, Intent::Erase) => {
                self.topic.pop();
                self.sink.status(StatusLine::Topic(self.topic.clone()));
            }
            (Mode::EnteringTopic, Intent::Submit) => self.create_note()?,
            (Mode::EnteringTopic, Intent::Cancel) => self.leave_topic_entry(),
            _ => {}
        }
        Ok(Flow::Continue)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    fn step_notebook(&mut self, delta: isize) -> Result<(), StoreError> {
        let count = self.store.notebooks().len();
        let current = self.store.selection().notebook;
        if let Some(next) = step(current, delta, count) {
            if Some(next) != current {
                self.notebook_changed(next)?;
            }
        }
        Ok(())
    }

    fn notebook_changed(&mut self, index: usize) -> Result<(), StoreError> {
        self.store.set_selected_notebook(Some(index));
        self.render_notebooks();
        self.render_notes()
    }

    fn step_note(&mut self, delta: isize) {
        let selection = self.store.selection();
        let count = selection
            .notebook
            .and_then(|i| self.store.notebooks().get(i))
            .map_or(0, |nb| nb.notes.len());
        if let Some(next) = step(selection.note, delta, count) {
            if Some(next) != selection.note {
                self.note_changed(next);
            }
        }
    }

    fn note_changed(&mut self, index: usize) {
        let notebook = self.store.selection().notebook;
        self.store.set_selected_note(notebook, Some(index));
        self.render_note_names();
        self.render_preview();
    }

    fn open_selected(&mut self) -> Result<(), Box<dyn Error>> {
        let selection = self.store.selection();
        let path = self.store.full_path(selection.notebook, selection.note);
        if path.as_os_str().is_empty() {
            return Ok(());
        }
        info!(path = %path.display(), "editing note");
        self.sink.suspend()?;
        self.editor.edit(&path)?;
        self.sink.resume()?;
        self.render_preview();
        Ok(())
    }

    fn create_note(&mut self) -> Result<(), Box<dyn Error>> {
        let topic = mem::take(&mut self.topic);
        let Some(notebook) = self.store.selection().notebook else {
            self.leave_topic_entry();
            return Ok(());
        };
        if topic.trim().is_empty() {
            self.leave_topic_entry();
            return Ok(());
        }

        let path = self.store.new_note_path(&topic);
        info!(path = %path.display(), "creating note");
        self.sink.suspend()?;
        self.editor.edit(&path)?;
        self.sink.resume()?;
        self.store.mark_dirty(notebook);
        self.leave_topic_entry();
        Ok(())
    }

    fn leave_topic_entry(&mut self) {
        self.topic.clear();
        self.mode = Mode::BrowsingNotebooks;
        self.sink.status(StatusLine::Keys);
        self.sink.focus(Pane::Notebooks);
    }

    fn render_notebooks(&mut self) {
        let names =
            self.store.notebooks().iter().map(|nb| nb.name.clone()).collect();
        let selected = self.store.selection().notebook;
        self.sink.notebooks(names, selected);
    }

    /// List the selected notebook (rescanning when needed), then show its
    /// notes and the preview of the selected note.
    fn render_notes(&mut self) -> Result<(), StoreError> {
        let notebook = self.store.selection().notebook;
        self.store.list_notes(notebook)?;
        self.render_note_names();
        self.render_preview();
        Ok(())
    }

    fn render_note_names(&mut self) {
        let selection = self.store.selection();
        let names = selection
            .notebook
            .and_then(|i| self.store.notebooks().get(i))
            .map(|nb| nb.notes.iter().map(|n| n.name.clone()).collect())
            .unwrap_or_default();
        self.sink.notes(names, selection.note);
    }

    fn render_preview(&mut self) {
        let selection = self.store.selection();
        let text = self.store.content(selection.notebook, selection.note);
        self.sink.preview(text);
    }
}

/// Move a cursor by `delta` within `0..count`, clamping at both ends. An
/// unset cursor lands on the first entry.
fn step(current: Option<usize>, delta: isize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let Some(current) = current else {
        return Some(0);
    };
    Some(current.saturating_add_signed(delta).min(count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(Some(0), -1, 3), Some(0));
        assert_eq!(step(Some(1), 1, 3), Some(2));
        assert_eq!(step(Some(2), 1, 3), Some(2));
        assert_eq!(step(None, 1, 3), Some(0));
        assert_eq!(step(Some(0), 1, 0), None);
    }
}
