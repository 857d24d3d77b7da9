//! In-memory `NoteStore` with deterministic content, for tests and for
//! exercising the browser without a notes directory.

use crate::error::StoreError;
use crate::note::{Note, Notebook};
use crate::paths::{self, FALLBACK_NOTE_PATH};
use crate::selection::{Selection, first_index};
use crate::store::{NOTHING_TO_PREVIEW, NoteStore};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const FIXTURE_ROOT: &str = "/fixture";

#[derive(Debug, Clone)]
pub struct FixtureNoteStore {
    /// What a scan of each notebook would find.
    source: Vec<(String, Vec<Note>)>,
    notebooks: Vec<Notebook>,
    loaded: bool,
    selection: Selection,
    scans: usize,
}

impl FixtureNoteStore {
    /// Notebooks given as `(name, note names)`. Notes are listed newest
    /// first in the order given.
    pub fn new(books: &[(&str, &[&str])]) -> Self {
        let source = books
            .iter()
            .map(|(name, notes)| {
                let count = notes.len() as u64;
                let notes = notes
                    .iter()
                    .enumerate()
                    .map(|(i, n)| Note::new(*n, stamp(count - i as u64)))
                    .collect();
                (name.to_string(), notes)
            })
            .collect();
        Self {
            source,
            notebooks: Vec::new(),
            loaded: false,
            selection: Selection::default(),
            scans: 0,
        }
    }

    /// Ten notebooks of a hundred notes each.
    pub fn sample() -> Self {
        let names: Vec<String> = (0..10).map(|i| format!("Book {i}")).collect();
        let notes: Vec<String> = (0..100).map(|i| format!("Note {i}")).collect();
        let note_refs: Vec<&str> = notes.iter().map(String::as_str).collect();
        let books: Vec<(&str, &[&str])> =
            names.iter().map(|n| (n.as_str(), note_refs.as_slice())).collect();
        Self::new(&books)
    }

    /// Make a note appear on the next scan of `notebook`, as if an editor
    /// had just written it.
    pub fn add_note(&mut self, notebook: &str, note: &str) {
        let found = self.source.iter_mut().find(|(n, _)| n == notebook);
        if let Some((_, notes)) = found {
            let newest = notes.first().map_or(stamp(0), |n| n.modified);
            notes.insert(0, Note::new(note, newest + Duration::from_secs(1)));
        }
    }

    pub fn scan_count(&self) -> usize {
        self.scans
    }
}

fn stamp(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

impl NoteStore for FixtureNoteStore {
    fn list_notebooks(&mut self) -> Result<&[Notebook], StoreError> {
        if !self.loaded {
            self.notebooks = self
                .source
                .iter()
                .map(|(name, _)| Notebook::new(name.as_str()))
                .collect();
            self.loaded = true;
            self.selection = Selection {
                notebook: first_index(self.notebooks.len()),
                note: None,
            };
        }
        Ok(&self.notebooks)
    }

    fn list_notes(
        &mut self,
        notebook: Option<usize>,
    ) -> Result<&[Note], StoreError> {
        let index = notebook
            .filter(|i| *i < self.notebooks.len())
            .ok_or(StoreError::NoSelection)?;
        if !self.notebooks[index].is_cached() {
            self.scans += 1;
            let nb = &mut self.notebooks[index];
            nb.notes = self.source[index].1.clone();
            nb.dirty = false;
            if self.selection.notebook == Some(index) {
                self.selection.note = first_index(nb.notes.len());
            }
        }
        Ok(&self.notebooks[index].notes)
    }

    fn content(&self, notebook: Option<usize>, note: Option<usize>) -> String {
        let name = notebook
            .and_then(|i| self.notebooks.get(i))
            .and_then(|nb| note.and_then(|j| nb.notes.get(j)));
        match name {
            Some(n) => format!("Test content of {}", n.name),
            None => NOTHING_TO_PREVIEW.to_string(),
        }
    }

    fn full_path(&self, notebook: Option<usize>, note: Option<usize>) -> PathBuf {
        let Some(nb) = notebook.and_then(|i| self.notebooks.get(i)) else {
            return PathBuf::new();
        };
        let root = Path::new(FIXTURE_ROOT);
        match note.and_then(|j| nb.notes.get(j)) {
            Some(n) => paths::note_path(root, &nb.name, &n.path),
            None => PathBuf::new(),
        }
    }

    fn new_note_path_on(&self, topic: &str, date: NaiveDate) -> PathBuf {
        let root = Path::new(FIXTURE_ROOT);
        match self.selection.notebook.and_then(|i| self.notebooks.get(i)) {
            Some(nb) => paths::new_note_path(root, &nb.name, topic, date),
            None => PathBuf::from(FALLBACK_NOTE_PATH),
        }
    }

    fn mark_dirty(&mut self, notebook: usize) {
        if let Some(nb) = self.notebooks.get_mut(notebook) {
            nb.dirty = true;
        }
    }

    fn notebooks(&self) -> &[Notebook] {
        &self.notebooks
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selected_notebook(&mut self, notebook: Option<usize>) {
        let count = notebook
            .and_then(|i| self.notebooks.get(i))
            .map_or(0, |nb| nb.notes.len());
        self.selection.select_notebook(notebook, count);
    }

    fn set_selected_note(&mut self, notebook: Option<usize>, note: Option<usize>) {
        self.selection.select_note(notebook, note);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape() {
        let mut store = FixtureNoteStore::sample();
        assert_eq!(store.list_notebooks().unwrap().len(), 10);
        assert_eq!(store.list_notes(Some(3)).unwrap().len(), 100);
        assert_eq!(store.content(Some(3), Some(0)), "Test content of Note 0");
    }

    #[test]
    fn test_added_note_only_visible_after_mark_dirty() {
        let mut store = FixtureNoteStore::new(&[("work", &["a", "b"])]);
        store.list_notebooks().unwrap();
        store.list_notes(Some(0)).unwrap();
        store.add_note("work", "fresh");
        assert_eq!(store.list_notes(Some(0)).unwrap().len(), 2);
        store.mark_dirty(0);
        let notes = store.list_notes(Some(0)).unwrap();
        assert_eq!(notes[0].name, "fresh");
        assert_eq!(store.scan_count(), 2);
    }
}
