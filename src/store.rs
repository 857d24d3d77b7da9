//! Notebook and note discovery with a per-notebook cache.
//!
//! The notebook set is read once per process. Each notebook's notes are
//! scanned lazily and cached until the notebook is marked dirty; marking is
//! the only way a cached listing goes stale.

use crate::error::StoreError;
use crate::note::{Note, Notebook, accepted_notebook, is_hidden, sort_by_modified};
use crate::paths::{self, FALLBACK_NOTE_PATH};
use crate::selection::{Selection, first_index};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Shown in the preview pane when a note cannot be read.
pub const NOTHING_TO_PREVIEW: &str = "nothing to preview";

/// Everything the navigation layer needs from a note source.
pub trait NoteStore {
    /// Discover notebooks. Only the first successful call reads the
    /// filesystem; later calls return the same sequence.
    fn list_notebooks(&mut self) -> Result<&[Notebook], StoreError>;

    /// Notes of one notebook, newest first. Served from cache unless the
    /// notebook is dirty or has no cached notes.
    fn list_notes(
        &mut self,
        notebook: Option<usize>,
    ) -> Result<&[Note], StoreError>;

    /// Full text of a note, or [`NOTHING_TO_PREVIEW`] on any failure.
    fn content(&self, notebook: Option<usize>, note: Option<usize>) -> String;

    /// Absolute location of a note; empty when either index is invalid.
    fn full_path(&self, notebook: Option<usize>, note: Option<usize>) -> PathBuf;

    fn new_note_path_on(&self, topic: &str, date: NaiveDate) -> PathBuf;

    /// Path for a new note about `topic` in the selected notebook, dated
    /// today.
    fn new_note_path(&self, topic: &str) -> PathBuf {
        self.new_note_path_on(topic, Local::now().date_naive())
    }

    fn mark_dirty(&mut self, notebook: usize);

    fn notebooks(&self) -> &[Notebook];

    fn selection(&self) -> Selection;

    fn set_selected_notebook(&mut self, notebook: Option<usize>);

    fn set_selected_note(&mut self, notebook: Option<usize>, note: Option<usize>);
}

/// A `NoteStore` backed by a notes root directory.
#[derive(Debug)]
pub struct FsNoteStore {
    root: PathBuf,
    notebooks: Vec<Notebook>,
    loaded: bool,
    selection: Selection,
    scans: usize,
}

impl FsNoteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            notebooks: Vec::new(),
            loaded: false,
            selection: Selection::default(),
            scans: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of notebook scans performed so far.
    pub fn scan_count(&self) -> usize {
        self.scans
    }

    fn notebook_index(&self, notebook: Option<usize>) -> Option<usize> {
        notebook.filter(|i| *i < self.notebooks.len())
    }

    fn rescan(&mut self, index: usize) -> Result<(), StoreError> {
        let dir = self.root.join(&self.notebooks[index].name);
        self.scans += 1;
        debug!(notebook = %self.notebooks[index].name, "scanning notebook");

        let mut notes = scan_notebook(&dir)?;
        sort_by_modified(&mut notes);

        let notebook = &mut self.notebooks[index];
        debug!(notebook = %notebook.name, notes = notes.len(), "scan finished");
        notebook.notes = notes;
        notebook.dirty = false;
        if self.selection.notebook == Some(index) {
            self.selection.note = first_index(notebook.notes.len());
        }
        Ok(())
    }
}

impl NoteStore for FsNoteStore {
    fn list_notebooks(&mut self) -> Result<&[Notebook], StoreError> {
        if self.loaded {
            return Ok(&self.notebooks);
        }

        let entries =
            fs::read_dir(&self.root).map_err(|e| StoreError::io(&self.root, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.root, e))?;
            let file_type =
                entry.file_type().map_err(|e| StoreError::io(entry.path(), e))?;
            let Ok(name) = entry.file_name().into_string() else {
                warn!(path = %entry.path().display(), "skipping non-UTF-8 name");
                continue;
            };
            if accepted_notebook(&name, &file_type) {
                names.push(name);
            }
        }
        names.sort();

        self.notebooks = names.into_iter().map(Notebook::new).collect();
        self.loaded = true;
        self.selection = Selection {
            notebook: first_index(self.notebooks.len()),
            note: None,
        };
        debug!(
            root = %self.root.display(),
            notebooks = self.notebooks.len(),
            "loaded notebooks"
        );
        Ok(&self.notebooks)
    }

    fn list_notes(
        &mut self,
        notebook: Option<usize>,
    ) -> Result<&[Note], StoreError> {
        let index =
            self.notebook_index(notebook).ok_or(StoreError::NoSelection)?;
        if self.notebooks[index].is_cached() {
            trace!(notebook = %self.notebooks[index].name, "cache hit");
        } else {
            self.rescan(index)?;
        }
        Ok(&self.notebooks[index].notes)
    }

    fn content(&self, notebook: Option<usize>, note: Option<usize>) -> String {
        let path = self.full_path(notebook, note);
        if path.as_os_str().is_empty() {
            return NOTHING_TO_PREVIEW.to_string();
        }
        fs::read_to_string(&path).unwrap_or_else(|err| {
            debug!(path = %path.display(), %err, "preview unavailable");
            NOTHING_TO_PREVIEW.to_string()
        })
    }

    fn full_path(&self, notebook: Option<usize>, note: Option<usize>) -> PathBuf {
        let Some(nb) = notebook.and_then(|i| self.notebooks.get(i)) else {
            return PathBuf::new();
        };
        let Some(n) = note.and_then(|j| nb.notes.get(j)) else {
            return PathBuf::new();
        };
        paths::note_path(&self.root, &nb.name, &n.path)
    }

    fn new_note_path_on(&self, topic: &str, date: NaiveDate) -> PathBuf {
        match self.selection.notebook.and_then(|i| self.notebooks.get(i)) {
            Some(nb) => paths::new_note_path(&self.root, &nb.name, topic, date),
            None => PathBuf::from(FALLBACK_NOTE_PATH),
        }
    }

    fn mark_dirty(&mut self, notebook: usize) {
        if let Some(nb) = self.notebooks.get_mut(notebook) {
            debug!(notebook = %nb.name, "marked dirty");
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

/// Walk a notebook directory in file-name order and collect every regular,
/// non-hidden file at any depth. Only the file's own name decides whether it
/// is hidden, so notes inside dot-folders are kept. Any error aborts the
/// whole walk so callers never see a partial listing.
fn scan_notebook(dir: &Path) -> Result<Vec<Note>, StoreError> {
    let mut notes = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            StoreError::io(path, err.into())
        })?;
        if !entry.file_type().is_file()
            || is_hidden(&entry.file_name().to_string_lossy())
        {
            continue;
        }
        let modified = entry
            .metadata()
            .map_err(|err| StoreError::io(entry.path(), err.into()))?
            .modified()
            .map_err(|err| StoreError::io(entry.path(), err))?;
        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        notes.push(Note::new(relative, modified));
    }
    Ok(notes)
}
