use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

/// Directory names containing one of these markers are never notebooks.
pub const EXCLUDED_MARKERS: &[&str] = &[".git", ".template"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// File name, shown in the note list.
    pub name: String,
    /// Location relative to the notebook directory; differs from `name` for
    /// notes in nested folders.
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl Note {
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path, modified }
    }
}

/// A directory under the notes root. `notes` is only authoritative while
/// `dirty` is false; it is replaced wholesale on every rescan.
#[derive(Debug, Clone)]
pub struct Notebook {
    pub name: String,
    pub notes: Vec<Note>,
    pub dirty: bool,
}

impl Notebook {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), notes: Vec::new(), dirty: true }
    }

    /// Cached notes may be served without touching the filesystem.
    pub fn is_cached(&self) -> bool {
        !self.dirty && !self.notes.is_empty()
    }
}

/// Whether a top-level entry of the notes root counts as a notebook.
pub fn accepted_notebook(name: &str, file_type: &fs::FileType) -> bool {
    file_type.is_dir() && !EXCLUDED_MARKERS.iter().any(|m| name.contains(m))
}

/// Hidden files (dot-prefixed) are never notes.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Most recently modified first. `sort_by` is stable so ties keep the
/// traversal order.
pub fn sort_by_modified(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.modified.cmp(&a.modified));
}
