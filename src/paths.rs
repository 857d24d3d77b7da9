//! Path derivation for existing and not-yet-created notes. Pure functions;
//! nothing here touches the filesystem.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Returned for a new note when no notebook is selected.
pub const FALLBACK_NOTE_PATH: &str = "dummy.md";

pub const NEW_NOTE_EXT: &str = "md";

pub fn note_path(root: &Path, notebook: &str, note: &Path) -> PathBuf {
    root.join(notebook).join(note)
}

/// `<root>/<notebook>/<YYYY-MM-DD>-<topic>.md`
pub fn new_note_path(
    root: &Path,
    notebook: &str,
    topic: &str,
    date: NaiveDate,
) -> PathBuf {
    let file = format!(
        "{}-{}.{NEW_NOTE_EXT}",
        date.format("%Y-%m-%d"),
        sanitize_topic(topic)
    );
    root.join(notebook).join(file)
}

/// Trim the topic and flatten path separators so the note cannot escape its
/// notebook directory.
pub fn sanitize_topic(topic: &str) -> String {
    topic
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_path_joins_components() {
        let root = Path::new("/home/u/notes");
        let p = note_path(root, "work", Path::new("plan.md"));
        assert_eq!(p, PathBuf::from("/home/u/notes/work/plan.md"));
    }

    #[test]
    fn test_new_note_path_uses_date_and_topic() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let p = new_note_path(Path::new("/n"), "work", "design", date);
        assert_eq!(p, PathBuf::from("/n/work/2024-03-02-design.md"));
    }

    #[test]
    fn test_new_note_path_pads_single_digits() {
        let date = NaiveDate::from_ymd_opt(987, 1, 5).unwrap();
        let p = new_note_path(Path::new("/n"), "w", "t", date);
        assert_eq!(p, PathBuf::from("/n/w/0987-01-05-t.md"));
    }

    #[test]
    fn test_sanitize_topic_flattens_separators() {
        assert_eq!(sanitize_topic("  a/b\\c "), "a-b-c");
        assert_eq!(sanitize_topic("ideas"), "ideas");
    }
}
