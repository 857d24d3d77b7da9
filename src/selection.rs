/// The active notebook and, within it, the active note. `None` means nothing
/// is selected. The note index only means something relative to the
/// notebook index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub notebook: Option<usize>,
    pub note: Option<usize>,
}

impl Selection {
    /// Switch notebooks. The note index resets to the first note when the
    /// new notebook has any, otherwise to none.
    pub fn select_notebook(&mut self, notebook: Option<usize>, note_count: usize) {
        self.notebook = notebook;
        self.note = first_index(note_count);
    }

    pub fn select_note(&mut self, notebook: Option<usize>, note: Option<usize>) {
        self.notebook = notebook;
        self.note = note;
    }
}

/// `Some(0)` for a non-empty sequence.
pub fn first_index(len: usize) -> Option<usize> {
    (len > 0).then_some(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selects_nothing() {
        let s = Selection::default();
        assert_eq!(s.notebook, None);
        assert_eq!(s.note, None);
    }

    #[test]
    fn test_select_notebook_resets_note() {
        let mut s = Selection { notebook: Some(0), note: Some(4) };
        s.select_notebook(Some(1), 3);
        assert_eq!(s, Selection { notebook: Some(1), note: Some(0) });
        s.select_notebook(Some(2), 0);
        assert_eq!(s, Selection { notebook: Some(2), note: None });
    }
}
