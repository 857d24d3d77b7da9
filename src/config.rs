use crate::editor::DEFAULT_EDITOR;
use std::env;
use std::io;
use std::path::PathBuf;

/// Notes root under `$HOME` unless `NNDIR` is set.
pub const DEFAULT_NOTES_DIR: &str = "notes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub editor: String,
    pub notes_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> io::Result<Self> {
        Self::from_vars(
            env::var("EDITOR").ok(),
            env::var("NNDIR").ok(),
            env::var("HOME").ok(),
        )
    }

    /// Build from raw variable values; empty values count as unset.
    pub fn from_vars(
        editor: Option<String>,
        notes_dir: Option<String>,
        home: Option<String>,
    ) -> io::Result<Self> {
        let editor = non_empty(editor).unwrap_or_else(|| DEFAULT_EDITOR.to_string());
        let notes_dir = match (non_empty(notes_dir), non_empty(home)) {
            (Some(dir), _) => PathBuf::from(dir),
            (None, Some(home)) => PathBuf::from(home).join(DEFAULT_NOTES_DIR),
            (None, None) => {
                return Err(io::Error::other(
                    "HOME not set; set NNDIR explicitly",
                ));
            }
        };
        Ok(Self { editor, notes_dir })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_defaults_use_home() {
        let cfg = Config::from_vars(None, None, s("/home/u")).unwrap();
        assert_eq!(cfg.editor, "vim");
        assert_eq!(cfg.notes_dir, PathBuf::from("/home/u/notes"));
    }

    #[test]
    fn test_overrides_win() {
        let cfg =
            Config::from_vars(s("nano"), s("/tmp/nb"), s("/home/u")).unwrap();
        assert_eq!(cfg.editor, "nano");
        assert_eq!(cfg.notes_dir, PathBuf::from("/tmp/nb"));
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let cfg = Config::from_vars(s(""), s(""), s("/h")).unwrap();
        assert_eq!(cfg.editor, "vim");
        assert_eq!(cfg.notes_dir, PathBuf::from("/h/notes"));
    }

    #[test]
    fn test_missing_home_and_nndir_fails() {
        let err = Config::from_vars(None, None, None).unwrap_err();
        assert!(err.to_string().contains("NNDIR"));
    }
}
