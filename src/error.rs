use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failures surfaced by a `NoteStore`.
#[derive(Debug)]
pub enum StoreError {
    /// A directory or file under the notes root could not be read.
    Io { path: PathBuf, source: io::Error },
    /// A note query was issued with no notebook (or an out-of-range one).
    NoSelection,
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            Self::NoSelection => write!(f, "no notebook selected"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NoSelection => None,
        }
    }
}

/// An external program (editor, tree viewer) failed.
#[derive(Debug)]
pub enum ProcessError {
    Spawn { program: String, source: io::Error },
    Status { program: String, code: Option<i32> },
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { program, source } => {
                write!(f, "cannot execute {program}: {source}")
            }
            Self::Status { program, code: Some(code) } => {
                write!(f, "{program} exited with status {code}")
            }
            Self::Status { program, code: None } => {
                write!(f, "{program} was terminated by a signal")
            }
        }
    }
}

impl Error for ProcessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::Status { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_names_path() {
        let err = StoreError::io(
            "/n/work",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "cannot read /n/work: gone");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_status_error_display() {
        let err = ProcessError::Status { program: "vim".into(), code: Some(2) };
        assert_eq!(err.to_string(), "vim exited with status 2");
    }
}
