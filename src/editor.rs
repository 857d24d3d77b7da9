//! Handing the terminal to external programs: the note editor and the
//! directory tree viewer behind `nn show`.

use crate::error::ProcessError;
use std::path::Path;
use std::process::{self, Command, Stdio};
use tracing::{info, warn};

pub const DEFAULT_EDITOR: &str = "vim";
pub const TREE_COMMAND: &str = "tree";

/// What happens to this process once the child exits successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// Return to the caller, which resumes where it left off.
    Resume,
    /// Exit with status 0 right after the child.
    Exit,
}

/// Opens a note for editing and blocks until the editor is closed.
pub trait EditorLauncher {
    fn edit(&mut self, path: &Path) -> Result<(), ProcessError>;
}

#[derive(Debug, Clone)]
pub struct SystemEditor {
    command: String,
}

impl SystemEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }
}

impl EditorLauncher for SystemEditor {
    fn edit(&mut self, path: &Path) -> Result<(), ProcessError> {
        hand_off(&self.command, path, Handoff::Resume)
    }
}

/// Run `command <target>` attached to this terminal's stdin, stdout and
/// stderr, blocking until it exits. `command` may carry its own arguments,
/// e.g. `code --wait`.
pub fn hand_off(
    command: &str,
    target: &Path,
    handoff: Handoff,
) -> Result<(), ProcessError> {
    let mut parts = command.split_whitespace();
    let program = parts.next().unwrap_or(DEFAULT_EDITOR);
    info!(program, target = %target.display(), "handing off terminal");

    let status = Command::new(program)
        .args(parts)
        .arg(target)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| ProcessError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !status.success() {
        warn!(program, code = ?status.code(), "child exited unsuccessfully");
        return Err(ProcessError::Status {
            program: program.to_string(),
            code: status.code(),
        });
    }

    match handoff {
        Handoff::Resume => Ok(()),
        Handoff::Exit => process::exit(0),
    }
}

/// `nn show`: print the notes directory as a tree.
pub fn show_tree(root: &Path) -> Result<(), ProcessError> {
    hand_off(TREE_COMMAND, root, Handoff::Exit)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_successful_editor_resumes() {
        let mut editor = SystemEditor::new("true");
        assert!(editor.edit(Path::new("note.md")).is_ok());
    }

    #[test]
    fn test_editor_arguments_are_split() {
        let mut editor = SystemEditor::new("true --wait");
        assert!(editor.edit(Path::new("note.md")).is_ok());
    }

    #[test]
    fn test_failing_editor_reports_status() {
        let mut editor = SystemEditor::new("false");
        let err = editor.edit(Path::new("note.md")).unwrap_err();
        assert!(matches!(err, ProcessError::Status { code: Some(1), .. }));
    }

    #[test]
    fn test_missing_editor_reports_spawn_error() {
        let mut editor = SystemEditor::new("nn-no-such-editor-binary");
        let err = editor.edit(Path::new("note.md")).unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
        assert!(err.to_string().contains("nn-no-such-editor-binary"));
    }
}
