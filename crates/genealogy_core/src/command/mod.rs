//! Reversible operations on the genealogy model.
//!
//! # Responsibility
//! - Provide one command per logical edit with exact forward and inverse
//!   application, for use by a host undo/redo stack.
//! - Capture only the pre-state needed to invert the edit.
//!
//! # Invariants
//! - `execute(); undo()` restores every touched field and collection.
//! - `undo(); execute()` reproduces the executed end state.
//! - Entity identity is preserved across undo/redo; nothing is recreated.
//! - Domain no-ops never produce `Err`; only caller protocol violations do.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod connection;
pub mod create;
pub mod delete;
pub mod edit;
pub mod notes;

pub use connection::{
    CreateConnectionCommand, CreateOffspringConnectionCommand, CreateSpouseConnectionCommand,
};
pub use create::{CreateMarriageCommand, CreateNoteCommand, CreatePersonCommand};
pub use delete::{
    DeleteConnectionCommand, DeleteMarriageCommand, DeleteNoteCommand, DeletePersonCommand,
};
pub use edit::{MoveAndResizeCommand, RenameNoteCommand};
pub use notes::{ReorderNoteCommand, ReparentNoteCommand};

pub type CommandResult = Result<(), CommandError>;

/// Caller protocol violations raised by commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A two-phase command was executed before this endpoint was set.
    MissingEndpoint(&'static str),
    /// An endpoint of the wrong model kind was supplied.
    UnexpectedEndpoint {
        expected: &'static str,
        found: &'static str,
    },
    /// The note is not in the container the command operates on.
    NoteNotInContainer,
    /// A reparent command was given the same container on both sides.
    SameContainer,
    /// `undo` was called before a successful `execute`.
    NotExecuted(&'static str),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEndpoint(endpoint) => {
                write!(f, "connection {endpoint} has not been set")
            }
            Self::UnexpectedEndpoint { expected, found } => {
                write!(f, "expected a {expected} endpoint, got a {found}")
            }
            Self::NoteNotInContainer => write!(f, "note is not in the expected container"),
            Self::SameContainer => write!(f, "note is already in the target container"),
            Self::NotExecuted(label) => write!(f, "command `{label}` has not been executed"),
        }
    }
}

impl Error for CommandError {}

/// A self-contained, reversible model edit.
pub trait Command {
    /// Human-readable label for undo/redo menus.
    fn label(&self) -> String;

    /// Applies the edit, capturing what `undo` needs.
    fn execute(&mut self) -> CommandResult;

    /// Reverts the last `execute`.
    fn undo(&mut self) -> CommandResult;

    /// Re-applies the edit after `undo`.
    fn redo(&mut self) -> CommandResult {
        self.execute()
    }

    /// Whether the command is fully configured.
    fn can_execute(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::CommandError;

    #[test]
    fn errors_render_their_context() {
        let err = CommandError::UnexpectedEndpoint {
            expected: "marriage",
            found: "person",
        };
        assert_eq!(err.to_string(), "expected a marriage endpoint, got a person");
        assert!(CommandError::NotExecuted("Delete Note")
            .to_string()
            .contains("Delete Note"));
    }
}
