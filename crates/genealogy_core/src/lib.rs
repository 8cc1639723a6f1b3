//! Core domain logic for the genealogy graph editor.
//! This crate is the single source of truth for family-tree invariants.

pub mod command;
pub mod logging;
pub mod model;
pub mod snapshot;

pub use command::{
    Command, CommandError, CommandResult, CreateConnectionCommand, CreateMarriageCommand,
    CreateNoteCommand, CreateOffspringConnectionCommand, CreatePersonCommand,
    CreateSpouseConnectionCommand, DeleteConnectionCommand, DeleteMarriageCommand,
    DeleteNoteCommand, DeletePersonCommand, MoveAndResizeCommand, RenameNoteCommand,
    ReorderNoteCommand, ReparentNoteCommand,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::connection::{ConnectionKind, GenealogyConnection, GraphNode};
pub use model::element::{BoundedElement, Bounds, ElementId, UNKNOWN_YEAR};
pub use model::graph::GenealogyGraph;
pub use model::listener::{
    ElementListener, GraphListener, MarriageListener, NoteContainerListener, NoteListener,
    PersonListener,
};
pub use model::marriage::Marriage;
pub use model::note::{Note, NoteContainer, NoteOwner};
pub use model::person::{Gender, Person};
pub use snapshot::{GraphSnapshot, MarriageRecord, NoteRecord, PersonRecord, SnapshotError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
