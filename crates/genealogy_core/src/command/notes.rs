//! Commands that move a note within or between note containers.
//!
//! # Invariants
//! - The insertion index is computed before the note is removed; moving a
//!   note to a later position in the same container inserts one slot
//!   earlier to account for its own removal.
//! - Undo removes the note and re-inserts it at its original index, which
//!   restores the original order exactly.

use crate::command::{Command, CommandError, CommandResult};
use crate::model::note::{Note, NoteContainer, NoteOwner};
use log::debug;

/// Index right after `after_note` in `container`, or 0 when there is none.
fn index_after(container: &NoteOwner, after_note: Option<&Note>) -> usize {
    after_note
        .and_then(|note| container.index_of_note(note))
        .map_or(0, |index| index + 1)
}

/// Reorders a note inside its own container.
pub struct ReorderNoteCommand {
    container: NoteOwner,
    note: Note,
    index: usize,
    old_index: Option<usize>,
}

impl ReorderNoteCommand {
    /// Creates a command that moves `note` to the front of `container`
    /// unless `set_after_note` names a predecessor.
    pub fn new(container: impl Into<NoteOwner>, note: Note) -> Self {
        Self {
            container: container.into(),
            note,
            index: 0,
            old_index: None,
        }
    }

    /// Places the note right after `after_note`, or first when `None`.
    pub fn set_after_note(&mut self, after_note: Option<&Note>) {
        self.index = index_after(&self.container, after_note);
    }

    /// Target index as computed before the note is removed.
    pub fn target_index(&self) -> usize {
        self.index
    }
}

impl Command for ReorderNoteCommand {
    fn label(&self) -> String {
        "Reorder Notes".to_string()
    }

    fn execute(&mut self) -> CommandResult {
        let old_index = self
            .container
            .index_of_note(&self.note)
            .ok_or(CommandError::NoteNotInContainer)?;
        self.old_index = Some(old_index);
        let insert_at = if self.index <= old_index {
            self.index
        } else {
            self.index - 1
        };
        self.container.remove_note(&self.note);
        self.container.add_note_at(insert_at, &self.note);
        debug!(
            "event=command_execute module=command command=reorder_note note={} from={} to={}",
            self.note.id(),
            old_index,
            insert_at
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        let old_index = self
            .old_index
            .ok_or(CommandError::NotExecuted("Reorder Notes"))?;
        self.container.remove_note(&self.note);
        self.container.add_note_at(old_index, &self.note);
        debug!(
            "event=command_undo module=command command=reorder_note note={} to={}",
            self.note.id(),
            old_index
        );
        Ok(())
    }
}

/// Moves a note from one container to another.
pub struct ReparentNoteCommand {
    container: NoteOwner,
    old_container: Option<NoteOwner>,
    note: Note,
    index: usize,
    old_index: Option<usize>,
}

impl ReparentNoteCommand {
    /// Creates a command that moves `note` to the front of `container`
    /// unless `set_after_note` names a predecessor there.
    pub fn new(container: impl Into<NoteOwner>, note: Note) -> Self {
        Self {
            container: container.into(),
            old_container: None,
            note,
            index: 0,
            old_index: None,
        }
    }

    /// Places the note right after `after_note` in the new container.
    pub fn set_after_note(&mut self, after_note: Option<&Note>) {
        self.index = index_after(&self.container, after_note);
    }

    /// The container currently owning the note.
    pub fn set_old_container(&mut self, old_container: impl Into<NoteOwner>) {
        self.old_container = Some(old_container.into());
    }
}

impl Command for ReparentNoteCommand {
    fn label(&self) -> String {
        "Reparent Note".to_string()
    }

    fn can_execute(&self) -> bool {
        self.old_container
            .as_ref()
            .is_some_and(|old| *old != self.container)
    }

    fn execute(&mut self) -> CommandResult {
        let old_container = self
            .old_container
            .as_ref()
            .ok_or(CommandError::MissingEndpoint("old container"))?;
        if *old_container == self.container {
            return Err(CommandError::SameContainer);
        }
        let old_index = old_container
            .index_of_note(&self.note)
            .ok_or(CommandError::NoteNotInContainer)?;
        self.old_index = Some(old_index);
        old_container.remove_note(&self.note);
        self.container.add_note_at(self.index, &self.note);
        debug!(
            "event=command_execute module=command command=reparent_note note={} from={} to={}",
            self.note.id(),
            old_index,
            self.index
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        let (Some(old_container), Some(old_index)) = (self.old_container.as_ref(), self.old_index)
        else {
            return Err(CommandError::NotExecuted("Reparent Note"));
        };
        self.container.remove_note(&self.note);
        old_container.add_note_at(old_index, &self.note);
        debug!(
            "event=command_undo module=command command=reparent_note note={} to={}",
            self.note.id(),
            old_index
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ReorderNoteCommand;
    use crate::command::{Command, CommandError};
    use crate::model::graph::GenealogyGraph;
    use crate::model::note::{Note, NoteContainer};

    #[test]
    fn target_index_is_one_past_after_note() {
        let graph = GenealogyGraph::new();
        let a = Note::new("A");
        let b = Note::new("B");
        graph.add_note(&a);
        graph.add_note(&b);

        let mut command = ReorderNoteCommand::new(graph.clone(), b.clone());
        assert_eq!(command.target_index(), 0);
        command.set_after_note(Some(&a));
        assert_eq!(command.target_index(), 1);
        command.set_after_note(None);
        assert_eq!(command.target_index(), 0);
    }

    #[test]
    fn reorder_of_foreign_note_is_rejected() {
        let graph = GenealogyGraph::new();
        let mut command = ReorderNoteCommand::new(graph, Note::new("stray"));
        assert_eq!(command.execute(), Err(CommandError::NoteNotInContainer));
    }
}
