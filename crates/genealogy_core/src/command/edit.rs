//! Commands that edit an element in place.

use crate::command::{Command, CommandError, CommandResult};
use crate::model::element::{BoundedElement, Bounds};
use crate::model::note::Note;
use log::debug;

/// Moves and resizes any bounded element.
pub struct MoveAndResizeCommand<E: BoundedElement> {
    element: E,
    bounds: Bounds,
    old_bounds: Option<Bounds>,
}

impl<E: BoundedElement> MoveAndResizeCommand<E> {
    pub fn new(element: E, bounds: Bounds) -> Self {
        Self {
            element,
            bounds,
            old_bounds: None,
        }
    }
}

impl<E: BoundedElement> Command for MoveAndResizeCommand<E> {
    fn label(&self) -> String {
        format!("Modify {}", self.element.element_name())
    }

    fn execute(&mut self) -> CommandResult {
        self.old_bounds = Some(self.element.bounds());
        self.element.set_bounds(self.bounds);
        debug!(
            "event=command_execute module=command command=move_and_resize element={}",
            self.element.element_name()
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        let old_bounds = self
            .old_bounds
            .ok_or(CommandError::NotExecuted("Move and Resize"))?;
        self.element.set_bounds(old_bounds);
        debug!(
            "event=command_undo module=command command=move_and_resize element={}",
            self.element.element_name()
        );
        Ok(())
    }
}

/// Replaces the text of a note.
pub struct RenameNoteCommand {
    note: Note,
    text: String,
    old_text: Option<String>,
}

impl RenameNoteCommand {
    pub fn new(note: Note, text: impl Into<String>) -> Self {
        Self {
            note,
            text: text.into(),
            old_text: None,
        }
    }
}

impl Command for RenameNoteCommand {
    fn label(&self) -> String {
        "Rename Note".to_string()
    }

    fn execute(&mut self) -> CommandResult {
        self.old_text = Some(self.note.text());
        self.note.set_text(self.text.as_str());
        debug!(
            "event=command_execute module=command command=rename_note note={}",
            self.note.id()
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        let old_text = self
            .old_text
            .as_deref()
            .ok_or(CommandError::NotExecuted("Rename Note"))?;
        self.note.set_text(old_text);
        debug!(
            "event=command_undo module=command command=rename_note note={}",
            self.note.id()
        );
        Ok(())
    }
}
