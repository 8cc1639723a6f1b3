//! Commands that add a new element to its container.

use crate::command::{Command, CommandResult};
use crate::model::element::{BoundedElement, Bounds};
use crate::model::graph::GenealogyGraph;
use crate::model::marriage::Marriage;
use crate::model::note::{Note, NoteContainer, NoteOwner};
use crate::model::person::Person;
use log::debug;

/// Applies `bounds` when given and returns the bounds it replaced.
fn place(element: &impl BoundedElement, bounds: Option<Bounds>) -> Option<Bounds> {
    let bounds = bounds?;
    let previous = element.bounds();
    element.set_bounds(bounds);
    Some(previous)
}

fn unplace(element: &impl BoundedElement, previous: Option<Bounds>) {
    if let Some(previous) = previous {
        element.set_bounds(previous);
    }
}

/// Adds a person to the graph, optionally positioning it first.
pub struct CreatePersonCommand {
    graph: GenealogyGraph,
    person: Person,
    bounds: Option<Bounds>,
    previous_bounds: Option<Bounds>,
}

impl CreatePersonCommand {
    pub fn new(graph: GenealogyGraph, person: Person, bounds: Option<Bounds>) -> Self {
        Self {
            graph,
            person,
            bounds,
            previous_bounds: None,
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }
}

impl Command for CreatePersonCommand {
    fn label(&self) -> String {
        "Create Person".to_string()
    }

    fn execute(&mut self) -> CommandResult {
        self.previous_bounds = place(&self.person, self.bounds);
        self.graph.add_person(&self.person);
        debug!(
            "event=command_execute module=command command=create_person person={}",
            self.person.id()
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        self.graph.remove_person(&self.person);
        unplace(&self.person, self.previous_bounds.take());
        debug!(
            "event=command_undo module=command command=create_person person={}",
            self.person.id()
        );
        Ok(())
    }
}

/// Adds a marriage to the graph, optionally positioning it first.
pub struct CreateMarriageCommand {
    graph: GenealogyGraph,
    marriage: Marriage,
    bounds: Option<Bounds>,
    previous_bounds: Option<Bounds>,
}

impl CreateMarriageCommand {
    pub fn new(graph: GenealogyGraph, marriage: Marriage, bounds: Option<Bounds>) -> Self {
        Self {
            graph,
            marriage,
            bounds,
            previous_bounds: None,
        }
    }

    pub fn marriage(&self) -> &Marriage {
        &self.marriage
    }
}

impl Command for CreateMarriageCommand {
    fn label(&self) -> String {
        "Create Marriage".to_string()
    }

    fn execute(&mut self) -> CommandResult {
        self.previous_bounds = place(&self.marriage, self.bounds);
        self.graph.add_marriage(&self.marriage);
        debug!(
            "event=command_execute module=command command=create_marriage marriage={}",
            self.marriage.id()
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        self.graph.remove_marriage(&self.marriage);
        unplace(&self.marriage, self.previous_bounds.take());
        debug!(
            "event=command_undo module=command command=create_marriage marriage={}",
            self.marriage.id()
        );
        Ok(())
    }
}

/// Appends a note to a container, optionally positioning it first.
pub struct CreateNoteCommand {
    container: NoteOwner,
    note: Note,
    bounds: Option<Bounds>,
    previous_bounds: Option<Bounds>,
}

impl CreateNoteCommand {
    pub fn new(container: impl Into<NoteOwner>, note: Note, bounds: Option<Bounds>) -> Self {
        Self {
            container: container.into(),
            note,
            bounds,
            previous_bounds: None,
        }
    }

    pub fn note(&self) -> &Note {
        &self.note
    }
}

impl Command for CreateNoteCommand {
    fn label(&self) -> String {
        "Create Note".to_string()
    }

    fn execute(&mut self) -> CommandResult {
        self.previous_bounds = place(&self.note, self.bounds);
        self.container.add_note(&self.note);
        debug!(
            "event=command_execute module=command command=create_note note={}",
            self.note.id()
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        self.container.remove_note(&self.note);
        unplace(&self.note, self.previous_bounds.take());
        debug!(
            "event=command_undo module=command command=create_note note={}",
            self.note.id()
        );
        Ok(())
    }
}
