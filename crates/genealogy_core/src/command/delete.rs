//! Commands that remove elements and the links that reference them.
//!
//! Captured relationships are restored on undo without re-validating them;
//! a later edit between execute and undo is overwritten by the restore.

use crate::command::{Command, CommandResult};
use crate::model::connection::{ConnectionKind, GenealogyConnection};
use crate::model::graph::GenealogyGraph;
use crate::model::marriage::Marriage;
use crate::model::note::{Note, NoteContainer, NoteOwner};
use crate::model::person::Person;
use log::debug;

/// Severs a person's spouse and offspring links, then removes the person.
pub struct DeletePersonCommand {
    graph: GenealogyGraph,
    person: Person,
    label: String,
    marriage: Option<Marriage>,
    parents_marriage: Option<Marriage>,
}

impl DeletePersonCommand {
    pub fn new(graph: GenealogyGraph, person: Person) -> Self {
        let label = format!("Delete {}", person.name());
        Self {
            graph,
            person,
            label,
            marriage: None,
            parents_marriage: None,
        }
    }
}

impl Command for DeletePersonCommand {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn execute(&mut self) -> CommandResult {
        self.marriage = self.person.marriage();
        self.parents_marriage = self.person.parents_marriage();
        self.person.set_marriage(None);
        self.person.set_parents_marriage(None);
        self.graph.remove_person(&self.person);
        debug!(
            "event=command_execute module=command command=delete_person person={} had_marriage={} had_parents={}",
            self.person.id(),
            self.marriage.is_some(),
            self.parents_marriage.is_some()
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        self.graph.add_person(&self.person);
        self.person.set_parents_marriage(self.parents_marriage.as_ref());
        self.person.set_marriage(self.marriage.as_ref());
        debug!(
            "event=command_undo module=command command=delete_person person={}",
            self.person.id()
        );
        Ok(())
    }
}

/// Severs a marriage's spouses and offspring, then removes the marriage.
pub struct DeleteMarriageCommand {
    graph: GenealogyGraph,
    marriage: Marriage,
    husband: Option<Person>,
    wife: Option<Person>,
    offspring: Vec<Person>,
}

impl DeleteMarriageCommand {
    pub fn new(graph: GenealogyGraph, marriage: Marriage) -> Self {
        Self {
            graph,
            marriage,
            husband: None,
            wife: None,
            offspring: Vec::new(),
        }
    }
}

impl Command for DeleteMarriageCommand {
    fn label(&self) -> String {
        "Delete Marriage".to_string()
    }

    fn execute(&mut self) -> CommandResult {
        self.husband = self.marriage.husband();
        self.wife = self.marriage.wife();
        // Owned copy: removing offspring mutates the live set.
        self.offspring = self.marriage.offspring();
        self.marriage.set_husband(None);
        self.marriage.set_wife(None);
        for child in &self.offspring {
            self.marriage.remove_offspring(child);
        }
        self.graph.remove_marriage(&self.marriage);
        debug!(
            "event=command_execute module=command command=delete_marriage marriage={} offspring={}",
            self.marriage.id(),
            self.offspring.len()
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        self.graph.add_marriage(&self.marriage);
        for child in &self.offspring {
            self.marriage.add_offspring(child);
        }
        self.marriage.set_wife(self.wife.as_ref());
        self.marriage.set_husband(self.husband.as_ref());
        debug!(
            "event=command_undo module=command command=delete_marriage marriage={}",
            self.marriage.id()
        );
        Ok(())
    }
}

/// Removes a note from its container, remembering its position.
pub struct DeleteNoteCommand {
    container: NoteOwner,
    note: Note,
    index: Option<usize>,
}

impl DeleteNoteCommand {
    pub fn new(container: impl Into<NoteOwner>, note: Note) -> Self {
        Self {
            container: container.into(),
            note,
            index: None,
        }
    }
}

impl Command for DeleteNoteCommand {
    fn label(&self) -> String {
        "Delete Note".to_string()
    }

    fn execute(&mut self) -> CommandResult {
        self.index = self.container.index_of_note(&self.note);
        self.container.remove_note(&self.note);
        debug!(
            "event=command_execute module=command command=delete_note note={} index={:?}",
            self.note.id(),
            self.index
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        if let Some(index) = self.index {
            self.container.add_note_at(index, &self.note);
        }
        debug!(
            "event=command_undo module=command command=delete_note note={}",
            self.note.id()
        );
        Ok(())
    }
}

/// Severs whichever relation currently links a person and a marriage.
pub struct DeleteConnectionCommand {
    connection: GenealogyConnection,
    severed: Option<ConnectionKind>,
}

impl DeleteConnectionCommand {
    pub fn new(connection: GenealogyConnection) -> Self {
        Self {
            connection,
            severed: None,
        }
    }

    /// Relation removed by the last `execute`; `None` when nothing linked the pair.
    pub fn severed(&self) -> Option<ConnectionKind> {
        self.severed
    }
}

impl Command for DeleteConnectionCommand {
    fn label(&self) -> String {
        "Delete Connection".to_string()
    }

    fn execute(&mut self) -> CommandResult {
        let GenealogyConnection { person, marriage } = &self.connection;
        self.severed = if person.marriage().as_ref() == Some(marriage) {
            person.set_marriage(None);
            Some(ConnectionKind::Spouse)
        } else if person.parents_marriage().as_ref() == Some(marriage) {
            person.set_parents_marriage(None);
            Some(ConnectionKind::Offspring)
        } else {
            None
        };
        debug!(
            "event=command_execute module=command command=delete_connection person={} marriage={} severed={}",
            person.id(),
            marriage.id(),
            self.severed.map_or("none", ConnectionKind::as_str)
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        let GenealogyConnection { person, marriage } = &self.connection;
        match self.severed {
            Some(ConnectionKind::Spouse) => {
                person.set_marriage(Some(marriage));
            }
            Some(ConnectionKind::Offspring) => {
                person.set_parents_marriage(Some(marriage));
            }
            None => {}
        }
        debug!(
            "event=command_undo module=command command=delete_connection person={} marriage={}",
            person.id(),
            marriage.id()
        );
        Ok(())
    }
}
