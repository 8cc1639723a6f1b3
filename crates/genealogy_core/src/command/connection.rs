//! Two-phase commands that create a spouse or offspring connection.
//!
//! # Responsibility
//! - Start from one known endpoint, accept the other after interactive
//!   validation, then install the link.
//! - Restore every link the installation displaced.
//!
//! # Invariants
//! - Validity is checked with `is_valid_source`/`is_valid_target` before the
//!   endpoint is set; `execute` does not re-validate.
//! - A person is never connected twice to the same marriage.

use crate::command::{Command, CommandError, CommandResult};
use crate::model::connection::GraphNode;
use crate::model::marriage::Marriage;
use crate::model::person::Person;
use log::debug;

/// Interactive connection creation contract.
pub trait CreateConnectionCommand: Command {
    fn connection_name(&self) -> &'static str;

    /// Whether `source` may start this connection, given the current target.
    fn is_valid_source(&self, source: &GraphNode) -> bool;

    /// Whether `target` may end this connection, given the current source.
    fn is_valid_target(&self, target: &GraphNode) -> bool;

    fn set_source(&mut self, source: GraphNode) -> CommandResult;

    fn set_target(&mut self, target: GraphNode) -> CommandResult;
}

fn person_of(node: GraphNode) -> Result<Person, CommandError> {
    match node {
        GraphNode::Person(person) => Ok(person),
        other => Err(CommandError::UnexpectedEndpoint {
            expected: "person",
            found: other.kind_name(),
        }),
    }
}

fn marriage_of(node: GraphNode) -> Result<Marriage, CommandError> {
    match node {
        GraphNode::Marriage(marriage) => Ok(marriage),
        other => Err(CommandError::UnexpectedEndpoint {
            expected: "marriage",
            found: other.kind_name(),
        }),
    }
}

/// True when `person` already takes part in `marriage` in any role.
fn already_linked(person: &Person, marriage: &Marriage) -> bool {
    marriage.has_offspring(person)
        || marriage.husband().as_ref() == Some(person)
        || marriage.wife().as_ref() == Some(person)
}

struct SpouseUndo {
    old_marriage: Option<Marriage>,
    old_husband: Option<Person>,
    old_wife: Option<Person>,
}

/// Makes a person the husband or wife of a marriage.
///
/// Source is the person, target is the marriage.
pub struct CreateSpouseConnectionCommand {
    person: Person,
    marriage: Option<Marriage>,
    undo_state: Option<SpouseUndo>,
}

impl CreateSpouseConnectionCommand {
    pub fn new(person: Person) -> Self {
        Self {
            person,
            marriage: None,
            undo_state: None,
        }
    }
}

impl Command for CreateSpouseConnectionCommand {
    fn label(&self) -> String {
        format!("Create {}", self.connection_name())
    }

    fn can_execute(&self) -> bool {
        self.marriage.is_some()
    }

    fn execute(&mut self) -> CommandResult {
        let marriage = self
            .marriage
            .as_ref()
            .ok_or(CommandError::MissingEndpoint("marriage"))?;
        // Installing may evict the marriage's current spouse; capture both
        // slots whatever the person's gender.
        self.undo_state = Some(SpouseUndo {
            old_marriage: self.person.marriage(),
            old_husband: marriage.husband(),
            old_wife: marriage.wife(),
        });
        self.person.set_marriage(Some(marriage));
        debug!(
            "event=command_execute module=command command=create_spouse_connection person={} marriage={}",
            self.person.id(),
            marriage.id()
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        let marriage = self
            .marriage
            .as_ref()
            .ok_or(CommandError::MissingEndpoint("marriage"))?;
        let state = self
            .undo_state
            .as_ref()
            .ok_or(CommandError::NotExecuted("Create Spouse Connection"))?;
        marriage.set_wife(state.old_wife.as_ref());
        marriage.set_husband(state.old_husband.as_ref());
        self.person.set_marriage(state.old_marriage.as_ref());
        debug!(
            "event=command_undo module=command command=create_spouse_connection person={} marriage={}",
            self.person.id(),
            marriage.id()
        );
        Ok(())
    }
}

impl CreateConnectionCommand for CreateSpouseConnectionCommand {
    fn connection_name(&self) -> &'static str {
        "Spouse Connection"
    }

    fn is_valid_source(&self, source: &GraphNode) -> bool {
        let Some(person) = source.as_person() else {
            return false;
        };
        match &self.marriage {
            None => true,
            Some(marriage) => !already_linked(person, marriage),
        }
    }

    fn is_valid_target(&self, target: &GraphNode) -> bool {
        let Some(marriage) = target.as_marriage() else {
            return false;
        };
        self.person.marriage().as_ref() != Some(marriage)
            && self.person.parents_marriage().as_ref() != Some(marriage)
    }

    fn set_source(&mut self, source: GraphNode) -> CommandResult {
        self.person = person_of(source)?;
        Ok(())
    }

    fn set_target(&mut self, target: GraphNode) -> CommandResult {
        self.marriage = Some(marriage_of(target)?);
        Ok(())
    }
}

/// Makes a person an offspring of a marriage.
///
/// Source is the marriage, target is the person.
pub struct CreateOffspringConnectionCommand {
    marriage: Marriage,
    person: Option<Person>,
    old_parents_marriage: Option<Option<Marriage>>,
}

impl CreateOffspringConnectionCommand {
    pub fn new(marriage: Marriage) -> Self {
        Self {
            marriage,
            person: None,
            old_parents_marriage: None,
        }
    }
}

impl Command for CreateOffspringConnectionCommand {
    fn label(&self) -> String {
        format!("Create {}", self.connection_name())
    }

    fn can_execute(&self) -> bool {
        self.person.is_some()
    }

    fn execute(&mut self) -> CommandResult {
        let person = self
            .person
            .as_ref()
            .ok_or(CommandError::MissingEndpoint("person"))?;
        self.old_parents_marriage = Some(person.parents_marriage());
        person.set_parents_marriage(Some(&self.marriage));
        debug!(
            "event=command_execute module=command command=create_offspring_connection person={} marriage={}",
            person.id(),
            self.marriage.id()
        );
        Ok(())
    }

    fn undo(&mut self) -> CommandResult {
        let person = self
            .person
            .as_ref()
            .ok_or(CommandError::MissingEndpoint("person"))?;
        let old = self
            .old_parents_marriage
            .as_ref()
            .ok_or(CommandError::NotExecuted("Create Offspring Connection"))?;
        person.set_parents_marriage(old.as_ref());
        debug!(
            "event=command_undo module=command command=create_offspring_connection person={} marriage={}",
            person.id(),
            self.marriage.id()
        );
        Ok(())
    }
}

impl CreateConnectionCommand for CreateOffspringConnectionCommand {
    fn connection_name(&self) -> &'static str {
        "Offspring Connection"
    }

    fn is_valid_source(&self, source: &GraphNode) -> bool {
        let Some(marriage) = source.as_marriage() else {
            return false;
        };
        match &self.person {
            None => true,
            Some(person) => {
                person.parents_marriage().as_ref() != Some(marriage)
                    && person.marriage().as_ref() != Some(marriage)
            }
        }
    }

    fn is_valid_target(&self, target: &GraphNode) -> bool {
        let Some(person) = target.as_person() else {
            return false;
        };
        !already_linked(person, &self.marriage)
    }

    fn set_source(&mut self, source: GraphNode) -> CommandResult {
        self.marriage = marriage_of(source)?;
        Ok(())
    }

    fn set_target(&mut self, target: GraphNode) -> CommandResult {
        self.person = Some(person_of(target)?);
        Ok(())
    }
}
