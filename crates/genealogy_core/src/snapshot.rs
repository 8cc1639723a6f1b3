//! Serializable graph snapshots for reader/writer collaborators.
//!
//! # Responsibility
//! - Read a whole graph without mutating it (`capture`).
//! - Rebuild a graph purely through public mutators (`restore_into`).
//!
//! # Invariants
//! - Capture order is deterministic: people by name then id, marriages by
//!   year then id, notes in container order.
//! - Restore validates every reference before touching the graph; a
//!   rejected snapshot leaves the graph unchanged.
//! - Persons are created before marriages reference them.

use crate::model::element::{BoundedElement, Bounds, ElementId};
use crate::model::graph::GenealogyGraph;
use crate::model::marriage::Marriage;
use crate::model::note::{Note, NoteContainer};
use crate::model::person::{Gender, Person};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: ElementId,
    pub text: String,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: ElementId,
    pub name: String,
    pub gender: Gender,
    pub birth_year: i32,
    pub death_year: i32,
    pub bounds: Bounds,
    pub notes: Vec<NoteRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarriageRecord {
    pub id: ElementId,
    pub year_married: i32,
    pub bounds: Bounds,
    pub husband: Option<ElementId>,
    pub wife: Option<ElementId>,
    pub offspring: Vec<ElementId>,
}

/// Plain-data image of a whole genealogy graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub people: Vec<PersonRecord>,
    pub marriages: Vec<MarriageRecord>,
    pub notes: Vec<NoteRecord>,
}

/// Reasons a snapshot cannot be restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Two people share one id.
    DuplicatePerson(ElementId),
    /// Two marriages share one id.
    DuplicateMarriage(ElementId),
    /// Two notes share one id, top-level or owned by a person.
    DuplicateNote(ElementId),
    /// A marriage references a person missing from the snapshot.
    UnknownPerson {
        marriage: ElementId,
        person: ElementId,
    },
    /// A spouse slot references a person of the wrong gender.
    SpouseGenderMismatch {
        marriage: ElementId,
        person: ElementId,
    },
    /// A person is spouse in more than one marriage.
    DuplicateSpouse(ElementId),
    /// A person is offspring of more than one marriage, or listed twice.
    DuplicateOffspring(ElementId),
    /// A person is both spouse and offspring of the same marriage.
    SpouseAsOffspring {
        marriage: ElementId,
        person: ElementId,
    },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePerson(id) => write!(f, "person id appears twice: {id}"),
            Self::DuplicateMarriage(id) => write!(f, "marriage id appears twice: {id}"),
            Self::DuplicateNote(id) => write!(f, "note id appears twice: {id}"),
            Self::UnknownPerson { marriage, person } => {
                write!(f, "marriage {marriage} references unknown person {person}")
            }
            Self::SpouseGenderMismatch { marriage, person } => write!(
                f,
                "marriage {marriage} puts person {person} in the wrong spouse slot"
            ),
            Self::DuplicateSpouse(id) => write!(f, "person {id} is spouse in two marriages"),
            Self::DuplicateOffspring(id) => {
                write!(f, "person {id} is offspring of two marriages")
            }
            Self::SpouseAsOffspring { marriage, person } => write!(
                f,
                "person {person} is both spouse and offspring of marriage {marriage}"
            ),
        }
    }
}

impl Error for SnapshotError {}

impl GraphSnapshot {
    /// Reads `graph` into plain records. Never mutates the graph.
    pub fn capture(graph: &GenealogyGraph) -> Self {
        let mut people: Vec<PersonRecord> = graph
            .people()
            .iter()
            .map(|person| PersonRecord {
                id: person.id(),
                name: person.name(),
                gender: person.gender(),
                birth_year: person.birth_year(),
                death_year: person.death_year(),
                bounds: person.bounds(),
                notes: note_records(person),
            })
            .collect();
        people.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let mut marriages: Vec<MarriageRecord> = graph
            .marriages()
            .iter()
            .map(|marriage| MarriageRecord {
                id: marriage.id(),
                year_married: marriage.year_married(),
                bounds: marriage.bounds(),
                husband: marriage.husband().map(|person| person.id()),
                wife: marriage.wife().map(|person| person.id()),
                offspring: marriage.offspring().iter().map(Person::id).collect(),
            })
            .collect();
        marriages.sort_by(|a, b| {
            a.year_married
                .cmp(&b.year_married)
                .then(a.id.cmp(&b.id))
        });

        Self {
            people,
            marriages,
            notes: note_records(graph),
        }
    }

    /// Replaces the contents of `graph` with this snapshot.
    ///
    /// # Errors
    /// - Returns a `SnapshotError` for the first inconsistent reference; the
    ///   graph is not touched in that case.
    pub fn restore_into(&self, graph: &GenealogyGraph) -> Result<(), SnapshotError> {
        self.validate()?;

        graph.clear();
        let mut by_id = HashMap::with_capacity(self.people.len());
        for record in &self.people {
            let person = Person::with_id(record.id, record.gender);
            person.set_name(record.name.as_str());
            person.set_birth_year(record.birth_year);
            person.set_death_year(record.death_year);
            person.set_bounds(record.bounds);
            for note in &record.notes {
                person.add_note(&restore_note(note));
            }
            graph.add_person(&person);
            by_id.insert(record.id, person);
        }

        for record in &self.marriages {
            let marriage = Marriage::with_id(record.id);
            marriage.set_year_married(record.year_married);
            marriage.set_bounds(record.bounds);
            marriage.set_husband(record.husband.and_then(|id| by_id.get(&id)));
            marriage.set_wife(record.wife.and_then(|id| by_id.get(&id)));
            for child in record.offspring.iter().filter_map(|id| by_id.get(id)) {
                marriage.add_offspring(child);
            }
            graph.add_marriage(&marriage);
        }

        for note in &self.notes {
            graph.add_note(&restore_note(note));
        }

        info!(
            "event=snapshot_restored module=snapshot status=ok people={} marriages={} notes={}",
            self.people.len(),
            self.marriages.len(),
            self.notes.len()
        );
        Ok(())
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        let mut genders = HashMap::with_capacity(self.people.len());
        for record in &self.people {
            if genders.insert(record.id, record.gender).is_some() {
                return Err(SnapshotError::DuplicatePerson(record.id));
            }
        }

        let mut note_ids = HashSet::new();
        let notes = self
            .notes
            .iter()
            .chain(self.people.iter().flat_map(|person| person.notes.iter()));
        for note in notes {
            if !note_ids.insert(note.id) {
                return Err(SnapshotError::DuplicateNote(note.id));
            }
        }

        let mut marriage_ids = HashSet::with_capacity(self.marriages.len());
        let mut spouses = HashSet::new();
        let mut children = HashSet::new();
        for record in &self.marriages {
            if !marriage_ids.insert(record.id) {
                return Err(SnapshotError::DuplicateMarriage(record.id));
            }
            let slots = [(record.husband, Gender::Male), (record.wife, Gender::Female)];
            for (person, expected) in slots {
                let Some(person) = person else {
                    continue;
                };
                let gender = genders.get(&person).ok_or(SnapshotError::UnknownPerson {
                    marriage: record.id,
                    person,
                })?;
                if *gender != expected {
                    return Err(SnapshotError::SpouseGenderMismatch {
                        marriage: record.id,
                        person,
                    });
                }
                if !spouses.insert(person) {
                    return Err(SnapshotError::DuplicateSpouse(person));
                }
            }
            for &person in &record.offspring {
                if !genders.contains_key(&person) {
                    return Err(SnapshotError::UnknownPerson {
                        marriage: record.id,
                        person,
                    });
                }
                if record.husband == Some(person) || record.wife == Some(person) {
                    return Err(SnapshotError::SpouseAsOffspring {
                        marriage: record.id,
                        person,
                    });
                }
                if !children.insert(person) {
                    return Err(SnapshotError::DuplicateOffspring(person));
                }
            }
        }
        Ok(())
    }
}

fn note_records(container: &impl NoteContainer) -> Vec<NoteRecord> {
    container
        .notes()
        .iter()
        .map(|note| NoteRecord {
            id: note.id(),
            text: note.text(),
            bounds: note.bounds(),
        })
        .collect()
}

fn restore_note(record: &NoteRecord) -> Note {
    let note = Note::with_id(record.id, record.text.as_str());
    note.set_bounds(record.bounds);
    note
}
