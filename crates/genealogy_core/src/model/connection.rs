//! Derived person/marriage edges.
//!
//! A `GenealogyConnection` is not a model element and is never stored; it
//! names an edge already encoded in the person and marriage links, so edge
//! oriented consumers can use it as a lookup key.

use crate::model::marriage::Marriage;
use crate::model::person::Person;

/// Kind of relation between a person and a marriage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// The person is husband or wife of the marriage.
    Spouse,
    /// The person was born from the marriage.
    Offspring,
}

impl ConnectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spouse => "spouse",
            Self::Offspring => "offspring",
        }
    }
}

/// Identity pair of a person and a marriage.
///
/// Two instances over the same person and marriage are equal and hash
/// equal, whatever the current relation between them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenealogyConnection {
    pub person: Person,
    pub marriage: Marriage,
}

impl GenealogyConnection {
    pub fn new(person: Person, marriage: Marriage) -> Self {
        Self { person, marriage }
    }

    /// True when the person is an offspring of the marriage, false when the
    /// person is a parent in it.
    pub fn is_offspring_connection(&self) -> bool {
        self.marriage.has_offspring(&self.person)
    }

    pub fn kind(&self) -> ConnectionKind {
        if self.is_offspring_connection() {
            ConnectionKind::Offspring
        } else {
            ConnectionKind::Spouse
        }
    }
}

/// Any model object a connection can be drawn from or to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphNode {
    Person(Person),
    Marriage(Marriage),
}

impl GraphNode {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Person(_) => "person",
            Self::Marriage(_) => "marriage",
        }
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Self::Person(person) => Some(person),
            Self::Marriage(_) => None,
        }
    }

    pub fn as_marriage(&self) -> Option<&Marriage> {
        match self {
            Self::Marriage(marriage) => Some(marriage),
            Self::Person(_) => None,
        }
    }
}

impl From<Person> for GraphNode {
    fn from(value: Person) -> Self {
        Self::Person(value)
    }
}

impl From<Marriage> for GraphNode {
    fn from(value: Marriage) -> Self {
        Self::Marriage(value)
    }
}
