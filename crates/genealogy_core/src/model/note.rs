//! Free-floating text annotations and the containers that own them.
//!
//! # Responsibility
//! - Define the `Note` handle and its text/bounds change notifications.
//! - Define the ordered, index-aware `NoteContainer` capability.
//!
//! # Invariants
//! - A container holds a given note at most once.
//! - Insertion position is honoured exactly; out-of-range inserts are
//!   rejected without mutation.

use crate::model::element::{BoundedElement, Bounds, ElementId};
use crate::model::graph::GenealogyGraph;
use crate::model::listener::{ListenerSet, NoteListener};
use crate::model::person::Person;
use log::{debug, trace};
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use uuid::Uuid;

struct NoteState {
    id: ElementId,
    text: String,
    bounds: Bounds,
    listeners: ListenerSet<dyn NoteListener>,
}

/// Shared handle to a positioned piece of text.
///
/// Clones refer to the same note; equality is handle identity.
#[derive(Clone)]
pub struct Note {
    inner: Rc<RefCell<NoteState>>,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), text)
    }

    /// Creates a note with a caller-provided stable ID.
    ///
    /// Used by snapshot restore where identity already exists.
    pub fn with_id(id: ElementId, text: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NoteState {
                id,
                text: text.into(),
                bounds: Bounds::default(),
                listeners: ListenerSet::default(),
            })),
        }
    }

    pub fn id(&self) -> ElementId {
        self.inner.borrow().id
    }

    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    /// Replaces the note text. Returns `false` when unchanged.
    pub fn set_text(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        {
            let mut state = self.inner.borrow_mut();
            if state.text == text {
                return false;
            }
            state.text = text.clone();
        }
        trace!("event=note_text_changed module=model note={}", self.id());
        for listener in self.listeners() {
            listener.text_changed(&text);
        }
        true
    }

    pub fn add_listener(&self, listener: Rc<dyn NoteListener>) {
        self.inner.borrow_mut().listeners.add(listener);
    }

    pub fn remove_listener(&self, listener: &Rc<dyn NoteListener>) {
        self.inner.borrow_mut().listeners.remove(listener);
    }

    fn listeners(&self) -> Vec<Rc<dyn NoteListener>> {
        self.inner.borrow().listeners.snapshot()
    }
}

impl BoundedElement for Note {
    fn bounds(&self) -> Bounds {
        self.inner.borrow().bounds
    }

    fn store_bounds(&self, bounds: Bounds) {
        self.inner.borrow_mut().bounds = bounds;
    }

    fn on_location_changed(&self, x: i32, y: i32) {
        for listener in self.listeners() {
            listener.location_changed(x, y);
        }
    }

    fn on_size_changed(&self, width: i32, height: i32) {
        for listener in self.listeners() {
            listener.size_changed(width, height);
        }
    }

    fn element_name(&self) -> &'static str {
        "Note"
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Note {}

impl Hash for Note {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl Debug for Note {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Note")
            .field("id", &state.id)
            .field("text", &state.text)
            .finish()
    }
}

/// Anything owning an ordered list of notes.
pub trait NoteContainer {
    /// Copy of the current note order.
    fn notes(&self) -> Vec<Note>;

    /// Inserts `note` at `index`.
    ///
    /// Returns `false` without mutation when the note is already contained or
    /// `index` is past the end of the list.
    fn add_note_at(&self, index: usize, note: &Note) -> bool;

    /// Removes `note`. Returns `false` when it was not contained.
    fn remove_note(&self, note: &Note) -> bool;

    /// Appends `note`.
    fn add_note(&self, note: &Note) -> bool {
        self.add_note_at(self.notes().len(), note)
    }

    fn index_of_note(&self, note: &Note) -> Option<usize> {
        self.notes().iter().position(|candidate| candidate == note)
    }
}

/// The container that currently owns a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteOwner {
    Graph(GenealogyGraph),
    Person(Person),
}

impl NoteOwner {
    fn container(&self) -> &dyn NoteContainer {
        match self {
            Self::Graph(graph) => graph,
            Self::Person(person) => person,
        }
    }
}

impl From<GenealogyGraph> for NoteOwner {
    fn from(value: GenealogyGraph) -> Self {
        Self::Graph(value)
    }
}

impl From<Person> for NoteOwner {
    fn from(value: Person) -> Self {
        Self::Person(value)
    }
}

impl NoteContainer for NoteOwner {
    fn notes(&self) -> Vec<Note> {
        self.container().notes()
    }

    fn add_note_at(&self, index: usize, note: &Note) -> bool {
        self.container().add_note_at(index, note)
    }

    fn remove_note(&self, note: &Note) -> bool {
        self.container().remove_note(note)
    }
}

/// Shared list insert for note containers.
pub(crate) fn insert_note(notes: &mut Vec<Note>, index: usize, note: &Note) -> bool {
    if notes.contains(note) {
        return false;
    }
    if index > notes.len() {
        debug!(
            "event=note_insert_rejected module=model status=out_of_range index={} len={}",
            index,
            notes.len()
        );
        return false;
    }
    notes.insert(index, note.clone());
    true
}

/// Shared list removal for note containers.
pub(crate) fn take_note(notes: &mut Vec<Note>, note: &Note) -> bool {
    match notes.iter().position(|candidate| candidate == note) {
        Some(index) => {
            notes.remove(index);
            true
        }
        None => false,
    }
}
