//! Genealogy graph aggregate root.
//!
//! # Responsibility
//! - Own every person, marriage and top-level note of one family tree.
//! - Answer "does this entity exist in the model".
//!
//! # Invariants
//! - Persons and marriages are unique by identity.
//! - Each successful add/remove fires exactly one event.
//! - `clear` fires only `graph_cleared` and leaves entity links untouched.
//! - Removing an entity does not sever its relationships; commands do that.

use crate::model::connection::GenealogyConnection;
use crate::model::listener::{GraphListener, ListenerSet};
use crate::model::marriage::Marriage;
use crate::model::note::{insert_note, take_note, Note, NoteContainer};
use crate::model::person::Person;
use log::{debug, info};
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

#[derive(Default)]
struct GraphState {
    people: Vec<Person>,
    marriages: Vec<Marriage>,
    notes: Vec<Note>,
    listeners: ListenerSet<dyn GraphListener>,
}

/// Shared handle to the root of one family tree.
///
/// Clones refer to the same graph; equality is handle identity.
#[derive(Clone, Default)]
pub struct GenealogyGraph {
    inner: Rc<RefCell<GraphState>>,
}

impl GenealogyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards every element so that new information can be loaded.
    pub fn clear(&self) {
        let (people, marriages, notes) = {
            let mut state = self.inner.borrow_mut();
            (
                std::mem::take(&mut state.people),
                std::mem::take(&mut state.marriages),
                std::mem::take(&mut state.notes),
            )
        };
        info!(
            "event=graph_cleared module=model people={} marriages={} notes={}",
            people.len(),
            marriages.len(),
            notes.len()
        );
        self.notify(|listener| listener.graph_cleared());
    }

    pub fn people(&self) -> Vec<Person> {
        self.inner.borrow().people.clone()
    }

    pub fn contains_person(&self, person: &Person) -> bool {
        self.inner.borrow().people.contains(person)
    }

    pub fn add_person(&self, person: &Person) -> bool {
        {
            let mut state = self.inner.borrow_mut();
            if state.people.contains(person) {
                return false;
            }
            state.people.push(person.clone());
        }
        debug!("event=person_added module=model person={}", person.id());
        self.notify(|listener| listener.person_added(person));
        true
    }

    pub fn remove_person(&self, person: &Person) -> bool {
        if !self.remove_from(|state| &mut state.people, person) {
            return false;
        }
        debug!("event=person_removed module=model person={}", person.id());
        self.notify(|listener| listener.person_removed(person));
        true
    }

    pub fn marriages(&self) -> Vec<Marriage> {
        self.inner.borrow().marriages.clone()
    }

    pub fn contains_marriage(&self, marriage: &Marriage) -> bool {
        self.inner.borrow().marriages.contains(marriage)
    }

    pub fn add_marriage(&self, marriage: &Marriage) -> bool {
        {
            let mut state = self.inner.borrow_mut();
            if state.marriages.contains(marriage) {
                return false;
            }
            state.marriages.push(marriage.clone());
        }
        debug!("event=marriage_added module=model marriage={}", marriage.id());
        self.notify(|listener| listener.marriage_added(marriage));
        true
    }

    pub fn remove_marriage(&self, marriage: &Marriage) -> bool {
        if !self.remove_from(|state| &mut state.marriages, marriage) {
            return false;
        }
        debug!("event=marriage_removed module=model marriage={}", marriage.id());
        self.notify(|listener| listener.marriage_removed(marriage));
        true
    }

    /// Every person/marriage edge currently encoded in the graph's marriages.
    ///
    /// Spouse connections come first for each marriage (husband, wife), then
    /// one offspring connection per child.
    pub fn connections(&self) -> Vec<GenealogyConnection> {
        let mut connections = Vec::new();
        for marriage in self.marriages() {
            for spouse in [marriage.husband(), marriage.wife()].into_iter().flatten() {
                connections.push(GenealogyConnection::new(spouse, marriage.clone()));
            }
            for child in marriage.offspring() {
                connections.push(GenealogyConnection::new(child, marriage.clone()));
            }
        }
        connections
    }

    pub fn add_listener(&self, listener: Rc<dyn GraphListener>) {
        self.inner.borrow_mut().listeners.add(listener);
    }

    pub fn remove_listener(&self, listener: &Rc<dyn GraphListener>) {
        self.inner.borrow_mut().listeners.remove(listener);
    }

    fn notify(&self, event: impl Fn(&dyn GraphListener)) {
        let listeners = self.inner.borrow().listeners.snapshot();
        for listener in &listeners {
            event(listener.as_ref());
        }
    }

    fn remove_from<T: PartialEq>(
        &self,
        field: impl FnOnce(&mut GraphState) -> &mut Vec<T>,
        item: &T,
    ) -> bool {
        let mut state = self.inner.borrow_mut();
        let items = field(&mut *state);
        match items.iter().position(|candidate| candidate == item) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        }
    }
}

impl NoteContainer for GenealogyGraph {
    fn notes(&self) -> Vec<Note> {
        self.inner.borrow().notes.clone()
    }

    fn add_note_at(&self, index: usize, note: &Note) -> bool {
        if !insert_note(&mut self.inner.borrow_mut().notes, index, note) {
            return false;
        }
        self.notify(|listener| listener.note_added(index, note));
        true
    }

    fn remove_note(&self, note: &Note) -> bool {
        if !take_note(&mut self.inner.borrow_mut().notes, note) {
            return false;
        }
        self.notify(|listener| listener.note_removed(note));
        true
    }
}

impl PartialEq for GenealogyGraph {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for GenealogyGraph {}

impl Debug for GenealogyGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("GenealogyGraph")
            .field("people", &state.people.len())
            .field("marriages", &state.marriages.len())
            .field("notes", &state.notes.len())
            .finish()
    }
}
