//! Person entity.
//!
//! # Responsibility
//! - Hold identity attributes and the two relationship links of a person.
//! - Own an ordered list of notes.
//!
//! # Invariants
//! - `marriage() == Some(m)` iff `m` holds this person in the slot matching
//!   its gender.
//! - `parents_marriage() == Some(m)` iff `m.has_offspring(self)`.
//! - Relationship links are non-owning; the graph owns the entities.

use crate::model::element::{BoundedElement, Bounds, ElementId, UNKNOWN_YEAR};
use crate::model::listener::{ListenerSet, PersonListener};
use crate::model::marriage::{Marriage, WeakMarriage};
use crate::model::note::{insert_note, take_note, Note, NoteContainer};
use log::trace;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// Gender decides which marriage slot a person can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

pub(crate) struct PersonState {
    id: ElementId,
    gender: Gender,
    name: String,
    birth_year: i32,
    death_year: i32,
    bounds: Bounds,
    marriage: Option<WeakMarriage>,
    parents_marriage: Option<WeakMarriage>,
    notes: Vec<Note>,
    listeners: ListenerSet<dyn PersonListener>,
}

/// Shared handle to one individual.
///
/// Clones refer to the same person; equality is handle identity.
#[derive(Clone)]
pub struct Person {
    inner: Rc<RefCell<PersonState>>,
}

/// Non-owning back-reference to a person.
#[derive(Clone)]
pub(crate) struct WeakPerson(Weak<RefCell<PersonState>>);

impl WeakPerson {
    pub(crate) fn upgrade(&self) -> Option<Person> {
        self.0.upgrade().map(|inner| Person { inner })
    }

    pub(crate) fn is(&self, person: &Person) -> bool {
        std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(&person.inner))
    }
    pub(crate) fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl Person {
    pub fn new(gender: Gender) -> Self {
        Self::with_id(Uuid::new_v4(), gender)
    }

    /// Creates a person with a caller-provided stable ID.
    ///
    /// Used by snapshot restore where identity already exists.
    pub fn with_id(id: ElementId, gender: Gender) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PersonState {
                id,
                gender,
                name: String::new(),
                birth_year: UNKNOWN_YEAR,
                death_year: UNKNOWN_YEAR,
                bounds: Bounds::default(),
                marriage: None,
                parents_marriage: None,
                notes: Vec::new(),
                listeners: ListenerSet::default(),
            })),
        }
    }

    pub(crate) fn downgrade(&self) -> WeakPerson {
        WeakPerson(Rc::downgrade(&self.inner))
    }

    pub fn id(&self) -> ElementId {
        self.inner.borrow().id
    }

    pub fn gender(&self) -> Gender {
        self.inner.borrow().gender
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) -> bool {
        let name = name.into();
        {
            let mut state = self.inner.borrow_mut();
            if state.name == name {
                return false;
            }
            state.name = name.clone();
        }
        self.notify(|listener| listener.name_changed(&name));
        true
    }

    pub fn birth_year(&self) -> i32 {
        self.inner.borrow().birth_year
    }

    pub fn set_birth_year(&self, year: i32) -> bool {
        {
            let mut state = self.inner.borrow_mut();
            if state.birth_year == year {
                return false;
            }
            state.birth_year = year;
        }
        self.notify(|listener| listener.birth_year_changed(year));
        true
    }

    pub fn death_year(&self) -> i32 {
        self.inner.borrow().death_year
    }

    pub fn set_death_year(&self, year: i32) -> bool {
        {
            let mut state = self.inner.borrow_mut();
            if state.death_year == year {
                return false;
            }
            state.death_year = year;
        }
        self.notify(|listener| listener.death_year_changed(year));
        true
    }

    /// The marriage in which this person is husband or wife.
    pub fn marriage(&self) -> Option<Marriage> {
        self.inner
            .borrow()
            .marriage
            .as_ref()
            .and_then(WeakMarriage::upgrade)
    }

    /// Makes this person the gender-appropriate spouse of `marriage`, or
    /// detaches them from any marriage when `None`.
    ///
    /// The old marriage's slot is cleared before the new one is filled, so
    /// the reciprocal setter always finds a settled field and stops.
    pub fn set_marriage(&self, marriage: Option<&Marriage>) -> bool {
        let old = {
            let state = self.inner.borrow();
            if same_marriage(state.marriage.as_ref(), marriage) {
                return false;
            }
            state.marriage.as_ref().and_then(WeakMarriage::upgrade)
        };

        self.inner.borrow_mut().marriage = None;
        if let Some(old) = &old {
            match self.gender() {
                Gender::Male => old.set_husband(None),
                Gender::Female => old.set_wife(None),
            };
        }

        self.inner.borrow_mut().marriage = marriage.map(Marriage::downgrade);
        if let Some(marriage) = marriage {
            match self.gender() {
                Gender::Male => marriage.set_husband(Some(self)),
                Gender::Female => marriage.set_wife(Some(self)),
            };
        }

        trace!(
            "event=person_marriage_changed module=model person={} marriage={:?} old={:?}",
            self.id(),
            marriage.map(Marriage::id),
            old.as_ref().map(Marriage::id)
        );
        self.notify(|listener| listener.marriage_changed(marriage, old.as_ref()));
        true
    }

    /// The marriage this person was born from.
    pub fn parents_marriage(&self) -> Option<Marriage> {
        self.inner
            .borrow()
            .parents_marriage
            .as_ref()
            .and_then(WeakMarriage::upgrade)
    }

    /// Records this person as an offspring of `marriage`, or of none.
    pub fn set_parents_marriage(&self, marriage: Option<&Marriage>) -> bool {
        let old = {
            let state = self.inner.borrow();
            if same_marriage(state.parents_marriage.as_ref(), marriage) {
                return false;
            }
            state.parents_marriage.as_ref().and_then(WeakMarriage::upgrade)
        };

        self.inner.borrow_mut().parents_marriage = None;
        if let Some(old) = &old {
            old.remove_offspring(self);
        }

        self.inner.borrow_mut().parents_marriage = marriage.map(Marriage::downgrade);
        if let Some(marriage) = marriage {
            marriage.add_offspring(self);
        }

        trace!(
            "event=person_parents_marriage_changed module=model person={} marriage={:?} old={:?}",
            self.id(),
            marriage.map(Marriage::id),
            old.as_ref().map(Marriage::id)
        );
        self.notify(|listener| listener.parents_marriage_changed(marriage, old.as_ref()));
        true
    }

    pub fn add_listener(&self, listener: Rc<dyn PersonListener>) {
        self.inner.borrow_mut().listeners.add(listener);
    }

    pub fn remove_listener(&self, listener: &Rc<dyn PersonListener>) {
        self.inner.borrow_mut().listeners.remove(listener);
    }

    fn notify(&self, event: impl Fn(&dyn PersonListener)) {
        let listeners = self.inner.borrow().listeners.snapshot();
        for listener in &listeners {
            event(listener.as_ref());
        }
    }
}

/// A back-reference whose marriage was dropped counts as no marriage.
fn same_marriage(current: Option<&WeakMarriage>, candidate: Option<&Marriage>) -> bool {
    current.and_then(WeakMarriage::upgrade).as_ref() == candidate
}

impl NoteContainer for Person {
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

impl BoundedElement for Person {
    fn bounds(&self) -> Bounds {
        self.inner.borrow().bounds
    }

    fn store_bounds(&self, bounds: Bounds) {
        self.inner.borrow_mut().bounds = bounds;
    }

    fn on_location_changed(&self, x: i32, y: i32) {
        self.notify(|listener| listener.location_changed(x, y));
    }

    fn on_size_changed(&self, width: i32, height: i32) {
        self.notify(|listener| listener.size_changed(width, height));
    }

    fn element_name(&self) -> &'static str {
        "Person"
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl Debug for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Person")
            .field("id", &state.id)
            .field("name", &state.name)
            .field("gender", &state.gender)
            .finish()
    }
}
