//! Observer contracts for model change notification.
//!
//! Every method has an empty default body so an observer only overrides the
//! events it consumes. Listeners are registered per entity as
//! `Rc<dyn ...Listener>` and called synchronously in registration order.

use crate::model::marriage::Marriage;
use crate::model::note::Note;
use crate::model::person::Person;
use std::rc::Rc;

/// Location/size changes shared by every bounded element.
pub trait ElementListener {
    fn location_changed(&self, _x: i32, _y: i32) {}
    fn size_changed(&self, _width: i32, _height: i32) {}
}

/// Ordered note list changes of a note container.
pub trait NoteContainerListener {
    fn note_added(&self, _index: usize, _note: &Note) {}
    fn note_removed(&self, _note: &Note) {}
}

pub trait PersonListener: ElementListener + NoteContainerListener {
    fn name_changed(&self, _name: &str) {}
    fn birth_year_changed(&self, _birth_year: i32) {}
    fn death_year_changed(&self, _death_year: i32) {}
    fn marriage_changed(&self, _marriage: Option<&Marriage>, _old: Option<&Marriage>) {}
    fn parents_marriage_changed(&self, _marriage: Option<&Marriage>, _old: Option<&Marriage>) {}
}

pub trait MarriageListener: ElementListener {
    fn year_married_changed(&self, _year_married: i32) {}
    fn husband_changed(&self, _husband: Option<&Person>, _old: Option<&Person>) {}
    fn wife_changed(&self, _wife: Option<&Person>, _old: Option<&Person>) {}
    fn offspring_added(&self, _person: &Person) {}
    fn offspring_removed(&self, _person: &Person) {}
}

pub trait NoteListener: ElementListener {
    fn text_changed(&self, _text: &str) {}
}

pub trait GraphListener: NoteContainerListener {
    fn person_added(&self, _person: &Person) {}
    fn person_removed(&self, _person: &Person) {}
    fn marriage_added(&self, _marriage: &Marriage) {}
    fn marriage_removed(&self, _marriage: &Marriage) {}
    fn graph_cleared(&self) {}
}

/// Registration-ordered listener set with identity-based membership.
pub(crate) struct ListenerSet<L: ?Sized> {
    entries: Vec<Rc<L>>,
}

impl<L: ?Sized> Default for ListenerSet<L> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<L: ?Sized> ListenerSet<L> {
    /// Adds a listener unless the same instance is already registered.
    pub(crate) fn add(&mut self, listener: Rc<L>) {
        if !self.entries.iter().any(|entry| Rc::ptr_eq(entry, &listener)) {
            self.entries.push(listener);
        }
    }

    /// Removes a listener; unknown listeners are ignored.
    pub(crate) fn remove(&mut self, listener: &Rc<L>) {
        self.entries.retain(|entry| !Rc::ptr_eq(entry, listener));
    }

    /// Copy of the current set, so fan-out can run without holding a borrow.
    pub(crate) fn snapshot(&self) -> Vec<Rc<L>> {
        self.entries.clone()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
