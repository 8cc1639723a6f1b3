//! Marriage entity.
//!
//! # Responsibility
//! - Hold the husband/wife slots and the offspring set of one union.
//! - Keep every link mirrored on the person side.
//!
//! # Invariants
//! - `husband` is male and `wife` is female when present.
//! - `husband() == Some(p)` or `wife() == Some(p)` iff `p.marriage() == Some(self)`.
//! - `has_offspring(p)` iff `p.parents_marriage() == Some(self)`.
//! - A marriage with no spouses and no offspring is valid.

use crate::model::element::{BoundedElement, Bounds, ElementId, UNKNOWN_YEAR};
use crate::model::listener::{ListenerSet, MarriageListener};
use crate::model::person::{Gender, Person, WeakPerson};
use log::{debug, trace};
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use uuid::Uuid;

pub(crate) struct MarriageState {
    id: ElementId,
    year_married: i32,
    bounds: Bounds,
    husband: Option<WeakPerson>,
    wife: Option<WeakPerson>,
    // Set semantics; insertion order kept for deterministic iteration.
    offspring: Vec<WeakPerson>,
    listeners: ListenerSet<dyn MarriageListener>,
}

/// Shared handle to one union.
///
/// Clones refer to the same marriage; equality is handle identity.
#[derive(Clone)]
pub struct Marriage {
    inner: Rc<RefCell<MarriageState>>,
}

/// Non-owning back-reference to a marriage.
#[derive(Clone)]
pub(crate) struct WeakMarriage(Weak<RefCell<MarriageState>>);

impl WeakMarriage {
    pub(crate) fn upgrade(&self) -> Option<Marriage> {
        self.0.upgrade().map(|inner| Marriage { inner })
    }
}

/// Which spouse slot a setter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Husband,
    Wife,
}

impl Slot {
    fn gender(self) -> Gender {
        match self {
            Self::Husband => Gender::Male,
            Self::Wife => Gender::Female,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Husband => "husband",
            Self::Wife => "wife",
        }
    }
}

impl Default for Marriage {
    fn default() -> Self {
        Self::new()
    }
}

impl Marriage {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a marriage with a known year.
    pub fn with_year(year_married: i32) -> Self {
        let marriage = Self::new();
        marriage.inner.borrow_mut().year_married = year_married;
        marriage
    }

    /// Creates a marriage with a caller-provided stable ID.
    ///
    /// Used by snapshot restore where identity already exists.
    pub fn with_id(id: ElementId) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MarriageState {
                id,
                year_married: UNKNOWN_YEAR,
                bounds: Bounds::default(),
                husband: None,
                wife: None,
                offspring: Vec::new(),
                listeners: ListenerSet::default(),
            })),
        }
    }

    pub(crate) fn downgrade(&self) -> WeakMarriage {
        WeakMarriage(Rc::downgrade(&self.inner))
    }

    pub fn id(&self) -> ElementId {
        self.inner.borrow().id
    }

    pub fn year_married(&self) -> i32 {
        self.inner.borrow().year_married
    }

    pub fn set_year_married(&self, year: i32) -> bool {
        {
            let mut state = self.inner.borrow_mut();
            if state.year_married == year {
                return false;
            }
            state.year_married = year;
        }
        self.notify(|listener| listener.year_married_changed(year));
        true
    }

    pub fn husband(&self) -> Option<Person> {
        self.slot(Slot::Husband)
    }

    /// Fills the husband slot, evicting any previous husband.
    ///
    /// Returns `false` without mutation when `husband` is not male or is
    /// already the husband.
    pub fn set_husband(&self, husband: Option<&Person>) -> bool {
        self.set_slot(Slot::Husband, husband)
    }

    pub fn wife(&self) -> Option<Person> {
        self.slot(Slot::Wife)
    }

    /// Fills the wife slot, evicting any previous wife.
    ///
    /// Returns `false` without mutation when `wife` is not female or is
    /// already the wife.
    pub fn set_wife(&self, wife: Option<&Person>) -> bool {
        self.set_slot(Slot::Wife, wife)
    }

    fn slot(&self, slot: Slot) -> Option<Person> {
        let state = self.inner.borrow();
        let field = match slot {
            Slot::Husband => &state.husband,
            Slot::Wife => &state.wife,
        };
        field.as_ref().and_then(WeakPerson::upgrade)
    }

    fn store_slot(&self, slot: Slot, person: Option<&Person>) {
        let mut state = self.inner.borrow_mut();
        let field = match slot {
            Slot::Husband => &mut state.husband,
            Slot::Wife => &mut state.wife,
        };
        *field = person.map(Person::downgrade);
    }

    fn set_slot(&self, slot: Slot, person: Option<&Person>) -> bool {
        if let Some(person) = person {
            if person.gender() != slot.gender() {
                debug!(
                    "event=spouse_rejected module=model status=gender_mismatch marriage={} slot={} person={}",
                    self.id(),
                    slot.as_str(),
                    person.id()
                );
                return false;
            }
        }

        let old = {
            let state = self.inner.borrow();
            let field = match slot {
                Slot::Husband => &state.husband,
                Slot::Wife => &state.wife,
            };
            let current = field.as_ref().and_then(WeakPerson::upgrade);
            if current.as_ref() == person {
                return false;
            }
            current
        };

        self.store_slot(slot, None);
        if let Some(old) = &old {
            old.set_marriage(None);
        }

        self.store_slot(slot, person);
        if let Some(person) = person {
            person.set_marriage(Some(self));
        }

        trace!(
            "event=marriage_spouse_changed module=model marriage={} slot={} person={:?} old={:?}",
            self.id(),
            slot.as_str(),
            person.map(Person::id),
            old.as_ref().map(Person::id)
        );
        match slot {
            Slot::Husband => self.notify(|listener| listener.husband_changed(person, old.as_ref())),
            Slot::Wife => self.notify(|listener| listener.wife_changed(person, old.as_ref())),
        }
        true
    }

    /// Current offspring in insertion order.
    pub fn offspring(&self) -> Vec<Person> {
        self.inner
            .borrow()
            .offspring
            .iter()
            .filter_map(WeakPerson::upgrade)
            .collect()
    }

    pub fn has_offspring(&self, person: &Person) -> bool {
        self.inner
            .borrow()
            .offspring
            .iter()
            .any(|child| child.is(person))
    }

    /// Adds `person` as offspring and points their parents' marriage here.
    ///
    /// Returns `false` when already an offspring.
    pub fn add_offspring(&self, person: &Person) -> bool {
        {
            let mut state = self.inner.borrow_mut();
            state.offspring.retain(WeakPerson::is_live);
            if state.offspring.iter().any(|child| child.is(person)) {
                return false;
            }
            state.offspring.push(person.downgrade());
        }
        person.set_parents_marriage(Some(self));
        trace!(
            "event=offspring_added module=model marriage={} person={}",
            self.id(),
            person.id()
        );
        self.notify(|listener| listener.offspring_added(person));
        true
    }

    /// Removes `person` from the offspring and clears their parents' marriage.
    ///
    /// Returns `false` when not an offspring.
    pub fn remove_offspring(&self, person: &Person) -> bool {
        {
            let mut state = self.inner.borrow_mut();
            state.offspring.retain(WeakPerson::is_live);
            let Some(index) = state.offspring.iter().position(|child| child.is(person)) else {
                return false;
            };
            state.offspring.remove(index);
        }
        person.set_parents_marriage(None);
        trace!(
            "event=offspring_removed module=model marriage={} person={}",
            self.id(),
            person.id()
        );
        self.notify(|listener| listener.offspring_removed(person));
        true
    }

    pub fn add_listener(&self, listener: Rc<dyn MarriageListener>) {
        self.inner.borrow_mut().listeners.add(listener);
    }

    pub fn remove_listener(&self, listener: &Rc<dyn MarriageListener>) {
        self.inner.borrow_mut().listeners.remove(listener);
    }

    fn notify(&self, event: impl Fn(&dyn MarriageListener)) {
        let listeners = self.inner.borrow().listeners.snapshot();
        for listener in &listeners {
            event(listener.as_ref());
        }
    }
}

impl BoundedElement for Marriage {
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
        "Marriage"
    }
}

impl PartialEq for Marriage {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Marriage {}

impl Hash for Marriage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl Debug for Marriage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Marriage")
            .field("id", &state.id)
            .field("year_married", &state.year_married)
            .field("offspring", &state.offspring.len())
            .finish()
    }
}
