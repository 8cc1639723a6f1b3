//! Shared identity and geometry for positioned genealogy elements.
//!
//! # Responsibility
//! - Define the stable element identity used by persons, marriages and notes.
//! - Provide the change-only location/size mutators every element shares.
//!
//! # Invariants
//! - `set_location`/`set_size` with the current value mutate nothing and
//!   fire no hook.
//! - A changed value is stored before its hook fires, exactly once.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every person, marriage and note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ElementId = Uuid;

/// Sentinel for an unknown birth, death or marriage year.
pub const UNKNOWN_YEAR: i32 = -1;

/// Position and size of an element, in diagram units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// An element with a position and size and abstract change hooks.
///
/// Implementors supply storage (`bounds`/`store_bounds`) and the two hooks;
/// the provided mutators carry the no-op and notification contract.
pub trait BoundedElement {
    /// Current position and size.
    fn bounds(&self) -> Bounds;

    /// Raw storage write used by the provided mutators. Fires nothing.
    fn store_bounds(&self, bounds: Bounds);

    /// Called once after the location actually changed.
    fn on_location_changed(&self, x: i32, y: i32);

    /// Called once after the size actually changed.
    fn on_size_changed(&self, width: i32, height: i32);

    /// Human-readable element kind, used in command labels.
    fn element_name(&self) -> &'static str;

    fn x(&self) -> i32 {
        self.bounds().x
    }

    fn y(&self) -> i32 {
        self.bounds().y
    }

    fn width(&self) -> i32 {
        self.bounds().width
    }

    fn height(&self) -> i32 {
        self.bounds().height
    }

    /// Moves the element. Returns whether the location changed.
    fn set_location(&self, x: i32, y: i32) -> bool {
        let mut bounds = self.bounds();
        if bounds.x == x && bounds.y == y {
            return false;
        }
        bounds.x = x;
        bounds.y = y;
        self.store_bounds(bounds);
        self.on_location_changed(x, y);
        true
    }

    /// Resizes the element. Returns whether the size changed.
    fn set_size(&self, width: i32, height: i32) -> bool {
        let mut bounds = self.bounds();
        if bounds.width == width && bounds.height == height {
            return false;
        }
        bounds.width = width;
        bounds.height = height;
        self.store_bounds(bounds);
        self.on_size_changed(width, height);
        true
    }

    /// Applies location then size. Returns whether either changed.
    fn set_bounds(&self, bounds: Bounds) -> bool {
        let moved = self.set_location(bounds.x, bounds.y);
        let resized = self.set_size(bounds.width, bounds.height);
        moved || resized
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundedElement, Bounds};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct Probe {
        bounds: Cell<Bounds>,
        hooks: RefCell<Vec<String>>,
    }

    impl BoundedElement for Probe {
        fn bounds(&self) -> Bounds {
            self.bounds.get()
        }

        fn store_bounds(&self, bounds: Bounds) {
            self.bounds.set(bounds);
        }

        fn on_location_changed(&self, x: i32, y: i32) {
            self.hooks.borrow_mut().push(format!("location {x},{y}"));
        }

        fn on_size_changed(&self, width: i32, height: i32) {
            self.hooks.borrow_mut().push(format!("size {width}x{height}"));
        }

        fn element_name(&self) -> &'static str {
            "Probe"
        }
    }

    #[test]
    fn unchanged_location_is_a_silent_no_op() {
        let probe = Probe::default();
        assert!(!probe.set_location(0, 0));
        assert!(probe.hooks.borrow().is_empty());
    }

    #[test]
    fn changed_values_store_then_fire_once() {
        let probe = Probe::default();
        assert!(probe.set_location(10, 20));
        assert!(probe.set_size(30, 40));
        assert!(!probe.set_size(30, 40));

        assert_eq!(probe.bounds(), Bounds::new(10, 20, 30, 40));
        assert_eq!(
            probe.hooks.borrow().as_slice(),
            ["location 10,20", "size 30x40"]
        );
    }

    #[test]
    fn set_bounds_reports_partial_change() {
        let probe = Probe::default();
        probe.set_bounds(Bounds::new(1, 2, 3, 4));
        probe.hooks.borrow_mut().clear();

        assert!(probe.set_bounds(Bounds::new(1, 2, 5, 6)));
        assert_eq!(probe.hooks.borrow().as_slice(), ["size 5x6"]);
        assert!(!probe.set_bounds(Bounds::new(1, 2, 5, 6)));
    }
}
