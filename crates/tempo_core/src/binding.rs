//! Property bindings
//!
//! A [`Binding`] is a get/set pair onto a value that lives somewhere else: a
//! field of a component, an entry in a [`SlotStore`](crate::SlotStore), or
//! anything a pair of closures can reach. Animations only ever touch the
//! value through its binding, so they never own the animated target.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Getter<T> = Box<dyn Fn() -> T>;
type Setter<T> = Box<dyn FnMut(T)>;

/// Accessor/mutator pair for a single value of type `T`
pub struct Binding<T> {
    getter: Getter<T>,
    setter: Setter<T>,
}

impl<T: 'static> Binding<T> {
    /// Create a binding from a getter and a setter closure
    pub fn new<G, S>(get: G, set: S) -> Self
    where
        G: Fn() -> T + 'static,
        S: FnMut(T) + 'static,
    {
        Self {
            getter: Box::new(get),
            setter: Box::new(set),
        }
    }

    /// Bind to one field of a shared host object
    ///
    /// ```rust
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    /// use tempo_core::Binding;
    ///
    /// struct Sprite { alpha: f32 }
    ///
    /// let sprite = Rc::new(RefCell::new(Sprite { alpha: 1.0 }));
    /// let mut alpha = Binding::field(&sprite, |s| s.alpha, |s, v| s.alpha = v);
    /// alpha.set(0.5);
    /// assert_eq!(sprite.borrow().alpha, 0.5);
    /// ```
    pub fn field<H: 'static>(
        host: &Rc<RefCell<H>>,
        get: fn(&H) -> T,
        set: fn(&mut H, T),
    ) -> Self {
        let read = Rc::clone(host);
        let write = Rc::clone(host);
        Self::new(
            move || get(&read.borrow()),
            move |value| set(&mut write.borrow_mut(), value),
        )
    }
}

impl<T> Binding<T> {
    /// Read the live value
    pub fn get(&self) -> T {
        (self.getter)()
    }

    /// Write the live value
    pub fn set(&mut self, value: T) {
        (self.setter)(value)
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").finish_non_exhaustive()
    }
}

// ============================================================================
// Slot
// ============================================================================

/// A shared, single-threaded value cell
///
/// Cloning a slot clones the handle, not the value. Writes through any
/// handle or binding are visible to all of them.
#[derive(Default)]
pub struct Slot<T>(Rc<RefCell<T>>);

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Clone + 'static> Slot<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    /// Create a binding that reads and writes this slot
    pub fn binding(&self) -> Binding<T> {
        let read = self.clone();
        let write = self.clone();
        Binding::new(move || read.get(), move |value| write.set(value))
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.0.borrow()).finish()
    }
}
