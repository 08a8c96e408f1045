//! Named slot storage
//!
//! A [`SlotStore`] is the explicit context object that data-driven
//! animations bind against: scripts refer to slots by name, and the store
//! resolves those names into [`Slot`] handles. The application owns the
//! store and passes it to whatever builds the animation.

use std::fmt;

use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::binding::Slot;
use crate::error::{Result, TweenError};

new_key_type! {
    /// Unique identifier for a slot in a [`SlotStore`]
    pub struct SlotId;
}

/// A value held by a named slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlotValue {
    Float(f32),
    Bool(bool),
}

impl SlotValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            SlotValue::Float(_) => "float",
            SlotValue::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Float(v) => write!(f, "{v:.3}"),
            SlotValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

enum SlotCell {
    Float(Slot<f32>),
    Bool(Slot<bool>),
}

impl SlotCell {
    fn new(initial: SlotValue) -> Self {
        match initial {
            SlotValue::Float(v) => SlotCell::Float(Slot::new(v)),
            SlotValue::Bool(v) => SlotCell::Bool(Slot::new(v)),
        }
    }

    fn value(&self) -> SlotValue {
        match self {
            SlotCell::Float(slot) => SlotValue::Float(slot.get()),
            SlotCell::Bool(slot) => SlotValue::Bool(slot.get()),
        }
    }
}

/// Named `f32`/`bool` slots, iterated in declaration order
#[derive(Default)]
pub struct SlotStore {
    cells: SlotMap<SlotId, SlotCell>,
    names: IndexMap<String, SlotId>,
}

impl SlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new slot with an initial value
    pub fn declare(&mut self, name: impl Into<String>, initial: SlotValue) -> Result<SlotId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(TweenError::DuplicateSlot(name));
        }

        debug!("Declaring slot '{}' = {}", name, initial);
        let id = self.cells.insert(SlotCell::new(initial));
        self.names.insert(name, id);
        Ok(id)
    }

    /// Look up a slot id by name
    pub fn id(&self, name: &str) -> Option<SlotId> {
        self.names.get(name).copied()
    }

    fn cell(&self, name: &str) -> Result<&SlotCell> {
        self.id(name)
            .and_then(|id| self.cells.get(id))
            .ok_or_else(|| TweenError::UnknownSlot(name.to_string()))
    }

    /// Get a handle to a float slot
    pub fn float(&self, name: &str) -> Result<Slot<f32>> {
        match self.cell(name)? {
            SlotCell::Float(slot) => Ok(slot.clone()),
            SlotCell::Bool(_) => Err(TweenError::SlotTypeMismatch {
                name: name.to_string(),
                expected: "float",
                found: "bool",
            }),
        }
    }

    /// Get a handle to a boolean slot
    pub fn boolean(&self, name: &str) -> Result<Slot<bool>> {
        match self.cell(name)? {
            SlotCell::Bool(slot) => Ok(slot.clone()),
            SlotCell::Float(_) => Err(TweenError::SlotTypeMismatch {
                name: name.to_string(),
                expected: "bool",
                found: "float",
            }),
        }
    }

    /// Current value of a slot
    pub fn value(&self, name: &str) -> Option<SlotValue> {
        self.cell(name).ok().map(SlotCell::value)
    }

    /// Overwrite a slot, keeping its type
    pub fn set(&self, name: &str, value: SlotValue) -> Result<()> {
        match (self.cell(name)?, value) {
            (SlotCell::Float(slot), SlotValue::Float(v)) => slot.set(v),
            (SlotCell::Bool(slot), SlotValue::Bool(v)) => slot.set(v),
            (cell, value) => {
                return Err(TweenError::SlotTypeMismatch {
                    name: name.to_string(),
                    expected: cell.value().type_name(),
                    found: value.type_name(),
                })
            }
        }
        Ok(())
    }

    /// Remove a slot, returning its last value
    ///
    /// Handles and bindings already handed out stay valid; they are just no
    /// longer reachable by name.
    pub fn remove(&mut self, name: &str) -> Option<SlotValue> {
        let id = self.names.shift_remove(name)?;
        self.cells.remove(id).map(|cell| cell.value())
    }

    /// Iterate over `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, SlotValue)> + '_ {
        self.names.iter().filter_map(|(name, id)| {
            self.cells
                .get(*id)
                .map(|cell| (name.as_str(), cell.value()))
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Debug for SlotStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
