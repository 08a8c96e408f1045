//! Animation context
//!
//! Data-driven animations name their targets and callbacks instead of
//! holding them. [`AnimationContext`] is what those names resolve against:
//! the application owns it and hands it to
//! [`AnimationScript::build`](crate::AnimationScript::build).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tempo_core::{Result, SlotStore, TweenError};
use tracing::debug;

use crate::property::Callback;

/// A named callback shared by every step that refers to it
pub type SharedCallback = Rc<RefCell<dyn FnMut()>>;

/// Named callbacks
#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: FxHashMap<String, SharedCallback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` under `name`, returning the callback it replaced
    pub fn register<F: FnMut() + 'static>(
        &mut self,
        name: impl Into<String>,
        callback: F,
    ) -> Option<SharedCallback> {
        let name = name.into();
        debug!("Registering callback '{}'", name);
        self.callbacks.insert(name, Rc::new(RefCell::new(callback)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    /// Resolve `name` into a callback the sequencer can own
    pub fn resolve(&self, name: &str) -> Result<Callback> {
        let shared = self
            .callbacks
            .get(name)
            .cloned()
            .ok_or_else(|| TweenError::UnknownCallback(name.to_string()))?;
        Ok(Box::new(move || (&mut *shared.borrow_mut())()))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.callbacks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Everything a script needs to turn names into bindings and callbacks
#[derive(Debug, Default)]
pub struct AnimationContext {
    pub slots: SlotStore,
    pub callbacks: CallbackRegistry,
}

impl AnimationContext {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_resolved_callbacks_share_state() {
        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();

        let mut registry = CallbackRegistry::new();
        registry.register("hit", move || hits_clone.set(hits_clone.get() + 1));

        let mut first = registry.resolve("hit").unwrap();
        let mut second = registry.resolve("hit").unwrap();
        first();
        second();
        first();
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn test_unknown_callback() {
        let registry = CallbackRegistry::new();
        assert!(matches!(
            registry.resolve("missing"),
            Err(TweenError::UnknownCallback(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_register_replaces_and_lists_sorted() {
        let mut registry = CallbackRegistry::new();
        assert!(registry.register("b", || {}).is_none());
        assert!(registry.register("a", || {}).is_none());
        assert!(registry.register("b", || {}).is_some());

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["a", "b"]);
        assert!(registry.contains("a"));
    }
}
