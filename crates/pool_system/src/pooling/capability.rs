//! Capability declarations for typed acquisition
//!
//! A template declares up front which capabilities its instances support.
//! Typed acquisition checks the request against that declaration before any
//! instance is touched, and hands back a [`CapabilityHandle`] that carries the
//! capability in its type.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker for a capability instances may support (movement, audio, UI, ...)
pub trait Capability: 'static {}

/// Set of capabilities declared by a template
#[derive(Clone, Default)]
pub struct CapabilitySet {
    entries: HashMap<TypeId, &'static str>,
}

impl CapabilitySet {
    /// Create an empty capability set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of capability `C`
    #[must_use]
    pub fn with<C: Capability>(mut self) -> Self {
        self.insert::<C>();
        self
    }

    /// Declare capability `C`
    pub fn insert<C: Capability>(&mut self) {
        self.entries.insert(TypeId::of::<C>(), type_name::<C>());
    }

    /// Check whether capability `C` is declared
    pub fn contains<C: Capability>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<C>())
    }

    /// Number of declared capabilities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no capability is declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the declared capabilities, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.values().copied()
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Instance handle narrowed to capability `C`
///
/// Only produced by typed acquisition after the capability check passed.
pub struct CapabilityHandle<C, I> {
    instance: I,
    _capability: PhantomData<fn() -> C>,
}

impl<C: Capability, I: Copy> CapabilityHandle<C, I> {
    pub(crate) fn new(instance: I) -> Self {
        Self {
            instance,
            _capability: PhantomData,
        }
    }

    /// Get the underlying instance handle, e.g. to release it
    pub fn instance(&self) -> I {
        self.instance
    }
}

impl<C, I: Copy> Clone for CapabilityHandle<C, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, I: Copy> Copy for CapabilityHandle<C, I> {}

impl<C, I: PartialEq> PartialEq for CapabilityHandle<C, I> {
    fn eq(&self, other: &Self) -> bool {
        self.instance == other.instance
    }
}

impl<C, I: Eq> Eq for CapabilityHandle<C, I> {}

impl<C, I: Hash> Hash for CapabilityHandle<C, I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instance.hash(state);
    }
}

impl<C, I: fmt::Debug> fmt::Debug for CapabilityHandle<C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityHandle")
            .field("capability", &type_name::<C>())
            .field("instance", &self.instance)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Movable;
    impl Capability for Movable {}

    struct Audible;
    impl Capability for Audible {}

    #[test]
    fn test_capability_set_membership() {
        let set = CapabilitySet::new().with::<Movable>();

        assert!(set.contains::<Movable>());
        assert!(!set.contains::<Audible>());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = CapabilitySet::new();
        set.insert::<Audible>();
        set.insert::<Audible>();

        assert_eq!(set.len(), 1);
        assert!(set.names().any(|name| name.ends_with("Audible")));
    }

    #[test]
    fn test_handle_compares_by_instance() {
        let a = CapabilityHandle::<Movable, u32>::new(7);
        let b = CapabilityHandle::<Movable, u32>::new(7);

        assert_eq!(a, b);
        assert_eq!(a.instance(), 7);
    }
}
