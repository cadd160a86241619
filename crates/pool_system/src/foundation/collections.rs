//! Specialized collection types

pub use slotmap::{new_key_type, Key, SlotMap};

/// Handle-based map using slot map for stable references
///
/// Removing a value invalidates its key; a stale key never aliases a newer value.
pub type HandleMap<K, T> = SlotMap<K, T>;
