//! Instance pooling
//!
//! Pools of interchangeable instances under a key: grow on demand, recycle on
//! return. [`InstancePool`] is the shared primitive; [`SinglePool`] wraps one
//! for private use and [`MultiKeyPool`] keeps a registry of them.

pub mod capability;
pub mod error;
pub mod host;
pub mod instance_pool;
pub mod multi_key_pool;
pub mod single_pool;

pub use capability::{Capability, CapabilityHandle, CapabilitySet};
pub use error::PoolError;
pub use host::{InstanceHost, PoolTemplate};
pub use instance_pool::{InstancePool, PoolEntry, PoolStats};
pub use multi_key_pool::{InitReport, MultiKeyPool, PoolConfig, PoolRegistration};
pub use single_pool::SinglePool;
