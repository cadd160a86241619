//! # Pool System
//!
//! Keyed instance pooling for real-time game hosts.
//!
//! ## Features
//!
//! - **Instance Pools**: Recycle inactive instances instead of creating and destroying them
//! - **Keyed Registry**: Many pools addressed by string key, extendable at runtime
//! - **Single Pools**: Private pools bound to one template and one container
//! - **Capability Queries**: Typed acquisition checked against each template's declared capabilities
//! - **Atlas Cache**: Build-once lookup of named sprites grouped under a key
//!
//! ## Quick Start
//!
//! ```rust
//! use pool_system::prelude::*;
//!
//! fn main() -> Result<(), PoolError> {
//!     let mut scene = SceneHost::new();
//!     let holding = scene.create_container("Pool");
//!
//!     let mut pools = MultiKeyPool::new(holding);
//!     let report = pools.initialize_all(
//!         vec![PoolConfig::new("bullet", Prefab::new("Bullet"), 2)],
//!         &mut scene,
//!     );
//!     assert!(report.is_clean());
//!
//!     let bullet = pools.acquire("bullet", &mut scene)?;
//!     // ... use the bullet for a few frames ...
//!     pools.release(bullet, &mut scene)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod pooling;
pub mod scene;
pub mod assets;

/// Common imports for pool users
pub mod prelude {
    pub use crate::{
        assets::{AssetLoader, AtlasCache, AtlasError},
        config::{AtlasSettings, Config, ConfigError, PoolSettings},
        pooling::{
            Capability, CapabilityHandle, CapabilitySet, InitReport, InstanceHost, InstancePool,
            MultiKeyPool, PoolConfig, PoolEntry, PoolError, PoolStats, PoolTemplate, SinglePool,
        },
        scene::{NodeKey, Prefab, SceneHost},
    };
}
