//! In-memory scene host
//!
//! A minimal node hierarchy implementing [`InstanceHost`](crate::pooling::InstanceHost).
//! It backs the tests and the demo binary, and serves as a reference for
//! wiring the pools into a real engine scene.

pub mod prefab;
pub mod scene_host;

pub use prefab::Prefab;
pub use scene_host::{NodeKey, SceneHost, SceneNode};
