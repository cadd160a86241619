//! Host runtime interface
//!
//! Pools never create, parent or toggle instances themselves. They drive the
//! host runtime through [`InstanceHost`], which owns the real objects
//! (scene nodes, entities, widgets) behind the handles the pools hand out.

use std::fmt::Debug;
use std::hash::Hash;

use super::capability::CapabilitySet;

/// Immutable blueprint the host instantiates pooled instances from
pub trait PoolTemplate {
    /// Human readable template name, used in logs
    fn name(&self) -> &str;

    /// Capabilities every instance of this template supports
    fn capabilities(&self) -> &CapabilitySet;
}

/// Runtime services a pool needs from its host
///
/// All calls are synchronous and happen on the thread driving the pool.
pub trait InstanceHost {
    /// Blueprint type instances are produced from
    type Template: PoolTemplate;

    /// Opaque handle to one live instance
    type Instance: Copy + Eq + Hash + Debug;

    /// Grouping that holds instances (a transform, a layer, a folder node)
    type Container: Copy + Eq + Debug;

    /// Produce a new instance from `template`
    fn instantiate(&mut self, template: &Self::Template) -> Self::Instance;

    /// Destroy an instance previously produced by [`Self::instantiate`]
    fn destroy(&mut self, instance: Self::Instance);

    /// Move `instance` under `container`
    ///
    /// With `preserve_placement` the instance keeps its world placement,
    /// otherwise it adopts the container's local space.
    fn set_parent(&mut self, instance: Self::Instance, container: Self::Container, preserve_placement: bool);

    /// Turn visibility and processing of `instance` on or off
    fn set_active(&mut self, instance: Self::Instance, active: bool);
}
