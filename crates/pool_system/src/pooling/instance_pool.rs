//! Instance Pool
//!
//! The primitive both public pool flavors are built on: one homogeneous set
//! of recyclable instances produced from a single template.

use std::collections::HashMap;

use super::capability::{Capability, CapabilityHandle};
use super::error::PoolError;
use super::host::{InstanceHost, PoolTemplate};

/// One managed instance and its checkout state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolEntry<I> {
    instance: I,
    active: bool,
}

impl<I: Copy> PoolEntry<I> {
    /// Handle of the managed instance
    pub fn instance(&self) -> I {
        self.instance
    }

    /// Whether the instance is currently checked out
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Counters describing pool usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of pools the counters cover
    pub pools: usize,
    /// Instances owned, active and inactive
    pub total_instances: usize,
    /// Instances currently checked out
    pub active_instances: usize,
    /// Successful acquisitions since creation
    pub total_acquired: u64,
    /// Successful releases since creation
    pub total_released: u64,
    /// Instances created because no inactive one was available
    pub total_grown: u64,
}

impl PoolStats {
    /// Add another set of counters to this one
    pub fn accumulate(&mut self, other: &PoolStats) {
        self.pools += other.pools;
        self.total_instances += other.total_instances;
        self.active_instances += other.active_instances;
        self.total_acquired += other.total_acquired;
        self.total_released += other.total_released;
        self.total_grown += other.total_grown;
    }
}

/// Recyclable instances of one template
///
/// Entries are only ever appended, so their order is stable for the lifetime
/// of the pool. Inactive entries are tracked on a free stack, which makes
/// acquisition O(1); callers must not rely on which inactive entry they get.
///
/// The pool never owns the host. Every operation that touches instances
/// borrows it for the duration of the call.
pub struct InstancePool<H: InstanceHost> {
    /// Blueprint every entry was produced from
    template: H::Template,
    /// Holding area instances are parented under
    container: H::Container,
    /// All instances in creation order
    entries: Vec<PoolEntry<H::Instance>>,
    /// Instance handle -> index into `entries`
    slots: HashMap<H::Instance, usize>,
    /// Indices of inactive entries
    free: Vec<usize>,
    stats: PoolStats,
}

impl<H: InstanceHost> InstancePool<H> {
    /// Create a pool pre-filled with `size` inactive instances
    ///
    /// A size of zero is raised to one, so every pool starts with at least
    /// one instance ready.
    pub fn new(template: H::Template, size: usize, container: H::Container, host: &mut H) -> Self {
        let size = size.max(1);
        let mut pool = Self {
            template,
            container,
            entries: Vec::with_capacity(size),
            slots: HashMap::with_capacity(size),
            free: Vec::with_capacity(size),
            stats: PoolStats {
                pools: 1,
                ..PoolStats::default()
            },
        };

        for _ in 0..size {
            pool.prewarm(host);
        }

        log::debug!(
            "Created pool of {} '{}' instances under {:?}",
            size,
            pool.template.name(),
            pool.container
        );
        pool
    }

    /// Check out an instance, reusing an inactive one when possible
    ///
    /// Grows the pool by exactly one instance when everything is checked out.
    pub fn acquire(&mut self, host: &mut H) -> H::Instance {
        self.stats.total_acquired += 1;

        let Some(index) = self.free.pop() else {
            return self.grow(host);
        };

        let entry = &mut self.entries[index];
        entry.active = true;
        host.set_active(entry.instance, true);

        log::trace!("Acquired '{}' instance {:?}", self.template.name(), entry.instance);
        entry.instance
    }

    /// Check out an instance narrowed to capability `C`
    ///
    /// The template's declared capabilities are checked first; on a miss the
    /// pool is left untouched. The error carries the template name as its
    /// `key` since a bare pool has no registry key.
    pub fn acquire_typed<C: Capability>(
        &mut self,
        host: &mut H,
    ) -> Result<CapabilityHandle<C, H::Instance>, PoolError> {
        if !self.supports::<C>() {
            let capability = std::any::type_name::<C>();
            log::error!(
                "Pool of '{}' does not provide capability {}",
                self.template.name(),
                capability
            );
            return Err(PoolError::CapabilityNotFound {
                key: self.template.name().to_string(),
                capability,
            });
        }
        Ok(CapabilityHandle::new(self.acquire(host)))
    }

    /// Create one new instance and hand it out immediately
    pub fn grow(&mut self, host: &mut H) -> H::Instance {
        let instance = self.spawn(host, true);
        self.stats.total_grown += 1;

        log::debug!(
            "Pool of '{}' grew to {} instances",
            self.template.name(),
            self.entries.len()
        );
        instance
    }

    /// Add one inactive instance ahead of demand
    pub fn prewarm(&mut self, host: &mut H) -> H::Instance {
        self.spawn(host, false)
    }

    /// Return a checked out instance to the pool
    ///
    /// # Errors
    ///
    /// [`PoolError::ForeignHandle`] if `instance` was not produced by this
    /// pool or is not currently checked out. Nothing is modified in that case,
    /// so releasing twice reports the error on the second call.
    pub fn release(&mut self, instance: H::Instance, host: &mut H) -> Result<(), PoolError> {
        let checked_out = self
            .slots
            .get(&instance)
            .copied()
            .filter(|&index| self.entries[index].active);
        let Some(index) = checked_out else {
            return Err(PoolError::foreign(instance));
        };

        self.deactivate(index, host);
        log::trace!("Released '{}' instance {:?}", self.template.name(), instance);
        Ok(())
    }

    /// Return every checked out instance to the pool
    ///
    /// Returns how many instances were released.
    pub fn release_all(&mut self, host: &mut H) -> usize {
        let mut released = 0;
        for index in 0..self.entries.len() {
            if self.entries[index].active {
                self.deactivate(index, host);
                released += 1;
            }
        }
        released
    }

    /// Destroy every instance, active or not, and drop the pool
    pub fn destroy_all(self, host: &mut H) {
        for entry in &self.entries {
            host.destroy(entry.instance);
        }
        log::debug!(
            "Destroyed pool of '{}' ({} instances)",
            self.template.name(),
            self.entries.len()
        );
    }

    /// Check whether the template declares capability `C`
    pub fn supports<C: Capability>(&self) -> bool {
        self.template.capabilities().contains::<C>()
    }

    /// Check whether `instance` was produced by this pool
    pub fn contains(&self, instance: H::Instance) -> bool {
        self.slots.contains_key(&instance)
    }

    /// Check out state of `instance`, `None` if it is not a member
    pub fn is_active(&self, instance: H::Instance) -> Option<bool> {
        self.slots.get(&instance).map(|&index| self.entries[index].active)
    }

    /// All entries in creation order
    pub fn entries(&self) -> &[PoolEntry<H::Instance>] {
        &self.entries
    }

    /// Total number of instances
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false once constructed; provided for API symmetry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of checked out instances
    pub fn active_count(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    /// Number of instances ready for reuse
    pub fn inactive_count(&self) -> usize {
        self.free.len()
    }

    /// Template the pool instantiates from
    pub fn template(&self) -> &H::Template {
        &self.template
    }

    /// Holding area for pooled instances
    pub fn container(&self) -> H::Container {
        self.container
    }

    /// Usage counters for this pool
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            total_instances: self.entries.len(),
            active_instances: self.active_count(),
            ..self.stats.clone()
        }
    }

    fn spawn(&mut self, host: &mut H, active: bool) -> H::Instance {
        let instance = host.instantiate(&self.template);
        host.set_parent(instance, self.container, false);
        host.set_active(instance, active);

        let index = self.entries.len();
        self.entries.push(PoolEntry { instance, active });
        self.slots.insert(instance, index);
        if !active {
            self.free.push(index);
        }
        instance
    }

    fn deactivate(&mut self, index: usize, host: &mut H) {
        let entry = &mut self.entries[index];
        host.set_parent(entry.instance, self.container, false);
        host.set_active(entry.instance, false);
        entry.active = false;
        self.free.push(index);
        self.stats.total_released += 1;
    }
}
