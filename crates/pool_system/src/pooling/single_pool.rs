//! Single Pool
//!
//! A private pool for consumers that do not need the shared registry.

use super::capability::{Capability, CapabilityHandle};
use super::error::PoolError;
use super::host::{InstanceHost, PoolTemplate};
use super::instance_pool::{InstancePool, PoolEntry, PoolStats};

/// Pool bound at construction to one template and one destination container
///
/// # Usage
///
/// ```rust
/// use pool_system::prelude::*;
///
/// let mut scene = SceneHost::new();
/// let effects = scene.create_container("Effects");
/// let mut sparks = SinglePool::new(Prefab::new("Spark"), 8, effects, &mut scene);
///
/// let spark = sparks.acquire(&mut scene);
/// sparks.release(spark, &mut scene).unwrap();
/// assert_eq!(sparks.len(), 8);
/// ```
pub struct SinglePool<H: InstanceHost> {
    inner: InstancePool<H>,
}

impl<H: InstanceHost> SinglePool<H> {
    /// Create the pool and fill it with `size` inactive instances
    ///
    /// Instances live under `destination` while they are pooled.
    pub fn new(template: H::Template, size: usize, destination: H::Container, host: &mut H) -> Self {
        log::info!(
            "Creating single pool for '{}' with {} instances",
            template.name(),
            size.max(1)
        );
        Self {
            inner: InstancePool::new(template, size, destination, host),
        }
    }

    /// Check out an instance, growing by one if none is free
    pub fn acquire(&mut self, host: &mut H) -> H::Instance {
        self.inner.acquire(host)
    }

    /// Check out an instance narrowed to capability `C`
    pub fn acquire_typed<C: Capability>(
        &mut self,
        host: &mut H,
    ) -> Result<CapabilityHandle<C, H::Instance>, PoolError> {
        self.inner.acquire_typed::<C>(host)
    }

    /// Add one inactive instance ahead of demand
    pub fn prewarm(&mut self, host: &mut H) -> H::Instance {
        self.inner.prewarm(host)
    }

    /// Every instance of the pool, active and inactive
    pub fn list_all(&self) -> &[PoolEntry<H::Instance>] {
        self.inner.entries()
    }

    /// Return a checked out instance
    ///
    /// # Errors
    ///
    /// [`PoolError::ForeignHandle`] if the instance is not checked out from this pool.
    pub fn release(&mut self, instance: H::Instance, host: &mut H) -> Result<(), PoolError> {
        self.inner.release(instance, host)
    }

    /// Return every checked out instance
    pub fn release_all(&mut self, host: &mut H) -> usize {
        self.inner.release_all(host)
    }

    /// Destroy all instances and drop the pool
    pub fn destroy_all(self, host: &mut H) {
        self.inner.destroy_all(host);
    }

    /// Total number of instances
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Always false once constructed
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of checked out instances
    pub fn active_count(&self) -> usize {
        self.inner.active_count()
    }

    /// Destination container of the pool
    pub fn destination(&self) -> H::Container {
        self.inner.container()
    }

    /// Usage counters
    pub fn stats(&self) -> PoolStats {
        self.inner.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Prefab, SceneHost};

    struct Glowing;
    impl Capability for Glowing {}

    #[test]
    fn test_single_pool_lifecycle() {
        let mut scene = SceneHost::new();
        let effects = scene.create_container("Effects");
        let mut pool = SinglePool::new(Prefab::new("Spark"), 2, effects, &mut scene);

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.destination(), effects);
        assert_eq!(scene.children_of(effects).len(), 2);

        let a = pool.acquire(&mut scene);
        let b = pool.acquire(&mut scene);
        let c = pool.acquire(&mut scene);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.active_count(), 3);
        assert_eq!(scene.parent_of(c), Some(effects));

        pool.release(b, &mut scene).unwrap();
        assert_eq!(pool.active_count(), 2);
        assert!(pool.list_all().iter().any(|entry| entry.instance() == a && entry.is_active()));
        assert!(pool.list_all().iter().any(|entry| entry.instance() == b && !entry.is_active()));
    }

    #[test]
    fn test_zero_size_is_coerced() {
        let mut scene = SceneHost::new();
        let effects = scene.create_container("Effects");
        let pool = SinglePool::new(Prefab::new("Spark"), 0, effects, &mut scene);

        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_typed_acquire_on_single_pool() {
        let mut scene = SceneHost::new();
        let effects = scene.create_container("Effects");
        let prefab = Prefab::new("Lamp").with_capability::<Glowing>();
        let mut pool = SinglePool::new(prefab, 1, effects, &mut scene);

        let lamp = pool.acquire_typed::<Glowing>(&mut scene).unwrap();
        assert!(scene.is_active(lamp.instance()));
        pool.release(lamp.instance(), &mut scene).unwrap();
        assert_eq!(pool.stats().total_released, 1);
    }

    #[test]
    fn test_missing_capability_names_the_template() {
        let mut scene = SceneHost::new();
        let effects = scene.create_container("Effects");
        let mut pool = SinglePool::new(Prefab::new("Spark"), 1, effects, &mut scene);

        let result = pool.acquire_typed::<Glowing>(&mut scene);

        assert!(matches!(
            result,
            Err(PoolError::CapabilityNotFound { ref key, .. }) if key == "Spark"
        ));
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_release_twice_fails() {
        let mut scene = SceneHost::new();
        let effects = scene.create_container("Effects");
        let mut pool = SinglePool::new(Prefab::new("Spark"), 1, effects, &mut scene);

        let spark = pool.acquire(&mut scene);
        assert!(pool.release(spark, &mut scene).is_ok());
        assert!(matches!(
            pool.release(spark, &mut scene),
            Err(PoolError::ForeignHandle { .. })
        ));
        assert_eq!(pool.len(), 1);
    }
}
