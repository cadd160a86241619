//! Multi-Key Pool
//!
//! Registry of instance pools addressed by string key. Pools are built from a
//! configuration list at startup and may be added at runtime; the registry
//! never shrinks.

use std::collections::HashMap;

use super::capability::{Capability, CapabilityHandle};
use super::error::PoolError;
use super::host::{InstanceHost, PoolTemplate};
use super::instance_pool::{InstancePool, PoolEntry, PoolStats};

/// One `{key, template, size}` configuration record
#[derive(Debug, Clone)]
pub struct PoolConfig<T> {
    /// Key the pool is registered under
    pub key: String,
    /// Template to instantiate; `None` marks a broken record
    pub template: Option<T>,
    /// Requested initial size; non-positive values become 1
    pub size: i32,
}

impl<T> PoolConfig<T> {
    /// Create a complete configuration record
    pub fn new(key: impl Into<String>, template: T, size: i32) -> Self {
        Self {
            key: key.into(),
            template: Some(template),
            size,
        }
    }

    /// Initial size after coercion to at least one instance
    pub fn effective_size(&self) -> usize {
        usize::try_from(self.size).unwrap_or(0).max(1)
    }
}

/// Record of a pool accepted into the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRegistration {
    /// Registry key
    pub key: String,
    /// Name of the pooled template
    pub template: String,
    /// Initial size after coercion
    pub initial_size: usize,
}

/// Outcome of a batch initialization
#[derive(Debug, Default)]
pub struct InitReport {
    /// Keys that were registered, in configuration order
    pub registered: Vec<String>,
    /// Records that were rejected
    pub errors: Vec<PoolError>,
}

impl InitReport {
    /// True when every record was accepted
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Registry of keyed instance pools
///
/// Constructed explicitly and handed to whoever spawns pooled objects; there
/// is no global instance. All pools share one holding container.
///
/// # Usage
///
/// ```rust
/// use pool_system::prelude::*;
///
/// let mut scene = SceneHost::new();
/// let holding = scene.create_container("Pool");
/// let mut pools = MultiKeyPool::new(holding);
///
/// pools.register(PoolConfig::new("bullet", Prefab::new("Bullet"), 16), &mut scene)?;
/// let bullet = pools.acquire("bullet", &mut scene)?;
/// pools.release(bullet, &mut scene)?;
/// # Ok::<(), PoolError>(())
/// ```
pub struct MultiKeyPool<H: InstanceHost> {
    /// Holding area for every pooled instance
    container: H::Container,
    /// Accepted configurations in registration order
    registrations: Vec<PoolRegistration>,
    /// Pools by key
    pools: HashMap<String, InstancePool<H>>,
    /// Owning key of every instance created by any pool
    owners: HashMap<H::Instance, String>,
}

impl<H: InstanceHost> MultiKeyPool<H> {
    /// Create an empty registry whose instances live under `container`
    pub fn new(container: H::Container) -> Self {
        Self {
            container,
            registrations: Vec::new(),
            pools: HashMap::new(),
            owners: HashMap::new(),
        }
    }

    /// Build a pool for every valid configuration record
    ///
    /// A broken record (missing key or template, duplicate key) is logged and
    /// reported in the returned [`InitReport`]; the remaining records are
    /// still processed.
    pub fn initialize_all(
        &mut self,
        configs: impl IntoIterator<Item = PoolConfig<H::Template>>,
        host: &mut H,
    ) -> InitReport {
        let mut report = InitReport::default();

        for config in configs {
            let key = config.key.clone();
            match self.register(config, host) {
                Ok(()) => report.registered.push(key),
                Err(err) => report.errors.push(err),
            }
        }

        log::info!(
            "Initialized {} pools ({} configuration records rejected)",
            report.registered.len(),
            report.errors.len()
        );
        report
    }

    /// Add a pool at runtime
    ///
    /// # Errors
    ///
    /// * [`PoolError::Configuration`] - the key is empty or the template is missing
    /// * [`PoolError::DuplicateKey`] - a pool already uses the key; it is left untouched
    pub fn register(&mut self, config: PoolConfig<H::Template>, host: &mut H) -> Result<(), PoolError> {
        let size = config.effective_size();
        let PoolConfig { key, template, .. } = config;

        if key.trim().is_empty() {
            log::error!("Pool configuration has an empty key");
            return Err(PoolError::configuration("pool key must not be empty"));
        }

        if self.pools.contains_key(&key) {
            log::warn!("Pool already exists with key '{}'", key);
            return Err(PoolError::DuplicateKey { key });
        }

        let Some(template) = template else {
            log::error!("Pool configuration '{}' has no template", key);
            return Err(PoolError::configuration(format!("pool '{key}' has no template")));
        };

        let pool = InstancePool::new(template, size, self.container, host);
        for entry in pool.entries() {
            self.owners.insert(entry.instance(), key.clone());
        }

        log::info!(
            "Registered pool '{}' of '{}' with {} instances",
            key,
            pool.template().name(),
            size
        );

        self.registrations.push(PoolRegistration {
            key: key.clone(),
            template: pool.template().name().to_string(),
            initial_size: size,
        });
        self.pools.insert(key, pool);
        Ok(())
    }

    /// Check out an instance from the pool registered under `key`
    ///
    /// # Errors
    ///
    /// [`PoolError::UnknownKey`] if nothing is registered under `key`; no
    /// pool is modified.
    pub fn acquire(&mut self, key: &str, host: &mut H) -> Result<H::Instance, PoolError> {
        let pool = self.pools.get_mut(key).ok_or_else(|| unknown_key(key))?;
        let instance = pool.acquire(host);
        self.track(key, instance);
        Ok(instance)
    }

    /// Check out an instance narrowed to capability `C`
    ///
    /// # Errors
    ///
    /// * [`PoolError::UnknownKey`] - nothing is registered under `key`
    /// * [`PoolError::CapabilityNotFound`] - the template does not declare `C`
    ///
    /// Neither error modifies the pool.
    pub fn acquire_typed<C: Capability>(
        &mut self,
        key: &str,
        host: &mut H,
    ) -> Result<CapabilityHandle<C, H::Instance>, PoolError> {
        let pool = self.pools.get_mut(key).ok_or_else(|| unknown_key(key))?;

        if !pool.supports::<C>() {
            let capability = std::any::type_name::<C>();
            log::error!("Pool '{}' does not provide capability {}", key, capability);
            return Err(PoolError::CapabilityNotFound {
                key: key.to_string(),
                capability,
            });
        }

        let instance = pool.acquire(host);
        self.track(key, instance);
        Ok(CapabilityHandle::new(instance))
    }

    /// Every instance registered under `key`, active and inactive
    ///
    /// # Errors
    ///
    /// [`PoolError::UnknownKey`] if nothing is registered under `key`.
    pub fn list_all(&self, key: &str) -> Result<&[PoolEntry<H::Instance>], PoolError> {
        self.pools
            .get(key)
            .map(InstancePool::entries)
            .ok_or_else(|| unknown_key(key))
    }

    /// Return an instance to whichever pool created it
    ///
    /// # Errors
    ///
    /// [`PoolError::ForeignHandle`] if no pool in this registry created the
    /// instance, or it is not currently checked out.
    pub fn release(&mut self, instance: H::Instance, host: &mut H) -> Result<(), PoolError> {
        let pool = self
            .owners
            .get(&instance)
            .and_then(|key| self.pools.get_mut(key));

        match pool {
            Some(pool) => pool.release(instance, host),
            None => Err(PoolError::foreign(instance)),
        }
    }

    /// Return every checked out instance of the pool under `key`
    ///
    /// # Errors
    ///
    /// [`PoolError::UnknownKey`] if nothing is registered under `key`.
    pub fn release_all(&mut self, key: &str, host: &mut H) -> Result<usize, PoolError> {
        let pool = self.pools.get_mut(key).ok_or_else(|| unknown_key(key))?;
        Ok(pool.release_all(host))
    }

    /// Destroy every pooled instance and drop the registry
    pub fn destroy_all(self, host: &mut H) {
        let pool_count = self.pools.len();
        for (_, pool) in self.pools {
            pool.destroy_all(host);
        }
        log::info!("Destroyed {} pools", pool_count);
    }

    /// Get the pool registered under `key`
    pub fn pool(&self, key: &str) -> Option<&InstancePool<H>> {
        self.pools.get(key)
    }

    /// Check if a pool is registered under `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.pools.contains_key(key)
    }

    /// Registered keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|registration| registration.key.as_str())
    }

    /// Accepted configurations in registration order
    pub fn registrations(&self) -> &[PoolRegistration] {
        &self.registrations
    }

    /// Key of the pool that created `instance`
    pub fn key_of(&self, instance: H::Instance) -> Option<&str> {
        self.owners.get(&instance).map(String::as_str)
    }

    /// Number of registered pools
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Check if no pool is registered
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Holding area shared by all pools
    pub fn container(&self) -> H::Container {
        self.container
    }

    /// Usage counters summed over all pools
    pub fn stats(&self) -> PoolStats {
        let mut stats = PoolStats::default();
        for pool in self.pools.values() {
            stats.accumulate(&pool.stats());
        }
        stats
    }

    /// Remember the owner of instances created by growth
    fn track(&mut self, key: &str, instance: H::Instance) {
        if !self.owners.contains_key(&instance) {
            self.owners.insert(instance, key.to_string());
        }
    }
}

fn unknown_key(key: &str) -> PoolError {
    log::warn!("Given key doesn't exist in the pool registry: '{}'", key);
    PoolError::UnknownKey { key: key.to_string() }
}
