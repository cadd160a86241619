//! Prefab templates

use crate::pooling::{Capability, CapabilitySet, PoolTemplate};

/// Named blueprint for scene nodes
#[derive(Debug, Clone)]
pub struct Prefab {
    name: String,
    capabilities: CapabilitySet,
}

impl Prefab {
    /// Create a prefab without capabilities
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: CapabilitySet::new(),
        }
    }

    /// Declare that instances of this prefab support capability `C`
    #[must_use]
    pub fn with_capability<C: Capability>(mut self) -> Self {
        self.capabilities.insert::<C>();
        self
    }
}

impl PoolTemplate for Prefab {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }
}
