//! Scene node storage and parenting

use crate::foundation::collections::{new_key_type, HandleMap};
use crate::pooling::{InstanceHost, PoolTemplate};

use super::Prefab;

new_key_type! {
    /// Stable handle to a node in a [`SceneHost`]
    pub struct NodeKey;
}

/// One node in the scene hierarchy
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Node name (prefab name for instantiated nodes)
    pub name: String,
    /// Parent node, `None` for roots
    pub parent: Option<NodeKey>,
    /// Whether the node is visible and processed
    pub active: bool,
    /// Position relative to the parent
    pub local_position: [f32; 3],
    /// Direct children, in parenting order
    pub children: Vec<NodeKey>,
}

/// Flat node store with parent links
pub struct SceneHost {
    nodes: HandleMap<NodeKey, SceneNode>,
    instantiated: u64,
    destroyed: u64,
}

impl SceneHost {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            nodes: HandleMap::with_key(),
            instantiated: 0,
            destroyed: 0,
        }
    }

    /// Create an active root node to group other nodes under
    pub fn create_container(&mut self, name: impl Into<String>) -> NodeKey {
        self.nodes.insert(SceneNode {
            name: name.into(),
            parent: None,
            active: true,
            local_position: [0.0; 3],
            children: Vec::new(),
        })
    }

    /// Get a node by key
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Check whether a node exists and is active
    pub fn is_active(&self, key: NodeKey) -> bool {
        self.nodes.get(key).is_some_and(|node| node.active)
    }

    /// Get the parent of a node
    pub fn parent_of(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|node| node.parent)
    }

    /// Direct children of a node
    pub fn children_of(&self, key: NodeKey) -> Vec<NodeKey> {
        self.nodes.get(key).map(|node| node.children.clone()).unwrap_or_default()
    }

    /// Check whether `ancestor` is `key` itself or one of its parents
    pub fn is_ancestor_or_self(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(node_key) = current {
            if node_key == ancestor {
                return true;
            }
            current = self.parent_of(node_key);
        }
        false
    }

    fn detach(&mut self, key: NodeKey) {
        let Some(parent) = self.nodes.get_mut(key).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&child| child != key);
        }
    }

    /// Move a node relative to its parent
    pub fn set_local_position(&mut self, key: NodeKey, position: [f32; 3]) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.local_position = position;
        }
    }

    /// Position of a node in world space
    pub fn world_position(&self, key: NodeKey) -> Option<[f32; 3]> {
        let node = self.nodes.get(key)?;
        let mut position = node.local_position;
        let mut parent = node.parent;
        while let Some(parent_key) = parent {
            let Some(parent_node) = self.nodes.get(parent_key) else { break };
            for (axis, offset) in position.iter_mut().zip(parent_node.local_position) {
                *axis += offset;
            }
            parent = parent_node.parent;
        }
        Some(position)
    }

    /// Number of live nodes, containers included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes instantiated from templates since creation
    pub fn instantiated_count(&self) -> u64 {
        self.instantiated
    }

    /// Nodes destroyed since creation
    pub fn destroyed_count(&self) -> u64 {
        self.destroyed
    }
}

impl Default for SceneHost {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanceHost for SceneHost {
    type Template = Prefab;
    type Instance = NodeKey;
    type Container = NodeKey;

    fn instantiate(&mut self, template: &Prefab) -> NodeKey {
        self.instantiated += 1;
        self.nodes.insert(SceneNode {
            name: template.name().to_string(),
            parent: None,
            active: true,
            local_position: [0.0; 3],
            children: Vec::new(),
        })
    }

    fn destroy(&mut self, instance: NodeKey) {
        self.detach(instance);

        // Children go down with their parent
        let mut pending = vec![instance];
        while let Some(key) = pending.pop() {
            if let Some(node) = self.nodes.remove(key) {
                self.destroyed += 1;
                pending.extend(node.children);
            }
        }
    }

    fn set_parent(&mut self, instance: NodeKey, container: NodeKey, preserve_placement: bool) {
        if !self.nodes.contains_key(instance) {
            log::warn!("Cannot parent missing node {:?}", instance);
            return;
        }
        if !self.nodes.contains_key(container) {
            log::warn!("Cannot parent {:?} under missing node {:?}", instance, container);
            return;
        }
        if self.is_ancestor_or_self(instance, container) {
            log::warn!("Cannot parent {:?} under its own descendant {:?}", instance, container);
            return;
        }

        let world = if preserve_placement { self.world_position(instance) } else { None };
        let container_world = self.world_position(container).unwrap_or([0.0; 3]);

        self.detach(instance);
        if let Some(parent_node) = self.nodes.get_mut(container) {
            parent_node.children.push(instance);
        }

        let Some(node) = self.nodes.get_mut(instance) else { return };
        node.parent = Some(container);
        if let Some(world) = world {
            for ((local, world), origin) in node.local_position.iter_mut().zip(world).zip(container_world) {
                *local = world - origin;
            }
        }
    }

    fn set_active(&mut self, instance: NodeKey, active: bool) {
        match self.nodes.get_mut(instance) {
            Some(node) => node.active = active,
            None => log::warn!("Cannot toggle missing node {:?}", instance),
        }
    }
}
