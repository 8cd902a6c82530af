//! Ui context - the surface, identifier registry and configuration passed
//! down through every build, clone and binding call

use crate::config::Config;
use crate::id::{Id, IdRegistry};
use crate::surface::{MemorySurface, NodeHandle, Surface};
use std::collections::HashMap;

/// Everything a descriptor needs to touch the outside world
///
/// Descriptors are plain data. Operations that materialize or mutate surface
/// nodes take `&mut Ui<S>`; constructors only need [`Ui::ids`].
pub struct Ui<S: Surface> {
    surface: S,
    ids: IdRegistry,
    config: Config,
    /// Back-references from live nodes to the descriptor that owns them
    owners: HashMap<NodeHandle, Id>,
}

impl<S: Surface> Ui<S> {
    /// Create a context over `surface` with default configuration
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, Config::default())
    }

    pub fn with_config(surface: S, config: Config) -> Self {
        Ui {
            surface,
            ids: IdRegistry::new(config.id_prefix.clone()),
            config,
            owners: HashMap::new(),
        }
    }

    pub fn ids(&self) -> &IdRegistry {
        &self.ids
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Identifier of the descriptor owning `node`, if any
    pub fn owner_of(&self, node: NodeHandle) -> Option<&Id> {
        self.owners.get(&node)
    }

    pub(crate) fn claim(&mut self, node: NodeHandle, id: &Id) {
        self.owners.insert(node, id.clone());
    }

    pub(crate) fn release(&mut self, node: NodeHandle) {
        self.owners.remove(&node);
    }
}

impl Ui<MemorySurface> {
    /// Context over a fresh [`MemorySurface`]
    pub fn headless() -> Self {
        Ui::new(MemorySurface::new())
    }

    pub fn headless_with_config(config: Config) -> Self {
        Ui::with_config(MemorySurface::new(), config)
    }
}
