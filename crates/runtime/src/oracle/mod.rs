//! Reference oracles and the bundle the orchestrator queries.
//!
//! [`VoxelWorld`] and [`ItemCatalog`] implement the lenient-core oracle
//! traits over loaded content. Hosts embedding the runtime in a real engine
//! supply their own implementations; [`OracleManager`] only needs trait
//! objects.
mod items;
mod world;

use std::sync::Arc;

use lenient_core::{
    CategoryClassifier, DeathEnv, Env, ItemClassifier, ItemOracle, PcgRng, RngOracle, WorldOracle,
};

pub use items::ItemCatalog;
pub use world::VoxelWorld;

/// Manages all oracle implementations and provides unified access.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) world: Arc<dyn WorldOracle>,
    pub(crate) items: Arc<dyn ItemOracle>,
    pub(crate) classifier: Arc<dyn ItemClassifier>,
    pub(crate) rng: Arc<dyn RngOracle>,
}

impl OracleManager {
    /// Creates a manager using the category classifier and PCG rolls.
    pub fn new(world: Arc<dyn WorldOracle>, items: Arc<dyn ItemOracle>) -> Self {
        Self {
            world,
            items,
            classifier: Arc::new(CategoryClassifier),
            rng: Arc::new(PcgRng),
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn ItemClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    /// Borrows the oracles as a [`DeathEnv`] for lenient-core.
    pub fn as_death_env(&self) -> DeathEnv<'_> {
        let world: &dyn WorldOracle = self.world.as_ref();
        let items: &dyn ItemOracle = self.items.as_ref();
        let classifier: &dyn ItemClassifier = self.classifier.as_ref();
        let rng: &dyn RngOracle = self.rng.as_ref();
        Env::new(world, items, classifier, rng)
    }

    pub fn world(&self) -> &dyn WorldOracle {
        self.world.as_ref()
    }

    pub fn items(&self) -> &dyn ItemOracle {
        self.items.as_ref()
    }
}
