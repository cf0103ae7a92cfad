//! Traits describing the host world and item registry.
//!
//! Oracles expose block queries, item lookups, type classification and
//! deterministic randomness. The [`Env`] aggregate bundles them so the
//! decision chain and recovery search can run without hard coupling to a
//! concrete host.
mod classifier;
mod items;
mod rng;
mod world;

pub use classifier::{CategoryClassifier, ItemClassifier};
pub use items::{DataDefinition, ItemCategories, ItemCategory, ItemDefinition, ItemOracle};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use world::WorldOracle;

/// Aggregates the oracles required by preservation and recovery.
pub struct Env<'a, W, I, C, R>
where
    W: WorldOracle + ?Sized,
    I: ItemOracle + ?Sized,
    C: ItemClassifier + ?Sized,
    R: RngOracle + ?Sized,
{
    world: &'a W,
    items: &'a I,
    classifier: &'a C,
    rng: &'a R,
}

impl<W, I, C, R> Clone for Env<'_, W, I, C, R>
where
    W: WorldOracle + ?Sized,
    I: ItemOracle + ?Sized,
    C: ItemClassifier + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, I, C, R> Copy for Env<'_, W, I, C, R>
where
    W: WorldOracle + ?Sized,
    I: ItemOracle + ?Sized,
    C: ItemClassifier + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type DeathEnv<'a> = Env<
    'a,
    dyn WorldOracle + 'a,
    dyn ItemOracle + 'a,
    dyn ItemClassifier + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, W, I, C, R> Env<'a, W, I, C, R>
where
    W: WorldOracle + ?Sized,
    I: ItemOracle + ?Sized,
    C: ItemClassifier + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(world: &'a W, items: &'a I, classifier: &'a C, rng: &'a R) -> Self {
        Self {
            world,
            items,
            classifier,
            rng,
        }
    }

    pub fn world(&self) -> &'a W {
        self.world
    }

    pub fn items(&self) -> &'a I {
        self.items
    }

    pub fn classifier(&self) -> &'a C {
        self.classifier
    }

    pub fn rng(&self) -> &'a R {
        self.rng
    }
}

impl<'a, W, I, C, R> Env<'a, W, I, C, R>
where
    W: WorldOracle + 'a,
    I: ItemOracle + 'a,
    C: ItemClassifier + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into the trait-object based [`DeathEnv`].
    pub fn into_death_env(self) -> DeathEnv<'a> {
        let world: &'a dyn WorldOracle = self.world;
        let items: &'a dyn ItemOracle = self.items;
        let classifier: &'a dyn ItemClassifier = self.classifier;
        let rng: &'a dyn RngOracle = self.rng;
        Env::new(world, items, classifier, rng)
    }
}
