use crate::components::nebula::NebulaCloud;
use crate::components::star::Star;
use crate::components::transient::{Comet, Meteor, Spark};
use crate::systems::population::StarSet;

/// Every particle collection, owned by one engine.
/// Flat Vecs: populations are hundreds of particles, not millions.
#[derive(Debug, Default)]
pub struct SkyScene {
    pub stars: Vec<Star>,
    pub nebulas: Vec<NebulaCloud>,
    pub meteors: Vec<Meteor>,
    pub comets: Vec<Comet>,
    pub sparks: Vec<Spark>,
}

impl SkyScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in freshly generated persistent populations wholesale.
    /// Transient particles are left as they are.
    pub fn replace_populations(&mut self, stars: StarSet, nebulas: Vec<NebulaCloud>) {
        self.stars = stars.stars;
        self.nebulas = nebulas;
    }

    /// Number of live transient particles.
    pub fn transient_count(&self) -> usize {
        self.meteors.len() + self.comets.len() + self.sparks.len()
    }

    /// Clear all particles.
    pub fn clear(&mut self) {
        self.stars.clear();
        self.nebulas.clear();
        self.meteors.clear();
        self.comets.clear();
        self.sparks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty() && self.nebulas.is_empty() && self.transient_count() == 0
    }
}
