pub mod motion;
pub mod population;
pub mod render;
pub mod rng;
pub mod spawner;
