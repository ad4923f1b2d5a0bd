//! Layered starfield backdrop engine.
//!
//! Stars and nebulae are persistent populations generated per viewport;
//! meteors, comets and sparks are transient particles spawned on timers.
//! The host calls `Engine::frame` once per display refresh and supplies a
//! `Surface` to draw on.

pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, DelayWindow, EngineConfig, SpawnWindows};
pub use api::types::{FrameOutcome, FrameStats, SurfaceSize, Viewport};
pub use components::color::{Rgb, Rgba};
pub use components::layer::ParallaxLayer;
pub use components::nebula::NebulaCloud;
pub use components::spectral::SpectralClass;
pub use components::star::Star;
pub use components::transient::{Comet, Meteor, Spark};
pub use core::engine::Engine;
pub use core::fade::{FadeController, FadePhase};
pub use core::scene::SkyScene;
pub use core::time::Debounce;
pub use renderer::{ColorStop, DrawCommand, LinearGradient, Paint, RadialGradient, RecordingSurface, Surface};
pub use systems::population::{generate_nebulas, generate_stars, pick_spectral_color, StarCluster, StarSet};
pub use systems::rng::Rng;
pub use systems::spawner::{create_comet, create_meteor, Spawner, MAX_COMETS, MAX_METEORS};
