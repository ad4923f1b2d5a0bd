use crate::api::config::EngineConfig;
use crate::api::types::{FrameOutcome, FrameStats, SurfaceSize, Viewport};
use crate::core::fade::{FadeController, FadePhase};
use crate::core::scene::SkyScene;
use crate::core::time::Debounce;
use crate::renderer::traits::Surface;
use crate::systems::motion;
use crate::systems::population::{generate_nebulas, generate_stars};
use crate::systems::render::render_scene;
use crate::systems::rng::Rng;
use crate::systems::spawner::Spawner;

/// The backdrop engine: one instance owns every particle, the RNG, the
/// fade state, the spawn timers and the drawing surface.
///
/// The host drives it with `frame(now_ms)` from its display-refresh
/// callback and keeps rescheduling while the outcome asks for it.
pub struct Engine<S: Surface> {
    config: EngineConfig,
    rng: Rng,
    surface: Option<S>,
    viewport: Viewport,
    scene: SkyScene,
    spawner: Spawner,
    fade: FadeController,
    resize: Debounce<Viewport>,
    hidden: bool,
    frames: u64,
}

impl<S: Surface> Engine<S> {
    /// An invalid `config` is logged and replaced by the defaults.
    pub fn new(config: EngineConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("invalid engine config, using defaults: {}", err);
                EngineConfig::default()
            }
        };
        let mut rng = Rng::new(config.seed);
        let spawner = Spawner::new(&config, &mut rng);
        Self {
            fade: FadeController::new(config.fade_rate, config.fade_snap),
            resize: Debounce::new(config.resize_debounce_ms),
            spawner,
            rng,
            config,
            surface: None,
            viewport: Viewport::default(),
            scene: SkyScene::new(),
            hidden: false,
            frames: 0,
        }
    }

    /// Attach a surface and generate the initial populations.
    ///
    /// A missing surface leaves the engine idle; a later successful mount
    /// is the only way to start it. Returns whether the engine is running.
    pub fn mount(&mut self, surface: Option<S>, viewport: Viewport) -> bool {
        let Some(mut surface) = surface else {
            log::warn!("no drawing surface available, backdrop not started");
            return false;
        };
        surface.resize(SurfaceSize::for_viewport(&viewport, self.config.max_pixel_ratio));
        self.surface = Some(surface);
        self.viewport = viewport;
        self.scene.clear();
        self.resize.cancel();
        self.reset_state();
        self.regenerate();
        log::info!(
            "backdrop mounted at {}x{} (pixel ratio {})",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio
        );
        true
    }

    /// Set the fade target. Opacity eases toward it over following frames.
    pub fn activate(&mut self, active: bool) {
        self.fade.activate(active);
    }

    /// Document visibility. While hidden, frames skip all work but the
    /// host keeps rescheduling.
    pub fn set_hidden(&mut self, hidden: bool) {
        if self.hidden != hidden {
            log::debug!("backdrop {}", if hidden { "hidden" } else { "visible" });
        }
        self.hidden = hidden;
    }

    /// Queue a viewport change; applied after the quiet period elapses.
    pub fn notify_resize(&mut self, viewport: Viewport, now_ms: f64) {
        if self.surface.is_some() {
            self.resize.notify(viewport, now_ms);
        }
    }

    /// Run one display frame.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        if self.surface.is_none() {
            return FrameOutcome::Idle;
        }
        if let Some(viewport) = self.resize.poll(now_ms) {
            self.apply_resize(viewport);
        }
        if self.hidden {
            return FrameOutcome::Hidden;
        }
        let opacity = self.fade.step();
        if opacity < self.config.skip_threshold {
            return FrameOutcome::FadedOut;
        }

        self.frames += 1;
        let Viewport { width, height, .. } = self.viewport;
        let scene = &mut self.scene;
        motion::update_nebulas(&mut scene.nebulas, width, height);
        motion::update_stars(&mut scene.stars, width, height);
        motion::update_sparks(&mut scene.sparks);
        motion::update_meteors(&mut scene.meteors, &mut scene.sparks, &mut self.rng, height);
        motion::update_comets(&mut scene.comets, &mut scene.sparks, &mut self.rng, width);
        self.spawner.tick(
            now_ms,
            opacity,
            width,
            height,
            &mut scene.meteors,
            &mut scene.comets,
            &mut self.rng,
        );

        if let Some(surface) = self.surface.as_mut() {
            render_scene(surface, &self.scene, width, height, opacity);
        }
        FrameOutcome::Rendered
    }

    /// Stop the loop: drop the surface, any pending resize and every
    /// particle. Returns the surface to the host.
    pub fn teardown(&mut self) -> Option<S> {
        self.resize.cancel();
        self.scene.clear();
        self.fade = FadeController::new(self.config.fade_rate, self.config.fade_snap);
        self.hidden = false;
        let surface = self.surface.take();
        if surface.is_some() {
            log::info!("backdrop torn down after {} frames", self.frames);
        }
        surface
    }

    /// Fresh fade, visibility, spawn timers and frame count for a new mount.
    /// A target set by `activate` before mounting is kept; opacity restarts at 0.
    fn reset_state(&mut self) {
        let active = self.fade.target() > 0.0;
        self.fade = FadeController::new(self.config.fade_rate, self.config.fade_snap);
        self.fade.activate(active);
        self.hidden = false;
        self.spawner = Spawner::new(&self.config, &mut self.rng);
        self.frames = 0;
    }

    fn apply_resize(&mut self, viewport: Viewport) {
        if !viewport.is_drawable() {
            log::warn!(
                "ignoring resize to {}x{}, waiting for a drawable viewport",
                viewport.width,
                viewport.height
            );
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(SurfaceSize::for_viewport(&viewport, self.config.max_pixel_ratio));
        }
        self.viewport = viewport;
        self.regenerate();
    }

    /// Replace stars and nebulae for the current viewport in one step.
    fn regenerate(&mut self) {
        let Viewport { width, height, .. } = self.viewport;
        if !self.viewport.is_drawable() {
            log::warn!("viewport {}x{} not drawable, populations not generated", width, height);
            return;
        }
        let stars = generate_stars(width, height, &mut self.rng);
        let nebulas = generate_nebulas(width, height, &mut self.rng);
        self.scene.replace_populations(stars, nebulas);
    }

    // ---- Accessors ----

    pub fn is_running(&self) -> bool {
        self.surface.is_some()
    }

    pub fn opacity(&self) -> f32 {
        self.fade.current()
    }

    pub fn fade_phase(&self) -> FadePhase {
        self.fade.phase()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scene(&self) -> &SkyScene {
        &self.scene
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frames: self.frames,
            stars: self.scene.stars.len(),
            nebulas: self.scene.nebulas.len(),
            meteors: self.scene.meteors.len(),
            comets: self.scene.comets.len(),
            sparks: self.scene.sparks.len(),
            opacity: self.fade.current(),
            hidden: self.hidden,
        }
    }
}
