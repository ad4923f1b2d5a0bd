use serde::Serialize;

/// Logical viewport reported by the host, plus its device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self { width, height, pixel_ratio }
    }

    /// Whether populations can be generated for this viewport.
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// Backing-store dimensions handed to `Surface::resize`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Logical (CSS) width the scene is laid out in.
    pub width: f32,
    pub height: f32,
    /// Physical pixel dimensions of the backing store.
    pub backing_width: u32,
    pub backing_height: u32,
    /// Context scale mapping logical units onto backing pixels.
    pub scale: f32,
}

impl SurfaceSize {
    /// Scale the viewport by its pixel ratio, capped at `max_ratio`.
    pub fn for_viewport(viewport: &Viewport, max_ratio: f32) -> Self {
        let scale = if viewport.pixel_ratio.is_finite() && viewport.pixel_ratio > 0.0 {
            viewport.pixel_ratio.min(max_ratio)
        } else {
            1.0
        };
        let width = viewport.width.max(0.0);
        let height = viewport.height.max(0.0);
        Self {
            width,
            height,
            backing_width: (width * scale).floor() as u32,
            backing_height: (height * scale).floor() as u32,
            scale,
        }
    }
}

/// What a single `Engine::frame` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not mounted or torn down: the host must stop rescheduling.
    Idle,
    /// Document hidden: no update or draw, loop stays alive.
    Hidden,
    /// Global opacity below the skip threshold: no update or draw.
    FadedOut,
    /// Particles were updated and drawn.
    Rendered,
}

impl FrameOutcome {
    /// Whether the host should request another frame.
    pub fn reschedule(self) -> bool {
        !matches!(self, FrameOutcome::Idle)
    }
}

/// Snapshot of engine state for host-side diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FrameStats {
    pub frames: u64,
    pub stars: usize,
    pub nebulas: usize,
    pub meteors: usize,
    pub comets: usize,
    pub sparks: usize,
    pub opacity: f32,
    pub hidden: bool,
}
