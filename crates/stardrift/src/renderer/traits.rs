//! Drawing-surface contract the render pipeline targets.
//!
//! The engine never talks to a canvas directly. Hosts implement `Surface`
//! over whatever 2D API they have (Canvas2D in `stardrift-web`, a
//! `RecordingSurface` in tests).

use glam::Vec2;

use crate::api::types::SurfaceSize;
use crate::components::color::Rgba;

/// A gradient color stop at `offset` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Gradient along the segment `start -> end`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
}

/// Gradient from `center` (radius 0) out to `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    pub stops: Vec<ColorStop>,
}

/// Fill or stroke style.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

/// A 2D drawing surface.
///
/// Coordinates are logical units; `resize` establishes the mapping onto
/// backing pixels. Implementations must not panic on degenerate input
/// (zero radius, zero-length lines): drawing nothing is acceptable.
pub trait Surface {
    /// Resize the backing store and rescale the context.
    fn resize(&mut self, size: SurfaceSize);

    /// Clear the logical rectangle `(0, 0) .. (width, height)`.
    fn clear(&mut self, width: f32, height: f32);

    /// Fill a disk.
    fn fill_disk(&mut self, center: Vec2, radius: f32, paint: &Paint);

    /// Stroke a straight segment with round caps.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: &Paint);
}
