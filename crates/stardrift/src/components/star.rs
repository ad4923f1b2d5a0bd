use glam::Vec2;

use super::color::Rgb;
use super::layer::ParallaxLayer;

/// A persistent background star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub layer: ParallaxLayer,
    pub base_opacity: f32,
    pub color: Rgb,
    pub velocity: Vec2,
    pub twinkle_phase: f32,
    /// Radians added to `twinkle_phase` per frame.
    pub twinkle_speed: f32,
    /// Depth of the flicker: opacity swings within [1 - intensity, 1].
    pub twinkle_intensity: f32,
    /// Diffraction-spike arm length, for large near-layer stars only.
    pub spike_length: Option<f32>,
}

impl Star {
    /// Multiplicative flicker factor in [1 - intensity, 1].
    ///
    /// Product of three sines at incommensurate frequencies and offsets,
    /// so the pattern never visibly repeats.
    pub fn scintillation(&self) -> f32 {
        let p = self.twinkle_phase;
        let wave = p.sin() * (p * 1.73 + 1.3).sin() * (p * 2.91 + 2.1).sin();
        let unit = (wave + 1.0) * 0.5;
        1.0 - self.twinkle_intensity * (1.0 - unit)
    }

    /// Instantaneous drawn opacity under the given global fade.
    pub fn opacity(&self, global_opacity: f32) -> f32 {
        (self.base_opacity * self.scintillation() * global_opacity).clamp(0.0, 1.0)
    }
}
