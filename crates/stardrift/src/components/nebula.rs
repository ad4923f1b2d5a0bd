use glam::Vec2;

use super::color::Rgb;

/// A large, slowly drifting and pulsing cloud of color.
#[derive(Debug, Clone, PartialEq)]
pub struct NebulaCloud {
    pub pos: Vec2,
    /// Gradient radius, 200..600.
    pub radius: f32,
    pub color: Rgb,
    /// Peak center opacity, 0.10..0.18.
    pub base_opacity: f32,
    pub velocity: Vec2,
    pub pulse_phase: f32,
    pub pulse_speed: f32,
}

impl NebulaCloud {
    /// Center opacity under the given global fade; a single sine pulse
    /// swings it between 80% and 100% of `base_opacity`.
    pub fn opacity(&self, global_opacity: f32) -> f32 {
        let pulse = 0.9 + 0.1 * self.pulse_phase.sin();
        (self.base_opacity * pulse * global_opacity).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_stays_within_band() {
        let mut cloud = NebulaCloud {
            pos: Vec2::ZERO,
            radius: 300.0,
            color: Rgb(120, 80, 200),
            base_opacity: 0.15,
            velocity: Vec2::ZERO,
            pulse_phase: 0.0,
            pulse_speed: 0.01,
        };
        for i in 0..1000 {
            cloud.pulse_phase = i as f32 * 0.05;
            let o = cloud.opacity(1.0);
            assert!(o >= 0.15 * 0.8 - 1e-6 && o <= 0.15 + 1e-6);
        }
    }
}
