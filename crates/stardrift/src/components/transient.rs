//! Short-lived particles: meteors, comets and the sparks they shed.
//!
//! Each carries a `life` in (0, 1] that decays by a positive `decay` every
//! frame, so life is strictly decreasing until the particle is removed.

use glam::Vec2;

use super::color::Rgb;

/// How far below the bottom edge a meteor may fall before removal.
pub const METEOR_EXIT_MARGIN: f32 = 50.0;
/// How far past either side a comet may travel before removal.
pub const COMET_EXIT_MARGIN: f32 = 250.0;

/// A fast streak entering near the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    pub pos: Vec2,
    pub velocity: Vec2,
    /// |velocity|, units per frame.
    pub speed: f32,
    pub trail_length: f32,
    pub opacity: f32,
    pub life: f32,
    pub decay: f32,
    pub color: Rgb,
    pub spark_timer: u32,
}

impl Meteor {
    /// Still on the surface and not burnt out.
    pub fn is_alive(&self, height: f32) -> bool {
        self.life > 0.0 && self.pos.y <= height + METEOR_EXIT_MARGIN
    }
}

/// A slow, long-lived object crossing the scene diagonally.
#[derive(Debug, Clone, PartialEq)]
pub struct Comet {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub speed: f32,
    pub trail_length: f32,
    pub life: f32,
    pub decay: f32,
    pub color: Rgb,
    pub core_radius: f32,
    pub spark_timer: u32,
}

impl Comet {
    pub fn is_alive(&self, width: f32) -> bool {
        self.life > 0.0
            && self.pos.x >= -COMET_EXIT_MARGIN
            && self.pos.x <= width + COMET_EXIT_MARGIN
    }
}

/// An ember shed by a meteor or comet.
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub decay: f32,
    pub size: f32,
    pub color: Rgb,
}

impl Spark {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meteor(y: f32, life: f32) -> Meteor {
        Meteor {
            pos: Vec2::new(100.0, y),
            velocity: Vec2::new(5.0, 5.0),
            speed: 7.07,
            trail_length: 100.0,
            opacity: 1.0,
            life,
            decay: 0.015,
            color: Rgb::WHITE,
            spark_timer: 0,
        }
    }

    #[test]
    fn meteor_removal_conditions() {
        assert!(meteor(850.0, 0.5).is_alive(800.0));
        assert!(!meteor(850.1, 0.5).is_alive(800.0));
        assert!(!meteor(100.0, 0.0).is_alive(800.0));
    }

    #[test]
    fn comet_removal_conditions() {
        let mut comet = Comet {
            pos: Vec2::new(-250.0, 100.0),
            velocity: Vec2::new(2.0, 0.5),
            speed: 2.06,
            trail_length: 300.0,
            life: 1.0,
            decay: 0.0025,
            color: Rgb::WHITE,
            core_radius: 6.0,
            spark_timer: 0,
        };
        assert!(comet.is_alive(1000.0));
        comet.pos.x = -250.5;
        assert!(!comet.is_alive(1000.0));
        comet.pos.x = 1250.5;
        assert!(!comet.is_alive(1000.0));
    }
}
