//! Per-frame motion and lifecycle for every particle kind.
//!
//! Increments are per frame, not per elapsed millisecond: a 120 Hz display
//! animates twice as fast as a 60 Hz one. These are free functions over the
//! engine's collections so the spark list can be borrowed alongside the
//! meteor or comet list that feeds it.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::components::color::Rgb;
use crate::components::nebula::NebulaCloud;
use crate::components::star::Star;
use crate::components::transient::{Comet, Meteor, Spark};
use crate::systems::rng::Rng;

/// Off-screen margin before a star wraps to the opposite edge.
pub const STAR_WRAP_MARGIN: f32 = 5.0;

/// Constant downward pull on sparks, units per frame squared.
pub const SPARK_GRAVITY: f32 = 0.02;

/// Frames between meteor spark rolls.
const METEOR_SPARK_THRESHOLD: u32 = 2;
/// Probability a meteor sheds a spark once its timer is due.
const METEOR_SPARK_CHANCE: f32 = 0.5;
/// Frames between comet sparks (always emitted).
const COMET_SPARK_THRESHOLD: u32 = 3;

/// Parameters for sparks shed by one parent kind.
struct SparkProfile {
    inherit: f32,
    kick: (f32, f32),
    decay: (f32, f32),
    size: (f32, f32),
}

const METEOR_SPARKS: SparkProfile = SparkProfile {
    inherit: 0.1,
    kick: (0.2, 0.8),
    decay: (0.03, 0.06),
    size: (0.6, 1.4),
};

const COMET_SPARKS: SparkProfile = SparkProfile {
    inherit: 0.2,
    kick: (0.1, 0.4),
    decay: (0.015, 0.03),
    size: (0.8, 1.8),
};

/// Toroidal wrap: leaving past `margin` on one side re-enters at the
/// opposite side's margin, perpendicular coordinate untouched.
pub fn wrap(pos: &mut Vec2, width: f32, height: f32, margin: f32) {
    if pos.x > width + margin {
        pos.x = -margin;
    } else if pos.x < -margin {
        pos.x = width + margin;
    }
    if pos.y > height + margin {
        pos.y = -margin;
    } else if pos.y < -margin {
        pos.y = height + margin;
    }
}

pub fn update_stars(stars: &mut [Star], width: f32, height: f32) {
    for star in stars {
        star.pos += star.velocity;
        wrap(&mut star.pos, width, height, STAR_WRAP_MARGIN);
        // Not reduced mod TAU: the 1.73x and 2.91x terms would then repeat
        // every TAU and the flicker would become periodic.
        star.twinkle_phase += star.twinkle_speed;
    }
}

pub fn update_nebulas(clouds: &mut [NebulaCloud], width: f32, height: f32) {
    for cloud in clouds {
        cloud.pos += cloud.velocity;
        wrap(&mut cloud.pos, width, height, cloud.radius);
        cloud.pulse_phase = (cloud.pulse_phase + cloud.pulse_speed) % TAU;
    }
}

/// Advance meteors, shed sparks, and drop meteors that burnt out or fell
/// more than the exit margin below `height`.
pub fn update_meteors(meteors: &mut Vec<Meteor>, sparks: &mut Vec<Spark>, rng: &mut Rng, height: f32) {
    meteors.retain_mut(|m| {
        m.pos += m.velocity;
        m.life -= m.decay;
        m.spark_timer += 1;
        if m.spark_timer > METEOR_SPARK_THRESHOLD {
            if rng.chance(METEOR_SPARK_CHANCE) {
                sparks.push(shed_spark(&METEOR_SPARKS, m.pos, m.velocity, m.color, rng));
            }
            m.spark_timer = 0;
        }
        m.is_alive(height)
    });
}

/// Advance comets, shed a spark every few frames, and drop comets that
/// burnt out or left the horizontal band.
pub fn update_comets(comets: &mut Vec<Comet>, sparks: &mut Vec<Spark>, rng: &mut Rng, width: f32) {
    comets.retain_mut(|c| {
        c.pos += c.velocity;
        c.life -= c.decay;
        c.spark_timer += 1;
        if c.spark_timer > COMET_SPARK_THRESHOLD {
            sparks.push(shed_spark(&COMET_SPARKS, c.pos, c.velocity, c.color, rng));
            c.spark_timer = 0;
        }
        c.is_alive(width)
    });
}

pub fn update_sparks(sparks: &mut Vec<Spark>) {
    sparks.retain_mut(|s| {
        s.pos += s.velocity;
        s.velocity.y += SPARK_GRAVITY;
        s.life -= s.decay;
        s.is_alive()
    });
}

fn shed_spark(profile: &SparkProfile, pos: Vec2, parent_velocity: Vec2, color: Rgb, rng: &mut Rng) -> Spark {
    let angle = rng.range(0.0, TAU);
    let kick = rng.range(profile.kick.0, profile.kick.1);
    Spark {
        pos,
        velocity: parent_velocity * profile.inherit + Vec2::from_angle(angle) * kick,
        life: 1.0,
        decay: rng.range(profile.decay.0, profile.decay.1),
        size: rng.range(profile.size.0, profile.size.1),
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::layer::ParallaxLayer;

    fn star_at(x: f32, y: f32, velocity: Vec2) -> Star {
        Star {
            pos: Vec2::new(x, y),
            radius: 1.0,
            layer: ParallaxLayer::Distant,
            base_opacity: 0.5,
            color: Rgb::WHITE,
            velocity,
            twinkle_phase: 0.0,
            twinkle_speed: 0.01,
            twinkle_intensity: 0.2,
            spike_length: None,
        }
    }

    fn meteor(y: f32, vy: f32) -> Meteor {
        Meteor {
            pos: Vec2::new(300.0, y),
            velocity: Vec2::new(0.0, vy),
            speed: vy,
            trail_length: 100.0,
            opacity: 1.0,
            life: 1.0,
            decay: 0.012,
            color: Rgb::WHITE,
            spark_timer: 0,
        }
    }

    #[test]
    fn star_wraps_right_to_left() {
        let v = Vec2::new(0.1, 0.0);
        let mut stars = vec![star_at(1206.0, 300.0, v)];
        update_stars(&mut stars, 1200.0, 800.0);
        assert_eq!(stars[0].pos, Vec2::new(-5.0, 300.0));
        assert_eq!(stars[0].velocity, v);
    }

    #[test]
    fn star_wraps_on_all_edges() {
        let cases = [
            (Vec2::new(-6.0, 300.0), Vec2::new(-0.1, 0.0), Vec2::new(1205.0, 300.0)),
            (Vec2::new(400.0, 806.0), Vec2::new(0.0, 0.1), Vec2::new(400.0, -5.0)),
            (Vec2::new(400.0, -6.0), Vec2::new(0.0, -0.1), Vec2::new(400.0, 805.0)),
        ];
        for (start, v, expected) in cases {
            let mut stars = vec![star_at(start.x, start.y, v)];
            update_stars(&mut stars, 1200.0, 800.0);
            assert_eq!(stars[0].pos, expected);
            assert_eq!(stars[0].velocity, v);
        }
    }

    #[test]
    fn twinkle_does_not_repeat_across_full_turns() {
        let mut star = star_at(100.0, 100.0, Vec2::ZERO);
        star.twinkle_phase = 1.0;
        star.twinkle_speed = TAU;
        let mut stars = vec![star];
        let mut samples = Vec::new();
        for _ in 0..5 {
            update_stars(&mut stars, 1200.0, 800.0);
            samples.push(stars[0].scintillation());
        }
        let min = samples.iter().cloned().fold(f32::MAX, f32::min);
        let max = samples.iter().cloned().fold(f32::MIN, f32::max);
        assert!(max - min > 0.01, "flicker repeated every turn: {:?}", samples);
    }

    #[test]
    fn star_inside_bounds_just_moves() {
        let mut stars = vec![star_at(100.0, 100.0, Vec2::new(0.5, -0.25))];
        update_stars(&mut stars, 1200.0, 800.0);
        assert_eq!(stars[0].pos, Vec2::new(100.5, 99.75));
        assert!((stars[0].twinkle_phase - 0.01).abs() < 1e-6);
    }

    #[test]
    fn nebula_wraps_by_its_radius() {
        let mut clouds = vec![NebulaCloud {
            pos: Vec2::new(1200.0 + 301.0, 200.0),
            radius: 300.0,
            color: Rgb(90, 60, 180),
            base_opacity: 0.12,
            velocity: Vec2::new(0.05, 0.0),
            pulse_phase: 0.0,
            pulse_speed: 0.004,
        }];
        update_nebulas(&mut clouds, 1200.0, 800.0);
        assert_eq!(clouds[0].pos.x, -300.0);
        assert_eq!(clouds[0].pos.y, 200.0);
    }

    #[test]
    fn meteor_removed_once_past_exit_margin() {
        let mut rng = Rng::new(1);
        let mut sparks = Vec::new();
        let mut meteors = vec![meteor(790.0, 10.0)];
        // y: 790 -> 850 after six updates, still inside the margin.
        for _ in 0..6 {
            update_meteors(&mut meteors, &mut sparks, &mut rng, 800.0);
        }
        assert_eq!(meteors.len(), 1);
        assert_eq!(meteors[0].pos.y, 850.0);
        update_meteors(&mut meteors, &mut sparks, &mut rng, 800.0);
        assert!(meteors.is_empty());
    }

    #[test]
    fn life_strictly_decreases_until_removal() {
        let mut rng = Rng::new(2);
        let mut sparks = Vec::new();
        let mut meteors = vec![meteor(0.0, 0.0)];
        let mut last = meteors[0].life;
        let mut frames = 0;
        while !meteors.is_empty() {
            update_meteors(&mut meteors, &mut sparks, &mut rng, 800.0);
            if let Some(m) = meteors.first() {
                assert!(m.life < last);
                assert!(m.life > 0.0);
                last = m.life;
            }
            frames += 1;
            assert!(frames < 1000);
        }
        // 1.0 / 0.012 -> gone on the 84th update.
        assert_eq!(frames, 84);
    }

    #[test]
    fn comet_sheds_sparks_deterministically() {
        let mut rng = Rng::new(3);
        let mut sparks = Vec::new();
        let mut comets = vec![Comet {
            pos: Vec2::new(0.0, 100.0),
            velocity: Vec2::new(2.0, 0.5),
            speed: 2.06,
            trail_length: 300.0,
            life: 1.0,
            decay: 0.0025,
            color: Rgb(180, 220, 255),
            core_radius: 6.0,
            spark_timer: 0,
        }];
        for _ in 0..20 {
            update_comets(&mut comets, &mut sparks, &mut rng, 1200.0);
        }
        // Timer fires on frames 4, 8, 12, 16, 20.
        assert_eq!(sparks.len(), 5);
        assert!(sparks.iter().all(|s| s.color == Rgb(180, 220, 255)));
    }

    #[test]
    fn comet_removed_outside_horizontal_band() {
        let mut rng = Rng::new(3);
        let mut sparks = Vec::new();
        let mut comets = vec![Comet {
            pos: Vec2::new(1449.0, 100.0),
            velocity: Vec2::new(2.0, 0.0),
            speed: 2.0,
            trail_length: 300.0,
            life: 1.0,
            decay: 0.0025,
            color: Rgb::WHITE,
            core_radius: 6.0,
            spark_timer: 0,
        }];
        update_comets(&mut comets, &mut sparks, &mut rng, 1200.0);
        assert!(comets.is_empty());
    }

    #[test]
    fn meteor_sparks_inherit_color() {
        let mut rng = Rng::new(4);
        let mut sparks = Vec::new();
        let mut m = meteor(0.0, 1.0);
        m.color = Rgb(220, 235, 255);
        let mut meteors = vec![m];
        for _ in 0..60 {
            update_meteors(&mut meteors, &mut sparks, &mut rng, 800.0);
        }
        assert!(!sparks.is_empty());
        assert!(sparks.iter().all(|s| s.color == Rgb(220, 235, 255)));
    }

    #[test]
    fn sparks_drift_down_and_expire() {
        let mut sparks = vec![Spark {
            pos: Vec2::ZERO,
            velocity: Vec2::ZERO,
            life: 0.1,
            decay: 0.04,
            size: 1.0,
            color: Rgb::WHITE,
        }];
        update_sparks(&mut sparks);
        assert!((sparks[0].velocity.y - SPARK_GRAVITY).abs() < 1e-6);
        update_sparks(&mut sparks);
        assert_eq!(sparks.len(), 1);
        update_sparks(&mut sparks);
        assert!(sparks.is_empty());
    }
}
