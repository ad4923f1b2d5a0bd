//! Time-gated, probability-gated creation of meteors and comets.

use glam::Vec2;

use crate::api::config::{DelayWindow, EngineConfig, SpawnWindows};
use crate::components::color::Rgb;
use crate::components::transient::{Comet, Meteor, COMET_EXIT_MARGIN};
use crate::systems::rng::Rng;

/// Concurrent meteor cap.
pub const MAX_METEORS: usize = 2;
/// Concurrent comet cap.
pub const MAX_COMETS: usize = 1;
/// Nothing spawns while the scene is fading in below this opacity.
pub const SPAWN_OPACITY_THRESHOLD: f32 = 0.5;

pub const METEOR_PALETTE: [Rgb; 3] = [Rgb(255, 255, 255), Rgb(220, 235, 255), Rgb(255, 245, 225)];
pub const COMET_PALETTE: [Rgb; 2] = [Rgb(180, 220, 255), Rgb(200, 255, 230)];

const METEOR_ANGLE_DEG: (f32, f32) = (45.0, 25.0);
const METEOR_SPEED: (f32, f32) = (8.0, 16.0);
const METEOR_TRAIL: (f32, f32) = (80.0, 200.0);
const METEOR_DECAY: (f32, f32) = (0.012, 0.020);
const METEOR_OPACITY: (f32, f32) = (0.7, 1.0);
/// Horizontal overscan on either side of the viewport, as a width fraction.
const METEOR_OVERSCAN: f32 = 0.1;

const COMET_SPEED: (f32, f32) = (1.5, 3.0);
const COMET_TRAIL: (f32, f32) = (250.0, 450.0);
const COMET_DECAY: (f32, f32) = (0.002, 0.003);
const COMET_CORE: (f32, f32) = (5.0, 8.0);
/// Comets enter this far outside the edge, inside the removal band.
const COMET_ENTRY_OFFSET: f32 = COMET_EXIT_MARGIN - 50.0;

/// Independent randomized delay for one transient kind.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    windows: SpawnWindows,
    last_ms: Option<f64>,
    delay_ms: f64,
}

impl SpawnTimer {
    pub fn new(windows: SpawnWindows, rng: &mut Rng) -> Self {
        Self {
            windows,
            last_ms: None,
            delay_ms: roll(&windows.initial, rng),
        }
    }

    /// Whether the current delay has elapsed. The first call starts the clock.
    pub fn is_due(&mut self, now_ms: f64) -> bool {
        let last = *self.last_ms.get_or_insert(now_ms);
        now_ms - last > self.delay_ms
    }

    /// Record a spawn at `now_ms` and re-roll from the interval window.
    pub fn restart(&mut self, now_ms: f64, rng: &mut Rng) {
        self.last_ms = Some(now_ms);
        self.delay_ms = roll(&self.windows.interval, rng);
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }
}

fn roll(window: &DelayWindow, rng: &mut Rng) -> f64 {
    rng.range_f64(window.min_ms, window.max_ms)
}

/// Meteor and comet timers.
#[derive(Debug, Clone)]
pub struct Spawner {
    pub meteor: SpawnTimer,
    pub comet: SpawnTimer,
}

impl Spawner {
    pub fn new(config: &EngineConfig, rng: &mut Rng) -> Self {
        Self {
            meteor: SpawnTimer::new(config.meteors, rng),
            comet: SpawnTimer::new(config.comets, rng),
        }
    }

    /// Spawn at most one meteor and one comet if their gates are open.
    pub fn tick(
        &mut self,
        now_ms: f64,
        global_opacity: f32,
        width: f32,
        height: f32,
        meteors: &mut Vec<Meteor>,
        comets: &mut Vec<Comet>,
        rng: &mut Rng,
    ) {
        // Timers start on the first tick regardless of the gates below.
        let meteor_due = self.meteor.is_due(now_ms);
        let comet_due = self.comet.is_due(now_ms);
        if global_opacity <= SPAWN_OPACITY_THRESHOLD {
            return;
        }

        if meteor_due && meteors.len() < MAX_METEORS {
            let meteor = create_meteor(width, height, rng);
            log::debug!("meteor spawned at ({:.0}, {:.0})", meteor.pos.x, meteor.pos.y);
            meteors.push(meteor);
            self.meteor.restart(now_ms, rng);
        }
        if comet_due && comets.len() < MAX_COMETS {
            let comet = create_comet(width, height, rng);
            log::debug!("comet spawned at ({:.0}, {:.0})", comet.pos.x, comet.pos.y);
            comets.push(comet);
            self.comet.restart(now_ms, rng);
        }
    }
}

/// A meteor entering near the top edge, heading down-right at 45° ± 25°.
pub fn create_meteor(width: f32, height: f32, rng: &mut Rng) -> Meteor {
    let x = rng.range(-METEOR_OVERSCAN * width, (1.0 + METEOR_OVERSCAN) * width);
    let y = rng.range(-20.0, 0.1 * height);
    let angle = rng
        .range(METEOR_ANGLE_DEG.0 - METEOR_ANGLE_DEG.1, METEOR_ANGLE_DEG.0 + METEOR_ANGLE_DEG.1)
        .to_radians();
    let speed = rng.range(METEOR_SPEED.0, METEOR_SPEED.1);
    Meteor {
        pos: Vec2::new(x, y),
        velocity: Vec2::from_angle(angle) * speed,
        speed,
        trail_length: rng.range(METEOR_TRAIL.0, METEOR_TRAIL.1),
        opacity: rng.range(METEOR_OPACITY.0, METEOR_OPACITY.1),
        life: 1.0,
        decay: rng.range(METEOR_DECAY.0, METEOR_DECAY.1),
        color: *rng.pick(&METEOR_PALETTE),
        spark_timer: 0,
    }
}

/// A comet entering from the left or right in the top 40% of the scene,
/// aimed at a point on the opposite side between 40% and 80% of the height.
pub fn create_comet(width: f32, height: f32, rng: &mut Rng) -> Comet {
    let from_left = rng.chance(0.5);
    let (start_x, target_x) = if from_left {
        (-COMET_ENTRY_OFFSET, width + COMET_ENTRY_OFFSET)
    } else {
        (width + COMET_ENTRY_OFFSET, -COMET_ENTRY_OFFSET)
    };
    let start = Vec2::new(start_x, rng.range(0.0, 0.4 * height));
    let target = Vec2::new(target_x, rng.range(0.4 * height, 0.8 * height));
    let speed = rng.range(COMET_SPEED.0, COMET_SPEED.1);
    let direction = (target - start).normalize_or(Vec2::X);
    Comet {
        pos: start,
        velocity: direction * speed,
        speed,
        trail_length: rng.range(COMET_TRAIL.0, COMET_TRAIL.1),
        life: 1.0,
        decay: rng.range(COMET_DECAY.0, COMET_DECAY.1),
        color: *rng.pick(&COMET_PALETTE),
        core_radius: rng.range(COMET_CORE.0, COMET_CORE.1),
        spark_timer: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawner(rng: &mut Rng) -> Spawner {
        Spawner::new(&EngineConfig::default(), rng)
    }

    #[test]
    fn initial_delays_fall_in_initial_windows() {
        let mut rng = Rng::new(8);
        for _ in 0..100 {
            let s = spawner(&mut rng);
            assert!((3_000.0..8_000.0).contains(&s.meteor.delay_ms()));
            assert!((15_000.0..35_000.0).contains(&s.comet.delay_ms()));
        }
    }

    #[test]
    fn nothing_spawns_before_delay() {
        let mut rng = Rng::new(1);
        let mut s = spawner(&mut rng);
        let (mut meteors, mut comets) = (Vec::new(), Vec::new());
        s.tick(0.0, 1.0, 1200.0, 800.0, &mut meteors, &mut comets, &mut rng);
        s.tick(2_999.0, 1.0, 1200.0, 800.0, &mut meteors, &mut comets, &mut rng);
        assert!(meteors.is_empty());
        assert!(comets.is_empty());
    }

    #[test]
    fn spawns_after_delay_and_rerolls_interval() {
        let mut rng = Rng::new(2);
        let mut s = spawner(&mut rng);
        let (mut meteors, mut comets) = (Vec::new(), Vec::new());
        s.tick(0.0, 1.0, 1200.0, 800.0, &mut meteors, &mut comets, &mut rng);
        s.tick(8_001.0, 1.0, 1200.0, 800.0, &mut meteors, &mut comets, &mut rng);
        assert_eq!(meteors.len(), 1);
        assert!((4_000.0..12_000.0).contains(&s.meteor.delay_ms()));
        s.tick(35_001.0, 1.0, 1200.0, 800.0, &mut meteors, &mut comets, &mut rng);
        assert_eq!(comets.len(), 1);
        assert!((20_000.0..45_000.0).contains(&s.comet.delay_ms()));
    }

    #[test]
    fn low_opacity_blocks_spawning() {
        let mut rng = Rng::new(3);
        let mut s = spawner(&mut rng);
        let (mut meteors, mut comets) = (Vec::new(), Vec::new());
        s.tick(0.0, 0.5, 1200.0, 800.0, &mut meteors, &mut comets, &mut rng);
        s.tick(100_000.0, 0.5, 1200.0, 800.0, &mut meteors, &mut comets, &mut rng);
        assert!(meteors.is_empty() && comets.is_empty());
        s.tick(100_016.0, 0.51, 1200.0, 800.0, &mut meteors, &mut comets, &mut rng);
        assert_eq!(meteors.len(), 1);
        assert_eq!(comets.len(), 1);
    }

    #[test]
    fn caps_are_never_exceeded() {
        let mut rng = Rng::new(4);
        let mut s = spawner(&mut rng);
        let (mut meteors, mut comets) = (Vec::new(), Vec::new());
        let mut now = 0.0;
        for _ in 0..2_000 {
            now += 50_000.0;
            s.tick(now, 1.0, 1200.0, 800.0, &mut meteors, &mut comets, &mut rng);
            assert!(meteors.len() <= MAX_METEORS);
            assert!(comets.len() <= MAX_COMETS);
        }
        assert_eq!(meteors.len(), MAX_METEORS);
        assert_eq!(comets.len(), MAX_COMETS);
    }

    #[test]
    fn meteor_parameters_in_range() {
        let mut rng = Rng::new(5);
        for _ in 0..500 {
            let m = create_meteor(1000.0, 600.0, &mut rng);
            assert!(m.pos.x >= -100.0 && m.pos.x <= 1100.0);
            assert!((8.0..16.0).contains(&m.speed));
            assert!((m.velocity.length() - m.speed).abs() < 1e-3);
            let angle = m.velocity.y.atan2(m.velocity.x).to_degrees();
            assert!(angle >= 20.0 - 1e-3 && angle <= 70.0 + 1e-3, "angle {}", angle);
            assert_eq!(m.life, 1.0);
            assert!((0.012..0.020).contains(&m.decay));
            assert!(METEOR_PALETTE.contains(&m.color));
        }
    }

    #[test]
    fn comets_cross_toward_the_opposite_side() {
        let mut rng = Rng::new(6);
        let mut saw_left = false;
        let mut saw_right = false;
        for _ in 0..200 {
            let c = create_comet(1000.0, 600.0, &mut rng);
            assert!(c.pos.y >= 0.0 && c.pos.y <= 240.0);
            assert!(c.velocity.y > 0.0, "comet should descend");
            if c.pos.x < 0.0 {
                saw_left = true;
                assert!(c.velocity.x > 0.0);
            } else {
                saw_right = true;
                assert!(c.velocity.x < 0.0);
            }
            assert!(c.is_alive(1000.0));
            assert!((1.5..3.0).contains(&c.speed));
            assert!((5.0..8.0).contains(&c.core_radius));
            assert!((0.002..0.003).contains(&c.decay));
        }
        assert!(saw_left && saw_right);
    }
}
