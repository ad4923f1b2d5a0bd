//! Initial populations of persistent particles.
//!
//! All generators are pure given `(width, height, rng)`: they read no
//! engine state, so the engine can discard and regenerate on resize.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::components::color::Rgb;
use crate::components::layer::ParallaxLayer;
use crate::components::nebula::NebulaCloud;
use crate::components::spectral::SpectralClass;
use crate::components::star::Star;
use crate::systems::rng::Rng;

/// Per-layer generation parameters.
#[derive(Debug, Clone, Copy)]
pub struct LayerProfile {
    pub layer: ParallaxLayer,
    /// Viewport area per star.
    pub area_per_star: f32,
    pub radius: (f32, f32),
    pub opacity: (f32, f32),
    pub twinkle_speed: (f32, f32),
    pub twinkle_intensity: (f32, f32),
    /// Max drift per axis, units per frame.
    pub drift: f32,
}

pub const LAYER_PROFILES: [LayerProfile; ParallaxLayer::COUNT] = [
    LayerProfile {
        layer: ParallaxLayer::Distant,
        area_per_star: 6_000.0,
        radius: (0.3, 0.8),
        opacity: (0.2, 0.5),
        twinkle_speed: (0.005, 0.015),
        twinkle_intensity: (0.1, 0.3),
        drift: 0.02,
    },
    LayerProfile {
        layer: ParallaxLayer::Mid,
        area_per_star: 20_000.0,
        radius: (0.8, 1.4),
        opacity: (0.4, 0.7),
        twinkle_speed: (0.01, 0.025),
        twinkle_intensity: (0.2, 0.4),
        drift: 0.05,
    },
    LayerProfile {
        layer: ParallaxLayer::Near,
        area_per_star: 70_000.0,
        radius: (1.4, 2.4),
        opacity: (0.6, 1.0),
        twinkle_speed: (0.015, 0.03),
        twinkle_intensity: (0.3, 0.5),
        drift: 0.1,
    },
];

/// Near-layer stars above this radius get diffraction spikes.
pub const SPIKE_RADIUS_THRESHOLD: f32 = 2.0;
/// Spike arm length as a multiple of radius.
const SPIKE_LENGTH_FACTOR: (f32, f32) = (4.0, 7.0);

const CLUSTER_COUNT: (u32, u32) = (2, 3);
const CLUSTER_MEMBERS: (u32, u32) = (12, 27);
const CLUSTER_RADIUS: f32 = 100.0;

pub const NEBULA_PALETTE: [Rgb; 5] = [
    Rgb(90, 60, 180),
    Rgb(50, 90, 200),
    Rgb(160, 60, 140),
    Rgb(40, 140, 160),
    Rgb(180, 80, 90),
];
const NEBULA_COUNT: (u32, u32) = (2, 3);
const NEBULA_RADIUS: (f32, f32) = (200.0, 600.0);
const NEBULA_OPACITY: (f32, f32) = (0.10, 0.18);
const NEBULA_DRIFT: f32 = 0.05;
const NEBULA_PULSE_SPEED: (f32, f32) = (0.002, 0.006);

/// A group of stars placed densely around one center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarCluster {
    pub center: Vec2,
    pub members: usize,
}

/// Generated star population: field stars first, cluster members after.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarSet {
    pub stars: Vec<Star>,
    pub clusters: Vec<StarCluster>,
}

impl StarSet {
    /// Stars that belong to clusters (the tail of `stars`).
    pub fn cluster_members(&self) -> usize {
        self.clusters.iter().map(|c| c.members).sum()
    }
}

/// Density-scaled field count for one layer.
pub fn layer_star_count(profile: &LayerProfile, width: f32, height: f32) -> usize {
    (width * height / profile.area_per_star).floor().max(0.0) as usize
}

/// Draw a spectral tint by rarity weight.
pub fn pick_spectral_color(rng: &mut Rng) -> Rgb {
    SpectralClass::pick(rng).rgb()
}

/// Generate field stars for every parallax layer plus 2-3 clusters.
/// Returns an empty set for a non-positive viewport.
pub fn generate_stars(width: f32, height: f32, rng: &mut Rng) -> StarSet {
    if !(width > 0.0 && height > 0.0) {
        return StarSet::default();
    }

    let mut set = StarSet::default();
    for profile in &LAYER_PROFILES {
        let count = layer_star_count(profile, width, height);
        set.stars.reserve(count);
        for _ in 0..count {
            let pos = Vec2::new(rng.range(0.0, width), rng.range(0.0, height));
            set.stars.push(field_star(profile, pos, rng));
        }
    }

    let clusters = rng.range_inclusive(CLUSTER_COUNT.0, CLUSTER_COUNT.1);
    for _ in 0..clusters {
        let center = Vec2::new(rng.range(0.0, width), rng.range(0.0, height));
        let members = rng.range_inclusive(CLUSTER_MEMBERS.0, CLUSTER_MEMBERS.1) as usize;
        // Members share one drift so the cluster holds together.
        let drift = LAYER_PROFILES[ParallaxLayer::Mid as usize].drift;
        let velocity = Vec2::new(rng.range(-drift, drift), rng.range(-drift, drift) * 0.5);
        for _ in 0..members {
            let angle = rng.range(0.0, TAU);
            // sqrt(U) on the radius: denser toward the center.
            let r = rng.next_f32().sqrt() * CLUSTER_RADIUS;
            let pos = Vec2::new(
                (center.x + angle.cos() * r).clamp(0.0, width),
                (center.y + angle.sin() * r).clamp(0.0, height),
            );
            set.stars.push(cluster_star(pos, velocity, rng));
        }
        set.clusters.push(StarCluster { center, members });
    }

    log::debug!(
        "generated {} stars ({} in {} clusters) for {}x{}",
        set.stars.len(),
        set.cluster_members(),
        set.clusters.len(),
        width,
        height
    );
    set
}

fn field_star(profile: &LayerProfile, pos: Vec2, rng: &mut Rng) -> Star {
    let radius = rng.range(profile.radius.0, profile.radius.1);
    let spike_length = if profile.layer == ParallaxLayer::Near && radius > SPIKE_RADIUS_THRESHOLD {
        Some(radius * rng.range(SPIKE_LENGTH_FACTOR.0, SPIKE_LENGTH_FACTOR.1))
    } else {
        None
    };
    Star {
        pos,
        radius,
        layer: profile.layer,
        base_opacity: rng.range(profile.opacity.0, profile.opacity.1),
        color: pick_spectral_color(rng),
        velocity: Vec2::new(
            rng.range(-profile.drift, profile.drift),
            rng.range(-profile.drift, profile.drift) * 0.5,
        ),
        twinkle_phase: rng.range(0.0, TAU),
        twinkle_speed: rng.range(profile.twinkle_speed.0, profile.twinkle_speed.1),
        twinkle_intensity: rng.range(profile.twinkle_intensity.0, profile.twinkle_intensity.1),
        spike_length,
    }
}

fn cluster_star(pos: Vec2, velocity: Vec2, rng: &mut Rng) -> Star {
    let profile = &LAYER_PROFILES[ParallaxLayer::Mid as usize];
    Star {
        pos,
        radius: rng.range(0.5, 1.2),
        layer: ParallaxLayer::Mid,
        base_opacity: rng.range(0.4, 0.8),
        color: pick_spectral_color(rng),
        velocity,
        twinkle_phase: rng.range(0.0, TAU),
        twinkle_speed: rng.range(profile.twinkle_speed.0, profile.twinkle_speed.1),
        twinkle_intensity: rng.range(profile.twinkle_intensity.0, profile.twinkle_intensity.1),
        spike_length: None,
    }
}

/// Generate 2-3 nebula clouds. Returns nothing for a non-positive viewport.
pub fn generate_nebulas(width: f32, height: f32, rng: &mut Rng) -> Vec<NebulaCloud> {
    if !(width > 0.0 && height > 0.0) {
        return Vec::new();
    }
    let count = rng.range_inclusive(NEBULA_COUNT.0, NEBULA_COUNT.1);
    (0..count)
        .map(|_| NebulaCloud {
            pos: Vec2::new(rng.range(0.0, width), rng.range(0.0, height)),
            radius: rng.range(NEBULA_RADIUS.0, NEBULA_RADIUS.1),
            color: *rng.pick(&NEBULA_PALETTE),
            base_opacity: rng.range(NEBULA_OPACITY.0, NEBULA_OPACITY.1),
            velocity: Vec2::new(
                rng.range(-NEBULA_DRIFT, NEBULA_DRIFT),
                rng.range(-NEBULA_DRIFT, NEBULA_DRIFT),
            ),
            pulse_phase: rng.range(0.0, TAU),
            pulse_speed: rng.range(NEBULA_PULSE_SPEED.0, NEBULA_PULSE_SPEED.1),
        })
        .collect()
}
