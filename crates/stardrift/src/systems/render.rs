//! Draws a `SkyScene` onto a `Surface` in fixed layer order:
//! nebulae, stars, sparks, meteors, comets. Every alpha is premultiplied
//! by the global fade so the whole composition fades together.

use glam::Vec2;

use crate::components::color::Rgb;
use crate::components::layer::ParallaxLayer;
use crate::core::scene::SkyScene;
use crate::renderer::traits::{ColorStop, LinearGradient, Paint, RadialGradient, Surface};

const HALO_RADIUS_FACTOR: f32 = 2.2;
const HALO_OPACITY_FACTOR: f32 = 0.3;
/// Stars dimmer than this skip their diffraction spikes.
const SPIKE_OPACITY_THRESHOLD: f32 = 0.5;
const SPIKE_WIDTH: f32 = 0.5;
const SPIKE_OPACITY_FACTOR: f32 = 0.5;

const METEOR_WIDTH: f32 = 1.8;
const METEOR_HEAD_RADIUS: f32 = 1.6;
const COMET_TAIL_WIDTH_FACTOR: f32 = 0.9;
const COMET_GLOW_FACTOR: f32 = 3.0;

/// Clear the surface and draw every layer.
pub fn render_scene<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &SkyScene,
    width: f32,
    height: f32,
    global: f32,
) {
    surface.clear(width, height);
    draw_nebulas(surface, scene, global);
    draw_stars(surface, scene, global);
    draw_sparks(surface, scene, global);
    draw_meteors(surface, scene, global);
    draw_comets(surface, scene, global);
}

fn draw_nebulas<S: Surface + ?Sized>(surface: &mut S, scene: &SkyScene, global: f32) {
    for cloud in &scene.nebulas {
        let a = cloud.opacity(global);
        let stops = vec![
            ColorStop::new(0.0, cloud.color.with_alpha(a)),
            ColorStop::new(0.25, cloud.color.with_alpha(a * 0.7)),
            ColorStop::new(0.5, cloud.color.with_alpha(a * 0.4)),
            ColorStop::new(0.75, cloud.color.with_alpha(a * 0.15)),
            ColorStop::new(1.0, cloud.color.transparent()),
        ];
        let paint = Paint::Radial(RadialGradient { center: cloud.pos, radius: cloud.radius, stops });
        surface.fill_disk(cloud.pos, cloud.radius, &paint);
    }
}

fn draw_stars<S: Surface + ?Sized>(surface: &mut S, scene: &SkyScene, global: f32) {
    for star in &scene.stars {
        let a = star.opacity(global);
        if star.layer.has_halo() {
            let halo = Paint::Solid(star.color.with_alpha(a * HALO_OPACITY_FACTOR));
            surface.fill_disk(star.pos, star.radius * HALO_RADIUS_FACTOR, &halo);
        }
        surface.fill_disk(star.pos, star.radius, &Paint::Solid(star.color.with_alpha(a)));

        if let Some(len) = star.spike_length {
            if star.layer == ParallaxLayer::Near && a > SPIKE_OPACITY_THRESHOLD {
                let paint = Paint::Solid(star.color.with_alpha(a * SPIKE_OPACITY_FACTOR));
                let (h, v) = (Vec2::new(len, 0.0), Vec2::new(0.0, len));
                surface.stroke_line(star.pos - h, star.pos + h, SPIKE_WIDTH, &paint);
                surface.stroke_line(star.pos - v, star.pos + v, SPIKE_WIDTH, &paint);
            }
        }
    }
}

fn draw_sparks<S: Surface + ?Sized>(surface: &mut S, scene: &SkyScene, global: f32) {
    for spark in scene.sparks.iter().rev() {
        let paint = Paint::Solid(spark.color.with_alpha(spark.life * global));
        surface.fill_disk(spark.pos, spark.size, &paint);
    }
}

fn draw_meteors<S: Surface + ?Sized>(surface: &mut S, scene: &SkyScene, global: f32) {
    for meteor in &scene.meteors {
        let a = meteor.opacity * meteor.life * global;
        let tail = meteor.pos - meteor.velocity.normalize_or_zero() * meteor.trail_length;
        let paint = Paint::Linear(LinearGradient {
            start: tail,
            end: meteor.pos,
            stops: vec![
                ColorStop::new(0.0, meteor.color.transparent()),
                ColorStop::new(0.7, meteor.color.with_alpha(a * 0.35)),
                ColorStop::new(1.0, Rgb::WHITE.with_alpha(a)),
            ],
        });
        surface.stroke_line(tail, meteor.pos, METEOR_WIDTH, &paint);
        surface.fill_disk(meteor.pos, METEOR_HEAD_RADIUS, &Paint::Solid(Rgb::WHITE.with_alpha(a)));
    }
}

fn draw_comets<S: Surface + ?Sized>(surface: &mut S, scene: &SkyScene, global: f32) {
    for comet in &scene.comets {
        let a = comet.life * global;
        let tail = comet.pos - comet.velocity.normalize_or_zero() * comet.trail_length;
        let paint = Paint::Linear(LinearGradient {
            start: tail,
            end: comet.pos,
            stops: vec![
                ColorStop::new(0.0, comet.color.transparent()),
                ColorStop::new(0.6, comet.color.with_alpha(a * 0.25)),
                ColorStop::new(1.0, comet.color.with_alpha(a * 0.7)),
            ],
        });
        surface.stroke_line(tail, comet.pos, comet.core_radius * COMET_TAIL_WIDTH_FACTOR, &paint);

        let glow = comet.core_radius * COMET_GLOW_FACTOR;
        let core = Paint::Radial(RadialGradient {
            center: comet.pos,
            radius: glow,
            stops: vec![
                ColorStop::new(0.0, Rgb::WHITE.with_alpha(a)),
                ColorStop::new(0.2, comet.color.with_alpha(a * 0.8)),
                ColorStop::new(0.5, comet.color.with_alpha(a * 0.3)),
                ColorStop::new(1.0, comet.color.transparent()),
            ],
        });
        surface.fill_disk(comet.pos, glow, &core);
    }
}
