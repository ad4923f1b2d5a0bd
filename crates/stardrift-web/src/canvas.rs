use std::f64::consts::TAU;

use stardrift::{ColorStop, Paint, Surface, SurfaceSize};
use glam::Vec2;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("canvas has no 2d context")]
    ContextUnavailable,
    #[error("canvas context request failed: {0}")]
    Js(String),
}

/// Resolved Canvas2D fill or stroke style.
enum Style {
    Css(String),
    Gradient(CanvasGradient),
}

/// `Surface` over a `CanvasRenderingContext2d`.
///
/// Individual draw failures are logged and skipped; a bad gradient costs
/// one particle for one frame, never the loop.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|err| SurfaceError::Js(format!("{:?}", err)))?
            .ok_or(SurfaceError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }

    fn style(&self, paint: &Paint) -> Result<Style, JsValue> {
        match paint {
            Paint::Solid(color) => Ok(Style::Css(color.to_css())),
            Paint::Linear(g) => {
                let gradient = self.ctx.create_linear_gradient(
                    g.start.x as f64,
                    g.start.y as f64,
                    g.end.x as f64,
                    g.end.y as f64,
                );
                add_stops(&gradient, &g.stops)?;
                Ok(Style::Gradient(gradient))
            }
            Paint::Radial(g) => {
                let (x, y) = (g.center.x as f64, g.center.y as f64);
                let gradient = self.ctx.create_radial_gradient(x, y, 0.0, x, y, g.radius as f64)?;
                add_stops(&gradient, &g.stops)?;
                Ok(Style::Gradient(gradient))
            }
        }
    }

    fn try_fill_disk(&self, center: Vec2, radius: f32, paint: &Paint) -> Result<(), JsValue> {
        match self.style(paint)? {
            Style::Css(css) => self.ctx.set_fill_style_str(&css),
            Style::Gradient(g) => self.ctx.set_fill_style_canvas_gradient(&g),
        }
        self.ctx.begin_path();
        self.ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }

    fn try_stroke_line(&self, from: Vec2, to: Vec2, width: f32, paint: &Paint) -> Result<(), JsValue> {
        match self.style(paint)? {
            Style::Css(css) => self.ctx.set_stroke_style_str(&css),
            Style::Gradient(g) => self.ctx.set_stroke_style_canvas_gradient(&g),
        }
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_cap("round");
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        Ok(())
    }
}

fn add_stops(gradient: &CanvasGradient, stops: &[ColorStop]) -> Result<(), JsValue> {
    for stop in stops {
        gradient.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css())?;
    }
    Ok(())
}

impl Surface for CanvasSurface {
    fn resize(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.backing_width);
        self.canvas.set_height(size.backing_height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", size.width));
        let _ = style.set_property("height", &format!("{}px", size.height));
        let scale = size.scale as f64;
        if let Err(err) = self.ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0) {
            log::warn!("failed to rescale canvas context: {:?}", err);
        }
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_disk(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        if !(radius > 0.0) {
            return;
        }
        if let Err(err) = self.try_fill_disk(center, radius, paint) {
            log::debug!("fill_disk skipped: {:?}", err);
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: &Paint) {
        if let Err(err) = self.try_stroke_line(from, to, width, paint) {
            log::debug!("stroke_line skipped: {:?}", err);
        }
    }
}
