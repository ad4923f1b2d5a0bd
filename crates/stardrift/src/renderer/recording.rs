use glam::Vec2;

use super::traits::{Paint, Surface};
use crate::api::types::SurfaceSize;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    FillDisk { center: Vec2, radius: f32, paint: Paint },
    StrokeLine { from: Vec2, to: Vec2, width: f32, paint: Paint },
}

/// Surface that records every call instead of rasterizing.
/// Used by tests and by hosts that replay frames elsewhere.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    pub size: Option<SurfaceSize>,
    pub resize_count: u32,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop recorded commands (keeps the size).
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of calls that put pixels on the surface (clears included).
    pub fn draw_call_count(&self) -> usize {
        self.commands.len()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, size: SurfaceSize) {
        self.size = Some(size);
        self.resize_count += 1;
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_disk(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::FillDisk { center, radius, paint: paint.clone() });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: &Paint) {
        self.commands.push(DrawCommand::StrokeLine { from, to, width, paint: paint.clone() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::color::Rgb;

    #[test]
    fn records_in_call_order() {
        let mut surface = RecordingSurface::new();
        surface.clear(10.0, 10.0);
        surface.fill_disk(Vec2::ONE, 2.0, &Paint::Solid(Rgb::WHITE.with_alpha(1.0)));
        assert_eq!(surface.draw_call_count(), 2);
        assert!(matches!(surface.commands[0], DrawCommand::Clear { .. }));
        assert!(matches!(surface.commands[1], DrawCommand::FillDisk { .. }));
        assert_eq!(surface.take().len(), 2);
        assert_eq!(surface.draw_call_count(), 0);
    }
}
