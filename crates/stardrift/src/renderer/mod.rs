pub mod recording;
pub mod traits;

// Re-export key types for convenient access
pub use recording::{DrawCommand, RecordingSurface};
pub use traits::{ColorStop, LinearGradient, Paint, RadialGradient, Surface};
