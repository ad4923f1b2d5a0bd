pub mod engine;
pub mod fade;
pub mod scene;
pub mod time;
