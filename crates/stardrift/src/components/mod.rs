pub mod color;
pub mod layer;
pub mod nebula;
pub mod spectral;
pub mod star;
pub mod transient;
