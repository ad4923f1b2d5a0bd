//! Spectral classes for star tinting, loosely modeled on stellar classification.
//! Each class carries a display color and a rarity weight.

use super::color::Rgb;
use crate::systems::rng::Rng;

/// 8 spectral classes, hottest to coolest, plus carbon stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SpectralClass {
    O = 0,
    B,
    A,
    F,
    G,
    K,
    M,
    Carbon,
}

impl SpectralClass {
    pub const ALL: [SpectralClass; 8] = [
        Self::O, Self::B, Self::A, Self::F,
        Self::G, Self::K, Self::M, Self::Carbon,
    ];

    /// Class used when a draw lands past the cumulative sum through rounding.
    pub const FALLBACK: SpectralClass = SpectralClass::G;

    pub fn rgb(&self) -> Rgb {
        match self {
            Self::O =>      Rgb(155, 176, 255),
            Self::B =>      Rgb(170, 191, 255),
            Self::A =>      Rgb(202, 215, 255),
            Self::F =>      Rgb(248, 247, 255),
            Self::G =>      Rgb(255, 244, 234),
            Self::K =>      Rgb(255, 210, 161),
            Self::M =>      Rgb(255, 204, 111),
            Self::Carbon => Rgb(255, 150, 110),
        }
    }

    /// Selection weight. The table sums to exactly 1.0 in decimal.
    pub fn weight(&self) -> f32 {
        match self {
            Self::O =>      0.02,
            Self::B =>      0.05,
            Self::A =>      0.10,
            Self::F =>      0.15,
            Self::G =>      0.25,
            Self::K =>      0.23,
            Self::M =>      0.15,
            Self::Carbon => 0.05,
        }
    }

    /// Cumulative-probability sampling against one uniform draw.
    pub fn pick(rng: &mut Rng) -> Self {
        Self::from_draw(rng.next_f32())
    }

    /// Map a uniform draw in [0, 1) onto a class.
    pub fn from_draw(draw: f32) -> Self {
        let mut cumulative = 0.0;
        for class in Self::ALL {
            cumulative += class.weight();
            if draw < cumulative {
                return class;
            }
        }
        Self::FALLBACK
    }
}
