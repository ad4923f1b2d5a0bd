/// 8-bit RGB triplet used for every particle tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Attach an alpha value, clamped to [0, 1].
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba {
            rgb: self,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Fully transparent variant of this color (for gradient tails).
    pub fn transparent(self) -> Rgba {
        self.with_alpha(0.0)
    }
}

/// RGB color plus straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    /// CSS `rgba()` string, as accepted by Canvas2D fill and stroke styles.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.rgb.0, self.rgb.1, self.rgb.2, self.alpha
        )
    }
}
