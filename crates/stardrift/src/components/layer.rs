/// Parallax layer: the depth bucket a star belongs to.
///
/// Ordered far to near: `Distant < Mid < Near`. Nearer layers get larger,
/// brighter stars that drift faster, and only `Mid` and above get a halo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum ParallaxLayer {
    #[default]
    Distant = 0,
    Mid = 1,
    Near = 2,
}

impl ParallaxLayer {
    /// Total number of parallax layers.
    pub const COUNT: usize = 3;

    pub const ALL: [ParallaxLayer; 3] = [Self::Distant, Self::Mid, Self::Near];

    /// Whether stars on this layer are drawn with a soft halo.
    pub fn has_halo(self) -> bool {
        self >= Self::Mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_far_to_near() {
        assert!(ParallaxLayer::Distant < ParallaxLayer::Mid);
        assert!(ParallaxLayer::Mid < ParallaxLayer::Near);
    }

    #[test]
    fn halo_starts_at_mid() {
        assert!(!ParallaxLayer::Distant.has_halo());
        assert!(ParallaxLayer::Mid.has_halo());
        assert!(ParallaxLayer::Near.has_halo());
    }

    #[test]
    fn discriminants_index_all() {
        for (i, layer) in ParallaxLayer::ALL.into_iter().enumerate() {
            assert_eq!(layer as usize, i);
        }
        assert_eq!(ParallaxLayer::ALL.len(), ParallaxLayer::COUNT);
    }
}
