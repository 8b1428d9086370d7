//! Bead colours
//!
//! 8-bit RGB triples. Merging two beads averages their colours channel by
//! channel with integer truncation.

use rand::Rng;

/// An 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Packed `0xRRGGBB` value
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Random colour with every channel in `1..=255`
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            r: rng.random_range(1..=255),
            g: rng.random_range(1..=255),
            b: rng.random_range(1..=255),
        }
    }

    /// Componentwise average, truncated
    pub fn blend(self, other: Rgb) -> Rgb {
        #[inline]
        fn avg(a: u8, b: u8) -> u8 {
            ((a as u16 + b as u16) / 2) as u8
        }
        Rgb {
            r: avg(self.r, other.r),
            g: avg(self.g, other.g),
            b: avg(self.b, other.b),
        }
    }

    /// Normalized RGBA for the GPU (alpha = 1)
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_blend_averages_channels() {
        let a = Rgb::new(200, 0, 0);
        let b = Rgb::new(0, 0, 100);
        assert_eq!(a.blend(b), Rgb::new(100, 0, 50));
        assert_eq!(b.blend(a), Rgb::new(100, 0, 50));
    }

    #[test]
    fn test_blend_truncates() {
        let a = Rgb::new(255, 1, 3);
        let b = Rgb::new(254, 0, 0);
        assert_eq!(a.blend(b), Rgb::new(254, 0, 1));
    }

    #[test]
    fn test_hex_conversion() {
        let c = Rgb::from_hex(0x4BA6A6);
        assert_eq!(c, Rgb::new(0x4B, 0xA6, 0xA6));
        assert_eq!(c.to_hex(), 0x4BA6A6);
        assert_eq!(c.to_string(), "#4BA6A6");
    }

    #[test]
    fn test_random_channels_nonzero() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let c = Rgb::random(&mut rng);
            assert!(c.r >= 1 && c.g >= 1 && c.b >= 1);
        }
    }

    #[test]
    fn test_rgba_f32() {
        assert_eq!(Rgb::WHITE.to_rgba_f32(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Rgb::BLACK.to_rgba_f32(), [0.0, 0.0, 0.0, 1.0]);
    }
}
