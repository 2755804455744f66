//! Vector shapes (total register width in bits)

use std::fmt;

use crate::config::PlatformConfig;
use crate::{LaneError, Result};

/// Total bit width of a vector
///
/// The fixed shapes are always available: operations on shapes wider than
/// the hardware registers are carried out lane by lane. [`Shape::Max`] is the
/// widest shape of the running platform, resolved once per process through
/// [`PlatformConfig::global`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// 64-bit vectors
    S64,
    /// 128-bit vectors (SSE2, NEON, SIMD128)
    S128,
    /// 256-bit vectors (AVX, AVX2)
    S256,
    /// 512-bit vectors (AVX-512)
    S512,
    /// 1024-bit vectors
    S1024,
    /// Widest shape available on this platform
    Max,
}

impl Shape {
    /// Shapes with a fixed width, narrowest first
    pub const FIXED: [Shape; 5] = [
        Shape::S64,
        Shape::S128,
        Shape::S256,
        Shape::S512,
        Shape::S1024,
    ];

    /// Width in bits
    ///
    /// # Examples
    ///
    /// ```
    /// use trueno_lanes::Shape;
    ///
    /// assert_eq!(Shape::S256.bits(), 256);
    /// assert!(Shape::Max.bits() >= 128);
    /// ```
    pub fn bits(self) -> usize {
        match self {
            Shape::S64 => 64,
            Shape::S128 => 128,
            Shape::S256 => 256,
            Shape::S512 => 512,
            Shape::S1024 => 1024,
            Shape::Max => PlatformConfig::global().max_bits(),
        }
    }

    /// Fixed shape with the given width
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnsupportedShape`] for widths outside
    /// 64/128/256/512/1024.
    pub fn from_bits(bits: usize) -> Result<Self> {
        Shape::FIXED
            .iter()
            .copied()
            .find(|shape| shape.bits() == bits)
            .ok_or(LaneError::UnsupportedShape { bits })
    }

    /// Conventional shape name, e.g. `S_128_BIT`
    pub fn name(self) -> &'static str {
        match self {
            Shape::S64 => "S_64_BIT",
            Shape::S128 => "S_128_BIT",
            Shape::S256 => "S_256_BIT",
            Shape::S512 => "S_512_BIT",
            Shape::S1024 => "S_1024_BIT",
            Shape::Max => "S_Max_BIT",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_bits() {
        let bits: Vec<usize> = Shape::FIXED.iter().map(|s| s.bits()).collect();
        assert_eq!(bits, vec![64, 128, 256, 512, 1024]);
    }

    #[test]
    fn test_from_bits() {
        assert_eq!(Shape::from_bits(512), Ok(Shape::S512));
        assert_eq!(
            Shape::from_bits(96),
            Err(LaneError::UnsupportedShape { bits: 96 })
        );
        assert_eq!(
            Shape::from_bits(0),
            Err(LaneError::UnsupportedShape { bits: 0 })
        );
    }

    #[test]
    fn test_max_is_a_fixed_width() {
        assert!(Shape::from_bits(Shape::Max.bits()).is_ok());
    }

    #[test]
    fn test_names() {
        assert_eq!(Shape::S64.to_string(), "S_64_BIT");
        assert_eq!(Shape::Max.to_string(), "S_Max_BIT");
    }
}
