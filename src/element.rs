//! Element kinds and the per-kind lane arithmetic
//!
//! The six supported kinds share a single generic vector implementation. Each
//! kind plugs its exact scalar semantics (two's-complement wraparound for the
//! integral kinds, IEEE 754 behaviour for the floating kinds) in through the
//! sealed [`Element`] trait.

use std::fmt;

use crate::memory::ByteOrder;

/// Runtime tag naming one of the supported element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// 8-bit two's-complement integer
    Int8,
    /// 16-bit two's-complement integer
    Int16,
    /// 32-bit two's-complement integer
    Int32,
    /// 64-bit two's-complement integer
    Int64,
    /// IEEE 754 binary32
    Float32,
    /// IEEE 754 binary64
    Float64,
}

impl ElementKind {
    /// All supported kinds, narrowest integral kind first
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Int8,
        ElementKind::Int16,
        ElementKind::Int32,
        ElementKind::Int64,
        ElementKind::Float32,
        ElementKind::Float64,
    ];

    /// Width of one lane in bits
    pub const fn bits(self) -> usize {
        match self {
            ElementKind::Int8 => 8,
            ElementKind::Int16 => 16,
            ElementKind::Int32 | ElementKind::Float32 => 32,
            ElementKind::Int64 | ElementKind::Float64 => 64,
        }
    }

    /// Width of one lane in bytes
    pub const fn byte_size(self) -> usize {
        self.bits() / 8
    }

    /// Whether lanes hold IEEE 754 values
    pub const fn is_floating(self) -> bool {
        matches!(self, ElementKind::Float32 | ElementKind::Float64)
    }

    /// Lower-case name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::Int8 => "int8",
            ElementKind::Int16 => "int16",
            ElementKind::Int32 => "int32",
            ElementKind::Int64 => "int64",
            ElementKind::Float32 => "float32",
            ElementKind::Float64 => "float64",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Scalar type that can occupy a vector lane
///
/// Implemented for `i8`, `i16`, `i32`, `i64`, `f32` and `f64` only. Integral
/// arithmetic wraps modulo the lane width; floating arithmetic follows IEEE 754
/// with `min`/`max` propagating NaN and ordering `-0.0` below `0.0`.
pub trait Element:
    sealed::Sealed
    + Copy
    + fmt::Debug
    + PartialEq
    + PartialOrd
    + Default
    + Send
    + Sync
    + bytemuck::Pod
    + 'static
{
    /// Runtime tag of this kind
    const KIND: ElementKind;
    /// Lane width in bits
    const BITS: usize;
    /// Additive identity
    const ZERO: Self;
    /// Multiplicative identity
    const ONE: Self;
    /// Largest value (`+inf` for floating kinds)
    const MAX_VALUE: Self;
    /// Smallest value (`-inf` for floating kinds)
    const MIN_VALUE: Self;

    /// Accumulator type for widening reductions
    type Wide: Copy + fmt::Debug + PartialEq + Default + std::ops::Add<Output = Self::Wide>;

    /// Lossless widening into the accumulator type
    fn widen(self) -> Self::Wide;

    /// Raw lane bits, sign-extended to 64 bits
    fn to_lane_bits(self) -> i64;

    /// Lane from raw bits; bits above the lane width are discarded
    fn from_lane_bits(bits: i64) -> Self;

    /// Value conversion to `i64` (floating values truncate and saturate, NaN becomes 0)
    fn to_i64(self) -> i64;

    /// Value conversion from `i64` (integral kinds wrap, floating kinds round)
    fn from_i64(value: i64) -> Self;

    /// Value conversion to `f64`
    fn to_f64(self) -> f64;

    /// Value conversion from `f64`
    ///
    /// Integral kinds narrower than 64 bits go through a saturating `i32` cast
    /// first and then wrap, which is how narrowing lane casts behave.
    fn from_f64(value: f64) -> Self;

    /// Exact conversion from `i64`, `None` when the value does not round-trip
    fn try_from_i64(value: i64) -> Option<Self>;

    /// Whether the lane value is an exact `i64`
    fn is_integral_value(self) -> bool;

    /// NaN test (always false for integral kinds)
    fn is_nan_lane(self) -> bool;

    /// Infinity test (always false for integral kinds)
    fn is_infinite_lane(self) -> bool;

    fn add_lane(self, other: Self) -> Self;
    fn sub_lane(self, other: Self) -> Self;
    fn mul_lane(self, other: Self) -> Self;

    /// Quotient, or `None` for an integral zero divisor
    fn div_lane(self, other: Self) -> Option<Self>;

    fn min_lane(self, other: Self) -> Self;
    fn max_lane(self, other: Self) -> Self;
    fn neg_lane(self) -> Self;
    fn abs_lane(self) -> Self;

    /// `self * b + c` (fused for floating kinds)
    fn fma_lane(self, b: Self, c: Self) -> Self;

    /// Write the lane into `out[..BITS / 8]`
    fn write_bytes(self, out: &mut [u8], order: ByteOrder);

    /// Read a lane from `bytes[..BITS / 8]`
    fn read_bytes(bytes: &[u8], order: ByteOrder) -> Self;

    /// Lane bits zero-extended to 64 bits
    fn to_unsigned_bits(self) -> u64 {
        (self.to_lane_bits() as u64) & lane_width_mask(Self::BITS)
    }

    /// Whether every lane bit is clear
    fn is_default_bits(self) -> bool {
        self.to_lane_bits() == 0
    }

    /// Whether the sign bit is set
    fn is_negative_bits(self) -> bool {
        self.to_lane_bits() < 0
    }
}

/// Mask selecting the low `bits` bits of a `u64`
pub(crate) const fn lane_width_mask(bits: usize) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

macro_rules! impl_byte_io {
    ($ty:ty) => {
        fn write_bytes(self, out: &mut [u8], order: ByteOrder) {
            let raw = match order {
                ByteOrder::LittleEndian => self.to_le_bytes(),
                ByteOrder::BigEndian => self.to_be_bytes(),
            };
            out[..raw.len()].copy_from_slice(&raw);
        }

        fn read_bytes(bytes: &[u8], order: ByteOrder) -> Self {
            let mut raw = [0u8; std::mem::size_of::<$ty>()];
            raw.copy_from_slice(&bytes[..std::mem::size_of::<$ty>()]);
            match order {
                ByteOrder::LittleEndian => <$ty>::from_le_bytes(raw),
                ByteOrder::BigEndian => <$ty>::from_be_bytes(raw),
            }
        }
    };
}

macro_rules! impl_integral_element {
    ($ty:ty, $kind:ident, $wide:ty) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;
            const BITS: usize = <$ty>::BITS as usize;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX_VALUE: Self = <$ty>::MAX;
            const MIN_VALUE: Self = <$ty>::MIN;

            type Wide = $wide;

            fn widen(self) -> $wide {
                self as $wide
            }

            fn to_lane_bits(self) -> i64 {
                self as i64
            }

            fn from_lane_bits(bits: i64) -> Self {
                bits as $ty
            }

            fn to_i64(self) -> i64 {
                self as i64
            }

            fn from_i64(value: i64) -> Self {
                value as $ty
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(value: f64) -> Self {
                if Self::BITS == 64 {
                    value as i64 as $ty
                } else {
                    value as i32 as $ty
                }
            }

            fn try_from_i64(value: i64) -> Option<Self> {
                <$ty>::try_from(value).ok()
            }

            fn is_integral_value(self) -> bool {
                true
            }

            fn is_nan_lane(self) -> bool {
                false
            }

            fn is_infinite_lane(self) -> bool {
                false
            }

            fn add_lane(self, other: Self) -> Self {
                self.wrapping_add(other)
            }

            fn sub_lane(self, other: Self) -> Self {
                self.wrapping_sub(other)
            }

            fn mul_lane(self, other: Self) -> Self {
                self.wrapping_mul(other)
            }

            fn div_lane(self, other: Self) -> Option<Self> {
                if other == 0 {
                    None
                } else {
                    Some(self.wrapping_div(other))
                }
            }

            fn min_lane(self, other: Self) -> Self {
                Ord::min(self, other)
            }

            fn max_lane(self, other: Self) -> Self {
                Ord::max(self, other)
            }

            fn neg_lane(self) -> Self {
                self.wrapping_neg()
            }

            fn abs_lane(self) -> Self {
                self.wrapping_abs()
            }

            fn fma_lane(self, b: Self, c: Self) -> Self {
                self.wrapping_mul(b).wrapping_add(c)
            }

            impl_byte_io!($ty);
        }
    };
}

macro_rules! impl_floating_element {
    ($ty:ty, $kind:ident, $bits:ty, $signed_bits:ty) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;
            const BITS: usize = std::mem::size_of::<$ty>() * 8;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const MAX_VALUE: Self = <$ty>::INFINITY;
            const MIN_VALUE: Self = <$ty>::NEG_INFINITY;

            type Wide = f64;

            fn widen(self) -> f64 {
                self as f64
            }

            fn to_lane_bits(self) -> i64 {
                <$ty>::to_bits(self) as $signed_bits as i64
            }

            fn from_lane_bits(bits: i64) -> Self {
                <$ty>::from_bits(bits as $bits)
            }

            fn to_i64(self) -> i64 {
                self as i64
            }

            fn from_i64(value: i64) -> Self {
                value as $ty
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(value: f64) -> Self {
                value as $ty
            }

            fn try_from_i64(value: i64) -> Option<Self> {
                let converted = value as $ty;
                if converted as i64 == value {
                    Some(converted)
                } else {
                    None
                }
            }

            fn is_integral_value(self) -> bool {
                self.trunc() == self
                    && self >= -9.223_372_036_854_775_808e18
                    && self < 9.223_372_036_854_775_808e18
            }

            fn is_nan_lane(self) -> bool {
                self.is_nan()
            }

            fn is_infinite_lane(self) -> bool {
                self.is_infinite()
            }

            fn add_lane(self, other: Self) -> Self {
                self + other
            }

            fn sub_lane(self, other: Self) -> Self {
                self - other
            }

            fn mul_lane(self, other: Self) -> Self {
                self * other
            }

            fn div_lane(self, other: Self) -> Option<Self> {
                Some(self / other)
            }

            fn min_lane(self, other: Self) -> Self {
                if self.is_nan() || other.is_nan() {
                    return <$ty>::NAN;
                }
                if self == 0.0 && other == 0.0 {
                    return if self.is_sign_negative() { self } else { other };
                }
                if self <= other {
                    self
                } else {
                    other
                }
            }

            fn max_lane(self, other: Self) -> Self {
                if self.is_nan() || other.is_nan() {
                    return <$ty>::NAN;
                }
                if self == 0.0 && other == 0.0 {
                    return if self.is_sign_positive() { self } else { other };
                }
                if self >= other {
                    self
                } else {
                    other
                }
            }

            fn neg_lane(self) -> Self {
                -self
            }

            fn abs_lane(self) -> Self {
                self.abs()
            }

            fn fma_lane(self, b: Self, c: Self) -> Self {
                self.mul_add(b, c)
            }

            impl_byte_io!($ty);
        }
    };
}

impl_integral_element!(i8, Int8, i64);
impl_integral_element!(i16, Int16, i64);
impl_integral_element!(i32, Int32, i64);
impl_integral_element!(i64, Int64, i128);
impl_floating_element!(f32, Float32, u32, i32);
impl_floating_element!(f64, Float64, u64, i64);
