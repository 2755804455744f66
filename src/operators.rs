//! Lane operators and their per-lane scalar semantics
//!
//! Operators are plain enums; vectors apply them lane by lane through
//! [`Vector::lanewise`](crate::Vector::lanewise) and friends. The `apply`
//! functions here define the exact scalar result for a single lane:
//!
//! - integral arithmetic wraps modulo the lane width
//! - shift and rotate counts are masked to `element_bits - 1`
//! - bitwise operators, shifts, rotates and unsigned comparisons exist for
//!   integral kinds only
//! - floating operators follow IEEE 754
//! - the math operators (`Sqrt`, `Exp`, `Sin`, `Pow`, ...) exist for floating
//!   kinds only and are evaluated in `f64`, then rounded to the lane kind

use std::fmt;

use crate::element::{lane_width_mask, ElementKind};
use crate::{Element, LaneError, Result};

fn require_integral<E: Element>(op: &'static str, integral_only: bool) -> Result<()> {
    if integral_only && E::KIND.is_floating() {
        return Err(LaneError::UnsupportedOperator { op, kind: E::KIND });
    }
    Ok(())
}

fn require_floating<E: Element>(op: &'static str, floating_only: bool) -> Result<()> {
    if floating_only && !E::KIND.is_floating() {
        return Err(LaneError::UnsupportedOperator { op, kind: E::KIND });
    }
    Ok(())
}

fn math1<E: Element>(a: E, f: fn(f64) -> f64) -> E {
    E::from_f64(f(a.to_f64()))
}

fn math2<E: Element>(a: E, b: E, f: fn(f64, f64) -> f64) -> E {
    E::from_f64(f(a.to_f64(), b.to_f64()))
}

fn shift_count<E: Element>(count: E) -> u32 {
    (count.to_lane_bits() as u32) & (E::BITS as u32 - 1)
}

fn rotate_left<E: Element>(a: E, n: u32) -> E {
    let bits = E::BITS as u32;
    let u = a.to_unsigned_bits();
    if n == 0 {
        return a;
    }
    let rotated = ((u << n) | (u >> (bits - n))) & lane_width_mask(E::BITS);
    E::from_lane_bits(rotated as i64)
}

/// Single-operand lane operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Negation (wrapping for integral kinds)
    Neg,
    /// Absolute value (`MIN` stays `MIN` for integral kinds)
    Abs,
    /// Bitwise complement
    Not,
    /// Zero maps to zero, anything else to all ones
    Zomo,
    Sqrt,
    Cbrt,
    Exp,
    /// `exp(a) - 1`, accurate near zero
    Expm1,
    /// Natural logarithm
    Log,
    Log10,
    /// `ln(1 + a)`, accurate near zero
    Log1p,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
}

impl UnaryOp {
    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Neg => "NEG",
            UnaryOp::Abs => "ABS",
            UnaryOp::Not => "NOT",
            UnaryOp::Zomo => "ZOMO",
            UnaryOp::Sqrt => "SQRT",
            UnaryOp::Cbrt => "CBRT",
            UnaryOp::Exp => "EXP",
            UnaryOp::Expm1 => "EXPM1",
            UnaryOp::Log => "LOG",
            UnaryOp::Log10 => "LOG10",
            UnaryOp::Log1p => "LOG1P",
            UnaryOp::Sin => "SIN",
            UnaryOp::Cos => "COS",
            UnaryOp::Tan => "TAN",
            UnaryOp::Asin => "ASIN",
            UnaryOp::Acos => "ACOS",
            UnaryOp::Atan => "ATAN",
            UnaryOp::Sinh => "SINH",
            UnaryOp::Cosh => "COSH",
            UnaryOp::Tanh => "TANH",
        }
    }

    /// Whether the operator works on raw lane bits
    pub fn is_bitwise(self) -> bool {
        matches!(self, UnaryOp::Not | UnaryOp::Zomo)
    }

    /// Whether the operator is a floating-point math function
    pub fn is_math(self) -> bool {
        !matches!(self, UnaryOp::Neg | UnaryOp::Abs | UnaryOp::Not | UnaryOp::Zomo)
    }

    pub(crate) fn check<E: Element>(self) -> Result<()> {
        require_integral::<E>(self.name(), self.is_bitwise())?;
        require_floating::<E>(self.name(), self.is_math())
    }

    /// Result for one lane; callers run [`UnaryOp::check`] first
    pub(crate) fn apply<E: Element>(self, a: E) -> E {
        match self {
            UnaryOp::Neg => a.neg_lane(),
            UnaryOp::Abs => a.abs_lane(),
            UnaryOp::Not => E::from_lane_bits(!a.to_lane_bits()),
            UnaryOp::Zomo => {
                if a.is_default_bits() {
                    E::ZERO
                } else {
                    E::from_lane_bits(-1)
                }
            }
            UnaryOp::Sqrt => math1(a, f64::sqrt),
            UnaryOp::Cbrt => math1(a, f64::cbrt),
            UnaryOp::Exp => math1(a, f64::exp),
            UnaryOp::Expm1 => math1(a, f64::exp_m1),
            UnaryOp::Log => math1(a, f64::ln),
            UnaryOp::Log10 => math1(a, f64::log10),
            UnaryOp::Log1p => math1(a, f64::ln_1p),
            UnaryOp::Sin => math1(a, f64::sin),
            UnaryOp::Cos => math1(a, f64::cos),
            UnaryOp::Tan => math1(a, f64::tan),
            UnaryOp::Asin => math1(a, f64::asin),
            UnaryOp::Acos => math1(a, f64::acos),
            UnaryOp::Atan => math1(a, f64::atan),
            UnaryOp::Sinh => math1(a, f64::sinh),
            UnaryOp::Cosh => math1(a, f64::cosh),
            UnaryOp::Tanh => math1(a, f64::tanh),
        }
    }
}

/// Two-operand lane operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// Division; an integral zero divisor in an active lane is an error
    Div,
    Min,
    Max,
    /// `a` if its bits are non-zero, otherwise `b`
    FirstNonzero,
    And,
    Or,
    Xor,
    /// `a & !b`
    AndNot,
    /// Logical shift left
    Lshl,
    /// Logical (zero-filling) shift right
    Lshr,
    /// Arithmetic (sign-filling) shift right
    Ashr,
    /// Rotate left
    Rol,
    /// Rotate right
    Ror,
    /// `a` raised to the power `b`
    Pow,
    /// `sqrt(a^2 + b^2)` without intermediate overflow
    Hypot,
    /// Angle of the point `(b, a)`
    Atan2,
}

impl BinaryOp {
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "ADD",
            BinaryOp::Sub => "SUB",
            BinaryOp::Mul => "MUL",
            BinaryOp::Div => "DIV",
            BinaryOp::Min => "MIN",
            BinaryOp::Max => "MAX",
            BinaryOp::FirstNonzero => "FIRST_NONZERO",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Xor => "XOR",
            BinaryOp::AndNot => "AND_NOT",
            BinaryOp::Lshl => "LSHL",
            BinaryOp::Lshr => "LSHR",
            BinaryOp::Ashr => "ASHR",
            BinaryOp::Rol => "ROL",
            BinaryOp::Ror => "ROR",
            BinaryOp::Pow => "POW",
            BinaryOp::Hypot => "HYPOT",
            BinaryOp::Atan2 => "ATAN2",
        }
    }

    /// Whether the operator works on raw lane bits
    pub fn is_bitwise(self) -> bool {
        matches!(
            self,
            BinaryOp::And
                | BinaryOp::Or
                | BinaryOp::Xor
                | BinaryOp::AndNot
                | BinaryOp::Lshl
                | BinaryOp::Lshr
                | BinaryOp::Ashr
                | BinaryOp::Rol
                | BinaryOp::Ror
        )
    }

    /// Whether the operator is a floating-point math function
    pub fn is_math(self) -> bool {
        matches!(self, BinaryOp::Pow | BinaryOp::Hypot | BinaryOp::Atan2)
    }

    pub(crate) fn check<E: Element>(self) -> Result<()> {
        require_integral::<E>(self.name(), self.is_bitwise())?;
        require_floating::<E>(self.name(), self.is_math())
    }

    /// Result for one lane; callers run [`BinaryOp::check`] first
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::DivideByZero`] for an integral `Div` by zero.
    pub(crate) fn apply<E: Element>(self, lane: usize, a: E, b: E) -> Result<E> {
        let bits =
            |f: fn(i64, i64) -> i64| E::from_lane_bits(f(a.to_lane_bits(), b.to_lane_bits()));
        let value = match self {
            BinaryOp::Add => a.add_lane(b),
            BinaryOp::Sub => a.sub_lane(b),
            BinaryOp::Mul => a.mul_lane(b),
            BinaryOp::Div => a.div_lane(b).ok_or(LaneError::DivideByZero { lane })?,
            BinaryOp::Min => a.min_lane(b),
            BinaryOp::Max => a.max_lane(b),
            BinaryOp::FirstNonzero => {
                if a.is_default_bits() {
                    b
                } else {
                    a
                }
            }
            BinaryOp::And => bits(|x, y| x & y),
            BinaryOp::Or => bits(|x, y| x | y),
            BinaryOp::Xor => bits(|x, y| x ^ y),
            BinaryOp::AndNot => bits(|x, y| x & !y),
            BinaryOp::Lshl => E::from_lane_bits(a.to_lane_bits() << shift_count(b)),
            BinaryOp::Lshr => E::from_lane_bits((a.to_unsigned_bits() >> shift_count(b)) as i64),
            BinaryOp::Ashr => E::from_lane_bits(a.to_lane_bits() >> shift_count(b)),
            BinaryOp::Rol => rotate_left(a, shift_count(b)),
            BinaryOp::Ror => {
                let n = shift_count(b);
                rotate_left(a, (E::BITS as u32 - n) & (E::BITS as u32 - 1))
            }
            BinaryOp::Pow => math2(a, b, f64::powf),
            BinaryOp::Hypot => math2(a, b, f64::hypot),
            BinaryOp::Atan2 => math2(a, b, f64::atan2),
        };
        Ok(value)
    }
}

/// Three-operand lane operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TernaryOp {
    /// `(a & !c) | (b & c)`
    BitwiseBlend,
    /// `a * b + c`
    Fma,
}

impl TernaryOp {
    pub fn name(self) -> &'static str {
        match self {
            TernaryOp::BitwiseBlend => "BITWISE_BLEND",
            TernaryOp::Fma => "FMA",
        }
    }

    pub(crate) fn check<E: Element>(self) -> Result<()> {
        require_integral::<E>(self.name(), self == TernaryOp::BitwiseBlend)
    }

    pub(crate) fn apply<E: Element>(self, a: E, b: E, c: E) -> E {
        match self {
            TernaryOp::BitwiseBlend => {
                let (a, b, c) = (a.to_lane_bits(), b.to_lane_bits(), c.to_lane_bits());
                E::from_lane_bits((a & !c) | (b & c))
            }
            TernaryOp::Fma => a.fma_lane(b, c),
        }
    }
}

/// Lane predicates producing a mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestOp {
    /// All lane bits clear
    IsDefault,
    /// Sign bit set (includes `-0.0`)
    IsNegative,
    IsFinite,
    IsNaN,
    IsInfinite,
}

impl TestOp {
    pub fn name(self) -> &'static str {
        match self {
            TestOp::IsDefault => "IS_DEFAULT",
            TestOp::IsNegative => "IS_NEGATIVE",
            TestOp::IsFinite => "IS_FINITE",
            TestOp::IsNaN => "IS_NAN",
            TestOp::IsInfinite => "IS_INFINITE",
        }
    }

    pub(crate) fn apply<E: Element>(self, a: E) -> bool {
        match self {
            TestOp::IsDefault => a.is_default_bits(),
            TestOp::IsNegative => a.is_negative_bits(),
            TestOp::IsFinite => !a.is_nan_lane() && !a.is_infinite_lane(),
            TestOp::IsNaN => a.is_nan_lane(),
            TestOp::IsInfinite => a.is_infinite_lane(),
        }
    }
}

/// Lane comparisons producing a mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    UnsignedLt,
    UnsignedLe,
    UnsignedGt,
    UnsignedGe,
}

impl Comparison {
    pub fn name(self) -> &'static str {
        match self {
            Comparison::Eq => "EQ",
            Comparison::Ne => "NE",
            Comparison::Lt => "LT",
            Comparison::Le => "LE",
            Comparison::Gt => "GT",
            Comparison::Ge => "GE",
            Comparison::UnsignedLt => "UNSIGNED_LT",
            Comparison::UnsignedLe => "UNSIGNED_LE",
            Comparison::UnsignedGt => "UNSIGNED_GT",
            Comparison::UnsignedGe => "UNSIGNED_GE",
        }
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            Comparison::UnsignedLt
                | Comparison::UnsignedLe
                | Comparison::UnsignedGt
                | Comparison::UnsignedGe
        )
    }

    pub(crate) fn check<E: Element>(self) -> Result<()> {
        require_integral::<E>(self.name(), self.is_unsigned())
    }

    /// Result for one lane; NaN compares unequal and unordered
    pub(crate) fn apply<E: Element>(self, a: E, b: E) -> bool {
        let (ua, ub) = (a.to_unsigned_bits(), b.to_unsigned_bits());
        match self {
            Comparison::Eq => a == b,
            Comparison::Ne => a != b,
            Comparison::Lt => a < b,
            Comparison::Le => a <= b,
            Comparison::Gt => a > b,
            Comparison::Ge => a >= b,
            Comparison::UnsignedLt => ua < ub,
            Comparison::UnsignedLe => ua <= ub,
            Comparison::UnsignedGt => ua > ub,
            Comparison::UnsignedGe => ua >= ub,
        }
    }
}

/// How a conversion maps lane values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    /// Value conversion (integral narrowing wraps, float to integral truncates)
    Cast,
    /// Bit pattern reinterpretation between kinds of equal width
    Reinterpret,
}

/// Lane conversion from one element kind to another
///
/// A conversion names its domain and range kinds; applying it to a vector of
/// any other kind fails with [`LaneError::UnsupportedConversion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Conversion {
    kind: ConversionKind,
    from: ElementKind,
    to: ElementKind,
}

impl Conversion {
    /// Value cast between any two kinds
    pub fn cast(from: ElementKind, to: ElementKind) -> Self {
        Self {
            kind: ConversionKind::Cast,
            from,
            to,
        }
    }

    /// Bit reinterpretation between kinds of equal width
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnsupportedConversion`] if the widths differ.
    pub fn reinterpret(from: ElementKind, to: ElementKind) -> Result<Self> {
        if from.bits() != to.bits() {
            return Err(LaneError::UnsupportedConversion { from, to });
        }
        Ok(Self {
            kind: ConversionKind::Reinterpret,
            from,
            to,
        })
    }

    pub fn kind(&self) -> ConversionKind {
        self.kind
    }

    /// Element kind the conversion accepts
    pub fn domain(&self) -> ElementKind {
        self.from
    }

    /// Element kind the conversion produces
    pub fn range(&self) -> ElementKind {
        self.to
    }

    pub(crate) fn check<E: Element, F: Element>(&self) -> Result<()> {
        if self.from != E::KIND || self.to != F::KIND {
            return Err(LaneError::UnsupportedConversion {
                from: E::KIND,
                to: self.to,
            });
        }
        Ok(())
    }

    pub(crate) fn apply<E: Element, F: Element>(&self, value: E) -> F {
        match self.kind {
            ConversionKind::Reinterpret => F::from_lane_bits(value.to_lane_bits()),
            ConversionKind::Cast if E::KIND.is_floating() => F::from_f64(value.to_f64()),
            ConversionKind::Cast => F::from_i64(value.to_i64()),
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            ConversionKind::Cast => "CAST",
            ConversionKind::Reinterpret => "REINTERPRET",
        };
        write!(f, "{}[{}->{}]", verb, self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!(BinaryOp::Add.apply(0, 127i8, 1), Ok(-128));
        assert_eq!(BinaryOp::Mul.apply(0, 0x4000i16, 4), Ok(0));
        assert_eq!(BinaryOp::Sub.apply(0, i64::MIN, 1), Ok(i64::MAX));
    }

    #[test]
    fn test_divide_by_zero_reports_lane() {
        assert_eq!(
            BinaryOp::Div.apply(5, 10i32, 0),
            Err(LaneError::DivideByZero { lane: 5 })
        );
        assert!(BinaryOp::Div.apply(5, 10.0f64, 0.0).unwrap().is_infinite());
    }

    #[test]
    fn test_shift_count_is_masked() {
        // 9 & 7 == 1
        assert_eq!(BinaryOp::Lshl.apply(0, 1i8, 9), Ok(2));
        assert_eq!(BinaryOp::Lshl.apply(0, 1i32, 33), Ok(2));
        assert_eq!(BinaryOp::Lshl.apply(0, 1i64, 64), Ok(1));
        assert_eq!(BinaryOp::Lshr.apply(0, -1i8, 4), Ok(0x0F));
        assert_eq!(BinaryOp::Ashr.apply(0, -16i8, 2), Ok(-4));
        assert_eq!(BinaryOp::Lshr.apply(0, -1i16, -1), Ok(1));
    }

    #[test]
    fn test_rotates() {
        assert_eq!(BinaryOp::Rol.apply(0, 0x81u8 as i8, 1), Ok(0x03));
        assert_eq!(BinaryOp::Ror.apply(0, 0x03i8, 1), Ok(0x81u8 as i8));
        assert_eq!(BinaryOp::Rol.apply(0, 0x1234i16, 16), Ok(0x1234));
        assert_eq!(BinaryOp::Ror.apply(0, 1i64, 1), Ok(i64::MIN));
    }

    #[test]
    fn test_bitwise() {
        assert_eq!(BinaryOp::And.apply(0, 0b1100i8, 0b1010), Ok(0b1000));
        assert_eq!(BinaryOp::Or.apply(0, 0b1100i8, 0b1010), Ok(0b1110));
        assert_eq!(BinaryOp::Xor.apply(0, 0b1100i8, 0b1010), Ok(0b0110));
        assert_eq!(BinaryOp::AndNot.apply(0, 0b1100i8, 0b1010), Ok(0b0100));
        assert_eq!(UnaryOp::Not.apply(0i32), -1);
    }

    #[test]
    fn test_bitwise_rejected_for_floats() {
        assert_eq!(
            BinaryOp::Xor.check::<f32>(),
            Err(LaneError::UnsupportedOperator {
                op: "XOR",
                kind: ElementKind::Float32
            })
        );
        assert!(BinaryOp::Add.check::<f32>().is_ok());
        assert!(UnaryOp::Zomo.check::<f64>().is_err());
        assert!(TernaryOp::Fma.check::<f64>().is_ok());
        assert!(Comparison::UnsignedLt.check::<f64>().is_err());
    }

    #[test]
    fn test_math_rejected_for_integral_kinds() {
        assert_eq!(
            UnaryOp::Sqrt.check::<i32>(),
            Err(LaneError::UnsupportedOperator {
                op: "SQRT",
                kind: ElementKind::Int32
            })
        );
        assert!(BinaryOp::Pow.check::<i8>().is_err());
        assert!(BinaryOp::Atan2.check::<i64>().is_err());
        assert!(UnaryOp::Neg.check::<i64>().is_ok());
        assert!(UnaryOp::Log1p.check::<f32>().is_ok());
        assert!(BinaryOp::Hypot.check::<f64>().is_ok());
    }

    #[test]
    fn test_unary_math() {
        assert_eq!(UnaryOp::Sqrt.apply(16.0f64), 4.0);
        assert!((UnaryOp::Cbrt.apply(-27.0f32) + 3.0).abs() < 1e-6);
        assert_eq!(UnaryOp::Exp.apply(0.0f64), 1.0);
        assert_eq!(UnaryOp::Log.apply(1.0f32), 0.0);
        assert!((UnaryOp::Log10.apply(1000.0f64) - 3.0).abs() < 1e-12);
        assert_eq!(UnaryOp::Expm1.apply(1e-10f64), 1e-10f64.exp_m1());
        assert_eq!(UnaryOp::Log1p.apply(1e-10f64), 1e-10f64.ln_1p());
        assert_eq!(UnaryOp::Sin.apply(0.0f64), 0.0);
        assert_eq!(UnaryOp::Cos.apply(0.0f32), 1.0);
        assert_eq!(UnaryOp::Tanh.apply(0.0f64), 0.0);
        assert!(UnaryOp::Sqrt.apply(-1.0f64).is_nan());
        assert_eq!(UnaryOp::Log.apply(0.0f64), f64::NEG_INFINITY);
        // f32 lanes are evaluated in f64 and rounded once
        assert_eq!(UnaryOp::Sin.apply(1.0f32), 1.0f64.sin() as f32);
        assert!((UnaryOp::Atan.apply(1.0f64) - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_binary_math() {
        assert_eq!(BinaryOp::Pow.apply(0, 2.0f64, 10.0), Ok(1024.0));
        assert_eq!(BinaryOp::Hypot.apply(0, 3.0f32, 4.0), Ok(5.0));
        assert_eq!(BinaryOp::Hypot.apply(0, 1e300f64, 1e300), Ok(1e300f64.hypot(1e300)));
        let angle = BinaryOp::Atan2.apply(0, 1.0f64, -1.0).unwrap();
        assert!((angle - 3.0 * std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert_eq!(BinaryOp::Pow.apply(0, f64::NAN, 0.0), Ok(1.0));
    }

    #[test]
    fn test_zomo() {
        assert_eq!(UnaryOp::Zomo.apply(0i16), 0);
        assert_eq!(UnaryOp::Zomo.apply(42i16), -1);
    }

    #[test]
    fn test_first_nonzero() {
        assert_eq!(BinaryOp::FirstNonzero.apply(0, 0i32, 9), Ok(9));
        assert_eq!(BinaryOp::FirstNonzero.apply(0, 3i32, 9), Ok(3));
        // -0.0 has a non-zero bit pattern
        let r = BinaryOp::FirstNonzero.apply(0, -0.0f32, 9.0).unwrap();
        assert!(r == 0.0 && r.is_sign_negative());
    }

    #[test]
    fn test_bitwise_blend() {
        assert_eq!(
            TernaryOp::BitwiseBlend.apply(0b1111_0000u8 as i8, 0b0000_1111, 0b0011_1100),
            0b1100_1100u8 as i8
        );
        assert_eq!(TernaryOp::Fma.apply(2i32, 3, 4), 10);
    }

    #[test]
    fn test_tests() {
        assert!(TestOp::IsDefault.apply(0i8));
        assert!(!TestOp::IsDefault.apply(-0.0f32));
        assert!(TestOp::IsNegative.apply(-0.0f64));
        assert!(TestOp::IsNaN.apply(f32::NAN));
        assert!(!TestOp::IsFinite.apply(f32::INFINITY));
        assert!(TestOp::IsFinite.apply(i8::MIN));
    }

    #[test]
    fn test_unsigned_comparison() {
        assert!(Comparison::Lt.apply(-1i8, 1));
        assert!(!Comparison::UnsignedLt.apply(-1i8, 1));
        assert!(Comparison::UnsignedGt.apply(-1i32, i32::MAX));
        assert!(Comparison::Ne.apply(f64::NAN, f64::NAN));
        assert!(!Comparison::Le.apply(f64::NAN, 1.0));
    }

    #[test]
    fn test_conversions() {
        let cast = Conversion::cast(ElementKind::Int32, ElementKind::Int8);
        assert!(cast.check::<i32, i8>().is_ok());
        assert_eq!(cast.apply::<i32, i8>(300), 44);

        let f2i = Conversion::cast(ElementKind::Float64, ElementKind::Int16);
        assert_eq!(f2i.apply::<f64, i16>(-3.9), -3);

        let i2f = Conversion::reinterpret(ElementKind::Int32, ElementKind::Float32).unwrap();
        assert_eq!(i2f.apply::<i32, f32>(0x3f80_0000), 1.0);
        assert_eq!(
            i2f.check::<f32, f32>(),
            Err(LaneError::UnsupportedConversion {
                from: ElementKind::Float32,
                to: ElementKind::Float32
            })
        );
        assert!(Conversion::reinterpret(ElementKind::Int16, ElementKind::Float32).is_err());
        assert_eq!(i2f.to_string(), "REINTERPRET[int32->float32]");
    }
}
