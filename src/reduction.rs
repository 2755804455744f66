//! Cross-lane reductions
//!
//! A reduction folds the active lanes of a vector, in increasing lane order,
//! starting from the operator's identity. With every lane masked off the
//! result is therefore the identity itself:
//!
//! | Operator | Identity |
//! |---|---|
//! | `Add`, `Or`, `Xor`, `FirstNonzero` | `0` |
//! | `Mul` | `1` |
//! | `And` | all bits set |
//! | `Min` | largest value of the kind (`+inf` for floats) |
//! | `Max` | smallest value of the kind (`-inf` for floats) |

use crate::backends::scalar::ScalarBackend;
use crate::backends::LaneBackend;
use crate::{Element, LaneError, Mask, Result, Vector};

/// Associative operators usable in reductions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReductionOp {
    Add,
    Mul,
    Min,
    Max,
    And,
    Or,
    Xor,
    FirstNonzero,
}

impl ReductionOp {
    pub fn name(self) -> &'static str {
        match self {
            ReductionOp::Add => "ADD",
            ReductionOp::Mul => "MUL",
            ReductionOp::Min => "MIN",
            ReductionOp::Max => "MAX",
            ReductionOp::And => "AND",
            ReductionOp::Or => "OR",
            ReductionOp::Xor => "XOR",
            ReductionOp::FirstNonzero => "FIRST_NONZERO",
        }
    }

    pub fn is_bitwise(self) -> bool {
        matches!(self, ReductionOp::And | ReductionOp::Or | ReductionOp::Xor)
    }

    /// Value contributed by an inactive lane
    pub fn identity<E: Element>(self) -> E {
        match self {
            ReductionOp::Add | ReductionOp::Or | ReductionOp::Xor | ReductionOp::FirstNonzero => {
                E::ZERO
            }
            ReductionOp::Mul => E::ONE,
            ReductionOp::And => E::from_lane_bits(-1),
            ReductionOp::Min => E::MAX_VALUE,
            ReductionOp::Max => E::MIN_VALUE,
        }
    }

    fn check<E: Element>(self) -> Result<()> {
        if self.is_bitwise() && E::KIND.is_floating() {
            return Err(LaneError::UnsupportedOperator {
                op: self.name(),
                kind: E::KIND,
            });
        }
        Ok(())
    }

    fn combine<E: Element>(self, acc: E, x: E) -> E {
        match self {
            ReductionOp::Add => acc.add_lane(x),
            ReductionOp::Mul => acc.mul_lane(x),
            ReductionOp::Min => acc.min_lane(x),
            ReductionOp::Max => acc.max_lane(x),
            ReductionOp::And => E::from_lane_bits(acc.to_lane_bits() & x.to_lane_bits()),
            ReductionOp::Or => E::from_lane_bits(acc.to_lane_bits() | x.to_lane_bits()),
            ReductionOp::Xor => E::from_lane_bits(acc.to_lane_bits() ^ x.to_lane_bits()),
            ReductionOp::FirstNonzero => {
                if acc.is_default_bits() {
                    x
                } else {
                    acc
                }
            }
        }
    }
}

impl<E: Element> Vector<E> {
    fn reduce_impl(&self, op: ReductionOp, active: Option<&[bool]>) -> Result<E> {
        op.check::<E>()?;
        Ok(ScalarBackend::fold_lanes(
            self.as_slice(),
            active,
            op.identity::<E>(),
            |acc, x| op.combine(acc, x),
        ))
    }

    /// Fold all lanes with `op`
    ///
    /// Integral `Add`/`Mul` wrap like the lane-wise operators.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnsupportedOperator`] for bitwise reductions of
    /// floating lanes.
    ///
    /// # Examples
    ///
    /// ```
    /// use trueno_lanes::{ReductionOp, Shape, Species};
    ///
    /// let v = Species::<i32>::new(Shape::S128).unwrap().from_values(&[1, 2, 3, 4]).unwrap();
    /// assert_eq!(v.reduce_lanes(ReductionOp::Add), Ok(10));
    /// assert_eq!(v.reduce_lanes(ReductionOp::Max), Ok(4));
    /// ```
    pub fn reduce_lanes(&self, op: ReductionOp) -> Result<E> {
        self.reduce_impl(op, None)
    }

    /// Fold the lanes set in `mask`; the identity if none is set
    pub fn reduce_lanes_masked(&self, op: ReductionOp, mask: &Mask<E>) -> Result<E> {
        self.check_mask(mask)?;
        self.reduce_impl(op, Some(mask.as_slice()))
    }

    /// [`Vector::reduce_lanes`] converted to `i64`
    pub fn reduce_lanes_to_long(&self, op: ReductionOp) -> Result<i64> {
        self.reduce_lanes(op).map(Element::to_i64)
    }

    /// [`Vector::reduce_lanes_masked`] converted to `i64`
    pub fn reduce_lanes_to_long_masked(&self, op: ReductionOp, mask: &Mask<E>) -> Result<i64> {
        self.reduce_lanes_masked(op, mask).map(Element::to_i64)
    }

    /// Sum of the active lanes accumulated in the wide type
    ///
    /// `int8`..`int32` lanes sum into `i64`, `int64` into `i128`, floats into
    /// `f64`, so no intermediate sum of a full vector can overflow.
    pub fn reduce_add_widening(&self, mask: Option<&Mask<E>>) -> Result<E::Wide> {
        if let Some(mask) = mask {
            self.check_mask(mask)?;
        }
        let active = mask.map(Mask::as_slice);
        Ok(self
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(i, _)| active.map_or(true, |m| m[*i]))
            .fold(E::Wide::default(), |acc, (_, &x)| acc + x.widen()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use crate::{Shape, Species};

    fn i8x8(values: [i8; 8]) -> Vector<i8> {
        Species::<i8>::new(Shape::S64)
            .unwrap()
            .from_values(&values)
            .unwrap()
    }

    #[test]
    fn test_add_reduction() {
        let v = i8x8([1, 2, 3, 4, 0, 0, 0, 0]);
        assert_eq!(v.reduce_lanes(ReductionOp::Add), Ok(10));
    }

    #[test]
    fn test_add_reduction_wraps() {
        let v = i8x8([100; 8]);
        assert_eq!(v.reduce_lanes(ReductionOp::Add), Ok(800i32 as i8));
        assert_eq!(v.reduce_add_widening(None), Ok(800i64));
    }

    #[test]
    fn test_identities_under_empty_mask() {
        let v = i8x8([5, -3, 7, 1, 2, 9, -8, 4]);
        let none = v.species().mask_all(false);
        assert_eq!(v.reduce_lanes_masked(ReductionOp::And, &none), Ok(-1));
        assert_eq!(v.reduce_lanes_masked(ReductionOp::Or, &none), Ok(0));
        assert_eq!(v.reduce_lanes_masked(ReductionOp::Xor, &none), Ok(0));
        assert_eq!(v.reduce_lanes_masked(ReductionOp::Add, &none), Ok(0));
        assert_eq!(v.reduce_lanes_masked(ReductionOp::Mul, &none), Ok(1));
        assert_eq!(v.reduce_lanes_masked(ReductionOp::Min, &none), Ok(i8::MAX));
        assert_eq!(v.reduce_lanes_masked(ReductionOp::Max, &none), Ok(i8::MIN));
    }

    #[test]
    fn test_masked_reduction() {
        let v = i8x8([5, -3, 7, 1, 2, 9, -8, 4]);
        let even = Mask::from_fn(v.species(), |i| i % 2 == 0);
        assert_eq!(v.reduce_lanes_masked(ReductionOp::Add, &even), Ok(6));
        assert_eq!(v.reduce_lanes_masked(ReductionOp::Min, &even), Ok(-8));
        assert_eq!(v.reduce_lanes_masked(ReductionOp::Max, &even), Ok(7));
        assert_eq!(v.reduce_add_widening(Some(&even)), Ok(6));
    }

    #[test]
    fn test_bitwise_reductions() {
        let v = i8x8([0b0001, 0b0011, 0b0111, 0b1111, -1, -1, -1, -1]);
        assert_eq!(v.reduce_lanes(ReductionOp::And), Ok(0b0001));
        assert_eq!(v.reduce_lanes(ReductionOp::Or), Ok(-1));
        assert_eq!(v.reduce_lanes(ReductionOp::Xor), Ok(0b1010));
    }

    #[test]
    fn test_first_nonzero_reduction() {
        let v = i8x8([0, 0, 6, 0, 9, 0, 0, 0]);
        assert_eq!(v.reduce_lanes(ReductionOp::FirstNonzero), Ok(6));
    }

    #[test]
    fn test_float_reductions() {
        let v = Species::<f32>::new(Shape::S128)
            .unwrap()
            .from_values(&[1.5, -2.0, 4.0, 0.5])
            .unwrap();
        assert_eq!(v.reduce_lanes(ReductionOp::Add), Ok(4.0));
        assert_eq!(v.reduce_lanes(ReductionOp::Mul), Ok(-6.0));
        assert_eq!(v.reduce_lanes(ReductionOp::Min), Ok(-2.0));
        let none = v.species().mask_all(false);
        assert_eq!(
            v.reduce_lanes_masked(ReductionOp::Min, &none),
            Ok(f32::INFINITY)
        );
        assert_eq!(
            v.reduce_lanes(ReductionOp::And),
            Err(LaneError::UnsupportedOperator {
                op: "AND",
                kind: ElementKind::Float32
            })
        );
        assert_eq!(v.reduce_add_widening(None), Ok(4.0f64));
    }

    #[test]
    fn test_reduce_to_long() {
        let v = Species::<i64>::new(Shape::S256)
            .unwrap()
            .from_values(&[i64::MAX, 1, 0, 0])
            .unwrap();
        assert_eq!(v.reduce_lanes_to_long(ReductionOp::Add), Ok(i64::MIN));
        assert_eq!(
            v.reduce_add_widening(None),
            Ok(i64::MAX as i128 + 1)
        );
        let first = Mask::from_long(v.species(), 0b0001);
        assert_eq!(
            v.reduce_lanes_to_long_masked(ReductionOp::Max, &first),
            Ok(i64::MAX)
        );
    }
}
