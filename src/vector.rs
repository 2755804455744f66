//! Lane vector type
//!
//! A [`Vector`] owns exactly `species.length()` lanes and never changes after
//! construction; every operation returns a new vector (or mask). Masked
//! operations keep the first operand's lane wherever the mask is unset and do
//! not evaluate the operator there, so a zero divisor in an inactive lane is
//! not an error.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::backends::scalar::ScalarBackend;
use crate::backends::LaneBackend;
use crate::element::ElementKind;
use crate::{
    BinaryOp, Comparison, Conversion, Element, LaneError, Mask, Result, Species, TernaryOp,
    TestOp, UnaryOp,
};

/// Fixed-length vector of lanes belonging to one species
///
/// # Examples
///
/// ```
/// use trueno_lanes::{BinaryOp, Shape, Species};
///
/// let species = Species::<i32>::new(Shape::S128).unwrap();
/// let a = species.from_values(&[1, 2, 3, 4]).unwrap();
/// let b = species.broadcast(10);
///
/// let sum = a.lanewise(BinaryOp::Add, &b).unwrap();
/// assert_eq!(sum.as_slice(), &[11, 12, 13, 14]);
/// assert_eq!(sum.to_string(), "[11, 12, 13, 14]");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<E: Element> {
    species: Species<E>,
    lanes: Vec<E>,
}

impl<E: Element> Vector<E> {
    /// Caller guarantees `lanes.len() == species.length()`
    pub(crate) fn from_parts(species: Species<E>, lanes: Vec<E>) -> Self {
        debug_assert_eq!(lanes.len(), species.length());
        Self { species, lanes }
    }

    pub fn species(&self) -> Species<E> {
        self.species
    }

    /// Number of lanes
    pub fn length(&self) -> usize {
        self.lanes.len()
    }

    /// Lanes in order
    pub fn as_slice(&self) -> &[E] {
        &self.lanes
    }

    /// Copy of the lanes in order
    pub fn to_array(&self) -> Vec<E> {
        self.lanes.clone()
    }

    /// Value of lane `index`
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfBounds`] if `index >= length()`.
    pub fn lane(&self, index: usize) -> Result<E> {
        self.lanes
            .get(index)
            .copied()
            .ok_or_else(|| LaneError::out_of_bounds(index as i64, 1, self.length()))
    }

    /// Copy of this vector with lane `index` replaced
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfBounds`] if `index >= length()`.
    pub fn with_lane(&self, index: usize, value: E) -> Result<Self> {
        self.lane(index)?;
        let mut lanes = self.lanes.clone();
        lanes[index] = value;
        Ok(Self::from_parts(self.species, lanes))
    }

    /// Lanes widened to `i64`
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnsupportedConversion`] if a floating lane is not
    /// an exact `i64` value.
    pub fn to_long_array(&self) -> Result<Vec<i64>> {
        self.lanes
            .iter()
            .map(|&x| {
                if x.is_integral_value() {
                    Ok(x.to_i64())
                } else {
                    Err(LaneError::UnsupportedConversion {
                        from: E::KIND,
                        to: ElementKind::Int64,
                    })
                }
            })
            .collect()
    }

    /// Lanes converted to `f64` (`int64` lanes beyond 2^53 round)
    pub fn to_double_array(&self) -> Vec<f64> {
        self.lanes.iter().map(|&x| x.to_f64()).collect()
    }

    /// Deterministic hash of the species and lane bit patterns
    pub fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    pub(crate) fn check(&self, other: &Vector<E>) -> Result<()> {
        self.species.check(&other.species)
    }

    pub(crate) fn check_mask(&self, mask: &Mask<E>) -> Result<()> {
        self.species.check(&mask.species())
    }

    // ----------------------------------------------------------------------
    // Lane-wise operators
    // ----------------------------------------------------------------------

    fn unary_impl(&self, op: UnaryOp, mask: Option<&[bool]>) -> Result<Self> {
        op.check::<E>()?;
        let lanes = ScalarBackend::map_lanes(&self.lanes, |i, a| {
            if mask.map_or(true, |m| m[i]) {
                op.apply(a)
            } else {
                a
            }
        });
        Ok(Self::from_parts(self.species, lanes))
    }

    fn binary_impl(&self, op: BinaryOp, other: &[E], mask: Option<&[bool]>) -> Result<Self> {
        op.check::<E>()?;
        let lanes = ScalarBackend::try_zip_lanes(&self.lanes, other, |i, a, b| {
            if mask.map_or(true, |m| m[i]) {
                op.apply(i, a, b)
            } else {
                Ok(a)
            }
        })?;
        Ok(Self::from_parts(self.species, lanes))
    }

    fn ternary_impl(&self, op: TernaryOp, b: &[E], c: &[E], mask: Option<&[bool]>) -> Result<Self> {
        op.check::<E>()?;
        let lanes = ScalarBackend::zip3_lanes(&self.lanes, b, c, |i, x, y, z| {
            if mask.map_or(true, |m| m[i]) {
                op.apply(x, y, z)
            } else {
                x
            }
        });
        Ok(Self::from_parts(self.species, lanes))
    }

    /// Apply a unary operator to every lane
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnsupportedOperator`] for bitwise operators on
    /// floating lanes and math operators on integral lanes.
    pub fn lanewise_unary(&self, op: UnaryOp) -> Result<Self> {
        self.unary_impl(op, None)
    }

    /// Apply a unary operator to the lanes set in `mask`
    pub fn lanewise_unary_masked(&self, op: UnaryOp, mask: &Mask<E>) -> Result<Self> {
        self.check_mask(mask)?;
        self.unary_impl(op, Some(mask.as_slice()))
    }

    /// Combine corresponding lanes of `self` and `other`
    ///
    /// # Errors
    ///
    /// - [`LaneError::ShapeMismatch`] if the species differ
    /// - [`LaneError::UnsupportedOperator`] for bitwise operators on floats
    ///   and math operators on integral kinds
    /// - [`LaneError::DivideByZero`] for an integral `Div` by zero
    pub fn lanewise(&self, op: BinaryOp, other: &Self) -> Result<Self> {
        self.check(other)?;
        self.binary_impl(op, &other.lanes, None)
    }

    /// Combine lanes where `mask` is set, keep `self`'s lane elsewhere
    pub fn lanewise_masked(&self, op: BinaryOp, other: &Self, mask: &Mask<E>) -> Result<Self> {
        self.check(other)?;
        self.check_mask(mask)?;
        self.binary_impl(op, &other.lanes, Some(mask.as_slice()))
    }

    /// Combine every lane with the broadcast scalar `value`
    pub fn lanewise_scalar(&self, op: BinaryOp, value: E) -> Result<Self> {
        self.binary_impl(op, &vec![value; self.length()], None)
    }

    /// Masked form of [`Vector::lanewise_scalar`]
    pub fn lanewise_scalar_masked(&self, op: BinaryOp, value: E, mask: &Mask<E>) -> Result<Self> {
        self.check_mask(mask)?;
        self.binary_impl(op, &vec![value; self.length()], Some(mask.as_slice()))
    }

    /// Combine every lane with a wide integer scalar
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnrepresentableScalar`] unless `value` converts
    /// exactly to the element kind. Shift and rotate counts are exempt: only
    /// their low bits are used, so any value is accepted.
    pub fn lanewise_long(&self, op: BinaryOp, value: i64) -> Result<Self> {
        let lane = Self::long_operand(op, value)?;
        self.lanewise_scalar(op, lane)
    }

    /// Masked form of [`Vector::lanewise_long`]
    pub fn lanewise_long_masked(&self, op: BinaryOp, value: i64, mask: &Mask<E>) -> Result<Self> {
        let lane = Self::long_operand(op, value)?;
        self.lanewise_scalar_masked(op, lane, mask)
    }

    fn long_operand(op: BinaryOp, value: i64) -> Result<E> {
        let is_count = matches!(
            op,
            BinaryOp::Lshl | BinaryOp::Lshr | BinaryOp::Ashr | BinaryOp::Rol | BinaryOp::Ror
        );
        if is_count && !E::KIND.is_floating() {
            return Ok(E::from_i64(value & (E::BITS as i64 - 1)));
        }
        Self::exact_lane(value)
    }

    /// Combine corresponding lanes of three vectors
    pub fn lanewise_ternary(&self, op: TernaryOp, b: &Self, c: &Self) -> Result<Self> {
        self.check(b)?;
        self.check(c)?;
        self.ternary_impl(op, &b.lanes, &c.lanes, None)
    }

    /// Masked form of [`Vector::lanewise_ternary`]
    pub fn lanewise_ternary_masked(
        &self,
        op: TernaryOp,
        b: &Self,
        c: &Self,
        mask: &Mask<E>,
    ) -> Result<Self> {
        self.check(b)?;
        self.check(c)?;
        self.check_mask(mask)?;
        self.ternary_impl(op, &b.lanes, &c.lanes, Some(mask.as_slice()))
    }

    /// Ternary operator with both trailing operands broadcast
    pub fn lanewise_ternary_scalar(&self, op: TernaryOp, b: E, c: E) -> Result<Self> {
        let n = self.length();
        self.ternary_impl(op, &vec![b; n], &vec![c; n], None)
    }

    /// Masked form of [`Vector::lanewise_ternary_scalar`]
    pub fn lanewise_ternary_scalar_masked(
        &self,
        op: TernaryOp,
        b: E,
        c: E,
        mask: &Mask<E>,
    ) -> Result<Self> {
        self.check_mask(mask)?;
        let n = self.length();
        self.ternary_impl(op, &vec![b; n], &vec![c; n], Some(mask.as_slice()))
    }

    /// Ternary operator with the last operand broadcast
    pub fn lanewise_ternary_vector_scalar(&self, op: TernaryOp, b: &Self, c: E) -> Result<Self> {
        self.check(b)?;
        self.ternary_impl(op, &b.lanes, &vec![c; self.length()], None)
    }

    /// Masked form of [`Vector::lanewise_ternary_vector_scalar`]
    pub fn lanewise_ternary_vector_scalar_masked(
        &self,
        op: TernaryOp,
        b: &Self,
        c: E,
        mask: &Mask<E>,
    ) -> Result<Self> {
        self.check(b)?;
        self.check_mask(mask)?;
        let c = vec![c; self.length()];
        self.ternary_impl(op, &b.lanes, &c, Some(mask.as_slice()))
    }

    /// Ternary operator with the middle operand broadcast
    pub fn lanewise_ternary_scalar_vector(&self, op: TernaryOp, b: E, c: &Self) -> Result<Self> {
        self.check(c)?;
        self.ternary_impl(op, &vec![b; self.length()], &c.lanes, None)
    }

    /// Masked form of [`Vector::lanewise_ternary_scalar_vector`]
    pub fn lanewise_ternary_scalar_vector_masked(
        &self,
        op: TernaryOp,
        b: E,
        c: &Self,
        mask: &Mask<E>,
    ) -> Result<Self> {
        self.check(c)?;
        self.check_mask(mask)?;
        let b = vec![b; self.length()];
        self.ternary_impl(op, &b, &c.lanes, Some(mask.as_slice()))
    }

    /// Evaluate a lane predicate
    pub fn test(&self, op: TestOp) -> Mask<E> {
        Mask::from_fn(self.species, |i| op.apply(self.lanes[i]))
    }

    /// Evaluate a lane predicate; unset mask lanes are false
    pub fn test_masked(&self, op: TestOp, mask: &Mask<E>) -> Result<Mask<E>> {
        self.check_mask(mask)?;
        let m = mask.as_slice();
        Ok(Mask::from_fn(self.species, |i| m[i] && op.apply(self.lanes[i])))
    }

    fn compare_impl(&self, op: Comparison, other: &[E], mask: Option<&[bool]>) -> Result<Mask<E>> {
        op.check::<E>()?;
        let bits = ScalarBackend::test_lanes(&self.lanes, other, |i, a, b| {
            mask.map_or(true, |m| m[i]) && op.apply(a, b)
        });
        Ok(Mask::from_parts(self.species, bits))
    }

    /// Compare corresponding lanes
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnsupportedOperator`] for unsigned comparisons on
    /// floating lanes.
    pub fn compare(&self, op: Comparison, other: &Self) -> Result<Mask<E>> {
        self.check(other)?;
        self.compare_impl(op, &other.lanes, None)
    }

    /// Compare lanes where `mask` is set; unset lanes are false
    pub fn compare_masked(&self, op: Comparison, other: &Self, mask: &Mask<E>) -> Result<Mask<E>> {
        self.check(other)?;
        self.check_mask(mask)?;
        self.compare_impl(op, &other.lanes, Some(mask.as_slice()))
    }

    /// Compare every lane against a broadcast scalar
    pub fn compare_scalar(&self, op: Comparison, value: E) -> Result<Mask<E>> {
        self.compare_impl(op, &vec![value; self.length()], None)
    }

    /// Masked form of [`Vector::compare_scalar`]; unset lanes are false
    pub fn compare_scalar_masked(
        &self,
        op: Comparison,
        value: E,
        mask: &Mask<E>,
    ) -> Result<Mask<E>> {
        self.check_mask(mask)?;
        self.compare_impl(op, &vec![value; self.length()], Some(mask.as_slice()))
    }

    /// Compare every lane against a wide integer scalar
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnrepresentableScalar`] unless `value` converts
    /// exactly to the element kind.
    pub fn compare_long(&self, op: Comparison, value: i64) -> Result<Mask<E>> {
        self.compare_scalar(op, Self::exact_lane(value)?)
    }

    /// Masked form of [`Vector::compare_long`]; unset lanes are false
    pub fn compare_long_masked(
        &self,
        op: Comparison,
        value: i64,
        mask: &Mask<E>,
    ) -> Result<Mask<E>> {
        self.compare_scalar_masked(op, Self::exact_lane(value)?, mask)
    }

    fn exact_lane(value: i64) -> Result<E> {
        E::try_from_i64(value).ok_or(LaneError::UnrepresentableScalar {
            value,
            kind: E::KIND,
        })
    }

    /// Take `other`'s lane where `mask` is set, `self`'s lane elsewhere
    pub fn blend(&self, other: &Self, mask: &Mask<E>) -> Result<Self> {
        self.check(other)?;
        self.check_mask(mask)?;
        let lanes = ScalarBackend::select_lanes(mask.as_slice(), &other.lanes, &self.lanes);
        Ok(Self::from_parts(self.species, lanes))
    }

    /// Add `i * scale` to lane `i`
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnrepresentableScalar`] if some `i * scale` does
    /// not fit the element kind.
    pub fn add_index(&self, scale: i64) -> Result<Self> {
        let step = E::try_from_i64(scale).ok_or(LaneError::UnrepresentableScalar {
            value: scale,
            kind: E::KIND,
        })?;
        let index = self.species.iota(E::ZERO, step, false)?;
        self.lanewise(BinaryOp::Add, &index)
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.lanewise(BinaryOp::Add, other)
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.lanewise(BinaryOp::Sub, other)
    }

    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.lanewise(BinaryOp::Mul, other)
    }

    pub fn div(&self, other: &Self) -> Result<Self> {
        self.lanewise(BinaryOp::Div, other)
    }

    pub fn min(&self, other: &Self) -> Result<Self> {
        self.lanewise(BinaryOp::Min, other)
    }

    pub fn max(&self, other: &Self) -> Result<Self> {
        self.lanewise(BinaryOp::Max, other)
    }

    pub fn neg(&self) -> Self {
        let lanes = ScalarBackend::map_lanes(&self.lanes, |_, a| a.neg_lane());
        Self::from_parts(self.species, lanes)
    }

    pub fn abs(&self) -> Self {
        let lanes = ScalarBackend::map_lanes(&self.lanes, |_, a| a.abs_lane());
        Self::from_parts(self.species, lanes)
    }

    pub fn not(&self) -> Result<Self> {
        self.lanewise_unary(UnaryOp::Not)
    }

    pub fn eq(&self, other: &Self) -> Result<Mask<E>> {
        self.compare(Comparison::Eq, other)
    }

    pub fn lt(&self, other: &Self) -> Result<Mask<E>> {
        self.compare(Comparison::Lt, other)
    }

    // ----------------------------------------------------------------------
    // Conversions
    // ----------------------------------------------------------------------

    /// Convert lanes into a vector of the same shape
    ///
    /// See [`Vector::convert_shape`] for the meaning of `part`.
    pub fn convert<F: Element>(&self, conversion: Conversion, part: i32) -> Result<Vector<F>> {
        let target = self.species.with_lanes::<F>()?;
        self.convert_shape(conversion, target, part)
    }

    /// Convert lanes into a vector of the species `target`
    ///
    /// With `N` input and `M` output lanes:
    /// - `M <= N`: output lane `i` is the conversion of input lane
    ///   `part * M + i`, `part` in `[0, N / M)`
    /// - `M > N`: the `N` converted lanes land at output offset `-part * N`,
    ///   `part` in `(-(M / N), 0]`, and every other lane is zero
    ///
    /// # Errors
    ///
    /// - [`LaneError::UnsupportedConversion`] if the conversion's domain or
    ///   range does not match the vector and target kinds
    /// - [`LaneError::InvalidPart`] for a `part` outside its range
    pub fn convert_shape<F: Element>(
        &self,
        conversion: Conversion,
        target: Species<F>,
        part: i32,
    ) -> Result<Vector<F>> {
        conversion.check::<E, F>()?;
        let (n, m) = (self.length(), target.length());
        let mut lanes = vec![F::ZERO; m];
        if m <= n {
            let limit = n / m;
            if part < 0 || part as usize >= limit {
                return Err(LaneError::InvalidPart { part, limit });
            }
            let base = part as usize * m;
            for (i, lane) in lanes.iter_mut().enumerate() {
                *lane = conversion.apply(self.lanes[base + i]);
            }
        } else {
            let limit = m / n;
            if part > 0 || part.unsigned_abs() as usize >= limit {
                return Err(LaneError::InvalidPart { part, limit });
            }
            let base = part.unsigned_abs() as usize * n;
            for (i, &x) in self.lanes.iter().enumerate() {
                lanes[base + i] = conversion.apply(x);
            }
        }
        Ok(Vector::from_parts(target, lanes))
    }

    /// Reinterpret the vector's bytes (native order) as lanes of another kind
    pub fn reinterpret_as<F: Element>(&self) -> Result<Vector<F>> {
        let target = self.species.with_lanes::<F>()?;
        let bytes: &[u8] = bytemuck::cast_slice(&self.lanes);
        let lanes = bytes
            .chunks_exact(target.element_size())
            .map(bytemuck::pod_read_unaligned::<F>)
            .collect();
        Ok(Vector::from_parts(target, lanes))
    }
}

impl<E: Element> Hash for Vector<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.species.hash(state);
        for lane in &self.lanes {
            lane.to_lane_bits().hash(state);
        }
    }
}

impl<E: Element> fmt::Display for Vector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, lane) in self.lanes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{lane:?}")?;
        }
        f.write_str("]")
    }
}
