//! Per-lane boolean masks
//!
//! A [`Mask`] carries one boolean per lane of its species. Masks select the
//! active lanes of masked operations; they are produced by comparisons and
//! lane tests and combined with ordinary boolean algebra.

use std::fmt;

use crate::memory::check_range;
use crate::{Element, LaneError, Result, Species, Vector};

/// Per-lane boolean vector tied to a species
///
/// # Examples
///
/// ```
/// use trueno_lanes::{Mask, Shape, Species};
///
/// let species = Species::<i32>::new(Shape::S128).unwrap();
/// let m = Mask::from_long(species, 0b0110);
/// assert_eq!(m.to_array(), vec![false, true, true, false]);
/// assert_eq!(m.true_count(), 2);
/// assert_eq!(m.first_true(), 1);
/// assert_eq!(m.last_true(), 2);
/// ```
#[derive(Clone)]
pub struct Mask<E: Element> {
    species: Species<E>,
    lanes: Vec<bool>,
}

impl<E: Element> Mask<E> {
    pub(crate) fn from_parts(species: Species<E>, lanes: Vec<bool>) -> Self {
        debug_assert_eq!(lanes.len(), species.length());
        Self { species, lanes }
    }

    /// Mask whose lane `i` is `f(i)`
    pub fn from_fn<F>(species: Species<E>, f: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        Self::from_parts(species, (0..species.length()).map(f).collect())
    }

    /// Mask holding exactly the given lane values
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SizeMismatch`] unless `values.len()` equals the
    /// lane count.
    pub fn from_values(species: Species<E>, values: &[bool]) -> Result<Self> {
        if values.len() != species.length() {
            return Err(LaneError::SizeMismatch {
                expected: species.length(),
                actual: values.len(),
            });
        }
        Ok(Self::from_parts(species, values.to_vec()))
    }

    /// Load `species.length()` booleans starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfBounds`] unless the whole range lies
    /// inside `bits`.
    pub fn from_array(species: Species<E>, bits: &[bool], offset: isize) -> Result<Self> {
        let start = check_range(offset, species.length(), bits.len())?;
        Ok(Self::from_parts(
            species,
            bits[start..start + species.length()].to_vec(),
        ))
    }

    /// Mask from a bit pattern; bit `i` sets lane `i`
    ///
    /// Bits at or above the lane count are ignored, and lanes at or above 64
    /// are unset.
    pub fn from_long(species: Species<E>, bits: u64) -> Self {
        Self::from_fn(species, |i| i < 64 && (bits >> i) & 1 == 1)
    }

    pub fn species(&self) -> Species<E> {
        self.species
    }

    pub fn length(&self) -> usize {
        self.lanes.len()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.lanes
    }

    pub fn to_array(&self) -> Vec<bool> {
        self.lanes.clone()
    }

    /// Value of lane `index`
    pub fn lane_is_set(&self, index: usize) -> Result<bool> {
        self.lanes
            .get(index)
            .copied()
            .ok_or_else(|| LaneError::out_of_bounds(index as i64, 1, self.length()))
    }

    /// Bit pattern with bit `i` set iff lane `i` is set
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::MaskTooWide`] for masks of more than 64 lanes.
    pub fn to_long(&self) -> Result<u64> {
        if self.length() > 64 {
            return Err(LaneError::MaskTooWide {
                lanes: self.length(),
            });
        }
        Ok(self
            .lanes
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, &set)| acc | (u64::from(set) << i)))
    }

    /// Store the lanes into `bits` starting at `offset`
    pub fn into_array(&self, bits: &mut [bool], offset: isize) -> Result<()> {
        let start = check_range(offset, self.length(), bits.len())?;
        bits[start..start + self.length()].copy_from_slice(&self.lanes);
        Ok(())
    }

    fn zip_with(&self, other: &Self, f: impl Fn(bool, bool) -> bool) -> Result<Self> {
        if self.length() != other.length() {
            return Err(LaneError::SizeMismatch {
                expected: self.length(),
                actual: other.length(),
            });
        }
        let lanes = self
            .lanes
            .iter()
            .zip(&other.lanes)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Self::from_parts(self.species, lanes))
    }

    pub fn and(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a & b)
    }

    pub fn or(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a | b)
    }

    pub fn xor(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a ^ b)
    }

    /// `self & !other`
    pub fn and_not(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a & !b)
    }

    /// Lanes where both masks agree
    pub fn eq(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a == b)
    }

    pub fn not(&self) -> Self {
        Self::from_parts(self.species, self.lanes.iter().map(|&a| !a).collect())
    }

    pub fn any_true(&self) -> bool {
        self.lanes.iter().any(|&a| a)
    }

    pub fn all_true(&self) -> bool {
        self.lanes.iter().all(|&a| a)
    }

    pub fn true_count(&self) -> usize {
        self.lanes.iter().filter(|&&a| a).count()
    }

    /// Index of the lowest set lane, or `length()` if none is set
    pub fn first_true(&self) -> usize {
        self.lanes
            .iter()
            .position(|&a| a)
            .unwrap_or(self.length())
    }

    /// Index of the highest set lane, or `length()` if none is set
    pub fn last_true(&self) -> usize {
        self.lanes
            .iter()
            .rposition(|&a| a)
            .unwrap_or(self.length())
    }

    /// Clear lanes whose index `offset + i` falls outside `[0, limit)`
    pub fn index_in_range(&self, offset: isize, limit: usize) -> Self {
        let range = self.species.index_in_range(offset, limit);
        let lanes = self
            .lanes
            .iter()
            .zip(range.as_slice())
            .map(|(&a, &b)| a && b)
            .collect();
        Self::from_parts(self.species, lanes)
    }

    /// Same lanes viewed through a species with the same lane count
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SizeMismatch`] if the lane counts differ.
    pub fn cast<F: Element>(&self, species: Species<F>) -> Result<Mask<F>> {
        if species.length() != self.length() {
            return Err(LaneError::SizeMismatch {
                expected: self.length(),
                actual: species.length(),
            });
        }
        Ok(Mask::from_parts(species, self.lanes.clone()))
    }

    /// Vector with all lane bits set where the mask is set, zero elsewhere
    pub fn to_vector(&self) -> Vector<E> {
        let ones = E::from_lane_bits(-1);
        self.species
            .from_fn(|i| if self.lanes[i] { ones } else { E::ZERO })
    }
}

impl<E: Element> PartialEq for Mask<E> {
    fn eq(&self, other: &Self) -> bool {
        self.species == other.species && self.lanes == other.lanes
    }
}

impl<E: Element> Eq for Mask<E> {}

impl<E: Element> fmt::Debug for Mask<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl<E: Element> fmt::Display for Mask<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mask[")?;
        for &set in &self.lanes {
            f.write_str(if set { "T" } else { "." })?;
        }
        f.write_str("]")
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::Shape;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn test_predicates_consistent(bits in any::<u64>()) {
            let species = Species::<i8>::new(Shape::S512).unwrap();
            let m = Mask::from_long(species, bits);
            prop_assert_eq!(m.true_count() == 0, !m.any_true());
            prop_assert_eq!(m.true_count(), bits.count_ones() as usize);
            if m.any_true() {
                prop_assert!(m.first_true() <= m.last_true());
                prop_assert_eq!(m.first_true(), bits.trailing_zeros() as usize);
                prop_assert_eq!(m.last_true(), 63 - bits.leading_zeros() as usize);
            }
            prop_assert_eq!(m.to_long().unwrap(), bits);
        }

        #[test]
        fn test_de_morgan(a in any::<u8>(), b in any::<u8>()) {
            let species = Species::<i8>::new(Shape::S64).unwrap();
            let ma = Mask::from_long(species, u64::from(a));
            let mb = Mask::from_long(species, u64::from(b));
            let lhs = ma.and(&mb).unwrap().not();
            let rhs = ma.not().or(&mb.not()).unwrap();
            prop_assert_eq!(lhs, rhs);
        }
    }
}
