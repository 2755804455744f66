//! Lane permutations
//!
//! A [`Shuffle`] stores one source index per lane. For a species with `N`
//! lanes an index in `[0, N)` names a source lane directly and an index in
//! `[-N, 0)` names lane `index + N`; any other value marks the lane invalid.
//! Single-vector permutations fail on an invalid lane, while two-vector
//! permutations ([`Vector::rearrange_with`]) take every valid lane from the
//! first vector and every invalid lane from the second, at the index reduced
//! modulo `N`.
//!
//! Slicing is expressed through two-vector permutations: `slice(origin, w)`
//! is the iota shuffle starting at `origin` applied to the pair `(self, w)`.

use std::fmt;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Element, LaneError, Mask, Result, Species, Vector};

/// Per-lane source index table tied to a species
///
/// # Examples
///
/// ```
/// use trueno_lanes::{Shape, Shuffle, Species};
///
/// let species = Species::<i8>::new(Shape::S64).unwrap();
/// let v = species.from_fn(|i| i as i8 * 10);
///
/// let rotate = Shuffle::iota(species, 3, 1, true);
/// assert_eq!(v.rearrange(&rotate).unwrap().as_slice(), &[30, 40, 50, 60, 70, 0, 10, 20]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Shuffle<E: Element> {
    species: Species<E>,
    lanes: Vec<i64>,
}

impl<E: Element> Shuffle<E> {
    fn from_parts(species: Species<E>, lanes: Vec<i64>) -> Self {
        debug_assert_eq!(lanes.len(), species.length());
        Self { species, lanes }
    }

    /// Shuffle holding exactly the given indices
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SizeMismatch`] unless `indices.len()` equals the
    /// lane count.
    pub fn from_values(species: Species<E>, indices: &[i64]) -> Result<Self> {
        if indices.len() != species.length() {
            return Err(LaneError::SizeMismatch {
                expected: species.length(),
                actual: indices.len(),
            });
        }
        Ok(Self::from_parts(species, indices.to_vec()))
    }

    /// Shuffle whose lane `i` is `f(i)`
    pub fn from_fn<F>(species: Species<E>, f: F) -> Self
    where
        F: FnMut(usize) -> i64,
    {
        Self::from_parts(species, (0..species.length()).map(f).collect())
    }

    /// Lane `i` is `start + i * step`, reduced modulo the lane count when
    /// `wrap` is set
    ///
    /// Without `wrap`, lanes that fall outside `[-N, N)` are invalid.
    pub fn iota(species: Species<E>, start: i64, step: i64, wrap: bool) -> Self {
        let n = species.length() as i64;
        Self::from_fn(species, |i| {
            let index = start.wrapping_add((i as i64).wrapping_mul(step));
            if wrap {
                index.rem_euclid(n)
            } else {
                index
            }
        })
    }

    /// Interleaving shuffle for [`Vector::rearrange_with`]
    ///
    /// Zipping `a` with `b` conceptually produces `a0 b0 a1 b1 ...` of twice
    /// the lane count; `part` 0 selects its low half and `part` 1 its high
    /// half.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidPart`] unless `part` is 0 or 1.
    pub fn make_zip(species: Species<E>, part: i32) -> Result<Self> {
        check_part(part)?;
        let n = species.length();
        Ok(Self::from_fn(species, |i| {
            let p = part as usize * n + i;
            (p / 2 + (p % 2) * n) as i64
        }))
    }

    /// De-interleaving shuffle for [`Vector::rearrange_with`]
    ///
    /// Reverses [`Shuffle::make_zip`]: applied to the zipped low and high
    /// halves, `part` 0 recovers the even lanes and `part` 1 the odd lanes.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidPart`] unless `part` is 0 or 1.
    pub fn make_unzip(species: Species<E>, part: i32) -> Result<Self> {
        check_part(part)?;
        Ok(Self::from_fn(species, |i| 2 * i as i64 + part as i64))
    }

    pub fn species(&self) -> Species<E> {
        self.species
    }

    pub fn length(&self) -> usize {
        self.lanes.len()
    }

    /// Raw indices in lane order
    pub fn as_slice(&self) -> &[i64] {
        &self.lanes
    }

    pub fn to_array(&self) -> Vec<i64> {
        self.lanes.clone()
    }

    /// Source lane of lane `i`, or `None` if the lane is invalid
    pub fn lane_source(&self, i: usize) -> Option<usize> {
        let n = self.length() as i64;
        let raw = *self.lanes.get(i)?;
        if (-n..n).contains(&raw) {
            Some(raw.rem_euclid(n) as usize)
        } else {
            None
        }
    }

    /// Mask of the lanes holding a valid index
    pub fn lane_is_valid(&self) -> Mask<E> {
        Mask::from_fn(self.species, |i| self.lane_source(i).is_some())
    }

    /// Shuffle with every index normalized to `[0, N)`
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidPermutation`] for the first invalid lane.
    pub fn check_indexes(&self) -> Result<Self> {
        let lanes = (0..self.length())
            .map(|i| self.source(i).map(|s| s as i64))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_parts(self.species, lanes))
    }

    /// Shuffle with every index reduced modulo `N`, so every lane is valid
    pub fn wrap_indexes(&self) -> Self {
        let n = self.length() as i64;
        Self::from_parts(
            self.species,
            self.lanes.iter().map(|&raw| raw.rem_euclid(n)).collect(),
        )
    }

    /// Indices as lane values
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnrepresentableScalar`] for an index the element
    /// kind cannot hold.
    pub fn to_vector(&self) -> Result<Vector<E>> {
        let lanes = self
            .lanes
            .iter()
            .map(|&raw| {
                E::try_from_i64(raw).ok_or(LaneError::UnrepresentableScalar {
                    value: raw,
                    kind: E::KIND,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Vector::from_parts(self.species, lanes))
    }

    /// Shuffle whose lane `i` is this shuffle's index at `other`'s source
    /// for lane `i`
    ///
    /// Rearranging by the result equals rearranging by `self` and then by
    /// `other`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidPermutation`] if `other` has an invalid
    /// lane.
    pub fn compose(&self, other: &Self) -> Result<Self> {
        self.species.check(&other.species)?;
        let lanes = (0..self.length())
            .map(|i| other.source(i).map(|s| self.lanes[s]))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_parts(self.species, lanes))
    }

    fn source(&self, i: usize) -> Result<usize> {
        self.lane_source(i).ok_or(LaneError::InvalidPermutation {
            lane: i,
            index: self.lanes[i],
        })
    }
}

fn check_part(part: i32) -> Result<()> {
    if part == 0 || part == 1 {
        Ok(())
    } else {
        Err(LaneError::InvalidPart { part, limit: 2 })
    }
}

impl<E: Element> fmt::Display for Shuffle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Shuffle[")?;
        for (i, raw) in self.lanes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{raw}")?;
        }
        f.write_str("]")
    }
}

impl<E: Element> Vector<E> {
    fn check_shuffle(&self, shuffle: &Shuffle<E>) -> Result<()> {
        self.species().check(&shuffle.species)
    }

    fn check_origin(&self, origin: usize) -> Result<()> {
        if origin >= self.length() {
            return Err(LaneError::InvalidOrigin {
                origin,
                length: self.length(),
            });
        }
        Ok(())
    }

    /// Lane `i` of the result is lane `shuffle[i]` of `self`
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidPermutation`] if any shuffle lane is
    /// invalid.
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = self.length())))]
    pub fn rearrange(&self, shuffle: &Shuffle<E>) -> Result<Self> {
        self.check_shuffle(shuffle)?;
        let src = self.as_slice();
        let lanes = (0..self.length())
            .map(|i| shuffle.source(i).map(|s| src[s]))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_parts(self.species(), lanes))
    }

    /// [`Vector::rearrange`] on the lanes set in `mask`; other lanes are zero
    ///
    /// Only active lanes must hold a valid index.
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = self.length())))]
    pub fn rearrange_masked(&self, shuffle: &Shuffle<E>, mask: &Mask<E>) -> Result<Self> {
        self.check_shuffle(shuffle)?;
        self.check_mask(mask)?;
        let src = self.as_slice();
        let lanes = mask
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, &active)| {
                if active {
                    shuffle.source(i).map(|s| src[s])
                } else {
                    Ok(E::ZERO)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_parts(self.species(), lanes))
    }

    /// Two-vector permutation
    ///
    /// A valid lane selects from `self` exactly as [`Vector::rearrange`]
    /// does. An invalid lane selects lane `index mod N` of `other`, so the
    /// indices `N..2N` address `other` directly. Never fails on index values.
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = self.length())))]
    pub fn rearrange_with(&self, shuffle: &Shuffle<E>, other: &Self) -> Result<Self> {
        self.check(other)?;
        self.check_shuffle(shuffle)?;
        let n = self.length() as i64;
        let (a, b) = (self.as_slice(), other.as_slice());
        let lanes = shuffle
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, &raw)| match shuffle.lane_source(i) {
                Some(s) => a[s],
                None => b[raw.rem_euclid(n) as usize],
            })
            .collect();
        Ok(Self::from_parts(self.species(), lanes))
    }

    fn index_shuffle(&self) -> Shuffle<E> {
        Shuffle::from_parts(
            self.species(),
            self.as_slice().iter().map(|&x| x.to_i64()).collect(),
        )
    }

    /// Use this vector's lanes as indices into `source`
    ///
    /// Equivalent to `source.rearrange(shuffle)` where the shuffle holds
    /// this vector's lane values (floating lanes truncate).
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidPermutation`] for an index outside
    /// `[-N, N)`.
    pub fn select_from(&self, source: &Self) -> Result<Self> {
        self.check(source)?;
        source.rearrange(&self.index_shuffle())
    }

    /// [`Vector::select_from`] on the lanes set in `mask`; other lanes are zero
    pub fn select_from_masked(&self, source: &Self, mask: &Mask<E>) -> Result<Self> {
        self.check(source)?;
        source.rearrange_masked(&self.index_shuffle(), mask)
    }

    /// Use this vector's lanes as indices into the pair `(first, second)`
    ///
    /// Valid indices select from `first`, invalid ones from `second`, as in
    /// [`Vector::rearrange_with`].
    pub fn select_from_pair(&self, first: &Self, second: &Self) -> Result<Self> {
        self.check(first)?;
        first.rearrange_with(&self.index_shuffle(), second)
    }

    /// Shift lanes down by `origin`, filling the top `origin` lanes from the
    /// bottom of `next` (or with zero)
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidOrigin`] unless `origin < N`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trueno_lanes::{Shape, Species};
    ///
    /// let species = Species::<i32>::new(Shape::S128).unwrap();
    /// let a = species.from_values(&[1, 2, 3, 4]).unwrap();
    /// let b = species.from_values(&[5, 6, 7, 8]).unwrap();
    /// assert_eq!(a.slice(1, Some(&b)).unwrap().as_slice(), &[2, 3, 4, 5]);
    /// assert_eq!(a.slice(3, None).unwrap().as_slice(), &[4, 0, 0, 0]);
    /// ```
    pub fn slice(&self, origin: usize, next: Option<&Self>) -> Result<Self> {
        self.check_origin(origin)?;
        let window = Shuffle::iota(self.species(), origin as i64, 1, false);
        match next {
            Some(next) => self.rearrange_with(&window, next),
            None => self.rearrange_with(&window, &self.species().zero()),
        }
    }

    /// [`Vector::slice`] on the lanes set in `mask`; other lanes are zero
    pub fn slice_masked(&self, origin: usize, next: &Self, mask: &Mask<E>) -> Result<Self> {
        self.check_mask(mask)?;
        let sliced = self.slice(origin, Some(next))?;
        self.species().zero().blend(&sliced, mask)
    }

    /// Inverse of [`Vector::slice`]
    ///
    /// Conceptually `self` is written at lane `origin` of the double-width
    /// pair `(background, background)` and half `part` of the result is
    /// returned:
    /// - `part` 0: lane `i >= origin` is `self[i - origin]`, other lanes come
    ///   from `background`
    /// - `part` 1: lane `i < origin` is `self[i - origin + N]`, other lanes
    ///   come from `background`
    ///
    /// # Errors
    ///
    /// - [`LaneError::InvalidOrigin`] unless `origin < N`
    /// - [`LaneError::InvalidPart`] unless `part` is 0 or 1
    pub fn unslice(&self, origin: usize, background: &Self, part: i32) -> Result<Self> {
        self.check(background)?;
        self.check_origin(origin)?;
        check_part(part)?;
        let species = self.species();
        let inserted = Mask::from_fn(species, |i| (i >= origin) == (part == 0));
        let shifted = self.rearrange(&Shuffle::iota(species, -(origin as i64), 1, true))?;
        background.blend(&shifted, &inserted)
    }

    /// [`Vector::unslice`] writing only the lanes of `self` set in `mask`
    ///
    /// Unselected lanes of the inserted window keep the background value.
    pub fn unslice_masked(
        &self,
        origin: usize,
        background: &Self,
        part: i32,
        mask: &Mask<E>,
    ) -> Result<Self> {
        self.check_mask(mask)?;
        let window = background.slice(origin, Some(background))?;
        let merged = window.blend(self, mask)?;
        merged.unslice(origin, background, part)
    }
}
