//! Species: an element kind paired with a shape

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::element::ElementKind;
use crate::{Element, LaneError, Mask, Result, Shape, Shuffle, Vector};

/// Descriptor fixing the element kind, shape and lane count of a vector
///
/// Species are small `Copy` values; two species are equal iff their element
/// kinds and shapes are equal. `Shape::Max` is a distinct shape even when it
/// resolves to the same width as a fixed shape.
///
/// # Examples
///
/// ```
/// use trueno_lanes::{Shape, Species};
///
/// let species = Species::<i32>::new(Shape::S256).unwrap();
/// assert_eq!(species.length(), 8);
/// assert_eq!(species.vector_byte_size(), 32);
/// assert_eq!(species.loop_bound(21), 16);
/// ```
pub struct Species<E> {
    shape: Shape,
    bits: usize,
    _kind: PhantomData<fn() -> E>,
}

// Manual impls: the derives would demand `E: Eq + Hash`, which floats lack.
impl<E> Clone for Species<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Species<E> {}

impl<E> PartialEq for Species<E> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
    }
}

impl<E> Eq for Species<E> {}

impl<E: Element> Hash for Species<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        E::KIND.hash(state);
        self.shape.hash(state);
    }
}

impl<E: Element> fmt::Debug for Species<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Species")
            .field("kind", &E::KIND)
            .field("shape", &self.shape)
            .field("length", &self.length())
            .finish()
    }
}

impl<E: Element> Species<E> {
    /// Species for the given shape
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnsupportedShape`] if the shape's width is not a
    /// positive multiple of the element width.
    pub fn new(shape: Shape) -> Result<Self> {
        let bits = shape.bits();
        if bits < E::BITS || bits % E::BITS != 0 {
            return Err(LaneError::UnsupportedShape { bits });
        }
        Ok(Self {
            shape,
            bits,
            _kind: PhantomData,
        })
    }

    /// Species of the widest shape on this platform
    pub fn preferred() -> Result<Self> {
        Self::new(Shape::Max)
    }

    /// Same shape, different element kind
    pub fn with_lanes<F: Element>(&self) -> Result<Species<F>> {
        Species::new(self.shape)
    }

    /// Same element kind, different shape
    pub fn with_shape(&self, shape: Shape) -> Result<Self> {
        Self::new(shape)
    }

    pub fn kind(&self) -> ElementKind {
        E::KIND
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of lanes (`shape bits / element bits`)
    pub fn length(&self) -> usize {
        self.bits / E::BITS
    }

    pub fn element_bits(&self) -> usize {
        E::BITS
    }

    /// Size of one lane in bytes
    pub fn element_size(&self) -> usize {
        E::BITS / 8
    }

    pub fn vector_bit_size(&self) -> usize {
        self.bits
    }

    pub fn vector_byte_size(&self) -> usize {
        self.bits / 8
    }

    /// Largest multiple of the lane count not exceeding `n`
    ///
    /// The usual upper bound for a vectorized loop over `n` elements; the
    /// remaining tail is handled with [`Species::index_in_range`] masks.
    pub fn loop_bound(&self, n: usize) -> usize {
        n - (n % self.length())
    }

    /// Mask with lane `i` set iff `offset + i` lies in `[0, limit)`
    pub fn index_in_range(&self, offset: isize, limit: usize) -> Mask<E> {
        Mask::from_fn(*self, |i| {
            let index = offset as i64 + i as i64;
            index >= 0 && (index as u64) < limit as u64
        })
    }

    /// Mask with every lane set to `value`
    pub fn mask_all(&self, value: bool) -> Mask<E> {
        Mask::from_fn(*self, |_| value)
    }

    /// Vector with every lane zero
    pub fn zero(&self) -> Vector<E> {
        self.broadcast(E::ZERO)
    }

    /// Vector with every lane equal to `value`
    pub fn broadcast(&self, value: E) -> Vector<E> {
        Vector::from_parts(*self, vec![value; self.length()])
    }

    /// Broadcast a wide integer that must be exactly representable
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnrepresentableScalar`] if `value` does not
    /// round-trip through the element kind.
    pub fn broadcast_long(&self, value: i64) -> Result<Vector<E>> {
        let lane = E::try_from_i64(value).ok_or(LaneError::UnrepresentableScalar {
            value,
            kind: E::KIND,
        })?;
        Ok(self.broadcast(lane))
    }

    /// Vector whose lane `i` is `base + i * step`
    ///
    /// Integral lanes wrap modulo the lane width when `wrap` is set; otherwise
    /// a lane value outside the kind's range is an error. Floating lanes are
    /// computed with IEEE arithmetic and never fail.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnrepresentableScalar`] for an out-of-range
    /// integral lane when `wrap` is false.
    pub fn iota(&self, base: E, step: E, wrap: bool) -> Result<Vector<E>> {
        let mut lanes = Vec::with_capacity(self.length());
        for i in 0..self.length() {
            if E::KIND.is_floating() {
                lanes.push(base.add_lane(E::from_i64(i as i64).mul_lane(step)));
                continue;
            }
            let exact = base.to_i64() as i128 + i as i128 * step.to_i64() as i128;
            if wrap {
                lanes.push(E::from_i64(exact as i64));
            } else {
                let narrow = i64::try_from(exact)
                    .ok()
                    .and_then(E::try_from_i64)
                    .ok_or(LaneError::UnrepresentableScalar {
                        value: exact as i64,
                        kind: E::KIND,
                    })?;
                lanes.push(narrow);
            }
        }
        Ok(Vector::from_parts(*self, lanes))
    }

    /// Vector whose lane `i` is `f(i)`
    pub fn from_fn<F>(&self, f: F) -> Vector<E>
    where
        F: FnMut(usize) -> E,
    {
        Vector::from_parts(*self, (0..self.length()).map(f).collect())
    }

    /// Vector holding exactly the given lane values
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SizeMismatch`] unless `values.len()` equals the
    /// lane count.
    pub fn from_values(&self, values: &[E]) -> Result<Vector<E>> {
        if values.len() != self.length() {
            return Err(LaneError::SizeMismatch {
                expected: self.length(),
                actual: values.len(),
            });
        }
        Ok(Vector::from_parts(*self, values.to_vec()))
    }

    /// Shuffle whose lane `i` is `start + i * step`, reduced modulo the lane
    /// count when `wrap` is set
    pub fn shuffle_iota(&self, start: i64, step: i64, wrap: bool) -> Shuffle<E> {
        Shuffle::iota(*self, start, step, wrap)
    }

    /// Fail unless `other` is the same species
    pub(crate) fn check(&self, other: &Species<E>) -> Result<()> {
        if self.shape != other.shape {
            return Err(LaneError::ShapeMismatch {
                expected: self.bits,
                actual: other.bits,
            });
        }
        Ok(())
    }
}

impl<E: Element> fmt::Display for Species<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Species[{}, {} lanes, {}]",
            E::KIND,
            self.length(),
            self.shape
        )
    }
}
