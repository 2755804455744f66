//! Runtime element-kind dispatch
//!
//! [`AnySpecies`] and [`AnyVector`] are closed variants over the six element
//! kinds, for callers that only learn the kind at run time. Every operation
//! matches all six variants and forwards to the typed API.

use std::fmt;

use crate::element::ElementKind;
use crate::{BinaryOp, Element, LaneError, ReductionOp, Result, Shape, Species, Vector};

/// Species of any supported element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnySpecies {
    Int8(Species<i8>),
    Int16(Species<i16>),
    Int32(Species<i32>),
    Int64(Species<i64>),
    Float32(Species<f32>),
    Float64(Species<f64>),
}

/// Vector of any supported element kind
#[derive(Debug, Clone, PartialEq)]
pub enum AnyVector {
    Int8(Vector<i8>),
    Int16(Vector<i16>),
    Int32(Vector<i32>),
    Int64(Vector<i64>),
    Float32(Vector<f32>),
    Float64(Vector<f64>),
}

/// Evaluate `$body` with `$x` bound to the typed payload of any variant
macro_rules! each_kind {
    ($enum:ident, $value:expr, $x:ident => $body:expr) => {
        match $value {
            $enum::Int8($x) => $body,
            $enum::Int16($x) => $body,
            $enum::Int32($x) => $body,
            $enum::Int64($x) => $body,
            $enum::Float32($x) => $body,
            $enum::Float64($x) => $body,
        }
    };
}

/// Like `each_kind!` but rewraps the result in the matching `AnyVector`
macro_rules! each_kind_vector {
    ($enum:ident, $value:expr, $x:ident => $body:expr) => {
        match $value {
            $enum::Int8($x) => AnyVector::Int8($body),
            $enum::Int16($x) => AnyVector::Int16($body),
            $enum::Int32($x) => AnyVector::Int32($body),
            $enum::Int64($x) => AnyVector::Int64($body),
            $enum::Float32($x) => AnyVector::Float32($body),
            $enum::Float64($x) => AnyVector::Float64($body),
        }
    };
}

/// Species for a runtime element kind and shape
///
/// # Errors
///
/// Returns [`LaneError::UnsupportedShape`] if `shape` cannot hold a whole
/// number of `kind` lanes.
///
/// # Examples
///
/// ```
/// use trueno_lanes::{species, ElementKind, Shape};
///
/// let s = species(ElementKind::Int16, Shape::S256).unwrap();
/// assert_eq!(s.length(), 16);
/// assert_eq!(s.kind(), ElementKind::Int16);
/// ```
pub fn species(kind: ElementKind, shape: Shape) -> Result<AnySpecies> {
    Ok(match kind {
        ElementKind::Int8 => AnySpecies::Int8(Species::new(shape)?),
        ElementKind::Int16 => AnySpecies::Int16(Species::new(shape)?),
        ElementKind::Int32 => AnySpecies::Int32(Species::new(shape)?),
        ElementKind::Int64 => AnySpecies::Int64(Species::new(shape)?),
        ElementKind::Float32 => AnySpecies::Float32(Species::new(shape)?),
        ElementKind::Float64 => AnySpecies::Float64(Species::new(shape)?),
    })
}

fn lanes_from_longs<E: Element>(species: Species<E>, values: &[i64]) -> Result<Vector<E>> {
    let lanes = values
        .iter()
        .map(|&value| {
            E::try_from_i64(value).ok_or(LaneError::UnrepresentableScalar {
                value,
                kind: E::KIND,
            })
        })
        .collect::<Result<Vec<E>>>()?;
    species.from_values(&lanes)
}

impl AnySpecies {
    pub fn kind(&self) -> ElementKind {
        each_kind!(AnySpecies, self, s => s.kind())
    }

    pub fn shape(&self) -> Shape {
        each_kind!(AnySpecies, self, s => s.shape())
    }

    pub fn length(&self) -> usize {
        each_kind!(AnySpecies, self, s => s.length())
    }

    pub fn element_bits(&self) -> usize {
        each_kind!(AnySpecies, self, s => s.element_bits())
    }

    pub fn vector_byte_size(&self) -> usize {
        each_kind!(AnySpecies, self, s => s.vector_byte_size())
    }

    pub fn loop_bound(&self, n: usize) -> usize {
        each_kind!(AnySpecies, self, s => s.loop_bound(n))
    }

    pub fn zero(&self) -> AnyVector {
        each_kind_vector!(AnySpecies, self, s => s.zero())
    }

    /// Broadcast a wide integer that must be exactly representable
    pub fn broadcast_long(&self, value: i64) -> Result<AnyVector> {
        Ok(each_kind_vector!(AnySpecies, self, s => s.broadcast_long(value)?))
    }

    /// Vector from exactly `length()` wide integers
    ///
    /// # Errors
    ///
    /// - [`LaneError::UnrepresentableScalar`] for a value the kind cannot hold
    /// - [`LaneError::SizeMismatch`] for the wrong number of values
    pub fn from_long_array(&self, values: &[i64]) -> Result<AnyVector> {
        Ok(each_kind_vector!(AnySpecies, self, s => lanes_from_longs(*s, values)?))
    }
}

impl fmt::Display for AnySpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        each_kind!(AnySpecies, self, s => fmt::Display::fmt(s, f))
    }
}

impl AnyVector {
    pub fn kind(&self) -> ElementKind {
        each_kind!(AnyVector, self, v => v.species().kind())
    }

    pub fn length(&self) -> usize {
        each_kind!(AnyVector, self, v => v.length())
    }

    /// Lanes widened to `i64`; floating lanes must hold whole values
    pub fn to_long_array(&self) -> Result<Vec<i64>> {
        each_kind!(AnyVector, self, v => v.to_long_array())
    }

    pub fn to_double_array(&self) -> Vec<f64> {
        each_kind!(AnyVector, self, v => v.to_double_array())
    }

    pub fn reduce_lanes_to_long(&self, op: ReductionOp) -> Result<i64> {
        each_kind!(AnyVector, self, v => v.reduce_lanes_to_long(op))
    }

    /// Lane-wise binary operator between vectors of the same kind
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnsupportedConversion`] if the kinds differ, or
    /// any error of [`Vector::lanewise`].
    pub fn lanewise(&self, op: BinaryOp, other: &AnyVector) -> Result<AnyVector> {
        Ok(match (self, other) {
            (AnyVector::Int8(a), AnyVector::Int8(b)) => AnyVector::Int8(a.lanewise(op, b)?),
            (AnyVector::Int16(a), AnyVector::Int16(b)) => AnyVector::Int16(a.lanewise(op, b)?),
            (AnyVector::Int32(a), AnyVector::Int32(b)) => AnyVector::Int32(a.lanewise(op, b)?),
            (AnyVector::Int64(a), AnyVector::Int64(b)) => AnyVector::Int64(a.lanewise(op, b)?),
            (AnyVector::Float32(a), AnyVector::Float32(b)) => {
                AnyVector::Float32(a.lanewise(op, b)?)
            }
            (AnyVector::Float64(a), AnyVector::Float64(b)) => {
                AnyVector::Float64(a.lanewise(op, b)?)
            }
            _ => {
                return Err(LaneError::UnsupportedConversion {
                    from: other.kind(),
                    to: self.kind(),
                })
            }
        })
    }
}

impl fmt::Display for AnyVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        each_kind!(AnyVector, self, v => fmt::Display::fmt(v, f))
    }
}
