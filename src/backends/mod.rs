//! Backend implementations of the lane kernels
//!
//! Every vector, mask and reduction operation is expressed as one of a handful
//! of lane kernels (map, fallible zip, zip3, test, fold, select). A backend supplies
//! those kernels; the public types never touch lanes directly.
//!
//! # Backends
//!
//! - `scalar`: Portable baseline implementation (one lane per step)
//!
//! Architecture-specific kernels plug in behind the same trait. Whatever a
//! backend does internally, it must produce exactly the per-lane results of
//! the scalar backend.

pub mod scalar;

use crate::{Element, Result};

/// Lane kernel interface shared by all backends
///
/// Kernels receive the lane index alongside the lane values so that masked
/// operations can consult the mask for the same lane. Input slices passed to
/// one kernel call always have the same length.
pub trait LaneBackend {
    /// `out[i] = f(i, a[i])`
    fn map_lanes<E, F>(a: &[E], f: F) -> Vec<E>
    where
        E: Element,
        F: FnMut(usize, E) -> E;

    /// `out[i] = f(i, a[i], b[i])`, stopping at the first failing lane
    fn try_zip_lanes<E, F>(a: &[E], b: &[E], f: F) -> Result<Vec<E>>
    where
        E: Element,
        F: FnMut(usize, E, E) -> Result<E>;

    /// `out[i] = f(i, a[i], b[i], c[i])`
    fn zip3_lanes<E, F>(a: &[E], b: &[E], c: &[E], f: F) -> Vec<E>
    where
        E: Element,
        F: FnMut(usize, E, E, E) -> E;

    /// `out[i] = f(i, a[i], b[i])` producing one boolean per lane
    fn test_lanes<E, F>(a: &[E], b: &[E], f: F) -> Vec<bool>
    where
        E: Element,
        F: FnMut(usize, E, E) -> bool;

    /// Fold the lanes whose `active` flag is set, in increasing lane order
    fn fold_lanes<E, A, F>(a: &[E], active: Option<&[bool]>, init: A, f: F) -> A
    where
        E: Element,
        F: FnMut(A, E) -> A;

    /// `out[i] = mask[i] ? on[i] : off[i]`
    fn select_lanes<E: Element>(mask: &[bool], on: &[E], off: &[E]) -> Vec<E>;
}
