//! Scalar (non-SIMD) backend implementation
//!
//! This is the portable baseline implementation that works on all platforms.
//! It uses simple loops without any SIMD instructions and is the reference
//! for the per-lane results of every other backend.

use super::LaneBackend;
use crate::{Element, Result};

/// Scalar backend (portable, no SIMD)
pub struct ScalarBackend;

impl LaneBackend for ScalarBackend {
    fn map_lanes<E, F>(a: &[E], mut f: F) -> Vec<E>
    where
        E: Element,
        F: FnMut(usize, E) -> E,
    {
        a.iter().enumerate().map(|(i, &x)| f(i, x)).collect()
    }

    fn try_zip_lanes<E, F>(a: &[E], b: &[E], mut f: F) -> Result<Vec<E>>
    where
        E: Element,
        F: FnMut(usize, E, E) -> Result<E>,
    {
        let mut result = Vec::with_capacity(a.len());
        for (i, (&x, &y)) in a.iter().zip(b).enumerate() {
            result.push(f(i, x, y)?);
        }
        Ok(result)
    }

    fn zip3_lanes<E, F>(a: &[E], b: &[E], c: &[E], mut f: F) -> Vec<E>
    where
        E: Element,
        F: FnMut(usize, E, E, E) -> E,
    {
        let mut result = Vec::with_capacity(a.len());
        for i in 0..a.len() {
            result.push(f(i, a[i], b[i], c[i]));
        }
        result
    }

    fn test_lanes<E, F>(a: &[E], b: &[E], mut f: F) -> Vec<bool>
    where
        E: Element,
        F: FnMut(usize, E, E) -> bool,
    {
        a.iter()
            .zip(b)
            .enumerate()
            .map(|(i, (&x, &y))| f(i, x, y))
            .collect()
    }

    fn fold_lanes<E, A, F>(a: &[E], active: Option<&[bool]>, init: A, mut f: F) -> A
    where
        E: Element,
        F: FnMut(A, E) -> A,
    {
        let mut acc = init;
        for (i, &x) in a.iter().enumerate() {
            if active.map_or(true, |m| m[i]) {
                acc = f(acc, x);
            }
        }
        acc
    }

    fn select_lanes<E: Element>(mask: &[bool], on: &[E], off: &[E]) -> Vec<E> {
        mask.iter()
            .zip(on.iter().zip(off))
            .map(|(&m, (&x, &y))| if m { x } else { y })
            .collect()
    }
}
