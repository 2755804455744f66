//! Trueno Lanes: Portable Shape-Parameterized SIMD Vectors
//!
//! **Trueno Lanes** models fixed-width SIMD registers as plain values:
//!
//! 1. **Species** - an element kind paired with a shape (register width),
//!    which fixes the lane count
//! 2. **Vectors** - immutable lane sequences with lane-wise arithmetic,
//!    bitwise, shift and comparison operators, optionally masked
//! 3. **Masks** - per-lane booleans with lane algebra and predicates
//! 4. **Shuffles** - lane permutations, zip/unzip, slice/unslice
//! 5. **Memory I/O** - bounds-checked loads and stores against arrays and
//!    byte regions, with masked and gather/scatter variants
//!
//! # Design Principles
//!
//! - **One generic implementation**: `Vector<E>` for every [`Element`] kind,
//!   exact per-kind semantics via a sealed trait
//! - **Pure values**: every operation returns a new vector, nothing is mutated
//! - **Defined edge cases**: integer overflow wraps, shift counts are masked,
//!   integer division by zero is an error, masked-out lanes are never checked
//! - **Runtime shape**: `Shape::Max` follows the detected CPU
//!
//! # Quick Start
//!
//! ```rust
//! use trueno_lanes::{BinaryOp, ReductionOp, Shape, Shuffle, Species};
//!
//! let species = Species::<i8>::new(Shape::S64).unwrap();
//! let a = species.from_fn(|i| i as i8 + 1);
//! let b = species.from_fn(|i| (i as i8 + 1) * 10);
//!
//! let sum = a.lanewise(BinaryOp::Add, &b).unwrap();
//! assert_eq!(&sum.as_slice()[..4], &[11, 22, 33, 44]);
//! assert_eq!(a.reduce_lanes(ReductionOp::Add).unwrap(), 36);
//!
//! let reversed = Shuffle::from_fn(species, |i| 7 - i as i64);
//! assert_eq!(a.rearrange(&reversed).unwrap().lane(0).unwrap(), 8);
//! ```

pub mod backends;
pub mod config;
pub mod dynamic;
pub mod element;
pub mod error;
pub mod mask;
pub mod memory;
pub mod operators;
pub mod reduction;
pub mod shape;
pub mod shuffle;
pub mod species;
pub mod vector;

pub use dynamic::{species, AnySpecies, AnyVector};
pub use element::{Element, ElementKind};
pub use error::{LaneError, Result};
pub use mask::Mask;
pub use memory::{ByteOrder, ByteRegion};
pub use operators::{BinaryOp, Comparison, Conversion, TernaryOp, TestOp, UnaryOp};
pub use reduction::ReductionOp;
pub use shape::Shape;
pub use shuffle::Shuffle;
pub use species::Species;
pub use vector::Vector;

/// Vector register family of the host CPU
///
/// Lane kernels always run on the portable
/// [`ScalarBackend`](backends::scalar::ScalarBackend); the detected family
/// only decides how wide [`Shape::Max`] vectors are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Backend {
    /// No vector registers detected
    Scalar,
    /// 128-bit x86 registers
    SSE2,
    /// 256-bit x86 registers
    AVX,
    /// 256-bit x86 registers with FMA
    AVX2,
    /// 512-bit x86 registers
    AVX512,
    /// 128-bit ARM registers
    NEON,
    /// 128-bit WebAssembly registers
    WasmSIMD,
    /// Detect at configuration time
    Auto,
}

impl Backend {
    /// Register family of the current CPU
    pub fn select_best() -> Self {
        select_best_available_backend()
    }

    /// Register width in bits, used as the width of `Shape::Max`
    ///
    /// Families without vector registers report 128 bits so that every
    /// element kind still gets at least two lanes.
    pub fn max_vector_bits(self) -> usize {
        match self {
            Backend::AVX512 => 512,
            Backend::AVX | Backend::AVX2 => 256,
            Backend::SSE2 | Backend::NEON | Backend::WasmSIMD | Backend::Scalar => 128,
            Backend::Auto => select_best_available_backend().max_vector_bits(),
        }
    }
}

/// Detect the widest vector register family of the current CPU
///
/// x86 is detected at run time (AVX-512, then AVX2 with FMA, AVX, SSE2). ARM
/// and WebAssembly use the compile-time target features. Anything else is
/// [`Backend::Scalar`].
pub fn select_best_available_backend() -> Backend {
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        if is_x86_feature_detected!("avx512f") {
            Backend::AVX512
        } else if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            Backend::AVX2
        } else if is_x86_feature_detected!("avx") {
            Backend::AVX
        } else if is_x86_feature_detected!("sse2") {
            Backend::SSE2
        } else {
            Backend::Scalar
        }
    }

    #[cfg(all(any(target_arch = "aarch64", target_arch = "arm"), target_feature = "neon"))]
    {
        Backend::NEON
    }

    #[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
    {
        Backend::WasmSIMD
    }

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "x86",
        all(any(target_arch = "aarch64", target_arch = "arm"), target_feature = "neon"),
        all(target_arch = "wasm32", target_feature = "simd128")
    )))]
    {
        Backend::Scalar
    }
}
