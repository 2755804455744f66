//! Platform configuration
//!
//! Decides how wide [`Shape::Max`] vectors are. The process-wide instance is
//! resolved once, from CPU feature detection and the `TRUENO_LANES_MAX_BITS`
//! environment variable.
//!
//! # Examples
//!
//! ```
//! use trueno_lanes::config::PlatformConfig;
//! use trueno_lanes::Backend;
//!
//! let config = PlatformConfig::new()
//!     .with_backend(Backend::AVX2)
//!     .with_max_bits(512)
//!     .build();
//! assert_eq!(config.max_bits(), 512);
//! assert!(config.validate().is_ok());
//! ```
//!
//! [`Shape::Max`]: crate::Shape::Max

use std::sync::OnceLock;

use crate::{select_best_available_backend, Backend, LaneError, Result, Shape};

/// Environment variable overriding the width of [`Shape::Max`](crate::Shape::Max)
pub const MAX_BITS_ENV: &str = "TRUENO_LANES_MAX_BITS";

static GLOBAL: OnceLock<PlatformConfig> = OnceLock::new();

/// Widest-shape settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Detected register family; only used to size the widest shape
    pub backend: Backend,
    /// Width in bits of the widest shape
    pub max_bits: usize,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self::detect()
    }
}

impl PlatformConfig {
    /// Configuration for the detected CPU
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the widest shape from the detected register family
    pub fn detect() -> Self {
        let backend = select_best_available_backend();
        Self {
            backend,
            max_bits: backend.max_vector_bits(),
        }
    }

    /// Size the widest shape for a register family; `Backend::Auto`
    /// re-runs detection
    ///
    /// Resets the widest shape to the backend's register width.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        let resolved = match backend {
            Backend::Auto => select_best_available_backend(),
            other => other,
        };
        self.backend = resolved;
        self.max_bits = resolved.max_vector_bits();
        self
    }

    /// Override the widest shape
    pub fn with_max_bits(mut self, bits: usize) -> Self {
        self.max_bits = bits;
        self
    }

    /// Finalize configuration (no-op, for builder pattern consistency)
    pub fn build(self) -> Self {
        self
    }

    /// Check that the widest shape is one of the fixed shapes
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::UnsupportedShape`] otherwise.
    pub fn validate(&self) -> Result<()> {
        Shape::from_bits(self.max_bits).map(|_| ())
    }

    /// Width in bits of [`Shape::Max`](crate::Shape::Max)
    pub fn max_bits(&self) -> usize {
        self.max_bits
    }

    /// Detected configuration with the environment override applied
    ///
    /// Values that are not a supported shape width are ignored.
    pub fn from_env() -> Self {
        let detected = Self::detect();
        match std::env::var(MAX_BITS_ENV) {
            Ok(raw) => match Self::parse_max_bits(&raw) {
                Ok(bits) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(bits, "widest shape overridden from {}", MAX_BITS_ENV);
                    detected.with_max_bits(bits)
                }
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(value = %raw, error = %_err, "ignoring {}", MAX_BITS_ENV);
                    detected
                }
            },
            Err(_) => detected,
        }
    }

    /// Process-wide configuration, resolved on first use
    pub fn global() -> &'static PlatformConfig {
        GLOBAL.get_or_init(|| {
            let config = Self::from_env();
            #[cfg(feature = "tracing")]
            tracing::debug!(
                backend = ?config.backend,
                max_bits = config.max_bits,
                "platform configuration resolved"
            );
            config
        })
    }

    fn parse_max_bits(raw: &str) -> Result<usize> {
        let bits = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| LaneError::UnsupportedShape { bits: 0 })?;
        Shape::from_bits(bits).map(|shape| shape.bits())
    }
}
