//! Randomness for providers that need it.
//!
//! Each invocation builds a fresh ChaCha-based [`StdRng`]. Production code
//! seeds it from the operating system so concurrently running provider
//! processes share no generator state; tests seed it with a fixed value.

use rand::SeedableRng;
use rand::rngs::{OsRng, StdRng};

use crate::error::OperationError;

/// Source of seeded random number generators.
#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
pub trait EntropySource {
    /// Returns a generator ready for use.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Io`] when the operating system cannot
    /// supply seed material.
    fn rng(&self) -> Result<StdRng, OperationError>;
}

/// Seeds generators from the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn rng(&self) -> Result<StdRng, OperationError> {
        StdRng::from_rng(OsRng).map_err(|error| {
            OperationError::io("failed to seed random source", std::io::Error::other(error))
        })
    }
}

/// Seeds every generator with the same value.
///
/// # Example
///
/// ```
/// use rand::Rng;
/// use upfn_protocol::{EntropySource, SeededEntropy};
///
/// let source = SeededEntropy::new(7);
/// let a: u64 = source.rng().expect("seeded").r#gen();
/// let b: u64 = source.rng().expect("seeded").r#gen();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededEntropy {
    seed: u64,
}

impl SeededEntropy {
    /// Uses `seed` for every generator.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Returns the seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl EntropySource for SeededEntropy {
    fn rng(&self) -> Result<StdRng, OperationError> {
        Ok(StdRng::seed_from_u64(self.seed))
    }
}

impl<T: EntropySource + ?Sized> EntropySource for &T {
    fn rng(&self) -> Result<StdRng, OperationError> {
        (**self).rng()
    }
}
