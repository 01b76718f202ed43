//! Integration with `rand` (v0.8) crate.

use parking_lot::Mutex;
use rand::{CryptoRng, RngCore};

use super::{Generator, RandSource, StdSystemTime};
use crate::{Config, Result};

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
///
/// The wrapped generator is locked for the duration of each fill so that one adapter can serve a
/// generator shared across threads.
#[derive(Debug, Default)]
pub struct Adapter<T>(Mutex<T>);

impl<T> Adapter<T> {
    /// Wraps `rng`.
    pub fn new(rng: T) -> Self {
        Self(Mutex::new(rng))
    }

    /// Consumes the adapter and returns the wrapped generator.
    pub fn into_inner(self) -> T {
        self.0.into_inner()
    }
}

impl<T: RngCore + CryptoRng> RandSource for Adapter<T> {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        self.0.lock().try_fill_bytes(dest)?;
        Ok(())
    }
}

impl<T: RngCore + CryptoRng> Generator<Adapter<T>> {
    /// Creates a generator that draws padding from a cryptographically secure [`RngCore`] from
    /// `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use acuid::{Config, Generator};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let g = Generator::with_rand08(
    ///     &Config {
    ///         length: 32,
    ///         ..Default::default()
    ///     },
    ///     StdRng::from_entropy(),
    /// )?;
    /// assert_eq!(g.unique().len(), 32);
    /// # Ok::<(), acuid::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration needs the default host identity, no network address
    /// is available, and the system random source fails.
    pub fn with_rand08(config: &Config, rng: T) -> Result<Self> {
        Self::with_sources(config, Adapter::new(rng), StdSystemTime)
    }
}
