//! Identifier generator and related types.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::{rngs::OsRng, RngCore};

use crate::{buffer, scramble, Alphabet, Config, HostMode, Result, Sequence};

pub mod with_rand08;


/// A trait that defines the random byte source a [`Generator`] draws padding from.
///
/// Implementations must be cryptographically strong: padding bits carry the uniqueness of long
/// identifiers. A source that cannot produce bytes must return an error rather than fill `dest`
/// with anything predictable.
pub trait RandSource {
    /// Fills `dest` with random data.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()>;
}

impl RandSource for OsRng {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        OsRng.try_fill_bytes(dest)?;
        Ok(())
    }
}

impl<S: RandSource + ?Sized> RandSource for Arc<S> {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }
}

/// A trait that defines the system clock interface for [`Generator`].
pub trait TimeSource {
    /// Returns the time elapsed since the Unix epoch.
    fn now(&self) -> Duration;
}

/// The default [`TimeSource`] that reads the current time from [`SystemTime`].
///
/// A clock set before the Unix epoch reads as zero; the sequence counter then keeps reusing the
/// last mark it saw.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}

/// Represents an identifier generator configured once and shared freely between threads.
///
/// Each identifier is built from the current mark, the host identity, the process identity, and a
/// per-mark sequence number. The four fields are scrambled so identifiers look random and carry no
/// visible order, then padded and encoded into the configured [`Alphabet`].
///
/// The only mutable state is the [`Sequence`] counter, whose lock is held just long enough to bump
/// it. Every generator owns a fresh counter unless one is injected with
/// [`with_sequence`](Self::with_sequence); generators configured with the same host and process
/// identity only produce disjoint identifiers when they share a counter.
///
/// # Examples
///
/// ```rust
/// use acuid::{Alphabet, Config, Generator};
///
/// let g = Generator::new(&Config {
///     alphabet: Alphabet::Mixed,
///     length: 24,
///     ..Default::default()
/// })?;
/// let id = g.unique();
/// assert_eq!(id.len(), 24);
/// assert_ne!(g.unique(), id);
/// # Ok::<(), acuid::Error>(())
/// ```
#[derive(Debug)]
pub struct Generator<R = OsRng, T = StdSystemTime> {
    alphabet: Alphabet,
    num_chars: usize,
    num_bytes: usize,
    host: HostMode,
    pid: u16,
    seq: Arc<Sequence>,
    rng: R,
    time: T,
}

impl Generator {
    /// Creates a generator that pads from the operating system and reads the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration needs the default host identity, no network address
    /// is available, and the system random source fails.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_sources(config, OsRng, StdSystemTime)
    }
}

impl<R: RandSource, T: TimeSource> Generator<R, T> {
    /// Creates a generator with a specified random byte source and clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration needs the default host identity, no network address
    /// is available, and the system random source fails.
    pub fn with_sources(config: &Config, rng: R, time: T) -> Result<Self> {
        let (num_chars, num_bytes) = config.alphabet.calc_bytes(config.length);
        Ok(Self {
            alphabet: config.alphabet,
            num_chars,
            num_bytes,
            host: config.host.resolve()?,
            pid: config.resolve_pid(),
            seq: Arc::default(),
            rng,
            time,
        })
    }

    /// Replaces the generator's counter with a shared one.
    pub fn with_sequence(mut self, seq: Arc<Sequence>) -> Self {
        self.seq = seq;
        self
    }

    /// Returns the counter this generator advances.
    pub fn sequence(&self) -> &Arc<Sequence> {
        &self.seq
    }

    pub(crate) fn rng(&self) -> &R {
        &self.rng
    }

    /// Returns the configured alphabet.
    pub const fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Returns the length of identifiers produced while the sequence fits in one word.
    pub const fn min_len(&self) -> usize {
        self.num_chars
    }

    /// Returns the resolved host identity.
    pub const fn host(&self) -> HostMode {
        self.host
    }

    /// Returns the process identity.
    pub const fn pid(&self) -> u16 {
        self.pid
    }

    /// Generates a new identifier.
    ///
    /// # Panics
    ///
    /// Panics if the random source fails to produce padding. See
    /// [`try_unique`](Self::try_unique) for the fallible variant.
    pub fn unique(&self) -> String {
        self.try_unique().expect("acuid: could not generate identifier")
    }

    /// Generates a new identifier, or returns an error if the random source fails.
    pub fn try_unique(&self) -> Result<String> {
        let (mark, seqs) = self.seq.next(self.host.mark(self.time.now()));
        let (word1, word2) = self.host.pack(mark);

        // id = encoded( scrambled( time + host + pid + counter ) + overflow + padding )
        let scrambled = scramble(word1, word2, self.pid, seqs.first());
        let overflow = seqs.overflow();
        let fill_to = self.fill_target(overflow.len());
        let buf = buffer::assemble(scrambled, overflow, fill_to, &self.rng)?;

        let mut id = self.alphabet.encode(&buf);
        id.truncate(self.num_chars + overflow.len() * self.alphabet.overflow_chars());
        Ok(id)
    }

    /// Returns the buffer size to pad to when `extra_words` overflow words are present.
    ///
    /// The configured byte count is kept unless the buffer it leads to cannot encode to the
    /// extended length, which only happens with explicit lengths.
    fn fill_target(&self, extra_words: usize) -> usize {
        if extra_words == 0 {
            return self.num_bytes;
        }
        let bits = self.alphabet.bits_per_char();
        let chars = self.num_chars + extra_words * self.alphabet.overflow_chars();
        let len = buffer::SCRAMBLED_BYTES + 2 * extra_words;
        if self.num_bytes <= len && ((len + 1) * 8).div_ceil(bits) >= chars {
            // exact fit plus the tail byte
            self.num_bytes
        } else {
            self.num_bytes.max((chars * bits).div_ceil(8))
        }
    }
}
