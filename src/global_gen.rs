//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::{Config, Result};
use inner::GlobalGen;

/// Returns the process-wide global generator state, creating it if none exists.
///
/// Only fetching the shared handle happens under the global lock; identifiers are generated
/// outside it, contending on the sequence counters alone.
fn global_gen() -> Result<Arc<GlobalGen>> {
    static G: OnceLock<Mutex<Arc<GlobalGen>>> = OnceLock::new();

    let lock = match G.get() {
        Some(lock) => lock,
        None => {
            let state = GlobalGen::new()?;
            G.get_or_init(|| Mutex::new(Arc::new(state)))
        }
    };

    let mut state = lock.lock();
    #[cfg(unix)]
    if state.pid != std::process::id() {
        tracing::debug!(
            pid = std::process::id(),
            "process id changed; resetting global generator"
        );
        *state = Arc::new(GlobalGen::new()?);
    }
    Ok(Arc::clone(&state))
}

/// Generates an identifier with the default configuration.
///
/// This function employs a process-wide generator whose sequence counter is shared by every
/// thread, so identifiers never repeat within the process. On Unix, this function resets the
/// generator when the process ID changes (i.e., upon process forks) to prevent collisions across
/// processes.
///
/// # Panics
///
/// Panics if the system random source fails. See [`try_unique`] for the fallible variant.
///
/// # Examples
///
/// ```rust
/// let id = acuid::unique();
/// println!("{id}"); // e.g., "rk5zzm2zkmt5djecxwj4"
/// assert_eq!(id.len(), 20);
/// ```
pub fn unique() -> String {
    try_unique().expect("acuid: could not generate identifier")
}

/// Generates an identifier with the default configuration, or returns an error if the system
/// random source fails.
pub fn try_unique() -> Result<String> {
    global_gen()?.default.try_unique()
}

/// Generates an identifier with a one-off configuration.
///
/// The process-wide sequence counters are shared with [`unique`]: one counts whole-second marks
/// and one counts 1/65536-second marks, chosen by [`Config::host`].
///
/// # Panics
///
/// Panics if the system random source fails. See [`try_unique_with`] for the fallible variant.
///
/// # Examples
///
/// ```rust
/// use acuid::{Alphabet, Config};
///
/// let id = acuid::unique_with(&Config {
///     alphabet: Alphabet::Mixed,
///     ..Default::default()
/// });
/// println!("{id}"); // e.g., "KaGFYkoJhPs3eNx9"
/// assert_eq!(id.len(), 16);
/// ```
pub fn unique_with(config: &Config) -> String {
    try_unique_with(config).expect("acuid: could not generate identifier")
}

/// Generates an identifier with a one-off configuration, or returns an error if the system
/// random source fails.
pub fn try_unique_with(config: &Config) -> Result<String> {
    global_gen()?.generator(config)?.try_unique()
}

mod inner {
    use std::sync::Arc;

    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::with_rand08::Adapter;
    use crate::{Config, Generator, Result, Sequence, StdSystemTime};

    /// The type alias for the random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    pub type GlobalRng = Arc<Adapter<ReseedingRng<ChaCha12Core, OsRng>>>;

    /// Everything the entry points share: the default generator and the narrow-mark counter.
    #[derive(Debug)]
    pub struct GlobalGen {
        #[cfg(unix)]
        pub pid: u32,
        pub default: Generator<GlobalRng>,
        narrow: Arc<Sequence>,
    }

    impl GlobalGen {
        pub fn new() -> Result<Self> {
            let core = ChaCha12Core::from_rng(OsRng)?;
            let rng = Arc::new(Adapter::new(ReseedingRng::new(core, 1024 * 64, OsRng)));
            Ok(Self {
                #[cfg(unix)]
                pid: std::process::id(),
                default: Generator::with_sources(&Config::default(), rng, StdSystemTime)?,
                narrow: Arc::default(),
            })
        }

        /// Returns a generator for `config` sharing the counter of its mark resolution.
        pub fn generator(&self, config: &Config) -> Result<Generator<GlobalRng>> {
            let seq = if config.host.is_narrow() {
                &self.narrow
            } else {
                self.default.sequence()
            };
            let rng = Arc::clone(self.default.rng());
            let g = Generator::with_sources(config, rng, StdSystemTime)?;
            Ok(g.with_sequence(Arc::clone(seq)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{try_unique, unique, unique_with};
    use crate::{Alphabet, Config, HostSetting};
    use std::collections::HashSet;

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| unique()).collect());

    /// Generates lowercase strings of the default length
    #[test]
    fn generates_lowercase_strings_of_the_default_length() {
        let re = regex::Regex::new(r"^[a-km-np-z2-9]{20}([a-km-np-z2-9]{4})*$").unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e), "{e}");
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Generates no sortable sequence
    #[test]
    fn generates_no_sortable_sequence() {
        SAMPLES.with(|samples| {
            let ascending = samples.windows(2).filter(|w| w[0] < w[1]).count();
            let ratio = ascending as f64 / (N_SAMPLES - 1) as f64;
            assert!((ratio - 0.5).abs() < 0.05, "ascending ratio: {ratio}");
        });
    }

    /// Never returns the same identifier twice in a row
    #[test]
    fn never_returns_the_same_identifier_twice_in_a_row() {
        for _ in 0..10_000 {
            assert_ne!(unique(), unique());
            assert_ne!(try_unique().unwrap(), try_unique().unwrap());
        }
    }

    /// Honors one-off configurations
    ///
    /// The whole-second counter is shared with the other tests, so identifiers may carry
    /// overflow words on top of the requested length.
    #[test]
    fn honors_one_off_configurations() {
        for alphabet in [Alphabet::Lower, Alphabet::Mixed] {
            for length in [30, 41] {
                let config = Config {
                    alphabet,
                    length,
                    ..Default::default()
                };
                let len = unique_with(&config).len();
                assert!(len >= length, "{alphabet:?} {len}");
                assert_eq!((len - length) % alphabet.overflow_chars(), 0, "{alphabet:?} {len}");
            }
        }
    }

    /// Mixes default and one-off calls without collision
    #[test]
    fn mixes_default_and_one_off_calls_without_collision() {
        let narrow = Config {
            host: HostSetting::Narrow(1),
            ..Default::default()
        };
        let narrow_default = Config {
            host: HostSetting::NarrowDefault,
            pid: Some(1),
            ..Default::default()
        };
        let mut s = HashSet::new();
        for _ in 0..20_000 {
            assert!(s.insert(unique()));
            assert!(s.insert(unique_with(&narrow)));
            assert!(s.insert(unique_with(&narrow_default)));
            assert!(s.insert(unique_with(&Config::default())));
        }
    }

    /// Generates no duplicates under multithreading
    #[test]
    fn generates_no_duplicates_under_multithreading() -> Result<(), Box<dyn std::error::Error>> {
        use std::{sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(unique()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {err:?}"))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert(e);
        }

        assert_eq!(s.len(), 4 * 10_000);
        Ok(())
    }
}
