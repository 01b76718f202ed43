//! Per-mark sequence counter.

use std::ops;

use parking_lot::Mutex;

/// Maximum number of 16-bit words a 64-bit counter can spill into.
const MAX_WORDS: usize = 4;

/// Represents a sequence counter keyed by a coarse time value (the "mark").
///
/// The counter restarts at zero whenever the mark advances and increments by one for every call
/// that observes the same mark. A mark smaller than the one already seen is replaced by the stored
/// mark, so the effective mark never goes backwards.
///
/// The state is guarded by a mutex held only across the compare-and-update; a single counter can
/// be shared by any number of threads, typically through an [`Arc`](std::sync::Arc).
///
/// # Examples
///
/// ```rust
/// use acuid::Sequence;
///
/// let seq = Sequence::new();
/// assert_eq!(seq.next(10), (10, [0].into()));
/// assert_eq!(seq.next(10), (10, [1].into()));
/// assert_eq!(seq.next(9), (10, [2].into())); // clock went backwards
/// assert_eq!(seq.next(11), (11, [0].into()));
/// ```
#[derive(Debug, Default)]
pub struct Sequence {
    state: Mutex<State>,
}

#[derive(Clone, Copy, Debug, Default)]
struct State {
    mark: u64,
    counter: u64,
}

impl Sequence {
    /// Creates a counter whose stored mark is zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the counter for `mark`, returning the effective mark and the sequence words.
    ///
    /// The first word is the low 16 bits of the counter. Once the counter no longer fits in 16
    /// bits, each further 16 bits become another word, exclusive-ORed with the low 16 bits of
    /// the mark. Words are ordered least significant first.
    pub fn next(&self, mark: u64) -> (u64, SeqWords) {
        let mut state = self.state.lock();

        let mark = if mark < state.mark {
            tracing::trace!(requested = mark, stored = state.mark, "reusing stored mark");
            state.mark
        } else {
            mark
        };

        if mark != state.mark {
            state.mark = mark;
            state.counter = 0;
            return (mark, SeqWords::single(0));
        }

        state.counter = state.counter.wrapping_add(1);
        let counter = state.counter;
        drop(state);

        if counter <= 0xffff {
            return (mark, SeqWords::single(counter as u16));
        }
        if counter == 0x1_0000 {
            tracing::debug!(mark, "sequence exceeded 16 bits; ids will grow longer");
        }

        let mut words = SeqWords::empty();
        let mut rest = counter;
        while rest != 0 {
            let mut word = rest as u16;
            if words.len > 0 {
                word ^= mark as u16;
            }
            words.push(word);
            rest >>= 16;
        }
        (mark, words)
    }
}

/// The 16-bit words produced by one [`Sequence::next`] call, least significant first.
///
/// Always holds at least one word. Dereferences to `[u16]`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct SeqWords {
    words: [u16; MAX_WORDS],
    len: usize,
}

impl SeqWords {
    const fn empty() -> Self {
        Self {
            words: [0; MAX_WORDS],
            len: 0,
        }
    }

    const fn single(word: u16) -> Self {
        Self {
            words: [word, 0, 0, 0],
            len: 1,
        }
    }

    fn push(&mut self, word: u16) {
        self.words[self.len] = word;
        self.len += 1;
    }

    /// Returns the low 16 bits of the counter.
    pub const fn first(&self) -> u16 {
        self.words[0]
    }

    /// Returns the words beyond the first, empty unless the counter exceeded 16 bits.
    pub fn overflow(&self) -> &[u16] {
        &self.words[1..self.len.max(1)]
    }
}

impl ops::Deref for SeqWords {
    type Target = [u16];

    fn deref(&self) -> &Self::Target {
        &self.words[..self.len]
    }
}

impl<const N: usize> From<[u16; N]> for SeqWords {
    /// Builds a word list from at most four words.
    ///
    /// # Panics
    ///
    /// Panics if `N` is zero or larger than four.
    fn from(src: [u16; N]) -> Self {
        assert!(0 < N && N <= MAX_WORDS, "a sequence has one to four words");
        let mut words = Self::empty();
        for word in src {
            words.push(word);
        }
        words
    }
}
