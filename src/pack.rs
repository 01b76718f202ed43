//! Mark resolution and field packing.

use std::time::Duration;

/// Describes how the host identity and the mark share the first 64 packed bits.
///
/// # Field and bit layout
///
/// Before scrambling, every identifier is built from four words:
///
/// ```text
///               word1 (32)            word2 (32)           pid (16)   seq (16)
/// Wide:    mark (seconds) [0:32)  |  host (32)          |  pid     |  seq0
/// Narrow:  mark (ticks) [16:48)   |  mark [0:16) : host |  pid     |  seq0
/// ```
///
/// A tick is 1/65536 of a second (nanoseconds shifted right by 16). Trading 16 host bits for
/// 16 more time bits makes a new mark start 65,536 times more often, so the per-mark sequence
/// rarely grows past one word even at high call rates.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum HostMode {
    /// A full 32-bit host identity with whole-second marks.
    Wide(u32),

    /// A 16-bit host identity with 1/65536-second marks.
    Narrow(u16),
}

impl HostMode {
    /// Converts a reading of the Unix clock into a mark at this mode's resolution.
    pub const fn mark(self, now: Duration) -> u64 {
        match self {
            Self::Wide(_) => now.as_secs(),
            Self::Narrow(_) => (now.as_nanos() >> 16) as u64,
        }
    }

    /// Packs `mark` and the host identity into the first two words.
    pub const fn pack(self, mark: u64) -> (u32, u32) {
        match self {
            Self::Wide(host) => (mark as u32, host),
            Self::Narrow(host) => ((mark >> 16) as u32, host as u32 | (mark << 16) as u32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HostMode;
    use std::time::Duration;

    /// Uses whole seconds as the wide mark
    #[test]
    fn uses_whole_seconds_as_the_wide_mark() {
        let mode = HostMode::Wide(0x0a00_0001);
        assert_eq!(mode.mark(Duration::new(1_700_000_000, 999_999_999)), 1_700_000_000);
        assert_eq!(mode.mark(Duration::ZERO), 0);
    }

    /// Uses 1/65536-second ticks as the narrow mark
    #[test]
    fn uses_1_65536_second_ticks_as_the_narrow_mark() {
        let mode = HostMode::Narrow(7);
        let now = Duration::new(1_700_000_000, 123_456_789);
        assert_eq!(mode.mark(now), 1_700_000_000_123_456_789 >> 16);
        assert_eq!(mode.mark(now), 25_939_941_408_133);
        assert_eq!(mode.mark(Duration::from_nanos(0xffff)), 0);
        assert_eq!(mode.mark(Duration::from_nanos(0x1_0000)), 1);
    }

    /// Packs the truncated mark next to the full host in wide mode
    #[test]
    fn packs_the_truncated_mark_next_to_the_full_host_in_wide_mode() {
        let mode = HostMode::Wide(0xc0a8_0102);
        assert_eq!(mode.pack(0x1_2345_6789), (0x2345_6789, 0xc0a8_0102));
    }

    /// Splits the mark around the host in narrow mode
    #[test]
    fn splits_the_mark_around_the_host_in_narrow_mode() {
        let mode = HostMode::Narrow(0xbeef);
        assert_eq!(mode.pack(0x1234_5678_9abc), (0x1234_5678, 0x9abc_beef));
        assert_eq!(mode.pack(0), (0, 0xbeef));
    }
}
