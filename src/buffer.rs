//! Identifier byte buffer assembly.

use crate::{RandSource, Result};

/// The size of the four scrambled words.
pub(crate) const SCRAMBLED_BYTES: usize = 12;

/// Lays out the scrambled words and any overflow words, then pads the buffer to `fill_to` bytes.
///
/// All words are little-endian. Padding comes from `rng`. When the words alone already reach
/// `fill_to`, the low byte of `d` is appended instead so the last character still carries
/// scrambled bits.
pub(crate) fn assemble<R: RandSource + ?Sized>(
    (a, b, c, d): (u32, u32, u16, u16),
    overflow: &[u16],
    fill_to: usize,
    rng: &R,
) -> Result<Vec<u8>> {
    let len = SCRAMBLED_BYTES + 2 * overflow.len();
    let mut buf = Vec::with_capacity(fill_to.max(len + 1));

    buf.extend_from_slice(&a.to_le_bytes());
    buf.extend_from_slice(&b.to_le_bytes());
    buf.extend_from_slice(&c.to_le_bytes());
    buf.extend_from_slice(&d.to_le_bytes());
    for word in overflow {
        buf.extend_from_slice(&word.to_le_bytes());
    }

    if len < fill_to {
        buf.resize(fill_to, 0);
        rng.fill_bytes(&mut buf[len..])?;
    } else {
        buf.push(d as u8);
    }
    Ok(buf)
}
