//! Text encodings for identifiers.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// Lowercase base32 alphabet without the look-alikes `l`, `o`, `0`, and `1`.
const BASE32_ALPHABET: &[u8; 32] = b"abcdefghijkmnpqrstuvwxyz23456789";
const BASE32_BITS: usize = 5;

/// Selects the character set of generated identifiers.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Alphabet {
    /// Lowercase letters and digits, without `l`, `o`, `0`, and `1` (e.g. `rk5zzm2zkmt5djecxwj4`).
    #[default]
    Lower,

    /// Upper- and lowercase letters, digits, `-`, and `_` (e.g. `KaGFYkoJhPs3eNx9`).
    ///
    /// Carries six bits per character, so identifiers are shorter.
    Mixed,
}

impl Alphabet {
    /// Returns the number of bits one character carries.
    pub const fn bits_per_char(self) -> usize {
        match self {
            Self::Lower => BASE32_BITS,
            Self::Mixed => 6,
        }
    }

    /// Returns the shortest identifier length this alphabet produces.
    ///
    /// The floor leaves room for the 96 scrambled bits.
    pub const fn min_chars(self) -> usize {
        match self {
            Self::Lower => 20,
            Self::Mixed => 16,
        }
    }

    /// Returns how many characters each 16-bit sequence overflow word adds.
    pub const fn overflow_chars(self) -> usize {
        match self {
            Self::Lower => 4,
            Self::Mixed => 3,
        }
    }

    /// Returns the effective character count and the byte count for a requested length.
    ///
    /// The byte count follows the requested length, while the character count is raised to
    /// [`min_chars`](Self::min_chars). Short requests therefore need no random padding.
    pub const fn calc_bytes(self, requested_chars: usize) -> (usize, usize) {
        let num_bytes = (requested_chars * self.bits_per_char() + 7) >> 3;
        let num_chars = if requested_chars < self.min_chars() {
            self.min_chars()
        } else {
            requested_chars
        };
        (num_chars, num_bytes)
    }

    /// Encodes `bytes` without padding characters.
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Lower => encode_base32(bytes),
            Self::Mixed => URL_SAFE_NO_PAD.encode(bytes),
        }
    }

    /// Returns true if `c` belongs to this alphabet.
    pub fn contains(self, c: char) -> bool {
        match self {
            Self::Lower => c.is_ascii() && BASE32_ALPHABET.contains(&(c as u8)),
            Self::Mixed => c.is_ascii_alphanumeric() || c == '-' || c == '_',
        }
    }
}

/// Encodes bytes most significant bit first, five bits per character, zero-filling the last one.
fn encode_base32(input: &[u8]) -> String {
    let mut out = String::with_capacity((input.len() * 8).div_ceil(BASE32_BITS));
    let mut acc = 0u16;
    let mut bits = 0;

    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BASE32_BITS {
            bits -= BASE32_BITS;
            out.push(BASE32_ALPHABET[((acc >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(BASE32_ALPHABET[((acc << (BASE32_BITS - bits)) & 0x1f) as usize] as char);
    }
    out
}
