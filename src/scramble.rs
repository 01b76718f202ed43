//! Keyless 96-bit mixing function.

const MASK48: u64 = (1 << 48) - 1;

/// Mixes the four packed words so that consecutive inputs produce unrelated-looking outputs.
///
/// This is a fixed two-round Feistel network over two 48-bit halves, `a | c << 32` and
/// `b | d << 32`. It is a bijection on its 96 input bits, which is what keeps distinct inputs
/// distinct, but it has no key and offers no secrecy: it only hides the monotonic structure of the
/// time, host, process, and sequence fields.
///
/// The output is returned as `(low 32 of right, low 32 of left, high 16 of right, high 16 of
/// left)`. The constants and this output wiring are fixed so that identifiers stay bit-compatible
/// across implementations.
///
/// # Examples
///
/// ```rust
/// assert_eq!(
///     acuid::scramble(1, 2, 3, 4),
///     (0xe78d_2760, 0x32f4_72ac, 0x4a76, 0x0f64)
/// );
/// ```
pub const fn scramble(a: u32, b: u32, c: u16, d: u16) -> (u32, u32, u16, u16) {
    let h = a as u64 | (c as u64) << 32;
    let l = b as u64 | (d as u64) << 32;

    let (h, l) = round(h, l);
    let (h, l) = round(h, l);

    (l as u32, h as u32, (l >> 32) as u16, (h >> 32) as u16)
}

const fn round(h: u64, l: u64) -> (u64, u64) {
    (l, feistel(l) ^ h)
}

const fn feistel(l: u64) -> u64 {
    let mut f = l | 0x1000_0042_0008;

    f = f.wrapping_mul(0xcc9e_2d51);
    f = f.wrapping_add(f >> 48);
    f = f.wrapping_add(0xe654_6b64);
    f = f.rotate_left(49);
    f = f.wrapping_mul((f >> 32) ^ f);
    f = f.wrapping_add(f >> 48);

    f ^= (l >> 24) | (l << 24);
    f & MASK48
}
