//! `xxd`-style dump of arbitrary bytes.
//!
//! ```text
//! 00000000: 8950 4e47 0d0a 1a0a 0000 000d 4948 4452  .PNG........IHDR
//! ```

/// Bytes per row.
const ROW_LEN: usize = 16;
/// Width of the hex area: eight groups of four digits, each followed by a space.
const HEX_COLUMNS: usize = 40;

/// Rend `bytes` en dump hexadécimal, 16 octets par ligne.
///
/// Rows are joined with `\n`; trailing whitespace of the whole dump is
/// trimmed and there is no final newline. Empty input gives an empty string.
///
/// # Example
/// ```
/// use ap_export::hexdump::hexdump;
/// assert_eq!(hexdump(b"Piet"), "00000000: 5069 6574                                Piet");
/// ```
#[must_use]
pub fn hexdump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(ROW_LEN) * 68);
    for (row, block) in bytes.chunks(ROW_LEN).enumerate() {
        if row > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{:08x}: ", row * ROW_LEN));

        let mut hex = String::with_capacity(HEX_COLUMNS);
        for pair in 0..ROW_LEN / 2 {
            for b in block.iter().skip(pair * 2).take(2) {
                hex.push_str(&format!("{b:02x}"));
            }
            hex.push(' ');
        }
        out.push_str(&format!("{hex:<HEX_COLUMNS$} "));

        out.extend(block.iter().map(|&b| {
            if (32..=126).contains(&b) {
                char::from(b)
            } else {
                '.'
            }
        }));
    }
    out.truncate(out.trim_end().len());
    out
}
