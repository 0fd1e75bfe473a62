//! Bit layout of an ASCII-encoded codel and the two line encodings.
//!
//! Every input byte is one codel:
//!
//! ```text
//!  bit   6    5       4   3       2   1   0
//!       [x] [no_eol] [lightness] [ r   g   b ]
//! ```
//!
//! In the *packed* form there are no line-break bytes: the last codel of each
//! line has `no_eol` cleared. In the *literal* form lines are separated by real
//! line breaks and `no_eol` is always set.

/// Hue bits (red, green, blue from high to low).
pub const HUE_MASK: u8 = 0b111;
pub const BLACK: u8 = 0b000;
pub const BLUE: u8 = 0b001;
pub const GREEN: u8 = 0b010;
pub const RED: u8 = 0b100;
pub const WHITE: u8 = 0b111;

/// Lightness bits.
pub const LIGHTNESS_MASK: u8 = 0b1_1000;
pub const DARK: u8 = 0b0_0000;
pub const NORMAL: u8 = 0b0_1000;
pub const LIGHT: u8 = 0b1_0000;

/// Set on every codel that is *not* the last one of its line.
pub const NO_EOL_MASK: u8 = 0b10_0000;

/// First printable ASCII byte.
const PRINTABLE_MIN: u8 = 32;
/// Shift applied to an end-of-line codel that fell out of the printable range.
const PRINTABLE_SHIFT: u8 = 64;

/// Shade of a hue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lightness {
    /// `00`
    Dark,
    /// `01`
    Normal,
    /// `10`, and the reserved `11`.
    Light,
}

impl Lightness {
    /// Extract the lightness field of a byte.
    ///
    /// The reserved pattern `11` has its high bit set and goes through the same
    /// arithmetic as `10`, so it decodes as [`Lightness::Light`].
    ///
    /// # Example
    /// ```
    /// use ap_core::bits::Lightness;
    /// assert_eq!(Lightness::from_byte(b'a'), Lightness::Dark);
    /// assert_eq!(Lightness::from_byte(b'i'), Lightness::Normal);
    /// assert_eq!(Lightness::from_byte(b'q'), Lightness::Light);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte & LIGHTNESS_MASK {
            DARK => Self::Dark,
            NORMAL => Self::Normal,
            _ => Self::Light,
        }
    }

    /// Channel intensities `(off, on)` for this shade.
    #[inline(always)]
    #[must_use]
    pub fn intensities(self) -> (u8, u8) {
        match self {
            Self::Dark => (0, 192),
            Self::Normal => (0, 255),
            Self::Light => (192, 255),
        }
    }
}

/// Semantic fields of one encoded byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodelFields {
    /// 3-bit hue, see [`HUE_MASK`].
    pub hue: u8,
    /// Shade.
    pub lightness: Lightness,
    /// `false` on the last codel of a packed line.
    pub no_eol: bool,
}

/// Split a byte into its codel fields. Every byte decodes.
///
/// # Example
/// ```
/// use ap_core::bits::{decode_fields, Lightness, RED};
/// let f = decode_fields(b'D');
/// assert_eq!(f.hue, RED);
/// assert_eq!(f.lightness, Lightness::Dark);
/// assert!(!f.no_eol);
/// ```
#[inline(always)]
#[must_use]
pub fn decode_fields(byte: u8) -> CodelFields {
    CodelFields {
        hue: byte & HUE_MASK,
        lightness: Lightness::from_byte(byte),
        no_eol: byte & NO_EOL_MASK != 0,
    }
}

/// Line-break bytes: `\n`, `\r`, vertical tab, form feed and the file, group
/// and record separators (`0x1c`–`0x1e`).
#[inline(always)]
#[must_use]
pub fn is_line_break(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r' | 0x0b | 0x0c | 0x1c..=0x1e)
}

/// Split on any [`is_line_break`] byte, `\r\n` counting as one break. A
/// trailing break does not open an extra line.
///
/// # Example
/// ```
/// use ap_core::bits::split_lines;
/// let lines = split_lines(b"ab\r\ncd\n\nef\n");
/// assert_eq!(lines, vec![&b"ab"[..], &b"cd"[..], &b""[..], &b"ef"[..]]);
/// assert!(split_lines(b"").is_empty());
/// ```
#[must_use]
pub fn split_lines(text: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < text.len() {
        let byte = text[i];
        if is_line_break(byte) {
            lines.push(&text[start..i]);
            i += if byte == b'\r' && text.get(i + 1) == Some(&b'\n') {
                2
            } else {
                1
            };
            start = i;
        } else {
            i += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Packed → literal: expand end-of-line codels into real line breaks.
///
/// Line-break bytes already present in the input are dropped, and trailing
/// breaks are removed from the result.
///
/// # Example
/// ```
/// use ap_core::bits::packed_to_literal;
/// assert_eq!(packed_to_literal(b"aBcD"), b"ab\ncd");
/// ```
#[must_use]
pub fn packed_to_literal(packed: &[u8]) -> Vec<u8> {
    let mut literal = Vec::with_capacity(packed.len() + packed.len() / 4);
    for &byte in packed {
        if is_line_break(byte) {
            continue;
        }
        if byte & NO_EOL_MASK != 0 {
            literal.push(byte);
        } else {
            literal.push(byte | NO_EOL_MASK);
            literal.push(b'\n');
        }
    }
    while literal.last() == Some(&b'\n') {
        literal.pop();
    }
    literal
}

/// Literal → packed: fold each line break into the EOL bit of the codel before it.
///
/// Empty lines carry no codel and are dropped. When clearing the EOL bit takes
/// the byte below the printable range it is shifted up by 64, which only
/// touches bit 6 and therefore keeps its color.
///
/// # Example
/// ```
/// use ap_core::bits::literal_to_packed;
/// assert_eq!(literal_to_packed(b"ab\ncd\n"), b"aBcD");
/// // '!' & !0x20 == 0x01, shifted back to 'A'
/// assert_eq!(literal_to_packed(b"x!"), b"xA");
/// ```
#[must_use]
pub fn literal_to_packed(literal: &[u8]) -> Vec<u8> {
    let mut packed = Vec::with_capacity(literal.len());
    for line in split_lines(literal) {
        let Some((&last, body)) = line.split_last() else {
            continue;
        };
        let mut eol = last & !NO_EOL_MASK;
        if eol < PRINTABLE_MIN {
            eol += PRINTABLE_SHIFT;
        }
        packed.extend_from_slice(body);
        packed.push(eol);
    }
    packed
}

/// Bring packed, literal or mixed input to canonical literal form.
///
/// # Example
/// ```
/// use ap_core::bits::normalize;
/// assert_eq!(normalize(b"aBcD"), b"ab\ncd");
/// assert_eq!(normalize(b"ab\n\ncd\n"), b"ab\ncd");
/// ```
#[must_use]
pub fn normalize(text: &[u8]) -> Vec<u8> {
    packed_to_literal(&literal_to_packed(text))
}
