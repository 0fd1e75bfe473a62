use crate::bits::{BLACK, BLUE, GREEN, Lightness, RED, WHITE, decode_fields};
use crate::frame::Rgb;

/// Couleur Piet d'un couple (hue, lightness).
///
/// Black and white have no shades: their lightness is forced to normal
/// before the channel lookup. Every 3-bit hue maps to some channel
/// combination, so there is no invalid input.
///
/// # Example
/// ```
/// use ap_core::bits::{Lightness, RED, WHITE};
/// use ap_core::color::color_of;
/// assert_eq!(color_of(RED, Lightness::Dark), (192, 0, 0));
/// assert_eq!(color_of(RED, Lightness::Light), (255, 192, 192));
/// assert_eq!(color_of(WHITE, Lightness::Dark), (255, 255, 255));
/// ```
#[inline(always)]
#[must_use]
pub fn color_of(hue: u8, lightness: Lightness) -> Rgb {
    let lightness = if hue == BLACK || hue == WHITE {
        Lightness::Normal
    } else {
        lightness
    };
    let (off, on) = lightness.intensities();
    let pick = |mask: u8| if hue & mask != 0 { on } else { off };
    (pick(RED), pick(GREEN), pick(BLUE))
}

/// Couleur d'un octet encodé. The EOL bit and bit 6 play no part.
///
/// # Example
/// ```
/// use ap_core::color::codel_color;
/// assert_eq!(codel_color(b' '), (0, 0, 0));
/// assert_eq!(codel_color(b'j'), (0, 255, 0));
/// ```
#[inline(always)]
#[must_use]
pub fn codel_color(byte: u8) -> Rgb {
    let f = decode_fields(byte);
    color_of(f.hue, f.lightness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SHADES: [Lightness; 3] = [Lightness::Dark, Lightness::Normal, Lightness::Light];

    #[test]
    fn black_and_white_ignore_lightness() {
        for l in SHADES {
            assert_eq!(color_of(BLACK, l), (0, 0, 0));
            assert_eq!(color_of(WHITE, l), (255, 255, 255));
        }
    }

    #[test]
    fn primary_hues_follow_intensity_table() {
        assert_eq!(color_of(BLUE, Lightness::Dark), (0, 0, 192));
        assert_eq!(color_of(BLUE, Lightness::Normal), (0, 0, 255));
        assert_eq!(color_of(BLUE, Lightness::Light), (192, 192, 255));
        assert_eq!(color_of(GREEN, Lightness::Normal), (0, 255, 0));
        assert_eq!(color_of(RED | GREEN, Lightness::Light), (255, 255, 192));
    }

    #[test]
    fn twenty_colors_from_five_bits() {
        let colors: HashSet<Rgb> = (0..=127u8).map(codel_color).collect();
        assert_eq!(colors.len(), 20);
    }

    #[test]
    fn eol_bit_does_not_change_color() {
        for byte in 0..=127u8 {
            assert_eq!(codel_color(byte), codel_color(byte ^ 0x20));
            assert_eq!(codel_color(byte), codel_color(byte ^ 0x40));
        }
    }
}
