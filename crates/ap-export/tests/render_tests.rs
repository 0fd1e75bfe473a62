//! End-to-end rendering: text → grid → raster → PNG → raster.

use ap_core::bits::normalize;
use ap_core::grid::build_grid;
use ap_export::{decode_png, encode_png, hexdump, magnify};

#[test]
fn png_round_trip_is_lossless() {
    let literal = normalize(b"ijklmn\nqrstuv\nabcdef\n  w");
    let grid = build_grid(&literal).unwrap();
    let img = magnify(&grid, 4).unwrap();
    let png = encode_png(&img).unwrap();
    let decoded = decode_png(&png).unwrap();
    assert_eq!(decoded, img);
}

#[test]
fn decoded_png_keeps_codel_blocks() {
    // 'Q' has bit 5 clear and closes the only line
    let literal = normalize(b"jlQ");
    assert_eq!(literal, b"jlq");
    let grid = build_grid(&literal).unwrap();
    let png = encode_png(&magnify(&grid, 2).unwrap()).unwrap();
    let img = decode_png(&png).unwrap();
    assert_eq!((img.width, img.height), (6, 2));
    assert_eq!(img.pixel(1, 1), (0, 255, 0));
    assert_eq!(img.pixel(2, 0), (255, 0, 0));
    assert_eq!(img.pixel(5, 1), (192, 192, 255));
}

#[test]
fn packed_and_literal_inputs_render_identically() {
    let from_literal = build_grid(&normalize(b"ijk\nlm")).unwrap();
    let from_packed = build_grid(&normalize(b"ijKlM")).unwrap();
    assert_eq!(from_literal, from_packed);
}

#[test]
fn hexdump_of_png_starts_with_signature() {
    let grid = build_grid(b"w").unwrap();
    let png = encode_png(&magnify(&grid, 1).unwrap()).unwrap();
    let dump = hexdump(&png);
    assert!(dump.starts_with("00000000: 8950 4e47 0d0a 1a0a"), "{dump}");
    assert_eq!(dump.lines().count(), png.len().div_ceil(16));
}
