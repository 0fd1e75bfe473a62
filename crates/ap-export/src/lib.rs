//! Export stages for ascii2piet: codel magnification, PNG container and hex dump.

pub mod hexdump;
pub mod png;
pub mod scale;

pub use hexdump::hexdump;
pub use png::{decode_png, encode_png};
pub use scale::magnify;
