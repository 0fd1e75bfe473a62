//! Codel codec, grids and configuration for ascii2piet.
//!
//! This crate holds the pure part of the converter: the bit layout of an
//! ASCII-encoded codel, the packed/literal line encodings, the color table
//! and the codel grid. It never touches the filesystem except through
//! [`config::load_config`].

pub mod bits;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod grid;

pub use bits::{literal_to_packed, normalize, packed_to_literal};
pub use config::{ConvertConfig, OutputFormat};
pub use error::CoreError;
pub use frame::{CodelGrid, RasterImage, Rgb};
pub use grid::build_grid;
