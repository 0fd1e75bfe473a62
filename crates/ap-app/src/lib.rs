//! Command-line front end of ascii2piet: argument surface, single-file
//! pipeline and folder batch conversion.

pub mod batch;
pub mod cli;
pub mod pipeline;
