use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// The input contained no line at all.
    #[error("no program lines found")]
    EmptyProgram,

    /// Codel size must be a positive integer.
    #[error("Taille de codel invalide : {size} (doit être > 0)")]
    InvalidCodelSize {
        /// Rejected value.
        size: u32,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u64,
        /// Height value.
        height: u64,
    },
}
