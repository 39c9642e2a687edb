//! Error types for the modeller.

use thiserror::Error;

/// Modeller-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while writing or reading a model
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Model bytes do not follow the `.voxel` layout
    #[error("Invalid model format: {0}")]
    InvalidFormat(String),

    /// The palette already holds the maximum number of colors
    #[error("Palette is full")]
    PaletteFull,

    /// Palette index 0 or past the end of the palette
    #[error("Invalid palette index: {0}")]
    InvalidIndex(usize),

    /// A cell refers to this palette color, which removal would invalidate or shift
    #[error("Palette color {0} is still in use")]
    ColorInUse(u8),

    /// A palette must keep at least one color
    #[error("Cannot remove the last palette color")]
    LastColor,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
