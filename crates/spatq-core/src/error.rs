use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpatqError {
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Palette size {0} out of range (must be 2-256)")]
    PaletteSizeOutOfRange(usize),

    #[error("Unsupported filter size {0} (must be 1, 3, or 5)")]
    UnsupportedFilterSize(usize),

    #[error("Filter weights must be non-negative")]
    NegativeFilterWeights,

    #[error(
        "Invalid temperature schedule: initial {initial} must be greater than final {final_temp}, both positive"
    )]
    InvalidSchedule { initial: f64, final_temp: f64 },

    #[error("Mean-field normalization underflowed at cell ({x}, {y}); the temperature schedule is misconfigured")]
    MeanFieldUnderflow { x: usize, y: usize },

    #[error("Singular palette system: zero pivot in row {row}")]
    SingularPaletteSystem { row: usize },
}

pub type Result<T> = std::result::Result<T, SpatqError>;
