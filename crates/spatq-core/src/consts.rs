/// Maximum pixel count of the coarsest pyramid level.
pub const MAX_COARSE_PIXELS: usize = 4000;

/// Mean-field sweeps performed at each pyramid level before refining.
pub const SWEEPS_PER_LEVEL: usize = 3;

/// Lower clamp for soft assignment weights. Keeps every palette entry
/// with nonzero mass so the palette system stays invertible.
pub const ASSIGNMENT_FLOOR: f64 = 1e-250;

/// Upper clamp for soft assignment weights.
pub const ASSIGNMENT_CEIL: f64 = 1.0 - 1e-16;

/// Offset subtracted from the peak log-weight before exponentiating,
/// capping the largest raw weight at e^100.
pub const LOG_WEIGHT_SHIFT: f64 = 100.0;

/// Minimum cell count (h*w) to use row-level Rayon parallelism in the
/// palette solve.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 4096;

/// Rows per parallel chunk in the palette solve. Partial sums are merged
/// in chunk order so results do not depend on the thread count.
pub const PALETTE_CHUNK_ROWS: usize = 32;
