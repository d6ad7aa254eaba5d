//! Multiscale pyramid of interaction fields.
//!
//! Level 0 is the finest (image resolution); each coarser level halves
//! both dimensions. The annealer starts at the coarsest level and zooms
//! the assignment field back toward level 0.

use ndarray::{Array2, Array3};
use tracing::debug;

use crate::color::Rgb;
use crate::consts::MAX_COARSE_PIXELS;
use crate::filter::FilterKernel;
use crate::interaction::{pair_interaction, pair_weight, unary_field};

/// Number of coarsening steps needed so the coarsest level holds at
/// most [`MAX_COARSE_PIXELS`] pixels.
pub fn coarse_level_count(width: usize, height: usize) -> usize {
    let mut w = width;
    let mut h = height;
    let mut levels = 0;
    while w * h > MAX_COARSE_PIXELS {
        w >>= 1;
        h >>= 1;
        levels += 1;
    }
    levels
}

/// Sum-pool 2x2 blocks of `fine` into a half-size array. No averaging:
/// the coarse field keeps the total mass of the cells it covers. Blocks
/// reaching past the fine edge sum only the in-bounds subset.
pub fn sum_coarsen(fine: &Array2<Rgb>) -> Array2<Rgb> {
    let (fh, fw) = fine.dim();
    let (ch, cw) = (fh >> 1, fw >> 1);

    Array2::from_shape_fn((ch, cw), |(y, x)| {
        let mut val = fine[[y * 2, x * 2]];
        if x * 2 + 1 < fw {
            val += fine[[y * 2, x * 2 + 1]];
        }
        if y * 2 + 1 < fh {
            val += fine[[y * 2 + 1, x * 2]];
        }
        if x * 2 + 1 < fw && y * 2 + 1 < fh {
            val += fine[[y * 2 + 1, x * 2 + 1]];
        }
        val
    })
}

/// Coarsen a pairwise-interaction array one level.
///
/// Each coarse displacement sums the sixteen fine interactions pairing
/// the 2x2 block of fine i-positions (anchored at twice the filter
/// radius) with the 2x2 block of fine j-positions covered by the coarse
/// cell. The output never shrinks below 3x3, so the coarsest level still
/// has a usable central neighborhood.
pub fn coarsen_pair_interaction(b_fine: &Array2<Rgb>, filter_radius: usize) -> Array2<Rgb> {
    let (fh, fw) = b_fine.dim();
    let ch = fh.saturating_sub(2).max(3);
    let cw = fw.saturating_sub(2).max(3);
    let anchor_x = (filter_radius * 2) as isize;
    let anchor_y = (filter_radius * 2) as isize;

    Array2::from_shape_fn((ch, cw), |(cj_y, cj_x)| {
        let mut acc = Rgb::default();
        for i_y in anchor_y..anchor_y + 2 {
            for i_x in anchor_x..anchor_x + 2 {
                for j_y in (cj_y * 2) as isize..(cj_y * 2 + 2) as isize {
                    for j_x in (cj_x * 2) as isize..(cj_x * 2 + 2) as isize {
                        acc += pair_weight(b_fine, i_x, i_y, j_x, j_y);
                    }
                }
            }
        }
        acc
    })
}

/// Double a coarse assignment field to the next finer level. Every fine
/// 2x2 block receives its coarse cell's distribution; an odd fine row or
/// column duplicates its neighbor.
pub fn zoom_double(coarse: &Array3<f64>, fine_h: usize, fine_w: usize) -> Array3<f64> {
    let (ch, cw, k) = coarse.dim();
    debug_assert_eq!(ch, fine_h >> 1);
    debug_assert_eq!(cw, fine_w >> 1);

    let mut fine = Array3::<f64>::zeros((fine_h, fine_w, k));
    for y in 0..ch {
        for x in 0..cw {
            for v in 0..k {
                let val = coarse[[y, x, v]];
                fine[[2 * y, 2 * x, v]] = val;
                fine[[2 * y, 2 * x + 1, v]] = val;
                fine[[2 * y + 1, 2 * x, v]] = val;
                fine[[2 * y + 1, 2 * x + 1, v]] = val;
            }
        }
    }
    if fine_w % 2 == 1 && fine_w > 1 {
        let x = fine_w - 1;
        for y in 0..fine_h {
            for v in 0..k {
                fine[[y, x, v]] = fine[[y, x - 1, v]];
            }
        }
    }
    if fine_h % 2 == 1 && fine_h > 1 {
        let y = fine_h - 1;
        for x in 0..fine_w {
            for v in 0..k {
                fine[[y, x, v]] = fine[[y - 1, x, v]];
            }
        }
    }
    fine
}

/// One pyramid level's precomputed interaction fields.
pub struct PyramidLevel {
    /// Per-cell linear term coupling assignments to the image.
    pub unary: Array2<Rgb>,
    /// Pairwise interaction array for this level's grid.
    pub pair: Array2<Rgb>,
}

/// Interaction fields for every level, index 0 = finest.
pub struct Pyramid {
    levels: Vec<PyramidLevel>,
}

impl Pyramid {
    /// Build the full pyramid for an image and filter: the level-0
    /// fields from the filter and image, then repeated coarsening until
    /// the coarsest grid is small enough to anneal from scratch.
    pub fn build(image: &Array2<Rgb>, filter: &FilterKernel) -> Self {
        let (h, w) = image.dim();
        let depth = coarse_level_count(w, h);

        let pair0 = pair_interaction(filter);
        let unary0 = unary_field(image, &pair0);
        let mut levels = vec![PyramidLevel {
            unary: unary0,
            pair: pair0,
        }];

        for _ in 0..depth {
            let prev = levels.last().expect("pyramid has a level 0");
            let pair = coarsen_pair_interaction(&prev.pair, filter.radius());
            let unary = sum_coarsen(&prev.unary);
            levels.push(PyramidLevel { unary, pair });
        }

        debug!(levels = levels.len(), width = w, height = h, "pyramid built");
        Self { levels }
    }

    /// Index of the coarsest level.
    pub fn coarsest(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn level(&self, idx: usize) -> &PyramidLevel {
        &self.levels[idx]
    }
}
