//! Interaction fields derived from the reconstruction filter.
//!
//! `pair_interaction` precomputes, per relative displacement, how the
//! palette choices of two nearby pixels couple through the filter;
//! `unary_field` precomputes the linear term that couples each pixel's
//! assignment to the input image. Both are consumed unchanged by the
//! mean-field sweep and the palette solve.

use ndarray::Array2;

use crate::color::Rgb;
use crate::filter::FilterKernel;

/// Compute the pairwise interaction array for the given filter.
///
/// The output has side 4r+1 and is indexed by the displacement of pixel
/// j relative to pixel i, centered: `b[center + d] = sum_k F(k) ⊙ F(k - d)`
/// over the overlap of the two filter supports. Symmetric under negating
/// the displacement; for a 1x1 filter it collapses to `F(0) ⊙ F(0)`.
pub fn pair_interaction(filter: &FilterKernel) -> Array2<Rgb> {
    let side = filter.side() as isize;
    let radius = filter.radius() as isize;
    let ext = 2 * side - 1;
    let offset = (ext - 1) / 2 - radius;
    let weights = filter.weights();

    Array2::from_shape_fn((ext as usize, ext as usize), |(j_y, j_x)| {
        let mut acc = Rgb::default();
        for k_y in 0..side {
            for k_x in 0..side {
                let s_x = k_x + offset - j_x as isize + radius;
                let s_y = k_y + offset - j_y as isize + radius;
                if s_x >= 0 && s_y >= 0 && s_x < side && s_y < side {
                    acc += weights[[k_y as usize, k_x as usize]]
                        .hadamard(weights[[s_y as usize, s_x as usize]]);
                }
            }
        }
        acc
    })
}

/// Interaction between pixels i and j, or zero when they are farther
/// apart than the filter support. This accessor is what makes the sweep
/// and the palette solve ignore non-interacting pairs without explicit
/// windowing.
pub fn pair_weight(b: &Array2<Rgb>, i_x: isize, i_y: isize, j_x: isize, j_y: isize) -> Rgb {
    let (h, w) = b.dim();
    let k_x = j_x - i_x + (w as isize - 1) / 2;
    let k_y = j_y - i_y + (h as isize - 1) / 2;
    if k_x >= 0 && k_y >= 0 && k_x < w as isize && k_y < h as isize {
        b[[k_y as usize, k_x as usize]]
    } else {
        Rgb::default()
    }
}

/// Compute the per-pixel linear term `a(i) = -2 sum_j b(i-j) ⊙ image(j)`,
/// with j ranging over the support box of `b` around i, clipped to the
/// image. Edge pixels sum fewer terms and get smaller-magnitude values.
pub fn unary_field(image: &Array2<Rgb>, b: &Array2<Rgb>) -> Array2<Rgb> {
    let (h, w) = image.dim();
    let (bh, bw) = b.dim();
    let radius_x = ((bw - 1) / 2) as isize;
    let radius_y = ((bh - 1) / 2) as isize;

    Array2::from_shape_fn((h, w), |(i_y, i_x)| {
        let y0 = (i_y as isize - radius_y).max(0) as usize;
        let y1 = (i_y as isize + radius_y).min(h as isize - 1) as usize;
        let x0 = (i_x as isize - radius_x).max(0) as usize;
        let x1 = (i_x as isize + radius_x).min(w as isize - 1) as usize;

        let mut acc = Rgb::default();
        for j_y in y0..=y1 {
            for j_x in x0..=x1 {
                acc += pair_weight(b, i_x as isize, i_y as isize, j_x as isize, j_y as isize)
                    .hadamard(image[[j_y, j_x]]);
            }
        }
        acc * -2.0
    })
}
