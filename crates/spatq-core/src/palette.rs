//! Closed-form palette re-estimation.
//!
//! For fixed assignments the reconstruction error is quadratic in the
//! palette, so each channel is minimized exactly: accumulate the K x K
//! coupling matrix and K response vector over the grid, then solve
//! `P_k = -(2 S_k)^-1 R_k` per channel.

use std::ops::Range;

use ndarray::{Array1, Array2, Array3};
use rand::Rng;
use rayon::prelude::*;

use crate::color::Rgb;
use crate::consts::{PALETTE_CHUNK_ROWS, PARALLEL_PIXEL_THRESHOLD};
use crate::error::Result;
use crate::interaction::pair_weight;
use crate::linalg;

/// Uniform random palette in [0,1)^3, the conventional starting point.
pub fn random_palette<R: Rng>(count: usize, rng: &mut R) -> Vec<Rgb> {
    (0..count)
        .map(|_| Rgb::new(rng.gen(), rng.gen(), rng.gen()))
        .collect()
}

/// Partial sums over a span of grid rows. `coupling` holds the upper
/// triangle (alpha >= v) of the color-valued K x K matrix, row-major;
/// `mass` is the per-entry total assignment weight that scales the
/// self-interaction diagonal; `response` is the unary-field projection.
struct Accumulator {
    coupling: Vec<Rgb>,
    mass: Vec<f64>,
    response: Vec<Rgb>,
}

impl Accumulator {
    fn new(k: usize) -> Self {
        Self {
            coupling: vec![Rgb::default(); k * k],
            mass: vec![0.0; k],
            response: vec![Rgb::default(); k],
        }
    }

    fn merge(mut self, other: Self) -> Self {
        for (a, b) in self.coupling.iter_mut().zip(other.coupling) {
            *a += b;
        }
        for (a, b) in self.mass.iter_mut().zip(other.mass) {
            *a += b;
        }
        for (a, b) in self.response.iter_mut().zip(other.response) {
            *a += b;
        }
        self
    }

    fn accumulate_rows(
        &mut self,
        rows: Range<usize>,
        assignments: &Array3<f64>,
        unary: &Array2<Rgb>,
        pair: &Array2<Rgb>,
    ) {
        let (h, w, k) = assignments.dim();
        let (bh, bw) = pair.dim();
        let center_x = ((bw - 1) / 2) as isize;
        let center_y = ((bh - 1) / 2) as isize;

        for i_y in rows {
            for i_x in 0..w {
                let j_y0 = (i_y as isize - center_y).max(0) as usize;
                let j_y1 = (i_y as isize - center_y + bh as isize).min(h as isize) as usize;
                let j_x0 = (i_x as isize - center_x).max(0) as usize;
                let j_x1 = (i_x as isize - center_x + bw as isize).min(w as isize) as usize;

                for j_y in j_y0..j_y1 {
                    for j_x in j_x0..j_x1 {
                        if i_x == j_x && i_y == j_y {
                            continue;
                        }
                        let weight = pair_weight(
                            pair,
                            i_x as isize,
                            i_y as isize,
                            j_x as isize,
                            j_y as isize,
                        );
                        for v in 0..k {
                            let s_iv = assignments[[i_y, i_x, v]];
                            for alpha in v..k {
                                self.coupling[v * k + alpha] +=
                                    weight * (s_iv * assignments[[j_y, j_x, alpha]]);
                            }
                        }
                    }
                }

                for v in 0..k {
                    let s_iv = assignments[[i_y, i_x, v]];
                    self.mass[v] += s_iv;
                    self.response[v] += unary[[i_y, i_x]] * s_iv;
                }
            }
        }
    }
}

/// Re-estimate the palette in place from the current assignments.
///
/// Fails only if the per-channel system is singular, which the
/// assignment clamp is designed to prevent.
pub fn refine_palette(
    palette: &mut [Rgb],
    assignments: &Array3<f64>,
    unary: &Array2<Rgb>,
    pair: &Array2<Rgb>,
) -> Result<()> {
    let (h, w, k) = assignments.dim();
    debug_assert_eq!(k, palette.len());

    let acc = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        // Fixed-size row chunks, merged in chunk order: the float sums
        // come out identical whatever the thread count.
        let starts: Vec<usize> = (0..h).step_by(PALETTE_CHUNK_ROWS).collect();
        starts
            .into_par_iter()
            .map(|y0| {
                let mut acc = Accumulator::new(k);
                let y1 = (y0 + PALETTE_CHUNK_ROWS).min(h);
                acc.accumulate_rows(y0..y1, assignments, unary, pair);
                acc
            })
            .collect::<Vec<_>>()
            .into_iter()
            .reduce(Accumulator::merge)
            .unwrap_or_else(|| Accumulator::new(k))
    } else {
        let mut acc = Accumulator::new(k);
        acc.accumulate_rows(0..h, assignments, unary, pair);
        acc
    };

    let self_weight = pair_weight(pair, 0, 0, 0, 0);
    let mut coupling = acc.coupling;
    for v in 0..k {
        coupling[v * k + v] += self_weight * acc.mass[v];
    }
    for v in 0..k {
        for alpha in 0..v {
            coupling[v * k + alpha] = coupling[alpha * k + v];
        }
    }

    for channel in 0..Rgb::CHANNELS {
        let system =
            Array2::from_shape_fn((k, k), |(v, alpha)| 2.0 * coupling[v * k + alpha][channel]);
        let inverse = linalg::invert(&system)?;
        let response = Array1::from_shape_fn(k, |v| acc.response[v][channel]);
        let solution = inverse.dot(&response);
        for v in 0..k {
            palette[v][channel] = -solution[v];
        }
    }

    Ok(())
}
