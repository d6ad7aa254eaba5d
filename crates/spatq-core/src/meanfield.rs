//! Mean-field relaxation of the soft assignment field.
//!
//! A sweep visits every grid cell once in random order and replaces its
//! assignment distribution with the softmax of the local field at the
//! current temperature. Cells whose dominant palette entry flips push
//! their neighbors back onto the visit queue, so influence propagates
//! lazily within a single sweep. The update is Gauss-Seidel style: each
//! cell reads its neighbors' current distributions, which is why the
//! sweep is sequential.

use std::collections::VecDeque;

use ndarray::{Array2, Array3};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::color::Rgb;
use crate::consts::{ASSIGNMENT_CEIL, ASSIGNMENT_FLOOR, LOG_WEIGHT_SHIFT};
use crate::error::{Result, SpatqError};
use crate::interaction::pair_weight;

/// Index of the palette entry with the largest assignment weight at
/// (x, y). Ties keep the lowest index.
pub fn dominant_entry(assignments: &Array3<f64>, x: usize, y: usize) -> usize {
    let k = assignments.dim().2;
    let mut best = 0;
    let mut best_weight = assignments[[y, x, 0]];
    for v in 1..k {
        let weight = assignments[[y, x, v]];
        if weight > best_weight {
            best = v;
            best_weight = weight;
        }
    }
    best
}

/// Perform one mean-field sweep over the assignment grid.
///
/// Returns the number of cells whose dominant entry changed. Fails with
/// [`SpatqError::MeanFieldUnderflow`] if every weight at some cell
/// underflows to zero, which indicates a misconfigured temperature.
pub fn relax_sweep<R: Rng>(
    assignments: &mut Array3<f64>,
    unary: &Array2<Rgb>,
    pair: &Array2<Rgb>,
    palette: &[Rgb],
    temperature: f64,
    rng: &mut R,
) -> Result<usize> {
    let (h, w, k) = assignments.dim();
    let (bh, bw) = pair.dim();
    let center_x = ((bw - 1) / 2) as isize;
    let center_y = ((bh - 1) / 2) as isize;
    let self_weight = pair_weight(pair, 0, 0, 0, 0);

    let mut order: Vec<usize> = (0..w * h).collect();
    order.shuffle(rng);
    let mut queue: VecDeque<(usize, usize)> = order.into_iter().map(|i| (i % w, i / w)).collect();

    let mut logs = vec![0.0f64; k];
    let mut weights = vec![0.0f64; k];
    let mut flipped = 0usize;

    while let Some((i_x, i_y)) = queue.pop_front() {
        // Local field: pairwise contributions from every neighbor in the
        // interaction box, each weighted by the neighbor's current
        // palette expectation. The self term is folded into the
        // quadratic part of the log-weight below.
        let mut field = Rgb::default();
        for y in 0..bh as isize {
            for x in 0..bw as isize {
                let j_x = x - center_x + i_x as isize;
                let j_y = y - center_y + i_y as isize;
                if j_x == i_x as isize && j_y == i_y as isize {
                    continue;
                }
                if j_x < 0 || j_y < 0 || j_x >= w as isize || j_y >= h as isize {
                    continue;
                }
                let (jx, jy) = (j_x as usize, j_y as usize);
                let mut expectation = Rgb::default();
                for (v, &entry) in palette.iter().enumerate() {
                    expectation += entry * assignments[[jy, jx, v]];
                }
                field += pair_weight(pair, i_x as isize, i_y as isize, j_x, j_y)
                    .hadamard(expectation);
            }
        }
        let field = field * 2.0 + unary[[i_y, i_x]];

        // Softmax over palette entries, shifted so the peak raw weight
        // is e^100; only relative weights matter.
        let mut max_log = f64::NEG_INFINITY;
        for (v, &entry) in palette.iter().enumerate() {
            let log = -entry.dot(field + self_weight.hadamard(entry)) / temperature;
            logs[v] = log;
            if log > max_log {
                max_log = log;
            }
        }
        let shift = max_log - LOG_WEIGHT_SHIFT;
        let mut total = 0.0;
        for v in 0..k {
            let weight = (logs[v] - shift).exp();
            weights[v] = weight;
            total += weight;
        }
        if total == 0.0 {
            return Err(SpatqError::MeanFieldUnderflow { x: i_x, y: i_y });
        }

        let previous = dominant_entry(assignments, i_x, i_y);
        for v in 0..k {
            assignments[[i_y, i_x, v]] =
                (weights[v] / total).clamp(ASSIGNMENT_FLOOR, ASSIGNMENT_CEIL);
        }
        let current = dominant_entry(assignments, i_x, i_y);

        if previous != current {
            flipped += 1;
            // Revisit the interior of the interaction box. The outermost
            // ring carries little weight and gets picked up through its
            // own neighbors if it matters.
            for y in 1..bh as isize - 1 {
                for x in 1..bw as isize - 1 {
                    let j_x = x - center_x + i_x as isize;
                    let j_y = y - center_y + i_y as isize;
                    if j_x < 0 || j_y < 0 || j_x >= w as isize || j_y >= h as isize {
                        continue;
                    }
                    queue.push_back((j_x as usize, j_y as usize));
                }
            }
        }
    }

    Ok(flipped)
}
