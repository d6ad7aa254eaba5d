//! Reconstruction filter tables.
//!
//! The core takes filter weights as data; the tables live here. Sizes 3
//! and 5 are normalized Gaussians, size 1 is the unit filter (plain
//! per-pixel quantization).

use ndarray::{arr2, Array2};
use spatq_core::error::{Result, SpatqError};
use spatq_core::filter::FilterKernel;

const GAUSSIAN_3: [[f64; 3]; 3] = [
    [0.0705917, 0.106818, 0.0705917],
    [0.1068180, 0.290361, 0.1068180],
    [0.0705917, 0.106818, 0.0705917],
];

const GAUSSIAN_5: [[f64; 5]; 5] = [
    [0.0116424, 0.0210523, 0.0266577, 0.0210523, 0.0116424],
    [0.0210523, 0.0478881, 0.0724633, 0.0478881, 0.0210523],
    [0.0266577, 0.0724633, 0.1969760, 0.0724633, 0.0266577],
    [0.0210523, 0.0478881, 0.0724633, 0.0478881, 0.0210523],
    [0.0116424, 0.0210523, 0.0266577, 0.0210523, 0.0116424],
];

pub fn reconstruction_filter(size: usize) -> Result<FilterKernel> {
    let table: Array2<f64> = match size {
        1 => Array2::from_elem((1, 1), 1.0),
        3 => arr2(&GAUSSIAN_3),
        5 => arr2(&GAUSSIAN_5),
        other => return Err(SpatqError::UnsupportedFilterSize(other)),
    };
    FilterKernel::from_scalars(&table)
}
