use ndarray::{arr2, Array2};

use spatq_core::color::Rgb;
use spatq_core::filter::FilterKernel;

/// 3x3 normalized Gaussian reconstruction filter table.
pub const GAUSSIAN_3: [[f64; 3]; 3] = [
    [0.0705917, 0.106818, 0.0705917],
    [0.1068180, 0.290361, 0.1068180],
    [0.0705917, 0.106818, 0.0705917],
];

/// 5x5 normalized Gaussian reconstruction filter table.
pub const GAUSSIAN_5: [[f64; 5]; 5] = [
    [0.0116424, 0.0210523, 0.0266577, 0.0210523, 0.0116424],
    [0.0210523, 0.0478881, 0.0724633, 0.0478881, 0.0210523],
    [0.0266577, 0.0724633, 0.1969760, 0.0724633, 0.0266577],
    [0.0210523, 0.0478881, 0.0724633, 0.0478881, 0.0210523],
    [0.0116424, 0.0210523, 0.0266577, 0.0210523, 0.0116424],
];

/// 1x1 unit filter: plain per-pixel quantization.
pub fn unit_filter() -> FilterKernel {
    FilterKernel::from_scalars(&Array2::from_elem((1, 1), 1.0)).expect("valid 1x1 filter")
}

pub fn gaussian_filter_3() -> FilterKernel {
    FilterKernel::from_scalars(&arr2(&GAUSSIAN_3)).expect("valid 3x3 filter")
}

pub fn gaussian_filter_5() -> FilterKernel {
    FilterKernel::from_scalars(&arr2(&GAUSSIAN_5)).expect("valid 5x5 filter")
}

pub fn constant_image(width: usize, height: usize, color: Rgb) -> Array2<Rgb> {
    Array2::from_elem((height, width), color)
}

/// Two-color checkerboard, `a` on even parity cells.
pub fn checkerboard(width: usize, height: usize, a: Rgb, b: Rgb) -> Array2<Rgb> {
    Array2::from_shape_fn((height, width), |(y, x)| if (x + y) % 2 == 0 { a } else { b })
}

/// Single-row linear ramp in the red channel, 0 at x=0 up to 1 at the
/// last column.
pub fn red_ramp(width: usize) -> Array2<Rgb> {
    Array2::from_shape_fn((1, width), |(_, x)| {
        Rgb::new(x as f64 / (width - 1) as f64, 0.0, 0.0)
    })
}

/// Euclidean distance between two colors.
pub fn color_distance(a: Rgb, b: Rgb) -> f64 {
    let d = a - b;
    d.dot(d).sqrt()
}
