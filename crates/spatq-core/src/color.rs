use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub};

/// A linear RGB color with `f64` channels, nominally in [0.0, 1.0].
///
/// Interaction fields and palette math treat the three channels
/// independently; the componentwise (Hadamard) product and the dot
/// product are the two bilinear forms everything else is built from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb([f64; 3]);

impl Rgb {
    pub const CHANNELS: usize = 3;

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Rgb([r, g, b])
    }

    /// All three channels set to the same value.
    pub fn splat(v: f64) -> Self {
        Rgb([v; 3])
    }

    /// Componentwise (Hadamard) product.
    pub fn hadamard(self, rhs: Rgb) -> Rgb {
        Rgb([
            self.0[0] * rhs.0[0],
            self.0[1] * rhs.0[1],
            self.0[2] * rhs.0[2],
        ])
    }

    pub fn dot(self, rhs: Rgb) -> f64 {
        self.0[0] * rhs.0[0] + self.0[1] * rhs.0[1] + self.0[2] * rhs.0[2]
    }

    /// Each channel clamped to [0.0, 1.0].
    pub fn clamp01(self) -> Rgb {
        Rgb([
            self.0[0].clamp(0.0, 1.0),
            self.0[1].clamp(0.0, 1.0),
            self.0[2].clamp(0.0, 1.0),
        ])
    }

    pub fn channels(&self) -> &[f64; 3] {
        &self.0
    }
}

impl Index<usize> for Rgb {
    type Output = f64;

    fn index(&self, k: usize) -> &f64 {
        &self.0[k]
    }
}

impl IndexMut<usize> for Rgb {
    fn index_mut(&mut self, k: usize) -> &mut f64 {
        &mut self.0[k]
    }
}

impl Add for Rgb {
    type Output = Rgb;

    fn add(self, rhs: Rgb) -> Rgb {
        Rgb([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
        ])
    }
}

impl AddAssign for Rgb {
    fn add_assign(&mut self, rhs: Rgb) {
        self.0[0] += rhs.0[0];
        self.0[1] += rhs.0[1];
        self.0[2] += rhs.0[2];
    }
}

impl Sub for Rgb {
    type Output = Rgb;

    fn sub(self, rhs: Rgb) -> Rgb {
        Rgb([
            self.0[0] - rhs.0[0],
            self.0[1] - rhs.0[1],
            self.0[2] - rhs.0[2],
        ])
    }
}

impl Mul<f64> for Rgb {
    type Output = Rgb;

    fn mul(self, scalar: f64) -> Rgb {
        Rgb([self.0[0] * scalar, self.0[1] * scalar, self.0[2] * scalar])
    }
}

impl MulAssign<f64> for Rgb {
    fn mul_assign(&mut self, scalar: f64) {
        self.0[0] *= scalar;
        self.0[1] *= scalar;
        self.0[2] *= scalar;
    }
}
