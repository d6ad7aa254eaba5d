//! Annealing driver: couples the temperature schedule to the pyramid.
//!
//! The driver starts with random assignments at the coarsest level and
//! alternates mean-field sweeps with palette re-estimation, cooling the
//! temperature geometrically. After a fixed number of sweeps per level
//! the assignment field is zoomed to the next finer level; the run ends
//! with a hard argmax at image resolution.

use ndarray::{Array2, Array3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Rgb;
use crate::consts::SWEEPS_PER_LEVEL;
use crate::error::{Result, SpatqError};
use crate::filter::FilterKernel;
use crate::meanfield::{dominant_entry, relax_sweep};
use crate::palette::refine_palette;
use crate::pyramid::{zoom_double, Pyramid};

/// Geometric temperature schedule for the annealing loop.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Schedule {
    pub initial_temperature: f64,
    pub final_temperature: f64,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            final_temperature: 0.001,
        }
    }
}

impl Schedule {
    pub fn validate(&self) -> Result<()> {
        if !(self.final_temperature > 0.0 && self.initial_temperature > self.final_temperature) {
            return Err(SpatqError::InvalidSchedule {
                initial: self.initial_temperature,
                final_temp: self.final_temperature,
            });
        }
        Ok(())
    }
}

/// Result of a finished quantization run.
pub struct Quantized {
    /// Palette index per image pixel, row-major `(height, width)`.
    pub indices: Array2<u8>,
    /// Optimized palette, each channel clamped to [0, 1].
    pub palette: Vec<Rgb>,
}

/// Incremental annealing state.
///
/// Each [`step`](Annealer::step) performs one mean-field sweep and one
/// palette solve; callers that want progress reporting drive the loop
/// themselves, everyone else uses [`quantize`].
pub struct Annealer<R: Rng> {
    pyramid: Pyramid,
    assignments: Array3<f64>,
    palette: Vec<Rgb>,
    temperature: f64,
    final_temperature: f64,
    cooling: f64,
    level: isize,
    sweeps_at_level: usize,
    width: usize,
    height: usize,
    rng: R,
}

impl<R: Rng> Annealer<R> {
    pub fn new(
        image: &Array2<Rgb>,
        filter: &FilterKernel,
        initial_palette: Vec<Rgb>,
        schedule: Schedule,
        mut rng: R,
    ) -> Result<Self> {
        let (height, width) = image.dim();
        if width == 0 || height == 0 {
            return Err(SpatqError::InvalidDimensions { width, height });
        }
        if !(2..=256).contains(&initial_palette.len()) {
            return Err(SpatqError::PaletteSizeOutOfRange(initial_palette.len()));
        }
        schedule.validate()?;

        let pyramid = Pyramid::build(image, filter);
        let coarsest = pyramid.coarsest();

        // Un-normalized uniform random start; the first sweep normalizes
        // every cell it touches.
        let k = initial_palette.len();
        let assignments = Array3::from_shape_fn(
            (height >> coarsest, width >> coarsest, k),
            |_| rng.gen::<f64>(),
        );

        // The exponent denominator is clamped so images small enough to
        // need no coarsening still cool down instead of dividing by zero.
        let cooling_steps = (coarsest * SWEEPS_PER_LEVEL).max(1);
        let cooling = (schedule.final_temperature / schedule.initial_temperature)
            .powf(1.0 / cooling_steps as f64);

        Ok(Self {
            pyramid,
            assignments,
            palette: initial_palette,
            temperature: schedule.initial_temperature,
            final_temperature: schedule.final_temperature,
            cooling,
            level: coarsest as isize,
            sweeps_at_level: 0,
            width,
            height,
            rng,
        })
    }

    /// Upper bound on the number of [`step`](Annealer::step) calls,
    /// suitable for sizing a progress bar.
    pub fn estimated_steps(&self) -> usize {
        (self.pyramid.coarsest() + 1) * SWEEPS_PER_LEVEL + 1
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Current pyramid level, or `None` once annealing has finished.
    pub fn level(&self) -> Option<usize> {
        usize::try_from(self.level).ok()
    }

    /// Run one sweep and one palette solve, then advance the schedule.
    /// Returns `false` once every level has finished.
    pub fn step(&mut self) -> Result<bool> {
        if self.level < 0 {
            return Ok(false);
        }
        let level = self.level as usize;
        let fields = self.pyramid.level(level);

        let flipped = relax_sweep(
            &mut self.assignments,
            &fields.unary,
            &fields.pair,
            &self.palette,
            self.temperature,
            &mut self.rng,
        )?;
        refine_palette(
            &mut self.palette,
            &self.assignments,
            &fields.unary,
            &fields.pair,
        )?;
        debug!(level, temperature = self.temperature, flipped, "annealing step");

        self.sweeps_at_level += 1;
        if (self.temperature <= self.final_temperature || level > 0)
            && self.sweeps_at_level >= SWEEPS_PER_LEVEL
        {
            self.level -= 1;
            if self.level < 0 {
                return Ok(false);
            }
            let next = self.level as usize;
            self.assignments = zoom_double(
                &self.assignments,
                self.height >> next,
                self.width >> next,
            );
            self.sweeps_at_level = 0;
        }
        if self.temperature > self.final_temperature {
            self.temperature *= self.cooling;
        }
        Ok(true)
    }

    /// Zoom the assignment field the rest of the way to image
    /// resolution if needed, hard-assign every pixel, and clamp the
    /// palette.
    pub fn finish(mut self) -> Quantized {
        let mut level = self.level.max(0) as usize;
        while level > 0 {
            level -= 1;
            self.assignments = zoom_double(
                &self.assignments,
                self.height >> level,
                self.width >> level,
            );
        }

        let indices = Array2::from_shape_fn((self.height, self.width), |(y, x)| {
            dominant_entry(&self.assignments, x, y) as u8
        });
        let palette = self.palette.into_iter().map(Rgb::clamp01).collect();
        Quantized { indices, palette }
    }
}

/// Quantize an image against a filter: anneal to completion and return
/// the indexed image with its optimized palette.
pub fn quantize<R: Rng>(
    image: &Array2<Rgb>,
    filter: &FilterKernel,
    initial_palette: Vec<Rgb>,
    schedule: Schedule,
    rng: R,
) -> Result<Quantized> {
    let mut annealer = Annealer::new(image, filter, initial_palette, schedule, rng)?;
    while annealer.step()? {}
    Ok(annealer.finish())
}
