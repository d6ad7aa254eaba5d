mod common;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use spatq_core::anneal::{quantize, Quantized, Schedule};
use spatq_core::color::Rgb;
use spatq_core::filter::FilterKernel;
use spatq_core::palette::random_palette;

fn run(image: &Array2<Rgb>, filter: &FilterKernel, colors: usize, seed: u64) -> Quantized {
    let mut rng = StdRng::seed_from_u64(seed);
    let palette = random_palette(colors, &mut rng);
    quantize(image, filter, palette, Schedule::default(), rng).unwrap()
}

#[test]
fn test_single_gray_pixel() {
    let gray = Rgb::splat(0.5);
    let image = common::constant_image(1, 1, gray);
    let result = run(&image, &common::unit_filter(), 2, 1);

    let index = result.indices[[0, 0]] as usize;
    assert!(
        common::color_distance(result.palette[index], gray) < 0.05,
        "assigned entry {:?} should match the input pixel",
        result.palette[index]
    );
}

#[test]
fn test_constant_red_image_reconstructs() {
    let red = Rgb::new(1.0, 0.0, 0.0);
    let image = common::constant_image(16, 16, red);
    let result = run(&image, &common::gaussian_filter_3(), 2, 2);

    // Either entry may win any pixel; what matters is that the
    // reconstruction stays within tolerance everywhere.
    for index in result.indices.iter() {
        let err = common::color_distance(result.palette[*index as usize], red);
        assert!(err < 0.05, "reconstruction error {err} at entry {index}");
    }
}

#[test]
fn test_checkerboard_recovers_both_colors_and_pattern() {
    let red = Rgb::new(1.0, 0.0, 0.0);
    let blue = Rgb::new(0.0, 0.0, 1.0);
    let image = common::checkerboard(32, 32, red, blue);
    let result = run(&image, &common::gaussian_filter_3(), 2, 3);

    // The palette must match {red, blue} under one of the two index
    // assignments; score the pattern under both and keep the better.
    let mut best_palette_err = f64::INFINITY;
    let mut best_matches = 0usize;
    for (r_idx, b_idx) in [(0usize, 1usize), (1, 0)] {
        let palette_err = common::color_distance(result.palette[r_idx], red)
            .max(common::color_distance(result.palette[b_idx], blue));
        let mut matches = 0;
        for y in 0..32 {
            for x in 0..32 {
                let expected = if (x + y) % 2 == 0 { r_idx } else { b_idx };
                if result.indices[[y, x]] as usize == expected {
                    matches += 1;
                }
            }
        }
        if matches > best_matches {
            best_matches = matches;
            best_palette_err = palette_err;
        }
    }

    assert!(
        best_palette_err < 0.1,
        "palette {:?} should recover both colors",
        result.palette
    );
    assert!(
        best_matches >= 1024 * 95 / 100,
        "only {best_matches}/1024 cells follow the checker pattern"
    );
}

#[test]
fn test_noise_image_terminates_with_valid_output() {
    let mut rng = StdRng::seed_from_u64(77);
    let image = Array2::from_shape_fn((64, 64), |_| Rgb::new(rng.gen(), rng.gen(), rng.gen()));
    let result = run(&image, &common::gaussian_filter_5(), 4, 4);

    assert_eq!(result.indices.dim(), (64, 64));
    for index in result.indices.iter() {
        assert!(*index < 4);
    }
    for entry in &result.palette {
        for k in 0..Rgb::CHANNELS {
            assert!((0.0..=1.0).contains(&entry[k]));
        }
    }
}

#[test]
fn test_red_ramp_quantizes_to_monotone_bands() {
    let image = common::red_ramp(128);
    let result = run(&image, &common::gaussian_filter_3(), 4, 5);

    // Mapped through the palette, the red channel must be non-decreasing
    // along the ramp, in at most one run per palette entry.
    let reds: Vec<f64> = result
        .indices
        .row(0)
        .iter()
        .map(|&i| result.palette[i as usize][0])
        .collect();
    for pair in reds.windows(2) {
        assert!(
            pair[1] >= pair[0] - 1e-9,
            "mapped red decreases along the ramp: {} -> {}",
            pair[0],
            pair[1]
        );
    }

    let row = result.indices.row(0);
    let mut runs = 1;
    for x in 1..row.len() {
        if row[x] != row[x - 1] {
            runs += 1;
        }
    }
    assert!(runs <= 4, "{runs} runs for a 4-entry palette");
}

#[test]
fn test_same_seed_reproduces_bit_identical_output() {
    let image = common::checkerboard(32, 32, Rgb::new(1.0, 0.0, 0.0), Rgb::new(0.0, 0.0, 1.0));
    let first = run(&image, &common::gaussian_filter_3(), 2, 123);
    let second = run(&image, &common::gaussian_filter_3(), 2, 123);

    assert_eq!(first.indices, second.indices);
    for (a, b) in first.palette.iter().zip(&second.palette) {
        for k in 0..Rgb::CHANNELS {
            assert!((a[k] - b[k]).abs() <= 1e-9);
        }
    }
}
