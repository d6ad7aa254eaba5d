mod common;

use approx::assert_abs_diff_eq;
use ndarray::{arr2, Array3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use spatq_core::color::Rgb;
use spatq_core::interaction::{pair_interaction, unary_field};
use spatq_core::palette::{random_palette, refine_palette};

#[test]
fn test_random_palette_in_unit_cube() {
    let mut rng = StdRng::seed_from_u64(3);
    let palette = random_palette(16, &mut rng);
    assert_eq!(palette.len(), 16);
    for entry in &palette {
        for k in 0..Rgb::CHANNELS {
            assert!((0.0..1.0).contains(&entry[k]));
        }
    }
}

#[test]
fn test_refine_palette_single_pixel_recovers_color() {
    // With a unit filter and one pixel the per-channel solve reduces to
    // P[v] = -a/2 = c for every entry, whatever the assignments.
    let color = Rgb::new(0.3, 0.6, 0.9);
    let image = common::constant_image(1, 1, color);
    let pair = pair_interaction(&common::unit_filter());
    let unary = unary_field(&image, &pair);

    let mut assignments = Array3::from_elem((1, 1, 2), 0.5);
    assignments[[0, 0, 0]] = 0.7;
    assignments[[0, 0, 1]] = 0.3;

    let mut palette = vec![Rgb::default(), Rgb::splat(1.0)];
    refine_palette(&mut palette, &assignments, &unary, &pair).unwrap();

    for entry in &palette {
        for k in 0..Rgb::CHANNELS {
            assert_abs_diff_eq!(entry[k], color[k], epsilon = 1e-9);
        }
    }
}

#[test]
fn test_refine_palette_weighted_means_without_coupling() {
    // A unit filter has no cross-pixel coupling, so each entry solves to
    // the assignment-weighted mean of the pixels it claims.
    let red = Rgb::new(1.0, 0.0, 0.0);
    let blue = Rgb::new(0.0, 0.0, 1.0);
    let image = arr2(&[[red, blue]]);
    let pair = pair_interaction(&common::unit_filter());
    let unary = unary_field(&image, &pair);

    let mut assignments = Array3::zeros((1, 2, 2));
    assignments[[0, 0, 0]] = 0.9999;
    assignments[[0, 0, 1]] = 0.0001;
    assignments[[0, 1, 0]] = 0.0001;
    assignments[[0, 1, 1]] = 0.9999;

    let mut palette = vec![Rgb::splat(0.5), Rgb::splat(0.5)];
    refine_palette(&mut palette, &assignments, &unary, &pair).unwrap();

    assert!(common::color_distance(palette[0], red) < 1e-3);
    assert!(common::color_distance(palette[1], blue) < 1e-3);
}

#[test]
fn test_refine_palette_constant_image_converges_to_color() {
    // Whatever the (clamped, normalized) assignments, a constant image
    // pulls every entry to its color under a normalized filter.
    let color = Rgb::new(0.2, 0.8, 0.4);
    let image = common::constant_image(12, 12, color);
    let pair = pair_interaction(&common::gaussian_filter_3());
    let unary = unary_field(&image, &pair);

    let mut rng = StdRng::seed_from_u64(8);
    let assignments = Array3::from_elem((12, 12, 3), 1.0 / 3.0);
    let mut palette = random_palette(3, &mut rng);
    refine_palette(&mut palette, &assignments, &unary, &pair).unwrap();

    // Uniform assignments: the solve sees one effective color everywhere.
    for entry in &palette {
        assert!(
            common::color_distance(*entry, color) < 1e-6,
            "entry {entry:?} should equal {color:?}"
        );
    }
}
