mod common;

use common::synthetic_image::{checkerboard_rgb, square_on_black, uniform};
use control_maps::pyramid::{composite_edges, SCALE_FACTORS};
use control_maps::{canny_pyramid, canny_pyramid_with_report, ColorImage, Error};

#[test]
fn white_square_outline_saturates_and_response_stays_local() {
    // square spans 27..=36
    let image = square_on_black(64, 27, 10, [255, 255, 255]);
    let edges = canny_pyramid(&image).unwrap();
    assert_eq!((edges.width(), edges.height()), (64, 64));

    // full-resolution edges sit just outside the left/top and on the
    // right/bottom rows of the square
    for t in 28..36 {
        assert_eq!(edges.get(26, t), 255, "left side at row {t}");
        assert_eq!(edges.get(36, t), 255, "right side at row {t}");
        assert_eq!(edges.get(t, 26), 255, "top side at column {t}");
        assert_eq!(edges.get(t, 36), 255, "bottom side at column {t}");
    }

    // coarse levels mark the whole square, so the interior is filled but
    // below the outline
    let center = edges.get(32, 32);
    assert!(center > 0 && center < 255, "center = {center}");

    let distance = |x: usize, y: usize| {
        let d = |v: usize| 27usize.saturating_sub(v).max(v.saturating_sub(36));
        d(x).max(d(y))
    };
    for y in 0..64 {
        for x in 0..64 {
            if distance(x, y) > 8 {
                assert_eq!(edges.get(x, y), 0, "response at ({x}, {y})");
            }
        }
    }
}

#[test]
fn output_keeps_odd_input_dimensions() {
    let image = checkerboard_rgb(37, 23, 5);
    let edges = canny_pyramid(&image).unwrap();
    assert_eq!((edges.width(), edges.height()), (37, 23));
    assert!(edges.as_raw().iter().any(|&v| v > 0));
}

#[test]
fn single_pixel_image_is_supported() {
    let image = uniform(1, 1, [90, 10, 200]);
    let edges = canny_pyramid(&image).unwrap();
    assert_eq!(edges.as_raw(), &[0]);
}

#[test]
fn flat_image_has_no_edges() {
    let edges = canny_pyramid(&uniform(40, 30, [128, 128, 128])).unwrap();
    assert!(edges.as_raw().iter().all(|&v| v == 0));
}

#[test]
fn empty_image_is_rejected() {
    let err = canny_pyramid(&ColorImage::new(0, 0)).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn fold_ends_at_last_scale_of_the_list() {
    let image = checkerboard_rgb(60, 40, 6);
    let coarse_to_fine = composite_edges(&image, &SCALE_FACTORS).unwrap();
    assert_eq!((coarse_to_fine.width(), coarse_to_fine.height()), (60, 40));

    let mut reversed = SCALE_FACTORS;
    reversed.reverse();
    let fine_to_coarse = composite_edges(&image, &reversed).unwrap();
    assert_eq!((fine_to_coarse.width(), fine_to_coarse.height()), (12, 8));
}

#[test]
fn invalid_scale_lists_are_rejected() {
    let image = checkerboard_rgb(20, 20, 4);
    assert!(composite_edges(&image, &[]).is_err());
    assert!(composite_edges(&image, &[0.5, 0.0]).is_err());
    assert!(composite_edges(&image, &[f32::NAN]).is_err());
}

#[test]
fn report_covers_every_scale() {
    let image = checkerboard_rgb(50, 50, 10);
    let (edges, report) = canny_pyramid_with_report(&image).unwrap();
    assert_eq!(edges, canny_pyramid(&image).unwrap());
    assert_eq!(report.pyramid.levels.len(), SCALE_FACTORS.len());

    let last = report.pyramid.levels.last().unwrap();
    assert_eq!((last.width, last.height), (50, 50));
    assert!(last.edge_fraction > 0.0);
    assert!(report.timings.total_ms >= 0.0);
}
