// Color coverage analysis tests

use image::{Rgb, RgbImage};

use print_cost::analysis::coverage::{AnalysisConfig, analyze_page, try_analyze};
use print_cost::analysis::{CoverageResult, PixelBuffer};
use print_cost::error::PrintCostError;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const LINK_BLUE: Rgb<u8> = Rgb([0, 0, 238]);

fn page(width: u32, height: u32, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, background)
}

fn fill_rect(image: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            image.put_pixel(x, y, color);
        }
    }
}

fn analyze(image: RgbImage) -> CoverageResult {
    analyze_page(PixelBuffer::new(image), &AnalysisConfig::default())
}

// ============================================================
// 1. Neutral pages
// ============================================================

#[test]
fn test_all_white_page_has_zero_coverage() {
    let result = analyze(page(1240, 1754, WHITE));
    assert_eq!(result, CoverageResult::zero());
}

#[test]
fn test_all_black_page_has_zero_coverage() {
    let result = analyze(page(850, 1100, Rgb([0, 0, 0])));
    assert_eq!(result.coverage_percent, 0.0);
}

#[test]
fn test_gray_text_and_shading_are_not_color() {
    let mut image = page(800, 1000, WHITE);
    fill_rect(&mut image, 50, 50, 700, 20, Rgb([0, 0, 0]));
    fill_rect(&mut image, 50, 100, 700, 300, Rgb([180, 180, 180]));
    // Compression noise: a few units of channel spread
    fill_rect(&mut image, 50, 500, 700, 100, Rgb([120, 126, 131]));

    let result = analyze(image);
    assert_eq!(result.coverage_percent, 0.0);
}

// ============================================================
// 2. Saturated pages
// ============================================================

#[test]
fn test_uniform_saturated_color_is_full_coverage() {
    let result = analyze(page(1000, 500, Rgb([200, 30, 30])));
    assert_eq!(result.coverage_percent, 100.0);
    assert_eq!(result.approx_r, 100.0);
    assert_eq!(result.approx_g, 0.0);
    assert_eq!(result.approx_b, 0.0);
}

#[test]
fn test_sparse_hyperlink_is_measured_to_four_decimals() {
    // 240 x 10 = 2400 of 800 x 1000 pixels = 0.3%
    let mut image = page(800, 1000, WHITE);
    fill_rect(&mut image, 100, 400, 240, 10, LINK_BLUE);

    let result = analyze(image);
    assert_eq!(result.coverage_percent, 0.3);
    assert_eq!(result.approx_b, 0.3);
    assert_eq!(result.approx_r, 0.0);
}

#[test]
fn test_single_colored_pixel_survives_rounding() {
    // 1 / 800000 = 0.000125% -> 0.0001
    let mut image = page(800, 1000, WHITE);
    image.put_pixel(10, 10, LINK_BLUE);

    let result = analyze(image);
    assert_eq!(result.coverage_percent, 0.0001);
}

// ============================================================
// 3. Pixel threshold
// ============================================================

#[test]
fn test_spread_equal_to_threshold_is_not_colored() {
    let result = analyze(page(800, 100, Rgb([100, 130, 100])));
    assert_eq!(result.coverage_percent, 0.0);

    let result = analyze(page(800, 100, Rgb([100, 131, 100])));
    assert_eq!(result.coverage_percent, 100.0);
}

#[test]
fn test_threshold_is_configurable() {
    let faint_green = page(800, 100, Rgb([100, 120, 100]));

    let default = analyze_page(PixelBuffer::new(faint_green.clone()), &AnalysisConfig::default());
    assert_eq!(default.coverage_percent, 0.0);

    let sensitive = AnalysisConfig {
        color_pixel_threshold: 10,
        ..AnalysisConfig::default()
    };
    let result = analyze_page(PixelBuffer::new(faint_green), &sensitive);
    assert_eq!(result.coverage_percent, 100.0);
    assert_eq!(result.approx_g, 100.0);
}

// ============================================================
// 4. Channel breakdown
// ============================================================

#[test]
fn test_ties_fall_outside_every_bucket() {
    // Yellow: R == G, both above B
    let result = analyze(page(800, 100, Rgb([230, 230, 20])));
    assert_eq!(result.coverage_percent, 100.0);
    assert_eq!(result.approx_r + result.approx_g + result.approx_b, 0.0);
}

#[test]
fn test_breakdown_splits_by_dominant_channel() {
    let mut image = page(800, 100, WHITE);
    fill_rect(&mut image, 0, 0, 200, 100, Rgb([220, 40, 40]));
    fill_rect(&mut image, 200, 0, 100, 100, Rgb([40, 200, 40]));
    fill_rect(&mut image, 300, 0, 100, 100, Rgb([40, 40, 200]));

    let result = analyze(image);
    assert_eq!(result.coverage_percent, 50.0);
    assert_eq!(result.approx_r, 25.0);
    assert_eq!(result.approx_g, 12.5);
    assert_eq!(result.approx_b, 12.5);
}

#[test]
fn test_breakdown_never_exceeds_total() {
    let mut state: u32 = 0x1234_5678;
    let image = RgbImage::from_fn(300, 200, |_, _| {
        let mut next = || {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        };
        Rgb([next(), next(), next()])
    });

    let result = analyze(image);
    let sum = result.approx_r + result.approx_g + result.approx_b;
    assert!(sum <= 100.0 + 1e-9, "breakdown sum {sum} exceeds 100");
    assert!(sum <= result.coverage_percent + 0.02);
}

// ============================================================
// 5. Determinism and scale
// ============================================================

#[test]
fn test_coverage_is_monotonic_in_colored_fraction() {
    let mut previous = -1.0;
    for step in 0..=10 {
        let mut image = page(800, 100, WHITE);
        if step > 0 {
            fill_rect(&mut image, 0, 0, step * 80, 100, Rgb([0, 150, 0]));
        }
        let coverage = analyze(image).coverage_percent;
        assert_eq!(coverage, step as f64 * 10.0);
        assert!(coverage >= previous);
        previous = coverage;
    }
}

#[test]
fn test_analysis_is_idempotent() {
    let mut image = page(1200, 900, WHITE);
    fill_rect(&mut image, 300, 200, 333, 111, Rgb([240, 120, 0]));
    fill_rect(&mut image, 10, 10, 7, 700, LINK_BLUE);

    let first = analyze(image.clone());
    let second = analyze(image);
    assert_eq!(first, second);
}

#[test]
fn test_upscaled_page_has_similar_coverage() {
    let mut image = page(400, 300, WHITE);
    fill_rect(&mut image, 150, 100, 100, 100, Rgb([220, 20, 20]));
    let upscaled = RgbImage::from_fn(800, 600, |x, y| *image.get_pixel(x / 2, y / 2));

    let original = analyze(image).coverage_percent;
    let doubled = analyze(upscaled).coverage_percent;

    // 200 x 200 of 800 x 600
    assert!((doubled - 8.3333).abs() < 1e-9, "got {doubled}");
    assert!(
        (original - doubled).abs() < 0.5,
        "original {original} vs upscaled {doubled}"
    );
}

// ============================================================
// 6. Fail-soft
// ============================================================

#[test]
fn test_empty_raster_is_a_decode_error() {
    let buffer = PixelBuffer::from_raw(0, 0, Vec::new()).expect("empty raw buffer");
    assert!(matches!(
        try_analyze(buffer, &AnalysisConfig::default()),
        Err(PrintCostError::DecodeError(_))
    ));
}

#[test]
fn test_empty_raster_scores_zero() {
    let buffer = PixelBuffer::from_raw(0, 0, Vec::new()).expect("empty raw buffer");
    assert_eq!(
        analyze_page(buffer, &AnalysisConfig::default()),
        CoverageResult::zero()
    );
}

#[test]
fn test_raw_buffer_size_is_validated() {
    let result = PixelBuffer::from_raw(2, 2, vec![0; 11]);
    assert!(matches!(result, Err(PrintCostError::DecodeError(_))));

    let buffer = PixelBuffer::from_raw(2, 2, vec![0; 12]).expect("2x2 RGB buffer");
    assert_eq!((buffer.width(), buffer.height()), (2, 2));
}
