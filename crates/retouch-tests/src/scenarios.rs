//! Fixed inputs with known outputs.
//!
//! Each case names a tiny image, a parameter set and the exact bytes the
//! default pipeline must produce.

use approx::assert_abs_diff_eq;
use retouch_core::PixelBuffer;
use retouch_ops::color::{contrast_factor, rgb_to_hsl};
use retouch_ops::stage::{InvertStage, SepiaStage, Stage};
use retouch_ops::{adjust, AdjustmentParams, Pipeline};

fn px(rgba: [u8; 4]) -> PixelBuffer {
    PixelBuffer::filled(1, 1, rgba).unwrap()
}

#[test]
fn mid_gray_plus_fifty_brightness() {
    let src = PixelBuffer::filled(2, 2, [128, 128, 128, 255]).unwrap();
    let out = adjust(&src, &AdjustmentParams::neutral().with_brightness(50)).unwrap();
    assert!(out.pixels().all(|p| p == [178, 178, 178, 255]));
}

#[test]
fn red_full_grayscale() {
    let out = adjust(&px([255, 0, 0, 255]), &AdjustmentParams::neutral().with_grayscale(100)).unwrap();
    assert_eq!(out.pixel(0, 0), [77, 77, 77, 255]);
}

#[test]
fn red_half_turn_is_cyan() {
    let out = adjust(&px([255, 0, 0, 255]), &AdjustmentParams::neutral().with_hue_rotate(180)).unwrap();
    let [r, g, b, a] = out.pixel(0, 0);
    assert!(r <= 1 && g >= 254 && b >= 254, "({}, {}, {})", r, g, b);
    assert_eq!(a, 255);
}

#[test]
fn hue_rotation_wraps_negative() {
    // -120 from red lands on blue
    let out = adjust(&px([255, 0, 0, 10]), &AdjustmentParams::neutral().with_hue_rotate(-120)).unwrap();
    assert_eq!(out.pixel(0, 0), [0, 0, 255, 10]);
}

#[test]
fn saturation_boost_clamps_at_full() {
    let src = px([200, 100, 100, 255]);
    let out = adjust(&src, &AdjustmentParams::neutral().with_saturation(100)).unwrap();
    let before = rgb_to_hsl([200.0, 100.0, 100.0]);
    let [r, g, b, _] = out.pixel(0, 0);
    let after = rgb_to_hsl([r as f32, g as f32, b as f32]);
    assert_abs_diff_eq!(after.s, (before.s * 2.0).min(1.0), epsilon = 0.02);
    assert_abs_diff_eq!(after.l, before.l, epsilon = 0.01);
}

#[test]
fn sepia_on_white_uses_clamped_matrix() {
    let out = adjust(&px([255, 255, 255, 255]), &AdjustmentParams::neutral().with_sepia(100)).unwrap();
    assert_eq!(out.pixel(0, 0), [255, 255, 239, 255]);
}

#[test]
fn contrast_pushes_away_from_midpoint() {
    let src = PixelBuffer::from_raw(2, 1, vec![100, 128, 156, 255, 28, 228, 128, 0]).unwrap();
    let out = adjust(&src, &AdjustmentParams::neutral().with_contrast(50)).unwrap();
    let f = contrast_factor(50.0);
    let expect = |v: f32| (f * (v - 128.0) + 128.0).round().clamp(0.0, 255.0) as u8;
    assert_eq!(out.pixel(0, 0), [expect(100.0), 128, expect(156.0), 255]);
    assert_eq!(out.pixel(1, 0), [0, 255, 128, 0]);
}

#[test]
fn invert_runs_before_sepia() {
    let src = px([200, 100, 50, 255]);
    let params = AdjustmentParams::neutral().with_invert(true).with_sepia(100);
    let out = adjust(&src, &params).unwrap();

    let forward: Vec<Box<dyn Stage>> = vec![
        Box::new(InvertStage { enabled: true }),
        Box::new(SepiaStage { percent: 100 }),
    ];
    let reverse: Vec<Box<dyn Stage>> = vec![
        Box::new(SepiaStage { percent: 100 }),
        Box::new(InvertStage { enabled: true }),
    ];
    let pipeline = Pipeline::default();
    assert_eq!(out, pipeline.run_stages(&src, &forward).unwrap().buffer);
    assert_ne!(out, pipeline.run_stages(&src, &reverse).unwrap().buffer);
    assert_eq!(out.pixel(0, 0), [180, 160, 125, 255]);
}

#[test]
fn inverting_white_falls_back_to_source() {
    let src = PixelBuffer::filled(3, 2, [255, 255, 255, 200]).unwrap();
    let out = Pipeline::default()
        .run(&src, &AdjustmentParams::neutral().with_invert(true))
        .unwrap();
    assert!(out.report.fell_back);
    assert_eq!(out.buffer, src);
}
