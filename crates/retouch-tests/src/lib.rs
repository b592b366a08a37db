//! Integration tests for the retouch crates.
//!
//! Properties that must hold for any parameter set, plus fixed pixel
//! scenarios with known answers. Everything goes through the public
//! `retouch_ops` entry points.

#[cfg(test)]
mod scenarios;

/// Deterministic test images.
#[cfg(test)]
pub(crate) mod fixtures {
    use retouch_core::PixelBuffer;
    use retouch_ops::AdjustmentParams;

    /// Busy RGBA image with varied alpha; neither all black nor all white.
    pub fn pattern(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(((x * 37 + y * 11 + (x * y) % 17) % 256) as u8);
                data.push(((x * 7 + y * 91 + 40) % 256) as u8);
                data.push(((x * 53 + y * 29 + 200) % 256) as u8);
                data.push(((x * 13 + y * 29) % 256) as u8);
            }
        }
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    /// A spread of parameter sets, including range extremes.
    pub fn param_sets() -> Vec<AdjustmentParams> {
        let n = AdjustmentParams::neutral;
        vec![
            n(),
            n().with_brightness(100),
            n().with_brightness(-100),
            n().with_contrast(100),
            n().with_contrast(-100),
            n().with_saturation(100),
            n().with_saturation(-100),
            n().with_blur(100),
            n().with_grayscale(100),
            n().with_sepia(100),
            n().with_hue_rotate(-180),
            n().with_invert(true),
            n()
                .with_brightness(30)
                .with_contrast(-40)
                .with_saturation(60)
                .with_blur(15)
                .with_grayscale(25)
                .with_sepia(45)
                .with_hue_rotate(90)
                .with_invert(true),
            // Out of range on purpose
            n().with_brightness(9999).with_hue_rotate(-720).with_blur(-3),
        ]
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{param_sets, pattern};
    use retouch_core::PixelBuffer;
    use retouch_ops::config::{BlackGuard, BlurKernel, ContrastModel, HueShift, LumaWeights, SaturationModel};
    use retouch_ops::{adjust, AdjustmentParams, Pipeline, PipelineConfig, StageKind};
    use tempfile::tempdir;

    fn configs() -> Vec<PipelineConfig> {
        vec![
            PipelineConfig::default(),
            PipelineConfig::default()
                .with_luma(LumaWeights::Bt601)
                .with_contrast(ContrastModel::LinearGain)
                .with_blur(BlurKernel::Gaussian)
                .with_saturation(SaturationModel::Luma)
                .with_hue(HueShift::Quantized),
        ]
    }

    #[test]
    fn test_neutral_is_identity() {
        let src = pattern(13, 7);
        for cfg in configs() {
            let out = Pipeline::new(cfg)
                .run(&src, &AdjustmentParams::neutral())
                .unwrap();
            assert_eq!(out.buffer, src);
        }
    }

    #[test]
    fn test_alpha_is_never_modified() {
        let src = pattern(11, 9);
        for cfg in configs() {
            let pipeline = Pipeline::new(cfg);
            for params in param_sets() {
                let out = pipeline.run(&src, &params).unwrap().buffer;
                assert!(out.alpha().eq(src.alpha()), "alpha changed for {}", params);
            }
        }
    }

    #[test]
    fn test_output_matches_source_size() {
        let src = pattern(6, 3);
        for params in param_sets() {
            let out = adjust(&src, &params).unwrap();
            assert_eq!(out.dimensions(), src.dimensions());
            assert_eq!(out.as_bytes().len(), src.as_bytes().len());
        }
    }

    #[test]
    fn test_invert_is_an_involution() {
        let src = pattern(16, 16);
        let params = AdjustmentParams::neutral().with_invert(true);
        let once = adjust(&src, &params).unwrap();
        assert_ne!(once, src);
        assert_eq!(adjust(&once, &params).unwrap(), src);
    }

    #[test]
    fn test_brightness_is_monotonic() {
        let src = pattern(10, 10);
        let pipeline = Pipeline::new(PipelineConfig::default().with_black_guard(BlackGuard::disabled()));

        let mut prev: Option<PixelBuffer> = None;
        for b in (-100..=100).step_by(10) {
            let out = pipeline
                .run(&src, &AdjustmentParams::neutral().with_brightness(b))
                .unwrap()
                .buffer;
            if let Some(prev) = &prev {
                for (lo, hi) in prev.as_bytes().iter().zip(out.as_bytes()) {
                    assert!(hi >= lo, "brightness {} lowered a channel", b);
                }
            }
            prev = Some(out);
        }
    }

    #[test]
    fn test_full_grayscale_is_neutral_gray() {
        let src = pattern(12, 12);
        for cfg in configs() {
            let out = Pipeline::new(cfg)
                .run(&src, &AdjustmentParams::neutral().with_grayscale(100))
                .unwrap()
                .buffer;
            for [r, g, b, _] in out.pixels() {
                assert!(r.abs_diff(g) <= 1 && g.abs_diff(b) <= 1, "({}, {}, {})", r, g, b);
            }
        }
    }

    #[test]
    fn test_blur_spreads_edge_line_without_wraparound() {
        // One white column at the left border of a black image
        let (w, h) = (12u32, 6u32);
        let mut src = PixelBuffer::filled(w, h, [0, 0, 0, 255]).unwrap();
        for y in 0..h {
            src.set_pixel(0, y, [255, 255, 255, 255]);
        }

        for cfg in configs() {
            let out = Pipeline::new(cfg)
                .run(&src, &AdjustmentParams::neutral().with_blur(100))
                .unwrap();
            assert!(out.report.is_clean());
            let out = out.buffer;
            for y in 0..h {
                let row: Vec<u8> = (0..w).map(|x| out.pixel(x, y)[0]).collect();
                assert!(row[1] > 0, "neighbor stayed black: {:?}", row);
                let brightest = row.iter().copied().max().unwrap();
                assert_eq!(row[0], brightest, "peak moved: {:?}", row);
                assert_eq!(row[w as usize - 1], 0, "wrapped around: {:?}", row);
            }
        }
    }

    #[test]
    fn test_source_is_not_mutated() {
        let src = pattern(8, 5);
        let before = src.clone();
        for params in param_sets() {
            let _ = adjust(&src, &params).unwrap();
        }
        assert_eq!(src, before);
    }

    #[test]
    fn test_repeated_runs_are_deterministic() {
        let src = pattern(9, 9);
        let params = param_sets()[12];
        assert_eq!(adjust(&src, &params).unwrap(), adjust(&src, &params).unwrap());
    }

    #[test]
    fn test_report_follows_stage_order() {
        let src = pattern(4, 4);
        let params = param_sets()[12];
        let out = Pipeline::default().run(&src, &params).unwrap();
        assert_eq!(out.report.applied, StageKind::ORDER.to_vec());
        assert!(out.report.skipped.is_empty());
    }

    #[test]
    fn test_raw_file_roundtrip_then_adjust() {
        use retouch_core::raw::{read_raw, write_raw};
        use retouch_core::RawLayout;

        let dir = tempdir().unwrap();
        let path = dir.path().join("pattern.rgba");
        let src = pattern(20, 10);
        write_raw(&path, &src, RawLayout::Rgba).unwrap();

        let loaded = read_raw(&path, 20, 10, RawLayout::Rgba).unwrap();
        assert_eq!(loaded, src);

        let out_path = dir.path().join("out.rgb");
        let out = adjust(&loaded, &AdjustmentParams::neutral().with_sepia(50)).unwrap();
        write_raw(&out_path, &out, RawLayout::Rgb).unwrap();
        let back = read_raw(&out_path, 20, 10, RawLayout::Rgb).unwrap();
        for (a, b) in out.pixels().zip(back.pixels()) {
            assert_eq!(a[..3], b[..3]);
            assert_eq!(b[3], 255);
        }
    }

    #[test]
    fn test_preset_file_drives_pipeline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("look.yaml");
        std::fs::write(&path, "brightness: 50\n").unwrap();

        let params = AdjustmentParams::from_file(&path).unwrap();
        let src = PixelBuffer::filled(2, 2, [128, 128, 128, 255]).unwrap();
        assert_eq!(adjust(&src, &params).unwrap().pixel(1, 1), [178, 178, 178, 255]);
    }

    #[test]
    fn test_preview_then_adjust() {
        use retouch_ops::{downscale_to_fit, PreviewLimits};

        let src = pattern(300, 150);
        let small = downscale_to_fit(&src, PreviewLimits::new(120, 80).unwrap()).unwrap();
        assert_eq!(small.dimensions(), (120, 60));
        let out = adjust(&small, &AdjustmentParams::neutral().with_contrast(20)).unwrap();
        assert_eq!(out.dimensions(), (120, 60));
    }
}
