//! Benchmarks for retouch operations.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use retouch_core::PixelBuffer;
use retouch_ops::blur::{blur_radius, box_blur_rgb, gaussian_blur_rgb, gaussian_kernel_size, gaussian_sigma};
use retouch_ops::color::{hsl_to_rgb, rgb_to_hsl};
use retouch_ops::config::BlurKernel;
use retouch_ops::{AdjustmentParams, Pipeline, PipelineConfig};

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[
                (x * 255 / width) as u8,
                (y * 255 / height) as u8,
                ((x + y) % 256) as u8,
                255,
            ]);
        }
    }
    PixelBuffer::from_raw(width, height, data).unwrap()
}

/// Benchmark HSL round trips.
fn bench_hsl(c: &mut Criterion) {
    let mut group = c.benchmark_group("hsl");
    let colors: Vec<[f32; 3]> = (0..10000)
        .map(|i| [(i % 256) as f32, ((i * 7) % 256) as f32, ((i * 13) % 256) as f32])
        .collect();
    group.throughput(Throughput::Elements(colors.len() as u64));

    group.bench_function("roundtrip_rotate", |b| {
        b.iter(|| {
            colors
                .iter()
                .map(|&rgb| hsl_to_rgb(rgb_to_hsl(black_box(rgb)).rotate(90.0)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

/// Benchmark the two blur kernels at increasing intensity.
fn bench_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("blur");
    let (w, h) = (512usize, 512usize);
    let src: Vec<f32> = (0..w * h * 3).map(|i| (i % 256) as f32).collect();
    group.throughput(Throughput::Elements((w * h) as u64));

    for amount in [20, 60, 100] {
        group.bench_with_input(BenchmarkId::new("box", amount), &amount, |b, &amount| {
            b.iter(|| box_blur_rgb(black_box(&src), w, h, blur_radius(amount)).unwrap())
        });

        let size = gaussian_kernel_size(amount);
        group.bench_with_input(BenchmarkId::new("gaussian", amount), &amount, |b, _| {
            b.iter(|| gaussian_blur_rgb(black_box(&src), w, h, size / 2, gaussian_sigma(size)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark full pipeline runs at preview and full size.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let params = AdjustmentParams::neutral()
        .with_brightness(10)
        .with_contrast(20)
        .with_saturation(30)
        .with_blur(40)
        .with_grayscale(10)
        .with_sepia(20)
        .with_hue_rotate(45);

    for (w, h) in [(320u32, 200u32), (1200, 800)] {
        let src = gradient(w, h);
        group.throughput(Throughput::Elements((w * h) as u64));

        let label = format!("{}x{}", w, h);
        group.bench_with_input(BenchmarkId::new("all_stages_box", &label), &src, |b, src| {
            let pipeline = Pipeline::default();
            b.iter(|| pipeline.run(black_box(src), &params).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("all_stages_gaussian", &label), &src, |b, src| {
            let pipeline = Pipeline::new(PipelineConfig::default().with_blur(BlurKernel::Gaussian));
            b.iter(|| pipeline.run(black_box(src), &params).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("neutral", &label), &src, |b, src| {
            let pipeline = Pipeline::default();
            b.iter(|| pipeline.run(black_box(src), &AdjustmentParams::neutral()).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hsl, bench_blur, bench_pipeline);
criterion_main!(benches);
