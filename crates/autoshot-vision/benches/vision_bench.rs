//! autoshot-vision 성능 벤치마크
//!
//! 실행: cargo bench -p autoshot-vision
//!
//! 벤치마크 대상:
//! - 상단 절반 잘라내기 (crop_top_half)
//! - 평균 해시 지문 (fingerprint)
//! - 잘라내기 → 지문 비교 연속 처리 (compare_images)

use autoshot_vision::processor::crop_top_half;
use autoshot_vision::similarity::{fingerprint, SimilarityDetector};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{DynamicImage, Rgba, RgbaImage};
use std::hint::black_box;

/// 테스트용 패턴 이미지 생성
fn create_test_image(width: u32, height: u32, seed: u8) -> DynamicImage {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let r = (x as u8).wrapping_add(seed).wrapping_mul(17);
        let g = (y as u8).wrapping_add(seed).wrapping_mul(31);
        let b = (x as u8).wrapping_add(y as u8).wrapping_add(seed);
        Rgba([r, g, b, 255])
    });
    DynamicImage::ImageRgba8(img)
}

const RESOLUTIONS: [(u32, u32); 3] = [(800, 600), (1280, 720), (1920, 1080)];

fn bench_crop(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_top_half");

    for (width, height) in RESOLUTIONS {
        group.throughput(Throughput::Elements((width * height) as u64));
        let img = create_test_image(width, height, 42);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &img,
            |b, img| {
                b.iter(|| black_box(crop_top_half(img)));
            },
        );
    }

    group.finish();
}

fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");

    for (width, height) in RESOLUTIONS {
        // 실제 입력은 잘라낸 상단 절반
        let img = crop_top_half(&create_test_image(width, height, 7));
        group.throughput(Throughput::Elements((img.width() * img.height()) as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", img.width(), img.height())),
            &img,
            |b, img| {
                b.iter(|| black_box(fingerprint(img)));
            },
        );
    }

    group.finish();
}

/// 한 주기 분량 (잘라내기 → 지문 2개 → 유사도), 파일 입출력 제외
fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup_cycle");

    let (width, height) = (800, 600);
    let prev = crop_top_half(&create_test_image(width, height, 1));
    let curr = create_test_image(width, height, 2);

    let detector = SimilarityDetector::default();

    group.throughput(Throughput::Elements((width * height) as u64));
    group.bench_function("crop_fingerprint_compare", |b| {
        b.iter(|| {
            let cropped = crop_top_half(&curr);
            black_box(detector.compare_images(&cropped, &prev))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_crop, bench_fingerprint, bench_cycle);
criterion_main!(benches);
