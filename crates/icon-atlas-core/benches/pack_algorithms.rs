use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use icon_atlas_core::prelude::*;
use rand::{Rng, SeedableRng};

fn generate_icons(count: usize, min_size: u32, max_size: u32) -> Vec<(String, Size)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    (0..count)
        .map(|i| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            (format!("icon_{}", i), Size::new(w, h))
        })
        .collect()
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_algorithms");

    for count in [100, 500, 2000] {
        let icons = generate_icons(count, 8, 96);
        group.throughput(Throughput::Elements(count as u64));

        for algorithm in [Algorithm::Shelf, Algorithm::Guillotine] {
            let cfg = PackerConfig::builder()
                .with_max_dimensions(1024, 1024)
                .spacing(1)
                .algorithm(algorithm)
                .build();
            group.bench_with_input(
                BenchmarkId::new(algorithm.as_str(), count),
                &icons,
                |b, icons| {
                    b.iter(|| black_box(pack(icons.clone(), &cfg).expect("pack")));
                },
            );
        }
    }
    group.finish();
}

fn bench_rasterize(c: &mut Criterion) {
    let icons = generate_icons(300, 8, 64);
    let cfg = PackerConfig::builder()
        .with_max_dimensions(1024, 1024)
        .trim_to_bounding_box(true)
        .build();
    let images: std::collections::HashMap<String, image::RgbaImage> = icons
        .iter()
        .map(|(k, s)| (k.clone(), image::RgbaImage::new(s.width, s.height)))
        .collect();
    let result = pack(icons, &cfg).expect("pack");
    c.bench_function("build_atlas_pages_300", |b| {
        b.iter(|| black_box(build_atlas_pages(&result, &images, &cfg)))
    });
}

criterion_group!(benches, bench_algorithms, bench_rasterize);
criterion_main!(benches);
