use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use texdecode_bcn::{tile_rows::decode_surface, BlockFormat, TileGrid, Workers};

/// Fills a surface with a repeating byte pattern; BC7 blocks get their mode byte cycled so every
/// mode is exercised.
fn build_surface(grid: &TileGrid) -> Vec<u8> {
    let mut data: Vec<u8> = (0..grid.source_len()).map(|i| (i % 251) as u8).collect();
    if grid.format == BlockFormat::Bc7 {
        for (i, block) in data.chunks_exact_mut(16).enumerate() {
            block[0] = 1 << (i % 8);
        }
    }
    data
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode Surface");
    let (width, height) = (1024, 1024);

    for format in [BlockFormat::Bc1, BlockFormat::Bc3, BlockFormat::Bc7] {
        let grid = TileGrid::new(format, width, height).unwrap();
        let input = build_surface(&grid);
        let mut output = vec![0u8; grid.decoded_len()];
        group.throughput(Throughput::Bytes(grid.source_len() as u64));

        for threads in [1, 0] {
            let name = match threads {
                1 => "sequential",
                _ => "parallel",
            };
            let id = BenchmarkId::new(name, format!("{format:?}"));
            let workers = Workers::new(threads);
            group.bench_with_input(id, &workers, |b, workers| {
                b.iter(|| decode_surface(black_box(&grid), black_box(&input), &mut output, workers))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
