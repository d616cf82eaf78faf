use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;
use t2c::{compress_to_vec, decompress, decompress_to_vec};

fn generate_compressed_data(size: usize, pattern: &str) -> Vec<u8> {
    let original = match pattern {
        "text" => {
            let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(base);
            }
            data.truncate(size);
            data
        }
        "binary" => (0..size).map(|i| ((i * 17 + 11) % 256) as u8).collect(),
        "repetitive" => vec![b'X'; size],
        "random" => {
            let mut state = 0x2545_F491u32;
            (0..size)
                .map(|_| {
                    state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                    (state >> 24) as u8
                })
                .collect()
        }
        _ => panic!("Unknown pattern: {}", pattern),
    };

    compress_to_vec(&original).expect("Compression failed")
}

fn decompression_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_throughput");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(100);

    // Test different original file sizes
    for size in [1024, 10240, 102400, 1048576].iter() {
        let size_label = match *size {
            1024 => "1KB",
            10240 => "10KB",
            102400 => "100KB",
            1048576 => "1MB",
            _ => "unknown",
        };

        for pattern in ["text", "binary", "repetitive", "random"].iter() {
            let compressed = generate_compressed_data(*size, pattern);
            let benchmark_id = BenchmarkId::from_parameter(format!("{}/{}", size_label, pattern));

            group.throughput(Throughput::Bytes(*size as u64));
            group.bench_with_input(benchmark_id, &compressed, |b, data| {
                b.iter(|| decompress_to_vec(black_box(data)).expect("Decompression failed"));
            });
        }
    }

    group.finish();
}

fn decompression_into_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_into_buffer");
    group.measurement_time(Duration::from_secs(5));

    let size = 102400;
    let compressed = generate_compressed_data(size, "text");
    let mut output = vec![0u8; size];

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("size_query", |b| {
        b.iter(|| decompress(black_box(&compressed), None).expect("Decompression failed"))
    });
    group.bench_function("fill", |b| {
        b.iter(|| {
            decompress(black_box(&compressed), Some(&mut output[..])).expect("Decompression failed")
        })
    });

    group.finish();
}

fn decompression_edge_cases(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_edge_cases");
    group.measurement_time(Duration::from_secs(3));

    let test_cases = vec![
        ("empty", vec![]),
        ("single_byte", vec![b'A']),
        ("min_match", b"ABCABC".to_vec()),
        ("max_match_run", vec![b'X'; 67]),
    ];

    for (name, data) in test_cases {
        let compressed = compress_to_vec(&data).expect("Compression failed");
        let benchmark_id = BenchmarkId::from_parameter(name);

        group.bench_with_input(benchmark_id, &compressed, |b, data| {
            b.iter(|| decompress_to_vec(black_box(data)).expect("Decompression failed"));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    decompression_throughput,
    decompression_into_buffer,
    decompression_edge_cases
);
criterion_main!(benches);
