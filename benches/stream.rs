//! Criterion benchmarks for the streaming frame codec.
//!
//! Run with:
//!   cargo bench --bench stream

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lz4stream::{CompressionStream, DecompressionStream, DEFAULT_MAX_CHUNK};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

const PAYLOAD_LEN: usize = 1024 * 1024;

fn random_payload() -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut data = vec![0u8; PAYLOAD_LEN];
    rng.fill_bytes(&mut data);
    data
}

fn compress_all(data: &[u8]) -> Vec<u8> {
    let mut tx = CompressionStream::new(DEFAULT_MAX_CHUNK).unwrap();
    let mut wire = Vec::with_capacity(data.len() + 1024);
    wire.extend_from_slice(tx.feed(&[]).unwrap());
    for chunk in data.chunks(DEFAULT_MAX_CHUNK) {
        wire.extend_from_slice(tx.feed(chunk).unwrap());
    }
    wire.extend_from_slice(tx.finish().unwrap());
    wire
}

fn bench_stream(c: &mut Criterion) {
    let payload = random_payload();
    let wire = compress_all(&payload);

    let mut group = c.benchmark_group("stream");
    group.throughput(Throughput::Bytes(PAYLOAD_LEN as u64));

    group.bench_function("compress_64k_chunks", |b| {
        b.iter(|| compress_all(&payload).len())
    });

    group.bench_function("decompress_4k_chunks", |b| {
        b.iter(|| {
            let mut rx = DecompressionStream::new().unwrap();
            let mut total = 0usize;
            for piece in wire.chunks(4096) {
                total += rx.feed(piece).unwrap().len();
            }
            total
        })
    });

    group.finish();
}

criterion_group!(benches, bench_stream);
criterion_main!(benches);
