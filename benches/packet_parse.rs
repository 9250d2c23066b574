//! Benchmarks for datagram header parsing
//!
//! Parsing runs once per received datagram, so it sits on the hot path of
//! the receive loop:
//! - Header field extraction from raw bytes
//! - Rejection cost for malformed datagrams
//!
//! Platform: Cross-platform (synthetic datagrams, CI-safe)

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use viewfinder::test_utils::datagram;
use viewfinder::wire::Packet;

fn bench_header_parse(c: &mut Criterion) {
    let raw = datagram(42, 3, 1, &vec![0xAB; 2048]);

    let mut group = c.benchmark_group("packet_parse");
    group.throughput(Throughput::Bytes(raw.len() as u64));

    group.bench_function("well_formed", |b| {
        b.iter(|| {
            let packet = Packet::parse(black_box(&raw)).unwrap();
            black_box(packet.header.frame_index)
        })
    });

    group.finish();
}

fn bench_malformed_rejection(c: &mut Criterion) {
    let short = vec![0u8; 11];

    c.bench_function("reject_short_datagram", |b| {
        b.iter(|| {
            let result = Packet::parse(black_box(&short));
            black_box(result.is_err())
        })
    });
}

criterion_group!(benches, bench_header_parse, bench_malformed_rejection);
criterion_main!(benches);
