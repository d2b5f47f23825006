// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for CHORDKEYS
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Fingerprinting of held keys
//! - Dictionary construction and lookup
//! - Reconciliation passes with many listeners

use chordkeys::midi::MidiContext;
use chordkeys::music::{fingerprint, ChordDictionary, ChordKind};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Benchmark fingerprinting (runs on every key change)
fn bench_fingerprint(c: &mut Criterion) {
    let chord = [48u8, 55, 64, 70, 74];

    c.bench_function("fingerprint_5_notes", |b| {
        b.iter(|| fingerprint(black_box(chord)))
    });
}

/// Benchmark dictionary construction and lookups
fn bench_dictionary(c: &mut Criterion) {
    c.bench_function("dictionary_build", |b| b.iter(ChordDictionary::new));

    let dict = ChordDictionary::new();
    let fp = fingerprint([60, 64, 67, 69]);
    c.bench_function("lookup_by_fingerprint", |b| {
        b.iter(|| black_box(dict.lookup_by_fingerprint(black_box(&fp))).len())
    });

    c.bench_function("lookup_by_kinds", |b| {
        b.iter(|| black_box(dict.lookup_by_kinds(black_box(&ChordKind::TRIADS))).len())
    });
}

/// Benchmark press/release passes against growing listener counts
fn bench_reconcile(c: &mut Criterion) {
    let dict = ChordDictionary::new();
    let mut group = c.benchmark_group("reconcile");

    for listeners in [1usize, 32, 132].iter() {
        group.bench_with_input(
            BenchmarkId::new("chord_gesture", listeners),
            listeners,
            |b, &listeners| {
                let mut ctx = MidiContext::new(&dict);
                for chord in dict.iter().take(listeners) {
                    let _ = ctx.subscribe_chord(chord, None, || {});
                }
                ctx.subscribe_shortcut(|_| {});

                b.iter(|| {
                    for note in [60, 64, 67, 72] {
                        ctx.press(black_box(note));
                    }
                    for note in [72, 67, 64, 60] {
                        ctx.release(black_box(note));
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_fingerprint, bench_dictionary, bench_reconcile);
criterion_main!(benches);
