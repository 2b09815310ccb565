// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the directory-backed store.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use tiered_settings::{BackingStore, Category, Declaration, PropertyRegistry, Value};
use tiered_settings_fs::SplitStore;

const NAMES: [&str; 8] = [
    "VOLUME", "SCALE", "ACCENT", "LOCALE", "SHOW_TIMER", "FONT", "LAYOUT", "DELAY",
];

fn declarations() -> impl Iterator<Item = Declaration> {
    NAMES.into_iter().enumerate().map(|(i, name)| {
        let category = if i % 2 == 0 {
            Category::Settings
        } else {
            Category::Theme
        };
        Declaration::new(name, category, Value::Integer(i as i64))
    })
}

fn populated(dir: &std::path::Path) -> SplitStore {
    let mut store = SplitStore::new(dir);
    for declaration in declarations() {
        store.define(&declaration).unwrap();
    }
    store
}

fn bench_split_store(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let mut group = c.benchmark_group("split_store");

    group.bench_function("save", |b| {
        let mut store = populated(dir.path());
        let mut next = 0_i64;
        b.iter(|| {
            next += 1;
            store.set("VOLUME", Value::Integer(next)).unwrap();
            store.save().unwrap();
        });
    });

    populated(dir.path()).save().unwrap();
    let mut registry = PropertyRegistry::new();
    for declaration in declarations() {
        registry.declare(declaration).unwrap();
    }
    group.bench_function("load", |b| {
        b.iter_batched(
            || populated(dir.path()),
            |mut store| {
                store.load(&registry).unwrap();
                black_box(store)
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_split_store);
criterion_main!(benches);
