// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for resolution and mutation in `tiered_settings`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use tiered_settings::{
    Category, Declaration, MemoryStore, Property, PropertyRegistry, Settings, Tier, Value,
};

type MemorySettings = Settings<MemoryStore, MemoryStore>;

fn service() -> (MemorySettings, Property<i64>, Property<String>) {
    let mut registry = PropertyRegistry::new();
    let volume = registry
        .register("VOLUME", Category::Settings, 80_i64)
        .unwrap();
    let accent = registry
        .register("ACCENT", Category::Theme, String::from("blue"))
        .unwrap();
    let settings = Settings::initialize(registry, MemoryStore::new(), MemoryStore::new()).unwrap();
    (settings, volume, accent)
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("settings/resolve");

    group.bench_function("global", |b| {
        let (settings, volume, _) = service();
        b.iter(|| black_box(settings.get(volume)));
    });

    group.bench_function("local", |b| {
        let (mut settings, volume, _) = service();
        settings.set(volume, 3, Tier::Local).unwrap();
        b.iter(|| black_box(settings.get(volume)));
    });

    group.bench_function("text_clone", |b| {
        let (mut settings, _, accent) = service();
        settings
            .set(accent, "a fairly long accent color name".to_owned(), Tier::Local)
            .unwrap();
        b.iter(|| black_box(settings.get(accent)));
    });

    group.bench_function("text_ref", |b| {
        let (mut settings, _, accent) = service();
        settings
            .set(accent, "a fairly long accent color name".to_owned(), Tier::Local)
            .unwrap();
        b.iter(|| black_box(settings.value(accent.id())));
    });

    group.finish();
}

fn bench_mutate(c: &mut Criterion) {
    let mut group = c.benchmark_group("settings/mutate");

    for listeners in [0_usize, 1, 8] {
        group.bench_with_input(
            BenchmarkId::new("set_global", listeners),
            &listeners,
            |b, &listeners| {
                let (mut settings, volume, _) = service();
                for _ in 0..listeners {
                    settings.add_listener(|event| {
                        black_box(event.value);
                    });
                }
                let mut next = 0_i64;
                b.iter(|| {
                    next += 1;
                    settings.set(volume, next, Tier::Global).unwrap();
                });
            },
        );
    }

    group.bench_function("override_then_undefine", |b| {
        b.iter_batched(
            service,
            |(mut settings, volume, _)| {
                settings.set(volume, 1, Tier::Local).unwrap();
                black_box(settings.undefine(volume));
                settings
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_initialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("settings/initialize");

    for count in [16_usize, 256] {
        let names: Vec<&'static str> = (0..count)
            .map(|i| &*Box::leak(format!("PROPERTY_{i}").into_boxed_str()))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &names, |b, names| {
            b.iter_batched(
                || {
                    let mut registry = PropertyRegistry::new();
                    for (i, name) in names.iter().enumerate() {
                        let category = if i % 2 == 0 {
                            Category::Settings
                        } else {
                            Category::Theme
                        };
                        registry
                            .declare(Declaration::new(*name, category, Value::Integer(0)))
                            .unwrap();
                    }
                    registry
                },
                |registry| {
                    Settings::initialize(registry, MemoryStore::new(), MemoryStore::new()).unwrap()
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_mutate, bench_initialize);
criterion_main!(benches);
