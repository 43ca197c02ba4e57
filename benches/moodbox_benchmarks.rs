//! # Moodbox Performance Benchmarks
//!
//! Filter, sample and load over synthetic catalogs.
//!
//! ```bash
//! cargo bench
//! cargo bench filter
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use moodbox::catalog::Catalog;
use moodbox::engine;
use moodbox::loader::{parse_catalog, LoaderConfig};
use moodbox::mood::MoodKey;
use moodbox::song::{Field, Song};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Write;
use std::hint::black_box;

/// Helper function to create a catalog with spread-out feature values
fn create_test_catalog(count: usize) -> Catalog {
    let songs = (1..=count)
        .map(|i| {
            let title = if i % 10 == 0 {
                format!("Love Song {i:05}")
            } else {
                format!("Song {i:05}")
            };
            Song::new(title, format!("Artist {}", (i - 1) / 20 + 1))
                .with(Field::Popularity, (i % 101) as f64)
                .with(Field::DurationMin, 1.5 + (i % 40) as f64 / 10.0)
                .with(Field::Valence, (i % 97) as f64 / 97.0)
                .with(Field::Energy, (i % 89) as f64 / 89.0)
        })
        .collect();
    Catalog::new(songs, Field::ALL)
}

fn create_test_csv(count: usize) -> String {
    let mut csv = String::from("track_name,artist,popularity,duration_min,valence,energy\n");
    for song in create_test_catalog(count).songs() {
        let _ = writeln!(
            csv,
            "\"{}\",{},{},{},{},{}",
            song.track_name,
            song.artist,
            song.popularity.unwrap_or_default(),
            song.duration_min.unwrap_or_default(),
            song.valence.unwrap_or_default(),
            song.energy.unwrap_or_default()
        );
    }
    csv
}

fn benchmark_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [100, 1_000, 10_000] {
        let catalog = create_test_catalog(size);
        for key in [MoodKey::Popular, MoodKey::Chill, MoodKey::Romantic] {
            group.bench_with_input(BenchmarkId::new(key.as_str(), size), &catalog, |b, catalog| {
                b.iter(|| engine::filter(black_box(catalog), black_box(key.mood())))
            });
        }
    }

    group.finish();
}

fn benchmark_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");
    let catalog = create_test_catalog(10_000);
    let everything: Vec<&Song> = catalog.songs().iter().collect();
    let mut rng = StdRng::seed_from_u64(0);

    for k in [1, 5, 50] {
        group.bench_with_input(BenchmarkId::new("from_10000", k), &k, |b, &k| {
            b.iter(|| engine::sample(black_box(&everything), k, &mut rng))
        });
    }

    group.bench_function("pick_one_10000", |b| {
        b.iter(|| engine::pick_one(black_box(&catalog), &mut rng))
    });

    group.finish();
}

fn benchmark_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("loading");
    let config = LoaderConfig::default();

    for size in [1_000, 10_000] {
        let csv = create_test_csv(size);
        group.bench_with_input(BenchmarkId::new("parse_catalog", size), &csv, |b, csv| {
            b.iter(|| parse_catalog(black_box(csv), &config))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_filter, benchmark_sample, benchmark_loading);

criterion_main!(benches);
