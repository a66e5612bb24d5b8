//! Path and value handling benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use firebase_store::storage::storage_api::utils;
use serde_json::json;
use std::hint::black_box;

fn benchmark_paths(c: &mut Criterion) {
    c.bench_function("sanitize_namespace", |b| {
        b.iter(|| utils::sanitize_namespace(black_box(Some("user.1#a [shard 3]/eu-west"))))
    });

    c.bench_function("resource_url", |b| {
        b.iter(|| {
            let path = utils::namespaced_path(black_box("user_1_a"), black_box("players.123.queue"));
            path.map(|p| utils::resource_url(black_box("https://my-app.firebaseio.com"), &p))
        })
    });
}

fn benchmark_values(c: &mut Criterion) {
    let text = json!("a stored string value");
    let object = json!({"volume": 80, "queue": ["a", "b", "c"], "loop": "track"});

    c.bench_function("wrap_unwrap_string", |b| {
        b.iter(|| utils::unwrap_value(utils::wrap_value(black_box(&text))))
    });

    c.bench_function("wrap_unwrap_object", |b| {
        b.iter(|| utils::unwrap_value(utils::wrap_value(black_box(&object))))
    });
}

criterion_group!(benches, benchmark_paths, benchmark_values);
criterion_main!(benches);
