//! Benchmarks for per-message extraction and cache operations.
//!
//! Extraction runs on every turn before any network call, so it should stay
//! well under a millisecond for typical messages.

use brick::cache::TtlCache;
use brick::menu::{MenuCatalog, MenuCategory, MenuItem, SpiceLevel};
use brick::nlp::Extractor;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

const MESSAGES: &[(&str, &str)] = &[
    ("greeting", "hello there!"),
    ("order", "Can I get 2 masala dosas and a mango lassi, extra spicy?"),
    (
        "dietary",
        "I'm vegan and gluten-free, anything kosher or halal on the menu?",
    ),
    (
        "evaluation",
        "We are evaluating assistants for our restaurant, how does your upselling compare?",
    ),
    (
        "long",
        "honestly I'm a bit frustrated, the last order was wrong and I still want something \
         spicy with chicken, maybe tacos or a curry, and a wine pairing if you have one",
    ),
];

fn synthetic_catalog(size: usize) -> MenuCatalog {
    let mut items = MenuCatalog::builtin().items().to_vec();
    for i in 0..size {
        items.push(MenuItem {
            id: format!("synthetic-{}", i),
            name: format!("House Special {}", i),
            description: "Chef's rotating dish".to_string(),
            price: 10.0 + i as f64,
            category: MenuCategory::Curries,
            cuisine: "fusion".to_string(),
            spice_level: SpiceLevel::default(),
            dietary_info: Vec::new(),
            allergens: Vec::new(),
            aliases: vec![format!("special{}", i)],
            wine_pairings: Vec::new(),
            popular: false,
        });
    }
    MenuCatalog::new(items)
}

fn bench_extract_messages(c: &mut Criterion) {
    let extractor = Extractor::default();
    let mut group = c.benchmark_group("extract");

    for (name, message) in MESSAGES {
        group.bench_with_input(BenchmarkId::from_parameter(name), message, |b, message| {
            b.iter(|| extractor.extract(black_box(message)))
        });
    }

    group.finish();
}

fn bench_extract_menu_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_menu_size");
    let message = "Can I get 2 masala dosas and a mango lassi, extra spicy?";

    for size in [0, 50, 200] {
        let extractor = Extractor::new(&synthetic_catalog(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| extractor.extract(black_box(message)))
        });
    }

    group.finish();
}

fn bench_cache_set_at_capacity(c: &mut Criterion) {
    c.bench_function("cache_set_at_capacity_1000", |b| {
        let mut cache = TtlCache::new(Duration::from_secs(60), 1000);
        for i in 0..1000 {
            cache.set(format!("warm-{}", i), i, None);
        }
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            cache.set(format!("key-{}", n), n as i32, None);
        })
    });
}

criterion_group!(
    benches,
    bench_extract_messages,
    bench_extract_menu_size,
    bench_cache_set_at_capacity
);
criterion_main!(benches);
