use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use selkie::{Anchor, AnchorWord, CategoryMode, ChartConfig, HeuristicMetrics, Item, Reading};
use std::hint::black_box;
use std::time::Duration;

const CATEGORIES: [&str; 4] = ["nouns", "verbs", "adjectives", "particles"];

/// Deterministic item grid: frequencies decay geometrically, scores sweep the
/// signed range, categories cycle.
fn build_radial_items(count: usize, categorized: bool) -> Vec<Item> {
    (0..count)
        .map(|i| {
            let freq = 500.0 * 0.97f64.powi(i as i32) + 5.0;
            let score = -4.0 + 8.0 * (i as f64 / count.max(1) as f64);
            let item = Item::new(format!("w{i}"), format!("word{i}"), freq, score);
            if categorized {
                item.with_category(CATEGORIES[i % CATEGORIES.len()])
            } else {
                item
            }
        })
        .collect()
}

fn build_opposed_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            let score = -4.0 + 8.0 * (i as f64 / count.max(1) as f64);
            let a = 300.0 * 0.95f64.powi(i as i32) + 10.0;
            let b = 200.0 * 0.93f64.powi(i as i32) + 10.0;
            Item::new(format!("w{i}"), format!("word{i}"), 0.0, score).with_readings(
                Reading::new(format!("w{i}a"), a, score - 1.0),
                Reading::new(format!("w{i}b"), b, score + 1.0),
            )
        })
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.measurement_time(Duration::from_secs(10));
    let metrics = HeuristicMetrics::default();

    for count in [10usize, 50, 150] {
        let items = build_radial_items(count, false);
        let anchor = Anchor::Center(AnchorWord::new("root", 600.0));
        let cfg = ChartConfig::radial();
        group.bench_with_input(BenchmarkId::new("radial", count), &items, |b, items| {
            b.iter(|| {
                black_box(selkie::layout_chart(
                    black_box(items),
                    &anchor,
                    &cfg,
                    &metrics,
                    42,
                ))
            })
        });
    }

    for count in [10usize, 50, 150] {
        let items = build_radial_items(count, true);
        let anchor = Anchor::Center(AnchorWord::new("root", 600.0));
        let mut cfg = ChartConfig::radial();
        cfg.category.mode = CategoryMode::Weighted;
        group.bench_with_input(
            BenchmarkId::new("radial_categorized", count),
            &items,
            |b, items| {
                b.iter(|| {
                    black_box(selkie::layout_chart(
                        black_box(items),
                        &anchor,
                        &cfg,
                        &metrics,
                        42,
                    ))
                })
            },
        );
    }

    for count in [10usize, 40] {
        let items = build_opposed_items(count);
        let anchor = Anchor::Edges(AnchorWord::new("hot", 200.0), AnchorWord::new("cold", 200.0));
        let cfg = ChartConfig::opposed();
        group.bench_with_input(BenchmarkId::new("opposed", count), &items, |b, items| {
            b.iter(|| {
                black_box(selkie::layout_chart(
                    black_box(items),
                    &anchor,
                    &cfg,
                    &metrics,
                    42,
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
