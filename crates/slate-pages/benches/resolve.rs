//! Benchmarks for path resolution.

use criterion::{Criterion, criterion_group, criterion_main};
use slate_pages::{Page, PageGraph, RequestContext, resolve};

/// Build a graph with the given depth and breadth.
///
/// Every level gets `breadth` siblings; the bench path follows the
/// `section-0` chain down to `depth`.
fn build_graph(depth: usize, breadth: usize) -> PageGraph {
    let mut graph = PageGraph::new();
    let mut parent = None;

    for level in 0..depth {
        let mut next_parent = None;
        for i in 0..breadth {
            let mut page = Page::new(format!("Level {level} section {i}"))
                .with_slug(format!("section-{i}"))
                .enabled();
            if let Some(parent) = parent {
                page = page.with_parent(parent);
            }
            let id = graph.insert(page).unwrap();
            if i == 0 {
                next_parent = Some(id);
            }
        }
        parent = next_parent;
    }

    graph
}

fn bench_resolve(c: &mut Criterion) {
    let graph = build_graph(6, 20);
    let context = RequestContext::new();
    let hit: Vec<String> = (0..6).map(|_| "section-0".to_owned()).collect();
    let miss = ["section-0", "section-0", "nonexistent"];

    let mut group = c.benchmark_group("resolve");

    group.bench_function("deep_hit", |b| {
        b.iter(|| resolve(&graph, &hit, &context).unwrap())
    });

    group.bench_function("miss", |b| {
        b.iter(|| resolve(&graph, &miss, &context).unwrap_err())
    });

    group.finish();
}

fn bench_homepage(c: &mut Criterion) {
    let mut graph = build_graph(4, 10);
    let home = graph
        .insert(
            Page::new("Home")
                .with_slug("home")
                .enabled()
                .with_host("localhost"),
        )
        .unwrap();
    graph.set_homepage(home, true).unwrap();
    let context = RequestContext::new().with_host("localhost");

    c.bench_function("select_homepage", |b| {
        b.iter(|| resolve::<&str>(&graph, &[], &context).unwrap())
    });
}

criterion_group!(benches, bench_resolve, bench_homepage);
criterion_main!(benches);
