//! Benchmarks for tab group mounting and navigation.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dagher_dom::{Key, KeyboardEvent};
use dagher_tabs::Page;

/// Generate a page with `groups` tab groups of `tabs` disclosure blocks each.
fn generate_page(groups: usize, tabs: usize) -> String {
    let mut html = String::with_capacity(groups * tabs * 120);
    for g in 0..groups {
        html.push_str(&format!("<dagher-tab-group title=\"Group {g}\">"));
        for t in 0..tabs {
            html.push_str(&format!(
                "<details><summary>Tab {t}</summary><p>Content of tab {t} in group {g}.</p></details>"
            ));
        }
        html.push_str("</dagher-tab-group>");
    }
    html
}

fn bench_mount_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("mount_tabs");

    for tabs in [2, 8, 32, 128] {
        let html = generate_page(1, tabs);
        group.throughput(Throughput::Elements(tabs as u64));
        group.bench_with_input(BenchmarkId::from_parameter(tabs), &html, |b, html| {
            b.iter(|| {
                let mut page = Page::parse(html).unwrap();
                page.mount_all().unwrap();
                page
            });
        });
    }

    group.finish();
}

fn bench_mount_many_groups(c: &mut Criterion) {
    let html = generate_page(50, 4);

    c.bench_function("mount_50_groups", |b| {
        b.iter(|| {
            let mut page = Page::parse(&html).unwrap();
            page.mount_all().unwrap();
            page
        });
    });
}

fn bench_arrow_navigation(c: &mut Criterion) {
    let html = generate_page(1, 16);
    let mut page = Page::parse(&html).unwrap();
    page.mount_all().unwrap();
    let controls = page.groups()[0].controls().to_vec();

    c.bench_function("arrow_right_cycle_16_tabs", |b| {
        b.iter(|| {
            for &control in &controls {
                page.key_down(control, KeyboardEvent::new(Key::ArrowRight))
                    .unwrap();
                page.run_until_idle().unwrap();
            }
        });
    });
}

criterion_group!(
    benches,
    bench_mount_varying_sizes,
    bench_mount_many_groups,
    bench_arrow_navigation
);
criterion_main!(benches);
