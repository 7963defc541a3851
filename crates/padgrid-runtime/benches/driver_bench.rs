//! Benchmarks for per-event interaction processing.
//!
//! Run with: cargo bench -p padgrid-runtime --bench driver_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use padgrid_core::event::{PointerTracker, TouchEvent};
use padgrid_core::geometry::Viewport;
use padgrid_layout::Layout;
use padgrid_runtime::InteractionDriver;

const VIEWPORT: Viewport = Viewport::new(1920.0, 1080.0, 2.0);

/// A `side`×`side` grid filled with one button per cell.
fn button_grid(side: u16) -> Layout {
    let mut xml = format!(r#"<layout width="{side}" height="{side}">"#);
    for y in 0..side {
        for x in 0..side {
            xml.push_str(&format!(r#"<button x="{x}" y="{y}">{x},{y}</button>"#));
        }
    }
    xml.push_str("</layout>");
    padgrid_format::decode(&xml)
        .expect("bench layout decodes")
        .into_parts()
        .1
}

/// Ten-finger drag across the viewport.
fn drag_script(pointers: u32, steps: u32) -> Vec<TouchEvent> {
    let mut tracker = PointerTracker::new();
    let mut events = Vec::new();
    for id in 0..pointers {
        events.push(tracker.press(id, 10.0 + id as f32 * 150.0, 10.0));
    }
    for step in 0..steps {
        for id in 0..pointers {
            let x = 10.0 + id as f32 * 150.0 + step as f32;
            let y = 10.0 + step as f32 * 8.0;
            if let Some(event) = tracker.moved(id, x, y) {
                events.push(event);
            }
        }
    }
    for id in 0..pointers {
        if let Some(event) = tracker.release(id) {
            events.push(event);
        }
    }
    events
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("driver/process");
    let script = drag_script(10, 100);
    for side in [2u16, 4, 8, 16] {
        group.throughput(Throughput::Elements(script.len() as u64));
        group.bench_with_input(BenchmarkId::new("grid", side), &side, |b, &side| {
            let mut layout = button_grid(side);
            b.iter(|| {
                let mut driver = InteractionDriver::new();
                for event in &script {
                    black_box(driver.process(&mut layout, &VIEWPORT, black_box(event)));
                }
            });
        });
    }
    group.finish();
}

fn bench_pointer_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("driver/pointers");
    for pointers in [1u32, 2, 5, 10] {
        let script = drag_script(pointers, 50);
        group.throughput(Throughput::Elements(script.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("fingers", pointers),
            &script,
            |b, script| {
                let mut layout = button_grid(4);
                b.iter(|| {
                    let mut driver = InteractionDriver::new();
                    for event in script {
                        black_box(driver.process(&mut layout, &VIEWPORT, event));
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_process, bench_pointer_count);
criterion_main!(benches);
