//! Benchmark for the measure/arrange layout passes.
//!
//! Run with: cargo bench --package helio_ui --bench layout_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use helio_core::math::PxSize2D;
use helio_ui::controls::BackgroundWindow;
use helio_ui::{StackLayout, UIRenderColor, WindowManager, WindowProperties};

fn build_tree(rows: usize, columns: usize) -> WindowManager {
    let mut manager = WindowManager::new();
    let root_stack = manager
        .add(Box::new(StackLayout::vertical().with_spacing(2)), WindowProperties::stretch())
        .unwrap();
    for _ in 0..rows {
        let row = manager
            .add_child(
                root_stack,
                Box::new(StackLayout::horizontal().with_spacing(2)),
                WindowProperties::stretch(),
            )
            .unwrap();
        for _ in 0..columns {
            manager
                .add_child(
                    row,
                    Box::new(BackgroundWindow::new(UIRenderColor::WHITE)),
                    WindowProperties {
                        width: Some(24),
                        height: Some(24),
                        ..WindowProperties::default()
                    },
                )
                .unwrap();
        }
    }
    manager
}

fn benchmark_full_layout(c: &mut Criterion) {
    let mut manager = build_tree(32, 32);

    let mut toggle = false;
    c.bench_function("layout_32x32_invalidate", |b| {
        b.iter(|| {
            // Alternate the window size so every pass recomputes.
            toggle = !toggle;
            let size = if toggle {
                PxSize2D::new(1280, 720)
            } else {
                PxSize2D::new(1920, 1080)
            };
            manager.perform_layout(black_box(size));
        });
    });
}

fn benchmark_cached_layout(c: &mut Criterion) {
    let mut manager = build_tree(32, 32);
    manager.perform_layout(PxSize2D::new(1280, 720));

    c.bench_function("layout_32x32_cached", |b| {
        b.iter(|| {
            // Unchanged input: the cache short-circuits both passes.
            manager.perform_layout(black_box(PxSize2D::new(1280, 720)));
        });
    });
}

criterion_group!(benches, benchmark_full_layout, benchmark_cached_layout);
criterion_main!(benches);
