//! # Interaction Benchmark
//!
//! Hot paths run on every input event or frame:
//! - Gate trigger (debounce reschedule, throttle window check)
//! - Toggle flip + transition value read
//! - Healthy boundary render
//!
//! Run with: `cargo bench --package tactile_ui`

// Benchmarks don't need strict docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::rc::Rc;
use std::time::Duration;

use tactile_core::{ManualClock, TimerQueue};
use tactile_ui::{
    BoundaryConfig, Fault, Gate, GateConfig, GateMode, RecoveryBoundary, Toggle, ToggleConfig,
};

fn harness() -> (Rc<ManualClock>, TimerQueue) {
    let clock = Rc::new(ManualClock::new());
    let timers = TimerQueue::new(clock.clone());
    (clock, timers)
}

/// Benchmark: debounce trigger (cancel + reschedule).
fn bench_debounce_trigger(c: &mut Criterion) {
    let (clock, timers) = harness();
    let mut gate = Gate::from_config(
        |n: u64| {
            black_box(n);
        },
        &GateConfig::default(),
        GateMode::Debounce,
        &timers,
    );

    c.bench_function("debounce_trigger", |b| {
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            clock.advance(Duration::from_micros(10));
            black_box(gate.trigger(n))
        });
    });
}

/// Benchmark: throttle trigger, mostly dropped.
fn bench_throttle_trigger(c: &mut Criterion) {
    let (clock, timers) = harness();
    let mut gate = Gate::from_config(
        |n: u64| {
            black_box(n);
        },
        &GateConfig::default(),
        GateMode::Throttle,
        &timers,
    );

    c.bench_function("throttle_trigger", |b| {
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            clock.advance(Duration::from_micros(100));
            black_box(gate.trigger(n))
        });
    });
}

/// Benchmark: timer queue drain with many live gates.
fn bench_run_due(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_due");

    for gates in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(gates), &gates, |b, &gates| {
            let (clock, timers) = harness();
            let mut pool: Vec<_> = (0..gates)
                .map(|_| Gate::debounce(|(): ()| {}, Duration::from_millis(16), &timers))
                .collect();

            b.iter(|| {
                for gate in &mut pool {
                    gate.trigger(());
                }
                clock.advance(Duration::from_millis(16));
                black_box(timers.run_due())
            });
        });
    }

    group.finish();
}

/// Benchmark: flip + frame tick + value read.
fn bench_toggle_frame(c: &mut Criterion) {
    let (clock, timers) = harness();
    let toggle = Toggle::new(false, &ToggleConfig::default(), &timers);

    c.bench_function("toggle_flip_and_tick", |b| {
        b.iter(|| {
            toggle.toggle();
            clock.advance(Duration::from_millis(16));
            timers.run_due();
            black_box(toggle.transition_value())
        });
    });
}

/// Benchmark: healthy boundary render overhead.
fn bench_boundary_render(c: &mut Criterion) {
    let mut boundary = RecoveryBoundary::new(
        "bench",
        || Ok::<_, Fault>(black_box(42u32)),
        |_: &tactile_ui::FallbackContext<'_>| 0,
        BoundaryConfig::default(),
    );

    c.bench_function("boundary_render_healthy", |b| {
        b.iter(|| black_box(boundary.render()));
    });
}

criterion_group!(
    benches,
    bench_debounce_trigger,
    bench_throttle_trigger,
    bench_run_due,
    bench_toggle_frame,
    bench_boundary_render,
);
criterion_main!(benches);
