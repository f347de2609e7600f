// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Vec2};
use swipestack::{Card, CardStack, NoopStackDelegate, PanGesture, StackState};

const DT: f64 = 1.0 / 60.0;

fn loaded_stack(n: usize) -> CardStack<usize> {
    let mut stack = CardStack::new(Rect::new(0.0, 0.0, 320.0, 480.0));
    stack.load_cards((0..n).map(Card::new), false);
    let mut host = NoopStackDelegate;
    while stack.state() != StackState::Idle {
        stack.tick(DT, &mut host);
    }
    stack
}

fn bench_load_in(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_load_in");
    for &n in &[10_usize, 100, 1000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("animated_n{n}"), |b| {
            b.iter_batched(
                || CardStack::new(Rect::new(0.0, 0.0, 320.0, 480.0)),
                |mut stack| {
                    stack.load_cards((0..n).map(Card::new), true);
                    let mut host = NoopStackDelegate;
                    while stack.state() != StackState::Idle {
                        stack.tick(DT, &mut host);
                    }
                    black_box(stack.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_swipe_through(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_swipe_through");
    for &n in &[10_usize, 100] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("fling_all_n{n}"), |b| {
            b.iter_batched(
                || loaded_stack(n),
                |mut stack| {
                    let mut host = NoopStackDelegate;
                    let grip = stack.center();
                    for _ in 0..n {
                        let Some(front) = stack.front() else { break };
                        stack.handle_pan(front, &PanGesture::began(grip), &mut host);
                        stack.handle_pan(
                            front,
                            &PanGesture::ended(grip, Vec2::new(2500.0, 0.0)),
                            &mut host,
                        );
                        for _ in 0..600 {
                            if stack.front() != Some(front) {
                                break;
                            }
                            stack.tick(DT, &mut host);
                        }
                    }
                    black_box(stack.state());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load_in, bench_swipe_through);
criterion_main!(benches);
