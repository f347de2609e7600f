// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use swipestack::swipestack_dynamics::{
    Animator, Attachment, DynamicItem, Gravity, ItemLookup, ItemState, Snap,
};

struct Items(Vec<ItemState>);

impl ItemLookup<usize> for Items {
    fn item_mut(&mut self, key: &usize) -> Option<&mut ItemState> {
        self.0.get_mut(*key)
    }
}

fn gen_items(n: usize) -> Items {
    Items(
        (0..n)
            .map(|i| ItemState::new(Point::new(i as f64 * 10.0, 0.0), Size::new(300.0, 400.0)))
            .collect(),
    )
}

/// One behavior per item, cycling attachment, snap and fling, with the flung items under one shared gravity.
fn gen_animator(n: usize) -> Animator<usize> {
    let mut animator = Animator::new();
    let mut gravity = Gravity::new(4.0);
    for i in 0..n {
        match i % 3 {
            0 => {
                animator.add_behavior(Attachment::new(
                    i,
                    Vec2::new(40.0, 60.0),
                    Point::new(i as f64 * 10.0 + 80.0, 50.0),
                ));
            }
            1 => {
                animator.add_behavior(Snap::new(i, Point::new(150.0, 200.0)));
            }
            _ => {
                let mut dynamic = DynamicItem::new(i);
                dynamic.add_linear_velocity(Vec2::new(2000.0, -300.0));
                dynamic.add_angular_velocity(1.5);
                animator.add_behavior(dynamic);
                gravity.add_item(i);
            }
        }
    }
    animator.add_behavior(gravity);
    animator
}

fn bench_animator_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("animator_step");
    for &n in &[8_usize, 64, 512] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("frame_n{n}"), |b| {
            b.iter_batched(
                || (gen_animator(n), gen_items(n)),
                |(mut animator, mut items)| {
                    black_box(animator.step(1.0 / 60.0, &mut items));
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("second_n{n}"), |b| {
            b.iter_batched(
                || (gen_animator(n), gen_items(n)),
                |(mut animator, mut items)| {
                    for _ in 0..60 {
                        animator.step(1.0 / 60.0, &mut items);
                    }
                    black_box(items.0.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_animator_step);
criterion_main!(benches);
