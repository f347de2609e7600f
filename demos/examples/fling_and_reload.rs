// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fling and reload.
//!
//! Drags every card off the stack with a fast release, then follows the
//! automatic reload: displaced cards snap home before the deck animates in again.
//! One slow drag in between shows the snap-back path.
//!
//! Run:
//! - `cargo run -p swipestack_demos --example fling_and_reload`

use kurbo::Vec2;
use swipestack::{Card, CardStack, PanGesture, StackDelegate, StackState};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const DT: f64 = 1.0 / 60.0;

type Stack = CardStack<u32>;

struct Narrator;

impl StackDelegate<u32> for Narrator {
    fn card_was_swiped(&mut self, card: &Card<u32>, stack: &Stack) {
        println!(
            "  swiped #{} at t={:.2}s, {} left",
            card.content(),
            stack.now(),
            stack.current_order().len()
        );
    }

    fn card_did_show(&mut self, card: &Card<u32>, _stack: &Stack) {
        println!("  now showing #{}", card.content());
    }

    fn drag_ended_on_card(&mut self, card: &Card<u32>, stack: &Stack) {
        println!("  #{} back in place at t={:.2}s", card.content(), stack.now());
    }
}

fn drag(stack: &mut Stack, host: &mut Narrator, velocity: Vec2) {
    let Some(front) = stack.front() else { return };
    let grip = stack.center() + Vec2::new(40.0, 60.0);
    stack.handle_pan(front, &PanGesture::began(grip), host);
    for step in 1..=8 {
        let to = grip + velocity * (f64::from(step) * DT);
        stack.handle_pan(front, &PanGesture::changed(to), host);
        stack.tick(DT, host);
    }
    let to = grip + velocity * (8.0 * DT);
    stack.handle_pan(front, &PanGesture::ended(to, velocity), host);
}

fn run_while(stack: &mut Stack, host: &mut Narrator, mut busy: impl FnMut(&Stack) -> bool) {
    for _ in 0..600 {
        if !busy(stack) {
            return;
        }
        stack.tick(DT, host);
    }
}

fn main() {
    let _ = tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::DEBUG).finish(),
    );

    let mut stack = CardStack::new(kurbo::Rect::new(0.0, 0.0, 320.0, 480.0));
    let mut host = Narrator;
    stack.load_cards((1..=3).map(Card::new), true);
    run_while(&mut stack, &mut host, |s| s.state() != StackState::Idle);

    println!("== slow drag ==");
    drag(&mut stack, &mut host, Vec2::new(150.0, 40.0));
    let front = stack.front();
    run_while(&mut stack, &mut host, |s| {
        front
            .and_then(|id| s.card(id))
            .is_some_and(|c| c.motion() != swipestack::CardMotion::Idle)
    });

    println!("== flings ==");
    for i in 0..3 {
        let front = stack.front();
        let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
        drag(&mut stack, &mut host, Vec2::new(1800.0 * direction, -300.0));
        run_while(&mut stack, &mut host, |s| s.front() == front);
    }

    println!("== reload ({:?}) ==", stack.state());
    run_while(&mut stack, &mut host, |s| s.state() != StackState::Idle);
    println!(
        "  deck restored: {:?}",
        stack
            .current_order()
            .iter()
            .filter_map(|id| stack.card(*id).map(|c| *c.content()))
            .collect::<Vec<_>>()
    );
}
