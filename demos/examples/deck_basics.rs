// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deck basics.
//!
//! Loads three cards, waits for the load-in animation, taps the front card,
//! inserts a fourth card, and prints the deck after each step.
//!
//! Run:
//! - `cargo run -p swipestack_demos --example deck_basics`

use kurbo::Rect;
use swipestack::{Card, CardStack, StackDelegate, StackState};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const DT: f64 = 1.0 / 60.0;

struct Printer;

impl StackDelegate<&'static str> for Printer {
    fn card_was_tapped(&mut self, card: &Card<&'static str>) {
        println!("  tapped {}", card.content());
    }

    fn card_is_ready(&mut self, card: &Card<&'static str>, _stack: &CardStack<&'static str>) {
        println!("  ready {}", card.content());
    }
}

fn print_deck(label: &str, stack: &CardStack<&'static str>) {
    println!("== {label} ({:?}) ==", stack.state());
    for (i, id) in stack.current_order().iter().enumerate() {
        let Some(card) = stack.card(*id) else { continue };
        println!(
            "  [{i}] {:<2} original={} interactive={} alpha={:.2} z={}",
            card.content(),
            card.is_original(),
            stack.is_interactive(*id),
            card.alpha(),
            card.z_index(),
        );
    }
}

fn main() {
    let _ = tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::DEBUG).finish(),
    );

    let mut stack = CardStack::new(Rect::new(0.0, 0.0, 320.0, 480.0));
    let mut host = Printer;

    stack.load_cards(["A", "B", "C"].map(Card::new), true);
    print_deck("loading", &stack);
    while stack.state() != StackState::Idle {
        stack.tick(DT, &mut host);
    }
    print_deck("loaded", &stack);

    if let Some(front) = stack.front() {
        stack.handle_tap(front, &mut host);
        println!("selected: {:?}", stack.selected_card().map(Card::content));
    }

    stack.add_card(Card::new("D"));
    print_deck("inserted", &stack);
    for _ in 0..40 {
        stack.tick(DT, &mut host);
    }
    print_deck("faded in", &stack);
    println!("front index in loaded deck: {:?}", stack.current_front_index());
}
