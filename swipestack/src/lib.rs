// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipestack: a headless stack of swipeable cards.
//!
//! Swipestack is the interaction and animation core of a card-stack widget:
//!
//! - Drag the front card with one finger; it hangs off the pointer and swings
//!   when grabbed off-center.
//! - Release it fast enough and it flies off under gravity; once it has left the
//!   viewport it counts as swiped and the next card becomes interactive.
//! - Release it slowly and it springs back to where it started.
//! - Load, reload and insert cards with container animations, with concurrent
//!   requests coalesced into a single pending slot.
//!
//! The host owns rendering and gesture capture. It feeds [`PanGesture`]s, taps
//! and frame ticks in, and reads card transforms, opacity, z-order, elevation and
//! the container [`appearance`](CardStack::appearance) out. Events and policy
//! questions go through a [`StackDelegate`].
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use swipestack::{Card, CardStack, NoopStackDelegate, PanGesture, StackState};
//!
//! let mut stack = CardStack::new(Rect::new(0.0, 0.0, 300.0, 400.0));
//! stack.load_cards(["A", "B", "C"].map(Card::new), true);
//!
//! // Run the load-in animation.
//! let mut host = NoopStackDelegate;
//! while stack.state() != StackState::Idle {
//!     stack.tick(1.0 / 60.0, &mut host);
//! }
//! let front = stack.front().unwrap();
//! assert!(stack.is_interactive(front));
//!
//! // Fling the front card to the right.
//! let grip = Point::new(150.0, 200.0);
//! stack.handle_pan(front, &PanGesture::began(grip), &mut host);
//! stack.handle_pan(front, &PanGesture::ended(grip, Vec2::new(2500.0, 0.0)), &mut host);
//! for _ in 0..60 {
//!     stack.tick(1.0 / 60.0, &mut host);
//! }
//! assert_eq!(stack.current_order().len(), 2);
//! assert_eq!(stack.card(stack.front().unwrap()).map(|c| *c.content()), Some("B"));
//! ```
//!
//! ## Time
//!
//! Nothing happens on its own. [`CardStack::tick`] advances the load-in and
//! fade animations, the physics simulation, and the selection timer, and every
//! delegate notification they cause is delivered from inside it.
//!
//! ## Coordinates
//!
//! The stack frame, its viewport, pointer locations, velocities and card
//! centers are all in host space, the coordinate space of the stack's parent.
//!
//! ## Physics
//!
//! Each stack owns one [`swipestack_dynamics::Animator`] and one shared gravity
//! behavior, lent to its cards through [`PhysicsLender`].
//!
//! This crate is `no_std` and uses `alloc`. Enable `libm` for builds without `std`.

#![no_std]

extern crate alloc;

mod card;
mod config;
mod delegate;
mod error;
pub mod geometry;
mod physics;
mod registry;
mod stack;
mod types;

pub use card::Card;
pub use config::StackConfig;
pub use delegate::{CardDelegate, NoopStackDelegate, PhysicsLender, StackDelegate};
pub use error::ConfigError;
pub use stack::CardStack;
pub use types::{
    CardFlags, CardId, CardMotion, ContainerAppearance, Elevation, HostContext, PanGesture,
    PanPhase, SettleToken, StackState,
};

pub use swipestack_dynamics;
