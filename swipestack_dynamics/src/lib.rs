// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipestack Dynamics: a small rigid-item animator for card widgets.
//!
//! The animator moves rectangular items under four kinds of behavior:
//!
//! - [`Attachment`]: pin a point of an item (an offset from its center) to an anchor.
//!   Dragging an item by a corner makes it swing.
//! - [`Snap`]: pull an item toward a target with a critically damped spring and
//!   straighten its rotation.
//! - [`DynamicItem`]: free flight, seeded with a release velocity and spin.
//! - [`Gravity`]: constant downward acceleration shared by a set of items.
//!
//! The animator never owns items. Callers keep item state wherever they like and
//! expose it through [`ItemLookup`] on every [`Animator::step`]. Behaviors are
//! addressed by generational [`BehaviorId`] handles, so removing a behavior
//! never invalidates other handles and stale handles never alias.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use swipestack_dynamics::{Animator, DynamicItem, Gravity, ItemLookup, ItemState};
//!
//! struct Items(Vec<ItemState>);
//!
//! impl ItemLookup<usize> for Items {
//!     fn item_mut(&mut self, key: &usize) -> Option<&mut ItemState> {
//!         self.0.get_mut(*key)
//!     }
//! }
//!
//! let mut items = Items(vec![ItemState::new(Point::new(100.0, 100.0), Size::new(50.0, 80.0))]);
//! let mut animator = Animator::new();
//!
//! // Fling item 0 to the right and let gravity pull it down.
//! let mut fling = DynamicItem::new(0);
//! fling.add_linear_velocity(Vec2::new(800.0, 0.0));
//! animator.add_behavior(fling);
//! let mut gravity = Gravity::new(animator.config().gravity_magnitude);
//! gravity.add_item(0);
//! animator.add_behavior(gravity);
//!
//! animator.step(1.0 / 60.0, &mut items);
//! assert!(items.0[0].center.x > 100.0);
//! assert!(items.0[0].center.y > 100.0);
//! ```
//!
//! ## Stepping
//!
//! Each [`Animator::step`] is divided into sub-steps no longer than
//! [`AnimatorConfig::max_substep`] (at most [`MAX_SUBSTEPS`]). Velocity-changing
//! behaviors run first, then free items integrate, then attachments are solved
//! so attached items end every sub-step exactly on their anchors.
//!
//! This crate is `no_std` and uses `alloc`. Enable `libm` for builds without `std`.

#![no_std]

extern crate alloc;

mod animator;
mod behavior;
mod config;
mod error;
mod types;

pub use animator::{Animator, MAX_SUBSTEPS};
pub use behavior::{Attachment, Behavior, DynamicItem, GRAVITY_UNIT, Gravity, Snap};
pub use config::AnimatorConfig;
pub use error::ConfigError;
pub use types::{BehaviorId, ItemLookup, ItemState, rotate};
