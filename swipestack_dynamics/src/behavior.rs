// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behaviors: the forces and constraints an [`Animator`](crate::Animator) applies to items.

use alloc::vec::Vec;
use kurbo::{Point, Vec2};

/// One gravity unit, in coordinate units per second squared.
pub const GRAVITY_UNIT: f64 = 1000.0;

/// Pins a point of an item to an anchor.
///
/// The pinned point is given as an offset from the item's center in item space,
/// so an off-center grip makes the item swing as the anchor moves.
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment<K> {
    /// The attached item.
    pub item: K,
    /// Grip offset from the item center, in item space.
    pub offset: Vec2,
    /// Reference-space anchor the grip follows.
    pub anchor: Point,
}

impl<K> Attachment<K> {
    /// Attach `item` at `offset` to `anchor`.
    pub fn new(item: K, offset: Vec2, anchor: Point) -> Self {
        Self {
            item,
            offset,
            anchor,
        }
    }
}

/// Pulls an item toward a target point and back to zero rotation.
#[derive(Clone, Debug, PartialEq)]
pub struct Snap<K> {
    /// The snapping item.
    pub item: K,
    /// Reference-space destination of the item center.
    pub target: Point,
}

impl<K> Snap<K> {
    /// Snap `item` to `target`.
    pub fn new(item: K, target: Point) -> Self {
        Self { item, target }
    }
}

/// Free flight for an item, with optional velocity seeding and resistance.
///
/// Velocity added through [`add_linear_velocity`](Self::add_linear_velocity) and
/// [`add_angular_velocity`](Self::add_angular_velocity) is applied to the item
/// on the next step.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicItem<K> {
    /// The flying item.
    pub item: K,
    /// Linear velocity decay rate, per second.
    pub resistance: f64,
    /// Angular velocity decay rate, per second.
    pub angular_resistance: f64,
    pending_linear: Vec2,
    pending_angular: f64,
}

impl<K> DynamicItem<K> {
    /// Free flight for `item` without resistance.
    pub fn new(item: K) -> Self {
        Self {
            item,
            resistance: 0.0,
            angular_resistance: 0.0,
            pending_linear: Vec2::ZERO,
            pending_angular: 0.0,
        }
    }

    /// Add to the item's linear velocity on the next step.
    pub fn add_linear_velocity(&mut self, velocity: Vec2) {
        self.pending_linear += velocity;
    }

    /// Add to the item's angular velocity on the next step.
    pub fn add_angular_velocity(&mut self, velocity: f64) {
        self.pending_angular += velocity;
    }

    pub(crate) fn take_pending(&mut self) -> (Vec2, f64) {
        let out = (self.pending_linear, self.pending_angular);
        self.pending_linear = Vec2::ZERO;
        self.pending_angular = 0.0;
        out
    }
}

/// Constant acceleration shared by a set of items.
#[derive(Clone, Debug, PartialEq)]
pub struct Gravity<K> {
    items: Vec<K>,
    /// Unit direction of the pull. Default: straight down (+y).
    pub direction: Vec2,
    /// Strength in [`GRAVITY_UNIT`]s.
    pub magnitude: f64,
}

impl<K: Copy + Eq> Gravity<K> {
    /// Empty downward gravity of `magnitude`.
    pub fn new(magnitude: f64) -> Self {
        Self {
            items: Vec::new(),
            direction: Vec2::new(0.0, 1.0),
            magnitude,
        }
    }

    /// Add an item; adding a member again is a no-op.
    pub fn add_item(&mut self, item: K) {
        if !self.items.contains(&item) {
            self.items.push(item);
        }
    }

    /// Remove an item; removing a non-member is a no-op.
    pub fn remove_item(&mut self, item: K) {
        self.items.retain(|k| *k != item);
    }

    /// Whether `item` is pulled by this gravity.
    pub fn contains(&self, item: K) -> bool {
        self.items.contains(&item)
    }

    /// Current members, in insertion order.
    pub fn items(&self) -> &[K] {
        &self.items
    }

    /// Acceleration applied to members.
    pub fn acceleration(&self) -> Vec2 {
        self.direction * (self.magnitude * GRAVITY_UNIT)
    }
}

/// Any behavior an [`Animator`](crate::Animator) can run.
#[derive(Clone, Debug, PartialEq)]
pub enum Behavior<K> {
    /// See [`Attachment`].
    Attachment(Attachment<K>),
    /// See [`Snap`].
    Snap(Snap<K>),
    /// See [`DynamicItem`].
    Dynamic(DynamicItem<K>),
    /// See [`Gravity`].
    Gravity(Gravity<K>),
}

impl<K> Behavior<K> {
    /// The attachment, if this is one.
    pub fn as_attachment_mut(&mut self) -> Option<&mut Attachment<K>> {
        match self {
            Self::Attachment(a) => Some(a),
            _ => None,
        }
    }

    /// The snap, if this is one.
    pub fn as_snap_mut(&mut self) -> Option<&mut Snap<K>> {
        match self {
            Self::Snap(s) => Some(s),
            _ => None,
        }
    }

    /// The gravity, if this is one.
    pub fn as_gravity_mut(&mut self) -> Option<&mut Gravity<K>> {
        match self {
            Self::Gravity(g) => Some(g),
            _ => None,
        }
    }

    /// The gravity, if this is one.
    pub fn as_gravity(&self) -> Option<&Gravity<K>> {
        match self {
            Self::Gravity(g) => Some(g),
            _ => None,
        }
    }
}

impl<K> From<Attachment<K>> for Behavior<K> {
    fn from(value: Attachment<K>) -> Self {
        Self::Attachment(value)
    }
}

impl<K> From<Snap<K>> for Behavior<K> {
    fn from(value: Snap<K>) -> Self {
        Self::Snap(value)
    }
}

impl<K> From<DynamicItem<K>> for Behavior<K> {
    fn from(value: DynamicItem<K>) -> Self {
        Self::Dynamic(value)
    }
}

impl<K> From<Gravity<K>> for Behavior<K> {
    fn from(value: Gravity<K>) -> Self {
        Self::Gravity(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_membership_is_a_set() {
        let mut g: Gravity<u32> = Gravity::new(3.0);
        g.add_item(1);
        g.add_item(1);
        g.add_item(2);
        assert_eq!(g.items(), &[1, 2]);
        g.remove_item(1);
        g.remove_item(7);
        assert!(!g.contains(1));
        assert!(g.contains(2));
    }

    #[test]
    fn gravity_points_down() {
        let g: Gravity<u32> = Gravity::new(3.0);
        assert_eq!(g.acceleration(), Vec2::new(0.0, 3000.0));
    }

    #[test]
    fn dynamic_seed_is_consumed_once() {
        let mut d = DynamicItem::new(0_u32);
        d.add_linear_velocity(Vec2::new(10.0, 0.0));
        d.add_linear_velocity(Vec2::new(0.0, 5.0));
        d.add_angular_velocity(1.5);
        assert_eq!(d.take_pending(), (Vec2::new(10.0, 5.0), 1.5));
        assert_eq!(d.take_pending(), (Vec2::ZERO, 0.0));
    }

    #[test]
    fn accessors_match_variant() {
        let mut b: Behavior<u32> = Attachment::new(1, Vec2::ZERO, Point::ZERO).into();
        assert!(b.as_attachment_mut().is_some());
        assert!(b.as_snap_mut().is_none());
        assert!(b.as_gravity().is_none());
    }
}
