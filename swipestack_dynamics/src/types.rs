// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the animator: behavior handles, item state, and item lookup.

use kurbo::{Affine, Point, Size, Vec2};

/// Handle to a behavior registered with an [`Animator`](crate::Animator).
///
/// Slot index plus generation, so a handle to a removed behavior never aliases
/// a behavior added later into the same slot.
/// Use [`Animator::is_alive`](crate::Animator::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BehaviorId(u32, u32);

impl BehaviorId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Behavior handles use 32-bit slot indices by design."
    )]
    pub(crate) const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// Physical state of one simulated item, in the animator's reference space.
///
/// The item is a rectangle of `size` centred on `center` and rotated by
/// `angle` radians about that center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemState {
    /// Center of the item.
    pub center: Point,
    /// Rotation about the center, in radians.
    pub angle: f64,
    /// Linear velocity in units per second.
    pub linear_velocity: Vec2,
    /// Angular velocity in radians per second.
    pub angular_velocity: f64,
    /// Untransformed size of the item.
    pub size: Size,
}

impl ItemState {
    /// An item at rest.
    pub const fn new(center: Point, size: Size) -> Self {
        Self {
            center,
            angle: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            size,
        }
    }

    /// Map from item-local space (origin at the top-left corner) to reference space.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.center.to_vec2())
            * Affine::rotate(self.angle)
            * Affine::translate(-self.size.to_vec2() * 0.5)
    }

    /// Reference-space position of a point given as an offset from the center in item space.
    pub fn point_at_offset(&self, offset: Vec2) -> Point {
        self.center + rotate(offset, self.angle)
    }

    /// Stop all motion.
    pub fn halt(&mut self) {
        self.linear_velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
    }
}

/// Rotate `v` counter-clockwise by `angle` radians (clockwise on a y-down screen).
pub fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let r = Vec2::from_angle(angle);
    Vec2::new(v.x * r.x - v.y * r.y, v.x * r.y + v.y * r.x)
}

/// Resolve item keys to their mutable physical state.
///
/// The animator never owns items; it borrows them through this trait on every
/// [`Animator::step`](crate::Animator::step). Keys that no longer resolve are skipped.
pub trait ItemLookup<K> {
    /// Returns the state for `key`, or `None` if the item is gone.
    fn item_mut(&mut self, key: &K) -> Option<&mut ItemState>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn rotate_quarter_turn() {
        let v = rotate(Vec2::new(1.0, 0.0), FRAC_PI_2);
        assert!((v.x - 0.0).abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn transform_maps_local_center_to_center() {
        let mut item = ItemState::new(Point::new(100.0, 50.0), Size::new(40.0, 20.0));
        item.angle = 0.3;
        let c = item.transform() * Point::new(20.0, 10.0);
        assert!((c - item.center).hypot() < 1e-9);
    }

    #[test]
    fn offset_follows_rotation() {
        let mut item = ItemState::new(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        item.angle = FRAC_PI_2;
        let p = item.point_at_offset(Vec2::new(5.0, 0.0));
        assert!((p - Point::new(0.0, 5.0)).hypot() < 1e-9);
    }

    #[test]
    fn halt_clears_velocity() {
        let mut item = ItemState::new(Point::ZERO, Size::new(1.0, 1.0));
        item.linear_velocity = Vec2::new(3.0, 4.0);
        item.angular_velocity = 2.0;
        item.halt();
        assert_eq!(item.linear_velocity, Vec2::ZERO);
        assert_eq!(item.angular_velocity, 0.0);
    }
}
