// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the stack: card identifiers, flags, gestures, and host context.

use kurbo::{Point, Rect, Vec2};

/// Identifier for a card adopted by a [`CardStack`](crate::CardStack).
///
/// A slot index plus a generation counter.
///
/// ## Semantics
///
/// - On adoption, a fresh slot is allocated with generation `1`.
/// - When the card leaves the stack, the slot is freed and every existing `CardId` for it is stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `CardId`.
///
/// Cards that were never adopted carry [`CardId::DETACHED`], which no stack ever issues.
/// Use [`CardStack::card`](crate::CardStack::card) to check whether an id is still live.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CardId(u32, u32);

impl CardId {
    /// The id of a card that no stack has adopted.
    pub const DETACHED: Self = Self(u32::MAX, 0);

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Card handles use 32-bit slot indices by design."
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

/// Opaque token echoed back by [`CardDelegate::card_did_settle`](crate::CardDelegate::card_did_settle)
/// when a snap requested through [`Card::add_snap_behavior`](crate::Card::add_snap_behavior) arrives.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SettleToken(pub u64);

bitflags::bitflags! {
    /// Card flags controlling membership and input.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CardFlags: u8 {
        /// Card was part of the loaded deck rather than inserted later.
        const ORIGINAL     = 0b0000_0001;
        /// The stack allows this card to receive input.
        const INTERACTIVE  = 0b0000_0010;
        /// Tap and drag recognition is installed.
        const GESTURES     = 0b0000_0100;
        /// Drag input is accepted.
        const DRAG_ENABLED = 0b0000_1000;
        /// Card is placed in the stack and should be drawn.
        const DISPLAYED    = 0b0001_0000;
    }
}

impl Default for CardFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Shadow state of a card. Drawing the shadow is up to the host.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Elevation {
    /// No shadow.
    #[default]
    Resting,
    /// Picked up by the finger.
    Lifted,
}

/// Physical motion of a card.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CardMotion {
    /// No behaviors attached.
    #[default]
    Idle,
    /// Pinned to the pointer.
    Attached,
    /// Springing toward a target.
    Snapping,
    /// Flying off after a fling.
    Flinging,
}

/// Phase of a single-pointer pan.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PanPhase {
    /// The pointer went down and started moving.
    Began,
    /// The pointer moved.
    Changed,
    /// The pointer lifted.
    Ended,
    /// The gesture was interrupted; handled like a release with no velocity.
    Cancelled,
}

/// One pan sample in host space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanGesture {
    /// Gesture phase.
    pub phase: PanPhase,
    /// Pointer location in host space.
    pub location: Point,
    /// Pointer velocity in host units per second. Only read on release.
    pub velocity: Vec2,
}

impl PanGesture {
    /// Pointer down at `location`.
    pub const fn began(location: Point) -> Self {
        Self {
            phase: PanPhase::Began,
            location,
            velocity: Vec2::ZERO,
        }
    }

    /// Pointer moved to `location`.
    pub const fn changed(location: Point) -> Self {
        Self {
            phase: PanPhase::Changed,
            location,
            velocity: Vec2::ZERO,
        }
    }

    /// Pointer released at `location` moving at `velocity`.
    pub const fn ended(location: Point, velocity: Vec2) -> Self {
        Self {
            phase: PanPhase::Ended,
            location,
            velocity,
        }
    }

    /// Gesture interrupted at `location`.
    pub const fn cancelled(location: Point) -> Self {
        Self {
            phase: PanPhase::Cancelled,
            location,
            velocity: Vec2::ZERO,
        }
    }
}

/// Host geometry and tuning a card needs while handling input or a physics step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HostContext {
    /// Current stack clock, in seconds.
    pub now: f64,
    /// Center of the stack frame in host space.
    pub stack_center: Point,
    /// Visible region a flung card must leave, in host space.
    pub viewport: Rect,
    /// Release speed at or above which a drag becomes a fling.
    pub fling_threshold: f64,
    /// Distance at or under which a snap counts as arrived.
    pub settle_tolerance: f64,
}

/// Scale and opacity of the whole stack, animated during load-in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContainerAppearance {
    /// Uniform scale about the stack center.
    pub scale: f64,
    /// Opacity in `0..=1`.
    pub alpha: f64,
}

impl ContainerAppearance {
    /// Full size, fully opaque.
    pub const SHOWN: Self = Self {
        scale: 1.0,
        alpha: 1.0,
    };
}

impl Default for ContainerAppearance {
    fn default() -> Self {
        Self::SHOWN
    }
}

/// Deck lifecycle state of a [`CardStack`](crate::CardStack).
///
/// Only [`StackState::Idle`] accepts new load or reload requests directly; in
/// every other state they wait in a single pending slot.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum StackState {
    /// No deck animation running.
    #[default]
    Idle,
    /// A freshly loaded deck is animating in.
    LoadingIn,
    /// Out-of-place cards are snapping back to the center before a reload.
    ResettingBeforeReload,
    /// The reloaded deck is animating in.
    AnimatingReload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_id_is_never_issued() {
        assert_eq!(CardId::DETACHED.generation(), 0);
        assert_ne!(CardId::new(0, 1), CardId::DETACHED);
    }

    #[test]
    fn cancelled_pan_has_no_velocity() {
        let g = PanGesture::cancelled(Point::new(1.0, 2.0));
        assert_eq!(g.phase, PanPhase::Cancelled);
        assert_eq!(g.velocity, Vec2::ZERO);
    }

    #[test]
    fn new_cards_have_no_flags() {
        assert!(CardFlags::default().is_empty());
    }
}
