// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits between cards, their stack, and the host.
//!
//! - [`CardDelegate`]: what a [`Card`] reports to its owner.
//! - [`PhysicsLender`]: the narrow window through which a card touches the shared simulation.
//! - [`StackDelegate`]: what a [`CardStack`] reports to, and asks of, the host.

use swipestack_dynamics::{Behavior, BehaviorId};

use crate::card::Card;
use crate::stack::CardStack;
use crate::types::{CardId, SettleToken};

/// Event sink and drag policy a card reports to.
///
/// [`CardStack`] implements this internally; implement it yourself to drive a
/// [`Card`] without a stack.
pub trait CardDelegate {
    /// The card left the viewport under fling simulation.
    fn card_was_swiped(&mut self, card: CardId);

    /// The card was tapped.
    fn card_was_tapped(&mut self, card: CardId, should_highlight: bool);

    /// Permission gate consulted when a drag begins.
    fn should_drag_card(&mut self, card: CardId) -> bool;

    /// A drag ended without dismissal and the snap-back has settled.
    fn drag_ended_on_card(&mut self, card: CardId);

    /// A drag was accepted and is about to pin the card to the pointer.
    fn card_will_begin_drag(&mut self, _card: CardId) {}

    /// Gesture recognition is installed; the card is ready for input.
    fn card_is_ready(&mut self, _card: CardId) {}

    /// A snap requested with a token has arrived.
    fn card_did_settle(&mut self, _card: CardId, _token: SettleToken) {}
}

/// Lends a shared simulation to a card.
///
/// A card never holds the simulation. It asks the lender to add and remove its
/// behaviors and its gravity membership, so cleaning up one card can never
/// invalidate another card's bindings.
pub trait PhysicsLender<K> {
    /// Add a behavior to the simulation.
    fn add_behavior(&mut self, behavior: Behavior<K>) -> BehaviorId;

    /// Remove a behavior. Returns `false` if it was already gone.
    fn remove_behavior(&mut self, id: BehaviorId) -> bool;

    /// Access a live behavior, e.g. to move an attachment anchor.
    fn behavior_mut(&mut self, id: BehaviorId) -> Option<&mut Behavior<K>>;

    /// Make `item` subject to the shared gravity.
    fn add_gravity(&mut self, item: K);

    /// Release `item` from the shared gravity. Releasing a non-member is a no-op.
    fn remove_gravity(&mut self, item: K);
}

/// Notifications and policy a [`CardStack`] delegates to the host.
///
/// Every method has a default: notifications do nothing, and both policy
/// queries answer `true`. Use [`NoopStackDelegate`] when the host needs none of them.
pub trait StackDelegate<T> {
    /// An original card was swiped away.
    fn card_was_swiped(&mut self, _card: &Card<T>, _stack: &CardStack<T>) {}

    /// A card was tapped.
    fn card_was_tapped(&mut self, _card: &Card<T>) {}

    /// A card became the interactive front card after a swipe.
    fn card_did_show(&mut self, _card: &Card<T>, _stack: &CardStack<T>) {}

    /// A drag ended without dismissal and the card is back in place.
    fn drag_ended_on_card(&mut self, _card: &Card<T>, _stack: &CardStack<T>) {}

    /// Whether to reload the original deck once the last card is swiped.
    fn should_reload_empty_stack(&mut self, _stack: &CardStack<T>) -> bool {
        true
    }

    /// Whether a drag may begin on `card`.
    fn should_drag_card(&mut self, _card: &Card<T>, _stack: &CardStack<T>) -> bool {
        true
    }

    /// A drag on `card` is about to begin.
    fn card_will_begin_drag(&mut self, _card: &Card<T>, _stack: &CardStack<T>) {}

    /// `card` finished setup and accepts input.
    fn card_is_ready(&mut self, _card: &Card<T>, _stack: &CardStack<T>) {}
}

/// A stack delegate that takes every default.
///
/// All notifications are ignored, empty stacks reload, and every drag is allowed.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopStackDelegate;

impl<T> StackDelegate<T> for NoopStackDelegate {}
