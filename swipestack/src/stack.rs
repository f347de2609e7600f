// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The card stack: deck ordering, load/reload/insert, and the deck state machine.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::card::Card;
use crate::config::StackConfig;
use crate::delegate::{CardDelegate, StackDelegate};
use crate::error::ConfigError;
use crate::physics::StackPhysics;
use crate::registry::Slots;
use crate::types::{
    CardFlags, CardId, ContainerAppearance, HostContext, PanGesture, PanPhase, SettleToken,
    StackState,
};

/// Delayed animation clock with an ease-in curve.
#[derive(Copy, Clone, Debug)]
struct Tween {
    delay: f64,
    duration: f64,
    elapsed: f64,
}

impl Tween {
    fn new(delay: f64, duration: f64) -> Self {
        Self {
            delay,
            duration,
            elapsed: 0.0,
        }
    }

    fn instant() -> Self {
        Self::new(0.0, 0.0)
    }

    fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }

    /// Linear progress in `0..=1`.
    fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return if self.elapsed >= self.delay { 1.0 } else { 0.0 };
        }
        ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    fn ease_in(&self) -> f64 {
        let t = self.progress();
        t * t
    }
}

#[derive(Clone, Debug)]
enum Phase {
    Idle,
    LoadingIn {
        tween: Tween,
        reload: bool,
    },
    /// `waiting` is `None` until the reset pass has run on the next tick.
    Resetting {
        waiting: Option<Vec<SettleToken>>,
        animated: bool,
    },
}

#[derive(Debug)]
enum Pending<T> {
    Load { cards: Vec<Card<T>>, animated: bool },
    Reload { animated: bool },
}

#[derive(Copy, Clone, Debug)]
struct Fade {
    card: CardId,
    tween: Tween,
}

#[derive(Copy, Clone, Debug)]
struct Selection {
    card: CardId,
    expires_at: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum CardEvent {
    Swiped(CardId),
    Tapped(CardId, bool),
    DragEnded(CardId),
    WillBeginDrag(CardId),
    Ready(CardId),
    Settled(SettleToken),
}

/// Collects card notifications while a card is borrowed, for dispatch afterwards.
#[derive(Debug, Default)]
struct Relay {
    drag_allowed: bool,
    events: Vec<CardEvent>,
}

impl Relay {
    fn new(drag_allowed: bool) -> Self {
        Self {
            drag_allowed,
            events: Vec::new(),
        }
    }
}

impl CardDelegate for Relay {
    fn card_was_swiped(&mut self, card: CardId) {
        self.events.push(CardEvent::Swiped(card));
    }

    fn card_was_tapped(&mut self, card: CardId, should_highlight: bool) {
        self.events.push(CardEvent::Tapped(card, should_highlight));
    }

    fn should_drag_card(&mut self, _card: CardId) -> bool {
        self.drag_allowed
    }

    fn drag_ended_on_card(&mut self, card: CardId) {
        self.events.push(CardEvent::DragEnded(card));
    }

    fn card_will_begin_drag(&mut self, card: CardId) {
        self.events.push(CardEvent::WillBeginDrag(card));
    }

    fn card_is_ready(&mut self, card: CardId) {
        self.events.push(CardEvent::Ready(card));
    }

    fn card_did_settle(&mut self, _card: CardId, token: SettleToken) {
        self.events.push(CardEvent::Settled(token));
    }
}

/// A stack of swipeable cards.
///
/// ## Usage
///
/// - Create the stack with its host-space frame, then [`load_cards`](Self::load_cards).
/// - Feed pointer input with [`handle_pan`](Self::handle_pan) and [`handle_tap`](Self::handle_tap);
///   [`hit_test`](Self::hit_test) finds the card under a point.
/// - Call [`tick`](Self::tick) every frame. Animations, physics, timers and
///   every [`StackDelegate`] notification they cause happen inside `tick`.
/// - Draw each displayed card with [`Card::transform`], [`Card::alpha`] and
///   [`Card::z_index`], and the whole stack with [`appearance`](Self::appearance).
///
/// ## Ordering
///
/// [`current_order`](Self::current_order) lists the cards still in play, front
/// first. Cards leave only when swiped. Inserted cards go to the front and are
/// never part of [`original_order`](Self::original_order), so a reload restores
/// exactly the loaded deck.
///
/// ## Deck state
///
/// Loading and reloading animate the whole deck; see [`StackState`]. While a
/// deck animation runs, further [`load_cards`](Self::load_cards) and
/// [`reload_stack`](Self::reload_stack) calls wait in a single pending slot,
/// and the latest one wins.
#[derive(Debug)]
pub struct CardStack<T> {
    config: StackConfig,
    frame: Rect,
    viewport: Rect,
    cards: Slots<T>,
    physics: StackPhysics,
    original_order: Vec<CardId>,
    current_order: Vec<CardId>,
    phase: Phase,
    pending: Option<Pending<T>>,
    fades: Vec<Fade>,
    selected: Option<Selection>,
    interaction_enabled: bool,
    appearance: ContainerAppearance,
    now: f64,
    next_token: u64,
}

impl<T> CardStack<T> {
    /// Create an empty stack occupying `frame` in host space, with the default configuration.
    ///
    /// The viewport starts out equal to `frame`.
    pub fn new(frame: Rect) -> Self {
        Self {
            config: StackConfig::new(),
            frame,
            viewport: frame,
            cards: Slots::new(),
            physics: StackPhysics::with_defaults(),
            original_order: Vec::new(),
            current_order: Vec::new(),
            phase: Phase::Idle,
            pending: None,
            fades: Vec::new(),
            selected: None,
            interaction_enabled: true,
            appearance: ContainerAppearance::SHOWN,
            now: 0.0,
            next_token: 0,
        }
    }

    /// Create an empty stack after validating `config`.
    pub fn with_config(frame: Rect, config: StackConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let physics = StackPhysics::new(config.dynamics)?;
        Ok(Self {
            config,
            physics,
            ..Self::new(frame)
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Host-space frame of the stack.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Host-space region a flung card must leave to count as swiped.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Center of the stack frame; cards rest here.
    pub fn center(&self) -> Point {
        self.frame.center()
    }

    /// Stack clock: total time fed to [`tick`](Self::tick).
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move or resize the stack. Resting cards follow.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        let center = frame.center();
        let size = frame.size();
        for id in self.cards.ids() {
            if let Some(card) = self.cards.get_mut(id)
                && card.is_displayed()
            {
                card.relayout(center, size);
            }
        }
    }

    /// Set the region a flung card must leave.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Deck lifecycle state.
    pub fn state(&self) -> StackState {
        match self.phase {
            Phase::Idle => StackState::Idle,
            Phase::LoadingIn { reload: false, .. } => StackState::LoadingIn,
            Phase::LoadingIn { reload: true, .. } => StackState::AnimatingReload,
            Phase::Resetting { .. } => StackState::ResettingBeforeReload,
        }
    }

    /// True while a deck animation runs.
    pub fn is_animating(&self) -> bool {
        self.state() != StackState::Idle
    }

    /// True if a load or reload is waiting for the running deck animation.
    pub fn has_pending_request(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the stack as a whole accepts input.
    pub fn is_interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    /// Whether `card` accepts input right now: the stack does, and the card is the enabled front card.
    pub fn is_interactive(&self, card: CardId) -> bool {
        self.interaction_enabled && self.cards.get(card).is_some_and(Card::is_interactive)
    }

    /// Scale and opacity of the whole stack.
    pub fn appearance(&self) -> ContainerAppearance {
        self.appearance
    }

    /// The loaded deck, in load order. Inserted cards are never listed here.
    pub fn original_order(&self) -> &[CardId] {
        &self.original_order
    }

    /// Cards still in play, front first.
    pub fn current_order(&self) -> &[CardId] {
        &self.current_order
    }

    /// The front card, if any.
    pub fn front(&self) -> Option<CardId> {
        self.current_order.first().copied()
    }

    /// Position of the front card in the loaded deck.
    ///
    /// `None` when the stack is empty or an inserted card is in front.
    pub fn current_front_index(&self) -> Option<usize> {
        let front = self.front()?;
        self.original_order.iter().position(|id| *id == front)
    }

    /// Whether a tapped card is currently highlighted.
    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    /// The highlighted card, if it is still owned by the stack.
    pub fn selected_card(&self) -> Option<&Card<T>> {
        self.selected.and_then(|s| self.cards.get(s.card))
    }

    /// Look up a card. Stale ids return `None`.
    pub fn card(&self, id: CardId) -> Option<&Card<T>> {
        self.cards.get(id)
    }

    /// The content of a card, mutably.
    pub fn content_mut(&mut self, id: CardId) -> Option<&mut T> {
        self.cards.get_mut(id).map(Card::content_mut)
    }

    /// Every card the stack owns, displayed or not, in slot order.
    pub fn cards(&self) -> impl Iterator<Item = &Card<T>> + '_ {
        self.cards.iter()
    }

    /// Number of cards the stack owns.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True if the stack owns no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.len() == 0
    }

    /// Topmost displayed card whose rotated frame contains the host-space `point`.
    pub fn hit_test(&self, point: Point) -> Option<CardId> {
        self.cards
            .iter()
            .filter(|card| card.is_displayed())
            .filter(|card| {
                let local = card.transform().inverse() * point;
                Rect::from_origin_size(Point::ZERO, card.size()).contains(local)
            })
            .max_by_key(|card| card.z_index())
            .map(Card::id)
    }

    /// Replace the deck with `cards`, front first.
    ///
    /// While a deck animation runs, the request waits in the pending slot,
    /// replacing any earlier pending request, and starts when the animation finishes.
    pub fn load_cards(&mut self, cards: impl IntoIterator<Item = Card<T>>, animated: bool) {
        let cards: Vec<_> = cards.into_iter().collect();
        if self.is_animating() {
            tracing::debug!(
                count = cards.len(),
                replaced = self.pending.is_some(),
                "deck busy, queueing load"
            );
            self.pending = Some(Pending::Load { cards, animated });
            return;
        }
        self.start_load(cards, animated);
    }

    /// Put every original card back, in load order, and animate the deck in again.
    ///
    /// Inserted cards are dropped. Cards that are out of place snap back to the
    /// center first; the load-in starts once all of them have settled.
    pub fn reload_stack(&mut self, animated: bool) {
        if self.is_animating() {
            tracing::debug!(
                replaced = self.pending.is_some(),
                "deck busy, queueing reload"
            );
            self.pending = Some(Pending::Reload { animated });
            return;
        }
        tracing::debug!(count = self.original_order.len(), "reloading deck");
        for id in core::mem::take(&mut self.current_order) {
            let Some(card) = self.cards.get_mut(id) else {
                continue;
            };
            card.release(&mut self.physics);
            card.set_flag(CardFlags::DISPLAYED, false);
            if !card.is_original() {
                self.cards.remove(id);
            }
        }
        self.fades.clear();
        self.current_order.clone_from(&self.original_order);
        self.interaction_enabled = false;
        self.phase = Phase::Resetting {
            waiting: None,
            animated,
        };
    }

    /// Insert `card` at the front and fade it in.
    ///
    /// The stack ignores input until the fade finishes. The card is marked as
    /// not original: it is dropped when swiped and not restored by a reload.
    pub fn add_card(&mut self, card: Card<T>) -> CardId {
        let center = self.center();
        let size = self.frame.size();
        let z = self
            .cards
            .iter()
            .map(Card::z_index)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        if let Some(front) = self.front()
            && let Some(previous) = self.cards.get_mut(front)
        {
            previous.set_flag(CardFlags::INTERACTIVE, false);
        }
        let id = self.cards.insert(card, false);
        if let Some(inserted) = self.cards.get_mut(id) {
            inserted.place(center, size, z);
            inserted.set_alpha(0.0);
        }
        self.current_order.insert(0, id);
        self.interaction_enabled = false;
        self.fades.push(Fade {
            card: id,
            tween: Tween::new(0.0, self.config.fade_in_duration),
        });
        tracing::debug!(card = ?id, "inserted card");
        id
    }

    /// Deliver a pan sample for `card`.
    ///
    /// A pan may only begin on an interactive card, and only if `delegate`
    /// allows it. Later samples reach the card that began the drag even if the
    /// stack stopped accepting input in the meantime.
    pub fn handle_pan(
        &mut self,
        card: CardId,
        gesture: &PanGesture,
        delegate: &mut impl StackDelegate<T>,
    ) {
        let Some(target) = self.cards.get(card) else {
            tracing::trace!(card = ?card, "pan on a stale card");
            return;
        };
        let drag_allowed = if gesture.phase == PanPhase::Began {
            if !self.is_interactive(card) {
                tracing::trace!(card = ?card, "pan on a non-interactive card");
                return;
            }
            delegate.should_drag_card(target, self)
        } else {
            true
        };
        let ctx = self.host_context();
        let mut relay = Relay::new(drag_allowed);
        if let Some(target) = self.cards.get_mut(card) {
            target.handle_pan(gesture, &ctx, &mut self.physics, &mut relay);
        }
        self.dispatch(relay, delegate);
    }

    /// Deliver a tap on `card`. Only the interactive front card reacts.
    pub fn handle_tap(&mut self, card: CardId, delegate: &mut impl StackDelegate<T>) {
        if !self.is_interactive(card) {
            tracing::trace!(card = ?card, "tap on a non-interactive card");
            return;
        }
        let mut relay = Relay::new(false);
        if let Some(target) = self.cards.get_mut(card) {
            target.handle_tap(&mut relay);
        }
        self.dispatch(relay, delegate);
    }

    /// Advance time by `dt` seconds.
    ///
    /// Runs, in order: the deck and fade animations (starting a pending request
    /// when a deck animation finishes), the reset pass of a reload, the physics
    /// simulation with every card's per-step checks, and the selection timer.
    /// Negative or non-finite `dt` is ignored.
    pub fn tick(&mut self, dt: f64, delegate: &mut impl StackDelegate<T>) {
        if !dt.is_finite() || dt < 0.0 {
            tracing::debug!(dt, "ignoring invalid tick");
            return;
        }
        self.now += dt;

        let mut relay = Relay::new(false);
        let loaded = self.advance_load_in(dt, &mut relay);
        self.advance_fades(dt, &mut relay);
        self.dispatch(relay, delegate);
        if loaded {
            self.start_pending();
        }

        if let Phase::Resetting {
            waiting: None,
            animated,
        } = self.phase
        {
            self.run_reset_pass(animated);
        }

        self.physics.step(dt, &mut self.cards);
        let ctx = self.host_context();
        let mut relay = Relay::new(false);
        for id in self.cards.ids() {
            if let Some(card) = self.cards.get_mut(id) {
                let geometry = card.is_displayed().then_some(&ctx);
                card.physics_step(geometry, &mut self.physics, &mut relay);
            }
        }
        self.dispatch(relay, delegate);

        if self.selected.is_some_and(|s| self.now >= s.expires_at) {
            self.selected = None;
        }
    }

    fn host_context(&self) -> HostContext {
        HostContext {
            now: self.now,
            stack_center: self.center(),
            viewport: self.viewport,
            fling_threshold: self.config.fling_threshold,
            settle_tolerance: self.config.settle_tolerance,
        }
    }

    fn start_load(&mut self, cards: Vec<Card<T>>, animated: bool) {
        self.retire_deck();
        for card in cards {
            let id = self.cards.insert(card, true);
            self.original_order.push(id);
        }
        self.current_order.clone_from(&self.original_order);
        tracing::debug!(count = self.original_order.len(), animated, "loading deck");
        self.begin_load_in(animated, false);
    }

    fn retire_deck(&mut self) {
        for id in self.cards.ids() {
            if let Some(mut card) = self.cards.remove(id) {
                card.release(&mut self.physics);
            }
        }
        self.original_order.clear();
        self.current_order.clear();
        self.fades.clear();
        self.selected = None;
    }

    /// Place the current deck, front on top, and start the container animation.
    fn begin_load_in(&mut self, animated: bool, reload: bool) {
        let center = self.center();
        let size = self.frame.size();
        let count = self.current_order.len();
        for (i, id) in self.current_order.iter().enumerate() {
            if let Some(card) = self.cards.get_mut(*id) {
                card.place(center, size, i32::try_from(count - i).unwrap_or(i32::MAX));
                card.set_alpha(1.0);
                card.set_flag(CardFlags::INTERACTIVE, i == 0);
            }
        }
        self.interaction_enabled = false;
        let tween = if animated {
            self.appearance = ContainerAppearance {
                scale: self.config.load_initial_scale,
                alpha: 0.0,
            };
            Tween::new(self.config.load_delay, self.config.load_duration)
        } else {
            self.appearance = ContainerAppearance::SHOWN;
            Tween::instant()
        };
        self.phase = Phase::LoadingIn { tween, reload };
    }

    /// Returns true if a deck animation finished during this advance.
    fn advance_load_in(&mut self, dt: f64, relay: &mut Relay) -> bool {
        let Phase::LoadingIn { tween, .. } = &mut self.phase else {
            return false;
        };
        tween.advance(dt);
        let eased = tween.ease_in();
        let initial = self.config.load_initial_scale;
        self.appearance = ContainerAppearance {
            scale: initial + (1.0 - initial) * eased,
            alpha: eased,
        };
        if !tween.is_done() {
            return false;
        }

        self.appearance = ContainerAppearance::SHOWN;
        self.phase = Phase::Idle;
        // Inserted cards are set up when their own fade finishes.
        for id in &self.current_order {
            if let Some(card) = self.cards.get_mut(*id)
                && card.is_original()
            {
                card.finish_setup(relay);
            }
        }
        if self.fades.is_empty() {
            self.interaction_enabled = true;
        }
        tracing::debug!(count = self.current_order.len(), "deck ready");
        true
    }

    fn advance_fades(&mut self, dt: f64, relay: &mut Relay) {
        if self.fades.is_empty() {
            return;
        }
        let front = self.front();
        for fade in &mut self.fades {
            fade.tween.advance(dt);
            let Some(card) = self.cards.get_mut(fade.card) else {
                continue;
            };
            card.set_alpha(fade.tween.progress());
            if fade.tween.is_done() {
                card.finish_setup(relay);
                card.set_flag(CardFlags::INTERACTIVE, front == Some(fade.card));
            }
        }
        self.fades.retain(|f| !f.tween.is_done());
        if self.fades.is_empty() && matches!(self.phase, Phase::Idle) {
            self.interaction_enabled = true;
        }
    }

    fn start_pending(&mut self) {
        match self.pending.take() {
            Some(Pending::Load { cards, animated }) => self.start_load(cards, animated),
            Some(Pending::Reload { animated }) => self.reload_stack(animated),
            None => {}
        }
    }

    /// Snap every out-of-place card back to the center; the load-in waits for all of them.
    fn run_reset_pass(&mut self, animated: bool) {
        let center = self.center();
        let mut waiting = Vec::new();
        self.appearance.alpha = 0.0;
        for id in &self.current_order {
            let Some(card) = self.cards.get_mut(*id) else {
                continue;
            };
            card.set_flag(CardFlags::DISPLAYED, true);
            card.set_flag(CardFlags::INTERACTIVE, false);
            if card.center() != center {
                let token = SettleToken(self.next_token);
                self.next_token += 1;
                card.add_snap_behavior(center, Some(token), &mut self.physics);
                waiting.push(token);
            }
        }
        tracing::debug!(waiting = waiting.len(), "reset pass");
        if waiting.is_empty() {
            self.begin_load_in(animated, true);
        } else {
            self.phase = Phase::Resetting {
                waiting: Some(waiting),
                animated,
            };
        }
    }

    fn settle_arrived(&mut self, token: SettleToken) {
        let Phase::Resetting {
            waiting: Some(waiting),
            animated,
        } = &mut self.phase
        else {
            return;
        };
        waiting.retain(|t| *t != token);
        if waiting.is_empty() {
            let animated = *animated;
            tracing::debug!("reset pass settled");
            self.begin_load_in(animated, true);
        }
    }

    fn dispatch(&mut self, relay: Relay, delegate: &mut impl StackDelegate<T>) {
        for event in relay.events {
            match event {
                CardEvent::Swiped(id) => self.finish_swipe(id, delegate),
                CardEvent::Tapped(id, should_highlight) => {
                    if should_highlight && self.selected.is_none() {
                        self.selected = Some(Selection {
                            card: id,
                            expires_at: self.now + self.config.selection_timeout,
                        });
                    }
                    if let Some(card) = self.cards.get(id) {
                        delegate.card_was_tapped(card);
                    }
                }
                CardEvent::DragEnded(id) => {
                    if let Some(card) = self.cards.get(id) {
                        delegate.drag_ended_on_card(card, self);
                    }
                }
                CardEvent::WillBeginDrag(id) => {
                    if let Some(card) = self.cards.get(id) {
                        delegate.card_will_begin_drag(card, self);
                    }
                }
                CardEvent::Ready(id) => {
                    if let Some(card) = self.cards.get(id) {
                        delegate.card_is_ready(card, self);
                    }
                }
                CardEvent::Settled(token) => self.settle_arrived(token),
            }
        }
    }

    fn finish_swipe(&mut self, id: CardId, delegate: &mut impl StackDelegate<T>) {
        let Some(pos) = self.current_order.iter().position(|c| *c == id) else {
            tracing::trace!(card = ?id, "swipe from a card not in play");
            return;
        };
        self.current_order.remove(pos);
        let Some(card) = self.cards.get_mut(id) else {
            return;
        };
        card.release(&mut self.physics);
        card.set_flag(CardFlags::DISPLAYED, false);
        let original = card.is_original();
        tracing::debug!(
            card = ?id,
            original,
            remaining = self.current_order.len(),
            "card swiped"
        );

        if original {
            if let Some(card) = self.cards.get(id) {
                delegate.card_was_swiped(card, self);
            }
        } else {
            self.cards.remove(id);
        }

        match self.front() {
            None => {
                if delegate.should_reload_empty_stack(self) {
                    self.reload_stack(true);
                }
            }
            Some(front) => {
                if let Some(card) = self.cards.get_mut(front) {
                    card.set_flag(CardFlags::INTERACTIVE, true);
                }
                if let Some(card) = self.cards.get(front) {
                    delegate.card_did_show(card, self);
                }
            }
        }
    }
}
