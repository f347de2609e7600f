// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A draggable card and its gesture/physics state machine.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use swipestack_dynamics::{
    Attachment, Behavior, BehaviorId, DynamicItem, ItemState, Snap, rotate,
};

use crate::delegate::{CardDelegate, PhysicsLender};
use crate::geometry::{angle_of, is_settled, rects_intersect, rotated_bounds, speed};
use crate::types::{
    CardFlags, CardId, CardMotion, Elevation, HostContext, PanGesture, PanPhase, SettleToken,
};

/// Exactly one physical motion at a time, each owning its behavior handle.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Motion {
    Idle,
    Attached {
        behavior: BehaviorId,
    },
    Snapping {
        behavior: BehaviorId,
        target: Point,
        token: Option<SettleToken>,
        after_drag: bool,
    },
    Flinging {
        behavior: BehaviorId,
    },
}

/// One piece of user content in a stack, with its drag, snap and fling state.
///
/// Cards are created by the host with [`Card::new`] and handed to a
/// [`CardStack`](crate::CardStack), which adopts them, assigns a [`CardId`] and
/// drives them. The methods that take a [`PhysicsLender`] and a
/// [`CardDelegate`] can also be used directly to drive a card from other code.
///
/// All positions are in host space. The card is a rectangle of [`Card::size`]
/// centred on [`Card::center`] and rotated by [`Card::angle`].
#[derive(Clone, Debug)]
pub struct Card<T> {
    content: T,
    id: CardId,
    flags: CardFlags,
    item: ItemState,
    motion: Motion,
    elevation: Elevation,
    alpha: f64,
    z_index: i32,
    initial_center: Option<Point>,
    original_frame: Option<Rect>,
    last_time: f64,
    last_angle: f64,
    angular_velocity: f64,
}

impl<T> Card<T> {
    /// Wrap `content` in a detached card.
    pub fn new(content: T) -> Self {
        Self {
            content,
            id: CardId::DETACHED,
            flags: CardFlags::empty(),
            item: ItemState::new(Point::ZERO, Size::ZERO),
            motion: Motion::Idle,
            elevation: Elevation::Resting,
            alpha: 1.0,
            z_index: 0,
            initial_center: None,
            original_frame: None,
            last_time: 0.0,
            last_angle: 0.0,
            angular_velocity: 0.0,
        }
    }

    /// The user content.
    pub fn content(&self) -> &T {
        &self.content
    }

    /// The user content, mutably.
    pub fn content_mut(&mut self) -> &mut T {
        &mut self.content
    }

    /// Unwrap the user content.
    pub fn into_content(self) -> T {
        self.content
    }

    /// The id assigned on adoption, or [`CardId::DETACHED`].
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Current flags.
    pub fn flags(&self) -> CardFlags {
        self.flags
    }

    /// Whether the card was part of a loaded deck rather than inserted later.
    pub fn is_original(&self) -> bool {
        self.flags.contains(CardFlags::ORIGINAL)
    }

    /// Whether the owner lets this card receive input.
    ///
    /// A stack also gates input at the container level; see
    /// [`CardStack::is_interactive`](crate::CardStack::is_interactive).
    pub fn is_interactive(&self) -> bool {
        self.flags.contains(CardFlags::INTERACTIVE)
    }

    /// Whether drag input is accepted right now.
    pub fn is_drag_enabled(&self) -> bool {
        self.flags
            .contains(CardFlags::GESTURES | CardFlags::DRAG_ENABLED)
    }

    /// Whether the card is placed in its stack.
    pub fn is_displayed(&self) -> bool {
        self.flags.contains(CardFlags::DISPLAYED)
    }

    /// Shadow state.
    pub fn elevation(&self) -> Elevation {
        self.elevation
    }

    /// Opacity in `0..=1`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Stacking order; higher is drawn on top.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Host-space center.
    pub fn center(&self) -> Point {
        self.item.center
    }

    /// Rotation in radians.
    pub fn angle(&self) -> f64 {
        self.item.angle
    }

    /// Untransformed size.
    pub fn size(&self) -> Size {
        self.item.size
    }

    /// Map from card-local space (origin top-left) to host space.
    pub fn transform(&self) -> Affine {
        self.item.transform()
    }

    /// Host-space bounding box of the rotated card.
    pub fn frame(&self) -> Rect {
        rotated_bounds(self.item.center, self.item.size, self.item.angle)
    }

    /// Current physical motion.
    pub fn motion(&self) -> CardMotion {
        match self.motion {
            Motion::Idle => CardMotion::Idle,
            Motion::Attached { .. } => CardMotion::Attached,
            Motion::Snapping { .. } => CardMotion::Snapping,
            Motion::Flinging { .. } => CardMotion::Flinging,
        }
    }

    /// Where drags snap back to; recorded when the first drag begins.
    pub fn initial_center(&self) -> Option<Point> {
        self.initial_center
    }

    /// Card frame recorded when the last drag began.
    pub fn original_frame(&self) -> Option<Rect> {
        self.original_frame
    }

    /// Latest spin estimate while attached, in radians per second.
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Install tap and drag recognition and report readiness.
    ///
    /// Call once the card is at its final resting place; drag offsets are
    /// measured from where the card is when a drag begins.
    pub fn finish_setup(&mut self, delegate: &mut impl CardDelegate) {
        self.flags
            .insert(CardFlags::GESTURES | CardFlags::DRAG_ENABLED);
        delegate.card_is_ready(self.id);
    }

    /// Spring toward `target`, disabling drag until it arrives.
    ///
    /// On arrival the snap is removed, drag is re-enabled, the card comes back
    /// to rest, and `on_settled` (if any) is reported through
    /// [`CardDelegate::card_did_settle`]. Calling this while already snapping
    /// retargets the running snap.
    pub fn add_snap_behavior(
        &mut self,
        target: Point,
        on_settled: Option<SettleToken>,
        lender: &mut impl PhysicsLender<CardId>,
    ) {
        self.snap_to(target, on_settled, false, lender);
    }

    /// Release every behavior and gravity membership. Safe to call when none are bound.
    pub fn check_and_remove_behaviors(&mut self, lender: &mut impl PhysicsLender<CardId>) {
        match self.motion {
            Motion::Idle => {}
            Motion::Attached { behavior }
            | Motion::Snapping { behavior, .. }
            | Motion::Flinging { behavior } => {
                if !lender.remove_behavior(behavior) {
                    tracing::trace!(card = ?self.id, "behavior already released");
                }
            }
        }
        lender.remove_gravity(self.id);
        self.motion = Motion::Idle;
        self.item.halt();
    }

    /// Drive the drag state machine with one pan sample.
    ///
    /// A pan that begins while drag is disabled, or that `delegate` refuses,
    /// is ignored until the next [`PanPhase::Began`].
    pub fn handle_pan(
        &mut self,
        gesture: &PanGesture,
        ctx: &HostContext,
        lender: &mut impl PhysicsLender<CardId>,
        delegate: &mut impl CardDelegate,
    ) {
        match gesture.phase {
            PanPhase::Began => self.begin_drag(gesture.location, ctx, lender, delegate),
            PanPhase::Changed => {
                if let Motion::Attached { behavior } = self.motion
                    && let Some(a) = lender
                        .behavior_mut(behavior)
                        .and_then(Behavior::as_attachment_mut)
                {
                    a.anchor = gesture.location;
                }
            }
            PanPhase::Ended => self.end_drag(gesture.velocity, ctx, lender),
            PanPhase::Cancelled => self.end_drag(Vec2::ZERO, ctx, lender),
        }
    }

    /// Report a tap if gestures are installed.
    pub fn handle_tap(&mut self, delegate: &mut impl CardDelegate) {
        if self.flags.contains(CardFlags::GESTURES) {
            delegate.card_was_tapped(self.id, true);
        }
    }

    /// Evaluate the per-step predicates after the simulation advanced.
    ///
    /// `ctx` is `None` when the card has no host geometry (it is not displayed);
    /// the card then drops out of the simulation.
    pub fn physics_step(
        &mut self,
        ctx: Option<&HostContext>,
        lender: &mut impl PhysicsLender<CardId>,
        delegate: &mut impl CardDelegate,
    ) {
        let Some(ctx) = ctx else {
            if self.motion != Motion::Idle {
                tracing::trace!(card = ?self.id, "no host geometry, leaving the simulation");
                self.check_and_remove_behaviors(lender);
            }
            return;
        };
        match self.motion {
            Motion::Idle => {}
            Motion::Attached { .. } => {
                if ctx.now > self.last_time {
                    // Rotation since the last sample, wrapped to (-pi, pi].
                    let turned = angle_of(self.transform() * Affine::rotate(-self.last_angle));
                    self.angular_velocity = turned / (ctx.now - self.last_time);
                    self.last_time = ctx.now;
                    self.last_angle = self.item.angle;
                }
            }
            Motion::Snapping {
                behavior,
                target,
                token,
                after_drag,
            } => {
                if !is_settled(self.item.center, target, ctx.settle_tolerance) {
                    return;
                }
                lender.remove_behavior(behavior);
                self.motion = Motion::Idle;
                self.item.halt();
                self.flags.insert(CardFlags::DRAG_ENABLED);
                self.elevation = Elevation::Resting;
                tracing::trace!(card = ?self.id, "snap settled");
                if let Some(token) = token {
                    delegate.card_did_settle(self.id, token);
                }
                if after_drag {
                    delegate.drag_ended_on_card(self.id);
                }
            }
            Motion::Flinging { .. } => {
                if !rects_intersect(self.frame(), ctx.viewport) {
                    self.check_and_remove_behaviors(lender);
                    tracing::trace!(card = ?self.id, "left the viewport");
                    delegate.card_was_swiped(self.id);
                }
            }
        }
    }

    /// Unbind from the simulation and detach gesture recognition.
    pub fn release(&mut self, lender: &mut impl PhysicsLender<CardId>) {
        self.check_and_remove_behaviors(lender);
        self.flags
            .remove(CardFlags::GESTURES | CardFlags::DRAG_ENABLED | CardFlags::INTERACTIVE);
        self.elevation = Elevation::Resting;
    }

    fn begin_drag(
        &mut self,
        location: Point,
        ctx: &HostContext,
        lender: &mut impl PhysicsLender<CardId>,
        delegate: &mut impl CardDelegate,
    ) {
        if !self.is_drag_enabled() || !delegate.should_drag_card(self.id) {
            tracing::trace!(card = ?self.id, "drag refused");
            return;
        }
        self.original_frame = Some(self.frame());
        delegate.card_will_begin_drag(self.id);
        self.elevation = Elevation::Lifted;
        self.initial_center.get_or_insert(ctx.stack_center);
        self.check_and_remove_behaviors(lender);

        let offset = rotate(location - self.item.center, -self.item.angle);
        let behavior = lender.add_behavior(Attachment::new(self.id, offset, location).into());
        self.motion = Motion::Attached { behavior };
        self.last_time = ctx.now;
        self.last_angle = self.item.angle;
        self.angular_velocity = 0.0;
        tracing::trace!(card = ?self.id, ?offset, "drag began");
    }

    fn end_drag(
        &mut self,
        velocity: Vec2,
        ctx: &HostContext,
        lender: &mut impl PhysicsLender<CardId>,
    ) {
        let Motion::Attached { behavior } = self.motion else {
            return;
        };
        lender.remove_behavior(behavior);
        self.motion = Motion::Idle;

        if speed(velocity) < ctx.fling_threshold {
            let home = self.initial_center.unwrap_or(ctx.stack_center);
            tracing::trace!(card = ?self.id, "released slowly, snapping back");
            self.snap_to(home, None, true, lender);
            return;
        }

        self.flags.remove(CardFlags::DRAG_ENABLED);
        self.item.halt();
        let mut fling = DynamicItem::new(self.id);
        fling.add_linear_velocity(velocity);
        fling.add_angular_velocity(self.angular_velocity);
        let behavior = lender.add_behavior(fling.into());
        lender.add_gravity(self.id);
        self.motion = Motion::Flinging { behavior };
        tracing::trace!(card = ?self.id, ?velocity, "flung");
    }

    fn snap_to(
        &mut self,
        target: Point,
        token: Option<SettleToken>,
        after_drag: bool,
        lender: &mut impl PhysicsLender<CardId>,
    ) {
        if let Motion::Snapping {
            behavior,
            after_drag: was_after_drag,
            ..
        } = self.motion
            && let Some(snap) = lender.behavior_mut(behavior).and_then(Behavior::as_snap_mut)
        {
            snap.target = target;
            self.motion = Motion::Snapping {
                behavior,
                target,
                token,
                after_drag: after_drag || was_after_drag,
            };
            return;
        }
        self.check_and_remove_behaviors(lender);
        self.flags.remove(CardFlags::DRAG_ENABLED);
        let behavior = lender.add_behavior(Snap::new(self.id, target).into());
        self.motion = Motion::Snapping {
            behavior,
            target,
            token,
            after_drag,
        };
    }

    pub(crate) fn adopt(&mut self, id: CardId, original: bool) {
        self.id = id;
        self.flags.set(CardFlags::ORIGINAL, original);
    }

    /// Put the card at rest at `center`, upright and sized like the stack.
    pub(crate) fn place(&mut self, center: Point, size: Size, z_index: i32) {
        self.item = ItemState::new(center, size);
        self.z_index = z_index;
        self.flags.insert(CardFlags::DISPLAYED);
    }

    pub(crate) fn set_flag(&mut self, flag: CardFlags, value: bool) {
        self.flags.set(flag, value);
    }

    pub(crate) fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    /// Follow a stack frame change while at rest.
    pub(crate) fn relayout(&mut self, center: Point, size: Size) {
        if self.motion == Motion::Idle {
            self.item.center = center;
        }
        self.item.size = size;
        if self.initial_center.is_some() {
            self.initial_center = Some(center);
        }
    }

    pub(crate) fn item_mut(&mut self) -> &mut ItemState {
        &mut self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::StackPhysics;
    use alloc::vec::Vec;
    use swipestack_dynamics::AnimatorConfig;

    #[derive(Debug, PartialEq)]
    enum Event {
        Swiped,
        Tapped(bool),
        DragEnded,
        WillBeginDrag,
        Ready,
        Settled(SettleToken),
    }

    #[derive(Default)]
    struct Recorder {
        refuse_drag: bool,
        events: Vec<Event>,
    }

    impl CardDelegate for Recorder {
        fn card_was_swiped(&mut self, _card: CardId) {
            self.events.push(Event::Swiped);
        }
        fn card_was_tapped(&mut self, _card: CardId, should_highlight: bool) {
            self.events.push(Event::Tapped(should_highlight));
        }
        fn should_drag_card(&mut self, _card: CardId) -> bool {
            !self.refuse_drag
        }
        fn drag_ended_on_card(&mut self, _card: CardId) {
            self.events.push(Event::DragEnded);
        }
        fn card_will_begin_drag(&mut self, _card: CardId) {
            self.events.push(Event::WillBeginDrag);
        }
        fn card_is_ready(&mut self, _card: CardId) {
            self.events.push(Event::Ready);
        }
        fn card_did_settle(&mut self, _card: CardId, token: SettleToken) {
            self.events.push(Event::Settled(token));
        }
    }

    const CENTER: Point = Point::new(200.0, 300.0);

    fn ctx(now: f64) -> HostContext {
        HostContext {
            now,
            stack_center: CENTER,
            viewport: Rect::new(0.0, 0.0, 400.0, 600.0),
            fling_threshold: 300.0,
            settle_tolerance: 0.5,
        }
    }

    fn ready_card(delegate: &mut Recorder) -> Card<&'static str> {
        let mut card = Card::new("A");
        card.adopt(CardId::new(0, 1), true);
        card.place(CENTER, Size::new(300.0, 400.0), 1);
        card.finish_setup(delegate);
        card
    }

    fn physics() -> StackPhysics {
        StackPhysics::new(AnimatorConfig::new()).unwrap()
    }

    fn release_at(speed_x: f64) -> (Card<&'static str>, StackPhysics) {
        let mut delegate = Recorder::default();
        let mut lender = physics();
        let mut card = ready_card(&mut delegate);
        let grip = Point::new(220.0, 320.0);
        card.handle_pan(&PanGesture::began(grip), &ctx(0.0), &mut lender, &mut delegate);
        card.handle_pan(
            &PanGesture::ended(grip, Vec2::new(speed_x, 0.0)),
            &ctx(0.1),
            &mut lender,
            &mut delegate,
        );
        (card, lender)
    }

    #[test]
    fn finish_setup_installs_gestures() {
        let mut delegate = Recorder::default();
        let card = ready_card(&mut delegate);
        assert!(card.is_drag_enabled());
        assert_eq!(delegate.events, [Event::Ready]);
    }

    #[test]
    fn drag_is_ignored_before_setup() {
        let mut delegate = Recorder::default();
        let mut lender = physics();
        let mut card = Card::new(());
        card.place(CENTER, Size::new(10.0, 10.0), 0);
        card.handle_pan(&PanGesture::began(CENTER), &ctx(0.0), &mut lender, &mut delegate);
        assert_eq!(card.motion(), CardMotion::Idle);
        assert!(delegate.events.is_empty());
    }

    #[test]
    fn refused_drag_changes_nothing() {
        let mut delegate = Recorder::default();
        let mut lender = physics();
        let mut card = ready_card(&mut delegate);
        delegate.refuse_drag = true;
        delegate.events.clear();
        card.handle_pan(&PanGesture::began(CENTER), &ctx(0.0), &mut lender, &mut delegate);
        assert_eq!(card.motion(), CardMotion::Idle);
        assert_eq!(card.elevation(), Elevation::Resting);
        assert!(card.original_frame().is_none());
        assert!(card.initial_center().is_none());
        assert!(delegate.events.is_empty());
    }

    #[test]
    fn began_pins_card_to_pointer() {
        let mut delegate = Recorder::default();
        let mut lender = physics();
        let mut card = ready_card(&mut delegate);
        card.handle_pan(
            &PanGesture::began(Point::new(250.0, 350.0)),
            &ctx(0.0),
            &mut lender,
            &mut delegate,
        );
        assert_eq!(card.motion(), CardMotion::Attached);
        assert_eq!(card.elevation(), Elevation::Lifted);
        assert_eq!(card.initial_center(), Some(CENTER));
        assert_eq!(
            card.original_frame(),
            Some(Rect::from_center_size(CENTER, Size::new(300.0, 400.0)))
        );
        assert_eq!(delegate.events, [Event::Ready, Event::WillBeginDrag]);
        assert_eq!(lender.bound_behaviors(), 1);
    }

    #[test]
    fn release_at_299_snaps_back() {
        let (card, lender) = release_at(299.0);
        assert_eq!(card.motion(), CardMotion::Snapping);
        assert!(!card.is_drag_enabled());
        assert!(!lender.gravity_contains(card.id()));
        assert_eq!(lender.bound_behaviors(), 1);
    }

    #[test]
    fn release_at_300_flings() {
        let (card, lender) = release_at(300.0);
        assert_eq!(card.motion(), CardMotion::Flinging);
        assert!(!card.is_drag_enabled());
        assert!(lender.gravity_contains(card.id()));
        assert_eq!(lender.bound_behaviors(), 1);
    }

    #[test]
    fn diagonal_release_uses_scalar_speed() {
        let mut delegate = Recorder::default();
        let mut lender = physics();
        let mut card = ready_card(&mut delegate);
        card.handle_pan(&PanGesture::began(CENTER), &ctx(0.0), &mut lender, &mut delegate);
        card.handle_pan(
            &PanGesture::ended(CENTER, Vec2::new(180.0, 240.0)),
            &ctx(0.1),
            &mut lender,
            &mut delegate,
        );
        assert_eq!(card.motion(), CardMotion::Flinging);
    }

    #[test]
    fn cancelled_drag_snaps_back() {
        let mut delegate = Recorder::default();
        let mut lender = physics();
        let mut card = ready_card(&mut delegate);
        card.handle_pan(&PanGesture::began(CENTER), &ctx(0.0), &mut lender, &mut delegate);
        card.handle_pan(
            &PanGesture::cancelled(CENTER),
            &ctx(0.1),
            &mut lender,
            &mut delegate,
        );
        assert_eq!(card.motion(), CardMotion::Snapping);
    }

    #[test]
    fn settle_tolerance_boundary() {
        let mut delegate = Recorder::default();
        let mut lender = physics();
        let mut card = ready_card(&mut delegate);
        let target = Point::new(100.0, 100.0);
        card.add_snap_behavior(target, Some(SettleToken(7)), &mut lender);

        card.item_mut().center = Point::new(100.50001, 100.0);
        card.physics_step(Some(&ctx(0.0)), &mut lender, &mut delegate);
        assert_eq!(card.motion(), CardMotion::Snapping);
        assert!(!card.is_drag_enabled());

        card.item_mut().center = Point::new(100.5, 100.0);
        card.physics_step(Some(&ctx(0.0)), &mut lender, &mut delegate);
        assert_eq!(card.motion(), CardMotion::Idle);
        assert!(card.is_drag_enabled());
        assert_eq!(lender.bound_behaviors(), 0);
        assert_eq!(delegate.events, [Event::Ready, Event::Settled(SettleToken(7))]);
    }

    #[test]
    fn snap_back_after_drag_reports_drag_ended() {
        let (mut card, mut lender) = release_at(10.0);
        let mut delegate = Recorder::default();
        card.item_mut().center = CENTER;
        card.physics_step(Some(&ctx(0.2)), &mut lender, &mut delegate);
        assert_eq!(delegate.events, [Event::DragEnded]);
        assert_eq!(card.elevation(), Elevation::Resting);
    }

    #[test]
    fn snap_retargets_in_place() {
        let mut delegate = Recorder::default();
        let mut lender = physics();
        let mut card = ready_card(&mut delegate);
        card.add_snap_behavior(Point::new(0.0, 0.0), None, &mut lender);
        card.add_snap_behavior(Point::new(10.0, 0.0), None, &mut lender);
        assert_eq!(lender.bound_behaviors(), 1);
        card.item_mut().center = Point::new(10.0, 0.0);
        card.physics_step(Some(&ctx(0.0)), &mut lender, &mut delegate);
        assert_eq!(card.motion(), CardMotion::Idle);
    }

    #[test]
    fn fling_reports_swipe_once_outside_viewport() {
        let (mut card, mut lender) = release_at(2000.0);
        let mut delegate = Recorder::default();
        card.physics_step(Some(&ctx(0.2)), &mut lender, &mut delegate);
        assert!(delegate.events.is_empty());

        card.item_mut().center = Point::new(1000.0, 300.0);
        card.physics_step(Some(&ctx(0.3)), &mut lender, &mut delegate);
        assert_eq!(delegate.events, [Event::Swiped]);
        assert_eq!(card.motion(), CardMotion::Idle);
        assert_eq!(lender.bound_behaviors(), 0);
        assert!(!lender.gravity_contains(card.id()));

        card.physics_step(Some(&ctx(0.4)), &mut lender, &mut delegate);
        assert_eq!(delegate.events.len(), 1);
    }

    #[test]
    fn missing_geometry_leaves_simulation() {
        let (mut card, mut lender) = release_at(2000.0);
        let mut delegate = Recorder::default();
        card.physics_step(None, &mut lender, &mut delegate);
        assert_eq!(card.motion(), CardMotion::Idle);
        assert_eq!(lender.bound_behaviors(), 0);
        assert!(delegate.events.is_empty());
    }

    #[test]
    fn attached_step_estimates_spin() {
        let mut delegate = Recorder::default();
        let mut lender = physics();
        let mut card = ready_card(&mut delegate);
        card.handle_pan(&PanGesture::began(CENTER), &ctx(1.0), &mut lender, &mut delegate);
        card.item_mut().angle = 0.2;
        card.physics_step(Some(&ctx(1.5)), &mut lender, &mut delegate);
        assert!((card.angular_velocity() - 0.4).abs() < 1e-12);
        card.physics_step(Some(&ctx(1.5)), &mut lender, &mut delegate);
        assert!((card.angular_velocity() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn spin_estimate_uses_the_shortest_turn() {
        let mut delegate = Recorder::default();
        let mut lender = physics();
        let mut card = ready_card(&mut delegate);
        card.handle_pan(&PanGesture::began(CENTER), &ctx(1.0), &mut lender, &mut delegate);
        card.item_mut().angle = core::f64::consts::TAU - 0.1;
        card.physics_step(Some(&ctx(1.5)), &mut lender, &mut delegate);
        assert!((card.angular_velocity() + 0.2).abs() < 1e-9);
    }

    #[test]
    fn tap_needs_gestures() {
        let mut delegate = Recorder::default();
        let mut card = Card::new(1_u8);
        card.handle_tap(&mut delegate);
        assert!(delegate.events.is_empty());
        card.finish_setup(&mut delegate);
        card.handle_tap(&mut delegate);
        assert_eq!(delegate.events, [Event::Ready, Event::Tapped(true)]);
    }

    #[test]
    fn release_detaches_everything() {
        let (mut card, mut lender) = release_at(2000.0);
        card.release(&mut lender);
        assert_eq!(lender.bound_behaviors(), 0);
        assert!(!card.is_drag_enabled());
        assert!(!card.flags().contains(CardFlags::GESTURES));
    }
}
