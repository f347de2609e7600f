// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stack's shared simulation and its [`PhysicsLender`] implementation.

use swipestack_dynamics::{
    Animator, AnimatorConfig, Behavior, BehaviorId, ConfigError, Gravity, ItemLookup,
};

use crate::delegate::PhysicsLender;
use crate::types::CardId;

/// One animator and one gravity behavior shared by every card of a stack.
#[derive(Debug)]
pub(crate) struct StackPhysics {
    animator: Animator<CardId>,
    gravity: Option<BehaviorId>,
}

impl StackPhysics {
    pub(crate) fn with_defaults() -> Self {
        Self {
            animator: Animator::new(),
            gravity: None,
        }
    }

    pub(crate) fn new(config: AnimatorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            animator: Animator::with_config(config)?,
            gravity: None,
        })
    }

    pub(crate) fn step(&mut self, dt: f64, items: &mut impl ItemLookup<CardId>) -> usize {
        self.animator.step(dt, items)
    }

    /// Behaviors other than the shared gravity.
    #[cfg(test)]
    pub(crate) fn bound_behaviors(&self) -> usize {
        self.animator.len() - usize::from(self.gravity.is_some())
    }

    #[cfg(test)]
    pub(crate) fn gravity_contains(&self, item: CardId) -> bool {
        self.gravity
            .and_then(|id| self.animator.behavior(id))
            .and_then(Behavior::as_gravity)
            .is_some_and(|g| g.contains(item))
    }
}

impl PhysicsLender<CardId> for StackPhysics {
    fn add_behavior(&mut self, behavior: Behavior<CardId>) -> BehaviorId {
        self.animator.add_behavior(behavior)
    }

    fn remove_behavior(&mut self, id: BehaviorId) -> bool {
        if Some(id) == self.gravity {
            return false;
        }
        self.animator.remove_behavior(id).is_some()
    }

    fn behavior_mut(&mut self, id: BehaviorId) -> Option<&mut Behavior<CardId>> {
        self.animator.behavior_mut(id)
    }

    fn add_gravity(&mut self, item: CardId) {
        if !self.gravity.is_some_and(|id| self.animator.is_alive(id)) {
            let magnitude = self.animator.config().gravity_magnitude;
            self.gravity = Some(self.animator.add_behavior(Gravity::new(magnitude)));
        }
        if let Some(g) = self
            .gravity
            .and_then(|id| self.animator.behavior_mut(id))
            .and_then(Behavior::as_gravity_mut)
        {
            g.add_item(item);
        }
    }

    fn remove_gravity(&mut self, item: CardId) {
        if let Some(g) = self
            .gravity
            .and_then(|id| self.animator.behavior_mut(id))
            .and_then(Behavior::as_gravity_mut)
        {
            g.remove_item(item);
        }
    }
}
