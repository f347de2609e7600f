// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior registry and stepping.

use alloc::vec::Vec;

use crate::behavior::{Attachment, Behavior};
use crate::config::AnimatorConfig;
use crate::error::ConfigError;
use crate::types::{BehaviorId, ItemLookup, ItemState, rotate};

/// Upper bound on sub-steps in one [`Animator::step`], so a stalled host
/// clock cannot turn one frame into an unbounded loop.
pub const MAX_SUBSTEPS: usize = 240;

/// Fastest spin an attachment can impart, in radians per second.
const MAX_ATTACHED_SPIN: f64 = 4.0 * core::f64::consts::PI;

#[derive(Clone, Debug)]
struct Slot<K> {
    generation: u32,
    behavior: Behavior<K>,
}

/// Runs behaviors against items borrowed through an [`ItemLookup`].
///
/// ## Usage
///
/// - Register behaviors with [`Animator::add_behavior`]; keep the returned
///   [`BehaviorId`] to update or remove them.
/// - Call [`Animator::step`] once per frame with the elapsed time and the item store.
///
/// Each step is split into sub-steps no longer than
/// [`AnimatorConfig::max_substep`]. Within a sub-step, gravity, snap and
/// dynamic-item behaviors update velocities, free items are integrated, and
/// then attachments are solved, so an attached item always ends a sub-step
/// with its grip on the anchor.
pub struct Animator<K> {
    slots: Vec<Option<Slot<K>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    config: AnimatorConfig,
    elapsed: f64,
}

impl<K> core::fmt::Debug for Animator<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Animator")
            .field("behaviors", &self.len())
            .field("free_list", &self.free_list.len())
            .field("elapsed", &self.elapsed)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<K> Animator<K> {
    /// Number of registered behaviors.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// True if no behaviors are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Copy + Eq> Default for Animator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq> Animator<K> {
    /// Create an empty animator with the default configuration.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            config: AnimatorConfig::new(),
            elapsed: 0.0,
        }
    }

    /// Create an empty animator after validating `config`.
    pub fn with_config(config: AnimatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Total simulated time, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Register a behavior.
    pub fn add_behavior(&mut self, behavior: impl Into<Behavior<K>>) -> BehaviorId {
        let behavior = behavior.into();
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot {
                generation,
                behavior,
            });
            BehaviorId::new(idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot {
                generation,
                behavior,
            }));
            self.generations.push(generation);
            BehaviorId::new(self.slots.len() - 1, generation)
        }
    }

    /// Unregister a behavior, returning it. Stale handles return `None`.
    pub fn remove_behavior(&mut self, id: BehaviorId) -> Option<Behavior<K>> {
        if !self.is_alive(id) {
            return None;
        }
        let slot = self.slots[id.idx()].take()?;
        self.free_list.push(id.idx());
        Some(slot.behavior)
    }

    /// Returns true if `id` refers to a registered behavior.
    pub fn is_alive(&self, id: BehaviorId) -> bool {
        self.slots
            .get(id.idx())
            .and_then(|s| s.as_ref())
            .is_some_and(|s| s.generation == id.generation())
    }

    /// Access a registered behavior.
    pub fn behavior(&self, id: BehaviorId) -> Option<&Behavior<K>> {
        let slot = self.slots.get(id.idx())?.as_ref()?;
        (slot.generation == id.generation()).then_some(&slot.behavior)
    }

    /// Access a registered behavior mutably, e.g. to move an attachment anchor.
    pub fn behavior_mut(&mut self, id: BehaviorId) -> Option<&mut Behavior<K>> {
        let slot = self.slots.get_mut(id.idx())?.as_mut()?;
        if slot.generation != id.generation() {
            return None;
        }
        Some(&mut slot.behavior)
    }

    /// Iterate registered behaviors in slot order.
    pub fn behaviors(&self) -> impl Iterator<Item = (BehaviorId, &Behavior<K>)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.as_ref()
                .map(|s| (BehaviorId::new(i, s.generation), &s.behavior))
        })
    }

    /// Advance the simulation by `dt` seconds. Returns the number of sub-steps run.
    ///
    /// Non-positive or non-finite `dt` is ignored. At most [`MAX_SUBSTEPS`]
    /// sub-steps of [`AnimatorConfig::max_substep`] are simulated; time beyond
    /// that is dropped, so a sub-step never exceeds `max_substep`.
    pub fn step(&mut self, dt: f64, items: &mut impl ItemLookup<K>) -> usize {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        if self.is_empty() {
            return 0;
        }
        let simulated = dt.min(max_step_time(self.config.max_substep));
        if simulated < dt {
            tracing::debug!(dt, simulated, "long frame, dropping simulated time");
        }
        let substeps = substep_count(simulated, self.config.max_substep);
        #[allow(
            clippy::cast_precision_loss,
            reason = "Sub-step counts are bounded by MAX_SUBSTEPS."
        )]
        let h = simulated / substeps as f64;
        for _ in 0..substeps {
            self.substep(h, items);
        }
        substeps
    }

    fn substep(&mut self, h: f64, items: &mut impl ItemLookup<K>) {
        let config = self.config;
        let stiffness = config.snap_frequency * config.snap_frequency;
        let damping = 2.0 * config.snap_damping_ratio * config.snap_frequency;

        let mut free: Vec<K> = Vec::new();
        let mut attachments: Vec<Attachment<K>> = Vec::new();

        for slot in self.slots.iter_mut().flatten() {
            match &mut slot.behavior {
                Behavior::Gravity(g) => {
                    let dv = g.acceleration() * h;
                    for &k in g.items() {
                        if let Some(item) = items.item_mut(&k) {
                            item.linear_velocity += dv;
                            push_unique(&mut free, k);
                        }
                    }
                }
                Behavior::Dynamic(d) => {
                    let (linear, angular) = d.take_pending();
                    let Some(item) = items.item_mut(&d.item) else {
                        tracing::trace!("dynamic behavior refers to a missing item");
                        continue;
                    };
                    item.linear_velocity += linear;
                    item.angular_velocity += angular;
                    item.linear_velocity = item.linear_velocity / (1.0 + d.resistance * h);
                    item.angular_velocity /= 1.0 + d.angular_resistance * h;
                    push_unique(&mut free, d.item);
                }
                Behavior::Snap(s) => {
                    let Some(item) = items.item_mut(&s.item) else {
                        tracing::trace!("snap behavior refers to a missing item");
                        continue;
                    };
                    let accel = (s.target - item.center) * stiffness - item.linear_velocity * damping;
                    item.linear_velocity += accel * h;
                    let spin = -item.angle * stiffness - item.angular_velocity * damping;
                    item.angular_velocity += spin * h;
                    push_unique(&mut free, s.item);
                }
                Behavior::Attachment(a) => attachments.push(a.clone()),
            }
        }

        for k in free {
            if attachments.iter().any(|a| a.item == k) {
                continue;
            }
            if let Some(item) = items.item_mut(&k) {
                item.center += item.linear_velocity * h;
                item.angle += item.angular_velocity * h;
            }
        }

        for a in &attachments {
            if let Some(item) = items.item_mut(&a.item) {
                solve_attachment(item, a, h, &config);
            }
        }
    }
}

/// Keep the grip on the anchor; an off-center pull twists the item.
fn solve_attachment<K>(item: &mut ItemState, a: &Attachment<K>, h: f64, config: &AnimatorConfig) {
    let lever = rotate(a.offset, item.angle);
    let pull = a.anchor - (item.center + lever);
    let torque = lever.cross(pull);
    let spin = (item.angular_velocity + torque * config.attachment_torque * h)
        / (1.0 + config.angular_damping * h);
    item.angular_velocity = spin.clamp(-MAX_ATTACHED_SPIN, MAX_ATTACHED_SPIN);
    item.angle += item.angular_velocity * h;

    let center = a.anchor - rotate(a.offset, item.angle);
    item.linear_velocity = (center - item.center) / h;
    item.center = center;
}

/// Longest stretch of time one step simulates.
fn max_step_time(max_substep: f64) -> f64 {
    #[allow(clippy::cast_precision_loss, reason = "MAX_SUBSTEPS is small.")]
    let n = MAX_SUBSTEPS as f64;
    n * max_substep
}

fn substep_count(dt: f64, max_substep: f64) -> usize {
    let ratio = dt / max_substep;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "Ratio is positive and bounded by MAX_SUBSTEPS."
    )]
    let n = ratio.min(MAX_SUBSTEPS as f64) as usize;
    #[allow(clippy::cast_precision_loss, reason = "Bounded by MAX_SUBSTEPS.")]
    let whole = n as f64;
    let n = if whole < ratio { n + 1 } else { n };
    n.clamp(1, MAX_SUBSTEPS)
}

fn push_unique<K: Eq>(out: &mut Vec<K>, k: K) {
    if !out.contains(&k) {
        out.push(k);
    }
}
