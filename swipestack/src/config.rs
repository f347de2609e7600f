// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning for a [`CardStack`](crate::CardStack).

use swipestack_dynamics::AnimatorConfig;

use crate::error::{ConfigError, check_non_negative, check_positive, check_unit};

/// Stack tuning. Times are in seconds, distances in host units.
///
/// ```
/// use swipestack::StackConfig;
///
/// let config = StackConfig::new()
///     .with_fling_threshold(450.0)
///     .with_load_duration(0.3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackConfig {
    /// Release speed at or above which a drag becomes a fling. Default: 300.
    pub fling_threshold: f64,
    /// Distance at or under which a snap counts as arrived. Default: 0.5.
    pub settle_tolerance: f64,
    /// Wait before the load-in animation starts. Default: 0.1.
    pub load_delay: f64,
    /// Length of the load-in animation. Default: 0.5.
    pub load_duration: f64,
    /// Stack scale when the load-in animation starts. Default: 0.1.
    pub load_initial_scale: f64,
    /// Length of the fade-in of an inserted card. Default: 0.5.
    pub fade_in_duration: f64,
    /// How long a tapped card stays selected. Default: 0.2.
    pub selection_timeout: f64,
    /// Animator tuning.
    pub dynamics: AnimatorConfig,
}

impl StackConfig {
    /// Create a config with default values.
    pub const fn new() -> Self {
        Self {
            fling_threshold: 300.0,
            settle_tolerance: 0.5,
            load_delay: 0.1,
            load_duration: 0.5,
            load_initial_scale: 0.1,
            fade_in_duration: 0.5,
            selection_timeout: 0.2,
            dynamics: AnimatorConfig::new(),
        }
    }

    /// Set the fling threshold.
    pub fn with_fling_threshold(mut self, speed: f64) -> Self {
        self.fling_threshold = speed;
        self
    }

    /// Set the settle tolerance.
    pub fn with_settle_tolerance(mut self, distance: f64) -> Self {
        self.settle_tolerance = distance;
        self
    }

    /// Set the load-in delay.
    pub fn with_load_delay(mut self, seconds: f64) -> Self {
        self.load_delay = seconds;
        self
    }

    /// Set the load-in duration.
    pub fn with_load_duration(mut self, seconds: f64) -> Self {
        self.load_duration = seconds;
        self
    }

    /// Set the load-in starting scale.
    pub fn with_load_initial_scale(mut self, scale: f64) -> Self {
        self.load_initial_scale = scale;
        self
    }

    /// Set the inserted-card fade-in duration.
    pub fn with_fade_in_duration(mut self, seconds: f64) -> Self {
        self.fade_in_duration = seconds;
        self
    }

    /// Set the selection timeout.
    pub fn with_selection_timeout(mut self, seconds: f64) -> Self {
        self.selection_timeout = seconds;
        self
    }

    /// Set the animator tuning.
    pub fn with_dynamics(mut self, dynamics: AnimatorConfig) -> Self {
        self.dynamics = dynamics;
        self
    }

    /// Check every field, including the animator tuning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("fling_threshold", self.fling_threshold)?;
        check_positive("settle_tolerance", self.settle_tolerance)?;
        check_non_negative("load_delay", self.load_delay)?;
        check_non_negative("load_duration", self.load_duration)?;
        check_unit("load_initial_scale", self.load_initial_scale)?;
        check_non_negative("fade_in_duration", self.fade_in_duration)?;
        check_positive("selection_timeout", self.selection_timeout)?;
        self.dynamics.validate()?;
        Ok(())
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self::new()
    }
}
