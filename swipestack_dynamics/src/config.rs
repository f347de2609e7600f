// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning for the [`Animator`](crate::Animator).

use crate::error::ConfigError;

/// Animator tuning.
///
/// The defaults give a fling that falls off-stage within a second and a snap
/// that settles without overshoot.
///
/// ```
/// use swipestack_dynamics::AnimatorConfig;
///
/// let config = AnimatorConfig::new()
///     .with_gravity_magnitude(2.0)
///     .with_snap_frequency(10.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatorConfig {
    /// Gravity strength in units of 1000 coordinate units per second squared. Default: 3.
    pub gravity_magnitude: f64,
    /// Longest simulated sub-step in seconds. Default: 1/120.
    pub max_substep: f64,
    /// Natural frequency of the snap spring in radians per second. Default: 12.
    pub snap_frequency: f64,
    /// Damping ratio of the snap spring; 1 is critical. Default: 1.
    pub snap_damping_ratio: f64,
    /// How strongly an off-center grip twists an attached item. Default: 0.002.
    pub attachment_torque: f64,
    /// Angular velocity decay rate of an attached item, per second. Default: 6.
    pub angular_damping: f64,
}

impl AnimatorConfig {
    /// Create a config with default values.
    pub const fn new() -> Self {
        Self {
            gravity_magnitude: 3.0,
            max_substep: 1.0 / 120.0,
            snap_frequency: 12.0,
            snap_damping_ratio: 1.0,
            attachment_torque: 0.002,
            angular_damping: 6.0,
        }
    }

    /// Set the gravity magnitude.
    pub fn with_gravity_magnitude(mut self, magnitude: f64) -> Self {
        self.gravity_magnitude = magnitude;
        self
    }

    /// Set the longest sub-step.
    pub fn with_max_substep(mut self, seconds: f64) -> Self {
        self.max_substep = seconds;
        self
    }

    /// Set the snap spring frequency.
    pub fn with_snap_frequency(mut self, frequency: f64) -> Self {
        self.snap_frequency = frequency;
        self
    }

    /// Set the snap spring damping ratio.
    pub fn with_snap_damping_ratio(mut self, ratio: f64) -> Self {
        self.snap_damping_ratio = ratio;
        self
    }

    /// Set the attachment torque factor.
    pub fn with_attachment_torque(mut self, torque: f64) -> Self {
        self.attachment_torque = torque;
        self
    }

    /// Set the attached angular damping.
    pub fn with_angular_damping(mut self, damping: f64) -> Self {
        self.angular_damping = damping;
        self
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_non_negative("gravity_magnitude", self.gravity_magnitude)?;
        ConfigError::check_positive("max_substep", self.max_substep)?;
        ConfigError::check_positive("snap_frequency", self.snap_frequency)?;
        ConfigError::check_positive("snap_damping_ratio", self.snap_damping_ratio)?;
        ConfigError::check_non_negative("attachment_torque", self.attachment_torque)?;
        ConfigError::check_non_negative("angular_damping", self.angular_damping)?;
        Ok(())
    }
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(AnimatorConfig::default(), AnimatorConfig::new());
        assert!(AnimatorConfig::new().validate().is_ok());
    }

    #[test]
    fn zero_substep_is_rejected() {
        let err = AnimatorConfig::new()
            .with_max_substep(0.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotPositive {
                field: "max_substep",
                value: 0.0
            }
        );
    }

    #[test]
    fn weightless_is_allowed() {
        let config = AnimatorConfig::new().with_gravity_magnitude(0.0);
        assert!(config.validate().is_ok());
        let config = AnimatorConfig::new().with_gravity_magnitude(-1.0);
        assert!(config.validate().is_err());
    }
}
