// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

/// Rejected [`AnimatorConfig`](crate::AnimatorConfig) value.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The field must be finite and strictly positive.
    #[error("`{field}` must be finite and positive, got {value}")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The field must be finite and zero or greater.
    #[error("`{field}` must be finite and non-negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl ConfigError {
    /// Check that `value` is finite and strictly positive.
    pub fn check_positive(field: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::NotPositive { field, value })
        }
    }

    /// Check that `value` is finite and not negative.
    pub fn check_non_negative(field: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self::Negative { field, value })
        }
    }
}
