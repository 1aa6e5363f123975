//! Player configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_CYCLE_MS: i64 = 7000;
pub const DEFAULT_MAX_CONSECUTIVE_ERRORS: u32 = 30;
pub const DEFAULT_FRAME_BUDGET_MS: i64 = 250;
pub const DEFAULT_MAX_OPERATIONS: i64 = 5_000_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorConfig {
    /// Length of one progress cycle.
    pub cycle_ms: f64,
    /// The fuse trips when consecutive frame failures exceed this.
    pub max_consecutive_errors: u32,
    /// Wall-clock budget for a single frame invocation.
    pub frame_budget: Duration,
    /// Script operations allowed per frame invocation.
    pub max_operations: u64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            cycle_ms: DEFAULT_CYCLE_MS as f64,
            max_consecutive_errors: DEFAULT_MAX_CONSECUTIVE_ERRORS,
            frame_budget: Duration::from_millis(DEFAULT_FRAME_BUDGET_MS.unsigned_abs()),
            max_operations: DEFAULT_MAX_OPERATIONS.unsigned_abs(),
        }
    }
}

impl AnimatorConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `ANIMATION_CYCLE_MS`: default 7000
    /// - `ANIMATION_MAX_CONSECUTIVE_ERRORS`: default 30
    /// - `ANIMATION_FRAME_BUDGET_MS`: default 250
    /// - `ANIMATION_MAX_OPERATIONS`: default 5 000 000
    ///
    /// Unparseable values fall back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] for a zero or negative cycle,
    /// budget, or operation cap.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup (the environment in production).
    ///
    /// # Errors
    ///
    /// Same as [`AnimatorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cycle = positive("ANIMATION_CYCLE_MS", parse_var(&lookup, "ANIMATION_CYCLE_MS", DEFAULT_CYCLE_MS))?;
        let budget =
            positive("ANIMATION_FRAME_BUDGET_MS", parse_var(&lookup, "ANIMATION_FRAME_BUDGET_MS", DEFAULT_FRAME_BUDGET_MS))?;
        let operations =
            positive("ANIMATION_MAX_OPERATIONS", parse_var(&lookup, "ANIMATION_MAX_OPERATIONS", DEFAULT_MAX_OPERATIONS))?;
        let max_errors = parse_var(&lookup, "ANIMATION_MAX_CONSECUTIVE_ERRORS", DEFAULT_MAX_CONSECUTIVE_ERRORS);

        Ok(Self {
            cycle_ms: cycle as f64,
            max_consecutive_errors: max_errors,
            frame_budget: Duration::from_millis(budget),
            max_operations: operations,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().parse::<T>()) {
        Some(Ok(n)) => n,
        Some(Err(_)) => {
            tracing::warn!(key, "unparseable value, using default");
            default
        }
        None => default,
    }
}

fn positive(var: &'static str, value: i64) -> Result<u64, ConfigError> {
    if value > 0 { Ok(value.unsigned_abs()) } else { Err(ConfigError::NonPositive { var, value }) }
}
