// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-activation configuration.

use alloc::rc::Rc;
use core::fmt;

use elusive_position::{MoveDistance, PositionSet};

/// Callback invoked once per accepted evasive move.
pub type MoveCallback = Rc<dyn Fn()>;

/// Configuration of one activation.
///
/// Durations are milliseconds on the host's clock. Build one with the
/// consuming setters:
///
/// ```rust
/// use elusive::Config;
/// use elusive_position::{Position, PositionSet};
///
/// let config = Config::new()
///     .allowed_positions(PositionSet::LEFT | PositionSet::RIGHT)
///     .return_delay(500)
///     .max_trails(Some(3));
/// assert_eq!(config.animation_speed, 100);
/// assert!(config.allowed_positions.has(Position::Left));
/// ```
///
/// With the `serde` feature the non-callback fields load from any serde
/// format; missing fields take their defaults.
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Config {
    /// Master switch. While off the element ignores the pointer and keeps its position.
    pub enabled: bool,
    /// Offset magnitudes for the eight outer positions.
    pub move_distance: MoveDistance,
    /// Positions an evasive move may pick from.
    pub allowed_positions: PositionSet,
    /// Duration of a position transition.
    pub animation_speed: u64,
    /// Lifetime of a trail.
    pub trail_duration: u64,
    /// Delay between the pointer leaving and the return to center.
    pub return_delay: u64,
    /// Bound on simultaneously live trails; `None` is unbounded, `Some(0)` disables trails.
    pub max_trails: Option<usize>,
    /// Called once per evasive move (not for returns to center).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_move: Option<MoveCallback>,
    /// Delay before a settled element that is still under the pointer moves again.
    pub retrigger_delay: u64,
    /// Seed for position choice; `None` derives one from the instance id.
    pub seed: Option<u64>,
}

impl Config {
    /// Default transition duration.
    pub const DEFAULT_ANIMATION_SPEED: u64 = 100;
    /// Default trail lifetime.
    pub const DEFAULT_TRAIL_DURATION: u64 = 500;
    /// Default delay before returning to center.
    pub const DEFAULT_RETURN_DELAY: u64 = 1000;

    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [`Config::enabled`].
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets [`Config::move_distance`].
    #[must_use]
    pub fn move_distance(mut self, distance: MoveDistance) -> Self {
        self.move_distance = distance;
        self
    }

    /// Sets [`Config::allowed_positions`].
    #[must_use]
    pub fn allowed_positions(mut self, allowed: PositionSet) -> Self {
        self.allowed_positions = allowed;
        self
    }

    /// Sets [`Config::animation_speed`].
    #[must_use]
    pub fn animation_speed(mut self, ms: u64) -> Self {
        self.animation_speed = ms;
        self
    }

    /// Sets [`Config::trail_duration`].
    #[must_use]
    pub fn trail_duration(mut self, ms: u64) -> Self {
        self.trail_duration = ms;
        self
    }

    /// Sets [`Config::return_delay`].
    #[must_use]
    pub fn return_delay(mut self, ms: u64) -> Self {
        self.return_delay = ms;
        self
    }

    /// Sets [`Config::max_trails`].
    #[must_use]
    pub fn max_trails(mut self, max: Option<usize>) -> Self {
        self.max_trails = max;
        self
    }

    /// Sets [`Config::on_move`].
    #[must_use]
    pub fn on_move(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_move = Some(Rc::new(callback));
        self
    }

    /// Sets [`Config::retrigger_delay`].
    #[must_use]
    pub fn retrigger_delay(mut self, ms: u64) -> Self {
        self.retrigger_delay = ms;
        self
    }

    /// Sets [`Config::seed`].
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            move_distance: MoveDistance::default(),
            allowed_positions: PositionSet::NON_CENTER,
            animation_speed: Self::DEFAULT_ANIMATION_SPEED,
            trail_duration: Self::DEFAULT_TRAIL_DURATION,
            return_delay: Self::DEFAULT_RETURN_DELAY,
            max_trails: None,
            on_move: None,
            retrigger_delay: 0,
            seed: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("enabled", &self.enabled)
            .field("move_distance", &self.move_distance)
            .field("allowed_positions", &self.allowed_positions)
            .field("animation_speed", &self.animation_speed)
            .field("trail_duration", &self.trail_duration)
            .field("return_delay", &self.return_delay)
            .field("max_trails", &self.max_trails)
            .field("on_move", &self.on_move.as_ref().map(|_| ".."))
            .field("retrigger_delay", &self.retrigger_delay)
            .field("seed", &self.seed)
            .finish()
    }
}
