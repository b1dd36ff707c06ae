// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule synthesis for one activation.

use core::fmt;

use elusive_position::{MoveDistance, Offset, Position};

use crate::scope::{CLASS_PREFIX, InstanceId, TRAIL_CLASS, TrailVar};

/// Opacity a trail starts its fade from; the keyframes end at zero.
pub const TRAIL_START_OPACITY: f64 = 0.3;

/// The complete presentation rules for one activation.
///
/// Formatting with [`Display`](fmt::Display) yields CSS text: one transition
/// rule, nine transform rules, a trail base rule and the trail keyframes, all
/// scoped by the instance id.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RuleSet {
    id: InstanceId,
    distance: MoveDistance,
    animation_speed: u64,
    trail_duration: u64,
}

impl RuleSet {
    /// Synthesizes rules for `id`; durations are in milliseconds.
    #[must_use]
    pub fn new(
        id: InstanceId,
        distance: MoveDistance,
        animation_speed: u64,
        trail_duration: u64,
    ) -> Self {
        Self {
            id,
            distance,
            animation_speed,
            trail_duration,
        }
    }

    /// The scope these rules are keyed by.
    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Transition duration for position changes, in milliseconds.
    #[must_use]
    pub fn animation_speed(&self) -> u64 {
        self.animation_speed
    }

    /// Trail fade-out duration, in milliseconds.
    #[must_use]
    pub fn trail_duration(&self) -> u64 {
        self.trail_duration
    }

    /// The transform applied to an element at `position`.
    #[must_use]
    pub fn transform(&self, position: Position) -> Offset {
        self.distance.offset(position)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.id.selector();

        writeln!(f, "{scope} {{")?;
        writeln!(f, "  transition-property: transform !important;")?;
        writeln!(f, "  transition-timing-function: ease-out !important;")?;
        writeln!(f, "  transition-duration: {}ms !important;", self.animation_speed)?;
        writeln!(f, "}}")?;

        for position in Position::ALL {
            writeln!(f, "{scope}.{CLASS_PREFIX}{} {{", position.name())?;
            writeln!(f, "  transform: {} !important;", self.transform(position))?;
            writeln!(f, "}}")?;
        }

        let fade = self.id.fade_animation();
        let [from_x, from_y, to_x, to_y, scale_x, scale_y] = TrailVar::ALL.map(TrailVar::name);
        writeln!(f, "@keyframes {fade} {{")?;
        writeln!(
            f,
            "  0% {{ opacity: {TRAIL_START_OPACITY}; transform: translateX(var({from_x})) translateY(var({from_y})) scale(1, 1); }}"
        )?;
        writeln!(
            f,
            "  100% {{ opacity: 0; transform: translateX(var({to_x})) translateY(var({to_y})) scale(var({scale_x}), var({scale_y})); }}"
        )?;
        writeln!(f, "}}")?;

        writeln!(f, ".{TRAIL_CLASS}{scope} {{")?;
        writeln!(f, "  position: absolute !important;")?;
        writeln!(f, "  pointer-events: none !important;")?;
        writeln!(f, "  transform-origin: center !important;")?;
        writeln!(f, "  z-index: 1 !important;")?;
        writeln!(f, "  opacity: {TRAIL_START_OPACITY};")?;
        writeln!(
            f,
            "  animation: {fade} {}ms ease-out forwards !important;",
            self.trail_duration
        )?;
        writeln!(f, "}}")
    }
}
