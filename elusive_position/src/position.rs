// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The nine-slot position grid.

use core::fmt;
use core::str::FromStr;

use rand::Rng;
use smallvec::SmallVec;

/// One of the nine slots an evasive element can occupy.
///
/// `Center` is the neutral slot; the other eight sit one step away from it
/// along one or both axes. Screen coordinates are assumed, so "top" is the
/// negative y direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Position {
    /// The neutral, untranslated slot.
    #[default]
    Center,
    /// One step left.
    Left,
    /// One step right.
    Right,
    /// One step up.
    Top,
    /// One step down.
    Bottom,
    /// One step up and left.
    TopLeft,
    /// One step up and right.
    TopRight,
    /// One step down and left.
    BottomLeft,
    /// One step down and right.
    BottomRight,
}

impl Position {
    /// All nine positions, center first.
    pub const ALL: [Self; 9] = [
        Self::Center,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// The eight directional positions.
    pub const NON_CENTER: [Self; 8] = [
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Returns the kebab-case name used in attributes and class names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Sign of the horizontal step: `-1` for left, `1` for right, `0` otherwise.
    #[must_use]
    pub const fn horizontal(self) -> i8 {
        match self {
            Self::Left | Self::TopLeft | Self::BottomLeft => -1,
            Self::Right | Self::TopRight | Self::BottomRight => 1,
            Self::Center | Self::Top | Self::Bottom => 0,
        }
    }

    /// Sign of the vertical step: `-1` for top, `1` for bottom, `0` otherwise.
    #[must_use]
    pub const fn vertical(self) -> i8 {
        match self {
            Self::Top | Self::TopLeft | Self::TopRight => -1,
            Self::Bottom | Self::BottomLeft | Self::BottomRight => 1,
            Self::Center | Self::Left | Self::Right => 0,
        }
    }

    /// Returns `(moves_x, moves_y)`: which axes this position displaces.
    #[must_use]
    pub const fn axes(self) -> (bool, bool) {
        (self.horizontal() != 0, self.vertical() != 0)
    }

    /// Returns the single-bit [`PositionSet`] for this position.
    #[must_use]
    pub const fn as_set(self) -> PositionSet {
        match self {
            Self::Center => PositionSet::CENTER,
            Self::Left => PositionSet::LEFT,
            Self::Right => PositionSet::RIGHT,
            Self::Top => PositionSet::TOP,
            Self::Bottom => PositionSet::BOTTOM,
            Self::TopLeft => PositionSet::TOP_LEFT,
            Self::TopRight => PositionSet::TOP_RIGHT,
            Self::BottomLeft => PositionSet::BOTTOM_LEFT,
            Self::BottomRight => PositionSet::BOTTOM_RIGHT,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown position name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePositionError {
    _private: (),
}

impl fmt::Display for ParsePositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            "unknown position name; expected one of center, left, right, top, bottom, top-left, top-right, bottom-left, bottom-right",
        )
    }
}

impl core::error::Error for ParsePositionError {}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or(ParsePositionError { _private: () })
    }
}

bitflags::bitflags! {
    /// A subset of the nine positions.
    ///
    /// The [`Default`] set is every directional position, which is what an
    /// activation may evade to when the caller does not restrict it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PositionSet: u16 {
        /// [`Position::Center`].
        const CENTER       = 1 << 0;
        /// [`Position::Left`].
        const LEFT         = 1 << 1;
        /// [`Position::Right`].
        const RIGHT        = 1 << 2;
        /// [`Position::Top`].
        const TOP          = 1 << 3;
        /// [`Position::Bottom`].
        const BOTTOM       = 1 << 4;
        /// [`Position::TopLeft`].
        const TOP_LEFT     = 1 << 5;
        /// [`Position::TopRight`].
        const TOP_RIGHT    = 1 << 6;
        /// [`Position::BottomLeft`].
        const BOTTOM_LEFT  = 1 << 7;
        /// [`Position::BottomRight`].
        const BOTTOM_RIGHT = 1 << 8;
    }
}

impl PositionSet {
    /// The eight directional positions.
    pub const NON_CENTER: Self = Self::all().difference(Self::CENTER);

    /// Returns `true` if `position` is a member.
    #[must_use]
    pub const fn has(self, position: Position) -> bool {
        self.contains(position.as_set())
    }

    /// Iterates member positions in [`Position::ALL`] order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        Position::ALL.into_iter().filter(move |p| self.has(*p))
    }
}

impl Default for PositionSet {
    fn default() -> Self {
        Self::NON_CENTER
    }
}

impl From<Position> for PositionSet {
    fn from(position: Position) -> Self {
        position.as_set()
    }
}

impl FromIterator<Position> for PositionSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, p| set | p.as_set())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PositionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.positions())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PositionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let positions = <alloc::vec::Vec<Position>>::deserialize(deserializer)?;
        Ok(positions.into_iter().collect())
    }
}

/// Returns the positions in `allowed` other than `current`, in [`Position::ALL`] order.
#[must_use]
pub fn candidates(current: Position, allowed: PositionSet) -> SmallVec<[Position; 9]> {
    allowed.difference(current.as_set()).positions().collect()
}

/// Picks the next position uniformly from `allowed` minus `current`.
///
/// Returns `None` when no candidate remains (for example an empty set, or a
/// set holding only the current position). Callers treat that as "stay put".
pub fn choose_next<R: Rng + ?Sized>(
    current: Position,
    allowed: PositionSet,
    rng: &mut R,
) -> Option<Position> {
    let candidates = candidates(current, allowed);
    if candidates.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..candidates.len());
    candidates.get(idx).copied()
}
