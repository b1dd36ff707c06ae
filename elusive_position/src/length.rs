// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lengths, move distances and per-position offsets.

use core::fmt;
use core::ops::Neg;
use core::str::FromStr;

use kurbo::{Size, Vec2};

use crate::Position;

/// A CSS-style length.
///
/// Percentages are relative to the size of the element being moved along the
/// same axis, which is how `translateX`/`translateY` interpret them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Length {
    /// A fraction of the element's own extent, in percent (`120.0` is `120%`).
    Percent(f64),
    /// An absolute distance in pixels.
    Px(f64),
}

impl Length {
    /// The zero length.
    pub const ZERO: Self = Self::Px(0.0);

    /// Returns `true` if this length is zero in any unit.
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Percent(v) | Self::Px(v) => v == 0.0,
        }
    }

    /// Resolves to pixels, using `basis` as the 100% reference.
    #[must_use]
    pub fn resolve(self, basis: f64) -> f64 {
        match self {
            Self::Percent(v) => v * basis / 100.0,
            Self::Px(v) => v,
        }
    }

    /// Returns this length scaled by a step sign (`-1`, `0` or `1`).
    #[must_use]
    pub fn step(self, sign: i8) -> Self {
        match sign {
            0 => Self::ZERO,
            s if s < 0 => -self,
            _ => self,
        }
    }
}

impl Neg for Length {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Percent(v) => Self::Percent(-v),
            Self::Px(v) => Self::Px(-v),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        match self {
            Self::Percent(v) => write!(f, "{v}%"),
            Self::Px(v) => write!(f, "{v}px"),
        }
    }
}

/// Error returned when a length string cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseLengthError {
    _private: (),
}

impl fmt::Display for ParseLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid length; expected a finite number with an optional `%` or `px` suffix")
    }
}

impl core::error::Error for ParseLengthError {}

impl FromStr for Length {
    type Err = ParseLengthError;

    /// Parses `"120%"`, `"40px"` or a bare number (pixels).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (number, make): (&str, fn(f64) -> Self) = if let Some(n) = s.strip_suffix('%') {
            (n, Self::Percent)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, Self::Px)
        } else {
            (s, Self::Px)
        };
        match number.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(make(v)),
            _ => Err(ParseLengthError { _private: () }),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Length {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Length {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = alloc::string::String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Offset magnitudes applied on each axis when an element leaves center.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MoveDistance {
    /// Horizontal magnitude.
    pub x: Length,
    /// Vertical magnitude.
    pub y: Length,
}

impl MoveDistance {
    /// The default magnitude on both axes: `120%`.
    pub const DEFAULT_LENGTH: Length = Length::Percent(120.0);

    /// Creates a distance from per-axis magnitudes.
    #[must_use]
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    /// Returns the offset of `position` from center.
    ///
    /// `Left` is `(-x, 0)`, `Bottom` is `(0, y)`, diagonals combine both axes
    /// and `Center` is `(0, 0)`.
    #[must_use]
    pub fn offset(&self, position: Position) -> Offset {
        Offset {
            x: self.x.step(position.horizontal()),
            y: self.y.step(position.vertical()),
        }
    }
}

impl Default for MoveDistance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LENGTH, Self::DEFAULT_LENGTH)
    }
}

/// A signed displacement from center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Offset {
    /// Horizontal displacement.
    pub x: Length,
    /// Vertical displacement.
    pub y: Length,
}

impl Offset {
    /// No displacement.
    pub const ZERO: Self = Self {
        x: Length::ZERO,
        y: Length::ZERO,
    };

    /// Resolves to a pixel vector for an element of the given size.
    #[must_use]
    pub fn resolve(&self, size: Size) -> Vec2 {
        Vec2::new(self.x.resolve(size.width), self.y.resolve(size.height))
    }
}

impl fmt::Display for Offset {
    /// Formats as a CSS transform value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translateX({}) translateY({})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn parses_units() {
        assert_eq!("120%".parse(), Ok(Length::Percent(120.0)));
        assert_eq!("40px".parse(), Ok(Length::Px(40.0)));
        assert_eq!(" 12.5 ".parse(), Ok(Length::Px(12.5)));
        assert!("".parse::<Length>().is_err());
        assert!("wide".parse::<Length>().is_err());
        assert!("inf%".parse::<Length>().is_err());
    }

    #[test]
    fn display_is_css() {
        assert_eq!(Length::Percent(120.0).to_string(), "120%");
        assert_eq!((-Length::Px(8.0)).to_string(), "-8px");
        assert_eq!(Length::Percent(0.0).to_string(), "0");
    }

    #[test]
    fn offsets_follow_position_signs() {
        let d = MoveDistance::new(Length::Px(10.0), Length::Px(20.0));
        let px = |x: f64, y: f64| Offset {
            x: Length::Px(x),
            y: Length::Px(y),
        };
        assert_eq!(d.offset(Position::Center), Offset::ZERO);
        assert_eq!(d.offset(Position::Left), px(-10.0, 0.0));
        assert_eq!(d.offset(Position::Right), px(10.0, 0.0));
        assert_eq!(d.offset(Position::Top), px(0.0, -20.0));
        assert_eq!(d.offset(Position::Bottom), px(0.0, 20.0));
        assert_eq!(d.offset(Position::BottomLeft), px(-10.0, 20.0));
        assert_eq!(d.offset(Position::TopRight), px(10.0, -20.0));
    }

    #[test]
    fn percent_resolves_against_size() {
        let offset = MoveDistance::default().offset(Position::BottomRight);
        let v = offset.resolve(Size::new(100.0, 40.0));
        assert_eq!(v, Vec2::new(120.0, 48.0));
    }
}
