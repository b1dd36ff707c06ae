// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instance ids and the attribute/class vocabulary shared with hosts.

use alloc::string::String;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use elusive_position::Position;

/// Attribute carrying the owning activation's id on managed elements and trails.
pub const ID_ATTRIBUTE: &str = "data-elusive-id";

/// Attribute carrying the current [`Position`] name on a managed element.
pub const POSITION_ATTRIBUTE: &str = "data-position";

/// Prefix of the per-position classes (`elusive-left`, `elusive-top-right`, …).
pub const CLASS_PREFIX: &str = "elusive-";

/// Class carried by every trail node.
pub const TRAIL_CLASS: &str = "elusive-trail";

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Unique id of one activation.
///
/// Ids come from a process-wide counter and are never reused within a
/// process, so selectors scoped by an id cannot collide with another
/// activation's, including one mounted later on the same element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Allocates a fresh id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Attribute selector matching nodes tagged with this id.
    #[must_use]
    pub fn selector(self) -> String {
        alloc::format!("[{ID_ATTRIBUTE}=\"{self}\"]")
    }

    /// Name of the trail fade-out keyframes for this id.
    #[must_use]
    pub fn fade_animation(self) -> String {
        alloc::format!("{self}-trail-fade")
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elusive-{}", self.0)
    }
}

/// Class name applied to a managed element sitting at `position`.
#[must_use]
pub fn position_class(position: Position) -> String {
    alloc::format!("{CLASS_PREFIX}{}", position.name())
}

/// Custom properties a trail node sets inline for the fade-out keyframes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrailVar {
    /// Horizontal departure offset.
    FromX,
    /// Vertical departure offset.
    FromY,
    /// Horizontal arrival offset.
    ToX,
    /// Vertical arrival offset.
    ToY,
    /// Horizontal scale at the end of the fade.
    ScaleX,
    /// Vertical scale at the end of the fade.
    ScaleY,
}

impl TrailVar {
    /// Every trail variable.
    pub const ALL: [Self; 6] = [
        Self::FromX,
        Self::FromY,
        Self::ToX,
        Self::ToY,
        Self::ScaleX,
        Self::ScaleY,
    ];

    /// The custom property name, including the leading `--`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FromX => "--elusive-from-x",
            Self::FromY => "--elusive-from-y",
            Self::ToX => "--elusive-to-x",
            Self::ToY => "--elusive-to-y",
            Self::ScaleX => "--elusive-scale-x",
            Self::ScaleY => "--elusive-scale-y",
        }
    }
}
