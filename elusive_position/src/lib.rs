// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=elusive_position --heading-base-level=0

//! Elusive Position: the position grid and offset model for pointer-evading elements.
//!
//! An evasive element always occupies one of nine named slots: the neutral
//! [`Position::Center`] or one of eight directional offsets around it. This
//! crate owns the pure parts of that model:
//!
//! - [`Position`] and [`PositionSet`]: the closed set of slots and subsets of it.
//! - [`Length`], [`MoveDistance`] and [`Offset`]: how far a slot sits from center,
//!   expressed in CSS-style units and resolvable to pixels with Kurbo.
//! - [`choose_next`]: uniform random selection of the next slot, never the current one.
//!
//! ## Minimal example
//!
//! ```rust
//! use elusive_position::{choose_next, MoveDistance, Position, PositionSet};
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let allowed = PositionSet::LEFT | PositionSet::RIGHT;
//!
//! let next = choose_next(Position::Left, allowed, &mut rng);
//! assert_eq!(next, Some(Position::Right));
//!
//! let offset = MoveDistance::default().offset(Position::TopLeft);
//! assert_eq!(offset.to_string(), "translateX(-120%) translateY(-120%)");
//! ```
//!
//! Nothing here performs layout. Percentages resolve against the element's own
//! size, matching how CSS translations behave; see [`Offset::resolve`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod length;
mod position;

pub use length::{Length, MoveDistance, Offset, ParseLengthError};
pub use position::{ParsePositionError, Position, PositionSet, candidates, choose_next};
