// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=elusive --heading-base-level=0

//! Elusive: UI elements that jump away from the pointer.
//!
//! When the pointer enters a managed element, the element moves to another
//! slot of a nine-position grid around its resting place and leaves a fading
//! trail of its previous appearance behind. While the pointer stays on it, it
//! keeps moving; once the pointer leaves, it drifts back to center.
//!
//! The crate is host-agnostic. A [`Host`] supplies element geometry, style
//! and trail nodes, and a home for the scoped presentation rules; the host
//! then feeds pointer and transition signals plus the current time into an
//! [`Activation`]. Nothing here reads a clock, sleeps or spawns.
//!
//! - [`Activation`]: mount, reconfigure and unmount, plus the signal entry points.
//! - [`Mounted`]: an activation sharing its host, torn down when dropped.
//! - [`Config`]: per-activation options with documented defaults.
//! - [`PointerTracker`]: the shared last-known pointer position.
//! - [`headless::Scene`]: a complete in-memory host.
//!
//! The building blocks live in their own crates: [`elusive_position`] for the
//! position grid, [`elusive_style`] for scoped rules, [`elusive_trail`] for
//! trail synthesis and [`elusive_timing`] for the timer queue.
//!
//! ## Minimal example
//!
//! ```rust
//! use elusive::headless::Scene;
//! use elusive::{Activation, Config, PointerTracker};
//! use elusive_position::{Position, PositionSet};
//! use elusive_trail::ElementKind;
//! use kurbo::{Point, Rect};
//!
//! let mut scene = Scene::new();
//! let form = scene.add_container(Rect::new(0.0, 0.0, 400.0, 400.0));
//! let link = scene.add_element(Some(form), Rect::new(150.0, 190.0, 250.0, 210.0));
//!
//! let pointer = PointerTracker::new();
//! let config = Config::new()
//!     .allowed_positions(PositionSet::LEFT | PositionSet::RIGHT)
//!     .return_delay(500);
//! let mut a = Activation::mount(&mut scene, link, ElementKind::Action, config, pointer.clone());
//!
//! pointer.moved(Point::new(200.0, 200.0));
//! a.pointer_enter(&mut scene, 0);
//! let first = a.position();
//! assert!(first == Position::Left || first == Position::Right);
//!
//! // The element moved out from under the pointer, so it settles there.
//! a.transition_end(&mut scene, 100);
//! assert!(!a.is_moving());
//!
//! a.pointer_leave(&mut scene, 150);
//! a.advance(&mut scene, 649);
//! assert_eq!(a.position(), first);
//! a.advance(&mut scene, 650);
//! assert_eq!(a.position(), Position::Center);
//!
//! a.unmount(&mut scene);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo and the member crates.
//! - `libm`: float math for pure `no_std` builds.
//! - `serde`: load [`Config`] from any serde format.
//! - `tracing`: emit [`tracing`](https://docs.rs/tracing) events for mounts,
//!   moves, returns and evictions.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod activation;
mod config;
pub mod headless;
mod host;
mod mounted;
mod pointer;

pub use activation::{Activation, MAX_STEPS_PER_DISPATCH};
pub use config::{Config, MoveCallback};
pub use host::Host;
pub use mounted::Mounted;
pub use pointer::PointerTracker;
