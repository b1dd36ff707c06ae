// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=elusive_trail --heading-base-level=0

//! Elusive Trail: fading snapshots left behind by evasive elements.
//!
//! When an element jumps away from the pointer, a detached copy of its prior
//! appearance (a *trail*) is placed where it was and animated from the
//! departure offset toward the arrival offset while fading out.
//!
//! - [`TrailSurface`]: what the host must expose: geometry, computed style,
//!   content reads and attaching/detaching trail nodes.
//! - [`ElementKind`]: a closed tag supplied by the caller describing what kind
//!   of element is managed, which decides what content the trail renders.
//! - [`Trail`]: the host-agnostic description of one trail node.
//! - [`TrailSet`]: creation-ordered live trails with an optional bound; when
//!   the bound is reached the oldest trail is evicted.
//! - [`TrailSynthesizer`]: builds, bounds and attaches trails for one activation.
//!
//! Missing pieces never fail loudly: an element with no bounds or no
//! container simply produces no trail.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod set;
mod surface;
mod synth;
mod trail;

pub use set::TrailSet;
pub use surface::{ComputedStyle, ElementKind, FieldSnapshot, TrailSurface};
pub use synth::TrailSynthesizer;
pub use trail::{
    CheckboxGlyph, TRAIL_SCALE, TRAIL_START_OPACITY, Trail, TrailContent, TrailLayout,
    TrailMotion, TrailStyle, transparent_fallback,
};
