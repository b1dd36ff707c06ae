// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=elusive_style --heading-base-level=0

//! Elusive Style: scoped presentation rules for pointer-evading elements.
//!
//! Every activation gets its own [`InstanceId`]. The element it manages, and
//! every trail it spawns, are tagged with that id, and a single [`RuleSet`]
//! keyed by the id carries everything the host's style engine needs:
//!
//! - a transition rule, so position changes animate over the configured speed;
//! - nine transform rules, one per [`Position`](elusive_position::Position);
//! - a fade-out keyframe animation and base rule for trails.
//!
//! Because every selector is scoped by the id, two activations never affect
//! each other even on structurally identical elements.
//!
//! ## Ownership of injected rules
//!
//! Rule text lives in the host (a `<style>` node, a stylesheet registry, …)
//! behind the [`RuleSurface`] trait. [`InjectedRules`] is the owned handle for
//! one insertion: it is created once on mount and consumed by
//! [`InjectedRules::release`] on teardown, so a rule node is removed exactly
//! once. [`RuleStore`] is an in-memory surface with generational node ids for
//! hosts without a style engine of their own, and for tests.
//!
//! ```rust
//! use elusive_position::MoveDistance;
//! use elusive_style::{InjectedRules, InstanceId, RuleSet, RuleStore};
//!
//! let id = InstanceId::next();
//! let rules = RuleSet::new(id, MoveDistance::default(), 100, 500);
//!
//! let mut store = RuleStore::new();
//! let injected = InjectedRules::inject(&mut store, &rules);
//! assert!(store.contains_scope(id));
//!
//! injected.release(&mut store);
//! assert!(!store.contains_scope(id));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod rules;
mod scope;
mod store;

pub use rules::{RuleSet, TRAIL_START_OPACITY};
pub use scope::{
    CLASS_PREFIX, ID_ATTRIBUTE, InstanceId, POSITION_ATTRIBUTE, TRAIL_CLASS, TrailVar,
    position_class,
};
pub use store::{InjectedRules, RuleNodeId, RuleStore, RuleSurface};
