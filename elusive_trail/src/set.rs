// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Creation-ordered live trails with an optional bound.

use alloc::collections::VecDeque;

/// The live trails of one activation, oldest first.
///
/// The set only tracks handles; detaching evicted nodes from the host is the
/// caller's job (see [`TrailSynthesizer`](crate::TrailSynthesizer)).
#[derive(Clone, Debug)]
pub struct TrailSet<N> {
    live: VecDeque<N>,
    limit: Option<usize>,
}

impl<N> Default for TrailSet<N> {
    fn default() -> Self {
        Self {
            live: VecDeque::new(),
            limit: None,
        }
    }
}

impl<N: Copy + Eq> TrailSet<N> {
    /// Creates an empty set holding at most `limit` trails (`None` is unbounded).
    #[must_use]
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            live: VecDeque::new(),
            limit,
        }
    }

    /// The bound on live trails.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Changes the bound. Already live trails over the new bound are left
    /// for [`TrailSet::evict_over_limit`] or [`TrailSet::make_room`] to evict.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    /// Removes and returns the oldest trail while the set holds more than the bound.
    pub fn evict_over_limit(&mut self) -> Option<N> {
        match self.limit {
            Some(limit) if self.live.len() > limit => self.live.pop_front(),
            _ => None,
        }
    }

    /// Returns `true` if the bound forbids any trail at all.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.limit == Some(0)
    }

    /// Number of live trails.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns `true` if no trail is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Returns `true` if `node` is live.
    #[must_use]
    pub fn contains(&self, node: N) -> bool {
        self.live.contains(&node)
    }

    /// Iterates live trails, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = N> + '_ {
        self.live.iter().copied()
    }

    /// Removes and returns the oldest trail if inserting one more would exceed the bound.
    ///
    /// Call repeatedly until it returns `None` to shrink the set below the
    /// bound after [`TrailSet::set_limit`] lowered it.
    pub fn make_room(&mut self) -> Option<N> {
        match self.limit {
            Some(limit) if self.live.len() >= limit => self.live.pop_front(),
            _ => None,
        }
    }

    /// Records a newly attached trail as the youngest.
    pub fn push(&mut self, node: N) {
        self.live.push_back(node);
    }

    /// Forgets `node`. Returns `true` if it was live.
    pub fn remove(&mut self, node: N) -> bool {
        if let Some(idx) = self.live.iter().position(|n| *n == node) {
            self.live.remove(idx);
            true
        } else {
            false
        }
    }

    /// Forgets every trail, yielding them oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = N> + '_ {
        self.live.drain(..)
    }
}
