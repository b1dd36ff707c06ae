// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where rule text lives: the host surface, the owned handle, and an in-memory store.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::rules::RuleSet;
use crate::scope::InstanceId;

/// A host-side home for rule text.
///
/// Browser-like hosts map this onto `<style>` nodes; native hosts can feed the
/// text (or the [`RuleSet`] it came from) to their own style engine.
pub trait RuleSurface {
    /// Handle to one inserted block of rules.
    type RuleNode;

    /// Inserts rules scoped to `scope` and returns the node holding them.
    fn insert_rules(&mut self, scope: InstanceId, text: String) -> Self::RuleNode;

    /// Removes a previously inserted node.
    fn remove_rules(&mut self, node: Self::RuleNode);
}

/// Owned handle to one activation's injected rules.
///
/// There is no `Clone`: the handle is created once by [`InjectedRules::inject`]
/// and consumed by [`InjectedRules::release`], which removes the node.
#[derive(Debug)]
#[must_use = "injected rules stay in the surface until released"]
pub struct InjectedRules<N> {
    scope: InstanceId,
    node: N,
}

impl<N> InjectedRules<N> {
    /// Renders `rules` and inserts them into `surface`.
    pub fn inject<S>(surface: &mut S, rules: &RuleSet) -> Self
    where
        S: RuleSurface<RuleNode = N> + ?Sized,
    {
        let scope = rules.id();
        let node = surface.insert_rules(scope, rules.to_string());
        Self { scope, node }
    }

    /// The scope the rules are keyed by.
    pub fn scope(&self) -> InstanceId {
        self.scope
    }

    /// The host node holding the rules.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Removes the rules from `surface`.
    pub fn release<S>(self, surface: &mut S)
    where
        S: RuleSurface<RuleNode = N> + ?Sized,
    {
        surface.remove_rules(self.node);
    }
}

/// Generational id of a node in a [`RuleStore`].
///
/// A removed node's slot may be reused, but with a bumped generation, so a
/// stale id never resolves to a newer node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleNodeId(u32, u32);

#[derive(Debug)]
struct RuleSlot {
    generation: u32,
    node: Option<(InstanceId, String)>,
}

/// In-memory [`RuleSurface`].
///
/// Acts as the process-wide rule registry for hosts that do not have a style
/// engine of their own.
#[derive(Debug, Default)]
pub struct RuleStore {
    slots: Vec<RuleSlot>,
    free: Vec<u32>,
}

impl RuleStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live rule nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Returns `true` if no rule node is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rule text of a live node.
    #[must_use]
    pub fn get(&self, id: RuleNodeId) -> Option<&str> {
        let slot = self.slots.get(id.0 as usize)?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_ref().map(|(_, text)| text.as_str())
    }

    /// Returns `true` if any live node is keyed by `scope`.
    #[must_use]
    pub fn contains_scope(&self, scope: InstanceId) -> bool {
        self.iter().any(|(s, _)| s == scope)
    }

    /// Iterates `(scope, text)` for every live node.
    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &str)> + '_ {
        self.slots
            .iter()
            .filter_map(|s| s.node.as_ref().map(|(scope, text)| (*scope, text.as_str())))
    }
}

impl RuleSurface for RuleStore {
    type RuleNode = RuleNodeId;

    fn insert_rules(&mut self, scope: InstanceId, text: String) -> RuleNodeId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.node = Some((scope, text));
            return RuleNodeId(idx, slot.generation);
        }
        let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(RuleSlot {
            generation: 1,
            node: Some((scope, text)),
        });
        RuleNodeId(idx, 1)
    }

    fn remove_rules(&mut self, node: RuleNodeId) {
        let Some(slot) = self.slots.get_mut(node.0 as usize) else {
            return;
        };
        if slot.generation != node.1 || slot.node.take().is_none() {
            return;
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(node.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elusive_position::MoveDistance;

    fn rules() -> RuleSet {
        RuleSet::new(InstanceId::next(), MoveDistance::default(), 100, 500)
    }

    #[test]
    fn inject_then_release_round_trip() {
        let mut store = RuleStore::new();
        let set = rules();
        let injected = InjectedRules::inject(&mut store, &set);
        let node = *injected.node();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(node), Some(set.to_string().as_str()));

        injected.release(&mut store);
        assert!(store.is_empty());
        assert_eq!(store.get(node), None);
    }

    #[test]
    fn remount_never_reuses_stale_node() {
        let mut store = RuleStore::new();
        let first = InjectedRules::inject(&mut store, &rules());
        let stale = *first.node();
        first.release(&mut store);

        let second = InjectedRules::inject(&mut store, &rules());
        assert_ne!(*second.node(), stale);
        assert_eq!(store.get(stale), None);

        // Removing through a stale id is a no-op.
        store.remove_rules(stale);
        assert_eq!(store.len(), 1);
        second.release(&mut store);
    }

    #[test]
    fn scopes_are_independent() {
        let mut store = RuleStore::new();
        let a = InjectedRules::inject(&mut store, &rules());
        let b = InjectedRules::inject(&mut store, &rules());
        let (sa, sb) = (a.scope(), b.scope());
        a.release(&mut store);
        assert!(!store.contains_scope(sa));
        assert!(store.contains_scope(sb));
        b.release(&mut store);
    }
}
