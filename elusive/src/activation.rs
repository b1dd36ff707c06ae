// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One evasive element: mount, signal handling and teardown.
//!
//! ## States
//!
//! An activation is `Idle` or `Moving`, and always at exactly one
//! [`Position`] (initially [`Position::Center`]).
//!
//! - Pointer enters an idle, enabled element: pending timers are cancelled,
//!   a new position is drawn from the allowed set, a trail is spawned for
//!   the outgoing position, and the element moves. `on_move` runs once.
//! - The transition ends (settle): the element is idle again. If the last
//!   known pointer position is inside its bounds (edges included) the move
//!   timer is armed and the enter step runs again when it fires.
//! - Pointer leaves: the move timer is cancelled and the return timer is
//!   (re)armed for `return_delay`.
//! - Return timer fires: the element moves back to center and settles as above.
//!
//! Every entry point queues a signal and drains the queue in a loop, so a
//! settle that re-triggers never nests inside another handler.

use alloc::collections::VecDeque;
use core::fmt;

use elusive_position::{Position, choose_next};
use elusive_style::{InjectedRules, InstanceId, RuleSet};
use elusive_timing::{TimerQueue, TimerSlot};
use elusive_trail::{ElementKind, TrailSet, TrailSynthesizer};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::host::Host;
use crate::pointer::PointerTracker;

/// Most signals handled by one entry-point call.
///
/// Work beyond this stays queued and runs on the next call (typically
/// [`Activation::advance`]). Only reachable when transitions settle without
/// the host's help, i.e. with a zero `animation_speed`.
pub const MAX_STEPS_PER_DISPATCH: usize = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Signal<N> {
    Enter,
    Leave,
    Settle,
    Return,
    TrailDone(N),
}

#[derive(Copy, Clone, Debug)]
enum Timer<N> {
    Return,
    Move,
    Trail(N),
}

/// The evasive behavior bound to one element.
///
/// Created by [`Activation::mount`] and torn down by [`Activation::unmount`],
/// which consumes it; an unmounted activation cannot receive signals.
/// An activation has no access to its host once dropped, so dropping it
/// without unmounting leaves its tag, rules, trails and subscription behind
/// (and logs a warning with the `tracing` feature). Use [`Mounted`] to tie
/// teardown to drop.
///
/// [`Mounted`]: crate::Mounted
#[must_use = "an activation must be unmounted to release its host resources"]
pub struct Activation<H: Host> {
    element: H::Element,
    id: InstanceId,
    config: Config,
    pointer: PointerTracker,
    rng: SmallRng,
    // Both are `None` once torn down.
    rules: Option<InjectedRules<H::RuleNode>>,
    subscription: Option<H::Subscription>,
    synth: TrailSynthesizer,
    trails: TrailSet<H::Node>,
    position: Position,
    moving: bool,
    timers: TimerQueue<Timer<H::Node>>,
    return_timer: TimerSlot,
    move_timer: TimerSlot,
    queue: VecDeque<Signal<H::Node>>,
    now: u64,
}

impl<H: Host> fmt::Debug for Activation<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activation")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("moving", &self.moving)
            .field("live_trails", &self.trails.len())
            .field("pending_timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl<H: Host> Activation<H> {
    /// Binds the behavior to `element`.
    ///
    /// Tags the element with a fresh [`InstanceId`], shows it at center,
    /// injects the scoped rules and subscribes to its pointer signals.
    /// `kind` selects how trails are drawn; `pointer` is the shared tracker
    /// consulted on settle.
    pub fn mount(
        host: &mut H,
        element: H::Element,
        kind: ElementKind,
        config: Config,
        pointer: PointerTracker,
    ) -> Self {
        let id = InstanceId::next();
        host.tag(element, id);
        let home = config.move_distance.offset(Position::Center);
        host.set_position(element, id, Position::Center, home);
        let rules = InjectedRules::inject(host, &rule_set(id, &config));
        let subscription = host.subscribe(element, id);

        #[cfg(feature = "tracing")]
        tracing::info!(id = %id, ?kind, enabled = config.enabled, "mounted");

        Self {
            element,
            id,
            rng: seeded_rng(id, &config),
            synth: TrailSynthesizer::new(id, kind, config.move_distance, config.trail_duration),
            trails: TrailSet::new(config.max_trails),
            config,
            pointer,
            rules: Some(rules),
            subscription: Some(subscription),
            position: Position::Center,
            moving: false,
            timers: TimerQueue::new(),
            return_timer: TimerSlot::new(),
            move_timer: TimerSlot::new(),
            queue: VecDeque::new(),
            now: 0,
        }
    }

    /// Replaces the configuration.
    ///
    /// Rules are re-injected when the distance or a duration changed, and a
    /// new distance re-applies the current position with its new offset.
    /// Live trails over a lowered `max_trails` are evicted oldest first, and
    /// disabling cancels both timers. Position and trails otherwise carry over.
    pub fn reconfigure(&mut self, host: &mut H, config: Config) {
        let restyle = config.move_distance != self.config.move_distance
            || config.animation_speed != self.config.animation_speed
            || config.trail_duration != self.config.trail_duration;
        if restyle {
            let fresh = InjectedRules::inject(host, &rule_set(self.id, &config));
            if let Some(stale) = self.rules.replace(fresh) {
                stale.release(host);
            }
        }
        if config.move_distance != self.config.move_distance {
            let offset = config.move_distance.offset(self.position);
            host.set_position(self.element, self.id, self.position, offset);
        }

        if !config.enabled {
            self.return_timer.cancel(&mut self.timers);
            self.move_timer.cancel(&mut self.timers);
        }

        self.trails.set_limit(config.max_trails);
        while let Some(node) = self.trails.evict_over_limit() {
            host.detach_trail(node);
        }

        if config.seed.is_some() && config.seed != self.config.seed {
            self.rng = seeded_rng(self.id, &config);
        }
        self.synth = TrailSynthesizer::new(
            self.id,
            self.synth.kind(),
            config.move_distance,
            config.trail_duration,
        );
        self.config = config;

        #[cfg(feature = "tracing")]
        tracing::debug!(id = %self.id, restyle, "reconfigured");
    }

    /// Tears the activation down.
    ///
    /// Unsubscribes, cancels both timers, detaches every live trail, removes
    /// the injected rules and untags the element, which drops its position
    /// class along with the tag.
    pub fn unmount(mut self, host: &mut H) {
        self.teardown(host);
    }

    /// Returns `true` until the activation is torn down.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.rules.is_some()
    }

    pub(crate) fn teardown(&mut self, host: &mut H) {
        let Some(rules) = self.rules.take() else {
            return;
        };
        if let Some(subscription) = self.subscription.take() {
            host.unsubscribe(subscription);
        }
        for node in self.trails.drain() {
            host.detach_trail(node);
        }
        rules.release(host);
        host.untag(self.element, self.id);
        self.timers.clear();
        self.return_timer = TimerSlot::new();
        self.move_timer = TimerSlot::new();
        self.queue.clear();

        #[cfg(feature = "tracing")]
        tracing::info!(id = %self.id, "unmounted");
    }

    /// The pointer entered the element.
    pub fn pointer_enter(&mut self, host: &mut H, now: u64) {
        self.dispatch(host, now, Some(Signal::Enter));
    }

    /// The pointer left the element.
    pub fn pointer_leave(&mut self, host: &mut H, now: u64) {
        self.dispatch(host, now, Some(Signal::Leave));
    }

    /// The element's position transition finished.
    pub fn transition_end(&mut self, host: &mut H, now: u64) {
        self.dispatch(host, now, Some(Signal::Settle));
    }

    /// The fade-out of `node` finished before its scheduled removal.
    pub fn trail_end(&mut self, host: &mut H, now: u64, node: H::Node) {
        self.dispatch(host, now, Some(Signal::TrailDone(node)));
    }

    /// Runs timers due by `now` and any work left over from earlier calls.
    pub fn advance(&mut self, host: &mut H, now: u64) {
        self.dispatch(host, now, None);
    }

    /// When [`Activation::advance`] next has work to do.
    ///
    /// Returns the current time when signals are still queued.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        if self.queue.is_empty() {
            self.timers.next_deadline()
        } else {
            Some(self.now)
        }
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns `true` while a position transition is running.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Live trails, oldest first.
    #[must_use]
    pub fn live_trails(&self) -> &TrailSet<H::Node> {
        &self.trails
    }

    /// Id scoping this activation's rules and nodes.
    #[must_use]
    pub fn instance_id(&self) -> InstanceId {
        self.id
    }

    /// The managed element.
    #[must_use]
    pub fn element(&self) -> H::Element {
        self.element
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns `true` if a return to center is pending.
    #[must_use]
    pub fn is_return_pending(&self) -> bool {
        self.return_timer.is_armed()
    }

    /// Returns `true` if a re-trigger is pending.
    #[must_use]
    pub fn is_move_pending(&self) -> bool {
        self.move_timer.is_armed()
    }

    fn dispatch(&mut self, host: &mut H, now: u64, signal: Option<Signal<H::Node>>) {
        self.now = self.now.max(now);
        // Timers that came due before this signal arrived go first.
        while let Some(due) = self.pop_due() {
            self.queue.push_back(due);
        }
        if let Some(signal) = signal {
            self.queue.push_back(signal);
        }

        let mut steps = 0;
        while steps < MAX_STEPS_PER_DISPATCH {
            let Some(signal) = self.queue.pop_front().or_else(|| self.pop_due()) else {
                return;
            };
            steps += 1;
            self.step(host, signal);
        }

        #[cfg(feature = "tracing")]
        if !self.queue.is_empty() {
            tracing::debug!(id = %self.id, queued = self.queue.len(), "step cap reached");
        }
    }

    fn pop_due(&mut self) -> Option<Signal<H::Node>> {
        while let Some((timer_id, timer)) = self.timers.pop_due(self.now) {
            let signal = match timer {
                Timer::Return if self.return_timer.claim(timer_id) => Signal::Return,
                Timer::Move if self.move_timer.claim(timer_id) => Signal::Enter,
                Timer::Trail(node) => Signal::TrailDone(node),
                _ => continue,
            };
            return Some(signal);
        }
        None
    }

    fn step(&mut self, host: &mut H, signal: Signal<H::Node>) {
        match signal {
            Signal::Enter => self.evade(host),
            Signal::Leave => self.schedule_return(),
            Signal::Settle => self.settle(host),
            Signal::Return => self.return_to_center(host),
            Signal::TrailDone(node) => {
                if self.trails.remove(node) {
                    host.detach_trail(node);
                }
            }
        }
    }

    fn evade(&mut self, host: &mut H) {
        if !self.config.enabled || self.moving {
            return;
        }
        if host.element_bounds(self.element).is_none() {
            return;
        }
        self.return_timer.cancel(&mut self.timers);
        self.move_timer.cancel(&mut self.timers);

        let from = self.position;
        let Some(to) = choose_next(from, self.config.allowed_positions, &mut self.rng) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(id = %self.id, position = %from, "no candidate position");
            return;
        };

        if let Some(node) = self.synth.spawn(host, &mut self.trails, self.element, from, to) {
            let expiry = self.now.saturating_add(self.config.trail_duration);
            self.timers.schedule(expiry, Timer::Trail(node));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(id = %self.id, %from, %to, live_trails = self.trails.len(), "evasive move");

        self.move_to(host, to);
        if let Some(on_move) = self.config.on_move.clone() {
            on_move();
        }
    }

    fn schedule_return(&mut self) {
        if !self.config.enabled {
            return;
        }
        self.move_timer.cancel(&mut self.timers);
        let deadline = self.now.saturating_add(self.config.return_delay);
        self.return_timer.arm(&mut self.timers, deadline, Timer::Return);
    }

    fn return_to_center(&mut self, host: &mut H) {
        if !self.config.enabled || self.position == Position::Center {
            return;
        }
        if host.element_bounds(self.element).is_none() {
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(id = %self.id, from = %self.position, "returning to center");

        self.move_to(host, Position::Center);
    }

    fn move_to(&mut self, host: &mut H, position: Position) {
        self.position = position;
        let offset = self.config.move_distance.offset(position);
        host.set_position(self.element, self.id, position, offset);
        self.moving = true;
        // Nothing animates, so no transition end will arrive.
        if self.config.animation_speed == 0 {
            self.queue.push_back(Signal::Settle);
        }
    }

    fn settle(&mut self, host: &mut H) {
        if !self.moving {
            return;
        }
        self.moving = false;
        if !self.config.enabled {
            return;
        }
        let Some(bounds) = host.element_bounds(self.element) else {
            return;
        };
        if self.pointer.is_within(bounds) {
            let deadline = self.now.saturating_add(self.config.retrigger_delay);
            self.move_timer.arm(&mut self.timers, deadline, Timer::Move);
        }
    }
}

impl<H: Host> Drop for Activation<H> {
    fn drop(&mut self) {
        #[cfg(feature = "tracing")]
        if self.is_mounted() {
            tracing::warn!(id = %self.id, "activation dropped while mounted");
        }
    }
}

fn rule_set(id: InstanceId, config: &Config) -> RuleSet {
    RuleSet::new(
        id,
        config.move_distance,
        config.animation_speed,
        config.trail_duration,
    )
}

fn seeded_rng(id: InstanceId, config: &Config) -> SmallRng {
    SmallRng::seed_from_u64(config.seed.unwrap_or(id.get()))
}
