// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=elusive_timing --heading-base-level=0

//! Elusive Timing: host-agnostic timer queue primitives.
//!
//! The host owns the clock. It reports the current time (in milliseconds, or
//! any monotonic `u64` unit) whenever it delivers a signal, and asks the queue
//! which timers have come due. Nothing here sleeps or spawns.
//!
//! - [`TimerQueue`]: deadline-ordered timers carrying a payload, with
//!   generational [`TimerId`]s so a cancelled or fired id never aliases a
//!   newer timer.
//! - [`TimerSlot`]: a single-slot holder for "at most one pending timer of this
//!   kind"; arming it again cancels the previous timer first.
//!
//! ## Minimal example
//!
//! ```rust
//! use elusive_timing::{TimerQueue, TimerSlot};
//!
//! let mut queue = TimerQueue::new();
//! let mut ret = TimerSlot::new();
//!
//! ret.arm(&mut queue, 500, "return");
//! // A later leave replaces the pending return.
//! ret.arm(&mut queue, 800, "return");
//! assert_eq!(queue.len(), 1);
//!
//! assert!(queue.pop_due(700).is_none());
//! let (id, payload) = queue.pop_due(800).unwrap();
//! assert!(ret.claim(id));
//! assert_eq!(payload, "return");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Reverse;

/// Handle to a scheduled timer.
///
/// Consists of a slot index and a generation counter, like a box-tree node id:
/// once the timer fires or is cancelled its slot may be reused, but the
/// generation is bumped so the stale id never matches again.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TimerId(u32, u32);

#[derive(Debug)]
struct Entry<T> {
    deadline: u64,
    payload: T,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    entry: Option<Entry<T>>,
}

/// A deadline-ordered queue of pending timers.
///
/// Timers with equal deadlines fire in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    // (deadline, sequence, slot, generation); stale entries are skipped on pop.
    heap: BinaryHeap<Reverse<(u64, u64, u32, u32)>>,
    next_seq: u64,
    len: usize,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            heap: BinaryHeap::new(),
            next_seq: 0,
            len: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Schedules `payload` to fire at `deadline`.
    pub fn schedule(&mut self, deadline: u64, payload: T) -> TimerId {
        let entry = Entry { deadline, payload };
        let (idx, generation) = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.entry = Some(entry);
            (idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 1,
                entry: Some(entry),
            });
            (idx, 1)
        };
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Reverse((deadline, seq, idx, generation)));
        self.len += 1;
        TimerId(idx, generation)
    }

    /// Cancels a pending timer.
    ///
    /// Returns `true` if the timer was pending. A cancelled timer never fires.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.take(id).is_some()
    }

    /// Returns `true` if `id` refers to a timer that has neither fired nor been cancelled.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.slots
            .get(id.0 as usize)
            .is_some_and(|s| s.generation == id.1 && s.entry.is_some())
    }

    /// Deadline of the given pending timer.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<u64> {
        let slot = self.slots.get(id.0 as usize)?;
        if slot.generation != id.1 {
            return None;
        }
        slot.entry.as_ref().map(|e| e.deadline)
    }

    /// Earliest deadline among pending timers.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.slots
            .iter()
            .filter_map(|s| s.entry.as_ref().map(|e| e.deadline))
            .min()
    }

    /// Removes and returns the earliest timer whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(TimerId, T)> {
        while let Some(Reverse((deadline, _, idx, generation))) = self.heap.peek().copied() {
            if deadline > now {
                return None;
            }
            self.heap.pop();
            let id = TimerId(idx, generation);
            if let Some(payload) = self.take(id) {
                return Some((id, payload));
            }
        }
        None
    }

    /// Cancels every pending timer.
    pub fn clear(&mut self) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(u32::try_from(idx).unwrap_or(u32::MAX));
            }
        }
        self.heap.clear();
        self.len = 0;
    }

    fn take(&mut self, id: TimerId) -> Option<T> {
        let slot = self.slots.get_mut(id.0 as usize)?;
        if slot.generation != id.1 {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.0);
        self.len -= 1;
        Some(entry.payload)
    }
}

/// Holds at most one pending timer of a given kind.
///
/// Arming an already armed slot cancels the previous timer before scheduling
/// the new one, so at most one timer per slot is ever outstanding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TimerSlot {
    id: Option<TimerId>,
}

impl TimerSlot {
    /// Creates an unarmed slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { id: None }
    }

    /// Returns the id of the pending timer, if any.
    #[must_use]
    pub fn id(&self) -> Option<TimerId> {
        self.id
    }

    /// Returns `true` while a timer is held.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.id.is_some()
    }

    /// Cancels any held timer, then schedules a new one.
    pub fn arm<T>(&mut self, queue: &mut TimerQueue<T>, deadline: u64, payload: T) -> TimerId {
        self.cancel(queue);
        let id = queue.schedule(deadline, payload);
        self.id = Some(id);
        id
    }

    /// Cancels the held timer. Returns `true` if one was pending.
    pub fn cancel<T>(&mut self, queue: &mut TimerQueue<T>) -> bool {
        self.id.take().is_some_and(|id| queue.cancel(id))
    }

    /// Releases the slot if it holds `id` (typically a timer that just fired).
    ///
    /// Returns `false` when `id` belongs to some other timer; the caller should
    /// then ignore the firing.
    pub fn claim(&mut self, id: TimerId) -> bool {
        if self.id == Some(id) {
            self.id = None;
            true
        } else {
            false
        }
    }
}
