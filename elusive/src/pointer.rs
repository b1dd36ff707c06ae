// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared last-known pointer position.

use alloc::rc::Rc;
use core::cell::Cell;

use kurbo::{Point, Rect};

/// The last pointer position reported by the host.
///
/// One tracker is shared by every activation in a window: the host updates
/// it from its global pointer-move handler, activations only read it when a
/// transition settles. Clones share the same position.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    last: Rc<Cell<Option<Point>>>,
}

impl PointerTracker {
    /// Creates a tracker with no known position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer move.
    pub fn moved(&self, point: Point) {
        self.last.set(Some(point));
    }

    /// Forgets the position, e.g. when the pointer leaves the window.
    pub fn clear(&self) {
        self.last.set(None);
    }

    /// The last known position.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.last.get()
    }

    /// Returns `true` if the last known position lies in `bounds`, edges included.
    #[must_use]
    pub fn is_within(&self, bounds: Rect) -> bool {
        self.position().is_some_and(|p| {
            p.x >= bounds.x0 && p.x <= bounds.x1 && p.y >= bounds.y0 && p.y <= bounds.y1
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_position() {
        let a = PointerTracker::new();
        let b = a.clone();
        assert_eq!(b.position(), None);
        a.moved(Point::new(3.0, 4.0));
        assert_eq!(b.position(), Some(Point::new(3.0, 4.0)));
        b.clear();
        assert_eq!(a.position(), None);
    }

    #[test]
    fn hit_test_includes_edges() {
        let t = PointerTracker::new();
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(!t.is_within(r));
        t.moved(Point::new(20.0, 10.0));
        assert!(t.is_within(r));
        t.moved(Point::new(20.5, 10.0));
        assert!(!t.is_within(r));
    }
}
