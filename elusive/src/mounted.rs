// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An activation that owns a share of its host and tears down on drop.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use elusive_trail::ElementKind;

use crate::activation::Activation;
use crate::config::Config;
use crate::host::Host;
use crate::pointer::PointerTracker;

/// An [`Activation`] bound to a shared host.
///
/// Dropping a `Mounted` runs the same teardown as [`Activation::unmount`].
/// Every method borrows the host mutably for the duration of the call, so
/// the host must not be borrowed elsewhere while a signal is delivered,
/// including from the `on_move` callback. If the host is still borrowed at
/// drop, teardown is skipped.
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use elusive::headless::Scene;
/// use elusive::{Config, Mounted, PointerTracker};
/// use elusive_trail::ElementKind;
/// use kurbo::Rect;
///
/// let scene = Rc::new(RefCell::new(Scene::new()));
/// let form = scene.borrow_mut().add_container(Rect::new(0.0, 0.0, 400.0, 400.0));
/// let link = scene
///     .borrow_mut()
///     .add_element(Some(form), Rect::new(150.0, 190.0, 250.0, 210.0));
///
/// let mut m = Mounted::mount(
///     scene.clone(),
///     link,
///     ElementKind::Action,
///     Config::new(),
///     PointerTracker::new(),
/// );
/// m.pointer_enter(0);
/// assert_eq!(scene.borrow().trail_count(), 1);
///
/// drop(m);
/// assert_eq!(scene.borrow().trail_count(), 0);
/// assert!(scene.borrow().rules().is_empty());
/// ```
pub struct Mounted<H: Host> {
    host: Rc<RefCell<H>>,
    activation: Activation<H>,
}

impl<H: Host> fmt::Debug for Mounted<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mounted")
            .field("activation", &self.activation)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Mounted<H> {
    /// Mounts on `element`; see [`Activation::mount`].
    pub fn mount(
        host: Rc<RefCell<H>>,
        element: H::Element,
        kind: ElementKind,
        config: Config,
        pointer: PointerTracker,
    ) -> Self {
        let activation = Activation::mount(&mut *host.borrow_mut(), element, kind, config, pointer);
        Self { host, activation }
    }

    /// The shared host.
    #[must_use]
    pub fn host(&self) -> &Rc<RefCell<H>> {
        &self.host
    }

    /// The activation, for its read accessors.
    #[must_use]
    pub fn activation(&self) -> &Activation<H> {
        &self.activation
    }

    /// See [`Activation::reconfigure`].
    pub fn reconfigure(&mut self, config: Config) {
        self.activation
            .reconfigure(&mut *self.host.borrow_mut(), config);
    }

    /// See [`Activation::pointer_enter`].
    pub fn pointer_enter(&mut self, now: u64) {
        self.activation
            .pointer_enter(&mut *self.host.borrow_mut(), now);
    }

    /// See [`Activation::pointer_leave`].
    pub fn pointer_leave(&mut self, now: u64) {
        self.activation
            .pointer_leave(&mut *self.host.borrow_mut(), now);
    }

    /// See [`Activation::transition_end`].
    pub fn transition_end(&mut self, now: u64) {
        self.activation
            .transition_end(&mut *self.host.borrow_mut(), now);
    }

    /// See [`Activation::trail_end`].
    pub fn trail_end(&mut self, now: u64, node: H::Node) {
        self.activation
            .trail_end(&mut *self.host.borrow_mut(), now, node);
    }

    /// See [`Activation::advance`].
    pub fn advance(&mut self, now: u64) {
        self.activation.advance(&mut *self.host.borrow_mut(), now);
    }
}

impl<H: Host> Drop for Mounted<H> {
    fn drop(&mut self) {
        if let Ok(mut host) = self.host.try_borrow_mut() {
            self.activation.teardown(&mut *host);
        }
    }
}
