// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host contract an activation drives.

use elusive_position::{Offset, Position};
use elusive_style::{InstanceId, RuleSurface};
use elusive_trail::TrailSurface;

/// Everything an [`Activation`](crate::Activation) needs from its host.
///
/// Rule insertion comes from [`RuleSurface`], trail geometry and nodes from
/// [`TrailSurface`]. The methods here cover the managed element itself and
/// the delivery of pointer signals.
///
/// A host signals that an element is gone by returning `None` from
/// [`TrailSurface::element_bounds`]; the controller then treats every step as
/// a no-op.
pub trait Host: RuleSurface + TrailSurface {
    /// Handle to a signal subscription.
    type Subscription;

    /// Tags `element` with `id` (the [`ID_ATTRIBUTE`](elusive_style::ID_ATTRIBUTE)).
    fn tag(&mut self, element: Self::Element, id: InstanceId);

    /// Removes the tag set by [`Host::tag`], along with position classes.
    fn untag(&mut self, element: Self::Element, id: InstanceId);

    /// Shows `element` at `position`.
    ///
    /// Sets the [`POSITION_ATTRIBUTE`](elusive_style::POSITION_ATTRIBUTE),
    /// removes every previous position class and adds
    /// [`position_class`](elusive_style::position_class)`(position)`. The
    /// host's style engine then runs the transition.
    ///
    /// `offset` is the translation the injected rules give that class. Hosts
    /// that apply the rules can ignore it; hosts that lay out on their own
    /// must shift the element's bounds by it. It is passed again with the
    /// same position when a reconfiguration changes the distance.
    fn set_position(
        &mut self,
        element: Self::Element,
        id: InstanceId,
        position: Position,
        offset: Offset,
    );

    /// Starts delivering pointer-enter, pointer-leave and transition-end
    /// signals for `element` to the activation `id`.
    fn subscribe(&mut self, element: Self::Element, id: InstanceId) -> Self::Subscription;

    /// Stops the delivery started by [`Host::subscribe`].
    fn unsubscribe(&mut self, subscription: Self::Subscription);
}
