// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building and attaching trails for one activation.

use alloc::string::String;

use elusive_position::{MoveDistance, Position};
use elusive_style::InstanceId;
use peniko::Color;

use crate::set::TrailSet;
use crate::surface::{ElementKind, TrailSurface};
use crate::trail::{CheckboxGlyph, Trail, TrailContent, TrailLayout, TrailMotion, TrailStyle};

/// Synthesizes trails for one activation.
///
/// Holds the activation-wide inputs (scope, element kind, move distance and
/// fade duration); each call supplies the element and the positions involved.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrailSynthesizer {
    scope: InstanceId,
    kind: ElementKind,
    distance: MoveDistance,
    duration: u64,
}

impl TrailSynthesizer {
    /// Creates a synthesizer; `duration` is the fade length in milliseconds.
    #[must_use]
    pub fn new(
        scope: InstanceId,
        kind: ElementKind,
        distance: MoveDistance,
        duration: u64,
    ) -> Self {
        Self {
            scope,
            kind,
            distance,
            duration,
        }
    }

    /// The element kind trails are built for.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Describes the trail for `element` leaving `from` for `to`.
    ///
    /// Returns the container to attach to along with the trail, or `None`
    /// when the element has no container or no geometry.
    pub fn build<S>(
        &self,
        surface: &S,
        element: S::Element,
        from: Position,
        to: Position,
    ) -> Option<(S::Container, Trail<S::Fragment>)>
    where
        S: TrailSurface + ?Sized,
    {
        let container = surface.container(element)?;
        let bounds = surface.element_bounds(element)?;
        let origin = surface.container_bounds(container)?.origin();
        let computed = surface.computed_style(element).unwrap_or_default();
        let mut style = TrailStyle::from_computed(&computed);

        let content = match self.kind {
            ElementKind::CheckboxLabel => {
                style.background = Color::TRANSPARENT;
                style.layout = TrailLayout::Inline;
                TrailContent::Checkbox {
                    glyph: CheckboxGlyph {
                        checked: surface.checkbox_checked(element),
                    },
                    label: surface.text_content(element),
                }
            }
            ElementKind::TextInput => match surface.field(element) {
                Some(field) => TrailContent::Field {
                    text: String::from(field.display_text()),
                    style: field.style,
                    icon: None,
                },
                None => TrailContent::Empty,
            },
            ElementKind::InputContainer => match surface.field(element) {
                Some(field) => TrailContent::Field {
                    text: String::from(field.display_text()),
                    style: field.style,
                    icon: surface.icon(element),
                },
                None => Self::copy_of(surface, element),
            },
            ElementKind::Action => {
                style.layout = TrailLayout::Centered;
                TrailContent::Text(surface.text_content(element))
            }
            ElementKind::Generic => Self::copy_of(surface, element),
        };

        let motion = TrailMotion::new(
            self.distance.offset(from),
            self.distance.offset(to),
            to,
            self.duration,
        );

        Some((
            container,
            Trail {
                scope: self.scope,
                frame: bounds - origin.to_vec2(),
                style,
                content,
                motion,
            },
        ))
    }

    /// Builds a trail and attaches it, evicting the oldest live trails first
    /// if `trails` is at its bound.
    ///
    /// Returns the attached node, or `None` when trails are disabled
    /// (`Some(0)` bound) or the element cannot produce one.
    pub fn spawn<S>(
        &self,
        surface: &mut S,
        trails: &mut TrailSet<S::Node>,
        element: S::Element,
        from: Position,
        to: Position,
    ) -> Option<S::Node>
    where
        S: TrailSurface + ?Sized,
    {
        if trails.is_disabled() {
            return None;
        }
        let Some((container, trail)) = self.build(surface, element, from, to) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(scope = %self.scope, "no container or geometry; trail skipped");
            return None;
        };

        while let Some(oldest) = trails.make_room() {
            #[cfg(feature = "tracing")]
            tracing::debug!(scope = %self.scope, live = trails.len(), "evicting oldest trail");
            surface.detach_trail(oldest);
        }

        surface.make_positioned(container);
        let node = surface.attach_trail(container, trail);
        trails.push(node);
        Some(node)
    }

    fn copy_of<S>(surface: &S, element: S::Element) -> TrailContent<S::Fragment>
    where
        S: TrailSurface + ?Sized,
    {
        surface
            .shallow_copy(element)
            .map_or(TrailContent::Empty, TrailContent::Copy)
    }
}
