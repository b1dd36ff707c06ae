// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host surface trails are read from and attached to.

use alloc::string::String;

use kurbo::{Insets, Rect, RoundedRectRadii};
use peniko::Color;

use crate::trail::Trail;

/// What kind of element an activation manages.
///
/// Supplied by the caller at mount; the host is never sniffed for it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// A label wrapping a checkbox; the trail shows a checkbox glyph and the label text.
    CheckboxLabel,
    /// A text-bearing input; the trail shows its value, or its placeholder.
    TextInput,
    /// A wrapper around an input (and maybe an icon); the trail shows the
    /// inner value or placeholder plus the icon.
    InputContainer,
    /// A link or button; the trail shows its text, centered.
    Action,
    /// Anything else; the trail shows a shallow copy of the content.
    #[default]
    Generic,
}

/// The subset of computed style a trail copies from its element.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    /// Foreground (text) color.
    pub color: Color,
    /// Background color; fully transparent backgrounds get a translucent fallback.
    pub background: Color,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family list, as the host spells it.
    pub font_family: String,
    /// Padding box insets.
    pub padding: Insets,
    /// Corner radii.
    pub border_radius: RoundedRectRadii,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            background: Color::TRANSPARENT,
            font_size: 16.0,
            font_family: String::new(),
            padding: Insets::ZERO,
            border_radius: RoundedRectRadii::from_single_radius(0.0),
        }
    }
}

/// A text field's current contents and style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSnapshot {
    /// Current value.
    pub value: String,
    /// Placeholder shown while the value is empty.
    pub placeholder: String,
    /// Computed style of the field itself.
    pub style: ComputedStyle,
}

impl FieldSnapshot {
    /// The value if non-empty, otherwise the placeholder.
    #[must_use]
    pub fn display_text(&self) -> &str {
        if self.value.is_empty() {
            &self.placeholder
        } else {
            &self.value
        }
    }
}

/// Host access needed to synthesize and manage trails.
///
/// Reads return `None` (or an empty value) when the element, its container
/// or an inner field is absent; callers degrade to a no-op.
pub trait TrailSurface {
    /// Handle to a managed element.
    type Element: Copy;
    /// Handle to the surface an element is laid out in.
    type Container: Copy;
    /// Handle to an attached trail node.
    type Node: Copy + Eq;
    /// A host-native copy of some content (an icon, a shallow child list).
    type Fragment;

    /// Current on-screen bounds of `element`, including any applied transform.
    fn element_bounds(&self, element: Self::Element) -> Option<Rect>;

    /// Computed style of `element`.
    fn computed_style(&self, element: Self::Element) -> Option<ComputedStyle>;

    /// The containing surface of `element`.
    fn container(&self, element: Self::Element) -> Option<Self::Container>;

    /// On-screen bounds of `container`.
    fn container_bounds(&self, container: Self::Container) -> Option<Rect>;

    /// Makes `container` a positioning context for absolutely placed trails.
    fn make_positioned(&mut self, container: Self::Container);

    /// Text content of `element` (label text for checkbox labels).
    fn text_content(&self, element: Self::Element) -> String;

    /// The field backing `element`: itself for a text input, the wrapped
    /// input for an input container.
    fn field(&self, element: Self::Element) -> Option<FieldSnapshot>;

    /// Whether the checkbox inside a checkbox label is checked.
    fn checkbox_checked(&self, element: Self::Element) -> bool;

    /// A copy of the icon next to a wrapped input.
    fn icon(&self, element: Self::Element) -> Option<Self::Fragment>;

    /// A shallow structural copy of `element`'s content.
    fn shallow_copy(&self, element: Self::Element) -> Option<Self::Fragment>;

    /// Attaches a trail node to `container`.
    fn attach_trail(
        &mut self,
        container: Self::Container,
        trail: Trail<Self::Fragment>,
    ) -> Self::Node;

    /// Detaches a trail node. Detaching an already detached node is a no-op.
    fn detach_trail(&mut self, node: Self::Node);
}
