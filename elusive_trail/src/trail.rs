// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The description of one trail node.

use alloc::format;
use alloc::string::String;

use elusive_position::{Offset, Position};
pub use elusive_style::TRAIL_START_OPACITY;
use elusive_style::{InstanceId, TrailVar};
use kurbo::{Rect, Vec2};
use peniko::Color;

use crate::surface::ComputedStyle;

/// Scale a trail grows to along each axis of the arrival direction.
pub const TRAIL_SCALE: f64 = 1.2;

/// Background used in place of a fully transparent one, so the trail stays visible.
#[must_use]
pub fn transparent_fallback() -> Color {
    Color::WHITE.with_alpha(0.1)
}

/// How trail content is arranged in its box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TrailLayout {
    /// Vertically centered, packed at the start.
    #[default]
    Start,
    /// Centered on both axes, no wrapping.
    Centered,
    /// Start-aligned, sized to content, no wrapping.
    Inline,
}

/// Box style of a trail, copied from its element.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailStyle {
    /// Text color.
    pub color: Color,
    /// Box background.
    pub background: Color,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family list.
    pub font_family: String,
    /// Padding insets.
    pub padding: kurbo::Insets,
    /// Corner radii.
    pub border_radius: kurbo::RoundedRectRadii,
    /// Content arrangement.
    pub layout: TrailLayout,
}

impl TrailStyle {
    /// Copies `style`, substituting [`transparent_fallback`] for a transparent background.
    #[must_use]
    pub fn from_computed(style: &ComputedStyle) -> Self {
        let background = if style.background.components[3] == 0.0 {
            transparent_fallback()
        } else {
            style.background
        };
        Self {
            color: style.color,
            background,
            font_size: style.font_size,
            font_family: style.font_family.clone(),
            padding: style.padding,
            border_radius: style.border_radius,
            layout: TrailLayout::Start,
        }
    }
}

/// A synthesized checkbox drawn in place of a real one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CheckboxGlyph {
    /// Checked state captured when the trail was spawned.
    pub checked: bool,
}

impl CheckboxGlyph {
    /// Edge length of the glyph, in `rem`.
    pub const SIZE_REM: f64 = 1.25;
    /// Corner radius of the glyph, in `rem`.
    pub const RADIUS_REM: f64 = 0.375;
    /// Border width, in pixels.
    pub const BORDER_PX: f64 = 2.0;

    /// Border color.
    #[must_use]
    pub fn border_color(self) -> Color {
        if self.checked {
            Color::from_rgb8(0x3b, 0x82, 0xf6)
        } else {
            Color::from_rgb8(0x9c, 0xa3, 0xaf)
        }
    }

    /// Fill color.
    #[must_use]
    pub fn fill_color(self) -> Color {
        if self.checked {
            Color::from_rgb8(0x3b, 0x82, 0xf6)
        } else {
            Color::from_rgb8(0x1f, 0x29, 0x37)
        }
    }
}

/// What a trail renders inside its box.
#[derive(Clone, Debug, PartialEq)]
pub enum TrailContent<F> {
    /// A checkbox glyph followed by the label text.
    Checkbox {
        /// The glyph.
        glyph: CheckboxGlyph,
        /// Label text.
        label: String,
    },
    /// A field's value or placeholder, in the field's own style.
    Field {
        /// Displayed text.
        text: String,
        /// Style of the field the text came from.
        style: ComputedStyle,
        /// Icon copied from beside the field, if any.
        icon: Option<F>,
    },
    /// Plain centered text (links and buttons).
    Text(String),
    /// A shallow copy of the element's content.
    Copy(F),
    /// Nothing to show besides the box itself.
    Empty,
}

/// The fade-out animation of a trail.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrailMotion {
    /// Offset of the position the element left.
    pub from: Offset,
    /// Offset of the position the element moved to.
    pub to: Offset,
    /// Final scale per axis; [`TRAIL_SCALE`] on the axes the arrival moves along.
    pub scale: Vec2,
    /// Opacity at the start of the fade; it ends at zero.
    pub start_opacity: f64,
    /// Fade duration in milliseconds.
    pub duration: u64,
}

impl TrailMotion {
    /// Motion for a move from `from` to `to` with the given offsets.
    #[must_use]
    pub fn new(from: Offset, to: Offset, arrival: Position, duration: u64) -> Self {
        let (along_x, along_y) = arrival.axes();
        let axis = |moves: bool| if moves { TRAIL_SCALE } else { 1.0 };
        Self {
            from,
            to,
            scale: Vec2::new(axis(along_x), axis(along_y)),
            start_opacity: TRAIL_START_OPACITY,
            duration,
        }
    }

    /// Inline custom properties the scoped keyframes read.
    #[must_use]
    pub fn custom_properties(&self) -> [(TrailVar, String); 6] {
        [
            (TrailVar::FromX, format!("{}", self.from.x)),
            (TrailVar::FromY, format!("{}", self.from.y)),
            (TrailVar::ToX, format!("{}", self.to.x)),
            (TrailVar::ToY, format!("{}", self.to.y)),
            (TrailVar::ScaleX, format!("{}", self.scale.x)),
            (TrailVar::ScaleY, format!("{}", self.scale.y)),
        ]
    }
}

/// A complete, host-agnostic trail node.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail<F> {
    /// Activation that owns the trail.
    pub scope: InstanceId,
    /// Box relative to the containing surface.
    pub frame: Rect,
    /// Box style.
    pub style: TrailStyle,
    /// Content rendered in the box.
    pub content: TrailContent<F>,
    /// Fade-out animation.
    pub motion: TrailMotion,
}
