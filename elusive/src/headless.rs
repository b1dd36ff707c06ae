// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Host`] for tests and for embedders that lay out and paint
//! on their own.
//!
//! A [`Scene`] holds containers, elements and trail nodes, and keeps rule
//! text in a [`RuleStore`]. Transitions are instantaneous: an element's
//! bounds are shifted by the offset that comes with its position as soon as
//! it is set, and the caller reports the transition end whenever it likes.
//!
//! ```rust
//! use elusive::headless::Scene;
//! use elusive::{Activation, Config, PointerTracker};
//! use elusive_position::Position;
//! use elusive_trail::ElementKind;
//! use kurbo::Rect;
//!
//! let mut scene = Scene::new();
//! let form = scene.add_container(Rect::new(0.0, 0.0, 400.0, 400.0));
//! let button = scene.add_element(Some(form), Rect::new(150.0, 180.0, 250.0, 220.0));
//! scene.set_text(button, "Sign in");
//!
//! let pointer = PointerTracker::new();
//! let config = Config::new().seed(1);
//! let mut a = Activation::mount(&mut scene, button, ElementKind::Action, config, pointer);
//!
//! a.pointer_enter(&mut scene, 0);
//! assert_ne!(a.position(), Position::Center);
//! assert_eq!(scene.trail_count(), 1);
//!
//! a.unmount(&mut scene);
//! assert_eq!(scene.trail_count(), 0);
//! assert!(scene.rules().is_empty());
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use elusive_position::{Offset, Position};
use elusive_style::{InstanceId, RuleNodeId, RuleStore, RuleSurface, position_class};
use elusive_trail::{ComputedStyle, FieldSnapshot, Trail, TrailSurface};
use kurbo::Rect;

use crate::host::Host;

/// Handle to an element in a [`Scene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(u32);

/// Handle to a container in a [`Scene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainerId(u32);

/// Generational handle to a trail node in a [`Scene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrailNodeId(u32, u32);

/// Handle to a signal subscription in a [`Scene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

#[derive(Clone, Debug)]
struct Container {
    bounds: Rect,
    positioned: bool,
}

#[derive(Clone, Debug)]
struct Element {
    layout: Rect,
    container: Option<ContainerId>,
    style: ComputedStyle,
    text: String,
    field: Option<FieldSnapshot>,
    checked: bool,
    icon: Option<String>,
    offset: Offset,
    tag: Option<InstanceId>,
    position: Option<Position>,
    classes: Vec<String>,
}

#[derive(Clone, Debug)]
struct TrailSlot {
    generation: u32,
    node: Option<(ContainerId, Trail<String>)>,
}

/// An in-memory host.
///
/// Fragments (icons and shallow copies) are plain strings.
#[derive(Debug, Default)]
pub struct Scene {
    containers: Vec<Container>,
    elements: Vec<Option<Element>>,
    trails: Vec<TrailSlot>,
    free_trails: Vec<u32>,
    rules: RuleStore,
    listeners: Vec<(SubscriptionId, ElementId, InstanceId)>,
    next_subscription: u32,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a container with on-screen `bounds`.
    pub fn add_container(&mut self, bounds: Rect) -> ContainerId {
        let id = ContainerId(index(self.containers.len()));
        self.containers.push(Container {
            bounds,
            positioned: false,
        });
        id
    }

    /// Adds an element laid out at `layout` (before any evasive transform).
    pub fn add_element(&mut self, container: Option<ContainerId>, layout: Rect) -> ElementId {
        let id = ElementId(index(self.elements.len()));
        self.elements.push(Some(Element {
            layout,
            container,
            style: ComputedStyle::default(),
            text: String::new(),
            field: None,
            checked: false,
            icon: None,
            offset: Offset::ZERO,
            tag: None,
            position: None,
            classes: Vec::new(),
        }));
        id
    }

    /// Removes an element; later reads of it come back empty.
    pub fn remove_element(&mut self, element: ElementId) {
        if let Some(slot) = self.elements.get_mut(element.0 as usize) {
            *slot = None;
        }
    }

    /// Sets the element's text content.
    pub fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(e) = self.element_mut(element) {
            e.text = text.to_string();
        }
    }

    /// Sets the element's computed style.
    pub fn set_style(&mut self, element: ElementId, style: ComputedStyle) {
        if let Some(e) = self.element_mut(element) {
            e.style = style;
        }
    }

    /// Gives the element a backing text field.
    pub fn set_field(&mut self, element: ElementId, field: FieldSnapshot) {
        if let Some(e) = self.element_mut(element) {
            e.field = Some(field);
        }
    }

    /// Sets the checked state of the element's checkbox.
    pub fn set_checked(&mut self, element: ElementId, checked: bool) {
        if let Some(e) = self.element_mut(element) {
            e.checked = checked;
        }
    }

    /// Sets the icon shown next to the element's field.
    pub fn set_icon(&mut self, element: ElementId, icon: &str) {
        if let Some(e) = self.element_mut(element) {
            e.icon = Some(icon.to_string());
        }
    }

    /// The position an element is shown at, if an activation set one.
    #[must_use]
    pub fn element_position(&self, element: ElementId) -> Option<Position> {
        self.element(element).and_then(|e| e.position)
    }

    /// The element's position classes.
    #[must_use]
    pub fn classes(&self, element: ElementId) -> &[String] {
        self.element(element).map_or(&[][..], |e| e.classes.as_slice())
    }

    /// The id the element is tagged with.
    #[must_use]
    pub fn tag_of(&self, element: ElementId) -> Option<InstanceId> {
        self.element(element).and_then(|e| e.tag)
    }

    /// Returns `true` if the container was made a positioning context.
    #[must_use]
    pub fn is_positioned(&self, container: ContainerId) -> bool {
        self.containers
            .get(container.0 as usize)
            .is_some_and(|c| c.positioned)
    }

    /// Number of attached trail nodes.
    #[must_use]
    pub fn trail_count(&self) -> usize {
        self.trails.iter().filter(|t| t.node.is_some()).count()
    }

    /// Attached trail nodes with their container.
    pub fn trails(&self) -> impl Iterator<Item = (TrailNodeId, ContainerId, &Trail<String>)> + '_ {
        self.trails.iter().enumerate().filter_map(|(idx, slot)| {
            slot.node
                .as_ref()
                .map(|(c, t)| (TrailNodeId(index(idx), slot.generation), *c, t))
        })
    }

    /// The trail attached as `node`, if still attached.
    #[must_use]
    pub fn trail(&self, node: TrailNodeId) -> Option<&Trail<String>> {
        let slot = self.trails.get(node.0 as usize)?;
        if slot.generation != node.1 {
            return None;
        }
        slot.node.as_ref().map(|(_, t)| t)
    }

    /// Injected rule text.
    #[must_use]
    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    /// Number of live signal subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// The activation subscribed to `element`, if any.
    #[must_use]
    pub fn listener(&self, element: ElementId) -> Option<InstanceId> {
        self.listeners
            .iter()
            .find(|(_, e, _)| *e == element)
            .map(|(_, _, id)| *id)
    }

    fn element(&self, element: ElementId) -> Option<&Element> {
        self.elements.get(element.0 as usize)?.as_ref()
    }

    fn element_mut(&mut self, element: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(element.0 as usize)?.as_mut()
    }
}

fn index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl RuleSurface for Scene {
    type RuleNode = RuleNodeId;

    fn insert_rules(&mut self, scope: InstanceId, text: String) -> RuleNodeId {
        self.rules.insert_rules(scope, text)
    }

    fn remove_rules(&mut self, node: RuleNodeId) {
        self.rules.remove_rules(node);
    }
}

impl TrailSurface for Scene {
    type Element = ElementId;
    type Container = ContainerId;
    type Node = TrailNodeId;
    type Fragment = String;

    fn element_bounds(&self, element: ElementId) -> Option<Rect> {
        let e = self.element(element)?;
        Some(e.layout + e.offset.resolve(e.layout.size()))
    }

    fn computed_style(&self, element: ElementId) -> Option<ComputedStyle> {
        self.element(element).map(|e| e.style.clone())
    }

    fn container(&self, element: ElementId) -> Option<ContainerId> {
        self.element(element)?.container
    }

    fn container_bounds(&self, container: ContainerId) -> Option<Rect> {
        self.containers.get(container.0 as usize).map(|c| c.bounds)
    }

    fn make_positioned(&mut self, container: ContainerId) {
        if let Some(c) = self.containers.get_mut(container.0 as usize) {
            c.positioned = true;
        }
    }

    fn text_content(&self, element: ElementId) -> String {
        self.element(element)
            .map(|e| e.text.clone())
            .unwrap_or_default()
    }

    fn field(&self, element: ElementId) -> Option<FieldSnapshot> {
        self.element(element)?.field.clone()
    }

    fn checkbox_checked(&self, element: ElementId) -> bool {
        self.element(element).is_some_and(|e| e.checked)
    }

    fn icon(&self, element: ElementId) -> Option<String> {
        self.element(element)?.icon.clone()
    }

    fn shallow_copy(&self, element: ElementId) -> Option<String> {
        let e = self.element(element)?;
        (!e.text.is_empty()).then(|| e.text.clone())
    }

    fn attach_trail(&mut self, container: ContainerId, trail: Trail<String>) -> TrailNodeId {
        if let Some(idx) = self.free_trails.pop() {
            let slot = &mut self.trails[idx as usize];
            slot.node = Some((container, trail));
            TrailNodeId(idx, slot.generation)
        } else {
            let idx = index(self.trails.len());
            self.trails.push(TrailSlot {
                generation: 0,
                node: Some((container, trail)),
            });
            TrailNodeId(idx, 0)
        }
    }

    fn detach_trail(&mut self, node: TrailNodeId) {
        let Some(slot) = self.trails.get_mut(node.0 as usize) else {
            return;
        };
        if slot.generation != node.1 || slot.node.is_none() {
            return;
        }
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_trails.push(node.0);
    }
}

impl Host for Scene {
    type Subscription = SubscriptionId;

    fn tag(&mut self, element: ElementId, id: InstanceId) {
        if let Some(e) = self.element_mut(element) {
            e.tag = Some(id);
        }
    }

    fn untag(&mut self, element: ElementId, id: InstanceId) {
        if let Some(e) = self.element_mut(element) {
            if e.tag == Some(id) {
                e.tag = None;
                e.position = None;
                e.offset = Offset::ZERO;
                e.classes.clear();
            }
        }
    }

    fn set_position(
        &mut self,
        element: ElementId,
        id: InstanceId,
        position: Position,
        offset: Offset,
    ) {
        let Some(e) = self.element_mut(element) else {
            return;
        };
        if e.tag != Some(id) {
            return;
        }
        e.position = Some(position);
        e.offset = offset;
        e.classes.retain(|c| !is_position_class(c));
        e.classes.push(position_class(position));
    }

    fn subscribe(&mut self, element: ElementId, id: InstanceId) -> SubscriptionId {
        let sub = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.listeners.push((sub, element, id));
        sub
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        self.listeners.retain(|(s, _, _)| *s != subscription);
    }
}

fn is_position_class(class: &str) -> bool {
    Position::ALL.iter().any(|p| class == position_class(*p))
}
