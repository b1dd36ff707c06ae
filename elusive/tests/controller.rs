// Copyright 2025 the Elusive Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior of a mounted activation driven through the headless scene.
//!
//! The managed element is a 100x20 box centered in a 400x400 container, so a
//! default `120%` move always carries it out from under a pointer resting on
//! its original location.

use std::cell::Cell;
use std::rc::Rc;

use elusive::headless::{ElementId, Scene};
use elusive::{Activation, Config, MAX_STEPS_PER_DISPATCH, PointerTracker};
use elusive_position::{Length, MoveDistance, Position, PositionSet};
use elusive_trail::{ElementKind, TrailContent};
use kurbo::{Point, Rect};

const HOME: Rect = Rect::new(150.0, 190.0, 250.0, 210.0);
const HOME_CENTER: Point = Point::new(200.0, 200.0);

struct Rig {
    scene: Scene,
    element: ElementId,
    pointer: PointerTracker,
    moves: Rc<Cell<u32>>,
    activation: Activation<Scene>,
}

fn rig(kind: ElementKind, config: Config) -> Rig {
    let mut scene = Scene::new();
    let form = scene.add_container(Rect::new(0.0, 0.0, 400.0, 400.0));
    let element = scene.add_element(Some(form), HOME);
    scene.set_text(element, "Forgot password?");
    let pointer = PointerTracker::new();
    let moves = Rc::new(Cell::new(0));
    let counter = moves.clone();
    let config = config
        .seed(42)
        .on_move(move || counter.set(counter.get() + 1));
    let activation = Activation::mount(&mut scene, element, kind, config, pointer.clone());
    Rig {
        scene,
        element,
        pointer,
        moves,
        activation,
    }
}

fn two_way() -> Config {
    Config::new().allowed_positions(PositionSet::LEFT | PositionSet::RIGHT)
}

fn opposite(p: Position) -> Position {
    match p {
        Position::Left => Position::Right,
        Position::Right => Position::Left,
        other => panic!("not a horizontal position: {other:?}"),
    }
}

#[test]
fn mount_tags_element_and_injects_scoped_rules() {
    let r = rig(ElementKind::Action, Config::new());
    let id = r.activation.instance_id();
    assert_eq!(r.scene.tag_of(r.element), Some(id));
    assert_eq!(r.scene.element_position(r.element), Some(Position::Center));
    assert_eq!(r.scene.classes(r.element), ["elusive-center"]);
    assert_eq!(r.scene.listener(r.element), Some(id));
    assert!(r.scene.rules().contains_scope(id));
    let (_, text) = r.scene.rules().iter().next().unwrap();
    assert!(text.contains(&id.selector()));
    assert!(text.contains("100ms"));
    assert!(text.contains(&id.fade_animation()));
}

#[test]
fn enter_moves_spawns_trail_and_calls_on_move() {
    let mut r = rig(ElementKind::Action, Config::new());
    r.pointer.moved(HOME_CENTER);
    r.activation.pointer_enter(&mut r.scene, 0);

    let p = r.activation.position();
    assert_ne!(p, Position::Center);
    assert!(r.activation.is_moving());
    assert_eq!(r.scene.element_position(r.element), Some(p));
    assert_eq!(r.moves.get(), 1);

    assert_eq!(r.scene.trail_count(), 1);
    let (_, container, trail) = r.scene.trails().next().unwrap();
    assert!(r.scene.is_positioned(container));
    assert_eq!(trail.frame, HOME);
    assert_eq!(trail.content, TrailContent::Text("Forgot password?".into()));
    assert_eq!(trail.motion.from, MoveDistance::default().offset(Position::Center));
    assert_eq!(trail.motion.to, MoveDistance::default().offset(p));
}

#[test]
fn two_settled_enters_alternate_between_two_positions() {
    let mut r = rig(ElementKind::Action, two_way());
    r.activation.pointer_enter(&mut r.scene, 0);
    let first = r.activation.position();
    assert!(matches!(first, Position::Left | Position::Right));

    r.activation.transition_end(&mut r.scene, 100);
    assert!(!r.activation.is_moving());

    r.activation.pointer_enter(&mut r.scene, 200);
    assert_eq!(r.activation.position(), opposite(first));
    assert_eq!(r.moves.get(), 2);
}

#[test]
fn enter_while_moving_is_ignored() {
    let mut r = rig(ElementKind::Action, two_way());
    r.activation.pointer_enter(&mut r.scene, 0);
    let first = r.activation.position();
    r.activation.pointer_enter(&mut r.scene, 10);
    assert_eq!(r.activation.position(), first);
    assert_eq!(r.moves.get(), 1);
    assert_eq!(r.scene.trail_count(), 1);
}

#[test]
fn return_waits_for_the_delay_after_leave() {
    let mut r = rig(ElementKind::Action, two_way().return_delay(500).trail_duration(10_000));
    r.activation.pointer_enter(&mut r.scene, 0);
    let moved = r.activation.position();
    r.activation.transition_end(&mut r.scene, 100);

    r.activation.pointer_leave(&mut r.scene, 1000);
    assert!(r.activation.is_return_pending());
    assert_eq!(r.activation.next_deadline(), Some(1500));

    r.activation.advance(&mut r.scene, 1499);
    assert_eq!(r.activation.position(), moved);

    r.activation.advance(&mut r.scene, 1500);
    assert_eq!(r.activation.position(), Position::Center);
    assert!(r.activation.is_moving());
    assert_eq!(r.scene.classes(r.element), ["elusive-center"]);
    // Returns are not evasive moves and leave no trail.
    assert_eq!(r.moves.get(), 1);
    assert_eq!(r.scene.trail_count(), 1);
}

#[test]
fn enter_before_the_delay_cancels_the_return() {
    let mut r = rig(ElementKind::Action, two_way().return_delay(500).trail_duration(10_000));
    r.activation.pointer_enter(&mut r.scene, 0);
    let first = r.activation.position();
    r.activation.transition_end(&mut r.scene, 0);

    r.activation.pointer_leave(&mut r.scene, 0);
    r.activation.pointer_enter(&mut r.scene, 200);
    assert!(!r.activation.is_return_pending());
    let second = r.activation.position();
    assert_eq!(second, opposite(first));
    r.activation.transition_end(&mut r.scene, 300);

    r.activation.advance(&mut r.scene, 5_000);
    assert_eq!(r.activation.position(), second);
}

#[test]
fn latest_leave_wins() {
    let mut r = rig(ElementKind::Action, two_way().return_delay(500).trail_duration(10_000));
    r.activation.pointer_enter(&mut r.scene, 0);
    r.activation.transition_end(&mut r.scene, 100);
    r.activation.pointer_leave(&mut r.scene, 200);
    r.activation.pointer_leave(&mut r.scene, 400);
    assert_eq!(r.activation.next_deadline(), Some(900));
    r.activation.advance(&mut r.scene, 700);
    assert_ne!(r.activation.position(), Position::Center);
    r.activation.advance(&mut r.scene, 900);
    assert_eq!(r.activation.position(), Position::Center);
}

#[test]
fn settle_under_pointer_moves_again() {
    let mut r = rig(ElementKind::Action, two_way());
    r.activation.pointer_enter(&mut r.scene, 0);
    let first = r.activation.position();

    // The pointer chased the element to its new spot.
    let bounds = elusive_trail::TrailSurface::element_bounds(&r.scene, r.element).unwrap();
    r.pointer.moved(bounds.center());
    r.activation.transition_end(&mut r.scene, 100);

    assert_eq!(r.activation.position(), opposite(first));
    assert!(r.activation.is_moving());
    assert_eq!(r.moves.get(), 2);
}

#[test]
fn settle_edges_count_as_inside() {
    let mut r = rig(ElementKind::Action, two_way());
    r.activation.pointer_enter(&mut r.scene, 0);
    let bounds = elusive_trail::TrailSurface::element_bounds(&r.scene, r.element).unwrap();
    r.pointer.moved(Point::new(bounds.x1, bounds.y1));
    r.activation.transition_end(&mut r.scene, 100);
    assert_eq!(r.moves.get(), 2);
}

#[test]
fn settle_after_return_retriggers_under_pointer() {
    let mut r = rig(ElementKind::Action, two_way().return_delay(0));
    r.activation.pointer_enter(&mut r.scene, 0);
    r.activation.transition_end(&mut r.scene, 100);
    r.activation.pointer_leave(&mut r.scene, 200);
    assert_eq!(r.activation.position(), Position::Center);

    r.pointer.moved(HOME_CENTER);
    r.activation.transition_end(&mut r.scene, 300);
    assert_ne!(r.activation.position(), Position::Center);
    assert_eq!(r.moves.get(), 2);
}

#[test]
fn delayed_retrigger_is_cancelled_by_leave() {
    let mut r = rig(ElementKind::Action, two_way().retrigger_delay(50));
    r.activation.pointer_enter(&mut r.scene, 0);
    let first = r.activation.position();
    let bounds = elusive_trail::TrailSurface::element_bounds(&r.scene, r.element).unwrap();
    r.pointer.moved(bounds.center());
    r.activation.transition_end(&mut r.scene, 100);
    assert!(r.activation.is_move_pending());
    assert_eq!(r.activation.position(), first);

    r.activation.pointer_leave(&mut r.scene, 120);
    assert!(!r.activation.is_move_pending());
    r.activation.advance(&mut r.scene, 200);
    assert_eq!(r.activation.position(), first);
    assert_eq!(r.moves.get(), 1);
}

#[test]
fn max_trails_one_keeps_only_the_latest() {
    let mut r = rig(ElementKind::Action, two_way().max_trails(Some(1)));
    r.activation.pointer_enter(&mut r.scene, 0);
    let first = r.activation.position();
    r.activation.transition_end(&mut r.scene, 10);
    r.activation.pointer_enter(&mut r.scene, 20);

    assert_eq!(r.scene.trail_count(), 1);
    assert_eq!(r.activation.live_trails().len(), 1);
    let (node, _, trail) = r.scene.trails().next().unwrap();
    assert!(r.activation.live_trails().contains(node));
    assert_eq!(trail.motion.from, MoveDistance::default().offset(first));
}

#[test]
fn zero_max_trails_disables_trails_only() {
    let mut r = rig(ElementKind::Action, Config::new().max_trails(Some(0)));
    r.activation.pointer_enter(&mut r.scene, 0);
    assert_ne!(r.activation.position(), Position::Center);
    assert_eq!(r.scene.trail_count(), 0);
}

#[test]
fn trails_expire_after_their_duration() {
    let mut r = rig(ElementKind::Action, two_way().trail_duration(500));
    r.activation.pointer_enter(&mut r.scene, 0);
    r.activation.transition_end(&mut r.scene, 100);
    r.activation.pointer_enter(&mut r.scene, 200);
    assert_eq!(r.scene.trail_count(), 2);

    r.activation.advance(&mut r.scene, 500);
    assert_eq!(r.scene.trail_count(), 1);
    r.activation.advance(&mut r.scene, 700);
    assert_eq!(r.scene.trail_count(), 0);
    assert!(r.activation.live_trails().is_empty());
}

#[test]
fn trail_end_from_host_detaches_early() {
    let mut r = rig(ElementKind::Action, Config::new());
    r.activation.pointer_enter(&mut r.scene, 0);
    let (node, _, _) = r.scene.trails().next().unwrap();
    r.activation.trail_end(&mut r.scene, 300, node);
    assert_eq!(r.scene.trail_count(), 0);
    // The scheduled removal later finds nothing to do.
    r.activation.advance(&mut r.scene, 1_000);
    assert_eq!(r.scene.trail_count(), 0);
}

#[test]
fn disabled_never_moves_or_spawns() {
    let mut r = rig(ElementKind::Action, Config::new().enabled(false));
    r.pointer.moved(HOME_CENTER);
    for t in 0..5 {
        r.activation.pointer_enter(&mut r.scene, t * 100);
        r.activation.transition_end(&mut r.scene, t * 100 + 10);
        r.activation.pointer_leave(&mut r.scene, t * 100 + 20);
    }
    r.activation.advance(&mut r.scene, 10_000);
    assert_eq!(r.activation.position(), Position::Center);
    assert_eq!(r.scene.trail_count(), 0);
    assert_eq!(r.moves.get(), 0);
    assert!(!r.activation.is_return_pending());
}

#[test]
fn disabling_keeps_position_and_cancels_return() {
    let mut r = rig(ElementKind::Action, Config::new());
    r.activation.pointer_enter(&mut r.scene, 0);
    let moved = r.activation.position();
    r.activation.transition_end(&mut r.scene, 100);
    r.activation.pointer_leave(&mut r.scene, 200);

    let config = r.activation.config().clone().enabled(false);
    r.activation.reconfigure(&mut r.scene, config);
    assert!(!r.activation.is_return_pending());
    r.activation.advance(&mut r.scene, 5_000);
    assert_eq!(r.activation.position(), moved);
}

#[test]
fn empty_allowed_set_stays_put() {
    let mut r = rig(ElementKind::Action, Config::new().allowed_positions(PositionSet::empty()));
    r.activation.pointer_enter(&mut r.scene, 0);
    assert_eq!(r.activation.position(), Position::Center);
    assert!(!r.activation.is_moving());
    assert_eq!(r.scene.trail_count(), 0);
    assert_eq!(r.moves.get(), 0);
}

#[test]
fn missing_element_is_a_no_op() {
    let mut r = rig(ElementKind::Action, Config::new());
    r.scene.remove_element(r.element);
    r.activation.pointer_enter(&mut r.scene, 0);
    r.activation.pointer_leave(&mut r.scene, 10);
    r.activation.advance(&mut r.scene, 5_000);
    assert_eq!(r.activation.position(), Position::Center);
    assert_eq!(r.moves.get(), 0);
    r.activation.unmount(&mut r.scene);
    assert!(r.scene.rules().is_empty());
}

#[test]
fn missing_container_still_moves() {
    let mut scene = Scene::new();
    let orphan = scene.add_element(None, HOME);
    let mut a = Activation::mount(
        &mut scene,
        orphan,
        ElementKind::Generic,
        Config::new().seed(3),
        PointerTracker::new(),
    );
    a.pointer_enter(&mut scene, 0);
    assert_ne!(a.position(), Position::Center);
    assert_eq!(scene.trail_count(), 0);
    a.unmount(&mut scene);
}

#[test]
fn teardown_releases_everything() {
    let mut r = rig(ElementKind::Action, two_way().return_delay(500));
    r.activation.pointer_enter(&mut r.scene, 0);
    r.activation.transition_end(&mut r.scene, 100);
    r.activation.pointer_enter(&mut r.scene, 200);
    r.activation.pointer_leave(&mut r.scene, 300);
    assert_eq!(r.scene.trail_count(), 2);

    let Rig {
        mut scene,
        element,
        activation,
        ..
    } = r;
    let id = activation.instance_id();
    activation.unmount(&mut scene);

    assert_eq!(scene.listener_count(), 0);
    assert!(!scene.rules().contains_scope(id));
    assert!(scene.rules().is_empty());
    assert_eq!(scene.trail_count(), 0);
    assert_eq!(scene.tag_of(element), None);
    assert!(scene.classes(element).is_empty());
}

#[test]
fn remount_gets_a_fresh_scope() {
    let mut r = rig(ElementKind::Action, Config::new());
    let first = r.activation.instance_id();
    let Rig {
        mut scene,
        element,
        pointer,
        activation,
        ..
    } = r;
    activation.unmount(&mut scene);

    let again = Activation::mount(&mut scene, element, ElementKind::Action, Config::new(), pointer);
    assert_ne!(again.instance_id(), first);
    assert_eq!(scene.rules().len(), 1);
    assert!(scene.rules().contains_scope(again.instance_id()));
    again.unmount(&mut scene);
}

#[test]
fn concurrent_activations_do_not_interfere() {
    let mut scene = Scene::new();
    let form = scene.add_container(Rect::new(0.0, 0.0, 400.0, 400.0));
    let a_el = scene.add_element(Some(form), HOME);
    let b_el = scene.add_element(Some(form), HOME + kurbo::Vec2::new(0.0, 100.0));
    let pointer = PointerTracker::new();
    let generic = ElementKind::Generic;
    let mut a = Activation::mount(&mut scene, a_el, generic, Config::new(), pointer.clone());
    let b = Activation::mount(&mut scene, b_el, generic, Config::new(), pointer);

    a.pointer_enter(&mut scene, 0);
    assert_ne!(a.position(), Position::Center);
    assert_eq!(b.position(), Position::Center);
    assert_eq!(scene.element_position(b_el), Some(Position::Center));

    a.unmount(&mut scene);
    assert!(scene.rules().contains_scope(b.instance_id()));
    assert_eq!(scene.listener(b_el), Some(b.instance_id()));
    b.unmount(&mut scene);
}

#[test]
fn reconfigure_reinjects_rules_and_evicts_over_bound() {
    let mut r = rig(ElementKind::Action, two_way().trail_duration(10_000));
    r.activation.pointer_enter(&mut r.scene, 0);
    r.activation.transition_end(&mut r.scene, 10);
    r.activation.pointer_enter(&mut r.scene, 20);
    r.activation.transition_end(&mut r.scene, 30);
    r.activation.pointer_enter(&mut r.scene, 40);
    assert_eq!(r.scene.trail_count(), 3);

    let config = r
        .activation
        .config()
        .clone()
        .animation_speed(250)
        .max_trails(Some(1));
    r.activation.reconfigure(&mut r.scene, config);

    assert_eq!(r.scene.trail_count(), 1);
    assert_eq!(r.scene.rules().len(), 1);
    let (_, text) = r.scene.rules().iter().next().unwrap();
    assert!(text.contains("250ms"));
}

#[test]
fn checkbox_trail_captures_checked_state() {
    let mut r = rig(ElementKind::CheckboxLabel, Config::new());
    r.scene.set_text(r.element, "Remember me");
    r.scene.set_checked(r.element, true);
    r.activation.pointer_enter(&mut r.scene, 0);
    r.scene.set_checked(r.element, false);

    let (_, _, trail) = r.scene.trails().next().unwrap();
    match &trail.content {
        TrailContent::Checkbox { glyph, label } => {
            assert!(glyph.checked);
            assert_eq!(label, "Remember me");
        }
        other => panic!("unexpected content {other:?}"),
    }
}

#[test]
fn instant_transitions_are_capped_per_call() {
    // No distance and no animation: the element never leaves the pointer and
    // every move settles on its own.
    let still = MoveDistance::new(Length::Px(0.0), Length::Px(0.0));
    let mut r = rig(
        ElementKind::Action,
        two_way().move_distance(still).animation_speed(0).max_trails(Some(2)),
    );
    r.pointer.moved(HOME_CENTER);

    r.activation.pointer_enter(&mut r.scene, 0);
    let after_first = r.moves.get();
    assert!(after_first > 1);
    assert!(after_first as usize <= MAX_STEPS_PER_DISPATCH);
    assert_eq!(r.activation.next_deadline(), Some(0));
    assert!(r.scene.trail_count() <= 2);

    r.activation.advance(&mut r.scene, 0);
    assert!(r.moves.get() > after_first);

    // Leaving stops the chase once the queued work drains.
    r.pointer.clear();
    r.activation.advance(&mut r.scene, 1);
    let settled = r.moves.get();
    r.activation.advance(&mut r.scene, 2);
    assert_eq!(r.moves.get(), settled);
}

#[test]
fn short_distance_settles_under_pointer_and_moves_again() {
    // A 5px hop never clears a 100px wide element from a pointer at its center.
    let near = MoveDistance::new(Length::Px(5.0), Length::ZERO);
    let mut r = rig(ElementKind::Action, two_way().move_distance(near));
    r.pointer.moved(HOME_CENTER);
    r.activation.pointer_enter(&mut r.scene, 0);
    let first = r.activation.position();

    let bounds = elusive_trail::TrailSurface::element_bounds(&r.scene, r.element).unwrap();
    let dx = if first == Position::Left { -5.0 } else { 5.0 };
    assert_eq!(bounds, HOME + kurbo::Vec2::new(dx, 0.0));

    r.activation.transition_end(&mut r.scene, 100);
    assert_eq!(r.activation.position(), opposite(first));
    assert!(r.activation.is_moving());
    assert_eq!(r.moves.get(), 2);
}

#[test]
fn reconfigured_distance_moves_the_bounds() {
    let mut r = rig(ElementKind::Action, Config::new().allowed_positions(PositionSet::RIGHT));
    r.activation.pointer_enter(&mut r.scene, 0);
    assert_eq!(r.activation.position(), Position::Right);
    let bounds = elusive_trail::TrailSurface::element_bounds(&r.scene, r.element).unwrap();
    assert_eq!(bounds, HOME + kurbo::Vec2::new(120.0, 0.0));

    let near = MoveDistance::new(Length::Px(8.0), Length::Px(8.0));
    let config = r.activation.config().clone().move_distance(near);
    r.activation.reconfigure(&mut r.scene, config);
    let bounds = elusive_trail::TrailSurface::element_bounds(&r.scene, r.element).unwrap();
    assert_eq!(bounds, HOME + kurbo::Vec2::new(8.0, 0.0));
    assert_eq!(r.scene.element_position(r.element), Some(Position::Right));
}
