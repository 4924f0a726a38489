//! End-to-end long-press gesture tests driven by the gesture robot.

use gridkit_core::Element;
use gridkit_testing::{GestureRobot, Recorder};
use gridkit_widgets::gesture_constants::RESIZE_HANDLE_CLASS;
use gridkit_widgets::{LongPressConfig, LongPressNode};

#[derive(Clone, Debug, PartialEq)]
struct Column {
    name: String,
}

fn column(name: &str) -> Column {
    Column {
        name: name.to_owned(),
    }
}

fn node_for(
    robot: &GestureRobot,
    cell: &gridkit_core::ElementRef,
    config: LongPressConfig<Column>,
) -> LongPressNode<Column> {
    LongPressNode::new(cell, robot.events(), robot.scheduler(), config)
}

struct Sinks {
    starts: Recorder<Column>,
    ticks: Recorder<Column>,
    ends: Recorder<Column>,
}

fn wire(node: &LongPressNode<Column>) -> Sinks {
    let starts = Recorder::new();
    let ticks = Recorder::new();
    let ends = Recorder::new();

    let sink = starts.clone();
    node.on_press_start(move |e| sink.push(e.model.clone()));
    let sink = ticks.clone();
    node.on_pressing(move |e| sink.push(e.model.clone()));
    let sink = ends.clone();
    node.on_press_end(move |m| sink.push(m.clone()));

    Sinks { starts, ticks, ends }
}

#[test]
fn stationary_hold_confirms_and_ticks() {
    let mut robot = GestureRobot::new();
    let cell = Element::new("div");
    let node = node_for(&robot, &cell, LongPressConfig::new(column("name")));
    let sinks = wire(&node);

    let down = robot.press_at(&cell, 100.0, 100.0);
    node.pointer_down(&down);
    assert!(node.is_pressing());
    assert!(!node.is_long_pressing());

    // Confirmation at 500ms, then ticks at 550 and 600.
    robot.hold(600);
    assert!(node.is_long_pressing());
    assert_eq!(sinks.starts.len(), 1);
    assert_eq!(sinks.ticks.len(), 2);
    assert_eq!(sinks.starts.items()[0], column("name"));

    robot.release();
    assert!(!node.is_pressing());
    assert_eq!(sinks.starts.len(), 1);
    assert_eq!(sinks.ends.items(), vec![column("name")]);
    assert_eq!(robot.active_subscriptions(), 0);
}

#[test]
fn ticks_continue_while_held() {
    let mut robot = GestureRobot::new();
    let cell = Element::new("div");
    let node = node_for(&robot, &cell, LongPressConfig::new(column("a")));
    let sinks = wire(&node);

    let down = robot.press_at(&cell, 0.0, 0.0);
    node.pointer_down(&down);

    robot.hold(500);
    assert_eq!(sinks.ticks.len(), 0);
    robot.hold(250);
    assert_eq!(sinks.ticks.len(), 5);

    robot.release();
    let ticks_at_release = sinks.ticks.len();
    robot.hold(500);
    assert_eq!(sinks.ticks.len(), ticks_at_release);
}

#[test]
fn movement_past_threshold_aborts_before_confirmation() {
    let mut robot = GestureRobot::new();
    let cell = Element::new("div");
    let node = node_for(&robot, &cell, LongPressConfig::new(column("a")));
    let sinks = wire(&node);

    let down = robot.press_at(&cell, 100.0, 100.0);
    node.pointer_down(&down);

    robot.hold(200);
    robot.move_to(111.0, 100.0); // 11px on x, breach

    assert!(!node.is_pressing());
    assert_eq!(sinks.ends.len(), 1);
    assert_eq!(robot.active_subscriptions(), 0);

    // The pending confirmation timer was cancelled with the press.
    robot.hold(1_000);
    assert!(sinks.starts.is_empty());
    assert!(sinks.ticks.is_empty());
    assert_eq!(sinks.ends.len(), 1);
}

#[test]
fn movement_within_threshold_does_not_abort() {
    let mut robot = GestureRobot::new();
    let cell = Element::new("div");
    let node = node_for(&robot, &cell, LongPressConfig::new(column("a")));
    let sinks = wire(&node);

    let down = robot.press_at(&cell, 100.0, 100.0);
    node.pointer_down(&down);

    robot.move_to(110.0, 110.0); // exactly at tolerance on both axes
    robot.hold(500);

    assert_eq!(sinks.starts.len(), 1);
}

#[test]
fn movement_after_confirmation_does_not_cancel() {
    let mut robot = GestureRobot::new();
    let cell = Element::new("div");
    let node = node_for(&robot, &cell, LongPressConfig::new(column("a")));
    let sinks = wire(&node);

    let down = robot.press_at(&cell, 100.0, 100.0);
    node.pointer_down(&down);
    robot.hold(500);
    assert_eq!(sinks.starts.len(), 1);

    robot.move_to(400.0, 400.0);
    assert!(node.is_long_pressing());

    robot.hold(100);
    assert_eq!(sinks.ticks.len(), 2);
    assert!(sinks.ends.is_empty());
}

#[test]
fn non_primary_button_is_ignored() {
    let mut robot = GestureRobot::new();
    let cell = Element::new("div");
    let node = node_for(&robot, &cell, LongPressConfig::new(column("a")));
    let sinks = wire(&node);

    let down = robot.press_secondary_at(&cell, 100.0, 100.0);
    node.pointer_down(&down);

    assert!(!node.is_pressing());
    assert_eq!(robot.active_subscriptions(), 0);
    robot.hold(1_000);
    assert!(sinks.starts.is_empty());
    assert!(sinks.ends.is_empty());
}

#[test]
fn resize_handle_target_is_ignored() {
    let mut robot = GestureRobot::new();
    let cell = Element::new("div");
    let handle = Element::new("span");
    handle.add_class(RESIZE_HANDLE_CLASS);
    cell.append_child(&handle);

    let node = node_for(&robot, &cell, LongPressConfig::new(column("a")));
    let sinks = wire(&node);

    let down = robot.press_at(&handle, 100.0, 100.0);
    node.pointer_down(&down);

    assert!(!node.is_pressing());
    assert_eq!(robot.active_subscriptions(), 0);
    robot.hold(1_000);
    assert!(sinks.starts.is_empty());
}

#[test]
fn disabled_node_is_ignored() {
    let mut robot = GestureRobot::new();
    let cell = Element::new("div");
    let node = node_for(
        &robot,
        &cell,
        LongPressConfig::new(column("a")).with_enabled(false),
    );
    let sinks = wire(&node);

    let down = robot.press_at(&cell, 100.0, 100.0);
    node.pointer_down(&down);

    assert!(!node.is_pressing());
    assert_eq!(robot.active_subscriptions(), 0);
    robot.hold(1_000);
    assert!(sinks.starts.is_empty());
    assert!(sinks.ends.is_empty());
}

#[test]
fn custom_duration_is_honored() {
    let mut robot = GestureRobot::new();
    let cell = Element::new("div");
    let node = node_for(
        &robot,
        &cell,
        LongPressConfig::new(column("a")).with_duration_ms(200),
    );
    let sinks = wire(&node);

    let down = robot.press_at(&cell, 0.0, 0.0);
    node.pointer_down(&down);

    robot.hold(199);
    assert!(sinks.starts.is_empty());
    robot.hold(1);
    assert_eq!(sinks.starts.len(), 1);
}

#[test]
fn host_classes_reflect_press_state() {
    let mut robot = GestureRobot::new();
    let cell = Element::new("div");
    let node = node_for(&robot, &cell, LongPressConfig::new(column("a")));

    let down = robot.press_at(&cell, 0.0, 0.0);
    node.pointer_down(&down);
    assert!(cell.has_class("press"));
    assert!(!cell.has_class("longpress"));

    robot.hold(500);
    assert!(cell.has_class("press"));
    assert!(cell.has_class("longpress"));

    robot.release();
    assert!(!cell.has_class("press"));
    assert!(!cell.has_class("longpress"));
}

#[test]
fn dispose_is_idempotent_and_silent() {
    let mut robot = GestureRobot::new();
    let cell = Element::new("div");
    let node = node_for(&robot, &cell, LongPressConfig::new(column("a")));
    let sinks = wire(&node);

    let down = robot.press_at(&cell, 0.0, 0.0);
    node.pointer_down(&down);
    robot.hold(500);

    node.dispose();
    node.dispose();

    assert_eq!(robot.active_subscriptions(), 0);
    assert!(!cell.has_class("press"));
    assert!(sinks.ends.is_empty());

    // Nothing fires after teardown, and new gestures are refused.
    robot.hold(1_000);
    assert_eq!(sinks.ticks.len(), 0);
    let down = robot.press_at(&cell, 0.0, 0.0);
    node.pointer_down(&down);
    assert!(!node.is_pressing());
}

#[test]
fn dispose_when_idle_is_safe() {
    let robot = GestureRobot::new();
    let cell = Element::new("div");
    let node = node_for(&robot, &cell, LongPressConfig::new(column("a")));

    node.dispose();
    node.dispose();
    assert_eq!(robot.active_subscriptions(), 0);
}
