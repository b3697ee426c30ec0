use std::{cell::RefCell, rc::Rc};

use controls::{
    EventSource, FocusTarget, Key, KeyAction, KeyEvent, KeyboardControls, Point, SwipeControls,
    TouchEvent,
};
use cube_core::{CubeSession, Move};

fn session_with_keyboard(
    keys: &EventSource<KeyEvent>,
) -> (Rc<RefCell<CubeSession>>, KeyboardControls) {
    let session = Rc::new(RefCell::new(CubeSession::new()));
    let controls = KeyboardControls::attach(keys, {
        let session = Rc::clone(&session);
        move |action| {
            let mut session = session.borrow_mut();
            match action {
                KeyAction::Move(mv) => session.apply(mv),
                KeyAction::Undo => {
                    session.undo();
                }
                KeyAction::Redo => {
                    session.redo();
                }
            }
        }
    });
    (session, controls)
}

fn press(keys: &EventSource<KeyEvent>, text: &str) {
    for c in text.chars() {
        keys.emit(&KeyEvent::character(c));
    }
}

#[test_log::test]
fn typing_moves_and_undoing_them() {
    let keys = EventSource::new();
    let (session, _controls) = session_with_keyboard(&keys);

    press(&keys, "Ru5");
    let applied: Vec<String> = session
        .borrow()
        .history()
        .applied()
        .iter()
        .map(Move::to_string)
        .collect();
    assert_eq!(applied, ["R", "U'", "F2"]);

    for _ in 0..3 {
        keys.emit(&KeyEvent::character('z').with_ctrl());
    }
    assert!(session.borrow().is_solved());

    keys.emit(&KeyEvent::new(Key::ArrowRight));
    assert_eq!(session.borrow().history().applied().len(), 1);
}

#[test_log::test]
fn disabled_or_detached_keyboard_does_nothing() {
    let keys = EventSource::new();
    let (session, controls) = session_with_keyboard(&keys);

    controls.set_enabled(false);
    press(&keys, "RUF");
    assert!(session.borrow().is_solved());

    controls.set_enabled(true);
    keys.emit(&KeyEvent::character('R').in_target(FocusTarget::TextInput));
    assert!(session.borrow().is_solved());

    drop(controls);
    assert_eq!(keys.listener_count(), 0);
    press(&keys, "R");
    assert!(session.borrow().is_solved());
}

#[test_log::test]
fn upward_swipe_turns_down_face() {
    let container = EventSource::new();
    let moves = Rc::new(RefCell::new(Vec::new()));
    let _swipes = SwipeControls::attach(&container, {
        let moves = Rc::clone(&moves);
        move |mv| moves.borrow_mut().push(mv.to_string())
    });

    container.emit(&TouchEvent::Start(Point::new(100.0, 100.0)));
    container.emit(&TouchEvent::End(Point::new(100.0, 50.0)));
    assert_eq!(*moves.borrow(), ["D"]);

    container.emit(&TouchEvent::Start(Point::new(100.0, 100.0)));
    container.emit(&TouchEvent::End(Point::new(110.0, 100.0)));
    assert_eq!(moves.borrow().len(), 1);
}

#[test_log::test]
fn swipe_controls_can_be_paused() {
    let container = EventSource::new();
    let count = Rc::new(RefCell::new(0));
    let swipes = SwipeControls::attach(&container, {
        let count = Rc::clone(&count);
        move |_| *count.borrow_mut() += 1
    });

    swipes.set_enabled(false);
    assert!(!swipes.is_enabled());
    container.emit(&TouchEvent::Start(Point::new(0.0, 0.0)));
    container.emit(&TouchEvent::End(Point::new(-100.0, 0.0)));
    assert_eq!(*count.borrow(), 0);

    swipes.set_enabled(true);
    container.emit(&TouchEvent::Start(Point::new(0.0, 0.0)));
    container.emit(&TouchEvent::Cancel);
    container.emit(&TouchEvent::End(Point::new(-100.0, 0.0)));
    assert_eq!(*count.borrow(), 0);

    container.emit(&TouchEvent::Start(Point::new(0.0, 0.0)));
    container.emit(&TouchEvent::End(Point::new(-100.0, 0.0)));
    assert_eq!(*count.borrow(), 1);
}
