use std::{cell::RefCell, rc::Rc};

use cube_core::{Face, Move, Turn};
use log::{debug, trace};

use crate::listeners::{EventSource, Subscription};

/// Shorter drags are taps, not swipes
pub const MIN_SWIPE_DISTANCE: f64 = 30.0;

/// A touch point in screen pixels, `y` growing downwards
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TouchEvent {
    Start(Point),
    End(Point),
    Cancel,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// The turn a swipe performs. Swipes drag the surface of the cube, so a
    /// leftward swipe turns the right face.
    pub fn to_move(self) -> Move {
        let face = match self {
            SwipeDirection::Left => Face::R,
            SwipeDirection::Right => Face::L,
            SwipeDirection::Up => Face::D,
            SwipeDirection::Down => Face::U,
        };
        Move::new(face, Turn::Clockwise)
    }
}

/// Classify the drag from `start` to `end` into one of four 90° sectors
/// centered on the screen axes. Returns `None` for drags shorter than
/// [`MIN_SWIPE_DISTANCE`].
pub fn swipe_direction(start: Point, end: Point) -> Option<SwipeDirection> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx.hypot(dy) < MIN_SWIPE_DISTANCE {
        return None;
    }

    let degrees = dy.atan2(dx).to_degrees().rem_euclid(360.0);
    Some(if !(45.0..=315.0).contains(&degrees) {
        SwipeDirection::Right
    } else if degrees < 135.0 {
        SwipeDirection::Down
    } else if degrees < 225.0 {
        SwipeDirection::Left
    } else {
        SwipeDirection::Up
    })
}

/// Follows one touch at a time from start to end
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<Point>,
}

impl SwipeTracker {
    pub fn new() -> SwipeTracker {
        SwipeTracker::default()
    }

    /// Feed a touch event. A finished swipe yields its move.
    ///
    /// `enabled` only gates the start of a touch, so a swipe already in
    /// progress still completes.
    pub fn handle(&mut self, event: TouchEvent, enabled: bool) -> Option<Move> {
        match event {
            TouchEvent::Start(point) => {
                if enabled {
                    self.start = Some(point);
                }
                None
            }
            TouchEvent::End(end) => {
                let start = self.start.take()?;
                let direction = swipe_direction(start, end);
                trace!(target: "swipe", "{start:?} -> {end:?} is {direction:?}");
                direction.map(SwipeDirection::to_move)
            }
            TouchEvent::Cancel => {
                self.start = None;
                None
            }
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

/// Turns swipes over one container into moves while attached. Dropping the
/// controls detaches them.
pub struct SwipeControls {
    tracker: Rc<RefCell<(SwipeTracker, bool)>>,
    _subscription: Subscription<TouchEvent>,
}

impl SwipeControls {
    pub fn attach(
        container: &EventSource<TouchEvent>,
        mut on_move: impl FnMut(Move) + 'static,
    ) -> SwipeControls {
        let tracker = Rc::new(RefCell::new((SwipeTracker::new(), true)));
        let subscription = container.listen({
            let tracker = Rc::clone(&tracker);
            move |event| {
                let mv = {
                    let mut state = tracker.borrow_mut();
                    let (tracker, enabled) = &mut *state;
                    tracker.handle(*event, *enabled)
                };
                if let Some(mv) = mv {
                    debug!(target: "swipe", "Swiped {mv}");
                    on_move(mv);
                }
            }
        });

        SwipeControls {
            tracker,
            _subscription: subscription,
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.tracker.borrow_mut().1 = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.tracker.borrow().1
    }
}
