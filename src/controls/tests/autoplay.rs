use std::time::{Duration, Instant};

use controls::{AutoPlay, PlaybackState};
use cube_core::{CubeSession, invert_sequence, parse_sequence};

#[test_log::test]
fn stepping_before_the_first_tick() {
    let t0 = Instant::now();
    let mut session = CubeSession::new();
    let mut player = AutoPlay::new();
    player.start(
        parse_sequence("U R F").unwrap(),
        Duration::from_millis(100),
        t0,
    );

    let stepped = player.step_forward(t0, |mv| session.apply(mv));
    assert_eq!(stepped, Some("U".parse().unwrap()));
    assert_eq!(player.current_step(), 1);
    assert_eq!(session.history().applied().len(), 1);
    assert!(player.is_running());

    // The timer restarted from the manual step
    assert_eq!(player.poll(t0 + Duration::from_millis(99), |mv| session.apply(mv)), None);
    assert_eq!(
        player.next_deadline(),
        Some(t0 + Duration::from_millis(100))
    );
}

#[test_log::test]
fn playing_a_scramble_and_its_inverse_solves() {
    let t0 = Instant::now();
    let tick = Duration::from_millis(10);
    let mut session = CubeSession::new();
    let scramble = parse_sequence("R U R' U' F2 D L' B").unwrap();

    let mut player = AutoPlay::new();
    let mut moves = scramble.clone();
    moves.extend(invert_sequence(&scramble));
    player.start(moves, tick, t0);

    let mut now = t0;
    while let Some(deadline) = player.next_deadline() {
        now = deadline;
        player.poll(now, |mv| session.apply(mv));
        if player.current_step() == scramble.len() {
            assert!(!session.is_solved());
        }
    }

    assert_eq!(player.state(), PlaybackState::Finished);
    assert_eq!(player.current_step(), 16);
    assert_eq!(now, t0 + tick * 16);
    assert!(session.is_solved());
}

#[test_log::test]
fn progress_and_current_move() {
    let t0 = Instant::now();
    let mut player = AutoPlay::new();
    player.start(parse_sequence("U R F D").unwrap(), Duration::ZERO, t0);
    assert_eq!(player.speed(), Duration::from_millis(500));

    player.step_forward(t0, |_| {});
    assert!((player.progress() - 25.0).abs() < 1e-9);
    assert_eq!(player.current_move(), Some("R".parse().unwrap()));
    assert_eq!(player.total_steps(), 4);
}
