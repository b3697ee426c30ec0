//! Timed playback of a move list, one move per tick.
//!
//! The player owns no timer. The caller asks for [`AutoPlay::next_deadline`],
//! waits however it likes and then calls [`AutoPlay::poll`] with the current
//! time. Pausing, stopping or resetting simply drops the pending deadline.

use std::time::{Duration, Instant};

use cube_core::Move;
use log::debug;

pub const DEFAULT_SPEED: Duration = Duration::from_millis(500);

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone)]
pub struct AutoPlay {
    moves: Vec<Move>,
    current_step: usize,
    speed: Duration,
    state: PlaybackState,
    next_tick: Option<Instant>,
}

impl Default for AutoPlay {
    fn default() -> Self {
        AutoPlay {
            moves: Vec::new(),
            current_step: 0,
            speed: DEFAULT_SPEED,
            state: PlaybackState::Idle,
            next_tick: None,
        }
    }
}

impl AutoPlay {
    pub fn new() -> AutoPlay {
        AutoPlay::default()
    }

    /// Load `moves` and start playing from the first one. The first move is
    /// due one `speed` after `now`. A zero `speed` means [`DEFAULT_SPEED`].
    pub fn start(&mut self, moves: Vec<Move>, speed: Duration, now: Instant) {
        self.moves = moves;
        self.current_step = 0;
        self.speed = if speed.is_zero() { DEFAULT_SPEED } else { speed };
        self.state = PlaybackState::Running;
        debug!(
            target: "autoplay",
            "Starting {} moves every {:?}", self.moves.len(), self.speed
        );
        self.schedule(now);
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Running {
            debug!(target: "autoplay", "Paused at step {}", self.current_step);
            self.state = PlaybackState::Paused;
            self.next_tick = None;
        }
    }

    /// Continue from where playback was paused
    pub fn resume(&mut self, now: Instant) {
        if self.state == PlaybackState::Paused {
            debug!(target: "autoplay", "Resuming at step {}", self.current_step);
            self.state = PlaybackState::Running;
            self.schedule(now);
        }
    }

    /// Skip to the end without applying the remaining moves
    pub fn stop(&mut self) {
        debug!(target: "autoplay", "Stopped at step {}", self.current_step);
        self.current_step = self.moves.len();
        self.finish();
    }

    /// Apply the next move right away, whether or not playback is running.
    /// A running player waits a full `speed` before the move after it.
    pub fn step_forward(&mut self, now: Instant, on_move: impl FnOnce(Move)) -> Option<Move> {
        let mv = *self.moves.get(self.current_step)?;
        on_move(mv);
        self.current_step += 1;
        debug!(
            target: "autoplay",
            "Played {mv} ({}/{})", self.current_step, self.moves.len()
        );

        if self.current_step == self.moves.len() {
            self.finish();
        } else if self.state == PlaybackState::Running {
            self.schedule(now);
        }
        Some(mv)
    }

    /// Back to idle with nothing loaded
    pub fn reset(&mut self) {
        *self = AutoPlay::default();
    }

    /// Change the pace. Position and state are kept; a running player
    /// reschedules its next move from `now`.
    pub fn set_speed(&mut self, speed: Duration, now: Instant) {
        self.speed = if speed.is_zero() { DEFAULT_SPEED } else { speed };
        if self.state == PlaybackState::Running {
            self.schedule(now);
        }
    }

    /// Play the next move if it is due
    pub fn poll(&mut self, now: Instant, on_move: impl FnOnce(Move)) -> Option<Move> {
        match self.next_tick {
            Some(deadline) if deadline <= now => self.step_forward(now, on_move),
            _ => None,
        }
    }

    /// When the next move is due, if playback is running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.moves.len()
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// Percentage of moves played, 0 when nothing is loaded
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.moves.is_empty() {
            0.0
        } else {
            self.current_step as f64 / self.moves.len() as f64 * 100.0
        }
    }

    /// The move that plays next
    pub fn current_move(&self) -> Option<Move> {
        self.moves.get(self.current_step).copied()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    fn schedule(&mut self, now: Instant) {
        if self.current_step >= self.moves.len() {
            self.finish();
        } else {
            self.next_tick = Some(now + self.speed);
        }
    }

    fn finish(&mut self) {
        if self.state != PlaybackState::Finished {
            debug!(target: "autoplay", "Finished");
        }
        self.state = PlaybackState::Finished;
        self.next_tick = None;
    }
}
