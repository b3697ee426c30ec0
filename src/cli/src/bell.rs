use std::{
    io::{self, IsTerminal, Write},
    thread,
    time::Duration,
};

use controls::{AudioBackend, AudioError, Tone};

/// Plays cues on the terminal bell, one ring per tone. The bell has a single
/// pitch, so only the timing of a cue survives.
pub struct TerminalBell;

impl AudioBackend for TerminalBell {
    type Context = io::Stderr;

    fn open(&mut self) -> Result<io::Stderr, AudioError> {
        let stderr = io::stderr();
        if stderr.is_terminal() {
            Ok(stderr)
        } else {
            Err(AudioError::Unavailable("stderr is not a terminal".to_owned()))
        }
    }

    fn play(&mut self, context: &mut io::Stderr, tones: &[Tone]) -> Result<(), AudioError> {
        let mut elapsed = Duration::ZERO;
        for tone in tones {
            thread::sleep(tone.delay.saturating_sub(elapsed));
            elapsed = elapsed.max(tone.delay);
            context
                .write_all(b"\x07")
                .and_then(|()| context.flush())
                .map_err(|err| AudioError::Playback(err.to_string()))?;
        }
        Ok(())
    }

    fn close(&mut self, _context: io::Stderr) {}
}
