use controls::{AudioBackend, AudioError, Cue, SoundEffects, Tone};

#[derive(Default)]
struct Recorder {
    opened: usize,
    closed: usize,
    played: Vec<f32>,
    fail_open: bool,
}

impl AudioBackend for Recorder {
    type Context = usize;

    fn open(&mut self) -> Result<usize, AudioError> {
        if self.fail_open {
            return Err(AudioError::Unavailable("no device".to_owned()));
        }
        self.opened += 1;
        Ok(self.opened)
    }

    fn play(&mut self, _context: &mut usize, tones: &[Tone]) -> Result<(), AudioError> {
        self.played.extend(tones.iter().map(|t| t.frequency_hz));
        Ok(())
    }

    fn close(&mut self, _context: usize) {
        self.closed += 1;
    }
}

#[test_log::test]
fn one_context_for_all_cues() {
    let mut sounds = SoundEffects::new(Recorder::default());
    assert!(!sounds.is_open());

    sounds.play(Cue::Move);
    sounds.play(Cue::Shuffle);
    sounds.play(Cue::Success);
    assert!(sounds.is_open());
    assert_eq!(sounds.backend().opened, 1);
    assert_eq!(
        sounds.backend().played,
        [600.0, 700.0, 650.0, 600.0, 800.0, 1000.0]
    );

    sounds.dispose();
    assert_eq!(sounds.backend().closed, 1);
    sounds.play(Cue::Reset);
    assert_eq!(sounds.backend().opened, 2);
}

#[test_log::test]
fn muted_effects_never_open_a_context() {
    let mut sounds = SoundEffects::new(Recorder::default());
    sounds.set_enabled(false);
    sounds.play(Cue::Error);
    assert!(!sounds.is_open());
    assert!(sounds.backend().played.is_empty());
}

#[test_log::test]
fn missing_output_is_tolerated() {
    let mut sounds = SoundEffects::new(Recorder {
        fail_open: true,
        ..Recorder::default()
    });
    sounds.play(Cue::Move);
    sounds.play(Cue::Move);
    assert!(!sounds.is_open());
    assert!(sounds.backend().played.is_empty());
}
