#![warn(clippy::pedantic)]

mod bell;
mod config;
mod net;

use std::{
    cell::RefCell,
    io::{self, BufRead},
    path::PathBuf,
    rc::Rc,
    thread,
    time::{Duration, Instant},
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{OptionExt, WrapErr};
use controls::{
    AutoPlay, Cue, Debounce, EventSource, FileStorage, Key, KeyAction, KeyEvent,
    KeyboardControls, Point, SoundEffects, SwipeControls, TouchEvent, clear_cube_state,
    keyboard::KEY_MAP, load_cube_state, save_cube_state,
};
use cube_core::{
    CubeSession, Move, format_sequence, invert_sequence, parse_sequence,
    transforms::{Projector, cubie_faces, face_rotation},
};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info, warn};
use owo_colors::OwoColorize;

use crate::{bell::TerminalBell, config::CubeConfig, net::Style};

/// Turn, scramble and replay a Rubik's Cube from the terminal. The cube is
/// kept between runs.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The configuration file to use, in TOML format.
    #[arg(long, short = 'c', default_value = "cube.toml", value_name = "CONFIG")]
    config: PathBuf,
    /// Where to keep the cube between runs, overriding the configuration
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Draw the cube with color initials instead of colored blocks
    #[arg(long)]
    plain: bool,
    /// Don't ring the terminal bell
    #[arg(long, short)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a sequence of moves, e.g. "R U' F2".
    Apply {
        /// Moves separated by spaces or commas
        sequence: String,
    },
    /// Scramble a solved cube with random moves.
    Scramble {
        /// How many moves to make. Defaults to the configured length.
        #[arg(long, short)]
        length: Option<usize>,
        /// Seed for a reproducible scramble
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play a sequence of moves one at a time.
    Play {
        /// Moves separated by spaces or commas
        sequence: String,
        /// Milliseconds between moves. Defaults to the configured speed.
        #[arg(long, value_name = "MS")]
        speed: Option<u64>,
        /// Play the inverse of the sequence instead
        #[arg(long)]
        invert: bool,
    },
    /// Print the cube.
    Show {
        /// Also print where each cubie is drawn
        #[arg(long)]
        transforms: bool,
    },
    /// Revert the last move.
    Undo,
    /// Reapply the last reverted move.
    Redo,
    /// Return to a solved cube.
    Reset {
        /// Also delete the saved cube
        #[arg(long)]
        forget: bool,
    },
    /// Drive the cube with key presses read from stdin, a line at a time.
    ///
    /// Letters turn faces, `<` and `>` undo and redo, `^z` and `^y` are
    /// Ctrl+Z and Ctrl+Y.
    Keys,
    /// Turn a face by swiping between two screen points.
    Swipe {
        /// Where the touch starts, as `x,y` in pixels
        #[arg(value_parser = parse_point)]
        from: Point,
        /// Where the touch ends, as `x,y` in pixels
        #[arg(value_parser = parse_point)]
        to: Point,
    },
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|err| format!("`{v}` is not a number: {err}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

/// The cube along with everything that reacts to it
struct App {
    config: CubeConfig,
    session: CubeSession,
    storage: Option<FileStorage>,
    sounds: SoundEffects<TerminalBell>,
    style: Style,
}

impl App {
    fn open(config: CubeConfig, style: Style, quiet: bool) -> App {
        let storage = config
            .state_dir
            .clone()
            .map(FileStorage::new)
            .or_else(FileStorage::in_data_dir);
        let session = match &storage {
            Some(storage) => {
                info!(target: "cli", "Keeping the cube in {}", storage.dir().display());
                load_cube_state(storage).unwrap_or_default()
            }
            None => {
                warn!(target: "cli", "No data directory, the cube will not be kept");
                CubeSession::new()
            }
        };

        let mut sounds = SoundEffects::new(TerminalBell);
        sounds.set_enabled(config.sound && !quiet);

        App {
            config,
            session,
            storage,
            sounds,
            style,
        }
    }

    fn save(&mut self) {
        if let Some(storage) = &mut self.storage {
            save_cube_state(storage, &self.session);
        }
    }

    fn show(&self) {
        print!("{}", net::render(self.session.cube(), self.style));
        if self.session.is_solved() {
            println!("{}", "Solved!".green());
        }
    }

    /// Apply `mv`, cheering if it solves the cube
    fn apply(&mut self, mv: Move) {
        let was_solved = self.session.is_solved();
        self.session.apply(mv);
        self.after_move(was_solved);
    }

    fn undo(&mut self) -> bool {
        let was_solved = self.session.is_solved();
        let Some(mv) = self.session.undo() else {
            eprintln!("{}", "Nothing to undo".red());
            self.sounds.play(Cue::Error);
            return false;
        };
        info!(target: "cli", "Undid with {mv}");
        self.after_move(was_solved);
        true
    }

    fn redo(&mut self) -> bool {
        let was_solved = self.session.is_solved();
        let Some(mv) = self.session.redo() else {
            eprintln!("{}", "Nothing to redo".red());
            self.sounds.play(Cue::Error);
            return false;
        };
        info!(target: "cli", "Redid {mv}");
        self.after_move(was_solved);
        true
    }

    fn after_move(&mut self, was_solved: bool) {
        if !was_solved && self.session.is_solved() {
            self.sounds.play(Cue::Success);
        } else {
            self.sounds.play(Cue::Move);
        }
    }

    fn parse(&mut self, sequence: &str) -> color_eyre::Result<Vec<Move>> {
        parse_sequence(sequence)
            .inspect_err(|_| self.sounds.play(Cue::Error))
            .wrap_err_with(|| format!("Invalid move sequence `{sequence}`"))
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let mut config = CubeConfig::load(&cli.config)?;
    if let Some(state_dir) = cli.state_dir {
        config.state_dir = Some(state_dir);
    }
    let style = if cli.plain { Style::Plain } else { Style::Color };
    let mut app = App::open(config, style, cli.quiet);

    match cli.command {
        Commands::Apply { sequence } => {
            for mv in app.parse(&sequence)? {
                app.apply(mv);
            }
            app.save();
            app.show();
        }
        Commands::Scramble { length, seed } => {
            let length = length.unwrap_or(app.config.scramble_length);
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            let moves = app.session.scramble(&mut rng, length);
            app.sounds.play(Cue::Shuffle);
            println!("{}", format_sequence(&moves));
            app.save();
            app.show();
        }
        Commands::Play {
            sequence,
            speed,
            invert,
        } => {
            let mut moves = app.parse(&sequence)?;
            if invert {
                moves = invert_sequence(&moves);
            }
            let speed = speed.map_or(app.config.autoplay_speed(), Duration::from_millis);
            play(&mut app, moves, speed);
            app.show();
        }
        Commands::Show { transforms } => {
            app.show();
            if transforms {
                print_transforms(&app);
            }
        }
        Commands::Undo => {
            if app.undo() {
                app.save();
            }
            app.show();
        }
        Commands::Redo => {
            if app.redo() {
                app.save();
            }
            app.show();
        }
        Commands::Reset { forget } => {
            app.session.reset();
            app.sounds.play(Cue::Reset);
            if !forget {
                app.save();
            } else if let Some(storage) = &mut app.storage {
                clear_cube_state(storage);
            }
            app.show();
        }
        Commands::Keys => run_keys(&mut app)?,
        Commands::Swipe { from, to } => {
            let container = EventSource::new();
            let swiped = Rc::new(RefCell::new(None));
            let _swipes = SwipeControls::attach(&container, {
                let swiped = Rc::clone(&swiped);
                move |mv| *swiped.borrow_mut() = Some(mv)
            });
            container.emit(&TouchEvent::Start(from));
            container.emit(&TouchEvent::End(to));

            let mv = swiped
                .borrow_mut()
                .take()
                .ok_or_eyre("The swipe was too short to turn a face")?;
            println!("{mv}");
            app.apply(mv);
            app.save();
            app.show();
        }
    }

    Ok(())
}

/// Play `moves` in real time, saving once things settle down
fn play(app: &mut App, moves: Vec<Move>, speed: Duration) {
    let mut player = AutoPlay::new();
    let mut autosave = Debounce::default();
    let was_solved = app.session.is_solved();

    player.start(moves, speed, Instant::now());
    while let Some(deadline) = player.next_deadline() {
        thread::sleep(deadline.saturating_duration_since(Instant::now()));

        // Advance from the deadline rather than the wakeup so that late
        // wakeups don't add up
        let played = player.poll(deadline, |mv| app.session.apply(mv));
        if let Some(mv) = played {
            println!("{:>4.0}% {mv}", player.progress());
            app.sounds.play(Cue::Move);
            autosave.touch(deadline);
        }
        if autosave.fire(deadline) {
            app.save();
        }
    }

    if autosave.flush() {
        app.save();
    }
    if !was_solved && app.session.is_solved() {
        app.sounds.play(Cue::Success);
    }
}

fn print_transforms(app: &App) {
    let projector = Projector::new(app.config.cube_size_px);
    for cubie in app.session.cube().cubies() {
        let stickers = cubie_faces(cubie)
            .iter()
            .map(|(face, color)| {
                let rotation = face_rotation(face);
                format!(
                    "{face}:{color:?}({},{},{})",
                    rotation.x_deg, rotation.y_deg, rotation.z_deg
                )
            })
            .join(" ");
        println!(
            "{:<6} {:>2} @ {:>2}/{}  {}  {stickers}",
            format!("{:?}", cubie.kind()),
            cubie.home(),
            cubie.position(),
            cubie.orientation(),
            projector.cubie_transform(cubie),
        );
    }
}

/// Turn a line typed on stdin into key presses
fn key_events(line: &str) -> Vec<KeyEvent> {
    let mut events = Vec::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        let event = match c {
            '<' => KeyEvent::new(Key::ArrowLeft),
            '>' => KeyEvent::new(Key::ArrowRight),
            '^' => match chars.next() {
                Some(c) => KeyEvent::character(c).with_ctrl(),
                None => continue,
            },
            c if c.is_whitespace() => continue,
            c => KeyEvent::character(c),
        };
        events.push(event);
    }
    events
}

fn run_keys(app: &mut App) -> color_eyre::Result<()> {
    let bindings = KEY_MAP
        .iter()
        .map(|(key, mv)| format!("{key}={mv}"))
        .join(" ");
    eprintln!("{bindings}  <=undo >=redo ^z=undo ^y=redo");

    let keys = EventSource::new();
    let actions = Rc::new(RefCell::new(Vec::new()));
    let _keyboard = KeyboardControls::attach(&keys, {
        let actions = Rc::clone(&actions);
        move |action| actions.borrow_mut().push(action)
    });

    app.show();
    for line in io::stdin().lock().lines() {
        let line = line.wrap_err("Failed to read from stdin")?;
        for event in key_events(&line) {
            keys.emit(&event);
        }

        let pending = actions.borrow_mut().drain(..).collect_vec();
        if pending.is_empty() {
            eprintln!("{}", format!("No cube keys in `{line}`").red());
            app.sounds.play(Cue::Error);
            continue;
        }
        for action in pending {
            match action {
                KeyAction::Move(mv) => app.apply(mv),
                KeyAction::Undo => {
                    app.undo();
                }
                KeyAction::Redo => {
                    app.redo();
                }
            }
        }
        app.save();
        app.show();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points() {
        assert_eq!(parse_point("100,50"), Ok(Point::new(100.0, 50.0)));
        assert_eq!(parse_point(" 1.5 , -2"), Ok(Point::new(1.5, -2.0)));
        assert!(parse_point("100").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn typed_keys() {
        let events = key_events("R u<^z >5");
        assert_eq!(
            events,
            [
                KeyEvent::character('R'),
                KeyEvent::character('u'),
                KeyEvent::new(Key::ArrowLeft),
                KeyEvent::character('z').with_ctrl(),
                KeyEvent::new(Key::ArrowRight),
                KeyEvent::character('5'),
            ]
        );
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::try_parse_from(["cube", "-vv", "--plain", "scramble", "--seed", "3"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Scramble {
                length: None,
                seed: Some(3)
            }
        ));
        assert!(Cli::try_parse_from(["cube", "swipe", "100,100", "100,50"]).is_ok());
    }
}
