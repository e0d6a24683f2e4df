//! Park Sim - headless driver
//!
//! Runs a park session for a fixed number of frames without a window,
//! optionally replaying a script of timed input events, and prints the
//! character's path. Useful for tuning motion constants and for checking a
//! level's collision mesh.
//!
//! Script lines are `<frame> <command> [argument]`; `#` starts a comment:
//!
//! ```text
//! 0   enter
//! 5   press W
//! 40  release W
//! 60  hold left
//! 90  unhold left
//! 100 pick Chest
//! 120 close
//! 130 blur
//! 140 bind Q up
//! 150 unbind W
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use bear_park_engine::game::{GameConfig, Level, LogAudio, LogModal, ParkSession};
use bear_park_engine::input::{Direction, InputAction, InputEvent, KeyCode};
use bear_park_engine::logging;

#[derive(Debug, Parser)]
#[command(about = "Simulate the portfolio park without a window")]
struct Cli {
    /// Level JSON file (falls back to the config's level, then the shipped park)
    #[arg(long)]
    level: Option<PathBuf>,
    /// Optional JSON config overriding motion, camera and audio settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 300)]
    frames: u64,
    /// Input script to replay
    #[arg(long)]
    script: Option<PathBuf>,
    /// Print the pose every N frames (0 prints only the final pose)
    #[arg(long, default_value_t = 10)]
    every: u64,
    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

const DEFAULT_LEVEL: &str = "assets/park_level.json";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("script line {line}: {message}")]
struct ScriptError {
    line: usize,
    message: String,
}

/// One scripted host action.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScriptAction {
    Input(InputEvent),
    Bind(KeyCode, InputAction),
    Unbind(KeyCode),
    Pick(String),
    Hover(String),
    CloseModal,
    ToggleAudio,
    Enter,
}

fn parse_key(name: &str) -> Option<KeyCode> {
    let key = match name.to_ascii_lowercase().as_str() {
        "w" => KeyCode::W,
        "a" => KeyCode::A,
        "s" => KeyCode::S,
        "d" => KeyCode::D,
        "up" | "arrowup" => KeyCode::ArrowUp,
        "down" | "arrowdown" => KeyCode::ArrowDown,
        "left" | "arrowleft" => KeyCode::ArrowLeft,
        "right" | "arrowright" => KeyCode::ArrowRight,
        "r" => KeyCode::R,
        "q" => KeyCode::Q,
        "e" => KeyCode::E,
        _ => return None,
    };
    Some(key)
}

fn parse_direction(name: &str) -> Option<Direction> {
    match name.to_ascii_lowercase().as_str() {
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

/// Parse a script into actions grouped by the frame before which they fire.
fn parse_script(text: &str) -> Result<BTreeMap<u64, Vec<ScriptAction>>, ScriptError> {
    let mut script: BTreeMap<u64, Vec<ScriptAction>> = BTreeMap::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let err = |message: String| ScriptError { line, message };

        let mut parts = content.split_whitespace();
        let frame = parts
            .next()
            .and_then(|f| f.parse::<u64>().ok())
            .ok_or_else(|| err(format!("expected a frame number in {content:?}")))?;
        let command = parts
            .next()
            .ok_or_else(|| err("missing command".to_string()))?;
        let argument = parts.next();

        let needs = |what: &str| err(format!("{command} needs {what}"));
        let action = match command {
            "press" | "release" => {
                let name = argument.ok_or_else(|| needs("a key"))?;
                let key = parse_key(name).ok_or_else(|| err(format!("unknown key {name}")))?;
                ScriptAction::Input(InputEvent::Key {
                    key,
                    pressed: command == "press",
                })
            }
            "hold" | "unhold" => {
                let name = argument.ok_or_else(|| needs("a direction"))?;
                let direction = parse_direction(name)
                    .ok_or_else(|| err(format!("unknown direction {name}")))?;
                if command == "hold" {
                    ScriptAction::Input(InputEvent::HoldStart(direction))
                } else {
                    ScriptAction::Input(InputEvent::HoldEnd(direction))
                }
            }
            "bind" => {
                let name = argument.ok_or_else(|| needs("a key"))?;
                let key = parse_key(name).ok_or_else(|| err(format!("unknown key {name}")))?;
                let target = parts.next().ok_or_else(|| needs("an action"))?;
                let action = if target.eq_ignore_ascii_case("respawn") {
                    InputAction::Respawn
                } else {
                    parse_direction(target)
                        .map(InputAction::Move)
                        .ok_or_else(|| err(format!("unknown action {target}")))?
                };
                ScriptAction::Bind(key, action)
            }
            "unbind" => {
                let name = argument.ok_or_else(|| needs("a key"))?;
                let key = parse_key(name).ok_or_else(|| err(format!("unknown key {name}")))?;
                ScriptAction::Unbind(key)
            }
            "blur" => ScriptAction::Input(InputEvent::FocusLost),
            "respawn" => ScriptAction::Input(InputEvent::Key {
                key: KeyCode::R,
                pressed: true,
            }),
            "pick" => ScriptAction::Pick(argument.ok_or_else(|| needs("a node name"))?.to_string()),
            "hover" => ScriptAction::Hover(argument.ok_or_else(|| needs("a node name"))?.to_string()),
            "close" => ScriptAction::CloseModal,
            "audio" => ScriptAction::ToggleAudio,
            "enter" => ScriptAction::Enter,
            other => return Err(err(format!("unknown command {other}"))),
        };
        script.entry(frame).or_default().push(action);
    }

    Ok(script)
}

fn apply(session: &mut ParkSession<LogAudio, LogModal>, action: &ScriptAction) {
    match action {
        ScriptAction::Input(event) => {
            session.handle_input(*event);
        }
        ScriptAction::Bind(key, action) => {
            session.input_mut().bindings_mut().bind(*key, *action);
            let keys = session.input().bindings().keys_for(*action);
            log::info!("bound {key:?} to {action:?}, now on {keys:?}");
        }
        ScriptAction::Unbind(key) => {
            session.input_mut().bindings_mut().unbind_key(*key);
            log::info!("unbound {key:?}");
        }
        ScriptAction::Pick(name) => {
            let outcome = session.pick(Some(name.as_str()));
            log::info!("pick {name}: {outcome:?}");
        }
        ScriptAction::Hover(name) => {
            let cursor = session.hover(Some(name.as_str()));
            log::info!("hover {name}: {cursor:?}");
        }
        ScriptAction::CloseModal => session.close_modal(),
        ScriptAction::ToggleAudio => {
            session.toggle_audio();
        }
        ScriptAction::Enter => session.enter(),
    }
}

/// The `--level` flag wins, then the config's level, then the shipped park.
fn level_path(flag: Option<PathBuf>, config: &GameConfig) -> PathBuf {
    flag.or_else(|| config.level.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LEVEL))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let level_path = level_path(cli.level, &config);
    let level = Level::load(&level_path).inspect_err(|err| log::error!("{err}"))?;

    let script = match &cli.script {
        Some(path) => parse_script(&fs::read_to_string(path)?)?,
        None => BTreeMap::new(),
    };

    let mut session = ParkSession::new(&level, config, LogAudio, LogModal)?;
    let mut hops = 0;
    let mut respawns = 0;

    for frame in 0..cli.frames {
        if let Some(actions) = script.get(&frame) {
            for action in actions {
                apply(&mut session, action);
            }
        }

        let report = session.tick();
        hops += usize::from(report.hop_started);
        respawns += usize::from(report.respawned);

        if cli.every > 0 && frame % cli.every == 0 {
            println!(
                "frame {:>5}  pos ({:>7.2}, {:>7.2}, {:>7.2})  vel ({:>6.2}, {:>6.2}, {:>6.2})  speed {:>5.2}  yaw {:>5.2}  {}",
                report.frame,
                report.position.x,
                report.position.y,
                report.position.z,
                report.velocity.x,
                report.velocity.y,
                report.velocity.z,
                report.horizontal_speed,
                report.yaw,
                if report.grounded { "grounded" } else { "airborne" }
            );
        }
    }

    let position = session.controller().position();
    println!(
        "final position ({:.3}, {:.3}, {:.3}) after {} frames, {} hops, {} respawns",
        position.x,
        position.y,
        position.z,
        session.frame(),
        hops,
        respawns
    );
    Ok(())
}
