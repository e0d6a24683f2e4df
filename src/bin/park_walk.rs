//! Park Walk - windowed driver
//!
//! Opens a window and feeds its keyboard and focus events into a
//! [`ParkSession`]. Redraws are paced to the motion timestep and each redraw
//! hands the elapsed wall-clock time to [`ParkSession::update`], so the park
//! runs in real time however fast the loop spins. Nothing is drawn; the
//! character pose is shown in the window title and logged.
//!
//! Run with: `cargo run --bin park_walk -- --level assets/park_level.json`
//!
//! Controls: WASD / arrows hop, R respawn, M toggle audio, Enter enter the
//! park, Backspace close the modal, ESC exit.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use bear_park_engine::game::{GameConfig, Level, LogAudio, LogModal, ParkSession};
use bear_park_engine::input::{InputEvent, KeyCode};
use bear_park_engine::logging;

const DEFAULT_LEVEL: &str = "assets/park_level.json";
const FALLBACK_FRAME_INTERVAL: Duration = Duration::from_millis(35);

#[derive(Debug, Parser)]
#[command(about = "Walk the portfolio park in a window")]
struct Cli {
    /// Level JSON file
    #[arg(long)]
    level: Option<PathBuf>,
    /// Optional JSON config overriding motion, camera and audio settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

/// Translate a winit physical key into the engine's key code.
fn map_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,
        WinitKey::KeyR => KeyCode::R,
        WinitKey::KeyQ => KeyCode::Q,
        WinitKey::KeyE => KeyCode::E,
        WinitKey::Escape => KeyCode::Escape,
        _ => KeyCode::Unknown,
    }
}

struct ParkWalkApp {
    window: Option<Arc<Window>>,
    session: ParkSession<LogAudio, LogModal>,
    frame_interval: Duration,
    last_frame: Instant,
    last_title_update: Instant,
    ticks_since_title: u32,
}

impl ParkWalkApp {
    fn new(session: ParkSession<LogAudio, LogModal>) -> Self {
        let frame_interval = Duration::try_from_secs_f32(session.config().motion.timestep)
            .ok()
            .filter(|interval| !interval.is_zero())
            .unwrap_or(FALLBACK_FRAME_INTERVAL);
        let now = Instant::now();
        Self {
            window: None,
            session,
            frame_interval,
            last_frame: now,
            last_title_update: now,
            ticks_since_title: 0,
        }
    }

    fn handle_key(&mut self, key: WinitKey, pressed: bool) {
        if pressed {
            match key {
                WinitKey::KeyM => {
                    self.session.toggle_audio();
                    return;
                }
                WinitKey::Enter => {
                    self.session.enter();
                    return;
                }
                WinitKey::Backspace => {
                    self.session.close_modal();
                    return;
                }
                _ => {}
            }
        }
        self.session.handle_input(InputEvent::Key {
            key: map_key(key),
            pressed,
        });
    }

    fn run_due_ticks(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        for report in self.session.update(elapsed) {
            self.ticks_since_title += 1;
            if report.respawned {
                log::info!("frame {}: respawned at {:?}", report.frame, report.position);
            }
        }
    }

    fn update_title(&mut self) {
        let elapsed = self.last_title_update.elapsed().as_secs_f32();
        if elapsed < 1.0 {
            return;
        }
        let tps = self.ticks_since_title as f32 / elapsed;
        self.ticks_since_title = 0;
        self.last_title_update = Instant::now();

        let camera = self.session.camera();
        log::debug!(
            "camera at {:?} facing {:?}, view {:?}",
            camera.position,
            camera.forward(),
            camera.view_matrix()
        );

        let controller = self.session.controller();
        let position = controller.position();
        if let Some(window) = &self.window {
            window.set_title(&format!(
                "Bear Park | pos ({:.1}, {:.1}, {:.1}) | yaw {:.2} | {} | {:.0} ticks/s",
                position.x,
                position.y,
                position.z,
                controller.yaw(),
                if controller.is_grounded() { "grounded" } else { "airborne" },
                tps
            ));
        }
    }
}

impl ApplicationHandler for ParkWalkApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = WindowAttributes::default()
            .with_title("Bear Park")
            .with_inner_size(PhysicalSize::new(1280, 720));
        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    if key == WinitKey::Escape && event.state == ElementState::Pressed {
                        event_loop.exit();
                        return;
                    }
                    self.handle_key(key, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::Focused(false) => {
                self.session.handle_input(InputEvent::FocusLost);
            }
            WindowEvent::RedrawRequested => {
                self.run_due_ticks();
                self.update_title();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let next_frame = self.last_frame + self.frame_interval;
        event_loop.set_control_flow(ControlFlow::WaitUntil(next_frame));
        if Instant::now() < next_frame {
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let level_path = cli
        .level
        .or_else(|| config.level.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LEVEL));

    let level = Level::load(&level_path).inspect_err(|err| log::error!("{err}"))?;
    let session = ParkSession::new(&level, config, LogAudio, LogModal)?;

    println!("===========================================");
    println!("   Bear Park");
    println!("===========================================");
    println!();
    println!("Controls: WASD/Arrows Hop, R Respawn, M Audio, Enter Start, Backspace Close, ESC Exit");
    println!();

    let event_loop = EventLoop::new()?;
    let mut app = ParkWalkApp::new(session);
    event_loop.run_app(&mut app)?;
    Ok(())
}
