//! ParkSession: the per-frame loop of the portfolio park.
//!
//! Owns the input aggregator, the character controller, the static octree,
//! the respawn guard, the props and the follow camera, and talks to the host
//! only through [`AudioSink`] and [`ModalPresenter`]. Its
//! [`tick`](ParkSession::tick) method is the single entry point for frame
//! logic. Rendering reads the pose accessors afterwards.

use glam::Vec3;

use crate::animation::HopAnimation;
use crate::camera::FollowCamera;
use crate::game::collaborators::{AudioSink, Cursor, ModalPresenter};
use crate::game::config::GameConfig;
use crate::game::props::{PropKind, PropSet};
use crate::input::{InputCommand, InputEvent, InputState};
use crate::physics::{Contact, Octree};
use crate::player::{CharacterController, RespawnGuard};

use super::level::{CHARACTER_NODE, LevelError, SceneSource};

/// Catch-up cap for [`ParkSession::update`] after a long stall.
pub const MAX_TICKS_PER_UPDATE: usize = 8;

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    /// The character was put back at spawn this tick
    pub respawned: bool,
    /// A hop started this tick
    pub hop_started: bool,
    pub grounded: bool,
    pub contact: Option<Contact>,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Speed in the XZ plane
    pub horizontal_speed: f32,
    pub yaw: f32,
}

/// Result of picking a scene node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// Nothing interactive was picked, or a modal is open
    Ignored,
    /// A creature started hopping
    CreatureHop(String),
    /// A creature was picked while another was still in the air
    HopBlocked,
    /// The info modal opened for this prop
    ModalOpened(String),
}

/// Complete park state for one visitor.
pub struct ParkSession<A: AudioSink, M: ModalPresenter> {
    config: GameConfig,
    input: InputState,
    controller: CharacterController,
    world: Octree,
    guard: RespawnGuard,
    props: PropSet,
    camera: FollowCamera,
    character_hop: Option<HopAnimation>,
    audio: A,
    modal: M,
    muted: bool,
    open_modal: Option<String>,
    cursor: Cursor,
    frame: u64,
    accumulator_s: f32,
}

impl<A: AudioSink, M: ModalPresenter> ParkSession<A, M> {
    /// Build a session from loaded scene content.
    ///
    /// The octree is built here, once. Fails if the scene has no character
    /// spawn node or no collision geometry.
    pub fn new<S: SceneSource + ?Sized>(
        scene: &S,
        config: GameConfig,
        audio: A,
        modal: M,
    ) -> Result<Self, LevelError> {
        let spawn = scene
            .node_position(CHARACTER_NODE)
            .ok_or(LevelError::MissingSpawn)?;
        let triangles = scene.collision_triangles();
        if triangles.is_empty() {
            return Err(LevelError::EmptyCollider);
        }

        let world = Octree::with_config(triangles, config.octree);
        let controller = CharacterController::with_config(spawn, config.motion);
        let camera = FollowCamera::looking_at(config.camera, spawn);
        let props = PropSet::from_scene(scene);

        log::info!(
            "park ready: spawn {:?}, {} triangles, {} props",
            spawn,
            world.len(),
            props.len()
        );

        Ok(Self {
            guard: config.respawn,
            muted: config.audio.start_muted,
            config,
            input: InputState::new(),
            controller,
            world,
            props,
            camera,
            character_hop: None,
            audio,
            modal,
            open_modal: None,
            cursor: Cursor::Default,
            frame: 0,
            accumulator_s: 0.0,
        })
    }

    /// Feed one input event. Safe to call any number of times between ticks.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.input.handle_event(event)
    }

    /// Run as many fixed ticks as `elapsed_s` of wall-clock time covers.
    ///
    /// Leftover time carries into the next call. At most
    /// [`MAX_TICKS_PER_UPDATE`] ticks run per call; time beyond that is
    /// dropped.
    pub fn update(&mut self, elapsed_s: f32) -> Vec<FrameReport> {
        let step = self.config.motion.timestep;
        if step <= 0.0 {
            return Vec::new();
        }
        let budget = step * MAX_TICKS_PER_UPDATE as f32;
        self.accumulator_s = (self.accumulator_s + elapsed_s.clamp(0.0, budget)).min(budget);

        // Small slack so a budget of exactly N steps yields N ticks.
        let due = ((self.accumulator_s / step + 1e-4).floor() as usize).min(MAX_TICKS_PER_UPDATE);
        self.accumulator_s = (self.accumulator_s - due as f32 * step).max(0.0);

        (0..due).map(|_| self.tick()).collect()
    }

    /// Run one frame.
    ///
    /// Order: queued commands, respawn guard, gravity and collision, heading,
    /// hop input, animations, camera. A tick that respawns the character
    /// skips motion and input.
    pub fn tick(&mut self) -> FrameReport {
        self.frame += 1;

        let respawn_requested = self
            .input
            .drain_commands()
            .into_iter()
            .any(|command| command == InputCommand::Respawn);

        let respawned = if respawn_requested {
            log::info!("respawn requested");
            self.controller.respawn();
            true
        } else {
            self.guard.check(&mut self.controller)
        };

        let mut contact = None;
        let mut hop_started = false;
        if !respawned {
            contact = self.controller.step(&self.world).contact;

            if self.controller.apply_input(&self.input.directions()) {
                hop_started = true;
                let sound = self.config.audio.hop_sound.clone();
                self.play(&sound);
                self.character_hop = Some(HopAnimation::character());
            }
        }

        self.advance_animations(self.config.motion.timestep);
        self.camera.follow(self.controller.position());

        FrameReport {
            frame: self.frame,
            respawned,
            hop_started,
            grounded: self.controller.is_grounded(),
            contact,
            position: self.controller.position(),
            velocity: self.controller.velocity(),
            horizontal_speed: self.controller.actor().horizontal_speed(),
            yaw: self.controller.yaw(),
        }
    }

    fn advance_animations(&mut self, dt: f32) {
        if let Some(hop) = self.character_hop.as_mut() {
            hop.advance(dt);
            if hop.is_finished() {
                self.character_hop = None;
            }
        }
        self.props.advance(dt);
    }

    /// Start the visit: UI chime and background music.
    pub fn enter(&mut self) {
        let AudioIds { ui, music } = self.audio_ids();
        self.play(&ui);
        self.play(&music);
    }

    /// Dispatch a pick (click or tap) on a scene node.
    pub fn pick(&mut self, node: Option<&str>) -> PickOutcome {
        if self.open_modal.is_some() {
            return PickOutcome::Ignored;
        }
        let Some(name) = node else {
            return PickOutcome::Ignored;
        };

        match self.props.kind(name) {
            None => PickOutcome::Ignored,
            Some(PropKind::Creature { .. }) => {
                if !self.props.is_hop_ready() {
                    return PickOutcome::HopBlocked;
                }
                let sound = self.config.audio.creature_sound.clone();
                self.play(&sound);
                self.props.try_hop(name);
                PickOutcome::CreatureHop(name.to_string())
            }
            Some(PropKind::Modal) => {
                self.modal.show(name);
                self.open_modal = Some(name.to_string());
                let sound = self.config.audio.ui_sound.clone();
                self.play(&sound);
                PickOutcome::ModalOpened(name.to_string())
            }
        }
    }

    /// Update the cursor for the node under the pointer.
    pub fn hover(&mut self, node: Option<&str>) -> Cursor {
        self.cursor = match node {
            Some(name) if self.props.kind(name).is_some() => Cursor::Pointer,
            _ => Cursor::Default,
        };
        self.cursor
    }

    /// Close the info modal. Does nothing when none is open.
    pub fn close_modal(&mut self) {
        if self.open_modal.take().is_none() {
            return;
        }
        self.modal.hide();
        let sound = self.config.audio.ui_sound.clone();
        self.play(&sound);
    }

    /// Flip mute. Returns the new muted state.
    pub fn toggle_audio(&mut self) -> bool {
        let AudioIds { ui, music } = self.audio_ids();
        self.play(&ui);

        self.muted = !self.muted;
        if self.muted {
            self.audio.stop(&music);
        } else {
            self.audio.play(&music);
        }
        log::debug!("audio muted: {}", self.muted);
        self.muted
    }

    fn play(&mut self, sound: &str) {
        if !self.muted {
            self.audio.play(sound);
        }
    }

    fn audio_ids(&self) -> AudioIds {
        AudioIds {
            ui: self.config.audio.ui_sound.clone(),
            music: self.config.audio.music.clone(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CharacterController {
        &mut self.controller
    }

    pub fn world(&self) -> &Octree {
        &self.world
    }

    pub fn props(&self) -> &PropSet {
        &self.props
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    /// Character scale for the renderer (unit scale when not hopping).
    pub fn character_scale(&self) -> Vec3 {
        self.character_hop
            .as_ref()
            .map_or(Vec3::ONE, HopAnimation::scale)
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn modal(&self) -> &M {
        &self.modal
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn open_modal(&self) -> Option<&str> {
        self.open_modal.as_deref()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

struct AudioIds {
    ui: String,
    music: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::collaborators::{RecordingAudio, RecordingModal};
    use crate::game::scenes::Level;
    use crate::input::{Direction, InputAction, KeyCode};

    const PARK: &str = r#"{
        "spawn": [0.0, 0.0, 0.0],
        "props": {
            "Chest": { "position": [4.0, 0.0, 2.0] },
            "Pikachu": { "position": [-2.0, 0.0, 3.0] },
            "Tree": { "position": [9.0, 0.0, 9.0] }
        },
        "collider": [ { "box": { "min": [-30, -1, -30], "max": [30, 0, 30] } } ]
    }"#;

    fn session() -> ParkSession<RecordingAudio, RecordingModal> {
        let level = Level::from_json_str(PARK).unwrap();
        ParkSession::new(
            &level,
            GameConfig::default(),
            RecordingAudio::default(),
            RecordingModal::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_session_places_character() {
        let session = session();
        assert_eq!(session.controller().position(), Vec3::ZERO);
        assert_eq!(session.props().len(), 2);
        assert!(!session.is_muted());
        assert_eq!(session.camera().position, Vec3::new(-33.0, 39.0, -37.0));
    }

    #[test]
    fn test_hop_plays_sound_and_animation() {
        let mut session = session();
        session.tick();
        session.handle_input(InputEvent::Key { key: KeyCode::W, pressed: true });
        let report = session.tick();

        assert!(report.hop_started);
        assert_eq!(session.audio().played, vec!["jumpSFX".to_string()]);
        assert_ne!(session.character_scale(), Vec3::ONE);
    }

    #[test]
    fn test_muted_hop_is_silent() {
        let mut session = session();
        session.toggle_audio();
        assert!(session.is_muted());
        session.handle_input(InputEvent::HoldStart(crate::input::Direction::Left));
        assert!(session.tick().hop_started);
        // Only the toggle chime, played before muting
        assert_eq!(session.audio().played, vec!["projectsSFX".to_string()]);
        assert_eq!(session.audio().stopped, vec!["backgroundMusic".to_string()]);
    }

    #[test]
    fn test_pick_modal_then_ignore_until_closed() {
        let mut session = session();
        assert_eq!(session.pick(Some("Chest")), PickOutcome::ModalOpened("Chest".to_string()));
        assert_eq!(session.open_modal(), Some("Chest"));
        assert_eq!(session.pick(Some("Pikachu")), PickOutcome::Ignored);

        session.close_modal();
        assert_eq!(session.open_modal(), None);
        assert_eq!(session.modal().shown, vec!["Chest".to_string()]);
        assert_eq!(session.modal().hidden, 1);
        assert_eq!(
            session.audio().played,
            vec!["projectsSFX".to_string(), "projectsSFX".to_string()]
        );
    }

    #[test]
    fn test_close_without_modal_is_noop() {
        let mut session = session();
        session.close_modal();
        assert_eq!(session.modal().hidden, 0);
        assert!(session.audio().played.is_empty());
    }

    #[test]
    fn test_creature_pick_gated_until_landing() {
        let mut session = session();
        assert_eq!(
            session.pick(Some("Pikachu")),
            PickOutcome::CreatureHop("Pikachu".to_string())
        );
        assert_eq!(session.pick(Some("Pikachu")), PickOutcome::HopBlocked);
        assert_eq!(session.audio().played, vec!["pokemonSFX".to_string()]);

        for _ in 0..30 {
            session.tick();
        }
        assert!(session.props().is_hop_ready());
    }

    #[test]
    fn test_non_interactive_pick_and_hover() {
        let mut session = session();
        assert_eq!(session.pick(Some("Tree")), PickOutcome::Ignored);
        assert_eq!(session.pick(None), PickOutcome::Ignored);
        assert_eq!(session.hover(Some("Chest")), Cursor::Pointer);
        assert_eq!(session.hover(Some("Tree")), Cursor::Default);
        assert_eq!(session.hover(None), Cursor::Default);
    }

    #[test]
    fn test_enter_and_toggle_audio() {
        let mut session = session();
        session.enter();
        assert_eq!(
            session.audio().played,
            vec!["projectsSFX".to_string(), "backgroundMusic".to_string()]
        );

        assert!(session.toggle_audio());
        assert!(!session.toggle_audio());
        assert_eq!(session.audio().played.last().map(String::as_str), Some("backgroundMusic"));
    }

    #[test]
    fn test_respawn_key_resets_next_tick() {
        let mut session = session();
        session.controller_mut().set_velocity(Vec3::new(0.0, 30.0, 0.0));
        for _ in 0..5 {
            session.tick();
        }
        assert!(session.controller().position().y > 0.5);

        session.handle_input(InputEvent::Key { key: KeyCode::R, pressed: true });
        let report = session.tick();
        assert!(report.respawned);
        assert_eq!(report.position, Vec3::ZERO);
        assert_eq!(report.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_update_paces_ticks_by_wall_clock() {
        let mut session = session();
        let step = session.config().motion.timestep;

        assert!(session.update(step * 0.5).is_empty());
        assert_eq!(session.update(step * 0.6).len(), 1);
        assert_eq!(session.update(step * 2.0).len(), 2);
        assert_eq!(session.frame(), 3);
    }

    #[test]
    fn test_update_caps_catch_up_after_stall() {
        let mut session = session();
        let reports = session.update(60.0);
        assert_eq!(reports.len(), MAX_TICKS_PER_UPDATE);
        assert!(session.update(0.0).is_empty());
        assert!(session.update(-1.0).is_empty());
    }

    #[test]
    fn test_report_carries_horizontal_speed() {
        let mut session = session();
        for _ in 0..30 {
            session.tick();
        }
        session.handle_input(InputEvent::Key { key: KeyCode::W, pressed: true });
        session.tick();
        let report = session.tick();
        assert!(!report.grounded);
        assert!((report.horizontal_speed - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_rebound_key_starts_hop() {
        let mut session = session();
        for _ in 0..30 {
            session.tick();
        }
        session
            .input_mut()
            .bindings_mut()
            .bind(KeyCode::Q, InputAction::Move(Direction::Left));

        assert!(session.handle_input(InputEvent::Key { key: KeyCode::Q, pressed: true }));
        assert!(session.input().directions().left);
        assert!(session.tick().hop_started);
    }

    #[test]
    fn test_missing_spawn_fails() {
        struct Empty;
        impl SceneSource for Empty {
            fn node_position(&self, _name: &str) -> Option<Vec3> {
                None
            }
            fn node_names(&self) -> Vec<String> {
                Vec::new()
            }
            fn node_scale(&self, _name: &str) -> Option<Vec3> {
                None
            }
            fn collision_triangles(&self) -> Vec<crate::physics::Triangle> {
                Vec::new()
            }
        }

        let result = ParkSession::new(
            &Empty,
            GameConfig::default(),
            RecordingAudio::default(),
            RecordingModal::default(),
        );
        assert!(matches!(result, Err(LevelError::MissingSpawn)));
    }
}
