//! Input Module
//!
//! Aggregates keyboard, touch and mouse-hold input into the persistent set of
//! held directions plus a queue of one-shot commands. Decoupled from any
//! specific windowing system; drivers translate their events into
//! [`InputEvent`].
//!
//! Events may arrive at any point between frames. The frame loop reads the
//! held directions and drains the command queue once per tick.
//!
//! # Example
//!
//! ```rust,ignore
//! use bear_park_engine::input::{InputEvent, InputState, KeyCode};
//!
//! let mut input = InputState::new();
//! input.handle_event(InputEvent::Key { key: KeyCode::W, pressed: true });
//! assert!(input.directions().up);
//!
//! input.handle_event(InputEvent::FocusLost);
//! assert!(!input.directions().any_pressed());
//! ```

pub mod bindings;
pub mod keyboard;

use std::collections::VecDeque;

// Re-export commonly used types at module level
pub use bindings::{InputAction, KeyBindings};
pub use keyboard::{Direction, DirectionKeys, KeyCode};

/// A raw input event from a platform driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Physical key press or release (repeats already filtered out)
    Key { key: KeyCode, pressed: bool },
    /// On-screen direction button pressed (touchstart / mousedown)
    HoldStart(Direction),
    /// On-screen direction button released, left, or cancelled
    HoldEnd(Direction),
    /// The window lost focus; every held input is dropped
    FocusLost,
}

/// One-shot commands consumed by the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Respawn,
}

/// Combined input state for the frame loop.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    directions: DirectionKeys,
    bindings: KeyBindings,
    pending: VecDeque<InputCommand>,
}

impl InputState {
    /// Create a new input state with default bindings and nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event.
    ///
    /// Returns `true` if the event changed held directions or queued a command.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key { key, pressed } => match self.bindings.get_action(key) {
                Some(InputAction::Move(direction)) => {
                    self.directions.set(direction, pressed);
                    true
                }
                Some(InputAction::Respawn) if pressed => {
                    self.pending.push_back(InputCommand::Respawn);
                    true
                }
                _ => false,
            },
            InputEvent::HoldStart(direction) => {
                self.directions.set(direction, true);
                true
            }
            InputEvent::HoldEnd(direction) => {
                self.directions.set(direction, false);
                true
            }
            InputEvent::FocusLost => {
                log::debug!("focus lost, releasing held input");
                self.directions.reset();
                true
            }
        }
    }

    /// Snapshot of held directions for this frame.
    pub fn directions(&self) -> DirectionKeys {
        self.directions
    }

    /// Take every queued command in arrival order.
    pub fn drain_commands(&mut self) -> Vec<InputCommand> {
        self.pending.drain(..).collect()
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }
}
