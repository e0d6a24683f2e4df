//! Input Bindings Module
//!
//! Maps physical keys to logical actions. Several keys may share one action
//! (WASD and the arrow keys both steer).

use std::collections::HashMap;

use super::{Direction, KeyCode};

/// Logical input actions that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Hold to move in a direction
    Move(Direction),
    /// Teleport the character back to spawn (default: R)
    Respawn,
}

/// Maps physical keys to logical actions, supporting customizable key bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    key_to_action: HashMap<KeyCode, InputAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create a new KeyBindings instance with default key mappings.
    ///
    /// Default bindings:
    /// - W / ArrowUp = Move(Up)
    /// - S / ArrowDown = Move(Down)
    /// - A / ArrowLeft = Move(Left)
    /// - D / ArrowRight = Move(Right)
    /// - R = Respawn
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, InputAction::Move(Direction::Up));
        bindings.bind(KeyCode::ArrowUp, InputAction::Move(Direction::Up));
        bindings.bind(KeyCode::S, InputAction::Move(Direction::Down));
        bindings.bind(KeyCode::ArrowDown, InputAction::Move(Direction::Down));
        bindings.bind(KeyCode::A, InputAction::Move(Direction::Left));
        bindings.bind(KeyCode::ArrowLeft, InputAction::Move(Direction::Left));
        bindings.bind(KeyCode::D, InputAction::Move(Direction::Right));
        bindings.bind(KeyCode::ArrowRight, InputAction::Move(Direction::Right));
        bindings.bind(KeyCode::R, InputAction::Respawn);

        bindings
    }

    /// Bindings with nothing mapped.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
        }
    }

    /// Bind a physical key to a logical action, replacing the key's previous action.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.key_to_action.insert(key, action);
    }

    /// Remove the binding for a specific key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        self.key_to_action.remove(&key);
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// All keys bound to `action`, in no particular order.
    pub fn keys_for(&self, action: InputAction) -> Vec<KeyCode> {
        self.key_to_action
            .iter()
            .filter(|&(_, bound)| *bound == action)
            .map(|(&key, _)| key)
            .collect()
    }
}
