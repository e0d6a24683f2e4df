//! Keyboard Input Module
//!
//! Key codes and the persistent set of pressed movement directions.
//! Decoupled from winit to use generic key codes.

/// Generic key codes for the keys the park reacts to, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Respawn
    R,

    // Spare letters for remapping
    Q,
    E,

    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// A screen-relative movement direction.
///
/// Up moves along +Z, down along -Z, left along +X, right along -X; the
/// scene camera looks from the -Z side, so these read naturally on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in the order the motion integrator evaluates them.
    pub const EVALUATION_ORDER: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
}

/// Tracks which directions are currently held.
///
/// Written by input events at any time, read once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionKeys {
    /// Create a new state with all directions released.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Check if any direction is currently held.
    pub fn any_pressed(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Held directions in evaluation order.
    pub fn pressed(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::EVALUATION_ORDER
            .into_iter()
            .filter(|&d| self.is_pressed(d))
    }

    /// Release every direction.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_keys_default() {
        let keys = DirectionKeys::new();
        assert!(!keys.any_pressed());
        assert_eq!(keys.pressed().count(), 0);
    }

    #[test]
    fn test_set_and_release() {
        let mut keys = DirectionKeys::new();
        keys.set(Direction::Left, true);
        assert!(keys.left);
        assert!(keys.any_pressed());

        keys.set(Direction::Left, false);
        assert!(!keys.any_pressed());
    }

    #[test]
    fn test_pressed_follows_evaluation_order() {
        let mut keys = DirectionKeys::new();
        keys.set(Direction::Right, true);
        keys.set(Direction::Up, true);
        keys.set(Direction::Left, true);

        let order: Vec<Direction> = keys.pressed().collect();
        assert_eq!(order, vec![Direction::Up, Direction::Left, Direction::Right]);
    }

    #[test]
    fn test_reset() {
        let mut keys = DirectionKeys::new();
        keys.set(Direction::Up, true);
        keys.set(Direction::Down, true);
        keys.reset();
        assert_eq!(keys, DirectionKeys::default());
    }
}
