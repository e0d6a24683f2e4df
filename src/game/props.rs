//! Interactive props
//!
//! Named scene nodes the player can pick. Signs, the picnic blanket and the
//! chest open an info modal; the creatures hop. Only one creature hop may
//! run at a time: the gate closes when a hop starts and reopens when that
//! creature lands.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::animation::HopAnimation;

use super::scenes::SceneSource;

/// Props that open an info modal when picked
pub const MODAL_PROPS: [&str; 5] = ["Project_1", "Project_2", "Project_3", "Picnic", "Chest"];

/// Props that hop when picked
pub const CREATURES: [&str; 6] = ["Bulbasaur", "Chicken", "Pikachu", "Charmander", "Squirtle", "Snorlax"];

/// Creatures that deform relative to their own scale and skip the settle
pub const HEAVY_CREATURES: [&str; 1] = ["Snorlax"];

/// What picking a prop does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    Modal,
    Creature { heavy: bool },
}

impl PropKind {
    /// Classify a node name, or `None` if it is not interactive.
    pub fn classify(name: &str) -> Option<Self> {
        if CREATURES.contains(&name) {
            Some(PropKind::Creature {
                heavy: HEAVY_CREATURES.contains(&name),
            })
        } else if MODAL_PROPS.contains(&name) {
            Some(PropKind::Modal)
        } else {
            None
        }
    }
}

/// One interactive prop and its running animation.
#[derive(Debug, Clone)]
pub struct Prop {
    pub kind: PropKind,
    pub rest_position: Vec3,
    pub rest_scale: Vec3,
    hop: Option<HopAnimation>,
}

impl Prop {
    pub fn new(kind: PropKind, rest_position: Vec3, rest_scale: Vec3) -> Self {
        Self {
            kind,
            rest_position,
            rest_scale,
            hop: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.rest_position + self.hop.as_ref().map_or(Vec3::ZERO, HopAnimation::offset)
    }

    pub fn scale(&self) -> Vec3 {
        self.hop.as_ref().map_or(self.rest_scale, HopAnimation::scale)
    }

    pub fn is_hopping(&self) -> bool {
        self.hop.is_some()
    }
}

/// Every interactive prop in the level, keyed by node name.
#[derive(Debug, Clone)]
pub struct PropSet {
    props: BTreeMap<String, Prop>,
    hop_ready: bool,
}

impl Default for PropSet {
    fn default() -> Self {
        Self {
            props: BTreeMap::new(),
            hop_ready: true,
        }
    }
}

impl PropSet {
    /// Collect the interactive nodes of a scene. Unknown names are skipped.
    pub fn from_scene<S: SceneSource + ?Sized>(scene: &S) -> Self {
        let mut set = Self::default();
        for name in scene.node_names() {
            let Some(kind) = PropKind::classify(&name) else {
                log::debug!("scene node {name} is not interactive");
                continue;
            };
            let Some(position) = scene.node_position(&name) else {
                continue;
            };
            let scale = scene.node_scale(&name).unwrap_or(Vec3::ONE);
            set.insert(name, Prop::new(kind, position, scale));
        }
        set
    }

    pub fn insert(&mut self, name: impl Into<String>, prop: Prop) {
        self.props.insert(name.into(), prop);
    }

    pub fn get(&self, name: &str) -> Option<&Prop> {
        self.props.get(name)
    }

    pub fn kind(&self, name: &str) -> Option<PropKind> {
        self.props.get(name).map(|prop| prop.kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Prop)> {
        self.props.iter().map(|(name, prop)| (name.as_str(), prop))
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Whether a new creature hop may start.
    pub fn is_hop_ready(&self) -> bool {
        self.hop_ready
    }

    /// Start a hop for the named creature if the gate is open.
    ///
    /// Returns `false` for unknown names, modal props, or a closed gate.
    pub fn try_hop(&mut self, name: &str) -> bool {
        if !self.hop_ready {
            return false;
        }
        let Some(prop) = self.props.get_mut(name) else {
            return false;
        };
        let PropKind::Creature { heavy } = prop.kind else {
            return false;
        };
        prop.hop = Some(HopAnimation::prop(prop.rest_scale, heavy));
        self.hop_ready = false;
        true
    }

    /// Advance every running hop by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for (name, prop) in &mut self.props {
            let Some(hop) = prop.hop.as_mut() else {
                continue;
            };
            if hop.advance(dt) {
                log::trace!("{name} landed");
                self.hop_ready = true;
            }
            if hop.is_finished() {
                prop.rest_scale = hop.scale();
                prop.hop = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park() -> PropSet {
        let mut set = PropSet::default();
        set.insert("Chest", Prop::new(PropKind::Modal, Vec3::new(4.0, 0.0, 2.0), Vec3::ONE));
        set.insert("Pikachu", Prop::new(PropKind::Creature { heavy: false }, Vec3::ZERO, Vec3::ONE));
        set.insert(
            "Snorlax",
            Prop::new(PropKind::Creature { heavy: true }, Vec3::new(1.0, 0.0, 1.0), Vec3::splat(2.0)),
        );
        set
    }

    #[test]
    fn test_classify() {
        assert_eq!(PropKind::classify("Chest"), Some(PropKind::Modal));
        assert_eq!(PropKind::classify("Project_2"), Some(PropKind::Modal));
        assert_eq!(PropKind::classify("Chicken"), Some(PropKind::Creature { heavy: false }));
        assert_eq!(PropKind::classify("Snorlax"), Some(PropKind::Creature { heavy: true }));
        assert_eq!(PropKind::classify("Tree_04"), None);
    }

    #[test]
    fn test_modal_props_do_not_hop() {
        let mut set = park();
        assert!(!set.try_hop("Chest"));
        assert!(!set.try_hop("Nobody"));
        assert!(set.is_hop_ready());
    }

    #[test]
    fn test_gate_blocks_second_hop_until_landing() {
        let mut set = park();
        assert!(set.try_hop("Pikachu"));
        assert!(!set.is_hop_ready());
        assert!(!set.try_hop("Snorlax"));

        set.advance(0.5);
        assert!(!set.is_hop_ready());
        set.advance(0.3);
        assert!(set.is_hop_ready());
        assert!(set.try_hop("Snorlax"));
    }

    #[test]
    fn test_hop_moves_and_restores() {
        let mut set = park();
        set.try_hop("Snorlax");
        set.advance(0.35);
        let snorlax = set.get("Snorlax").unwrap();
        assert!((snorlax.position().y - 2.0).abs() < 1e-4);

        set.advance(5.0);
        let snorlax = set.get("Snorlax").unwrap();
        assert!(!snorlax.is_hopping());
        assert!((snorlax.position() - Vec3::new(1.0, 0.0, 1.0)).length() < 1e-5);
        assert!((snorlax.scale() - Vec3::splat(2.0)).length() < 1e-5);
    }
}
