//! Collision resolution for the actor's capsule
//!
//! One pass per tick: ask the static world for the aggregate contact, push the
//! capsule out along it, and classify floor contact from the contact normal.

use super::capsule::Capsule;
use super::collision::{CollisionWorld, Contact};

/// Outcome of resolving the capsule for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resolution {
    /// The contact that was applied, if the capsule overlapped anything
    pub contact: Option<Contact>,
    /// Whether the contact normal points upward at all
    pub grounded: bool,
}

/// Depenetrates a capsule against static geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Push `capsule` out of `world` and report floor contact.
    ///
    /// A contact counts as floor when its normal has any positive Y
    /// component, so slopes and ledges both ground the actor.
    pub fn resolve<W: CollisionWorld + ?Sized>(world: &W, capsule: &mut Capsule) -> Resolution {
        let Some(contact) = world.capsule_intersect(capsule) else {
            return Resolution::default();
        };

        capsule.translate(contact.push_out());
        log::trace!(
            "capsule contact normal={:?} depth={:.4}",
            contact.normal,
            contact.depth
        );

        Resolution {
            contact: Some(contact),
            grounded: contact.normal.y > 0.0,
        }
    }
}
