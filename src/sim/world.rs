//! Collision oracle seam
//!
//! The simulator never owns geometry; it probes an injected [`CollisionQuery`]
//! one path segment at a time. Any world representation can back the trait as
//! long as queries are read-only and deterministic.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Layer bitmask restricting which surfaces participate in queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionMask(pub u32);

impl CollisionMask {
    /// Match every layer
    pub const ALL: Self = Self(u32::MAX);
    /// Match nothing (disables collision entirely)
    pub const NONE: Self = Self(0);

    /// Whether a surface with the given layer bits passes this filter
    #[inline]
    pub fn matches(&self, layers: u32) -> bool {
        self.0 & layers != 0
    }
}

impl Default for CollisionMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Contact found along a path segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Contact point in world space
    pub point: Vec2,
    /// Outward unit normal at the contact
    pub normal: Vec2,
}

/// Fault reported by a collision oracle
///
/// Oracles that cannot fail simply never construct this; the simulator treats
/// a fault as "stop here" and returns the trajectory computed so far.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("collision query failed: {0}")]
    QueryFailed(String),
}

/// Read-only intersection oracle over collidable geometry
///
/// Implementations must be deterministic for a static world: identical
/// arguments return identical results, which is what makes the last preview
/// frame and the actual launch agree.
pub trait CollisionQuery {
    /// Nearest intersection of the segment `[from, to]` against surfaces
    /// passing `mask`, or `None` if the path is clear.
    fn nearest_hit(
        &self,
        from: Vec2,
        to: Vec2,
        mask: CollisionMask,
    ) -> Result<Option<SurfaceHit>, WorldError>;
}
