//! Line-segment collision world
//!
//! A small concrete [`CollisionQuery`] backing: solid surfaces are line
//! segments with layer bits. Enough to stand in for a full physics engine in
//! tests, demos, and headless use.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::world::{CollisionMask, CollisionQuery, SurfaceHit, WorldError};

/// A solid one-sided wall between two points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    pub a: Vec2,
    pub b: Vec2,
    /// Layer bits checked against the query mask
    pub layers: u32,
}

impl Surface {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b, layers: 1 }
    }

    pub fn with_layers(a: Vec2, b: Vec2, layers: u32) -> Self {
        Self { a, b, layers }
    }

    /// Intersect the path segment `[from, to]` with this surface.
    ///
    /// Returns the path fraction `t` in [0, 1], the contact point, and the
    /// unit normal facing the incoming path. Parallel or degenerate
    /// configurations count as a miss.
    pub fn intersect(&self, from: Vec2, to: Vec2) -> Option<(f32, Vec2, Vec2)> {
        let dir = to - from;
        let edge = self.b - self.a;
        let denom = dir.perp_dot(edge);
        if denom.abs() < 1e-12 {
            return None; // Parallel or zero-length
        }

        let diff = self.a - from;
        let t = diff.perp_dot(edge) / denom;
        let s = diff.perp_dot(dir) / denom;
        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&s) {
            return None;
        }

        let point = from + dir * t;
        let normal = Vec2::new(-edge.y, edge.x).normalize_or_zero();
        if normal == Vec2::ZERO {
            return None;
        }
        // Orient the normal against the direction of travel
        let normal = if normal.dot(dir) > 0.0 { -normal } else { normal };
        Some((t, point, normal))
    }
}

/// Collision world made of line segments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentWorld {
    surfaces: Vec<Surface>,
}

impl SegmentWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, surface: Surface) -> &mut Self {
        self.surfaces.push(surface);
        self
    }

    /// Convenience: an infinite-feeling floor at the given height
    pub fn with_floor(y: f32, half_extent: f32) -> Self {
        let mut world = Self::new();
        world.add(Surface::new(
            Vec2::new(-half_extent, y),
            Vec2::new(half_extent, y),
        ));
        world
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl CollisionQuery for SegmentWorld {
    fn nearest_hit(
        &self,
        from: Vec2,
        to: Vec2,
        mask: CollisionMask,
    ) -> Result<Option<SurfaceHit>, WorldError> {
        let mut best: Option<(f32, SurfaceHit)> = None;
        for surface in &self.surfaces {
            if !mask.matches(surface.layers) {
                continue;
            }
            if let Some((t, point, normal)) = surface.intersect(from, to) {
                let closer = best.as_ref().is_none_or(|(best_t, _)| t < *best_t);
                if closer {
                    best = Some((t, SurfaceHit { point, normal }));
                }
            }
        }
        Ok(best.map(|(_, hit)| hit))
    }
}
