//! Deterministic trajectory simulation
//!
//! Everything here is pure and deterministic:
//! - Fixed timestep only
//! - No I/O, no global state
//! - Geometry reached only through the read-only [`CollisionQuery`] seam
//!
//! Identical inputs against a static world reproduce the same trajectory,
//! bit for bit.

pub mod geometry;
pub mod trajectory;
pub mod world;

pub use geometry::{SegmentWorld, Surface};
pub use trajectory::{Trajectory, TrajectoryPoint, bounce_velocity, simulate};
pub use world::{CollisionMask, CollisionQuery, SurfaceHit, WorldError};
