//! Drag Shot - trajectory prediction for drag-launched 2D projectiles
//!
//! Core modules:
//! - `params`: Validated simulation and launch tuning
//! - `launch`: Drag vector to launch force/velocity resolution
//! - `sim`: Deterministic trajectory simulation (integration, collision, bounce)
//! - `aimer`: Drag gesture state machine wiring input to preview and launch
//!
//! The simulator is pure and deterministic: fixed timestep, no I/O, no global
//! state. Collision geometry is reached only through the read-only
//! [`sim::CollisionQuery`] seam, so any world representation can back it.

pub mod aimer;
pub mod launch;
pub mod params;
pub mod sim;

pub use aimer::{Aimer, DragState, TrajectoryRenderer};
pub use launch::{Launch, resolve_launch};
pub use params::{LaunchTuning, ParamsError, SimParams};
pub use sim::{
    CollisionMask, CollisionQuery, SegmentWorld, Surface, SurfaceHit, Trajectory, TrajectoryPoint,
    WorldError, simulate,
};

/// Default tuning constants
pub mod consts {
    /// Gravity acceleration along -Y (world units/s²)
    pub const GRAVITY: f32 = -9.8;
    /// Multiplier applied to gravity during prediction
    pub const GRAVITY_SCALE: f32 = 0.5;
    /// Fixed simulation timestep (50 Hz physics tick)
    pub const TIME_STEP: f32 = 0.02;
    /// Hard cap on simulation steps per call
    pub const MAX_STEPS: u32 = 100;
    /// Fraction of speed retained after a bounce
    pub const BOUNCINESS: f32 = 0.75;
    /// Fraction of tangential speed removed at a bounce
    pub const FRICTION: f32 = 0.1;
    /// Fade weight of the last predicted point
    pub const MIN_ALPHA: f32 = 0.1;
    /// Speed below which the simulation stops early
    pub const LOW_SPEED_THRESHOLD: f32 = 0.01;
    /// Offset along the contact normal to avoid re-hitting the same surface
    pub const SURFACE_OFFSET: f32 = 0.01;

    /// Maximum drag distance (world units)
    pub const DRAG_LIMIT: f32 = 3.0;
    /// Multiplier from clamped drag vector to launch force
    pub const FORCE_SCALE: f32 = 10.0;
    /// Projectile mass (launch velocity = force / mass)
    pub const MASS: f32 = 5.0;
}
