//! Simulation and launch tuning
//!
//! All recognized tunables live here. Parameters are set once at configuration
//! time and are read-only for the duration of each simulate call; invalid
//! values are rejected up front rather than producing undefined trajectories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts;
use crate::sim::CollisionMask;

/// Configuration rejected at validation time
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be within [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("max_steps must be greater than zero")]
    ZeroSteps,
    #[error("invalid params json: {0}")]
    Json(String),
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ParamsError> {
    if !value.is_finite() {
        return Err(ParamsError::NotFinite { name, value });
    }
    if value <= 0.0 {
        return Err(ParamsError::NotPositive { name, value });
    }
    Ok(())
}

fn check_unit_range(name: &'static str, value: f32) -> Result<(), ParamsError> {
    if !value.is_finite() {
        return Err(ParamsError::NotFinite { name, value });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ParamsError::OutOfUnitRange { name, value });
    }
    Ok(())
}

fn check_finite(name: &'static str, value: f32) -> Result<(), ParamsError> {
    if !value.is_finite() {
        return Err(ParamsError::NotFinite { name, value });
    }
    Ok(())
}

/// Physical parameters for trajectory prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimParams {
    /// Gravity acceleration along Y (signed; negative pulls down)
    pub gravity: f32,
    /// Multiplier applied to gravity during prediction
    pub gravity_scale: f32,
    /// Time per simulation step (seconds)
    pub time_step: f32,
    /// Maximum number of simulation steps per call
    pub max_steps: u32,
    /// Fraction of speed retained after a bounce (0..1)
    pub bounciness: f32,
    /// Fraction of tangential speed removed at a bounce (0..1)
    pub friction: f32,
    /// Fade weight assigned to the last trajectory point (0..1)
    pub min_alpha: f32,
    /// Speed below which the simulation terminates early
    pub low_speed_threshold: f32,
    /// Offset along the contact normal after a bounce
    pub surface_offset: f32,
    /// Which surface layers participate in collision queries
    pub collision_mask: CollisionMask,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            gravity: consts::GRAVITY,
            gravity_scale: consts::GRAVITY_SCALE,
            time_step: consts::TIME_STEP,
            max_steps: consts::MAX_STEPS,
            bounciness: consts::BOUNCINESS,
            friction: consts::FRICTION,
            min_alpha: consts::MIN_ALPHA,
            low_speed_threshold: consts::LOW_SPEED_THRESHOLD,
            surface_offset: consts::SURFACE_OFFSET,
            collision_mask: CollisionMask::ALL,
        }
    }
}

impl SimParams {
    /// Check every field against its contract. Call once at setup.
    pub fn validate(&self) -> Result<(), ParamsError> {
        check_finite("gravity", self.gravity)?;
        check_finite("gravity_scale", self.gravity_scale)?;
        check_positive("time_step", self.time_step)?;
        if self.max_steps == 0 {
            return Err(ParamsError::ZeroSteps);
        }
        check_unit_range("bounciness", self.bounciness)?;
        check_unit_range("friction", self.friction)?;
        check_unit_range("min_alpha", self.min_alpha)?;
        check_positive("low_speed_threshold", self.low_speed_threshold)?;
        check_positive("surface_offset", self.surface_offset)?;
        Ok(())
    }

    /// Effective gravity used by the integrator
    #[inline]
    pub fn effective_gravity(&self) -> f32 {
        self.gravity * self.gravity_scale
    }

    /// Parse and validate params from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: Self =
            serde_json::from_str(json).map_err(|e| ParamsError::Json(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Serialize params to a JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Tuning for converting a drag gesture into a launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchTuning {
    /// Maximum drag distance; longer drags are clamped to this magnitude
    pub drag_limit: f32,
    /// Multiplier from clamped drag vector to launch force
    pub force_scale: f32,
    /// Projectile mass (launch velocity = force / mass)
    pub mass: f32,
}

impl Default for LaunchTuning {
    fn default() -> Self {
        Self {
            drag_limit: consts::DRAG_LIMIT,
            force_scale: consts::FORCE_SCALE,
            mass: consts::MASS,
        }
    }
}

impl LaunchTuning {
    pub fn validate(&self) -> Result<(), ParamsError> {
        check_positive("drag_limit", self.drag_limit)?;
        check_finite("force_scale", self.force_scale)?;
        check_positive("mass", self.mass)?;
        Ok(())
    }
}
