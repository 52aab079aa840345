//! Drag gesture state machine
//!
//! Replaces per-frame input polling with discrete press / drag / release
//! events. While a gesture is active every drag update resolves a launch and
//! feeds a fresh trajectory preview to the renderer; release resolves the same
//! computation one final time for the actual impulse and clears the preview.

use glam::Vec2;

use crate::launch::{Launch, resolve_launch};
use crate::params::{LaunchTuning, ParamsError, SimParams};
use crate::sim::{CollisionQuery, Trajectory, simulate};

/// Where the aimer is in the gesture lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { start: Vec2 },
}

/// Consumer of trajectory previews
///
/// Owns all visual presentation. An empty trajectory passed to `show` or a
/// call to `hide` both mean "clear the display".
pub trait TrajectoryRenderer {
    fn show(&mut self, trajectory: &Trajectory);
    fn hide(&mut self);
}

/// Wires drag input, launch resolution, and trajectory prediction together
#[derive(Debug, Clone)]
pub struct Aimer {
    params: SimParams,
    tuning: LaunchTuning,
    state: DragState,
}

impl Aimer {
    /// Build an aimer, rejecting invalid configuration up front.
    pub fn new(params: SimParams, tuning: LaunchTuning) -> Result<Self, ParamsError> {
        params.validate()?;
        tuning.validate()?;
        Ok(Self {
            params,
            tuning,
            state: DragState::Idle,
        })
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn tuning(&self) -> &LaunchTuning {
        &self.tuning
    }

    /// Begin a gesture at the given pointer position. Ignored while a gesture
    /// is already active.
    pub fn press(&mut self, pos: Vec2) {
        if let DragState::Idle = self.state {
            self.state = DragState::Dragging { start: pos };
            log::debug!("drag started at {pos}");
        }
    }

    /// Pointer moved during a gesture: resolve the pending launch, simulate
    /// from `origin`, and hand the preview to the renderer. Returns the
    /// resolved launch, or `None` when no gesture is active.
    pub fn drag(
        &mut self,
        pos: Vec2,
        origin: Vec2,
        world: &impl CollisionQuery,
        renderer: &mut impl TrajectoryRenderer,
    ) -> Option<Launch> {
        let DragState::Dragging { start } = self.state else {
            return None;
        };
        let launch = resolve_launch(start, pos, &self.tuning);
        let trajectory = simulate(origin, launch.velocity, &self.params, world);
        renderer.show(&trajectory);
        Some(launch)
    }

    /// End the gesture: resolve the final launch with the identical clamp the
    /// preview used, clear the preview, and return the impulse to apply.
    pub fn release(
        &mut self,
        pos: Vec2,
        renderer: &mut impl TrajectoryRenderer,
    ) -> Option<Launch> {
        let DragState::Dragging { start } = self.state else {
            return None;
        };
        self.state = DragState::Idle;
        renderer.hide();
        let launch = resolve_launch(start, pos, &self.tuning);
        log::debug!("released with force {} velocity {}", launch.force, launch.velocity);
        Some(launch)
    }

    /// Abort the gesture without launching (pointer left the window, etc).
    pub fn cancel(&mut self, renderer: &mut impl TrajectoryRenderer) {
        if self.is_dragging() {
            self.state = DragState::Idle;
            renderer.hide();
        }
    }
}
