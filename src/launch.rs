//! Drag vector to launch resolution
//!
//! Pure vector arithmetic: the drag delta (start minus current pointer
//! position) is clamped to the tuning's drag limit, scaled into a force, and
//! divided by mass to get the launch velocity. The same computation backs both
//! the live preview and the actual launch, so the two can never disagree.

use glam::Vec2;

use crate::params::LaunchTuning;

/// Resolved launch: the impulse to apply and the velocity it produces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub force: Vec2,
    pub velocity: Vec2,
}

/// Resolve a drag gesture into a launch.
///
/// A zero drag delta resolves to zero force and velocity; the direction of a
/// degenerate drag is deliberately undefined, so callers wanting a visible
/// preview should not feed identical start/current positions.
pub fn resolve_launch(drag_start: Vec2, drag_current: Vec2, tuning: &LaunchTuning) -> Launch {
    let mut delta = drag_start - drag_current;
    if delta.length() > tuning.drag_limit {
        delta = delta.normalize() * tuning.drag_limit;
    }

    let force = delta * tuning.force_scale;
    Launch {
        force,
        velocity: force / tuning.mass,
    }
}
