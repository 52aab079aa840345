//! Fixed-step trajectory prediction
//!
//! Advances a point mass under gravity one timestep at a time, probing the
//! collision oracle along each step's path segment and applying
//! reflection + friction response at contacts. Pure and deterministic:
//! identical inputs against a static world produce identical output, which is
//! what keeps the last preview frame consistent with the actual launch.

use glam::Vec2;

use super::world::CollisionQuery;
use crate::params::SimParams;

/// A predicted position plus its fade weight for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub pos: Vec2,
    /// Visual weight in 0..1, fading from 1.0 toward the end of the path
    pub alpha: f32,
}

/// An ordered, finite sequence of predicted positions
///
/// Produced fresh on every [`simulate`] call and fully owned by the caller;
/// the simulator keeps no reference to it. Empty is valid (nothing to draw).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryPoint> {
        self.points.iter()
    }

    /// Build from raw positions, assigning fade weights 1.0 → `min_alpha`
    /// linearly across the point index.
    fn from_positions(positions: Vec<Vec2>, min_alpha: f32) -> Self {
        let last = positions.len().saturating_sub(1).max(1) as f32;
        let points = positions
            .into_iter()
            .enumerate()
            .map(|(i, pos)| {
                let t = i as f32 / last;
                let alpha = 1.0 + (min_alpha - 1.0) * t;
                TrajectoryPoint { pos, alpha }
            })
            .collect();
        Self { points }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Post-bounce velocity: reflect off the surface, keep `bounciness` of the
/// speed, and strip `friction` from the tangential component.
pub fn bounce_velocity(velocity: Vec2, normal: Vec2, bounciness: f32, friction: f32) -> Vec2 {
    let reflected = (velocity - 2.0 * velocity.dot(normal) * normal) * bounciness;

    let tangent = Vec2::new(-normal.y, normal.x);
    let v_tangent = reflected.dot(tangent) * (1.0 - friction);
    reflected.dot(normal) * normal + v_tangent * tangent
}

/// Predict the path of a projectile launched from `origin` with
/// `initial_velocity`.
///
/// Runs at most `params.max_steps` fixed steps, stopping early once speed
/// drops below `params.low_speed_threshold`. Each step applies gravity before
/// advancing, then takes the nearest intersection (if any) along the step's
/// path segment; surfaces further along the same segment are only seen on
/// later steps, so very thin or tightly spaced geometry can be tunneled
/// through. A faulting oracle ends the call with the points gathered so far.
pub fn simulate(
    origin: Vec2,
    initial_velocity: Vec2,
    params: &SimParams,
    world: &impl CollisionQuery,
) -> Trajectory {
    let gravity = params.effective_gravity();
    let dt = params.time_step;

    let mut position = origin;
    let mut velocity = initial_velocity;
    let mut positions = Vec::with_capacity(params.max_steps as usize);

    for _ in 0..params.max_steps {
        // Gravity before the positional advance; the ordering is observable
        velocity.y += gravity * dt;
        let candidate = position + velocity * dt;

        match world.nearest_hit(position, candidate, params.collision_mask) {
            Ok(Some(hit)) => {
                positions.push(hit.point);
                velocity = bounce_velocity(velocity, hit.normal, params.bounciness, params.friction);
                // Step off the surface so the next segment doesn't start on it
                position = hit.point + hit.normal * params.surface_offset;
            }
            Ok(None) => {
                positions.push(candidate);
                position = candidate;
            }
            Err(err) => {
                log::warn!("trajectory aborted after {} points: {err}", positions.len());
                break;
            }
        }

        if velocity.length() < params.low_speed_threshold {
            break;
        }
    }

    Trajectory::from_positions(positions, params.min_alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::{SegmentWorld, Surface};
    use crate::sim::world::{CollisionMask, SurfaceHit, WorldError};
    use proptest::prelude::*;

    fn no_gravity() -> SimParams {
        SimParams {
            gravity_scale: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_straight_line_without_gravity() {
        let params = no_gravity();
        let v = Vec2::new(3.0, 4.0);
        let traj = simulate(Vec2::ZERO, v, &params, &SegmentWorld::new());

        assert_eq!(traj.len(), params.max_steps as usize);
        let spacing = v.length() * params.time_step;
        for (i, point) in traj.iter().enumerate() {
            let expected = v * params.time_step * (i + 1) as f32;
            assert!(point.pos.abs_diff_eq(expected, 1e-3), "point {i} off ray");
            let dist = point.pos.length();
            assert!((dist - spacing * (i + 1) as f32).abs() < 2e-3);
        }
    }

    #[test]
    fn test_never_exceeds_max_steps() {
        let params = SimParams {
            max_steps: 7,
            ..Default::default()
        };
        let traj = simulate(
            Vec2::ZERO,
            Vec2::new(50.0, 50.0),
            &params,
            &SegmentWorld::new(),
        );
        assert_eq!(traj.len(), 7);
    }

    #[test]
    fn test_zero_max_steps_yields_empty() {
        let params = SimParams {
            max_steps: 0,
            ..Default::default()
        };
        let traj = simulate(Vec2::ZERO, Vec2::ONE, &params, &SegmentWorld::new());
        assert!(traj.is_empty());
    }

    #[test]
    fn test_low_speed_early_termination() {
        // No gravity and a velocity below the threshold: one step then stop
        let params = no_gravity();
        let traj = simulate(
            Vec2::ZERO,
            Vec2::new(0.001, 0.0),
            &params,
            &SegmentWorld::new(),
        );
        assert_eq!(traj.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let params = SimParams::default();
        let world = SegmentWorld::with_floor(0.0, 100.0);
        let origin = Vec2::new(0.0, 3.0);
        let v = Vec2::new(4.0, 2.0);

        let a = simulate(origin, v, &params, &world);
        let b = simulate(origin, v, &params, &world);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parabola_apex_matches_closed_form() {
        // gravity -9.8 scaled by 0.5, launch (5,5) from the origin
        let params = SimParams::default();
        let traj = simulate(
            Vec2::ZERO,
            Vec2::new(5.0, 5.0),
            &params,
            &SegmentWorld::new(),
        );

        let apex = traj
            .iter()
            .map(|p| p.pos.y)
            .fold(f32::MIN, f32::max);
        let g_eff = params.effective_gravity().abs();
        let expected = 5.0_f32 * 5.0 / (2.0 * g_eff);
        // Discrete integration undershoots the continuous apex slightly
        assert!(
            (apex - expected).abs() < 0.1,
            "apex {apex} vs closed form {expected}"
        );
    }

    #[test]
    fn test_single_floor_bounce() {
        // Launched downward-left from above a floor at y=0
        let params = SimParams {
            friction: 0.0,
            ..Default::default()
        };
        let world = SegmentWorld::with_floor(0.0, 1000.0);
        let traj = simulate(Vec2::new(0.0, 2.0), Vec2::new(-3.0, -5.0), &params, &world);

        let contacts: Vec<usize> = traj
            .iter()
            .enumerate()
            .filter(|(_, p)| p.pos.y.abs() < 1e-3)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(contacts.len(), 1, "expected exactly one bounce contact");

        // The path rises after the bounce
        let i = contacts[0];
        assert!(traj.points()[i + 1].pos.y > traj.points()[i].pos.y);
    }

    #[test]
    fn test_bounce_velocity_flips_normal_component() {
        let v = Vec2::new(2.0, -10.0);
        let out = bounce_velocity(v, Vec2::Y, 0.75, 0.0);
        assert!((out.y - 7.5).abs() < 1e-5);
        assert!((out.x - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_velocity_friction_strips_tangential() {
        let v = Vec2::new(4.0, -4.0);
        let out = bounce_velocity(v, Vec2::Y, 1.0, 1.0);
        // Full friction removes all tangential motion, full bounce keeps normal
        assert!((out.x).abs() < 1e-5);
        assert!((out.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_surface_only_within_one_step() {
        // Two floors close together; a fast drop crosses both in one step but
        // only the nearer one registers that step
        let params = SimParams {
            max_steps: 1,
            ..Default::default()
        };
        let mut world = SegmentWorld::new();
        world.add(Surface::new(Vec2::new(-10.0, 0.5), Vec2::new(10.0, 0.5)));
        world.add(Surface::new(Vec2::new(-10.0, 0.3), Vec2::new(10.0, 0.3)));

        let traj = simulate(Vec2::new(0.0, 1.0), Vec2::new(0.0, -50.0), &params, &world);
        assert_eq!(traj.len(), 1);
        assert!((traj.points()[0].pos.y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_alpha_fades_first_to_last() {
        let params = SimParams::default();
        let traj = simulate(
            Vec2::ZERO,
            Vec2::new(5.0, 5.0),
            &params,
            &SegmentWorld::new(),
        );
        assert!(traj.len() >= 2);
        let points = traj.points();
        assert!((points[0].alpha - 1.0).abs() < 1e-6);
        assert!((points[points.len() - 1].alpha - params.min_alpha).abs() < 1e-6);
        // Monotone non-increasing fade
        for pair in points.windows(2) {
            assert!(pair[1].alpha <= pair[0].alpha + 1e-6);
        }
    }

    #[test]
    fn test_single_point_alpha_is_one() {
        let params = no_gravity();
        let traj = simulate(
            Vec2::ZERO,
            Vec2::new(0.001, 0.0),
            &params,
            &SegmentWorld::new(),
        );
        assert_eq!(traj.len(), 1);
        assert!((traj.points()[0].alpha - 1.0).abs() < 1e-6);
    }

    /// Oracle that fails after a fixed number of queries
    struct FlakyWorld {
        fail_after: std::cell::Cell<u32>,
    }

    impl CollisionQuery for FlakyWorld {
        fn nearest_hit(
            &self,
            _from: Vec2,
            _to: Vec2,
            _mask: CollisionMask,
        ) -> Result<Option<SurfaceHit>, WorldError> {
            let remaining = self.fail_after.get();
            if remaining == 0 {
                return Err(WorldError::QueryFailed("geometry went away".into()));
            }
            self.fail_after.set(remaining - 1);
            Ok(None)
        }
    }

    #[test]
    fn test_world_fault_returns_partial_trajectory() {
        let params = SimParams::default();
        let world = FlakyWorld {
            fail_after: std::cell::Cell::new(5),
        };
        let traj = simulate(Vec2::ZERO, Vec2::new(5.0, 5.0), &params, &world);
        assert_eq!(traj.len(), 5);
    }

    proptest! {
        #[test]
        fn prop_bounce_never_gains_speed(
            vx in -50.0_f32..50.0,
            vy in -50.0_f32..50.0,
            angle in 0.0_f32..std::f32::consts::TAU,
            bounciness in 0.0_f32..=1.0,
            friction in 0.0_f32..=1.0,
        ) {
            let v = Vec2::new(vx, vy);
            let normal = Vec2::new(angle.cos(), angle.sin());
            let out = bounce_velocity(v, normal, bounciness, friction);
            prop_assert!(out.length() <= v.length() + 1e-3);
        }

        #[test]
        fn prop_point_count_bounded(
            vx in -20.0_f32..20.0,
            vy in -20.0_f32..20.0,
            max_steps in 1u32..200,
        ) {
            let params = SimParams { max_steps, ..Default::default() };
            let world = SegmentWorld::with_floor(-5.0, 1000.0);
            let traj = simulate(Vec2::ZERO, Vec2::new(vx, vy), &params, &world);
            prop_assert!(traj.len() <= max_steps as usize);
        }
    }
}
