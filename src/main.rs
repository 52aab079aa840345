//! Drag Shot demo
//!
//! Runs a scripted drag gesture against a simple segment world and logs the
//! predicted trajectory. Useful as a headless smoke run; real hosts drive the
//! aimer from pointer events and draw the preview themselves.

use glam::Vec2;

use drag_shot::{
    Aimer, LaunchTuning, SegmentWorld, SimParams, Surface, Trajectory, TrajectoryRenderer,
};

/// Renderer that logs points instead of drawing them
#[derive(Default)]
struct LogRenderer {
    last_len: usize,
}

impl TrajectoryRenderer for LogRenderer {
    fn show(&mut self, trajectory: &Trajectory) {
        self.last_len = trajectory.len();
        log::info!("preview: {} points", trajectory.len());
        for (i, point) in trajectory.iter().enumerate() {
            log::debug!(
                "  [{i:3}] ({:7.3}, {:7.3}) alpha {:.2}",
                point.pos.x,
                point.pos.y,
                point.alpha
            );
        }
    }

    fn hide(&mut self) {
        log::info!("preview cleared ({} points dropped)", self.last_len);
        self.last_len = 0;
    }
}

fn main() {
    env_logger::init();
    log::info!("Drag Shot demo starting...");

    let mut world = SegmentWorld::with_floor(0.0, 100.0);
    world.add(Surface::new(Vec2::new(8.0, 0.0), Vec2::new(8.0, 6.0)));

    let mut aimer = Aimer::new(SimParams::default(), LaunchTuning::default())
        .expect("default configuration is valid");
    let mut renderer = LogRenderer::default();

    let origin = Vec2::new(0.0, 1.0);

    // Scripted gesture: press, pull down-left in a few samples, release
    aimer.press(Vec2::new(0.0, 1.0));
    for pull in [
        Vec2::new(-0.5, 0.8),
        Vec2::new(-1.2, 0.4),
        Vec2::new(-2.0, -0.2),
    ] {
        let launch = aimer
            .drag(pull, origin, &world, &mut renderer)
            .expect("gesture is active");
        log::info!("pending launch velocity: {}", launch.velocity);
    }

    let launch = aimer
        .release(Vec2::new(-2.0, -0.2), &mut renderer)
        .expect("gesture is active");
    log::info!(
        "launched with impulse {} (velocity {})",
        launch.force,
        launch.velocity
    );
}
