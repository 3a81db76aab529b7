use std::time::Duration;

use wavegrid_common::ParamStore;
use wavegrid_input::OrbitControls;
use wavegrid_render::{Clock, FrameState};
use wavegrid_render_wgpu::OrbitCamera;
use wavegrid_tools::FrameStats;

/// Per-frame bookkeeping run before each draw.
///
/// Reads the clock, applies this frame's share of orbit motion to the
/// camera, records frame timing and snapshots the parameters.
#[derive(Debug, Default)]
pub struct FrameStep {
    frame: u64,
    last_time: Option<f32>,
}

impl FrameStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames produced so far.
    pub fn frames(&self) -> u64 {
        self.frame
    }

    pub fn advance<C: Clock + ?Sized>(
        &mut self,
        clock: &C,
        controls: &mut OrbitControls,
        camera: &mut OrbitCamera,
        stats: &mut FrameStats,
        store: &ParamStore,
    ) -> FrameState {
        let time = clock.elapsed();
        let dt = match self.last_time {
            Some(prev) => (time - prev).max(0.0),
            None => 0.0,
        };
        // The first frame has no predecessor to time against.
        if self.last_time.is_some() {
            stats.record(Duration::try_from_secs_f32(dt).unwrap_or_default());
        }
        self.last_time = Some(time);

        let delta = controls.update();
        if !delta.is_none() {
            if delta.reset {
                camera.reset();
            }
            camera.orbit(delta.yaw, delta.pitch);
            camera.zoom(delta.zoom);
        }

        let state = FrameState {
            frame: self.frame,
            time,
            dt,
            params: store.snapshot(),
        };
        self.frame += 1;

        tracing::trace!(frame = state.frame, time, dt, "frame advanced");
        state
    }
}
