use crate::action::Action;

/// Camera motion to apply this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitDelta {
    /// Radians around the vertical axis.
    pub yaw: f32,
    /// Radians toward the pole.
    pub pitch: f32,
    /// Distance multiplier; 1.0 leaves the distance unchanged.
    pub zoom: f32,
    /// Return to the starting orbit before applying the rest.
    pub reset: bool,
}

impl OrbitDelta {
    pub const NONE: OrbitDelta = OrbitDelta {
        yaw: 0.0,
        pitch: 0.0,
        zoom: 1.0,
        reset: false,
    };

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Orbit gesture accumulator with exponential damping.
///
/// Drag and scroll input is queued; every `update` releases a fraction
/// `damping` of what is pending, so motion eases out after the pointer
/// stops. Over enough frames the total released equals the input.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Radians per dragged pixel.
    pub rotate_speed: f32,
    /// Zoom strength per scroll line.
    pub zoom_speed: f32,
    /// Fraction of pending motion released per frame, in (0, 1].
    pub damping: f32,
    pub enable_damping: bool,
    pending_yaw: f32,
    pending_pitch: f32,
    /// Natural log of the pending distance multiplier.
    pending_zoom: f32,
    pending_reset: bool,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            damping: 0.1,
            enable_damping: true,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
            pending_reset: false,
        }
    }
}

/// Pending motion below this is dropped.
const REST_EPSILON: f32 = 1.0e-5;

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a camera action. Returns false for actions the controls ignore.
    pub fn handle(&mut self, action: &Action) -> bool {
        match *action {
            Action::Orbit { dx, dy } => {
                self.pending_yaw -= dx * self.rotate_speed;
                self.pending_pitch += dy * self.rotate_speed;
                true
            }
            Action::Zoom(lines) => {
                self.pending_zoom -= lines * self.zoom_speed;
                true
            }
            Action::ResetCamera => {
                self.pending_yaw = 0.0;
                self.pending_pitch = 0.0;
                self.pending_zoom = 0.0;
                self.pending_reset = true;
                true
            }
            _ => false,
        }
    }

    /// Whether any motion is still queued.
    pub fn is_moving(&self) -> bool {
        self.pending_reset
            || self.pending_yaw.abs() > REST_EPSILON
            || self.pending_pitch.abs() > REST_EPSILON
            || self.pending_zoom.abs() > REST_EPSILON
    }

    /// Release this frame's share of the queued motion.
    pub fn update(&mut self) -> OrbitDelta {
        let factor = if self.enable_damping {
            self.damping.clamp(f32::EPSILON, 1.0)
        } else {
            1.0
        };

        let delta = OrbitDelta {
            yaw: self.pending_yaw * factor,
            pitch: self.pending_pitch * factor,
            zoom: (self.pending_zoom * factor).exp(),
            reset: std::mem::take(&mut self.pending_reset),
        };

        let keep = 1.0 - factor;
        self.pending_yaw = settle(self.pending_yaw * keep);
        self.pending_pitch = settle(self.pending_pitch * keep);
        self.pending_zoom = settle(self.pending_zoom * keep);

        if delta.reset {
            tracing::debug!("camera reset");
        }
        delta
    }
}

fn settle(v: f32) -> f32 {
    if v.abs() < REST_EPSILON { 0.0 } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_controls_emit_nothing() {
        let mut c = OrbitControls::new();
        assert!(!c.is_moving());
        assert!(c.update().is_none());
    }

    #[test]
    fn undamped_releases_everything_at_once() {
        let mut c = OrbitControls {
            enable_damping: false,
            ..OrbitControls::default()
        };
        c.handle(&Action::Orbit { dx: 100.0, dy: -20.0 });
        let d = c.update();
        assert!((d.yaw + 0.5).abs() < 1e-6);
        assert!((d.pitch + 0.1).abs() < 1e-6);
        assert!(!c.is_moving());
        assert!(c.update().is_none());
    }

    #[test]
    fn damping_eases_out_and_sums_to_input() {
        let mut c = OrbitControls::new();
        c.handle(&Action::Orbit { dx: 200.0, dy: 0.0 });

        let first = c.update();
        let second = c.update();
        assert!(first.yaw.abs() > second.yaw.abs());

        let mut total = first.yaw + second.yaw;
        for _ in 0..500 {
            total += c.update().yaw;
        }
        assert!((total + 1.0).abs() < 1e-3, "total yaw {total}");
        assert!(!c.is_moving());
    }

    #[test]
    fn zoom_is_multiplicative() {
        let mut c = OrbitControls {
            enable_damping: false,
            ..OrbitControls::default()
        };
        c.handle(&Action::Zoom(1.0));
        let d = c.update();
        assert!(d.zoom < 1.0, "scrolling forward moves closer");
        c.handle(&Action::Zoom(-1.0));
        let back = c.update();
        assert!((d.zoom * back.zoom - 1.0).abs() < 1e-6);
    }

    #[test]
    fn reset_clears_pending_motion() {
        let mut c = OrbitControls::new();
        c.handle(&Action::Orbit { dx: 50.0, dy: 50.0 });
        c.handle(&Action::ResetCamera);
        let d = c.update();
        assert!(d.reset);
        assert_eq!(d.yaw, 0.0);
        assert!(!c.update().reset);
    }

    #[test]
    fn ignores_non_camera_actions() {
        let mut c = OrbitControls::new();
        assert!(!c.handle(&Action::TogglePanel));
        assert!(!c.is_moving());
    }
}
