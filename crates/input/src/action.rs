use wavegrid_common::ParamId;

/// A high-level action produced by the desktop front end.
///
/// The frame loop and tuning panel consume actions, never raw input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Drag to orbit, in physical pixels.
    Orbit { dx: f32, dy: f32 },
    /// Scroll to zoom; positive moves the camera closer.
    Zoom(f32),
    /// Put the camera back at its starting orbit.
    ResetCamera,
    /// Restore every tunable parameter to its startup value.
    ResetParams,
    /// Move one parameter by whole slider steps.
    Adjust { param: ParamId, steps: i32 },
    /// Show or hide the tuning panel.
    TogglePanel,
    Quit,
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

impl Action {
    /// Whether this action feeds the orbit controls.
    pub fn is_camera(&self) -> bool {
        matches!(
            self,
            Action::Orbit { .. } | Action::Zoom(_) | Action::ResetCamera
        )
    }
}
