use wavegrid_common::WaveParams;
use wavegrid_kernel::max_displacement;
use wavegrid_mesh::{GridConfig, Heightfield, MeshError, PointGrid};

/// Everything a renderer needs to draw one frame of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Frames produced so far, starting at 0.
    pub frame: u64,
    /// Animation time in seconds.
    pub time: f32,
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Parameter snapshot taken for this frame.
    pub params: WaveParams,
}

impl FrameState {
    pub fn at(time: f32, params: WaveParams) -> Self {
        Self {
            frame: 0,
            time,
            dt: 0.0,
            params,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a frame snapshot and produces output. It never
/// mutates parameters; those belong to the tuning interface.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &FrameState) -> Self::Output;
}

/// Layout of the text renderer's output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextView {
    /// Characters per side of the square preview.
    pub resolution: u32,
    /// World-space edge length covered by the preview.
    pub extent: f32,
}

impl Default for TextView {
    fn default() -> Self {
        Self {
            resolution: 32,
            extent: 10.0,
        }
    }
}

/// Top-down ASCII shading of the displaced surface.
///
/// Each character is one grid point; brighter glyphs are higher. Heights
/// are normalized by the parameter set's maximum possible displacement, so
/// frames with the same amplitudes are directly comparable.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    grid: PointGrid,
}

const RAMP: &[u8] = b" .:-=+*#%@";

impl TextRenderer {
    pub fn new(view: TextView) -> Result<Self, MeshError> {
        let grid = PointGrid::new(GridConfig {
            size: view.extent,
            segments: view.resolution.saturating_sub(1),
        })?;
        Ok(Self { grid })
    }

    pub fn grid(&self) -> &PointGrid {
        &self.grid
    }

    fn glyph(height: f32, max: f32) -> char {
        let t = if max > 0.0 {
            (height / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let idx = (t * (RAMP.len() - 1) as f32).round() as usize;
        RAMP[idx] as char
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameState) -> String {
        let field = Heightfield::evaluate(&self.grid, frame.time, &frame.params);
        let max = max_displacement(&frame.params);
        let (lo, hi) = field.bounds().unwrap_or((0.0, 0.0));

        let mut out = String::new();
        out.push_str(&format!(
            "=== Wave Grid (t={:.2}s, points={}) ===\n",
            frame.time,
            self.grid.len()
        ));
        out.push_str(&format!(
            "height: min={lo:.3} max={hi:.3} mean={:.3} bound={max:.3}\n",
            field.mean()
        ));

        // Rows are printed far edge first so +y points up on screen.
        let side = field.side();
        for row in (0..side).rev() {
            let line: String = (0..side)
                .filter_map(|col| field.at(col, row))
                .map(|h| Self::glyph(h, max))
                .collect();
            out.push_str(&line);
            out.push('\n');
        }

        tracing::debug!(time = frame.time, "text frame rendered");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_renderer_square_output() {
        let renderer = TextRenderer::new(TextView {
            resolution: 16,
            extent: 8.0,
        })
        .unwrap();
        let frame = FrameState::at(0.0, WaveParams::default());
        let output = renderer.render(&frame);

        assert!(output.contains("t=0.00s"));
        assert!(output.contains("points=256"));
        let rows: Vec<&str> = output.lines().skip(2).collect();
        assert_eq!(rows.len(), 16);
        assert!(rows.iter().all(|r| r.chars().count() == 16));
    }

    #[test]
    fn text_renderer_is_deterministic() {
        let renderer = TextRenderer::new(TextView::default()).unwrap();
        let frame = FrameState::at(4.2, WaveParams::default());
        assert_eq!(renderer.render(&frame), renderer.render(&frame));
    }

    #[test]
    fn flat_surface_renders_blank() {
        let renderer = TextRenderer::new(TextView {
            resolution: 8,
            extent: 4.0,
        })
        .unwrap();
        let mut params = WaveParams::default();
        params.primary.amplitude = 0.0;
        params.secondary.amplitude = 0.0;
        let output = renderer.render(&FrameState::at(1.0, params));
        assert!(output.lines().skip(2).all(|r| r.trim().is_empty()));
    }

    #[test]
    fn single_point_view_is_rejected() {
        assert!(
            TextRenderer::new(TextView {
                resolution: 1,
                extent: 1.0
            })
            .is_err()
        );
    }

    #[test]
    fn glyph_ramp_ends() {
        assert_eq!(TextRenderer::glyph(0.0, 1.0), ' ');
        assert_eq!(TextRenderer::glyph(1.0, 1.0), '@');
        assert_eq!(TextRenderer::glyph(5.0, 0.0), ' ');
    }
}
