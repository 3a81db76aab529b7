use glam::Vec2;

/// Errors from grid construction.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("grid size must be positive and finite, got {0}")]
    InvalidSize(f32),
    #[error("grid needs at least one segment per side")]
    NoSegments,
    #[error("{segments} segments per side exceeds the limit of {max}")]
    TooManySegments { segments: u32, max: u32 },
}

/// Shape of the square point grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Edge length in world units.
    pub size: f32,
    /// Subdivisions per side; the grid has `(segments + 1)²` points.
    pub segments: u32,
}

impl GridConfig {
    /// Keeps the vertex count addressable by `u32` draw calls.
    pub const MAX_SEGMENTS: u32 = 4096;
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            segments: 200,
        }
    }
}

/// Square lattice of planar coordinates centred on the origin.
///
/// Points are stored row-major: `index = row * side + col`, with `x`
/// increasing along a row and `y` increasing from row to row.
#[derive(Debug, Clone)]
pub struct PointGrid {
    config: GridConfig,
    points: Vec<Vec2>,
}

impl PointGrid {
    pub fn new(config: GridConfig) -> Result<Self, MeshError> {
        if !(config.size.is_finite() && config.size > 0.0) {
            return Err(MeshError::InvalidSize(config.size));
        }
        if config.segments == 0 {
            return Err(MeshError::NoSegments);
        }
        if config.segments > GridConfig::MAX_SEGMENTS {
            return Err(MeshError::TooManySegments {
                segments: config.segments,
                max: GridConfig::MAX_SEGMENTS,
            });
        }

        let side = config.segments as usize + 1;
        let spacing = config.size / config.segments as f32;
        let half = config.size * 0.5;

        let mut points = Vec::with_capacity(side * side);
        for row in 0..side {
            let y = row as f32 * spacing - half;
            for col in 0..side {
                points.push(Vec2::new(col as f32 * spacing - half, y));
            }
        }

        tracing::debug!(
            size = config.size,
            segments = config.segments,
            points = points.len(),
            "point grid built"
        );

        Ok(Self { config, points })
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// Points per side.
    pub fn side(&self) -> usize {
        self.config.segments as usize + 1
    }

    /// Distance between neighbouring points.
    pub fn spacing(&self) -> f32 {
        self.config.size / self.config.segments as f32
    }

    pub fn half_extent(&self) -> f32 {
        self.config.size * 0.5
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat index of the point at `(col, row)`.
    pub fn index(&self, col: usize, row: usize) -> Option<usize> {
        let side = self.side();
        (col < side && row < side).then(|| row * side + col)
    }

    pub fn point(&self, col: usize, row: usize) -> Option<Vec2> {
        self.index(col, row).map(|i| self.points[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GridConfig::default();
        assert_eq!(config.size, 10.0);
        assert_eq!(config.segments, 200);
    }

    #[test]
    fn vertex_count_and_extent() {
        let grid = PointGrid::new(GridConfig {
            size: 4.0,
            segments: 4,
        })
        .unwrap();
        assert_eq!(grid.side(), 5);
        assert_eq!(grid.len(), 25);
        assert_eq!(grid.spacing(), 1.0);
        assert_eq!(grid.point(0, 0), Some(Vec2::new(-2.0, -2.0)));
        assert_eq!(grid.point(4, 4), Some(Vec2::new(2.0, 2.0)));
        assert_eq!(grid.point(2, 2), Some(Vec2::ZERO));
        assert_eq!(grid.point(5, 0), None);
    }

    #[test]
    fn rows_are_contiguous() {
        let grid = PointGrid::new(GridConfig {
            size: 2.0,
            segments: 2,
        })
        .unwrap();
        assert_eq!(grid.index(1, 0), Some(1));
        assert_eq!(grid.index(0, 1), Some(3));
        let p = grid.points();
        assert!(p[1].x > p[0].x && p[1].y == p[0].y);
        assert!(p[3].y > p[0].y && p[3].x == p[0].x);
    }

    #[test]
    fn rejects_bad_configs() {
        assert!(matches!(
            PointGrid::new(GridConfig {
                size: 0.0,
                segments: 4
            }),
            Err(MeshError::InvalidSize(_))
        ));
        assert!(matches!(
            PointGrid::new(GridConfig {
                size: f32::NAN,
                segments: 4
            }),
            Err(MeshError::InvalidSize(_))
        ));
        assert!(matches!(
            PointGrid::new(GridConfig {
                size: 1.0,
                segments: 0
            }),
            Err(MeshError::NoSegments)
        ));
        assert!(matches!(
            PointGrid::new(GridConfig {
                size: 1.0,
                segments: 10_000
            }),
            Err(MeshError::TooManySegments { .. })
        ));
    }
}
