use serde::{Deserialize, Serialize};

use crate::preset::PresetDoc;

/// Identifies one of the seven tunable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParamId {
    PointSize,
    Freq1,
    Amp1,
    Speed1,
    Freq2,
    Amp2,
    Speed2,
}

impl ParamId {
    /// All parameters in panel order.
    pub const ALL: [ParamId; 7] = [
        ParamId::PointSize,
        ParamId::Freq1,
        ParamId::Amp1,
        ParamId::Speed1,
        ParamId::Freq2,
        ParamId::Amp2,
        ParamId::Speed2,
    ];

    /// Position in `ALL`, used as a dense index by the store.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            ParamId::PointSize => "pointSize",
            ParamId::Freq1 => "freq1",
            ParamId::Amp1 => "amp1",
            ParamId::Speed1 => "speed1",
            ParamId::Freq2 => "freq2",
            ParamId::Amp2 => "amp2",
            ParamId::Speed2 => "speed2",
        }
    }

    /// Allowed range and slider step for this parameter.
    pub fn range(self) -> ParamRange {
        match self {
            ParamId::PointSize => ParamRange::new(1.0, 10.0, 0.5),
            ParamId::Freq1 | ParamId::Freq2 => ParamRange::new(0.1, 3.0, 0.1),
            ParamId::Amp1 | ParamId::Amp2 => ParamRange::new(0.1, 3.0, 0.1),
            ParamId::Speed1 | ParamId::Speed2 => ParamRange::new(0.01, 2.0, 0.01),
        }
    }

    pub fn step(self) -> f32 {
        self.range().step
    }

    /// Look a parameter up by its label.
    pub fn from_label(label: &str) -> Option<ParamId> {
        Self::ALL.into_iter().find(|id| id.label() == label)
    }
}

impl std::fmt::Display for ParamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive numeric range with a step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into the range. NaN maps to `min`.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Clamp, then round to the nearest step counted from `min`.
    pub fn snap(&self, value: f32) -> f32 {
        let clamped = self.clamp(value);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

/// Errors from parameter validation and preset loading.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("{param} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        param: ParamId,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{param} is not a finite number")]
    NonFinite { param: ParamId },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported preset format: {0:?} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
}

/// One noise layer: spatial frequency, height amplitude and scroll speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveLayer {
    pub frequency: f32,
    pub amplitude: f32,
    pub speed: f32,
}

/// The full tunable parameter set read by every frame.
///
/// Deserializes through `PresetDoc`: any field may be absent, and the
/// flat labels (`freq1`, `amp2`, ...) are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PresetDoc")]
pub struct WaveParams {
    /// Rendered point diameter in pixels. Does not affect displacement.
    pub point_size: f32,
    pub primary: WaveLayer,
    pub secondary: WaveLayer,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            point_size: 2.5,
            primary: WaveLayer {
                frequency: 0.6,
                amplitude: 1.0,
                speed: 0.3,
            },
            secondary: WaveLayer {
                frequency: 1.4,
                amplitude: 0.4,
                speed: 0.5,
            },
        }
    }
}

impl WaveParams {
    pub fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::PointSize => self.point_size,
            ParamId::Freq1 => self.primary.frequency,
            ParamId::Amp1 => self.primary.amplitude,
            ParamId::Speed1 => self.primary.speed,
            ParamId::Freq2 => self.secondary.frequency,
            ParamId::Amp2 => self.secondary.amplitude,
            ParamId::Speed2 => self.secondary.speed,
        }
    }

    /// Store a raw value. No clamping; see `sanitized` for that.
    pub fn set(&mut self, id: ParamId, value: f32) {
        let slot = match id {
            ParamId::PointSize => &mut self.point_size,
            ParamId::Freq1 => &mut self.primary.frequency,
            ParamId::Amp1 => &mut self.primary.amplitude,
            ParamId::Speed1 => &mut self.primary.speed,
            ParamId::Freq2 => &mut self.secondary.frequency,
            ParamId::Amp2 => &mut self.secondary.amplitude,
            ParamId::Speed2 => &mut self.secondary.speed,
        };
        *slot = value;
    }

    /// Copy with every parameter clamped into its range.
    pub fn sanitized(&self) -> Self {
        let mut out = *self;
        for id in ParamId::ALL {
            out.set(id, id.range().clamp(self.get(id)));
        }
        out
    }

    /// Check every parameter against its range, reporting the first offender.
    pub fn validate(&self) -> Result<(), ParamError> {
        for id in ParamId::ALL {
            let value = self.get(id);
            if !value.is_finite() {
                return Err(ParamError::NonFinite { param: id });
            }
            let range = id.range();
            if !range.contains(value) {
                return Err(ParamError::OutOfRange {
                    param: id,
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }
}
