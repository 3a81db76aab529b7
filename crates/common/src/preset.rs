//! Read-only parameter presets.
//!
//! A preset is a YAML or JSON file with any subset of the `WaveParams`
//! fields; missing fields, including single fields inside a layer, keep
//! their defaults. The flat labels shown by the tuning panel work as well,
//! and win over the nested field they name:
//! ```yaml
//! point_size: 3.0
//! primary: { frequency: 0.8, speed: 0.25 }
//! amp2: 0.7
//! ```
//! Unknown keys are rejected.

use std::path::Path;

use serde::Deserialize;

use crate::params::{ParamError, ParamId, WaveLayer, WaveParams};

/// Optional-field form of `WaveLayer`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayerDoc {
    frequency: Option<f32>,
    amplitude: Option<f32>,
    speed: Option<f32>,
}

impl LayerDoc {
    fn apply(self, layer: &mut WaveLayer) {
        if let Some(v) = self.frequency {
            layer.frequency = v;
        }
        if let Some(v) = self.amplitude {
            layer.amplitude = v;
        }
        if let Some(v) = self.speed {
            layer.speed = v;
        }
    }
}

/// Preset document as written on disk. `WaveParams` deserializes through it.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PresetDoc {
    #[serde(alias = "pointSize")]
    point_size: Option<f32>,
    primary: Option<LayerDoc>,
    secondary: Option<LayerDoc>,
    freq1: Option<f32>,
    amp1: Option<f32>,
    speed1: Option<f32>,
    freq2: Option<f32>,
    amp2: Option<f32>,
    speed2: Option<f32>,
}

impl From<PresetDoc> for WaveParams {
    fn from(doc: PresetDoc) -> Self {
        let mut params = WaveParams::default();
        if let Some(layer) = doc.primary {
            layer.apply(&mut params.primary);
        }
        if let Some(layer) = doc.secondary {
            layer.apply(&mut params.secondary);
        }

        let flat = [
            (ParamId::PointSize, doc.point_size),
            (ParamId::Freq1, doc.freq1),
            (ParamId::Amp1, doc.amp1),
            (ParamId::Speed1, doc.speed1),
            (ParamId::Freq2, doc.freq2),
            (ParamId::Amp2, doc.amp2),
            (ParamId::Speed2, doc.speed2),
        ];
        for (id, value) in flat {
            if let Some(v) = value {
                params.set(id, v);
            }
        }
        params
    }
}

/// Loader for parameter presets.
pub struct ParamPreset;

impl ParamPreset {
    /// Load a preset, clamping out-of-range values with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<WaveParams, ParamError> {
        let path = path.as_ref();
        let raw = Self::load_raw(path)?;
        let params = raw.sanitized();
        for id in ParamId::ALL {
            let (before, after) = (raw.get(id), params.get(id));
            if before.to_bits() != after.to_bits() {
                tracing::warn!(
                    param = %id,
                    value = before,
                    clamped = after,
                    "preset value outside allowed range"
                );
            }
        }
        tracing::info!(path = %path.display(), "loaded parameter preset");
        Ok(params)
    }

    /// Load a preset exactly as written, without range enforcement.
    pub fn load_raw(path: impl AsRef<Path>) -> Result<WaveParams, ParamError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let data = match ext.as_str() {
            "yaml" | "yml" | "json" => std::fs::read_to_string(path)?,
            _ => return Err(ParamError::UnsupportedFormat(ext)),
        };
        Self::parse(&data, &ext)
    }

    /// Parse preset text. `format` is a file extension: `yaml`, `yml` or `json`.
    pub fn parse(data: &str, format: &str) -> Result<WaveParams, ParamError> {
        match format {
            "yaml" | "yml" => Ok(serde_yaml::from_str(data)?),
            "json" => Ok(serde_json::from_str(data)?),
            other => Err(ParamError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Render a parameter set as pretty JSON.
    pub fn to_json(params: &WaveParams) -> Result<String, ParamError> {
        Ok(serde_json::to_string_pretty(params)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn yaml_partial_preset_keeps_defaults() {
        let file = write_temp(
            ".yaml",
            "point_size: 4.0\nprimary: { frequency: 2.0, amplitude: 0.5, speed: 0.1 }\n",
        );
        let p = ParamPreset::load(file.path()).unwrap();
        assert_eq!(p.point_size, 4.0);
        assert_eq!(p.primary.frequency, 2.0);
        assert_eq!(p.secondary, WaveParams::default().secondary);
    }

    #[test]
    fn json_preset_is_clamped() {
        let file = write_temp(
            ".json",
            r#"{ "point_size": 99.0, "secondary": { "frequency": 0.0, "amplitude": 1.0, "speed": 1.0 } }"#,
        );
        let p = ParamPreset::load(file.path()).unwrap();
        assert_eq!(p.point_size, 10.0);
        assert_eq!(p.secondary.frequency, 0.1);

        let raw = ParamPreset::load_raw(file.path()).unwrap();
        assert_eq!(raw.point_size, 99.0);
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".toml", "point_size = 1.0");
        assert!(matches!(
            ParamPreset::load(file.path()),
            Err(ParamError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ParamPreset::load(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ParamError::Io(_))));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        assert!(matches!(
            ParamPreset::parse("point_size: [oops", "yaml"),
            Err(ParamError::Yaml(_))
        ));
    }

    #[test]
    fn partial_layer_keeps_its_own_defaults() {
        let p = ParamPreset::parse("primary: { amplitude: 2.0 }\n", "yaml").unwrap();
        let defaults = WaveParams::default();
        assert_eq!(p.primary.amplitude, 2.0);
        assert_eq!(p.primary.frequency, 0.6);
        assert_eq!(p.primary.speed, 0.3);
        assert_eq!(p.secondary, defaults.secondary);
        assert_eq!(p.point_size, defaults.point_size);

        let p = ParamPreset::parse(r#"{ "secondary": { "speed": 1.5 } }"#, "json").unwrap();
        assert_eq!(p.secondary.speed, 1.5);
        assert_eq!(p.secondary.frequency, 1.4);
        assert_eq!(p.secondary.amplitude, 0.4);
    }

    #[test]
    fn panel_labels_are_accepted() {
        let p = ParamPreset::parse("freq1: 2.0\npointSize: 3.5\nspeed2: 0.05\n", "yaml").unwrap();
        assert_eq!(p.primary.frequency, 2.0);
        assert_eq!(p.point_size, 3.5);
        assert_eq!(p.secondary.speed, 0.05);
        assert_eq!(p.primary.amplitude, 1.0);
    }

    #[test]
    fn flat_label_overrides_nested_field() {
        let p = ParamPreset::parse(
            "primary: { frequency: 0.9, speed: 0.2 }\nfreq1: 1.1\n",
            "yaml",
        )
        .unwrap();
        assert_eq!(p.primary.frequency, 1.1);
        assert_eq!(p.primary.speed, 0.2);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            ParamPreset::parse("freq3: 1.0\n", "yaml"),
            Err(ParamError::Yaml(_))
        ));
        assert!(matches!(
            ParamPreset::parse(r#"{ "primary": { "freqency": 1.0 } }"#, "json"),
            Err(ParamError::Json(_))
        ));

        let file = write_temp(".yaml", "pointsize: 4.0\n");
        let err = ParamPreset::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("pointsize"), "{err}");
    }

    #[test]
    fn json_output_parses_back() {
        let json = ParamPreset::to_json(&WaveParams::default()).unwrap();
        assert!(json.contains("\"point_size\""));
        assert_eq!(ParamPreset::parse(&json, "json").unwrap(), WaveParams::default());
    }
}
