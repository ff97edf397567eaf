//! Editor and extrusion settings.

use serde::{Deserialize, Serialize};

use crate::curve::Parameterization;
use crate::error::ConfigError;
use crate::geometry::Vec3;

/// Which part of the scene the user is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditorMode {
    /// Drawing the path a profile is swept along.
    SweepPath,
    /// Drawing the 2D profile curve.
    Profile2D,
    /// Viewing the profile revolved around an axis.
    Revolution,
    /// Viewing the profile swept along the path.
    #[default]
    General,
}

impl EditorMode {
    /// Modes that edit curves in the plane rather than viewing a mesh.
    pub fn is_2d_editing(&self) -> bool {
        matches!(self, EditorMode::SweepPath | EditorMode::Profile2D)
    }
}

/// Multipliers applied to cursor deltas during transform gestures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSpeeds {
    pub translate: f64,
    pub scale: f64,
    pub shear: f64,
}

impl Default for GestureSpeeds {
    fn default() -> Self {
        Self {
            translate: 1.0,
            scale: 1.0,
            shear: 1.0,
        }
    }
}

/// All tunable editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Step count passed to [`Curve::sample`](crate::Curve::sample) for previews.
    pub steps: usize,
    /// Pick radius around control points (world units).
    pub control_point_radius: f64,
    /// Number of rings along a sweep or around a revolution.
    pub ring_count: usize,
    /// Profile scale at the start of the sweep path.
    pub start_scale: f64,
    /// Profile scale at the end of the sweep path.
    pub final_scale: f64,
    pub revolution_axis: Vec3,
    pub close_sweep_path: bool,
    pub close_profile: bool,
    pub sweep_parameterization: Parameterization,
    pub profile_parameterization: Parameterization,
    /// Vertices taken from the profile curve when it drives the cross-section.
    pub profile_samples: usize,
    pub gesture: GestureSpeeds,
    pub mode: EditorMode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            steps: 2,
            control_point_radius: 0.5,
            ring_count: 20,
            start_scale: 1.0,
            final_scale: 0.2,
            revolution_axis: Vec3::new(0.0, 1.0, 0.0),
            close_sweep_path: false,
            close_profile: false,
            sweep_parameterization: Parameterization::Bezier,
            profile_parameterization: Parameterization::Bezier,
            profile_samples: 10,
            gesture: GestureSpeeds::default(),
            mode: EditorMode::General,
        }
    }
}

impl EditorConfig {
    /// Parse from JSON. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values no editor session can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "steps",
                reason: "must be at least 1".into(),
            });
        }
        if self.control_point_radius.is_nan() || self.control_point_radius < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "control_point_radius",
                reason: format!("must be non-negative, got {}", self.control_point_radius),
            });
        }
        if !self.start_scale.is_finite() || !self.final_scale.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "start_scale/final_scale",
                reason: "must be finite".into(),
            });
        }
        if !self.revolution_axis.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "revolution_axis",
                reason: "must be finite".into(),
            });
        }
        Ok(())
    }
}
