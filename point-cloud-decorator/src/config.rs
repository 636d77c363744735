/// Run configuration for the decoration pipeline
use crate::constants::{DEFAULT_SNOW_NOISE, DEFAULT_VERTICAL_SPACING, MAX_EXPORT_POINTS};
use crate::error::{DecorError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Point file encoding for exported frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlyEncoding {
    #[default]
    BinaryLittleEndian,
    Ascii,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecorationConfig {
    /// Slab thickness.
    pub vertical_spacing: f64,
    /// Slabs below this height are not decorated.
    pub zmin: f64,
    /// Repaint the tree bark brown even if it has colour.
    pub replace_brown: bool,
    pub snow: bool,
    pub snow_noise: f64,
    /// Thin to `point_cap` and package frames for upload.
    pub sketchfab: bool,
    pub point_cap: usize,
    /// Fixed seed for reproducible runs; drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Defaults to the directory of the input tree.
    pub output_dir: Option<PathBuf>,
    pub encoding: PlyEncoding,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
            zmin: 0.0,
            replace_brown: false,
            snow: false,
            snow_noise: DEFAULT_SNOW_NOISE,
            sketchfab: false,
            point_cap: MAX_EXPORT_POINTS,
            seed: None,
            output_dir: None,
            encoding: PlyEncoding::default(),
        }
    }
}

impl DecorationConfig {
    /// Reject values the geometry cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.vertical_spacing.is_finite() || self.vertical_spacing <= 0.0 {
            return Err(DecorError::Config(format!(
                "vertical spacing must be positive, got {}",
                self.vertical_spacing
            )));
        }
        if !self.zmin.is_finite() {
            return Err(DecorError::Config(format!("zmin must be finite, got {}", self.zmin)));
        }
        if !self.snow_noise.is_finite() || self.snow_noise < 0.0 {
            return Err(DecorError::Config(format!(
                "snow noise must be non-negative, got {}",
                self.snow_noise
            )));
        }
        if self.point_cap == 0 {
            return Err(DecorError::Config("point cap must be at least 1".into()));
        }
        Ok(())
    }
}
