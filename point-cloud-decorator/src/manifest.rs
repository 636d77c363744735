/// Playback manifest and run summary generation.
use crate::bounds::PointCloudBounds;
use crate::config::DecorationConfig;
use crate::constants::{FRAME_SECONDS, METADATA_FILE_NAME, TIMEFRAME_FILE_NAME};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Point counts of each table feeding the merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointCounts {
    pub tree: usize,
    pub snow: usize,
    pub ornaments: usize,
    pub lights: usize,
    pub merged: usize,
    /// Size after thinning, equal to `merged` when nothing was dropped.
    pub exported: usize,
}

/// Decoration outcome across all slabs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecorationStats {
    pub layers_total: usize,
    pub layers_decorated: usize,
    /// Slabs below `zmin` or with too few points.
    pub layers_skipped: usize,
    /// Slabs whose hull was degenerate.
    pub layers_degenerate: usize,
    pub ornaments: usize,
    pub lights: usize,
    /// Light candidates drawn before the hull test.
    pub light_candidates: usize,
    pub lights_outside_hull: usize,
    pub lights_above_tree: usize,
}

/// Summary of one run, written next to the frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecorationSummary {
    pub input: String,
    pub config: DecorationConfig,
    pub bounds: PointCloudBounds,
    pub had_colour: bool,
    pub points: PointCounts,
    pub decorations: DecorationStats,
    pub downsampled: bool,
    pub frames: Vec<FrameInfo>,
    pub archive: Option<ArchiveInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameInfo {
    pub file: String,
    pub point_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveInfo {
    pub file: String,
    pub size_bytes: u64,
    pub oversized: bool,
}

/// Writes the playback manifest and run summary into the output directory.
pub struct ManifestGenerator {
    output_dir: PathBuf,
}

impl ManifestGenerator {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Writes the Sketchfab timeframe file: one `<seconds> <file>` line per frame.
    pub fn generate_timeframe(&self, frame_files: &[&str]) -> Result<PathBuf> {
        let contents: String = frame_files
            .iter()
            .map(|file| format!("{} {}\n", FRAME_SECONDS, file))
            .collect();

        let timeframe_path = self.output_dir.join(TIMEFRAME_FILE_NAME);
        fs::write(&timeframe_path, contents)?;
        log::info!("Generated timeframe manifest: {}", timeframe_path.display());
        Ok(timeframe_path)
    }

    /// Writes the run summary as pretty JSON.
    pub fn generate_summary(&self, summary: &DecorationSummary) -> Result<PathBuf> {
        let summary_path = self.output_dir.join(METADATA_FILE_NAME);
        let summary_json = serde_json::to_string_pretty(summary)?;
        fs::write(&summary_path, summary_json)?;

        log::info!("Saved {}", summary_path.display());
        self.print_summary(summary);
        Ok(summary_path)
    }

    fn print_summary(&self, summary: &DecorationSummary) {
        log::info!("Decoration summary:");
        log::info!("  Tree points: {}", summary.points.tree);
        log::info!(
            "  Layers: {} decorated, {} skipped, {} degenerate",
            summary.decorations.layers_decorated,
            summary.decorations.layers_skipped,
            summary.decorations.layers_degenerate
        );
        log::info!(
            "  Ornaments: {} ({} points)",
            summary.decorations.ornaments,
            summary.points.ornaments
        );
        log::info!(
            "  Lights: {} of {} candidates ({} outside hull, {} above tree)",
            summary.decorations.lights,
            summary.decorations.light_candidates,
            summary.decorations.lights_outside_hull,
            summary.decorations.lights_above_tree
        );
        if summary.points.snow > 0 {
            log::info!("  Snow points: {}", summary.points.snow);
        }
        for frame in &summary.frames {
            log::info!("  {}: {} points", frame.file, frame.point_count);
        }
    }
}
