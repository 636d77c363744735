/// Main tree decorator orchestrating layering, placement, snow and export.
use crate::archive::ArchiveWriter;
use crate::bounds::PointCloudBounds;
use crate::compose::{Composition, downsample, frame};
use crate::config::DecorationConfig;
use crate::constants::{
    ARCHIVE_FILE_NAME, ARCHIVE_WARN_BYTES, BARK_COLOUR, FRAME_FILE_NAMES, LIGHT_RADIUS,
    MIN_LAYER_POINTS, ORNAMENT_RADIUS,
};
use crate::error::{DecorError, Result};
use crate::hull::ConvexHull;
use crate::io::{read_tree, write_ply};
use crate::layers::partition;
use crate::lights::LightPlacer;
use crate::manifest::{
    ArchiveInfo, DecorationStats, DecorationSummary, FrameInfo, ManifestGenerator, PointCounts,
};
use crate::ornaments::OrnamentPlacer;
use crate::point::{Point, PointCloud};
use crate::snow::SnowFieldGenerator;
use crate::template::ShapeTemplate;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

/// Decorates one tree point cloud and writes the animation frames.
pub struct TreeDecorator {
    /// Input tree point cloud file path.
    tree_path: PathBuf,
    /// Output directory for frames, manifest and archive.
    output_dir: PathBuf,
    config: DecorationConfig,
    /// Draw progress bars while decorating.
    show_progress: bool,
}

/// Sphere templates shared by every placement of a run.
struct Templates {
    ornament: ShapeTemplate,
    light: ShapeTemplate,
}

impl TreeDecorator {
    /// Create a decorator for `tree_path`, validating the configuration.
    /// Output goes to the configured directory or next to the input file.
    pub fn new(tree_path: &Path, config: DecorationConfig) -> Result<Self> {
        config.validate()?;

        let output_dir = match &config.output_dir {
            Some(dir) => dir.clone(),
            None => tree_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf(),
        };

        Ok(Self {
            tree_path: tree_path.to_path_buf(),
            output_dir,
            config,
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Executes the complete pipeline with an RNG seeded from the config.
    pub fn run(&self) -> Result<DecorationSummary> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Executes the complete pipeline drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DecorationSummary> {
        let (tree, had_colour) = self.load_tree()?;
        let bounds = PointCloudBounds::from_points(&tree.points);
        ensure_bounds(&bounds, &self.tree_path)?;
        self.print_bounds(&bounds);

        let templates = Templates {
            ornament: ShapeTemplate::sphere(ORNAMENT_RADIUS),
            light: ShapeTemplate::sphere(LIGHT_RADIUS),
        };
        for (kind, template) in [("Ornament", &templates.ornament), ("Light", &templates.light)] {
            log::debug!(
                "{} template: {} points, radius {}",
                kind,
                template.len(),
                template.radius()
            );
        }

        let mut composition = Composition::default();
        log::info!("Adding lights and ornaments");
        let decorations =
            self.decorate_layers(&tree.points, &bounds, &templates, rng, &mut composition)?;

        if self.config.snow {
            log::info!("Adding a snow field");
            composition.snow =
                SnowFieldGenerator::new(self.config.snow_noise).generate(&bounds, rng)?;
        }
        composition.tree = tree.points;

        let merged = composition.merge();
        let merged_len = merged.len();
        let (exported, downsampled) =
            if self.config.sketchfab && merged_len > self.config.point_cap {
                log::info!(
                    "Thinning from {} to {} points",
                    merged_len,
                    self.config.point_cap
                );
                (downsample(merged, self.config.point_cap, rng), true)
            } else {
                (merged, false)
            };

        fs::create_dir_all(&self.output_dir)?;
        let frames = self.write_frames(&exported)?;

        let manifest_gen = ManifestGenerator::new(&self.output_dir);
        let archive = if self.config.sketchfab {
            Some(self.package(&manifest_gen)?)
        } else {
            None
        };

        let summary = DecorationSummary {
            input: self.tree_path.display().to_string(),
            config: self.config.clone(),
            bounds,
            had_colour,
            points: PointCounts {
                tree: composition.tree.len(),
                snow: composition.snow.len(),
                ornaments: composition.ornaments.len(),
                lights: composition.lights.len(),
                merged: merged_len,
                exported: exported.len(),
            },
            decorations,
            downsampled,
            frames,
            archive,
        };
        manifest_gen.generate_summary(&summary)?;

        Ok(summary)
    }

    /// Load the tree and paint it bark brown when it has no colour or a repaint was asked for.
    /// Also returns whether the file itself carried colour.
    fn load_tree(&self) -> Result<(PointCloud, bool)> {
        log::info!("Reading in point cloud: {}", self.tree_path.display());
        let mut tree = read_tree(&self.tree_path)?;
        log::info!("Loaded {} points", tree.len());

        let had_colour = tree.has_colour;
        if !had_colour || self.config.replace_brown {
            log::info!("Painting the tree brown...");
            tree.paint(BARK_COLOUR);
        }
        Ok((tree, had_colour))
    }

    /// Walk the slabs bottom to top, hanging ornaments and lights on each.
    /// Slabs with a degenerate hull are skipped.
    fn decorate_layers<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        bounds: &PointCloudBounds,
        templates: &Templates,
        rng: &mut R,
        composition: &mut Composition,
    ) -> Result<DecorationStats> {
        let layers = partition(points, self.config.vertical_spacing);
        let ornament_placer = OrnamentPlacer::new(&templates.ornament);
        let light_placer = LightPlacer::new(
            &templates.light,
            self.config.vertical_spacing,
            bounds.max_z,
        );

        let mut stats = DecorationStats {
            layers_total: layers.len(),
            ..Default::default()
        };

        let pb = self.progress_bar(layers.len() as u64)?;
        pb.set_message("Decorating layers");

        for layer in layers {
            pb.inc(1);

            if !layer.is_decoratable(self.config.zmin, MIN_LAYER_POINTS) {
                stats.layers_skipped += 1;
                continue;
            }

            let hull = match ConvexHull::compute(&layer.xy) {
                Ok(hull) => hull,
                Err(e) => {
                    log::debug!("Skipping layer at z={:.3}: {}", layer.base_z, e);
                    stats.layers_degenerate += 1;
                    continue;
                }
            };

            let ornaments = ornament_placer.place(&layer, &hull, rng, &mut composition.ornaments);
            let (lights, light_stats) =
                light_placer.place(&layer, &hull, rng, &mut composition.lights);

            stats.layers_decorated += 1;
            stats.ornaments += ornaments.len();
            stats.lights += lights.len();
            stats.light_candidates += light_stats.target;
            stats.lights_outside_hull += light_stats.target - light_stats.inside_hull;
            stats.lights_above_tree += light_stats.above_tree;

            log::debug!(
                "Layer z={:.3}: {} points, {} hull corners, hull area {:.2}, {} ornaments, {} lights",
                layer.base_z,
                layer.len(),
                hull.polygon().len(),
                hull.area(),
                ornaments.len(),
                lights.len()
            );
        }

        pb.finish_with_message("Layers decorated");
        Ok(stats)
    }

    /// Write frame 0 (always + first lights) and frame 1 (always + second lights).
    fn write_frames(&self, points: &[Point]) -> Result<Vec<FrameInfo>> {
        FRAME_FILE_NAMES
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let frame_points = frame(points, index);
                let path = self.output_dir.join(name);
                write_ply(&path, &frame_points, self.config.encoding)?;
                log::info!("Saved {} ({} points)", path.display(), frame_points.len());

                Ok(FrameInfo {
                    file: name.to_string(),
                    point_count: frame_points.len(),
                })
            })
            .collect()
    }

    /// Bundle the timeframe manifest and both frames for upload.
    /// An oversized archive is reported but kept.
    fn package(&self, manifest_gen: &ManifestGenerator) -> Result<ArchiveInfo> {
        log::info!("Preparing Sketchfab upload");
        let timeframe_path = manifest_gen.generate_timeframe(&FRAME_FILE_NAMES)?;

        let mut files = vec![timeframe_path];
        files.extend(FRAME_FILE_NAMES.iter().map(|name| self.output_dir.join(name)));

        let archive_path = self.output_dir.join(ARCHIVE_FILE_NAME);
        let size_bytes = ArchiveWriter::new(&archive_path).bundle(&files)?;
        log::info!("Saved {} ({} bytes)", archive_path.display(), size_bytes);

        let oversized = size_bytes > ARCHIVE_WARN_BYTES;
        if oversized {
            log::warn!(
                "!!! Sketchfab file too big ({} bytes): either reduce tree point density or increase vertical spacing !!!",
                size_bytes
            );
        }

        Ok(ArchiveInfo {
            file: ARCHIVE_FILE_NAME.to_string(),
            size_bytes,
            oversized,
        })
    }

    fn progress_bar(&self, len: u64) -> Result<ProgressBar> {
        if !self.show_progress {
            return Ok(ProgressBar::hidden());
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.green/blue}] {pos}/{len} layers ({percent}%) {msg}")?
                .progress_chars("▉▊▋▌▍▎▏ "),
        );
        Ok(pb)
    }

    /// Print coordinate bounds information for validation.
    fn print_bounds(&self, bounds: &PointCloudBounds) {
        log::info!("Tree bounds:");
        log::info!("  X: {:.2} to {:.2}", bounds.min_x, bounds.max_x);
        log::info!("  Y: {:.2} to {:.2}", bounds.min_y, bounds.max_y);
        log::info!("  Z: {:.2} to {:.2} (height)", bounds.min_z, bounds.max_z);
        let (width, depth, height) = bounds.dimensions();
        log::info!("  Size: {:.2} x {:.2} x {:.2}", width, depth, height);
    }
}

/// Reject a tree whose bounds never got a point, e.g. all-NaN input.
pub(crate) fn ensure_bounds(bounds: &PointCloudBounds, path: &Path) -> Result<()> {
    if bounds.is_valid() {
        Ok(())
    } else {
        Err(DecorError::EmptyCloud(path.display().to_string()))
    }
}
