/// Christmas tree point cloud decorator entry point
use clap::Parser;
use point_cloud_decorator::constants::{DEFAULT_SNOW_NOISE, DEFAULT_VERTICAL_SPACING};
use point_cloud_decorator::{DecorationConfig, PlyEncoding, TreeDecorator};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "christmasify",
    version,
    about = "Decorate a tree point cloud with ornaments, blinking lights and snow"
)]
struct Args {
    /// Path to the tree point cloud (.ply, .las, .laz or whitespace text with a header)
    #[arg(short, long)]
    tree: PathBuf,

    /// Thin to the upload cap and bundle the frames into a zip
    #[arg(long)]
    sketchfab: bool,

    /// Slabs below this height are not decorated
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    zmin: f64,

    /// Slab thickness
    #[arg(long, default_value_t = DEFAULT_VERTICAL_SPACING)]
    vertical_spacing: f64,

    /// Repaint the tree brown even when it has colour
    #[arg(long)]
    replace_brown: bool,

    /// Add a snow field under the tree
    #[arg(long)]
    snow: bool,

    /// Standard deviation of the snow height noise before smoothing
    #[arg(long, default_value_t = DEFAULT_SNOW_NOISE)]
    snow_noise: f64,

    /// Seed for a reproducible decoration
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory, defaults to the tree's directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write ASCII PLY frames instead of binary
    #[arg(long)]
    ascii: bool,

    /// Debug logging and progress bars
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> DecorationConfig {
        DecorationConfig {
            vertical_spacing: self.vertical_spacing,
            zmin: self.zmin,
            replace_brown: self.replace_brown,
            snow: self.snow,
            snow_noise: self.snow_noise,
            sketchfab: self.sketchfab,
            seed: self.seed,
            output_dir: self.output_dir.clone(),
            encoding: if self.ascii {
                PlyEncoding::Ascii
            } else {
                PlyEncoding::BinaryLittleEndian
            },
            ..Default::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let decorator = TreeDecorator::new(&args.tree, args.config())?.with_progress(args.verbose);
    let summary = decorator.run()?;

    println!(
        "Decorated {} tree points with {} ornaments and {} lights",
        summary.points.tree, summary.decorations.ornaments, summary.decorations.lights
    );
    for frame in &summary.frames {
        println!(
            "  {} ({} points)",
            decorator.output_dir().join(&frame.file).display(),
            frame.point_count
        );
    }
    if let Some(archive) = &summary.archive {
        println!(
            "  {} ({} bytes)",
            decorator.output_dir().join(&archive.file).display(),
            archive.size_bytes
        );
    }

    Ok(())
}
