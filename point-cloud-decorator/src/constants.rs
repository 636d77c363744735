/// Shared configuration for tree decoration

/// Default thickness of one horizontal slab
pub const DEFAULT_VERTICAL_SPACING: f64 = 0.5;

/// Default standard deviation of the snow height noise
pub const DEFAULT_SNOW_NOISE: f64 = 0.5;

/// Angular step of the sphere template sweep, in degrees
pub const TEMPLATE_ANGLE_STEP_DEG: usize = 5;

/// Ornament sphere radius
pub const ORNAMENT_RADIUS: f64 = 0.5;

/// Light sphere radius
pub const LIGHT_RADIUS: f64 = 0.1;

/// Maximum ornaments hung on one slab
pub const MAX_ORNAMENTS_PER_LAYER: usize = 5;

/// Slabs with fewer points are left undecorated
pub const MIN_LAYER_POINTS: usize = 10;

/// Hull area covered by one light
pub const HULL_AREA_PER_LIGHT: usize = 20;

/// Warm white used for every light
pub const LIGHT_COLOUR: [u8; 3] = [255, 248, 220];

/// Bark colour painted onto trees without colour
pub const BARK_COLOUR: [u8; 3] = [160, 82, 45];

/// Snow colour
pub const SNOW_COLOUR: [u8; 3] = [255, 255, 255];

/// Snow grid spacing in world units
pub const SNOW_GRID_RESOLUTION: f64 = 0.1;

/// Gaussian blur sigma applied to the snow heights, in grid cells
pub const SNOW_BLUR_SIGMA: f64 = 10.0;

/// Blur kernel half-width as a multiple of sigma
pub const SNOW_BLUR_TRUNCATE: f64 = 4.0;

/// Point cap for size-limited (Sketchfab) export
pub const MAX_EXPORT_POINTS: usize = 3_000_000;

/// Archive size above which the upload warning is printed
pub const ARCHIVE_WARN_BYTES: u64 = 180_000_000;

/// Output file names
pub const FRAME_FILE_NAMES: [&str; 2] = ["xmas_tree_pc0.ply", "xmas_tree_pc1.ply"];
pub const TIMEFRAME_FILE_NAME: &str = "sketchfab.timeframe";
pub const ARCHIVE_FILE_NAME: &str = "my-awesome-christmas-tree.zip";
pub const METADATA_FILE_NAME: &str = "xmas_tree_metadata.json";

/// Seconds each frame is shown during playback
pub const FRAME_SECONDS: u32 = 1;
