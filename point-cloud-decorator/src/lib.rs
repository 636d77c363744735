/// Tree point cloud decoration: ornaments, blinking lights and snow.
pub mod archive;
pub mod bounds;
pub mod compose;
pub mod config;
pub mod constants;
pub mod decorator;
pub mod error;
pub mod hull;
pub mod io;
pub mod layers;
pub mod lights;
pub mod manifest;
pub mod ornaments;
pub mod point;
pub mod snow;
pub mod template;
pub mod transform;

pub use config::{DecorationConfig, PlyEncoding};
pub use decorator::TreeDecorator;
pub use error::{DecorError, Result};
pub use manifest::DecorationSummary;
pub use point::{FrameTag, Point, PointCloud};
