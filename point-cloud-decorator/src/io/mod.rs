//! Point cloud readers and writers.
//!
//! Every reader hands back the same typed [`PointCloud`]; column naming quirks
//! (`r/g/b` aliases, `//X` headers, 16-bit colour) are resolved here so the
//! decoration code never sees them.

mod laz;
mod ply;
mod text;

pub use self::laz::read_las;
pub use self::ply::{read_ply, write_ply};
pub use self::text::read_text;

use crate::error::{DecorError, Result};
use crate::point::{Point, PointCloud};
use glam::DVec3;
use std::path::Path;

/// Load a tree, picking the reader from the file extension.
pub fn read_tree(path: &Path) -> Result<PointCloud> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let cloud = match extension.as_str() {
        "ply" => read_ply(path)?,
        "las" | "laz" => read_las(path)?,
        _ => read_text(path)?,
    };

    if cloud.is_empty() {
        return Err(DecorError::EmptyCloud(path.display().to_string()));
    }
    Ok(cloud)
}

/// Canonical colour column for a header name, folding the short aliases.
pub(crate) fn colour_channel(name: &str) -> Option<usize> {
    match name {
        "red" | "r" => Some(0),
        "green" | "g" => Some(1),
        "blue" | "b" => Some(2),
        _ => None,
    }
}

/// Pass a finite position through; NaN or infinite coordinates are a schema error.
pub(crate) fn finite_position(
    path: &str,
    location: impl std::fmt::Display,
    position: DVec3,
) -> Result<DVec3> {
    if position.is_finite() {
        Ok(position)
    } else {
        Err(DecorError::schema(
            path,
            format!("{location}: non-finite coordinate {position}"),
        ))
    }
}

/// Collects optional raw colours and settles their bit depth once all points are in.
pub(crate) struct ColourBuilder {
    raw: Vec<Option<[f64; 3]>>,
    complete: bool,
    max_channel: f64,
}

impl ColourBuilder {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: Vec::with_capacity(capacity),
            complete: true,
            max_channel: 0.0,
        }
    }

    pub(crate) fn push(&mut self, colour: Option<[f64; 3]>) {
        match colour {
            Some(rgb) => {
                for channel in rgb {
                    self.max_channel = self.max_channel.max(channel);
                }
            }
            None => self.complete = false,
        }
        self.raw.push(colour);
    }

    /// Pair the colours with positions. Channels above 255 mean the source
    /// stored 16-bit colour, which is scaled down to 8 bits.
    pub(crate) fn finish(self, positions: Vec<DVec3>) -> PointCloud {
        let has_colour = self.complete && !self.raw.is_empty();
        let scale = if self.max_channel > 255.0 {
            1.0 / 256.0
        } else {
            1.0
        };

        let points = positions
            .into_iter()
            .zip(self.raw)
            .map(|(position, colour)| {
                let colour = match colour {
                    Some(rgb) if has_colour => rgb.map(|c| (c * scale).round().clamp(0.0, 255.0) as u8),
                    _ => [0, 0, 0],
                };
                Point::new(position, colour)
            })
            .collect();

        PointCloud::new(points, has_colour)
    }
}
