use super::{ColourBuilder, finite_position};
use crate::error::Result;
use crate::point::PointCloud;
use glam::DVec3;
use las::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Create LAS file reader for point cloud access.
/// Handles both .las and .laz compressed formats.
pub fn create_reader(file_path: &Path) -> Result<Reader> {
    let file = File::open(file_path)?;
    let buf_reader = BufReader::new(file);
    Ok(Reader::new(buf_reader)?)
}

/// Load every point of a LAS/LAZ tree.
/// Colour is kept only if every point carries it.
pub fn read_las(file_path: &Path) -> Result<PointCloud> {
    let display = file_path.display().to_string();
    let mut reader = create_reader(file_path)?;
    let header = reader.header();
    let total_points = header.number_of_points() as usize;
    log::debug!(
        "LAS {}.{} point format {:?}, {} points",
        header.version().major,
        header.version().minor,
        header.point_format().to_u8(),
        total_points
    );

    let mut positions = Vec::with_capacity(total_points);
    let mut colours = ColourBuilder::with_capacity(total_points);
    for (index, point_result) in reader.points().enumerate() {
        let point = point_result?;
        positions.push(finite_position(
            &display,
            format_args!("point {index}"),
            DVec3::new(point.x, point.y, point.z),
        )?);
        colours.push(
            point
                .color
                .map(|c| [c.red as f64, c.green as f64, c.blue as f64]),
        );
    }

    Ok(colours.finish(positions))
}
