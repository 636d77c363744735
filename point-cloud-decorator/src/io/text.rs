use super::{ColourBuilder, colour_channel, finite_position};
use crate::error::{DecorError, Result};
use crate::point::PointCloud;
use glam::DVec3;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Normalise one header name: drop a leading `//` and lower-case it.
fn normalise_column(name: &str) -> String {
    name.strip_prefix("//").unwrap_or(name).to_ascii_lowercase()
}

/// Read a whitespace separated table with a header row, e.g. a CloudCompare
/// `//X Y Z R G B` export.
pub fn read_text(path: &Path) -> Result<PointCloud> {
    let display = path.display().to_string();
    let mut lines = BufReader::new(File::open(path)?).lines();

    let header = loop {
        match lines.next() {
            Some(line) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => return Err(DecorError::EmptyCloud(display)),
        }
    };
    let columns: Vec<String> = header.split_whitespace().map(normalise_column).collect();

    let find = |name: &str| columns.iter().position(|c| c == name);
    let (Some(ix), Some(iy), Some(iz)) = (find("x"), find("y"), find("z")) else {
        return Err(DecorError::schema(
            &display,
            format!("header needs x, y and z columns, found {:?}", columns),
        ));
    };

    let mut colour_columns = [None; 3];
    for (i, column) in columns.iter().enumerate() {
        if let Some(channel) = colour_channel(column) {
            colour_columns[channel].get_or_insert(i);
        }
    }
    let colour_columns: Option<[usize; 3]> = match colour_columns {
        [Some(r), Some(g), Some(b)] => Some([r, g, b]),
        _ => None,
    };

    let mut positions = Vec::new();
    let mut colours = ColourBuilder::with_capacity(0);
    for (line_index, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        // +2: one for the header, one for 1-based numbering.
        let line_number = line_index + 2;

        let values = line
            .split_whitespace()
            .map(|v| v.parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|e| DecorError::schema(&display, format!("line {line_number}: {e}")))?;
        if values.len() != columns.len() {
            return Err(DecorError::schema(
                &display,
                format!(
                    "line {line_number}: expected {} values, found {}",
                    columns.len(),
                    values.len()
                ),
            ));
        }

        positions.push(finite_position(
            &display,
            format_args!("line {line_number}"),
            DVec3::new(values[ix], values[iy], values[iz]),
        )?);
        colours.push(colour_columns.map(|cols| cols.map(|c| values[c])));
    }

    Ok(colours.finish(positions))
}
