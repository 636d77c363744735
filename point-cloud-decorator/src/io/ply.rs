use super::{ColourBuilder, colour_channel, finite_position};
use crate::config::PlyEncoding;
use crate::error::{DecorError, Result};
use crate::point::{Point, PointCloud};
use glam::DVec3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Ply, Property};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Read the `vertex` element of an ASCII or binary PLY file.
pub fn read_ply(path: &Path) -> Result<PointCloud> {
    let display = path.display().to_string();
    let mut reader = BufReader::new(File::open(path)?);
    let parser = Parser::<DefaultElement>::new();
    let ply: Ply<DefaultElement> = parser.read_ply(&mut reader)?;

    let vertices = ply
        .payload
        .get("vertex")
        .ok_or_else(|| DecorError::schema(&display, "missing 'vertex' element"))?;

    // Resolve colour property names once from the header.
    let mut colour_keys: [Option<String>; 3] = [None, None, None];
    if let Some(def) = ply.header.elements.get("vertex") {
        for name in def.properties.keys() {
            if let Some(channel) = colour_channel(&name.to_ascii_lowercase()) {
                colour_keys[channel].get_or_insert_with(|| name.clone());
            }
        }
    }
    let has_colour_columns = colour_keys.iter().all(Option::is_some);

    let mut positions = Vec::with_capacity(vertices.len());
    let mut colours = ColourBuilder::with_capacity(vertices.len());
    for (index, element) in vertices.iter().enumerate() {
        let scalar = |key: &str| {
            element
                .get(key)
                .and_then(property_f64)
                .ok_or_else(|| {
                    DecorError::schema(&display, format!("vertex {index} has no numeric '{key}'"))
                })
        };

        positions.push(finite_position(
            &display,
            format_args!("vertex {index}"),
            DVec3::new(scalar("x")?, scalar("y")?, scalar("z")?),
        )?);

        let colour = if has_colour_columns {
            let mut rgb = [0.0; 3];
            for (channel, key) in colour_keys.iter().flatten().enumerate() {
                rgb[channel] = scalar(key.as_str())?;
            }
            Some(rgb)
        } else {
            None
        };
        colours.push(colour);
    }

    Ok(colours.finish(positions))
}

fn property_f64(property: &Property) -> Option<f64> {
    match *property {
        Property::Char(v) => Some(v as f64),
        Property::UChar(v) => Some(v as f64),
        Property::Short(v) => Some(v as f64),
        Property::UShort(v) => Some(v as f64),
        Property::Int(v) => Some(v as f64),
        Property::UInt(v) => Some(v as f64),
        Property::Float(v) => Some(v as f64),
        Property::Double(v) => Some(v),
        _ => None,
    }
}

/// Write points as PLY with columns x, y, z (double) and red, green, blue (uchar).
pub fn write_ply(path: &Path, points: &[Point], encoding: PlyEncoding) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);

    let format = match encoding {
        PlyEncoding::Ascii => "ascii",
        PlyEncoding::BinaryLittleEndian => "binary_little_endian",
    };

    // Header
    writeln!(w, "ply")?;
    writeln!(w, "format {} 1.0", format)?;
    writeln!(w, "element vertex {}", points.len())?;
    for axis in ["x", "y", "z"] {
        writeln!(w, "property double {}", axis)?;
    }
    for channel in ["red", "green", "blue"] {
        writeln!(w, "property uchar {}", channel)?;
    }
    writeln!(w, "end_header")?;

    // Body
    match encoding {
        PlyEncoding::Ascii => {
            for p in points {
                let [r, g, b] = p.colour;
                writeln!(
                    w,
                    "{} {} {} {} {} {}",
                    p.position.x, p.position.y, p.position.z, r, g, b
                )?;
            }
        }
        PlyEncoding::BinaryLittleEndian => {
            for p in points {
                for value in p.position.to_array() {
                    w.write_all(&value.to_le_bytes())?;
                }
                w.write_all(&p.colour)?;
            }
        }
    }

    w.flush()?;
    Ok(())
}
