/// Horizontal slab partitioning of the tree cloud
use crate::point::Point;
use glam::DVec2;
use std::collections::BTreeMap;

/// One horizontal slab of the tree.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Quantized slab floor, a multiple of the vertical spacing.
    pub base_z: f64,
    /// Horizontal cross-section of the slab's points.
    pub xy: Vec<DVec2>,
}

impl Layer {
    pub fn len(&self) -> usize {
        self.xy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xy.is_empty()
    }

    /// At or above `zmin` with at least `min_points` points.
    pub fn is_decoratable(&self, zmin: f64, min_points: usize) -> bool {
        self.base_z >= zmin && self.len() >= min_points
    }

    /// Axis-aligned (min, max) of the cross-section.
    pub fn xy_extent(&self) -> (DVec2, DVec2) {
        self.xy.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(min, max), &p| (min.min(p), max.max(p)),
        )
    }
}

/// Bucket index of a height; the layer key is `index * spacing`.
pub fn layer_index(z: f64, spacing: f64) -> i64 {
    (z / spacing).floor() as i64
}

/// Quantized layer key of a height.
pub fn layer_key(z: f64, spacing: f64) -> f64 {
    layer_index(z, spacing) as f64 * spacing
}

/// Group every point into its slab, ascending by height.
/// Every point lands in exactly one slab.
pub fn partition(points: &[Point], spacing: f64) -> Vec<Layer> {
    let mut buckets: BTreeMap<i64, Vec<DVec2>> = BTreeMap::new();
    for point in points {
        buckets
            .entry(layer_index(point.position.z, spacing))
            .or_default()
            .push(point.position.truncate());
    }

    buckets
        .into_iter()
        .map(|(index, xy)| Layer {
            base_z: index as f64 * spacing,
            xy,
        })
        .collect()
}
