/// Merging of tree, snow and decorations into exported frames
use crate::point::{FrameTag, Point};
use rand::Rng;
use rand::seq::index;

/// Independently accumulated point tables of one run.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    pub tree: Vec<Point>,
    pub snow: Vec<Point>,
    pub ornaments: Vec<Point>,
    pub lights: Vec<Point>,
}

impl Composition {
    pub fn len(&self) -> usize {
        self.tree.len() + self.snow.len() + self.ornaments.len() + self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate tree, snow, ornaments and lights.
    /// Everything except lights is forced to always-visible.
    pub fn merge(&self) -> Vec<Point> {
        let mut merged = Vec::with_capacity(self.len());
        merged.extend(
            self.tree
                .iter()
                .chain(&self.snow)
                .chain(&self.ornaments)
                .map(|p| p.with_frame(FrameTag::Always)),
        );
        merged.extend_from_slice(&self.lights);
        merged
    }
}

/// Uniformly keep exactly `cap` points when there are more, preserving order.
pub fn downsample<R: Rng + ?Sized>(points: Vec<Point>, cap: usize, rng: &mut R) -> Vec<Point> {
    if points.len() <= cap {
        return points;
    }

    let mut keep = index::sample(rng, points.len(), cap).into_vec();
    keep.sort_unstable();
    keep.into_iter().map(|i| points[i]).collect()
}

/// Points drawn in exported frame `frame` (0 or 1).
pub fn frame(points: &[Point], frame: usize) -> Vec<Point> {
    points
        .iter()
        .filter(|p| p.frame.visible_in(frame))
        .copied()
        .collect()
}
