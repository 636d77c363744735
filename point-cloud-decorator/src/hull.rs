/// Planar convex hull of a slab cross-section
use glam::DVec2;
use thiserror::Error;

/// Relative tolerance for collinearity and boundary tests.
const EPSILON: f64 = 1e-12;

#[derive(Debug, Error, PartialEq)]
pub enum HullError {
    #[error("convex hull needs at least 3 points, got {0}")]
    TooFewPoints(usize),

    #[error("all {0} points are collinear")]
    Collinear(usize),
}

/// Convex hull with vertices in counter-clockwise order.
#[derive(Debug, Clone)]
pub struct ConvexHull {
    /// Indices into the input points, counter-clockwise.
    vertices: Vec<usize>,
    /// Vertex coordinates in the same order.
    polygon: Vec<DVec2>,
    area: f64,
    scale: f64,
}

impl ConvexHull {
    /// Compute the hull with Andrew's monotone chain.
    /// Collinear boundary points are dropped, so every vertex is a true corner.
    pub fn compute(points: &[DVec2]) -> Result<Self, HullError> {
        if points.len() < 3 {
            return Err(HullError::TooFewPoints(points.len()));
        }

        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_by(|&a, &b| {
            points[a]
                .x
                .total_cmp(&points[b].x)
                .then(points[a].y.total_cmp(&points[b].y))
        });
        order.dedup_by(|a, b| points[*a] == points[*b]);

        let (min, max) = points.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(min, max), &p| (min.min(p), max.max(p)),
        );
        let scale = (max - min).max_element().max(f64::MIN_POSITIVE);
        let tolerance = EPSILON * scale * scale;

        let turns_left = |hull: &[usize], next: usize| {
            let a = points[hull[hull.len() - 2]];
            let b = points[hull[hull.len() - 1]];
            cross(b - a, points[next] - a) > tolerance
        };

        let mut lower: Vec<usize> = Vec::with_capacity(order.len());
        for &i in &order {
            while lower.len() >= 2 && !turns_left(&lower, i) {
                lower.pop();
            }
            lower.push(i);
        }

        let mut upper: Vec<usize> = Vec::with_capacity(order.len());
        for &i in order.iter().rev() {
            while upper.len() >= 2 && !turns_left(&upper, i) {
                upper.pop();
            }
            upper.push(i);
        }

        lower.pop();
        upper.pop();
        lower.extend(upper);
        let vertices = lower;

        if vertices.len() < 3 {
            return Err(HullError::Collinear(points.len()));
        }

        let polygon: Vec<DVec2> = vertices.iter().map(|&i| points[i]).collect();
        let area = shoelace_area(&polygon);
        if area <= tolerance {
            return Err(HullError::Collinear(points.len()));
        }

        Ok(Self {
            vertices,
            polygon,
            area,
            scale,
        })
    }

    /// Boundary vertex indices into the input points, counter-clockwise.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Boundary vertex coordinates, counter-clockwise.
    pub fn polygon(&self) -> &[DVec2] {
        &self.polygon
    }

    /// Enclosed planar area. Drives light density, so this is the 2-D area
    /// and not a volume.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Point-in-polygon test, inclusive of the boundary.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let p = DVec2::new(x, y);
        if !p.is_finite() {
            return false;
        }
        let tolerance = EPSILON * self.scale * self.scale;
        let n = self.polygon.len();
        (0..n).all(|i| {
            let a = self.polygon[i];
            let b = self.polygon[(i + 1) % n];
            cross(b - a, p - a) >= -tolerance
        })
    }
}

fn cross(a: DVec2, b: DVec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Shoelace area, with vertices taken relative to the first one.
fn shoelace_area(polygon: &[DVec2]) -> f64 {
    let Some(&origin) = polygon.first() else {
        return 0.0;
    };
    let twice: f64 = polygon
        .windows(2)
        .map(|edge| cross(edge[0] - origin, edge[1] - origin))
        .sum();
    twice.abs() * 0.5
}
