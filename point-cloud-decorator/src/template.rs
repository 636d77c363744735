/// Reusable sphere point templates stamped onto the tree
use crate::constants::TEMPLATE_ANGLE_STEP_DEG;
use crate::point::{FrameTag, Point};
use crate::transform::{placement_matrix, rotation_matrix};
use glam::{DVec3, DVec4};

/// Immutable cluster of homogeneous points centred on the origin.
#[derive(Debug, Clone)]
pub struct ShapeTemplate {
    radius: f64,
    points: Vec<DVec4>,
}

impl ShapeTemplate {
    /// Sweep the reference point (0, r, 0) over every ordered pair of distinct
    /// angles on the template grid, rotating about X by one and Z by the other.
    pub fn sphere(radius: f64) -> Self {
        let angles: Vec<f64> = (0..360)
            .step_by(TEMPLATE_ANGLE_STEP_DEG)
            .map(|deg| (deg as f64).to_radians())
            .collect();
        let reference = DVec4::new(0.0, radius, 0.0, 1.0);

        let mut points = Vec::with_capacity(angles.len() * (angles.len() - 1));
        for (i, &a) in angles.iter().enumerate() {
            for (j, &z) in angles.iter().enumerate() {
                if i == j {
                    continue;
                }
                let rotation = rotation_matrix(DVec3::new(z, 0.0, a), DVec3::ZERO);
                points.push(rotation * reference);
            }
        }

        // Keep the prefix before the last row that is still homogeneous.
        let keep = points.iter().rposition(|p| p.w == 1.0).unwrap_or(0);
        points.truncate(keep);

        Self { radius, points }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DVec4] {
        &self.points
    }

    /// Append a copy of the template translated to `centre` to `out`.
    pub fn stamp(&self, centre: DVec3, colour: [u8; 3], frame: FrameTag, out: &mut Vec<Point>) {
        let transform = placement_matrix(centre);
        out.reserve(self.points.len());
        out.extend(self.points.iter().map(|&p| {
            let placed = transform * p;
            Point::new(placed.truncate(), colour).with_frame(frame)
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LIGHT_RADIUS, ORNAMENT_RADIUS};

    #[test]
    fn test_sphere_points_on_surface() {
        for radius in [0.1, 0.5, 2.0, 17.25] {
            let template = ShapeTemplate::sphere(radius);
            assert!(!template.is_empty());
            assert_eq!(template.radius(), radius);
            for p in template.points() {
                assert!((p.truncate().length() - radius).abs() < 1e-9);
                assert_eq!(p.w, 1.0);
            }
        }
    }

    #[test]
    fn test_sphere_point_count() {
        let template = ShapeTemplate::sphere(ORNAMENT_RADIUS);
        assert_eq!(template.len(), 72 * 71 - 1);
        assert_eq!(ShapeTemplate::sphere(LIGHT_RADIUS).len(), template.len());
    }

    #[test]
    fn test_stamp_leaves_template_untouched() {
        let template = ShapeTemplate::sphere(LIGHT_RADIUS);
        let before = template.points().to_vec();
        let centre = DVec3::new(3.0, -1.0, 7.5);

        let mut out = Vec::new();
        template.stamp(centre, [255, 248, 220], FrameTag::Second, &mut out);

        assert_eq!(template.points(), before.as_slice());
        assert_eq!(out.len(), template.len());
        for point in &out {
            assert!(((point.position - centre).length() - LIGHT_RADIUS).abs() < 1e-9);
            assert_eq!(point.frame, FrameTag::Second);
        }
    }
}
