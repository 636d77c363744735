/// Ornament placement on slab hull corners
use crate::constants::MAX_ORNAMENTS_PER_LAYER;
use crate::hull::ConvexHull;
use crate::layers::Layer;
use crate::point::{FrameTag, Placement, Point};
use crate::template::ShapeTemplate;
use glam::DVec3;
use rand::Rng;
use rand::seq::index;

/// Hangs ornaments on the outer corners of each slab.
pub struct OrnamentPlacer<'a> {
    template: &'a ShapeTemplate,
    max_per_layer: usize,
}

impl<'a> OrnamentPlacer<'a> {
    pub fn new(template: &'a ShapeTemplate) -> Self {
        Self {
            template,
            max_per_layer: MAX_ORNAMENTS_PER_LAYER,
        }
    }

    /// Sample distinct hull corners, stamp one randomly coloured ornament at
    /// each and append the points to `out`.
    pub fn place<R: Rng + ?Sized>(
        &self,
        layer: &Layer,
        hull: &ConvexHull,
        rng: &mut R,
        out: &mut Vec<Point>,
    ) -> Vec<Placement> {
        let corners = hull.vertices();
        let count = self.max_per_layer.min(corners.len());

        index::sample(rng, corners.len(), count)
            .into_iter()
            .map(|pick| {
                let anchor = layer.xy[corners[pick]];
                let centre = DVec3::new(anchor.x, anchor.y, layer.base_z);
                let colour = [
                    rng.random_range(0..255),
                    rng.random_range(0..255),
                    rng.random_range(0..255),
                ];
                self.template.stamp(centre, colour, FrameTag::Always, out);
                Placement {
                    centre,
                    colour,
                    frame: FrameTag::Always,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ORNAMENT_RADIUS;
    use glam::DVec2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ring(n: usize, radius: f64) -> Layer {
        let xy = (0..n)
            .map(|i| {
                let t = i as f64 / n as f64 * std::f64::consts::TAU;
                DVec2::new(t.cos() * radius, t.sin() * radius)
            })
            .collect();
        Layer { base_z: 1.5, xy }
    }

    #[test]
    fn test_at_most_five_distinct_corners() {
        let template = ShapeTemplate::sphere(ORNAMENT_RADIUS);
        let placer = OrnamentPlacer::new(&template);
        let layer = ring(40, 3.0);
        let hull = ConvexHull::compute(&layer.xy).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut out = Vec::new();

        let placements = placer.place(&layer, &hull, &mut rng, &mut out);
        assert_eq!(placements.len(), 5);
        assert_eq!(out.len(), 5 * template.len());

        for (i, a) in placements.iter().enumerate() {
            assert_eq!(a.centre.z, 1.5);
            assert!(layer.xy.contains(&a.centre.truncate()));
            for b in &placements[i + 1..] {
                assert_ne!(a.centre, b.centre);
            }
        }
    }

    #[test]
    fn test_fewer_corners_than_cap() {
        let template = ShapeTemplate::sphere(ORNAMENT_RADIUS);
        let placer = OrnamentPlacer::new(&template);
        let mut layer = ring(3, 1.0);
        layer.xy.extend(vec![DVec2::ZERO; 9]);
        let hull = ConvexHull::compute(&layer.xy).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = Vec::new();

        let placements = placer.place(&layer, &hull, &mut rng, &mut out);
        assert_eq!(placements.len(), 3);
        assert!(placements.len() <= hull.vertices().len());
    }

    #[test]
    fn test_colour_shared_per_instance() {
        let template = ShapeTemplate::sphere(ORNAMENT_RADIUS);
        let placer = OrnamentPlacer::new(&template);
        let layer = ring(12, 2.0);
        let hull = ConvexHull::compute(&layer.xy).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let mut out = Vec::new();

        let placements = placer.place(&layer, &hull, &mut rng, &mut out);
        for (placement, chunk) in placements.iter().zip(out.chunks(template.len())) {
            assert!(chunk.iter().all(|p| p.colour == placement.colour));
            assert!(chunk.iter().all(|p| p.frame == FrameTag::Always));
        }
    }
}
