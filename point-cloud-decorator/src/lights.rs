/// Blinking light placement inside slab hulls
use crate::constants::{HULL_AREA_PER_LIGHT, LIGHT_COLOUR};
use crate::hull::ConvexHull;
use crate::layers::Layer;
use crate::point::{FrameTag, Placement, Point};
use crate::template::ShapeTemplate;
use glam::{DVec2, DVec3};
use rand::Rng;

/// Scatters lights through the interior of each slab.
pub struct LightPlacer<'a> {
    template: &'a ShapeTemplate,
    /// Slab thickness; lights are jittered up to this far above the slab floor.
    vertical_spacing: f64,
    /// Highest tree point; lights above it are dropped.
    max_z: f64,
}

/// Outcome counts for one slab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightStats {
    pub target: usize,
    pub inside_hull: usize,
    pub above_tree: usize,
}

impl<'a> LightPlacer<'a> {
    pub fn new(template: &'a ShapeTemplate, vertical_spacing: f64, max_z: f64) -> Self {
        Self {
            template,
            vertical_spacing,
            max_z,
        }
    }

    /// Number of candidates drawn for a hull.
    pub fn target_count(hull: &ConvexHull) -> usize {
        (hull.area().max(0.0) as usize) / HULL_AREA_PER_LIGHT
    }

    /// Draw candidates over the slab's bounding box, keep the ones inside the
    /// hull and stamp a light at each surviving candidate. Rejected candidates
    /// are not redrawn, so fewer lights than the target is normal.
    pub fn place<R: Rng + ?Sized>(
        &self,
        layer: &Layer,
        hull: &ConvexHull,
        rng: &mut R,
        out: &mut Vec<Point>,
    ) -> (Vec<Placement>, LightStats) {
        let target = Self::target_count(hull);
        let (min, max) = layer.xy_extent();
        let span = max - min;

        let xs: Vec<f64> = (0..target)
            .map(|_| min.x + span.x * rng.random::<f64>())
            .collect();
        let ys: Vec<f64> = (0..target)
            .map(|_| min.y + span.y * rng.random::<f64>())
            .collect();

        let inside: Vec<DVec2> = xs
            .into_iter()
            .zip(ys)
            .filter(|&(x, y)| hull.contains(x, y))
            .map(|(x, y)| DVec2::new(x, y))
            .collect();

        let mut stats = LightStats {
            target,
            inside_hull: inside.len(),
            above_tree: 0,
        };

        let mut placements = Vec::with_capacity(inside.len());
        for xy in inside {
            let z = layer.base_z + rng.random::<f64>() * self.vertical_spacing;
            match self.try_place(xy, z, rng, out) {
                Some(placement) => placements.push(placement),
                None => stats.above_tree += 1,
            }
        }

        (placements, stats)
    }

    /// Stamp one light at (xy, z) unless it floats above the tree.
    pub fn try_place<R: Rng + ?Sized>(
        &self,
        xy: DVec2,
        z: f64,
        rng: &mut R,
        out: &mut Vec<Point>,
    ) -> Option<Placement> {
        if z > self.max_z {
            return None;
        }

        let frame = if rng.random_bool(0.5) {
            FrameTag::First
        } else {
            FrameTag::Second
        };
        let centre = DVec3::new(xy.x, xy.y, z);
        self.template.stamp(centre, LIGHT_COLOUR, frame, out);

        Some(Placement {
            centre,
            colour: LIGHT_COLOUR,
            frame,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::LIGHT_RADIUS;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn disc_layer(radius: f64, base_z: f64) -> Layer {
        let mut xy = Vec::new();
        for ring in 1..=10 {
            let r = radius * ring as f64 / 10.0;
            for k in 0..36 {
                let t = k as f64 / 36.0 * std::f64::consts::TAU;
                xy.push(DVec2::new(t.cos() * r, t.sin() * r));
            }
        }
        Layer { base_z, xy }
    }

    #[test]
    fn test_lights_inside_slab_and_below_top() {
        let template = ShapeTemplate::sphere(LIGHT_RADIUS);
        let layer = disc_layer(8.0, 2.0);
        let hull = ConvexHull::compute(&layer.xy).unwrap();
        let placer = LightPlacer::new(&template, 0.5, 2.3);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut out = Vec::new();

        let (placements, stats) = placer.place(&layer, &hull, &mut rng, &mut out);
        assert_eq!(stats.target, LightPlacer::target_count(&hull));
        assert!(stats.target > 0);
        assert_eq!(placements.len() + stats.above_tree, stats.inside_hull);
        assert!(stats.inside_hull <= stats.target);
        assert_eq!(out.len(), placements.len() * template.len());

        for light in &placements {
            assert!(light.centre.z >= 2.0 && light.centre.z < 2.5);
            assert!(light.centre.z <= 2.3);
            assert!(hull.contains(light.centre.x, light.centre.y));
            assert_eq!(light.colour, LIGHT_COLOUR);
            assert!(matches!(light.frame, FrameTag::First | FrameTag::Second));
        }
    }

    #[test]
    fn test_light_above_tree_discarded() {
        let template = ShapeTemplate::sphere(LIGHT_RADIUS);
        let max_z = 4.0;
        let placer = LightPlacer::new(&template, 0.5, max_z);
        let mut rng = StdRng::seed_from_u64(3);
        let mut out = Vec::new();

        let placed = placer.try_place(DVec2::new(0.0, 0.0), max_z + 10.0, &mut rng, &mut out);
        assert!(placed.is_none());
        assert!(out.is_empty());
    }

    #[test]
    fn test_both_frames_used() {
        let template = ShapeTemplate::sphere(LIGHT_RADIUS);
        let placer = LightPlacer::new(&template, 0.5, 100.0);
        let mut rng = StdRng::seed_from_u64(11);
        let mut out = Vec::new();

        let frames: Vec<FrameTag> = (0..64)
            .filter_map(|_| placer.try_place(DVec2::ZERO, 1.0, &mut rng, &mut out))
            .map(|p| p.frame)
            .collect();
        assert_eq!(frames.len(), 64);
        assert!(frames.contains(&FrameTag::First));
        assert!(frames.contains(&FrameTag::Second));
    }

    #[test]
    fn test_small_hull_gets_no_lights() {
        let template = ShapeTemplate::sphere(LIGHT_RADIUS);
        let layer = disc_layer(1.0, 0.0);
        let hull = ConvexHull::compute(&layer.xy).unwrap();
        let placer = LightPlacer::new(&template, 0.5, 10.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut out = Vec::new();

        let (placements, stats) = placer.place(&layer, &hull, &mut rng, &mut out);
        assert_eq!(stats.target, 0);
        assert!(placements.is_empty());
        assert!(out.is_empty());
    }
}
