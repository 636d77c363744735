/// Snow ground synthesis with smoothed noise heights
use crate::bounds::PointCloudBounds;
use crate::constants::{SNOW_BLUR_SIGMA, SNOW_BLUR_TRUNCATE, SNOW_COLOUR, SNOW_GRID_RESOLUTION};
use crate::error::{DecorError, Result};
use crate::point::Point;
use glam::DVec3;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

pub struct SnowFieldGenerator {
    noise_std: f64,
    resolution: f64,
    blur_sigma: f64,
}

impl SnowFieldGenerator {
    /// Create new snow generator with the given height noise
    pub fn new(noise_std: f64) -> Self {
        Self {
            noise_std,
            resolution: SNOW_GRID_RESOLUTION,
            blur_sigma: SNOW_BLUR_SIGMA,
        }
    }

    /// Generate a white ground grid under the tree.
    /// Heights start at the tree's lowest point, get Gaussian noise, then a
    /// reflect-padded Gaussian blur.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        bounds: &PointCloudBounds,
        rng: &mut R,
    ) -> Result<Vec<Point>> {
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(DecorError::Config(format!(
                "snow noise must be non-negative, got {}",
                self.noise_std
            )));
        }
        let noise = Normal::new(0.0, self.noise_std)
            .map_err(|e| DecorError::Config(format!("snow noise {}: {e}", self.noise_std)))?;

        let xs = self.grid_axis(bounds.min_x, bounds.max_x);
        let ys = self.grid_axis(bounds.min_y, bounds.max_y);
        let (width, height) = (xs.len(), ys.len());
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        // Rows run along y, columns along x.
        let mut heights: Vec<f64> = (0..width * height)
            .map(|_| bounds.min_z + noise.sample(rng))
            .collect();

        let kernel = self.gaussian_kernel();
        blur_rows(&mut heights, width, &kernel);
        blur_columns(&mut heights, width, height, &kernel);

        let mut points = Vec::with_capacity(width * height);
        for (row, &y) in ys.iter().enumerate() {
            for (col, &x) in xs.iter().enumerate() {
                let z = heights[row * width + col];
                points.push(Point::new(DVec3::new(x, y, z), SNOW_COLOUR));
            }
        }

        log::debug!(
            "Snow field {}x{} cells ({} points)",
            width,
            height,
            points.len()
        );
        Ok(points)
    }

    /// Half-open sample positions `start, start + step, ...` below `stop`.
    fn grid_axis(&self, start: f64, stop: f64) -> Vec<f64> {
        let span = stop - start;
        if !span.is_finite() || span <= 0.0 {
            return Vec::new();
        }
        let count = (span / self.resolution).ceil() as usize;
        (0..count)
            .map(|i| start + i as f64 * self.resolution)
            .collect()
    }

    /// Normalised Gaussian weights from `-radius` to `radius`.
    fn gaussian_kernel(&self) -> Vec<f64> {
        let radius = (SNOW_BLUR_TRUNCATE * self.blur_sigma + 0.5) as i64;
        let weights: Vec<f64> = (-radius..=radius)
            .map(|offset| self.calculate_influence(offset as f64))
            .collect();
        let total: f64 = weights.iter().sum();
        weights.into_iter().map(|w| w / total).collect()
    }

    /// Calculate gaussian influence based on distance
    fn calculate_influence(&self, distance: f64) -> f64 {
        (-0.5 * distance * distance / (self.blur_sigma * self.blur_sigma)).exp()
    }
}

/// Mirror an out-of-range index back into `0..len`, repeating the edge sample
/// (d c b a | a b c d | d c b a).
fn reflect_index(index: i64, len: usize) -> usize {
    let period = 2 * len as i64;
    let folded = index.rem_euclid(period);
    if folded < len as i64 {
        folded as usize
    } else {
        (period - 1 - folded) as usize
    }
}

/// Convolve one line of samples with a centred kernel.
fn blur_line(line: &[f64], kernel: &[f64]) -> Vec<f64> {
    let radius = (kernel.len() / 2) as i64;
    (0..line.len() as i64)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * line[reflect_index(i + k as i64 - radius, line.len())])
                .sum()
        })
        .collect()
}

fn blur_rows(grid: &mut [f64], width: usize, kernel: &[f64]) {
    grid.par_chunks_mut(width).for_each(|row| {
        let blurred = blur_line(row, kernel);
        row.copy_from_slice(&blurred);
    });
}

fn blur_columns(grid: &mut [f64], width: usize, height: usize, kernel: &[f64]) {
    let columns: Vec<Vec<f64>> = (0..width)
        .into_par_iter()
        .map(|col| {
            let column: Vec<f64> = (0..height).map(|row| grid[row * width + col]).collect();
            blur_line(&column, kernel)
        })
        .collect();

    for (col, column) in columns.into_iter().enumerate() {
        for (row, value) in column.into_iter().enumerate() {
            grid[row * width + col] = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bounds(max_x: f64, max_y: f64) -> PointCloudBounds {
        PointCloudBounds {
            min_x: 0.0,
            max_x,
            min_y: -1.0,
            max_y,
            min_z: 2.0,
            max_z: 9.0,
        }
    }

    #[test]
    fn test_reflect_index() {
        let mapped: Vec<usize> = (-4..8).map(|i| reflect_index(i, 4)).collect();
        assert_eq!(mapped, vec![3, 2, 1, 0, 0, 1, 2, 3, 3, 2, 1, 0]);
        assert_eq!(reflect_index(-9, 2), 0);
        assert_eq!(reflect_index(-6, 2), 1);
    }

    #[test]
    fn test_blur_preserves_constant() {
        let generator = SnowFieldGenerator::new(0.5);
        let kernel = generator.gaussian_kernel();
        assert_eq!(kernel.len(), 81);
        assert!((kernel.iter().sum::<f64>() - 1.0).abs() < 1e-12);

        let line = vec![3.25; 7];
        for value in blur_line(&line, &kernel) {
            assert!((value - 3.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_grid_covers_bounds() {
        let generator = SnowFieldGenerator::new(0.5);
        let mut rng = StdRng::seed_from_u64(8);
        let field = generator.generate(&bounds(2.0, 1.0), &mut rng).unwrap();

        assert_eq!(field.len(), 20 * 20);
        for point in &field {
            assert!(point.position.x >= 0.0 && point.position.x < 2.0);
            assert!(point.position.y >= -1.0 && point.position.y < 1.0);
            assert_eq!(point.colour, SNOW_COLOUR);
        }
    }

    #[test]
    fn test_noise_is_smoothed() {
        let generator = SnowFieldGenerator::new(0.5);
        let mut rng = StdRng::seed_from_u64(21);
        let field = generator.generate(&bounds(3.0, 2.0), &mut rng).unwrap();

        let zs: Vec<f64> = field.iter().map(|p| p.position.z).collect();
        let mean = zs.iter().sum::<f64>() / zs.len() as f64;
        let var = zs.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / zs.len() as f64;
        assert!((mean - 2.0).abs() < 0.1);
        assert!(var.sqrt() < 0.1);
    }

    #[test]
    fn test_zero_noise_is_flat() {
        let generator = SnowFieldGenerator::new(0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let field = generator.generate(&bounds(1.0, 0.0), &mut rng).unwrap();
        assert!(field.iter().all(|p| (p.position.z - 2.0).abs() < 1e-12));
    }

    #[test]
    fn test_degenerate_bounds_empty() {
        let generator = SnowFieldGenerator::new(0.5);
        let mut rng = StdRng::seed_from_u64(0);
        let flat = PointCloudBounds {
            max_x: 0.0,
            ..bounds(0.0, 1.0)
        };
        assert!(generator.generate(&flat, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_negative_noise_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        for noise in [-1.0, -1e-9, f64::NAN, f64::INFINITY] {
            let generator = SnowFieldGenerator::new(noise);
            assert!(matches!(
                generator.generate(&bounds(1.0, 1.0), &mut rng),
                Err(DecorError::Config(_))
            ));
        }
    }
}
