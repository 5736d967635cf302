//! Synthetic LIDAR-style scene generation.

use std::f32::consts::PI;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Sample;

/// Number of spiral turns in the generated scene.
const SPIRAL_TURNS: f32 = 10.0;
/// Maximum horizontal radius of the scene.
const MAX_RADIUS: f32 = 5.0;

/// Generates `count` samples laid out on noisy sine-modulated spirals.
///
/// Positions stay within `[-5, 5]` horizontally and roughly `[-2, 2.5]`
/// vertically. Colors encode position; intensity is uniform random.
pub fn generate_lidar_scene<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(count);

    for i in 0..count {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f32 / count as f32;
        let angle = t * 2.0 * PI * SPIRAL_TURNS;
        let radius = rng.gen::<f32>() * MAX_RADIUS;
        let height = angle.sin() * 2.0 + rng.gen::<f32>() * 0.5;

        let position = Vec3::new(angle.cos() * radius, height, angle.sin() * radius);
        let color = Vec3::new(
            (position.x + 5.0) / 10.0,
            (position.y + 3.0) / 6.0,
            (position.z + 5.0) / 10.0,
        );

        samples.push(Sample::new(position, color, rng.gen::<f32>()));
    }

    samples
}

/// Deterministic variant of [`generate_lidar_scene`].
#[must_use]
pub fn generate_lidar_scene_seeded(count: usize, seed: u64) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_lidar_scene(count, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_requested_count() {
        assert_eq!(generate_lidar_scene_seeded(1234, 7).len(), 1234);
        assert!(generate_lidar_scene_seeded(0, 7).is_empty());
    }

    #[test]
    fn test_same_seed_same_scene() {
        assert_eq!(
            generate_lidar_scene_seeded(500, 42),
            generate_lidar_scene_seeded(500, 42)
        );
    }

    #[test]
    fn test_samples_stay_in_scene_volume() {
        for s in generate_lidar_scene_seeded(10_000, 3) {
            let p = s.position;
            assert!(p.x.abs() <= MAX_RADIUS + 1e-4);
            assert!(p.z.abs() <= MAX_RADIUS + 1e-4);
            assert!((-2.0 - 1e-4..=2.5 + 1e-4).contains(&p.y));
            assert!((0.0..1.0).contains(&s.intensity));
        }
    }

    #[test]
    fn test_color_encodes_position() {
        let s = generate_lidar_scene_seeded(1, 9)[0];
        let expected = Vec3::new(
            (s.position.x + 5.0) / 10.0,
            (s.position.y + 3.0) / 6.0,
            (s.position.z + 5.0) / 10.0,
        );
        assert_eq!(s.color, expected);
    }
}
