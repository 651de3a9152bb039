//! Index-based target assignment.

use glam::Vec2;

use crate::particle::Particle;

/// Hand point `i` to particle `i`; particles past the end of `points` lose
/// their target and go idle.
///
/// There is no matching or cross-frame stability: the same index may map to a
/// different part of the glyph next frame. Returns the number of targeted
/// particles.
pub fn assign_targets(particles: &mut [Particle], points: &[Vec2]) -> usize {
    for (i, particle) in particles.iter_mut().enumerate() {
        particle.set_target(points.get(i).copied());
    }
    particles.len().min(points.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use motes_core::Rgba;

    fn pool(n: usize) -> Vec<Particle> {
        (0..n)
            .map(|i| Particle::new(Vec2::new(i as f32, 0.0), Rgba::rgb(0, 0, 0)))
            .collect()
    }

    #[test]
    fn test_prefix_targeted_rest_idle() {
        let mut particles = pool(800);
        let points: Vec<Vec2> = (0..300).map(|i| Vec2::new(i as f32, 1.0)).collect();

        assert_eq!(assign_targets(&mut particles, &points), 300);
        for (i, p) in particles.iter().enumerate() {
            if i < 300 {
                assert_eq!(p.target(), Some(points[i]));
            } else {
                assert!(!p.is_targeted());
            }
        }
    }

    #[test]
    fn test_more_points_than_particles() {
        let mut particles = pool(10);
        let points = vec![Vec2::ONE; 25];
        assert_eq!(assign_targets(&mut particles, &points), 10);
        assert!(particles.iter().all(Particle::is_targeted));
    }

    #[test]
    fn test_empty_points_idles_everything() {
        let mut particles = pool(5);
        assign_targets(&mut particles, &[Vec2::ONE; 5]);
        assert_eq!(assign_targets(&mut particles, &[]), 0);
        assert!(particles.iter().all(|p| !p.is_targeted()));
    }

    #[test]
    fn test_origin_is_a_valid_target() {
        let mut particles = pool(1);
        assign_targets(&mut particles, &[Vec2::ZERO]);
        assert_eq!(particles[0].target(), Some(Vec2::ZERO));
    }
}
