//! Octagonal arena geometry
//!
//! The playfield is an octagonal ring: an outer wall, a drivable band inside
//! it, and an octagonal obstacle in the middle. The octagons are only drawn;
//! wall collision treats each boundary as a circle of the same radius.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{polar_to_cartesian, reflect};

/// Which boundary an entity ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSurface {
    /// The outer wall; normal points toward the center
    Outer,
    /// The central obstacle; normal points away from the center
    Obstacle,
}

/// Result of a wall collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub surface: WallSurface,
    /// Unit surface normal, pointing back into the drivable band
    pub normal: Vec2,
}

/// The arena, sized to the viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub border_thickness: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            border_thickness: ARENA_BORDER_THICKNESS,
        }
    }

    #[inline]
    fn min_extent(&self) -> f32 {
        self.width.min(self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Radius of the outer wall
    #[inline]
    pub fn outer_radius(&self) -> f32 {
        self.min_extent() / 2.0 - ARENA_WALL_INSET
    }

    /// Radius of the inner edge of the border band
    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.outer_radius() - self.border_thickness
    }

    #[inline]
    pub fn obstacle_radius(&self) -> f32 {
        self.min_extent() / 8.0
    }

    /// Eight points around `center`, rotated 22.5° so flat edges face the
    /// cardinal directions
    pub fn octagon(center: Vec2, radius: f32) -> [Vec2; 8] {
        std::array::from_fn(|i| {
            let angle = i as f32 * std::f32::consts::FRAC_PI_4 - std::f32::consts::FRAC_PI_8;
            center + polar_to_cartesian(radius, angle)
        })
    }

    pub fn outer_boundary(&self) -> [Vec2; 8] {
        Self::octagon(self.center(), self.outer_radius())
    }

    pub fn inner_boundary(&self) -> [Vec2; 8] {
        Self::octagon(self.center(), self.inner_radius())
    }

    pub fn central_obstacle(&self) -> [Vec2; 8] {
        Self::octagon(self.center(), self.obstacle_radius())
    }

    /// Check a circle against the outer wall and the central obstacle
    pub fn check_wall_collision(&self, pos: Vec2, radius: f32) -> Option<WallHit> {
        let to_center = self.center() - pos;
        let dist = to_center.length();

        if dist > self.outer_radius() - radius {
            return Some(WallHit {
                surface: WallSurface::Outer,
                normal: to_center.normalize_or_zero(),
            });
        }

        if dist < self.obstacle_radius() + radius {
            return Some(WallHit {
                surface: WallSurface::Obstacle,
                normal: (-to_center).normalize_or_zero(),
            });
        }

        None
    }

    #[inline]
    pub fn reflect_velocity(&self, velocity: Vec2, normal: Vec2) -> Vec2 {
        reflect(velocity, normal)
    }

    /// Radial band enemies spawn in
    pub fn spawn_radius_range(&self) -> (f32, f32) {
        let min = self.min_extent() / 8.0 + 50.0;
        let max = self.min_extent() / 2.0 - self.border_thickness - 70.0;
        (min, max.max(min))
    }

    /// Sample a spawn point in the drivable band.
    ///
    /// With an `avoid` point, up to [`SPAWN_ATTEMPTS`] samples are drawn until
    /// one lands at least `min_distance` away. If none does, the point opposite
    /// `avoid` (across the center) at mid-band radius is used.
    pub fn random_spawn_position<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        avoid: Option<Vec2>,
        min_distance: f32,
    ) -> Vec2 {
        let (min_r, max_r) = self.spawn_radius_range();
        let center = self.center();

        let sample = |rng: &mut R| {
            let r = min_r + rng.random::<f32>() * (max_r - min_r);
            let theta = rng.random::<f32>() * std::f32::consts::TAU;
            center + polar_to_cartesian(r, theta)
        };

        let Some(avoid) = avoid else {
            return sample(rng);
        };

        for _ in 0..SPAWN_ATTEMPTS {
            let pos = sample(&mut *rng);
            if pos.distance(avoid) >= min_distance {
                return pos;
            }
        }

        let away = avoid - center;
        let avoid_angle = away.y.atan2(away.x);
        let mid_r = (min_r + max_r) / 2.0;
        let fallback = center + polar_to_cartesian(mid_r, avoid_angle + std::f32::consts::PI);
        log::debug!("Spawn sampling exhausted, using fallback at {:?}", fallback);
        fallback
    }

    /// Fixed player spawn: mid-band between obstacle and outer wall, due east
    pub fn player_start_position(&self) -> Vec2 {
        let radius = (self.obstacle_radius() + self.outer_radius()) / 2.0;
        self.center() + Vec2::new(radius, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_derived_radii() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.center(), Vec2::new(400.0, 300.0));
        assert_eq!(arena.outer_radius(), 280.0);
        assert_eq!(arena.inner_radius(), 240.0);
        assert_eq!(arena.obstacle_radius(), 75.0);
    }

    #[test]
    fn test_octagon_vertices() {
        let points = Arena::octagon(Vec2::ZERO, 100.0);
        assert_eq!(points.len(), 8);
        let first_angle = points[0].y.atan2(points[0].x);
        assert!((first_angle + std::f32::consts::FRAC_PI_8).abs() < 1e-5);
        for p in points {
            assert!((p.length() - 100.0).abs() < 1e-3);
        }
        // Flat edge faces east: the two east-most points share an x coordinate
        assert!((points[0].x - points[1].x).abs() < 1e-3);
    }

    #[test]
    fn test_outer_wall_boundary_is_exclusive() {
        let arena = Arena::new(800.0, 600.0);
        let radius = 12.0;
        let limit = arena.outer_radius() - radius;
        let center = arena.center();

        let hit = arena.check_wall_collision(center + Vec2::new(limit + 0.01, 0.0), radius);
        let hit = hit.expect("just past the wall should collide");
        assert_eq!(hit.surface, WallSurface::Outer);
        assert!((hit.normal - Vec2::new(-1.0, 0.0)).length() < 1e-5);

        assert!(arena.check_wall_collision(center + Vec2::new(limit - 0.01, 0.0), radius).is_none());
    }

    #[test]
    fn test_obstacle_collision_normal_points_outward() {
        let arena = Arena::new(800.0, 600.0);
        let pos = arena.center() + Vec2::new(0.0, 80.0);
        let hit = arena.check_wall_collision(pos, 12.0).unwrap();
        assert_eq!(hit.surface, WallSurface::Obstacle);
        assert!((hit.normal - Vec2::new(0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_open_band_has_no_collision() {
        let arena = Arena::new(800.0, 600.0);
        let pos = arena.player_start_position();
        assert!(arena.check_wall_collision(pos, SHIP_SIZE).is_none());
    }

    #[test]
    fn test_reflect_velocity_twice_is_identity() {
        let arena = Arena::default();
        let n = Vec2::new(0.6, 0.8);
        let v = Vec2::new(30.0, -70.0);
        let back = arena.reflect_velocity(arena.reflect_velocity(v, n), n);
        assert!((back - v).length() < 1e-3);
    }

    #[test]
    fn test_spawn_within_band() {
        let arena = Arena::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(11);
        let (min_r, max_r) = arena.spawn_radius_range();
        assert_eq!((min_r, max_r), (125.0, 190.0));
        for _ in 0..200 {
            let pos = arena.random_spawn_position(&mut rng, None, 0.0);
            let r = pos.distance(arena.center());
            assert!(r >= min_r - 1e-3 && r <= max_r + 1e-3);
        }
    }

    #[test]
    fn test_spawn_avoids_point() {
        let arena = Arena::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(12);
        let avoid = arena.player_start_position();
        for _ in 0..200 {
            let pos = arena.random_spawn_position(&mut rng, Some(avoid), 150.0);
            assert!(pos.distance(avoid) >= 150.0 - 1e-3);
        }
    }

    #[test]
    fn test_spawn_fallback_opposite_avoid_point() {
        let arena = Arena::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(13);
        // Nothing in the band can be 10_000 units away, so sampling must fall back
        let avoid = arena.center() + Vec2::new(100.0, 0.0);
        let pos = arena.random_spawn_position(&mut rng, Some(avoid), 10_000.0);
        let expected = arena.center() + Vec2::new(-157.5, 0.0);
        assert!((pos - expected).length() < 1e-3);
    }

    #[test]
    fn test_player_start_position() {
        let arena = Arena::new(800.0, 600.0);
        let start = arena.player_start_position();
        assert_eq!(start, Vec2::new(400.0 + 177.5, 300.0));
    }
}
