use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{camera::Camera, player::Player, world::World};

/// Distances below this are treated as this, so a ray starting inside a
/// wall still projects to a finite slice.
pub const MIN_DISTANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: [f64; 2],
    pub distance: f64,
    /// False when the march ran out of steps without meeting a wall.
    pub hit: bool,
}

/// Marches from `origin` along `dir` in steps of `tile_size * dir / screen_width`
/// until the cell under the ray is a wall.
///
/// The march is capped at the steps needed to cross the whole map diagonal,
/// so it terminates even for a degenerate direction.
pub fn cast_ray(
    world: &World,
    origin: [f64; 2],
    dir: [f64; 2],
    tile_size: f64,
    screen_width: usize,
) -> RayHit {
    let step = [
        tile_size * dir[0] / screen_width as f64,
        tile_size * dir[1] / screen_width as f64,
    ];
    let step_len = (step[0] * step[0] + step[1] * step[1]).sqrt();
    let max_steps = if step_len > 0.0 {
        (world.diagonal(tile_size) / step_len).ceil() as usize + 1
    } else {
        0
    };

    let mut pos = origin;
    let mut hit = false;
    for _ in 0..max_steps {
        pos[0] += step[0];
        pos[1] += step[1];
        if world.is_wall_at_point(pos[0], pos[1], tile_size) {
            hit = true;
            break;
        }
    }

    let dx = pos[0] - origin[0];
    let dy = pos[1] - origin[1];
    RayHit {
        point: pos,
        distance: (dx * dx + dy * dy).sqrt(),
        hit,
    }
}

/// Projected wall height in pixels, truncated toward zero and capped at the
/// screen height. A ray that never hit anything projects to nothing.
pub fn slice_height(ray: &RayHit, screen_height: usize) -> i32 {
    if !ray.hit {
        return 0;
    }
    let h = (screen_height as f64 / ray.distance.max(MIN_DISTANCE)) as i32;
    h.min(screen_height as i32)
}

/// Slice height for every screen column. Columns are independent so they
/// are cast in parallel; the result does not depend on scheduling.
pub fn column_heights(
    world: &World,
    camera: &Camera,
    player: &Player,
    tile_size: i32,
    screen_width: usize,
    screen_height: usize,
) -> Vec<i32> {
    let origin = [player.x as f64, player.y as f64];
    (0..screen_width)
        .into_par_iter()
        .map(|column| {
            let dir = camera.ray_dir(column, screen_width);
            let ray = cast_ray(world, origin, dir, tile_size as f64, screen_width);
            slice_height(&ray, screen_height)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn axis_aligned_ray_hits_wall_three_tiles_away() {
        // Column 4 of the default maze is floor from row 3 down to the wall at row 6.
        let world = World::default();
        let ray = cast_ray(&world, [80.0, 60.0], [0.0, 1.0], 20.0, 640);
        assert!(ray.hit);
        assert_eq!(ray.point, [80.0, 120.0]);
        assert_eq!(ray.distance, 60.0);
        assert_eq!(slice_height(&ray, 480), 8);
    }

    #[test]
    fn leftward_ray_hits_border() {
        let world = World::default();
        let ray = cast_ray(&world, [60.0, 60.0], [-1.0, 0.0], 20.0, 640);
        assert!(ray.hit);
        // Hit registers as soon as x drops below 20, inside column 0.
        assert!(ray.point[0] < 20.0 && ray.point[0] >= 19.0);
        assert_eq!(slice_height(&ray, 480), (480.0 / ray.distance) as i32);
    }

    #[test]
    fn zero_direction_terminates_without_hit() {
        let world = World::default();
        let ray = cast_ray(&world, [60.0, 60.0], [0.0, 0.0], 20.0, 640);
        assert!(!ray.hit);
        assert_eq!(slice_height(&ray, 480), 0);
    }

    #[test]
    fn ray_leaving_an_open_map_is_stopped_by_the_edge() {
        let rows: [&[u8]; 2] = [&[0, 0, 0], &[0, 0, 0]];
        let world = World::from_rows(&rows).unwrap();
        let ray = cast_ray(&world, [10.0, 10.0], [0.0, 1.0], 20.0, 640);
        assert!(ray.hit);
        assert_eq!(ray.point[1], 40.0);
    }

    #[test]
    fn ray_starting_in_a_wall_is_clamped() {
        let world = World::default();
        let ray = RayHit {
            point: [0.0, 0.0],
            distance: 0.0,
            hit: true,
        };
        assert_eq!(slice_height(&ray, 480), 480);
        let inside = cast_ray(&world, [5.0, 5.0], [0.0, 1.0], 20.0, 640);
        assert!(inside.hit);
        assert_eq!(slice_height(&inside, 480), 480);
    }

    #[test]
    fn every_column_terminates_in_a_bordered_room() {
        let world = World::bordered(10, 10).unwrap();
        let camera = Camera::new(FRAC_PI_4);
        let player = Player::new([100, 100]);
        let heights = column_heights(&world, &camera, &player, 20, 640, 480);
        assert_eq!(heights.len(), 640);
        assert!(heights.iter().all(|&h| h > 0 && h <= 480));
    }

    #[test]
    fn parallel_pass_matches_sequential_cast() {
        let world = World::default();
        let camera = Camera::new(FRAC_PI_4);
        let player = Player::new([60, 60]);
        let heights = column_heights(&world, &camera, &player, 20, 640, 480);
        for (column, h) in heights.iter().enumerate() {
            let ray = cast_ray(&world, [60.0, 60.0], camera.ray_dir(column, 640), 20.0, 640);
            assert_eq!(*h, slice_height(&ray, 480));
        }
    }
}
