//! Jittered grid placement for the ball meshes.

use glam::Vec3;
use rand::Rng;

/// Grid coordinates run over `[-GRID_HALF_EXTENT, GRID_HALF_EXTENT)` on both axes.
pub const GRID_HALF_EXTENT: i32 = 4;
/// Distance between neighbouring grid points.
pub const CELL_SPACING: f32 = 10.0;
/// Lowest height a ball is placed at.
pub const MIN_HEIGHT: f32 = 2.0;
/// Height range above `MIN_HEIGHT`.
pub const HEIGHT_RANGE: f32 = 10.0;

/// Number of balls the grid produces.
pub const BALL_COUNT: usize = (2 * GRID_HALF_EXTENT * 2 * GRID_HALF_EXTENT) as usize;

/// Position for the ball in grid cell `(x, y)`.
///
/// x/z land within one unit of the grid point, height in `[2, 12)`.
pub fn place(x: i32, y: i32, rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.r#gen::<f32>() + x as f32 * CELL_SPACING,
        rng.r#gen::<f32>() * HEIGHT_RANGE + MIN_HEIGHT,
        rng.r#gen::<f32>() + y as f32 * CELL_SPACING,
    )
}

/// All ball positions, x-major.
pub fn positions(rng: &mut impl Rng) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(BALL_COUNT);
    for x in -GRID_HALF_EXTENT..GRID_HALF_EXTENT {
        for y in -GRID_HALF_EXTENT..GRID_HALF_EXTENT {
            out.push(place(x, y, rng));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn produces_sixty_four_positions() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(positions(&mut rng).len(), 64);
        assert_eq!(BALL_COUNT, 64);
    }

    #[test]
    fn positions_stay_near_their_grid_points() {
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let all = positions(&mut rng);
            let mut i = 0;
            for x in -GRID_HALF_EXTENT..GRID_HALF_EXTENT {
                for y in -GRID_HALF_EXTENT..GRID_HALF_EXTENT {
                    let p = all[i];
                    let gx = x as f32 * CELL_SPACING;
                    let gz = y as f32 * CELL_SPACING;
                    assert!(p.x >= gx && p.x < gx + 1.0, "x {} vs {}", p.x, gx);
                    assert!(p.z >= gz && p.z < gz + 1.0, "z {} vs {}", p.z, gz);
                    assert!(p.y >= 2.0 && p.y < 12.0, "y {}", p.y);
                    i += 1;
                }
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = positions(&mut StdRng::seed_from_u64(42));
        let b = positions(&mut StdRng::seed_from_u64(42));
        let c = positions(&mut StdRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn constant_rng_pins_positions() {
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        assert_eq!(place(-4, 3, &mut rng), Vec3::new(-40.0, 2.0, 30.0));
    }
}
