/// View parameters for the column rays. The look direction never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov: f64, // radians, spread across every screen column
}

impl Camera {
    /// atan2(1, 0): +Y in screen space, i.e. straight down the top-down map.
    pub const FACING: f64 = std::f64::consts::FRAC_PI_2;

    pub fn new(fov: f64) -> Self {
        Self { fov }
    }

    /// Angle of the ray for `column` out of `screen_width` columns.
    #[inline]
    pub fn ray_angle(&self, column: usize, screen_width: usize) -> f64 {
        Self::FACING - 0.5 * self.fov + column as f64 * (self.fov / screen_width as f64)
    }

    #[inline]
    pub fn ray_dir(&self, column: usize, screen_width: usize) -> [f64; 2] {
        let angle = self.ray_angle(column, screen_width);
        [angle.cos(), angle.sin()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_4, FRAC_PI_8};

    #[test]
    fn facing_is_atan2_of_down() {
        assert_eq!(Camera::FACING, 1.0f64.atan2(0.0));
    }

    #[test]
    fn rays_span_the_field_of_view() {
        let cam = Camera::new(FRAC_PI_4);
        let first = cam.ray_angle(0, 640);
        let middle = cam.ray_angle(320, 640);
        let last = cam.ray_angle(639, 640);

        assert!((first - (Camera::FACING - FRAC_PI_8)).abs() < 1e-12);
        assert!((middle - Camera::FACING).abs() < 1e-12);
        assert!(last < Camera::FACING + FRAC_PI_8);
        assert!((last - cam.ray_angle(638, 640) - FRAC_PI_4 / 640.0).abs() < 1e-12);
    }

    #[test]
    fn center_ray_points_down() {
        let [dx, dy] = Camera::new(FRAC_PI_4).ray_dir(320, 640);
        assert!(dx.abs() < 1e-12);
        assert!((dy - 1.0).abs() < 1e-12);
    }
}
