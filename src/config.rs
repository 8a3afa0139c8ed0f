use std::time::Duration;

/// Fixed program constants. There is no other configuration source.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub title: &'static str,
    pub screen_width: usize,
    pub screen_height: usize,
    /// Pixel edge of one map cell, also the per-frame movement quantum.
    pub tile_size: i32,
    pub fps: u32,
    /// Horizontal field of view in radians.
    pub fov: f64,
    /// Tile-aligned pixel position the player starts at.
    pub start: [i32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Maze",
            screen_width: 640,
            screen_height: 480,
            tile_size: 20,
            fps: 60,
            fov: std::f64::consts::FRAC_PI_4,
            start: [60, 60],
        }
    }
}

impl Config {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}
