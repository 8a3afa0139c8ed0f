//! First-person maze renderer: a fixed tile map drawn top-down next to a
//! column raycast view, with tile-stepped player movement.

pub mod camera;
pub mod config;
pub mod input;
pub mod player;
pub mod raycaster;
pub mod renderer;
pub mod scaler;
pub mod world;
