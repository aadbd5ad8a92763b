//! Spaceship Shooter - a single-screen arcade shooter for the terminal
//!
//! Core modules:
//! - `entities`: pure data (rectangles, player, game state)
//! - `compute`: the per-frame simulation step and state transitions
//! - `input`: held-key tracking on top of terminal key events
//! - `assets`: sprites and sounds with deterministic fallbacks
//! - `display`: terminal rendering

pub mod assets;
pub mod compute;
pub mod display;
pub mod entities;
pub mod input;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Logical screen size in pixels
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Fixed frame period (60 Hz)
    pub const FRAME: Duration = Duration::from_micros(1_000_000 / 60);

    pub const PLAYER_WIDTH: i32 = 50;
    pub const PLAYER_HEIGHT: i32 = 50;
    /// Gap between the player and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: i32 = 10;
    pub const PLAYER_SPEED: i32 = 5;

    pub const BULLET_WIDTH: i32 = 5;
    pub const BULLET_HEIGHT: i32 = 10;
    pub const BULLET_SPEED: i32 = 7;
    /// Live player bullets allowed on screen
    pub const MAX_PLAYER_BULLETS: usize = 5;

    pub const ENEMY_BULLET_WIDTH: i32 = 5;
    pub const ENEMY_BULLET_HEIGHT: i32 = 10;
    pub const ENEMY_BULLET_SPEED: i32 = 5;

    pub const ENEMY_WIDTH: i32 = 50;
    pub const ENEMY_HEIGHT: i32 = 50;
    pub const ENEMY_SPEED: i32 = 3;
    /// Frames between enemy spawns (≈1 second)
    pub const ENEMY_SPAWN_RATE: u32 = 60;
    /// Per-enemy, per-frame probability of firing
    pub const ENEMY_SHOOT_CHANCE: f64 = 0.10;

    /// Score awarded per enemy destroyed
    pub const SCORE_PER_ENEMY: u32 = 10;
}
