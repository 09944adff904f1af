//! Maze Chase - deterministic simulation core for a maze-chase arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid movement, ghost AI, mode scheduling)
//! - `highscores`: Best-score persistence (plain-text integer)
//! - `settings`: Data-driven game balance and validated configuration

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Playfield dimensions in pixels
    pub const WIDTH: f32 = 580.0;
    pub const HEIGHT: f32 = 690.0;

    /// Side of one grid cell; every actor and tile is one cell square
    pub const GRID: f32 = 20.0;
    /// Pixel offset of layout cell (0, 0)
    pub const LAYOUT_ORIGIN_X: f32 = 20.0;
    pub const LAYOUT_ORIGIN_Y: f32 = 40.0;

    /// Tunnel wrap thresholds
    pub const WRAP_LEFT: f32 = 2.0;
    pub const WRAP_RIGHT: f32 = WIDTH - 22.0;

    /// Top speeds (pixels per tick), reached at `Settings::full_speed_level`
    pub const PLAYER_MAX_SPEED: f32 = 3.66;
    pub const GHOST_MAX_SPEED: f32 = 3.33;
    /// Frightened ghosts move at this fraction of their base speed
    pub const FRIGHT_SPEED_FACTOR: f32 = 0.66;

    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
    pub const EXTRA_LIFE_INTERVAL: u64 = 10_000;

    /// Timers, in ticks
    pub const CHASE_TICKS: u32 = TICK_RATE * 20;
    pub const SCATTER_TICKS: u32 = TICK_RATE * 10;
    pub const FRIGHT_TICKS: u32 = TICK_RATE * 10;
    pub const CHASE_GROWTH_PER_LEVEL: u32 = TICK_RATE * 2;
    pub const SCATTER_SHRINK_PER_LEVEL: u32 = TICK_RATE / 2;
    pub const FRIGHT_SHRINK_PER_LEVEL: u32 = TICK_RATE / 2;
    pub const SCATTER_FLOOR_TICKS: u32 = TICK_RATE * 5;
    pub const FRIGHT_FLOOR_TICKS: u32 = TICK_RATE * 5;
    pub const MAX_SCATTERS_PER_LEVEL: u32 = 3;
    pub const LEVEL_CLEAR_TICKS: u32 = 150;
    pub const FRUIT_DISPLAY_TICKS: u32 = TICK_RATE * 7;
    pub const CAUGHT_ANIMATION_TICKS: i32 = TICK_RATE as i32 * 3 / 2;
    pub const RANDOM_TARGET_INTERVAL: u32 = 250;
    /// Frightened ghosts start flashing below this many remaining ticks
    pub const FRIGHT_FLASH_TICKS: u32 = 120;
    pub const FRIGHT_FLASH_PERIOD: u32 = 15;

    /// Scores
    pub const DOT_SCORE: u64 = 20;
    pub const ENERGISER_SCORE: u64 = 50;
    pub const CAPTURE_SCORES: [u64; 4] = [200, 400, 800, 1600];
    pub const FRUIT_SCORES: [u64; 7] = [100, 300, 500, 700, 1000, 2000, 3000];
    /// `dots_eaten` values that spawn a bonus fruit
    pub const FRUIT_THRESHOLDS: [u32; 2] = [70, 170];

    /// Chase offset for the ahead/behind chasers
    pub const CHASE_LEAD: f32 = 80.0;
}
