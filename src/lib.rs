//! Number Recall - a grid memory game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, reveal timer, click rules)
//! - `renderer`: WebGPU rendering pipeline
//! - `intro`: Launch splash fade timing
//! - `settings`: Layout and gameplay configuration

pub mod intro;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use intro::IntroFade;
pub use settings::{GridLayout, Settings};

/// Game configuration constants
pub mod consts {
    /// Most tiles a level will ever ask for
    pub const MAX_TILES: u32 = 20;
    /// Largest grid a layout may describe (cells)
    pub const MAX_GRID_CELLS: u32 = 1024;
    /// Tiles on the first levels
    pub const BASE_TILES: u32 = 5;
    /// Reveal time on the first levels (seconds)
    pub const BASE_REVEAL_SECS: u32 = 5;
    /// Reveal time never drops below this (seconds)
    pub const MIN_REVEAL_SECS: u32 = 1;
    /// Levels per step of difficulty
    pub const LEVELS_PER_STEP: u32 = 3;

    /// Points per correct click below `BONUS_LEVEL`
    pub const BASE_POINTS: u64 = 10;
    /// From this level on a correct click is worth `level + BASE_POINTS`
    pub const BONUS_LEVEL: u32 = 4;

    /// Logical screen dimensions
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 780.0;
}
