//! Game state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::level::{ConfigurationError, Level, generate_level};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start control shown, waiting for the player to press it
    AwaitingStart,
    /// Numbers visible, reveal timer running
    Revealing,
    /// Numbers hidden, player clicking from memory
    Hidden,
    /// Wrong tile clicked; run ended
    GameOver,
}

/// A cell of the shuffle grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub column: u32,
}

/// A numbered tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Position in the click sequence (1-based)
    pub order: u32,
    pub cell: GridCell,
    /// Clickable area in screen space
    pub rect: Rect,
}

/// What a single click did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing under the click, or the game no longer takes input
    Ignored,
    /// Start control pressed; reveal timer running
    Started { level: u32 },
    /// Next tile in sequence clicked
    Correct { order: u32, points: u64 },
    /// Last tile of the level clicked; the next level is ready
    LevelComplete { next_level: u32, points: u64 },
    /// Out-of-order tile clicked
    GameOver { final_score: u64, level: u32 },
}

/// Events produced during a tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Reveal time ran out
    NumbersHidden,
    /// A click changed the game
    Click(ClickOutcome),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    settings: Settings,
    level: Level,
    phase: GamePhase,
    /// Seconds since the current level's reveal started
    elapsed: f32,
    score: u64,
}

impl GameState {
    /// Create a new game on level 1, waiting for the start control
    pub fn new(seed: u64, settings: Settings) -> Result<Self, ConfigurationError> {
        settings.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = generate_level(1, &settings.layout, &mut rng)?;

        Ok(Self {
            seed,
            rng,
            settings,
            level,
            phase: GamePhase::AwaitingStart,
            elapsed: 0.0,
            score: 0,
        })
    }

    /// Remaining tiles in click order
    pub fn tiles(&self) -> &[Tile] {
        &self.level.tiles
    }

    /// Next tile the player must click
    pub fn next_tile(&self) -> Option<&Tile> {
        self.level.tiles.first()
    }

    pub fn is_hidden(&self) -> bool {
        self.phase == GamePhase::Hidden
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Current level number (1-based)
    pub fn level(&self) -> u32 {
        self.level.number
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Reveal time for the current level (seconds)
    pub fn reveal_duration(&self) -> f32 {
        self.level.reveal_secs as f32
    }

    /// Seconds since the reveal started (0 while awaiting start)
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }

    pub(crate) fn add_elapsed(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub(crate) fn reset_timer(&mut self) {
        self.elapsed = 0.0;
    }

    pub(crate) fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    /// Remove and return the head tile
    pub(crate) fn pop_head(&mut self) -> Option<Tile> {
        if self.level.tiles.is_empty() {
            None
        } else {
            Some(self.level.tiles.remove(0))
        }
    }

    /// Replace the current level with a freshly shuffled one
    pub(crate) fn advance_level(&mut self) -> Result<u32, ConfigurationError> {
        let next = self.level.number + 1;
        self.level = generate_level(next, &self.settings.layout, &mut self.rng)?;
        self.elapsed = 0.0;
        Ok(next)
    }
}
