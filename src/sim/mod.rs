//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives through `tick`
//! - Seeded RNG only
//! - Tiles kept in click order
//! - No rendering or platform dependencies

pub mod geometry;
pub mod level;
pub mod state;
pub mod tick;
pub mod timer;

pub use geometry::Rect;
pub use level::{
    ConfigurationError, Level, generate_level, points_for, reveal_duration, tile_count,
};
pub use state::{ClickOutcome, GameEvent, GamePhase, GameState, GridCell, Tile};
pub use tick::{TickInput, tick};
pub use timer::should_hide;
