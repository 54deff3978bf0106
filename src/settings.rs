//! Game settings: board layout, start control and pacing
//!
//! Loaded from LocalStorage on the web and from a JSON file on native.
//! Anything missing or unusable falls back to the defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_GRID_CELLS, MAX_TILES, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{ConfigurationError, Rect};

/// Grid the tiles are shuffled into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub rows: u32,
    pub columns: u32,
    /// Pitch between cell centers (pixels)
    pub cell_size: f32,
    /// Side of a drawn tile (pixels), at most `cell_size`
    pub tile_size: f32,
    pub left_margin: f32,
    pub top_margin: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 8,
            cell_size: 95.0,
            tile_size: 90.0,
            left_margin: 60.0,
            top_margin: 40.0,
        }
    }
}

impl GridLayout {
    /// Number of cells in the grid, or `None` past `MAX_GRID_CELLS`
    pub fn capacity(&self) -> Option<u32> {
        self.rows
            .checked_mul(self.columns)
            .filter(|&cells| cells <= MAX_GRID_CELLS)
    }

    /// Screen-space center of a cell
    pub fn cell_center(&self, row: u32, column: u32) -> Vec2 {
        Vec2::new(
            self.left_margin + column as f32 * self.cell_size + self.cell_size / 2.0,
            self.top_margin + row as f32 * self.cell_size + self.cell_size / 2.0,
        )
    }

    /// Clickable rectangle of the tile placed in a cell
    pub fn tile_rect(&self, row: u32, column: u32) -> Rect {
        Rect::centered_square(self.cell_center(row, column), self.tile_size)
    }
}

/// Logical screen size; input and drawing both use these coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

/// The round button that starts a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartControl {
    pub center: Vec2,
    pub radius: f32,
}

impl Default for StartControl {
    fn default() -> Self {
        Self {
            center: Vec2::new(650.0, 440.0),
            radius: 60.0,
        }
    }
}

impl StartControl {
    pub fn contains(&self, point: Vec2) -> bool {
        crate::sim::geometry::circle_contains(self.center, self.radius, point)
    }
}

/// Launch splash timing (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroTiming {
    /// How long the splash is held before fading
    pub hold_secs: f32,
    /// Duration of each fade (out of the splash, then into the board)
    pub fade_secs: f32,
}

impl Default for IntroTiming {
    fn default() -> Self {
        Self {
            hold_secs: 2.0,
            fade_secs: 0.85,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub layout: GridLayout,
    pub screen: ScreenSize,
    pub start_control: StartControl,
    pub intro: IntroTiming,
    /// Go back to the start control after each cleared level instead of
    /// revealing the next one straight away
    pub pause_between_levels: bool,
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "number_recall_settings";

    /// Environment variable naming a settings file (native only)
    pub const ENV_PATH: &'static str = "NUMBER_RECALL_SETTINGS";

    /// Check that the layout can hold every level
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let cells = self
            .layout
            .capacity()
            .ok_or(ConfigurationError::GridTooLarge {
                rows: self.layout.rows,
                columns: self.layout.columns,
            })?;
        if cells < MAX_TILES {
            return Err(ConfigurationError::TooManyTiles {
                requested: MAX_TILES,
                cells,
            });
        }
        if self.layout.tile_size <= 0.0 || self.layout.tile_size > self.layout.cell_size {
            return Err(ConfigurationError::TileSize {
                tile_size: self.layout.tile_size,
                cell_size: self.layout.cell_size,
            });
        }
        Ok(())
    }

    /// Parse settings JSON, keeping defaults for missing fields.
    /// Layouts that fail `validate` are rejected in favour of the defaults.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(e) => {
                    log::warn!("Ignoring settings: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not parse settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `NUMBER_RECALL_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path);
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_fits_every_level() {
        let settings = Settings::default();
        assert_eq!(settings.layout.capacity(), Some(40));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_cell_geometry() {
        let layout = GridLayout::default();
        assert_eq!(layout.cell_center(0, 0), Vec2::new(107.5, 87.5));
        assert_eq!(layout.cell_center(4, 7), Vec2::new(772.5, 467.5));

        let rect = layout.tile_rect(0, 0);
        assert_eq!(rect.size, Vec2::splat(90.0));
        assert_eq!(rect.center(), Vec2::new(107.5, 87.5));
    }

    #[test]
    fn test_adjacent_tiles_do_not_overlap() {
        let layout = GridLayout::default();
        let a = layout.tile_rect(2, 3);
        assert!(a.max().x <= layout.tile_rect(2, 4).min.x);
        assert!(a.max().y <= layout.tile_rect(3, 3).min.y);
    }

    #[test]
    fn test_small_grid_is_rejected() {
        let mut settings = Settings::default();
        settings.layout.rows = 2;
        settings.layout.columns = 8;
        assert_eq!(
            settings.validate(),
            Err(ConfigurationError::TooManyTiles {
                requested: 20,
                cells: 16
            })
        );
    }

    #[test]
    fn test_huge_grid_is_rejected() {
        let mut settings = Settings::default();
        settings.layout.rows = 65536;
        settings.layout.columns = 65536;
        assert_eq!(settings.layout.capacity(), None);
        assert_eq!(
            settings.validate(),
            Err(ConfigurationError::GridTooLarge {
                rows: 65536,
                columns: 65536
            })
        );

        // Fits in u32 but is still far past any usable board
        settings.layout.rows = 4096;
        settings.layout.columns = 4096;
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_oversized_tiles_are_rejected() {
        let mut settings = Settings::default();
        settings.layout.tile_size = 120.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::TileSize { .. })
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(
            r#"{ "pause_between_levels": true, "layout": { "cell_size": 100.0 } }"#,
        );
        assert!(settings.pause_between_levels);
        assert_eq!(settings.layout.cell_size, 100.0);
        assert_eq!(settings.layout.rows, 5);
        assert_eq!(settings.start_control, StartControl::default());
    }

    #[test]
    fn test_from_json_falls_back_on_garbage() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
        assert_eq!(
            Settings::from_json(r#"{ "layout": { "rows": 1, "columns": 1 } }"#),
            Settings::default()
        );
        assert_eq!(
            Settings::from_json(r#"{ "layout": { "rows": 65536, "columns": 65536 } }"#),
            Settings::default()
        );
        assert_eq!(
            Settings::from_json(r#"{ "layout": { "rows": 65537, "columns": 65537 } }"#),
            Settings::default()
        );
    }

    #[test]
    fn test_start_control_hit() {
        let start = StartControl::default();
        assert!(start.contains(Vec2::new(650.0, 440.0)));
        assert!(start.contains(Vec2::new(600.0, 440.0)));
        assert!(!start.contains(Vec2::new(10.0, 10.0)));
    }
}
