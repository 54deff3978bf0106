//! Level generation and difficulty curve
//!
//! Every third level adds a tile (up to `MAX_TILES`) and takes a second off
//! the reveal time (down to `MIN_REVEAL_SECS`).

use rand::Rng;
use thiserror::Error;

use super::state::{GridCell, Tile};
use crate::consts::*;
use crate::settings::GridLayout;

/// Layout problems that make a level impossible to build
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("level needs {requested} tiles but the grid only has {cells} cells")]
    TooManyTiles { requested: u32, cells: u32 },
    #[error("tile size {tile_size} must be positive and no larger than cell size {cell_size}")]
    TileSize { tile_size: f32, cell_size: f32 },
    #[error("a {rows}x{columns} grid is larger than the board allows")]
    GridTooLarge { rows: u32, columns: u32 },
}

/// Tiles shown on a level
#[inline]
pub fn tile_count(level: u32) -> u32 {
    (level / LEVELS_PER_STEP + BASE_TILES).min(MAX_TILES)
}

/// Seconds the numbers stay visible on a level
#[inline]
pub fn reveal_duration(level: u32) -> u32 {
    BASE_REVEAL_SECS
        .saturating_sub(level / LEVELS_PER_STEP)
        .max(MIN_REVEAL_SECS)
}

/// Points for one correct click on a level
#[inline]
pub fn points_for(level: u32) -> u64 {
    if level < BONUS_LEVEL {
        BASE_POINTS
    } else {
        level as u64 + BASE_POINTS
    }
}

/// A freshly generated level
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// 1-based level number
    pub number: u32,
    /// Remaining tiles in click order (head = next expected click)
    pub tiles: Vec<Tile>,
    /// Seconds before the numbers are hidden
    pub reveal_secs: u32,
}

/// Shuffle a level's tiles into distinct grid cells.
///
/// Cells are drawn at random and redrawn on collision; order indices follow
/// placement order.
pub fn generate_level<R: Rng>(
    number: u32,
    layout: &GridLayout,
    rng: &mut R,
) -> Result<Level, ConfigurationError> {
    let count = tile_count(number);
    let cells = layout
        .capacity()
        .ok_or(ConfigurationError::GridTooLarge {
            rows: layout.rows,
            columns: layout.columns,
        })?;
    if count > cells {
        return Err(ConfigurationError::TooManyTiles {
            requested: count,
            cells,
        });
    }

    let mut occupied = vec![false; cells as usize];
    let mut tiles = Vec::with_capacity(count as usize);
    let mut order = 1;

    while order <= count {
        let row = rng.random_range(0..layout.rows);
        let column = rng.random_range(0..layout.columns);
        let slot = row as usize * layout.columns as usize + column as usize;
        if occupied[slot] {
            continue;
        }
        occupied[slot] = true;

        tiles.push(Tile {
            order,
            cell: GridCell { row, column },
            rect: layout.tile_rect(row, column),
        });
        order += 1;
    }

    let reveal_secs = reveal_duration(number);
    log::info!(
        "Level {}: {} tiles, revealed for {}s",
        number,
        count,
        reveal_secs
    );

    Ok(Level {
        number,
        tiles,
        reveal_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_difficulty_curve() {
        assert_eq!(tile_count(1), 5);
        assert_eq!(tile_count(2), 5);
        assert_eq!(tile_count(3), 6);
        assert_eq!(tile_count(45), 20);
        assert_eq!(tile_count(1000), 20);

        assert_eq!(reveal_duration(1), 5);
        assert_eq!(reveal_duration(3), 4);
        assert_eq!(reveal_duration(12), 1);
        assert_eq!(reveal_duration(13), 1);
        assert_eq!(reveal_duration(1000), 1);
    }

    #[test]
    fn test_points() {
        assert_eq!(points_for(1), 10);
        assert_eq!(points_for(3), 10);
        assert_eq!(points_for(4), 14);
        assert_eq!(points_for(10), 20);
    }

    #[test]
    fn test_first_level() {
        let mut rng = Pcg32::seed_from_u64(1);
        let level = generate_level(1, &GridLayout::default(), &mut rng).unwrap();
        assert_eq!(level.number, 1);
        assert_eq!(level.tiles.len(), 5);
        assert_eq!(level.reveal_secs, 5);
        let orders: Vec<u32> = level.tiles.iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_tile_rect_matches_cell() {
        let layout = GridLayout::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let level = generate_level(9, &layout, &mut rng).unwrap();
        for tile in &level.tiles {
            assert_eq!(tile.rect, layout.tile_rect(tile.cell.row, tile.cell.column));
            assert!(tile.cell.row < layout.rows);
            assert!(tile.cell.column < layout.columns);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let layout = GridLayout::default();
        let a = generate_level(6, &layout, &mut Pcg32::seed_from_u64(42)).unwrap();
        let b = generate_level(6, &layout, &mut Pcg32::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_grid_too_small() {
        let layout = GridLayout {
            rows: 2,
            columns: 2,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let err = generate_level(1, &layout, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::TooManyTiles {
                requested: 5,
                cells: 4
            }
        );
    }

    #[test]
    fn test_huge_grid_is_an_error() {
        let layout = GridLayout {
            rows: 65537,
            columns: 65537,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        assert_eq!(
            generate_level(1, &layout, &mut rng),
            Err(ConfigurationError::GridTooLarge {
                rows: 65537,
                columns: 65537
            })
        );
    }

    #[test]
    fn test_exactly_full_grid() {
        // 4x5 grid holds the 20-tile cap with no free cell left
        let layout = GridLayout {
            rows: 4,
            columns: 5,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(11);
        let level = generate_level(60, &layout, &mut rng).unwrap();
        assert_eq!(level.tiles.len(), 20);
        let cells: HashSet<GridCell> = level.tiles.iter().map(|t| t.cell).collect();
        assert_eq!(cells.len(), 20);
    }

    proptest! {
        #[test]
        fn prop_tile_count_matches_curve(level in 1u32..200, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let generated = generate_level(level, &GridLayout::default(), &mut rng).unwrap();
            prop_assert_eq!(generated.tiles.len() as u32, (level / 3 + 5).min(20));
        }

        #[test]
        fn prop_reveal_duration_at_least_one(level in 1u32..10_000) {
            let expected = (5i64 - (level / 3) as i64).max(1) as u32;
            prop_assert_eq!(reveal_duration(level), expected);
            prop_assert!(reveal_duration(level) >= 1);
        }

        #[test]
        fn prop_cells_are_distinct(level in 1u32..200, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let generated = generate_level(level, &GridLayout::default(), &mut rng).unwrap();
            let cells: HashSet<GridCell> = generated.tiles.iter().map(|t| t.cell).collect();
            prop_assert_eq!(cells.len(), generated.tiles.len());
            for (i, tile) in generated.tiles.iter().enumerate() {
                prop_assert_eq!(tile.order, i as u32 + 1);
            }
        }
    }
}
