//! Turns game state into a triangle list for the pipeline

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::intro::{IntroFade, IntroStage};
use crate::sim::{GamePhase, GameState, Rect};

/// Dark panel the grid sits on
const BOARD_PANEL: Rect = Rect {
    min: Vec2::new(25.0, 40.0),
    size: Vec2::new(865.0, 520.0),
};

/// Digit height relative to tile size
const TILE_NUMBER_SCALE: f32 = 0.6;
/// Start ring stroke width (pixels)
const START_RING_STROKE: f32 = 5.0;
const RING_SEGMENTS: u32 = 64;

/// Build the frame for `t` seconds after launch
pub fn build_scene(state: &GameState, intro: &IntroFade, t: f32) -> Vec<Vertex> {
    let screen = state.settings().screen;
    let full_screen = Rect::new(Vec2::ZERO, Vec2::new(screen.width, screen.height));

    let mut vertices = match intro.stage(t) {
        IntroStage::Hold | IntroStage::FadeOut => splash(state, &full_screen),
        IntroStage::FadeIn | IntroStage::Done => board(state),
    };

    let alpha = intro.overlay_alpha(t);
    if alpha > 0.0 {
        vertices.extend(shapes::quad(&full_screen, colors::black(alpha)));
    }

    vertices
}

fn splash(state: &GameState, full_screen: &Rect) -> Vec<Vertex> {
    let center = full_screen.center();
    let mut vertices = shapes::quad(full_screen, colors::SPLASH);
    vertices.extend(shapes::ring(center, 150.0, 170.0, colors::SPLASH_ACCENT, RING_SEGMENTS));
    vertices.extend(shapes::number(
        state.level() as u64,
        center,
        160.0,
        colors::SPLASH_ACCENT,
    ));
    vertices
}

fn board(state: &GameState) -> Vec<Vertex> {
    let mut vertices = shapes::quad(&BOARD_PANEL, colors::BOARD);
    let tile_size = state.settings().layout.tile_size;

    match state.phase() {
        GamePhase::AwaitingStart => {
            let start = state.settings().start_control;
            vertices.extend(shapes::ring(
                start.center,
                start.radius - START_RING_STROKE,
                start.radius,
                colors::START_RING,
                RING_SEGMENTS,
            ));
            vertices.extend(shapes::number(
                state.level() as u64,
                start.center,
                start.radius * 0.9,
                colors::START_RING,
            ));
        }
        GamePhase::Revealing => {
            for tile in state.tiles() {
                vertices.extend(shapes::number(
                    tile.order as u64,
                    tile.rect.center(),
                    tile_size * TILE_NUMBER_SCALE,
                    colors::NUMBER,
                ));
            }
        }
        GamePhase::Hidden => {
            for tile in state.tiles() {
                vertices.extend(shapes::quad(&tile.rect, colors::TILE));
            }
        }
        GamePhase::GameOver => {
            // Show where the remaining numbers were
            vertices.extend(shapes::quad(&BOARD_PANEL, colors::GAME_OVER_TINT));
            for tile in state.tiles() {
                vertices.extend(shapes::number(
                    tile.order as u64,
                    tile.rect.center(),
                    tile_size * TILE_NUMBER_SCALE,
                    colors::MISSED_NUMBER,
                ));
            }
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{IntroTiming, Settings};

    fn no_intro() -> IntroFade {
        IntroFade::new(IntroTiming {
            hold_secs: 0.0,
            fade_secs: 0.0,
        })
    }

    #[test]
    fn test_hidden_tiles_are_quads() {
        let mut state = GameState::new(1, Settings::default()).unwrap();
        state.on_click(state.settings().start_control.center);
        state.on_click(state.tiles()[0].rect.center());
        assert!(state.is_hidden());

        let vertices = build_scene(&state, &no_intro(), 100.0);
        // Panel plus one quad per remaining tile
        assert_eq!(vertices.len(), 6 + 4 * 6);
    }

    #[test]
    fn test_revealed_tiles_show_numbers() {
        let mut state = GameState::new(2, Settings::default()).unwrap();
        state.on_click(state.settings().start_control.center);
        let vertices = build_scene(&state, &no_intro(), 100.0);
        // Digits 1-5 light 2+5+5+4+5 segments
        assert_eq!(vertices.len(), 6 + (2 + 5 + 5 + 4 + 5) * 6);
    }

    #[test]
    fn test_fade_overlay_drawn_during_intro() {
        let state = GameState::new(3, Settings::default()).unwrap();
        let intro = IntroFade::new(IntroTiming {
            hold_secs: 1.0,
            fade_secs: 1.0,
        });
        let holding = build_scene(&state, &intro, 0.5);
        let fading = build_scene(&state, &intro, 1.5);
        assert_eq!(fading.len(), holding.len() + 6);
        let overlay = fading.last().unwrap();
        assert!((overlay.color[3] - 0.5).abs() < 1e-6);
    }
}
