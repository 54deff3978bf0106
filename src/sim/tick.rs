//! Per-frame update and click handling
//!
//! The presentation layer calls `tick` once per frame with the frame time and
//! the clicks it collected. Clicks are handled in arrival order after the
//! reveal timer has been advanced.

use glam::Vec2;

use super::level::points_for;
use super::state::{ClickOutcome, GameEvent, GamePhase, GameState};
use super::timer::should_hide;

/// Input collected for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Click positions in logical screen coordinates
    pub clicks: Vec<Vec2>,
    /// Idle/demo mode - the game plays itself
    pub idle_mode: bool,
}

/// Advance the game by `dt` seconds and apply this frame's clicks
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.is_game_over() {
        return events;
    }

    if matches!(state.phase(), GamePhase::Revealing | GamePhase::Hidden) {
        state.add_elapsed(dt);
    }

    if state.phase() == GamePhase::Revealing
        && should_hide(state.elapsed(), state.reveal_duration())
    {
        state.set_phase(GamePhase::Hidden);
        log::debug!("Numbers hidden after {:.2}s", state.elapsed());
        events.push(GameEvent::NumbersHidden);
    }

    let mut clicks = input.clicks.clone();
    if input.idle_mode {
        if let Some(pos) = idle_click(state) {
            clicks.push(pos);
        }
    }

    for pos in clicks {
        match state.on_click(pos) {
            ClickOutcome::Ignored => {}
            outcome => events.push(GameEvent::Click(outcome)),
        }
    }

    events
}

/// Where the demo player clicks this frame, if anywhere.
/// Presses start, then waits for the numbers to hide before clicking the head.
fn idle_click(state: &GameState) -> Option<Vec2> {
    match state.phase() {
        GamePhase::AwaitingStart => Some(state.settings().start_control.center),
        GamePhase::Hidden => state.next_tile().map(|t| t.rect.center()),
        GamePhase::Revealing | GamePhase::GameOver => None,
    }
}

impl GameState {
    /// Apply a click at `pos` (logical screen coordinates)
    pub fn on_click(&mut self, pos: Vec2) -> ClickOutcome {
        match self.phase() {
            GamePhase::GameOver => ClickOutcome::Ignored,
            GamePhase::AwaitingStart => {
                if !self.settings().start_control.contains(pos) {
                    return ClickOutcome::Ignored;
                }
                self.reset_timer();
                self.set_phase(GamePhase::Revealing);
                log::info!("Level {} started", self.level());
                ClickOutcome::Started { level: self.level() }
            }
            GamePhase::Revealing | GamePhase::Hidden => self.click_tile(pos),
        }
    }

    fn click_tile(&mut self, pos: Vec2) -> ClickOutcome {
        let Some(hit) = self.tiles().iter().position(|t| t.rect.contains(pos)) else {
            return ClickOutcome::Ignored;
        };

        if hit != 0 {
            log::debug!("Tile {} clicked out of order", self.tiles()[hit].order);
            return self.end_game();
        }

        let Some(tile) = self.pop_head() else {
            return ClickOutcome::Ignored;
        };
        let points = points_for(self.level());
        self.add_score(points);
        log::debug!("Correct: tile {} (+{})", tile.order, points);

        if !self.tiles().is_empty() {
            self.set_phase(GamePhase::Hidden);
            return ClickOutcome::Correct {
                order: tile.order,
                points,
            };
        }

        let cleared = self.level();
        match self.advance_level() {
            Ok(next_level) => {
                let phase = if self.settings().pause_between_levels {
                    GamePhase::AwaitingStart
                } else {
                    GamePhase::Revealing
                };
                self.set_phase(phase);
                log::info!("Level {} cleared, score {}", cleared, self.score());
                ClickOutcome::LevelComplete { next_level, points }
            }
            Err(e) => {
                log::error!("Could not build level {}: {}", cleared + 1, e);
                self.end_game()
            }
        }
    }

    fn end_game(&mut self) -> ClickOutcome {
        self.set_phase(GamePhase::GameOver);
        log::info!("Game over on level {}, final score {}", self.level(), self.score());
        ClickOutcome::GameOver {
            final_score: self.score(),
            level: self.level(),
        }
    }
}
