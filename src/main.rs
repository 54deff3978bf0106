//! Number Recall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use number_recall::renderer::{RenderState, build_scene};
    use number_recall::sim::{ClickOutcome, GameEvent, GameState, TickInput, tick};
    use number_recall::{IntroFade, Settings};

    /// Frame time used for the very first frame
    const FIRST_FRAME_DT: f32 = 1.0 / 60.0;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        intro: IntroFade,
        render_state: Option<RenderState>,
        last_time: f64,
        /// requestAnimationFrame time of the first frame (ms)
        launch_time: Option<f64>,
        input: TickInput,
        /// Canvas client size, for mapping pointer positions
        client_size: (f32, f32),
    }

    impl Game {
        fn new(state: GameState, settings: Settings) -> Self {
            Self {
                intro: IntroFade::new(settings.intro),
                state,
                settings,
                render_state: None,
                last_time: 0.0,
                launch_time: None,
                input: TickInput::default(),
                client_size: (1.0, 1.0),
            }
        }

        fn set_client_size(&mut self, w: f32, h: f32) {
            self.client_size = (w.max(1.0), h.max(1.0));
        }

        /// Convert a canvas-relative pointer position to logical screen coordinates
        fn to_logical(&self, x: f32, y: f32) -> Vec2 {
            let screen = self.settings.screen;
            Vec2::new(
                x * screen.width / self.client_size.0,
                y * screen.height / self.client_size.1,
            )
        }

        fn seconds_since_launch(&self, time: f64) -> f32 {
            self.launch_time
                .map(|start| ((time - start) / 1000.0) as f32)
                .unwrap_or(0.0)
        }

        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);

            if !self.intro.is_done(self.seconds_since_launch(time)) {
                // Clicks during the splash are dropped
                self.input.clicks.clear();
                return;
            }

            let input = self.input.clone();
            self.input.clicks.clear();

            for event in tick(&mut self.state, &input, dt) {
                match event {
                    GameEvent::NumbersHidden => log::debug!("Numbers hidden"),
                    GameEvent::Click(ClickOutcome::LevelComplete { next_level, .. }) => {
                        log::info!("On to level {} (score {})", next_level, self.state.score());
                    }
                    GameEvent::Click(ClickOutcome::GameOver { final_score, level }) => {
                        log::info!("Final score {} on level {}", final_score, level);
                    }
                    GameEvent::Click(outcome) => log::debug!("{:?}", outcome),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let t = self.seconds_since_launch(time);
            let vertices = build_scene(&self.state, &self.intro, t);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score().to_string()));
            }
            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.level().to_string()));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.is_game_over() {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score().to_string()));
                    }
                    if let Some(level_el) = document.get_element_by_id("final-level") {
                        level_el.set_text_content(Some(&self.state.level().to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Start a fresh run (the intro is not replayed)
        fn restart(&mut self, seed: u64) {
            match GameState::new(seed, self.settings.clone()) {
                Ok(state) => {
                    self.state = state;
                    self.input.clicks.clear();
                    log::info!("Game restarted with seed: {}", seed);
                }
                Err(e) => log::error!("Could not restart: {}", e),
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Number Recall starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let state = match GameState::new(seed, settings.clone()) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Bad configuration: {}", e);
                return;
            }
        };
        let game = Rc::new(RefCell::new(Game::new(state, settings.clone())));
        game.borrow_mut()
            .set_client_size(client_w as f32, client_h as f32);

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, settings.screen).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to start renderer: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Number Recall running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse release - one click per button release
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.set_client_size(
                    canvas_clone.client_width() as f32,
                    canvas_clone.client_height() as f32,
                );
                let pos = g.to_logical(event.offset_x() as f32, event.offset_y() as f32);
                log::debug!("Click at {:?}", pos);
                g.input.clicks.push(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.set_client_size(
                        canvas_clone.client_width() as f32,
                        canvas_clone.client_height() as f32,
                    );
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    let pos = g.to_logical(x, y);
                    g.input.clicks.push(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let "i" | "I" = event.key().as_str() {
                    g.input.idle_mode = !g.input.idle_mode;
                    log::info!("Idle mode: {}", g.input.idle_mode);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            if g.launch_time.is_none() {
                g.launch_time = Some(time);
            }

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FIRST_FRAME_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Number Recall (native) starting...");
    log::info!("Native mode plays a headless demo - run with `trunk serve` for the web version");

    if let Err(e) = demo::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Headless idle-mode run through the same tick path the browser uses
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::{SystemTime, UNIX_EPOCH};

    use number_recall::Settings;
    use number_recall::sim::{
        ClickOutcome, ConfigurationError, GameEvent, GameState, TickInput, tick,
    };

    /// Simulated frame time (seconds)
    const DEMO_DT: f32 = 1.0 / 60.0;
    /// Give up after this much simulated time (seconds)
    const DEMO_TIME_LIMIT: f32 = 30.0 * 60.0;
    const DEFAULT_DEMO_LEVELS: u32 = 5;

    fn env_u64(name: &str) -> Option<u64> {
        std::env::var(name).ok().and_then(|v| v.parse().ok())
    }

    pub fn run() -> Result<(), ConfigurationError> {
        let settings = Settings::load();
        let seed = env_u64("NUMBER_RECALL_SEED").unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        let levels = env_u64("NUMBER_RECALL_DEMO_LEVELS")
            .map(|n| n as u32)
            .unwrap_or(DEFAULT_DEMO_LEVELS);

        let mut state = GameState::new(seed, settings)?;
        log::info!("Demo seed {}, playing {} levels", seed, levels);

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let mut clock = 0.0;

        while clock < DEMO_TIME_LIMIT && !state.is_game_over() && state.level() <= levels {
            clock += DEMO_DT;
            for event in tick(&mut state, &input, DEMO_DT) {
                match event {
                    GameEvent::NumbersHidden => {
                        log::debug!("[{:7.2}s] numbers hidden", clock);
                    }
                    GameEvent::Click(ClickOutcome::LevelComplete { next_level, .. }) => {
                        log::info!(
                            "[{:7.2}s] level {} cleared, score {}",
                            clock,
                            next_level - 1,
                            state.score()
                        );
                    }
                    GameEvent::Click(outcome) => log::debug!("[{:7.2}s] {:?}", clock, outcome),
                }
            }
        }

        println!(
            "Final score: {} (reached level {} in {:.1}s)",
            state.score(),
            state.level(),
            clock
        );
        Ok(())
    }
}
