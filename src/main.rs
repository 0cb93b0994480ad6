//! Cube Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use cube_dash::Settings;
    use cube_dash::audio::{AudioManager, SoundEffect};
    use cube_dash::renderer::Renderer;
    use cube_dash::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use cube_dash::{highscore, platform};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<Renderer>,
        audio: AudioManager,
        settings: Settings,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64, field: glam::Vec2) -> Self {
            let settings = Settings::load();
            let audio = AudioManager::new();

            let mut state = GameState::with_field(seed, field);
            state.high_score = highscore::load();

            Self {
                state,
                renderer: None,
                audio,
                settings,
                input: TickInput::default(),
            }
        }

        /// One simulation tick per animation frame
        fn update(&mut self) {
            let input = self.input.clone();
            tick(&mut self.state, &input);

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.start = false;
            self.input.restart = false;

            for event in self.state.take_events() {
                self.handle_event(event);
            }
        }

        fn handle_event(&mut self, event: GameEvent) {
            let settings = &self.settings;
            match event {
                GameEvent::Started => {
                    self.audio.resume();
                    self.audio.play(SoundEffect::PowerUp, settings);
                }
                GameEvent::Jumped => self.audio.play(SoundEffect::Jump, settings),
                GameEvent::ObstacleCleared { .. } => {
                    self.audio.play(SoundEffect::Score, settings)
                }
                GameEvent::ComboAdvanced { multiplier } => {
                    log::info!("combo multiplier x{multiplier}");
                    self.audio.play(SoundEffect::PowerUp, settings);
                }
                GameEvent::CoinCollected { .. } => {
                    self.audio.play(SoundEffect::PowerUp, settings)
                }
                GameEvent::GameOver {
                    score,
                    high_score,
                    new_high_score,
                } => {
                    if new_high_score {
                        highscore::save(high_score);
                        self.audio.play(SoundEffect::HighScore, settings);
                    } else {
                        self.audio.play(SoundEffect::GameOver, settings);
                    }
                    platform::post_score(score, high_score);
                }
                GameEvent::Landed | GameEvent::Crashed => {}
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state, &self.settings);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.scoring.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                el.set_text_content(Some(&self.state.high_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-multiplier") {
                if self.state.scoring.multiplier > 1 {
                    let _ = el.set_attribute("class", "hud-item");
                    el.set_text_content(Some(&format!("x{}", self.state.scoring.multiplier)));
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Phase overlays
            if let Some(el) = document.get_element_by_id("menu") {
                let class = if self.state.phase == GamePhase::Menu {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.scoring.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Jump doubles as start/restart depending on phase
        fn primary_action(&mut self) {
            match self.state.phase {
                GamePhase::Menu => self.input.start = true,
                GamePhase::Playing => self.input.jump = true,
                GamePhase::GameOver => {}
            }
            self.audio.resume();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cube Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = platform::now_ms();
        let field = glam::Vec2::new(canvas.width() as f32, canvas.height() as f32);
        let mut game = Game::new(seed, field);
        game.renderer = Renderer::new(&canvas).ok();
        if game.renderer.is_none() {
            log::error!("Failed to create 2d canvas context");
        }
        let game = Rc::new(RefCell::new(game));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Cube Dash running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        event.prevent_default();
                        g.primary_action();
                    }
                    "i" | "I" => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().primary_action();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().primary_action();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.start = true;
                g.audio.resume();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                // Reseed from wall clock so each run differs
                let seed = platform::now_ms();
                let mut g = game.borrow_mut();
                g.state.seed = seed;
                g.input.restart = true;
                g.audio.resume();
                log::info!("Restarting with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("theme-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.state.theme = (g.state.theme + 1) % cube_dash::renderer::THEMES.len();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cube_dash::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Cube Dash (native) starting...");
    log::info!("Running a headless demo session - serve the wasm build for the real game");

    let seed = cube_dash::platform::now_ms();
    let mut state = GameState::new(seed);
    let input = TickInput {
        start: true,
        idle_mode: true,
        ..Default::default()
    };
    tick(&mut state, &input);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    // The demo pilot eventually mistimes a jump; cap the run regardless
    for _ in 0..60_000 {
        tick(&mut state, &input);
        state.take_events();
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "Demo run (seed {seed}): score {}, {} ticks survived",
        state.scoring.score, state.time_ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
