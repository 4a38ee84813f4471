//! Space Arcade entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use space_arcade::renderer::{CanvasRenderer, Renderer, build_frame};
    use space_arcade::{QualityPreset, Settings};
    use space_arcade::sim::{
        Difficulty, FrameClock, GameEvent, GameMode, GameSession, ModeState, TickInput, Viewport,
        tick,
    };

    /// Everything the browser loop owns
    struct Game {
        session: GameSession,
        renderer: CanvasRenderer,
        clock: FrameClock,
        input: TickInput,
        /// Difficulty picked for modes that let the player choose
        difficulty: Difficulty,
        last_time_ms: f64,
    }

    impl Game {
        fn frame(&mut self, now_ms: f64) {
            let dt = self.clock.advance(now_ms);
            self.last_time_ms = now_ms;
            tick(&mut self.session, &self.input, dt);

            for event in self.session.drain_events() {
                self.on_event(&event);
            }

            let frame = build_frame(&self.session, (now_ms / 1000.0) as f32);
            self.renderer.draw(&frame);
            self.update_hud();
        }

        fn start(&mut self, mode: GameMode) {
            let difficulty = mode.fixed_difficulty().unwrap_or(self.difficulty);
            self.input.keys.clear();
            self.session.start_run(mode, difficulty, self.last_time_ms);
        }

        fn change_settings(&mut self, f: impl FnOnce(&mut Settings)) {
            let mut settings = self.session.settings.clone();
            f(&mut settings);
            settings.save();
            log::info!("Quality: {}", settings.quality.as_str());
            self.session.apply_settings(settings);
        }

        fn on_event(&self, event: &GameEvent) {
            match event {
                GameEvent::GameOver { final_score, rank } => {
                    let text = match rank {
                        Some(rank) => format!("Game over: {} points, rank #{}", final_score, rank),
                        None => format!("Game over: {} points", final_score),
                    };
                    set_text("status", &text);
                }
                GameEvent::RoundChanged { round } => set_text("round", &round.to_string()),
                GameEvent::LaserFired => set_text("laser", "Recharging"),
                other => log::debug!("{:?}", other),
            }
        }

        fn update_hud(&self) {
            let run = &self.session.run;
            set_text("score", &run.score.to_string());
            set_text("lives", &run.lives.to_string());
            set_text(
                "best",
                &self.session.leaderboard.best_for_mode(run.mode).to_string(),
            );
            match &self.session.mode {
                ModeState::Collect(state) => set_text(
                    "timer",
                    &format!("{:.0}%", state.timer_fraction() * 100.0),
                ),
                ModeState::Climbing(state) if state.laser_ready() => set_text("laser", "Ready"),
                _ => {}
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn canvas_size(window: &Window) -> Viewport {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1280.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(720.0);
        Viewport::new(w as f32, h as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Space Arcade starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(canvas) = window
            .document()
            .and_then(|d| d.get_element_by_id("canvas"))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("No <canvas id=\"canvas\"> found");
            return;
        };
        let Some(mut renderer) = CanvasRenderer::new(canvas.clone()) else {
            log::warn!("Canvas2D context unavailable");
            return;
        };

        let viewport = canvas_size(&window);
        renderer.resize(viewport.width as u32, viewport.height as u32);

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game {
            session: GameSession::new(seed, viewport, settings),
            renderer,
            clock: FrameClock::new(),
            input: TickInput::default(),
            difficulty: Difficulty::Easy,
            last_time_ms: 0.0,
        }));
        log::info!("Session initialized with seed: {}", seed);

        setup_input_handlers(&window, &canvas, game.clone());
        request_animation_frame(game);

        log::info!("Space Arcade running!");
    }

    fn pointer(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    fn attach(target: &web_sys::EventTarget, name: &str, callback: &js_sys::Function) {
        if target
            .add_event_listener_with_callback(name, callback)
            .is_err()
        {
            log::warn!("Could not listen for {}", name);
        }
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().session.pointer_down(pointer(&event));
            });
            attach(canvas, "mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().session.pointer_move(pointer(&event));
            });
            attach(canvas, "mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().session.pointer_up(pointer(&event));
            });
            attach(canvas, "mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().session.click(pointer(&event));
            });
            attach(canvas, "click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: held movement keys plus a few shortcuts
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if g.input.keys.set_key(&key, true) {
                    event.prevent_default();
                    return;
                }
                let now = g.last_time_ms;
                match key.as_str() {
                    "1" => g.start(GameMode::Collect),
                    "2" => g.start(GameMode::Asteroids),
                    "3" => g.start(GameMode::Climbing),
                    "e" | "E" => g.difficulty = Difficulty::Easy,
                    "m" | "M" => g.difficulty = Difficulty::Medium,
                    "h" | "H" => g.difficulty = Difficulty::Hard,
                    "r" | "R" => g.session.restart(now),
                    "Escape" => g.session.return_to_menu(),
                    "q" | "Q" => g.change_settings(|s| {
                        s.apply_preset(match s.quality {
                            QualityPreset::Low => QualityPreset::Medium,
                            QualityPreset::Medium => QualityPreset::High,
                            QualityPreset::High => QualityPreset::Low,
                        })
                    }),
                    "p" | "P" => g.change_settings(|s| s.particles = !s.particles),
                    "b" | "B" => {
                        g.change_settings(|s| s.background_effects = !s.background_effects)
                    }
                    _ => {}
                }
            });
            attach(window, "keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.keys.set_key(&event.key(), false);
            });
            attach(window, "keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let viewport = canvas_size(&window_clone);
                let mut g = game.borrow_mut();
                g.renderer
                    .resize(viewport.width as u32, viewport.height as u32);
                g.session.set_viewport(viewport);
            });
            attach(window, "resize", closure.as_ref().unchecked_ref());
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
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("requestAnimationFrame failed");
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
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
    use space_arcade::Settings;
    use space_arcade::sim::{GameMode, GameSession, HeldKeys, TickInput, Viewport, tick};

    env_logger::init();
    log::info!("Space Arcade (native) starting...");
    log::info!("Native mode runs a headless simulation - serve the wasm build for the game");

    let mut session = GameSession::new(0x5eed, Viewport::new(1280.0, 720.0), Settings::load());
    for (i, mode) in GameMode::ALL.into_iter().enumerate() {
        let difficulty = mode.fixed_difficulty().unwrap_or_default();
        session.start_run(mode, difficulty, 0.0);

        // Weave left and right so the climber does something
        let mut input = TickInput::default();
        for frame in 0..60 * 90 {
            input.keys = HeldKeys {
                left: (frame / 120) % 2 == 0,
                right: (frame / 120) % 2 == 1,
                ..Default::default()
            };
            tick(&mut session, &input, 1.0 / 60.0);
            if !session.is_playing() {
                break;
            }
        }
        if session.is_playing() {
            session.game_over();
        }

        let events = session.drain_events();
        log::info!(
            "Run {} ({}): score {}, {} lives left, {:.1}s, {} events",
            i + 1,
            mode.name(),
            session.run.score,
            session.run.lives,
            session.run.elapsed,
            events.len()
        );
    }

    if let Some(best) = session.leaderboard.top_score() {
        log::info!("Best score across modes: {}", best);
    }
    for (rank, entry) in session.leaderboard.entries().iter().enumerate() {
        println!("{:>2}. {:<12} {:>6}  {:?}", rank + 1, entry.name, entry.score, entry.mode);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
