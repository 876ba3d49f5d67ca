//! Dodge Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use dodge_jump::consts::*;
    use dodge_jump::renderer::{self, CanvasTarget};
    use dodge_jump::score;
    use dodge_jump::sim::{self, GamePhase, GameState, InputIntents};
    use dodge_jump::Settings;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        intents: InputIntents,
        target: Option<CanvasTarget>,
        canvas: HtmlCanvasElement,
        settings: Settings,
        best: u32,
        /// rAF timestamp (ms) the current session started at; 0 = unstamped
        started_at: f64,
        last_time: f64,
        dpr: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track phase so the GameOver transition fires exactly once
        last_phase: GamePhase,
        /// Whether a rAF callback is in flight; game over stops the chain
        animating: bool,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement, settings: Settings, best: u32) -> Self {
            let window = web_sys::window().expect("no window");
            Self {
                state: GameState::new(seed),
                intents: InputIntents::default(),
                target: None,
                canvas,
                settings,
                best,
                started_at: 0.0,
                last_time: 0.0,
                dpr: window.device_pixel_ratio(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: GamePhase::Running,
                animating: false,
            }
        }

        /// Reset game state for a new session
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.intents.clear();
            self.started_at = 0.0;
            self.last_time = 0.0;
            self.last_phase = GamePhase::Running;
            self.apply_resize();
            log::info!("Session restarted with seed: {seed}");
        }

        /// Fit the stage to the host and resize the canvas backing store.
        ///
        /// Reads the width from the surrounding stage element so the canvas
        /// itself never feeds back into the measurement.
        fn apply_resize(&mut self) {
            let Some(width) = stage_width(&self.canvas) else {
                return;
            };

            sim::resize(&mut self.state, width);

            let view = self.state.view;
            self.canvas.set_width((view.width as f64 * self.dpr) as u32);
            self.canvas
                .set_height((view.height as f64 * self.dpr) as u32);
            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{}px", view.width));
            let _ = style.set_property("height", &format!("{}px", view.height));

            if let Some(ref target) = self.target {
                target.set_transform_for_dpr(self.dpr);
            }
        }

        /// Run one frame: clock, tick, render, HUD
        fn update(&mut self, time: f64) {
            if self.started_at == 0.0 {
                self.started_at = time;
            }

            let dt = if self.last_time > 0.0 {
                (((time - self.last_time) / 1000.0) as f32).min(MAX_FRAME_DT)
            } else {
                1.0 / 60.0
            };
            self.last_time = time;

            if self.state.phase == GamePhase::Running {
                // Score follows the monotonic wall clock, not summed dt
                self.state
                    .sync_clock(((time - self.started_at) / 1000.0) as f32);
                let input = self.intents.take();
                sim::tick(&mut self.state, &input, dt);
            }

            self.track_fps(time);
        }

        /// Render the current frame; a missing context skips quietly
        fn render(&mut self) {
            if self.target.is_none() {
                self.target = CanvasTarget::new(&self.canvas);
                if let Some(ref target) = self.target {
                    target.set_transform_for_dpr(self.dpr);
                } else {
                    log::warn!("canvas context not ready, skipping frame");
                    return;
                }
            }
            if let Some(ref mut target) = self.target {
                renderer::render(&self.state, &self.settings, target);
            }
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60_000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Handle the Running -> GameOver edge: persist best, show overlay
        fn handle_phase_transition(&mut self) {
            let phase = self.state.phase;
            if phase == self.last_phase {
                return;
            }
            if phase == GamePhase::GameOver {
                let score = self.state.score();
                if score > self.best {
                    self.best = score;
                    score::save_best(self.best);
                }
                show_game_over(score, self.best);
            }
            self.last_phase = phase;
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(&document, "hud-score", &format!("{}s", self.state.score()));
            set_text(&document, "hud-best", &format!("{}s", self.best));

            if self.settings.show_fps {
                set_text(&document, "hud-fps", &self.fps.to_string());
            }
        }
    }

    /// Width of the element the stage should fill, in CSS pixels
    fn stage_width(canvas: &HtmlCanvasElement) -> Option<f32> {
        let document = web_sys::window()?.document()?;
        let element = document
            .get_element_by_id("stage")
            .or_else(|| canvas.parent_element())?;
        Some(element.get_bounding_client_rect().width() as f32)
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show_game_over(score: u32, best: u32) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        set_text(&document, "final-score", &format!("{score}s"));
        set_text(&document, "final-best", &format!("{best}s"));
        if let Some(el) = document.get_element_by_id("game-over") {
            let _ = el.set_attribute("class", "");
        }
    }

    fn hide_game_over() {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dodge Jump starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let best = score::load_best();

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas, settings, best)));
        game.borrow_mut().apply_resize();

        log::info!("Session initialized with seed: {seed}");

        setup_keyboard(game.clone());
        setup_touch(game.clone());
        setup_resize(game.clone());

        game.borrow_mut().animating = true;
        request_animation_frame(game);

        log::info!("Dodge Jump running!");
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();

            g.update(time);
            g.render();
            g.handle_phase_transition();
            g.update_hud();

            // Game over parks the loop; restart re-enters it
            let running = g.state.phase == GamePhase::Running;
            g.animating = running;
            running
        };

        if keep_going {
            request_animation_frame(game);
        }
    }

    /// Consume a queued restart intent: fresh session, and kick the frame
    /// loop back off if game over had parked it
    fn process_restart(game: &Rc<RefCell<Game>>) {
        let resume = {
            let mut g = game.borrow_mut();
            if !g.intents.take_restart() {
                return;
            }
            let seed = js_sys::Date::now() as u64;
            g.restart(seed);
            let resume = !g.animating;
            g.animating = true;
            resume
        };
        hide_game_over();
        if resume {
            request_animation_frame(game.clone());
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keydown: arrows are level-triggered; jump/dash are one-shots and
        // must ignore key auto-repeat to stay edge-triggered
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                {
                    let mut g = game.borrow_mut();
                    match event.code().as_str() {
                        "ArrowLeft" => g.intents.left = true,
                        "ArrowRight" => g.intents.right = true,
                        "Space" => {
                            if !event.repeat() {
                                g.intents.queue_jump();
                            }
                            event.prevent_default();
                        }
                        "ShiftLeft" | "ShiftRight" => {
                            if !event.repeat() {
                                g.intents.queue_dash();
                            }
                        }
                        "Enter" => g.intents.queue_restart(),
                        _ => {}
                    }
                }
                process_restart(&game);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup releases the held directions
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" => g.intents.left = false,
                    "ArrowRight" => g.intents.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// One-hand touch layout: stage halves steer, buttons jump and dash,
    /// any tap restarts once the session is over
    fn setup_touch(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Steering via pointer position on the canvas
        {
            let game = game.clone();
            let canvas = game.borrow().canvas.clone();
            let canvas_for_rect = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::GameOver {
                        g.intents.queue_restart();
                    } else {
                        let rect = canvas_for_rect.get_bounding_client_rect();
                        let x = event.client_x() as f64 - rect.left();
                        if x < rect.width() / 2.0 {
                            g.intents.left = true;
                            g.intents.right = false;
                        } else {
                            g.intents.right = true;
                            g.intents.left = false;
                        }
                    }
                }
                process_restart(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Releasing the pointer stops steering
        {
            let game = game.clone();
            let canvas = game.borrow().canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.intents.left = false;
                g.intents.right = false;
            });
            for kind in ["pointerup", "pointercancel", "pointerleave"] {
                let _ = canvas
                    .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Jump button
        if let Some(btn) = document.get_element_by_id("jump-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                event.stop_propagation();
                {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::GameOver {
                        g.intents.queue_restart();
                    } else {
                        g.intents.queue_jump();
                    }
                }
                process_restart(&game);
            });
            let _ =
                btn.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Dash button
        if let Some(btn) = document.get_element_by_id("dash-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                event.stop_propagation();
                {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::GameOver {
                        g.intents.queue_restart();
                    } else {
                        g.intents.queue_dash();
                    }
                }
                process_restart(&game);
            });
            let _ =
                btn.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Refit the stage whenever the host layout changes. Safe to interleave
    /// with frames: it only runs between rAF callbacks.
    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().apply_resize();
        });
        for kind in ["resize", "orientationchange"] {
            let _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dodge_jump::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Dodge Jump (native) starting...");
    log::info!("Native mode has no GUI - run with `trunk serve` for the web version");

    // Headless smoke run: scripted input over simulated frames
    let mut state = GameState::new(0x0dd9e);
    let dt = 1.0 / 60.0;
    let mut frames = 0u32;

    while state.phase == GamePhase::Running && frames < 60 * 60 {
        let input = TickInput {
            right: frames % 240 < 120,
            left: frames % 240 >= 120,
            jump: frames % 90 == 0,
            dash: frames % 200 == 0,
        };
        tick(&mut state, &input, dt);
        frames += 1;
    }

    log::info!(
        "Smoke run finished: {:?} after {}s with {} balls live",
        state.phase,
        state.score(),
        state.balls.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
