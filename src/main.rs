//! Starfield Launch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

    use starfield_launch::sim::{GameEvent, autopilot};
    use starfield_launch::view::{self, DrawList, colors};
    use starfield_launch::{Director, KeyBindings, KeyState, Tuning};

    /// Longest frame delta fed to the simulation (ms)
    const MAX_FRAME_MS: f64 = 100.0;

    /// Game instance holding all state
    struct Game {
        director: Director,
        keys: KeyState,
        bindings: KeyBindings,
        ctx: CanvasRenderingContext2d,
        starfield: Option<HtmlImageElement>,
        last_time: f64,
        /// Demo mode - autopilot plays the game
        idle_mode: bool,
    }

    impl Game {
        /// Run one simulation frame
        fn update(&mut self, time: f64) {
            let delta = if self.last_time > 0.0 {
                (time - self.last_time).min(MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;

            let input = match (self.idle_mode, self.director.gameplay()) {
                (true, Some(state)) => autopilot(state),
                _ => self.keys.poll(&self.bindings),
            };
            self.director.frame(&input, delta as f32);

            if let Some(state) = self.director.gameplay() {
                for event in &state.events {
                    if let GameEvent::EnemyHit { score, .. } = event {
                        log::info!("Hit! score {}", score);
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            let Some(state) = self.director.gameplay() else {
                return;
            };
            let list = view::draw_list(state);
            if let Err(e) = self.draw(&list) {
                log::warn!("Render error: {:?}", e);
            }
        }

        fn draw(&self, list: &DrawList) -> Result<(), JsValue> {
            let ctx = &self.ctx;
            let bg = &list.background;

            ctx.set_fill_style_str(&colors::BACKGROUND.to_css());
            ctx.fill_rect(
                bg.bounds.x as f64,
                bg.bounds.y as f64,
                bg.bounds.width as f64,
                bg.bounds.height as f64,
            );

            if let Some(img) = self.starfield.as_ref().filter(|i| i.complete() && i.natural_width() > 0) {
                let tile_w = img.natural_width() as f32;
                let tile_h = img.natural_height() as f32;
                let mut y = bg.bounds.y;
                while y < bg.bounds.bottom() {
                    let mut x = bg.first_tile_x(tile_w);
                    while x < bg.bounds.right() {
                        ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            x as f64,
                            y as f64,
                            tile_w as f64,
                            tile_h as f64,
                        )?;
                        x += tile_w;
                    }
                    y += tile_h;
                }
            }

            for rect in &list.rects {
                ctx.set_fill_style_str(&rect.color.to_css());
                ctx.fill_rect(
                    rect.bounds.x as f64,
                    rect.bounds.y as f64,
                    rect.bounds.width as f64,
                    rect.bounds.height as f64,
                );
            }

            ctx.set_text_baseline("top");
            for label in &list.labels {
                ctx.set_font(&format!("{}px sans-serif", label.size_px));
                ctx.set_fill_style_str(&label.color.to_css());
                ctx.fill_text(&label.text, label.x as f64, label.y as f64)?;
            }
            Ok(())
        }
    }

    fn load_image(url: &str) -> Option<HtmlImageElement> {
        let img = HtmlImageElement::new().ok()?;
        let onerror = {
            let url = url.to_string();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::warn!("Failed to load {} - drawing plain background", url);
            })
        };
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
        img.set_src(url);
        Some(img)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Starfield Launch starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let tuning = Tuning::default();
        canvas.set_width(tuning.screen_width as u32);
        canvas.set_height(tuning.screen_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let mut director = Director::boot(tuning, seed);
        log::info!("Game initialized with seed: {}", seed);

        let mut starfield = None;
        for asset in director.take_pending_assets() {
            log::info!("Loading texture '{}' from {}", asset.key, asset.url);
            starfield = load_image(asset.url);
        }

        let game = Rc::new(RefCell::new(Game {
            director,
            keys: KeyState::new(),
            bindings: KeyBindings::default(),
            ctx,
            starfield,
            last_time: 0.0,
            idle_mode: false,
        }));

        setup_input_handlers(game.clone())?;
        request_animation_frame(game);

        log::info!("Starfield Launch running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if key.starts_with("Arrow") {
                    event.prevent_default();
                }
                if (key == "i" || key == "I") && !event.repeat() {
                    g.idle_mode = !g.idle_mode;
                    log::info!("Idle mode: {}", g.idle_mode);
                }
                g.keys.press(&key);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.release(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur - keyups are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.release_all();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window; stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run options
#[cfg(not(target_arch = "wasm32"))]
struct RunOptions {
    tuning_path: Option<std::path::PathBuf>,
    seed: u64,
    frames: u64,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_args() -> Result<RunOptions, Box<dyn std::error::Error>> {
    let mut opts = RunOptions {
        tuning_path: None,
        seed: 1,
        // 60 seconds at 60 Hz
        frames: 3600,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                opts.seed = args.next().ok_or("--seed needs a value")?.parse()?;
            }
            "--frames" => {
                opts.frames = args.next().ok_or("--frames needs a value")?.parse()?;
            }
            path => opts.tuning_path = Some(path.into()),
        }
    }
    Ok(opts)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use starfield_launch::sim::{GameEvent, autopilot};
    use starfield_launch::{Director, Tuning};

    env_logger::init();
    log::info!("Starfield Launch (native) starting...");
    log::info!("Native mode runs headless with the autopilot - serve the wasm build to play");

    let opts = parse_args()?;
    let tuning = match &opts.tuning_path {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut director = Director::boot(tuning, opts.seed);
    for asset in director.take_pending_assets() {
        log::debug!("Skipping texture '{}' ({}) in headless mode", asset.key, asset.url);
    }

    let delta_ms = 1000.0 / 60.0;
    let mut hits = 0u32;
    let mut launches = 0u32;
    let mut escaped = 0u32;

    for _ in 0..opts.frames {
        let input = director.gameplay().map(autopilot).unwrap_or_default();
        director.frame(&input, delta_ms);

        if let Some(state) = director.gameplay() {
            for event in &state.events {
                match event {
                    GameEvent::EnemyHit { .. } => hits += 1,
                    GameEvent::LaunchStarted { .. } => launches += 1,
                    GameEvent::EnemyDespawned { .. } => escaped += 1,
                    _ => {}
                }
            }
        }
    }

    if let Some(state) = director.gameplay() {
        log::info!(
            "Run finished after {:.1}s: score {}, {} hits, {} launches, {} escaped",
            state.elapsed_ms / 1000.0,
            state.score,
            hits,
            launches,
            escaped
        );
        println!("{}", serde_json::to_string_pretty(state)?);
    }

    Ok(())
}
