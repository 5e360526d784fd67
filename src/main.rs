//! Harmony Blocks entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use harmony_blocks::render::{DrawCommand, TextAlign};
    use harmony_blocks::sim::Direction;
    use harmony_blocks::{GameConfig, Intent, RoundController};

    /// Game instance holding all state
    struct Game {
        controller: RoundController,
        ctx: CanvasRenderingContext2d,
        last_game_over: bool,
    }

    impl Game {
        /// Run one simulation step
        fn update(&mut self, time: f64) {
            let report = self.controller.tick(time);
            if report.game_over && !self.last_game_over {
                log::info!("Final score: {}", self.controller.state().score());
            }
            self.last_game_over = report.game_over;
        }

        /// Replay this frame's draw commands on the canvas
        fn render(&self) {
            let ctx = &self.ctx;
            for cmd in self.controller.frame() {
                match cmd {
                    DrawCommand::Clear { width, height } => {
                        ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
                    }
                    DrawCommand::Background {
                        width,
                        height,
                        top,
                        bottom,
                    } => {
                        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height as f64);
                        let _ = gradient.add_color_stop(0.0, top);
                        let _ = gradient.add_color_stop(1.0, bottom);
                        ctx.set_fill_style_canvas_gradient(&gradient);
                        ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
                    }
                    DrawCommand::FillRect { rect, color } => {
                        ctx.set_fill_style_str(color);
                        ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
                    }
                    DrawCommand::StrokeRect {
                        rect,
                        color,
                        line_width,
                    } => {
                        ctx.set_stroke_style_str(color);
                        ctx.set_line_width(line_width as f64);
                        ctx.stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
                    }
                    DrawCommand::Text {
                        text,
                        x,
                        y,
                        size,
                        color,
                        align,
                    } => {
                        ctx.set_fill_style_str(color);
                        ctx.set_font(&format!("{}px Arial", size));
                        ctx.set_text_align(match align {
                            TextAlign::Left => "left",
                            TextAlign::Center => "center",
                        });
                        let _ = ctx.fill_text(&text, x as f64, y as f64);
                    }
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Harmony Blocks starting...");

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("No canvas element")
            .dyn_into()
            .expect("Element is not a canvas");

        let config = GameConfig::default();
        canvas.set_width(config.canvas_width() as u32);
        canvas.set_height(config.canvas_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("No 2d context")
            .dyn_into()
            .expect("Context is not 2d");

        let seed = js_sys::Date::now() as u64;
        let controller = match RoundController::new(config, seed) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Bad config: {}", e);
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game {
            controller,
            ctx,
            last_game_over: false,
        }));

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Harmony Blocks running!");
    }

    /// Canvas-space x of a client coordinate
    fn canvas_x(canvas: &HtmlCanvasElement, client_x: i32) -> f32 {
        let rect = canvas.get_bounding_client_rect();
        client_x as f32 - rect.left() as f32
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - absolute position
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let x = canvas_x(&canvas_clone, event.client_x());
                game.borrow_mut().controller.post(Intent::PointerAt(x));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let x = canvas_x(&canvas_clone, touch.client_x());
                    game.borrow_mut().controller.post(Intent::TouchAt(x));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.controller.post(Intent::Step(Direction::Left)),
                    "ArrowRight" => g.controller.post(Intent::Step(Direction::Right)),
                    " " => {
                        event.prevent_default();
                        g.controller.post(Intent::TogglePause);
                    }
                    "Enter" => g.controller.post(Intent::DismissInstructions),
                    "h" | "H" => g.controller.post(Intent::ShowInstructions),
                    "r" | "R" => g.controller.post(Intent::Restart),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click dismisses the instructions
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut()
                    .controller
                    .post(Intent::DismissInstructions);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Harmony Blocks (native) starting...");
    log::info!("Native mode runs a headless autoplay - serve the wasm build for the real game");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    match autoplay(seed) {
        Ok(frame) => println!("{}", frame),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a scripted run and return the last frame as JSON
///
/// Tracks the outline with the pointer, but lands a cell off on every
/// third round so the run eventually ends.
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(seed: u64) -> Result<String, Box<dyn std::error::Error>> {
    use harmony_blocks::{GameConfig, Intent, RoundController};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_TICKS: u64 = 1_000_000;

    let mut controller = RoundController::new(GameConfig::default(), seed)?;
    controller.post(Intent::DismissInstructions);

    let mut now = 0.0;
    let mut ticks = 0;
    while ticks < MAX_TICKS {
        let state = controller.state();
        let outline = &state.outline;
        let miss = state.rounds % 3 == 0;
        let target = match (miss, outline.column()) {
            (false, _) => outline.x() + outline.size / 2.0,
            (true, 0) => outline.x() + outline.size * 1.5,
            (true, _) => outline.x() - outline.size / 2.0,
        };
        controller.post(Intent::PointerAt(target));

        now += FRAME_MS;
        ticks += 1;
        if controller.tick(now).game_over {
            break;
        }
    }

    let state = controller.state();
    log::info!(
        "Autoplay finished after {} ticks: score {}, level {}, {} rounds",
        ticks,
        state.score(),
        state.level(),
        state.rounds
    );

    Ok(serde_json::to_string_pretty(&controller.frame())?)
}
