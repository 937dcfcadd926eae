//! Neon Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use neon_dodge::engine::{AnimationFrameLoop, Callbacks, Engine, EngineParts};
    use neon_dodge::input::{Direction, InputEvent};
    use neon_dodge::persistence::LocalStore;
    use neon_dodge::platform::{BrowserHost, format_thousands};
    use neon_dodge::renderer::RenderState;
    use neon_dodge::sim::PcgSource;
    use neon_dodge::{EngineError, Settings, Tuning};

    type SharedEngine = Rc<RefCell<Engine>>;

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    /// CSS size of the canvas element, never zero
    fn canvas_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        (
            canvas.client_width().max(1) as u32,
            canvas.client_height().max(1) as u32,
        )
    }

    /// Horizontal position relative to the canvas' left edge
    fn local_x(canvas: &HtmlCanvasElement, client_x: i32) -> f32 {
        client_x as f32 - canvas.get_bounding_client_rect().left() as f32
    }

    fn haptics_label(enabled: bool) -> &'static str {
        if enabled { "Haptics: ON" } else { "Haptics: OFF" }
    }

    fn hud_callbacks() -> Callbacks {
        Callbacks {
            on_score_update: Box::new(|score, best, level| {
                set_text("score", &format_thousands(score));
                set_text("best", &format_thousands(best));
                set_text("level", &level.to_string());
            }),
            on_game_over: Box::new(|summary| {
                set_text("final-score", &format_thousands(summary.final_score));
                set_text("final-best", &format_thousands(summary.best));
                set_hidden("new-best", !summary.is_new_best);
                set_hidden("game-over", false);
                set_hidden("hud", true);
            }),
            on_game_start: Box::new(|| {
                set_hidden("start-screen", true);
                set_hidden("game-over", true);
                set_hidden("hud", false);
                set_text("score", "0");
                set_text("level", "1");
            }),
        }
    }

    pub async fn run() -> Result<(), EngineError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Neon Dodge starting...");

        let window = web_sys::window()
            .ok_or_else(|| EngineError::SurfaceUnavailable("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| EngineError::SurfaceUnavailable("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| EngineError::SurfaceUnavailable("no #canvas element".into()))?
            .dyn_into()
            .map_err(|_| EngineError::SurfaceUnavailable("#canvas is not a canvas".into()))?;

        let (width, height) = canvas_size(&canvas);
        let dpr = window.device_pixel_ratio() as f32;
        let render_state = RenderState::for_canvas(canvas.clone(), width, height, dpr).await?;

        let store = LocalStore;
        let settings = Settings::load(&store, BrowserHost::prefers_reduced_motion());
        let seed = js_sys::Date::now() as u64;
        log::info!("Seed: {}", seed);

        let frames = AnimationFrameLoop::new();
        let engine = Rc::new(RefCell::new(Engine::new(EngineParts {
            width,
            height,
            tuning: Tuning::default(),
            settings,
            sink: Box::new(render_state),
            store: Box::new(store),
            host: Box::new(BrowserHost),
            rng: Box::new(PcgSource::new(seed)),
            ticker: Box::new(frames.clone()),
            callbacks: hud_callbacks(),
        })));

        {
            let weak = Rc::downgrade(&engine);
            frames.set_handler(move |now| {
                if let Some(engine) = weak.upgrade() {
                    engine.borrow_mut().frame(now);
                }
            });
        }

        let best = engine.borrow().best_score();
        set_text("best", &format_thousands(best));
        set_text("haptics-btn", haptics_label(settings.haptics_enabled));
        set_hidden("loading", true);
        set_hidden("start-screen", false);

        setup_input_handlers(&canvas, engine.clone());
        setup_resize(&canvas, engine.clone());
        setup_buttons(engine.clone());

        if engine.borrow_mut().host_ready() {
            log::info!("Running inside a mini-app host");
        }
        set_hidden("favorite-btn", !engine.borrow().is_mini_app());
        log::info!("Neon Dodge ready!");
        Ok(())
    }

    fn listen<E: FromWasmAbi + 'static>(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            log::warn!("Failed to listen for {event}: {e:?}");
        }
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, engine: SharedEngine) {
        // Keyboard
        if let Some(window) = web_sys::window() {
            let engine = engine.clone();
            listen(&window, "keydown", move |event: KeyboardEvent| {
                if let Some(direction) = Direction::from_key(&event.key()) {
                    event.prevent_default();
                    engine.borrow_mut().handle_input(InputEvent::Key(direction));
                }
            });
        }

        // Mouse drag
        {
            let engine = engine.clone();
            let c = canvas.clone();
            listen(canvas, "mousedown", move |event: MouseEvent| {
                let x = local_x(&c, event.client_x());
                engine.borrow_mut().handle_input(InputEvent::PointerDown { x });
            });
        }
        {
            let engine = engine.clone();
            let c = canvas.clone();
            listen(canvas, "mousemove", move |event: MouseEvent| {
                let x = local_x(&c, event.client_x());
                engine.borrow_mut().handle_input(InputEvent::PointerMove { x });
            });
        }
        for name in ["mouseup", "mouseleave"] {
            let engine = engine.clone();
            listen(canvas, name, move |_event: MouseEvent| {
                engine.borrow_mut().handle_input(InputEvent::PointerUp);
            });
        }

        // Touch drag
        {
            let engine = engine.clone();
            let c = canvas.clone();
            listen(canvas, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let x = local_x(&c, touch.client_x());
                    engine.borrow_mut().handle_input(InputEvent::TouchStart { x });
                }
            });
        }
        {
            let engine = engine.clone();
            let c = canvas.clone();
            listen(canvas, "touchmove", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let x = local_x(&c, touch.client_x());
                    engine.borrow_mut().handle_input(InputEvent::TouchMove { x });
                }
            });
        }
        for name in ["touchend", "touchcancel"] {
            let engine = engine.clone();
            listen(canvas, name, move |event: TouchEvent| {
                event.prevent_default();
                engine.borrow_mut().handle_input(InputEvent::TouchEnd);
            });
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, engine: SharedEngine) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let c = canvas.clone();
        let w = window.clone();
        listen(&window, "resize", move |_event: web_sys::Event| {
            let (width, height) = canvas_size(&c);
            let mut engine = engine.borrow_mut();
            // Zooming or moving to another display changes the ratio
            engine.set_pixel_ratio(w.device_pixel_ratio() as f32);
            engine.resize(width, height);
        });
    }

    fn on_click(id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        match document().and_then(|d| d.get_element_by_id(id)) {
            Some(el) => listen(&el, "click", handler),
            None => log::debug!("No #{id} button"),
        }
    }

    fn setup_buttons(engine: SharedEngine) {
        {
            let engine = engine.clone();
            on_click("start-btn", move |_| {
                engine.borrow_mut().start();
            });
        }
        {
            let engine = engine.clone();
            on_click("restart-btn", move |_| {
                engine.borrow_mut().restart();
            });
        }
        {
            let engine = engine.clone();
            on_click("share-btn", move |_| {
                set_text("share-btn", "Sharing...");
                engine.borrow_mut().share_score(|outcome| {
                    set_text("share-btn", if outcome.success { "Copied!" } else { "Share" });
                });
            });
        }
        {
            let engine = engine.clone();
            on_click("favorite-btn", move |_| {
                if engine.borrow_mut().add_to_favorites() {
                    set_hidden("favorite-btn", true);
                }
            });
        }
        {
            let engine = engine.clone();
            on_click("reset-best-btn", move |_| {
                engine.borrow_mut().reset_best_score();
                set_text("best", "0");
            });
        }
        {
            let engine = engine.clone();
            on_click("haptics-btn", move |_| {
                let mut e = engine.borrow_mut();
                let mut settings = e.settings();
                settings.haptics_enabled = !settings.haptics_enabled;
                e.set_settings(settings);
                set_text("haptics-btn", haptics_label(settings.haptics_enabled));
            });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {e}");
        web_sys::console::error_1(&format!("Neon Dodge failed to start: {e}").into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Dodge (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let summary = headless::autoplay(seed, headless::MAX_TICKS);
    println!(
        "Seed {}: score {} at level {} after {} ticks{}",
        seed,
        summary.score,
        summary.level,
        summary.ticks,
        if summary.survived { " (survived)" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use neon_dodge::engine::{Callbacks, Engine, EngineParts, ManualTicks};
    use neon_dodge::input::{Direction, InputEvent};
    use neon_dodge::persistence::MemoryStore;
    use neon_dodge::platform::NoHost;
    use neon_dodge::renderer::NullSink;
    use neon_dodge::sim::{GameState, PcgSource, RunStatus};
    use neon_dodge::{Settings, Tuning};

    /// Five minutes at 60 fps
    pub const MAX_TICKS: u64 = 60 * 60 * 5;
    /// How far above the avatar the autopilot looks for threats
    const LOOKAHEAD: f32 = 220.0;

    pub struct Summary {
        pub score: u64,
        pub level: u32,
        pub ticks: u64,
        pub survived: bool,
    }

    /// Play one run with a simple dodging autopilot
    pub fn autoplay(seed: u64, max_ticks: u64) -> Summary {
        let mut engine = Engine::new(EngineParts {
            width: 400,
            height: 800,
            tuning: Tuning::default(),
            settings: Settings::default(),
            sink: Box::new(NullSink::default()),
            store: Box::new(MemoryStore::new()),
            host: Box::new(NoHost),
            rng: Box::new(PcgSource::new(seed)),
            ticker: Box::new(ManualTicks::new()),
            callbacks: Callbacks {
                on_game_over: Box::new(|summary| {
                    log::info!(
                        "Game over callback: score {}, best {}, new best {}",
                        summary.final_score,
                        summary.best,
                        summary.is_new_best
                    )
                }),
                ..Default::default()
            },
        });

        engine.start();
        while engine.status() == RunStatus::Playing && engine.state().elapsed_ticks < max_ticks {
            if let Some(direction) = steer(engine.state()) {
                engine.handle_input(InputEvent::Key(direction));
            }
            engine.step(1.0);
        }

        let state = engine.state();
        Summary {
            score: state.score,
            level: state.level,
            ticks: state.elapsed_ticks,
            survived: state.status == RunStatus::Playing,
        }
    }

    /// Dodge toward the roomier side of the nearest obstacle in our column
    fn steer(state: &GameState) -> Option<Direction> {
        let avatar = &state.avatar;
        let (left, right) = (avatar.pos.x, avatar.pos.x + avatar.size.x);
        let threat = state
            .obstacles
            .iter()
            .filter(|o| o.bottom() < avatar.pos.y + avatar.size.y)
            .filter(|o| avatar.pos.y - o.bottom() < LOOKAHEAD)
            .filter(|o| o.pos.x < right && o.pos.x + o.size.x > left)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

        let room_left = threat.pos.x;
        let room_right = state.field.x - (threat.pos.x + threat.size.x);
        Some(if room_left > room_right {
            Direction::Left
        } else {
            Direction::Right
        })
    }
}
