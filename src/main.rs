//! Asteroid Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, Window};

    use asteroid_dodge::audio::AudioManager;
    use asteroid_dodge::platform::{
        FrameId, FrameLoop, FrameScheduler, KeyValueStore, LocalStore, LoopMode,
    };
    use asteroid_dodge::renderer::{CanvasSurface, draw_scene};
    use asteroid_dodge::sim::{Canvas, GamePhase};
    use asteroid_dodge::{FrameOutcome, GameResult, Session, Settings};

    const START_CONTAINER: &str = ".start-container";
    const START_BTN: &str = "start-btn";
    const OK_BTN: &str = "ok-btn";
    const RESULT_MESSAGE: &str = "result-message";

    /// requestAnimationFrame driven by one persistent callback
    struct WindowScheduler {
        window: Window,
        callback: Option<Closure<dyn FnMut(f64)>>,
    }

    impl FrameScheduler for WindowScheduler {
        fn request_frame(&mut self) -> Option<FrameId> {
            let callback = self.callback.as_ref()?;
            self.window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .ok()
        }

        fn cancel_frame(&mut self, id: FrameId) {
            let _ = self.window.cancel_animation_frame(id);
        }
    }

    /// Everything the browser callbacks share
    struct App {
        session: Session<LocalStore, AudioManager>,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        document: Document,
        frames: FrameLoop,
        scheduler: WindowScheduler,
    }

    impl App {
        fn now(&self) -> f64 {
            self.scheduler
                .window
                .performance()
                .map(|p| p.now())
                .unwrap_or_else(js_sys::Date::now)
        }

        fn render(&mut self) {
            draw_scene(self.session.state(), &mut self.surface);
        }

        fn on_frame(&mut self, time: f64) {
            if self.frames.fired().is_none() {
                return;
            }

            match self.session.frame(time) {
                FrameOutcome::GameOver(result) => {
                    self.render();
                    self.frames.stop(&mut self.scheduler);
                    self.show_result(&result);
                }
                FrameOutcome::Frozen => {
                    self.frames.stop(&mut self.scheduler);
                }
                FrameOutcome::Idle | FrameOutcome::Running => {
                    self.render();
                    self.frames.schedule_next(&mut self.scheduler);
                }
            }
        }

        fn on_start(&mut self) {
            let now = self.now();
            if !self.session.start(now) {
                return;
            }
            set_visible(self.start_container().as_ref(), false);
            self.frames.start(&mut self.scheduler, LoopMode::Game);
            log::info!("Game started");
        }

        fn on_ok(&mut self) {
            if !self.session.acknowledge() {
                return;
            }
            set_visible(self.document.get_element_by_id(RESULT_MESSAGE).as_ref(), false);
            set_visible(self.document.get_element_by_id(OK_BTN).as_ref(), false);
            set_visible(self.document.get_element_by_id(START_BTN).as_ref(), true);
            self.frames.start(&mut self.scheduler, LoopMode::Starfield);
        }

        fn on_resize(&mut self) {
            let Some(canvas) = fit_canvas(&self.scheduler.window, &self.canvas) else {
                return;
            };
            let was_running = self.session.phase() == GamePhase::Running;
            self.session.resize(canvas);
            self.render();

            if was_running {
                log::info!("Viewport resized mid-game; back to the start screen");
                set_visible(self.start_container().as_ref(), true);
                self.frames.start(&mut self.scheduler, LoopMode::Starfield);
            }
        }

        fn on_key(&mut self, event: &web_sys::KeyboardEvent) {
            let moved = self.session.key(&event.key()) || self.session.key_code(event.key_code());
            if moved {
                event.prevent_default();
            }
        }

        fn show_result(&self, result: &GameResult) {
            set_visible(self.document.get_element_by_id(START_BTN).as_ref(), false);
            if let Some(message) = self.document.get_element_by_id(RESULT_MESSAGE) {
                message.set_inner_html(&result.message().replace('\n', "<br/>"));
                set_visible(Some(&message), true);
            }
            set_visible(self.document.get_element_by_id(OK_BTN).as_ref(), true);
            set_visible(self.start_container().as_ref(), true);
        }

        fn start_container(&self) -> Option<Element> {
            self.document.query_selector(START_CONTAINER).ok().flatten()
        }
    }

    fn set_visible(el: Option<&Element>, visible: bool) {
        if let Some(el) = el {
            let display = if visible { "display: flex" } else { "display: none" };
            let _ = el.set_attribute("style", display);
        }
    }

    /// Size the canvas to the window; returns the new play area
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> Option<Canvas> {
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        Some(Canvas::new(width as f32, height as f32))
    }

    /// Result text and OK button live in the start container, hidden until needed
    fn ensure_result_widgets(document: &Document) -> Result<(), JsValue> {
        let container = document
            .query_selector(START_CONTAINER)?
            .ok_or_else(|| JsValue::from_str("no start container"))?;

        if document.get_element_by_id(RESULT_MESSAGE).is_none() {
            let message = document.create_element("p")?;
            message.set_id(RESULT_MESSAGE);
            set_visible(Some(&message), false);
            container.append_child(&message)?;
        }
        if document.get_element_by_id(OK_BTN).is_none() {
            let ok = document.create_element("button")?;
            ok.set_id(OK_BTN);
            ok.set_text_content(Some("OK"));
            set_visible(Some(&ok), false);
            container.append_child(&ok)?;
        }
        Ok(())
    }

    fn on_click(
        document: &Document,
        id: &str,
        app: &Rc<RefCell<App>>,
        handler: fn(&mut App),
    ) -> Result<(), JsValue> {
        let btn = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no #{id}")))?;
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            handler(&mut app.borrow_mut());
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_input_handlers(window: &Window, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                app.borrow_mut().on_key(&event);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().on_resize();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Asteroid Dodge starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        let play_area = fit_canvas(&window, &canvas)
            .ok_or_else(|| JsValue::from_str("window has no size"))?;

        let mut store = LocalStore::new();
        let settings = Settings::load(&store);
        if store.get(Settings::STORAGE_KEY).is_none() {
            // Seed LocalStorage so the tunables can be edited by hand
            settings.save(&mut store);
        }
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let audio = AudioManager::new(&settings);
        let session = Session::new(play_area, settings, seed, store, audio);
        log::info!("Game initialized with seed: {}", seed);

        ensure_result_widgets(&document)?;

        let app = Rc::new(RefCell::new(App {
            session,
            surface: CanvasSurface::new(ctx),
            canvas,
            document: document.clone(),
            frames: FrameLoop::new(),
            scheduler: WindowScheduler {
                window: window.clone(),
                callback: None,
            },
        }));

        // The frame callback owns a handle to the app for the page's lifetime
        {
            let handle = app.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                handle.borrow_mut().on_frame(time);
            });
            app.borrow_mut().scheduler.callback = Some(callback);
        }

        setup_input_handlers(&window, &app)?;
        on_click(&document, START_BTN, &app, App::on_start)?;
        on_click(&document, OK_BTN, &app, App::on_ok)?;

        // Start screen
        {
            let mut guard = app.borrow_mut();
            let app = &mut *guard;
            set_visible(app.start_container().as_ref(), true);
            app.frames.start(&mut app.scheduler, LoopMode::Starfield);
        }

        log::info!("Asteroid Dodge running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Headless run: a seeded game where the player never moves
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use asteroid_dodge::consts::SIM_DT;
    use asteroid_dodge::platform::MemoryStore;
    use asteroid_dodge::sim::Canvas;
    use asteroid_dodge::{FrameOutcome, NullAudio, Session, Settings, format_duration};

    /// Ten simulated minutes
    const MAX_FRAMES: u32 = 36_000;

    env_logger::init();
    log::info!("Asteroid Dodge (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let settings = match std::env::var("ASTEROID_DODGE_SETTINGS") {
        Ok(json) => Settings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring bad settings: {}", e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    };
    let seed = settings.seed.unwrap_or(42);

    let mut session = Session::new(
        Canvas::new(800.0, 600.0),
        settings,
        seed,
        MemoryStore::new(),
        NullAudio,
    );

    let frame_ms = SIM_DT as f64 * 1000.0;
    let mut now = 0.0;
    session.start(now);

    for _ in 0..MAX_FRAMES {
        now += frame_ms;
        if let FrameOutcome::GameOver(result) = session.frame(now) {
            println!("Seed {} survived {}", seed, format_duration(result.duration_ms));
            return;
        }
    }

    println!(
        "Seed {} still alive after {}",
        seed,
        format_duration(session.state().elapsed_ms() as u64)
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
