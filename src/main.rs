//! Shipyard Arcade entry point
//!
//! In the browser this wires DOM events to the [`Game`] and drives it from
//! `requestAnimationFrame`. Natively it flies the ship headlessly on autopilot
//! into a software frame buffer.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlImageElement, KeyboardEvent, Window};

    use shipyard_arcade::consts::*;
    use shipyard_arcade::renderer::CanvasSurface;
    use shipyard_arcade::sim::{GameEvent, Viewport, keys};
    use shipyard_arcade::{Error, Game, Result, Settings};

    /// Everything the callbacks share
    struct App {
        game: Game,
        canvas: HtmlCanvasElement,
        /// Set once the sprite has loaded; nothing is drawn before that
        surface: Option<CanvasSurface>,
    }

    impl App {
        /// Match the canvas to the window and tell the game
        fn resize(&mut self, window: &Window) {
            let (w, h) = window_size(window);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.game.on_resize(w, h);
        }
    }

    fn window_size(window: &Window) -> (f32, f32) {
        let dim = |v: std::result::Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    /// Keys whose default browser action (scrolling) we suppress
    fn is_game_key(key: &str) -> bool {
        key == keys::SHOT || keys::ARROWS.contains(&key)
    }

    pub fn run() -> Result<()> {
        log::info!("Shipyard Arcade starting...");

        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let document = window.document().ok_or(Error::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| Error::MissingCanvas(CANVAS_ID.to_owned()))?
            .dyn_into()
            .map_err(|_| Error::MissingCanvas(CANVAS_ID.to_owned()))?;

        let settings = Settings::load();
        let sprite_url = settings.sprite_url.clone();
        let (w, h) = window_size(&window);
        let game = Game::new(settings, Viewport::new(w, h))?;

        let app = Rc::new(RefCell::new(App {
            game,
            canvas,
            surface: None,
        }));
        app.borrow_mut().resize(&window);
        log::info!("Viewport {}x{}", w, h);

        setup_input_handlers(&window, app.clone())?;
        setup_resize_handler(&window, app.clone())?;
        setup_blur_handler(&window, app.clone())?;

        // The loop only starts once the sprite is ready
        load_sprite(&sprite_url, app)?;

        Ok(())
    }

    fn load_sprite(url: &str, app: Rc<RefCell<App>>) -> Result<()> {
        let img = HtmlImageElement::new()?;

        {
            let img_clone = img.clone();
            let closure = Closure::once(move |_event: web_sys::Event| {
                let surface = {
                    let a = app.borrow();
                    CanvasSurface::new(&a.canvas, img_clone)
                };
                match surface {
                    Ok(surface) => {
                        app.borrow_mut().surface = Some(surface);
                        log::info!("Sprite loaded, starting frame loop");
                        request_animation_frame(app);
                    }
                    Err(e) => log::error!("Cannot draw: {}", e),
                }
            });
            img.set_onload(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        {
            let url = url.to_owned();
            let closure = Closure::once(move |_event: web_sys::Event| {
                log::error!("Failed to load sprite from {}", url);
            });
            img.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        img.set_src(url);
        Ok(())
    }

    fn setup_input_handlers(window: &Window, app: Rc<RefCell<App>>) -> Result<()> {
        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if is_game_key(&key) {
                    event.prevent_default();
                }
                app.borrow_mut().game.on_key_down(&key);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.on_key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize_handler(window: &Window, app: Rc<RefCell<App>>) -> Result<()> {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize(&window_clone);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Keyups are never delivered while the window is unfocused
    fn setup_blur_handler(window: &Window, app: Rc<RefCell<App>>) -> Result<()> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            app.borrow_mut().game.release_all();
            log::debug!("Window blurred, keys released");
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let (events, message) = {
            let mut a = app.borrow_mut();
            let App { game, surface, .. } = &mut *a;
            if let Some(surface) = surface {
                game.frame(surface, time);
            }
            (game.drain_events(), game.settings().shot_message.clone())
        };

        // The alert blocks, so no borrow may be held across it
        for event in events {
            match event {
                GameEvent::ShotFired { pos } => {
                    log::info!("Shot fired at ({}, {})", pos.x, pos.y);
                    if let Some(window) = web_sys::window() {
                        if let Err(e) = window.alert_with_message(&message) {
                            log::warn!("Shot alert failed: {:?}", e);
                        }
                    }
                    // The keyup for anything held happened while the alert was up
                    app.borrow_mut().game.release_all();
                }
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use shipyard_arcade::autopilot::Autopilot;
    use shipyard_arcade::renderer::FrameBuffer;
    use shipyard_arcade::sim::{GameEvent, Viewport};
    use shipyard_arcade::{Game, Result, Settings};

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 600;
    const DEFAULT_FRAMES: u32 = 600;
    /// Nominal refresh interval used for frame timestamps
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Command line: `shipyard-arcade [settings.json|-] [frames] [seed]`
    #[derive(Debug, PartialEq)]
    pub struct RunArgs {
        /// `None` (or `-` on the command line) means default settings
        pub settings_path: Option<String>,
        pub frames: u32,
        /// `None` seeds from the clock
        pub seed: Option<u64>,
    }

    pub fn parse_args(args: impl IntoIterator<Item = String>) -> RunArgs {
        let mut args = args.into_iter();
        let settings_path = args.next().filter(|p| p != "-");
        let frames = match args.next() {
            Some(n) => n.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring bad frame count {:?}", n);
                DEFAULT_FRAMES
            }),
            None => DEFAULT_FRAMES,
        };
        let seed = args.next().and_then(|s| match s.parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                log::warn!("Ignoring bad seed {:?}", s);
                None
            }
        });
        RunArgs {
            settings_path,
            frames,
            seed,
        }
    }

    /// Outcome of a headless flight
    #[derive(Debug, PartialEq)]
    pub struct Summary {
        pub pos: Vec2,
        pub shots: u32,
        pub checksum: u64,
    }

    /// Fly `frames` frames on autopilot. Halfway through the window shrinks and
    /// the ship respawns inside it.
    pub fn fly(settings: Settings, frames: u32, seed: u64) -> Result<Summary> {
        let mut game = Game::new(settings, Viewport::new(WIDTH as f32, HEIGHT as f32))?;
        let mut fb = FrameBuffer::new(WIDTH, HEIGHT);
        let mut pilot = Autopilot::new(seed);
        let mut shots = 0u32;

        for i in 0..frames {
            if i == frames / 2 {
                let (w, h) = (WIDTH * 4 / 5, HEIGHT * 4 / 5);
                fb.resize(w, h);
                game.on_resize(w as f32, h as f32);
                game.respawn();
            }

            pilot.drive(&mut game);
            game.frame(&mut fb, i as f64 * FRAME_MS);

            for event in game.drain_events() {
                match event {
                    GameEvent::ShotFired { pos } => {
                        shots += 1;
                        log::info!(
                            "{} at ({}, {})",
                            game.settings().shot_message,
                            pos.x,
                            pos.y
                        );
                        game.release_all();
                    }
                }
            }
        }

        log::info!("Finished at {} fps (nominal timestamps)", game.fps());
        Ok(Summary {
            pos: game.state.ship.pos,
            shots,
            checksum: fb.checksum(),
        })
    }

    pub fn run() -> Result<()> {
        let args = parse_args(std::env::args().skip(1));
        let settings = match &args.settings_path {
            Some(path) => Settings::load_from_path(path)?,
            None => Settings::default(),
        };
        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        log::info!("Flying {} frames on autopilot (seed {})", args.frames, seed);

        let summary = fly(settings, args.frames, seed)?;
        log::info!(
            "Done: ship at ({}, {}), {} shots, frame checksum {:016x}",
            summary.pos.x,
            summary.pos.y,
            summary.shots,
            summary.checksum
        );
        println!(
            "ship=({}, {}) shots={} seed={} checksum={:016x}",
            summary.pos.x, summary.pos.y, summary.shots, seed, summary.checksum
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shipyard Arcade (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to play in the browser");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
