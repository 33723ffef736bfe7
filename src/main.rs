//! Skyflap entry point
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

    use skyflap::audio::AudioManager;
    use skyflap::consts::BEST_SCORE_KEY;
    use skyflap::hud::Hud;
    use skyflap::persistence::LocalStorageStore;
    use skyflap::renderer::{RenderState, build_scene};
    use skyflap::{Game, Settings, Tuning};

    /// Browser-side state around the platform-free `Game`
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        audio: AudioManager,
        /// Last HUD pushed to the DOM, to skip redundant writes
        last_hud: Option<Hud>,
    }

    impl App {
        /// Advance one display frame and draw it
        fn frame(&mut self, time: f64) {
            let events = self.game.frame(time).to_vec();
            self.audio.play_events(&events);
            self.render();
            self.update_hud();
        }

        fn render(&mut self) {
            let Some(ref mut render_state) = self.render_state else {
                return;
            };
            let vertices = build_scene(&self.game.state, &self.game.settings);
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

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let hud = self.game.hud();
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&hud.score));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                el.set_text_content(Some(&hud.best));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                match &hud.fps {
                    Some(fps) => {
                        el.set_text_content(Some(fps));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            // Show/hide banner
            if let Some(el) = document.get_element_by_id("banner") {
                match &hud.banner {
                    Some(banner) => {
                        if let Some(title) = document.get_element_by_id("banner-title") {
                            title.set_text_content(Some(&banner.title));
                        }
                        if let Some(lines) = document.get_element_by_id("banner-lines") {
                            lines.set_inner_html("");
                            for line in &banner.lines {
                                if let Ok(p) = document.create_element("p") {
                                    p.set_text_content(Some(line));
                                    let _ = lines.append_child(&p);
                                }
                            }
                        }
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            self.last_hud = Some(hud);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Skyflap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            seed,
            Tuning::load(),
            settings.clone(),
            Box::new(LocalStorageStore::new(BEST_SCORE_KEY)),
        );

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = match RenderState::new(surface, &adapter, width, height).await {
            Ok(state) => Some(state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                None
            }
        };

        let app = Rc::new(RefCell::new(App {
            game,
            render_state,
            audio: AudioManager::new(settings.effective_volume()),
            last_hud: None,
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_visibility(app.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(app);

        log::info!("Skyflap running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse down - flap
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.flap();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - flap
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.flap();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        a.game.flap();
                    }
                    "KeyR" => a.game.restart(),
                    "KeyD" => a.game.toggle_autopilot(),
                    "KeyF" => {
                        a.game.settings.toggle_fps();
                        a.game.settings.save();
                    }
                    "KeyM" => {
                        a.game.settings.sound = !a.game.settings.sound;
                        a.game.settings.save();
                        let volume = a.game.settings.effective_volume();
                        a.audio.set_volume(volume);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// A hidden tab stops receiving frames; restart the frame clock when it
    /// comes back so the gap is not simulated
    fn setup_visibility(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Visible {
                app.borrow_mut().game.reset_clock();
                log::info!("Tab visible again, frame clock reset");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless run: the autopilot plays one session at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use skyflap::persistence::MemoryStore;
    use skyflap::sim::{GameEvent, GamePhase};
    use skyflap::{Game, Settings, Tuning};

    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Skyflap (native) starting...");
    log::info!("Native mode runs the simulation headless - use `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut game = Game::new(
        seed,
        Tuning::load(),
        Settings::load(),
        Box::new(MemoryStore::new()),
    );
    game.toggle_autopilot();

    let frame_ms = 1000.0 / 60.0;
    let mut started = false;
    for i in 0..MAX_FRAMES {
        let events = game.frame(i as f64 * frame_ms);
        if events.contains(&GameEvent::SessionStarted) {
            started = true;
        }
        if started && game.state.phase == GamePhase::Ended {
            break;
        }
    }

    let hud = game.hud();
    log::info!("Seed {}: {} ({})", game.state.seed, hud.score, hud.best);
    println!(
        "{} after {} frames ({:.1}s)",
        hud.score,
        game.state.frame,
        game.state.time_ms / 1000.0
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
