//! Bead Bounce entry point
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

    use bead_bounce::audio::{AudioManager, sound_for_event, sound_set_name};
    use bead_bounce::platform::{FixedClock, FrameBuffer, ScreenGrid, pointer_to_cell};
    use bead_bounce::renderer::{RenderState, shapes};
    use bead_bounce::sim::{GameEvent, tick};
    use bead_bounce::ui::{self, Control, Target};
    use bead_bounce::{Settings, Simulation};

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        settings: Settings,
        clock: FixedClock,
        frame: FrameBuffer,
        grid: ScreenGrid,
        render_state: Option<RenderState>,
        audio: AudioManager,
        last_time: f64,
        /// Canvas size in CSS pixels (pointer coordinates)
        client_size: Vec2,
        last_status: String,
        last_sound_set: Option<u8>,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let sim = Simulation::from_settings(&settings, seed);
            let (cols, rows) = settings.screen_size();

            let audio = AudioManager::new(&settings);

            Self {
                sim,
                clock: FixedClock::new(settings.tick_period()),
                frame: FrameBuffer::new(cols, rows),
                grid: ScreenGrid::new(cols, rows),
                settings,
                render_state: None,
                audio,
                last_time: 0.0,
                client_size: Vec2::ONE,
                last_status: String::new(),
                last_sound_set: None,
            }
        }

        /// Handle a press at `pos` (CSS pixels relative to the canvas)
        fn press(&mut self, pos: Vec2) {
            self.audio.resume();
            let Some(cell) = pointer_to_cell(&self.grid, self.client_size, pos) else {
                return;
            };
            match ui::target_at(self.sim.board(), cell) {
                Target::Spawn(cell) => {
                    if let Err(e) = self.sim.spawn(cell) {
                        log::debug!("Spawn ignored: {}", e);
                    }
                }
                Target::Control(control) => self.control(control),
                Target::Nothing => {}
            }
        }

        fn control(&mut self, control: Control) {
            ui::apply_control(&mut self.sim, control);
            if matches!(control, Control::Reset) {
                self.clock.reset();
            }
            self.persist_preferences();
        }

        /// Save launch direction and sound set when they change
        fn persist_preferences(&mut self) {
            let direction = self.sim.launch_direction;
            let sound_set = self.sim.sound_set();
            if self.settings.launch_direction != direction || self.settings.sound_set != sound_set
            {
                self.settings.launch_direction = direction;
                self.settings.sound_set = sound_set;
                self.settings.save();
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let ticks = self.clock.advance(dt);
            for _ in 0..ticks {
                tick(&mut self.sim);
            }

            for event in self.sim.take_events() {
                if let GameEvent::Reset { cleared } = event {
                    log::debug!("Reset cleared {} beads", cleared);
                }
                if let Some(effect) = sound_for_event(&event, self.sim.sound_set()) {
                    self.audio.play(effect);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            ui::paint_screen(&self.sim, self.settings.marquee, &mut self.frame);

            if let Some(ref mut render_state) = self.render_state {
                let vertices = shapes::grid_quads(&self.frame, &self.grid, render_state.canvas());
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

        /// Update the status line and sound set label in the DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let status = ui::status_text(&self.sim);
            if status != self.last_status {
                if let Some(el) = document.get_element_by_id("status") {
                    el.set_text_content(Some(&status));
                }
                self.last_status = status;
            }

            let set = self.sim.sound_set();
            if self.last_sound_set != Some(set) {
                if let Some(el) = document.get_element_by_id("sound-set") {
                    el.set_text_content(Some(sound_set_name(set)));
                }
                self.last_sound_set = Some(set);
            }
        }
    }

    /// Size the canvas backing store to its CSS box
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (Vec2, u32, u32) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (Vec2::new(client_w as f32, client_h as f32), width, height)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bead Bounce starting...");

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

        let (client_size, width, height) = fit_canvas(&window, &canvas);

        // Initialize game
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        game.borrow_mut().client_size = client_size;

        log::info!("Game initialized with seed: {}", game.borrow().sim.seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match init_renderer(&instance, &canvas, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Renderer unavailable: {}", e),
        }

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone());

        // Keep the canvas backing store in step with its CSS size
        setup_resize(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Bead Bounce running!");
    }

    async fn init_renderer(
        instance: &wgpu::Instance,
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, bead_bounce::renderer::RenderError> {
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height).await
    }

    fn touch_pos(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(Vec2::new(
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click - spawn or press a control
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().press(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_pos(&canvas_clone, &event) {
                    game.borrow_mut().press(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "r" | "R" => g.control(Control::Reset),
                    "]" => g.control(Control::SoundUp),
                    "[" => g.control(Control::SoundDown),
                    "m" | "M" => g.toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (client_size, width, height) = fit_canvas(&win, &canvas);
            let mut g = game.borrow_mut();
            g.client_size = client_size;
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
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
    log::info!("Bead Bounce (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a few beads bouncing for a few seconds, drawn as text
#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::IVec2;

    use bead_bounce::audio::{sound_for_event, sound_set_name};
    use bead_bounce::consts::ENGINE_FPS;
    use bead_bounce::platform::FrameBuffer;
    use bead_bounce::sim::{Rgb, tick};
    use bead_bounce::ui::{self, palette};
    use bead_bounce::{Settings, SettingsError, Simulation};

    const DEMO_SECONDS: u32 = 5;

    pub fn run() -> Result<(), SettingsError> {
        let settings = match std::env::var("BEAD_BOUNCE_SETTINGS") {
            Ok(json) => Settings::from_json(&json)?,
            Err(_) => Settings::load(),
        };
        let mut sim = Simulation::from_settings(&settings, 0xB0B);
        log::info!("Board {}x{}, seed {}", settings.board_width, settings.board_height, sim.seed);

        let w = sim.board().width();
        let h = sim.board().height();
        for cell in [
            IVec2::new(1, 1),
            IVec2::new(w / 2, h / 2),
            IVec2::new(w - 2, 1),
            IVec2::new(1, h - 2),
        ] {
            if let Err(e) = sim.spawn(cell) {
                log::debug!("Spawn at {} ignored: {}", cell, e);
            }
        }

        let ticks = DEMO_SECONDS * ENGINE_FPS / settings.tick_frames;
        for _ in 0..ticks {
            tick(&mut sim);
            for event in sim.take_events() {
                if let Some(effect) = sound_for_event(&event, sim.sound_set()) {
                    log::trace!("{:?}", effect);
                }
            }
        }

        let (cols, rows) = settings.screen_size();
        let mut frame = FrameBuffer::new(cols, rows);
        ui::paint_screen(&sim, settings.marquee, &mut frame);
        println!("{}", to_text(&frame));
        println!(
            "{} after {} ticks ({})",
            ui::status_text(&sim),
            sim.time_ticks,
            sound_set_name(sim.sound_set())
        );
        for (_, bead) in sim.active_beads() {
            println!("  bead at {} colour {}", bead.pos, bead.color);
        }
        Ok(())
    }

    fn glyph(color: Rgb) -> char {
        match color {
            c if c == palette::FLOOR => '.',
            c if c == palette::WALL => '#',
            c if c == palette::PANEL => ' ',
            c if c == palette::MARQUEE => '*',
            c if c == palette::BUTTON_IDLE || c == palette::BUTTON_ACTIVE => '=',
            _ => 'o',
        }
    }

    fn to_text(frame: &FrameBuffer) -> String {
        let mut out = String::with_capacity(((frame.width() + 1) * frame.height()) as usize);
        for (cell, color) in frame.iter() {
            out.push(glyph(color));
            if cell.x == frame.width() - 1 {
                out.push('\n');
            }
        }
        out
    }
}
