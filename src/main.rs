//! Fence Shot entry point
//!
//! On the web this wires the page's sliders and buttons to the game and drives
//! the flight with `requestAnimationFrame`. Natively it flies one headless shot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement};

    use fence_shot::frame_loop::{FrameId, FrameScheduler};
    use fence_shot::renderer::CanvasSurface;
    use fence_shot::sim::World;
    use fence_shot::{Game, SchedulerError, Settings, hud};

    type FrameCallback = Closure<dyn FnMut(f64)>;

    /// Frame scheduler backed by `requestAnimationFrame`
    struct RafScheduler {
        window: web_sys::Window,
        /// Installed once the game exists (the callback needs a handle to it)
        callback: Rc<RefCell<Option<FrameCallback>>>,
        /// Id of the latest request, read by the callback when it fires
        last_requested: Rc<Cell<Option<FrameId>>>,
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self) -> Result<FrameId, SchedulerError> {
            let callback = self.callback.borrow();
            let callback = callback.as_ref().ok_or(SchedulerError::NotReady)?;
            let id = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .map_err(|e| SchedulerError::Rejected(format!("{:?}", e)))?;
            self.last_requested.set(Some(id));
            Ok(id)
        }

        fn cancel_frame(&mut self, id: FrameId) {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
            if self.last_requested.get() == Some(id) {
                self.last_requested.set(None);
            }
        }
    }

    /// Page elements around the canvas
    struct Dom {
        angle_slider: HtmlInputElement,
        power_slider: HtmlInputElement,
        angle_value: Element,
        power_value: Element,
        go_button: HtmlButtonElement,
        message: Element,
        ball_info: Element,
        ball_pos_x: Element,
        ball_pos_y: Element,
        ball_vel_x: Element,
        ball_vel_y: Element,
    }

    fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
    }

    impl Dom {
        fn find(document: &Document) -> Result<Self, JsValue> {
            Ok(Self {
                angle_slider: element(document, "angleSlider")?.dyn_into()?,
                power_slider: element(document, "powerSlider")?.dyn_into()?,
                angle_value: element(document, "angleValue")?,
                power_value: element(document, "powerValue")?,
                go_button: element(document, "goButton")?.dyn_into()?,
                message: element(document, "message")?,
                ball_info: element(document, "ballInfo")?,
                ball_pos_x: element(document, "ballPosX")?,
                ball_pos_y: element(document, "ballPosY")?,
                ball_vel_x: element(document, "ballVelX")?,
                ball_vel_y: element(document, "ballVelY")?,
            })
        }

        /// Push slider ranges and starting values from settings
        fn init_sliders(&self, settings: &Settings) {
            let power = &settings.power;
            self.angle_slider.set_min("0");
            self.angle_slider
                .set_max(&fence_shot::sim::MAX_ANGLE_DEG.to_string());
            self.angle_slider
                .set_value(&settings.default_angle.to_string());
            self.power_slider.set_min(&power.min.to_string());
            self.power_slider.set_max(&power.max.to_string());
            self.power_slider.set_step(&power.step.to_string());
            self.power_slider.set_value(&power.default.to_string());
        }

        /// Mirror game state into the text elements and the Go button
        fn update(&self, game: &Game<RafScheduler>) {
            let params = game.params();
            self.angle_value
                .set_text_content(Some(&hud::format_angle(params.angle_deg)));
            self.power_value
                .set_text_content(Some(&hud::format_power(params.power)));
            self.message.set_text_content(Some(game.message()));
            self.go_button.set_disabled(!game.can_launch());

            match game.readout() {
                Some(readout) => {
                    let _ = self.ball_info.class_list().remove_1("hidden");
                    self.ball_pos_x.set_text_content(Some(&readout.pos_x));
                    self.ball_pos_y.set_text_content(Some(&readout.pos_y));
                    self.ball_vel_x.set_text_content(Some(&readout.vel_x));
                    self.ball_vel_y.set_text_content(Some(&readout.vel_y));
                }
                None => {
                    let _ = self.ball_info.class_list().add_1("hidden");
                }
            }
        }
    }

    /// Everything the event handlers share
    struct App {
        game: Game<RafScheduler>,
        surface: CanvasSurface,
        dom: Dom,
    }

    impl App {
        fn refresh_dom(&self) {
            self.dom.update(&self.game);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Fence Shot starting...");

        let settings = Settings::load();
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = element(&document, &settings.canvas_id)?.dyn_into()?;
        let surface = CanvasSurface::new(canvas)?;
        let dom = Dom::find(&document)?;
        dom.init_sliders(&settings);

        let callback = Rc::new(RefCell::new(None));
        let last_requested = Rc::new(Cell::new(None));
        let scheduler = RafScheduler {
            window: window.clone(),
            callback: callback.clone(),
            last_requested: last_requested.clone(),
        };

        let app = Rc::new(RefCell::new(App {
            game: Game::new(World::reference(), settings, scheduler),
            surface,
            dom,
        }));

        // Frame callback: one tick + draw per refresh
        {
            let app = app.clone();
            let frame = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                let Some(id) = last_requested.get() else {
                    return;
                };
                let mut guard = app.borrow_mut();
                let App { game, surface, dom } = &mut *guard;
                if let Err(e) = game.on_frame(id, surface) {
                    log::error!("Frame loop stopped: {}", e);
                }
                dom.update(game);
            });
            *callback.borrow_mut() = Some(frame);
        }

        setup_input_handlers(&window, app.clone())?;

        {
            let mut guard = app.borrow_mut();
            let App { game, surface, .. } = &mut *guard;
            game.draw(surface);
        }
        app.borrow().refresh_dom();

        log::info!("Fence Shot running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        let document = window.document().ok_or("no document")?;

        // Angle slider
        {
            let app = app.clone();
            let slider = app.borrow().dom.angle_slider.clone();
            let source = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                match source.value().parse::<u32>() {
                    Ok(angle) => {
                        let mut guard = app.borrow_mut();
                        let App { game, surface, dom } = &mut *guard;
                        game.set_angle(angle, surface);
                        dom.update(game);
                    }
                    Err(e) => log::warn!("Bad angle slider value: {}", e),
                }
            });
            slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Power slider
        {
            let app = app.clone();
            let slider = app.borrow().dom.power_slider.clone();
            let source = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                match source.value().parse::<f64>() {
                    Ok(power) => {
                        let mut guard = app.borrow_mut();
                        let App { game, surface, dom } = &mut *guard;
                        game.set_power(power, surface);
                        dom.update(game);
                    }
                    Err(e) => log::warn!("Bad power slider value: {}", e),
                }
            });
            slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Go button
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut guard = app.borrow_mut();
                if let Err(e) = guard.game.launch() {
                    log::error!("Launch failed: {}", e);
                }
                guard.refresh_dom();
            });
            element(&document, "goButton")?
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Reset button
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut guard = app.borrow_mut();
                let App { game, surface, dom } = &mut *guard;
                game.reset(surface);
                dom.update(game);
            });
            element(&document, "resetButton")?
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut guard = app.borrow_mut();
                let App { game, surface, .. } = &mut *guard;
                game.redraw(surface);
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Fence Shot failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    log::info!("Fence Shot (native) starting...");
    log::info!("Native mode runs a headless shot - run with `trunk serve` for the web version");

    headless_shot();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Fly one shot with the configured defaults against a recording surface
#[cfg(not(target_arch = "wasm32"))]
fn headless_shot() {
    use fence_shot::frame_loop::ManualScheduler;
    use fence_shot::renderer::RecordingSurface;
    use fence_shot::sim::World;
    use fence_shot::{Game, Settings};

    let settings = Settings::load();
    let mut surface = RecordingSurface::new(600.0, 400.0);
    let mut game = Game::new(World::reference(), settings, ManualScheduler::new());
    game.draw(&mut surface);

    let params = *game.params();
    match game.launch() {
        Ok(true) => {}
        Ok(false) => {
            log::warn!("Launch refused in {:?}", game.state().status);
            return;
        }
        Err(e) => {
            log::error!("Launch failed: {}", e);
            return;
        }
    }

    let mut frames = 0u32;
    while let Some(id) = game.frames().pending() {
        if let Err(e) = game.on_frame(id, &mut surface) {
            log::error!("Frame loop stopped: {}", e);
            break;
        }
        frames += 1;
    }

    println!(
        "{}° at power {:.1}: {} after {} frames",
        params.angle_deg,
        params.power,
        game.message(),
        frames
    );
    if let Some(readout) = game.readout() {
        println!(
            "Final ball ({}, {}) velocity ({}, {})",
            readout.pos_x, readout.pos_y, readout.vel_x, readout.vel_y
        );
    }
    log::info!(
        "Last frame issued {} draw calls",
        surface.last_frame().len()
    );
}
