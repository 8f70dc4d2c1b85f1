//! Constellation entry point
//!
//! Wires the star field and page effects to the browser and runs the frame
//! loop. Natively, runs the simulation headless and logs what it would draw.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlCanvasElement, IntersectionObserver, IntersectionObserverEntry,
        IntersectionObserverInit, PointerEvent, Window,
    };

    use constellation::draw::DrawList;
    use constellation::platform::{Debouncer, FrameClock};
    use constellation::renderer::{RenderState, Viewport};
    use constellation::settings::Settings;
    use constellation::sim::{InputTracker, Scene, draw, tick};
    use constellation::ui::{
        CursorConfig, CursorFollower, HeaderConfig, HeaderScrollToggle, RevealConfig,
        RevealTracker, Typewriter, TypewriterConfig,
    };

    /// Data attribute carrying a reveal tracker id
    const REVEAL_ID_ATTR: &str = "data-reveal-id";

    /// Star field state shared by the frame loop and event handlers
    struct App {
        scene: Scene,
        input: InputTracker,
        clock: FrameClock,
        draw_list: DrawList,
        canvas: Option<HtmlCanvasElement>,
        render_state: Option<RenderState>,
        resize: Debouncer,
    }

    impl App {
        fn new(settings: &Settings, seed: u64) -> Self {
            Self {
                scene: Scene::new(settings.scene.clone(), seed),
                input: InputTracker::new(),
                clock: FrameClock::new(settings.tick_rate_hz),
                draw_list: DrawList::new(),
                canvas: None,
                render_state: None,
                resize: Debouncer::new(settings.resize_settle_ms),
            }
        }

        /// Resize the scene to the page and repopulate it, and match the
        /// drawing surface to the viewport
        fn relayout(&mut self, window: &Window) {
            let (width, height) = page_size(window);
            self.scene.resize(width, height);
            self.scene.initialize();
            log::info!(
                "Scene {}x{}: {} stars",
                width,
                height,
                self.scene.stars.len()
            );

            if let Some(canvas) = &self.canvas {
                let (w, h) = surface_size(window);
                canvas.set_width(w);
                canvas.set_height(h);
                if let Some(render_state) = &mut self.render_state {
                    render_state.resize(w, h);
                }
            }
        }

        /// Run the ticks this frame owes, then draw
        fn frame(&mut self, window: &Window, time: f64) {
            for _ in 0..self.clock.advance(time) {
                tick(&mut self.scene, &self.input);
            }

            self.draw_list.clear();
            draw(&self.scene, &mut self.draw_list);

            if let Some(render_state) = &mut self.render_state {
                let view = viewport(window);
                match render_state.render(&self.draw_list, &view) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    fn scroll(window: &Window) -> Vec2 {
        Vec2::new(
            window.scroll_x().unwrap_or(0.0) as f32,
            window.scroll_y().unwrap_or(0.0) as f32,
        )
    }

    fn inner_size(window: &Window) -> Vec2 {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Vec2::new(w as f32, h as f32)
    }

    /// Viewport width by the full scrollable page height
    fn page_size(window: &Window) -> (f32, f32) {
        let inner = inner_size(window);
        let scroll_height = window
            .document()
            .and_then(|d| d.body())
            .map(|b| b.scroll_height() as f32)
            .unwrap_or(0.0);
        (inner.x, scroll_height.max(inner.y))
    }

    /// Visible part of the page
    fn viewport(window: &Window) -> Viewport {
        Viewport::new(scroll(window), inner_size(window))
    }

    /// Viewport size in physical pixels
    fn surface_size(window: &Window) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let inner = inner_size(window);
        (
            ((inner.x as f64 * dpr) as u32).max(1),
            ((inner.y as f64 * dpr) as u32).max(1),
        )
    }

    fn client_pos(event: &PointerEvent) -> Vec2 {
        Vec2::new(event.client_x() as f32, event.client_y() as f32)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Constellation starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let settings = Settings::load();

        // Page effects first; they don't depend on the GPU
        if settings.cursor.enabled {
            setup_cursor(&window, &document, &settings.cursor)?;
        }
        setup_header(&window, &document, &settings.header)?;
        setup_typewriter(&window, &document, &settings.typewriter);
        setup_reveal(&document, &settings.reveal)?;

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(&settings, seed)));
        log::info!("Scene seeded with {}", seed);

        match document.get_element_by_id(&settings.canvas_id) {
            Some(el) => {
                let canvas: HtmlCanvasElement = el.dyn_into()?;
                let style = canvas.style();
                for (prop, value) in [
                    ("position", "fixed"),
                    ("top", "0"),
                    ("left", "0"),
                    ("width", "100vw"),
                    ("height", "100vh"),
                    ("pointer-events", "none"),
                ] {
                    style.set_property(prop, value)?;
                }
                app.borrow_mut().canvas = Some(canvas.clone());

                match create_render_state(&window, canvas).await {
                    Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
                    Err(e) => log::warn!("Star field disabled: {}", e),
                }
            }
            None => log::warn!("No #{} element, star field disabled", settings.canvas_id),
        }

        app.borrow_mut().relayout(&window);

        setup_pointer_handlers(&window, app.clone())?;
        setup_scroll(&window, app.clone())?;
        setup_resize(&window, app.clone())?;

        request_animation_frame(app);

        log::info!("Constellation running!");
        Ok(())
    }

    async fn create_render_state(
        window: &Window,
        canvas: HtmlCanvasElement,
    ) -> Result<RenderState, String> {
        let (width, height) = surface_size(window);
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| e.to_string())
    }

    fn setup_pointer_handlers(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Pointer move
        {
            let app = app.clone();
            let win = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                app.borrow_mut()
                    .input
                    .pointer_move(client_pos(&event), scroll(&win));
            });
            window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer down - ripple
        {
            let app = app.clone();
            let win = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut a = app.borrow_mut();
                let App { input, scene, .. } = &mut *a;
                input.pointer_down(client_pos(&event), scroll(&win), scene);
            });
            window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                app.borrow_mut().input.pointer_up();
            });
            window
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_scroll(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().input.scroll_to(scroll(&win));
        });
        window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (token, delay) = {
                let mut a = app.borrow_mut();
                (a.resize.schedule(), a.resize.delay_ms())
            };

            // Timers are never cancelled; stale tokens make them no-ops
            let app_timer = app.clone();
            let win_timer = win.clone();
            let settle = Closure::once_into_js(move || {
                let mut a = app_timer.borrow_mut();
                if a.resize.fire(token) {
                    a.relayout(&win_timer);
                }
            });
            if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                settle.unchecked_ref(),
                delay as i32,
            ) {
                log::warn!("Failed to schedule resize: {:?}", e);
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_cursor(window: &Window, document: &Document, config: &CursorConfig) -> Result<(), JsValue> {
        let body = document.body().ok_or("no body")?;
        let ring = document.create_element("div")?;
        ring.set_attribute("style", &config.css_text())?;
        body.append_child(&ring)?;

        let cursor = Rc::new(RefCell::new(CursorFollower::new(config)));

        {
            let cursor = cursor.clone();
            let ring = ring.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let (left, top) = cursor
                    .borrow_mut()
                    .on_move(event.client_x() as f64, event.client_y() as f64);
                set_style(&ring, "left", &format!("{left}px"));
                set_style(&ring, "top", &format!("{top}px"));
            });
            window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let cursor = cursor.clone();
            let ring = ring.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let transform = cursor.borrow_mut().on_down();
                set_style(&ring, "transform", &transform);
            });
            window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let transform = cursor.borrow_mut().on_up();
                set_style(&ring, "transform", &transform);
            });
            window
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn set_style(el: &Element, prop: &str, value: &str) {
        if let Some(el) = el.dyn_ref::<web_sys::HtmlElement>() {
            if let Err(e) = el.style().set_property(prop, value) {
                log::warn!("Failed to set {}: {:?}", prop, e);
            }
        }
    }

    fn setup_header(window: &Window, document: &Document, config: &HeaderConfig) -> Result<(), JsValue> {
        let Some(header) = document.query_selector(&config.selector)? else {
            log::info!("No {} element, header effect disabled", config.selector);
            return Ok(());
        };

        let mut toggle = HeaderScrollToggle::new(config.threshold);
        let class = config.class.clone();
        let win = window.clone();
        let mut apply = move || {
            if let Some(scrolled) = toggle.on_scroll(win.scroll_y().unwrap_or(0.0)) {
                let classes = header.class_list();
                let result = if scrolled {
                    classes.add_1(&class)
                } else {
                    classes.remove_1(&class)
                };
                if let Err(e) = result {
                    log::warn!("Failed to toggle header class {}: {:?}", class, e);
                }
            }
        };
        // Page may load already scrolled
        apply();

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| apply());
        window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_typewriter(window: &Window, document: &Document, config: &TypewriterConfig) {
        let Some(el) = document.get_element_by_id(&config.element_id) else {
            return;
        };
        match Typewriter::new(config) {
            Some(typewriter) => type_step(window.clone(), el, typewriter),
            None => log::warn!("Typewriter has no phrases"),
        }
    }

    /// Show the next frame, then schedule the one after
    fn type_step(window: Window, el: Element, mut typewriter: Typewriter) {
        let frame = typewriter.step();
        el.set_text_content(Some(&frame.text));

        let win = window.clone();
        let next = Closure::once_into_js(move || type_step(win, el, typewriter));
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            next.unchecked_ref(),
            frame.delay_ms as i32,
        ) {
            log::warn!("Typewriter stopped: {:?}", e);
        }
    }

    fn setup_reveal(document: &Document, config: &RevealConfig) -> Result<(), JsValue> {
        let elements = document.query_selector_all(&config.selector)?;
        if elements.length() == 0 {
            return Ok(());
        }

        let tracker = Rc::new(RefCell::new(RevealTracker::new()));
        let class = config.class.clone();
        let callback_tracker = tracker.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let mut tracker = callback_tracker.borrow_mut();
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    let Some(id) = target
                        .get_attribute(REVEAL_ID_ATTR)
                        .and_then(|v| v.parse::<usize>().ok())
                    else {
                        continue;
                    };
                    if tracker.on_intersect(id, entry.is_intersecting()) {
                        if let Err(e) = target.class_list().add_1(&class) {
                            log::warn!("Failed to add reveal class {}: {:?}", class, e);
                        }
                        observer.unobserve(&target);
                    }
                }
                if tracker.all_revealed() {
                    observer.disconnect();
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config.threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        callback.forget();

        let mut tracker = tracker.borrow_mut();
        for i in 0..elements.length() {
            let Some(el) = elements.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let id = tracker.register();
            el.set_attribute(REVEAL_ID_ATTR, &id.to_string())?;
            observer.observe(&el);
        }
        log::info!("Observing {} reveal elements", tracker.len());
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        if let Some(window) = web_sys::window() {
            app.borrow_mut().frame(&window, time);
        }
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Constellation (native) starting...");
    log::info!("The page build runs in the browser - use `trunk serve` for the web version");

    headless_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate a few seconds of a tall page with a click, logging what gets drawn
#[cfg(not(target_arch = "wasm32"))]
fn headless_run() {
    use constellation::draw::DrawList;
    use constellation::renderer::{Viewport, shapes};
    use constellation::settings::Settings;
    use constellation::sim::{InputTracker, Scene, draw, tick};
    use glam::Vec2;

    let settings = Settings::load();
    let (width, height) = (1280.0, 3200.0);
    let mut scene = Scene::new(settings.scene.clone(), 7);
    scene.resize(width, height);
    scene.initialize();
    log::info!("Scene {}x{}: {} stars", width, height, scene.stars.len());

    let mut input = InputTracker::new();
    let scroll = Vec2::new(0.0, 400.0);
    input.pointer_move(Vec2::new(640.0, 360.0), scroll);
    input.pointer_down(Vec2::new(100.0, 100.0), scroll, &mut scene);
    input.pointer_up();

    let view = Viewport::new(scroll, Vec2::new(width, 720.0));
    let mut list = DrawList::new();
    let mut vertices = Vec::new();

    for t in 1..=180 {
        tick(&mut scene, &input);
        if t % 30 == 0 {
            list.clear();
            draw(&scene, &mut list);
            shapes::tessellate(&list, &view, &mut vertices);
            log::info!(
                "tick {:3}: {} links, {} ripples, {} primitives, {} visible vertices",
                t,
                scene.links.len(),
                scene.ripples.len(),
                list.len(),
                vertices.len()
            );
        }
    }
}
