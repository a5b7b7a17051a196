//! Yimo Playground entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlTextAreaElement, MouseEvent};

    use glam::Vec2;
    use yimo_playground::challenge::{ChallengeEngine, ChallengePhase, badges, streak_emoji};
    use yimo_playground::sim::{PlaygroundState, Shape, click_burst, tick};

    /// App instance holding all state
    struct App {
        state: PlaygroundState,
        engine: ChallengeEngine,
        /// Live sprite elements keyed by entity id
        sprites: HashMap<u32, Element>,
        /// setInterval handle for the active challenge countdown
        countdown_handle: Option<i32>,
    }

    impl App {
        fn new(seed: u64, viewport: Vec2) -> Self {
            Self {
                state: PlaygroundState::new(seed, viewport),
                engine: ChallengeEngine::new(),
                sprites: HashMap::new(),
                countdown_handle: None,
            }
        }

        /// Sync the DOM to the current scene: create missing sprite elements,
        /// move live ones, drop stale ones.
        fn render(&mut self, document: &Document) {
            let Some(container) = document.get_element_by_id("playground") else {
                return;
            };

            let scene = self.state.scene();
            let mut live: HashSet<u32> = HashSet::with_capacity(scene.len());

            for sprite in &scene {
                live.insert(sprite.id);
                let el = self.sprites.entry(sprite.id).or_insert_with(|| {
                    let el = document.create_element("div").expect("create sprite");
                    let _ = el.set_attribute("data-id", &sprite.id.to_string());
                    el.set_text_content(Some("\u{1F31F}"));
                    let _ = container.append_child(&el);
                    el
                });

                let shape_class = match sprite.shape {
                    Shape::Round => "yimo-round",
                    Shape::Heart => "yimo-heart",
                };
                let _ = el.set_attribute(
                    "class",
                    &format!("yimo {} {}", sprite.fill.css_class(), shape_class),
                );
                if let Some(html) = el.dyn_ref::<HtmlElement>() {
                    let style = html.style();
                    let _ = style.set_property("left", &format!("{}px", sprite.pos.x));
                    let _ = style.set_property("top", &format!("{}px", sprite.pos.y));
                    let _ = style.set_property("width", &format!("{}px", sprite.size));
                    let _ = style.set_property("height", &format!("{}px", sprite.size));
                    let _ = style.set_property("font-size", &format!("{}px", sprite.size * 0.3));
                }
            }

            self.sprites.retain(|id, el| {
                if live.contains(id) {
                    true
                } else {
                    el.remove();
                    false
                }
            });
        }

        /// Update counters, button visibility, and the progress panel
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("yimo-count") {
                el.set_text_content(Some(&self.state.yimos.len().to_string()));
            }

            set_hidden(document, "start-btn", self.state.active);
            set_hidden(document, "reset-btn", !self.state.active);

            let progress = &self.engine.progress;
            if let Some(el) = document.get_element_by_id("progress-total") {
                el.set_text_content(Some(&progress.total_completed.to_string()));
            }
            if let Some(el) = document.get_element_by_id("progress-streak") {
                el.set_text_content(Some(&format!(
                    "{} {}",
                    progress.streak_days,
                    streak_emoji(progress.streak_days)
                )));
            }
            if let Some(el) = document.get_element_by_id("progress-badges") {
                el.set_text_content(Some(&badges(progress.streak_days).join("  ")));
            }
            if let Some(el) = document.get_element_by_id("progress-last") {
                let text = progress
                    .last_completed_ms
                    .map(|ms| format!("Last challenge: {}", format_date(ms)))
                    .unwrap_or_default();
                el.set_text_content(Some(&text));
            }
        }
    }

    /// Format a millisecond timestamp as m/d/yy
    fn format_date(ms: f64) -> String {
        let date = js_sys::Date::new(&JsValue::from_f64(ms));
        format!(
            "{}/{}/{}",
            date.get_month() + 1,
            date.get_date(),
            date.get_full_year() % 100
        )
    }

    fn document() -> Document {
        web_sys::window().expect("no window").document().expect("no document")
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            if hidden {
                let _ = el.class_list().add_1("hidden");
            } else {
                let _ = el.class_list().remove_1("hidden");
            }
        }
    }

    fn format_countdown(seconds: u32) -> String {
        format!("{}:{:02}", seconds / 60, seconds % 60)
    }

    /// Show a transient toast message
    fn show_toast(message: &str) {
        let document = document();
        let Some(root) = document
            .get_element_by_id("toast-root")
            .or_else(|| document.body().map(|b| b.into()))
        else {
            return;
        };

        let el = document.create_element("div").expect("create toast");
        let _ = el.set_attribute("class", "toast");
        el.set_text_content(Some(message));
        let _ = root.append_child(&el);

        let closure = Closure::once(move || {
            el.remove();
        });
        let _ = web_sys::window()
            .expect("no window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                2500,
            );
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Yimo Playground starting...");

        let window = web_sys::window().expect("no window");
        let document = document();

        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0) as f32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0) as f32;

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed, Vec2::new(width, height))));

        log::info!("Playground initialized with seed: {}", seed);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_playground_buttons(app.clone());
        setup_click_delegation(app.clone());
        setup_challenge_dialog(app.clone());
        setup_resize(app.clone());
        setup_keyboard(app.clone());

        request_animation_frame(app);

        log::info!("Yimo Playground running!");
    }

    fn setup_playground_buttons(app: Rc<RefCell<App>>) {
        let document = document();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().state.start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().state.reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// One listener on the container handles clicks for every Yimo
    fn setup_click_delegation(app: Rc<RefCell<App>>) {
        let document = document();
        let Some(container) = document.get_element_by_id("playground") else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event.target() else { return };
            let Ok(element) = target.dyn_into::<Element>() else {
                return;
            };
            let Ok(Some(sprite)) = element.closest(".yimo") else {
                return;
            };
            if let Some(id) = sprite.get_attribute("data-id").and_then(|s| s.parse().ok()) {
                click_burst(&mut app.borrow_mut().state, id);
            }
        });
        let _ = container.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_challenge_dialog(app: Rc<RefCell<App>>) {
        let document = document();

        if let Some(btn) = document.get_element_by_id("challenge-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                open_challenge(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mirror the textarea into the response buffer
        if let Some(field) = document.get_element_by_id("challenge-response") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if let Some(field) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlTextAreaElement>().ok())
                {
                    app.borrow_mut().engine.set_response(&field.value());
                }
            });
            let _ =
                field.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("complete-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let note = {
                    let mut a = app.borrow_mut();
                    let App { state, engine, .. } = &mut *a;
                    engine.complete(state, js_sys::Date::now())
                };
                if let Some(note) = note {
                    close_challenge(&app);
                    show_toast(&note.message());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("skip-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let note = app.borrow_mut().engine.skip();
                close_challenge(&app);
                if let Some(note) = note {
                    show_toast(&note.message());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("close-challenge-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().engine.skip();
                close_challenge(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Present a random challenge and populate the dialog
    fn open_challenge(app: &Rc<RefCell<App>>) {
        let document = document();
        let challenge = {
            let mut a = app.borrow_mut();
            if a.engine.phase() == ChallengePhase::Presenting {
                return;
            }
            let App { state, engine, .. } = &mut *a;
            engine.start(&mut state.rng)
        };

        if let Some(el) = document.get_element_by_id("challenge-icon") {
            el.set_text_content(Some(challenge.icon));
        }
        if let Some(el) = document.get_element_by_id("challenge-title") {
            el.set_text_content(Some(challenge.title));
        }
        if let Some(el) = document.get_element_by_id("challenge-desc") {
            el.set_text_content(Some(challenge.description));
        }
        if let Some(el) = document.get_element_by_id("challenge-prompt") {
            el.set_text_content(Some(challenge.prompt));
        }
        if let Some(el) = document.get_element_by_id("challenge-reward") {
            let plural = if challenge.yimo_reward == 1 { "" } else { "s" };
            el.set_text_content(Some(&format!(
                "Complete this challenge to spawn {} new Yimo{}! \u{1F31F}",
                challenge.yimo_reward, plural
            )));
        }
        if let Some(modal) = document.get_element_by_id("challenge-modal") {
            let _ = modal.set_attribute(
                "data-accent",
                challenge.color.css_class().trim_start_matches("bg-"),
            );
        }

        if let Some(field) = document
            .get_element_by_id("challenge-response")
            .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
        {
            field.set_value("");
            field.set_disabled(false);
        }

        // Breathing exercise: hide the field until the countdown elapses
        let gated = challenge.is_time_gated();
        set_hidden(&document, "challenge-response", gated);
        set_hidden(&document, "breathing-pane", !gated);

        match challenge.time_limit_secs {
            Some(limit) => {
                set_hidden(&document, "challenge-timer", false);
                if let Some(el) = document.get_element_by_id("challenge-timer") {
                    el.set_text_content(Some(&format_countdown(limit)));
                }
                start_countdown(app);
            }
            None => set_hidden(&document, "challenge-timer", true),
        }

        set_hidden(&document, "challenge-modal", false);
    }

    /// Drive the active countdown at 1 Hz; reveals or locks the text field
    /// when it elapses
    fn start_countdown(app: &Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let app_tick = app.clone();

        let closure = Closure::<dyn FnMut()>::new(move || {
            let document = document();
            let mut a = app_tick.borrow_mut();
            a.engine.countdown_tick();

            let Some(active) = a.engine.active() else { return };
            if let Some(secs) = active.seconds_left {
                if let Some(el) = document.get_element_by_id("challenge-timer") {
                    el.set_text_content(Some(&format_countdown(secs)));
                }
            }
            if active.countdown_elapsed() {
                if active.response_revealed() {
                    set_hidden(&document, "challenge-response", false);
                    set_hidden(&document, "breathing-pane", true);
                }
                if active.response_locked()
                    && let Some(field) = document
                        .get_element_by_id("challenge-response")
                        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
                {
                    field.set_disabled(true);
                }
            }
        });

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                1000,
            )
            .expect("set_interval failed");
        closure.forget();

        app.borrow_mut().countdown_handle = Some(handle);
    }

    /// Hide the dialog and cancel the countdown. Called on every exit path
    /// (complete, skip, close) so the interval can never outlive the dialog.
    fn close_challenge(app: &Rc<RefCell<App>>) {
        let document = document();
        if let Some(handle) = app.borrow_mut().countdown_handle.take() {
            web_sys::window()
                .expect("no window")
                .clear_interval_with_handle(handle);
        }
        set_hidden(&document, "challenge-modal", true);
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().expect("no window");
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0) as f32;
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0) as f32;
            app.borrow_mut().state.set_viewport(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                "h" | "H" => {
                    a.state.heart_mode = !a.state.heart_mode;
                    log::info!("Heart mode: {}", a.state.heart_mode);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>) {
        {
            let document = document();
            let mut a = app.borrow_mut();
            tick(&mut a.state);
            a.render(&document);
            a.update_hud(&document);
        }
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use glam::Vec2;
    use yimo_playground::challenge::ChallengeEngine;
    use yimo_playground::sim::{PlaygroundState, tick};

    env_logger::init();
    log::info!("Yimo Playground (native) starting...");
    log::info!("The browser UI needs the wasm32 build - this mode runs a headless demo");

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_millis() as f64;

    let mut state = PlaygroundState::new(now_ms as u64, Vec2::new(800.0, 600.0));
    state.start();
    for _ in 0..600 {
        tick(&mut state);
    }
    println!("{} Yimos bouncing after 600 ticks", state.yimos.len());

    let mut engine = ChallengeEngine::new();
    let challenge = engine.start(&mut state.rng);
    println!("Challenge: {} {} - {}", challenge.icon, challenge.title, challenge.prompt);

    engine.set_response("Headless demo response");
    if let Some(limit) = challenge.time_limit_secs {
        for _ in 0..limit {
            engine.countdown_tick();
        }
    }
    if let Some(note) = engine.complete(&mut state, now_ms) {
        println!("{}", note.message());
    }

    let snapshot = serde_json::to_string_pretty(&engine.progress).expect("serialize progress");
    println!("Progress: {snapshot}");
    println!("{} Yimos total", state.yimos.len());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
