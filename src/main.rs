//! Heart Quest entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element};

    use heart_quest::consts::*;
    use heart_quest::reveal::{Reveal, RevealPhase, REVEAL_TEXT};
    use heart_quest::sched::Scheduler;
    use heart_quest::sim::{
        scatter_hearts, tick, DirSet, GameConfig, GameState, Key, RenderSnapshot, TriviaGate,
        TriviaQuestion, default_questions, feedback_message,
    };
    use heart_quest::stage::{Stage, StageFlow};
    use heart_quest::Settings;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Presentation-side deferred work (answer feedback delay)
    #[derive(Debug, Clone, Copy)]
    enum AppTask {
        SubmitAnswer { choice: usize },
    }

    /// Application state holding the stage flow and the live session
    struct App {
        settings: Settings,
        stage: StageFlow,
        game: Option<GameState>,
        /// Standalone question run for the legacy interlude flow
        interlude: Option<TriviaGate>,
        reveal: Option<Reveal>,
        rng: Pcg32,
        pending: Scheduler<AppTask>,
        /// An answer was clicked; feedback is showing until the submit task
        feedback_open: bool,
        /// Sparkle ids currently present in the DOM
        dom_sparkles: Vec<u32>,
        confetti_built: bool,
    }

    impl App {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            Self {
                stage: StageFlow::new(settings.trivia_interlude),
                settings,
                game: None,
                interlude: None,
                reveal: None,
                rng: Pcg32::seed_from_u64(seed),
                pending: Scheduler::new(),
                feedback_open: false,
                dom_sparkles: Vec::new(),
                confetti_built: false,
            }
        }

        /// The gate currently in charge of questions: the game session's
        /// during play, the interlude's in the legacy flow
        fn active_gate(&mut self) -> Option<&mut TriviaGate> {
            match self.stage.current() {
                Stage::Game => self.game.as_mut().map(|g| &mut g.trivia),
                Stage::Trivia => self.interlude.as_mut(),
                _ => None,
            }
        }

        fn gate_ref(&self) -> Option<&TriviaGate> {
            match self.stage.current() {
                Stage::Game => self.game.as_ref().map(|g| &g.trivia),
                Stage::Trivia => self.interlude.as_ref(),
                _ => None,
            }
        }

        /// One animation frame: apply deferred work, advance whichever
        /// stage is live, then redraw
        fn frame(&mut self, document: &Document, now: f64) {
            for task in self.pending.drain_due(now) {
                match task {
                    AppTask::SubmitAnswer { choice } => {
                        if let Some(gate) = self.active_gate() {
                            gate.answer(choice);
                        }
                        self.feedback_open = false;
                        clear_answer_feedback(document);
                    }
                }
            }

            if let Some(stage) = self.stage.tick(now) {
                self.enter_stage(document, stage, now);
            }

            match self.stage.current() {
                Stage::Landing => {}
                Stage::Game => {
                    if let Some(game) = &mut self.game {
                        tick(game, now);
                        if game.is_finished() {
                            self.stage.advance(now);
                        }
                    }
                    self.render_game(document, now);
                }
                Stage::Trivia => {
                    if let Some(gate) = &mut self.interlude {
                        gate.open_next();
                        let done = !gate.is_open() && gate.remaining() == 0;
                        if done && !self.feedback_open {
                            self.stage.advance(now);
                        }
                    }
                }
                Stage::Reveal => {
                    if let Some(reveal) = &mut self.reveal {
                        reveal.tick(now);
                    }
                    self.render_reveal(document, now);
                }
            }

            self.render_chrome(document, now);
        }

        /// Build/tear down per-stage state on a landed switch
        fn enter_stage(&mut self, document: &Document, stage: Stage, now: f64) {
            match stage {
                Stage::Landing => {}
                Stage::Game => {
                    let seed = js_sys::Date::now() as u64;
                    // In the interlude flow questions run after the game,
                    // so the in-game gate gets none
                    let questions = if self.settings.trivia_interlude {
                        Vec::new()
                    } else {
                        load_questions()
                    };
                    let mut state = GameState::new(seed, GameConfig::default(), questions);
                    scatter_hearts(&mut state);
                    build_heart_dom(document, &state);
                    self.dom_sparkles.clear();
                    self.game = Some(state);
                    log::info!("Game session started with seed: {seed}");
                }
                Stage::Trivia => {
                    self.teardown_game();
                    let mut gate = TriviaGate::new(load_questions());
                    gate.enqueue_all();
                    self.interlude = Some(gate);
                }
                Stage::Reveal => {
                    self.teardown_game();
                    self.interlude = None;
                    self.reveal = Some(Reveal::new(now));
                }
            }
        }

        /// Dropping the session drops its scheduler; invalidate app-level
        /// tasks too so nothing fires into the next stage
        fn teardown_game(&mut self) {
            self.game = None;
            self.pending.invalidate();
            self.feedback_open = false;
        }

        /// An option button was clicked while a question is up
        fn on_answer(&mut self, document: &Document, choice: usize, now: f64) {
            if self.feedback_open {
                return;
            }
            let Some(gate) = self.gate_ref() else { return };
            let Some(question) = gate.current() else {
                return;
            };
            let index = gate.current_index().unwrap_or(0);
            let correct = choice == question.correct_index;
            let correct_choice = question.correct_index;

            self.feedback_open = true;
            self.pending
                .schedule(now + TRIVIA_FEEDBACK_MS, AppTask::SubmitAnswer { choice });
            show_answer_feedback(document, choice, correct_choice, correct, index);
        }

        fn on_yes(&mut self) {
            if let Some(reveal) = &mut self.reveal {
                reveal.choose_yes(&mut self.rng);
            }
        }

        /// Stage visibility, fade class, trivia dialog
        fn render_chrome(&self, document: &Document, _now: f64) {
            let stage = self.stage.current();
            show(document, "landing", stage == Stage::Landing);
            show(document, "game", stage == Stage::Game);
            show(document, "reveal", stage == Stage::Reveal);

            let dialog_up =
                self.feedback_open || self.gate_ref().is_some_and(|gate| gate.is_open());
            show(document, "trivia", dialog_up);
            if dialog_up {
                self.render_trivia_dialog(document);
            }

            if let Some(app_el) = document.get_element_by_id("app") {
                let fading = self.stage.is_fading() && !self.settings.reduced_motion;
                toggle_class(&app_el, "faded", fading);
            }

            show(
                document,
                "touch-pad",
                stage == Stage::Game && self.settings.show_touch_controls,
            );
        }

        fn render_game(&mut self, document: &Document, now: f64) {
            let Some(game) = &self.game else { return };
            let snap = game.snapshot(now);

            if let Some(player) = document.get_element_by_id("player") {
                let _ = player.set_attribute(
                    "style",
                    &format!("left:{}px;top:{}px", snap.player.x, snap.player.y),
                );
                let _ = player.set_attribute("class", snap.sprite.css_class());
            }

            for item in &snap.items {
                if let Some(el) = document.get_element_by_id(&format!("heart-{}", item.id)) {
                    toggle_class(&el, "hidden", !item.visible);
                }
            }

            self.sync_sparkles(document, &snap);

            if let Some(el) = document.get_element_by_id("hud-count") {
                el.set_text_content(Some(&format!("{} / {}", snap.collected, snap.required)));
            }

            show(document, "complete-banner", snap.complete);
        }

        /// Sparkles come and go between frames; rebuild only on change
        fn sync_sparkles(&mut self, document: &Document, snap: &RenderSnapshot) {
            let ids: Vec<u32> = snap.sparkles.iter().map(|s| s.id).collect();
            if ids == self.dom_sparkles {
                return;
            }
            self.dom_sparkles = ids;

            let Some(container) = document.get_element_by_id("sparkles") else {
                return;
            };
            container.set_inner_html("");
            let hide_cosmetics = self.settings.reduced_motion;
            for sparkle in &snap.sparkles {
                if hide_cosmetics {
                    continue;
                }
                if let Ok(el) = document.create_element("div") {
                    let _ = el.set_attribute("class", "sparkle");
                    let _ = el.set_attribute(
                        "style",
                        &format!("left:{}px;top:{}px", sparkle.x, sparkle.y),
                    );
                    el.set_text_content(Some("\u{2728}"));
                    let _ = container.append_child(&el);
                }
            }
        }

        fn render_trivia_dialog(&self, document: &Document) {
            let Some(gate) = self.gate_ref() else { return };
            let Some(question) = gate.current() else {
                return;
            };

            if let Some(el) = document.get_element_by_id("trivia-question") {
                el.set_text_content(Some(&question.question));
            }
            for (i, option) in question.options.iter().enumerate().take(4) {
                if let Some(btn) = document.get_element_by_id(&format!("option-{i}")) {
                    btn.set_text_content(Some(option));
                    toggle_class(&btn, "hidden", false);
                }
            }
            for i in question.options.len()..4 {
                if let Some(btn) = document.get_element_by_id(&format!("option-{i}")) {
                    toggle_class(&btn, "hidden", true);
                }
            }
        }

        fn render_reveal(&mut self, document: &Document, now: f64) {
            let Some(reveal) = &self.reveal else { return };

            let typed: String = REVEAL_TEXT.chars().take(reveal.typed_chars(now)).collect();
            if let Some(el) = document.get_element_by_id("typed-text") {
                el.set_text_content(Some(&typed));
            }

            let phase = reveal.phase();
            show(document, "typed-line", phase == RevealPhase::Typing);
            show(document, "reveal-question", phase == RevealPhase::Question);
            show(
                document,
                "reveal-buttons",
                phase == RevealPhase::Question && reveal.buttons_visible(now),
            );
            show(document, "finale", phase == RevealPhase::Finale);

            if phase == RevealPhase::Finale && !self.confetti_built {
                self.confetti_built = true;
                build_confetti_dom(document, reveal);
            }
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            toggle_class(&el, "hidden", !visible);
        }
    }

    fn toggle_class(el: &Element, class: &str, on: bool) {
        let list = el.class_list();
        if on {
            let _ = list.add_1(class);
        } else {
            let _ = list.remove_1(class);
        }
    }

    /// Personalized question list from LocalStorage, falling back to the
    /// built-in one
    fn load_questions() -> Vec<TriviaQuestion> {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item("heart_quest_questions").ok())
            .flatten();
        if let Some(json) = stored {
            match serde_json::from_str::<Vec<TriviaQuestion>>(&json) {
                Ok(questions) if !questions.is_empty() => {
                    log::info!("Loaded {} custom questions", questions.len());
                    return questions;
                }
                Ok(_) => log::warn!("Custom question list is empty, using defaults"),
                Err(e) => log::warn!("Bad custom question list ({e}), using defaults"),
            }
        }
        default_questions()
    }

    fn build_heart_dom(document: &Document, state: &GameState) {
        let Some(container) = document.get_element_by_id("hearts") else {
            return;
        };
        container.set_inner_html("");
        for heart in &state.hearts {
            if let Ok(el) = document.create_element("div") {
                let _ = el.set_attribute("id", &format!("heart-{}", heart.id));
                let _ = el.set_attribute("class", "heart");
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{}px;top:{}px;animation-delay:{}ms",
                        heart.pos.x,
                        heart.pos.y,
                        heart.id * 200
                    ),
                );
                let _ = container.append_child(&el);
            }
        }
    }

    fn build_confetti_dom(document: &Document, reveal: &Reveal) {
        let Some(container) = document.get_element_by_id("confetti") else {
            return;
        };
        container.set_inner_html("");
        for piece in reveal.confetti() {
            if let Ok(el) = document.create_element("div") {
                let _ = el.set_attribute("class", "confetti-heart");
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{}%;animation-delay:{}ms;animation-duration:{}ms;transform:rotate({}deg)",
                        piece.left_pct, piece.delay_ms, piece.fall_ms, piece.rotation_deg
                    ),
                );
                let _ = container.append_child(&el);
            }
        }
    }

    fn show_answer_feedback(
        document: &Document,
        choice: usize,
        correct_choice: usize,
        correct: bool,
        question_index: usize,
    ) {
        if let Some(btn) = document.get_element_by_id(&format!("option-{correct_choice}")) {
            toggle_class(&btn, "correct", true);
        }
        if !correct {
            if let Some(btn) = document.get_element_by_id(&format!("option-{choice}")) {
                toggle_class(&btn, "incorrect", true);
            }
        }
        if let Some(el) = document.get_element_by_id("trivia-feedback") {
            el.set_text_content(Some(feedback_message(correct, question_index)));
            toggle_class(&el, "hidden", false);
        }
    }

    fn clear_answer_feedback(document: &Document) {
        for i in 0..4 {
            if let Some(btn) = document.get_element_by_id(&format!("option-{i}")) {
                toggle_class(&btn, "correct", false);
                toggle_class(&btn, "incorrect", false);
            }
        }
        if let Some(el) = document.get_element_by_id("trivia-feedback") {
            el.set_text_content(Some(""));
            toggle_class(&el, "hidden", true);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Heart Quest starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));

        setup_start_button(app.clone());
        setup_keyboard(app.clone());
        setup_touch_pad(app.clone());
        setup_trivia_buttons(app.clone());
        setup_reveal_buttons(app.clone());

        request_animation_frame(app);

        log::info!("Heart Quest running!");
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn setup_start_button(app: Rc<RefCell<App>>) {
        if let Some(btn) = document().get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let now = js_sys::Date::now();
                app.borrow_mut().stage.advance(now);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(key) = Key::parse(&event.key()) {
                    event.prevent_default();
                    let mut a = app.borrow_mut();
                    if let Some(game) = &mut a.game {
                        game.input.press(key);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(key) = Key::parse(&event.key()) {
                    let mut a = app.borrow_mut();
                    if let Some(game) = &mut a.game {
                        game.input.release(key);
                    }
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_pad(app: Rc<RefCell<App>>) {
        let pads = [
            ("touch-up", DirSet { up: true, ..DirSet::default() }),
            ("touch-down", DirSet { down: true, ..DirSet::default() }),
            ("touch-left", DirSet { left: true, ..DirSet::default() }),
            ("touch-right", DirSet { right: true, ..DirSet::default() }),
        ];

        for (id, dirs) in pads {
            let Some(btn) = document().get_element_by_id(id) else {
                continue;
            };

            // Press: replace the whole touch direction-set
            for event_name in ["touchstart", "mousedown"] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    let mut a = app.borrow_mut();
                    if let Some(game) = &mut a.game {
                        game.input.set_touch(dirs);
                    }
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }

            // Release: clear all touch directions
            for event_name in ["touchend", "mouseup", "mouseleave"] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    let mut a = app.borrow_mut();
                    if let Some(game) = &mut a.game {
                        game.input.clear_touch();
                    }
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_trivia_buttons(app: Rc<RefCell<App>>) {
        for choice in 0..4usize {
            let Some(btn) = document().get_element_by_id(&format!("option-{choice}")) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let now = js_sys::Date::now();
                let document = document();
                app.borrow_mut().on_answer(&document, choice, now);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_reveal_buttons(app: Rc<RefCell<App>>) {
        for id in ["yes-btn", "yes-obviously-btn"] {
            let Some(btn) = document().get_element_by_id(id) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().on_yes();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        {
            let document = document();
            // One shared clock for the sim, the schedulers and the fades
            let now = js_sys::Date::now();
            app.borrow_mut().frame(&document, now);
        }
        request_animation_frame(app);
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
    log::info!("Heart Quest (native) starting...");

    // Headless demo: play one scripted session against the real sim
    println!("\nRunning headless session...");
    run_headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless_session() {
    use heart_quest::sim::{
        DirSet, GameConfig, GameState, default_questions, scatter_hearts, tick,
    };
    use heart_quest::sprite_center;

    let mut state = GameState::new(0xC0FFEE, GameConfig::default(), default_questions());
    scatter_hearts(&mut state);

    let frame_ms = 16.0;
    let mut now = 0.0;
    let mut frames: u64 = 0;

    while !state.is_finished() && frames < 200_000 {
        steer_to_nearest_heart(&mut state);
        tick(&mut state, now);

        // Answer every question correctly, immediately
        if state.trivia.is_open() {
            if let Some(correct) = state.trivia.current().map(|q| q.correct_index) {
                state.trivia.answer(correct);
            }
        }

        now += frame_ms;
        frames += 1;
    }

    assert!(state.is_finished(), "session did not complete");
    println!(
        "\u{2713} Collected {}/{} hearts in {:.1} simulated seconds",
        state.collected_count,
        state.config.required_hearts,
        now / 1000.0
    );

    fn steer_to_nearest_heart(state: &mut GameState) {
        let player = state.player_center();
        let target = state
            .hearts
            .iter()
            .filter(|h| !h.collected)
            .map(|h| sprite_center(h.pos, state.config.heart_size))
            .min_by(|a, b| {
                a.distance(player)
                    .partial_cmp(&b.distance(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        match target {
            Some(t) => {
                let delta = t - player;
                state.input.set_touch(DirSet {
                    up: delta.y < -2.0,
                    down: delta.y > 2.0,
                    left: delta.x < -2.0,
                    right: delta.x > 2.0,
                });
            }
            None => state.input.clear_touch(),
        }
    }
}
