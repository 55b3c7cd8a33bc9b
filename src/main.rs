//! Carpet Dodge entry point
//!
//! Browser builds drive the game from requestAnimationFrame and draw it with
//! plain DOM nodes. Native builds run a headless session, handy for checking
//! balance changes and seeds.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, KeyboardEvent};

    use carpet_dodge::audio::AudioManager;
    use carpet_dodge::input::handle_key;
    use carpet_dodge::sim::{GamePhase, GameState};
    use carpet_dodge::{Session, Settings, Snapshot, Tuning};

    /// DOM nodes the renderer writes into
    struct View {
        playfield: Element,
        /// Playfield style without the scroll offset
        playfield_style: String,
        player: Element,
        obstacle_layer: Element,
        /// Reused obstacle nodes; extras are hidden
        obstacle_pool: Vec<Element>,
        score: Element,
        overlay: Element,
        overlay_title: Element,
        overlay_text: Element,
        button: Element,
        last_phase: Option<GamePhase>,
        last_score: Option<u64>,
    }

    fn div(document: &Document, parent: &Element, style: &str) -> Result<Element, JsValue> {
        let el = document.create_element("div")?;
        el.set_attribute("style", style)?;
        parent.append_child(&el)?;
        Ok(el)
    }

    impl View {
        fn build(document: &Document, tuning: &Tuning) -> Result<Self, JsValue> {
            let body = document
                .body()
                .ok_or_else(|| JsValue::from_str("no body"))?;

            let root = document.create_element("div")?;
            root.set_attribute(
                "style",
                "display:flex;align-items:center;justify-content:center;min-height:100vh;\
                 background:linear-gradient(#60a5fa,#2563eb);font-family:sans-serif;",
            )?;
            body.append_child(&root)?;

            let playfield_style = format!(
                "position:relative;overflow:hidden;width:{}px;height:{}px;\
                 border:4px solid #facc15;border-radius:8px;\
                 background:repeating-linear-gradient(90deg,#1e3a8a 0 160px,#312e81 160px 320px);",
                tuning.field_width, tuning.lane_height
            );
            let playfield = div(document, &root, &playfield_style)?;

            let obstacle_layer = div(document, &playfield, "position:absolute;inset:0;")?;

            let player = div(
                document,
                &playfield,
                &format!(
                    "position:absolute;left:0;top:0;width:{0}px;height:{0}px;",
                    tuning.player_size
                ),
            )?;
            div(
                document,
                &player,
                "position:absolute;left:10%;right:10%;top:45%;bottom:25%;\
                 background:#7e22ce;border:3px solid #facc15;border-radius:6px;",
            )?;

            let score = div(
                document,
                &playfield,
                "position:absolute;top:16px;right:16px;padding:8px 12px;border-radius:8px;\
                 background:rgba(88,28,135,0.75);color:white;font-weight:bold;font-size:24px;",
            )?;

            let hint = div(
                document,
                &playfield,
                "position:absolute;bottom:16px;left:16px;padding:8px;border-radius:8px;\
                 background:rgba(88,28,135,0.75);color:white;font-size:14px;",
            )?;
            hint.set_text_content(Some("Use ⬆ and ⬇ to move, Esc to pause, I for demo"));

            let overlay = div(
                document,
                &playfield,
                "position:absolute;inset:0;display:flex;align-items:center;justify-content:center;\
                 background:rgba(0,0,0,0.75);",
            )?;
            let panel = div(
                document,
                &overlay,
                "text-align:center;color:white;padding:32px;background:#581c87;border-radius:8px;",
            )?;
            let overlay_title = div(document, &panel, "font-size:36px;font-weight:bold;margin-bottom:16px;")?;
            let overlay_text = div(document, &panel, "font-size:24px;margin-bottom:24px;")?;
            let button = document.create_element("button")?;
            button.set_attribute(
                "style",
                "padding:12px 24px;background:#facc15;color:#581c87;font-size:20px;font-weight:bold;\
                 border:none;cursor:pointer;",
            )?;
            panel.append_child(&button)?;

            Ok(Self {
                playfield,
                playfield_style,
                player,
                obstacle_layer,
                obstacle_pool: Vec::new(),
                score,
                overlay,
                overlay_title,
                overlay_text,
                button,
                last_phase: None,
                last_score: None,
            })
        }

        fn render(
            &mut self,
            document: &Document,
            snapshot: &Snapshot,
            tuning: &Tuning,
        ) -> Result<(), JsValue> {
            self.playfield.set_attribute(
                "style",
                &format!(
                    "{}background-position:{}px 0;",
                    self.playfield_style,
                    snapshot.backdrop_offset()
                ),
            )?;

            self.player.set_attribute(
                "style",
                &format!(
                    "position:absolute;left:0;top:0;width:{0}px;height:{0}px;\
                     transform:translate({1}px,{2}px);",
                    tuning.player_size, snapshot.player.x, snapshot.player.y
                ),
            )?;

            while self.obstacle_pool.len() < snapshot.obstacles.len() {
                let el = div(document, &self.obstacle_layer, "display:none;")?;
                self.obstacle_pool.push(el);
            }
            for (i, el) in self.obstacle_pool.iter().enumerate() {
                match snapshot.obstacles.get(i) {
                    Some(o) => el.set_attribute(
                        "style",
                        &format!(
                            "position:absolute;left:0;top:0;width:{0}px;height:{0}px;\
                             background:#78716c;border:2px solid #44403c;border-radius:30%;\
                             transform:translate({1}px,{2}px) rotate({3}deg);",
                            tuning.obstacle_size, o.x, o.y, o.rotation
                        ),
                    )?,
                    None => el.set_attribute("style", "display:none;")?,
                }
            }

            if self.last_score != Some(snapshot.score) {
                self.score
                    .set_text_content(Some(&format!("Score: {}", snapshot.score)));
                self.last_score = Some(snapshot.score);
            }

            if self.last_phase != Some(snapshot.phase) {
                self.render_overlay(snapshot)?;
                self.last_phase = Some(snapshot.phase);
            }
            Ok(())
        }

        fn render_overlay(&self, snapshot: &Snapshot) -> Result<(), JsValue> {
            let (visible, title, text, button) = match snapshot.phase {
                GamePhase::Idle => (true, "Carpet Dodge", "Dodge the rocks!".to_string(), "Start"),
                GamePhase::Paused => (true, "Paused", "Press Esc to resume".to_string(), "Resume"),
                GamePhase::Over => (
                    true,
                    "Game Over!",
                    format!("Final Score: {}", snapshot.score),
                    "Play Again",
                ),
                GamePhase::Running => (false, "", String::new(), ""),
            };
            self.overlay.set_attribute(
                "style",
                if visible {
                    "position:absolute;inset:0;display:flex;align-items:center;\
                     justify-content:center;background:rgba(0,0,0,0.75);"
                } else {
                    "display:none;"
                },
            )?;
            self.overlay_title.set_text_content(Some(title));
            self.overlay_text.set_text_content(Some(&text));
            self.button.set_text_content(Some(button));
            Ok(())
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        audio: AudioManager,
        settings: Settings,
        document: Document,
        view: View,
        last_time: f64,
    }

    impl Game {
        /// Forward transitions to the audio manager
        fn pump_events(&mut self) {
            for event in self.session.drain_events() {
                self.audio.handle(event);
            }
        }

        /// Overlay button: start, resume or play again depending on phase
        fn press_button(&mut self) {
            match self.session.state().phase {
                GamePhase::Idle => self.session.start_game(),
                GamePhase::Paused => self.session.toggle_pause(),
                GamePhase::Over => self.session.restart_game(),
                GamePhase::Running => {}
            }
            self.audio.resume();
            self.pump_events();
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            self.session.update(dt);
            self.pump_events();

            let snapshot = self.session.snapshot();
            let tuning = &self.session.state().tuning;
            if let Err(e) = self.view.render(&self.document, &snapshot, tuning) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        log::info!("Carpet Dodge starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::load();
        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let state = GameState::with_tuning(seed, tuning)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut session = Session::new(state);
        session.set_autopilot(settings.autopilot);
        log::info!("Game initialized with seed: {}", seed);

        let view = View::build(&document, &session.state().tuning)?;
        let game = Rc::new(RefCell::new(Game {
            session,
            audio: AudioManager::new(&settings),
            settings,
            document,
            view,
            last_time: 0.0,
        }));

        setup_keyboard(&window, game.clone())?;
        setup_button(game.clone())?;
        setup_auto_pause(&window, game.clone())?;

        request_animation_frame(game);
        log::info!("Carpet Dodge running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if pressed {
                    let phase = g.session.state().phase;
                    g.audio.key_pressed(phase);
                }
                if handle_key(&mut g.session, &event.key(), pressed, event.repeat()) {
                    event.prevent_default();
                }
                if g.settings.autopilot != g.session.autopilot() {
                    g.settings.autopilot = g.session.autopilot();
                    g.settings.save();
                }
                g.pump_events();
            });
            window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_button(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let button = game.borrow().view.button.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().press_button();
        });
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_auto_pause(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            if g.settings.pause_on_blur && g.session.state().is_running() {
                g.session.toggle_pause();
                g.pump_events();
                log::info!("Auto-paused (window blur)");
            }
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use carpet_dodge::audio::cue_for;
    use carpet_dodge::{Session, Tuning};

    /// Run Carpet Dodge without a display
    #[derive(Parser, Debug)]
    #[command(name = "carpet-dodge", version, about)]
    struct Args {
        /// RNG seed for the spawner
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Stop after this many simulation ticks (60 per second)
        #[arg(long, default_value_t = 3600)]
        ticks: u64,

        /// JSON file overriding balance values
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Let the demo autopilot steer
        #[arg(long)]
        autopilot: bool,

        /// Print the final frame as JSON
        #[arg(long)]
        json: bool,
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let args = Args::parse();

        let tuning = match &args.tuning {
            Some(path) => Tuning::load_file(path)?,
            None => Tuning::default(),
        };
        let frame_dt = tuning.sim_interval();

        let mut session = Session::with_tuning(args.seed, tuning)?;
        session.set_autopilot(args.autopilot);
        session.start_game();
        log::info!("Headless run with seed {}", args.seed);

        let mut ticks = 0u64;
        while ticks < args.ticks && session.state().is_running() {
            ticks += session.update(frame_dt) as u64;
            for event in session.drain_events() {
                log::info!("{:?} ({:?})", event, cue_for(event));
            }
        }
        for event in session.drain_events() {
            log::info!("{:?} ({:?})", event, cue_for(event));
        }

        let snapshot = session.snapshot();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            println!(
                "{:?} after {} ticks: score {}, speed {:.3}, {} obstacles live",
                snapshot.phase,
                ticks,
                snapshot.score,
                snapshot.speed,
                snapshot.obstacles.len()
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    headless::run()
}
