//! Browser bindings
//!
//! Exposes a `WebGame` to JavaScript. The page renders from `snapshot()` and
//! forwards button and tube clicks; the tick runs on `setInterval`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::scheduler::{Session, TimerDriver};
use crate::sim::{GameStore, TubeId};

/// `setInterval`-backed timer
#[derive(Default)]
pub struct IntervalTimer {
    handle: Option<i32>,
    callback: Option<js_sys::Function>,
}

impl TimerDriver for IntervalTimer {
    fn arm(&mut self, period_ms: u32) {
        let (Some(window), Some(callback)) = (web_sys::window(), self.callback.as_ref()) else {
            log::error!("Cannot arm timer: no window or callback");
            return;
        };
        match window.set_interval_with_callback_and_timeout_and_arguments_0(callback, period_ms as i32) {
            Ok(handle) => self.handle = Some(handle),
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }

    fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

#[wasm_bindgen]
pub struct WebGame {
    session: Rc<RefCell<Session<IntervalTimer>>>,
    // Keeps the JS function behind the interval alive
    _tick: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let session = Rc::new(RefCell::new(Session::new(
            GameStore::new(seed),
            IntervalTimer::default(),
        )));

        // Weak so dropping the game drops the session (and cancels its timer)
        let weak = Rc::downgrade(&session);
        let tick = Closure::<dyn FnMut()>::new(move || {
            if let Some(session) = weak.upgrade() {
                session.borrow_mut().on_timer_fired();
            }
        });
        session.borrow_mut().timer_mut().callback =
            Some(tick.as_ref().unchecked_ref::<js_sys::Function>().clone());

        log::info!("Heavy Tubes ready (seed {})", seed);
        WebGame {
            session,
            _tick: tick,
        }
    }

    pub fn start(&self) {
        self.session.borrow_mut().start_game();
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&self) {
        self.session.borrow_mut().pause_game();
    }

    #[wasm_bindgen(js_name = clickTube)]
    pub fn click_tube(&self, id: u32) -> Result<(), JsValue> {
        self.session
            .borrow_mut()
            .click_tube(TubeId(id))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// JSON-encoded [`crate::view::Snapshot`]
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.borrow().snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
