//! WASM bridge for the Petri-net editor: mounts the editor onto an SVG page.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the listeners
//! and forwards them:
//!
//! ```js
//! const editor = new PnCanvas();          // throws if the SVG groups are missing
//! editor.load();
//! canvas.addEventListener("mousedown", (e) => editor.pointer_down(e));
//! canvas.addEventListener("wheel", (e) => editor.wheel(e));
//! button.addEventListener("click", () => editor.toolbar("connect"));
//! ```

mod dom;
mod fetch;

use dom::{DomSurface, SurfaceIds};
use pn_core::EditorConfig;
use pn_editor::{Editor, RemoteRequest, ToolbarAction};
use pn_render::svg::DATA_ID;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent, WheelEvent};

/// The main WASM-facing canvas controller.
///
/// Request continuations hold their own handle to the editor and borrow it
/// only while applying the reply; event handlers never await.
#[wasm_bindgen]
pub struct PnCanvas {
    editor: Rc<RefCell<Editor<DomSurface>>>,
}

#[wasm_bindgen]
impl PnCanvas {
    /// Mount onto the page's `#canvas`. `config_json` may override any
    /// `EditorConfig` field, e.g. `{"base_url": "http://localhost:8000"}`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PnCanvas, JsValue> {
        console_error_panic_hook_setup();
        console_logger_setup();

        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => serde_json::from_str::<EditorConfig>(json)
                .map_err(|e| js_sys::Error::new(&format!("bad editor config: {e}")))?,
            _ => EditorConfig::default(),
        };
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| js_sys::Error::new("no document"))?;
        let surface = DomSurface::mount(&document, &SurfaceIds::default())?;

        Ok(Self {
            editor: Rc::new(RefCell::new(Editor::new(surface, config))),
        })
    }

    /// Fetch all nodes, then all edges.
    pub fn load(&self) {
        let editor = Rc::clone(&self.editor);
        wasm_bindgen_futures::spawn_local(async move {
            for request in Editor::<DomSurface>::initial_load() {
                let url = editor.borrow().engine.config.url_for(request.path());
                let reply = fetch::send(&url, &request).await;
                editor.borrow_mut().apply_reply(&request, reply);
            }
        });
    }

    pub fn pointer_down(&self, event: &MouseEvent) {
        let annotation = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.get_attribute(DATA_ID));
        let requests = self.editor.borrow_mut().pointer_down(
            f64::from(event.client_x()),
            f64::from(event.client_y()),
            annotation.as_deref(),
        );
        self.send_all(requests);
    }

    pub fn pointer_move(&self, event: &MouseEvent) {
        let requests = self
            .editor
            .borrow_mut()
            .pointer_move(f64::from(event.client_x()), f64::from(event.client_y()));
        self.send_all(requests);
    }

    pub fn pointer_up(&self, event: &MouseEvent) {
        let requests = self
            .editor
            .borrow_mut()
            .pointer_up(f64::from(event.client_x()), f64::from(event.client_y()));
        self.send_all(requests);
    }

    pub fn pointer_leave(&self) {
        let requests = self.editor.borrow_mut().pointer_leave();
        self.send_all(requests);
    }

    /// Zoom; always swallows the page scroll.
    pub fn wheel(&self, event: &WheelEvent) {
        event.prevent_default();
        let requests = self.editor.borrow_mut().wheel(event.delta_y());
        self.send_all(requests);
    }

    /// Toolbar button by name: `create-place`, `create-transition`,
    /// `connect`, `delete`, `clear`. Returns `false` for unknown names.
    pub fn toolbar(&self, name: &str) -> bool {
        let Some(action) = ToolbarAction::from_name(name) else {
            log::warn!("unknown toolbar action {name:?}");
            return false;
        };
        let requests = self.editor.borrow_mut().toolbar(action);
        self.send_all(requests);
        true
    }

    /// Current mode name.
    pub fn mode(&self) -> String {
        self.editor.borrow().mode().name().to_string()
    }

    /// Standalone SVG of the current scene.
    pub fn export_svg(&self) -> String {
        self.editor.borrow().export_svg()
    }
}

// ─── Internal helpers (not exported to JS) ───────────────────────────────

impl PnCanvas {
    /// Issue each request; its reply is applied whenever it lands.
    fn send_all(&self, requests: Vec<RemoteRequest>) {
        for request in requests {
            let editor = Rc::clone(&self.editor);
            let url = editor.borrow().engine.config.url_for(request.path());
            wasm_bindgen_futures::spawn_local(async move {
                let reply = fetch::send(&url, &request).await;
                editor.borrow_mut().apply_reply(&request, reply);
            });
        }
    }
}

// ─── Console logging & panic hook ────────────────────────────────────────

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

fn console_logger_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        static LOGGER: ConsoleLogger = ConsoleLogger;
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Debug);
        }
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("pn-wasm panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
