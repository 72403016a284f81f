use leptos::prelude::*;
use web_sys::window;

use crate::layout::navigation::PageKey;

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<PageKey>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(PageKey::Dashboard),
        }
    }

    pub fn activate(&self, key: PageKey) {
        self.active.set(key);
        // keep the URL shareable: ?active=<key>
        if let Some(win) = window() {
            let _ = win
                .history()
                .and_then(|h| {
                    h.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&format!("?active={}", key.key())),
                    )
                });
        }
    }

    /// Restore the active page from the query string on startup.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let active_param = search
            .trim_start_matches('?')
            .split('&')
            .find_map(|pair| pair.strip_prefix("active="));
        if let Some(key) = active_param.and_then(PageKey::from_key) {
            self.active.set(key);
        }
    }
}
