use web_sys::{Storage, Window};

use tiltcard_core::{Navigator, SessionStore};

/// `sessionStorage`, treating every storage failure as an absent value.
pub(crate) struct BrowserSession {
    storage: Option<Storage>,
}

impl BrowserSession {
    pub(crate) fn new(window: &Window) -> Self {
        let storage = window.session_storage().ok().flatten();
        if storage.is_none() {
            gloo::console::warn!("session: storage unavailable");
        }
        Self { storage }
    }
}

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            gloo::console::warn!("session: storage set failed", key);
        }
    }
}

pub(crate) struct LocationNavigator {
    window: Window,
}

impl LocationNavigator {
    pub(crate) fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Navigator for LocationNavigator {
    fn replace(&mut self, url: &str) {
        gloo::console::log!("redirect:", url);
        if let Err(err) = self.window.location().replace(url) {
            gloo::console::warn!("redirect: location.replace failed", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn session_flag_round_trips() {
        let window = web_sys::window().unwrap();
        let mut session = BrowserSession::new(&window);
        let key = "tiltcard.test.flag";
        assert_eq!(session.get(key), None);
        session.set(key, "1");
        assert_eq!(session.get(key).as_deref(), Some("1"));
        window
            .session_storage()
            .unwrap()
            .unwrap()
            .remove_item(key)
            .unwrap();
    }
}
