use crate::ports::{DelayTimer, Navigator, SessionStore};

/// Value stored under the redirect key once the redirect has fired.
pub const REDIRECT_FLAG_VALUE: &str = "1";

/// One-shot redirect: armed once per page, remembered for the session.
#[derive(Clone, Debug)]
pub struct RedirectGate {
    url: String,
    key: String,
    delay_ms: u32,
    pending: bool,
}

impl RedirectGate {
    pub fn new(url: impl Into<String>, key: impl Into<String>, delay_ms: u32) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            delay_ms,
            pending: false,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn already_redirected(&self, store: &dyn SessionStore) -> bool {
        store.get(&self.key).as_deref() == Some(REDIRECT_FLAG_VALUE)
    }

    /// Navigates away immediately if this session has already redirected.
    pub fn check_on_load(&self, store: &dyn SessionStore, navigator: &mut dyn Navigator) -> bool {
        if !self.already_redirected(store) {
            return false;
        }
        navigator.replace(&self.url);
        true
    }

    /// Schedules the delayed redirect. Returns false if one is already
    /// pending.
    pub fn arm(&mut self, timer: &mut dyn DelayTimer) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        timer.schedule(self.delay_ms);
        true
    }

    /// Timer expiry: record the flag, then leave.
    pub fn fire(&mut self, store: &mut dyn SessionStore, navigator: &mut dyn Navigator) {
        store.set(&self.key, REDIRECT_FLAG_VALUE);
        navigator.replace(&self.url);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        store: HashMap<String, String>,
        scheduled: Vec<u32>,
        visited: Vec<String>,
    }

    impl SessionStore for Recorder {
        fn get(&self, key: &str) -> Option<String> {
            self.store.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) {
            self.store.insert(key.to_string(), value.to_string());
        }
    }

    impl Navigator for Recorder {
        fn replace(&mut self, url: &str) {
            self.visited.push(url.to_string());
        }
    }

    impl DelayTimer for Recorder {
        fn schedule(&mut self, delay_ms: u32) {
            self.scheduled.push(delay_ms);
        }
    }

    fn gate() -> RedirectGate {
        RedirectGate::new("https://example.com", "flag", 2000)
    }

    #[test]
    fn arm_is_idempotent() {
        let mut gate = gate();
        let mut timer = Recorder::default();
        assert!(gate.arm(&mut timer));
        assert!(!gate.arm(&mut timer));
        assert!(!gate.arm(&mut timer));
        assert_eq!(timer.scheduled, vec![2000]);
    }

    #[test]
    fn fire_sets_flag_then_navigates() {
        let mut gate = gate();
        let mut store = Recorder::default();
        let mut navigator = Recorder::default();
        gate.arm(&mut Recorder::default());
        gate.fire(&mut store, &mut navigator);
        assert_eq!(store.store.get("flag").map(String::as_str), Some("1"));
        assert_eq!(navigator.visited, vec!["https://example.com".to_string()]);
    }

    #[test]
    fn load_check_only_redirects_when_flag_set() {
        let gate = gate();
        let mut store = Recorder::default();
        let mut navigator = Recorder::default();
        assert!(!gate.check_on_load(&store, &mut navigator));
        assert!(navigator.visited.is_empty());

        store.set("flag", "1");
        assert!(gate.check_on_load(&store, &mut navigator));
        assert_eq!(navigator.visited.len(), 1);
    }
}
