use parking_lot::Mutex;

pub trait Navigator: Send + Sync {
    fn push(&self, route: &str);
}

/// Captures the route a handler navigated to so it can be answered with a redirect.
#[derive(Debug, Default)]
pub struct RedirectNavigator {
    target: Mutex<Option<String>>,
}

impl RedirectNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent route pushed, if any.
    pub fn into_target(self) -> Option<String> {
        self.target.into_inner()
    }
}

impl Navigator for RedirectNavigator {
    fn push(&self, route: &str) {
        tracing::debug!(route, "navigate");
        *self.target.lock() = Some(route.to_string());
    }
}
