/// Trailing-edge debounce over host timestamps (milliseconds).
///
/// Every `notify` replaces the pending value and restarts the quiet period;
/// `poll` yields the latest value once no notification has arrived for
/// `quiet_ms`.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    quiet_ms: f64,
    pending: Option<(T, f64)>,
}

impl<T> Debounce<T> {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms: quiet_ms.max(0.0),
            pending: None,
        }
    }

    pub fn notify(&mut self, value: T, now_ms: f64) {
        self.pending = Some((value, now_ms));
    }

    /// Take the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now_ms - *at >= self.quiet_ms => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Drop any pending value without firing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
