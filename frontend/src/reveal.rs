use gloo_timers::callback::Timeout;

/// A pending reveal. Dropping the handle cancels it, so a page that
/// unmounts mid-animation never touches its state afterwards.
pub struct RevealHandle {
    timeout: Option<Timeout>,
}

impl RevealHandle {
    pub fn cancel(mut self) {
        if let Some(timeout) = self.timeout.take() {
            timeout.cancel();
        }
    }
}

/// Hands `result` to `on_reveal` once the wheel animation of `ms`
/// milliseconds is over. The outcome is already final when this is called;
/// only its display waits.
pub fn schedule_reveal<T: 'static>(result: T, ms: u32, on_reveal: impl FnOnce(T) + 'static) -> RevealHandle {
    let timeout = Timeout::new(ms, move || on_reveal(result));
    RevealHandle { timeout: Some(timeout) }
}
