use std::thread::sleep;
use std::time::Duration;

/// Spaces out consecutive navigations of one browser session.
///
/// Blocking on purpose: the browser API is synchronous and a session only ever
/// runs on one worker thread.
pub struct RateLimiter {
    delay: Duration,
    request_count: usize,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            request_count: 0,
        }
    }

    pub fn wait(&mut self) {
        if self.should_wait() {
            self.apply_delay();
        }
        self.increment();
    }

    pub fn request_count(&self) -> usize {
        self.request_count
    }

    fn should_wait(&self) -> bool {
        self.request_count > 0 && !self.delay.is_zero()
    }

    fn apply_delay(&self) {
        sleep(self.delay);
    }

    fn increment(&mut self) {
        self.request_count += 1;
    }
}
