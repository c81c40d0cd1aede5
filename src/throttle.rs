use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_COOLDOWN_MS: u64 = 1000;

/// Pure cooldown gate: the first call runs immediately, later calls inside
/// the window are dropped (not queued).
///
/// One instance per controller, reached only through `&mut self`, so the
/// cooldown flag has a single owner and needs no lock. Time comes from
/// `tokio::time`, which tests can pause and advance.
#[derive(Debug)]
pub struct Cooldown {
    window: Duration,
    started: Option<Instant>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            started: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    #[cfg(test)]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a window is open right now.
    pub fn is_active(&self) -> bool {
        self.started
            .is_some_and(|t| t.elapsed() < self.window)
    }

    /// Time left in the current window (zero when idle).
    pub fn remaining(&self) -> Duration {
        self.started
            .map(|t| self.window.saturating_sub(t.elapsed()))
            .unwrap_or(Duration::ZERO)
    }

    /// Run `action` and open a window, unless one is already open.
    ///
    /// Returns `None` when the call was dropped.
    pub fn schedule<R>(&mut self, action: impl FnOnce() -> R) -> Option<R> {
        if self.is_active() {
            crate::debug!("throttle"; "dropped, {}ms left", self.remaining().as_millis());
            return None;
        }
        self.started = Some(Instant::now());
        Some(action())
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::from_millis(DEFAULT_COOLDOWN_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_call_runs_immediately() {
        let mut cooldown = Cooldown::from_millis(500);
        assert!(!cooldown.is_active());
        assert_eq!(cooldown.schedule(|| 1), Some(1));
        assert!(cooldown.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_call_in_window_is_dropped() {
        let mut cooldown = Cooldown::from_millis(500);
        let mut runs = 0;
        cooldown.schedule(|| runs += 1);
        tokio::time::advance(Duration::from_millis(499)).await;
        cooldown.schedule(|| runs += 1);
        assert_eq!(runs, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_again_after_window() {
        let mut cooldown = Cooldown::from_millis(500);
        let mut runs = 0;
        cooldown.schedule(|| runs += 1);
        cooldown.schedule(|| runs += 1);
        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(!cooldown.is_active());
        cooldown.schedule(|| runs += 1);
        assert_eq!(runs, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_call_does_not_extend_window() {
        let mut cooldown = Cooldown::from_millis(500);
        cooldown.schedule(|| ());
        tokio::time::advance(Duration::from_millis(300)).await;
        assert!(cooldown.schedule(|| ()).is_none());
        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(cooldown.schedule(|| ()).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remaining() {
        let mut cooldown = Cooldown::from_millis(1000);
        assert_eq!(cooldown.remaining(), Duration::ZERO);
        cooldown.schedule(|| ());
        tokio::time::advance(Duration::from_millis(400)).await;
        assert_eq!(cooldown.remaining(), Duration::from_millis(600));
    }
}
