//! Exposure Tracker Module
//!
//! Maintains a sunbathing session clock and a derived tan-progress metric.
//! [`ExposureSession`] is the pure state machine; [`ExposureTimer`] is the
//! scheduling driver that ticks it once per second of wall-clock time while
//! the session is running.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Maximum tan progress percentage
const PROGRESS_CAP: f64 = 100.0;

/// A single sunbathing session: elapsed time and derived tan progress.
///
/// Pure state, no I/O, never persisted. Progress accumulates at
/// `uv_index / 100` percent per tick and never exceeds 100. The UV index is
/// expected to be non-negative; rejecting negative values is the caller's
/// responsibility since the accumulation rate is undefined for them.
#[derive(Debug, Clone)]
pub struct ExposureSession {
    elapsed_seconds: u64,
    progress_percent: f64,
    running: bool,
    uv_index: f64,
}

impl Default for ExposureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ExposureSession {
    /// Create a session in the zero state
    #[must_use]
    pub fn new() -> Self {
        Self {
            elapsed_seconds: 0,
            progress_percent: 0.0,
            running: false,
            uv_index: 0.0,
        }
    }

    /// Seconds accumulated while running
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Tan progress in [0, 100]
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    /// Whether ticks currently advance the session
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// UV index applied by subsequent ticks
    #[must_use]
    pub fn uv_index(&self) -> f64 {
        self.uv_index
    }

    /// Start accumulating. No-op if already running.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop accumulating, preserving elapsed time and progress. No-op if
    /// already paused.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Return to the zero state unconditionally
    pub fn reset(&mut self) {
        self.elapsed_seconds = 0;
        self.progress_percent = 0.0;
        self.running = false;
    }

    /// Advance the session by one second of exposure.
    ///
    /// Has no effect while paused. Increments elapsed time by exactly one
    /// second and progress by `uv_index / 100`, capped at 100.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.elapsed_seconds += 1;
        self.progress_percent = (self.progress_percent + self.uv_index / 100.0).min(PROGRESS_CAP);
    }

    /// Replace the UV index used by subsequent ticks. Takes effect on the
    /// next tick, not retroactively.
    pub fn set_uv_index(&mut self, uv_index: f64) {
        self.uv_index = uv_index;
    }

    /// Format elapsed time as zero-padded minutes and seconds ("MM:SS")
    #[must_use]
    pub fn format_elapsed(&self) -> String {
        let minutes = self.elapsed_seconds / 60;
        let seconds = self.elapsed_seconds % 60;
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Cancellable once-per-second driver for an [`ExposureSession`].
///
/// Starting spawns a periodic task whose first tick fires one period after
/// start; pausing or resetting aborts the task before touching the session,
/// so no tick lands after a pause and before the next start. Starting while
/// already running does not stack tasks.
#[derive(Debug)]
pub struct ExposureTimer {
    session: Arc<Mutex<ExposureSession>>,
    ticker: Option<JoinHandle<()>>,
}

impl Default for ExposureTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExposureTimer {
    /// Create a timer around a fresh zero-state session
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: Arc::new(Mutex::new(ExposureSession::new())),
            ticker: None,
        }
    }

    /// Shared handle to the underlying session
    #[must_use]
    pub fn session(&self) -> Arc<Mutex<ExposureSession>> {
        Arc::clone(&self.session)
    }

    /// Start the session and the periodic tick task. No-op if running.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime context; the tick task is
    /// spawned onto the ambient runtime.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            return;
        }

        self.session.lock().start();
        debug!("Exposure timer started");

        let session = Arc::clone(&self.session);
        let period = Duration::from_secs(1);
        let first_tick = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                session.lock().tick();
            }
        });
        self.ticker = Some(handle);
    }

    /// Cancel the tick task and pause the session, preserving elapsed time
    /// and progress. No-op if already paused.
    pub fn pause(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
        self.session.lock().pause();
        debug!("Exposure timer paused");
    }

    /// Cancel the tick task and return the session to the zero state
    pub fn reset(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
        self.session.lock().reset();
        debug!("Exposure timer reset");
    }

    /// Replace the UV index used by subsequent ticks
    pub fn set_uv_index(&self, uv_index: f64) {
        self.session.lock().set_uv_index(uv_index);
    }
}

impl Drop for ExposureTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_zero_state() {
        let session = ExposureSession::new();
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.progress_percent(), 0.0);
        assert!(!session.is_running());
    }

    #[test]
    fn test_tick_accumulates_while_running() {
        let mut session = ExposureSession::new();
        session.set_uv_index(5.0);
        session.start();

        for _ in 0..10 {
            session.tick();
        }

        assert_eq!(session.elapsed_seconds(), 10);
        assert!((session.progress_percent() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_tick_is_noop_while_paused() {
        let mut session = ExposureSession::new();
        session.set_uv_index(5.0);
        session.tick();
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.progress_percent(), 0.0);
    }

    #[test]
    fn test_progress_formula_matches_tick_count() {
        // progress == min(100, n * uv / 100) after n continuous ticks
        for &(uv, n) in &[(0.0_f64, 50_u64), (3.0, 100), (8.5, 400), (11.0, 2000)] {
            let mut session = ExposureSession::new();
            session.set_uv_index(uv);
            session.start();
            for _ in 0..n {
                session.tick();
            }
            let expected = (n as f64 * uv / 100.0).min(100.0);
            assert!(
                (session.progress_percent() - expected).abs() < 1e-6,
                "uv={uv} n={n}"
            );
            assert_eq!(session.elapsed_seconds(), n);
        }
    }

    #[test]
    fn test_progress_is_capped_at_100() {
        let mut session = ExposureSession::new();
        session.set_uv_index(11.0);
        session.start();
        for _ in 0..1000 {
            session.tick();
        }
        assert_eq!(session.progress_percent(), 100.0);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut session = ExposureSession::new();
        session.set_uv_index(6.0);
        session.start();
        for _ in 0..42 {
            session.tick();
        }

        session.reset();
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.progress_percent(), 0.0);
        assert!(!session.is_running());
    }

    #[test]
    fn test_pause_resume_preserves_state() {
        let mut session = ExposureSession::new();
        session.set_uv_index(4.0);
        session.start();
        for _ in 0..30 {
            session.tick();
        }

        session.pause();
        let elapsed = session.elapsed_seconds();
        let progress = session.progress_percent();

        // Ticks during the pause are lost, not accumulated
        session.tick();
        session.tick();
        assert_eq!(session.elapsed_seconds(), elapsed);
        assert_eq!(session.progress_percent(), progress);

        session.start();
        session.tick();
        assert_eq!(session.elapsed_seconds(), elapsed + 1);
    }

    #[test]
    fn test_set_uv_index_applies_to_next_tick() {
        let mut session = ExposureSession::new();
        session.set_uv_index(2.0);
        session.start();
        session.tick();
        assert!((session.progress_percent() - 0.02).abs() < 1e-9);

        // Not retroactive: prior progress is untouched
        session.set_uv_index(10.0);
        session.tick();
        assert!((session.progress_percent() - 0.12).abs() < 1e-9);
    }

    #[test]
    fn test_negative_uv_index_is_callers_responsibility() {
        // The session does not reject negative UV values; callers are
        // expected to validate. Pins the accept-and-accumulate behavior.
        let mut session = ExposureSession::new();
        session.set_uv_index(-2.0);
        session.start();
        session.tick();

        assert_eq!(session.uv_index(), -2.0);
        assert_eq!(session.elapsed_seconds(), 1);
        assert!((session.progress_percent() - (-0.02)).abs() < 1e-9);
    }

    #[test]
    fn test_format_elapsed() {
        let mut session = ExposureSession::new();
        assert_eq!(session.format_elapsed(), "00:00");

        session.start();
        for _ in 0..125 {
            session.tick();
        }
        assert_eq!(session.format_elapsed(), "02:05");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_ticks_once_per_second() {
        let mut timer = ExposureTimer::new();
        timer.set_uv_index(5.0);
        timer.start();
        let session = timer.session();

        for _ in 0..3 {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }

        assert_eq!(session.lock().elapsed_seconds(), 3);
        assert!((session.lock().progress_percent() - 0.15).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_after_pause() {
        let mut timer = ExposureTimer::new();
        timer.set_uv_index(5.0);
        timer.start();
        let session = timer.session();

        for _ in 0..2 {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
        timer.pause();

        let elapsed = session.lock().elapsed_seconds();
        assert_eq!(elapsed, 2);
        for _ in 0..5 {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }

        assert_eq!(session.lock().elapsed_seconds(), elapsed);
        assert!(!session.lock().is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_while_running_stops_and_clears() {
        let mut timer = ExposureTimer::new();
        timer.set_uv_index(5.0);
        timer.start();
        let session = timer.session();

        for _ in 0..2 {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
        timer.reset();

        for _ in 0..5 {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }

        assert_eq!(session.lock().elapsed_seconds(), 0);
        assert_eq!(session.lock().progress_percent(), 0.0);
        assert!(!session.lock().is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_does_not_stack_tasks() {
        let mut timer = ExposureTimer::new();
        timer.set_uv_index(5.0);
        timer.start();
        timer.start();
        let session = timer.session();

        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;

        assert_eq!(session.lock().elapsed_seconds(), 1);
    }
}
