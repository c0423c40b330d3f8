//! Options screen monitor
//!
//! Polls the host's current view and fires a callback once each time the
//! options screen closes. Polling is slow while the screen is closed and
//! fast while it is open.

use crate::config::MonitorConfig;
use crate::controller::{SharedController, TriggerOutcome};
use mutcost_options::SettingsRegistry;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Reports which view the host is showing
pub trait ViewProbe {
    /// Name of the current view
    fn current_view(&self) -> String;
}

impl<F> ViewProbe for F
where
    F: Fn() -> String,
{
    fn current_view(&self) -> String {
        self()
    }
}

/// Transition seen by one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Options screen just opened
    Opened,
    /// Options screen just closed
    Closed,
    /// No transition
    Unchanged,
}

/// Open/closed state machine over successive view observations
#[derive(Debug, Clone)]
pub struct ViewTracker {
    options_view: String,
    open: bool,
    idle_interval: Duration,
    open_interval: Duration,
}

impl ViewTracker {
    /// Create tracker for the configured options view
    #[must_use]
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            options_view: config.options_view.clone(),
            open: false,
            idle_interval: config.idle_interval(),
            open_interval: config.open_interval(),
        }
    }

    /// Feed one observation
    pub fn observe(&mut self, view: &str) -> ViewEvent {
        let now_open = view == self.options_view;
        let event = match (self.open, now_open) {
            (false, true) => ViewEvent::Opened,
            (true, false) => ViewEvent::Closed,
            _ => ViewEvent::Unchanged,
        };
        self.open = now_open;
        event
    }

    /// Check if the options screen was open at the last observation
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Delay before the next observation
    #[inline]
    #[must_use]
    pub fn next_interval(&self) -> Duration {
        if self.open {
            self.open_interval
        } else {
            self.idle_interval
        }
    }
}

/// Background poller invoking a callback when the options screen closes
pub struct OptionsMonitor<P> {
    probe: P,
    tracker: ViewTracker,
}

impl<P> OptionsMonitor<P>
where
    P: ViewProbe + Send + 'static,
{
    /// Create monitor
    #[must_use]
    pub fn new(probe: P, config: &MonitorConfig) -> Self {
        Self {
            probe,
            tracker: ViewTracker::new(config),
        }
    }

    /// Poll forever, calling `on_close` once per open→closed transition
    pub async fn run<F>(mut self, mut on_close: F)
    where
        F: FnMut(),
    {
        loop {
            let view = self.probe.current_view();
            match self.tracker.observe(&view) {
                ViewEvent::Opened => tracing::debug!("Options screen opened: {}", view),
                ViewEvent::Closed => {
                    tracing::debug!("Options screen closed, now on {}", view);
                    on_close();
                }
                ViewEvent::Unchanged => {}
            }
            tokio::time::sleep(self.tracker.next_interval()).await;
        }
    }

    /// Run on the tokio runtime until the handle is aborted
    pub fn spawn<F>(self, on_close: F) -> JoinHandle<()>
    where
        F: FnMut() + Send + 'static,
    {
        tokio::spawn(self.run(on_close))
    }
}

/// Callback that triggers a shared controller and logs the outcome
///
/// The lock is taken and released inside the callback.
pub fn trigger_controller<R>(controller: SharedController<R>) -> impl FnMut() + Send + 'static
where
    R: SettingsRegistry + Send + 'static,
{
    move || {
        let outcome = controller.lock().on_trigger();
        match outcome {
            Ok(TriggerOutcome::Unchanged) => tracing::debug!("Dataset already current"),
            Ok(outcome) => tracing::info!("Dataset updated: {:?}", outcome),
            Err(e) => tracing::error!("Regeneration failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn config() -> MonitorConfig {
        MonitorConfig::default()
    }

    #[test]
    fn tracker_reports_transitions() {
        let mut tracker = ViewTracker::new(&config());
        assert_eq!(tracker.observe("Game"), ViewEvent::Unchanged);
        assert_eq!(tracker.observe("Options"), ViewEvent::Opened);
        assert_eq!(tracker.observe("Options"), ViewEvent::Unchanged);
        assert_eq!(tracker.observe("Game"), ViewEvent::Closed);
        assert_eq!(tracker.observe("Inventory"), ViewEvent::Unchanged);
    }

    #[test]
    fn tracker_interval_follows_state() {
        let mut tracker = ViewTracker::new(&config());
        assert_eq!(tracker.next_interval(), Duration::from_secs(1));
        tracker.observe("Options");
        assert!(tracker.is_open());
        assert_eq!(tracker.next_interval(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_close() {
        let view = Arc::new(Mutex::new(String::from("Game")));
        let fired = Arc::new(AtomicUsize::new(0));

        let current_view = {
            let view = Arc::clone(&view);
            move || view.lock().clone()
        };
        let handle = OptionsMonitor::new(current_view, &config()).spawn({
            let fired = Arc::clone(&fired);
            move || {
                fired.fetch_add(1, Ordering::SeqCst);
            }
        });

        *view.lock() = "Options".to_string();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        *view.lock() = "Game".to_string();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        handle.abort();
    }
}
