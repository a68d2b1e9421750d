//! Session idle tracking. [monitor::IdleMonitor] owns the lifecycle, the
//! watches in [watch] run the countdowns, and [terminator::SessionTerminator]
//! performs the forced sign-out.

pub mod countdown;
pub mod monitor;
pub mod terminator;
pub mod timeout;
pub(crate) mod watch;

use std::sync::Arc;

use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};
use tracing::debug;

use crate::routing::RouterEvent;

use monitor::IdleMonitor;

/// Seconds of inactivity before a forced sign-out, unless overridden.
pub const DEFAULT_IDLE_TIMEOUT: u32 = 10;

/// Arms the monitor once the first navigation completes. One-shot: the hook
/// is spent after the first [RouterEvent::NavigationEnd], whether or not the
/// start guard let tracking begin.
pub fn spawn_autostart(monitor: &Arc<IdleMonitor>) -> JoinHandle<()> {
    let mut events = monitor.router().events();
    let monitor = Arc::downgrade(monitor);
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(RouterEvent::NavigationEnd { url }) => {
                    debug!("first completed navigation ({url}), starting idle tracking");
                    if let Some(monitor) = monitor.upgrade() {
                        monitor.start(None);
                    }
                    return;
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => return,
            }
        }
    })
}

#[cfg(test)]
mod tracking_tests {
    use std::{sync::Mutex, time::Duration};

    use crate::{
        notify::{ToastPosition, ToastSeverity, ToastService},
        routing::{AuthPath, Router},
        signals::{hub::ActivityHub, ActivityKind, SignalSource},
        utils::{
            clock::{Clock, DefaultClock},
            logging::TEST_LOGGING,
        },
    };

    use super::*;

    #[derive(Default)]
    struct RecordingToasts {
        shown: Mutex<Vec<(String, ToastSeverity, ToastPosition)>>,
    }

    impl RecordingToasts {
        fn count(&self) -> usize {
            self.shown.lock().unwrap().len()
        }
    }

    impl ToastService for RecordingToasts {
        fn show_toast(
            &self,
            title: &str,
            _body: &str,
            severity: ToastSeverity,
            position: ToastPosition,
        ) {
            self.shown
                .lock()
                .unwrap()
                .push((title.to_owned(), severity, position));
        }
    }

    struct TestSession {
        monitor: Arc<IdleMonitor>,
        router: Arc<Router>,
        signals: Arc<ActivityHub>,
        toasts: Arc<RecordingToasts>,
    }

    fn session(timeout: u32) -> TestSession {
        *TEST_LOGGING;
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let router = Arc::new(Router::new());
        let signals = Arc::new(ActivityHub::new(Arc::clone(&clock)));
        let toasts = Arc::new(RecordingToasts::default());
        let monitor = IdleMonitor::new(
            Arc::clone(&router),
            Arc::clone(&signals),
            Arc::clone(&toasts) as Arc<dyn ToastService>,
            clock,
            timeout,
        );
        TestSession {
            monitor,
            router,
            signals,
            toasts,
        }
    }

    fn started_session(timeout: u32) -> TestSession {
        let session = session(timeout);
        session.router.navigate_by_url("/dashboard");
        session.monitor.start(None);
        session
    }

    #[tokio::test(start_paused = true)]
    async fn signs_out_after_uninterrupted_inactivity() {
        let session = started_session(3);
        assert!(session.monitor.has_started());

        tokio::time::sleep(Duration::from_millis(2_900)).await;
        assert_eq!(session.toasts.count(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(session.toasts.count(), 1);
        assert_eq!(session.router.url(), AuthPath::SignOut.as_str());
        assert!(!session.monitor.has_started());
    }

    #[tokio::test(start_paused = true)]
    async fn activity_restarts_the_countdown() {
        let session = started_session(3);

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        session
            .signals
            .emit(SignalSource::Document, ActivityKind::Click);

        // The untouched countdown would have expired at 3s.
        tokio::time::sleep(Duration::from_millis(2_900)).await;
        assert_eq!(session.toasts.count(), 0);
        assert!(session.monitor.has_started());

        // Expiry lands one timeout after the click, at 4.5s.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(session.toasts.count(), 1);
        assert_eq!(session.router.url(), AuthPath::SignOut.as_str());
    }

    #[tokio::test(start_paused = true)]
    async fn every_activity_defers_the_sign_out() {
        let session = started_session(3);

        for _ in 0..4 {
            tokio::time::sleep(Duration::from_secs(1)).await;
            session
                .signals
                .emit(SignalSource::Window, ActivityKind::MouseMove);
        }

        // Last activity at 4s, expiry expected at 7s.
        tokio::time::sleep(Duration::from_millis(2_900)).await;
        assert_eq!(session.toasts.count(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(session.toasts.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn signs_out_exactly_once() {
        let session = started_session(1);

        tokio::time::sleep(Duration::from_millis(1_100)).await;
        assert_eq!(session.toasts.count(), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(session.toasts.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_stop_cancels_both_watches() {
        let session = started_session(2);

        tokio::time::sleep(Duration::from_millis(500)).await;
        session.monitor.stop();
        assert!(!session.monitor.has_started());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(session.toasts.count(), 0);
        assert_eq!(session.router.url(), "/dashboard");
    }

    #[tokio::test(start_paused = true)]
    async fn restart_after_stop_tracks_again() {
        let session = started_session(2);

        session.monitor.stop();
        session.monitor.start(None);
        assert_eq!(session.monitor.active_watches(), 2);

        tokio::time::sleep(Duration::from_millis(2_100)).await;
        assert_eq!(session.toasts.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn starts_on_first_completed_navigation() {
        let session = session(DEFAULT_IDLE_TIMEOUT);
        let _autostart = spawn_autostart(&session.monitor);
        assert!(!session.monitor.has_started());

        session.router.navigate_by_url("/reports");
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(session.monitor.has_started());
        session.monitor.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn autostart_is_spent_by_an_excluded_first_navigation() {
        let session = session(DEFAULT_IDLE_TIMEOUT);
        let _autostart = spawn_autostart(&session.monitor);

        session.router.navigate_by_url(AuthPath::SignIn.as_str());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!session.monitor.has_started());

        session.router.navigate_by_url("/dashboard");
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!session.monitor.has_started());
    }
}
