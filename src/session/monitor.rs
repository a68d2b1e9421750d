use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, Mutex,
};

use tracing::{debug, info};

use crate::{
    notify::ToastService,
    routing::{AuthPath, Router},
    signals::hub::ActivityHub,
    utils::clock::Clock,
};

use super::{terminator::SessionTerminator, timeout::IdleEvaluator, watch::Watch};

/// Decides when a session has idled out. One instance per process, shared
/// through an [Arc] for the application lifetime; whichever component handles
/// sign-out keeps a handle to call [stop](Self::stop).
///
/// While tracking, exactly two watches are live: one countdown that the first
/// activity kills, and one that every activity restarts. Whichever reaches the
/// final tick first signs the session out.
pub struct IdleMonitor {
    idle_timeout: AtomicU32,
    watches: Mutex<Vec<Watch>>,
    router: Arc<Router>,
    signals: Arc<ActivityHub>,
    terminator: SessionTerminator,
    clock: Arc<dyn Clock>,
}

impl IdleMonitor {
    pub fn new(
        router: Arc<Router>,
        signals: Arc<ActivityHub>,
        toasts: Arc<dyn ToastService>,
        clock: Arc<dyn Clock>,
        idle_timeout: u32,
    ) -> Arc<Self> {
        Arc::new(Self {
            idle_timeout: AtomicU32::new(idle_timeout),
            watches: Mutex::new(Vec::new()),
            terminator: SessionTerminator::new(Arc::clone(&router), toasts),
            router,
            signals,
            clock,
        })
    }

    /// Begins idle tracking. A no-op while already tracking or while the user
    /// is on an unauthenticated location. A provided timeout is adopted only
    /// when not running; zero is ignored.
    pub fn start(self: &Arc<Self>, idle_timeout: Option<u32>) {
        let mut watches = self.watches.lock().expect("watch list poisoned");
        if !watches.is_empty() || !self.was_user_inside_app() {
            debug!("idle tracking not started, already running or outside the app");
            return;
        }

        if let Some(timeout) = idle_timeout {
            if timeout > 0 {
                self.idle_timeout.store(timeout, Ordering::Relaxed);
            }
        }
        let seconds = self.idle_timeout.load(Ordering::Relaxed);
        let evaluator = IdleEvaluator::from_seconds(seconds);
        info!("idle tracking started, signing out after {seconds}s of inactivity");

        watches.push(Watch::spawn_bare(
            self,
            self.signals.activity_stream(),
            Arc::clone(&self.clock),
            seconds,
            evaluator,
        ));
        watches.push(Watch::spawn_reset(
            self,
            self.signals.activity_stream(),
            Arc::clone(&self.clock),
            seconds,
            evaluator,
        ));
    }

    /// Cancels both watches. Safe to call when already stopped.
    pub fn stop(&self) {
        let mut watches = self.watches.lock().expect("watch list poisoned");
        if watches.is_empty() {
            return;
        }
        info!("idle tracking stopped");
        for watch in watches.drain(..) {
            watch.cancel();
        }
    }

    pub fn has_started(&self) -> bool {
        !self.watches.lock().expect("watch list poisoned").is_empty()
    }

    pub fn should_start(&self) -> bool {
        self.was_user_inside_app() && !self.has_started()
    }

    /// True when the current location is an authenticated one. Root and the
    /// sign-in screen never track. The sign-out path is not in the excluded
    /// set.
    pub fn was_user_inside_app(&self) -> bool {
        let url = self.router.url();
        url != AuthPath::Root.as_str() && url != AuthPath::SignIn.as_str()
    }

    /// Number of live watches: zero when stopped, two when tracking.
    pub fn active_watches(&self) -> usize {
        self.watches.lock().expect("watch list poisoned").len()
    }

    pub fn idle_timeout(&self) -> u32 {
        self.idle_timeout.load(Ordering::Relaxed)
    }

    pub(crate) fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Terminal action. Stops tracking first so the terminator navigates a
    /// monitor that is already at rest.
    pub(crate) fn stop_and_sign_out(&self) {
        self.stop();
        self.terminator.terminate();
    }
}
