use std::sync::{Arc, Weak};

use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{signals::ActivityEvent, utils::clock::Clock};

use super::{countdown::idle_countdown, monitor::IdleMonitor, timeout::IdleEvaluator};

/// One live watch: a spawned countdown task plus its cancellation handle.
/// Dropping the handle leaves the task running; cancelling ends it at its next
/// suspension point.
pub(crate) struct Watch {
    cancel: CancellationToken,
    _task: JoinHandle<()>,
}

impl Watch {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Countdown that runs exactly once per tracking session and dies on the
    /// first observed activity.
    pub fn spawn_bare(
        monitor: &Arc<IdleMonitor>,
        events: impl Stream<Item = ActivityEvent> + Send + Unpin + 'static,
        clock: Arc<dyn Clock>,
        seconds: u32,
        evaluator: IdleEvaluator,
    ) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_bare_watch(
            events,
            idle_countdown(clock, seconds),
            evaluator,
            cancel.clone(),
            Arc::downgrade(monitor),
        ));
        Self { cancel, _task: task }
    }

    /// Countdown that arms on the first activity and restarts from zero on
    /// every one after that.
    pub fn spawn_reset(
        monitor: &Arc<IdleMonitor>,
        events: impl Stream<Item = ActivityEvent> + Send + Unpin + 'static,
        clock: Arc<dyn Clock>,
        seconds: u32,
        evaluator: IdleEvaluator,
    ) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_reset_watch(
            events,
            clock,
            seconds,
            evaluator,
            cancel.clone(),
            Arc::downgrade(monitor),
        ));
        Self { cancel, _task: task }
    }
}

// Both loops are biased so that cancellation beats activity and activity
// beats a tick landing in the same poll.

async fn run_bare_watch(
    mut events: impl Stream<Item = ActivityEvent> + Send + Unpin,
    countdown: impl Stream<Item = u32> + Send,
    evaluator: IdleEvaluator,
    cancel: CancellationToken,
    monitor: Weak<IdleMonitor>,
) {
    tokio::pin!(countdown);
    let mut events_live = true;
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            event = events.next(), if events_live => match event {
                Some(event) => {
                    debug!(
                        "activity {:?}/{:?} ended the untouched countdown",
                        event.source, event.kind
                    );
                    return;
                }
                None => events_live = false,
            },
            tick = countdown.next() => match tick {
                Some(tick) if evaluator.is_expired(tick) => {
                    expire(&monitor);
                    return;
                }
                Some(_) => {}
                None => return,
            },
        }
    }
}

async fn run_reset_watch(
    mut events: impl Stream<Item = ActivityEvent> + Send + Unpin,
    clock: Arc<dyn Clock>,
    seconds: u32,
    evaluator: IdleEvaluator,
    cancel: CancellationToken,
    monitor: Weak<IdleMonitor>,
) {
    // No countdown until the first activity arrives.
    tokio::select! {
        biased;
        _ = cancel.cancelled() => return,
        event = events.next() => if event.is_none() {
            return;
        },
    }

    let mut countdown = Box::pin(idle_countdown(Arc::clone(&clock), seconds));
    let mut events_live = true;
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            event = events.next(), if events_live => match event {
                Some(event) => {
                    debug!(
                        "activity {:?}/{:?}, countdown restarted",
                        event.source, event.kind
                    );
                    countdown = Box::pin(idle_countdown(Arc::clone(&clock), seconds));
                }
                None => events_live = false,
            },
            tick = countdown.next() => match tick {
                Some(tick) if evaluator.is_expired(tick) => {
                    expire(&monitor);
                    return;
                }
                Some(_) => {}
                None => return,
            },
        }
    }
}

fn expire(monitor: &Weak<IdleMonitor>) {
    let Some(monitor) = monitor.upgrade() else {
        return;
    };
    info!("idle timeout reached, signing the session out");
    monitor.stop_and_sign_out();
}
