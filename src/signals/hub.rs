use std::sync::Arc;

use futures::{future, stream, Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::trace;

use crate::utils::clock::Clock;

use super::{ActivityEvent, ActivityKind, SignalSource, MONITORED_SIGNALS};

const CHANNEL_CAPACITY: usize = 32;

/// Fan-out point for user input. One broadcast channel per monitored signal,
/// merged on demand into a single activity stream. Subscriptions only observe
/// events published after they were created, and every call to
/// [activity_stream](Self::activity_stream) is an independent subscription.
pub struct ActivityHub {
    clock: Arc<dyn Clock>,
    channels: Vec<((SignalSource, ActivityKind), broadcast::Sender<ActivityEvent>)>,
}

impl ActivityHub {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let channels = MONITORED_SIGNALS
            .iter()
            .map(|signal| (*signal, broadcast::channel(CHANNEL_CAPACITY).0))
            .collect();
        Self { clock, channels }
    }

    /// Publishes one observed input. Signals outside [MONITORED_SIGNALS] are
    /// dropped, as are events nobody is subscribed to.
    pub fn emit(&self, source: SignalSource, kind: ActivityKind) {
        let Some((_, sender)) = self.channels.iter().find(|(key, _)| *key == (source, kind))
        else {
            trace!("dropping unmonitored signal {source:?}/{kind:?}");
            return;
        };
        let event = ActivityEvent {
            source,
            kind,
            at: self.clock.now(),
        };
        trace!("activity {event:?}");
        let _ = sender.send(event);
    }

    /// Merged stream over every monitored signal. The stream never completes
    /// while the hub is alive; dropping the stream is the only way to
    /// unsubscribe. Receivers that fall behind skip the lagged events.
    pub fn activity_stream(
        &self,
    ) -> impl Stream<Item = ActivityEvent> + Send + Unpin + 'static {
        let subscriptions = self.channels.iter().map(|(_, sender)| {
            BroadcastStream::new(sender.subscribe()).filter_map(|event| future::ready(event.ok()))
        });
        stream::select_all(subscriptions)
    }
}
