use std::{sync::Arc, time::Duration};

use futures::{stream, Stream};

use crate::utils::clock::Clock;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Finite countdown: yields `0..seconds`, one value per elapsed second.
/// Deadlines advance additively from the moment the stream is created, so
/// ticks don't drift. Ends on its own after the final tick, or earlier when
/// the consumer drops it.
pub fn idle_countdown(
    clock: Arc<dyn Clock>,
    seconds: u32,
) -> impl Stream<Item = u32> + Send + 'static {
    let first_deadline = clock.instant() + TICK_INTERVAL;
    stream::unfold((0u32, first_deadline), move |(tick, deadline)| {
        let clock = Arc::clone(&clock);
        async move {
            if tick >= seconds {
                return None;
            }
            clock.sleep_until(deadline).await;
            Some((tick, (tick + 1, deadline + TICK_INTERVAL)))
        }
    })
}
