use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// Source of time for the whole crate. Everything that stamps or schedules goes
/// through this trait so tests can substitute a controlled implementation.
#[async_trait]
pub trait Clock: Sync + Send + 'static {
    /// Wall-clock timestamp, used for stamping events.
    fn now(&self) -> DateTime<Utc>;

    /// Monotonic reference point for scheduling deadlines.
    fn instant(&self) -> Instant;

    async fn sleep_until(&self, deadline: Instant);
}

pub struct DefaultClock;

#[async_trait]
impl Clock for DefaultClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&self, deadline: Instant) {
        tokio::time::sleep_until(deadline).await;
    }
}
