//! User input signals. The application shell reports raw input through
//! [ActivityHub](hub::ActivityHub) and the session watches consume a merged
//! stream of the monitored signal kinds.

pub mod hub;

use chrono::{DateTime, Utc};

/// Where a signal was observed. Mirrors the two event targets the host
/// application listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalSource {
    Document,
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Click,
    Wheel,
    Scroll,
    MouseMove,
    KeyUp,
    Resize,
}

/// A single observed user input. The payload is only "something happened at
/// time `at`", the source and kind exist for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityEvent {
    pub source: SignalSource,
    pub kind: ActivityKind,
    pub at: DateTime<Utc>,
}

/// The fixed set of signals that count as user activity. Anything outside this
/// list is dropped by the hub.
pub const MONITORED_SIGNALS: [(SignalSource, ActivityKind); 8] = [
    (SignalSource::Document, ActivityKind::Click),
    (SignalSource::Document, ActivityKind::Wheel),
    (SignalSource::Document, ActivityKind::Scroll),
    (SignalSource::Document, ActivityKind::MouseMove),
    (SignalSource::Document, ActivityKind::KeyUp),
    (SignalSource::Window, ActivityKind::Resize),
    (SignalSource::Window, ActivityKind::Scroll),
    (SignalSource::Window, ActivityKind::MouseMove),
];
