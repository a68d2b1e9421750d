//! Toast notifications. The session layer only ever calls
//! [ToastService::show_toast]; rendering belongs to the host shell.

use ansi_term::Colour;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastSeverity {
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Contract the host notification system must implement.
#[cfg_attr(test, mockall::automock)]
pub trait ToastService: Send + Sync {
    fn show_toast(
        &self,
        title: &str,
        body: &str,
        severity: ToastSeverity,
        position: ToastPosition,
    );
}

/// Renders toasts to the terminal. Stands in for the host UI toast component
/// when the session runs inside the shell binary.
pub struct ConsoleToasts;

impl ToastService for ConsoleToasts {
    fn show_toast(
        &self,
        title: &str,
        body: &str,
        severity: ToastSeverity,
        position: ToastPosition,
    ) {
        debug!("toast {severity:?} at {position:?}: {title}");
        let painted = match severity {
            ToastSeverity::Info => Colour::Cyan.paint(title).to_string(),
            ToastSeverity::Warning => Colour::Yellow.bold().paint(title).to_string(),
            ToastSeverity::Danger => Colour::Red.bold().paint(title).to_string(),
        };
        println!("{painted}: {body}");
    }
}
