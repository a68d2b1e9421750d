use std::sync::Arc;

use tracing::warn;

use crate::{
    notify::{ToastPosition, ToastSeverity, ToastService},
    routing::{AuthPath, Router},
};

pub const SESSION_TIMEOUT_TITLE: &str = "Session timeout";
pub const SESSION_TIMEOUT_BODY: &str = "Your session has expired. Please login";

/// Ends the session on behalf of the monitor: one forced navigation to the
/// sign-out path followed by one warning toast.
pub struct SessionTerminator {
    router: Arc<Router>,
    toasts: Arc<dyn ToastService>,
}

impl SessionTerminator {
    pub fn new(router: Arc<Router>, toasts: Arc<dyn ToastService>) -> Self {
        Self { router, toasts }
    }

    pub fn terminate(&self) {
        warn!("session expired, forcing sign-out");
        self.router.navigate_by_url(AuthPath::SignOut.as_str());
        self.toasts.show_toast(
            SESSION_TIMEOUT_TITLE,
            SESSION_TIMEOUT_BODY,
            ToastSeverity::Warning,
            ToastPosition::TopRight,
        );
    }
}

#[cfg(test)]
mod terminator_tests {
    use crate::notify::MockToastService;

    use super::*;

    #[test]
    fn terminate_navigates_and_warns_once() {
        let router = Arc::new(Router::new());
        let mut toasts = MockToastService::new();
        toasts
            .expect_show_toast()
            .withf(|title, body, severity, position| {
                title == SESSION_TIMEOUT_TITLE
                    && body == SESSION_TIMEOUT_BODY
                    && *severity == ToastSeverity::Warning
                    && *position == ToastPosition::TopRight
            })
            .times(1)
            .return_const(());

        let terminator = SessionTerminator::new(Arc::clone(&router), Arc::new(toasts));
        terminator.terminate();

        assert_eq!(router.url(), AuthPath::SignOut.as_str());
    }
}
