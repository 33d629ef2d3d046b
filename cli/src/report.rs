//! Terminal error reporting.

use slot_core::{ErrorReporter, RequestError};
use tracing::debug;

/// Prints the alert line to stderr. The response body, if any, goes to the
/// debug log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrReporter;

impl ErrorReporter for StderrReporter {
    fn report(&self, err: &RequestError) {
        if let Some(detail) = err.detail().filter(|d| !d.body.is_empty()) {
            debug!(status = detail.status, body = %detail.body, "error response body");
        }
        eprintln!("{err}");
    }
}
