/// Errors that can occur within the routing layer.
///
/// Failing to find a route is not an error: it is reported as an empty
/// [`Solution`](crate::Solution).
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("invalid colony parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("ant worker thread panicked during iteration {iteration}")]
    WorkerPanicked { iteration: usize },
}

impl RoutingError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
