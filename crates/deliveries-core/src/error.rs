use thiserror::Error;

/// A request was rejected before it reached the store.
///
/// Only the first failing check is reported; the display string is the
/// message surfaced to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("delivery must not be null")]
    MissingDelivery,

    #[error("id must not be null")]
    MissingId,

    #[error("title is required")]
    MissingTitle,

    #[error("project id is required")]
    MissingProjectId,
}
