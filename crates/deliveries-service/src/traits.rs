use async_trait::async_trait;
use deliveries_core::delivery::{Delivery, DeliveryInput};
use deliveries_core::ValidationError;
use thiserror::Error;

/// Failure classes surfaced to callers. The display string is the bare
/// message so the HTTP layer can forward it unchanged.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn delivery_not_found(id: i64) -> Self {
        ServiceError::NotFound(format!("delivery not found with id: {id}"))
    }
}

impl From<ValidationError> for ServiceError {
    fn from(e: ValidationError) -> Self {
        ServiceError::InvalidInput(e.to_string())
    }
}

impl From<deliveries_db::DbError> for ServiceError {
    fn from(e: deliveries_db::DbError) -> Self {
        match e {
            deliveries_db::DbError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

/// Delivery operations.
///
/// `None` arguments stand for a missing value in the request and are
/// rejected with `InvalidInput` before anything is read or written.
/// `LocalService` runs against a `Database` directly; `HttpService` talks to
/// a running deliveries-server.
#[async_trait]
pub trait DeliveryService: Send + Sync {
    async fn create_delivery(&self, input: Option<&DeliveryInput>) -> Result<Delivery, ServiceError>;
    async fn list_deliveries(&self) -> Result<Vec<Delivery>, ServiceError>;
    async fn get_delivery(&self, id: Option<i64>) -> Result<Delivery, ServiceError>;

    /// Replace the stored record named by `record.id`.
    ///
    /// `LocalService` writes a supplied `created_at` over the stored one.
    /// `HttpService` can only reach the field-preserving PUT, so over HTTP
    /// `created_at` is always kept and this behaves like
    /// `update_delivery_fields`. Prefer that method when the difference
    /// matters.
    async fn update_delivery(&self, record: Option<&DeliveryInput>) -> Result<Delivery, ServiceError>;

    /// Overwrite title, description, file URL and project id of the record
    /// with `id`. Any id or `created_at` in `patch` is ignored.
    async fn update_delivery_fields(
        &self,
        id: Option<i64>,
        patch: Option<&DeliveryInput>,
    ) -> Result<Delivery, ServiceError>;

    async fn delete_delivery(&self, id: Option<i64>) -> Result<(), ServiceError>;
    async fn list_deliveries_by_project(
        &self,
        project_id: Option<i32>,
    ) -> Result<Vec<Delivery>, ServiceError>;
}
