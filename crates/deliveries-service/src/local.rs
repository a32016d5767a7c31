use std::sync::Arc;

use async_trait::async_trait;
use deliveries_core::delivery::{Delivery, DeliveryInput, SaveDelivery};
use deliveries_core::validate;
use deliveries_db::{Database, DbError};
use tracing::debug;

use crate::{DeliveryService, ServiceError};

/// Service backed by a `Database` chosen at startup.
pub struct LocalService {
    db: Arc<dyn Database>,
}

impl LocalService {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    async fn ensure_exists(&self, id: i64) -> Result<(), ServiceError> {
        if self.db.delivery_exists(id).await? {
            Ok(())
        } else {
            Err(ServiceError::delivery_not_found(id))
        }
    }
}

/// A store-level NotFound for `id` reads the same as our own existence check.
fn classify(id: i64) -> impl FnOnce(DbError) -> ServiceError {
    move |e| match e {
        DbError::NotFound(_) => ServiceError::delivery_not_found(id),
        other => other.into(),
    }
}

#[async_trait]
impl DeliveryService for LocalService {
    async fn create_delivery(&self, input: Option<&DeliveryInput>) -> Result<Delivery, ServiceError> {
        let new = validate::validate_for_create(input)?;
        let created = self.db.insert_delivery(&new).await?;
        debug!(id = created.id, project_id = created.project_id, "created delivery");
        Ok(created)
    }

    async fn list_deliveries(&self) -> Result<Vec<Delivery>, ServiceError> {
        Ok(self.db.list_deliveries().await?)
    }

    async fn get_delivery(&self, id: Option<i64>) -> Result<Delivery, ServiceError> {
        let id = validate::require_id(id)?;
        self.db
            .find_delivery(id)
            .await?
            .ok_or_else(|| ServiceError::delivery_not_found(id))
    }

    async fn update_delivery(&self, record: Option<&DeliveryInput>) -> Result<Delivery, ServiceError> {
        let save = validate::validate_for_update(record)?;
        self.ensure_exists(save.id).await?;
        let saved = self.db.save_delivery(&save).await.map_err(classify(save.id))?;
        debug!(id = saved.id, "replaced delivery");
        Ok(saved)
    }

    async fn update_delivery_fields(
        &self,
        id: Option<i64>,
        patch: Option<&DeliveryInput>,
    ) -> Result<Delivery, ServiceError> {
        let fields = validate::validate_patch(id, patch)?;
        let mut existing = self
            .db
            .find_delivery(fields.id)
            .await?
            .ok_or_else(|| ServiceError::delivery_not_found(fields.id))?;
        existing.overwrite_fields(&fields);
        let saved = self
            .db
            .save_delivery(&SaveDelivery::from(&existing))
            .await
            .map_err(classify(fields.id))?;
        debug!(id = saved.id, "updated delivery");
        Ok(saved)
    }

    async fn delete_delivery(&self, id: Option<i64>) -> Result<(), ServiceError> {
        let id = validate::require_id(id)?;
        self.ensure_exists(id).await?;
        self.db.delete_delivery(id).await.map_err(classify(id))?;
        debug!(id, "deleted delivery");
        Ok(())
    }

    async fn list_deliveries_by_project(
        &self,
        project_id: Option<i32>,
    ) -> Result<Vec<Delivery>, ServiceError> {
        let project_id = validate::require_project_id(project_id)?;
        Ok(self.db.list_deliveries_by_project(project_id).await?)
    }
}
