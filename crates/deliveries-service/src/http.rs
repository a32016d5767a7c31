use async_trait::async_trait;
use deliveries_core::delivery::{Delivery, DeliveryInput};
use deliveries_core::validate;
use reqwest::{Client, StatusCode};

use crate::{DeliveryService, ServiceError};

/// Async HTTP client implementation of DeliveryService.
/// Connects to a running deliveries-server.
///
/// Missing ids are rejected locally since they cannot be put in a URL.
/// Everything else is validated by the server.
pub struct HttpService {
    base_url: String,
    client: Client,
}

impl HttpService {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Check if the server is reachable.
    pub async fn health_check(&self) -> Result<(), ServiceError> {
        let resp = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(format!("connection failed: {e}")))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ServiceError::Internal(format!(
                "health check failed: {}",
                resp.status()
            )))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        handle_response(resp).await
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        handle_response(resp).await
    }

    async fn put_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let resp = self
            .client
            .put(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        handle_response(resp).await
    }

    async fn delete_req(&self, path: &str) -> Result<(), ServiceError> {
        let resp = self
            .client
            .delete(format!("{}{path}", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(parse_error(resp).await)
        }
    }
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        resp.json::<T>()
            .await
            .map_err(|e| ServiceError::Internal(format!("json decode: {e}")))
    } else {
        Err(parse_error_with_status(status, resp).await)
    }
}

async fn parse_error(resp: reqwest::Response) -> ServiceError {
    let status = resp.status();
    parse_error_with_status(status, resp).await
}

async fn parse_error_with_status(status: StatusCode, resp: reqwest::Response) -> ServiceError {
    let body = resp.text().await.unwrap_or_default();
    classify_error(status, &body)
}

/// Map a non-success response back onto the service error classes, using
/// the `message` field of the error body when there is one.
fn classify_error(status: StatusCode, body: &str) -> ServiceError {
    let msg = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string());

    if status == StatusCode::NOT_FOUND {
        ServiceError::NotFound(msg)
    } else if status == StatusCode::BAD_REQUEST {
        ServiceError::InvalidInput(msg)
    } else {
        ServiceError::Internal(msg)
    }
}

#[async_trait]
impl DeliveryService for HttpService {
    async fn create_delivery(&self, input: Option<&DeliveryInput>) -> Result<Delivery, ServiceError> {
        self.post_json("/api/deliveries", &input).await
    }

    async fn list_deliveries(&self) -> Result<Vec<Delivery>, ServiceError> {
        self.get_json("/api/deliveries").await
    }

    async fn get_delivery(&self, id: Option<i64>) -> Result<Delivery, ServiceError> {
        let id = validate::require_id(id)?;
        self.get_json(&format!("/api/deliveries/{id}")).await
    }

    /// The server only exposes the field-preserving update, so a supplied
    /// `created_at` is ignored there.
    async fn update_delivery(&self, record: Option<&DeliveryInput>) -> Result<Delivery, ServiceError> {
        let record = validate::require_delivery(record)?;
        let id = validate::require_id(record.id)?;
        self.put_json(&format!("/api/deliveries/{id}"), record).await
    }

    async fn update_delivery_fields(
        &self,
        id: Option<i64>,
        patch: Option<&DeliveryInput>,
    ) -> Result<Delivery, ServiceError> {
        let id = validate::require_id(id)?;
        self.put_json(&format!("/api/deliveries/{id}"), &patch).await
    }

    async fn delete_delivery(&self, id: Option<i64>) -> Result<(), ServiceError> {
        let id = validate::require_id(id)?;
        self.delete_req(&format!("/api/deliveries/{id}")).await
    }

    async fn list_deliveries_by_project(
        &self,
        project_id: Option<i32>,
    ) -> Result<Vec<Delivery>, ServiceError> {
        let project_id = validate::require_project_id(project_id)?;
        self.get_json(&format!("/api/deliveries/project/{project_id}"))
            .await
    }
}
