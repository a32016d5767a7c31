//! Required-field checks for deliveries.
//!
//! Checks run in a fixed order (record, id, title, project id) and stop at
//! the first failure. Each check hands back the unwrapped value so callers
//! never re-inspect an `Option` they have already validated.

use crate::delivery::{DeliveryInput, NewDelivery, SaveDelivery};
use crate::error::ValidationError;

pub fn require_delivery(input: Option<&DeliveryInput>) -> Result<&DeliveryInput, ValidationError> {
    input.ok_or(ValidationError::MissingDelivery)
}

pub fn require_id(id: Option<i64>) -> Result<i64, ValidationError> {
    id.ok_or(ValidationError::MissingId)
}

/// Title must be present and contain something other than whitespace.
/// The untrimmed value is returned.
pub fn require_title(title: Option<&str>) -> Result<String, ValidationError> {
    match title {
        Some(t) if !t.trim().is_empty() => Ok(t.to_string()),
        _ => Err(ValidationError::MissingTitle),
    }
}

pub fn require_project_id(project_id: Option<i32>) -> Result<i32, ValidationError> {
    project_id.ok_or(ValidationError::MissingProjectId)
}

pub fn validate_for_create(input: Option<&DeliveryInput>) -> Result<NewDelivery, ValidationError> {
    let input = require_delivery(input)?;
    let title = require_title(input.title.as_deref())?;
    let project_id = require_project_id(input.project_id)?;
    Ok(NewDelivery {
        title,
        description: input.description.clone(),
        file_url: input.file_url.clone(),
        created_at: input.created_at,
        project_id,
    })
}

/// Full-record update: the id and `created_at` come from the record itself.
pub fn validate_for_update(input: Option<&DeliveryInput>) -> Result<SaveDelivery, ValidationError> {
    let input = require_delivery(input)?;
    let id = require_id(input.id)?;
    build_save(input, id, input.created_at)
}

/// Patch update: the id comes from the caller (the request path) and any id
/// or `created_at` in the body is ignored.
pub fn validate_patch(
    id: Option<i64>,
    patch: Option<&DeliveryInput>,
) -> Result<SaveDelivery, ValidationError> {
    let patch = require_delivery(patch)?;
    let id = require_id(id)?;
    build_save(patch, id, None)
}

fn build_save(
    input: &DeliveryInput,
    id: i64,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
) -> Result<SaveDelivery, ValidationError> {
    let title = require_title(input.title.as_deref())?;
    let project_id = require_project_id(input.project_id)?;
    Ok(SaveDelivery {
        id,
        title,
        description: input.description.clone(),
        file_url: input.file_url.clone(),
        created_at,
        project_id,
    })
}
