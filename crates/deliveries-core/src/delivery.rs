use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub project_id: i32,
}

impl Delivery {
    /// Overwrite the caller-editable fields. `id` and `created_at` are kept.
    pub fn overwrite_fields(&mut self, fields: &SaveDelivery) {
        self.title = fields.title.clone();
        self.description = fields.description.clone();
        self.file_url = fields.file_url.clone();
        self.project_id = fields.project_id;
    }
}

/// Request body for create and update. Every field may be absent; the
/// validators decide which ones are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub project_id: Option<i32>,
}

impl DeliveryInput {
    pub fn new(title: impl Into<String>, project_id: i32) -> Self {
        Self {
            title: Some(title.into()),
            project_id: Some(project_id),
            ..Default::default()
        }
    }
}

impl From<&Delivery> for DeliveryInput {
    fn from(d: &Delivery) -> Self {
        Self {
            id: Some(d.id),
            title: Some(d.title.clone()),
            description: d.description.clone(),
            file_url: d.file_url.clone(),
            created_at: Some(d.created_at),
            project_id: Some(d.project_id),
        }
    }
}

/// A validated insert. The store assigns the id, and `created_at` falls back
/// to the insert time when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDelivery {
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub project_id: i32,
}

/// A validated full-record write, upserted by `id`.
///
/// A `None` `created_at` keeps the stored timestamp on conflict and is
/// stamped with the write time on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveDelivery {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub project_id: i32,
}

impl From<&Delivery> for SaveDelivery {
    fn from(d: &Delivery) -> Self {
        Self {
            id: d.id,
            title: d.title.clone(),
            description: d.description.clone(),
            file_url: d.file_url.clone(),
            created_at: Some(d.created_at),
            project_id: d.project_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Delivery {
        Delivery {
            id: 1,
            title: "Sprint 1".into(),
            description: None,
            file_url: Some("http://example.com/file.pdf".into()),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            project_id: 7,
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["id"], 1);
        assert_eq!(v["fileUrl"], "http://example.com/file.pdf");
        assert_eq!(v["projectId"], 7);
        assert_eq!(v["createdAt"], "2024-03-01T12:00:00Z");
        assert!(v["description"].is_null());
    }

    #[test]
    fn input_accepts_partial_body() {
        let input: DeliveryInput =
            serde_json::from_str(r#"{"title":"Sprint 1","projectId":7}"#).unwrap();
        assert_eq!(input, DeliveryInput::new("Sprint 1", 7));
    }

    #[test]
    fn input_accepts_empty_object() {
        let input: DeliveryInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, DeliveryInput::default());
    }

    #[test]
    fn overwrite_fields_keeps_id_and_created_at() {
        let mut d = sample();
        let created_at = d.created_at;
        d.overwrite_fields(&SaveDelivery {
            id: 99,
            title: "Sprint 1 final".into(),
            description: Some("done".into()),
            file_url: None,
            created_at: Some(Utc::now()),
            project_id: 8,
        });
        assert_eq!(d.id, 1);
        assert_eq!(d.created_at, created_at);
        assert_eq!(d.title, "Sprint 1 final");
        assert_eq!(d.description.as_deref(), Some("done"));
        assert_eq!(d.file_url, None);
        assert_eq!(d.project_id, 8);
    }
}
