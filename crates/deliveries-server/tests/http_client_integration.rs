//! Integration tests for HttpService against a real server.
//!
//! Each test spawns an in-process axum server on 127.0.0.1:0 with in-memory SQLite,
//! then exercises the HTTP client layer through the full request/response cycle.

use deliveries_core::delivery::DeliveryInput;
use deliveries_service::{DeliveryService, HttpService, ServiceError};

async fn spawn_server() -> String {
    let server = deliveries_server::test_helpers::spawn_test_server().await;
    server.base_url
}

#[tokio::test]
async fn health_check_via_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);
    svc.health_check().await.unwrap();
}

#[tokio::test]
async fn delivery_crud_via_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    // Create
    let created = svc
        .create_delivery(Some(&DeliveryInput::new("Sprint 1", 7)))
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "Sprint 1");
    assert_eq!(created.project_id, 7);

    // Get
    let fetched = svc.get_delivery(Some(created.id)).await.unwrap();
    assert_eq!(fetched, created);

    // Update
    let patch = DeliveryInput {
        description: Some("reviewed".into()),
        ..DeliveryInput::new("Sprint 1 final", 7)
    };
    let updated = svc
        .update_delivery_fields(Some(created.id), Some(&patch))
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Sprint 1 final");
    assert_eq!(updated.description.as_deref(), Some("reviewed"));
    assert_eq!(updated.created_at, created.created_at);

    // List
    let all = svc.list_deliveries().await.unwrap();
    assert_eq!(all, vec![updated]);

    // Delete
    svc.delete_delivery(Some(created.id)).await.unwrap();
    assert!(svc.list_deliveries().await.unwrap().is_empty());

    match svc.get_delivery(Some(created.id)).await.unwrap_err() {
        ServiceError::NotFound(msg) => assert_eq!(msg, "delivery not found with id: 1"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn full_record_update_via_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    let created = svc
        .create_delivery(Some(&DeliveryInput::new("Sprint 2", 3)))
        .await
        .unwrap();
    let mut record = DeliveryInput::from(&created);
    record.title = Some("Sprint 2 final".into());

    let updated = svc.update_delivery(Some(&record)).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Sprint 2 final");
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn validation_errors_via_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    let err = svc
        .create_delivery(Some(&DeliveryInput::new("  ", 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(ref m) if m == "title is required"));

    let no_project = DeliveryInput {
        title: Some("Sprint 1".into()),
        ..Default::default()
    };
    let err = svc.create_delivery(Some(&no_project)).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(ref m) if m == "project id is required"));

    let err = svc.create_delivery(None).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(ref m) if m == "delivery must not be null"));

    assert!(svc.list_deliveries().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_records_via_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    let err = svc
        .update_delivery_fields(Some(42), Some(&DeliveryInput::new("x", 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(ref m) if m == "delivery not found with id: 42"));

    let err = svc.delete_delivery(Some(42)).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn list_by_project_via_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    for (title, project) in [("a", 1), ("b", 2), ("c", 1)] {
        svc.create_delivery(Some(&DeliveryInput::new(title, project)))
            .await
            .unwrap();
    }

    let titles: Vec<String> = svc
        .list_deliveries_by_project(Some(1))
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.title)
        .collect();
    assert_eq!(titles, vec!["a", "c"]);
    assert!(svc
        .list_deliveries_by_project(Some(5))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn full_record_update_keeps_created_at_over_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    let created = svc
        .create_delivery(Some(&DeliveryInput::new("Sprint 3", 4)))
        .await
        .unwrap();
    let mut record = DeliveryInput::from(&created);
    record.created_at = Some(
        chrono::DateTime::parse_from_rfc3339("2000-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc),
    );

    let updated = svc.update_delivery(Some(&record)).await.unwrap();
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(
        svc.get_delivery(Some(created.id)).await.unwrap().created_at,
        created.created_at
    );
}
