// Backend-agnostic integration tests for the Database trait.
//
// Each public async function accepts `&dyn Database` so that the same logic
// can be exercised against both the SQLite and Postgres backends.

#![allow(dead_code)]

use deliveries_core::delivery::{NewDelivery, SaveDelivery};
use deliveries_db::Database;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_delivery(title: &str, project_id: i32) -> NewDelivery {
    NewDelivery {
        title: title.to_string(),
        description: None,
        file_url: None,
        created_at: None,
        project_id,
    }
}

// ---------------------------------------------------------------------------
// Delivery tests
// ---------------------------------------------------------------------------

/// Insert, find, list, save, delete.
pub async fn test_delivery_crud(db: &dyn Database) {
    let d = db
        .insert_delivery(&NewDelivery {
            title: "Sprint 1".into(),
            description: Some("first iteration".into()),
            file_url: Some("https://example.com/s1.zip".into()),
            created_at: None,
            project_id: 7,
        })
        .await
        .unwrap();
    assert_eq!(d.title, "Sprint 1");
    assert_eq!(d.description.as_deref(), Some("first iteration"));
    assert_eq!(d.file_url.as_deref(), Some("https://example.com/s1.zip"));
    assert_eq!(d.project_id, 7);

    // find
    let fetched = db.find_delivery(d.id).await.unwrap().unwrap();
    assert_eq!(fetched, d);

    // list
    let all = db.list_deliveries().await.unwrap();
    assert_eq!(all.len(), 1);

    // save (update in place)
    let saved = db
        .save_delivery(&SaveDelivery {
            id: d.id,
            title: "Sprint 1 final".into(),
            description: None,
            file_url: d.file_url.clone(),
            created_at: None,
            project_id: 7,
        })
        .await
        .unwrap();
    assert_eq!(saved.id, d.id);
    assert_eq!(saved.title, "Sprint 1 final");
    assert_eq!(saved.description, None);
    assert_eq!(saved.created_at, d.created_at);

    // delete
    db.delete_delivery(d.id).await.unwrap();
    assert!(db.find_delivery(d.id).await.unwrap().is_none());
    assert!(db.list_deliveries().await.unwrap().is_empty());
}

/// Missing ids are reported as absent rather than as errors, except for
/// delete which has nothing to act on.
pub async fn test_missing_delivery(db: &dyn Database) {
    assert!(db.find_delivery(999).await.unwrap().is_none());
    assert!(!db.delivery_exists(999).await.unwrap());
    let err = db.delete_delivery(999).await.unwrap_err();
    assert!(
        matches!(err, deliveries_db::DbError::NotFound(_)),
        "expected NotFound, got {err:?}"
    );
}

pub async fn test_exists(db: &dyn Database) {
    let d = db.insert_delivery(&make_delivery("a", 1)).await.unwrap();
    assert!(db.delivery_exists(d.id).await.unwrap());
    db.delete_delivery(d.id).await.unwrap();
    assert!(!db.delivery_exists(d.id).await.unwrap());
}

/// Ids grow with each insert and listing follows them.
pub async fn test_insertion_order(db: &dyn Database) {
    let a = db.insert_delivery(&make_delivery("a", 1)).await.unwrap();
    let b = db.insert_delivery(&make_delivery("b", 1)).await.unwrap();
    let c = db.insert_delivery(&make_delivery("c", 2)).await.unwrap();
    assert!(a.id < b.id && b.id < c.id);

    let titles: Vec<String> = db
        .list_deliveries()
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.title)
        .collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}

pub async fn test_list_by_project(db: &dyn Database) {
    db.insert_delivery(&make_delivery("p1-a", 1)).await.unwrap();
    db.insert_delivery(&make_delivery("p2-a", 2)).await.unwrap();
    db.insert_delivery(&make_delivery("p1-b", 1)).await.unwrap();

    let p1 = db.list_deliveries_by_project(1).await.unwrap();
    assert_eq!(p1.len(), 2);
    assert!(p1.iter().all(|d| d.project_id == 1));
    assert_eq!(p1[0].title, "p1-a");
    assert_eq!(p1[1].title, "p1-b");

    let p2 = db.list_deliveries_by_project(2).await.unwrap();
    assert_eq!(p2.len(), 1);

    let none = db.list_deliveries_by_project(3).await.unwrap();
    assert!(none.is_empty());
}

/// Insert stamps `created_at` when the caller leaves it out.
pub async fn test_created_at_defaults(db: &dyn Database) {
    let before = chrono::Utc::now() - chrono::Duration::seconds(1);
    let d = db.insert_delivery(&make_delivery("stamped", 1)).await.unwrap();
    let after = chrono::Utc::now() + chrono::Duration::seconds(1);
    assert!(d.created_at >= before && d.created_at <= after);
}
