//! Integration tests for the notification feed.

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;

use hemolink_entity::user::UserRole;

use crate::helpers;

async fn seed_request(app: &helpers::TestApp, patient_token: &str) -> String {
    let body = json!({
        "blood_type": "O-",
        "units": 1,
        "urgency": "medium",
        "required_by": (Utc::now().date_naive() + Duration::days(3)).to_string(),
    });
    let response = app
        .request("POST", "/api/blood-requests", Some(body), Some(patient_token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_feed_lists_newest_first() {
    let app = helpers::TestApp::new().await;
    let patient = app.create_user("pat", UserRole::Patient).await;
    let patient_token = app.token_for(patient, UserRole::Patient, "pat");
    let donor = app.create_donor("d1", "O-", true, None).await;
    let donor_token = app.token_for(donor, UserRole::Donor, "d1");

    seed_request(&app, &patient_token).await;
    seed_request(&app, &patient_token).await;

    let response = app
        .request("GET", "/api/notifications?page=1&page_size=10", None, Some(&donor_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items[0]["created_at"].as_str() >= items[1]["created_at"].as_str());
    assert_eq!(response.body["data"]["total_items"], 2);
}

#[tokio::test]
async fn test_unread_count_and_mark_read_idempotent() {
    let app = helpers::TestApp::new().await;
    let patient = app.create_user("pat", UserRole::Patient).await;
    let patient_token = app.token_for(patient, UserRole::Patient, "pat");
    let donor = app.create_donor("d1", "O-", true, None).await;
    let donor_token = app.token_for(donor, UserRole::Donor, "d1");

    seed_request(&app, &patient_token).await;

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(&donor_token))
        .await;
    assert_eq!(response.body["data"]["count"], 1);

    let response = app
        .request("GET", "/api/notifications", None, Some(&donor_token))
        .await;
    let id = response.body["data"]["items"][0]["id"].as_str().unwrap().to_string();

    // Marking twice returns the same read row both times.
    for _ in 0..2 {
        let response = app
            .request("PUT", &format!("/api/notifications/{id}"), None, Some(&donor_token))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["data"]["is_read"], true);
    }

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(&donor_token))
        .await;
    assert_eq!(response.body["data"]["count"], 0);
}

#[tokio::test]
async fn test_cannot_mark_anothers_notification() {
    let app = helpers::TestApp::new().await;
    let patient = app.create_user("pat", UserRole::Patient).await;
    let patient_token = app.token_for(patient, UserRole::Patient, "pat");
    let donor = app.create_donor("d1", "O-", true, None).await;
    let donor_token = app.token_for(donor, UserRole::Donor, "d1");

    seed_request(&app, &patient_token).await;

    let response = app
        .request("GET", "/api/notifications", None, Some(&donor_token))
        .await;
    let id = response.body["data"]["items"][0]["id"].as_str().unwrap().to_string();

    let response = app
        .request("PUT", &format!("/api/notifications/{id}"), None, Some(&patient_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_mark_read_unknown_id() {
    let app = helpers::TestApp::new().await;
    let donor = app.create_donor("d1", "O-", true, None).await;
    let token = app.token_for(donor, UserRole::Donor, "d1");

    let response = app
        .request(
            "PUT",
            "/api/notifications/00000000-0000-0000-0000-999999999999",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_feed_requires_authentication() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/notifications", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admins_share_one_feed() {
    let app = helpers::TestApp::new().await;
    let patient = app.create_user("pat", UserRole::Patient).await;
    let patient_token = app.token_for(patient, UserRole::Patient, "pat");
    let a1 = app.create_user("root1", UserRole::Admin).await;
    let a2 = app.create_user("root2", UserRole::Admin).await;

    seed_request(&app, &patient_token).await;

    for (admin, name) in [(a1, "root1"), (a2, "root2")] {
        let token = app.token_for(admin, UserRole::Admin, name);
        let response = app
            .request("GET", "/api/notifications", None, Some(&token))
            .await;
        assert_eq!(response.body["data"]["total_items"], 1);
    }
}
