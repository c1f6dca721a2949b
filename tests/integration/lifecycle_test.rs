//! Integration tests for the blood request lifecycle.

use chrono::{Duration, Months, Utc};
use http::StatusCode;
use serde_json::json;

use hemolink_entity::user::UserRole;

use crate::helpers;

fn request_body(blood_type: &str) -> serde_json::Value {
    json!({
        "blood_type": blood_type,
        "units": 2,
        "urgency": "high",
        "required_by": (Utc::now().date_naive() + Duration::days(7)).to_string(),
    })
}

#[tokio::test]
async fn test_create_request_fans_out_to_matching_donors() {
    let app = helpers::TestApp::new().await;
    let today = Utc::now().date_naive();

    let patient = app.create_user("pat", UserRole::Patient).await;
    let token = app.token_for(patient, UserRole::Patient, "pat");

    // Exact type, never donated: eligible.
    let eligible = app.create_donor("d1", "O-", true, None).await;
    // Donated four months ago: eligible again.
    let rested = app
        .create_donor("d2", "O-", true, today.checked_sub_months(Months::new(4)))
        .await;
    // Donated last week: not eligible.
    let recent = app
        .create_donor("d3", "O-", true, Some(today - Duration::days(7)))
        .await;
    // Wrong type: not eligible.
    let wrong_type = app.create_donor("d4", "A+", true, None).await;
    // Inactive: not eligible.
    let inactive = app.create_donor("d5", "O-", false, None).await;

    let response = app
        .request("POST", "/api/blood-requests", Some(request_body("O-")), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["status"], "pending");

    let notified: Vec<(uuid::Uuid,)> = sqlx::query_as(
        "SELECT recipient_id FROM notifications \
         WHERE recipient_type = 'donor' AND event_type = 'blood_request'",
    )
    .fetch_all(&app.db_pool)
    .await
    .unwrap();
    let notified: Vec<uuid::Uuid> = notified.into_iter().map(|r| r.0).collect();

    assert!(notified.contains(&eligible));
    assert!(notified.contains(&rested));
    assert!(!notified.contains(&recent));
    assert!(!notified.contains(&wrong_type));
    assert!(!notified.contains(&inactive));

    // Admin group gets one persisted copy.
    let admin_count: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM notifications WHERE recipient_type = 'admin'",
    )
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(admin_count.0, 1);
}

#[tokio::test]
async fn test_create_request_rejects_past_date() {
    let app = helpers::TestApp::new().await;
    let patient = app.create_user("pat", UserRole::Patient).await;
    let token = app.token_for(patient, UserRole::Patient, "pat");

    let body = json!({
        "blood_type": "A+",
        "units": 1,
        "urgency": "low",
        "required_by": (Utc::now().date_naive() - Duration::days(1)).to_string(),
    });
    let response = app
        .request("POST", "/api/blood-requests", Some(body), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_donor_role_required_to_accept() {
    let app = helpers::TestApp::new().await;
    let patient = app.create_user("pat", UserRole::Patient).await;
    let patient_token = app.token_for(patient, UserRole::Patient, "pat");

    let response = app
        .request("POST", "/api/blood-requests", Some(request_body("B+")), Some(&patient_token))
        .await;
    let id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/blood-requests/{id}/accept"),
            None,
            Some(&patient_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_concurrent_accepts_one_winner() {
    let app = helpers::TestApp::new().await;
    let patient = app.create_user("pat", UserRole::Patient).await;
    let patient_token = app.token_for(patient, UserRole::Patient, "pat");

    let d1 = app.create_donor("d1", "O-", true, None).await;
    let d2 = app.create_donor("d2", "O-", true, None).await;
    let t1 = app.token_for(d1, UserRole::Donor, "d1");
    let t2 = app.token_for(d2, UserRole::Donor, "d2");

    let response = app
        .request("POST", "/api/blood-requests", Some(request_body("O-")), Some(&patient_token))
        .await;
    let id = response.body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/blood-requests/{id}/accept");

    let (r1, r2) = tokio::join!(
        app.request("PUT", &path, None, Some(&t1)),
        app.request("PUT", &path, None, Some(&t2)),
    );

    let statuses = [r1.status, r2.status];
    assert!(statuses.contains(&StatusCode::OK));
    assert!(statuses.contains(&StatusCode::CONFLICT));

    let (status, matched): (String, Option<uuid::Uuid>) = sqlx::query_as(
        "SELECT status::text, matched_donor_id FROM blood_requests WHERE id = $1::uuid",
    )
    .bind(&id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(status, "matched");
    assert!(matched == Some(d1) || matched == Some(d2));
}

#[tokio::test]
async fn test_reject_reopens_request() {
    let app = helpers::TestApp::new().await;
    let patient = app.create_user("pat", UserRole::Patient).await;
    let patient_token = app.token_for(patient, UserRole::Patient, "pat");
    let donor = app.create_donor("d1", "AB-", true, None).await;
    let donor_token = app.token_for(donor, UserRole::Donor, "d1");

    let response = app
        .request("POST", "/api/blood-requests", Some(request_body("AB-")), Some(&patient_token))
        .await;
    let id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/accept"), None, Some(&donor_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "matched");

    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/reject"), None, Some(&donor_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "pending");
    assert!(response.body["data"]["matched_donor_id"].is_null());

    // Another donor can now claim.
    let other = app.create_donor("d2", "AB-", true, None).await;
    let other_token = app.token_for(other, UserRole::Donor, "d2");
    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/accept"), None, Some(&other_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_accept_confirm_fulfill_flow() {
    let app = helpers::TestApp::new().await;
    let institution = app.create_user("st-mary", UserRole::Institution).await;
    let inst_token = app.token_for(institution, UserRole::Institution, "st-mary");
    let donor = app.create_donor("d1", "A-", true, None).await;
    let donor_token = app.token_for(donor, UserRole::Donor, "d1");

    let response = app
        .request("POST", "/api/blood-requests", Some(request_body("A-")), Some(&inst_token))
        .await;
    let id = response.body["data"]["id"].as_str().unwrap().to_string();

    // Fulfilling before the donor confirms is a conflict.
    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/accept"), None, Some(&donor_token))
        .await;
    assert_eq!(response.body["data"]["status"], "matched");
    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/fulfill"), None, Some(&inst_token))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    // Matched donor accepting again confirms.
    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/accept"), None, Some(&donor_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "accepted");

    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/fulfill"), None, Some(&inst_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "fulfilled");
}

#[tokio::test]
async fn test_cancel_terminal_request_conflicts() {
    let app = helpers::TestApp::new().await;
    let patient = app.create_user("pat", UserRole::Patient).await;
    let token = app.token_for(patient, UserRole::Patient, "pat");

    let response = app
        .request("POST", "/api/blood-requests", Some(request_body("B-")), Some(&token))
        .await;
    let id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/cancel"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "cancelled");

    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/cancel"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cancel_matched_request_clears_donor_and_notifies() {
    let app = helpers::TestApp::new().await;
    let patient = app.create_user("pat", UserRole::Patient).await;
    let token = app.token_for(patient, UserRole::Patient, "pat");
    let donor = app.create_donor("d1", "A+", true, None).await;
    let donor_token = app.token_for(donor, UserRole::Donor, "d1");

    let response = app
        .request("POST", "/api/blood-requests", Some(request_body("A+")), Some(&token))
        .await;
    let id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/accept"), None, Some(&donor_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/cancel"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["matched_donor_id"].is_null());

    // The cancelled row no longer names a donor.
    let (status, matched): (String, Option<uuid::Uuid>) = sqlx::query_as(
        "SELECT status::text, matched_donor_id FROM blood_requests WHERE id = $1::uuid",
    )
    .bind(&id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(status, "cancelled");
    assert!(matched.is_none());

    // The formerly matched donor was still informed.
    let notified: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM notifications \
         WHERE recipient_type = 'donor' AND recipient_id = $1 \
           AND event_type = 'request_cancelled'",
    )
    .bind(donor)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(notified.0, 1);
}

#[tokio::test]
async fn test_rejection_notification_names_the_donor() {
    let app = helpers::TestApp::new().await;
    let patient = app.create_user("pat", UserRole::Patient).await;
    let token = app.token_for(patient, UserRole::Patient, "pat");
    let donor = app.create_donor("d1", "B+", true, None).await;
    let donor_token = app.token_for(donor, UserRole::Donor, "d1");

    let response = app
        .request("POST", "/api/blood-requests", Some(request_body("B+")), Some(&token))
        .await;
    let id = response.body["data"]["id"].as_str().unwrap().to_string();

    app.request("PUT", &format!("/api/blood-requests/{id}/accept"), None, Some(&donor_token))
        .await;
    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/reject"), None, Some(&donor_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The row is back to pending with no donor, but the requester's
    // notification records who withdrew.
    let (match_donor,): (Option<uuid::Uuid>,) = sqlx::query_as(
        "SELECT match_donor_id FROM notifications \
         WHERE recipient_type = 'patient' AND recipient_id = $1 \
           AND event_type = 'request_rejected'",
    )
    .bind(patient)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(match_donor, Some(donor));
}

#[tokio::test]
async fn test_cancel_requires_owner_or_admin() {
    let app = helpers::TestApp::new().await;
    let patient = app.create_user("pat", UserRole::Patient).await;
    let token = app.token_for(patient, UserRole::Patient, "pat");
    let other = app.create_user("other", UserRole::Patient).await;
    let other_token = app.token_for(other, UserRole::Patient, "other");
    let admin = app.create_user("root", UserRole::Admin).await;
    let admin_token = app.token_for(admin, UserRole::Admin, "root");

    let response = app
        .request("POST", "/api/blood-requests", Some(request_body("O+")), Some(&token))
        .await;
    let id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/cancel"), None, Some(&other_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("PUT", &format!("/api/blood-requests/{id}/cancel"), None, Some(&admin_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_request_not_found() {
    let app = helpers::TestApp::new().await;
    let donor = app.create_donor("d1", "O+", true, None).await;
    let token = app.token_for(donor, UserRole::Donor, "d1");

    let response = app
        .request(
            "PUT",
            "/api/blood-requests/00000000-0000-0000-0000-999999999999/accept",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
