//! Integration tests for WebSocket connection and the health probe.

use http::StatusCode;

use hemolink_entity::user::UserRole;

use crate::helpers;

#[tokio::test]
async fn test_ws_upgrade_without_token() {
    let app = helpers::TestApp::new().await;

    // Upgrade without a token must be rejected before registration
    let response = app.request("GET", "/ws", None, None).await;

    assert!(
        response.status == StatusCode::UNAUTHORIZED
            || response.status == StatusCode::BAD_REQUEST
            || response.status == StatusCode::UPGRADE_REQUIRED,
        "Expected 401, 400, or 426, got {}",
        response.status
    );
}

#[tokio::test]
async fn test_ws_upgrade_with_garbage_token() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/ws?token=not-a-jwt", None, None).await;

    assert!(
        response.status == StatusCode::UNAUTHORIZED
            || response.status == StatusCode::UPGRADE_REQUIRED,
        "Expected 401 or 426, got {}",
        response.status
    );
}

#[tokio::test]
async fn test_health_check() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "up");
    assert_eq!(response.body["live_channels"], 0);
}

#[tokio::test]
async fn test_rest_token_valid_for_ws_identity() {
    let app = helpers::TestApp::new().await;
    let donor = app.create_donor("d1", "O-", true, None).await;
    let token = app.token_for(donor, UserRole::Donor, "d1");

    // The same token authenticates REST calls; the ws handshake reuses it.
    let response = app
        .request("GET", "/api/notifications", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
