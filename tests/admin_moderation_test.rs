mod common;

use poem_openapi::param::Path;
use poem_openapi::payload::Json;

use common::{bearer, event_payload, setup_test_app, signup_admin, signup_and_login};
use pulse_backend::api::events::CreateEventResponse;
use pulse_backend::errors::{AdminError, AuthError};
use pulse_backend::types::dto::auth::LoginRequest;

#[tokio::test]
async fn regular_users_cannot_moderate() {
    let app = setup_test_app().await;

    let (_alice_id, alice_token) = signup_and_login(&app, "alice").await;

    let created = app
        .events
        .create_event(bearer(&alice_token), Json(event_payload("Yard sale")))
        .await
        .unwrap();
    let CreateEventResponse::Created(Json(event)) = created;

    // Authenticated but not an admin: 403
    match app.admin.approve(bearer(&alice_token), Path(event.id)).await {
        Err(AdminError::Forbidden(_)) => {}
        other => panic!("Expected Forbidden, got {:?}", other.err()),
    }

    match app.admin.ban(bearer(&alice_token), Path(1)).await {
        Err(AdminError::Forbidden(_)) => {}
        other => panic!("Expected Forbidden, got {:?}", other.err()),
    }

    // No token at all: 401
    match app.admin.flag(bearer("garbage"), Path(event.id)).await {
        Err(AdminError::Unauthorized(_)) => {}
        other => panic!("Expected Unauthorized, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn moderation_against_missing_targets_is_not_found() {
    let app = setup_test_app().await;

    let (_admin_id, admin_token) = signup_admin(&app, "root").await;

    match app.admin.approve(bearer(&admin_token), Path(9999)).await {
        Err(AdminError::NotFound(_)) => {}
        other => panic!("Expected NotFound, got {:?}", other.err()),
    }

    match app.admin.unflag(bearer(&admin_token), Path(9999)).await {
        Err(AdminError::NotFound(_)) => {}
        other => panic!("Expected NotFound, got {:?}", other.err()),
    }

    match app.admin.ban(bearer(&admin_token), Path(9999)).await {
        Err(AdminError::NotFound(_)) => {}
        other => panic!("Expected NotFound, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn reject_keeps_event_out_of_public_listing() {
    let app = setup_test_app().await;

    let (_alice_id, alice_token) = signup_and_login(&app, "alice").await;
    let (_admin_id, admin_token) = signup_admin(&app, "root").await;

    let created = app
        .events
        .create_event(bearer(&alice_token), Json(event_payload("Loud party")))
        .await
        .unwrap();
    let CreateEventResponse::Created(Json(event)) = created;

    app.admin
        .reject(bearer(&admin_token), Path(event.id))
        .await
        .expect("reject should succeed");

    assert!(app.events.list_public().await.unwrap().0.is_empty());

    let all = app.events.list_all().await.unwrap();
    assert_eq!(all.0[0].status, "rejected");
}

#[tokio::test]
async fn ban_cuts_off_future_logins_but_keeps_the_account() {
    let app = setup_test_app().await;

    let (mallory_id, _mallory_token) = signup_and_login(&app, "mallory").await;
    let (_admin_id, admin_token) = signup_admin(&app, "root").await;

    app.admin
        .ban(bearer(&admin_token), Path(mallory_id))
        .await
        .expect("ban should succeed");

    match app
        .auth
        .login(Json(LoginRequest {
            username: "mallory".to_string(),
            password: "password123".to_string(),
        }))
        .await
    {
        Err(AuthError::InvalidCredentials(_)) => {}
        other => panic!("Expected InvalidCredentials, got {:?}", other.err()),
    }

    // The account row is still there, marked banned
    let user = app
        .app_data
        .user_store
        .find_by_id(mallory_id)
        .await
        .unwrap()
        .expect("banned user should not be deleted");
    assert!(user.is_banned);
}
