//! Roster and surface-level API tests using `TestAppBuilder`.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::app_builder::TestAppBuilder;
use common::{error_code, get_json, post_json, seat_member};

#[tokio::test]
async fn health_endpoint_responds() {
    let app = TestAppBuilder::new().build();
    let (status, _) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn admin_seats_a_house_member() {
    let app = TestAppBuilder::new().at_time(1_000).build();
    let admin = app.admin.clone();

    let (status, body) = post_json(
        &app,
        &admin,
        "/api/v1/members",
        &json!({
            "principal": "rep-1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "House",
            "state": "NY",
            "district": 12,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["principal"], "rep-1");
    assert_eq!(body["role"], "House");
    assert_eq!(body["district"], 12);
    assert_eq!(body["term_start"], 1_000);
    assert_eq!(body["active"], true);
    // Two-year House term.
    assert_eq!(body["term_end"], 1_000 + 2 * 31_536_000u64);
}

#[tokio::test]
async fn non_admin_cannot_seat_members() {
    let app = TestAppBuilder::new().with_admin("the-boss").build();

    let (status, body) = post_json(
        &app,
        "intruder",
        "/api/v1/members",
        &json!({
            "principal": "rep-1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "House",
            "state": "NY",
            "district": 12,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "NOT_OWNER");
}

#[tokio::test]
async fn missing_caller_header_is_rejected() {
    let app = TestAppBuilder::new().build();

    let (status, body) = post_json(
        &app,
        "",
        "/api/v1/members",
        &json!({
            "principal": "rep-1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "House",
            "state": "NY",
            "district": 12,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "CALLER_REQUIRED");
}

#[tokio::test]
async fn duplicate_registration_conflicts_even_after_expiry() {
    let app = TestAppBuilder::new().at_time(0).build();
    let admin = app.admin.clone();
    seat_member(&app, "rep-1", "House", 3).await;

    // Push the clock far past the two-year term.
    app.clock.set(3 * 31_536_000);

    let (status, body) = post_json(
        &app,
        &admin,
        "/api/v1/members",
        &json!({
            "principal": "rep-1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "House",
            "state": "NY",
            "district": 3,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "ALREADY_MEMBER");
}

#[tokio::test]
async fn district_rules_are_enforced() {
    let app = TestAppBuilder::new().build();
    let admin = app.admin.clone();

    let (status, body) = post_json(
        &app,
        &admin,
        "/api/v1/members",
        &json!({
            "principal": "rep-1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "House",
            "state": "NY",
            "district": 0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "HOUSE_DISTRICT_REQUIRED");

    let (status, body) = post_json(
        &app,
        &admin,
        "/api/v1/members",
        &json!({
            "principal": "sen-1",
            "first_name": "Bo",
            "last_name": "Burnham",
            "role": "Senate",
            "state": "MA",
            "district": 4,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "SENATE_DISTRICT_MUST_BE_ZERO");
}

#[tokio::test]
async fn member_lookup_reflects_the_clock() {
    let app = TestAppBuilder::new().at_time(500).build();
    seat_member(&app, "sen-1", "Senate", 0).await;

    let (status, body) = get_json(&app, "/api/v1/members/sen-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], true);
    assert_eq!(body["role"], "Senate");

    // Six-year Senate term; jump past it.
    app.clock.set(500 + 7 * 31_536_000);
    let (status, body) = get_json(&app, "/api/v1/members/sen-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], false);
}

#[tokio::test]
async fn unknown_member_lookup_is_not_found() {
    let app = TestAppBuilder::new().build();
    let (status, body) = get_json(&app, "/api/v1/members/nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "MEMBER_NOT_FOUND");
}

#[tokio::test]
async fn second_vice_president_conflicts_while_first_is_active() {
    let app = TestAppBuilder::new().at_time(0).build();
    let admin = app.admin.clone();
    seat_member(&app, "veep-1", "VicePresident", 0).await;

    let (status, body) = post_json(
        &app,
        &admin,
        "/api/v1/members",
        &json!({
            "principal": "veep-2",
            "first_name": "Second",
            "last_name": "Fiddle",
            "role": "VicePresident",
            "state": "DC",
            "district": 0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "VP_ACTIVE");

    // After the four-year term lapses the office reopens.
    app.clock.set(5 * 31_536_000);
    seat_member(&app, "veep-2", "VicePresident", 0).await;
}

#[tokio::test]
async fn metrics_endpoint_responds() {
    let app = TestAppBuilder::new().build();
    let (status, _) = get_json(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
}
