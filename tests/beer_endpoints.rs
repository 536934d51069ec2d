//! Beer endpoint tests
//!
//! Drives `/beers` through the full router over an in-memory store:
//! create, read, replace, patch, delete, filters, validation and error bodies.

mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::{json, Value};

use common::{app, body_json, create, send, send_raw};

fn space_dust() -> Value {
    json!({
        "beerName": "Space Dust",
        "beerStyle": "IPA",
        "upc": "12121213",
        "quantityOnHand": 12,
        "price": "10.00"
    })
}

// =============================================================================
// Create and Read
// =============================================================================

#[tokio::test]
async fn test_create_then_get() {
    let app = app();

    let location = create(&app, "/beers", space_dust()).await;
    assert!(location.starts_with("/beers/"));

    let response = send(&app, Method::GET, &location, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let beer = body_json(response).await;
    assert_eq!(beer["beerName"], "Space Dust");
    assert_eq!(beer["beerStyle"], "IPA");
    assert_eq!(beer["upc"], "12121213");
    assert_eq!(beer["quantityOnHand"], 12);
    assert_eq!(beer["price"].to_string(), "10.00");
    assert_eq!(beer["id"], location.trim_start_matches("/beers/"));
    assert!(beer["createdDate"].is_string());
    assert!(beer["updatedDate"].is_string());
}

#[tokio::test]
async fn test_numeric_price_round_trips_unchanged() {
    let app = app();
    let body = r#"{"beerName":"Space Dust","beerStyle":"IPA","price":10.00,"quantityOnHand":12}"#;

    let response = send_raw(&app, Method::POST, "/beers", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();

    let beer = body_json(send(&app, Method::GET, &location, None).await).await;
    assert!(beer["price"].is_number());
    assert_eq!(beer["price"].to_string(), "10.00");
    assert_eq!(beer["quantityOnHand"], 12);
}

#[tokio::test]
async fn test_create_returns_no_body() {
    let app = app();
    let response = send(&app, Method::POST, "/beers", Some(space_dust())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = app();
    let mut body = space_dust();
    body["id"] = json!("chosen-by-client");

    let location = create(&app, "/beers", body).await;
    assert_ne!(location, "/beers/chosen-by-client");

    let response = send(&app, Method::GET, "/beers/chosen-by-client", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let app = app();
    let response = send(&app, Method::GET, "/beers/missing-key", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_empty_list() {
    let app = app();
    let response = send(&app, Method::GET, "/beers", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_list_returns_every_beer() {
    let app = app();
    for name in ["Space Dust", "Efes", "Sunshine City"] {
        create(&app, "/beers", json!({ "beerName": name, "beerStyle": "IPA" })).await;
    }

    let response = send(&app, Method::GET, "/beers", None).await;
    let beers = body_json(response).await;
    let mut names: Vec<&str> = beers
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["beerName"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Efes", "Space Dust", "Sunshine City"]);
}

// =============================================================================
// Replace and Patch
// =============================================================================

#[tokio::test]
async fn test_put_replaces_all_fields() {
    let app = app();
    let location = create(&app, "/beers", space_dust()).await;
    let before = body_json(send(&app, Method::GET, &location, None).await).await;

    let response = send(
        &app,
        Method::PUT,
        &location,
        Some(json!({ "beerName": "Space Dust 2" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let after = body_json(send(&app, Method::GET, &location, None).await).await;
    assert_eq!(after["beerName"], "Space Dust 2");
    assert!(after.get("beerStyle").is_none());
    assert!(after.get("upc").is_none());
    assert!(after.get("quantityOnHand").is_none());
    assert!(after.get("price").is_none());
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["createdDate"], before["createdDate"]);
}

#[tokio::test]
async fn test_put_missing_is_not_found() {
    let app = app();
    let response = send(&app, Method::PUT, "/beers/missing", Some(space_dust())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_changes_only_given_fields() {
    let app = app();
    let location = create(&app, "/beers", space_dust()).await;

    let response = send(
        &app,
        Method::PATCH,
        &location,
        Some(json!({ "beerName": "Space Dusty" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let beer = body_json(send(&app, Method::GET, &location, None).await).await;
    assert_eq!(beer["beerName"], "Space Dusty");
    assert_eq!(beer["beerStyle"], "IPA");
    assert_eq!(beer["quantityOnHand"], 12);
    assert_eq!(beer["price"].to_string(), "10.00");
}

#[tokio::test]
async fn test_patch_ignores_blank_strings() {
    let app = app();
    let location = create(&app, "/beers", space_dust()).await;

    send(
        &app,
        Method::PATCH,
        &location,
        Some(json!({ "beerName": "   ", "beerStyle": "", "quantityOnHand": 0 })),
    )
    .await;

    let beer = body_json(send(&app, Method::GET, &location, None).await).await;
    assert_eq!(beer["beerName"], "Space Dust");
    assert_eq!(beer["beerStyle"], "IPA");
    assert_eq!(beer["quantityOnHand"], 0);
}

#[tokio::test]
async fn test_patch_skips_validation() {
    let app = app();
    let location = create(&app, "/beers", space_dust()).await;

    let response = send(&app, Method::PATCH, &location, Some(json!({ "beerName": "X" }))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_patch_keeps_quantity_when_negative() {
    let app = app();
    let location = create(&app, "/beers", space_dust()).await;

    let response = send(
        &app,
        Method::PATCH,
        &location,
        Some(json!({ "quantityOnHand": -1 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let beer = body_json(send(&app, Method::GET, &location, None).await).await;
    assert_eq!(beer["quantityOnHand"], 12);
}

#[tokio::test]
async fn test_patch_missing_is_not_found() {
    let app = app();
    let response = send(
        &app,
        Method::PATCH,
        "/beers/missing",
        Some(json!({ "beerName": "Space Dusty" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = app();
    let location = create(&app, "/beers", space_dust()).await;

    let response = send(&app, Method::DELETE, &location, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::GET, &location, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::DELETE, &location, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Filters
// =============================================================================

#[tokio::test]
async fn test_filter_by_style() {
    let app = app();
    create(&app, "/beers", json!({ "beerName": "Efes", "beerStyle": "Pilsner" })).await;
    create(&app, "/beers", space_dust()).await;
    create(&app, "/beers", json!({ "beerName": "Sunshine City", "beerStyle": "IPA" })).await;

    let beers = body_json(send(&app, Method::GET, "/beers?style=IPA", None).await).await;
    let beers = beers.as_array().unwrap();
    assert_eq!(beers.len(), 2);
    assert!(beers.iter().all(|b| b["beerStyle"] == "IPA"));
}

#[tokio::test]
async fn test_filter_by_name_returns_at_most_one() {
    let app = app();
    create(&app, "/beers", space_dust()).await;
    create(&app, "/beers", space_dust()).await;

    let beers = body_json(send(&app, Method::GET, "/beers?name=Space%20Dust", None).await).await;
    assert_eq!(beers.as_array().unwrap().len(), 1);

    let none = body_json(send(&app, Method::GET, "/beers?name=Nope", None).await).await;
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn test_name_and_style_together_is_bad_request() {
    let app = app();
    let response = send(&app, Method::GET, "/beers?name=Efes&style=IPA", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Validation and Malformed Input
// =============================================================================

#[tokio::test]
async fn test_create_without_name_is_bad_request() {
    let app = app();
    let response = send(&app, Method::POST, "/beers", Some(json!({ "beerStyle": "IPA" }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], 400);
    assert_eq!(body["violations"][0]["field"], "beerName");

    let list = body_json(send(&app, Method::GET, "/beers", None).await).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_with_negative_quantity_is_bad_request() {
    let app = app();
    let mut body = space_dust();
    body["quantityOnHand"] = json!(-1);

    let response = send(&app, Method::POST, "/beers", Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["violations"][0]["field"], "quantityOnHand");
}

#[tokio::test]
async fn test_put_is_validated() {
    let app = app();
    let location = create(&app, "/beers", space_dust()).await;

    let response = send(&app, Method::PUT, &location, Some(json!({ "beerName": "" }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let beer = body_json(send(&app, Method::GET, &location, None).await).await;
    assert_eq!(beer["beerName"], "Space Dust");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();
    let response = send_raw(&app, Method::POST, "/beers", "{ \"beerName\": ").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}
