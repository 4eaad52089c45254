use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use yatra_api::{build_app, ApiConfig};
use yatra_storage::StoreConfig;

const ADMIN_KEY: &str = "test-admin-key";

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn app() -> Router {
    let mut config = ApiConfig::new(StoreConfig::new(data_dir(), "shimla"));
    config.admin_key = ADMIN_KEY.to_string();
    build_app(config).expect("app should build")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, parsed)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn admin_post(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-api-key", ADMIN_KEY)
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn itinerary_body(destination: &str, days: u8) -> Value {
    json!({
        "destination": destination,
        "days": days,
        "budget": "low",
        "travelerType": "solo",
        "interests": ["trekking", "photography"],
        "month": "May"
    })
}

#[tokio::test]
async fn health_reports_catalog_counts() {
    let app = app();
    let (status, body) = send(&app, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["primaryDestination"], "Shimla");
    assert_eq!(body["spotsLoaded"], 10);
    assert_eq!(body["destinationsLoaded"], 8);
    assert_eq!(body["catalogVersion"], 1);
    assert!(body["metrics"].get("itineraries_total").is_some());
}

#[tokio::test]
async fn destinations_are_listed_in_catalog_order() {
    let app = app();
    let (status, body) = send(&app, get("/api/destinations")).await;

    assert_eq!(status, StatusCode::OK);
    let destinations = body["destinations"].as_array().unwrap();
    assert_eq!(destinations.len(), 8);
    assert_eq!(destinations[0]["id"], "shimla");
}

#[tokio::test]
async fn destination_snapshot_for_flagship_and_unknown() {
    let app = app();
    let (status, body) = send(&app, get("/api/destination/shimla")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Shimla");
    assert_eq!(body["topSpots"].as_array().unwrap().len(), 5);
    assert!(body["experienceIdeas"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, get("/api/destination/Ziro_Valley")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ziro Valley");
    assert!(body["topSpots"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, get("/api/destination/atlantis")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Try one from the region guide"));
}

#[tokio::test]
async fn flagship_itinerary_covers_every_slot() {
    let app = app();
    let (status, body) = send(&app, post_json("/api/itinerary", itinerary_body("shimla", 3))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["destination"], "Shimla · North India");
    assert_eq!(body["month"], "May");

    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    for (idx, day) in days.iter().enumerate() {
        assert_eq!(day["day"], idx as u64 + 1);
        let segments = day["segments"].as_array().unwrap();
        let slots = segments
            .iter()
            .map(|segment| segment["timeOfDay"].as_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(slots, vec!["Morning", "Afternoon", "Evening"]);
        assert_eq!(segments[0]["travelDistanceKm"], 0.0);
    }
    assert_eq!(body["summary"]["destinationId"], "shimla");
    assert_eq!(body["summary"]["alertsApplied"], 2);
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let app = app();

    let (status, body) = send(&app, post_json("/api/itinerary", itinerary_body("shimla", 9))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let mut luxury = itinerary_body("shimla", 2);
    luxury["budget"] = json!("luxury");
    let (status, body) = send(&app, post_json("/api/itinerary", luxury)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let mut no_interests = itinerary_body("goa", 2);
    no_interests["interests"] = json!([]);
    let (status, _) = send(&app, post_json("/api/itinerary", no_interests)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, post_json("/api/itinerary", itinerary_body("atlantis", 2))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn external_model_request_falls_back_without_credential() {
    let app = app();
    let (_, deterministic) =
        send(&app, post_json("/api/itinerary", itinerary_body("goa", 2))).await;

    let mut external = itinerary_body("goa", 2);
    external["use_llm"] = json!(true);
    let (status, fallback) = send(&app, post_json("/api/itinerary", external)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(deterministic["days"], fallback["days"]);

    let (_, health) = send(&app, get("/api/health")).await;
    assert_eq!(health["metrics"]["external_fallback_total"], 1);
    assert_eq!(health["metrics"]["itineraries_total"], 2);
}

#[tokio::test]
async fn chat_answers_crowd_question_with_field_note() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/api/chat",
            json!({
                "message": "Is Kufri crowded right now?",
                "context": { "destination_id": "shimla" }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!((body["confidence"].as_f64().unwrap() - 0.84).abs() < 1e-6);
    assert_eq!(body["sources"][0]["type"], "insta");
    assert_eq!(body["sources"][0]["id"], "insta-kufri-1");
}

#[tokio::test]
async fn admin_routes_require_api_key() {
    let app = app();

    let (status, body) = send(&app, get("/api/admin/scraped")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let request = Request::builder()
        .uri("/api/admin/scraped?destination=shimla")
        .header("x-api-key", ADMIN_KEY)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alerts"].as_array().unwrap().len(), 2);
    assert!(body["insta"]
        .as_array()
        .unwrap()
        .iter()
        .all(|post| post["destinationId"] == "shimla" || post["destination"] == "shimla"));

    let (status, _) = send(&app, post_json("/api/admin/refresh", json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tagging_boosts_itinerary_until_refresh() {
    let app = app();

    let (status, outcome) = send(
        &app,
        admin_post("/api/admin/tag", json!({ "itemId": "insta-goa-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["taggedItemId"], "insta-goa-1");
    assert_eq!(outcome["destinationId"], "goa");

    let (_, tagged) = send(&app, post_json("/api/itinerary", itinerary_body("goa", 2))).await;
    assert_eq!(tagged["summary"]["taggedHiddenGems"], 1);
    assert_eq!(tagged["summary"]["hiddenGemCount"], 2);

    let (status, reloaded) = send(&app, admin_post("/api/admin/refresh", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reloaded["status"], "reloaded");
    assert_eq!(reloaded["version"], 2);

    let (_, untagged) = send(&app, post_json("/api/itinerary", itinerary_body("goa", 2))).await;
    assert_eq!(untagged["summary"]["taggedHiddenGems"], 0);
}

#[tokio::test]
async fn tagging_unknown_item_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        admin_post("/api/admin/tag", json!({ "itemId": "missing-post" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}
