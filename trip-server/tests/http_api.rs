mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::{FakeActivities, app, get, post_json, state};
use trip_server::web::create_router;

fn itinerary_request() -> serde_json::Value {
    json!({
        "start_id": "1",
        "end_id": "3",
        "waypoints": "Lake Tekapo",
        "start_date": "2025-01-01",
        "end_date": "2025-01-05"
    })
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn place_search_ranks_exact_match_first() {
    let (status, body) = get(app(), "/api/places/search?q=queenstown").await;
    assert_eq!(status, StatusCode::OK);

    let places = body["places"].as_array().unwrap();
    assert_eq!(places.len(), 2);
    assert_eq!(places[0]["name"], "Queenstown");
    assert_eq!(places[1]["name"], "Queenstown Hill");
}

#[tokio::test]
async fn place_search_respects_limit() {
    let (_, body) = get(app(), "/api/places/search?q=queenstown&limit=1").await;
    assert_eq!(body["places"].as_array().unwrap().len(), 1);

    let (_, body) = get(app(), "/api/places/search?q=").await;
    assert!(body["places"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn place_by_id() {
    let (status, body) = get(app(), "/api/places/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Lake Tekapo");
    assert_eq!(body["lat"], -44.0046);

    let (status, body) = get(app(), "/api/places/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Place 999 not found");
}

#[tokio::test]
async fn nearby_falls_back_to_local_scan() {
    let (status, body) = get(
        app(),
        "/api/places/nearby?lat=-45.03&lng=168.66&radius_km=300",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body["places"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    // Christchurch is ~360 km away
    assert_eq!(names, vec!["Queenstown", "Queenstown Hill", "Lake Tekapo"]);
}

#[tokio::test]
async fn nearby_rejects_bad_input() {
    let (status, _) = get(app(), "/api/places/nearby?lat=-95&lng=168.66").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(app(), "/api/places/nearby?lat=-45&lng=168&radius_km=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("radius_km"));
}

#[tokio::test]
async fn itinerary_with_routed_legs() {
    let (status, body) = post_json(app(), "/api/itinerary", itinerary_request(), None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["start"]["name"], "Christchurch");
    assert_eq!(body["end"]["name"], "Queenstown");
    assert_eq!(
        body["plan"]["stops"],
        json!(["Christchurch", "Lake Tekapo", "Queenstown"])
    );
    assert_eq!(body["plan"]["nights"], json!([2, 2, 1]));

    let days = body["plan"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 5);
    assert_eq!(days[2]["date"], "2025-01-03");
    assert_eq!(days[2]["location"], "Lake Tekapo");

    let meta = body["day_meta"].as_array().unwrap();
    assert_eq!(meta.len(), 5);
    assert_eq!(meta[2], json!({"stop_index": 1, "is_first_day": true}));
    assert_eq!(meta[3], json!({"stop_index": 1, "is_first_day": false}));

    assert_eq!(body["legs"]["source"], "routed");
    let legs = body["legs"]["legs"].as_array().unwrap();
    assert_eq!(legs.len(), 2);
    assert_eq!(legs[0]["from"], "Christchurch");
    assert_eq!(legs[0]["to"], "Lake Tekapo");
    assert!(body.get("activities").is_none());
}

#[tokio::test]
async fn itinerary_falls_back_to_estimates() {
    let app = create_router(state(true));
    let (status, body) = post_json(app, "/api/itinerary", itinerary_request(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["legs"]["source"], "estimated");
    assert_eq!(body["legs"]["legs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_waypoint_is_left_out_of_route() {
    let mut req = itinerary_request();
    req["waypoints"] = json!("Atlantis, Lake Tekapo");

    let (status, body) = post_json(app(), "/api/itinerary", req, None).await;
    assert_eq!(status, StatusCode::OK);
    // Still a stop in the plan
    assert_eq!(body["plan"]["stops"].as_array().unwrap().len(), 4);
    // But not routed to
    assert_eq!(body["legs"]["legs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn itinerary_validation_errors() {
    let mut req = itinerary_request();
    req["start_id"] = json!(null);
    let (status, body) = post_json(app(), "/api/itinerary", req, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please select a valid start city");

    let mut req = itinerary_request();
    req["end_id"] = json!("999");
    let (status, body) = post_json(app(), "/api/itinerary", req, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please select a valid end city");

    let mut req = itinerary_request();
    req["end_date"] = json!("2024-12-31");
    let (status, _) = post_json(app(), "/api/itinerary", req, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn itinerary_rejects_overlong_trip() {
    let mut req = itinerary_request();
    req["end_date"] = json!("9999-12-31");
    let (status, body) = post_json(app(), "/api/itinerary", req, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Trips can be at most 366 days long");

    // 2025-01-01 through 2026-01-01 is exactly the limit
    let mut req = itinerary_request();
    req["end_date"] = json!("2026-01-01");
    let (status, body) = post_json(app(), "/api/itinerary", req, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plan"]["days"].as_array().unwrap().len(), 366);
}

#[tokio::test]
async fn itinerary_with_activities() {
    let app = create_router(state(false).with_activities(Arc::new(FakeActivities)));
    let mut req = itinerary_request();
    req["activities"] = json!(true);

    let (status, body) = post_json(app, "/api/itinerary", req, None).await;
    assert_eq!(status, StatusCode::OK);

    let days = body["activities"].as_array().unwrap();
    assert_eq!(days.len(), 5);
    assert!(days[0]["activities"].as_array().unwrap().is_empty());
    assert_eq!(days[2]["activities"][0]["id"], "n2");
    assert!(days[3]["activities"].as_array().unwrap().is_empty());
    assert_eq!(days[4]["activities"][0]["id"], "n1");
}

#[tokio::test]
async fn route_legs_for_points() {
    let payload = json!({
        "points": [
            {"lat": -43.5321, "lng": 172.6362, "name": "Christchurch"},
            {"lat": -45.0312, "lng": 168.6626}
        ]
    });
    let (status, body) = post_json(app(), "/api/route/legs", payload, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "routed");
    assert_eq!(body["legs"][0]["from"], "Christchurch");
    assert_eq!(body["legs"][0]["to"], "Stop 2");
    assert!(body["total_km"].as_f64().unwrap() > 300.0);
}

#[tokio::test]
async fn route_legs_reject_null_island() {
    let payload = json!({
        "points": [
            {"lat": 0.0, "lng": 0.0},
            {"lat": -45.0312, "lng": 168.6626}
        ]
    });
    let (status, _) = post_json(app(), "/api/route/legs", payload, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let payload = json!({"points": [{"lat": -45.0312, "lng": 168.6626}]});
    let (status, _) = post_json(app(), "/api/route/legs", payload, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn activities_need_a_provider() {
    let (status, body) = get(app(), "/api/activities?q=jetboat").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Activity search is not configured");
}

#[tokio::test]
async fn activity_search() {
    let app = create_router(state(false).with_activities(Arc::new(FakeActivities)));

    let (status, body) = get(app.clone(), "/api/activities?q=jetboat").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "fake");
    assert_eq!(body["activities"][0]["title"], "jetboat");

    let (status, body) = get(app.clone(), "/api/activities?lat=-45.03&lng=168.66").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activities"].as_array().unwrap().len(), 2);

    let (status, _) = get(app, "/api/activities?lat=-45.03").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn trip_payload() -> serde_json::Value {
    json!({
        "trip": {
            "title": "Southern lakes",
            "start_date": "2025-01-01",
            "end_date": "2025-01-02",
            "stops": ["Queenstown"]
        },
        "days": [
            {"day": 1, "date": "2025-01-01", "location": "Queenstown"},
            {"day": 2, "date": "2025-01-02", "location": "Queenstown", "notes": "Milford day trip"}
        ],
        "activities": [
            {"day": 2, "kind": "tour", "title": "Milford Sound cruise",
             "booking": {"reference": "MS-77", "price": 129.0, "currency": "NZD"}}
        ]
    })
}

#[tokio::test]
async fn anonymous_trip_access() {
    let (status, body) = get(app(), "/trips").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = post_json(app(), "/trips", trip_payload(), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "authentication required"}));
}

#[tokio::test]
async fn anonymous_post_is_401_even_with_bad_body() {
    let (status, _) = post_json(app(), "/trips", json!("not a trip"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn save_and_list_trips() {
    let app = app();

    let (status, saved) = post_json(app.clone(), "/trips", trip_payload(), Some("user-1")).await;
    assert_eq!(status, StatusCode::OK);

    let trip_id = saved["trip"]["id"].as_str().unwrap().to_string();
    assert_eq!(trip_id.len(), 36);
    assert_eq!(saved["trip"]["user_id"], "user-1");
    assert_eq!(saved["days"][1]["trip_id"], trip_id.as_str());
    assert_eq!(saved["activities"][0]["day_id"], saved["days"][1]["id"]);
    assert!(saved["trip"]["created_at"].is_string());

    let (status, listed) = get_as(app.clone(), "/trips", "user-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["trip"]["id"], trip_id.as_str());

    let (_, listed) = get_as(app.clone(), "/trips", "user-2").await;
    assert_eq!(listed, json!([]));

    // Someone else can't overwrite it
    let (status, body) = post_json(app.clone(), "/trips", saved.clone(), Some("user-2")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains(&trip_id));

    // The owner can, and keeps the creation time
    let mut edited = saved.clone();
    edited["trip"]["title"] = json!("Southern lakes and fiords");
    let (status, updated) = post_json(app, "/trips", edited, Some("user-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["trip"]["id"], trip_id.as_str());
    assert_eq!(updated["trip"]["created_at"], saved["trip"]["created_at"]);
}

#[tokio::test]
async fn invalid_trip_body() {
    let (status, body) = post_json(app(), "/trips", json!({"trip": {}}), Some("user-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid trip"));
}

async fn get_as(app: axum::Router, uri: &str, user: &str) -> (StatusCode, serde_json::Value) {
    common::send(
        app,
        axum::http::Request::builder()
            .method("GET")
            .uri(uri)
            .header("x-user-id", user)
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await
}
