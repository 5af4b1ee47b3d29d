use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

use common::{json_request, read_body, read_json, setup_test_app, TestBackend};

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = setup_test_app(Arc::new(TestBackend::new()));

    let response = app
        .oneshot(json_request("GET", "/debug/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["checks"]["poi_count"].as_u64().unwrap() > 0);
    assert_eq!(json["checks"]["route_store"], "memory");
    assert_eq!(json["checks"]["routing_backend"], "test");
    assert_eq!(json["checks"]["saved_routes"], 0);
}

#[tokio::test]
async fn test_poi_browsing() {
    let app = setup_test_app(Arc::new(TestBackend::new()));

    let response = app
        .clone()
        .oneshot(json_request("GET", "/pois?category=waterfall&q=foss", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    let pois = json["pois"].as_array().unwrap();
    assert_eq!(json["count"].as_u64().unwrap() as usize, pois.len());
    assert!(pois.iter().all(|p| p["category"] == "waterfall"));
    assert!(pois.iter().any(|p| p["id"] == "gullfoss"));

    let response = app
        .clone()
        .oneshot(json_request("GET", "/pois/jokulsarlon", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["category"], "glacier");

    let response = app
        .clone()
        .oneshot(json_request("GET", "/pois/does-not-exist", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], "Not Found");

    let response = app
        .oneshot(json_request("GET", "/pois/categories", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let categories = read_json(response).await;
    assert!(categories
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["category"] == "waterfall" && c["count"].as_u64().unwrap() > 1));
}

#[tokio::test]
async fn test_unknown_category_is_bad_request() {
    let app = setup_test_app(Arc::new(TestBackend::new()));
    let response = app
        .oneshot(json_request("GET", "/pois?category=casino", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_building_a_route() {
    let backend = Arc::new(TestBackend::new());
    let app = setup_test_app(backend.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/route/waypoints",
            Some(json!({"poi_id": "thingvellir"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["state"], "incomplete");
    assert!(json["distance_m"].is_null());
    assert_eq!(backend.calls(), 0);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/route/waypoints",
            Some(json!({"waypoint": {
                "id": "summer-house",
                "name": "Summer house",
                "coordinates": {"lat": 64.2, "lng": -20.9},
                "category": "custom"
            }})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["state"], "ready");
    assert_eq!(json["distance_m"], 5_000.0);
    assert_eq!(json["duration_s"], 600.0);
    assert_eq!(json["is_fallback"], false);
    assert_eq!(json["bounds"]["north"], 64.2559);
    assert_eq!(json["bounds"]["south"], 64.2);
    assert_eq!(backend.calls(), 1);

    let response = app
        .clone()
        .oneshot(json_request("DELETE", "/route/waypoints/0", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["state"], "incomplete");
    assert!(json["distance_m"].is_null());
    assert!(json["duration_s"].is_null());
    assert_eq!(json["waypoints"][0]["id"], "summer-house");
    assert_eq!(backend.calls(), 1);

    let response = app
        .oneshot(json_request("DELETE", "/route/waypoints/7", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_waypoint_requires_exactly_one_source() {
    let app = setup_test_app(Arc::new(TestBackend::new()));

    let response = app
        .clone()
        .oneshot(json_request("POST", "/route/waypoints", Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "POST",
            "/route/waypoints",
            Some(json!({"poi_id": "nowhere"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_fallback_is_reported() {
    let app = setup_test_app(Arc::new(TestBackend::unavailable()));

    for poi in ["reykjavik", "akureyri"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/route/waypoints",
                Some(json!({"poi_id": poi})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(json_request("GET", "/route", None))
        .await
        .unwrap();
    let json = read_json(response).await;
    assert_eq!(json["state"], "ready");
    assert_eq!(json["is_fallback"], true);

    // 1.3 x ~249 km straight line
    let distance_km = json["distance_m"].as_f64().unwrap() / 1000.0;
    assert!(
        distance_km > 310.0 && distance_km < 340.0,
        "unexpected fallback distance {}",
        distance_km
    );
}

#[tokio::test]
async fn test_mode_move_optimize_and_clear() {
    let backend = Arc::new(TestBackend::new());
    let app = setup_test_app(backend.clone());

    for poi in ["reykjavik", "akureyri", "thingvellir"] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/route/waypoints",
                Some(json!({"poi_id": poi})),
            ))
            .await
            .unwrap();
    }
    assert_eq!(backend.calls(), 2);

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/route/mode", Some(json!({"mode": "walking"}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["mode"], "walking");
    assert_eq!(backend.calls(), 3);

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/route/mode", Some(json!({"mode": "teleport"}))))
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/route/optimize", Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    let order: Vec<&str> = json["waypoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["reykjavik", "thingvellir", "akureyri"]);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/route/waypoints/move",
            Some(json!({"from": 2, "to": 0})),
        ))
        .await
        .unwrap();
    let json = read_json(response).await;
    assert_eq!(json["waypoints"][0]["id"], "akureyri");

    let response = app
        .oneshot(json_request("POST", "/route/clear", None))
        .await
        .unwrap();
    let json = read_json(response).await;
    assert_eq!(json["state"], "empty");
    assert_eq!(json["mode"], "walking");
    assert!(json["waypoints"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_saved_route_lifecycle() {
    let app = setup_test_app(Arc::new(TestBackend::new()));

    for poi in ["seljalandsfoss", "skogafoss"] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/route/waypoints",
                Some(json!({"poi_id": poi})),
            ))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/routes",
            Some(json!({"name": "South coast", "description": "Day one"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let saved = read_json(response).await;
    let id = saved["id"].as_str().unwrap().to_string();
    assert_eq!(saved["name"], "South coast");
    assert_eq!(saved["distance_m"], 5_000.0);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/routes/{}", id),
            Some(json!({"name": "South coast, revised"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["name"], "South coast, revised");

    let response = app
        .clone()
        .oneshot(json_request("GET", "/routes", None))
        .await
        .unwrap();
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/routes/{}/export?format=html", id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .contains("south-coast-revised.html"));
    let html = String::from_utf8(read_body(response).await).unwrap();
    assert!(html.contains("Skógafoss") || html.contains("Skogafoss"));

    let response = app
        .clone()
        .oneshot(json_request("DELETE", &format!("/routes/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_request("GET", &format!("/routes/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_empty_route_is_rejected() {
    let app = setup_test_app(Arc::new(TestBackend::new()));
    let response = app
        .oneshot(json_request("POST", "/routes", Some(json!({"name": "Nothing"}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_export_import_and_load() {
    let backend = Arc::new(TestBackend::new());
    let app = setup_test_app(backend.clone());

    for poi in ["kirkjufell", "snaefellsjokull"] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/route/waypoints",
                Some(json!({"poi_id": poi})),
            ))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(json_request("GET", "/route/export?format=pdf", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/route/export", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let exported = String::from_utf8(read_body(response).await).unwrap();

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/routes/import")
                .body(axum::body::Body::from(exported))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let imported = read_json(response).await;
    assert_eq!(imported["name"], "Current route");
    assert_eq!(imported["waypoints"].as_array().unwrap().len(), 2);
    let id = imported["id"].as_str().unwrap().to_string();

    app.clone()
        .oneshot(json_request("POST", "/route/clear", None))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request("POST", &format!("/routes/{}/load", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["state"], "ready");
    assert_eq!(json["waypoints"][0]["id"], "kirkjufell");
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_import_rejects_routes_without_valid_waypoints() {
    let app = setup_test_app(Arc::new(TestBackend::new()));

    let empty = json!({
        "name": "Empty",
        "waypoints": [],
        "distance_m": 0.0,
        "duration_s": 0.0,
        "mode": "driving"
    });
    let blank_id = json!({
        "name": "Blank id",
        "waypoints": [{
            "id": "",
            "name": "Somewhere",
            "coordinates": {"lat": 64.1, "lng": -21.9},
            "category": "custom"
        }],
        "distance_m": 0.0,
        "duration_s": 0.0,
        "mode": "driving"
    });

    for body in [empty, blank_id] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/routes/import", Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app
        .oneshot(json_request("GET", "/routes", None))
        .await
        .unwrap();
    assert!(read_json(response).await.as_array().unwrap().is_empty());
}
