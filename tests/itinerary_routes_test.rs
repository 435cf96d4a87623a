mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{kyoto_preferences, TestApp};

#[actix_rt::test]
async fn test_generate_itinerary_with_template_planner() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itinerary")
        .set_json(&json!({ "preferences": kyoto_preferences() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let plan: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(plan["title"], "Kyoto 2-day itinerary");

    let days = plan["days"].as_array().expect("days");
    assert_eq!(days.len(), 2);
    for day in days {
        assert_eq!(day["activities"].as_array().expect("activities").len(), 3);
        let budget_sum: f64 = day["activities"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|a| a["budget"].as_f64())
            .sum();
        assert_eq!(day["estimatedCost"].as_f64(), Some(budget_sum.round()));
    }

    let expenses = plan["expenses"].as_array().expect("expenses");
    let planned: Vec<f64> = expenses.iter().map(|e| e["planned"].as_f64().unwrap()).collect();
    assert_eq!(planned, vec![1000.0, 1400.0, 800.0, 800.0]);
}

#[actix_rt::test]
async fn test_generate_itinerary_honours_date_range() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itinerary")
        .set_json(&json!({
            "preferences": {
                "destination": "Lisbon",
                "startDate": "2025-05-01",
                "endDate": "2025-05-03",
                "days": 7,
                "budget": 0,
                "travelers": 1
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let plan: serde_json::Value = test::read_body_json(resp).await;
    let dates: Vec<&str> = plan["days"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2025-05-01", "2025-05-02", "2025-05-03"]);
}

#[actix_rt::test]
async fn test_generate_itinerary_rejects_invalid_preferences() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let mut preferences = kyoto_preferences();
    preferences["destination"] = json!("   ");

    let req = test::TestRequest::post()
        .uri("/api/itinerary")
        .set_json(&json!({ "preferences": preferences }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "destination must not be empty");
}

#[actix_rt::test]
async fn test_generate_itinerary_rejects_oversized_trip() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let mut preferences = kyoto_preferences();
    preferences["days"] = json!(4_000_000_000u64);

    let req = test::TestRequest::post()
        .uri("/api/itinerary")
        .set_json(&json!({ "preferences": preferences }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "days must not exceed 366");
}

#[actix_rt::test]
async fn test_generate_itinerary_keeps_four_digit_years() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let mut preferences = kyoto_preferences();
    preferences["startDate"] = json!("9999-12-31");

    let req = test::TestRequest::post()
        .uri("/api/itinerary")
        .set_json(&json!({ "preferences": preferences }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let plan: serde_json::Value = test::read_body_json(resp).await;
    let dates: Vec<&str> = plan["days"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["9999-12-31"]);
}

#[actix_rt::test]
async fn test_generate_itinerary_rejects_malformed_json() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itinerary")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"preferences\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["message"].is_string());
}
