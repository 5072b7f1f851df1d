//! End-to-end API tests over in-memory stores

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderValue;
use axum_test::TestServer;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use core_kernel::SequenceAllocator;
use domain_billing::BillingService;
use domain_fleet::FleetService;
use interface_api::{auth, config::ApiConfig, create_router, AppState};
use test_utils::{
    MemBillStore, MemClientStore, MemCounterStore, MemDriverStore, MemShipmentStore,
    MemTruckStore,
};

fn test_app() -> (TestServer, String) {
    let config = ApiConfig::default();
    let counters = Arc::new(MemCounterStore::new());
    let allocator = SequenceAllocator::new(counters.clone());

    let fleet = FleetService::new(
        allocator.clone(),
        Arc::new(MemClientStore::new()),
        Arc::new(MemDriverStore::new()),
        Arc::new(MemTruckStore::new()),
        Arc::new(MemShipmentStore::new()),
    );
    let billing = BillingService::new(allocator, Arc::new(MemBillStore::new()));

    let token = auth::create_token(
        "test-ops",
        vec!["admin".to_string()],
        &config.jwt_secret,
        config.jwt_expiration_secs,
    )
    .expect("token creation");

    let state = AppState {
        fleet,
        billing,
        counters,
        config,
    };
    let server = TestServer::new(create_router(state)).expect("test server");
    (server, token)
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("header value")
}

fn client_body() -> Value {
    json!({
        "client_name": "Asha Verma",
        "email": "asha@verma-textiles.example",
        "phone_number": "+91-98200-00001",
        "company_name": "Verma Textiles",
        "industry": "Textiles"
    })
}

fn bill_body(client_id: i64, shipment_id: i64, due_date: Value) -> Value {
    json!({
        "client_id": client_id,
        "shipment_id": shipment_id,
        "due_date": due_date,
        "amount": "10000",
        "tax_amount": "1800",
        "total_amount": "11800",
        "payment_method": "bank transfer"
    })
}

fn past_due() -> Value {
    json!((chrono::Utc::now() - chrono::Duration::days(2)).to_rfc3339())
}

fn future_due() -> Value {
    json!((chrono::Utc::now() + chrono::Duration::days(7)).to_rfc3339())
}

#[tokio::test]
async fn health_is_public_but_api_requires_auth() {
    let (server, _token) = test_app();

    server.get("/health").await.assert_status_ok();
    server.get("/health/ready").await.assert_status_ok();

    let response = server.get("/api/v1/clients").await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let (server, _token) = test_app();
    let response = server
        .get("/api/v1/clients")
        .add_header(AUTHORIZATION, bearer("not-a-jwt"))
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn client_crud_round_trip() {
    let (server, token) = test_app();

    let created = server
        .post("/api/v1/clients")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&client_body())
        .await;
    created.assert_status(axum::http::StatusCode::CREATED);
    let client: Value = created.json();
    assert_eq!(client["client_id"], json!(1));
    assert_eq!(client["status"], json!("Active"));

    let updated = server
        .put("/api/v1/clients/1")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({"status": "Inactive"}))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["status"], json!("Inactive"));

    let listed = server
        .get("/api/v1/clients")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(listed.json::<Vec<Value>>().len(), 1);

    server
        .delete("/api/v1/clients/1")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    server
        .get("/api/v1/clients/1")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn identifiers_count_up_per_entity_type() {
    let (server, token) = test_app();

    for expected in 1..=2 {
        let response = server
            .post("/api/v1/clients")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&client_body())
            .await;
        assert_eq!(response.json::<Value>()["client_id"], json!(expected));
    }

    // Truck ids run on their own counter, unaffected by the clients above.
    let truck = server
        .post("/api/v1/trucks")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "registration_number": "MH-12-AB-3456",
            "model": "Tata LPT 1618",
            "capacity": "16",
            "fuel_type": "Diesel"
        }))
        .await;
    truck.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(truck.json::<Value>()["truck_id"], json!(1));
}

#[tokio::test]
async fn invalid_email_is_a_validation_error() {
    let (server, token) = test_app();

    let mut body = client_body();
    body["email"] = json!("not-an-email");
    let response = server
        .post("/api/v1/clients")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&body)
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn driver_truck_assignment_can_be_cleared_with_null() {
    let (server, token) = test_app();

    let created = server
        .post("/api/v1/drivers")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "name": "Ravi Kumar",
            "license_number": "DL-0420110012345",
            "phone_number": "+91-98100-00002",
            "address": "14 Transport Nagar, Delhi",
            "assigned_truck": 7,
            "salary": "32000"
        }))
        .await;
    created.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(created.json::<Value>()["assigned_truck"], json!(7));

    let cleared = server
        .put("/api/v1/drivers/1")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({"assigned_truck": null}))
        .await;
    cleared.assert_status_ok();
    assert_eq!(cleared.json::<Value>()["assigned_truck"], Value::Null);
}

#[tokio::test]
async fn shipments_filter_by_client() {
    let (server, token) = test_app();

    for client_id in [1, 1, 2] {
        server
            .post("/api/v1/shipments")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({
                "client_id": client_id,
                "pickup_location": "Mumbai",
                "delivery_location": "Pune",
                "cargo_type": "Cotton bales",
                "cargo_weight": "1200",
                "departure_date": future_due(),
                "arrival_date": future_due()
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let for_client_one = server
        .get("/api/v1/shipments/client/1")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(for_client_one.json::<Vec<Value>>().len(), 2);
}

#[tokio::test]
async fn bill_payment_lifecycle_over_http() {
    let (server, token) = test_app();

    let created = server
        .post("/api/v1/bills")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&bill_body(1, 1, future_due()))
        .await;
    created.assert_status(axum::http::StatusCode::CREATED);
    let bill: Value = created.json();
    assert_eq!(bill["bill_id"], json!(1));
    assert_eq!(bill["payment_status"], json!("pending"));
    assert_eq!(bill["payment_date"], Value::Null);

    let paid = server
        .post("/api/v1/bills/1/pay")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    paid.assert_status_ok();
    let paid_bill: Value = paid.json();
    assert_eq!(paid_bill["payment_status"], json!("paid"));
    assert!(!paid_bill["payment_date"].is_null());

    // Paid is terminal; pushing it to overdue is a conflict.
    let conflict = server
        .put("/api/v1/bills/1/status")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({"payment_status": "overdue"}))
        .await;
    conflict.assert_status(axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn status_change_to_pending_is_a_conflict() {
    let (server, token) = test_app();

    server
        .post("/api/v1/bills")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&bill_body(1, 1, future_due()))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .put("/api/v1/bills/1/status")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({"payment_status": "pending"}))
        .await;
    response.assert_status(axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn overdue_listing_and_status_filter() {
    let (server, token) = test_app();

    server
        .post("/api/v1/bills")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&bill_body(1, 1, past_due()))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    server
        .post("/api/v1/bills")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&bill_body(1, 2, future_due()))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    // Past-due and unpaid, regardless of whether the sweep has run yet.
    let overdue = server
        .get("/api/v1/bills/overdue")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    let overdue_bills: Vec<Value> = overdue.json();
    assert_eq!(overdue_bills.len(), 1);
    assert_eq!(overdue_bills[0]["bill_id"], json!(1));

    let pending = server
        .get("/api/v1/bills/status/pending")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(pending.json::<Vec<Value>>().len(), 2);

    let invalid = server
        .get("/api/v1/bills/status/settled")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    invalid.assert_status_bad_request();
}

#[tokio::test]
async fn outstanding_by_client_sums_pending_only() {
    let (server, token) = test_app();

    for shipment_id in 1..=3 {
        server
            .post("/api/v1/bills")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&bill_body(1, shipment_id, future_due()))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }
    server
        .post("/api/v1/bills/2/pay")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status_ok();

    let response = server
        .get("/api/v1/bills/client/1/outstanding")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status_ok();
    let outstanding: Value = response.json();
    assert_eq!(outstanding["client_id"], json!(1));
    assert_eq!(
        outstanding["total_outstanding"],
        json!(dec!(23600).to_string())
    );
    assert_eq!(outstanding["bills"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn detail_update_cannot_change_payment_status() {
    let (server, token) = test_app();

    server
        .post("/api/v1/bills")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&bill_body(1, 1, future_due()))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    // payment_status in the detail-update body is simply not a field there.
    let updated = server
        .put("/api/v1/bills/1")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({"amount": "9000", "payment_status": "paid"}))
        .await;
    updated.assert_status_ok();
    let bill: Value = updated.json();
    assert_eq!(bill["amount"], json!("9000"));
    assert_eq!(bill["payment_status"], json!("pending"));
}

#[tokio::test]
async fn paying_a_missing_bill_is_not_found() {
    let (server, token) = test_app();
    server
        .post("/api/v1/bills/404/pay")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status_not_found();
}
