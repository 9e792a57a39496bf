#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use domain_types::{
    errors::ApiClientError,
    form::{FormData, FormField},
    location::Coordinates,
    merchant::CreateMerchantRequest,
    types::{GeocodingParams, HttpParams, MerchantApiParams},
    validation,
};
use external_services::{geocoding::NominatimClient, merchant_client::MerchantClient};
use interfaces::merchant_api::{MerchantApi, ReverseGeocoder};
use serde_json::{json, Value};

type Captured = Arc<Mutex<Vec<Value>>>;

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{addr}")
}

fn merchant_client(base_url: &str) -> MerchantClient {
    MerchantClient::new(
        MerchantApiParams {
            base_url: Some(base_url.to_string()),
            resolve_qr_via_lookup: false,
        },
        HttpParams::default(),
    )
}

fn ready_request() -> CreateMerchantRequest {
    let mut form = FormData::default();
    form.set(FormField::MerchantName, "Cafe X");
    form.set(FormField::MerchantMobile, "9876543210");
    form.set(FormField::UpiId, "cafe@upi");
    form.set(FormField::Company, "Acme");
    form.set(FormField::CampaignId, "abc123");
    form.set_coordinates(Coordinates::new(12.9716, 77.5946));

    let details = validation::validate_details(&form).unwrap();
    validation::validate_payment_info(&form, details)
        .unwrap()
        .request()
        .clone()
}

async fn create_ok(State(captured): State<Captured>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    captured.lock().unwrap().push(body);
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Merchant created successfully",
            "merchant": {
                "id": "m_1",
                "merchantName": "Cafe X",
                "merchantCode": "MC001",
                "qrLink": "upi://pay?pa=cafe@upi&pn=Cafe%20X"
            }
        })),
    )
}

async fn create_conflict() -> (StatusCode, Json<Value>) {
    (
        StatusCode::CONFLICT,
        Json(json!({ "message": "Merchant with this UPI ID already exists" })),
    )
}

async fn create_server_error() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>upstream failure</html>")
}

#[tokio::test]
async fn test_create_merchant_posts_form_payload() {
    let captured: Captured = Arc::default();
    let router = Router::new()
        .route("/api/merchant/create", post(create_ok))
        .with_state(captured.clone());
    let base_url = spawn_stub(router).await;

    let response = merchant_client(&base_url)
        .create_merchant(&ready_request())
        .await
        .unwrap();

    assert_eq!(response.status_code, 201);
    assert!(response.is_success());
    let merchant = response.body.merchant.expect("merchant record");
    assert_eq!(merchant.merchant_code, "MC001");

    let bodies = captured.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({
            "merchantName": "Cafe X",
            "upiId": "cafe@upi",
            "merchantMobile": "9876543210",
            "company": "Acme",
            "address": "",
            "campaignId": "abc123",
            "latitude": 12.9716,
            "longitude": 77.5946
        })
    );
}

#[tokio::test]
async fn test_create_merchant_keeps_rejection_message() {
    let router = Router::new().route("/api/merchant/create", post(create_conflict));
    let base_url = spawn_stub(router).await;

    let response = merchant_client(&base_url)
        .create_merchant(&ready_request())
        .await
        .unwrap();

    assert_eq!(response.status_code, 409);
    assert!(!response.is_success());
    assert_eq!(
        response.body.message.as_deref(),
        Some("Merchant with this UPI ID already exists")
    );
}

#[tokio::test]
async fn test_create_merchant_tolerates_unparseable_error_body() {
    let router = Router::new().route("/api/merchant/create", post(create_server_error));
    let base_url = spawn_stub(router).await;

    let response = merchant_client(&base_url)
        .create_merchant(&ready_request())
        .await
        .unwrap();

    assert_eq!(response.status_code, 500);
    assert_eq!(response.body.message, None);
    assert_eq!(response.body.merchant, None);
}

#[tokio::test]
async fn test_create_merchant_without_base_url_sends_nothing() {
    let client = MerchantClient::new(MerchantApiParams::default(), HttpParams::default());

    let error = client.create_merchant(&ready_request()).await.unwrap_err();

    assert_eq!(error.current_context(), &ApiClientError::MissingBaseUrl);
}

#[tokio::test]
async fn test_create_merchant_unreachable_server() {
    // bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let error = merchant_client(&format!("http://{addr}"))
        .create_merchant(&ready_request())
        .await
        .unwrap_err();

    assert!(matches!(
        error.current_context(),
        ApiClientError::RequestNotSent(_)
    ));
}

async fn campaign_listing(Path(campaign_id): Path<String>) -> (StatusCode, Json<Value>) {
    if campaign_id != "abc123" {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Campaign not found" })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "merchants": [
                { "merchantCode": { "_id": "MC000" }, "merchantName": "Tea Stall", "qrLink": "https://qr.example.com/MC000" },
                { "merchantCode": { "_id": "MC001" }, "merchantName": "Cafe X", "qrLink": "https://qr.example.com/MC001" }
            ]
        })),
    )
}

#[tokio::test]
async fn test_campaign_merchants_lookup() {
    let router = Router::new().route("/api/merchant/{campaign_id}", get(campaign_listing));
    let base_url = spawn_stub(router).await;
    let client = merchant_client(&base_url);

    let listing = client.campaign_merchants("abc123").await.unwrap();
    assert_eq!(listing.merchants.len(), 2);
    assert_eq!(listing.qr_link_for("MC001"), Some("https://qr.example.com/MC001"));

    let error = client.campaign_merchants("unknown").await.unwrap_err();
    assert_eq!(
        error.current_context(),
        &ApiClientError::ErrorResponse { status_code: 404 }
    );
}

async fn reverse_geocode(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let has_agent = headers
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|agent| agent == "registration-tests/1.0");
    match (params.get("lat").map(String::as_str), params.get("format").map(String::as_str)) {
        (Some("12.9716"), Some("json")) if has_agent => {
            Json(json!({ "display_name": "MG Road, Bengaluru, Karnataka, India" }))
        }
        _ => Json(json!({ "error": "Unable to geocode" })),
    }
}

#[tokio::test]
async fn test_reverse_geocoding() {
    let router = Router::new().route("/reverse", get(reverse_geocode));
    let base_url = spawn_stub(router).await;
    let client = NominatimClient::new(
        GeocodingParams {
            base_url,
            user_agent: "registration-tests/1.0".to_string(),
        },
        HttpParams::default(),
    );

    let address = client
        .reverse(Coordinates::new(12.9716, 77.5946))
        .await
        .unwrap();
    assert_eq!(address, "MG Road, Bengaluru, Karnataka, India");

    let address = client.reverse(Coordinates::new(0.0, 0.0)).await.unwrap();
    assert_eq!(address, "Address not found");
}
