//! End-to-end API tests: the real router over a migrated in-memory SQLite.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use grand_hotel::application::AppServices;
use grand_hotel::domain::RepositoryProvider;
use grand_hotel::infrastructure::database::entities::{address, reservation};
use grand_hotel::infrastructure::database::migrator::Migrator;
use grand_hotel::shared::retry::RetryConfig;
use grand_hotel::{create_api_router, init_database, DatabaseConfig, SeaOrmRepositoryProvider};

async fn setup() -> (Router, DatabaseConnection) {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let services = AppServices::new(repos, RetryConfig::default());
    (create_api_router(services, db.clone(), None), db)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn create_client(app: &Router, last_name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/clients",
        Some(json!({
            "title": "M",
            "last_name": last_name,
            "first_name": "Jean",
            "address": {"street": "1 rue Haute", "postal_code": "75001", "city": "Paris"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["client"]["id"].as_i64().unwrap()
}

fn booking(room: i32, day: &str) -> Value {
    json!({"room_number": room, "day": day, "guests": 2, "business_trip": false})
}

#[tokio::test]
async fn rooms_are_seeded() {
    let (app, _) = setup().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/rooms", None).await;
    assert_eq!(status, StatusCode::OK);
    let rooms = body["data"].as_array().unwrap();
    assert_eq!(rooms.len(), 20);
    assert_eq!(rooms[0]["number"], 1);
}

#[tokio::test]
async fn health_reports_database() {
    let (app, _) = setup().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn second_booking_of_same_room_and_day_is_refused() {
    let (app, db) = setup().await;
    let a = create_client(&app, "Durand").await;
    let b = create_client(&app, "Martin").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/reservations?client_id={a}"),
        Some(booking(3, "2024-06-01")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["client_id"], a);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/reservations?client_id={b}"),
        Some(booking(3, "2024-06-01")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    assert_eq!(reservation::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn booking_requires_client_query_and_known_room() {
    let (app, _) = setup().await;
    let a = create_client(&app, "Durand").await;

    let (status, _) = send(&app, Method::POST, "/api/v1/reservations", Some(booking(3, "2024-06-01"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/reservations?client_id={a}"),
        Some(booking(99, "2024-06-01")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/reservations?client_id=4242",
        Some(booking(3, "2024-06-01")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reservation_lifecycle() {
    let (app, _) = setup().await;
    let a = create_client(&app, "Durand").await;
    let uri = format!("/api/v1/reservations?client_id={a}");
    send(&app, Method::POST, &uri, Some(booking(5, "2024-06-02"))).await;
    send(&app, Method::POST, &uri, Some(booking(2, "2024-06-02"))).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/reservations?day=2024-06-02", None).await;
    assert_eq!(status, StatusCode::OK);
    let rooms: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["room_number"].as_i64().unwrap())
        .collect();
    assert_eq!(rooms, vec![2, 5]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"room_number": 5, "day": "2024-06-02", "guests": 3, "business_trip": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["guests"], 3);
    assert_eq!(body["data"]["business_trip"], true);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"room_number": 5, "day": "2024-06-02", "business_trip": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["guests"], 3);
    assert_eq!(body["data"]["business_trip"], false);

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/clients/{a}/reservations"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(booking(5, "2024-06-02"))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(booking(5, "2024-06-02"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/v1/reservations", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn client_with_reservation_cannot_be_deleted() {
    let (app, _) = setup().await;
    let a = create_client(&app, "Durand").await;
    send(
        &app,
        Method::POST,
        &format!("/api/v1/reservations?client_id={a}"),
        Some(booking(1, "2024-07-14")),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/clients/{a}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/clients/{a}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn client_without_dependents_is_deleted_with_phones() {
    let (app, db) = setup().await;
    let a = create_client(&app, "Durand").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/clients/{a}"),
        Some(json!({"number": "0601020304", "kind": "M"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/clients/{a}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phone_numbers"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["address"]["city"], "Paris");

    let (status, _) = send(&app, Method::GET, "/api/v1/phone-numbers/0601020304", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let address = address::Entity::find_by_id(a as i32).one(&db).await.unwrap();
    assert!(address.is_none());
}

#[tokio::test]
async fn invalid_client_body_is_unprocessable() {
    let (app, _) = setup().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/clients",
        Some(json!({"title": "M", "last_name": "", "first_name": "Jean", "email": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::POST, "/api/v1/clients", Some(json!({"title": "M"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn phone_number_crud() {
    let (app, _) = setup().await;
    let a = create_client(&app, "Durand").await;
    let phone = json!({"number": "0145000000", "client_id": a, "kind": "F", "professional": true});

    let (status, _) = send(&app, Method::POST, "/api/v1/phone-numbers", Some(phone.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/api/v1/phone-numbers", Some(phone)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/phone-numbers/0145000000",
        Some(json!({"number": "0145000000", "client_id": a, "kind": "M", "professional": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["kind"], "M");

    let (status, body) = send(&app, Method::GET, "/api/v1/phone-numbers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/phone-numbers/0145000000", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/api/v1/phone-numbers/0145000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invoice_flow_numbers_lines_and_totals() {
    let (app, _) = setup().await;
    let a = create_client(&app, "Durand").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/invoices",
        Some(json!({"id": 7, "client_id": a, "invoice_date": "2024-03-01", "payment_mode_code": "CB"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/invoices",
        Some(json!({"client_id": a, "invoice_date": "2024-03-01", "payment_mode_code": "CB"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/invoices/{id}");

    for amount in ["10.00", "23.00"] {
        let (status, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(json!({"quantity": 1, "amount_excl_tax": amount})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let numbers: Vec<i64> = body["data"]["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["line_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(body["data"]["total_incl_tax"], "33.00");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"invoice_date": "2024-03-05", "payment_mode_code": "ESP"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["payment_mode_code"], "ESP");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/invoices?date1=2024-01-01&date2=2024-12-31&client_id={a}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/clients/{a}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::GET, "/api/v1/invoices/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let (app, _) = setup().await;
    let response = app
        .oneshot(Request::builder().uri("/api/v1/rooms").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
