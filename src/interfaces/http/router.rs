//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::AppServices;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::{
    clients, health, invoices, metrics, phone_numbers, request_id, reservations, rooms,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Clients
        clients::list_clients,
        clients::get_client,
        clients::create_client,
        clients::add_client_phone,
        clients::delete_client,
        clients::list_client_reservations,
        // Reservations
        reservations::list_reservations_by_day,
        reservations::book_reservation,
        reservations::update_reservation,
        reservations::cancel_reservation,
        // Invoices
        invoices::list_invoices,
        invoices::create_invoice,
        invoices::get_invoice,
        invoices::update_invoice,
        invoices::add_invoice_line,
        // Phone numbers
        phone_numbers::list_phone_numbers,
        phone_numbers::get_phone_number,
        phone_numbers::create_phone_number,
        phone_numbers::update_phone_number,
        phone_numbers::delete_phone_number,
        // Rooms
        rooms::list_rooms,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            clients::ClientDto,
            clients::AddressDto,
            clients::ClientDetailsDto,
            clients::CreateClientRequest,
            clients::AddPhoneRequest,
            reservations::ReservationRequest,
            reservations::ReservationDto,
            invoices::CreateInvoiceRequest,
            invoices::UpdateInvoiceRequest,
            invoices::InvoiceLineRequest,
            invoices::InvoiceDto,
            invoices::InvoiceLineDto,
            phone_numbers::PhoneKindDto,
            phone_numbers::PhoneNumberDto,
            phone_numbers::PhoneNumberRequest,
            rooms::RoomDto,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Clients", description = "Clients with their address and phone numbers"),
        (name = "Reservations", description = "Room bookings, one client per room and day"),
        (name = "Invoices", description = "Invoices and their numbered lines"),
        (name = "Phone Numbers", description = "Client phone numbers"),
        (name = "Rooms", description = "Room catalogue"),
    ),
    info(
        title = "Grand Hotel API",
        version = "1.0.0",
        description = "REST API for clients, reservations and invoices of the Grand Hotel",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn create_api_router(
    services: AppServices,
    db: DatabaseConnection,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let health_state = health::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    let client_routes = Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route(
            "/{id}",
            get(clients::get_client)
                .post(clients::add_client_phone)
                .delete(clients::delete_client),
        )
        .route("/{id}/reservations", get(clients::list_client_reservations))
        .with_state(clients::ClientHandlerState {
            clients: services.clients.clone(),
            reservations: services.reservations.clone(),
        });

    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::list_reservations_by_day)
                .post(reservations::book_reservation)
                .put(reservations::update_reservation)
                .delete(reservations::cancel_reservation),
        )
        .with_state(reservations::ReservationAppState {
            reservations: services.reservations.clone(),
        });

    let invoice_routes = Router::new()
        .route("/", get(invoices::list_invoices).post(invoices::create_invoice))
        .route(
            "/{id}",
            get(invoices::get_invoice)
                .put(invoices::update_invoice)
                .post(invoices::add_invoice_line),
        )
        .with_state(invoices::InvoiceHandlerState {
            invoices: services.invoices.clone(),
        });

    let phone_routes = Router::new()
        .route(
            "/",
            get(phone_numbers::list_phone_numbers).post(phone_numbers::create_phone_number),
        )
        .route(
            "/{number}",
            put(phone_numbers::update_phone_number)
                .get(phone_numbers::get_phone_number)
                .delete(phone_numbers::delete_phone_number),
        )
        .with_state(phone_numbers::PhoneNumberHandlerState {
            phone_numbers: services.phone_numbers.clone(),
        });

    let room_routes = Router::new()
        .route("/", get(rooms::list_rooms))
        .with_state(services);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check).with_state(health_state))
        .nest("/api/v1/clients", client_routes)
        .nest("/api/v1/reservations", reservation_routes)
        .nest("/api/v1/invoices", invoice_routes)
        .nest("/api/v1/phone-numbers", phone_routes)
        .nest("/api/v1/rooms", room_routes);

    if let Some(handle) = metrics_handle {
        router = router.route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics::MetricsState { handle }),
        );
    }

    // Middleware
    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
