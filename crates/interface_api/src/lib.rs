//! HTTP API Layer
//!
//! This crate provides the REST API for the hotel management system using
//! Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each domain
//! - **Middleware**: Authentication, authorization, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use axum::{
    Router,
    routing::{get, post, put, delete},
    middleware as axum_middleware,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{auth as auth_handlers, bills, bookings, customers, health, rooms, services, users};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// Health probes and login are public; everything else sits behind the
/// bearer-token middleware.
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let state = AppState { pool, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/v1/auth/login", post(auth_handlers::login));

    // Room and room type routes
    let room_routes = Router::new()
        .route("/", post(rooms::create_room))
        .route("/", get(rooms::list_rooms))
        .route("/:id", get(rooms::get_room))
        .route("/:id", put(rooms::update_room))
        .route("/:id", delete(rooms::delete_room))
        .route("/:id/status", put(rooms::update_room_status))
        .route("/:id/availability", get(bookings::room_availability));

    let room_type_routes = Router::new()
        .route("/", post(rooms::create_room_type))
        .route("/", get(rooms::list_room_types))
        .route("/:id", get(rooms::get_room_type))
        .route("/:id", put(rooms::update_room_type))
        .route("/:id", delete(rooms::delete_room_type));

    // Customer routes
    let customer_routes = Router::new()
        .route("/", post(customers::create_customer))
        .route("/", get(customers::list_customers))
        .route("/:id", get(customers::get_customer))
        .route("/:id", put(customers::update_customer))
        .route("/:id", delete(customers::delete_customer));

    // Booking routes
    let booking_routes = Router::new()
        .route("/", post(bookings::create_booking))
        .route("/", get(bookings::list_bookings))
        .route("/availability", get(bookings::available_rooms))
        .route("/:id", get(bookings::get_booking))
        .route("/:id", put(bookings::update_booking))
        .route("/:id/check-in", post(bookings::check_in))
        .route("/:id/check-out", post(bookings::check_out))
        .route("/:id/cancel", post(bookings::cancel_booking))
        .route("/:id/no-show", post(bookings::mark_no_show))
        .route("/:id/hold", post(bookings::place_on_hold))
        .route("/:id/confirm", post(bookings::confirm_booking))
        .route("/:id/services", post(bookings::add_booking_service))
        .route("/:id/services", get(bookings::list_booking_services))
        .route("/:id/services/:line_id", delete(bookings::remove_booking_service));

    // Billing routes
    let bill_routes = Router::new()
        .route("/", post(bills::create_bill))
        .route("/", get(bills::list_bills))
        .route("/:id", get(bills::get_bill))
        .route("/:id/payments", post(bills::record_payment))
        .route("/:id/send", post(bills::send_bill))
        .route("/:id/cancel", post(bills::cancel_bill))
        .route("/:id/refund", post(bills::refund_bill));

    // Service catalogue routes
    let service_routes = Router::new()
        .route("/", post(services::create_service))
        .route("/", get(services::list_services))
        .route("/:id", get(services::get_service))
        .route("/:id", put(services::update_service))
        .route("/:id", delete(services::delete_service));

    let service_type_routes = Router::new()
        .route("/", post(services::create_service_type))
        .route("/", get(services::list_service_types))
        .route("/:id", delete(services::delete_service_type));

    // Staff user routes
    let user_routes = Router::new()
        .route("/", post(users::create_user))
        .route("/", get(users::list_users))
        .route("/:id", get(users::get_user))
        .route("/:id/password", put(users::change_password))
        .route("/:id/deactivate", post(users::deactivate_user))
        .route("/:id/activate", post(users::activate_user));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/rooms", room_routes)
        .nest("/room-types", room_type_routes)
        .nest("/customers", customer_routes)
        .nest("/bookings", booking_routes)
        .nest("/bills", bill_routes)
        .nest("/services", service_routes)
        .nest("/service-types", service_type_routes)
        .nest("/users", user_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
