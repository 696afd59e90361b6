//! HTTP API Layer
//!
//! REST API for warranty claims using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: brands, claims, health
//! - **Middleware**: caller resolution, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects (camelCase JSON)
//! - **Error Handling**: Consistent `{error, message}` responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(store, Arc::new(LogEmailSender), config);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod email;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{http::HeaderName, middleware as axum_middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_claims::{
    ClaimQueryEngine, ClaimStatusMachine, ClaimStore, EmailSender, NotificationDispatchCoordinator,
};

use crate::config::ApiConfig;
use crate::handlers::{brands, claims, health};
use crate::middleware::{audit_middleware, caller_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: ClaimQueryEngine,
    pub machine: ClaimStatusMachine,
    pub store_health: Arc<dyn HealthCheckable>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the claims services around one store and one email transport
    pub fn new<S>(store: Arc<S>, sender: Arc<dyn EmailSender>, config: ApiConfig) -> Self
    where
        S: ClaimStore + HealthCheckable,
    {
        let claim_store: Arc<dyn ClaimStore> = store.clone();
        let dispatcher = NotificationDispatchCoordinator::new(sender);

        Self {
            engine: ClaimQueryEngine::new(Arc::clone(&claim_store)),
            machine: ClaimStatusMachine::new(claim_store, dispatcher),
            store_health: store,
            config,
        }
    }
}

/// Creates the main API router
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no caller needed)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", get(claims::list_claims))
        .route("/:id", get(claims::get_claim).patch(claims::update_status));

    let api_routes = Router::new()
        .route("/brands", get(brands::list_brands))
        .nest("/claims", claims_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), caller_middleware));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(handlers::claims::CLAIM_ACCESS_HEADER)]);

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
