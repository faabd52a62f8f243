//! # Dupi - interface-driven mock API server
//!
//! Dupi turns a textual interface definition into a live HTTP endpoint that returns
//! synthetic data shaped like that interface.
//!
//! ## Features
//!
//! - **Lenient parser**: `interface Name { field?: Type; ... }` with nested object
//!   literals, arrays and optional fields; odd lines are skipped, never rejected
//! - **Realistic values**: emails, URLs, phone numbers, names, addresses, companies
//!   and UUIDs inferred from field names and types
//! - **Injectable randomness**: every generator call takes a `rand::Rng`
//! - **Expiring projects**: an in-memory registry of mock endpoints with periodic cleanup
//!
//! ## Quick Start
//!
//! ```rust
//! use dupi::{generate_mock_data, parse_interface};
//!
//! let parsed = parse_interface("interface User {\n  id: number;\n  email: string;\n}");
//! assert_eq!(parsed.name, "User");
//!
//! let many = generate_mock_data(&parsed, Some(5));
//! assert_eq!(many.as_array().map(Vec::len), Some(5));
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: the structural model, project records and error types
//! - **Adapters**: parser, generator, project registry and HTTP handlers
//! - **Config**: configuration loading and validation

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;

pub use adapters::interface_parser::parse_interface;
pub use adapters::mock_generator::{generate_mock_data, MockGenerator};
pub use domain::{ParsedInterface, StringFormat, TypeInfo, TypeKind};

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::health_handler::HealthHandler;
use crate::adapters::project_manager::ProjectManager;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates the Axum application router with all endpoints configured.
///
/// # Arguments
///
/// * `projects` - Shared project registry
/// * `health_handler` - Health check handler
///
/// # Returns
///
/// Configured Axum Router
pub fn create_app(projects: Arc<ProjectManager>, health_handler: Arc<HealthHandler>) -> Router {
    let health_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }));

    let api_state = ApiState { projects };

    let api_router = Router::new()
        // Projects CRUD
        .route("/projects", get(api_handler::list_projects).post(api_handler::create_project))
        .route(
            "/projects/:id",
            get(api_handler::get_project)
                .patch(api_handler::update_project)
                .delete(api_handler::delete_project),
        )
        .route("/projects/:id/interface", get(api_handler::get_project_interface))
        .route("/stats", get(api_handler::get_stats))
        .route("/interfaces/parse", post(api_handler::parse_interface))
        // Generated data
        .route("/mock/:id", get(api_handler::get_mock_data).post(api_handler::post_mock_data))
        .with_state(api_state);

    health_router.nest("/api", api_router).layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
