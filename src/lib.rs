//! # Protoform - request forms for protorpc services
//!
//! Given the file set published by a protorpc service (packages, messages and
//! services as JSON), protoform locates one method by fully qualified name and
//! produces an editable form for its request message.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use protoform::domain::descriptor::FileSet;
//! use protoform::form::FormBuilder;
//!
//! fn main() -> anyhow::Result<()> {
//!     let file_set = FileSet::from_json(&std::fs::read_to_string("file_set.json")?)?;
//!     let outcome = FormBuilder::default().render_method_form(&file_set, "music.MusicService", "add_track")?;
//!     println!("{}", serde_json::to_string_pretty(&outcome)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: descriptor snapshots, render instructions, errors
//! - **Form**: name resolution, field policy, form building
//! - **Adapters**: file-set transport, HTML rendering, HTTP handlers
//! - **Config**: configuration management

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod form;

use crate::adapters::form_handler::{self, FormState};
use crate::adapters::health_handler::HealthHandler;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Creates the Axum application router with all endpoints configured.
///
/// # Arguments
///
/// * `health_handler` - Health check handler
/// * `form_state` - Form page service, renderer and default service path
///
/// # Returns
///
/// Configured Axum Router
pub fn create_app(health_handler: Arc<HealthHandler>, form_state: FormState) -> Router {
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

    let form_router = Router::new()
        .route("/forms", get(form_handler::methods_page))
        .route("/forms/:service/:method", get(form_handler::method_form_page))
        .route("/api/forms/:service/:method", get(form_handler::method_form_json))
        .with_state(form_state);

    health_router.merge(form_router).layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
