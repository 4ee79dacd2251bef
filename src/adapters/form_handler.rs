//! Form pages over HTTP
//!
//! `FormPageService` is the single render path: load the file set once, then
//! build the form synchronously. The axum handlers below wrap it in pages.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, warn};

use super::file_set_client::FileSetSource;
use super::html_renderer::{method_action, HtmlRenderer};
use crate::config::validator::ValidationError;
use crate::config::SourceSettings;
use crate::domain::error::FormResult;
use crate::domain::widget::FormOutcome;
use crate::form::{list_methods, FormBuilder, MethodEntry};

pub struct FormPageService {
    source: Arc<dyn FileSetSource>,
    builder: FormBuilder,
}

impl FormPageService {
    pub fn new(source: Arc<dyn FileSetSource>, builder: FormBuilder) -> Self {
        Self { source, builder }
    }

    /// Fetch the file set and build the form for one method
    pub async fn method_form(
        &self,
        service_path: &str,
        service_name: &str,
        method_name: &str,
    ) -> FormResult<FormOutcome> {
        let file_set = self.source.load(service_path).await?;
        self.builder
            .render_method_form(&file_set, service_name, method_name)
    }

    /// Fetch the file set and list its methods
    pub async fn methods(&self, service_path: &str) -> FormResult<Vec<MethodEntry>> {
        let file_set = self.source.load(service_path).await?;
        Ok(list_methods(&file_set))
    }
}

// ============================================================================
// HTTP Handlers
// ============================================================================

#[derive(Clone)]
pub struct FormState {
    pub service: Arc<FormPageService>,
    pub renderer: Arc<HtmlRenderer>,
    /// Configured service path and the origins a request may name
    pub source: SourceSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
    pub service_path: Option<String>,
    /// Comma separated names of optional fields whose toggle is on
    pub enable: Option<String>,
}

impl FormQuery {
    fn toggles_on(&self) -> HashSet<String> {
        self.enable
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }
}

impl FormState {
    fn service_path(&self, query: &FormQuery) -> Result<String, ValidationError> {
        self.source
            .resolve_service_path(query.service_path.as_deref())
            .map_err(|e| {
                warn!("Rejected service_path {:?}: {}", query.service_path, e);
                e
            })
    }

    fn page(&self, status: StatusCode, title: &str, rendered: Result<String, tera::Error>) -> Response {
        match rendered {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                error!("Failed to render page '{}': {}", title, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
            }
        }
    }

    fn error_page(&self, status: StatusCode, title: &str, message: &str) -> Response {
        self.page(status, title, self.renderer.render_error_page(title, message))
    }
}

/// GET /forms/:service/:method
pub async fn method_form_page(
    State(state): State<FormState>,
    Path((service_name, method_name)): Path<(String, String)>,
    Query(query): Query<FormQuery>,
) -> Response {
    let title = format!("{}.{}", service_name, method_name);
    let service_path = match state.service_path(&query) {
        Ok(service_path) => service_path,
        Err(e) => return state.error_page(StatusCode::BAD_REQUEST, &title, &e.to_string()),
    };

    let outcome = match state
        .service
        .method_form(&service_path, &service_name, &method_name)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Form for {} unavailable: {}", title, e);
            return state.error_page(e.status_code(), &title, &e.to_string());
        }
    };

    let action = method_action(&service_path, &method_name);
    let rendered = state
        .renderer
        .render_form(&action, &outcome, &query.toggles_on())
        .and_then(|form| state.renderer.render_page(&title, &form));
    state.page(StatusCode::OK, &title, rendered)
}

/// GET /api/forms/:service/:method
pub async fn method_form_json(
    State(state): State<FormState>,
    Path((service_name, method_name)): Path<(String, String)>,
    Query(query): Query<FormQuery>,
) -> Response {
    let service_path = match state.service_path(&query) {
        Ok(service_path) => service_path,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    };

    match state
        .service
        .method_form(&service_path, &service_name, &method_name)
        .await
    {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => (
            e.status_code(),
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// GET /forms
pub async fn methods_page(
    State(state): State<FormState>,
    Query(query): Query<FormQuery>,
) -> Response {
    let title = "Services";
    let service_path = match state.service_path(&query) {
        Ok(service_path) => service_path,
        Err(e) => return state.error_page(StatusCode::BAD_REQUEST, title, &e.to_string()),
    };

    let entries = match state.service.methods(&service_path).await {
        Ok(entries) => entries,
        Err(e) => return state.error_page(e.status_code(), title, &e.to_string()),
    };

    let encoded_path = urlencoding::encode(&service_path);
    let rendered = state
        .renderer
        .render_methods(&entries, |entry| {
            format!(
                "/forms/{}/{}?service_path={}",
                urlencoding::encode(&entry.service),
                urlencoding::encode(&entry.method),
                encoded_path
            )
        })
        .and_then(|list| state.renderer.render_page(title, &list));
    state.page(StatusCode::OK, title, rendered)
}
