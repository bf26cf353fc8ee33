mod dashboard;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use salesdash_core::{CoreError, Region, SourceQuery, Year};
use salesdash_source::{SalesClient, SourceError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<SalesClient>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "malformed_data" => StatusCode::UNPROCESSABLE_ENTITY,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Build the source query from raw `region` / `year` parameters.
///
/// Missing or empty values mean "all regions" / "all years".
pub(super) fn parse_source_query(
    request_id: &str,
    region: Option<&str>,
    year: Option<&str>,
) -> Result<SourceQuery, ApiError> {
    let bad_request = |e: &dyn std::fmt::Display| {
        ApiError::new(request_id, "bad_request", e.to_string())
    };

    let region = region
        .unwrap_or_default()
        .parse::<Region>()
        .map_err(|e| bad_request(&e))?;

    let year = match year.map(str::trim).filter(|y| !y.is_empty()) {
        None => None,
        Some(raw) => {
            let value = raw
                .parse::<i32>()
                .map_err(|_| bad_request(&format!("invalid year: {raw}")))?;
            Some(Year::new(value).map_err(|e| bad_request(&e))?)
        }
    };

    Ok(SourceQuery { region, year })
}

pub(super) fn map_source_error(request_id: String, error: &SourceError) -> ApiError {
    tracing::error!(error = %error, "sales source request failed");
    ApiError::new(request_id, "upstream_error", "sales source request failed")
}

pub(super) fn map_core_error(request_id: String, error: &CoreError) -> ApiError {
    tracing::warn!(error = %error, "sales data rejected");
    match error {
        CoreError::MalformedDate { .. } | CoreError::NegativePrice { .. } => {
            ApiError::new(request_id, "malformed_data", error.to_string())
        }
        CoreError::InvalidRegion(_) | CoreError::InvalidYear(_) => {
            ApiError::new(request_id, "bad_request", error.to_string())
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .route("/api/v1/sellers", get(dashboard::list_sellers))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
