use axum::{
    extract::{Query, State},
    Extension, Json,
};
use salesdash_core::{
    available_sellers, build_dashboard, normalize_top_sellers, normalize_transactions, Dashboard,
    DashboardRequest,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{
    map_core_error, map_source_error, parse_source_query, ApiError, ApiResponse, AppState,
    ResponseMeta,
};

#[derive(Debug, Deserialize)]
pub(super) struct DashboardQuery {
    pub region: Option<String>,
    /// Kept as text so `ano=` (empty) means every year.
    pub year: Option<String>,
    /// Comma-separated seller names.
    pub seller: Option<String>,
    pub top: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SellersQuery {
    pub region: Option<String>,
    pub year: Option<String>,
}

fn split_sellers(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

pub(super) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<Dashboard>>, ApiError> {
    let source_query =
        parse_source_query(&req_id.0, query.region.as_deref(), query.year.as_deref())?;

    let raw = state
        .client
        .fetch_transactions(&source_query)
        .await
        .map_err(|e| map_source_error(req_id.0.clone(), &e))?;

    let request = DashboardRequest {
        sellers: split_sellers(query.seller.as_deref()),
        top_sellers: normalize_top_sellers(query.top),
    };
    let data = build_dashboard(raw, &request).map_err(|e| map_core_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_sellers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SellersQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let source_query =
        parse_source_query(&req_id.0, query.region.as_deref(), query.year.as_deref())?;

    let raw = state
        .client
        .fetch_transactions(&source_query)
        .await
        .map_err(|e| map_source_error(req_id.0.clone(), &e))?;

    let transactions =
        normalize_transactions(raw).map_err(|e| map_core_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: available_sellers(&transactions),
        meta: ResponseMeta::new(req_id.0),
    }))
}
