use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    data::CatalogSummary,
    error::{AppError, AppResult},
    models::{
        MaterialRow, NewCustomerRequest, ProductLineQuery, RecommendProductsRequest, ResultKind,
        SimilarMaterialsRequest, TargetCustomersRequest,
    },
    services::Export,
};

use super::AppState;

/// Empty selections answer with no content, anything else with JSON
fn json_or_no_content<T: Serialize>(result: Option<T>) -> Response {
    match result {
        Some(body) => Json(body).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

// Health

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
    pub snapshot: CatalogSummary,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        backend: state.recommender.name(),
        snapshot: state.catalog.summary(),
    })
}

// Lookups

/// Countries with at least one customer
pub async fn get_countries(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.store.countries())
}

/// Selectable customers of a country, soldto to name
pub async fn get_country_customers(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Json<BTreeMap<String, String>> {
    Json(state.catalog.store.customers_in_country(&country))
}

/// All sales organisations
pub async fn get_sales_orgs(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.store.sales_orgs())
}

/// Materials available in a sales organisation
pub async fn get_sales_org_materials(
    State(state): State<AppState>,
    Path(sales_org): Path<String>,
) -> Json<Vec<MaterialRow>> {
    Json(state.dashboard().materials_in_sales_org(&sales_org))
}

/// Sales organisations a customer buys through
pub async fn get_customer_sales_orgs(
    State(state): State<AppState>,
    Path(soldto): Path<String>,
) -> AppResult<Json<Vec<String>>> {
    if state.catalog.store.customer(&soldto).is_none() {
        return Err(AppError::NotFound(format!("customer {soldto} does not exist")));
    }
    Ok(Json(state.catalog.store.sales_orgs_of(&soldto).to_vec()))
}

/// Years offered as order cutoffs for a customer
pub async fn get_customer_order_years(
    State(state): State<AppState>,
    Path(soldto): Path<String>,
) -> AppResult<Json<Vec<i32>>> {
    Ok(Json(state.dashboard().order_years(&soldto)?))
}

/// Product lines offered to a customer under the current filters
pub async fn get_customer_product_lines(
    State(state): State<AppState>,
    Path(soldto): Path<String>,
    Query(query): Query<ProductLineQuery>,
) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.dashboard().product_line_options(&soldto, &query)?))
}

// Views

/// Similar customers and recommended products for one customer
pub async fn recommend_products(
    State(state): State<AppState>,
    Json(request): Json<RecommendProductsRequest>,
) -> AppResult<Response> {
    let result = state.dashboard().recommend_products(&request)?;
    Ok(json_or_no_content(result))
}

pub async fn export_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendProductsRequest>,
) -> AppResult<Response> {
    let Some(result) = state.dashboard().recommend_products(&request)? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };
    let soldto = request.customer.as_deref().unwrap_or_default();
    let export = Export::render(ResultKind::Recommendations, &[soldto], &result.products)?;
    Ok(export.into_response())
}

/// Materials similar to a selection of materials
pub async fn similar_materials(
    State(state): State<AppState>,
    Json(request): Json<SimilarMaterialsRequest>,
) -> AppResult<Response> {
    let result = state.dashboard().similar_materials(&request)?;
    Ok(json_or_no_content(result))
}

pub async fn export_similar_materials(
    State(state): State<AppState>,
    Json(request): Json<SimilarMaterialsRequest>,
) -> AppResult<Response> {
    let Some(result) = state.dashboard().similar_materials(&request)? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };
    let export = Export::render(ResultKind::SimilarMaterials, &request.materials, &result.rows)?;
    Ok(export.into_response())
}

/// First order suggestion for a customer without history
pub async fn new_customer(
    State(state): State<AppState>,
    Json(request): Json<NewCustomerRequest>,
) -> AppResult<Response> {
    let result = state.dashboard().new_customer(&request)?;
    Ok(json_or_no_content(result))
}

pub async fn export_new_customer(
    State(state): State<AppState>,
    Json(request): Json<NewCustomerRequest>,
) -> AppResult<Response> {
    let Some(result) = state.dashboard().new_customer(&request)? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };
    let export = Export::render(ResultKind::NewCustomer, &request.customers, &result.rows)?;
    Ok(export.into_response())
}

/// Customers likely to buy a selection of materials
pub async fn target_customers(
    State(state): State<AppState>,
    Json(request): Json<TargetCustomersRequest>,
) -> AppResult<Response> {
    let result = state.dashboard().target_customers(&request)?;
    Ok(json_or_no_content(result))
}

pub async fn export_target_customers(
    State(state): State<AppState>,
    Json(request): Json<TargetCustomersRequest>,
) -> AppResult<Response> {
    let Some(result) = state.dashboard().target_customers(&request)? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };
    let export = Export::render(ResultKind::TargetCustomer, &request.materials, &result.rows)?;
    Ok(export.into_response())
}

/// Fallback for unknown paths
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "no such endpoint" })))
}
