//! Product catalog endpoints

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::ApiError;
use crate::{db, AppState};
use smartshop_common::api::ProductSearchResponse;

/// Query parameters for product search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Brand name to search
    pub brand: Option<String>,
    /// Product name to search
    pub name: Option<String>,
    /// Quantity text (reflected into the fallback product's size)
    pub quantity: Option<String>,
}

/// Query parameters for product listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/products/search?brand=&name=&quantity=
///
/// Searches the catalog; with no match, responds with the synthetic
/// fallback product and `status: "fallback"`.
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ProductSearchResponse>, ApiError> {
    let matches = db::search_products(
        &state.db,
        query.brand.as_deref(),
        query.name.as_deref(),
        query.quantity.as_deref(),
    )
    .await?;

    if matches.is_empty() {
        let fallback = db::fallback_product(
            query.brand.as_deref(),
            query.name.as_deref(),
            query.quantity.as_deref(),
        );
        return Ok(Json(ProductSearchResponse {
            status: "fallback".to_string(),
            matches: vec![fallback],
        }));
    }

    Ok(Json(ProductSearchResponse {
        status: "ok".to_string(),
        matches,
    }))
}

/// GET /api/v1/products?limit=100
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductSearchResponse>, ApiError> {
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let matches = db::get_all_products(&state.db, limit).await?;

    Ok(Json(ProductSearchResponse {
        status: "ok".to_string(),
        matches,
    }))
}
