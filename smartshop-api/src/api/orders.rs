//! Order creation endpoint

use axum::extract::State;
use axum::Json;

use crate::api::ApiError;
use crate::{db, AppState};
use smartshop_common::api::{OrderRequest, OrderResponse};

/// POST /api/v1/orders
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<OrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    if request.items.is_empty() {
        return Err(ApiError::BadRequest(
            "Order must have at least one item".to_string(),
        ));
    }

    if request.total_amount <= 0.0 {
        return Err(ApiError::BadRequest(
            "Total amount must be positive".to_string(),
        ));
    }

    let order_id = db::create_order(&state.db, &request).await?;

    Ok(Json(OrderResponse {
        status: "confirmed".to_string(),
        order_id: Some(order_id.clone()),
        message: Some(format!("Order {} has been placed successfully", order_id)),
    }))
}
