//! Order API — commit and preview
//!
//! Commit always answers 200 with the envelope carrying either `"0000"` and
//! the receipt, or the checkout error code (`OUT_OF_STOCK`, `COMMIT_FAILED`,
//! …) for the caller to branch on. Transport-level failures (malformed JSON)
//! still surface as HTTP errors.

use axum::{
    Json, Router,
    extract::State,
    routing::post,
};
use serde::Deserialize;

use crate::checkout::{self, CommitReceipt, CommitRequest, OrderPreview};
use crate::core::AppState;
use crate::utils::validation::validate_sku_ids;
use crate::utils::{AppError, AppResponse, AppResult};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders/commit", post(commit))
        .route("/api/orders/preview", post(preview))
}

/// Commit request body.
///
/// `user_id` comes from the session layer in the full deployment; here it is
/// part of the body because auth is out of scope.
#[derive(Debug, Deserialize)]
pub struct CommitPayload {
    pub user_id: i64,
    pub addr_id: Option<i64>,
    pub pay_method: Option<u8>,
    #[serde(default)]
    pub sku_ids: Vec<i64>,
}

/// POST /api/orders/commit - 提交订单
async fn commit(
    State(state): State<AppState>,
    Json(payload): Json<CommitPayload>,
) -> Json<AppResponse<CommitReceipt>> {
    let req = CommitRequest {
        user_id: payload.user_id,
        addr_id: payload.addr_id,
        pay_method: payload.pay_method,
        sku_ids: payload.sku_ids,
    };

    match state.checkout.commit(req).await {
        Ok(receipt) => Json(AppResponse::success(receipt)),
        Err(e) => Json(AppResponse::failure(e.code().as_str(), e.to_string())),
    }
}

#[derive(Debug, Deserialize)]
pub struct PreviewPayload {
    pub user_id: i64,
    #[serde(default)]
    pub sku_ids: Vec<i64>,
}

/// POST /api/orders/preview - 提交订单页面数据
async fn preview(
    State(state): State<AppState>,
    Json(payload): Json<PreviewPayload>,
) -> AppResult<Json<AppResponse<OrderPreview>>> {
    validate_sku_ids(&payload.sku_ids)?;

    let preview = checkout::preview::build(
        &state.db,
        &state.cart,
        payload.user_id,
        &payload.sku_ids,
        state.config.shipping_fee_cents,
    )
    .await
    .map_err(|e| match e {
        checkout::CheckoutError::ProductNotFound(id) => {
            AppError::not_found(format!("Product {id}"))
        }
        checkout::CheckoutError::Validation(msg) => AppError::validation(msg),
        other => AppError::database(other.to_string()),
    })?;

    Ok(Json(AppResponse::success(preview)))
}
