//! Deposit address routes.

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};

use depot_common::error::AppError;
use depot_common::types::DepositAddress;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/v1/users/{user_id}/wallets/{currency}/addresses",
        post(generate_address),
    )
}

/// POST /api/v1/users/:user_id/wallets/:currency/addresses — Generate a deposit address.
///
/// Responds `200 null` when the exchange does not report success.
async fn generate_address(
    State(state): State<AppState>,
    Path((user_id, currency)): Path<(String, String)>,
) -> Result<Json<Option<DepositAddress>>, AppError> {
    tracing::info!(user_id = %user_id, currency = %currency, "Generating deposit address");
    let address = state
        .quidax
        .generate_deposit_address(&user_id, &currency)
        .await?;
    Ok(Json(address))
}
