//! HTTP Routes — Data Entry and Exposure Viewing
//!
//! Thin axum surface over the `WagerDesk` facade. The desk is a
//! single-writer structure, so the handlers serialize access through one
//! `tokio::sync::Mutex`; this preserves the engine's single-threaded
//! ownership model while letting the server accept concurrent requests.
//!
//! Error mapping (see the desk taxonomy): validation → 422, missing
//! catalog → 404, ledger/catalog I/O → 502.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use crate::adapters::catalog::RaceCardFile;
use crate::adapters::persistence::JsonlLedger;
use crate::domain::slip::BetSlip;
use crate::domain::wager::{
    BetDirection, BetTransaction, HorseId, LedgerPartition, RaceExposureSnapshot, RaceId,
    RecentBettorEntry, SettleMode, TransactionId,
};
use crate::usecases::desk::{DeskError, WagerDesk};

/// Concrete desk wiring served by this adapter.
pub type Desk = WagerDesk<JsonlLedger, RaceCardFile>;

/// Shared handler state.
#[derive(Clone)]
pub struct ApiState {
    pub desk: Arc<Mutex<Desk>>,
    /// Tax rate applied when the request leaves it unspecified.
    pub default_tax_rate: f64,
    /// Recent-bettor list size when the query leaves it unspecified.
    pub default_recent_limit: usize,
}

/// Build the full application router.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/bets", post(place_bet))
        .route("/api/bets/:id/cancel", post(cancel_bet))
        .route("/api/races/:race_id/exposure", get(race_exposure))
        .route("/api/recent-bettors", get(recent_bettors))
        .route("/api/partition", put(switch_partition))
        .route("/live", get(|| async { StatusCode::OK }))
        .route("/ready", get(ready))
        .with_state(state)
}

/// JSON error payload.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

struct ApiError(DeskError);

impl From<DeskError> for ApiError {
    fn from(e: DeskError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DeskError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DeskError::CatalogUnavailable { .. } => StatusCode::NOT_FOUND,
            DeskError::Io(_) => StatusCode::BAD_GATEWAY,
        };
        if status == StatusCode::BAD_GATEWAY {
            warn!(error = %self.0, "Upstream I/O failure surfaced to client");
        }
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct PlaceBetRequest {
    race_id: Option<RaceId>,
    horse_id: Option<HorseId>,
    #[serde(default)]
    horse_name: String,
    bettor_name: String,
    direction: BetDirection,
    mode: SettleMode,
    raw_amount: f64,
    quoted_price: f64,
    tax_rate: Option<f64>,
    #[serde(default)]
    remarks: String,
}

async fn place_bet(
    State(state): State<ApiState>,
    Json(req): Json<PlaceBetRequest>,
) -> Result<(StatusCode, Json<BetTransaction>), ApiError> {
    let mut desk = state.desk.lock().await;
    let slip = BetSlip {
        partition: desk.partition(),
        race_id: req.race_id,
        horse_id: req.horse_id,
        horse_name: req.horse_name,
        bettor_name: req.bettor_name,
        direction: req.direction,
        mode: req.mode,
        raw_amount: req.raw_amount,
        quoted_price: req.quoted_price,
        tax_rate: req.tax_rate.unwrap_or(state.default_tax_rate),
        remarks: req.remarks,
    };
    let txn = desk.place_bet(slip).await?;
    Ok((StatusCode::CREATED, Json(txn)))
}

#[derive(Debug, Deserialize)]
struct CancelRequest {
    race_id: RaceId,
    #[serde(default = "default_cancelled")]
    cancelled: bool,
}

fn default_cancelled() -> bool {
    true
}

async fn cancel_bet(
    State(state): State<ApiState>,
    Path(id): Path<TransactionId>,
    Json(req): Json<CancelRequest>,
) -> Result<StatusCode, ApiError> {
    let mut desk = state.desk.lock().await;
    desk.cancel_bet(req.race_id, id, req.cancelled).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn race_exposure(
    State(state): State<ApiState>,
    Path(race_id): Path<RaceId>,
) -> Result<Json<RaceExposureSnapshot>, ApiError> {
    let mut desk = state.desk.lock().await;
    let snapshot = desk.race_snapshot(race_id).await?;
    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<usize>,
}

async fn recent_bettors(
    State(state): State<ApiState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<RecentBettorEntry>>, ApiError> {
    let desk = state.desk.lock().await;
    let limit = query.limit.unwrap_or(state.default_recent_limit);
    let entries = desk.recent_bettors(limit).await?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
struct PartitionRequest {
    partition: LedgerPartition,
}

async fn switch_partition(
    State(state): State<ApiState>,
    Json(req): Json<PartitionRequest>,
) -> StatusCode {
    let mut desk = state.desk.lock().await;
    desk.switch_partition(req.partition);
    StatusCode::NO_CONTENT
}

async fn ready(State(state): State<ApiState>) -> StatusCode {
    let desk = state.desk.lock().await;
    if desk.is_healthy().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
