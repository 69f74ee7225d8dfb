// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`. The server only ever reads from the
// immutable AppState, so every handler is a pure request/response transform.
//
// Selection contract: the chart and indicator endpoints take an optional
// `row` query parameter indexing into the summary table. A missing `row` is
// the valid "no selection" state and triggers no computation; an
// out-of-range `row` is answered with the same empty "no data" shape plus a
// message — selection mistakes never crash the server and never fall back to
// stale data.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::engine::{IndicatorPanel, PriceSeries, Sparkline};
use crate::types::SummaryRow;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/summary", get(summary))
        .route("/api/v1/names", get(names))
        .route("/api/v1/sparklines", get(sparklines))
        .route("/api/v1/chart", get(chart))
        .route("/api/v1/indicators", get(indicators))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    records: usize,
    names: usize,
    summary_rows: usize,
    selections_served: u64,
    uptime_secs: u64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        records: state.table.len(),
        names: state.names.len(),
        summary_rows: state.summary.len(),
        selections_served: state.selections_served(),
        uptime_secs: state.uptime_secs(),
    })
}

// =============================================================================
// Summary table & names
// =============================================================================

async fn summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.summary.clone())
}

async fn names(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.names.clone())
}

/// Trailing-Open sparkline series, one per summary row in table order, for
/// the mini-plot column beside the selection table.
async fn sparklines(State(state): State<Arc<AppState>>) -> Json<Vec<Sparkline>> {
    Json(state.engine.sparklines(&state.table, &state.summary))
}

// =============================================================================
// Selection-driven endpoints
// =============================================================================

#[derive(Debug, Deserialize)]
struct SelectionQuery {
    /// Row index into the summary table; absent means "no selection".
    row: Option<usize>,
}

#[derive(Serialize)]
struct ChartResponse {
    selected: Option<SummaryRow>,
    series: Option<PriceSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Raw OHLCV + market-cap series for the selected coin's price chart.
async fn chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectionQuery>,
) -> impl IntoResponse {
    match state.engine.resolve(&state.summary, query.row) {
        Ok(None) => Json(ChartResponse {
            selected: None,
            series: None,
            message: None,
        }),
        Ok(Some(row)) => {
            state.record_selection();
            let series = state.engine.price_series(&state.table, &row.name);
            info!(name = %row.name, points = series.dates.len(), "chart series served");
            Json(ChartResponse {
                selected: Some(row.clone()),
                series: Some(series),
                message: None,
            })
        }
        Err(err) => {
            warn!(error = %err, "chart selection rejected");
            Json(ChartResponse {
                selected: None,
                series: None,
                message: Some(err.to_string()),
            })
        }
    }
}

#[derive(Serialize)]
struct IndicatorsResponse {
    selected: Option<SummaryRow>,
    panel: Option<IndicatorPanel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Moving average, on-balance volume and RSI for the selected coin.
async fn indicators(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectionQuery>,
) -> impl IntoResponse {
    match state.engine.resolve(&state.summary, query.row) {
        Ok(None) => Json(IndicatorsResponse {
            selected: None,
            panel: None,
            message: None,
        }),
        Ok(Some(row)) => {
            state.record_selection();
            let panel = state.engine.indicator_panel(&state.table, &row.name);
            info!(name = %row.name, "indicator panel served");
            Json(IndicatorsResponse {
                selected: Some(row.clone()),
                panel: Some(panel),
                message: None,
            })
        }
        Err(err) => {
            warn!(error = %err, "indicator selection rejected");
            Json(IndicatorsResponse {
                selected: None,
                panel: None,
                message: Some(err.to_string()),
            })
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::market_data::PriceTable;
    use crate::types::PriceRecord;
    use axum::http::StatusCode;
    use axum::response::Response;
    use chrono::NaiveDate;

    fn rec(name: &str, day: u32, open: f64) -> PriceRecord {
        PriceRecord {
            name: name.to_string(),
            symbol: name.to_string(),
            date: NaiveDate::from_ymd_opt(2021, 7, day).unwrap(),
            open,
            high: open + 1.0,
            low: open - 1.0,
            close: open,
            volume: 10.0,
            marketcap: open * 1e6,
        }
    }

    fn test_state() -> Arc<AppState> {
        let table = PriceTable::new(vec![
            rec("Bitcoin", 1, 100.0),
            rec("Bitcoin", 2, 110.0),
            rec("Bitcoin", 3, 121.0),
        ]);
        Arc::new(AppState::new(DashboardConfig::default(), table))
    }

    async fn json_body(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn router_builds() {
        let _router = router(test_state());
    }

    // ---- selection contract at the handler boundary ------------------------

    #[tokio::test]
    async fn chart_without_row_is_empty_shape_and_no_computation() {
        let state = test_state();
        let resp = chart(State(state.clone()), Query(SelectionQuery { row: None }))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert!(json["selected"].is_null());
        assert!(json["series"].is_null());
        assert!(json.get("message").is_none());
        assert_eq!(state.selections_served(), 0);
    }

    #[tokio::test]
    async fn chart_out_of_range_row_is_ok_with_message() {
        let state = test_state();
        let resp = chart(State(state.clone()), Query(SelectionQuery { row: Some(99) }))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert!(json["selected"].is_null());
        assert!(json["series"].is_null());
        assert!(json["message"].as_str().unwrap().contains("99"));
        assert_eq!(state.selections_served(), 0);
    }

    #[tokio::test]
    async fn chart_valid_row_serves_series() {
        let state = test_state();
        let resp = chart(State(state.clone()), Query(SelectionQuery { row: Some(0) }))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["selected"]["name"], "Bitcoin");
        assert_eq!(json["series"]["close"].as_array().unwrap().len(), 3);
        assert_eq!(state.selections_served(), 1);
    }

    #[tokio::test]
    async fn indicators_without_row_is_empty_shape() {
        let resp = indicators(State(test_state()), Query(SelectionQuery { row: None }))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert!(json["selected"].is_null());
        assert!(json["panel"].is_null());
        assert!(json.get("message").is_none());
    }

    #[tokio::test]
    async fn indicators_out_of_range_row_is_ok_with_message() {
        let resp = indicators(State(test_state()), Query(SelectionQuery { row: Some(5) }))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert!(json["selected"].is_null());
        assert!(json["panel"].is_null());
        assert!(json["message"].as_str().unwrap().contains('5'));
    }

    // ---- sparklines ---------------------------------------------------------

    #[tokio::test]
    async fn sparklines_serve_full_history_for_short_coins() {
        // Bitcoin has 3 records, far fewer than the 30-point default.
        let Json(sparks) = sparklines(State(test_state())).await;
        assert_eq!(sparks.len(), 1);
        assert_eq!(sparks[0].name, "Bitcoin");
        assert_eq!(sparks[0].open, vec![100.0, 110.0, 121.0]);
    }

    #[test]
    fn chart_response_omits_message_when_absent() {
        let resp = ChartResponse {
            selected: None,
            series: None,
            message: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("message").is_none());
        assert!(json["selected"].is_null());
        assert!(json["series"].is_null());
    }

    #[test]
    fn indicators_response_serializes_null_rsi_slots() {
        let resp = IndicatorsResponse {
            selected: None,
            panel: Some(IndicatorPanel {
                moving_average: vec![1.0],
                on_balance_volume: vec![0.0],
                rsi: vec![None, Some(45.0)],
            }),
            message: Some("x".to_string()),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["panel"]["rsi"][0].is_null());
        assert!((json["panel"]["rsi"][1].as_f64().unwrap() - 45.0).abs() < 1e-10);
    }
}
