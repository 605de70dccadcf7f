// Plate Dating - Web Server
// REST API with Axum over an immutable, shared reference table

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use plate_dating::{
    logging, report, AppConfig, BadgeClassifier, FuelType, PeriodTable, PlateEstimate,
    PlateEstimator, Report, TableSource, TableStats, TableLoader,
};

/// Shared application state (read-only after startup, no lock needed)
#[derive(Clone)]
struct AppState {
    table: Arc<PeriodTable>,
    classifier: BadgeClassifier,
    source: Arc<TableSource>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Deserialize)]
struct PlateQuery {
    fuel: Option<String>,
}

/// Estimate response: structured result plus display text
#[derive(Serialize)]
struct EstimateResponse {
    #[serde(flatten)]
    estimate: PlateEstimate,
    report: Report,
}

#[derive(Serialize)]
struct StatsResponse {
    #[serde(flatten)]
    stats: TableStats,
    source: TableSource,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/plates/:plate?fuel=diesel - Estimate issuance date
async fn estimate_plate(
    State(state): State<AppState>,
    Path(plate): Path<String>,
    Query(query): Query<PlateQuery>,
) -> impl IntoResponse {
    let estimator = match PlateEstimator::new(&state.table, state.classifier.clone()) {
        Ok(estimator) => estimator,
        Err(e) => {
            tracing::error!(error = %e, "Reference table unusable");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<EstimateResponse>::err(e.to_string())),
            )
                .into_response();
        }
    };

    let fuel = query.fuel.as_deref().map(FuelType::parse);

    match estimator.estimate(&plate, fuel) {
        Ok(estimate) => {
            let report = report::describe_resolution(&estimate.resolution);
            (
                StatusCode::OK,
                Json(ApiResponse::ok(EstimateResponse { estimate, report })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::debug!(plate = %plate, error = %e, "Rejected plate");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<EstimateResponse>::err(report::describe_error(&e).message)),
            )
                .into_response()
        }
    }
}

/// GET /api/stats - Reference table statistics
async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    let response = StatsResponse {
        stats: state.table.stats(),
        source: state.source.as_ref().clone(),
    };
    (StatusCode::OK, Json(ApiResponse::ok(response)))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config_path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    // Load once; the table is immutable from here on
    let loaded = TableLoader::new(config.table_path.clone())
        .with_fallback(config.use_fallback)
        .load()?;

    let state = AppState {
        table: Arc::new(loaded.table),
        classifier: BadgeClassifier::new(config.badge_policy),
        source: Arc::new(loaded.source),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/plates/:plate", get(estimate_plate))
        .route("/stats", get(get_stats))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.server_addr).await?;
    tracing::info!(addr = %config.server_addr, "Server running");

    axum::serve(listener, app).await?;
    Ok(())
}
