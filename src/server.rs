// Customer Dashboard - Web Server
// Axum routes over a shared Dashboard

use crate::aggregate::Aggregate;
use crate::dashboard::Dashboard;
use crate::html;
use crate::model::Dataset;
use crate::source::DataSource;
use crate::view::CustomerRow;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    dashboard: Arc<Mutex<Dashboard>>,
    source: Arc<dyn DataSource>,

    /// Held for a whole fetch + apply so reloads land in request order
    reloading: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, source: Arc<dyn DataSource>) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
            source,
            reloading: Arc::new(Mutex::new(())),
        }
    }

    /// Fetch off the async runtime, then apply under the dashboard lock.
    /// Sorts keep running while a fetch is in flight.
    pub async fn reload(&self) -> bool {
        let _reloading = self.reloading.lock().await;
        let source = Arc::clone(&self.source);
        let location = source.location();
        let fetched = tokio::task::spawn_blocking(move || source.fetch()).await;

        match fetched {
            Ok(result) => self.dashboard.lock().await.apply_fetch(&location, result),
            Err(e) => {
                tracing::error!(source = %location, error = %e, "load task failed");
                false
            }
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

#[derive(Serialize)]
struct ChartsResponse {
    bar: Option<Value>,
    doughnut: Option<Value>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - the dashboard page
async fn serve_index(State(state): State<AppState>) -> impl IntoResponse {
    let dashboard = state.dashboard.lock().await;
    Html(html::render_page(&dashboard))
}

/// GET /customer.json - current lists in current order
async fn serve_dataset(State(state): State<AppState>) -> Json<Dataset> {
    Json(state.dashboard.lock().await.store().snapshot())
}

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/table - rows of the customer table
async fn get_table(State(state): State<AppState>) -> Json<ApiResponse<Vec<CustomerRow>>> {
    let dashboard = state.dashboard.lock().await;
    Json(ApiResponse::ok(dashboard.table().rows().to_vec()))
}

/// GET /api/aggregates - per-customer totals
async fn get_aggregates(State(state): State<AppState>) -> Json<ApiResponse<Vec<Aggregate>>> {
    Json(ApiResponse::ok(state.dashboard.lock().await.aggregates()))
}

/// GET /api/charts - Chart.js configs, null until constructed
async fn get_charts(State(state): State<AppState>) -> Json<ApiResponse<ChartsResponse>> {
    let dashboard = state.dashboard.lock().await;
    Json(ApiResponse::ok(ChartsResponse {
        bar: dashboard.bar_chart().map(|w| w.config()),
        doughnut: dashboard.doughnut_chart().map(|w| w.config()),
    }))
}

/// POST /sort/name - `sort-button`
async fn sort_by_name(State(state): State<AppState>) -> Redirect {
    state.dashboard.lock().await.sort_customers_by_name();
    Redirect::to("/")
}

/// POST /sort/amount - `amount-button`
async fn sort_by_amount(State(state): State<AppState>) -> Redirect {
    state.dashboard.lock().await.toggle_amount_sort();
    Redirect::to("/")
}

/// POST /reload - fetch the source again; failures keep the current view
async fn reload(State(state): State<AppState>) -> impl IntoResponse {
    if state.reload().await {
        Redirect::to("/").into_response()
    } else {
        (StatusCode::BAD_GATEWAY, "failed to reload customer data").into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/table", get(get_table))
        .route("/aggregates", get(get_aggregates))
        .route("/charts", get(get_charts));

    Router::new()
        .route("/", get(serve_index))
        .route("/customer.json", get(serve_dataset))
        .route("/sort/name", post(sort_by_name))
        .route("/sort/amount", post(sort_by_amount))
        .route("/reload", post(reload))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
