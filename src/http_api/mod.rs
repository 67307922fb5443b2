use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{ServerConfig, StudyPlan, StudyRequest, plan_week};

/// Immutable per-server settings shared by every request.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    seed: Option<u64>,
    today: Option<NaiveDate>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            seed: config.seed,
            today: config.today,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::Invalid(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/schedule", post(create_schedule))
        .route("/health", get(health))
        .route("/docs", get(docs))
}

/// Serves every route at the root and again under `/api`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .nest("/api", routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "study planner listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

async fn create_schedule(
    State(state): State<AppState>,
    payload: Result<Json<StudyRequest>, JsonRejection>,
) -> Result<Json<StudyPlan>, ApiError> {
    let Json(request) = payload?;
    if !request.has_required_fields() {
        return Err(ApiError::invalid("Missing required fields"));
    }
    let plan = build_plan(&state, &request)?;
    info!(
        name = request.name.as_deref().unwrap_or("anonymous"),
        courses = request.courses().len(),
        sessions = plan.schedule.session_count(),
        "schedule generated"
    );
    Ok(Json(plan))
}

fn build_plan(state: &AppState, request: &StudyRequest) -> Result<StudyPlan, ApiError> {
    let mut rng = state.rng();
    plan_week(request, state.today(), &mut rng).map_err(|err| {
        warn!(error = %err, "failed to generate schedule");
        ApiError::internal(format!("Failed to generate schedule: {err}"))
    })
}

async fn docs() -> Json<Value> {
    Json(json!({
        "endpoints": [
            {
                "path": "/schedule",
                "method": "POST",
                "description": "Generate an optimized study schedule",
                "requestBody": {
                    "name": "string",
                    "courses": "array of objects with name and priority",
                    "studyHoursPerDay": "number",
                    "breakLength": "number (minutes)",
                    "startTime": "string (HH:MM)",
                    "endTime": "string (HH:MM)",
                    "learningStyle": "string (visual, auditory, reading, kinesthetic)",
                    "unavailableTimes": "array of objects with day, start, end",
                    "examDates": "array of objects with subject and date"
                },
                "response": {
                    "schedule": "object with days as keys and arrays of study blocks",
                    "analytics": "object with study statistics and recommendations"
                }
            },
            {
                "path": "/health",
                "method": "GET",
                "description": "Check API health status",
                "response": { "status": "string" }
            },
            {
                "path": "/docs",
                "method": "GET",
                "description": "Describe the available endpoints",
                "response": { "endpoints": "array of endpoint descriptions" }
            }
        ]
    }))
}
