use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use riskfolio_core::advisor::Advisor;
use riskfolio_core::catalog::UniverseCatalog;
use riskfolio_core::domain::contract::RecommendationRequest;
use riskfolio_core::domain::RecommendationResult;
use riskfolio_core::ingest::{HttpJsonMetricsProvider, MetricsProvider};
use riskfolio_core::questionnaire::{Question, Questionnaire};
use riskfolio_core::ranker::Ranker;
use riskfolio_core::risk::{RiskConfiguration, RiskProfileTable};
use riskfolio_core::AdvisorError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = riskfolio_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let risk_table = Arc::new(settings.load_risk_profiles()?);

    let provider: Option<Arc<dyn MetricsProvider>> =
        match HttpJsonMetricsProvider::from_settings(&settings) {
            Ok(p) => Some(Arc::new(p)),
            Err(e) => {
                sentry_anyhow::capture_anyhow(&e);
                tracing::error!(error = %e, "metrics provider unavailable; starting API in degraded mode");
                None
            }
        };

    let state = AppState::new(risk_table, provider);
    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/questionnaire", get(get_questionnaire))
        .route("/risk-profiles", get(get_risk_profiles))
        .route("/recommendations", post(post_recommendations))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    questionnaire: Arc<Questionnaire>,
    risk_table: Arc<RiskProfileTable>,
    /// `None` while no metrics provider is configured.
    advisor: Option<Arc<Advisor>>,
}

impl AppState {
    fn new(risk_table: Arc<RiskProfileTable>, provider: Option<Arc<dyn MetricsProvider>>) -> Self {
        let questionnaire = Arc::new(Questionnaire::builtin().clone());
        let advisor = provider.map(|provider| {
            let ranker = Ranker::new(
                Arc::new(UniverseCatalog::builtin().clone()),
                risk_table.clone(),
                provider,
            );
            Arc::new(Advisor::new(questionnaire.clone(), ranker))
        });
        Self {
            questionnaire,
            risk_table,
            advisor,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn unavailable(message: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.to_string(),
        }
    }
}

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        let status = status_for(&err);
        let message = err.to_string();
        if status.is_server_error() {
            tracing::error!(error = %message, "recommendation failed");
            sentry_anyhow::capture_anyhow(&anyhow::Error::new(err));
        }
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

fn status_for(err: &AdvisorError) -> StatusCode {
    if err.is_input() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else if err.is_configuration() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_GATEWAY
    }
}

async fn get_questionnaire(State(state): State<AppState>) -> Json<Vec<Question>> {
    Json(state.questionnaire.questions().to_vec())
}

#[derive(Debug, Serialize)]
struct RiskProfileView {
    label: &'static str,
    description: &'static str,
    #[serde(flatten)]
    config: RiskConfiguration,
}

async fn get_risk_profiles(State(state): State<AppState>) -> Json<Vec<RiskProfileView>> {
    let views = state
        .risk_table
        .configs()
        .iter()
        .map(|c| RiskProfileView {
            label: c.level.label(),
            description: c.level.description(),
            config: c.clone(),
        })
        .collect();
    Json(views)
}

async fn post_recommendations(
    State(state): State<AppState>,
    Json(req): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResult>, ApiError> {
    let Some(advisor) = &state.advisor else {
        return Err(ApiError::unavailable("metrics provider is not configured"));
    };

    let req = req.validate()?;
    let result = advisor
        .recommend(&req.answers, &req.region, req.options)
        .await?;

    Ok(Json(result))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &riskfolio_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
