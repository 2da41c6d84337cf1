use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use riskfolio_core::advisor::Advisor;
use riskfolio_core::catalog::{UniverseCatalog, ANY_REGION};
use riskfolio_core::domain::contract::RecommendationRequest;
use riskfolio_core::ingest::{HttpJsonMetricsProvider, MetricsProvider, StaticMetricsProvider};
use riskfolio_core::questionnaire::Questionnaire;
use riskfolio_core::ranker::Ranker;

mod answers;

#[derive(Debug, Parser)]
#[command(name = "riskfolio_cli")]
struct Args {
    /// JSON answers: an array of option indices, or an object keyed by question index.
    #[arg(long)]
    answers: PathBuf,

    /// Catalog region, or "Any" for all regions.
    #[arg(long, default_value = ANY_REGION)]
    region: String,

    /// Override the asset class derived from the answers (bonds, etf, stocks).
    #[arg(long)]
    asset_class: Option<String>,

    #[arg(long)]
    top_n: Option<usize>,

    /// Read metrics from a JSON snapshot instead of the metrics provider.
    #[arg(long)]
    metrics_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = riskfolio_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(&settings, args).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %format!("{err:#}"), "recommendation run failed");
        return Err(err);
    }
    Ok(())
}

async fn run(settings: &riskfolio_core::config::Settings, args: Args) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.answers)
        .with_context(|| format!("failed to read answers from {}", args.answers.display()))?;
    let answers = answers::parse_answers(&text)?;

    let req = RecommendationRequest {
        answers,
        region: Some(args.region),
        asset_class: args.asset_class,
        top_n: args.top_n,
    }
    .validate()?;

    let provider = build_provider(settings, args.metrics_file.as_deref())?;
    let risk_table = Arc::new(settings.load_risk_profiles()?);
    let ranker = Ranker::new(
        Arc::new(UniverseCatalog::builtin().clone()),
        risk_table,
        provider,
    );
    let advisor = Advisor::new(Arc::new(Questionnaire::builtin().clone()), ranker);

    let result = advisor
        .recommend(&req.answers, &req.region, req.options)
        .await?;

    if result.is_empty() {
        tracing::warn!(region = %result.region, asset_class = %result.asset_class, "no instruments matched");
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn build_provider(
    settings: &riskfolio_core::config::Settings,
    metrics_file: Option<&std::path::Path>,
) -> anyhow::Result<Arc<dyn MetricsProvider>> {
    let Some(path) = metrics_file else {
        return Ok(Arc::new(HttpJsonMetricsProvider::from_settings(settings)?));
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read metrics snapshot from {}", path.display()))?;
    let provider = StaticMetricsProvider::from_json(&text)
        .with_context(|| format!("invalid metrics snapshot in {}", path.display()))?;
    tracing::info!(path = %path.display(), records = provider.len(), "loaded metrics snapshot");
    Ok(Arc::new(provider))
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
