use axum::{http::HeaderValue, routing::get};
use daycare_ops::{build_router, config::Config, state, Collections};
use std::error::Error;

#[tokio::main]
async fn main() {
    // Load .env if present (dotenvy)
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        eprintln!("daycare-ops server failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    daycare_ops::telemetry::init_telemetry("daycare-ops", &config);

    let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();

    let backend = state::connect_backend(&config).await?;
    tracing::info!(backend = backend.name(), "storage ready");

    let collections = Collections::new(backend);
    collections.ensure_seed().await?;
    daycare_ops::metrics::init_metrics(&collections).await;

    let cors_origin: HeaderValue = config.cors_origin.parse()?;
    let app = build_router(collections, cors_origin)
        .layer(prometheus_layer)
        .route("/metrics", get(|| async move { metric_handle.render() }));

    tracing::info!("listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
