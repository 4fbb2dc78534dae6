use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let ax = kennel_api::build()?;

    let level = ax.app.get("log.level").unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    let config = ax.app.config_snapshot();
    let host = config
        .get_string("http.host")
        .unwrap_or_else(|| "0.0.0.0".to_string());
    let port = config.get_u16("http.port").unwrap_or(8000);

    ax.listen(format!("{host}:{port}")).await?;

    Ok(())
}
