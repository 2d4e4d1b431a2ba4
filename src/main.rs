use anyhow::Context;
use clap::Parser;
use movieshelf::{
    Config, MovieStore, RouterConfig,
    cli::{self, Cli, Command},
    create_router, db,
};
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    match Cli::parse().into_command() {
        Command::Serve => serve().await,
        Command::IssueToken { subject, ttl_secs, secret } => {
            let token = cli::issue_token(&secret, &subject, ttl_secs).context("issuing token")?;
            println!("{token}");
            Ok(())
        }
    }
}

async fn serve() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movieshelf=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;

    let db = db::connect_and_migrate(&config.database_url).await.context("opening database")?;
    let store = MovieStore::new(db);

    let router_config = RouterConfig::from_config(&config);
    if router_config.auth.is_none() {
        tracing::warn!("REQUIRE_AUTH is off; movie routes are public");
    }
    let app = create_router(store, router_config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    tracing::info!(addr = %config.addr, "listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
