use anyhow::Context;
use clap::Parser;
use saar_site::utils::{logger, validation::Validate};
use saar_site::{build_router, serve, AppState, HttpMailRelay, ServerConfig, SubmissionEngine};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 本地開發時從 .env 讀取 MAIL_* 變數
    let dotenv = dotenvy::dotenv();

    let config = ServerConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_server_logger(config.verbose);
    }

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    tracing::info!("Starting saar-site");

    let resolved = match config.resolve().and_then(|r| r.mail.validate().map(|_| r)) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Mail config: {:?}", resolved.mail);

    let relay = HttpMailRelay::new(&resolved.mail).context("building mail relay client")?;
    tracing::info!("📮 Relaying form email through {}", relay.endpoint());

    let engine = SubmissionEngine::new(Arc::new(relay), Arc::new(resolved.mail))
        .context("loading email templates")?;
    let router = build_router(AppState::new(engine), &resolved.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&resolved.bind_address)
        .await
        .with_context(|| format!("binding {}", resolved.bind_address))?;

    serve(listener, router).await.context("serving HTTP")?;

    Ok(())
}
