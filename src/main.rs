use anyhow::{Context, Result};
use clap::Parser;
use meeting_summarizer::{create_router, AppState, Config, MeetingStore, MySqlMeetingStore};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "meeting-summarizer", about = "Meeting audio transcription and summary API")]
struct Args {
    /// Config file (extension optional); environment variables take precedence
    #[arg(long, default_value = "config/meeting-summarizer")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // A missing .env is fine
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Meeting Summarizer v{}", env!("CARGO_PKG_VERSION"));

    tokio::fs::create_dir_all(&cfg.storage_dir)
        .await
        .with_context(|| format!("Failed to create storage dir {}", cfg.storage_dir.display()))?;
    info!("Uploads stored in {}", cfg.storage_dir.display());

    if cfg.api_key().is_some() {
        info!("OpenAI API key loaded");
    } else {
        error!("OPENAI_API_KEY not set; transcripts and summaries will be sentinel text");
    }

    let store = MySqlMeetingStore::connect(&cfg).await?;
    store
        .ensure_schema()
        .await
        .context("Failed to initialize meetings table")?;

    let state = AppState::new(&cfg, Arc::new(store));
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.http_bind, cfg.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
