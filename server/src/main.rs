use anyhow::{Context, Result};
use cinematch_core::EncoderConfig;
use cinematch_server::build_app;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cinematch-server")]
#[command(about = "Serve movie recommendations over HTTP from a catalog fitted at startup")]
struct Args {
    /// Catalog CSV with title, genres, keywords and overview columns
    #[arg(long, default_value = "movies_sample.csv")]
    data: String,
    /// Interface to listen on
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Longest word n-gram in the vocabulary
    #[arg(long, default_value_t = 2)]
    max_ngram: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = EncoderConfig { max_ngram: args.max_ngram.max(1), ..EncoderConfig::default() };
    let app = build_app(&args.data, config)?;

    let listener = TcpListener::bind((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("binding {}:{}", args.host, args.port))?;
    tracing::info!(addr = %listener.local_addr()?, catalog = %args.data, "serving recommendations");
    axum::serve(listener, app).await?;
    Ok(())
}
