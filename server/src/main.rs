use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

/// Serve two-keyword OR queries over a corpus indexed at startup.
#[derive(Parser)]
#[command(name = "server")]
struct Args {
    /// Manifest listing the documents to index
    #[arg(long, default_value = "./docs.txt")]
    docs: String,
    /// Noise words file
    #[arg(long, default_value = "./noisewords.txt")]
    noise: String,
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let app = server::build_app(&args.docs, &args.noise)?;

    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("binding {}", args.listen))?;
    tracing::info!(addr = %args.listen, docs = %args.docs, "serving queries");
    axum::serve(listener, app).await?;
    Ok(())
}
