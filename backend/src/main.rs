//! Service entry-point: loads settings, wires the mutation endpoints, and
//! serves them with OpenAPI docs in debug builds.

mod server;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{BuildMode, ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let config = ServerConfig::from_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(bind_addr = %config.bind_addr(), "starting advice API");

    let server = create_server(config).await?;
    server.await
}
