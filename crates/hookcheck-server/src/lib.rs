//! hookcheck Server
//!
//! Thin HTTP and CLI surfaces over `hookcheck-core`. Handlers parse input,
//! call the shared [`ContentValidator`](hookcheck_core::ContentValidator) and
//! serialize the result; no rule lives here.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

pub use config::{AppConfig, GenerationSection, PolicySource, ServerConfig};
pub use error::{ApiError, ErrorBody, ServerError, ServerResult};
pub use logging::init_tracing;
pub use routes::{handle_rejection, routes};
pub use state::AppState;

/// Bind and serve until Ctrl-C.
///
/// # Errors
/// Invalid bind address, policy load failure, or bind failure.
pub async fn serve(config: &AppConfig) -> ServerResult<()> {
    let addr = config.bind_addr()?;
    let state = AppState::from_config(config)?;
    let filter = routes(state, config.server.max_body_bytes);

    let (bound, server) = warp::serve(filter).try_bind_with_graceful_shutdown(addr, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for shutdown signal");
        }
    })?;
    tracing::info!(addr = %bound, "listening");
    server.await;
    tracing::info!("shut down");
    Ok(())
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
