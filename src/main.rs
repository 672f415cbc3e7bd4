use clap::Parser; // for cli
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use resilience_testbed::app::build_router;
use resilience_testbed::clock::SystemClock;
use resilience_testbed::config::Args;
use resilience_testbed::error::ServerError;
use resilience_testbed::random::{RandomSource, SeededRandom, ThreadRandom};
use resilience_testbed::state::AppState;
use resilience_testbed::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // parse cli arguments
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = args.limiter_config()?;
    let random: Arc<dyn RandomSource> = match args.seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    };

    // creating shared state
    let state = Arc::new(AppState::new(&config, Arc::new(SystemClock), random));
    let shutdown = state.shutdown.clone();
    let app = build_router(state);

    let addr = args.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(%addr, "Resilience testbed listening");
    info!(
        limit = config.limit,
        window_secs = config.window.as_secs(),
        rejection_status = config.rejection_status.as_u16(),
        "Rate limit applied to /api/Values"
    );
    if let Some(seed) = args.seed {
        info!(seed, "Chaos randomness is seeded");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server stopped");
    Ok(())
}

// waits for ctrl-c, then aborts every pending artificial delay
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, cancelling in-flight delays");
    shutdown.cancel();
}
