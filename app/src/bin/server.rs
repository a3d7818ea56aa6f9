//! Headless server binary.
//!
//! Serves the QR Studio page and API until Ctrl+C.

use tracing_subscriber::EnvFilter;

use qr_studio_lib::app::SharedState;
use qr_studio_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting QR Studio");

    let (db, config) = qr_studio_lib::init_foundation()?;
    let state = SharedState::new(db, config)?;

    let server_state = state.clone();
    let mut server_handle = tokio::spawn(async move { server::start_server(server_state).await });

    tracing::info!(
        "QR Studio running at http://{}. Press Ctrl+C to stop.",
        state.config().bind_addr()
    );

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutting down...");
            state.shutdown_token().cancel();
        }
        joined = &mut server_handle => return finish(joined),
    }

    finish(server_handle.await)
}

fn finish(joined: Result<anyhow::Result<()>, tokio::task::JoinError>) -> anyhow::Result<()> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            tracing::error!("Server failed: {e}");
            Err(e)
        }
        Err(e) => Err(e.into()),
    }
}
