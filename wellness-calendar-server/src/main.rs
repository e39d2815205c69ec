mod cli;
mod handlers;
mod state;

use std::{env, future, io};

use log::{error, info};
use tokio::{net::TcpListener, signal};
use wellness_calendar::SystemClock;

use crate::state::AppState;

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "wellness_calendar=info,wellness_calendar_server=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

#[tokio::main]
async fn main() -> io::Result<()> {
    setup_logging();

    let args = cli::parse(env::args().skip(1).collect());
    let router = handlers::router(AppState::new(&args, SystemClock));

    let listener = TcpListener::bind(args.address).await?;
    info!("Listening at http://{}", args.address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
        return future::pending().await;
    }
    info!("Shutting down");
}
