use chrono::Local;
use fitness_tracker::{AppState, TrackerData, load_data_at, persist_data, resolve_data_path, router};
use std::{env, net::SocketAddr};
use tokio::{fs, signal, sync::watch};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path()?;
    if let Some(parent) = data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = load_data_at(&data_path, Local::now().date_naive()).await;
    if let Err(err) = persist_data(&data_path, &data).await {
        error!("failed to write data file: {err}");
    }
    info!(
        path = %data_path.display(),
        day = %data.current_day,
        streak = data.streak,
        "loaded tracker"
    );

    let state = AppState::new(data_path, data);
    tokio::spawn(log_changes(state.subscribe()));

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn log_changes(mut changes: watch::Receiver<TrackerData>) {
    while changes.changed().await.is_ok() {
        let data = changes.borrow_and_update();
        debug!(
            day = %data.current_day,
            protein = data.daily_macros.protein,
            carbs = data.daily_macros.carbs,
            fat = data.daily_macros.fat,
            streak = data.streak,
            history = data.weekly_history.len(),
            "committed snapshot"
        );
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}
