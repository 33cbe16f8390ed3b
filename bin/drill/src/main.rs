use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::{Context, bail};
use drill_session::{
    DrillConfig, Session, SessionSummary,
    assets::HttpAssetCache,
    audio::RodioPlayer,
    input::TerminalInput,
};
use drill_store::{ScoreStore, load_catalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = DrillConfig::from_env().context("invalid DRILL_* configuration")?;

    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("failed to create log directory {}", config.log_dir.display()))?;
    let _log_guard = drill_session::tracing::init_tracing(&config.env, &config.log_dir)
        .context("failed to initialize logging")?;

    // Termination signals end the session through the input reader
    let shutdown = Arc::new(AtomicBool::new(false));
    tokio::spawn(shutdown_signal(Arc::clone(&shutdown)));

    // The audio output stream is not Send, so the whole session lives on one
    // blocking thread
    let summary = tokio::task::spawn_blocking(move || run_session(&config, shutdown))
        .await
        .context("drill session panicked")??;

    println!(
        "Session over: {} of {} rounds correct.",
        summary.correct, summary.rounds
    );
    Ok(())
}

fn run_session(config: &DrillConfig, shutdown: Arc<AtomicBool>) -> anyhow::Result<SessionSummary> {
    let player = RodioPlayer::try_default()
        .context("audio output is unavailable, check that a sound device is present")?;

    let catalog = load_catalog(&config.catalog_file).context("failed to load the catalog")?;
    if catalog.is_empty() {
        bail!("catalog {} has no entries", config.catalog_file.display());
    }

    let store = ScoreStore::new(&config.score_file);
    let scores = store.load().context("failed to load saved scores")?;

    let assets = HttpAssetCache::new(&config.sounds_dir).context("failed to build HTTP client")?;

    let mut session = Session::new(
        catalog,
        scores,
        store,
        TerminalInput::new(shutdown),
        assets,
        player,
        io::stdout(),
    )
    .with_selector(config.selector())
    .with_autosave(config.autosave);

    Ok(session.run()?)
}

async fn shutdown_signal(shutdown: Arc<AtomicBool>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Termination signal received, ending session");
    shutdown.store(true, Ordering::SeqCst);
}
