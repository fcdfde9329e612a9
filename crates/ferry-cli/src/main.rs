mod bootstrap;

use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("ferry error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    init_tracing()?;

    let config = bootstrap::load_config()?;
    let app = bootstrap::App::build(&config).await?;

    let sync = ferry_sync::scheduler::spawn_periodic(app.reconciler, app.interval);
    info!(
        list = %config.google.task_list,
        interval_secs = app.interval.as_secs(),
        "ferry started"
    );

    tokio::select! {
        () = ferry_telegram::run_polling(&app.bot, &app.front, config.telegram.poll_timeout_secs) => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            info!("shutting down");
        }
    }

    sync.abort();
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("FERRY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
