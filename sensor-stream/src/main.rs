use std::process;

use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use sensor_stream::{Dependencies, LogFormat, Settings, StreamerError};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

async fn run(settings: Settings) -> Result<(), StreamerError> {
    let dependencies = Dependencies::new(&settings)?;

    let summary = tokio::select! {
        result = dependencies.orchestrator.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, stopping sensor streams");
            return Ok(());
        }
    };

    for report in &summary.reports {
        match &report.terminal_error {
            Some(e) => warn!(
                source = %report.source,
                error = %e,
                "Sensor stream terminated early"
            ),
            None => info!(
                source = %report.source,
                rows_read = report.rows_read,
                emitted = report.emitted,
                skipped = report.skipped,
                failed = report.failed,
                "Sensor stream finished"
            ),
        }
    }

    info!(
        emitted = summary.emitted(),
        skipped = summary.skipped(),
        failed = summary.failed(),
        terminated = summary.terminated(),
        "All CSV data streaming simulations complete"
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    init_tracing(settings.log_format);

    if let Err(e) = run(settings).await {
        error!(error = %e, "Sensor stream simulator failed");
        process::exit(1);
    }
}
