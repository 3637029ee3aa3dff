//! Command implementations for the sensor monitor CLI
//!
//! Each subcommand builds its pipeline from the parsed arguments, reports
//! progress and renders the final dashboard.

use crate::cli::{Args, BatchArgs, Commands, LiveArgs};
use crate::processor::{
    BatchProcessor, InputDiscovery, LiveSession, StopReason, export_records, run_live,
};
use crate::report;
use crate::source::{LineSource, ReaderLineSource, SerialLineSource, available_ports, find_usb_port};
use crate::statistics::{DashboardSummary, co2_alert};

use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Run the selected subcommand until it completes or `cancel` fires
pub async fn run(args: Args, cancel: CancellationToken) -> Result<()> {
    debug!("Command line arguments: {:?}", args);

    match args.command {
        Commands::Batch(batch) => run_batch(batch, cancel).await,
        Commands::Live(live) => run_live_command(live, cancel).await,
        Commands::Ports => run_ports(),
    }
}

async fn run_batch(args: BatchArgs, cancel: CancellationToken) -> Result<()> {
    let start_time = Instant::now();
    let config = args.to_config();
    let export = args.export_format()?;

    let files = InputDiscovery::new(args.inputs.iter().cloned())
        .discover()
        .context("Failed to resolve batch inputs")?;

    let mut processor = BatchProcessor::new(config.clone())?;
    if !args.encodings.is_empty() {
        processor = processor.with_encodings(args.encodings.clone())?;
    }

    let result = tokio::select! {
        result = processor.process_files(&files, Utc::now()) => result?,
        _ = cancel.cancelled() => anyhow::bail!("Batch processing interrupted by user"),
    };

    if args.show_records {
        report::print_records(&result.records);
    }
    report::print_batch_stats(&result.stats);

    match DashboardSummary::from_records(&result.records, config.co2_alert_ppm) {
        Ok(dashboard) => report::print_dashboard(&dashboard),
        Err(_) => println!(
            "{}",
            "No complete sensor blocks found in the input".bright_yellow()
        ),
    }

    if let Some((path, format)) = export {
        let rows = export_records(&result.records, &path, format)
            .with_context(|| format!("Failed to export records to {}", path.display()))?;
        println!(
            "{} {} records to {}",
            "Exported".bright_green().bold(),
            rows,
            path.display().to_string().bright_cyan()
        );
    }

    info!("Batch completed in {:.2?}", start_time.elapsed());
    Ok(())
}

async fn run_live_command(args: LiveArgs, cancel: CancellationToken) -> Result<()> {
    let config = args.to_config();

    if let Some(path) = &args.replay {
        let file = File::open(path)
            .with_context(|| format!("Failed to open replay file {}", path.display()))?;
        let source = ReaderLineSource::new(BufReader::new(file), path.display().to_string());
        let session = LiveSession::new(source, &config)?;
        return drive_session(session, config.poll_interval(), args.limit, cancel).await;
    }

    let port = match &config.port {
        Some(port) => port.clone(),
        None => find_usb_port()?
            .context("No USB serial port found; pass --port (see `envmon ports`)")?,
    };
    let source = SerialLineSource::open(&port, config.baud_rate, config.read_timeout())
        .with_context(|| format!("Failed to open serial port {}", port))?;
    let session = LiveSession::new(source, &config)?;

    drive_session(session, config.poll_interval(), args.limit, cancel).await
}

/// Poll the session with a spinner, then print the dashboard for whatever
/// the window holds when it stops
async fn drive_session<S: LineSource>(
    mut session: LiveSession<S>,
    poll_interval: Duration,
    limit: Option<usize>,
    cancel: CancellationToken,
) -> Result<()> {
    println!(
        "{} {} {}",
        "Listening on".bright_green().bold(),
        session.source_name().bright_cyan(),
        "(Ctrl+C to stop)".bright_black()
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message("Waiting for sensor data...");

    let mut alerting = false;
    let outcome = run_live(&mut session, poll_interval, limit, cancel, |record, session| {
        let window = session.window();
        spinner.set_message(report::format_live_status(
            record,
            window.len(),
            window.capacity(),
        ));

        // Warn once per excursion above the threshold
        let alert = co2_alert(record, session.co2_alert_ppm());
        if alert && !alerting {
            spinner.println(format!(
                "{} {}",
                "WARNING:".bright_red().bold(),
                report::format_co2_warning(session.co2_alert_ppm())
            ));
        }
        alerting = alert;
    })
    .await;

    spinner.finish_and_clear();

    let dashboard = session.dashboard();
    let emitted = session.records_emitted();
    let stats = session.close();

    let reason = outcome?;
    match reason {
        StopReason::Cancelled => println!("\n{}", "Stopped by user".bright_yellow()),
        StopReason::SourceExhausted => println!("\n{}", "Source exhausted".bright_yellow()),
        StopReason::LimitReached => println!("\n{}", "Record limit reached".bright_yellow()),
    }
    println!("{} records emitted", emitted.to_string().bright_yellow());

    report::print_parse_stats(&stats);
    match dashboard {
        Some(dashboard) => report::print_dashboard(&dashboard),
        None => println!("{}", "No records collected".bright_yellow()),
    }

    Ok(())
}

fn run_ports() -> Result<()> {
    let ports = available_ports().context("Failed to enumerate serial ports")?;
    report::print_ports(&ports);
    Ok(())
}
