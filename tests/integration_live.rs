//! Integration tests for live sessions
//!
//! Replays captured serial output through the polling loop, the same path
//! the `live --replay` command takes.

use envmon::MonitorConfig;
use envmon::models::Quantity;
use envmon::processor::{LiveSession, StopReason, run_live};
use envmon::source::ReaderLineSource;
use std::fs::File;
use std::io::BufReader;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

const CAPTURE: &str = "\
Sensor board ready
CO2: 950.00 ppm
Humidity IN: 41.50% : 21.30*C
Humidity out: 78.00% : 6.20*C

Humidity IN: 41.90% : 21.60*C
CO2: 1020.00 ppm
Humidity out: 78.00% : 6.20 ppm
Humidity out: 77.50% : 6.40*C
";

fn replay_source(dir: &TempDir) -> ReaderLineSource<BufReader<File>> {
    let path = dir.path().join("capture.log");
    std::fs::write(&path, CAPTURE).unwrap();
    ReaderLineSource::new(BufReader::new(File::open(&path).unwrap()), "capture.log")
}

#[tokio::test]
async fn test_replay_best_effort() {
    let temp_dir = TempDir::new().unwrap();
    let mut session =
        LiveSession::new(replay_source(&temp_dir), &MonitorConfig::default()).unwrap();
    let mut co2_seen = Vec::new();

    let reason = run_live(
        &mut session,
        Duration::from_millis(1),
        None,
        CancellationToken::new(),
        |record, _| co2_seen.push(record.co2),
    )
    .await
    .unwrap();

    assert_eq!(reason, StopReason::SourceExhausted);
    assert_eq!(co2_seen, vec![950.0, 950.0, 950.0, 950.0, 1020.0, 1020.0]);

    let latest = session.window().latest().unwrap();
    assert_eq!(latest.humidity_in, 41.9);
    assert_eq!(latest.temperature_out, 6.4);

    let dashboard = session.dashboard().unwrap();
    assert!(dashboard.co2_alert);
    // Outdoor readings start with the third record, so the two earlier
    // placeholder zeros must not pull the minimum down
    let temp_out = dashboard.get(Quantity::TemperatureOut).unwrap();
    assert_eq!(temp_out.summary.count, 4);
    assert_eq!(temp_out.summary.min, 6.2);
    assert_eq!(temp_out.latest, 6.4);
    assert!((temp_out.delta.unwrap() - 0.2).abs() < 1e-9);
    let temp_in = dashboard.get(Quantity::TemperatureIn).unwrap();
    assert_eq!(temp_in.summary.min, 21.3);
    assert_eq!(temp_in.summary.count, 5);

    let stats = session.close();
    assert_eq!(stats.total_lines, 8);
    assert_eq!(stats.readings_parsed, 6);
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.unrecognized, 1);
}

#[tokio::test]
async fn test_replay_complete_only() {
    let temp_dir = TempDir::new().unwrap();
    let config = MonitorConfig::default().with_complete_only();
    let mut session = LiveSession::new(replay_source(&temp_dir), &config).unwrap();

    let reason = run_live(
        &mut session,
        Duration::from_millis(1),
        Some(2),
        CancellationToken::new(),
        |record, _| assert_ne!(record.temperature_out, 0.0),
    )
    .await
    .unwrap();

    assert_eq!(reason, StopReason::LimitReached);
    assert_eq!(session.records_emitted(), 2);
    let first = session.window().iter().next().copied().unwrap();
    assert_eq!(first.co2, 950.0);
    assert_eq!(first.humidity_out, 78.0);
}
