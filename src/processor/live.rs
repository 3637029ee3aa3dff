//! Live ingestion session and polling loop
//!
//! A [`LiveSession`] owns one line source together with the assembler and
//! rolling window that belong to that stream. Each [`LiveSession::tick`]
//! consumes at most one line, so a slow or silent link never stalls the
//! loop. [`run_live`] drives ticks on a fixed cadence until cancelled, the
//! source is exhausted or a record limit is reached.

use crate::assembler::RecordAssembler;
use crate::config::MonitorConfig;
use crate::error::Result;
use crate::models::{Quantity, Record};
use crate::parser::{LineParser, ParseError, ParseStats};
use crate::source::LineSource;
use crate::statistics::DashboardSummary;
use crate::window::RollingWindow;

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// What a single tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing was waiting, or only part of a line has arrived
    Idle,
    /// A line was read and discarded
    Skipped(ParseError),
    /// A reading was accepted but the assembler held the record back
    Pending,
    /// A record was emitted and appended to the window
    Emitted(Record),
}

/// Why [`run_live`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    SourceExhausted,
    LimitReached,
}

/// Per-stream live state: source, assembler, window and counters
pub struct LiveSession<S> {
    source: S,
    parser: LineParser,
    assembler: RecordAssembler,
    window: RollingWindow,
    stats: ParseStats,
    co2_alert_ppm: f64,
    records_emitted: usize,
    /// Emission index of the first record carrying a real value per quantity
    first_observed: HashMap<Quantity, usize>,
}

impl<S: LineSource> LiveSession<S> {
    /// Create a session over `source` using the live settings of `config`
    pub fn new(source: S, config: &MonitorConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "Starting live session on {} (window {}, {:?})",
            source.name(),
            config.window_capacity,
            config.emission
        );

        Ok(Self {
            source,
            parser: LineParser::new(),
            assembler: RecordAssembler::new(config.emission),
            window: RollingWindow::new(config.window_capacity)?,
            stats: ParseStats::new(),
            co2_alert_ppm: config.co2_alert_ppm,
            records_emitted: 0,
            first_observed: HashMap::new(),
        })
    }

    /// Consume at most one line from the source
    ///
    /// Parse failures are counted and reported as [`TickOutcome::Skipped`];
    /// only source failures end the session.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<TickOutcome> {
        if !self.source.has_data()? {
            return Ok(TickOutcome::Idle);
        }

        let line = match self.source.read_line()? {
            Some(line) => line,
            None => return Ok(TickOutcome::Idle),
        };

        let line = line.trim();
        if line.is_empty() {
            return Ok(TickOutcome::Idle);
        }

        let partial = match self.parser.parse(line) {
            Ok(partial) => partial,
            Err(e) => {
                if e.is_malformed() {
                    warn!("{}", e);
                } else {
                    debug!("{}", e);
                }
                self.stats.record_error(&e);
                return Ok(TickOutcome::Skipped(e));
            }
        };
        self.stats.record_success();

        match self.assembler.ingest(partial, now) {
            Some(record) => {
                for quantity in Quantity::ALL {
                    if self.assembler.observed(quantity) {
                        self.first_observed
                            .entry(quantity)
                            .or_insert(self.records_emitted);
                    }
                }
                if let Some(evicted) = self.window.push(record) {
                    trace!("Evicted record from {}", evicted.timestamp);
                }
                self.records_emitted += 1;
                Ok(TickOutcome::Emitted(record))
            }
            None => Ok(TickOutcome::Pending),
        }
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    pub fn assembler(&self) -> &RecordAssembler {
        &self.assembler
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Records emitted since the session started, including evicted ones
    pub fn records_emitted(&self) -> usize {
        self.records_emitted
    }

    pub fn co2_alert_ppm(&self) -> f64 {
        self.co2_alert_ppm
    }

    /// Dashboard view of the current window, `None` while it is empty
    ///
    /// Records emitted before a quantity was first read hold placeholder
    /// zeros for it and are left out of that quantity's statistics.
    pub fn dashboard(&self) -> Option<DashboardSummary> {
        let records = self.window.snapshot();
        // The window holds emission indices `start..records_emitted`
        let start = self.records_emitted - records.len();

        DashboardSummary::from_observed(&records, self.co2_alert_ppm, |quantity| {
            self.first_observed
                .get(&quantity)
                .map(|&index| index.saturating_sub(start))
        })
        .ok()
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn is_finished(&self) -> bool {
        self.source.is_finished()
    }

    /// End the session, releasing the source, and return its parse statistics
    pub fn close(self) -> ParseStats {
        info!(
            "Closing live session on {}: {} records emitted",
            self.source.name(),
            self.records_emitted
        );
        self.stats
    }
}

/// Poll `session` every `poll_interval` until cancelled, exhausted or `limit`
/// records have been emitted
///
/// `on_record` sees every emitted record together with the session state
/// after the record was appended.
pub async fn run_live<S, F>(
    session: &mut LiveSession<S>,
    poll_interval: Duration,
    limit: Option<usize>,
    cancel: CancellationToken,
    mut on_record: F,
) -> Result<StopReason>
where
    S: LineSource,
    F: FnMut(&Record, &LiveSession<S>),
{
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Live session cancelled");
                return Ok(StopReason::Cancelled);
            }
            _ = ticker.tick() => {}
        }

        if let TickOutcome::Emitted(record) = session.tick(Utc::now())? {
            on_record(&record, session);

            if limit.is_some_and(|max| session.records_emitted() >= max) {
                info!("Record limit reached after {} records", session.records_emitted());
                return Ok(StopReason::LimitReached);
            }
        }

        if session.is_finished() {
            info!("Source {} exhausted", session.source_name());
            return Ok(StopReason::SourceExhausted);
        }
    }
}
