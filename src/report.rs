//! Terminal rendering of records and statistics
//!
//! The `format_*` functions build plain strings so they can be checked in
//! tests; the `print_*` functions add colour and write to stdout.

use crate::models::{Quantity, Record};
use crate::parser::ParseStats;
use crate::processor::BatchStats;
use crate::source::serial::PortSummary;
use crate::statistics::{DashboardSummary, QuantitySummary};
use colored::*;

/// Quantities grouped the way the dashboard lays them out
const SECTIONS: [(&str, [Quantity; 2]); 2] = [
    ("Temperature", [Quantity::TemperatureIn, Quantity::TemperatureOut]),
    ("Humidity", [Quantity::HumidityIn, Quantity::HumidityOut]),
];

/// Latest value with unit and signed change, e.g. `21.3°C (+0.4)`
pub fn format_metric(entry: &QuantitySummary) -> String {
    let unit = entry.quantity.unit();
    match entry.delta {
        Some(delta) => format!("{:.1}{} ({:+.1})", entry.latest, unit, delta),
        None => format!("{:.1}{}", entry.latest, unit),
    }
}

/// One statistics row: label, min, mean, max
pub fn format_summary_row(entry: &QuantitySummary) -> String {
    let unit = entry.quantity.unit();
    format!(
        "{:<18} min {:>8.1}{u}  mean {:>8.1}{u}  max {:>8.1}{u}",
        entry.quantity.label(),
        entry.summary.min,
        entry.summary.mean,
        entry.summary.max,
        u = unit
    )
}

/// Single-line status for the live spinner
pub fn format_live_status(record: &Record, window_len: usize, capacity: usize) -> String {
    format!(
        "IN {:.1}°C {:.1}% | OUT {:.1}°C {:.1}% | CO2 {:.0} ppm | window {}/{}",
        record.temperature_in,
        record.humidity_in,
        record.temperature_out,
        record.humidity_out,
        record.co2,
        window_len,
        capacity
    )
}

/// Message shown when CO2 is over the alert threshold
pub fn format_co2_warning(threshold_ppm: f64) -> String {
    format!("CO2 levels are above {:.0} ppm", threshold_ppm)
}

/// Print the full dashboard: metrics, per-section statistics and CO2 status
pub fn print_dashboard(dashboard: &DashboardSummary) {
    println!();
    println!("{}", "Sensor Dashboard".bright_green().bold());
    println!(
        "{} {} records, {} to {}",
        "Range:".bright_white(),
        dashboard.record_count.to_string().bright_yellow(),
        dashboard.first_timestamp.format("%Y-%m-%d %H:%M:%S"),
        dashboard.last_timestamp.format("%Y-%m-%d %H:%M:%S")
    );

    println!();
    println!("{}", "Current readings".bright_cyan().bold());
    for quantity in Quantity::ALL {
        match dashboard.get(quantity) {
            Some(entry) => println!(
                "  {:<18} {}",
                quantity.label(),
                colour_delta(entry, format_metric(entry))
            ),
            None => println!(
                "  {:<18} {}",
                quantity.label(),
                "no reading yet".bright_black()
            ),
        }
    }

    for (title, quantities) in SECTIONS {
        println!();
        println!("{}", format!("{} statistics", title).bright_cyan().bold());
        for quantity in quantities {
            if let Some(entry) = dashboard.get(quantity) {
                println!("  {}", format_summary_row(entry));
            }
        }
    }

    println!();
    println!("{}", "CO2 statistics".bright_cyan().bold());
    if let Some(entry) = dashboard.get(Quantity::Co2) {
        println!("  {}", format_summary_row(entry));
    }

    if dashboard.co2_alert {
        println!(
            "  {} {}",
            "WARNING:".bright_red().bold(),
            format_co2_warning(dashboard.co2_threshold_ppm).bright_red()
        );
    } else if dashboard.get(Quantity::Co2).is_some() {
        println!(
            "  {}",
            format!(
                "CO2 within limits ({:.0} ppm, threshold {:.0} ppm)",
                dashboard.latest_co2, dashboard.co2_threshold_ppm
            )
            .bright_green()
        );
    }
}

/// Print every record as a table row
pub fn print_records(records: &[Record]) {
    println!();
    println!(
        "{}",
        format!(
            "{:<20} {:>9} {:>9} {:>9} {:>9} {:>9}",
            "timestamp", "hum_out", "temp_out", "hum_in", "temp_in", "co2"
        )
        .bright_white()
        .bold()
    );
    for record in records {
        println!(
            "{:<20} {:>9.1} {:>9.1} {:>9.1} {:>9.1} {:>9.1}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.humidity_out,
            record.temperature_out,
            record.humidity_in,
            record.temperature_in,
            record.co2
        );
    }
}

/// Print line parsing counters for a live session
pub fn print_parse_stats(stats: &ParseStats) {
    println!();
    println!("{}", "Parse statistics".bright_cyan().bold());
    println!("  Lines read:        {}", stats.total_lines);
    println!("  Readings parsed:   {}", stats.readings_parsed);
    println!("  Malformed:         {}", stats.malformed);
    println!("  Unrecognized:      {}", stats.unrecognized);

    let rate = format!("{:.1}%", stats.success_rate());
    if stats.is_successful() || stats.total_lines == 0 {
        println!("  Success rate:      {}", rate.bright_green());
    } else {
        println!("  Success rate:      {}", rate.bright_yellow());
        for error in &stats.errors {
            println!("    {}", error.bright_black());
        }
    }
}

/// Print batch counters and the encoding used per file
pub fn print_batch_stats(stats: &BatchStats) {
    println!();
    println!("{}", "Batch statistics".bright_cyan().bold());
    println!("  Files processed:   {}", stats.files_processed);
    println!("  Bytes read:        {}", stats.bytes_read);
    println!("  Complete blocks:   {}", stats.blocks_parsed);
    if stats.blocks_incomplete > 0 {
        println!(
            "  Incomplete blocks: {}",
            stats.blocks_incomplete.to_string().bright_yellow()
        );
    }
    for (name, encoding) in &stats.encodings {
        println!("    {} {}", name.bright_black(), format!("({})", encoding).bright_black());
    }
}

/// Print detected serial ports
pub fn print_ports(ports: &[PortSummary]) {
    if ports.is_empty() {
        println!("{}", "No serial ports found".bright_yellow());
        return;
    }

    println!("{}", "Available serial ports:".bright_green().bold());
    for port in ports {
        match &port.description {
            Some(description) => println!(
                "  {} {} {}",
                port.name.bright_cyan(),
                format!("[{}]", port.kind).bright_yellow(),
                description.bright_black()
            ),
            None => println!(
                "  {} {}",
                port.name.bright_cyan(),
                format!("[{}]", port.kind).bright_yellow()
            ),
        }
    }
}

fn colour_delta(entry: &QuantitySummary, text: String) -> ColoredString {
    match entry.delta {
        Some(delta) if delta > 0.0 => text.bright_red(),
        Some(delta) if delta < 0.0 => text.bright_blue(),
        _ => text.normal(),
    }
}
