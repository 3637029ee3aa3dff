//! Parsing statistics for line and block input
//!
//! Tracks how much input was accepted and why the rest was skipped.

use super::line::ParseError;
use crate::constants::MAX_RECORDED_ERRORS;

/// Counters for parsed input
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of non-empty lines seen
    pub total_lines: usize,

    /// Number of lines that produced a reading
    pub readings_parsed: usize,

    /// Lines with a known keyword but unusable fields
    pub malformed: usize,

    /// Lines matching no known shape
    pub unrecognized: usize,

    /// Most recent malformed-line messages, capped for long sessions
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_lines: 0,
            readings_parsed: 0,
            malformed: 0,
            unrecognized: 0,
            errors: Vec::new(),
        }
    }

    /// Count a line that parsed
    pub fn record_success(&mut self) {
        self.total_lines += 1;
        self.readings_parsed += 1;
    }

    /// Count a rejected line
    pub fn record_error(&mut self, error: &ParseError) {
        self.total_lines += 1;
        match error {
            ParseError::Malformed { .. } => {
                self.malformed += 1;
                if self.errors.len() == MAX_RECORDED_ERRORS {
                    self.errors.remove(0);
                }
                self.errors
                    .push(format!("Line {}: {}", self.total_lines, error));
            }
            ParseError::Unrecognized { .. } => self.unrecognized += 1,
        }
    }

    /// Lines skipped for any reason
    pub fn skipped(&self) -> usize {
        self.malformed + self.unrecognized
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            (self.readings_parsed as f64 / self.total_lines as f64) * 100.0
        }
    }

    /// Check if parsing was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
