//! Live line sources
//!
//! A [`LineSource`] hands the polling loop one complete line at a time and
//! answers a cheap "is anything waiting" question so a tick never blocks on
//! an idle link. Partial lines are buffered until their newline arrives.
//!
//! - [`serial`] - serial port reader for the sensor board
//! - [`ReaderLineSource`] - any buffered reader, used to replay captured logs

pub mod serial;

pub use serial::{SerialLineSource, available_ports, find_usb_port};

use crate::error::{MonitorError, Result};
use std::io::{BufRead, ErrorKind};
use tracing::debug;

/// Producer of raw lines for a live session
pub trait LineSource {
    /// Whether a read would make progress without waiting
    fn has_data(&mut self) -> Result<bool>;

    /// Read the next complete line, without its terminator
    ///
    /// Returns `Ok(None)` when only part of a line is available so far.
    fn read_line(&mut self) -> Result<Option<String>>;

    /// True once the source can never produce another line
    fn is_finished(&self) -> bool {
        false
    }

    /// Name used in logs and error messages
    fn name(&self) -> &str;
}

/// Read bytes up to the next newline into `pending`
///
/// Returns the completed line when a newline was reached. Timeouts leave the
/// partial line in `pending` for the next call. `Ok(None)` with `eof` set
/// means the reader is exhausted.
pub(crate) fn read_pending_line<R: BufRead>(
    reader: &mut R,
    pending: &mut Vec<u8>,
    name: &str,
    eof: &mut bool,
) -> Result<Option<String>> {
    match reader.read_until(b'\n', pending) {
        Ok(_) if pending.ends_with(b"\n") => Ok(Some(take_line(pending))),
        // read_until only stops short of the delimiter at end of input
        Ok(_) => {
            *eof = true;
            if pending.is_empty() {
                Ok(None)
            } else {
                Ok(Some(take_line(pending)))
            }
        }
        Err(e) if is_transient(&e) => {
            debug!("{}: read timed out with {} bytes pending", name, pending.len());
            Ok(None)
        }
        Err(e) => Err(MonitorError::source(name, e.to_string())),
    }
}

fn is_transient(error: &std::io::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
    )
}

fn take_line(pending: &mut Vec<u8>) -> String {
    let bytes = std::mem::take(pending);
    String::from_utf8_lossy(&bytes)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

/// Line source over any buffered reader
#[derive(Debug)]
pub struct ReaderLineSource<R> {
    reader: R,
    name: String,
    pending: Vec<u8>,
    eof: bool,
}

impl<R: BufRead> ReaderLineSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            pending: Vec::new(),
            eof: false,
        }
    }
}

impl<R: BufRead> LineSource for ReaderLineSource<R> {
    fn has_data(&mut self) -> Result<bool> {
        if self.eof {
            return Ok(false);
        }
        match self.reader.fill_buf() {
            Ok([]) => {
                self.eof = true;
                // A trailing unterminated line is flushed by the next read
                Ok(!self.pending.is_empty())
            }
            Ok(_) => Ok(true),
            Err(e) if is_transient(&e) => Ok(false),
            Err(e) => Err(MonitorError::source(&self.name, e.to_string())),
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        read_pending_line(&mut self.reader, &mut self.pending, &self.name, &mut self.eof)
    }

    fn is_finished(&self) -> bool {
        self.eof && self.pending.is_empty()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    #[test]
    fn test_reader_source_yields_lines() {
        let data = "CO2: 600 ppm\r\nHumidity IN: 40% : 20*C\n";
        let mut source = ReaderLineSource::new(Cursor::new(data), "cursor");

        assert!(source.has_data().unwrap());
        assert_eq!(source.read_line().unwrap().as_deref(), Some("CO2: 600 ppm"));
        assert_eq!(
            source.read_line().unwrap().as_deref(),
            Some("Humidity IN: 40% : 20*C")
        );
        assert!(!source.has_data().unwrap());
        assert!(source.is_finished());
    }

    #[test]
    fn test_reader_source_trailing_line_without_newline() {
        let mut source = ReaderLineSource::new(Cursor::new("CO2: 600 ppm"), "cursor");

        assert!(source.has_data().unwrap());
        assert_eq!(source.read_line().unwrap().as_deref(), Some("CO2: 600 ppm"));
        assert!(source.is_finished());
    }

    /// Reader that times out once mid-line, like a serial port with a slow sender
    struct StutteringReader {
        chunks: Vec<&'static [u8]>,
    }

    impl Read for StutteringReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.chunks.is_empty() {
                return Ok(0);
            }
            let chunk = self.chunks.remove(0);
            if chunk.is_empty() {
                return Err(std::io::Error::new(ErrorKind::TimedOut, "timed out"));
            }
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_partial_line_is_buffered_across_timeouts() {
        let reader = StutteringReader {
            chunks: vec![&b"CO2: 6"[..], &b""[..], &b"12 ppm\n"[..]],
        };
        let mut source = ReaderLineSource::new(BufReader::new(reader), "stutter");

        assert_eq!(source.read_line().unwrap(), None);
        assert_eq!(source.read_line().unwrap().as_deref(), Some("CO2: 612 ppm"));
    }

    #[test]
    fn test_hard_read_error_is_source_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(ErrorKind::BrokenPipe, "unplugged"))
            }
        }

        let mut source = ReaderLineSource::new(BufReader::new(Broken), "broken");

        match source.read_line() {
            Err(MonitorError::Source { source_name, .. }) => assert_eq!(source_name, "broken"),
            other => panic!("Expected Source error, got {:?}", other),
        }
    }
}
