//! Serial port line source
//!
//! Opens the sensor board's serial link and exposes it as a [`LineSource`].
//! The underlying port handle is released when the source is dropped,
//! which [`crate::processor::LiveSession::close`] does on every exit path
//! of the live loop.

use super::{LineSource, read_pending_line};
use crate::error::{MonitorError, Result};
use serialport::{FlowControl, SerialPort, SerialPortType};
use std::io::BufReader;
use std::time::Duration;
use tracing::{debug, info};

/// Line source reading from a serial port
pub struct SerialLineSource {
    reader: BufReader<Box<dyn SerialPort>>,
    name: String,
    pending: Vec<u8>,
    eof: bool,
}

impl SerialLineSource {
    /// Open `port` at `baud_rate`, with `timeout` applied to every read
    pub fn open(port: &str, baud_rate: u32, timeout: Duration) -> Result<Self> {
        info!("Opening serial port {} at {} baud", port, baud_rate);

        let serial = serialport::new(port, baud_rate)
            .timeout(timeout)
            .flow_control(FlowControl::None)
            .open()?;

        Ok(Self {
            reader: BufReader::new(serial),
            name: port.to_string(),
            pending: Vec::new(),
            eof: false,
        })
    }
}

impl LineSource for SerialLineSource {
    fn has_data(&mut self) -> Result<bool> {
        if !self.reader.buffer().is_empty() {
            return Ok(true);
        }
        let waiting = self
            .reader
            .get_ref()
            .bytes_to_read()
            .map_err(|e| MonitorError::source(&self.name, e.to_string()))?;
        Ok(waiting > 0)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let line = read_pending_line(&mut self.reader, &mut self.pending, &self.name, &mut self.eof)?;
        if line.is_none() && self.eof {
            return Err(MonitorError::source(&self.name, "serial port closed"));
        }
        Ok(line)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Short description of a detected serial port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSummary {
    pub name: String,
    pub kind: &'static str,
    pub description: Option<String>,
}

/// List the serial ports present on this machine
pub fn available_ports() -> Result<Vec<PortSummary>> {
    let ports = serialport::available_ports()?;
    debug!("Found {} serial ports", ports.len());

    Ok(ports
        .into_iter()
        .map(|port| {
            let description = match &port.port_type {
                SerialPortType::UsbPort(usb) => {
                    let label = [usb.manufacturer.as_deref(), usb.product.as_deref()]
                        .into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(" ");
                    if label.is_empty() {
                        Some(format!("{:04x}:{:04x}", usb.vid, usb.pid))
                    } else {
                        Some(label)
                    }
                }
                _ => None,
            };
            PortSummary {
                name: port.port_name,
                kind: port_type_name(&port.port_type),
                description,
            }
        })
        .collect())
}

/// First USB serial port, the usual way sensor boards attach
pub fn find_usb_port() -> Result<Option<String>> {
    let port = available_ports()?
        .into_iter()
        .find(|p| p.kind == "USB")
        .map(|p| p.name);

    if let Some(name) = &port {
        debug!("Auto-selected USB serial port {}", name);
    }
    Ok(port)
}

fn port_type_name(port_type: &SerialPortType) -> &'static str {
    match port_type {
        SerialPortType::UsbPort(_) => "USB",
        SerialPortType::BluetoothPort => "Bluetooth",
        SerialPortType::PciPort => "PCI",
        SerialPortType::Unknown => "Unknown",
    }
}
