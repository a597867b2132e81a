// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command implementations.

use std::io::{self, ErrorKind, Read, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use serialport::{DataBits, FlowControl, Parity, SerialPortType, StopBits};

use crate::decode::{hex_row, CounterCheck, LineAssembler, HEX_ROW};

/// Read timeout; an idle period this long flushes partial output.
const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// List available serial ports.
pub fn list() -> Result<()> {
    let ports = serialport::available_ports().context("Failed to enumerate serial ports")?;
    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }

    for port in ports {
        match port.port_type {
            SerialPortType::UsbPort(usb) => println!(
                "{}  USB {:04x}:{:04x} {}",
                port.port_name,
                usb.vid,
                usb.pid,
                usb.product.as_deref().unwrap_or("")
            ),
            SerialPortType::PciPort => println!("{}  PCI", port.port_name),
            SerialPortType::BluetoothPort => println!("{}  Bluetooth", port.port_name),
            SerialPortType::Unknown => println!("{}", port.port_name),
        }
    }
    Ok(())
}

/// How received bytes are shown.
pub enum View {
    Text {
        lines: LineAssembler,
        counter: Option<CounterCheck>,
    },
    Hex {
        offset: u32,
        row: Vec<u8>,
    },
}

impl View {
    pub fn text(check_counter: bool) -> Self {
        Self::Text {
            lines: LineAssembler::new(),
            counter: check_counter.then(CounterCheck::new),
        }
    }

    pub fn hex() -> Self {
        Self::Hex {
            offset: 0,
            row: Vec::with_capacity(HEX_ROW),
        }
    }

    fn feed(&mut self, bytes: &[u8], out: &mut impl Write) -> Result<()> {
        match self {
            Self::Text { lines, counter } => {
                for &b in bytes {
                    if let Some(line) = lines.push(b) {
                        emit_line(&line, counter.as_mut(), out)?;
                    }
                }
            }
            Self::Hex { offset, row } => {
                for &b in bytes {
                    row.push(b);
                    if row.len() == HEX_ROW {
                        writeln!(out, "{}", hex_row(*offset, row))?;
                        *offset = offset.wrapping_add(HEX_ROW as u32);
                        row.clear();
                    }
                }
            }
        }
        Ok(())
    }

    /// Line is quiet: show whatever is pending.
    fn idle(&mut self, out: &mut impl Write) -> Result<()> {
        match self {
            Self::Text { lines, counter } => {
                if let Some(line) = lines.flush() {
                    emit_line(&line, counter.as_mut(), out)?;
                }
            }
            Self::Hex { offset, row } => {
                if !row.is_empty() {
                    writeln!(out, "{}", hex_row(*offset, row))?;
                    *offset = offset.wrapping_add(row.len() as u32);
                    row.clear();
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}

fn emit_line(line: &str, counter: Option<&mut CounterCheck>, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{line}")?;
    if let Some(gap) = counter.and_then(|c| c.observe(line)) {
        eprintln!(
            "gap: expected {:08X}, got {:08X} ({} lines lost)",
            gap.expected,
            gap.got,
            gap.lost()
        );
    }
    Ok(())
}

/// Open `port` at 8N1 and print what arrives until the port goes away.
pub fn watch(port: &str, baud: u32, mut view: View) -> Result<()> {
    let mut serial = serialport::new(port, baud)
        .timeout(READ_TIMEOUT)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .open()
        .with_context(|| format!("Failed to open {port} at {baud} baud"))?;

    eprintln!("Watching {port} at {baud} baud (Ctrl-C to stop)");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut buf = [0u8; 256];

    loop {
        match serial.read(&mut buf) {
            Ok(0) => view.idle(&mut out)?,
            Ok(n) => view.feed(&buf[..n], &mut out)?,
            Err(e) if e.kind() == ErrorKind::TimedOut => view.idle(&mut out)?,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                view.idle(&mut out)?;
                if let View::Text {
                    counter: Some(check),
                    ..
                } = &view
                {
                    let (seen, gaps) = check.totals();
                    eprintln!("{seen} counter lines, {gaps} gaps");
                }
                return Err(e).with_context(|| format!("Read from {port} failed"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_view_holds_partial_line_until_idle() {
        let mut view = View::text(false);
        let mut out = Vec::new();

        view.feed(b"tick 1\r\ntick", &mut out).unwrap();
        assert_eq!(out, b"tick 1\n");

        view.feed(b" 2", &mut out).unwrap();
        view.idle(&mut out).unwrap();
        assert_eq!(out, b"tick 1\ntick 2\n");
    }

    #[test]
    fn test_hex_view_rows_and_offsets() {
        let mut view = View::hex();
        let mut out = Vec::new();

        view.feed(&[0x41; 20], &mut out).unwrap();
        view.idle(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let rows: Vec<_> = text.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("00000000  41"));
        assert!(rows[1].starts_with("00000010  41 41 41 41   "));
        assert!(rows[1].ends_with("|AAAA|"));
    }
}
