use std::io::{self, Stderr, Stdout, Write};
use std::net::Ipv4Addr;
use std::time::Duration;

use pingsweep_common::network::{range::AddressRange, target::ProbeTarget};
use tracing::warn;

use crate::sweep::SweepReporter;

pub fn banner_line(range: &AddressRange) -> String {
    format!("Escaneando {range}")
}

pub fn alive_line(addr: Ipv4Addr, rtt: Duration) -> String {
    format!("[+] Host ativo: {addr} (tempo {}ms)", rtt.as_millis())
}

pub fn invalid_line(target: &ProbeTarget) -> String {
    format!("IP invalido: {target}")
}

/// Writes results to `out` and warnings to `err`, one line per event.
pub struct WriterReporter<O: Write, E: Write> {
    out: O,
    err: E,
}

impl WriterReporter<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> WriterReporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> SweepReporter for WriterReporter<O, E> {
    fn on_start(&mut self, range: &AddressRange) {
        emit(&mut self.out, &banner_line(range));
    }

    fn on_alive(&mut self, addr: Ipv4Addr, rtt: Duration) {
        emit(&mut self.out, &alive_line(addr, rtt));
    }

    fn on_invalid_address(&mut self, target: &ProbeTarget) {
        emit(&mut self.err, &invalid_line(target));
    }
}

fn emit<W: Write>(writer: &mut W, line: &str) {
    if let Err(e) = writeln!(writer, "{line}").and_then(|_| writer.flush()) {
        warn!("failed to write report line: {e}");
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
