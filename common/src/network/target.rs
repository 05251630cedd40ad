//! A single address synthesized from a prefix and a suffix.
//!
//! The prefix is taken verbatim from the user, so the result is only a
//! candidate until [`ProbeTarget::parse`] accepts it.

use std::fmt;
use std::net::Ipv4Addr;

use crate::error::SweepError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTarget {
    addr: String,
}

impl ProbeTarget {
    pub fn new(prefix: &str, suffix: i32) -> Self {
        Self {
            addr: format!("{prefix}.{suffix}"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.addr
    }

    /// Strict dotted-quad parse: four decimal octets, nothing else.
    pub fn parse(&self) -> Result<Ipv4Addr, SweepError> {
        self.addr
            .parse::<Ipv4Addr>()
            .map_err(|_| SweepError::InvalidAddress(self.addr.clone()))
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.addr)
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
