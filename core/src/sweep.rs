//! The sequential sweep loop.
//!
//! One [`EchoTransport`] is acquired before the loop and consumed by
//! [`SweepEngine::run`], so it is released exactly once whichever way the
//! run ends. Probes go out one at a time in ascending suffix order, which is
//! also the order results are reported in.

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use pingsweep_common::{
    config::SweepConfig,
    error::SweepError,
    network::{range::AddressRange, reply::EchoReply, target::ProbeTarget},
};
use tracing::{debug, info_span, trace};

use crate::network::transport::{EchoTransport, IcmpSession};

/// Receives the operator-facing events of a sweep.
pub trait SweepReporter {
    fn on_start(&mut self, range: &AddressRange);
    fn on_alive(&mut self, addr: Ipv4Addr, rtt: Duration);
    fn on_invalid_address(&mut self, target: &ProbeTarget);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    /// Echo requests actually attempted.
    pub probed: usize,
    pub alive: usize,
    /// Targets skipped because they did not parse.
    pub invalid: usize,
    pub elapsed: Duration,
}

pub struct SweepEngine<T: EchoTransport> {
    transport: T,
    cfg: SweepConfig,
}

impl<T: EchoTransport> SweepEngine<T> {
    pub fn new(transport: T, cfg: SweepConfig) -> Self {
        Self { transport, cfg }
    }

    /// Parses `target` and, if it is a valid address, sends it one echo
    /// request.
    ///
    /// Transport failures are folded into [`EchoReply::NoResponse`]; the only
    /// error returned is [`SweepError::InvalidAddress`].
    pub fn probe(&mut self, target: &ProbeTarget) -> Result<EchoReply, SweepError> {
        let addr: Ipv4Addr = target.parse()?;

        let raw = match self
            .transport
            .echo(addr, &self.cfg.payload, self.cfg.timeout)
        {
            Ok(raw) => raw,
            Err(e) => {
                debug!(%addr, "probe failed: {e:#}");
                None
            }
        };

        Ok(EchoReply::interpret(raw))
    }

    pub fn run<R>(mut self, range: &AddressRange, reporter: &mut R) -> SweepSummary
    where
        R: SweepReporter + ?Sized,
    {
        let span = info_span!("sweep", %range);
        let _guard = span.enter();

        reporter.on_start(range);

        let started = Instant::now();
        let mut summary = SweepSummary::default();

        for target in range.to_iter() {
            match self.probe(&target) {
                Ok(EchoReply::Alive { addr, rtt }) => {
                    summary.probed += 1;
                    summary.alive += 1;
                    reporter.on_alive(addr, rtt);
                }
                Ok(EchoReply::NoResponse) => {
                    summary.probed += 1;
                    trace!(%target, "no response");
                }
                Err(e) => {
                    summary.invalid += 1;
                    debug!("skipping target: {e}");
                    reporter.on_invalid_address(&target);
                }
            }
        }

        summary.elapsed = started.elapsed();
        self.shutdown();
        summary
    }

    pub fn shutdown(self) {
        drop(self.transport);
        debug!("transport released");
    }
}

/// Opens the raw ICMP transport, sweeps `range`, and releases the transport.
pub fn perform_sweep<R>(
    range: &AddressRange,
    cfg: SweepConfig,
    reporter: &mut R,
) -> Result<SweepSummary, SweepError>
where
    R: SweepReporter + ?Sized,
{
    let session = IcmpSession::open(&cfg)?;
    Ok(SweepEngine::new(session, cfg).run(range, reporter))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
