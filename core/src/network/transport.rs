use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};

use anyhow::Context;
use pingsweep_common::{config::SweepConfig, error::SweepError, network::reply::RawReply};
use pnet::{
    packet::{icmp::IcmpPacket, ip::IpNextHeaderProtocols},
    transport::{
        self, TransportChannelType, TransportProtocol, TransportReceiver, TransportSender,
    },
};
use tracing::{debug, trace, warn};

use crate::network::icmp::{self, EchoId};

/// Shortest wait handed to the socket. pnet turns sub-microsecond timeouts
/// into a zero `SO_RCVTIMEO`, which blocks without limit.
const MIN_WAIT: Duration = Duration::from_millis(1);

const CHANNEL_TYPE_ICMP: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv4(IpNextHeaderProtocols::Icmp));

/// One blocking request/reply exchange per call.
pub trait EchoTransport {
    /// Sends a single echo request to `dest` and waits at most `timeout` for
    /// the reply that matches it. `Ok(None)` means nothing matched in time.
    fn echo(
        &mut self,
        dest: Ipv4Addr,
        payload: &[u8],
        timeout: Duration,
    ) -> anyhow::Result<Option<RawReply>>;
}

/// A raw ICMPv4 channel plus the buffer echo requests are built in.
///
/// Dropping the session closes the socket; nothing else needs releasing.
pub struct IcmpSession {
    tx: TransportSender,
    rx: TransportReceiver,
    buffer: Vec<u8>,
    identifier: u16,
    sequence: u16,
}

impl IcmpSession {
    pub fn open(cfg: &SweepConfig) -> Result<Self, SweepError> {
        let (tx, rx) = transport::transport_channel(cfg.channel_buffer, CHANNEL_TYPE_ICMP)
            .map_err(|e| {
                if !is_root::is_root() {
                    warn!("Sockets ICMP brutos exigem root: execute com sudo ou conceda cap_net_raw");
                }
                SweepError::TransportUnavailable(e)
            })?;

        // tx and rx are dropped, closing the socket, if this fails
        let buffer = allocate_buffer(icmp::echo_request_len(cfg.payload.len()))?;

        let identifier: u16 = rand::random();
        debug!(identifier, "ICMP session opened");

        Ok(Self {
            tx,
            rx,
            buffer,
            identifier,
            sequence: 0,
        })
    }

    fn next_id(&mut self) -> EchoId {
        let id = EchoId {
            identifier: self.identifier,
            sequence: self.sequence,
        };
        self.sequence = self.sequence.wrapping_add(1);
        id
    }

    fn ensure_capacity(&mut self, len: usize) -> Result<(), SweepError> {
        if self.buffer.len() < len {
            self.buffer.try_reserve_exact(len - self.buffer.len())?;
            self.buffer.resize(len, 0);
        }
        Ok(())
    }
}

impl EchoTransport for IcmpSession {
    fn echo(
        &mut self,
        dest: Ipv4Addr,
        payload: &[u8],
        timeout: Duration,
    ) -> anyhow::Result<Option<RawReply>> {
        self.ensure_capacity(icmp::echo_request_len(payload.len()))?;
        let id = self.next_id();
        let len = icmp::write_echo_request(&mut self.buffer, id, payload)?;
        let request =
            IcmpPacket::new(&self.buffer[..len]).context("failed to view echo request")?;

        let sent_at = Instant::now();
        self.tx
            .send_to(request, IpAddr::V4(dest))
            .with_context(|| format!("sending echo request to {dest}"))?;
        trace!(%dest, sequence = id.sequence, "echo request sent");

        let deadline = sent_at + timeout;
        let mut packets = transport::icmp_packet_iter(&mut self.rx);

        loop {
            let Some(remaining) = wait_budget(deadline, Instant::now()) else {
                return Ok(None);
            };

            let Some((packet, source)) = packets.next_with_timeout(remaining)? else {
                return Ok(None);
            };
            let IpAddr::V4(source) = source else {
                continue;
            };

            if let Some(status) = icmp::classify(&packet, source, dest, id) {
                return Ok(Some(RawReply {
                    source,
                    status,
                    round_trip: sent_at.elapsed(),
                }));
            }
        }
    }
}

impl Drop for IcmpSession {
    fn drop(&mut self) {
        debug!(identifier = self.identifier, "ICMP session closed");
    }
}

/// Time left before `deadline`, or `None` once too little remains to wait on.
fn wait_budget(deadline: Instant, now: Instant) -> Option<Duration> {
    let remaining = deadline.saturating_duration_since(now);
    (remaining >= MIN_WAIT).then_some(remaining)
}

fn allocate_buffer(len: usize) -> Result<Vec<u8>, SweepError> {
    let mut buffer: Vec<u8> = Vec::new();
    buffer.try_reserve_exact(len)?;
    buffer.resize(len, 0);
    Ok(buffer)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
