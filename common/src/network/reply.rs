use std::net::Ipv4Addr;
use std::time::Duration;

/// What the network said about one echo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    /// An echo reply came back from the target itself.
    Success,
    /// A router reported the target unreachable, carrying the ICMP code.
    DestinationUnreachable(u8),
    /// The request expired in transit, carrying the ICMP code.
    TimeExceeded(u8),
    /// Any other ICMP type that referenced our request.
    Other(u8),
}

impl ReplyStatus {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// The first reply a transport matched to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawReply {
    pub source: Ipv4Addr,
    pub status: ReplyStatus,
    pub round_trip: Duration,
}

/// Outcome of one probe, as reported to the operator.
///
/// The reason a host stayed silent is deliberately not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoReply {
    NoResponse,
    Alive { addr: Ipv4Addr, rtt: Duration },
}

impl EchoReply {
    pub fn interpret(raw: Option<RawReply>) -> Self {
        match raw {
            Some(reply) if reply.status.is_reachable() => Self::Alive {
                addr: reply.source,
                rtt: reply.round_trip,
            },
            _ => Self::NoResponse,
        }
    }
}
