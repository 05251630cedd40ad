//! ICMPv4 echo construction and reply matching.
//!
//! A raw ICMP socket sees every ICMP message addressed to this host, so
//! incoming packets are only attributed to a probe when they carry its
//! identifier and sequence number, either directly (echo reply) or inside
//! the quoted datagram of an error message.

use std::net::Ipv4Addr;

use anyhow::{Context, ensure};
use pingsweep_common::network::reply::ReplyStatus;
use pnet::packet::{
    Packet,
    icmp::{
        self, IcmpCode, IcmpPacket, IcmpType, IcmpTypes,
        echo_reply::EchoReplyPacket,
        echo_request::{EchoRequestPacket, MutableEchoRequestPacket},
    },
    ip::IpNextHeaderProtocols,
    ipv4::Ipv4Packet,
};

pub const ICMP_HEADER_LEN: usize = 8;

/// Bytes between the ICMP header and the quoted datagram of an error message.
const ERROR_UNUSED_LEN: usize = 4;

/// Identifier and sequence number pairing a request with its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoId {
    pub identifier: u16,
    pub sequence: u16,
}

pub fn echo_request_len(payload_len: usize) -> usize {
    ICMP_HEADER_LEN + payload_len
}

/// Writes an echo request into the front of `buf` and returns its length.
pub fn write_echo_request(buf: &mut [u8], id: EchoId, payload: &[u8]) -> anyhow::Result<usize> {
    let len = echo_request_len(payload.len());
    ensure!(
        buf.len() >= len,
        "buffer holds {} bytes, echo request needs {len}",
        buf.len()
    );

    let frame = &mut buf[..len];
    frame.fill(0);

    let mut request =
        MutableEchoRequestPacket::new(frame).context("failed to create echo request packet")?;
    request.set_icmp_type(IcmpTypes::EchoRequest);
    request.set_icmp_code(IcmpCode::new(0));
    request.set_identifier(id.identifier);
    request.set_sequence_number(id.sequence);
    request.set_payload(payload);

    let csum = icmp::checksum(
        &IcmpPacket::new(request.packet()).context("failed to create ICMP packet")?,
    );
    request.set_checksum(csum);

    Ok(len)
}

/// Decides whether `packet`, received from `source`, answers the probe `id`
/// sent to `target`.
pub fn classify(
    packet: &IcmpPacket,
    source: Ipv4Addr,
    target: Ipv4Addr,
    id: EchoId,
) -> Option<ReplyStatus> {
    let icmp_type: IcmpType = packet.get_icmp_type();
    let code: u8 = packet.get_icmp_code().0;

    match icmp_type {
        IcmpTypes::EchoReply => {
            let reply = EchoReplyPacket::new(packet.packet())?;
            let matches = source == target
                && reply.get_identifier() == id.identifier
                && reply.get_sequence_number() == id.sequence;
            matches.then_some(ReplyStatus::Success)
        }
        IcmpTypes::DestinationUnreachable if quotes_request(packet, target, id) => {
            Some(ReplyStatus::DestinationUnreachable(code))
        }
        IcmpTypes::TimeExceeded if quotes_request(packet, target, id) => {
            Some(ReplyStatus::TimeExceeded(code))
        }
        IcmpTypes::ParameterProblem | IcmpTypes::SourceQuench | IcmpTypes::RedirectMessage
            if quotes_request(packet, target, id) =>
        {
            Some(ReplyStatus::Other(icmp_type.0))
        }
        _ => None,
    }
}

fn quotes_request(packet: &IcmpPacket, target: Ipv4Addr, id: EchoId) -> bool {
    let Some(quoted) = packet.payload().get(ERROR_UNUSED_LEN..) else {
        return false;
    };
    let Some(ip) = Ipv4Packet::new(quoted) else {
        return false;
    };
    if ip.get_destination() != target
        || ip.get_next_level_protocol() != IpNextHeaderProtocols::Icmp
    {
        return false;
    }

    let header_len = usize::from(ip.get_header_length()) * 4;
    let Some(inner) = quoted.get(header_len..) else {
        return false;
    };

    EchoRequestPacket::new(inner).is_some_and(|request| {
        request.get_icmp_type() == IcmpTypes::EchoRequest
            && request.get_identifier() == id.identifier
            && request.get_sequence_number() == id.sequence
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
