use std::time::Duration;

/// How long a single probe waits for its reply.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(1_000);

/// Bytes carried in every echo request.
pub const ECHO_PAYLOAD: &[u8] = b"pingsweep";

/// Receive buffer handed to the raw ICMP channel.
pub const CHANNEL_BUFFER_SIZE: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Upper bound on the wait for one echo reply.
    ///
    /// Unresponsive hosts cost exactly this much, so a full /24 of silent
    /// addresses takes roughly `254 * timeout`.
    pub timeout: Duration,
    pub payload: Vec<u8>,
    pub channel_buffer: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            timeout: PROBE_TIMEOUT,
            payload: ECHO_PAYLOAD.to_vec(),
            channel_buffer: CHANNEL_BUFFER_SIZE,
        }
    }
}
