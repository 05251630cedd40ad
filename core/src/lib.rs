//! Sweep engine for `pingsweep`.
//!
//! * [`network`]: ICMP wire format and the raw-socket transport.
//! * [`sweep`]: the sequential probe loop and its reporting seam.
//! * [`report`]: the line-oriented reporter used by the binary.

pub mod network;
pub mod report;
pub mod sweep;
