//! Shared model for the `pingsweep` workspace.
//!
//! * [`network`]: address ranges, probe targets and echo replies.
//! * [`error`]: the error taxonomy every crate reports through.
//! * [`config`]: sweep tunables.

pub mod config;
pub mod error;
pub mod network;
