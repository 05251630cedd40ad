use std::collections::TryReserveError;

use thiserror::Error;

/// Everything that can go wrong during a sweep.
///
/// Only [`SweepError::InvalidAddress`] is recoverable: the engine logs it and
/// moves on to the next suffix. The rest end the run with exit status 1.
/// A host that simply does not answer is not an error at all.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Uso: {program} BASE START END\nExemplo: {program} 192.168.1 1 254")]
    Usage { program: String },

    #[error("Erro ao criar handle ICMP: {0}")]
    TransportUnavailable(#[source] std::io::Error),

    #[error("Erro de memoria: {0}")]
    AllocationFailure(#[from] TryReserveError),

    #[error("IP invalido: {0}")]
    InvalidAddress(String),
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
