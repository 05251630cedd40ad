//! End-to-end sweeps driven through a scripted transport.

#[cfg(test)]
mod sweep;
