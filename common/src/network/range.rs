use std::fmt;
use std::ops::RangeInclusive;

use crate::network::target::ProbeTarget;

/// Lowest host suffix ever probed (`.0` is the network address).
pub const MIN_SUFFIX: i32 = 1;
/// Highest host suffix ever probed (`.255` is the broadcast address).
pub const MAX_SUFFIX: i32 = 254;

/// A three-octet prefix and the inclusive span of last octets to sweep.
///
/// Construction never fails: out-of-bounds input is narrowed to
/// [`MIN_SUFFIX`]..=[`MAX_SUFFIX`]. A start past the end simply produces an
/// empty range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressRange {
    prefix: String,
    start: i32,
    end: i32,
}

impl AddressRange {
    pub fn new(prefix: impl Into<String>, start: i32, end: i32) -> Self {
        Self {
            prefix: prefix.into(),
            start: start.max(MIN_SUFFIX),
            end: end.min(MAX_SUFFIX),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn suffixes(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.end - self.start + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Every target in ascending suffix order.
    pub fn to_iter(&self) -> impl Iterator<Item = ProbeTarget> + '_ {
        self.suffixes()
            .map(|suffix| ProbeTarget::new(&self.prefix, suffix))
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}..{}", self.prefix, self.start, self.end)
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
