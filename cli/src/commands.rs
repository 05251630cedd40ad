use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use pingsweep_common::{error::SweepError, network::range::AddressRange};

const DEFAULT_PROGRAM: &str = "pingsweep";

#[derive(Parser, Debug)]
#[command(name = "pingsweep", version)]
#[command(about = "Finds hosts answering ICMP echo in a /24 range.")]
#[command(override_usage = "pingsweep BASE START END")]
#[command(allow_negative_numbers = true)]
pub struct CommandLine {
    /// First three octets of the range, e.g. 192.168.1
    #[arg(allow_hyphen_values = true)]
    pub base: Option<String>,
    /// First host suffix to probe (raised to 1 if lower)
    #[arg(allow_hyphen_values = true)]
    pub start: Option<String>,
    /// Last host suffix to probe (lowered to 254 if higher)
    #[arg(allow_hyphen_values = true)]
    pub end: Option<String>,
    #[arg(hide = true)]
    pub extra: Vec<String>,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    /// Parses the process arguments. Help and version requests exit here;
    /// anything else clap rejects becomes a usage error.
    pub fn parse_args() -> Result<Self, SweepError> {
        match Self::try_parse() {
            Ok(cmd) => Ok(cmd),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(_) => Err(usage_error()),
        }
    }

    pub fn to_range(&self) -> Result<AddressRange, SweepError> {
        match (&self.base, &self.start, &self.end) {
            (Some(base), Some(start), Some(end)) => {
                Ok(AddressRange::new(base.as_str(), atoi(start), atoi(end)))
            }
            _ => Err(usage_error()),
        }
    }
}

fn usage_error() -> SweepError {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
    SweepError::Usage { program }
}

/// Integer parse with C `atoi` leniency: leading whitespace and an optional
/// sign, then as many decimal digits as are present. No digits yields 0 and
/// overflow saturates.
pub fn atoi(s: &str) -> i32 {
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let limit: i64 = i64::from(i32::MAX) + 1;
    let magnitude: i64 = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0, |acc, b| (acc * 10 + i64::from(b - b'0')).min(limit));

    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
