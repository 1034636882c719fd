//! Exit codes for the CLI

/// The command finished and, for checks, the check passed
pub const SUCCESS: u8 = 0;
