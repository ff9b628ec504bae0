//! Browser console logging through the `log` facade.

use log::{Level, SetLoggerError};

/// Unknown level names fall back to `info`
pub fn parse_level(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::Info)
}

pub fn init(level: &str) -> Result<(), SetLoggerError> {
    console_log::init_with_level(parse_level(level))
}
