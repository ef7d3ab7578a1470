//! Duration-string parsing for remapped connection parameters.
//!
//! The accepted grammar is a sequence of decimal counts with unit suffixes,
//! e.g. `10s`, `150ms`, `1.5h` or `1m30s`. Recognized units are `ns`, `us`,
//! `µs`, `ms`, `s`, `m` and `h`.

use std::time::Duration;

use crate::error::{DsnError, DsnResult};

const UNITS: &[(&str, f64)] = &[
    ("ns", 1e-9),
    ("us", 1e-6),
    ("µs", 1e-6),
    ("ms", 1e-3),
    ("s", 1.0),
    ("m", 60.0),
    ("h", 3600.0),
];

/// Parse a duration string such as `10s` or `1m30s`.
///
/// Fails with [`DsnError::InvalidDuration`] on an unknown unit, a missing
/// unit, a malformed count, or a total that does not fit in a [`Duration`].
pub fn parse_duration(value: &str) -> DsnResult<Duration> {
    let invalid = || DsnError::InvalidDuration {
        value: value.to_string(),
    };

    let s = value.trim();
    if s.is_empty() {
        return Err(invalid());
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut rest = s;
    let mut total = 0.0f64;
    while !rest.is_empty() {
        let tail = rest.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.');
        let digits = rest.len() - tail.len();
        if digits == 0 {
            return Err(invalid());
        }
        let count: f64 = rest[..digits].parse().map_err(|_| invalid())?;

        // Longest match wins so "ms" is not read as "m".
        let (unit, factor) = UNITS
            .iter()
            .filter(|(unit, _)| tail.starts_with(unit))
            .max_by_key(|(unit, _)| unit.len())
            .ok_or_else(invalid)?;

        total += count * factor;
        rest = &tail[unit.len()..];
    }

    // Checked conversion: a grammar-valid input can still sum past the range
    // of Duration, and that must be an error, not a panic.
    Duration::try_from_secs_f64(total).map_err(|_| invalid())
}
