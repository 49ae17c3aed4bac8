use std::time::Duration;

use crate::error::{ChapterlineError, Result};

const MAX_GROUPS: usize = 3;

/// Convert a colon-delimited timestamp (`SS`, `M:SS`, `H:MM:SS`) to a duration.
///
/// Groups are read right to left as seconds, minutes, hours. The trailing
/// group must be exactly two digits; timestamps with more than three groups
/// are rejected rather than truncated.
pub fn normalize(timestamp: &str) -> Result<Duration> {
    let groups: Vec<&str> = timestamp.split(':').collect();

    if groups.len() > MAX_GROUPS {
        return Err(ChapterlineError::malformed(
            timestamp,
            "more than three groups",
        ));
    }

    if groups
        .iter()
        .any(|g| g.is_empty() || !g.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(ChapterlineError::malformed(
            timestamp,
            "groups must be non-empty and numeric",
        ));
    }

    if groups.last().map(|g| g.len()) != Some(2) {
        return Err(ChapterlineError::malformed(
            timestamp,
            "seconds group must be two digits",
        ));
    }

    let mut seconds: u64 = 0;
    for (group, unit) in groups.iter().rev().zip([1u64, 60, 3600]) {
        let value: u64 = group
            .parse()
            .map_err(|_| ChapterlineError::malformed(timestamp, "group out of range"))?;
        seconds = value
            .checked_mul(unit)
            .and_then(|v| seconds.checked_add(v))
            .ok_or_else(|| ChapterlineError::malformed(timestamp, "group out of range"))?;
    }

    Ok(Duration::from_secs(seconds))
}
