use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in seconds. A clock set before 1970 reads as 0.
#[must_use]
pub fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
