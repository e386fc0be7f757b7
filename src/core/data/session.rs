use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier and wall-clock bracket of one report run.
///
/// Timestamps are milliseconds since the Unix epoch. `dump` is the end of
/// the run, named after the report attribute it is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: String,
    pub start: u64,
    pub dump: u64,
}

impl SessionInfo {
    pub fn new(id: impl Into<String>, start: u64, dump: u64) -> Self {
        Self {
            id: id.into(),
            start,
            dump,
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
