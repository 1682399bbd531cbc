use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub mod health;
pub mod league;
pub mod schedule;
pub mod validation;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}

/// Parse an RFC 3339 timestamp coming from a client payload.
fn parse_timestamp(raw: &str) -> Result<SystemTime, time::error::Parse> {
    OffsetDateTime::parse(raw, &Rfc3339).map(SystemTime::from)
}
