use chrono::{DateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current time as whole seconds since the Unix epoch.
pub fn unix_timestamp() -> i64 {
    now().timestamp()
}
