use chrono::{DateTime, Local, Utc};

// Get current local timestamp as a formatted string
pub fn current_local_timestamp_str(format_str: &str) -> String {
    let now: DateTime<Local> = Local::now();
    now.format(format_str).to_string()
}

// Current UNIX timestamp in whole seconds (snapshot filenames)
pub fn epoch_seconds() -> i64 {
    Utc::now().timestamp()
}

// Current UNIX timestamp in milliseconds (frame filenames)
pub fn epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}
