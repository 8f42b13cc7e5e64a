//! Project-specific utilities live here.

use std::path::Path;

use time::OffsetDateTime;

/// Milliseconds since the Unix epoch.
pub fn unix_time_millis() -> i128 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}

/// `<millis>.<ext>`, keeping only the extension of the client-supplied name.
pub fn timestamped_file_name(original: &str, millis: i128) -> String {
    match Path::new(original).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}.{}", millis, ext),
        _ => millis.to_string(),
    }
}
