//! Timestamp and payload formatting helpers

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};

/// Humanized "time ago" for an RFC-3339 timestamp. Unparseable input is
/// returned verbatim.
pub fn format_time_ago(timestamp: &str) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let elapsed = Utc::now().signed_duration_since(parsed.with_timezone(&Utc));

    let seconds = elapsed.num_seconds();
    if seconds < 0 {
        return timestamp.to_string();
    }
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }
    let days = elapsed.num_days();
    if days < 30 {
        return plural(days, "day");
    }
    if days < 365 {
        return plural(days / 30, "month");
    }
    plural(days / 365, "year")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// RFC-3339 timestamp rendered as `YYYY-MM-DD HH:MM UTC`, or verbatim when
/// it does not parse.
pub fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M UTC")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Long date for token expiries, e.g. "January 2, 2026".
pub fn format_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed.format("%B %-d, %Y").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Kubernetes kind of a base64-encoded manifest, or `"unknown"` when the
/// payload is empty, undecodable or has no kind.
pub fn extract_kind_from_base64(encoded: &str) -> String {
    if encoded.is_empty() {
        return "unknown".to_string();
    }
    let Ok(bytes) = STANDARD.decode(encoded) else {
        return "unknown".to_string();
    };
    let Ok(text) = String::from_utf8(bytes) else {
        return "unknown".to_string();
    };
    let Ok(doc) = serde_yaml::from_str::<serde_yaml::Value>(&text) else {
        return "unknown".to_string();
    };
    doc.get("kind")
        .and_then(|k| k.as_str())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_time_ago_buckets() {
        let now = Utc::now();
        let fmt = |d: Duration| (now - d).to_rfc3339();

        assert_eq!(format_time_ago(&fmt(Duration::seconds(10))), "just now");
        assert_eq!(format_time_ago(&fmt(Duration::minutes(5))), "5 minutes ago");
        assert_eq!(format_time_ago(&fmt(Duration::hours(1))), "1 hour ago");
        assert_eq!(format_time_ago(&fmt(Duration::days(3))), "3 days ago");
    }

    #[test]
    fn test_unparseable_timestamp_renders_verbatim() {
        assert_eq!(format_time_ago("yesterday"), "yesterday");
        assert_eq!(format_timestamp("not-a-date"), "not-a-date");
    }

    #[test]
    fn test_extract_kind() {
        let encoded = STANDARD.encode("apiVersion: v1\nkind: ConfigMap\n");
        assert_eq!(extract_kind_from_base64(&encoded), "ConfigMap");
    }

    #[test]
    fn test_extract_kind_fallbacks() {
        assert_eq!(extract_kind_from_base64(""), "unknown");
        assert_eq!(extract_kind_from_base64("%%%"), "unknown");
        let no_kind = STANDARD.encode("apiVersion: v1\n");
        assert_eq!(extract_kind_from_base64(&no_kind), "unknown");
    }
}
