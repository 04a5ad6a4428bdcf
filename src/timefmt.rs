//! Timestamp parsing and the short "5m ago" style labels used in lists.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Parses server timestamps and `datetime-local` style input. Naive values are taken as UTC.
pub fn parse(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(ts, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn relative(ts: &str, now: DateTime<Utc>) -> String {
    parse(ts).map(|then| bucket(then, now)).unwrap_or_default()
}

/// Same labels for a unix timestamp, as stored in the local cache.
pub fn relative_secs(secs: i64, now: DateTime<Utc>) -> String {
    DateTime::from_timestamp(secs, 0).map(|then| bucket(then, now)).unwrap_or_default()
}

fn bucket(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 7 * 86_400 => format!("{}d ago", s / 86_400),
        _ => then.with_timezone(&Local).format("%d %b %Y").to_string(),
    }
}

/// Long form for event cards, e.g. "Sat, 01 Nov 2026 18:00".
pub fn event_label(ts: &str) -> String {
    match parse(ts) {
        Some(dt) => dt.with_timezone(&Local).format("%a, %d %b %Y %H:%M").to_string(),
        None => ts.to_string(),
    }
}

/// Clock time for chat bubbles.
pub fn clock(ts: &str) -> String {
    parse(ts).map(|dt| dt.with_timezone(&Local).format("%H:%M").to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn parses_server_and_form_formats() {
        let a = parse("2026-11-01T18:00:00Z").unwrap();
        let b = parse("2026-11-01T18:00").unwrap();
        let c = parse("2026-11-01T23:30:00+05:30").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert!(parse("").is_none());
        assert!(parse("next tuesday").is_none());
    }

    #[test]
    fn relative_buckets() {
        let now = parse("2026-10-17T12:00:00Z").unwrap();
        let ago = |d: Duration| (now - d).to_rfc3339();
        assert_eq!(relative(&ago(Duration::seconds(10)), now), "just now");
        assert_eq!(relative(&ago(Duration::minutes(5)), now), "5m ago");
        assert_eq!(relative(&ago(Duration::hours(3)), now), "3h ago");
        assert_eq!(relative(&ago(Duration::days(2)), now), "2d ago");
        assert_eq!(relative("garbage", now), "");
    }

    #[test]
    fn cache_stamps_use_the_same_labels() {
        let now = parse("2026-10-17T12:00:00Z").unwrap();
        assert_eq!(relative_secs(now.timestamp() - 120, now), "2m ago");
        assert_eq!(relative_secs(now.timestamp(), now), "just now");
    }
}
