use chrono::{DateTime, FixedOffset};

const SECONDS_PER_DAY: i64 = 86_400;

/// Jira renders offsets without a colon, e.g. `2024-01-01T23:00:00.000+0000`.
const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parses a tracker timestamp, accepting both the Jira wire format and
/// RFC 3339. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, JIRA_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// Whole days from `start` to `end`, floored toward negative infinity.
///
/// 23:00 to 01:00 the next day is 0; one hour *before* `start` is -1.
pub fn elapsed_days(start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> i64 {
    (*end - *start).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Parses both timestamps and returns the floored day difference, or `None`
/// if either side is unparseable.
pub fn elapsed_days_between(start: &str, end: &str) -> Option<i64> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    Some(elapsed_days(&start, &end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jira_format() {
        let ts = parse_timestamp("2024-01-01T23:00:00.000+0000").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-01T23:00:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_timestamp("2024-01-01T23:00:00Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-01T23:00:00+00:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_less_than_a_day_is_zero() {
        let days = elapsed_days_between("2024-01-01T23:00:00Z", "2024-01-02T01:00:00Z");
        assert_eq!(days, Some(0));
    }

    #[test]
    fn test_exact_day_boundary() {
        let days =
            elapsed_days_between("2024-01-01T23:00:00.000+0000", "2024-01-02T23:00:00.000+0000");
        assert_eq!(days, Some(1));
    }

    #[test]
    fn test_negative_difference_is_floored() {
        let days = elapsed_days_between("2024-01-02T01:00:00Z", "2024-01-02T00:00:00Z");
        assert_eq!(days, Some(-1));
    }

    #[test]
    fn test_offsets_are_normalized() {
        // 10:00+0200 is 08:00 UTC, so exactly three days later.
        let days =
            elapsed_days_between("2024-03-01T08:00:00.000+0000", "2024-03-04T10:00:00.000+0200");
        assert_eq!(days, Some(3));
    }

    #[test]
    fn test_unparseable_side_yields_none() {
        assert_eq!(elapsed_days_between("bad", "2024-01-02T00:00:00Z"), None);
        assert_eq!(elapsed_days_between("2024-01-02T00:00:00Z", "bad"), None);
    }
}
