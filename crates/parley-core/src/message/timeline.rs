//! Rendering helpers for message lists.
//!
//! All helpers take `now` explicitly and work in the time zone of `now`, so a
//! terminal can pass `Local::now()` and tests can pass a fixed UTC instant.

use std::fmt::Display;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use super::model::Message;

/// "Just now", "5m ago", "3h ago", "2d ago", then a short date.
pub fn format_relative_time<Tz>(timestamp: &DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = timestamp.with_timezone(&now.timezone());
    let elapsed = now.clone().signed_duration_since(local.clone());

    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else if local.year() != now.year() {
        local.format("%b %-d, %Y").to_string()
    } else {
        local.format("%b %-d").to_string()
    }
}

/// "Today", "Yesterday", or a long date such as "Friday, March 8".
pub fn date_separator_label<Tz>(timestamp: &DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = timestamp.with_timezone(&now.timezone());
    let day = local.date_naive();
    let today = now.date_naive();

    if day == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(day) {
        "Yesterday".to_string()
    } else if local.year() != now.year() {
        local.format("%A, %B %-d, %Y").to_string()
    } else {
        local.format("%A, %B %-d").to_string()
    }
}

/// True when both timestamps are present and fall on different calendar
/// days in `tz`.
pub fn is_different_day<Tz: TimeZone>(
    a: Option<&DateTime<Utc>>,
    b: Option<&DateTime<Utc>>,
    tz: &Tz,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            a.with_timezone(tz).date_naive() != b.with_timezone(tz).date_naive()
        }
        _ => false,
    }
}

/// A run of consecutive messages rendered under one separator.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<'a> {
    /// `None` when the run starts with a message that has no timestamp.
    pub label: Option<String>,
    pub day: Option<NaiveDate>,
    pub messages: Vec<&'a Message>,
}

/// Splits `messages` into runs, starting a new run whenever a timestamped
/// message lands on a different day than the previous timestamped one.
/// Messages without a timestamp stay in the current run.
pub fn group_by_day<'a, Tz>(messages: &'a [Message], now: &DateTime<Tz>) -> Vec<DayGroup<'a>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let tz = now.timezone();
    let mut groups: Vec<DayGroup<'a>> = Vec::new();

    for message in messages {
        let day = message
            .created_at
            .as_ref()
            .map(|ts| ts.with_timezone(&tz).date_naive());

        let starts_group = match (groups.last(), day) {
            (None, _) => true,
            (Some(current), Some(day)) => current.day.is_some_and(|d| d != day),
            (Some(_), None) => false,
        };

        if starts_group {
            groups.push(DayGroup {
                label: message
                    .created_at
                    .as_ref()
                    .map(|ts| date_separator_label(ts, now)),
                day,
                messages: vec![message],
            });
        } else if let Some(current) = groups.last_mut() {
            if current.day.is_none() && day.is_some() {
                current.day = day;
            }
            current.messages.push(message);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::demo_conversation;
    use chrono::TimeDelta;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = noon();
        assert_eq!(format_relative_time(&(now - TimeDelta::seconds(20)), &now), "Just now");
        assert_eq!(format_relative_time(&(now - TimeDelta::minutes(5)), &now), "5m ago");
        assert_eq!(format_relative_time(&(now - TimeDelta::hours(3)), &now), "3h ago");
        assert_eq!(format_relative_time(&(now - TimeDelta::days(2)), &now), "2d ago");
        assert_eq!(format_relative_time(&(now - TimeDelta::days(20)), &now), "Feb 19");
        assert_eq!(
            format_relative_time(&(now - TimeDelta::days(400)), &now),
            "Feb 4, 2023"
        );
    }

    #[test]
    fn test_future_timestamps_read_as_just_now() {
        let now = noon();
        assert_eq!(format_relative_time(&(now + TimeDelta::minutes(3)), &now), "Just now");
    }

    #[test]
    fn test_date_separator_labels() {
        let now = noon();
        assert_eq!(date_separator_label(&now, &now), "Today");
        assert_eq!(date_separator_label(&(now - TimeDelta::days(1)), &now), "Yesterday");
        assert_eq!(
            date_separator_label(&(now - TimeDelta::days(2)), &now),
            "Friday, March 8"
        );
        assert_eq!(
            date_separator_label(&(now - TimeDelta::days(366)), &now),
            "Friday, March 10, 2023"
        );
    }

    #[test]
    fn test_is_different_day_requires_both_timestamps() {
        let now = noon();
        let yesterday = now - TimeDelta::days(1);
        assert!(is_different_day(Some(&now), Some(&yesterday), &Utc));
        assert!(!is_different_day(Some(&now), None, &Utc));
    }

    #[test]
    fn test_group_demo_conversation_by_day() {
        let now = noon();
        let messages = demo_conversation(now);
        let groups = group_by_day(&messages, &now);

        let labels: Vec<_> = groups.iter().map(|g| g.label.clone().unwrap()).collect();
        assert_eq!(labels, vec!["Friday, March 8", "Yesterday", "Today"]);
        let sizes: Vec<_> = groups.iter().map(|g| g.messages.len()).collect();
        assert_eq!(sizes, vec![2, 2, 3]);
    }

    #[test]
    fn test_untimestamped_messages_join_current_group() {
        let now = noon();
        let mut messages = demo_conversation(now);
        messages[6].created_at = None;
        let groups = group_by_day(&messages, &now);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2].messages.len(), 3);
    }
}
