use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Start or end of a Google Calendar event. Timed events carry `dateTime`
/// (RFC3339, with offset) and optionally an IANA `timeZone`; all-day events
/// carry `date` instead. An instant without a zone is ambiguous and left for
/// the caller to resolve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl EventDateTime {
    /// The IANA zone, if one is named and known to the tz database.
    pub fn iana_zone(&self) -> Option<Tz> {
        self.time_zone.as_deref()?.parse().ok()
    }

    /// Human-readable rendering for previews and outcome messages. The
    /// instant is shifted into the event's own zone when one resolves.
    pub fn describe(&self) -> String {
        if let Some(instant) = self.date_time {
            return match self.iana_zone() {
                Some(zone) => instant.with_timezone(&zone).to_rfc3339(),
                None => instant.to_rfc3339(),
            };
        }
        if let Some(date) = self.date {
            return format!("{} (all day)", date);
        }
        "unspecified time".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub email: String,
}

/// Fields describing an event prior to being persisted by the calendar
/// service. The model extracts this shape from free text; it is sent to the
/// insert call as-is. Missing required fields are not validated locally; the
/// calendar service's own rejection is the failure path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub summary: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(default)]
    pub recurrence: Vec<String>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}

/// The subset of event fields a modification touches. Absent means "leave
/// unchanged"; absent fields are omitted from the serialized body so the
/// patch call sends only the diff.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,
}

/// An event as returned by the calendar service, trimmed to the fields this
/// agent consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: EventDateTime,
    pub end: EventDateTime,
    pub recurrence: Vec<String>,
    pub attendees: Vec<Attendee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CalendarEvent {
    /// One-line rendering used in deletion previews and outcome messages.
    pub fn describe(&self) -> String {
        format!(
            "Event {}: {} from {} to {}",
            self.id,
            self.summary,
            self.start.describe(),
            self.end.describe()
        )
    }
}

/// Parameters for the calendar list call, extracted from free text by the
/// model. `time_min`/`time_max` bound the search window; `q` carries the text
/// expected to appear in the event summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListFilter {
    pub calendar_id: String,
    pub time_min: Option<DateTime<FixedOffset>>,
    pub time_max: Option<DateTime<FixedOffset>>,
    pub single_events: bool,
    pub order_by: Option<String>,
    pub q: Option<String>,
}
