use chrono::{DateTime, FixedOffset, Local};
use tracing::{debug, info};

use crate::error::AgentError;
use crate::models::event::{CalendarEvent, ListFilter};
use crate::service::model_service::parse_extraction;
use crate::service::prompts::ExtractionTask;
use crate::session::Session;

/// Translate free text into list-call parameters. The instruction carries
/// today's date so relative phrases resolve; when the model leaves the
/// calendar id empty, the session's calendar is used.
pub async fn derive_filter(
    session: &Session,
    description: &str,
) -> Result<ListFilter, AgentError> {
    let today = Local::now().date_naive();
    let value = session
        .model
        .extract(&ExtractionTask::ListParameters { today }, description)
        .await?;
    let mut filter: ListFilter = parse_extraction(value)?;
    if filter.calendar_id.is_empty() {
        filter.calendar_id = session.calendar_id.clone();
    }
    debug!(?filter, "events list parameters");
    Ok(filter)
}

/// The single "find events matching a description" primitive. Returns the
/// matched events in the order the calendar service produced them, unchanged;
/// the modify and delete handlers depend on that ordering.
pub async fn search_events(
    session: &Session,
    description: &str,
) -> Result<Vec<CalendarEvent>, AgentError> {
    search_events_in_range(session, description, None, None).await
}

/// Same search with an explicit date range. Explicit bounds win over
/// whatever window the model derived from the text.
pub async fn search_events_in_range(
    session: &Session,
    description: &str,
    time_min: Option<DateTime<FixedOffset>>,
    time_max: Option<DateTime<FixedOffset>>,
) -> Result<Vec<CalendarEvent>, AgentError> {
    let mut filter = derive_filter(session, description).await?;
    if time_min.is_some() {
        filter.time_min = time_min;
    }
    if time_max.is_some() {
        filter.time_max = time_max;
    }
    let events = session.calendar.list(&filter).await?;
    info!(matches = events.len(), "event search complete");
    Ok(events)
}
