use std::time::Duration;

use serde::Deserialize;

use crate::error::AgentError;
use crate::models::event::{CalendarEvent, EventChanges, EventDraft, ListFilter};

const CALENDAR_ENDPOINT: &str = "https://www.googleapis.com/calendar/v3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct EventsPage {
    #[serde(default)]
    items: Vec<CalendarEvent>,
}

fn http_client() -> Result<reqwest::Client, AgentError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(transport_error)
}

fn transport_error(err: reqwest::Error) -> AgentError {
    AgentError::CalendarApi {
        status: err.status().map(|s| s.as_u16()).unwrap_or(0),
        message: err.to_string(),
    }
}

async fn into_api_error(response: reqwest::Response) -> AgentError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    AgentError::CalendarApi { status, message }
}

/// Fetch the events matching `filter`, in the service's default ordering
/// (or the ordering `filter.order_by` asks for). The order of the returned
/// sequence is preserved as-is; "first match" semantics downstream depend on
/// it.
pub async fn list_events(
    token: &str,
    filter: &ListFilter,
) -> Result<Vec<CalendarEvent>, AgentError> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(time_min) = filter.time_min {
        query.push(("timeMin", time_min.to_rfc3339()));
    }
    if let Some(time_max) = filter.time_max {
        query.push(("timeMax", time_max.to_rfc3339()));
    }
    if filter.single_events {
        query.push(("singleEvents", "true".to_string()));
    }
    if let Some(order_by) = &filter.order_by {
        query.push(("orderBy", order_by.clone()));
    }
    if let Some(q) = &filter.q {
        query.push(("q", q.clone()));
    }

    let response = http_client()?
        .get(format!(
            "{}/calendars/{}/events",
            CALENDAR_ENDPOINT, filter.calendar_id
        ))
        .bearer_auth(token)
        .query(&query)
        .send()
        .await
        .map_err(transport_error)?;

    if !response.status().is_success() {
        return Err(into_api_error(response).await);
    }

    let page: EventsPage = response.json().await.map_err(transport_error)?;
    Ok(page.items)
}

pub async fn insert_event(
    token: &str,
    calendar_id: &str,
    draft: &EventDraft,
) -> Result<CalendarEvent, AgentError> {
    let response = http_client()?
        .post(format!(
            "{}/calendars/{}/events",
            CALENDAR_ENDPOINT, calendar_id
        ))
        .bearer_auth(token)
        .json(draft)
        .send()
        .await
        .map_err(transport_error)?;

    if !response.status().is_success() {
        return Err(into_api_error(response).await);
    }

    response.json().await.map_err(transport_error)
}

pub async fn patch_event(
    token: &str,
    calendar_id: &str,
    event_id: &str,
    changes: &EventChanges,
) -> Result<CalendarEvent, AgentError> {
    let response = http_client()?
        .patch(format!(
            "{}/calendars/{}/events/{}",
            CALENDAR_ENDPOINT, calendar_id, event_id
        ))
        .bearer_auth(token)
        .json(changes)
        .send()
        .await
        .map_err(transport_error)?;

    if !response.status().is_success() {
        return Err(into_api_error(response).await);
    }

    response.json().await.map_err(transport_error)
}

pub async fn delete_event(
    token: &str,
    calendar_id: &str,
    event_id: &str,
) -> Result<(), AgentError> {
    let response = http_client()?
        .delete(format!(
            "{}/calendars/{}/events/{}",
            CALENDAR_ENDPOINT, calendar_id, event_id
        ))
        .bearer_auth(token)
        .send()
        .await
        .map_err(transport_error)?;

    if !response.status().is_success() {
        return Err(into_api_error(response).await);
    }

    Ok(())
}
