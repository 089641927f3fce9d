use async_trait::async_trait;

use crate::clients::calendar_client;
use crate::error::AgentError;
use crate::models::event::{CalendarEvent, EventChanges, EventDraft, ListFilter};

/// Seam to the calendar service: the four verbs the agent needs. All calls
/// require the pre-authenticated credential handle the service was built
/// with; none retries.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<CalendarEvent>, AgentError>;
    async fn insert(
        &self,
        calendar_id: &str,
        draft: &EventDraft,
    ) -> Result<CalendarEvent, AgentError>;
    async fn patch(
        &self,
        calendar_id: &str,
        event_id: &str,
        changes: &EventChanges,
    ) -> Result<CalendarEvent, AgentError>;
    async fn delete(&self, calendar_id: &str, event_id: &str) -> Result<(), AgentError>;
}

/// Google Calendar v3 over REST. `token` is an opaque, externally obtained
/// bearer token; it is passed through unchanged and never inspected.
pub struct GoogleCalendarService {
    token: String,
}

impl GoogleCalendarService {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}

#[async_trait]
impl CalendarApi for GoogleCalendarService {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<CalendarEvent>, AgentError> {
        calendar_client::list_events(&self.token, filter).await
    }

    async fn insert(
        &self,
        calendar_id: &str,
        draft: &EventDraft,
    ) -> Result<CalendarEvent, AgentError> {
        calendar_client::insert_event(&self.token, calendar_id, draft).await
    }

    async fn patch(
        &self,
        calendar_id: &str,
        event_id: &str,
        changes: &EventChanges,
    ) -> Result<CalendarEvent, AgentError> {
        calendar_client::patch_event(&self.token, calendar_id, event_id, changes).await
    }

    async fn delete(&self, calendar_id: &str, event_id: &str) -> Result<(), AgentError> {
        calendar_client::delete_event(&self.token, calendar_id, event_id).await
    }
}
