use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use calendarAgent::error::AgentError;
use calendarAgent::handlers::delete::delete_events;
use calendarAgent::models::event::{
    CalendarEvent, EventChanges, EventDateTime, EventDraft, ListFilter,
};
use calendarAgent::service::approval_prompt::{AutoConfirm, ConfirmationPolicy};
use calendarAgent::service::calendar_service::CalendarApi;
use calendarAgent::service::model_service::ModelClient;
use calendarAgent::service::prompts::ExtractionTask;
use calendarAgent::session::Session;

struct ScriptedModel {
    responses: StdMutex<VecDeque<Result<Value, AgentError>>>,
}

impl ScriptedModel {
    fn new(responses: Vec<Result<Value, AgentError>>) -> Self {
        Self {
            responses: StdMutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn extract(&self, _task: &ExtractionTask, _text: &str) -> Result<Value, AgentError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::UpstreamModel("script exhausted".to_string())))
    }
}

struct DeletingCalendar {
    list_response: Vec<CalendarEvent>,
    deletes: StdMutex<Vec<String>>,
    failing_ids: Vec<String>,
}

impl DeletingCalendar {
    fn with_matches(list_response: Vec<CalendarEvent>) -> Self {
        Self {
            list_response,
            deletes: StdMutex::new(Vec::new()),
            failing_ids: Vec::new(),
        }
    }
}

#[async_trait]
impl CalendarApi for DeletingCalendar {
    async fn list(&self, _filter: &ListFilter) -> Result<Vec<CalendarEvent>, AgentError> {
        Ok(self.list_response.clone())
    }

    async fn insert(
        &self,
        _calendar_id: &str,
        _draft: &EventDraft,
    ) -> Result<CalendarEvent, AgentError> {
        unreachable!("delete flow never inserts");
    }

    async fn patch(
        &self,
        _calendar_id: &str,
        _event_id: &str,
        _changes: &EventChanges,
    ) -> Result<CalendarEvent, AgentError> {
        unreachable!("delete flow never patches");
    }

    async fn delete(&self, _calendar_id: &str, event_id: &str) -> Result<(), AgentError> {
        self.deletes.lock().unwrap().push(event_id.to_string());
        if self.failing_ids.iter().any(|id| id == event_id) {
            return Err(AgentError::CalendarApi {
                status: 410,
                message: "Resource has been deleted".to_string(),
            });
        }
        Ok(())
    }
}

/// Declines every request and records that it was consulted.
struct DenyConfirm {
    consulted: StdMutex<Vec<usize>>,
}

#[async_trait]
impl ConfirmationPolicy for DenyConfirm {
    async fn confirm_deletion(&self, preview: &[String]) -> bool {
        self.consulted.lock().unwrap().push(preview.len());
        false
    }
}

fn event(id: &str, summary: &str, start: &str, end: &str) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        summary: summary.to_string(),
        start: EventDateTime {
            date_time: Some(start.parse().unwrap()),
            time_zone: None,
            date: None,
        },
        end: EventDateTime {
            date_time: Some(end.parse().unwrap()),
            time_zone: None,
            date: None,
        },
        ..CalendarEvent::default()
    }
}

fn two_future_meetings() -> Vec<CalendarEvent> {
    vec![
        event(
            "ev1",
            "Team meeting",
            "2024-06-11T14:00:00-04:00",
            "2024-06-11T15:00:00-04:00",
        ),
        event(
            "ev2",
            "Team meeting",
            "2024-06-12T14:00:00-04:00",
            "2024-06-12T15:00:00-04:00",
        ),
    ]
}

fn filter_params() -> Result<Value, AgentError> {
    Ok(json!({ "calendarId": "primary", "q": "meeting", "singleEvents": true }))
}

fn session(calendar: Arc<DeletingCalendar>) -> Session {
    Session {
        model: Arc::new(ScriptedModel::new(vec![filter_params()])),
        calendar,
        confirmation: Arc::new(AutoConfirm),
        calendar_id: "primary".to_string(),
        delete_all_matches: false,
    }
}

#[tokio::test]
async fn first_match_only_when_the_all_flag_is_unset() {
    // "Delete the meeting" with two matching future events deletes only the
    // first event the list call returned.
    let calendar = Arc::new(DeletingCalendar::with_matches(two_future_meetings()));
    let session = session(calendar.clone());

    let outcome = delete_events(&session, "the meeting", false).await;

    assert!(outcome.is_success());
    assert_eq!(*calendar.deletes.lock().unwrap(), vec!["ev1".to_string()]);
    assert_eq!(outcome.message().lines().count(), 1);
    assert!(outcome.message().contains("ev1"));
    assert!(outcome.message().contains("deleted"));
}

#[tokio::test]
async fn all_matches_are_attempted_and_failures_do_not_abort() {
    let mut calendar = DeletingCalendar::with_matches(vec![
        event(
            "ev1",
            "Standup",
            "2024-06-11T09:00:00-04:00",
            "2024-06-11T09:15:00-04:00",
        ),
        event(
            "ev2",
            "Standup",
            "2024-06-12T09:00:00-04:00",
            "2024-06-12T09:15:00-04:00",
        ),
        event(
            "ev3",
            "Standup",
            "2024-06-13T09:00:00-04:00",
            "2024-06-13T09:15:00-04:00",
        ),
    ]);
    calendar.failing_ids = vec!["ev2".to_string()];
    let calendar = Arc::new(calendar);
    let session = session(calendar.clone());

    let outcome = delete_events(&session, "all the standups", true).await;

    // The combined report is success-shaped even with one failed deletion.
    assert!(outcome.is_success());
    assert_eq!(calendar.deletes.lock().unwrap().len(), 3);

    let lines: Vec<&str> = outcome.message().lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("ev1") && lines[0].contains("deleted"));
    assert!(lines[1].contains("ev2") && lines[1].contains("deletion error"));
    assert!(lines[2].contains("ev3") && lines[2].contains("deleted"));
}

#[tokio::test]
async fn zero_matches_is_a_non_success_and_skips_confirmation() {
    let calendar = Arc::new(DeletingCalendar::with_matches(vec![]));
    let deny = Arc::new(DenyConfirm {
        consulted: StdMutex::new(Vec::new()),
    });
    let session = Session {
        model: Arc::new(ScriptedModel::new(vec![filter_params()])),
        calendar: calendar.clone(),
        confirmation: deny.clone(),
        calendar_id: "primary".to_string(),
        delete_all_matches: false,
    };

    let outcome = delete_events(&session, "the meeting", true).await;

    assert!(!outcome.is_success());
    assert!(outcome.message().contains("No events found"));
    assert!(calendar.deletes.lock().unwrap().is_empty());
    assert!(deny.consulted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn declined_confirmation_deletes_nothing() {
    let calendar = Arc::new(DeletingCalendar::with_matches(two_future_meetings()));
    let deny = Arc::new(DenyConfirm {
        consulted: StdMutex::new(Vec::new()),
    });
    let session = Session {
        model: Arc::new(ScriptedModel::new(vec![filter_params()])),
        calendar: calendar.clone(),
        confirmation: deny.clone(),
        calendar_id: "primary".to_string(),
        delete_all_matches: false,
    };

    let outcome = delete_events(&session, "the meeting", true).await;

    assert!(!outcome.is_success());
    assert!(outcome.message().contains("did not confirm"));
    assert!(calendar.deletes.lock().unwrap().is_empty());
    // The policy saw the full two-event preview before declining.
    assert_eq!(*deny.consulted.lock().unwrap(), vec![2]);
}

#[tokio::test]
async fn search_failure_is_surfaced_as_a_failure_outcome() {
    let calendar = Arc::new(DeletingCalendar::with_matches(vec![]));
    let session = Session {
        model: Arc::new(ScriptedModel::new(vec![Err(AgentError::UpstreamModel(
            "service unavailable".to_string(),
        ))])),
        calendar: calendar.clone(),
        confirmation: Arc::new(AutoConfirm),
        calendar_id: "primary".to_string(),
        delete_all_matches: false,
    };

    let outcome = delete_events(&session, "the meeting", false).await;

    assert!(!outcome.is_success());
    assert!(outcome.message().contains("service unavailable"));
    assert!(calendar.deletes.lock().unwrap().is_empty());
}
