use serde::{Deserialize, Serialize};

/// First classification stage: is the text a calendar request at all?
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarCheck {
    pub description: String,
    pub is_calendar_event: bool,
    pub confidence_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    NewEvent,
    ModifyEvent,
    DeleteEvent,
    Other,
}

/// Second classification stage: which calendar verb the request asks for.
/// `description` is the event description with the action words stripped; it
/// is what the operation handlers receive.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestType {
    pub description: String,
    pub event_type: RequestKind,
    pub confidence_score: f64,
}
