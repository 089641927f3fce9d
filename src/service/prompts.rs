use chrono::NaiveDate;
use serde_json::{Value, json};

/// One structured-extraction task. Each variant maps to a fixed instruction
/// string and a response schema the model service is asked to enforce; the
/// table keeps prompts and schemas testable in isolation from dispatch.
#[derive(Debug, Clone)]
pub enum ExtractionTask {
    /// Is the text a calendar request at all?
    CalendarCheck,
    /// Which of new_event / modify_event / delete_event / other?
    RequestKind,
    /// Full draft for a new event, with date context for relative phrases.
    NewEvent { today: NaiveDate },
    /// List-call parameters for finding events matching a description.
    ListParameters { today: NaiveDate },
    /// Only the fields to change on an existing event, given its current
    /// state so the model can compute diffs instead of regenerating.
    EventChanges { today: NaiveDate, current_event: Value },
}

fn date_context(today: NaiveDate) -> String {
    format!("Today is {}.", today.format("%A, %B %d, %Y"))
}

impl ExtractionTask {
    pub fn name(&self) -> &'static str {
        match self {
            ExtractionTask::CalendarCheck => "calendar_check",
            ExtractionTask::RequestKind => "request_kind",
            ExtractionTask::NewEvent { .. } => "new_event",
            ExtractionTask::ListParameters { .. } => "list_parameters",
            ExtractionTask::EventChanges { .. } => "event_changes",
        }
    }

    pub fn instruction(&self) -> String {
        match self {
            ExtractionTask::CalendarCheck => "You are a calendar event manager. \
                Determine if the incoming request is for a calendar event or not. \
                Return a boolean response along with a confidence score between 0 and 1."
                .to_string(),
            ExtractionTask::RequestKind => "You are a calendar event manager. \
                Determine if the incoming request is a calendar event request. \
                If so, determine the type of request: new_event, modify_event, delete_event, other. \
                In each case, extract the description of the event without the name of the action to take. \
                Return the type of the request along with a confidence score between 0 and 1."
                .to_string(),
            ExtractionTask::NewEvent { today } => format!(
                "You are a calendar event manager. \
                 {date_context} Create a new calendar event based on the description. \
                 Return ONLY these exact fields in JSON format:\n\
                 - summary: string\n\
                 - location: string\n\
                 - description: string\n\
                 - start: object with dateTime and timeZone\n\
                 - end: object with dateTime and timeZone\n\
                 - recurrence: array of strings\n\
                 - attendees: array of objects with email field\n\
                 Do not include any other fields or properties.",
                date_context = date_context(*today)
            ),
            ExtractionTask::ListParameters { today } => format!(
                "You are an expert Google calendar manager. \
                 {date_context} Build a JSON object to fetch the Google calendar events \
                 referenced to in the description. \
                 If no start date is specified then use today at 12:00 AM as timeMin. \
                 Do not create a default timeMax. Only populate timeMax if the description \
                 specifies an end date. \
                 The q field should contain the text from the description that would be in \
                 the summary of the Google calendar event. \
                 Return ONLY the relevant fields from the following list in JSON format:\n\
                 - calendarId: string\n\
                 - timeMin: datetime\n\
                 - timeMax: datetime\n\
                 - singleEvents: bool\n\
                 - orderBy: string\n\
                 - q: string\n\
                 Do not include any other fields or properties.",
                date_context = date_context(*today)
            ),
            ExtractionTask::EventChanges {
                today,
                current_event,
            } => format!(
                "You are a Google Calendar manager well versed in the Google Calendar API. \
                 The user is requesting a modification to an existing calendar event \
                 '{current_event}' given that the date context is '{date_context}'. \
                 Starting with the current calendar event, create a JSON object (whose fields \
                 are below) to modify the calendar event based on the description provided by \
                 the user. Update ONLY the fields that are to be modified. \
                 Return ONLY the fields that are to be modified in JSON format:\n\
                 - summary: string\n\
                 - location: string\n\
                 - description: string\n\
                 - start: object with dateTime and timeZone\n\
                 - end: object with dateTime and timeZone\n\
                 - recurrence: array of strings\n\
                 - attendees: array of objects with email field\n\
                 Do not include any other fields or properties.",
                current_event = current_event,
                date_context = date_context(*today)
            ),
        }
    }

    /// Schema the model service is asked to constrain its output to, in the
    /// generation API's OpenAPI-style shape. Shape enforcement is the remote
    /// service's job; no secondary validation happens locally.
    pub fn response_schema(&self) -> Value {
        let event_date_time = json!({
            "type": "OBJECT",
            "properties": {
                "dateTime": { "type": "STRING" },
                "timeZone": { "type": "STRING" }
            }
        });
        let attendees = json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": { "email": { "type": "STRING" } },
                "required": ["email"]
            }
        });

        match self {
            ExtractionTask::CalendarCheck => json!({
                "type": "OBJECT",
                "properties": {
                    "description": { "type": "STRING" },
                    "is_calendar_event": { "type": "BOOLEAN" },
                    "confidence_score": { "type": "NUMBER" }
                },
                "required": ["description", "is_calendar_event", "confidence_score"]
            }),
            ExtractionTask::RequestKind => json!({
                "type": "OBJECT",
                "properties": {
                    "description": { "type": "STRING" },
                    "event_type": {
                        "type": "STRING",
                        "enum": ["new_event", "modify_event", "delete_event", "other"]
                    },
                    "confidence_score": { "type": "NUMBER" }
                },
                "required": ["description", "event_type", "confidence_score"]
            }),
            ExtractionTask::NewEvent { .. } => json!({
                "type": "OBJECT",
                "properties": {
                    "summary": { "type": "STRING" },
                    "location": { "type": "STRING" },
                    "description": { "type": "STRING" },
                    "start": event_date_time,
                    "end": event_date_time,
                    "recurrence": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "attendees": attendees
                },
                "required": ["summary", "start", "end"]
            }),
            ExtractionTask::ListParameters { .. } => json!({
                "type": "OBJECT",
                "properties": {
                    "calendarId": { "type": "STRING" },
                    "timeMin": { "type": "STRING" },
                    "timeMax": { "type": "STRING" },
                    "singleEvents": { "type": "BOOLEAN" },
                    "orderBy": { "type": "STRING" },
                    "q": { "type": "STRING" }
                },
                "required": ["calendarId"]
            }),
            ExtractionTask::EventChanges { .. } => json!({
                "type": "OBJECT",
                "properties": {
                    "summary": { "type": "STRING" },
                    "location": { "type": "STRING" },
                    "description": { "type": "STRING" },
                    "start": event_date_time,
                    "end": event_date_time,
                    "recurrence": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "attendees": attendees
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn date_context_spells_out_the_weekday() {
        assert_eq!(date_context(fixed_today()), "Today is Monday, June 10, 2024.");
    }

    #[test]
    fn new_event_instruction_embeds_date_context() {
        let task = ExtractionTask::NewEvent {
            today: fixed_today(),
        };
        assert!(task.instruction().contains("Monday, June 10, 2024"));
    }

    #[test]
    fn list_parameters_instruction_pins_the_search_window_rules() {
        let task = ExtractionTask::ListParameters {
            today: fixed_today(),
        };
        let instruction = task.instruction();
        assert!(instruction.contains("use today at 12:00 AM as timeMin"));
        assert!(instruction.contains("Do not create a default timeMax"));
    }

    #[test]
    fn event_changes_instruction_embeds_the_current_event() {
        let task = ExtractionTask::EventChanges {
            today: fixed_today(),
            current_event: serde_json::json!({ "id": "abc123", "summary": "Team meeting" }),
        };
        let instruction = task.instruction();
        assert!(instruction.contains("abc123"));
        assert!(instruction.contains("Update ONLY the fields that are to be modified"));
    }

    #[test]
    fn classification_schemas_require_confidence() {
        for task in [ExtractionTask::CalendarCheck, ExtractionTask::RequestKind] {
            let schema = task.response_schema();
            let required: Vec<&str> = schema["required"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap())
                .collect();
            assert!(required.contains(&"confidence_score"));
        }
    }

    #[test]
    fn request_kind_schema_enumerates_all_kinds() {
        let schema = ExtractionTask::RequestKind.response_schema();
        let kinds = schema["properties"]["event_type"]["enum"].as_array().unwrap();
        assert_eq!(kinds.len(), 4);
    }

    #[test]
    fn event_changes_schema_requires_nothing() {
        let schema = ExtractionTask::EventChanges {
            today: fixed_today(),
            current_event: serde_json::json!({}),
        }
        .response_schema();
        assert!(schema.get("required").is_none());
    }
}
