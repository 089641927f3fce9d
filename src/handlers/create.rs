use chrono::Local;
use tracing::{error, info};

use crate::models::event::EventDraft;
use crate::models::outcome::Outcome;
use crate::service::model_service::parse_extraction;
use crate::service::prompts::ExtractionTask;
use crate::session::Session;

/// Create a new calendar event from its free-text description. Required
/// fields are not validated locally; an incomplete draft fails at the insert
/// call and that rejection is the reported failure.
pub async fn create_event(session: &Session, description: &str) -> Outcome {
    info!("creating a new calendar event");

    let today = Local::now().date_naive();
    let value = match session
        .model
        .extract(&ExtractionTask::NewEvent { today }, description)
        .await
    {
        Ok(value) => value,
        Err(err) => {
            error!("event extraction failed: {}", err);
            return Outcome::failure(format!("An error occurred: {}", err));
        }
    };
    let draft: EventDraft = match parse_extraction(value) {
        Ok(draft) => draft,
        Err(err) => {
            error!("event extraction failed: {}", err);
            return Outcome::failure(format!("An error occurred: {}", err));
        }
    };
    info!(summary = %draft.summary, start = %draft.start.describe(), "new calendar event");

    let created = match session.calendar.insert(&session.calendar_id, &draft).await {
        Ok(event) => event,
        Err(err) => {
            error!("insert failed: {}", err);
            return Outcome::failure(format!("An error occurred: {}", err));
        }
    };

    let mut message = format!(
        "New calendar event '{}' created for {}",
        draft.summary,
        draft.start.describe()
    );
    if !draft.attendees.is_empty() {
        let emails: Vec<&str> = draft.attendees.iter().map(|a| a.email.as_str()).collect();
        message.push_str(&format!(" with {}", emails.join(", ")));
    }
    Outcome::success(message, created.html_link)
}
