use chrono::Local;
use tracing::{error, info, warn};

use crate::handlers::list;
use crate::models::event::EventChanges;
use crate::models::outcome::Outcome;
use crate::service::model_service::parse_extraction;
use crate::service::prompts::ExtractionTask;
use crate::session::Session;

/// Modify the single event matching a free-text description. Exactly one
/// match is required: zero and several matches are both non-success terminal
/// outcomes, and no patch call is made in either case. With the target
/// located, the model receives the current event state and returns only the
/// fields to change; the patch body carries nothing else.
pub async fn modify_event(session: &Session, description: &str) -> Outcome {
    info!("modifying an existing calendar event");

    let events = match list::search_events(session, description).await {
        Ok(events) => events,
        Err(err) => {
            error!("event search failed: {}", err);
            return Outcome::failure(format!("An error occurred: {}", err));
        }
    };

    let event = match events.as_slice() {
        [] => {
            warn!("no events matched the description");
            return Outcome::failure(format!(
                "No events found for the description '{}'",
                description
            ));
        }
        [event] => event,
        _ => {
            warn!(matches = events.len(), "description matched several events");
            return Outcome::failure(format!(
                "Multiple events found for the description '{}'. Please make the description more specific.",
                description
            ));
        }
    };
    info!(target = %event.describe(), "event to modify");

    let today = Local::now().date_naive();
    let current_event = match serde_json::to_value(event) {
        Ok(value) => value,
        Err(err) => return Outcome::failure(format!("An error occurred: {}", err)),
    };
    let value = match session
        .model
        .extract(
            &ExtractionTask::EventChanges {
                today,
                current_event,
            },
            description,
        )
        .await
    {
        Ok(value) => value,
        Err(err) => {
            error!("change extraction failed: {}", err);
            return Outcome::failure(format!("An error occurred: {}", err));
        }
    };
    let changes: EventChanges = match parse_extraction(value) {
        Ok(changes) => changes,
        Err(err) => {
            error!("change extraction failed: {}", err);
            return Outcome::failure(format!("An error occurred: {}", err));
        }
    };

    match session
        .calendar
        .patch(&session.calendar_id, &event.id, &changes)
        .await
    {
        Ok(updated) => {
            info!(event_id = %updated.id, "event modified");
            Outcome::success(format!("{} modified", event.describe()), updated.html_link)
        }
        Err(err) => {
            error!(event_id = %event.id, "patch failed: {}", err);
            Outcome::failure(format!(
                "An error occurred while modifying the event ({}): {}",
                event.id, err
            ))
        }
    }
}
