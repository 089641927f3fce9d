use tracing::{error, info, warn};

use crate::handlers::list;
use crate::models::outcome::Outcome;
use crate::session::Session;

/// Delete the event(s) matching a free-text description. `delete_all` picks
/// between acting on every match and acting on the first match only, in the
/// order the calendar service returned them. Zero matches and a declined
/// confirmation are expected terminal states, reported as non-success
/// outcomes. In "delete all" mode one failed deletion does not abort the
/// rest; every per-event result lands in the combined message.
pub async fn delete_events(session: &Session, description: &str, delete_all: bool) -> Outcome {
    info!("deleting an existing calendar event");

    let events = match list::search_events(session, description).await {
        Ok(events) => events,
        Err(err) => {
            error!("event search failed: {}", err);
            return Outcome::failure(format!("An error occurred: {}", err));
        }
    };

    if events.is_empty() {
        warn!("no events matched the description");
        return Outcome::failure(format!(
            "No events found for the description '{}'",
            description
        ));
    }

    let preview: Vec<String> = events.iter().map(|event| event.describe()).collect();
    if !session.confirmation.confirm_deletion(&preview).await {
        return Outcome::failure("User did not confirm deletion of events");
    }

    let targets = if delete_all { &events[..] } else { &events[..1] };

    let mut lines = Vec::with_capacity(targets.len());
    for event in targets {
        match session
            .calendar
            .delete(&session.calendar_id, &event.id)
            .await
        {
            Ok(()) => {
                info!(event_id = %event.id, "event deleted");
                lines.push(format!("{} deleted", event.describe()));
            }
            Err(err) => {
                error!(event_id = %event.id, "deletion failed: {}", err);
                lines.push(format!("Event {}: deletion error {}", event.id, err));
            }
        }
    }

    Outcome::success(lines.join("\n"), None)
}
