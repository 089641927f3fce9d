use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::error::AgentError;
use crate::handlers::{create, delete, modify};
use crate::models::classify::RequestKind;
use crate::models::outcome::Outcome;
use crate::service::routing::{CONFIDENCE_GATE, RequestClassifier};
use crate::session::Session;

/// Process one calendar request from "received text" to a terminal Outcome,
/// or drop it. `Ok(None)` means the text was not understood as a calendar
/// request (not calendar-related, classified "other", or below the
/// confidence gate); no calendar call is made on that path. A classifier
/// failure propagates as `Err`; no default classification is synthesized.
pub async fn process_calendar_request(
    session: &Session,
    text: &str,
) -> Result<Option<Outcome>, AgentError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("calendar_request", %request_id);

    async {
        info!("processing calendar request");
        let classifier = RequestClassifier::new(session.model.clone());

        let check = classifier.check(text).await?;
        if !check.is_calendar_event || check.confidence_score <= CONFIDENCE_GATE {
            warn!("not a calendar request, dropping");
            return Ok(None);
        }

        let request = classifier.request_type(text).await?;
        if request.confidence_score <= CONFIDENCE_GATE {
            warn!("request type below the confidence gate, dropping");
            return Ok(None);
        }

        match request.event_type {
            RequestKind::NewEvent => {
                Ok(Some(create::create_event(session, &request.description).await))
            }
            RequestKind::ModifyEvent => {
                Ok(Some(modify::modify_event(session, &request.description).await))
            }
            RequestKind::DeleteEvent => Ok(Some(
                delete::delete_events(session, &request.description, session.delete_all_matches)
                    .await,
            )),
            RequestKind::Other => {
                warn!("calendar request type not supported, dropping");
                Ok(None)
            }
        }
    }
    .instrument(span)
    .await
}
