use std::sync::Arc;

use crate::service::approval_prompt::ConfirmationPolicy;
use crate::service::calendar_service::CalendarApi;
use crate::service::model_service::ModelClient;

/// Per-user context threaded through every handler: the two remote clients,
/// the confirmation policy, and the calendar the user acts on. Nothing here
/// is global; serving several users means building several sessions.
pub struct Session {
    pub model: Arc<dyn ModelClient>,
    pub calendar: Arc<dyn CalendarApi>,
    pub confirmation: Arc<dyn ConfirmationPolicy>,
    pub calendar_id: String,
    /// Whether a delete request acts on every match or only the first.
    pub delete_all_matches: bool,
}
