use thiserror::Error;

/// Failures surfaced by the two remote services. Expected terminal states
/// ("no events found", a declined confirmation) are not errors; they are
/// reported as a non-success `Outcome`.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The text-generation service call failed or timed out.
    #[error("model request failed: {0}")]
    UpstreamModel(String),

    /// The model's response could not be parsed into the requested shape.
    #[error("model response did not match the requested schema: {0}")]
    SchemaViolation(String),

    /// The calendar service rejected or failed a request. Status 0 means the
    /// request never reached the service (transport failure or timeout).
    #[error("calendar request failed with status {status}: {message}")]
    CalendarApi { status: u16, message: String },
}
