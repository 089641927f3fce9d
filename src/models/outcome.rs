use serde::Serialize;

/// Terminal value returned to the presentation layer. Never mutated after
/// construction. Distinct from a dropped request, which yields no Outcome at
/// all: `None` means "not understood as a calendar request", `Failure` means
/// "understood but execution failed".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    Failure {
        message: String,
    },
}

impl Outcome {
    pub fn success(message: impl Into<String>, link: Option<String>) -> Self {
        Outcome::Success {
            message: message.into(),
            link,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success { message, .. } | Outcome::Failure { message } => message,
        }
    }

    pub fn link(&self) -> Option<&str> {
        match self {
            Outcome::Success { link, .. } => link.as_deref(),
            Outcome::Failure { .. } => None,
        }
    }
}
