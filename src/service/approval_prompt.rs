use async_trait::async_trait;
use inquire::Confirm;

/// Consulted with a preview of the matched events before anything is
/// deleted. Interactive shells plug in a real prompt; non-interactive
/// deployments default to always-confirmed.
#[async_trait]
pub trait ConfirmationPolicy: Send + Sync {
    async fn confirm_deletion(&self, preview: &[String]) -> bool;
}

/// Every deletion is treated as confirmed. Default for the HTTP shell and
/// for tests.
pub struct AutoConfirm;

#[async_trait]
impl ConfirmationPolicy for AutoConfirm {
    async fn confirm_deletion(&self, _preview: &[String]) -> bool {
        true
    }
}

/// Interactive console confirmation used by the CLI shell.
pub struct ConsoleConfirm;

#[async_trait]
impl ConfirmationPolicy for ConsoleConfirm {
    async fn confirm_deletion(&self, preview: &[String]) -> bool {
        println!("About to delete the following {} event(s):", preview.len());
        for line in preview {
            println!("{}", line);
        }
        Confirm::new("Are you sure you want to delete these events?")
            .with_default(false)
            .prompt()
            .unwrap_or(false)
    }
}
