//! Errors raised by wizard consumers

use thiserror::Error;

/// Errors specific to the wizard widget set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// A consumer asked for the shared step state from a scope that no
    /// `Wizard` owns. This is a usage error, not a runtime condition.
    #[error("{consumer} must be used within a Wizard")]
    OutsideProvider { consumer: &'static str },
}

impl WizardError {
    /// Create an outside-provider error for the named consumer
    pub fn outside_provider(consumer: &'static str) -> Self {
        WizardError::OutsideProvider { consumer }
    }

    /// Name of the consumer that triggered the error
    pub fn consumer(&self) -> &'static str {
        match self {
            WizardError::OutsideProvider { consumer } => consumer,
        }
    }
}
