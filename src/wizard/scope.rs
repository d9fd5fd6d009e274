//! Subtree-scoped access to a wizard's step state

use super::error::WizardError;
use super::state::StepHandle;

/// Environment value handed to every wizard consumer.
///
/// A scope obtained from [`Wizard::scope`](super::Wizard::scope) carries that
/// wizard's handle; [`Scope::detached`] carries none, and any consumer
/// resolved from it fails with [`WizardError::OutsideProvider`].
#[derive(Debug, Clone, Default)]
pub struct Scope {
    wizard: Option<StepHandle>,
}

impl Scope {
    /// Scope outside of any wizard
    pub fn detached() -> Self {
        Self::default()
    }

    pub(crate) fn within(handle: StepHandle) -> Self {
        Self {
            wizard: Some(handle),
        }
    }

    /// Whether a wizard owns this scope
    pub fn is_attached(&self) -> bool {
        self.wizard.is_some()
    }

    /// Read/mutate handle for the enclosing wizard
    pub fn wizard(&self) -> Result<StepHandle, WizardError> {
        self.resolve("StepHandle")
    }

    pub(crate) fn resolve(&self, consumer: &'static str) -> Result<StepHandle, WizardError> {
        self.wizard
            .clone()
            .ok_or_else(|| WizardError::outside_provider(consumer))
    }
}
