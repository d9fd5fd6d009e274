//! Multi-step wizard widgets.
//!
//! A [`Wizard`] owns one shared step state. [`Step`]s, [`StepIndicators`] and
//! [`NavControls`] are created from the wizard's [`Scope`] and stay in sync
//! through it; none of them receive positions or step lists directly.

mod container;
mod error;
mod indicators;
mod navigation;
mod scope;
mod state;
mod step;

pub use container::{Wizard, WizardLayout, WizardProps};
pub use error::WizardError;
pub use indicators::{
    Activator, IndicatorRenderer, IndicatorStatus, KeyOutcome, StepIndicators, TabInfo,
    TabListInfo, DEFAULT_LIST_LABEL,
};
pub use navigation::{
    Interceptor, NavControls, Trigger, TriggerClick, TriggerKind, TriggerProps, TriggerRenderer,
};
pub use scope::Scope;
pub use state::{StepChangeCallback, StepDescriptor, StepHandle, StepState};
pub use step::{PanelInfo, Step, StepContent, StepProps, StepStatus};

#[cfg(test)]
mod tests;
