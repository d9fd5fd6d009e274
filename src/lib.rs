//! Stepwise - multi-step wizard widgets for ratatui
//!
//! The [`wizard`] module is the widget set. The remaining modules back the
//! `stepwise` demo binary.

pub mod app;
pub mod config;
pub mod demo;
pub mod logging;
pub mod ui;
pub mod wizard;

pub use wizard::{
    NavControls, Scope, Step, StepHandle, StepIndicators, StepProps, Wizard, WizardError,
    WizardProps,
};
