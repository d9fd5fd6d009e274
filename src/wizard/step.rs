//! Step unit: registers itself while mounted and renders only when active

use std::fmt;

use ratatui::{
    layout::Rect,
    text::Text,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::error::WizardError;
use super::scope::Scope;
use super::state::StepHandle;

/// Status record passed to render callbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepStatus {
    pub is_active: bool,
    pub is_completed: bool,
    pub position: usize,
    pub label: String,
}

/// Content of a step: fixed text, or a callback of the step status
pub enum StepContent {
    Static(Text<'static>),
    Render(Box<dyn Fn(&StepStatus) -> Text<'static>>),
}

impl StepContent {
    fn resolve(&self, status: &StepStatus) -> Text<'static> {
        match self {
            StepContent::Static(text) => text.clone(),
            StepContent::Render(render) => render(status),
        }
    }
}

impl fmt::Debug for StepContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepContent::Static(text) => f.debug_tuple("Static").field(text).finish(),
            StepContent::Render(_) => f.write_str("Render(..)"),
        }
    }
}

impl Default for StepContent {
    fn default() -> Self {
        StepContent::Static(Text::default())
    }
}

/// Construction options for a [`Step`]
#[derive(Default)]
pub struct StepProps {
    pub identity: String,
    pub position: usize,
    pub label: String,
    pub on_enter: Option<Box<dyn Fn()>>,
    pub on_exit: Option<Box<dyn Fn()>>,
    pub content: StepContent,
}

impl StepProps {
    pub fn new(identity: impl Into<String>, position: usize, label: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            position,
            label: label.into(),
            ..Self::default()
        }
    }

    /// Static content
    pub fn content(mut self, content: impl Into<Text<'static>>) -> Self {
        self.content = StepContent::Static(content.into());
        self
    }

    /// Content computed from the step status on every render
    pub fn render(mut self, render: impl Fn(&StepStatus) -> Text<'static> + 'static) -> Self {
        self.content = StepContent::Render(Box::new(render));
        self
    }

    pub fn on_enter(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_enter = Some(Box::new(callback));
        self
    }

    pub fn on_exit(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_exit = Some(Box::new(callback));
        self
    }
}

/// Accessibility record for the step's content panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelInfo {
    /// Panel id, referenced by the matching indicator
    pub id: String,
    /// Id of the indicator that labels this panel
    pub labelled_by: String,
}

pub(crate) fn tab_id(identity: &str) -> String {
    format!("step-tab-{identity}")
}

pub(crate) fn panel_id(identity: &str) -> String {
    format!("step-panel-{identity}")
}

/// A mounted step.
///
/// Registration happens in [`Step::mount`] with the identity, position and
/// label given there; dropping the step unregisters it.
pub struct Step {
    handle: StepHandle,
    identity: String,
    position: usize,
    label: String,
    on_enter: Option<Box<dyn Fn()>>,
    on_exit: Option<Box<dyn Fn()>>,
    content: StepContent,
    /// Activation seen by the last refresh
    was_active: bool,
    /// False when another step already held this identity at mount
    registered: bool,
}

impl Step {
    pub fn mount(scope: &Scope, props: StepProps) -> Result<Self, WizardError> {
        let handle = scope.resolve("Step")?;
        let registered =
            handle.register_step(props.identity.clone(), props.position, props.label.clone());

        Ok(Self {
            handle,
            identity: props.identity,
            position: props.position,
            label: props.label,
            on_enter: props.on_enter,
            on_exit: props.on_exit,
            content: props.content,
            was_active: false,
            registered,
        })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.handle.active_position() == self.position
    }

    pub fn status(&self) -> StepStatus {
        StepStatus {
            is_active: self.is_active(),
            is_completed: self.handle.is_completed(self.position),
            position: self.position,
            label: self.label.clone(),
        }
    }

    /// Fire `on_enter`/`on_exit` if activation changed since the last refresh
    pub fn refresh(&mut self) {
        let active = self.is_active();
        if active == self.was_active {
            return;
        }
        self.was_active = active;

        if active {
            tracing::debug!(identity = %self.identity, "entering step");
            if let Some(on_enter) = &self.on_enter {
                on_enter();
            }
        } else {
            tracing::debug!(identity = %self.identity, "leaving step");
            if let Some(on_exit) = &self.on_exit {
                on_exit();
            }
        }
    }

    /// Resolved content, or `None` while inactive
    pub fn content(&self) -> Option<Text<'static>> {
        let status = self.status();
        if !status.is_active {
            return None;
        }
        Some(self.content.resolve(&status))
    }

    pub fn panel(&self) -> PanelInfo {
        PanelInfo {
            id: panel_id(&self.identity),
            labelled_by: tab_id(&self.identity),
        }
    }

    /// Refresh lifecycle state, then draw the content if active.
    /// Inactive steps leave the area untouched.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.refresh();
        if let Some(text) = self.content() {
            let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
    }
}

impl Drop for Step {
    fn drop(&mut self) {
        // A duplicate never owned the registry entry, so it must not remove it
        if self.registered {
            self.handle.unregister_step(&self.identity);
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("identity", &self.identity)
            .field("position", &self.position)
            .field("label", &self.label)
            .field("content", &self.content)
            .field("was_active", &self.was_active)
            .finish_non_exhaustive()
    }
}
