//! Wizard container: owns the step state and frames its children

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};

use super::scope::Scope;
use super::state::{StepChangeCallback, StepHandle};

/// Construction options for a [`Wizard`]
pub struct WizardProps {
    /// Active position before any navigation
    pub initial_position: usize,
    /// Called with the new position after every navigation
    pub on_step_change: Option<StepChangeCallback>,
    /// Title drawn on the wrapping border
    pub title: Option<String>,
    /// Style of the wrapping region
    pub style: Style,
}

impl Default for WizardProps {
    fn default() -> Self {
        Self {
            initial_position: 0,
            on_step_change: None,
            title: None,
            style: Style::default().fg(Color::Cyan),
        }
    }
}

impl WizardProps {
    pub fn initial_position(mut self, position: usize) -> Self {
        self.initial_position = position;
        self
    }

    pub fn on_step_change(mut self, callback: impl Fn(usize) + 'static) -> Self {
        self.on_step_change = Some(Box::new(callback));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Regions of the wizard body, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardLayout {
    pub indicators: Rect,
    pub content: Rect,
    pub navigation: Rect,
}

/// Multi-step container. Owns exactly one step state for its subtree.
pub struct Wizard {
    handle: StepHandle,
    title: Option<String>,
    style: Style,
}

impl Wizard {
    pub fn new(props: WizardProps) -> Self {
        tracing::debug!(
            initial_position = props.initial_position,
            "creating wizard"
        );
        Self {
            handle: StepHandle::new(props.initial_position, props.on_step_change),
            title: props.title,
            style: props.style,
        }
    }

    /// Scope to hand to steps, indicators and navigation controls
    pub fn scope(&self) -> Scope {
        Scope::within(self.handle.clone())
    }

    pub fn handle(&self) -> &StepHandle {
        &self.handle
    }

    fn block(&self) -> Block<'_> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.style);
        if let Some(title) = &self.title {
            block = block.title(Line::from(vec![
                Span::raw(" "),
                Span::raw(title.as_str()),
                Span::raw(" "),
            ]));
        }
        block
    }

    /// Region inside the wrapping border
    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    /// Split the inner region into indicator row, content and navigation row
    pub fn layout(&self, area: Rect) -> WizardLayout {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Indicators
                Constraint::Length(1), // Spacer
                Constraint::Min(1),    // Step content
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Navigation
            ])
            .split(self.inner(area));

        WizardLayout {
            indicators: chunks[0],
            content: chunks[2],
            navigation: chunks[4],
        }
    }

    /// Draw the wrapping region and return the layout for children
    pub fn render(&self, frame: &mut Frame, area: Rect) -> WizardLayout {
        frame.render_widget(self.block(), area);
        self.layout(area)
    }
}
