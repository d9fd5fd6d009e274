//! Previous/next navigation triggers

use std::fmt;
use std::rc::Rc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::error::WizardError;
use super::scope::Scope;
use super::state::StepHandle;

/// Called with the current position before a trigger navigates.
/// The return value is not consulted: navigation always proceeds.
pub type Interceptor = Rc<dyn Fn(usize)>;

/// Custom trigger renderer
pub type TriggerRenderer = Box<dyn Fn(&TriggerProps) -> Line<'static>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Previous,
    Next,
}

/// What a click on the trigger row did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerClick {
    /// A default trigger was pressed
    Pressed(TriggerKind),
    /// A custom-rendered trigger was hit; no action was taken
    Overridden(TriggerKind),
}

/// The default action of one trigger, handed to custom renderers
#[derive(Clone)]
pub struct Trigger {
    kind: TriggerKind,
    handle: StepHandle,
    intercept: Option<Interceptor>,
}

impl Trigger {
    pub fn kind(&self) -> TriggerKind {
        self.kind
    }

    /// Run the interceptor, then navigate. Does not check disablement;
    /// `previous()`/`next()` are already no-ops at the boundaries.
    pub fn fire(&self) {
        let current = self.handle.active_position();
        if let Some(intercept) = &self.intercept {
            intercept(current);
        }
        match self.kind {
            TriggerKind::Previous => self.handle.previous(),
            TriggerKind::Next => self.handle.next(),
        }
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("kind", &self.kind)
            .field("has_intercept", &self.intercept.is_some())
            .finish()
    }
}

/// Props passed to custom trigger renderers
#[derive(Debug, Clone)]
pub struct TriggerProps {
    pub trigger: Trigger,
    pub is_disabled: bool,
    pub is_last_position: bool,
    pub current_position: usize,
}

/// Previous/next controls bound to one wizard
pub struct NavControls {
    handle: StepHandle,
    render_previous: Option<TriggerRenderer>,
    render_next: Option<TriggerRenderer>,
    on_previous: Option<Interceptor>,
    on_next: Option<Interceptor>,
    style: Style,
    /// Click targets from the last render
    previous_area: Option<Rect>,
    next_area: Option<Rect>,
}

impl NavControls {
    pub fn new(scope: &Scope) -> Result<Self, WizardError> {
        let handle = scope.resolve("NavControls")?;
        Ok(Self {
            handle,
            render_previous: None,
            render_next: None,
            on_previous: None,
            on_next: None,
            style: Style::default(),
            previous_area: None,
            next_area: None,
        })
    }

    pub fn render_previous(
        mut self,
        render: impl Fn(&TriggerProps) -> Line<'static> + 'static,
    ) -> Self {
        self.render_previous = Some(Box::new(render));
        self
    }

    pub fn render_next(
        mut self,
        render: impl Fn(&TriggerProps) -> Line<'static> + 'static,
    ) -> Self {
        self.render_next = Some(Box::new(render));
        self
    }

    pub fn on_previous(mut self, intercept: impl Fn(usize) + 'static) -> Self {
        self.on_previous = Some(Rc::new(intercept));
        self
    }

    pub fn on_next(mut self, intercept: impl Fn(usize) + 'static) -> Self {
        self.on_next = Some(Rc::new(intercept));
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn previous_disabled(&self) -> bool {
        self.handle.is_first()
    }

    pub fn next_disabled(&self) -> bool {
        self.handle.is_last()
    }

    /// "Finish" on the last step, "Next" otherwise
    pub fn next_label(&self) -> &'static str {
        if self.handle.is_last() {
            "Finish"
        } else {
            "Next"
        }
    }

    pub fn trigger(&self, kind: TriggerKind) -> Trigger {
        let intercept = match kind {
            TriggerKind::Previous => self.on_previous.clone(),
            TriggerKind::Next => self.on_next.clone(),
        };
        Trigger {
            kind,
            handle: self.handle.clone(),
            intercept,
        }
    }

    pub fn trigger_props(&self, kind: TriggerKind) -> TriggerProps {
        let is_disabled = match kind {
            TriggerKind::Previous => self.previous_disabled(),
            TriggerKind::Next => self.next_disabled(),
        };
        TriggerProps {
            trigger: self.trigger(kind),
            is_disabled,
            is_last_position: self.handle.is_last(),
            current_position: self.handle.active_position(),
        }
    }

    /// Press the previous trigger. Disabled triggers do nothing.
    pub fn press_previous(&self) {
        if self.previous_disabled() {
            return;
        }
        self.trigger(TriggerKind::Previous).fire();
    }

    /// Press the next trigger. Disabled triggers do nothing.
    pub fn press_next(&self) {
        if self.next_disabled() {
            return;
        }
        self.trigger(TriggerKind::Next).fire();
    }

    fn is_overridden(&self, kind: TriggerKind) -> bool {
        match kind {
            TriggerKind::Previous => self.render_previous.is_some(),
            TriggerKind::Next => self.render_next.is_some(),
        }
    }

    /// Handle a left click on the trigger row.
    ///
    /// Default triggers are pressed. A trigger with a custom renderer is only
    /// reported: its owner decides whether to call `trigger_props(kind)
    /// .trigger.fire()`.
    pub fn handle_mouse(&self, mouse: MouseEvent) -> Option<TriggerClick> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return None;
        }
        let point = Position::new(mouse.column, mouse.row);
        let kind = if self.previous_area.is_some_and(|a| a.contains(point)) {
            TriggerKind::Previous
        } else if self.next_area.is_some_and(|a| a.contains(point)) {
            TriggerKind::Next
        } else {
            return None;
        };

        if self.is_overridden(kind) {
            tracing::debug!(?kind, "click on custom trigger left to its renderer");
            return Some(TriggerClick::Overridden(kind));
        }
        match kind {
            TriggerKind::Previous => self.press_previous(),
            TriggerKind::Next => self.press_next(),
        }
        Some(TriggerClick::Pressed(kind))
    }

    fn default_line(&self, props: &TriggerProps, kind: TriggerKind) -> Line<'static> {
        let style = if props.is_disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        };

        let text = match kind {
            TriggerKind::Previous => "◀ Back".to_string(),
            TriggerKind::Next if props.is_last_position => format!("{} ✓", self.next_label()),
            TriggerKind::Next => format!("{} ▶", self.next_label()),
        };
        Line::from(Span::styled(text, style))
    }

    fn line_for(&self, kind: TriggerKind) -> Line<'static> {
        let props = self.trigger_props(kind);
        let custom = match kind {
            TriggerKind::Previous => self.render_previous.as_ref(),
            TriggerKind::Next => self.render_next.as_ref(),
        };
        match custom {
            Some(render) => render(&props),
            None => self.default_line(&props, kind),
        }
    }

    /// Previous trigger on the left, next trigger on the right
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let previous = self.line_for(TriggerKind::Previous);
        let next = self.line_for(TriggerKind::Next);

        let previous_width = (previous.width() as u16).min(chunks[0].width);
        let next_width = (next.width() as u16).min(chunks[1].width);
        let previous_area = Rect::new(chunks[0].x, chunks[0].y, previous_width, chunks[0].height);
        let next_area = Rect::new(
            chunks[1].right() - next_width,
            chunks[1].y,
            next_width,
            chunks[1].height,
        );

        frame.render_widget(Paragraph::new(previous).style(self.style), previous_area);
        frame.render_widget(
            Paragraph::new(next)
                .style(self.style)
                .alignment(Alignment::Right),
            next_area,
        );

        self.previous_area = Some(previous_area);
        self.next_area = Some(next_area);
    }
}

impl fmt::Debug for NavControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavControls")
            .field("has_on_previous", &self.on_previous.is_some())
            .field("has_on_next", &self.on_next.is_some())
            .finish_non_exhaustive()
    }
}
