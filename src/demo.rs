//! Demo sign-up wizard used by the `stepwise` binary

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::config::WizardConfig;
use crate::ui::keybindings;
use crate::wizard::{
    KeyOutcome, NavControls, Step, StepIndicators, StepProps, StepStatus, Wizard, WizardError,
    WizardProps,
};

/// Result of handling one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    Continue,
    /// Quit without finishing
    Quit,
    /// Finish pressed on the last step
    Finish,
}

/// (identity, label, body lines)
const DEMO_STEPS: &[(&str, &str, &[&str])] = &[
    (
        "account",
        "Account",
        &[
            "Pick a username and a password.",
            "",
            "Usernames are public; passwords never leave this machine.",
        ],
    ),
    (
        "profile",
        "Profile",
        &[
            "Tell us a little about yourself.",
            "",
            "Display name, avatar and a short bio can all be changed later.",
        ],
    ),
    (
        "review",
        "Review",
        &[
            "Check everything before creating the account.",
            "",
            "Press n to finish, or p to go back and change something.",
        ],
    ),
];

/// Keep the last few lifecycle events for the status line
const ACTIVITY_LIMIT: usize = 8;

fn step_body(lines: &'static [&'static str], status: &StepStatus) -> Text<'static> {
    let mut text = vec![Line::from(Span::styled(
        format!("Step {}: {}", status.position + 1, status.label),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))];
    if status.is_completed {
        text.push(Line::from(Span::styled(
            "(already completed)",
            Style::default().fg(Color::Green),
        )));
    }
    text.push(Line::from(""));
    text.extend(lines.iter().map(|l| Line::from(*l)));
    Text::from(text)
}

fn push_activity(log: &Rc<RefCell<Vec<String>>>, entry: String) {
    let mut log = log.borrow_mut();
    log.push(entry);
    if log.len() > ACTIVITY_LIMIT {
        log.remove(0);
    }
}

/// A wizard with its three steps, indicators and navigation wired up
pub struct DemoWizard {
    wizard: Wizard,
    steps: Vec<Step>,
    indicators: StepIndicators,
    nav: NavControls,
    activity: Rc<RefCell<Vec<String>>>,
}

impl DemoWizard {
    pub fn new(config: &WizardConfig) -> Result<Self, WizardError> {
        let wizard = Wizard::new(
            WizardProps::default()
                .initial_position(config.initial_position)
                .title(config.title.clone())
                .on_step_change(|position| tracing::info!(position, "step changed")),
        );
        let scope = wizard.scope();
        let activity = Rc::new(RefCell::new(Vec::new()));

        let mut steps = Vec::with_capacity(DEMO_STEPS.len());
        for (position, &(identity, label, lines)) in DEMO_STEPS.iter().enumerate() {
            let enter_log = activity.clone();
            let exit_log = activity.clone();
            let props = StepProps::new(identity, position, label)
                .render(move |status| step_body(lines, status))
                .on_enter(move || push_activity(&enter_log, format!("entered {label}")))
                .on_exit(move || push_activity(&exit_log, format!("left {label}")));
            steps.push(Step::mount(&scope, props)?);
        }

        let indicators = StepIndicators::new(&scope)?.label("Sign-up progress");
        let back_log = activity.clone();
        let nav = NavControls::new(&scope)?
            .on_next(|p| tracing::debug!(position = p, "next pressed"))
            .on_previous(move |p| {
                push_activity(&back_log, format!("back from step {}", p + 1));
            });

        Ok(Self {
            wizard,
            steps,
            indicators,
            nav,
            activity,
        })
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn activity(&self) -> Vec<String> {
        self.activity.borrow().clone()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DemoAction {
        if self.indicators.handle_key(key) == KeyOutcome::Handled {
            return DemoAction::Continue;
        }

        match key.code {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                if self.nav.next_disabled() {
                    return DemoAction::Finish;
                }
                self.nav.press_next();
            }
            KeyCode::Char('p') | KeyCode::Char('P') => self.nav.press_previous(),
            KeyCode::Char('q') | KeyCode::Esc => return DemoAction::Quit,
            _ => {}
        }
        DemoAction::Continue
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> DemoAction {
        if self.indicators.handle_mouse(mouse) == KeyOutcome::Handled {
            return DemoAction::Continue;
        }
        self.nav.handle_mouse(mouse);
        DemoAction::Continue
    }

    /// One-line summary printed after the wizard closes
    pub fn summary(&self) -> String {
        let handle = self.wizard.handle();
        let completed = handle.completed();
        format!(
            "Finished on step {} of {} ({} completed)",
            handle.active_position() + 1,
            handle.total_steps(),
            completed.len()
        )
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(9), Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let layout = self.wizard.render(frame, chunks[0]);
        self.indicators.render(frame, layout.indicators);
        for step in &mut self.steps {
            step.render(frame, layout.content);
        }
        self.nav.render(frame, layout.navigation);

        frame.render_widget(Paragraph::new(keybindings::footer_line()), chunks[1]);

        if let Some(last) = self.activity.borrow().last() {
            let status = Line::from(Span::styled(
                last.clone(),
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(Paragraph::new(status), chunks[2]);
        }
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
