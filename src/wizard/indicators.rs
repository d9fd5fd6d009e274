//! Step indicator list: one selectable indicator per registered step.
//!
//! The list keeps keyboard focus separate from activation. Arrow keys,
//! `Home` and `End` only move focus; `Enter`/`Space` (or a click) activate the
//! focused indicator through [`StepHandle::navigate_to`]. Whenever the active
//! position changes, from any source, focus jumps to the newly active
//! indicator, which is also the only one with tab index 0.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::error::WizardError;
use super::scope::Scope;
use super::state::{StepDescriptor, StepHandle};
use super::step::{panel_id, tab_id};

/// Default accessible label of the tab list
pub const DEFAULT_LIST_LABEL: &str = "Wizard steps";

/// Gap between rendered indicators
const INDICATOR_GAP: u16 = 2;

/// Activates one indicator's step when invoked
#[derive(Clone)]
pub struct Activator {
    handle: StepHandle,
    position: usize,
}

impl Activator {
    pub fn activate(&self) {
        self.handle.navigate_to(self.position);
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Debug for Activator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activator")
            .field("position", &self.position)
            .finish()
    }
}

/// Per-item status handed to custom indicator renderers
#[derive(Debug, Clone)]
pub struct IndicatorStatus {
    pub is_active: bool,
    pub is_completed: bool,
    pub on_activate: Activator,
}

/// Custom per-item renderer
pub type IndicatorRenderer =
    Box<dyn Fn(&StepDescriptor, usize, &IndicatorStatus) -> Line<'static>>;

/// Whether a key was consumed by the indicator list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Consumed; the caller must not apply the key's default behaviour
    Handled,
    /// Not an indicator key; nothing changed
    Ignored,
}

/// Accessibility record for one indicator (tab role)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub id: String,
    pub selected: bool,
    /// Id of the panel this tab controls
    pub controls: String,
    pub tab_index: i32,
}

/// Accessibility record for the list (tablist role)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabListInfo {
    pub label: String,
    pub tabs: Vec<TabInfo>,
}

/// Indicator list bound to one wizard
pub struct StepIndicators {
    handle: StepHandle,
    render_item: Option<IndicatorRenderer>,
    label: String,
    style: Style,
    /// Index of the indicator holding keyboard focus
    focused: usize,
    /// Active position at the last focus sync
    observed_active: Option<usize>,
    /// Click targets from the last render, by index
    hit_areas: Vec<Rect>,
}

impl StepIndicators {
    pub fn new(scope: &Scope) -> Result<Self, WizardError> {
        let handle = scope.resolve("StepIndicators")?;
        Ok(Self {
            handle,
            render_item: None,
            label: DEFAULT_LIST_LABEL.to_string(),
            style: Style::default(),
            focused: 0,
            observed_active: None,
            hit_areas: Vec::new(),
        })
    }

    pub fn render_item(
        mut self,
        render: impl Fn(&StepDescriptor, usize, &IndicatorStatus) -> Line<'static> + 'static,
    ) -> Self {
        self.render_item = Some(Box::new(render));
        self
    }

    /// Accessible label of the list
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Move focus to the active indicator if activation changed since the
    /// last sync
    fn sync_focus(&mut self) {
        let active = self.handle.active_position();
        if self.observed_active != Some(active) {
            self.observed_active = Some(active);
            self.focused = active;
        }
    }

    pub fn focused(&mut self) -> usize {
        self.sync_focus();
        self.focused
    }

    /// 0 for the active indicator, -1 for the rest
    pub fn tab_index(&self, index: usize) -> i32 {
        if index == self.handle.active_position() {
            0
        } else {
            -1
        }
    }

    pub fn status(&self, index: usize) -> IndicatorStatus {
        IndicatorStatus {
            is_active: index == self.handle.active_position(),
            is_completed: self.handle.is_completed(index),
            on_activate: Activator {
                handle: self.handle.clone(),
                position: index,
            },
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        self.sync_focus();

        let total = self.handle.total_steps();
        if total == 0 {
            return KeyOutcome::Ignored;
        }
        let last = total - 1;
        let current = self.focused.min(last);

        match key.code {
            KeyCode::Right => self.focused = (current + 1).min(last),
            KeyCode::Left => self.focused = current.saturating_sub(1),
            KeyCode::Home => self.focused = 0,
            KeyCode::End => self.focused = last,
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.handle.navigate_to(current);
                self.sync_focus();
            }
            _ => return KeyOutcome::Ignored,
        }

        tracing::trace!(focused = self.focused, "indicator focus");
        KeyOutcome::Handled
    }

    /// Activate the indicator under a left click
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> KeyOutcome {
        self.sync_focus();
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return KeyOutcome::Ignored;
        }

        let point = Position::new(mouse.column, mouse.row);
        match self.hit_areas.iter().position(|area| area.contains(point)) {
            Some(index) => {
                self.handle.navigate_to(index);
                self.sync_focus();
                // Clicking the already active indicator still takes focus
                self.focused = index;
                KeyOutcome::Handled
            }
            None => KeyOutcome::Ignored,
        }
    }

    pub fn accessibility(&self) -> TabListInfo {
        let active = self.handle.active_position();
        let tabs = self
            .handle
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| TabInfo {
                id: tab_id(&step.identity),
                selected: index == active,
                controls: panel_id(&step.identity),
                tab_index: self.tab_index(index),
            })
            .collect();

        TabListInfo {
            label: self.label.clone(),
            tabs,
        }
    }

    fn default_item(
        step: &StepDescriptor,
        index: usize,
        status: &IndicatorStatus,
    ) -> Line<'static> {
        let badge = if status.is_completed {
            "✓".to_string()
        } else {
            (index + 1).to_string()
        };

        let (badge_style, label_style) = if status.is_active {
            (
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else if status.is_completed {
            (
                Style::default().fg(Color::Green),
                Style::default().fg(Color::Green),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::Gray),
            )
        };

        Line::from(vec![
            Span::styled(format!("[{badge}]"), badge_style),
            Span::raw(" "),
            Span::styled(step.label.clone(), label_style),
        ])
    }

    /// Draw one indicator per step, left to right in position order
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.sync_focus();
        self.hit_areas.clear();

        let mut x = area.x;
        for (index, step) in self.handle.steps().iter().enumerate() {
            let status = self.status(index);
            let mut line = match &self.render_item {
                Some(render) => render(step, index, &status),
                None => Self::default_item(step, index, &status),
            };
            if index == self.focused {
                line = line.patch_style(Style::default().add_modifier(Modifier::UNDERLINED));
            }

            let width = (line.width() as u16).min(area.right().saturating_sub(x));
            let item_area = Rect::new(x, area.y, width, area.height.min(1));
            frame.render_widget(Paragraph::new(line).style(self.style), item_area);
            self.hit_areas.push(item_area);

            x = x.saturating_add(width + INDICATOR_GAP).min(area.right());
        }
    }
}

impl fmt::Debug for StepIndicators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepIndicators")
            .field("label", &self.label)
            .field("focused", &self.focused)
            .field("observed_active", &self.observed_active)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{Wizard, WizardProps};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn wizard_with_steps(count: usize) -> Wizard {
        let wizard = Wizard::new(WizardProps::default());
        for i in 0..count {
            wizard
                .handle()
                .register_step(format!("s{i}"), i, format!("Step {}", i + 1));
        }
        wizard
    }

    fn render_row(indicators: &mut StepIndicators, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                indicators.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_new_outside_wizard_fails() {
        let err = StepIndicators::new(&Scope::detached()).unwrap_err();
        assert_eq!(err.consumer(), "StepIndicators");
    }

    #[test]
    fn test_arrow_keys_clamp_without_wrapping() {
        let wizard = wizard_with_steps(3);
        let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();

        assert_eq!(indicators.handle_key(key(KeyCode::Left)), KeyOutcome::Handled);
        assert_eq!(indicators.focused(), 0);

        indicators.handle_key(key(KeyCode::Right));
        indicators.handle_key(key(KeyCode::Right));
        indicators.handle_key(key(KeyCode::Right));
        assert_eq!(indicators.focused(), 2);
        assert_eq!(wizard.handle().active_position(), 0);
    }

    #[test]
    fn test_home_and_end() {
        let wizard = wizard_with_steps(4);
        let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();

        indicators.handle_key(key(KeyCode::End));
        assert_eq!(indicators.focused(), 3);
        indicators.handle_key(key(KeyCode::Home));
        assert_eq!(indicators.focused(), 0);
    }

    #[test]
    fn test_enter_and_space_activate_focused() {
        let wizard = wizard_with_steps(3);
        let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();

        indicators.handle_key(key(KeyCode::Right));
        indicators.handle_key(key(KeyCode::Enter));
        assert_eq!(wizard.handle().active_position(), 1);

        indicators.handle_key(key(KeyCode::Right));
        indicators.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(wizard.handle().active_position(), 2);

        let tabs = indicators.accessibility().tabs;
        let selected: Vec<bool> = tabs.iter().map(|t| t.selected).collect();
        assert_eq!(selected, vec![false, false, true]);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let wizard = wizard_with_steps(3);
        let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();

        assert_eq!(
            indicators.handle_key(key(KeyCode::Char('x'))),
            KeyOutcome::Ignored
        );
        assert_eq!(indicators.handle_key(key(KeyCode::Up)), KeyOutcome::Ignored);
        assert_eq!(indicators.focused(), 0);
    }

    #[test]
    fn test_no_steps_ignores_everything() {
        let wizard = wizard_with_steps(0);
        let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();
        assert_eq!(indicators.handle_key(key(KeyCode::End)), KeyOutcome::Ignored);
    }

    #[test]
    fn test_focus_follows_external_navigation() {
        let wizard = wizard_with_steps(3);
        let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();
        assert_eq!(indicators.focused(), 0);

        wizard.handle().next();
        assert_eq!(indicators.focused(), 1);

        wizard.handle().navigate_to(2);
        assert_eq!(indicators.focused(), 2);
    }

    #[test]
    fn test_roving_tab_index() {
        let wizard = wizard_with_steps(3);
        wizard.handle().navigate_to(1);
        let indicators = StepIndicators::new(&wizard.scope()).unwrap();

        assert_eq!(indicators.tab_index(0), -1);
        assert_eq!(indicators.tab_index(1), 0);
        assert_eq!(indicators.tab_index(2), -1);
    }

    #[test]
    fn test_accessibility_tree() {
        let wizard = wizard_with_steps(2);
        let indicators = StepIndicators::new(&wizard.scope())
            .unwrap()
            .label("Sign-up progress");

        let info = indicators.accessibility();
        assert_eq!(info.label, "Sign-up progress");
        assert_eq!(
            info.tabs[0],
            TabInfo {
                id: "step-tab-s0".to_string(),
                selected: true,
                controls: "step-panel-s0".to_string(),
                tab_index: 0,
            }
        );
        assert!(!info.tabs[1].selected);
        assert_eq!(info.tabs[1].tab_index, -1);
    }

    #[test]
    fn test_default_rendering_shows_badges_and_checkmarks() {
        let wizard = wizard_with_steps(3);
        let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();
        wizard.handle().next();

        let row = render_row(&mut indicators, 60);
        assert!(row.contains("[✓] Step 1"));
        assert!(row.contains("[2] Step 2"));
        assert!(row.contains("[3] Step 3"));
    }

    #[test]
    fn test_custom_item_renderer() {
        let wizard = wizard_with_steps(2);
        let mut indicators = StepIndicators::new(&wizard.scope())
            .unwrap()
            .render_item(|step, index, status| {
                let marker = if status.is_active { "*" } else { "-" };
                Line::from(format!("{marker}{index}:{}", step.identity))
            });

        let row = render_row(&mut indicators, 30);
        assert!(row.starts_with("*0:s0  -1:s1"));
    }

    #[test]
    fn test_activator_navigates() {
        let wizard = wizard_with_steps(3);
        let indicators = StepIndicators::new(&wizard.scope()).unwrap();
        indicators.status(2).on_activate.activate();
        assert_eq!(wizard.handle().active_position(), 2);
    }

    #[test]
    fn test_click_activates_indicator() {
        let wizard = wizard_with_steps(3);
        let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();
        render_row(&mut indicators, 60);

        // "[1] Step 1" is 10 wide, then a gap of 2
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 13,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(indicators.handle_mouse(click), KeyOutcome::Handled);
        assert_eq!(wizard.handle().active_position(), 1);
        assert_eq!(indicators.focused(), 1);
    }

    #[test]
    fn test_click_on_active_indicator_takes_focus() {
        let wizard = wizard_with_steps(3);
        let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();
        render_row(&mut indicators, 60);

        indicators.handle_key(key(KeyCode::End));
        assert_eq!(indicators.focused(), 2);

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 1,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(indicators.handle_mouse(click), KeyOutcome::Handled);
        assert_eq!(wizard.handle().active_position(), 0);
        assert_eq!(indicators.focused(), 0);
    }
}
