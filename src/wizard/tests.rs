//! Scenario tests across the wizard widgets

use super::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, text::Text, Terminal};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Three mounted steps at positions 0, 1, 2
fn mount_three(wizard: &Wizard) -> Vec<Step> {
    let scope = wizard.scope();
    [("account", "Account"), ("profile", "Profile"), ("review", "Review")]
        .iter()
        .enumerate()
        .map(|(i, (id, label))| {
            Step::mount(
                &scope,
                StepProps::new(*id, i, *label).content(format!("{label} body")),
            )
            .unwrap()
        })
        .collect()
}

fn visible_count(steps: &[Step]) -> usize {
    steps.iter().filter(|s| s.content().is_some()).count()
}

// ─── Shared State Properties ────────────────────────────────────────────────

#[test]
fn test_exactly_one_step_renders_at_any_time() {
    let wizard = Wizard::new(WizardProps::default());
    let steps = mount_three(&wizard);

    for target in [0, 1, 2, 1, 0, 2] {
        wizard.handle().navigate_to(target);
        assert_eq!(visible_count(&steps), 1);
        assert_eq!(
            steps[target].content(),
            Some(Text::from(format!("{} body", steps[target].status().label)))
        );
    }
}

#[test]
fn test_steps_mounted_out_of_order_are_sorted() {
    let wizard = Wizard::new(WizardProps::default());
    let scope = wizard.scope();
    let _c = Step::mount(&scope, StepProps::new("c", 2, "C")).unwrap();
    let _a = Step::mount(&scope, StepProps::new("a", 0, "A")).unwrap();
    let _b = Step::mount(&scope, StepProps::new("b", 1, "B")).unwrap();

    let labels: Vec<String> = wizard
        .handle()
        .steps()
        .into_iter()
        .map(|s| s.label)
        .collect();
    assert_eq!(labels, vec!["A", "B", "C"]);
}

#[test]
fn test_remount_same_identity_is_ignored_while_mounted() {
    let wizard = Wizard::new(WizardProps::default());
    let scope = wizard.scope();
    let _first = Step::mount(&scope, StepProps::new("a", 0, "A")).unwrap();
    let _twin = Step::mount(&scope, StepProps::new("a", 1, "Twin")).unwrap();

    assert_eq!(wizard.handle().total_steps(), 1);
    assert_eq!(wizard.handle().steps()[0].label, "A");
}

#[test]
fn test_dropping_duplicate_keeps_original_registered() {
    let wizard = Wizard::new(WizardProps::default());
    let scope = wizard.scope();
    let first = Step::mount(&scope, StepProps::new("a", 0, "A")).unwrap();
    let twin = Step::mount(&scope, StepProps::new("a", 1, "Twin")).unwrap();

    drop(twin);
    assert_eq!(wizard.handle().total_steps(), 1);
    assert_eq!(wizard.handle().steps()[0].label, "A");

    drop(first);
    assert_eq!(wizard.handle().total_steps(), 0);
}

// ─── Navigation Controls Scenario ───────────────────────────────────────────

#[test]
fn test_next_twice_reaches_finish() {
    let wizard = Wizard::new(WizardProps::default());
    let _steps = mount_three(&wizard);
    let nav = NavControls::new(&wizard.scope()).unwrap();

    nav.press_next();
    nav.press_next();

    let handle = wizard.handle();
    assert_eq!(handle.active_position(), 2);
    assert_eq!(handle.completed(), BTreeSet::from([0, 1]));
    assert!(!nav.previous_disabled());
    assert!(nav.next_disabled());
    assert_eq!(nav.next_label(), "Finish");
}

#[test]
fn test_previous_disabled_iff_first_next_disabled_iff_last() {
    let wizard = Wizard::new(WizardProps::default());
    let _steps = mount_three(&wizard);
    let nav = NavControls::new(&wizard.scope()).unwrap();

    for position in 0..3 {
        wizard.handle().navigate_to(position);
        assert_eq!(nav.previous_disabled(), position == 0);
        assert_eq!(nav.next_disabled(), position == 2);
    }
}

// ─── Indicator Scenario ─────────────────────────────────────────────────────

#[test]
fn test_end_then_enter_activates_last() {
    let wizard = Wizard::new(WizardProps::default());
    let _steps = mount_three(&wizard);
    let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();

    assert_eq!(indicators.focused(), 0);
    assert_eq!(indicators.handle_key(key(KeyCode::End)), KeyOutcome::Handled);
    assert_eq!(indicators.focused(), 2);
    assert_eq!(wizard.handle().active_position(), 0);

    assert_eq!(indicators.handle_key(key(KeyCode::Enter)), KeyOutcome::Handled);
    assert_eq!(wizard.handle().active_position(), 2);
    assert_eq!(indicators.tab_index(2), 0);
}

#[test]
fn test_indicator_activation_skips_completion() {
    let wizard = Wizard::new(WizardProps::default());
    let _steps = mount_three(&wizard);
    let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();

    indicators.handle_key(key(KeyCode::End));
    indicators.handle_key(key(KeyCode::Char(' ')));
    assert!(wizard.handle().completed().is_empty());
}

#[test]
fn test_nav_and_indicators_stay_in_sync() {
    let wizard = Wizard::new(WizardProps::default());
    let _steps = mount_three(&wizard);
    let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();
    let nav = NavControls::new(&wizard.scope()).unwrap();

    nav.press_next();
    assert_eq!(indicators.focused(), 1);
    let selected: Vec<bool> = indicators
        .accessibility()
        .tabs
        .iter()
        .map(|t| t.selected)
        .collect();
    assert_eq!(selected, vec![false, true, false]);

    indicators.handle_key(key(KeyCode::Home));
    indicators.handle_key(key(KeyCode::Enter));
    assert!(nav.previous_disabled());
}

// ─── Lifecycle ──────────────────────────────────────────────────────────────

#[test]
fn test_unmounting_active_step_leaves_position_alone() {
    let wizard = Wizard::new(WizardProps::default());
    let mut steps = mount_three(&wizard);
    wizard.handle().navigate_to(2);

    let removed = steps.pop();
    drop(removed);

    let handle = wizard.handle();
    assert_eq!(handle.total_steps(), 2);
    assert_eq!(handle.active_position(), 2);
    assert_eq!(visible_count(&steps), 0);
}

#[test]
fn test_step_change_callback_sees_every_navigation() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let wizard = Wizard::new(
        WizardProps::default().on_step_change(move |p| sink.borrow_mut().push(p)),
    );
    let _steps = mount_three(&wizard);
    let nav = NavControls::new(&wizard.scope()).unwrap();
    let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();

    nav.press_next();
    indicators.handle_key(key(KeyCode::End));
    indicators.handle_key(key(KeyCode::Enter));
    nav.press_previous();
    wizard.handle().navigate_to(9);

    assert_eq!(*seen.borrow(), vec![1, 2, 1]);
}

// ─── Full Frame ─────────────────────────────────────────────────────────────

#[test]
fn test_full_frame_renders_only_active_content() {
    let wizard = Wizard::new(WizardProps::default().title("Sign up"));
    let mut steps = mount_three(&wizard);
    let mut indicators = StepIndicators::new(&wizard.scope()).unwrap();
    let mut nav = NavControls::new(&wizard.scope()).unwrap();
    wizard.handle().next();

    let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
    terminal
        .draw(|f| {
            let area = f.area();
            let layout = wizard.render(f, area);
            indicators.render(f, layout.indicators);
            for step in &mut steps {
                step.render(f, layout.content);
            }
            nav.render(f, layout.navigation);
        })
        .unwrap();

    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(screen.contains("Sign up"));
    assert!(screen.contains("Profile body"));
    assert!(!screen.contains("Account body"));
    assert!(!screen.contains("Review body"));
    assert!(screen.contains("[✓] Account"));
    assert!(screen.contains("◀ Back"));
}
