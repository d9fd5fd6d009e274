use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;

use crate::config::Config;
use crate::demo::{DemoAction, DemoWizard};
use crate::ui::TerminalGuard;

/// How the demo ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppOutcome {
    Finished(String),
    Cancelled,
}

pub struct App {
    config: Config,
    demo: DemoWizard,
    outcome: Option<AppOutcome>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let demo = DemoWizard::new(&config.wizard).context("Failed to build demo wizard")?;
        Ok(Self {
            config,
            demo,
            outcome: None,
        })
    }

    fn apply(&mut self, action: DemoAction) {
        match action {
            DemoAction::Continue => {}
            DemoAction::Quit => {
                tracing::info!("wizard cancelled");
                self.outcome = Some(AppOutcome::Cancelled);
            }
            DemoAction::Finish => {
                let summary = self.demo.summary();
                tracing::info!(summary = %summary, "wizard finished");
                self.outcome = Some(AppOutcome::Finished(summary));
            }
        }
    }

    pub fn run(&mut self) -> Result<AppOutcome> {
        let mut guard = TerminalGuard::new()?;
        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);

        while self.outcome.is_none() {
            guard.terminal().draw(|f| self.demo.render(f))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let action = self.demo.handle_key(key);
                        self.apply(action);
                    }
                    Event::Mouse(mouse) => {
                        let action = self.demo.handle_mouse(mouse);
                        self.apply(action);
                    }
                    _ => {}
                }
            }
        }

        guard.restore()?;
        Ok(self.outcome.take().unwrap_or(AppOutcome::Cancelled))
    }
}
