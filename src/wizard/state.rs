//! Shared step state owned by a single wizard instance.
//!
//! [`StepState`] holds the ordered step registry, the active position and the
//! completed set. Consumers never touch it directly: they go through a
//! [`StepHandle`], which funnels every change of the active position through
//! [`StepHandle::navigate_to`] and fires the optional step-change callback
//! once the state borrow has been released.

use std::cell::{Ref, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Callback invoked with the new active position after every navigation
pub type StepChangeCallback = Box<dyn Fn(usize)>;

/// One registered step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    /// Caller-supplied unique identity
    pub identity: String,
    /// Zero-based sort key
    pub position: usize,
    /// Label shown by the indicator list
    pub label: String,
}

impl StepDescriptor {
    pub fn new(identity: impl Into<String>, position: usize, label: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            position,
            label: label.into(),
        }
    }
}

/// Registry, active position and completed set for one wizard
#[derive(Debug, Clone, Default)]
pub struct StepState {
    /// Always sorted ascending by `position`
    steps: Vec<StepDescriptor>,
    active: usize,
    completed: BTreeSet<usize>,
}

impl StepState {
    pub fn new(initial_position: usize) -> Self {
        Self {
            steps: Vec::new(),
            active: initial_position,
            completed: BTreeSet::new(),
        }
    }

    /// Insert a descriptor, keeping the registry sorted by position.
    ///
    /// Returns false (and changes nothing) when the identity is already
    /// registered. Equal positions keep registration order.
    pub fn register(&mut self, descriptor: StepDescriptor) -> bool {
        if self
            .steps
            .iter()
            .any(|s| s.identity == descriptor.identity)
        {
            return false;
        }
        let index = self
            .steps
            .partition_point(|s| s.position <= descriptor.position);
        self.steps.insert(index, descriptor);
        true
    }

    /// Remove the descriptor with this identity. Returns whether one existed.
    pub fn unregister(&mut self, identity: &str) -> bool {
        let before = self.steps.len();
        self.steps.retain(|s| s.identity != identity);
        self.steps.len() != before
    }

    /// Set the active position if it is within `0..total`
    pub fn set_active(&mut self, position: usize) -> bool {
        if position >= self.steps.len() {
            return false;
        }
        self.active = position;
        true
    }

    pub fn mark_completed(&mut self, position: usize) {
        self.completed.insert(position);
    }

    pub fn is_completed(&self, position: usize) -> bool {
        self.completed.contains(&position)
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn total(&self) -> usize {
        self.steps.len()
    }

    pub fn is_first(&self) -> bool {
        self.active == 0
    }

    /// True at `total - 1`, and also past it or with an empty registry
    pub fn is_last(&self) -> bool {
        self.active + 1 >= self.steps.len()
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn completed(&self) -> &BTreeSet<usize> {
        &self.completed
    }
}

struct Shared {
    state: RefCell<StepState>,
    on_step_change: Option<StepChangeCallback>,
}

/// Clonable handle to the shared step state of one wizard.
///
/// Handles are single-threaded (`Rc`); every operation completes before the
/// next event is processed, so consumers always observe a consistent state.
#[derive(Clone)]
pub struct StepHandle {
    shared: Rc<Shared>,
}

impl fmt::Debug for StepHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepHandle")
            .field("state", &*self.shared.state.borrow())
            .field("has_on_step_change", &self.shared.on_step_change.is_some())
            .finish()
    }
}

impl StepHandle {
    pub fn new(initial_position: usize, on_step_change: Option<StepChangeCallback>) -> Self {
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(StepState::new(initial_position)),
                on_step_change,
            }),
        }
    }

    fn state(&self) -> Ref<'_, StepState> {
        self.shared.state.borrow()
    }

    /// Register a step. Duplicate identities are ignored and return false.
    pub fn register_step(
        &self,
        identity: impl Into<String>,
        position: usize,
        label: impl Into<String>,
    ) -> bool {
        let descriptor = StepDescriptor::new(identity, position, label);
        let identity = descriptor.identity.clone();
        let inserted = self.shared.state.borrow_mut().register(descriptor);
        if inserted {
            tracing::debug!(identity = %identity, position, "registered step");
        } else {
            tracing::trace!(identity = %identity, "step already registered, ignoring");
        }
        inserted
    }

    /// Remove a step. Unknown identities are ignored.
    pub fn unregister_step(&self, identity: &str) {
        if self.shared.state.borrow_mut().unregister(identity) {
            tracing::debug!(identity = %identity, "unregistered step");
        }
    }

    /// The only way the active position changes.
    ///
    /// Positions outside `0..total_steps()` are ignored silently. On success
    /// the step-change callback receives the new position.
    pub fn navigate_to(&self, position: usize) {
        let accepted = self.shared.state.borrow_mut().set_active(position);
        if !accepted {
            tracing::debug!(
                position,
                total = self.total_steps(),
                "ignoring out-of-range navigation"
            );
            return;
        }

        tracing::debug!(position, "navigated to step");
        if let Some(callback) = &self.shared.on_step_change {
            callback(position);
        }
    }

    /// Complete the current position and advance, unless already last
    pub fn next(&self) {
        let current = {
            let state = self.state();
            if state.is_last() {
                return;
            }
            state.active()
        };
        self.shared.state.borrow_mut().mark_completed(current);
        self.navigate_to(current + 1);
    }

    /// Step back, unless already first. Completion is left untouched.
    pub fn previous(&self) {
        let current = {
            let state = self.state();
            if state.is_first() {
                return;
            }
            state.active()
        };
        self.navigate_to(current - 1);
    }

    /// Mark any position completed, in range or not
    pub fn mark_completed(&self, position: usize) {
        let total = {
            let mut state = self.shared.state.borrow_mut();
            state.mark_completed(position);
            state.total()
        };
        if position >= total {
            tracing::debug!(position, total, "marked out-of-range position completed");
        }
    }

    pub fn is_completed(&self, position: usize) -> bool {
        self.state().is_completed(position)
    }

    pub fn active_position(&self) -> usize {
        self.state().active()
    }

    pub fn total_steps(&self) -> usize {
        self.state().total()
    }

    pub fn is_first(&self) -> bool {
        self.state().is_first()
    }

    pub fn is_last(&self) -> bool {
        self.state().is_last()
    }

    /// Snapshot of the registry in position order
    pub fn steps(&self) -> Vec<StepDescriptor> {
        self.state().steps().to_vec()
    }

    /// Snapshot of the completed set
    pub fn completed(&self) -> BTreeSet<usize> {
        self.state().completed().clone()
    }

    /// Descriptor at a registry index
    pub fn descriptor_at(&self, index: usize) -> Option<StepDescriptor> {
        self.state().steps().get(index).cloned()
    }

    /// Whether two handles refer to the same wizard
    pub fn same_wizard(&self, other: &StepHandle) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}
