//! Click dispatcher — routes "update-cart" clicks to a cart strategy.
//!
//! DESIGN
//! ======
//! The dispatcher binds the controls present when it is built; controls
//! rendered later are not picked up. Each bound control gets a
//! [`ControlHandle`] by position, so controls sharing an id (or having none)
//! stay distinct. A click reads the control's data into a
//! [`MutationCommand`], chooses the strategy from the viewer identity, and
//! runs it. Clicks take `&mut self`, so one dispatcher never runs two at once.
//!
//! Each click walks `Idle → Dispatching → Mutating → Reloaded`, or stops in
//! `Failed` at the stage that went wrong, with an inline [`Notice`] for the
//! page. Persisting (cookie write or POST) happens inside the strategy call,
//! so it has no phase of its own; it shows up only as
//! `Failed { during: Stage::Persisting }`.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::command::{MutationCommand, UpdateControl};
use crate::config::CartConfig;
use crate::context::{PageContext, ViewerIdentity};
use crate::cookie::CookieStore;
use crate::error::{CartError, Notice};
use crate::mutator::{CartMutator, CartState, HttpTransport, LocalMutator, RemoteMutator, Strategy};

// =============================================================================
// PHASE
// =============================================================================

/// Stage at which a click stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Dispatching,
    Mutating,
    Persisting,
}

impl Stage {
    /// Where `err` stops a click.
    #[must_use]
    pub fn of(err: &CartError) -> Self {
        match err {
            CartError::MalformedControl(_)
            | CartError::UnboundControl(_)
            | CartError::StrategyUnavailable(_) => Self::Dispatching,
            CartError::ItemNotInCart { .. } | CartError::QuantityOverflow { .. } => Self::Mutating,
            CartError::CookieTooLarge { .. }
            | CartError::Serialize(_)
            | CartError::Transport(_)
            | CartError::Status { .. }
            | CartError::Decode(_)
            | CartError::HttpClientBuild(_) => Self::Persisting,
        }
    }
}

/// Where the last click is, or where it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPhase {
    Idle,
    Dispatching,
    /// The strategy is applying and persisting the change.
    Mutating,
    Reloaded,
    Failed { during: Stage },
}

/// Position of a bound control, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlHandle(usize);

impl ControlHandle {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

// =============================================================================
// DISPATCHER
// =============================================================================

pub struct ClickDispatcher {
    bindings: Vec<UpdateControl>,
    viewer: ViewerIdentity,
    local: Box<dyn CartMutator>,
    remote: Option<Box<dyn CartMutator>>,
    phase: ClickPhase,
    state: Option<CartState>,
    notice: Option<Notice>,
}

impl ClickDispatcher {
    /// Bind every `update-cart` control in `controls`, in order.
    ///
    /// `remote` may be `None` for a viewer who never posts; a remote click
    /// then fails with [`CartError::StrategyUnavailable`].
    #[must_use]
    pub fn bind(
        controls: &[UpdateControl],
        viewer: ViewerIdentity,
        local: Box<dyn CartMutator>,
        remote: Option<Box<dyn CartMutator>>,
    ) -> Self {
        let bindings: Vec<UpdateControl> =
            controls.iter().filter(|control| control.is_update_cart()).cloned().collect();

        let mut seen = BTreeSet::new();
        for control in &bindings {
            if !control.id.is_empty() && !seen.insert(control.id.as_str()) {
                warn!(id = %control.id, "duplicate cart control id; click_id reaches only the first");
            }
        }
        debug!(bound = bindings.len(), authenticated = viewer.is_authenticated(), "cart controls bound");

        Self { bindings, viewer, local, remote, phase: ClickPhase::Idle, state: None, notice: None }
    }

    /// Build the strategies the viewer needs from the page context and bind
    /// `controls`. The HTTP client is only built for an authenticated viewer.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn from_context<S: CookieStore + 'static>(
        controls: &[UpdateControl],
        context: PageContext,
        config: &CartConfig,
        store: S,
    ) -> Result<Self, CartError> {
        let local = LocalMutator::new(context.initial_cart, store, config.cookie_max_bytes);
        let remote: Option<Box<dyn CartMutator>> = if context.viewer.is_authenticated() {
            let transport = Arc::new(HttpTransport::new(config)?);
            Some(Box::new(RemoteMutator::new(transport, context.csrf_token)))
        } else {
            None
        };
        Ok(Self::bind(controls, context.viewer, Box::new(local), remote))
    }

    /// Handles of every bound control, in page order.
    pub fn handles(&self) -> impl Iterator<Item = ControlHandle> {
        (0..self.bindings.len()).map(ControlHandle)
    }

    /// Handle of the first bound control with id `control_id`.
    #[must_use]
    pub fn find(&self, control_id: &str) -> Option<ControlHandle> {
        self.bindings.iter().position(|control| control.id == control_id).map(ControlHandle)
    }

    /// The bound control behind `handle`.
    #[must_use]
    pub fn control(&self, handle: ControlHandle) -> Option<&UpdateControl> {
        self.bindings.get(handle.0)
    }

    /// Strategy a click would use right now.
    #[must_use]
    pub fn select_strategy(&self) -> Strategy {
        if self.viewer.is_authenticated() { Strategy::Remote } else { Strategy::Local }
    }

    /// Handle a click on the bound control `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnboundControl`] for a handle this dispatcher did
    /// not hand out, [`CartError::MalformedControl`] for bad control data, or
    /// whatever the selected strategy fails with. The previous state is kept
    /// on error.
    pub async fn click(&mut self, handle: ControlHandle) -> Result<CartState, CartError> {
        self.notice = None;
        self.transition(ClickPhase::Dispatching);

        let command = match self.command_for(handle) {
            Ok(command) => command,
            Err(e) => return Err(self.fail(e)),
        };

        let strategy = self.select_strategy();
        debug!(item_id = %command.item_id, action = %command.action, ?strategy, "dispatching cart click");

        self.transition(ClickPhase::Mutating);
        let result = match (strategy, self.remote.as_mut()) {
            (Strategy::Local, _) => self.local.apply_mutation(&command).await,
            (Strategy::Remote, Some(remote)) => remote.apply_mutation(&command).await,
            (Strategy::Remote, None) => Err(CartError::StrategyUnavailable("remote")),
        };

        match result {
            Ok(state) => {
                self.transition(ClickPhase::Reloaded);
                self.state = Some(state.clone());
                Ok(state)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Handle a click on the first bound control with id `control_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnboundControl`] if no bound control has that id,
    /// otherwise as [`ClickDispatcher::click`].
    pub async fn click_id(&mut self, control_id: &str) -> Result<CartState, CartError> {
        match self.find(control_id) {
            Some(handle) => self.click(handle).await,
            None => {
                self.notice = None;
                self.transition(ClickPhase::Dispatching);
                Err(self.fail(CartError::UnboundControl(control_id.to_string())))
            }
        }
    }

    fn command_for(&self, handle: ControlHandle) -> Result<MutationCommand, CartError> {
        self.control(handle).ok_or_else(|| CartError::UnboundControl(format!("#{}", handle.0)))?.command()
    }

    fn transition(&mut self, next: ClickPhase) {
        debug!(from = ?self.phase, to = ?next, "click phase");
        self.phase = next;
    }

    fn fail(&mut self, err: CartError) -> CartError {
        let during = Stage::of(&err);
        warn!(error = %err, ?during, "cart click failed");
        self.transition(ClickPhase::Failed { during });
        self.notice = Some(Notice::from(&err));
        err
    }

    #[must_use]
    pub fn phase(&self) -> ClickPhase {
        self.phase
    }

    /// State after the last successful click.
    #[must_use]
    pub fn state(&self) -> Option<&CartState> {
        self.state.as_ref()
    }

    /// Inline notice for the last failed click; cleared by the next click.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn bound_controls(&self) -> usize {
        self.bindings.len()
    }
}

#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod tests;
