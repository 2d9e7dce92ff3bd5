//! # Diagnostics Sink
//!
//! Components never log through a process-wide subscriber they did not ask
//! for. Each one receives a [`Diagnostics`] handle in its constructor and
//! emits `tracing` events through it. A disabled handle drops every event
//! without evaluating it.
//!
//! ```
//! use reqfield_core::Diagnostics;
//!
//! let diagnostics = Diagnostics::disabled().for_component("schema_generator");
//! diagnostics.emit(|component| {
//!     tracing::debug!(component = component, "never recorded");
//! });
//! ```

use std::fmt;

use tracing::Dispatch;

/// Handle to an optional `tracing` dispatcher, tagged with a component name.
#[derive(Clone, Default)]
pub struct Diagnostics {
    dispatch: Option<Dispatch>,
    component: &'static str,
}

impl Diagnostics {
    /// Emit through the given dispatcher.
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
            component: "",
        }
    }

    /// Drop every event.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Capture the caller's current default dispatcher.
    pub fn current() -> Self {
        tracing::dispatcher::get_default(|dispatch| Self::new(dispatch.clone()))
    }

    /// The same sink, tagged with a different component name.
    pub fn for_component(&self, component: &'static str) -> Self {
        Self {
            dispatch: self.dispatch.clone(),
            component,
        }
    }

    /// Component name attached to every event.
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Whether events are delivered anywhere.
    pub fn is_enabled(&self) -> bool {
        self.dispatch.is_some()
    }

    /// Run `event` with this sink's dispatcher as the default.
    ///
    /// The closure receives the component name so it can be recorded as a
    /// field. It is not called at all when the sink is disabled.
    pub fn emit<F: FnOnce(&'static str)>(&self, event: F) {
        if let Some(dispatch) = &self.dispatch {
            tracing::dispatcher::with_default(dispatch, || event(self.component));
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.is_enabled())
            .field("component", &self.component)
            .finish()
    }
}
