//! Diagnostics listeners and their fan-out composition.
//!
//! Listeners observe events; they never alter control flow. Failures that
//! produced an event are still propagated to the caller unchanged.

use std::sync::Arc;

use crate::dialect::Dialect;
use crate::error::ConversionError;

/// An operator or construct was rendered through an emulation fallback
/// instead of its native form.
#[derive(Debug, Clone)]
pub struct EmulationEvent {
    /// The missing native feature, e.g. `"native XOR"`.
    pub feature: &'static str,
    /// The dialect that lacks it.
    pub dialect: Dialect,
}

/// Observer interface for render- and conversion-time events.
pub trait DiagnosticsListener: Send + Sync {
    /// An emulation fallback was applied while rendering.
    fn emulation_applied(&self, event: &EmulationEvent) {
        let _ = event;
    }

    /// A converter on an accessor chain failed. The error is still
    /// propagated to the caller after listeners are notified.
    fn conversion_failed(&self, error: &ConversionError) {
        let _ = error;
    }
}

/// Supplies a listener instance for aggregation.
pub trait DiagnosticsListenerProvider: Send + Sync {
    fn provide(&self) -> Arc<dyn DiagnosticsListener>;
}

/// An explicit ordered list of listeners behind the single listener
/// interface. Events fan out to every listener in registration order.
#[derive(Clone, Default)]
pub struct DiagnosticsListeners {
    listeners: Vec<Arc<dyn DiagnosticsListener>>,
}

impl DiagnosticsListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate the listeners supplied by the given providers, in order.
    pub fn from_providers(providers: &[&dyn DiagnosticsListenerProvider]) -> Self {
        Self {
            listeners: providers.iter().map(|p| p.provide()).collect(),
        }
    }

    /// Append a listener.
    pub fn push(&mut self, listener: Arc<dyn DiagnosticsListener>) {
        self.listeners.push(listener);
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for DiagnosticsListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsListeners")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DiagnosticsListener for DiagnosticsListeners {
    fn emulation_applied(&self, event: &EmulationEvent) {
        tracing::trace!(feature = event.feature, dialect = %event.dialect, "emulation applied");
        for listener in &self.listeners {
            listener.emulation_applied(event);
        }
    }

    fn conversion_failed(&self, error: &ConversionError) {
        tracing::trace!(%error, "conversion failed");
        for listener in &self.listeners {
            listener.conversion_failed(error);
        }
    }
}
