//! Simulation event hooks with zero overhead when no handler is registered.

use std::sync::Arc;

/// A tick is about to run.
#[derive(Debug, Clone, PartialEq)]
pub struct TickStartedEvent {
    pub tick: u32,
}

/// A glitch lowered one service's health.
#[derive(Debug, Clone, PartialEq)]
pub struct GlitchEvent {
    pub tick: u32,
    pub service: String,
    pub delta: f64,
    pub health: f64,
}

/// A service entered a new failure episode.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceFailedEvent {
    pub tick: u32,
    pub service: String,
    pub health: f64,
}

/// A tick finished; `failing` lists services with the failure flag set.
#[derive(Debug, Clone, PartialEq)]
pub struct TickCompletedEvent {
    pub tick: u32,
    pub failing: Vec<String>,
}

/// Trait for observing a simulation run.
///
/// All methods have no-op defaults, so handlers only override the events
/// they care about.
pub trait SimulationEventHandler: Send + Sync {
    fn on_tick_started(&self, _event: &TickStartedEvent) {}
    fn on_glitch(&self, _event: &GlitchEvent) {}
    fn on_service_failed(&self, _event: &ServiceFailedEvent) {}
    fn on_tick_completed(&self, _event: &TickCompletedEvent) {}
}

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn SimulationEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn SimulationEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn emit<F: Fn(&dyn SimulationEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            f(handler.as_ref());
        }
    }

    pub fn emit_tick_started(&self, event: &TickStartedEvent) {
        self.emit(|h| h.on_tick_started(event));
    }

    pub fn emit_glitch(&self, event: &GlitchEvent) {
        self.emit(|h| h.on_glitch(event));
    }

    pub fn emit_service_failed(&self, event: &ServiceFailedEvent) {
        self.emit(|h| h.on_service_failed(event));
    }

    pub fn emit_tick_completed(&self, event: &TickCompletedEvent) {
        self.emit(|h| h.on_tick_completed(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
