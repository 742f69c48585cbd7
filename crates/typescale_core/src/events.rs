//! Event dispatch system
//!
//! Layout events (viewport resize, element resize, mount) are routed to
//! handlers registered per target. The viewport itself is target
//! [`VIEWPORT_TARGET`]; rendered elements use their own ids.

use rustc_hash::FxHashMap;

/// Event type identifier
pub type EventType = u32;

/// Target identifier (element id, or [`VIEWPORT_TARGET`])
pub type TargetId = u64;

/// Target id reserved for the viewport (window-level events)
pub const VIEWPORT_TARGET: TargetId = 0;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Viewport resized
    pub const RESIZE: EventType = 40;
    /// A single observed element changed size
    pub const ELEMENT_RESIZE: EventType = 41;
}

/// A layout event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: TargetId,
    pub data: EventData,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Resize { width: u32, height: u32 },
    None,
}

impl Event {
    /// Viewport resize event
    pub fn viewport_resize(width: u32, height: u32) -> Self {
        Self {
            event_type: event_types::RESIZE,
            target: VIEWPORT_TARGET,
            data: EventData::Resize { width, height },
            propagation_stopped: false,
        }
    }

    /// Element resize event (carries no size; observers re-query the target)
    pub fn element_resize(element: TargetId) -> Self {
        Self {
            event_type: event_types::ELEMENT_RESIZE,
            target: element,
            data: EventData::None,
            propagation_stopped: false,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event) + Send + Sync>;

/// Handle returned by [`EventDispatcher::register`], used to unregister
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId {
    target: TargetId,
    event_type: EventType,
    serial: u64,
}

/// Dispatches events to registered handlers
pub struct EventDispatcher {
    handlers: FxHashMap<(TargetId, EventType), Vec<(u64, EventHandler)>>,
    next_serial: u64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
            next_serial: 0,
        }
    }

    /// Register an event handler for a target and event type
    pub fn register<F>(&mut self, target: TargetId, event_type: EventType, handler: F) -> HandlerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.handlers
            .entry((target, event_type))
            .or_default()
            .push((serial, Box::new(handler)));
        HandlerId {
            target,
            event_type,
            serial,
        }
    }

    /// Remove a previously registered handler. Returns false if it was already gone.
    pub fn unregister(&mut self, id: HandlerId) -> bool {
        let key = (id.target, id.event_type);
        let Some(list) = self.handlers.get_mut(&key) else {
            return false;
        };
        let before = list.len();
        list.retain(|(serial, _)| *serial != id.serial);
        let removed = list.len() != before;
        if list.is_empty() {
            self.handlers.remove(&key);
        }
        removed
    }

    /// Number of handlers registered for a target and event type
    pub fn handler_count(&self, target: TargetId, event_type: EventType) -> usize {
        self.handlers
            .get(&(target, event_type))
            .map_or(0, Vec::len)
    }

    /// Dispatch an event to all registered handlers
    pub fn dispatch(&self, event: &mut Event) {
        if let Some(handlers) = self.handlers.get(&(event.target, event.event_type)) {
            tracing::trace!(
                target_id = event.target,
                event_type = event.event_type,
                handlers = handlers.len(),
                "dispatching event"
            );
            for (_, handler) in handlers {
                if event.propagation_stopped {
                    break;
                }
                handler(event);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_dispatch_reaches_only_matching_target() {
        let mut dispatcher = EventDispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        dispatcher.register(7, event_types::ELEMENT_RESIZE, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        dispatcher.dispatch(&mut Event::element_resize(7));
        dispatcher.dispatch(&mut Event::element_resize(8));
        dispatcher.dispatch(&mut Event::viewport_resize(800, 600));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregister_removes_single_handler() {
        let mut dispatcher = EventDispatcher::new();
        let first = dispatcher.register(VIEWPORT_TARGET, event_types::RESIZE, |_| {});
        let _second = dispatcher.register(VIEWPORT_TARGET, event_types::RESIZE, |_| {});

        assert_eq!(dispatcher.handler_count(VIEWPORT_TARGET, event_types::RESIZE), 2);
        assert!(dispatcher.unregister(first));
        assert!(!dispatcher.unregister(first));
        assert_eq!(dispatcher.handler_count(VIEWPORT_TARGET, event_types::RESIZE), 1);
    }

    #[test]
    fn test_stop_propagation_skips_later_handlers() {
        let mut dispatcher = EventDispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));

        dispatcher.register(1, event_types::ELEMENT_RESIZE, |_| {});
        let counter = hits.clone();
        dispatcher.register(1, event_types::ELEMENT_RESIZE, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut event = Event::element_resize(1);
        event.stop_propagation();
        dispatcher.dispatch(&mut event);

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
