use crate::{
    input::events::MapEvent,
    prelude::{HashMap, Instant, VecDeque},
};

/// Event listener callback type; receives the event and the dispatch time
pub type EventCallback = Box<dyn Fn(&MapEvent, Instant) + Send + Sync>;

/// Handle returned by [`EventManager::on`], used to unregister the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Queues map events and dispatches them to listeners by event type
#[derive(Default)]
pub struct EventManager {
    /// Listeners by event type, in registration order
    listeners: HashMap<String, Vec<(ListenerId, EventCallback)>>,
    event_queue: VecDeque<MapEvent>,
    next_id: u64,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F) -> ListenerId
    where
        F: Fn(&MapEvent, Instant) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Unregister a listener; false if it was not registered
    pub fn off(&mut self, id: ListenerId) -> bool {
        for callbacks in self.listeners.values_mut() {
            let before = callbacks.len();
            callbacks.retain(|(existing, _)| *existing != id);
            if callbacks.len() != before {
                return true;
            }
        }
        false
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Process all queued events in emission order, as if dispatched at `now`
    pub fn process_events(&mut self, now: Instant) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            log::trace!("dispatching {} event", event.event_type());
            if let Some(callbacks) = self.listeners.get(event.event_type()) {
                for (_, callback) in callbacks {
                    callback(event, now);
                }
            }
        }

        events
    }

    /// Clear all events from the queue
    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    /// Number of listeners registered for an event type
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.get(event_type).map_or(0, Vec::len)
    }
}
