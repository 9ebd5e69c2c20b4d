use crate::{
    input::events::{CameraEvent, CameraEventKind, ListenerId},
    prelude::{HashMap, VecDeque},
};
use crossbeam_channel::Sender;

struct Listener {
    id: ListenerId,
    sender: Sender<CameraEvent>,
}

/// Subscription bookkeeping for a camera surface
///
/// Listeners are channel senders keyed by event kind. Emitted events are
/// queued and delivered on [`ListenerRegistry::dispatch`], so a surface can
/// emit from inside its own state changes without re-entering subscribers.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: HashMap<CameraEventKind, Vec<Listener>>,
    event_queue: VecDeque<CameraEvent>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event kind
    pub fn on(&mut self, kind: CameraEventKind, sender: Sender<CameraEvent>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners
            .entry(kind)
            .or_default()
            .push(Listener { id, sender });
        log::trace!("listener {} registered for '{}'", id.value(), kind);
        id
    }

    /// Remove a single listener; returns false if it was not registered
    pub fn off(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        for listeners in self.listeners.values_mut() {
            let before = listeners.len();
            listeners.retain(|listener| listener.id != id);
            removed |= listeners.len() != before;
        }
        self.listeners.retain(|_, listeners| !listeners.is_empty());
        removed
    }

    /// Queue an event for delivery
    pub fn emit(&mut self, event: CameraEvent) {
        self.event_queue.push_back(event);
    }

    /// Deliver all queued events; returns the delivered events
    pub fn dispatch(&mut self) -> Vec<CameraEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(listeners) = self.listeners.get_mut(&event.kind()) {
                // a dropped receiver means the subscriber went away without unsubscribing
                listeners.retain(|listener| listener.sender.send(event.clone()).is_ok());
            }
        }

        events
    }

    /// Number of live listeners across all kinds
    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Number of live listeners for one kind
    pub fn listeners_for(&self, kind: CameraEventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}
