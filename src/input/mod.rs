pub mod events;
pub mod listeners;

// Re-export the essential types
pub use events::{CameraEvent, CameraEventKind, ListenerId};
pub use listeners::ListenerRegistry;
