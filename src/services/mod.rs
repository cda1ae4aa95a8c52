// Service module exports
// Layout computation, drag/resize interaction and settings persistence

pub mod interaction;
pub mod layout;
pub mod settings;
