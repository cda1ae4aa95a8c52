// Module exports for models
// Plain data shared by the layout engine and the interaction session

pub mod event;
pub mod interaction;
pub mod layout;
pub mod settings;
