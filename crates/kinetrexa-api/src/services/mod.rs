//! Side-effect services invoked by handlers.

pub mod notifier;
