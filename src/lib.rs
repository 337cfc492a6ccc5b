pub mod actions;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod transport;
pub mod ui;

#[cfg(test)]
pub mod testing;

pub use actions::{Action, ActionController, ActionKind, ActionOutcome, LoginForm, RegisterForm};
pub use bootstrap::{BootstrapOutcome, SessionBootstrapper};
pub use context::PageContext;
