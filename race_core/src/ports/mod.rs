// trait definitions for ports

mod auth;
mod event_client;
mod store;

pub use auth::*;
pub use event_client::*;
pub use store::*;
