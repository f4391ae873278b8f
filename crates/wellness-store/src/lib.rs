//! Client-side state container. Each slice is an isolated region of state
//! with its own loading flag and error slot; intents either mutate a slice
//! directly or run an access shim and write its settled result.

pub mod analytics;
pub mod auth;
pub mod chat;
pub mod notifications;
pub mod resources;
pub mod scope;
pub mod slice;
mod store;
pub mod wellness;

pub use scope::ViewScope;
pub use slice::{Settled, Slice};
pub use store::Store;
