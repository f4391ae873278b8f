//! Shared data contracts between the wellness state store and whatever backend
//! serves it. Everything here serializes to the camelCase JSON shape the UI
//! already consumes.

pub mod api;
pub mod events;
pub mod models;
