//! Request and response handlers for all API endpoints.

pub mod chat;
pub mod conversations;
pub mod embed;
pub mod graph;
pub mod health;
