//! Quiz session server.
//!
//! Hosts one independent quiz session per WebSocket client.

mod server;
mod state;

pub use server::run;
