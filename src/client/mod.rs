//! Remote quiz client.
//!
//! Forwards user actions to a session server and renders the snapshots it
//! sends back.

mod client;
mod state;

pub use client::run;
