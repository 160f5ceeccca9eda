mod messages;

pub use messages::{ClientMessage, ServerMessage, DEFAULT_PORT};
