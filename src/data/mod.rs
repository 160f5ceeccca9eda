mod loader;

pub use loader::{builtin_bank, load_bank, load_bank_from_json, load_bank_from_str, LoadError};
