pub mod auth;

pub use auth::{is_protected, session_guard, PROTECTED_PREFIXES};
