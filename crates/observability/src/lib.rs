//! Process-wide logging setup.

pub mod tracing;

pub use self::tracing::{LogFormat, init, init_with};
