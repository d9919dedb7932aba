//! Logging setup shared by the binaries of this workspace. Everything is
//! written to stderr so that stdout stays reserved for the program's actual
//! output.
pub mod config;
pub mod tracing;

pub use config::Config;
