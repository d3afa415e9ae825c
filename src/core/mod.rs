//! Core library components.
//!
//! Pure resolution logic: every function takes its inputs explicitly
//! (parameters, config, an [`env::EnvReader`]) and returns owned results,
//! so nothing leaks between invocations.

pub mod config;
pub mod constants;
pub mod context;
pub mod credentials;
pub mod env;
pub mod naming;
pub mod network;
pub mod plan;
pub mod redact;
pub mod reference;
