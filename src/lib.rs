//! stackplan - decides what the Device Manager API stack must declare.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── plan          # Full provisioning plan
//! │   ├── context       # Resolved environment and prefix
//! │   ├── check         # Config validation
//! │   └── completions   # Shell completions
//! └── core/             # Resolution logic
//!     ├── context       # Environment name + resource prefix
//!     ├── config        # JSON config loading
//!     ├── network       # Optional VPC attachment
//!     ├── credentials   # Database credential strategies
//!     ├── reference     # Exposed parameter value resolution
//!     ├── naming        # Resource names, ARNs, function settings
//!     ├── redact        # Keeping credentials out of logs
//!     └── plan          # Pipeline assembly
//! ```
//!
//! Resolution runs once per invocation, strictly in order: context, then
//! config, then network and credentials. A fatal error anywhere aborts
//! before a plan is produced.

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::context::{DeploymentContext, Params};
pub use crate::core::plan::{build, PlanOptions, ProvisioningPlan};
