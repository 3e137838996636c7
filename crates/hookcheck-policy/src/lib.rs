//! hookcheck Policy
//!
//! The single source of truth for content rules: word limits, banned terms
//! and their replacements, emoji lists and call-to-action phrasing.
//!
//! # Architecture
//!
//! ```text
//! policy.toml / .yaml / .json → PolicyConfig → ValidationPolicy (compiled, Arc-shared)
//!                                                   ↓
//!                                     validators, auto-corrector, HTTP API
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use hookcheck_policy::ValidationPolicy;
//!
//! let policy = ValidationPolicy::load("config/policy.toml")?;
//! for warning in policy.warnings() {
//!     eprintln!("policy warning: {warning}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod loader;
pub mod policy;
pub mod text;

pub use config::{PolicyConfig, DEFAULT_POLICY_VERSION};
pub use error::{PolicyError, PolicyResult, PolicyWarning};
pub use loader::PolicyFormat;
pub use policy::ValidationPolicy;
pub use text::{fold, word_count, FoldedText, MatchMode, TermMatcher};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
