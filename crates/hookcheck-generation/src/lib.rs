//! hookcheck Generation
//!
//! Produces hooks and scripts from a generative-text backend and runs each
//! candidate through the content validator, retrying until one is good
//! enough or the attempt budget is spent.
//!
//! # Example
//!
//! ```rust,ignore
//! use hookcheck_generation::{GenerationConfig, GenerationWorkflow, HttpGenerationClient};
//! use hookcheck_core::ContentValidator;
//! use std::sync::Arc;
//!
//! let config = GenerationConfig::default();
//! let client = HttpGenerationClient::from_config(&config)?;
//! let workflow = GenerationWorkflow::new(Arc::new(client), ContentValidator::default())
//!     .with_config(&config);
//! let content = workflow.run("Hook para inversionistas en Surco").await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod candidate;
pub mod client;
pub mod error;
pub mod workflow;

pub use candidate::{parse_candidate, Candidate};
pub use client::{
    GenerationClient, GenerationConfig, HttpGenerationClient, DEFAULT_API_KEY_ENV,
    DEFAULT_ENDPOINT, DEFAULT_MODEL,
};
pub use error::{GenerationError, WorkflowError, WorkflowResult};
pub use workflow::{GeneratedContent, GenerationWorkflow};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
