//! hookcheck Core
//!
//! Rule-based validation for short-form marketing copy:
//! - Validates hooks and scripts against a [`ValidationPolicy`]
//! - Scores issues by severity (0-100)
//! - Aggregates hook + script into a report with recommendations
//! - Auto-corrects mapped terms, emojis and generic CTAs
//!
//! `is_valid` (no Critical issue) and `score` are separate signals; a
//! caller gating on one must not assume the other.
//!
//! # Example
//!
//! ```rust,ignore
//! use hookcheck_core::ContentValidator;
//!
//! let validator = ContentValidator::default();
//! let report = validator.validate("3 distritos de Lima se revalorizarán 15% en 2025 📈", None);
//! assert_eq!(report.total_score, 100);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod correct;
pub mod error;
pub mod hook;
pub mod issue;
pub mod report;
pub mod request;
mod rules;
pub mod scoring;
pub mod script;
pub mod validator;

pub use correct::auto_correct;
pub use error::{ValidatorError, ValidatorResult};
pub use hook::validate_hook;
pub use hookcheck_policy::{PolicyConfig, ValidationPolicy};
pub use issue::{IssueKind, Severity, ValidationIssue, ValidationResult};
pub use report::{build_report, QualityTier, ValidationReport, MAX_RECOMMENDATIONS};
pub use request::{Action, ContentRequest, ContentResponse, CorrectionResponse};
pub use scoring::score;
pub use script::{paragraph_count, validate_script};
pub use validator::{
    ContentValidator, Correction, DEFAULT_ACCEPT_SCORE, DEFAULT_CORRECTION_ROUNDS,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with hookcheck Core
    pub use crate::{
        auto_correct, build_report, validate_hook, validate_script, ContentValidator,
        IssueKind, QualityTier, Severity, ValidationPolicy, ValidationReport, ValidationResult,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
