//! Frontdesk domain core.
//!
//! Pure domain logic for the visitor training workflow: the step catalog,
//! the per-visitor training state machine, the three channel policies, and
//! the validity/skip evaluator. This crate has no database dependency;
//! everything operates on pre-loaded data passed in by the caller.

pub mod content;
pub mod error;
pub mod identity;
pub mod policy;
pub mod steps;
pub mod training;
pub mod types;
pub mod validity;
pub mod visit;
