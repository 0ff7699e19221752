//! Training flow engine.
//!
//! `resolver` turns stored content rows into one immutable [`ContentBundle`]
//! per flow; `flow` drives sessions, per-visitor state and channel policy
//! enforcement on top of it.
//!
//! [`ContentBundle`]: frontdesk_core::steps::ContentBundle

pub mod flow;
pub mod resolver;
