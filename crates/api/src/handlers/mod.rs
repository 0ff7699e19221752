//! HTTP request handlers, grouped by resource.

pub mod content;
pub mod flows;
pub mod training_config;
pub mod visits;
pub mod visitors;
