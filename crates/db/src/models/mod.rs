//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts (with `Validate` derives on
//!   user-supplied fields)
//! - An update DTO where the table supports patches

pub mod action_info;
pub mod department;
pub mod department_content;
pub mod document;
pub mod equipment_requirement;
pub mod flow_session;
pub mod host;
pub mod site;
pub mod tenant;
pub mod training_config;
pub mod training_content;
pub mod translation;
pub mod visit;
pub mod visitor;
