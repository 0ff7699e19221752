//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod action_info_repo;
pub mod department_content_repo;
pub mod department_repo;
pub mod document_repo;
pub mod equipment_repo;
pub mod flow_session_repo;
pub mod host_repo;
pub mod site_repo;
pub mod tenant_repo;
pub mod training_config_repo;
pub mod training_content_repo;
pub mod translation_repo;
pub mod visit_repo;
pub mod visitor_repo;

pub use action_info_repo::ActionInfoRepo;
pub use department_content_repo::DepartmentContentRepo;
pub use department_repo::DepartmentRepo;
pub use document_repo::DocumentRepo;
pub use equipment_repo::EquipmentRepo;
pub use flow_session_repo::FlowSessionRepo;
pub use host_repo::HostRepo;
pub use site_repo::SiteRepo;
pub use tenant_repo::TenantRepo;
pub use training_config_repo::TrainingConfigRepo;
pub use training_content_repo::TrainingContentRepo;
pub use translation_repo::TranslationRepo;
pub use visit_repo::VisitRepo;
pub use visitor_repo::VisitorRepo;
