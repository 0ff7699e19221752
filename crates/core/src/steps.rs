//! Training step catalog.
//!
//! Defines the canonical step order, the resolved [`ContentBundle`], and the
//! applicability computation. A step is applicable iff its bundle field is
//! non-empty; the catalog never looks at visitor state.

use serde::{Deserialize, Serialize};

use crate::content::is_blank;
use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Step kinds
// ---------------------------------------------------------------------------

/// The six training step kinds, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Video,
    Map,
    Risks,
    Department,
    Equipment,
    ActionInfo,
}

/// Canonical step order. The applicable-step list and all "next step"
/// computations follow this order.
pub const CANONICAL_ORDER: [StepKind; 6] = [
    StepKind::Video,
    StepKind::Map,
    StepKind::Risks,
    StepKind::Department,
    StepKind::Equipment,
    StepKind::ActionInfo,
];

impl StepKind {
    /// Parse a step identifier string (database / URL form).
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "video" => Ok(Self::Video),
            "map" => Ok(Self::Map),
            "risks" => Ok(Self::Risks),
            "department" => Ok(Self::Department),
            "equipment" => Ok(Self::Equipment),
            "action_info" => Ok(Self::ActionInfo),
            _ => Err(CoreError::Validation(format!(
                "Invalid step kind '{s}'. Must be one of: \
                 video, map, risks, department, equipment, action_info"
            ))),
        }
    }

    /// Database / URL identifier for the step.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Map => "map",
            Self::Risks => "risks",
            Self::Department => "department",
            Self::Equipment => "equipment",
            Self::ActionInfo => "action_info",
        }
    }

    /// Translation key for the user-facing step label.
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::Video => "training.step.video",
            Self::Map => "training.step.map",
            Self::Risks => "training.step.risks",
            Self::Department => "training.step.department",
            Self::Equipment => "training.step.equipment",
            Self::ActionInfo => "training.step.action_info",
        }
    }

    /// Fallback label used when no translation override exists.
    pub fn default_label(&self) -> &'static str {
        match self {
            Self::Video => "Introductory video",
            Self::Map => "Site map",
            Self::Risks => "General risk briefing",
            Self::Department => "Department briefing",
            Self::Equipment => "Protective equipment",
            Self::ActionInfo => "Visit instructions",
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved content bundle
// ---------------------------------------------------------------------------

/// A resolved document reference. The URL is derived from the stored
/// storage key by the resolver; bytes never flow through this crate.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRef {
    pub id: DbId,
    pub file_name: String,
    pub url: String,
}

/// Department briefing resolved for one in-scope department.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentBriefing {
    pub department_id: DbId,
    pub department_name: String,
    pub body_text: String,
    pub documents: Vec<DocumentRef>,
}

impl DepartmentBriefing {
    /// A briefing with neither text nor documents is "nothing to show" and
    /// must be excluded from the bundle by the resolver.
    pub fn has_content(&self) -> bool {
        !is_blank(Some(&self.body_text)) || !self.documents.is_empty()
    }
}

/// A protective-equipment requirement of the site.
#[derive(Debug, Clone, Serialize)]
pub struct EquipmentItem {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
}

/// Visit-specific instructions.
#[derive(Debug, Clone, Serialize)]
pub struct ActionInstructions {
    pub instructions: String,
    pub documents: Vec<DocumentRef>,
}

impl ActionInstructions {
    pub fn has_content(&self) -> bool {
        !is_blank(Some(&self.instructions)) || !self.documents.is_empty()
    }
}

/// The immutable content bundle resolved once per flow start and shared by
/// every visitor of the flow. Applicability is derived from field emptiness
/// by [`applicable_steps`]; the resolver only decides content existence.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentBundle {
    pub video_url: Option<String>,
    pub map_document: Option<DocumentRef>,
    pub risks_text: Option<String>,
    pub general_documents: Vec<DocumentRef>,
    pub departments: Vec<DepartmentBriefing>,
    pub equipment: Vec<EquipmentItem>,
    pub action_info: Option<ActionInstructions>,
}

impl ContentBundle {
    /// Whether the given step has content to show.
    pub fn has_step(&self, step: StepKind) -> bool {
        match step {
            StepKind::Video => !is_blank(self.video_url.as_deref()),
            StepKind::Map => self.map_document.is_some(),
            StepKind::Risks => !is_blank(self.risks_text.as_deref()),
            StepKind::Department => self.departments.iter().any(|d| d.has_content()),
            StepKind::Equipment => !self.equipment.is_empty(),
            StepKind::ActionInfo => self
                .action_info
                .as_ref()
                .is_some_and(|a| a.has_content()),
        }
    }
}

// ---------------------------------------------------------------------------
// Applicability
// ---------------------------------------------------------------------------

/// Compute the applicable steps for a bundle, in canonical order.
///
/// Computed once per flow start and frozen on the flow session so the step
/// count stays stable for a visitor who has already started; re-entering
/// the flow (a new session) re-resolves.
pub fn applicable_steps(bundle: &ContentBundle) -> Vec<StepKind> {
    CANONICAL_ORDER
        .iter()
        .copied()
        .filter(|step| bundle.has_step(*step))
        .collect()
}
