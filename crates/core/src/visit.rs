//! Visit and visitor lifecycle vocabulary.
//!
//! Status enums map to TEXT columns with CHECK constraints; the transition
//! guard for visits is enforced here rather than in SQL.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Visit lifecycle
// ---------------------------------------------------------------------------

/// Visit lifecycle status.
///
/// `draft -> pending -> confirmed -> in_progress -> completed`, with
/// `cancelled` reachable from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    Draft,
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl VisitStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(CoreError::Validation(format!(
                "Invalid visit status '{s}'. Must be one of: \
                 draft, pending, confirmed, in_progress, completed, cancelled"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the visit has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Validate a lifecycle transition.
    pub fn validate_transition(self, next: VisitStatus) -> Result<(), CoreError> {
        let allowed = match (self, next) {
            (Self::Draft, Self::Pending)
            | (Self::Pending, Self::Confirmed)
            | (Self::Confirmed, Self::InProgress)
            | (Self::InProgress, Self::Completed) => true,
            (from, Self::Cancelled) if !from.is_terminal() => true,
            _ => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Cannot transition visit from '{}' to '{}'",
                self.as_str(),
                next.as_str()
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Visitor statuses
// ---------------------------------------------------------------------------

/// Whether the visitor is expected to take part in the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationStatus {
    Planned,
    Confirmed,
    NoShow,
}

impl ParticipationStatus {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "planned" => Ok(Self::Planned),
            "confirmed" => Ok(Self::Confirmed),
            "no_show" => Ok(Self::NoShow),
            _ => Err(CoreError::Validation(format!(
                "Invalid participation status '{s}'. Must be one of: \
                 planned, confirmed, no_show"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Confirmed => "confirmed",
            Self::NoShow => "no_show",
        }
    }
}

/// Physical presence of the visitor on site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    Planned,
    Confirmed,
    Present,
    CheckedOut,
    NoShow,
}

impl PresenceStatus {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "planned" => Ok(Self::Planned),
            "confirmed" => Ok(Self::Confirmed),
            "present" => Ok(Self::Present),
            "checked_out" => Ok(Self::CheckedOut),
            "no_show" => Ok(Self::NoShow),
            _ => Err(CoreError::Validation(format!(
                "Invalid presence status '{s}'. Must be one of: \
                 planned, confirmed, present, checked_out, no_show"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Confirmed => "confirmed",
            Self::Present => "present",
            Self::CheckedOut => "checked_out",
            Self::NoShow => "no_show",
        }
    }
}
