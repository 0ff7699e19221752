//! Per-visitor training state machine.
//!
//! States: `Pending -> InProgress -> Completed`, with side-branches
//! `Skipped` (validity evaluation at session start, or the free-channel
//! escape) and `NotAvailable` (zero applicable steps). Step flags are only
//! ever set, never cleared; re-confirming a set flag is an idempotent no-op
//! so network retries are harmless.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::steps::StepKind;

// ---------------------------------------------------------------------------
// Training status
// ---------------------------------------------------------------------------

/// Overall training status of a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    Pending,
    NotAvailable,
    Skipped,
    InProgress,
    Completed,
}

impl TrainingStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "not_available" => Ok(Self::NotAvailable),
            "skipped" => Ok(Self::Skipped),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid training status '{s}'. Must be one of: \
                 pending, not_available, skipped, in_progress, completed"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::NotAvailable => "not_available",
            Self::Skipped => "skipped",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Whether the training can still be skipped via validity evaluation.
    /// Once steps have been touched (or the training ended) this is gone.
    pub fn skippable(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

// ---------------------------------------------------------------------------
// Step flags
// ---------------------------------------------------------------------------

/// Per-step completion flags, mirroring the `visitors` boolean columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepFlags {
    pub video: bool,
    pub map: bool,
    pub risks: bool,
    pub department: bool,
    pub equipment: bool,
    pub action_info: bool,
}

impl StepFlags {
    /// Whether the flag for a step is set.
    pub fn is_set(&self, step: StepKind) -> bool {
        match step {
            StepKind::Video => self.video,
            StepKind::Map => self.map,
            StepKind::Risks => self.risks,
            StepKind::Department => self.department,
            StepKind::Equipment => self.equipment,
            StepKind::ActionInfo => self.action_info,
        }
    }

    /// Return a copy with the flag for `step` set.
    pub fn with_step(mut self, step: StepKind) -> Self {
        match step {
            StepKind::Video => self.video = true,
            StepKind::Map => self.map = true,
            StepKind::Risks => self.risks = true,
            StepKind::Department => self.department = true,
            StepKind::Equipment => self.equipment = true,
            StepKind::ActionInfo => self.action_info = true,
        }
        self
    }

    /// The confirmed steps among `steps`, in the given order.
    pub fn completed(&self, steps: &[StepKind]) -> Vec<StepKind> {
        steps.iter().copied().filter(|s| self.is_set(*s)).collect()
    }

    /// Whether every step in `steps` is confirmed.
    pub fn all_done(&self, steps: &[StepKind]) -> bool {
        steps.iter().all(|s| self.is_set(*s))
    }
}

/// The first unconfirmed step of `steps`, or `None` when all are done.
pub fn next_step(flags: &StepFlags, steps: &[StepKind]) -> Option<StepKind> {
    steps.iter().copied().find(|s| !flags.is_set(*s))
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Outcome of confirming one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepConfirmation {
    /// Flags after the confirmation.
    pub flags: StepFlags,
    /// Status after the confirmation.
    pub status: TrainingStatus,
    /// True when this confirmation started the training
    /// (`training_started_at` must be stamped).
    pub started: bool,
    /// True when this confirmation completed the training
    /// (`training_completed_at` and the version must be stamped).
    pub completed: bool,
    /// True when the flag was already set and nothing changed.
    pub already_confirmed: bool,
}

/// Confirm one step for a visitor.
///
/// `steps` is the applicable-step list frozen on the flow session.
/// Confirming a step outside that list is rejected with
/// [`CoreError::InvalidStep`] so stale clients cannot mark a since-removed
/// step. Re-confirming an already-set flag returns the unchanged state.
pub fn confirm_step(
    flags: &StepFlags,
    status: TrainingStatus,
    steps: &[StepKind],
    step: StepKind,
) -> Result<StepConfirmation, CoreError> {
    if !steps.contains(&step) {
        return Err(CoreError::InvalidStep(format!(
            "Step '{}' is not applicable for this training session",
            step.as_str()
        )));
    }

    match status {
        TrainingStatus::Skipped => {
            return Err(CoreError::Conflict(
                "Training was skipped; steps can no longer be confirmed".to_string(),
            ));
        }
        TrainingStatus::NotAvailable => {
            return Err(CoreError::Conflict(
                "No training is available for this visitor".to_string(),
            ));
        }
        _ => {}
    }

    if flags.is_set(step) {
        return Ok(StepConfirmation {
            flags: *flags,
            status,
            started: false,
            completed: false,
            already_confirmed: true,
        });
    }

    let new_flags = flags.with_step(step);
    let started = status == TrainingStatus::Pending;
    let completed = new_flags.all_done(steps);
    let new_status = if completed {
        TrainingStatus::Completed
    } else {
        TrainingStatus::InProgress
    };

    Ok(StepConfirmation {
        flags: new_flags,
        status: new_status,
        started,
        completed,
        already_confirmed: false,
    })
}
