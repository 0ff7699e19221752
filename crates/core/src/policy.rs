//! Channel flow policies.
//!
//! Three delivery channels consume the same state machine and content
//! resolver but differ in enforcement. The policy owns enforcement only;
//! content and applicability decisions stay in the resolver and the step
//! catalog. The policy is selected once at flow start from [`FlowChannel`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::steps::StepKind;
use crate::training::{next_step, StepFlags};

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

/// The delivery channel a flow runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowChannel {
    /// On-site device, strict enforcement, batch check-in.
    Kiosk,
    /// Email invitation, free mode with a full-training skip escape.
    Invitation,
    /// Self-service portal, strict enforcement, one visitor per session.
    Portal,
}

impl FlowChannel {
    /// Parse a channel string from the database or a request.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "kiosk" => Ok(Self::Kiosk),
            "invitation" => Ok(Self::Invitation),
            "portal" => Ok(Self::Portal),
            _ => Err(CoreError::Validation(format!(
                "Invalid flow channel '{s}'. Must be one of: kiosk, invitation, portal"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kiosk => "kiosk",
            Self::Invitation => "invitation",
            Self::Portal => "portal",
        }
    }

    /// The enforcement policy for this channel.
    pub fn policy(&self) -> &'static dyn FlowPolicy {
        match self {
            Self::Kiosk => &KioskPolicy,
            Self::Invitation => &InvitationPolicy,
            Self::Portal => &PortalPolicy,
        }
    }
}

// ---------------------------------------------------------------------------
// Policy trait
// ---------------------------------------------------------------------------

/// Per-channel enforcement rules.
pub trait FlowPolicy: Send + Sync {
    /// The channel this policy belongs to.
    fn channel(&self) -> FlowChannel;

    /// Whether `step` may be confirmed given the visitor's current flags.
    ///
    /// `steps` is the frozen applicable-step list of the session. Every
    /// policy must accept a re-confirmation of an already-set flag so that
    /// duplicate requests stay idempotent.
    fn can_advance(&self, flags: &StepFlags, steps: &[StepKind], step: StepKind) -> bool;

    /// Whether the whole training can be skipped from within the flow.
    fn allows_skip(&self) -> bool;

    /// Whether the session is bound to exactly one visitor.
    fn single_visitor(&self) -> bool;
}

/// Strict order enforcement shared by the kiosk and portal policies:
/// a step is confirmable only when it is the next unconfirmed step.
fn strict_can_advance(flags: &StepFlags, steps: &[StepKind], step: StepKind) -> bool {
    flags.is_set(step) || next_step(flags, steps) == Some(step)
}

/// Kiosk channel: strict, device-scoped, several visitors per session.
pub struct KioskPolicy;

impl FlowPolicy for KioskPolicy {
    fn channel(&self) -> FlowChannel {
        FlowChannel::Kiosk
    }

    fn can_advance(&self, flags: &StepFlags, steps: &[StepKind], step: StepKind) -> bool {
        strict_can_advance(flags, steps, step)
    }

    fn allows_skip(&self) -> bool {
        false
    }

    fn single_visitor(&self) -> bool {
        false
    }
}

/// Invitation channel: free mode, confirmation optional, skip always
/// available.
pub struct InvitationPolicy;

impl FlowPolicy for InvitationPolicy {
    fn channel(&self) -> FlowChannel {
        FlowChannel::Invitation
    }

    fn can_advance(&self, _flags: &StepFlags, _steps: &[StepKind], _step: StepKind) -> bool {
        true
    }

    fn allows_skip(&self) -> bool {
        true
    }

    fn single_visitor(&self) -> bool {
        false
    }
}

/// Portal channel: kiosk enforcement bound to one visitor identity.
pub struct PortalPolicy;

impl FlowPolicy for PortalPolicy {
    fn channel(&self) -> FlowChannel {
        FlowChannel::Portal
    }

    fn can_advance(&self, flags: &StepFlags, steps: &[StepKind], step: StepKind) -> bool {
        strict_can_advance(flags, steps, step)
    }

    fn allows_skip(&self) -> bool {
        false
    }

    fn single_visitor(&self) -> bool {
        true
    }
}
