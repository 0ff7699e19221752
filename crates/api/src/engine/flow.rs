//! Flow session service.
//!
//! Drives a training flow end to end: skip evaluation, content resolution,
//! step-catalog freezing, per-visitor step confirmation under the channel
//! policy, and the free-channel skip escape. All state mutations are
//! single conditional UPDATEs on visitor rows; the session row itself is
//! immutable after creation.

use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use frontdesk_core::content::validate_language;
use frontdesk_core::error::CoreError;
use frontdesk_core::identity;
use frontdesk_core::policy::FlowChannel;
use frontdesk_core::steps::{applicable_steps, ContentBundle, StepKind};
use frontdesk_core::training::{self, TrainingStatus};
use frontdesk_core::types::DbId;
use frontdesk_core::validity::{should_skip, ValidityConfig};
use frontdesk_db::models::flow_session::FlowSession;
use frontdesk_db::models::visit::Visit;
use frontdesk_db::models::visitor::Visitor;
use frontdesk_db::repositories::{
    FlowSessionRepo, TrainingConfigRepo, TranslationRepo, VisitRepo, VisitorRepo,
};

use crate::engine::resolver;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Length of the opaque flow session key.
const SESSION_KEY_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

/// Request payload for starting a flow.
#[derive(Debug, Clone, Deserialize)]
pub struct StartFlow {
    pub visit_id: DbId,
    pub channel: String,
    pub language: String,
    /// Visitors taking part; defaults to every visitor of the visit.
    pub visitor_ids: Option<Vec<DbId>>,
}

/// One step of the frozen catalog with its translated label.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub step: StepKind,
    pub label: String,
}

/// Training state of one visitor within a flow.
#[derive(Debug, Clone, Serialize)]
pub struct VisitorStateView {
    pub visitor_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub training_status: TrainingStatus,
    pub completed_steps: Vec<StepKind>,
    pub next_step: Option<StepKind>,
}

/// The flow handle returned to the delivery channel: session key, frozen
/// step catalog, per-visitor state and the resolved content bundle.
#[derive(Debug, Clone, Serialize)]
pub struct FlowHandleView {
    pub session_key: String,
    pub visit_id: DbId,
    pub channel: FlowChannel,
    pub language: String,
    pub steps: Vec<StepView>,
    pub visitors: Vec<VisitorStateView>,
    pub content: ContentBundle,
}

/// Training summary for one visitor, applicability re-resolved from the
/// current content rather than a frozen session.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummaryView {
    pub visitor_id: DbId,
    pub state: TrainingStatus,
    pub completed_steps: Vec<StepKind>,
    pub applicable_steps: Vec<StepKind>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Start a training flow for a visit.
///
/// Evaluates validity skipping per pending visitor, resolves the content
/// bundle once, freezes the applicable-step catalog on a new session row
/// and returns the full handle. Visitors with zero applicable steps move
/// to `not_available` instead of entering an empty training.
pub async fn start_flow(state: &AppState, input: &StartFlow) -> AppResult<FlowHandleView> {
    let channel = FlowChannel::from_str_db(&input.channel)?;
    validate_language(&input.language)?;

    let visit = VisitRepo::find_by_id(&state.pool, input.visit_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "visit",
            id: input.visit_id,
        })?;

    let mut visitors = load_flow_visitors(state, &visit, input.visitor_ids.as_deref()).await?;
    if visitors.is_empty() {
        return Err(AppError::BadRequest(
            "Cannot start a flow for a visit without visitors".to_string(),
        ));
    }
    let policy = channel.policy();
    if policy.single_visitor() && visitors.len() != 1 {
        return Err(CoreError::Validation(format!(
            "The {} channel carries exactly one visitor per session",
            channel.as_str()
        ))
        .into());
    }

    let config = TrainingConfigRepo::get_or_create(&state.pool, visit.tenant_id).await?;
    let validity = ValidityConfig {
        skip_threshold_days: config.skip_threshold_days,
        current_version: config.training_version,
    };
    evaluate_validity_skips(state, &visit, &validity, &mut visitors).await?;

    let bundle = resolver::resolve_content(
        &state.pool,
        &state.config.document_base_url,
        &visit,
        &input.language,
    )
    .await;
    let steps = applicable_steps(&bundle);

    if steps.is_empty() {
        for visitor in visitors.iter_mut() {
            if visitor.training_status == TrainingStatus::Pending.as_str() {
                if let Some(updated) =
                    VisitorRepo::mark_not_available(&state.pool, visitor.id).await?
                {
                    *visitor = updated;
                }
            }
        }
    }

    let session_key = generate_session_key();
    let visitor_ids: Vec<DbId> = visitors.iter().map(|v| v.id).collect();
    let step_strings: Vec<String> = steps.iter().map(|s| s.as_str().to_string()).collect();
    let session = FlowSessionRepo::create(
        &state.pool,
        visit.tenant_id,
        visit.id,
        &session_key,
        channel.as_str(),
        &input.language,
        &visitor_ids,
        &step_strings,
    )
    .await?;

    tracing::info!(
        visit_id = visit.id,
        channel = channel.as_str(),
        language = %input.language,
        visitors = visitors.len(),
        steps = steps.len(),
        "Started training flow"
    );

    build_handle_view(state, &session, &steps, &visitors, bundle).await
}

/// Re-read a flow handle: stored step catalog, fresh visitor states, and
/// a freshly resolved content bundle for display.
pub async fn get_flow(state: &AppState, session_key: &str) -> AppResult<FlowHandleView> {
    let session = find_session(state, session_key).await?;
    let steps = session_steps(&session)?;
    let visitors = VisitorRepo::list_by_ids(&state.pool, &session.visitor_ids).await?;

    let visit = VisitRepo::find_by_id(&state.pool, session.visit_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "visit",
            id: session.visit_id,
        })?;
    let bundle = resolver::resolve_content(
        &state.pool,
        &state.config.document_base_url,
        &visit,
        &session.language,
    )
    .await;

    build_handle_view(state, &session, &steps, &visitors, bundle).await
}

/// The next unconfirmed step of a visitor within a flow, or `None` when
/// the training is finished or was bypassed.
pub async fn current_step(
    state: &AppState,
    session_key: &str,
    visitor_id: DbId,
) -> AppResult<Option<StepKind>> {
    let session = find_session(state, session_key).await?;
    let visitor = flow_visitor(state, &session, visitor_id).await?;
    let steps = session_steps(&session)?;

    let status = TrainingStatus::from_str_db(&visitor.training_status)?;
    if !matches!(status, TrainingStatus::Pending | TrainingStatus::InProgress) {
        return Ok(None);
    }
    Ok(training::next_step(&visitor.step_flags(), &steps))
}

/// Confirm one step for a visitor under the session's channel policy.
///
/// Idempotent: re-confirming an already-set flag returns the unchanged
/// state without touching the row.
pub async fn confirm_step(
    state: &AppState,
    session_key: &str,
    visitor_id: DbId,
    step_name: &str,
) -> AppResult<VisitorStateView> {
    let session = find_session(state, session_key).await?;
    let visitor = flow_visitor(state, &session, visitor_id).await?;
    let step = StepKind::from_str_db(step_name)?;
    let steps = session_steps(&session)?;

    let channel = FlowChannel::from_str_db(&session.channel)?;
    let flags = visitor.step_flags();
    let status = TrainingStatus::from_str_db(&visitor.training_status)?;

    if !channel.policy().can_advance(&flags, &steps, step) {
        return Err(CoreError::InvalidStep(format!(
            "Step '{}' cannot be confirmed yet; steps must be completed in order",
            step.as_str()
        ))
        .into());
    }

    let confirmation = training::confirm_step(&flags, status, &steps, step)?;
    if confirmation.already_confirmed {
        return Ok(visitor_state_view(&visitor, &steps)?);
    }

    let config = TrainingConfigRepo::get_or_create(&state.pool, session.tenant_id).await?;
    let updated = VisitorRepo::confirm_step(
        &state.pool,
        visitor.id,
        step,
        confirmation.status.as_str(),
        confirmation.completed,
        config.training_version,
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "visitor",
        id: visitor.id,
    })?;

    tracing::debug!(
        visitor_id = visitor.id,
        step = step.as_str(),
        status = confirmation.status.as_str(),
        "Confirmed training step"
    );

    Ok(visitor_state_view(&updated, &steps)?)
}

/// Skip the entire training for a visitor. Only the free channel policy
/// allows this; strict channels get `SkipNotAllowed`. Idempotent for an
/// already-skipped training.
pub async fn skip_training(
    state: &AppState,
    session_key: &str,
    visitor_id: DbId,
) -> AppResult<VisitorStateView> {
    let session = find_session(state, session_key).await?;
    let visitor = flow_visitor(state, &session, visitor_id).await?;
    let steps = session_steps(&session)?;

    let channel = FlowChannel::from_str_db(&session.channel)?;
    if !channel.policy().allows_skip() {
        return Err(CoreError::SkipNotAllowed.into());
    }

    let status = TrainingStatus::from_str_db(&visitor.training_status)?;
    if status == TrainingStatus::Skipped {
        return Ok(visitor_state_view(&visitor, &steps)?);
    }

    let config = TrainingConfigRepo::get_or_create(&state.pool, session.tenant_id).await?;
    let updated = VisitorRepo::mark_skipped(&state.pool, visitor.id, config.training_version)
        .await?
        .ok_or_else(|| {
            CoreError::Conflict("Training can no longer be skipped".to_string())
        })?;

    tracing::info!(visitor_id = visitor.id, "Training skipped on request");

    Ok(visitor_state_view(&updated, &steps)?)
}

/// Training summary of a visitor outside any particular session.
/// Applicability is re-resolved from the current content of the visit.
pub async fn training_summary(
    state: &AppState,
    visitor_id: DbId,
    language: &str,
) -> AppResult<TrainingSummaryView> {
    validate_language(language)?;

    let visitor = VisitorRepo::find_by_id(&state.pool, visitor_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "visitor",
            id: visitor_id,
        })?;
    let visit = VisitRepo::find_by_id(&state.pool, visitor.visit_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "visit",
            id: visitor.visit_id,
        })?;

    let bundle = resolver::resolve_content(
        &state.pool,
        &state.config.document_base_url,
        &visit,
        language,
    )
    .await;
    let steps = applicable_steps(&bundle);

    Ok(TrainingSummaryView {
        visitor_id: visitor.id,
        state: TrainingStatus::from_str_db(&visitor.training_status)?,
        completed_steps: visitor.step_flags().completed(&steps),
        applicable_steps: steps,
    })
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Generate an opaque, URL-safe session key.
fn generate_session_key() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_KEY_LEN)
        .map(char::from)
        .collect()
}

async fn find_session(state: &AppState, session_key: &str) -> AppResult<FlowSession> {
    FlowSessionRepo::find_by_key(&state.pool, session_key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Flow session '{session_key}' not found")))
}

/// Load a visitor and verify flow membership. Visitors outside the
/// session's ID list are rejected before any mutation.
async fn flow_visitor(
    state: &AppState,
    session: &FlowSession,
    visitor_id: DbId,
) -> AppResult<Visitor> {
    if !session.visitor_ids.contains(&visitor_id) {
        return Err(CoreError::UnknownVisitor(visitor_id).into());
    }
    let visitor = VisitorRepo::find_by_id(&state.pool, visitor_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "visitor",
            id: visitor_id,
        })?;
    Ok(visitor)
}

/// Parse the frozen step list stored on a session row.
fn session_steps(session: &FlowSession) -> AppResult<Vec<StepKind>> {
    session
        .steps
        .iter()
        .map(|s| StepKind::from_str_db(s))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| {
            AppError::InternalError(format!(
                "Flow session {} carries an unknown step identifier",
                session.id
            ))
        })
}

/// The visitors taking part in a flow. An explicit ID list must be a
/// subset of the visit's visitors; the default is all of them.
async fn load_flow_visitors(
    state: &AppState,
    visit: &Visit,
    visitor_ids: Option<&[DbId]>,
) -> AppResult<Vec<Visitor>> {
    let Some(ids) = visitor_ids else {
        return Ok(VisitorRepo::list_by_visit(&state.pool, visit.id).await?);
    };
    if ids.is_empty() {
        return Err(AppError::BadRequest(
            "visitor_ids must not be empty when given".to_string(),
        ));
    }

    let visitors = VisitorRepo::list_by_ids(&state.pool, ids).await?;
    for id in ids {
        match visitors.iter().find(|v| v.id == *id) {
            Some(visitor) if visitor.visit_id == visit.id => {}
            _ => {
                return Err(CoreError::Validation(format!(
                    "Visitor {id} does not belong to visit {}",
                    visit.id
                ))
                .into());
            }
        }
    }
    Ok(visitors)
}

/// Evaluate validity skipping for every pending visitor with a usable
/// identity. A positive evaluation short-circuits the visitor to
/// `skipped` before the step catalog is consulted.
async fn evaluate_validity_skips(
    state: &AppState,
    visit: &Visit,
    validity: &ValidityConfig,
    visitors: &mut [Visitor],
) -> AppResult<()> {
    if validity.skip_threshold_days <= 0 {
        return Ok(());
    }
    let now = chrono::Utc::now();
    for visitor in visitors.iter_mut() {
        if visitor.training_status != TrainingStatus::Pending.as_str() {
            continue;
        }
        let key = identity::identity_key(
            &visitor.first_name,
            &visitor.last_name,
            visitor.email.as_deref(),
        );
        let Some(key) = key else { continue };

        let prior =
            VisitorRepo::prior_completion(&state.pool, visit.tenant_id, &key, visitor.id).await?;
        if should_skip(prior.as_ref(), validity, now) {
            if let Some(updated) =
                VisitorRepo::mark_skipped(&state.pool, visitor.id, validity.current_version).await?
            {
                tracing::info!(
                    visitor_id = updated.id,
                    "Training skipped via recent prior completion"
                );
                *visitor = updated;
            }
        }
    }
    Ok(())
}

/// Assemble the handle payload: translated step labels plus per-visitor
/// state views.
async fn build_handle_view(
    state: &AppState,
    session: &FlowSession,
    steps: &[StepKind],
    visitors: &[Visitor],
    bundle: ContentBundle,
) -> AppResult<FlowHandleView> {
    let mut step_views = Vec::with_capacity(steps.len());
    for step in steps {
        let label = TranslationRepo::translate(
            &state.pool,
            session.tenant_id,
            &session.language,
            step.label_key(),
            step.default_label(),
        )
        .await;
        step_views.push(StepView { step: *step, label });
    }

    let visitor_views = visitors
        .iter()
        .map(|v| visitor_state_view(v, steps))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FlowHandleView {
        session_key: session.session_key.clone(),
        visit_id: session.visit_id,
        channel: FlowChannel::from_str_db(&session.channel)?,
        language: session.language.clone(),
        steps: step_views,
        visitors: visitor_views,
        content: bundle,
    })
}

fn visitor_state_view(
    visitor: &Visitor,
    steps: &[StepKind],
) -> Result<VisitorStateView, CoreError> {
    let flags = visitor.step_flags();
    let status = TrainingStatus::from_str_db(&visitor.training_status)?;
    let next = if matches!(status, TrainingStatus::Pending | TrainingStatus::InProgress) {
        training::next_step(&flags, steps)
    } else {
        None
    };
    Ok(VisitorStateView {
        visitor_id: visitor.id,
        first_name: visitor.first_name.clone(),
        last_name: visitor.last_name.clone(),
        training_status: status,
        completed_steps: flags.completed(steps),
        next_step: next,
    })
}
