//! Content resolution.
//!
//! Resolves the stored content rows of a visit into one [`ContentBundle`].
//! Resolution never fails a flow: a read error on any sub-lookup degrades
//! to "no content for that step" with a warn log, and applicability is
//! derived from bundle emptiness downstream.

use sqlx::PgPool;

use frontdesk_core::steps::{
    ActionInstructions, ContentBundle, DepartmentBriefing, DocumentRef, EquipmentItem,
};
use frontdesk_core::types::DbId;
use frontdesk_db::models::visit::Visit;
use frontdesk_db::repositories::{
    ActionInfoRepo, DepartmentContentRepo, DepartmentRepo, DocumentRepo, EquipmentRepo, HostRepo,
    TrainingContentRepo, VisitRepo,
};

/// Resolve the department IDs in scope for a visit.
///
/// Each host of the visit contributes its assigned departments; a host
/// with zero assignments is unrestricted and expands to every active
/// department of the visit's site. A visit with no hosts yields the empty
/// set, which makes the department step inapplicable. The result is
/// sorted and deduplicated.
pub async fn resolve_host_departments(pool: &PgPool, visit: &Visit) -> Vec<DbId> {
    match host_departments(pool, visit).await {
        Ok(ids) => ids,
        Err(err) => {
            tracing::warn!(
                visit_id = visit.id,
                error = %err,
                "Host-department resolution failed; suppressing department step"
            );
            Vec::new()
        }
    }
}

async fn host_departments(pool: &PgPool, visit: &Visit) -> Result<Vec<DbId>, sqlx::Error> {
    let host_ids = VisitRepo::host_ids(pool, visit.id).await?;

    let mut department_ids = Vec::new();
    for host_id in host_ids {
        let assigned = HostRepo::department_ids(pool, host_id).await?;
        if assigned.is_empty() {
            // Unrestricted host: all active departments of the site.
            let all = DepartmentRepo::active_ids_by_site(pool, visit.site_id).await?;
            department_ids.extend(all);
        } else {
            department_ids.extend(assigned);
        }
    }

    department_ids.sort_unstable();
    department_ids.dedup();
    Ok(department_ids)
}

/// Resolve the full content bundle of a visit for one language.
///
/// There is no cross-language fallback: a missing `training_contents` row
/// for the requested language leaves the simple steps (and the department
/// briefings hanging off that row) empty.
pub async fn resolve_content(
    pool: &PgPool,
    document_base_url: &str,
    visit: &Visit,
    language: &str,
) -> ContentBundle {
    let mut bundle = ContentBundle::default();

    let content =
        match TrainingContentRepo::find_by_scope(pool, visit.tenant_id, visit.site_id, language)
            .await
        {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(
                    visit_id = visit.id,
                    language,
                    error = %err,
                    "Master content lookup failed; simple steps unavailable"
                );
                None
            }
        };

    if let Some(content) = &content {
        bundle.video_url = content.video_url.clone();
        bundle.risks_text = content.risks_text.clone();
        if let Some(map_document_id) = content.map_document_id {
            bundle.map_document = document_refs(pool, document_base_url, &[map_document_id])
                .await
                .into_iter()
                .next();
        }
        bundle.general_documents =
            document_refs(pool, document_base_url, &content.document_ids).await;

        let department_ids = resolve_host_departments(pool, visit).await;
        if !department_ids.is_empty() {
            bundle.departments =
                resolve_department_briefings(pool, document_base_url, content.id, &department_ids)
                    .await;
        }
    }

    bundle.equipment = resolve_equipment(pool, visit.site_id).await;
    bundle.action_info = resolve_action_info(pool, document_base_url, visit.id).await;

    bundle
}

/// Fetch the briefings of the in-scope departments, joined with the
/// department names. Briefings without real content are already filtered
/// at the query; departments that have since been deactivated drop out
/// here.
async fn resolve_department_briefings(
    pool: &PgPool,
    document_base_url: &str,
    training_content_id: DbId,
    department_ids: &[DbId],
) -> Vec<DepartmentBriefing> {
    let contents =
        match DepartmentContentRepo::find_with_content(pool, training_content_id, department_ids)
            .await
        {
            Ok(contents) => contents,
            Err(err) => {
                tracing::warn!(
                    training_content_id,
                    error = %err,
                    "Department briefing lookup failed; suppressing department step"
                );
                return Vec::new();
            }
        };

    let departments = match DepartmentRepo::find_active_by_ids(pool, department_ids).await {
        Ok(departments) => departments,
        Err(err) => {
            tracing::warn!(
                training_content_id,
                error = %err,
                "Department lookup failed; suppressing department step"
            );
            return Vec::new();
        }
    };

    let mut briefings = Vec::new();
    for content in contents {
        let Some(department) = departments.iter().find(|d| d.id == content.department_id) else {
            continue;
        };
        let documents = document_refs(pool, document_base_url, &content.document_ids).await;
        briefings.push(DepartmentBriefing {
            department_id: department.id,
            department_name: department.name.clone(),
            body_text: content.body_text,
            documents,
        });
    }
    briefings
}

async fn resolve_equipment(pool: &PgPool, site_id: DbId) -> Vec<EquipmentItem> {
    match EquipmentRepo::list_active_by_site(pool, site_id).await {
        Ok(rows) => rows
            .into_iter()
            .map(|row| EquipmentItem {
                id: row.id,
                name: row.name,
                description: row.description,
            })
            .collect(),
        Err(err) => {
            tracing::warn!(site_id, error = %err, "Equipment lookup failed; suppressing step");
            Vec::new()
        }
    }
}

async fn resolve_action_info(
    pool: &PgPool,
    document_base_url: &str,
    visit_id: DbId,
) -> Option<ActionInstructions> {
    match ActionInfoRepo::find_by_visit(pool, visit_id).await {
        Ok(Some(row)) => {
            let documents = document_refs(pool, document_base_url, &row.document_ids).await;
            Some(ActionInstructions {
                instructions: row.instructions,
                documents,
            })
        }
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(visit_id, error = %err, "Action info lookup failed; suppressing step");
            None
        }
    }
}

/// Resolve stored document references to public URLs. Unknown IDs are
/// silently dropped; a failed lookup degrades to no documents.
async fn document_refs(pool: &PgPool, document_base_url: &str, ids: &[DbId]) -> Vec<DocumentRef> {
    if ids.is_empty() {
        return Vec::new();
    }
    match DocumentRepo::find_by_ids(pool, ids).await {
        Ok(documents) => documents
            .into_iter()
            .map(|doc| DocumentRef {
                id: doc.id,
                file_name: doc.file_name,
                url: format!("{document_base_url}/{}", doc.storage_key),
            })
            .collect(),
        Err(err) => {
            tracing::warn!(error = %err, "Document lookup failed; dropping attachments");
            Vec::new()
        }
    }
}
