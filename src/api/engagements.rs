use axum::extract::Extension;
use chrono::Utc;
use serde::Deserialize;

use super::{
    error::{ok, ApiResult},
    extract::{ApiJson, Required},
};
use crate::{
    model::{Engagement, FeedbackCategory, Milestone, StoreLocation},
    state::Collections,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEngagementRequest {
    parent_name: Option<String>,
    milestone: Option<Milestone>,
    feedback_category: Option<FeedbackCategory>,
    notes: Option<String>,
    staff_id: Option<String>,
    store: Option<StoreLocation>,
}

// GET /api/engagements
pub async fn list_engagements(
    Extension(collections): Extension<Collections>,
) -> ApiResult<Vec<Engagement>> {
    ok(collections.engagements.list().await?)
}

// POST /api/engagements
pub async fn create_engagement(
    Extension(collections): Extension<Collections>,
    ApiJson(payload): ApiJson<CreateEngagementRequest>,
) -> ApiResult<Engagement> {
    let mut required = Required::new("Engagement");
    let parent_name = required.text("parentName", payload.parent_name);
    let milestone = required.value("milestone", payload.milestone);
    let feedback_category = required.value("feedbackCategory", payload.feedback_category);
    let staff_id = required.text("staffId", payload.staff_id);
    let store = required.value("store", payload.store);
    let (Some(milestone), Some(feedback_category), Some(store)) = (milestone, feedback_category, store)
    else {
        return Err(required.into_error());
    };
    required.finish()?;

    let record = Engagement {
        id: String::new(),
        parent_name,
        milestone,
        feedback_category,
        notes: payload.notes.unwrap_or_default(),
        staff_id,
        store,
        created_at: Utc::now(),
    };

    let created = collections.engagements.create(record).await?;
    crate::metrics::record_created(collections.engagements.entity_name());

    tracing::Span::current()
        .record("collection", collections.engagements.entity_name())
        .record("action", "create_engagement")
        .record("record_id", created.id.as_str())
        .record("store", created.store.as_str())
        .record("business_event", "Pet parent engagement logged");

    ok(created)
}
