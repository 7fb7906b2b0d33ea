use axum::extract::Extension;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{
    error::{ok, ApiResult},
    extract::{ApiJson, Required},
};
use crate::{
    model::{ShiftReport, StoreLocation},
    state::Collections,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShiftReportRequest {
    date: Option<DateTime<Utc>>,
    shift_lead_id: Option<String>,
    enrollment_adds: Option<u32>,
    enrollment_drops: Option<u32>,
    enrollment_pauses: Option<u32>,
    new_visits: Option<u32>,
    return_visits: Option<u32>,
    issues: Option<String>,
    staff_highlights: Option<String>,
    capacity: Option<u32>,
    store: Option<StoreLocation>,
}

// GET /api/shift-reports
pub async fn list_shift_reports(
    Extension(collections): Extension<Collections>,
) -> ApiResult<Vec<ShiftReport>> {
    ok(collections.shift_reports.list().await?)
}

// POST /api/shift-reports
pub async fn create_shift_report(
    Extension(collections): Extension<Collections>,
    ApiJson(payload): ApiJson<CreateShiftReportRequest>,
) -> ApiResult<ShiftReport> {
    let mut required = Required::new("Shift Report");
    let shift_lead_id = required.text("shiftLeadId", payload.shift_lead_id);
    let Some(store) = required.value("store", payload.store) else {
        return Err(required.into_error());
    };
    required.finish()?;

    let record = ShiftReport {
        id: String::new(),
        date: payload.date.unwrap_or_else(Utc::now),
        shift_lead_id,
        enrollment_adds: payload.enrollment_adds.unwrap_or(0),
        enrollment_drops: payload.enrollment_drops.unwrap_or(0),
        enrollment_pauses: payload.enrollment_pauses.unwrap_or(0),
        new_visits: payload.new_visits.unwrap_or(0),
        return_visits: payload.return_visits.unwrap_or(0),
        issues: payload.issues.unwrap_or_default(),
        staff_highlights: payload.staff_highlights.unwrap_or_default(),
        capacity: payload.capacity.unwrap_or(0),
        store,
    };

    let created = collections.shift_reports.create(record).await?;
    crate::metrics::record_created(collections.shift_reports.entity_name());

    tracing::Span::current()
        .record("collection", collections.shift_reports.entity_name())
        .record("action", "create_shift_report")
        .record("record_id", created.id.as_str())
        .record("store", created.store.as_str())
        .record("business_event", "Shift report filed");

    ok(created)
}
