use axum::extract::Extension;
use chrono::NaiveDate;
use serde::Deserialize;

use super::{
    error::{ok, ApiResult},
    extract::ApiQuery,
};
use crate::{
    dashboard::{summarize, DashboardSummary, DateRange, StoreFilter},
    state::Collections,
};

#[derive(Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    store: StoreFilter,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

// GET /api/dashboard?store=Rock%20Hill&from=2024-01-01&to=2024-01-31
pub async fn get_dashboard(
    Extension(collections): Extension<Collections>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> ApiResult<DashboardSummary> {
    let (meet_and_greets, engagements, shift_reports) = futures::try_join!(
        collections.meet_and_greets.list(),
        collections.engagements.list(),
        collections.shift_reports.list(),
    )?;

    let range = DateRange {
        from: query.from,
        to: query.to,
    };
    let summary = summarize(&meet_and_greets, &engagements, &shift_reports, query.store, range);

    tracing::Span::current()
        .record("action", "view_dashboard")
        .record("store", tracing::field::display(query.store));

    ok(summary)
}
