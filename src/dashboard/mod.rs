//! Manager dashboard aggregation.
//!
//! Everything here is a pure function over already-fetched collections.

pub mod charts;
pub mod filters;
pub mod kpi;

pub use charts::{enrollment_trend, meet_and_greet_outcomes, EnrollmentPoint, Outcomes};
pub use filters::{filter_by_date_range, filter_by_store, DateRange, StoreFilter};
pub use kpi::{compute_kpis, Kpis};

use serde::Serialize;

use crate::model::{Dated, Engagement, Located, MeetAndGreet, ShiftReport};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub store: StoreFilter,
    pub range: DateRange,
    pub meet_and_greet_count: usize,
    pub engagement_count: usize,
    pub shift_report_count: usize,
    pub kpis: Kpis,
    pub outcomes: Outcomes,
    pub enrollment_trend: Vec<EnrollmentPoint>,
}

fn scope<T: Located + Dated + Clone>(items: &[T], store: StoreFilter, range: DateRange) -> Vec<T> {
    filter_by_date_range(&filter_by_store(items, store), range)
}

/// Store filter first, then date range, then the derived numbers.
pub fn summarize(
    meet_and_greets: &[MeetAndGreet],
    engagements: &[Engagement],
    shift_reports: &[ShiftReport],
    store: StoreFilter,
    range: DateRange,
) -> DashboardSummary {
    let meet_and_greets = scope(meet_and_greets, store, range);
    let engagements = scope(engagements, store, range);
    let shift_reports = scope(shift_reports, store, range);

    DashboardSummary {
        store,
        range,
        meet_and_greet_count: meet_and_greets.len(),
        engagement_count: engagements.len(),
        shift_report_count: shift_reports.len(),
        kpis: compute_kpis(&meet_and_greets, &shift_reports, &engagements),
        outcomes: meet_and_greet_outcomes(&meet_and_greets),
        enrollment_trend: enrollment_trend(&shift_reports),
    }
}
