use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{MeetAndGreet, MeetAndGreetStatus, ShiftReport};

/// Bars of the meet-and-greet outcome chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcomes {
    pub converted: usize,
    pub attended_no_sale: usize,
    pub no_show: usize,
    pub cancelled: usize,
}

pub fn meet_and_greet_outcomes(items: &[MeetAndGreet]) -> Outcomes {
    items.iter().fold(Outcomes::default(), |mut acc, mg| {
        if mg.converted {
            acc.converted += 1;
        }
        match mg.status {
            MeetAndGreetStatus::Attended if !mg.converted => acc.attended_no_sale += 1,
            MeetAndGreetStatus::NoShow => acc.no_show += 1,
            MeetAndGreetStatus::Cancelled => acc.cancelled += 1,
            _ => {}
        }
        acc
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EnrollmentPoint {
    pub date: NaiveDate,
    pub adds: u64,
    pub drops: u64,
    pub net: i64,
}

/// Daily enrollment totals, oldest day first.
pub fn enrollment_trend(reports: &[ShiftReport]) -> Vec<EnrollmentPoint> {
    let mut days: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for report in reports {
        let entry = days.entry(report.date.date_naive()).or_default();
        entry.0 += u64::from(report.enrollment_adds);
        entry.1 += u64::from(report.enrollment_drops);
    }

    days.into_iter()
        .map(|(date, (adds, drops))| EnrollmentPoint {
            date,
            adds,
            drops,
            net: adds as i64 - drops as i64,
        })
        .collect()
}
