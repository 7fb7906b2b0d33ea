use serde::Serialize;

use crate::model::{Engagement, FeedbackCategory, MeetAndGreet, MeetAndGreetStatus, ShiftReport};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    /// Percent of attended greets that converted.
    pub conversion_rate: u32,
    /// Percent of attended-or-no-show greets that were no-shows.
    pub no_show_rate: u32,
    pub net_enrollment: i64,
    /// Praise share of praise + concern; 100 when there is neither.
    pub positive_feedback_ratio: u32,
    pub praise_count: usize,
    pub concern_count: usize,
}

/// Half-up rounded percentage, `None` for an empty denominator.
fn percent(part: usize, whole: usize) -> Option<u32> {
    if whole == 0 {
        return None;
    }
    let (part, whole) = (part as u64, whole as u64);
    Some(((200 * part + whole) / (2 * whole)) as u32)
}

pub fn compute_kpis(
    meet_and_greets: &[MeetAndGreet],
    shift_reports: &[ShiftReport],
    engagements: &[Engagement],
) -> Kpis {
    let attended = meet_and_greets
        .iter()
        .filter(|mg| mg.status == MeetAndGreetStatus::Attended);
    let attended_count = attended.clone().count();
    let converted_count = attended.filter(|mg| mg.converted).count();
    let no_show_count = meet_and_greets
        .iter()
        .filter(|mg| mg.status == MeetAndGreetStatus::NoShow)
        .count();

    let net_enrollment = shift_reports
        .iter()
        .map(|r| i64::from(r.enrollment_adds) - i64::from(r.enrollment_drops))
        .sum();

    let count_feedback = |category: FeedbackCategory| {
        engagements
            .iter()
            .filter(|e| e.feedback_category == category)
            .count()
    };
    let praise_count = count_feedback(FeedbackCategory::Praise);
    let concern_count = count_feedback(FeedbackCategory::Concern);

    Kpis {
        conversion_rate: percent(converted_count, attended_count).unwrap_or(0),
        no_show_rate: percent(no_show_count, attended_count + no_show_count).unwrap_or(0),
        net_enrollment,
        positive_feedback_ratio: percent(praise_count, praise_count + concern_count).unwrap_or(100),
        praise_count,
        concern_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Milestone, StoreLocation};
    use chrono::Utc;
    use proptest::prelude::*;

    fn greet(status: MeetAndGreetStatus, converted: bool) -> MeetAndGreet {
        let now = Utc::now();
        MeetAndGreet {
            id: "mg".to_string(),
            pet_name: "Rex".to_string(),
            owner_name: "Sam".to_string(),
            greet_date_time: now,
            status,
            converted,
            staff_id: "user-1".to_string(),
            notes: None,
            store: StoreLocation::Ellisville,
            created_at: now,
            updated_at: now,
        }
    }

    fn engagement(category: FeedbackCategory) -> Engagement {
        Engagement {
            id: "e".to_string(),
            parent_name: "Pat".to_string(),
            milestone: Milestone::OneMonth,
            feedback_category: category,
            notes: String::new(),
            staff_id: "user-1".to_string(),
            store: StoreLocation::RockHill,
            created_at: Utc::now(),
        }
    }

    fn report(adds: u32, drops: u32) -> ShiftReport {
        ShiftReport {
            id: "r".to_string(),
            date: Utc::now(),
            shift_lead_id: "user-2".to_string(),
            enrollment_adds: adds,
            enrollment_drops: drops,
            enrollment_pauses: 0,
            new_visits: 0,
            return_visits: 0,
            issues: String::new(),
            staff_highlights: String::new(),
            capacity: 40,
            store: StoreLocation::Ellisville,
        }
    }

    #[test]
    fn conversion_and_no_show_rates() {
        let greets = vec![
            greet(MeetAndGreetStatus::Attended, true),
            greet(MeetAndGreetStatus::Attended, false),
            greet(MeetAndGreetStatus::NoShow, false),
        ];
        let kpis = compute_kpis(&greets, &[], &[]);
        assert_eq!(kpis.conversion_rate, 50);
        assert_eq!(kpis.no_show_rate, 33);
    }

    #[test]
    fn empty_inputs_use_documented_defaults() {
        let kpis = compute_kpis(&[], &[], &[]);
        assert_eq!(kpis.conversion_rate, 0);
        assert_eq!(kpis.no_show_rate, 0);
        assert_eq!(kpis.net_enrollment, 0);
        assert_eq!(kpis.positive_feedback_ratio, 100);
    }

    #[test]
    fn converted_cancellations_do_not_count() {
        let greets = vec![
            greet(MeetAndGreetStatus::Cancelled, true),
            greet(MeetAndGreetStatus::Rescheduled, false),
        ];
        let kpis = compute_kpis(&greets, &[], &[]);
        assert_eq!(kpis.conversion_rate, 0);
        assert_eq!(kpis.no_show_rate, 0);
    }

    #[test]
    fn net_enrollment_can_go_negative() {
        let kpis = compute_kpis(&[], &[report(3, 1), report(0, 5)], &[]);
        assert_eq!(kpis.net_enrollment, -3);
    }

    #[test]
    fn suggestions_are_ignored_by_feedback_ratio() {
        let engagements = vec![
            engagement(FeedbackCategory::Praise),
            engagement(FeedbackCategory::Praise),
            engagement(FeedbackCategory::Concern),
            engagement(FeedbackCategory::Suggestion),
        ];
        let kpis = compute_kpis(&[], &[], &engagements);
        assert_eq!(kpis.positive_feedback_ratio, 67);
        assert_eq!(kpis.praise_count, 2);
        assert_eq!(kpis.concern_count, 1);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(percent(1, 8), Some(13));
        assert_eq!(percent(1, 200), Some(1));
        assert_eq!(percent(0, 0), None);
    }

    fn arb_status() -> impl Strategy<Value = MeetAndGreetStatus> {
        prop_oneof![
            Just(MeetAndGreetStatus::Attended),
            Just(MeetAndGreetStatus::NoShow),
            Just(MeetAndGreetStatus::Cancelled),
            Just(MeetAndGreetStatus::Rescheduled),
        ]
    }

    proptest! {
        #[test]
        fn rates_stay_within_percent_bounds(
            greets in prop::collection::vec((arb_status(), any::<bool>()), 0..40),
            praise in 0usize..20,
            concern in 0usize..20,
        ) {
            let greets: Vec<_> = greets.into_iter().map(|(s, c)| greet(s, c)).collect();
            let mut engagements = vec![engagement(FeedbackCategory::Praise); praise];
            engagements.extend(vec![engagement(FeedbackCategory::Concern); concern]);

            let kpis = compute_kpis(&greets, &[], &engagements);
            prop_assert!(kpis.conversion_rate <= 100);
            prop_assert!(kpis.no_show_rate <= 100);
            prop_assert!(kpis.positive_feedback_ratio <= 100);
            prop_assert_eq!(kpis.praise_count, praise);
        }

        #[test]
        fn net_enrollment_is_adds_minus_drops(pairs in prop::collection::vec((0u32..50, 0u32..50), 0..20)) {
            let reports: Vec<_> = pairs.iter().map(|&(a, d)| report(a, d)).collect();
            let expected: i64 = pairs.iter().map(|&(a, d)| i64::from(a) - i64::from(d)).sum();
            prop_assert_eq!(compute_kpis(&[], &reports, &[]).net_enrollment, expected);
        }
    }
}
