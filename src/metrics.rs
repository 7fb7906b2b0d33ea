use crate::state::Collections;

/// Sets the per-collection record gauges from what is currently stored.
pub async fn init_metrics(collections: &Collections) {
    let staff = collections.staff.list().await.map(|v| v.len()).unwrap_or(0);
    set_total(collections.staff.entity_name(), staff);

    let dogs = collections.dogs.list().await.map(|v| v.len()).unwrap_or(0);
    set_total(collections.dogs.entity_name(), dogs);

    let greets = collections
        .meet_and_greets
        .list()
        .await
        .map(|v| v.len())
        .unwrap_or(0);
    set_total(collections.meet_and_greets.entity_name(), greets);

    let engagements = collections.engagements.list().await.map(|v| v.len()).unwrap_or(0);
    set_total(collections.engagements.entity_name(), engagements);

    let observations = collections.observations.list().await.map(|v| v.len()).unwrap_or(0);
    set_total(collections.observations.entity_name(), observations);

    let reports = collections.shift_reports.list().await.map(|v| v.len()).unwrap_or(0);
    set_total(collections.shift_reports.entity_name(), reports);

    tracing::info!(
        "Initialized metrics: Staff={}, Dogs={}, MeetAndGreets={}, Engagements={}, Observations={}, ShiftReports={}",
        staff, dogs, greets, engagements, observations, reports
    );
}

fn set_total(collection: &'static str, count: usize) {
    metrics::gauge!("daycare_records_total", "collection" => collection).set(count as f64);
}

pub fn record_created(collection: &'static str) {
    metrics::counter!("daycare_records_created_total", "collection" => collection).increment(1);
    metrics::gauge!("daycare_records_total", "collection" => collection).increment(1.0);
}

pub fn record_updated(collection: &'static str) {
    metrics::counter!("daycare_records_updated_total", "collection" => collection).increment(1);
}

pub fn record_seeded(collection: &'static str) {
    metrics::counter!("daycare_seeded_total", "collection" => collection).increment(1);
}
