use axum::extract::Extension;
use chrono::Utc;
use serde::Deserialize;

use super::{
    error::{ok, ApiResult},
    extract::{ApiJson, Required},
};
use crate::{
    model::{Observation, ObservationType, Shift, StoreLocation},
    state::Collections,
};

/// `dogName` is stored as sent; it is not looked up from the dog record.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateObservationRequest {
    dog_id: Option<String>,
    dog_name: Option<String>,
    shift: Option<Shift>,
    observation_type: Option<ObservationType>,
    notes: Option<String>,
    staff_id: Option<String>,
    store: Option<StoreLocation>,
}

// GET /api/observations
pub async fn list_observations(
    Extension(collections): Extension<Collections>,
) -> ApiResult<Vec<Observation>> {
    ok(collections.observations.list().await?)
}

// POST /api/observations
pub async fn create_observation(
    Extension(collections): Extension<Collections>,
    ApiJson(payload): ApiJson<CreateObservationRequest>,
) -> ApiResult<Observation> {
    let mut required = Required::new("Observation");
    let dog_id = required.text("dogId", payload.dog_id);
    let dog_name = required.text("dogName", payload.dog_name);
    let observation_type = required.value("observationType", payload.observation_type);
    let staff_id = required.text("staffId", payload.staff_id);
    let store = required.value("store", payload.store);
    let (Some(observation_type), Some(store)) = (observation_type, store) else {
        return Err(required.into_error());
    };
    required.finish()?;

    // The observation is always dated when it is logged.
    let record = Observation {
        id: String::new(),
        dog_id,
        dog_name,
        date: Utc::now(),
        shift: payload.shift.unwrap_or_default(),
        observation_type,
        notes: payload.notes.unwrap_or_default(),
        staff_id,
        store,
    };

    let created = collections.observations.create(record).await?;
    crate::metrics::record_created(collections.observations.entity_name());

    tracing::Span::current()
        .record("collection", collections.observations.entity_name())
        .record("action", "create_observation")
        .record("record_id", created.id.as_str())
        .record("store", created.store.as_str())
        .record("business_event", "Dog observation logged");

    ok(created)
}
