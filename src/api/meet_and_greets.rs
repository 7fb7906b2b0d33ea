use axum::extract::{Extension, Path};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{
    error::{ok, ApiError, ApiResult},
    extract::{ApiJson, Required},
};
use crate::{
    model::{MeetAndGreet, MeetAndGreetStatus, StoreLocation},
    state::Collections,
    store::StoreError,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetAndGreetRequest {
    pet_name: Option<String>,
    owner_name: Option<String>,
    greet_date_time: Option<DateTime<Utc>>,
    status: Option<MeetAndGreetStatus>,
    converted: Option<bool>,
    staff_id: Option<String>,
    notes: Option<String>,
    store: Option<StoreLocation>,
}

/// Fields a PUT may change. `id`, `createdAt` and `updatedAt` are managed by
/// the server and ignored when sent.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeetAndGreetRequest {
    pet_name: Option<String>,
    owner_name: Option<String>,
    greet_date_time: Option<DateTime<Utc>>,
    status: Option<MeetAndGreetStatus>,
    converted: Option<bool>,
    staff_id: Option<String>,
    notes: Option<String>,
    store: Option<StoreLocation>,
}

impl UpdateMeetAndGreetRequest {
    fn apply(self, mut current: MeetAndGreet) -> MeetAndGreet {
        if let Some(pet_name) = self.pet_name {
            current.pet_name = pet_name;
        }
        if let Some(owner_name) = self.owner_name {
            current.owner_name = owner_name;
        }
        if let Some(greet_date_time) = self.greet_date_time {
            current.greet_date_time = greet_date_time;
        }
        if let Some(status) = self.status {
            current.status = status;
        }
        if let Some(converted) = self.converted {
            current.converted = converted;
        }
        if let Some(staff_id) = self.staff_id {
            current.staff_id = staff_id;
        }
        if let Some(notes) = self.notes {
            current.notes = Some(notes);
        }
        if let Some(store) = self.store {
            current.store = store;
        }
        current
    }
}

// GET /api/meet-and-greets
pub async fn list_meet_and_greets(
    Extension(collections): Extension<Collections>,
) -> ApiResult<Vec<MeetAndGreet>> {
    ok(collections.meet_and_greets.list().await?)
}

// POST /api/meet-and-greets
pub async fn create_meet_and_greet(
    Extension(collections): Extension<Collections>,
    ApiJson(payload): ApiJson<CreateMeetAndGreetRequest>,
) -> ApiResult<MeetAndGreet> {
    let mut required = Required::new("Meet & Greet");
    let pet_name = required.text("petName", payload.pet_name);
    let owner_name = required.text("ownerName", payload.owner_name);
    let greet_date_time = required.value("greetDateTime", payload.greet_date_time);
    let staff_id = required.text("staffId", payload.staff_id);
    let store = required.value("store", payload.store);
    let (Some(greet_date_time), Some(store)) = (greet_date_time, store) else {
        return Err(required.into_error());
    };
    required.finish()?;

    let now = Utc::now();
    let record = MeetAndGreet {
        id: String::new(),
        pet_name,
        owner_name,
        greet_date_time,
        status: payload.status.unwrap_or_default(),
        converted: payload.converted.unwrap_or(false),
        staff_id,
        notes: Some(payload.notes.unwrap_or_default()),
        store,
        created_at: now,
        updated_at: now,
    };

    let created = collections.meet_and_greets.create(record).await?;
    crate::metrics::record_created(collections.meet_and_greets.entity_name());

    tracing::Span::current()
        .record("collection", collections.meet_and_greets.entity_name())
        .record("action", "create_meet_and_greet")
        .record("record_id", created.id.as_str())
        .record("store", created.store.as_str())
        .record("business_event", "Meet & Greet logged");

    ok(created)
}

// PUT /api/meet-and-greets/:id
pub async fn update_meet_and_greet(
    Extension(collections): Extension<Collections>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateMeetAndGreetRequest>,
) -> ApiResult<MeetAndGreet> {
    let updated = match collections
        .meet_and_greets
        .mutate(&id, |current| payload.apply(current))
        .await
    {
        Ok(updated) => updated,
        Err(StoreError::NotFound { .. }) => {
            tracing::Span::current()
                .record("action", "update_meet_and_greet_failed")
                .record("record_id", id.as_str());
            return Err(ApiError::NotFound("Meet & Greet not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    crate::metrics::record_updated(collections.meet_and_greets.entity_name());

    tracing::Span::current()
        .record("collection", collections.meet_and_greets.entity_name())
        .record("action", "update_meet_and_greet")
        .record("record_id", updated.id.as_str())
        .record("business_event", "Meet & Greet updated");

    ok(updated)
}
