use axum::extract::Extension;

use super::error::{ok, ApiResult};
use crate::{
    model::{Dog, Staff},
    state::Collections,
};

// GET /api/staff
pub async fn list_staff(Extension(collections): Extension<Collections>) -> ApiResult<Vec<Staff>> {
    ok(collections.staff.list().await?)
}

// GET /api/dogs
pub async fn list_dogs(Extension(collections): Extension<Collections>) -> ApiResult<Vec<Dog>> {
    ok(collections.dogs.list().await?)
}
