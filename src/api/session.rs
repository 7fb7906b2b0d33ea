//! Demo sign-in. The signed-in staff member and the selected store travel in
//! a cookie and are resolved per request into a [`Session`] extension.

use axum::extract::Extension;
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};

use super::{
    error::{ok, ApiError, ApiResult},
    extract::ApiJson,
};
use crate::model::{
    staff::{demo_member, demo_member_by_id},
    Role, Staff, StoreLocation,
};
use crate::state::Collections;

pub const SESSION_COOKIE: &str = "daycare_session";

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub staff: Staff,
    pub store: StoreLocation,
}

impl Session {
    fn cookie_value(&self) -> String {
        format!("{}.{}", self.staff.id, self.store.slug())
    }

    /// Resolves a cookie value against the stored staff, falling back to the
    /// demo roster for members that are not in the staff collection.
    pub async fn from_cookie(value: &str, collections: &Collections) -> Option<Session> {
        let (staff_id, store) = value.rsplit_once('.')?;
        let store = StoreLocation::from_slug(store)?;
        let staff = match collections.staff.get(staff_id).await {
            Ok(Some(staff)) => staff,
            Ok(None) => demo_member_by_id(staff_id)?,
            Err(e) => {
                tracing::warn!(error = %e, "session staff lookup failed");
                demo_member_by_id(staff_id)?
            }
        };
        Some(Session { staff, store })
    }
}

fn write_cookie(cookies: &Cookies, session: &Session) {
    let mut cookie = Cookie::new(SESSION_COOKIE, session.cookie_value());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);
}

#[derive(Deserialize)]
pub struct SignInRequest {
    role: Role,
}

#[derive(Deserialize)]
pub struct SwitchStoreRequest {
    store: StoreLocation,
}

// GET /api/session
pub async fn get_session(session: Option<Extension<Session>>) -> ApiResult<Session> {
    match session {
        Some(Extension(session)) => ok(session),
        None => Err(ApiError::Unauthorized),
    }
}

// POST /api/session
pub async fn sign_in(
    cookies: Cookies,
    ApiJson(payload): ApiJson<SignInRequest>,
) -> ApiResult<Session> {
    let staff = demo_member(payload.role);
    let session = Session {
        store: staff.store,
        staff,
    };
    write_cookie(&cookies, &session);

    tracing::Span::current()
        .record("action", "sign_in")
        .record("staff_id", session.staff.id.as_str())
        .record("business_event", "Staff signed in");

    ok(session)
}

// PUT /api/session/store
pub async fn switch_store(
    cookies: Cookies,
    session: Option<Extension<Session>>,
    ApiJson(payload): ApiJson<SwitchStoreRequest>,
) -> ApiResult<Session> {
    let Some(Extension(mut session)) = session else {
        return Err(ApiError::Unauthorized);
    };
    session.store = payload.store;
    write_cookie(&cookies, &session);

    tracing::Span::current()
        .record("action", "switch_store")
        .record("store", session.store.as_str());

    ok(session)
}

// DELETE /api/session
pub async fn sign_out(cookies: Cookies) -> ApiResult<()> {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookies.remove(cookie);

    tracing::Span::current().record("action", "sign_out");
    ok(())
}
