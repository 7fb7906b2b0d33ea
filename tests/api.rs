use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderValue, Request, StatusCode},
    Router,
};
use daycare_ops::{build_router, Collections};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    build_router(
        Collections::in_memory(),
        HeaderValue::from_static("http://localhost:3000"),
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value, Option<String>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body, cookie)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let app = app();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn reference_lists_are_seeded_on_first_request() {
    let app = app();

    let (status, body, _) = send(&app, get("/api/staff")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
    assert_eq!(body["data"][0]["id"], "user-1");
    assert_eq!(body["data"][0]["role"], "front-desk");

    let (_, dogs, _) = send(&app, get("/api/dogs")).await;
    assert_eq!(dogs["data"].as_array().unwrap().len(), 4);

    let (_, greets, _) = send(&app, get("/api/meet-and-greets")).await;
    assert_eq!(greets["data"].as_array().unwrap().len(), 3);
    assert_eq!(greets["data"][0]["id"], "mg-1");

    // A second pass does not seed again.
    let (_, again, _) = send(&app, get("/api/staff")).await;
    assert_eq!(again["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn unseeded_collections_start_empty() {
    let app = app();
    for uri in ["/api/engagements", "/api/observations", "/api/shift-reports"] {
        let (status, body, _) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["data"], json!([]), "{uri}");
    }
}

#[tokio::test]
async fn create_meet_and_greet_reports_missing_fields() {
    let app = app();
    let (status, body, _) = send(
        &app,
        with_json("POST", "/api/meet-and-greets", json!({ "petName": "Rex", "ownerName": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("ownerName"), "{error}");
    assert!(error.contains("greetDateTime"), "{error}");
    assert!(error.contains("staffId"), "{error}");
    assert!(error.contains("store"), "{error}");
    assert!(!error.contains("petName"), "{error}");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request_envelope() {
    let app = app();
    let request = Request::post("/api/engagements")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Bad request"));
}

#[tokio::test]
async fn created_meet_and_greet_is_listed_and_updatable() {
    let app = app();
    let (status, created, _) = send(
        &app,
        with_json(
            "POST",
            "/api/meet-and-greets",
            json!({
                "id": "client-chosen",
                "petName": "Rex",
                "ownerName": "Sam Lee",
                "greetDateTime": "2024-03-01T15:00:00Z",
                "staffId": "user-2",
                "store": "Rock Hill"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let record = &created["data"];
    let id = record["id"].as_str().unwrap().to_string();
    assert_ne!(id, "client-chosen");
    assert_eq!(record["status"], "Attended");
    assert_eq!(record["converted"], false);
    assert_eq!(record["notes"], "");
    assert_eq!(record["createdAt"], record["updatedAt"]);

    let (_, list, _) = send(&app, get("/api/meet-and-greets")).await;
    let list = list["data"].as_array().unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(list[3]["id"], id.as_str());

    let (status, updated, _) = send(
        &app,
        with_json(
            "PUT",
            &format!("/api/meet-and-greets/{id}"),
            json!({ "id": "hijack", "status": "No-Show", "createdAt": "2000-01-01T00:00:00Z" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = &updated["data"];
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["status"], "No-Show");
    assert_eq!(updated["petName"], "Rex");
    assert_eq!(updated["createdAt"], record["createdAt"]);
    assert_ne!(updated["updatedAt"], record["updatedAt"]);
}

#[tokio::test]
async fn updating_an_unknown_meet_and_greet_is_not_found() {
    let app = app();
    let (status, body, _) = send(
        &app,
        with_json("PUT", "/api/meet-and-greets/nope", json!({ "converted": true })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Meet & Greet not found" }));

    let (_, list, _) = send(&app, get("/api/meet-and-greets")).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn observation_and_shift_report_defaults_apply() {
    let app = app();
    let (status, observation, _) = send(
        &app,
        with_json(
            "POST",
            "/api/observations",
            json!({
                "dogId": "dog-1",
                "dogName": "Max",
                "observationType": "Behavior",
                "notes": "Played well in group",
                "staffId": "user-1",
                "store": "Ellisville"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(observation["data"]["shift"], "AM");

    let (status, report, _) = send(
        &app,
        with_json(
            "POST",
            "/api/shift-reports",
            json!({ "shiftLeadId": "user-2", "store": "Ellisville", "newVisits": 3 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["data"]["newVisits"], 3);
    assert_eq!(report["data"]["enrollmentAdds"], 0);
}

#[tokio::test]
async fn dashboard_filters_by_store() {
    let app = app();
    for (milestone, category) in [("1 Month", "Praise"), ("1 Year", "Concern")] {
        let (status, _, _) = send(
            &app,
            with_json(
                "POST",
                "/api/engagements",
                json!({
                    "parentName": "Pat",
                    "milestone": milestone,
                    "feedbackCategory": category,
                    "staffId": "user-3",
                    "store": "Rock Hill"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, all, _) = send(&app, get("/api/dashboard")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["data"]["store"], "all");
    assert_eq!(all["data"]["meetAndGreetCount"], 3);
    assert_eq!(all["data"]["kpis"]["positiveFeedbackRatio"], 50);

    let (_, ellisville, _) = send(&app, get("/api/dashboard?store=Ellisville")).await;
    assert_eq!(ellisville["data"]["engagementCount"], 0);
    assert_eq!(ellisville["data"]["kpis"]["positiveFeedbackRatio"], 100);

    let (status, body, _) = send(&app, get("/api/dashboard?store=Nowhere")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn dashboard_filters_by_date_range() {
    let app = app();
    let today = chrono::Utc::now().date_naive();

    // Seeded meet-and-greets are dated by when they were written.
    let (status, body, _) = send(&app, get(&format!("/api/dashboard?from={today}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meetAndGreetCount"], 3);
    assert_eq!(body["data"]["range"]["from"], today.to_string());

    let (status, body, _) =
        send(&app, get("/api/dashboard?from=2000-01-01&to=2000-01-31")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meetAndGreetCount"], 0);
    assert_eq!(body["data"]["kpis"]["conversionRate"], 0);

    let (status, body, _) = send(&app, get("/api/dashboard?to=2000-01-31")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meetAndGreetCount"], 3);

    let (status, body, _) = send(&app, get("/api/dashboard?from=garbage")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Bad request"));
}

#[tokio::test]
async fn session_round_trip_uses_the_cookie() {
    let app = app();

    let (status, _, _) = send(&app, get("/api/session")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, signed_in, cookie) =
        send(&app, with_json("POST", "/api/session", json!({ "role": "manager" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(signed_in["data"]["staff"]["id"], "user-3");
    assert_eq!(signed_in["data"]["store"], "Rock Hill");
    let cookie = cookie.expect("session cookie");
    let pair = cookie.split(';').next().unwrap().to_string();
    assert!(pair.starts_with("daycare_session="));

    let mut request = with_json("PUT", "/api/session/store", json!({ "store": "Ellisville" }));
    request
        .headers_mut()
        .insert(header::COOKIE, HeaderValue::from_str(&pair).unwrap());
    let (status, switched, cookie) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(switched["data"]["store"], "Ellisville");
    let pair = cookie.unwrap().split(';').next().unwrap().to_string();

    let mut request = get("/api/session");
    request
        .headers_mut()
        .insert(header::COOKIE, HeaderValue::from_str(&pair).unwrap());
    let (status, session, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["data"]["staff"]["name"], "Charlie Brown");
    assert_eq!(session["data"]["store"], "Ellisville");
}
