//! Router tests against an in-memory SQLite store.

use axum::{
  body::Body,
  http::{Request, StatusCode},
  response::Response,
};
use confsite_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{AdminAuth, AppState, api_router, auth::ADMIN_KEY_HEADER};

const KEY: &str = "secret";

async fn make_state() -> AppState<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.unwrap();
  AppState::new(store, AdminAuth::new(KEY))
}

async fn send(
  state: &AppState<SqliteStore>,
  method: &str,
  uri: &str,
  key: Option<&str>,
  body: Option<Value>,
) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(key) = key {
    builder = builder.header(ADMIN_KEY_HEADER, key);
  }
  let body = match body {
    Some(v) => {
      builder = builder.header("content-type", "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  api_router(state.clone())
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap()
}

async fn json_body(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn speaker_body(name: &str) -> Value {
  json!({
    "name": name,
    "designation": "Professor",
    "affiliation": "IIT Kharagpur",
    "imageUrl": "https://img.example/a.jpg",
  })
}

// ── Settings ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn settings_empty_object_on_fresh_store() {
  let state = make_state().await;
  let resp = send(&state, "GET", "/settings", None, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await, json!({}));
}

#[tokio::test]
async fn settings_upsert_then_get() {
  let state = make_state().await;
  let body = json!({ "eventTitle": "ICCS 2026", "eventMode": "Online" });
  let resp = send(&state, "PATCH", "/settings", Some(KEY), Some(body)).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = send(&state, "PUT", "/settings", Some(KEY), Some(json!({ "eventLocation": "Kolkata" }))).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let got = json_body(send(&state, "GET", "/settings", None, None).await).await;
  assert_eq!(got["id"], 1);
  assert_eq!(got["eventTitle"], "ICCS 2026");
  assert_eq!(got["eventMode"], "Online");
  assert_eq!(got["eventLocation"], "Kolkata");
}

#[tokio::test]
async fn settings_unknown_mode_is_bad_request() {
  let state = make_state().await;
  let resp = send(&state, "PATCH", "/settings", Some(KEY), Some(json!({ "eventMode": "Hologram" }))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(json_body(resp).await["error"].is_string());
}

// ── Auth ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn mutation_without_key_is_unauthorized_and_changes_nothing() {
  let state = make_state().await;
  let resp = send(&state, "POST", "/speakers", None, Some(speaker_body("ada"))).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  assert_eq!(json_body(resp).await, json!({ "error": "Unauthorized Access" }));

  let resp = send(&state, "POST", "/speakers", Some("wrong"), Some(speaker_body("ada"))).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let list = json_body(send(&state, "GET", "/speakers", None, None).await).await;
  assert_eq!(list, json!([]));
}

#[tokio::test]
async fn every_mutating_route_requires_key() {
  let state = make_state().await;

  // One row per collection, so updates and deletes have a real target.
  let seeds = [
    ("/speakers", speaker_body("ada")),
    ("/dates", json!({ "date": "2026-08-01", "description": "submission" })),
    ("/committee", json!({ "name": "b", "affiliation": "NIT", "role": "TPC" })),
    ("/fees", json!({ "category": "Student", "indianFee": "₹5,000", "internationalFee": "$100" })),
    (
      "/contacts",
      json!({ "name": "R. Sen", "designation": "Convener", "email": "c@example.org", "phone": "1" }),
    ),
  ];
  for (path, body) in &seeds {
    let resp = send(&state, "POST", path, Some(KEY), Some(body.clone())).await;
    assert_eq!(resp.status(), StatusCode::OK, "seeding {path}");
  }

  let reads = [
    "/settings",
    "/speakers",
    "/dates",
    "/committee",
    "/fees",
    "/contacts",
    "/pages",
    "/pages/call-for-paper",
  ];
  let mut before = Vec::new();
  for path in reads {
    before.push(json_body(send(&state, "GET", path, None, None).await).await);
  }

  let mut mutations: Vec<(&str, String, Option<Value>)> = vec![
    ("PATCH", "/settings".into(), Some(json!({ "eventTitle": "x" }))),
    ("PUT", "/settings".into(), Some(json!({ "eventTitle": "x" }))),
    ("PATCH", "/pages/call-for-paper".into(), Some(json!({ "content": "x" }))),
    ("PUT", "/pages/call-for-paper".into(), Some(json!({ "content": "x" }))),
  ];
  for (path, body) in &seeds {
    mutations.push(("POST", path.to_string(), Some(body.clone())));
    for method in ["PATCH", "PUT"] {
      mutations.push((method, path.to_string(), Some(json!({ "id": 1 }))));
      mutations.push((method, format!("{path}/1"), Some(json!({}))));
    }
    mutations.push(("DELETE", format!("{path}?id=1"), None));
  }

  for (method, uri, body) in &mutations {
    for key in [None, Some("wrong")] {
      let resp = send(&state, method, uri, key, body.clone()).await;
      assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{method} {uri} with {key:?}");
    }
  }

  for (path, expected) in reads.iter().zip(&before) {
    let after = json_body(send(&state, "GET", path, None, None).await).await;
    assert_eq!(&after, expected, "{path} changed");
  }
  assert_eq!(before[0], json!({}));
  assert_eq!(
    before[7],
    json!({ "slug": "call-for-paper", "title": "", "content": "" })
  );
}

#[tokio::test]
async fn key_checked_before_body() {
  let state = make_state().await;
  let req = Request::builder()
    .method("POST")
    .uri("/speakers")
    .header("content-type", "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let resp = api_router(state).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_checks_password() {
  let state = make_state().await;
  let ok = send(&state, "POST", "/admin/login", None, Some(json!({ "password": KEY }))).await;
  assert_eq!(ok.status(), StatusCode::OK);
  assert_eq!(json_body(ok).await, json!({ "success": true }));

  let bad = send(&state, "POST", "/admin/login", None, Some(json!({ "password": "nope" }))).await;
  assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
  assert_eq!(json_body(bad).await, json!({ "error": "Invalid Credentials" }));
}

// ── Speakers ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn speaker_lifecycle() {
  let state = make_state().await;

  let resp = send(&state, "POST", "/speakers", Some(KEY), Some(speaker_body("ada"))).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let created = json_body(resp).await;
  let id = created["id"].as_i64().unwrap();
  assert_eq!(created["title"], "Keynote Speaker");

  let list = json_body(send(&state, "GET", "/speakers", None, None).await).await;
  assert_eq!(list.as_array().unwrap().len(), 1);
  assert_eq!(list[0]["id"], id);

  let resp = send(&state, "DELETE", &format!("/speakers?id={id}"), Some(KEY), None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await, json!({ "success": true }));

  let list = json_body(send(&state, "GET", "/speakers", None, None).await).await;
  assert_eq!(list, json!([]));
}

#[tokio::test]
async fn speaker_update_by_body_and_path() {
  let state = make_state().await;
  let created = json_body(send(&state, "POST", "/speakers", Some(KEY), Some(speaker_body("ada"))).await).await;
  let id = created["id"].as_i64().unwrap();

  let resp = send(&state, "PATCH", "/speakers", Some(KEY), Some(json!({ "id": id, "designation": "Dean" }))).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await["designation"], "Dean");

  let resp = send(&state, "PUT", &format!("/speakers/{id}"), Some(KEY), Some(json!({ "name": "Ada L." }))).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let updated = json_body(resp).await;
  assert_eq!(updated["name"], "Ada L.");
  assert_eq!(updated["designation"], "Dean");
}

#[tokio::test]
async fn speaker_update_unknown_id_is_not_found() {
  let state = make_state().await;
  let resp = send(&state, "PATCH", "/speakers", Some(KEY), Some(json!({ "id": 99, "name": "x" }))).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn speaker_update_without_id_is_bad_request() {
  let state = make_state().await;
  let resp = send(&state, "PATCH", "/speakers", Some(KEY), Some(json!({ "name": "x" }))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_missing_or_blank_field_is_bad_request() {
  let state = make_state().await;
  let resp = send(&state, "POST", "/speakers", Some(KEY), Some(json!({ "name": "ada" }))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let mut body = speaker_body("ada");
  body["name"] = json!("   ");
  let resp = send(&state, "POST", "/speakers", Some(KEY), Some(body)).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let mut body = speaker_body("ada");
  body["favouriteColour"] = json!("teal");
  let resp = send(&state, "POST", "/speakers", Some(KEY), Some(body)).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_requires_numeric_id() {
  let state = make_state().await;
  let resp = send(&state, "DELETE", "/speakers", Some(KEY), None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let resp = send(&state, "DELETE", "/speakers?id=abc", Some(KEY), None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_unknown_id_succeeds() {
  let state = make_state().await;
  let resp = send(&state, "DELETE", "/fees?id=12345", Some(KEY), None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await, json!({ "success": true }));
}

// ── Dates ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn dates_listed_chronologically() {
  let state = make_state().await;
  for (date, description) in [
    ("12th December, 2026", "conference"),
    ("2026-08-01", "submission"),
  ] {
    let body = json!({ "date": date, "description": description });
    let resp = send(&state, "POST", "/dates", Some(KEY), Some(body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }
  let list = json_body(send(&state, "GET", "/dates", None, None).await).await;
  assert_eq!(list[0]["description"], "submission");
  assert_eq!(list[1]["description"], "conference");
  assert_eq!(list[1]["isHighlight"], false);
}

// ── Committee ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn committee_role_filter() {
  let state = make_state().await;
  for (name, role) in [("a", "Advisory"), ("b", "TPC"), ("c", "Advisory")] {
    let body = json!({ "name": name, "affiliation": "NIT", "role": role });
    let resp = send(&state, "POST", "/committee", Some(KEY), Some(body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  let all = json_body(send(&state, "GET", "/committee", None, None).await).await;
  assert_eq!(all.as_array().unwrap().len(), 3);

  let tpc = json_body(send(&state, "GET", "/committee?role=TPC", None, None).await).await;
  assert_eq!(tpc.as_array().unwrap().len(), 1);
  assert_eq!(tpc[0]["name"], "b");

  let resp = send(&state, "GET", "/committee?role=Bogus", None, None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── Fees & contacts ──────────────────────────────────────────────────────────

#[tokio::test]
async fn fees_ordered_and_updatable() {
  let state = make_state().await;
  let body = |category: &str, order: i64| {
    json!({ "category": category, "indianFee": "₹8,000", "internationalFee": "$150", "order": order })
  };
  send(&state, "POST", "/fees", Some(KEY), Some(body("Industry", 2))).await;
  let student = json_body(send(&state, "POST", "/fees", Some(KEY), Some(body("Student", 1))).await).await;

  let id = student["id"].as_i64().unwrap();
  let resp = send(&state, "PATCH", &format!("/fees/{id}"), Some(KEY), Some(json!({ "indianFee": "₹5,000" }))).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let list = json_body(send(&state, "GET", "/fees", None, None).await).await;
  assert_eq!(list[0]["category"], "Student");
  assert_eq!(list[0]["indianFee"], "₹5,000");
  assert_eq!(list[1]["category"], "Industry");
}

#[tokio::test]
async fn contact_create_and_list() {
  let state = make_state().await;
  let body = json!({
    "name": "R. Sen",
    "designation": "Convener",
    "email": "convener@example.org",
    "phone": "+91 90000 00000",
  });
  let resp = send(&state, "POST", "/contacts", Some(KEY), Some(body)).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let list = json_body(send(&state, "GET", "/contacts", None, None).await).await;
  assert_eq!(list[0]["email"], "convener@example.org");
  assert_eq!(list[0]["department"], Value::Null);
}

// ── Pages ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_page_is_soft_empty() {
  let state = make_state().await;
  let resp = send(&state, "GET", "/pages/author-guidelines", None, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    json_body(resp).await,
    json!({ "slug": "author-guidelines", "title": "", "content": "" })
  );
}

#[tokio::test]
async fn page_upsert_then_get() {
  let state = make_state().await;
  let resp = send(
    &state,
    "PATCH",
    "/pages/call-for-paper",
    Some(KEY),
    Some(json!({ "content": "<p>Submit by August</p>" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);

  let page = json_body(send(&state, "GET", "/pages/call-for-paper", None, None).await).await;
  assert_eq!(page["title"], "Untitled");
  assert_eq!(page["content"], "<p>Submit by August</p>");

  let pages = json_body(send(&state, "GET", "/pages", None, None).await).await;
  assert_eq!(pages.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_slug_is_bad_request() {
  let state = make_state().await;
  let resp = send(&state, "GET", "/pages/bad%20slug", None, None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
