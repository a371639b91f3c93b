//! Async HTTP client wrapping the conference-site JSON API.
//!
//! Reads go through a short-lived cache keyed by request path so that
//! switching between screens does not refetch on every keypress. Every
//! successful write drops the cached entries of the resource it touched.

use std::time::Duration;

use confsite_core::{
  RecordId,
  committee::{CommitteeMember, CommitteeMemberPatch, CommitteeRole, NewCommitteeMember},
  contact::{Contact, ContactPatch, NewContact},
  date::{ImportantDate, ImportantDatePatch, NewImportantDate},
  fee::{NewRegistrationFee, RegistrationFee, RegistrationFeePatch},
  page::{Page, PagePatch},
  settings::{Settings, SettingsPatch},
  speaker::{NewSpeaker, Speaker, SpeakerPatch},
};
use moka::future::Cache;
use reqwest::{Client, Method, Response};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use thiserror::Error;

/// How long a cached read stays fresh.
pub const CACHE_TTL: Duration = Duration::from_secs(60);

const ADMIN_KEY_HEADER: &str = "x-admin-key";

// ─── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ClientError {
  /// The server answered with a non-2xx status.
  #[error("{message}")]
  Api { status: u16, message: String },

  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("unexpected response body: {0}")]
  Decode(#[from] serde_json::Error),
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

// ─── Client ───────────────────────────────────────────────────────────────────

/// Connection settings for the API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url:  String,
  /// Sent as `x-admin-key` when non-empty.
  pub admin_key: String,
}

/// Async HTTP client for the conference-site JSON API.
///
/// Cheap to clone; the inner [`reqwest::Client`] and cache are `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
  cache:  Cache<String, Value>,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    let cache = Cache::builder()
      .max_capacity(256)
      .time_to_live(CACHE_TTL)
      .build();
    Ok(Self { client, config, cache })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
    let req = self.client.request(method, self.url(path));
    if self.config.admin_key.is_empty() {
      req
    } else {
      req.header(ADMIN_KEY_HEADER, &self.config.admin_key)
    }
  }

  /// Turn a non-2xx response into [`ClientError::Api`], preferring the
  /// server's own `error` message.
  async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp
      .json::<Value>()
      .await
      .ok()
      .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
      .unwrap_or_else(|| format!("Request failed: {}", status.as_u16()));
    tracing::debug!(status = status.as_u16(), %message, "api error");
    Err(ClientError::Api { status: status.as_u16(), message })
  }

  // ── Plumbing ──────────────────────────────────────────────────────────────

  /// Cached `GET`.
  async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let value = match self.cache.get(path).await {
      Some(hit) => hit,
      None => {
        let resp = Self::check(self.request(Method::GET, path).send().await?).await?;
        let fresh: Value = resp.json().await?;
        self.cache.insert(path.to_owned(), fresh.clone()).await;
        fresh
      }
    };
    Ok(serde_json::from_value(value)?)
  }

  /// Uncached write; invalidates every cached key under `resource`.
  async fn send<B, T>(&self, method: Method, path: &str, resource: &str, body: Option<&B>) -> Result<T>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let mut req = self.request(method, path);
    if let Some(body) = body {
      req = req.json(body);
    }
    let resp = Self::check(req.send().await?).await?;
    self.invalidate(resource).await;
    Ok(resp.json().await?)
  }

  async fn invalidate(&self, resource: &str) {
    let stale: Vec<_> = self
      .cache
      .iter()
      .filter(|(key, _)| key.starts_with(resource))
      .map(|(key, _)| key)
      .collect();
    for key in stale {
      self.cache.invalidate(key.as_str()).await;
    }
  }

  async fn delete(&self, resource: &str, id: RecordId) -> Result<()> {
    let _: Value = self
      .send::<(), _>(Method::DELETE, &format!("{resource}?id={id}"), resource, None)
      .await?;
    Ok(())
  }

  // ── Admin ─────────────────────────────────────────────────────────────────

  /// `POST /api/admin/login`: checks `password` against the server's secret.
  pub async fn login(&self, password: &str) -> Result<()> {
    let resp = self
      .client
      .post(self.url("/admin/login"))
      .json(&json!({ "password": password }))
      .send()
      .await?;
    Self::check(resp).await?;
    Ok(())
  }

  // ── Settings ──────────────────────────────────────────────────────────────

  /// `GET /api/settings`: `None` until an admin has saved settings.
  pub async fn settings(&self) -> Result<Option<Settings>> {
    let value: Value = self.get("/settings").await?;
    if value.as_object().is_some_and(|o| o.is_empty()) {
      return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
  }

  pub async fn update_settings(&self, patch: &SettingsPatch) -> Result<Settings> {
    self
      .send(Method::PATCH, "/settings", "/settings", Some(patch))
      .await
  }

  // ── Speakers ──────────────────────────────────────────────────────────────

  pub async fn speakers(&self) -> Result<Vec<Speaker>> { self.get("/speakers").await }

  pub async fn create_speaker(&self, input: &NewSpeaker) -> Result<Speaker> {
    self
      .send(Method::POST, "/speakers", "/speakers", Some(input))
      .await
  }

  pub async fn update_speaker(&self, id: RecordId, patch: &SpeakerPatch) -> Result<Speaker> {
    self
      .send(Method::PATCH, &format!("/speakers/{id}"), "/speakers", Some(patch))
      .await
  }

  pub async fn delete_speaker(&self, id: RecordId) -> Result<()> {
    self.delete("/speakers", id).await
  }

  // ── Important dates ───────────────────────────────────────────────────────

  pub async fn dates(&self) -> Result<Vec<ImportantDate>> { self.get("/dates").await }

  pub async fn create_date(&self, input: &NewImportantDate) -> Result<ImportantDate> {
    self.send(Method::POST, "/dates", "/dates", Some(input)).await
  }

  pub async fn update_date(
    &self,
    id: RecordId,
    patch: &ImportantDatePatch,
  ) -> Result<ImportantDate> {
    self
      .send(Method::PATCH, &format!("/dates/{id}"), "/dates", Some(patch))
      .await
  }

  pub async fn delete_date(&self, id: RecordId) -> Result<()> { self.delete("/dates", id).await }

  // ── Committee ─────────────────────────────────────────────────────────────

  pub async fn committee(&self, role: Option<CommitteeRole>) -> Result<Vec<CommitteeMember>> {
    match role {
      Some(role) => self.get(&format!("/committee?role={}", role.as_ref())).await,
      None => self.get("/committee").await,
    }
  }

  pub async fn create_committee_member(
    &self,
    input: &NewCommitteeMember,
  ) -> Result<CommitteeMember> {
    self
      .send(Method::POST, "/committee", "/committee", Some(input))
      .await
  }

  pub async fn update_committee_member(
    &self,
    id: RecordId,
    patch: &CommitteeMemberPatch,
  ) -> Result<CommitteeMember> {
    self
      .send(Method::PATCH, &format!("/committee/{id}"), "/committee", Some(patch))
      .await
  }

  pub async fn delete_committee_member(&self, id: RecordId) -> Result<()> {
    self.delete("/committee", id).await
  }

  // ── Registration fees ─────────────────────────────────────────────────────

  pub async fn fees(&self) -> Result<Vec<RegistrationFee>> { self.get("/fees").await }

  pub async fn create_fee(&self, input: &NewRegistrationFee) -> Result<RegistrationFee> {
    self.send(Method::POST, "/fees", "/fees", Some(input)).await
  }

  pub async fn update_fee(
    &self,
    id: RecordId,
    patch: &RegistrationFeePatch,
  ) -> Result<RegistrationFee> {
    self
      .send(Method::PATCH, &format!("/fees/{id}"), "/fees", Some(patch))
      .await
  }

  pub async fn delete_fee(&self, id: RecordId) -> Result<()> { self.delete("/fees", id).await }

  // ── Contacts ──────────────────────────────────────────────────────────────

  pub async fn contacts(&self) -> Result<Vec<Contact>> { self.get("/contacts").await }

  pub async fn create_contact(&self, input: &NewContact) -> Result<Contact> {
    self
      .send(Method::POST, "/contacts", "/contacts", Some(input))
      .await
  }

  pub async fn update_contact(&self, id: RecordId, patch: &ContactPatch) -> Result<Contact> {
    self
      .send(Method::PATCH, &format!("/contacts/{id}"), "/contacts", Some(patch))
      .await
  }

  pub async fn delete_contact(&self, id: RecordId) -> Result<()> {
    self.delete("/contacts", id).await
  }

  // ── Pages ─────────────────────────────────────────────────────────────────

  pub async fn pages(&self) -> Result<Vec<Page>> { self.get("/pages").await }

  /// `GET /api/pages/<slug>`: `None` while the page has never been saved.
  pub async fn page(&self, slug: &str) -> Result<Option<Page>> {
    let value: Value = self.get(&format!("/pages/{slug}")).await?;
    // The placeholder for an unsaved page carries no timestamps.
    if value.get("updatedAt").is_none() {
      return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
  }

  pub async fn update_page(&self, slug: &str, patch: &PagePatch) -> Result<Page> {
    self
      .send(Method::PATCH, &format!("/pages/{slug}"), "/pages", Some(patch))
      .await
  }
}

#[cfg(test)]
mod tests {
  use confsite_api::{AdminAuth, AppState};
  use confsite_store_sqlite::SqliteStore;
  use tokio::net::TcpListener;

  use super::*;

  const KEY: &str = "secret";

  /// Serve a fresh in-memory site on an ephemeral port; returns its base URL.
  async fn spawn_server() -> String {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = confsite_server::app(AppState::new(store, AdminAuth::new(KEY)));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
  }

  fn client(base_url: &str, admin_key: &str) -> ApiClient {
    ApiClient::new(ApiConfig {
      base_url:  base_url.to_string(),
      admin_key: admin_key.to_string(),
    })
    .unwrap()
  }

  fn speaker(name: &str) -> NewSpeaker {
    NewSpeaker {
      name:          name.into(),
      designation:   "Professor".into(),
      affiliation:   "Jadavpur University".into(),
      title:         None,
      image_url:     "https://img.example/s.jpg".into(),
      bio:           None,
      linkedin_url:  None,
      display_order: None,
    }
  }

  #[tokio::test]
  async fn login_accepts_only_the_secret() {
    let url = spawn_server().await;
    let c = client(&url, "");
    c.login(KEY).await.unwrap();

    let err = c.login("nope").await.unwrap_err();
    assert!(matches!(
      err,
      ClientError::Api { status: 401, ref message } if message == "Invalid Credentials"
    ));
  }

  #[tokio::test]
  async fn write_without_key_surfaces_server_message() {
    let url = spawn_server().await;
    let err = client(&url, "wrong")
      .create_speaker(&speaker("ada"))
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      ClientError::Api { status: 401, ref message } if message == "Unauthorized Access"
    ));
  }

  #[tokio::test]
  async fn speaker_crud_invalidates_cache() {
    let url = spawn_server().await;
    let c = client(&url, KEY);

    assert!(c.speakers().await.unwrap().is_empty());

    let created = c.create_speaker(&speaker("ada")).await.unwrap();
    let listed = c.speakers().await.unwrap();
    assert_eq!(listed, vec![created.clone()]);

    let updated = c
      .update_speaker(created.id, &SpeakerPatch {
        designation: Some("Dean".into()),
        ..Default::default()
      })
      .await
      .unwrap();
    assert_eq!(c.speakers().await.unwrap(), vec![updated]);

    c.delete_speaker(created.id).await.unwrap();
    assert!(c.speakers().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn reads_are_cached_until_own_write() {
    let url = spawn_server().await;
    let reader = client(&url, KEY);
    let writer = client(&url, KEY);

    assert!(reader.fees().await.unwrap().is_empty());
    writer
      .create_fee(&NewRegistrationFee {
        category:          "Student".into(),
        indian_fee:        "₹5,000".into(),
        international_fee: "$100".into(),
        order:             0,
      })
      .await
      .unwrap();

    // Another client's write is not visible within the TTL.
    assert!(reader.fees().await.unwrap().is_empty());
    assert_eq!(writer.fees().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn committee_role_keys_invalidated_together() {
    let url = spawn_server().await;
    let c = client(&url, KEY);

    assert!(c.committee(Some(CommitteeRole::Tpc)).await.unwrap().is_empty());
    c.create_committee_member(&NewCommitteeMember {
      name:          "R. Bose".into(),
      affiliation:   "ISI Kolkata".into(),
      designation:   None,
      role:          CommitteeRole::Tpc,
      display_order: None,
    })
    .await
    .unwrap();
    assert_eq!(c.committee(Some(CommitteeRole::Tpc)).await.unwrap().len(), 1);
    assert!(c.committee(Some(CommitteeRole::Advisory)).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn settings_and_pages_start_empty() {
    let url = spawn_server().await;
    let c = client(&url, KEY);

    assert!(c.settings().await.unwrap().is_none());
    let saved = c
      .update_settings(&SettingsPatch {
        event_title: Some("ICCS 2026".into()),
        ..Default::default()
      })
      .await
      .unwrap();
    assert_eq!(c.settings().await.unwrap(), Some(saved));

    assert!(c.page("paper-template").await.unwrap().is_none());
    let page = c
      .update_page("paper-template", &PagePatch {
        content: Some("<p>Use IEEE format</p>".into()),
        ..Default::default()
      })
      .await
      .unwrap();
    assert_eq!(c.page("paper-template").await.unwrap(), Some(page));
  }

  #[tokio::test]
  async fn validation_errors_come_back_as_400() {
    let url = spawn_server().await;
    let err = client(&url, KEY)
      .create_speaker(&NewSpeaker { name: " ".into(), ..speaker("x") })
      .await
      .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, .. }));
  }
}
