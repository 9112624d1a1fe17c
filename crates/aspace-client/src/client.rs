//! Blocking REST client for the repository API.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{Level, debug, enabled, trace};

use aspace_model::{ArchivalObject, DigitalObject, DigitalObjectComponent, RecordRef};

use crate::error::{ClientError, Result};

/// Header carrying the session token on authenticated requests.
pub const SESSION_HEADER: &str = "X-ArchivesSpace-Session";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT_VALUE: &str = concat!("aspace-batch-dao/", env!("CARGO_PKG_VERSION"));

/// Body fragment the API returns when an identifier is already taken.
const UNIQUENESS_VIOLATION: &str = "Must be unique";

/// Result of a create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created { uri: String },
    AlreadyExists,
}

/// Repository operations needed by the batch driver.
pub trait RepositoryClient {
    /// URIs of archival objects carrying `ref_id`. May be empty or hold several.
    fn find_by_ref_id(&self, ref_id: &str) -> Result<Vec<String>>;

    fn fetch_archival_object(&self, uri: &str) -> Result<ArchivalObject>;

    fn create_digital_object(&self, object: &DigitalObject) -> Result<CreateOutcome>;

    fn create_component(&self, component: &DigitalObjectComponent) -> Result<CreateOutcome>;

    fn update_archival_object(&self, uri: &str, record: &ArchivalObject) -> Result<()>;
}

/// Connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub repository: u32,
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    session: Option<String>,
}

#[derive(Deserialize)]
struct FindByIdResponse {
    #[serde(default)]
    archival_objects: Vec<RecordRef>,
}

#[derive(Deserialize)]
struct CreateResponse {
    uri: String,
}

/// Interpret a create response.
///
/// A uniqueness violation is reported as [`CreateOutcome::AlreadyExists`]
/// rather than an error.
pub fn classify_create(status: u16, body: &str) -> Result<CreateOutcome> {
    if (200..300).contains(&status) {
        let created: CreateResponse = serde_json::from_str(body)?;
        return Ok(CreateOutcome::Created { uri: created.uri });
    }
    if body.contains(UNIQUENESS_VIOLATION) {
        return Ok(CreateOutcome::AlreadyExists);
    }
    Err(ClientError::Api {
        status,
        message: body.to_string(),
    })
}

fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| ClientError::InvalidUrl {
        url: joined.clone(),
        message: e.to_string(),
    })
}

/// Repository client authenticated with one session for the whole run.
#[derive(Debug, Clone)]
pub struct HttpRepositoryClient {
    client: Client,
    base_url: String,
    repository: u32,
    session: String,
}

impl HttpRepositoryClient {
    /// Authenticate and keep the session token.
    pub fn login(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let mut url = endpoint(&config.base_url, &format!("users/{}/login", config.username))?;
        url.query_pairs_mut()
            .append_pair("password", &config.password);

        debug!(base_url = %config.base_url, username = %config.username, "logging in");
        let response = client
            .post(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Login {
                username: config.username.clone(),
                message: format!("status {status}"),
            });
        }
        let session = response
            .json::<LoginResponse>()?
            .session
            .filter(|session| !session.is_empty())
            .ok_or_else(|| ClientError::Login {
                username: config.username.clone(),
                message: "no session in response".to_string(),
            })?;

        Ok(Self::with_session(config, client, session))
    }

    /// Reuse an existing session token.
    pub fn with_session(config: &ClientConfig, client: Client, session: String) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            repository: config.repository,
            session,
        }
    }

    fn repository_path(&self, tail: &str) -> String {
        format!("repositories/{}/{tail}", self.repository)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(SESSION_HEADER, &self.session)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.authed(self.client.get(url)).send()?;
        let response = ensure_success(response)?;
        Ok(response.json()?)
    }

    fn post_json<B: serde::Serialize>(&self, url: Url, body: &B) -> Result<Response> {
        debug!(%url, "POST");
        if enabled!(Level::TRACE) {
            trace!(%url, payload = %payload_text(body), "POST body");
        }
        Ok(self.authed(self.client.post(url)).json(body).send()?)
    }

    fn create<B: serde::Serialize>(&self, tail: &str, body: &B) -> Result<CreateOutcome> {
        let url = endpoint(&self.base_url, &self.repository_path(tail))?;
        let response = self.post_json(url, body)?;
        let status = response.status().as_u16();
        let text = response.text()?;
        classify_create(status, &text)
    }
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

impl RepositoryClient for HttpRepositoryClient {
    fn find_by_ref_id(&self, ref_id: &str) -> Result<Vec<String>> {
        let mut url = endpoint(
            &self.base_url,
            &self.repository_path("find_by_id/archival_objects"),
        )?;
        url.query_pairs_mut().append_pair("ref_id[]", ref_id);
        let found: FindByIdResponse = self.get_json(url)?;
        Ok(found
            .archival_objects
            .into_iter()
            .map(|link| link.uri)
            .collect())
    }

    fn fetch_archival_object(&self, uri: &str) -> Result<ArchivalObject> {
        self.get_json(endpoint(&self.base_url, uri)?)
    }

    fn create_digital_object(&self, object: &DigitalObject) -> Result<CreateOutcome> {
        self.create("digital_objects", object)
    }

    fn create_component(&self, component: &DigitalObjectComponent) -> Result<CreateOutcome> {
        self.create("digital_object_components", component)
    }

    fn update_archival_object(&self, uri: &str, record: &ArchivalObject) -> Result<()> {
        let response = self.post_json(endpoint(&self.base_url, uri)?, record)?;
        ensure_success(response)?;
        Ok(())
    }
}

/// Compact JSON of a request body for trace output.
fn payload_text<B: serde::Serialize>(body: &B) -> String {
    serde_json::to_string(body).unwrap_or_else(|error| format!("<unserializable: {error}>"))
}
