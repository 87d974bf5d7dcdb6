//! Thin wrapper over the skill-tracker REST endpoints.
//!
//! Every request carries `Content-Type: application/json` and, unless the
//! endpoint opts out, an HTTP Basic `Authorization` header built from the
//! configured credentials. Response bodies are decoded as JSON when possible
//! and kept as raw text otherwise; an empty (or `null`) body yields the status
//! code instead.

use crate::config::{ConsoleConfig, Credentials};
use crate::error::{ConsoleError, Result};
use crate::model::{SkillForm, UserForm};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Method, header};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Upper bound on a single request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
    /// The body was empty; holds the HTTP status code.
    Status(u16),
}

impl Payload {
    fn from_body(status: u16, text: String) -> Self {
        if text.is_empty() {
            return Self::Status(status);
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Null) => Self::Status(status),
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    /// Text for the output panel: strings verbatim, everything else as
    /// pretty-printed JSON.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Json(Value::String(s)) | Self::Text(s) => s.clone(),
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Status(code) => code.to_string(),
        }
    }

    /// The body as a string, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Json(Value::String(s)) | Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Text carried by an error response. Bodies that decode to nothing useful
/// (empty, `null`, `false`, `0`, `""`) give way to the reason phrase.
fn error_body(text: String, reason: Option<&str>) -> String {
    let fallback = || reason.unwrap_or_default().to_owned();
    if text.trim().is_empty() {
        return fallback();
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Null | Value::Bool(false)) => fallback(),
        Ok(Value::Number(n)) if n.as_f64() == Some(0.0) => fallback(),
        Ok(Value::String(s)) if s.is_empty() => fallback(),
        Ok(Value::String(s)) => s,
        _ => text,
    }
}

/// Whether a request should carry the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Attach,
    Skip,
}

/// Builds `Basic base64(username:password)`.
#[must_use]
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let token = STANDARD.encode(format!("{}:{}", credentials.username, credentials.password));
    format!("Basic {token}")
}

/// Trims a path id and checks that it is a valid ObjectId.
pub fn path_id<'a>(what: &'static str, raw: &'a str) -> Result<&'a str> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ConsoleError::MissingInput { field: what });
    }
    if !oidkit::is_valid(id) {
        return Err(ConsoleError::InvalidId {
            what,
            value: id.to_owned(),
        });
    }
    Ok(id)
}

#[derive(Clone)]
pub struct SkillTrackerClient {
    http: reqwest::Client,
    base_url: String,
    authorization: Option<String>,
}

impl core::fmt::Debug for SkillTrackerClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SkillTrackerClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.authorization.is_some())
            .finish()
    }
}

impl SkillTrackerClient {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("skilltrack/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            authorization: config.credentials.as_ref().map(basic_auth_header),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one request against `{base_url}{path}`.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::Http`] for a non-2xx status, [`ConsoleError::Network`]
    /// when no response arrived.
    #[instrument(level = "debug", skip(self, body), fields(base_url = %self.base_url))]
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth,
    ) -> Result<Payload>
    where
        B: Serialize + ?Sized,
    {
        let mut req = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header(header::CONTENT_TYPE, "application/json");

        if auth == Auth::Attach {
            if let Some(value) = &self.authorization {
                req = req.header(header::AUTHORIZATION, value);
            }
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "response received");

        if !status.is_success() {
            return Err(ConsoleError::Http {
                status: status.as_u16(),
                body: error_body(text, status.canonical_reason()),
            });
        }

        Ok(Payload::from_body(status.as_u16(), text))
    }

    async fn send(&self, method: Method, path: &str, auth: Auth) -> Result<Payload> {
        self.request::<Value>(method, path, None, auth).await
    }

    /// `GET /skill-tracker/login`. Answers with the caller's user id.
    pub async fn login(&self) -> Result<Payload> {
        self.send(Method::GET, "/skill-tracker/login", Auth::Attach).await
    }

    /// `POST /skill-tracker/register`, sent without credentials.
    pub async fn register(&self, form: &UserForm) -> Result<Payload> {
        self.request(Method::POST, "/skill-tracker/register", Some(form), Auth::Skip)
            .await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Payload> {
        let id = path_id("User ID", user_id)?;
        self.send(Method::GET, &format!("/skill-tracker/user/id/{id}"), Auth::Attach)
            .await
    }

    pub async fn update_user(&self, user_id: &str, form: &UserForm) -> Result<Payload> {
        let id = path_id("User ID", user_id)?;
        self.request(
            Method::PUT,
            &format!("/skill-tracker/user/id/{id}"),
            Some(form),
            Auth::Attach,
        )
        .await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<Payload> {
        let id = path_id("User ID", user_id)?;
        self.send(Method::DELETE, &format!("/skill-tracker/user/id/{id}"), Auth::Attach)
            .await
    }

    pub async fn list_skills(&self, user_id: &str) -> Result<Payload> {
        let id = path_id("User ID", user_id)?;
        self.send(Method::GET, &format!("/skill-tracker/skill/id/{id}"), Auth::Attach)
            .await
    }

    pub async fn add_skill(&self, user_id: &str, form: &SkillForm) -> Result<Payload> {
        let id = path_id("User ID", user_id)?;
        self.request(
            Method::POST,
            &format!("/skill-tracker/skill/id/{id}"),
            Some(form),
            Auth::Attach,
        )
        .await
    }

    pub async fn update_skill(
        &self,
        user_id: &str,
        skill_id: &str,
        form: &SkillForm,
    ) -> Result<Payload> {
        let path = skill_path(user_id, skill_id)?;
        self.request(Method::PUT, &path, Some(form), Auth::Attach).await
    }

    pub async fn delete_skill(&self, user_id: &str, skill_id: &str) -> Result<Payload> {
        let path = skill_path(user_id, skill_id)?;
        self.send(Method::DELETE, &path, Auth::Attach).await
    }
}

fn skill_path(user_id: &str, skill_id: &str) -> Result<String> {
    let user = path_id("User ID", user_id)?;
    let skill = path_id("Skill ID", skill_id)?;
    Ok(format!("/skill-tracker/skill/userId/{user}/skillId/{skill}"))
}
