//! HTTP gateway to the Tugas Tracker backend.
//!
//! Every operation runs the same sequence: check the stored session for
//! expiry before touching the network, attach the bearer token, send the
//! call, then classify the response. Authentication rejections (local expiry
//! or a server 401) clear the session and notify the host through
//! [`SessionEvents`] before the error is returned, so no caller can keep
//! running with a token the backend no longer honors.

use crate::error::{ApiError, ApiResult};
use crate::model::{
    AuthResponse, LoginRequest, MataKuliah, MataKuliahPayload, RegisterRequest, Tugas,
    TugasPayload,
};
use crate::session::SessionStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Notified when the gateway invalidates the stored session. The hosting
/// surface decides what "go back to login" means; the gateway itself knows
/// nothing about navigation.
pub trait SessionEvents {
    fn session_invalidated(&self);
}

/// Observer that ignores invalidation, for hosts that inspect errors instead.
pub struct NullEvents;

impl SessionEvents for NullEvents {
    fn session_invalidated(&self) {}
}

pub struct Client {
    base_url: String,
    agent: ureq::Agent,
    session: SessionStore,
    events: Box<dyn SessionEvents>,
}

impl Client {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: SessionStore,
        events: Box<dyn SessionEvents>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            session,
            events,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn invalidate_session(&self) {
        log::warn!("session invalidated, clearing stored credentials");
        if let Err(err) = self.session.clear() {
            log::warn!("failed to clear session: {err}");
        }
        self.events.session_invalidated();
    }

    /// Core request path shared by every operation.
    fn request(&self, method: &str, path: &str, body: Option<Value>) -> ApiResult<Option<Value>> {
        let token = self.session.token();
        if token.is_some() && self.session.is_expired() {
            self.invalidate_session();
            return Err(ApiError::SessionExpired);
        }

        let url = format!("{}{}", self.base_url, path);
        log::debug!("{method} {url}");
        let mut request = self
            .agent
            .request(method, &url)
            .set("Content-Type", "application/json");
        if let Some(token) = &token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        let response = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        match response {
            Ok(response) if response.status() == 204 => Ok(None),
            Ok(response) => {
                let raw = response.into_string().map_err(|err| {
                    ApiError::RequestFailed(format!("failed to read response body: {err}"))
                })?;
                Ok(Some(serde_json::from_str(&raw)?))
            }
            Err(ureq::Error::Status(401, _)) => {
                self.invalidate_session();
                Err(ApiError::SessionExpired)
            }
            Err(ureq::Error::Status(code, response)) => {
                Err(ApiError::RequestFailed(error_message(code, response)))
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(ApiError::Network(Box::new(transport)))
            }
        }
    }

    fn decode<T: DeserializeOwned>(&self, value: Option<Value>) -> ApiResult<T> {
        let value = value
            .ok_or_else(|| ApiError::RequestFailed("empty response from server".to_string()))?;
        Ok(serde_json::from_value(value)?)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let value = self.request("GET", path, None)?;
        self.decode(value)
    }

    fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> ApiResult<T> {
        let value = self.request("POST", path, Some(serde_json::to_value(body)?))?;
        self.decode(value)
    }

    fn put<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> ApiResult<T> {
        let value = self.request("PUT", path, Some(serde_json::to_value(body)?))?;
        self.decode(value)
    }

    fn delete(&self, path: &str) -> ApiResult<()> {
        self.request("DELETE", path, None)?;
        Ok(())
    }

    // Tugas

    pub fn list_tugas(&self) -> ApiResult<Vec<Tugas>> {
        self.get("/tugas")
    }

    pub fn get_tugas(&self, id: &str) -> ApiResult<Tugas> {
        self.get(&format!("/tugas/{id}"))
    }

    pub fn create_tugas(&self, draft: &TugasPayload) -> ApiResult<Tugas> {
        self.post("/tugas", draft)
    }

    pub fn update_tugas(&self, id: &str, patch: &TugasPayload) -> ApiResult<Tugas> {
        self.put(&format!("/tugas/{id}"), patch)
    }

    pub fn delete_tugas(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/tugas/{id}"))
    }

    // MataKuliah

    pub fn list_mata_kuliah(&self) -> ApiResult<Vec<MataKuliah>> {
        self.get("/matakuliah")
    }

    pub fn get_mata_kuliah(&self, id: &str) -> ApiResult<MataKuliah> {
        self.get(&format!("/matakuliah/{id}"))
    }

    pub fn create_mata_kuliah(&self, draft: &MataKuliahPayload) -> ApiResult<MataKuliah> {
        self.post("/matakuliah", draft)
    }

    pub fn update_mata_kuliah(&self, id: &str, patch: &MataKuliahPayload) -> ApiResult<MataKuliah> {
        self.put(&format!("/matakuliah/{id}"), patch)
    }

    pub fn delete_mata_kuliah(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/matakuliah/{id}"))
    }

    // Auth

    /// Logs in and persists the returned token and user before returning.
    pub fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        let auth: AuthResponse = self.post("/auth/login", request)?;
        self.persist_auth(&auth)?;
        Ok(auth)
    }

    /// Registers a new account; a successful registration is also a login.
    pub fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        let auth: AuthResponse = self.post("/auth/register", request)?;
        self.persist_auth(&auth)?;
        Ok(auth)
    }

    /// Clears the local session first, then notifies the backend. The clear
    /// is idempotent, so a logout after an already-cleared session still
    /// succeeds locally.
    pub fn logout(&self) -> ApiResult<()> {
        self.session.clear()?;
        self.request("POST", "/auth/logout", None)?;
        Ok(())
    }

    fn persist_auth(&self, auth: &AuthResponse) -> ApiResult<()> {
        self.session.set_token(&auth.token)?;
        self.session.set_user(&auth.user)?;
        Ok(())
    }
}

/// Pulls the backend's structured `{"error": "..."}` message out of a failed
/// response. An unparseable body falls back to "Request failed"; a parseable
/// body without an error field to "API error: <status>".
fn error_message(code: u16, response: ureq::Response) -> String {
    match response.into_json::<Value>() {
        Err(_) => "Request failed".to_string(),
        Ok(body) => body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("API error: {code}")),
    }
}
