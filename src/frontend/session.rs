//! # Signed Cookies
//!
//! Session, flash and anti-forgery state for the front-end, carried in
//! HMAC-SHA256 signed cookies. A signed value is
//! `base64url(payload).base64url(tag)`.
//!
//! The anti-forgery token embedded in forms is `HMAC("csrf:" + nonce)`, where
//! the nonce lives in its own signed cookie. A form post is accepted only
//! when the token matches the nonce the browser sent back.

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::{TodoError, TodoResult};
use crate::frontend::error::FrontendError;
use crate::frontend::state::FrontendState;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "todolist_session";
pub const CSRF_COOKIE: &str = "todolist_csrf";
pub const FLASH_COOKIE: &str = "todolist_flash";

/// Form field carrying the anti-forgery token
pub const CSRF_FIELD: &str = "_csrf";

#[derive(Clone)]
pub struct CookieSigner {
    mac: HmacSha256,
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSigner").finish_non_exhaustive()
    }
}

impl CookieSigner {
    pub fn new(secret: &str) -> TodoResult<Self> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| TodoError::Configuration(format!("Invalid session secret: {e}")))?;
        Ok(Self { mac })
    }

    fn tag(&self, message: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }

    fn check(&self, message: &[u8], tag: &[u8]) -> bool {
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.verify_slice(tag).is_ok()
    }

    pub fn sign(&self, payload: &[u8]) -> String {
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload),
            URL_SAFE_NO_PAD.encode(self.tag(payload))
        )
    }

    /// Payload bytes when the signature checks out
    pub fn verify(&self, value: &str) -> Option<Vec<u8>> {
        let (payload, tag) = value.split_once('.')?;
        let payload = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let tag = URL_SAFE_NO_PAD.decode(tag).ok()?;
        self.check(&payload, &tag).then_some(payload)
    }

    pub fn sign_json<T: Serialize>(&self, value: &T) -> TodoResult<String> {
        let payload = serde_json::to_vec(value)
            .map_err(|e| TodoError::Internal(format!("Failed to encode cookie: {e}")))?;
        Ok(self.sign(&payload))
    }

    pub fn verify_json<T: DeserializeOwned>(&self, value: &str) -> Option<T> {
        let payload = self.verify(value)?;
        serde_json::from_slice(&payload).ok()
    }

    pub fn csrf_token(&self, nonce: &str) -> String {
        URL_SAFE_NO_PAD.encode(self.tag(format!("csrf:{nonce}").as_bytes()))
    }

    pub fn verify_csrf(&self, nonce: &str, token: &str) -> bool {
        match URL_SAFE_NO_PAD.decode(token.trim()) {
            Ok(tag) => self.check(format!("csrf:{nonce}").as_bytes(), &tag),
            Err(_) => false,
        }
    }
}

/// The signed-in user as stored in the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    /// Unix seconds
    pub expires_at: i64,
}

impl SessionUser {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        display_name: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            display_name: display_name.into(),
            expires_at: (Utc::now() + ttl).timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now().timestamp()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot message shown on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

pub fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

pub fn build_cookie(name: &str, value: &str, max_age: Option<i64>, secure: bool) -> String {
    let mut cookie = format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax");
    if let Some(seconds) = max_age {
        cookie.push_str(&format!("; Max-Age={seconds}"));
    }
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_cookie(name: &str, secure: bool) -> String {
    build_cookie(name, "", Some(0), secure)
}

fn random_nonce() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Per-request view of the browser: who is signed in, the pending flash and
/// the anti-forgery nonce. Cookie changes queue up and are attached by
/// [`Visitor::respond`].
#[derive(Debug)]
pub struct Visitor {
    pub user: Option<SessionUser>,
    pub flash: Option<Flash>,
    /// Path and query of the current request
    pub path: String,
    csrf_nonce: String,
    signer: CookieSigner,
    secure: bool,
    session_ttl: Duration,
    pending_cookies: Vec<String>,
}

impl FromRequestParts<FrontendState> for Visitor {
    type Rejection = FrontendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &FrontendState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = parse_cookies(&parts.headers);
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        Ok(Visitor::from_cookies(
            &cookies,
            path,
            state.signer.clone(),
            state.config.secure_cookies,
            Duration::hours(state.config.session_ttl_hours),
        ))
    }
}

impl Visitor {
    pub fn from_cookies(
        cookies: &HashMap<String, String>,
        path: String,
        signer: CookieSigner,
        secure: bool,
        session_ttl: Duration,
    ) -> Self {
        let mut pending_cookies = Vec::new();

        let user = cookies
            .get(SESSION_COOKIE)
            .and_then(|raw| signer.verify_json::<SessionUser>(raw));
        let user = match user {
            Some(user) if user.is_expired() => {
                debug!(user_id = %user.user_id, "Session expired");
                pending_cookies.push(clear_cookie(SESSION_COOKIE, secure));
                None
            }
            other => other,
        };

        let flash = cookies.get(FLASH_COOKIE).and_then(|raw| {
            pending_cookies.push(clear_cookie(FLASH_COOKIE, secure));
            signer.verify_json::<Flash>(raw)
        });

        let csrf_nonce = match cookies
            .get(CSRF_COOKIE)
            .and_then(|raw| signer.verify(raw))
            .and_then(|bytes| String::from_utf8(bytes).ok())
        {
            Some(nonce) => nonce,
            None => {
                let nonce = random_nonce();
                pending_cookies.push(build_cookie(
                    CSRF_COOKIE,
                    &signer.sign(nonce.as_bytes()),
                    None,
                    secure,
                ));
                nonce
            }
        };

        Self {
            user,
            flash,
            path,
            csrf_nonce,
            signer,
            secure,
            session_ttl,
            pending_cookies,
        }
    }

    pub fn require_user(&self) -> Result<&SessionUser, FrontendError> {
        self.user.as_ref().ok_or_else(|| FrontendError::LoginRequired {
            return_to: self.path.clone(),
        })
    }

    pub fn csrf_token(&self) -> String {
        self.signer.csrf_token(&self.csrf_nonce)
    }

    pub fn verify_csrf(&self, token: &str) -> Result<(), FrontendError> {
        if self.signer.verify_csrf(&self.csrf_nonce, token) {
            Ok(())
        } else {
            warn!(path = %self.path, "Rejected form post with invalid anti-forgery token");
            Err(FrontendError::InvalidCsrfToken)
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub fn start_session(&mut self, user: SessionUser) -> TodoResult<()> {
        let value = self.signer.sign_json(&user)?;
        self.pending_cookies.push(build_cookie(
            SESSION_COOKIE,
            &value,
            Some(self.session_ttl.num_seconds()),
            self.secure,
        ));
        self.user = Some(user);
        Ok(())
    }

    pub fn end_session(&mut self) {
        self.user = None;
        self.pending_cookies
            .push(clear_cookie(SESSION_COOKIE, self.secure));
    }

    /// Queue a flash for the next page; replaces any clearing of the cookie
    pub fn set_flash(&mut self, flash: Flash) {
        match self.signer.sign_json(&flash) {
            Ok(value) => {
                self.pending_cookies
                    .retain(|cookie| !cookie.starts_with(&format!("{FLASH_COOKIE}=")));
                self.pending_cookies
                    .push(build_cookie(FLASH_COOKIE, &value, None, self.secure));
            }
            Err(e) => warn!(error = %e, "Dropping flash message that failed to encode"),
        }
    }

    /// Attach queued cookies to `body`
    pub fn respond(self, body: impl IntoResponse) -> Response {
        let mut response = body.into_response();
        for cookie in self.pending_cookies {
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        response
    }

    pub fn redirect(self, to: &str) -> Response {
        self.respond(Redirect::to(to))
    }

    pub fn redirect_with(mut self, to: &str, flash: Flash) -> Response {
        self.set_flash(flash);
        self.redirect(to)
    }
}
