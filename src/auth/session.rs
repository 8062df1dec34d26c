use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{error::Result, models::user::Role};

pub const SESSION_COOKIE: &str = "caisse_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// One-shot message shown on the next rendered page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Server-side state behind a session token
#[derive(Debug, Clone, PartialEq)]
pub struct SessionData {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub flashes: Vec<Flash>,
    /// Unix timestamp, same as the cookie's `exp`
    pub expires_at: i64,
}

impl SessionData {
    pub fn new(user_id: i64, username: impl Into<String>, role: Role, expires_at: i64) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
            flashes: Vec::new(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

/// Pluggable session backend keyed by an opaque token.
///
/// Expired sessions behave as absent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, token: &str) -> Option<SessionData>;
    async fn set(&self, token: &str, data: SessionData);
    async fn clear(&self, token: &str);

    /// Queue a flash message. No-op when the session is gone.
    async fn push_flash(&self, token: &str, flash: Flash);

    /// Drain pending flash messages
    async fn take_flashes(&self, token: &str) -> Vec<Flash>;
}

/// In-process session store
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionData>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, token: &str) -> Option<SessionData> {
        let now = Utc::now().timestamp();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(data) if !data.is_expired(now) => return Some(data.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut sessions = self.sessions.write().await;
        if sessions.get(token).is_some_and(|data| data.is_expired(now)) {
            sessions.remove(token);
        }
        None
    }

    async fn set(&self, token: &str, data: SessionData) {
        let now = Utc::now().timestamp();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, data| !data.is_expired(now));
        sessions.insert(token.to_string(), data);
    }

    async fn clear(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    async fn push_flash(&self, token: &str, flash: Flash) {
        let now = Utc::now().timestamp();
        if let Some(data) = self.sessions.write().await.get_mut(token) {
            if !data.is_expired(now) {
                data.flashes.push(flash);
            }
        }
    }

    async fn take_flashes(&self, token: &str) -> Vec<Flash> {
        let now = Utc::now().timestamp();
        match self.sessions.write().await.get_mut(token) {
            Some(data) if !data.is_expired(now) => std::mem::take(&mut data.flashes),
            _ => Vec::new(),
        }
    }
}

/// Claims carried by the signed session cookie
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sid: String,
    sub: String,
    exp: i64,
}

/// Signs and checks session cookies with the shared secret
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Fresh opaque session token
    pub fn new_token() -> String {
        Uuid::new_v4().to_string()
    }

    /// Expiry timestamp for a session opened now
    pub fn expiry(&self) -> i64 {
        (Utc::now() + self.ttl).timestamp()
    }

    /// Signed cookie value for a session token
    pub fn sign(&self, token: &str, username: &str, expires_at: i64) -> Result<String> {
        let claims = Claims {
            sid: token.to_string(),
            sub: username.to_string(),
            exp: expires_at,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Session token from a cookie value; `None` if forged or expired
    pub fn verify(&self, cookie_value: &str) -> Option<String> {
        decode::<Claims>(cookie_value, &self.decoding, &Validation::default())
            .map(|data| data.claims.sid)
            .ok()
    }

    /// `Set-Cookie` value establishing the session
    pub fn set_cookie(&self, signed: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            signed,
            self.ttl.num_seconds()
        )
    }

    /// `Set-Cookie` value removing the session cookie
    pub fn clear_cookie() -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
    }
}

/// Raw session cookie value from the request headers
pub fn read_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}
