use std::sync::Arc;

use crate::{
    auth::{SessionData, SessionKeys, SessionStore},
    db::user_store::UserStore,
    error::Result,
};

/// Opens and closes sessions
pub struct AuthService {
    users: UserStore,
    sessions: Arc<dyn SessionStore>,
    keys: SessionKeys,
}

impl AuthService {
    pub fn new(users: UserStore, sessions: Arc<dyn SessionStore>, keys: SessionKeys) -> Self {
        Self {
            users,
            sessions,
            keys,
        }
    }

    /// Check credentials and open a session.
    ///
    /// Returns the `Set-Cookie` value on success, `None` on bad credentials
    /// without saying which field was wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<String>> {
        let Some(user) = self.users.authenticate(username, password).await? else {
            tracing::warn!("Failed login attempt for '{}'", username);
            return Ok(None);
        };

        let token = SessionKeys::new_token();
        let expires_at = self.keys.expiry();
        let signed = self.keys.sign(&token, &user.username, expires_at)?;
        self.sessions
            .set(
                &token,
                SessionData::new(user.id, &user.username, user.role, expires_at),
            )
            .await;

        tracing::info!("User '{}' logged in", user.username);
        Ok(Some(self.keys.set_cookie(&signed)))
    }

    /// Drop the session; returns the `Set-Cookie` value expiring the cookie
    pub async fn logout(&self, token: &str) -> String {
        self.sessions.clear(token).await;
        SessionKeys::clear_cookie()
    }
}
