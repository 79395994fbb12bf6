//! Login gate in front of the dashboard.
//!
//! A successful login clears every cached table, so the first render of a
//! session always reads fresh data.

use orb_data::cache::FetchCache;
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::{config::UserCfg, errors::AuthError};

pub trait SessionGate {
    fn is_authenticated(&self) -> bool;

    /// Drop everything cached for dataset fetches.
    fn invalidate_all_caches(&self);
}

pub struct Session<'c> {
    cache: &'c FetchCache,
    user: Option<String>,
}

impl<'c> Session<'c> {
    pub fn new(cache: &'c FetchCache) -> Self {
        Self { cache, user: None }
    }

    /// Check `username`/`password` against `users`.
    ///
    /// On failure the session is logged out, whoever was logged in before.
    pub fn login(&mut self, users: &[UserCfg], username: &str, password: &str) -> Result<(), AuthError> {
        let username = username.trim();
        let ok = users
            .iter()
            .find(|u| u.username == username)
            .is_some_and(|u| u.password.expose_secret() == password);

        if !ok {
            warn!(%username, "login rejected");
            self.user = None;
            return Err(AuthError::InvalidCredentials);
        }

        info!(%username, "login succeeded; clearing caches");
        self.user = Some(username.to_string());
        self.invalidate_all_caches();
        Ok(())
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn cache(&self) -> &'c FetchCache {
        self.cache
    }
}

impl SessionGate for Session<'_> {
    fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    fn invalidate_all_caches(&self) {
        self.cache.clear();
    }
}
