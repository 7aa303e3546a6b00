//! Admin session state.
//!
//! The session is an explicit object: it is hydrated from the persisted store
//! once at startup, established after a successful login and torn down on
//! logout or when the backend rejects the stored credential. Everything that
//! needs the credential receives a [`SessionProvider`] instead of reading the
//! store directly.

use std::fmt;
use std::sync::{Arc, RwLock};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::store::{ADMIN_AUTH_KEY, ADMIN_USER_KEY, StateStore};

/// Role recorded for every admin that signs in through the panel.
pub const ADMIN_ROLE: &str = "admin";

/// Basic-auth credential: base64 of `username:password`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn from_login(username: &str, password: &str) -> Self {
        Self(STANDARD.encode(format!("{username}:{password}")))
    }

    /// Wrap an already encoded credential as read from storage.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Basic {}", self.0)
    }

    /// Decode back into `(username, password)`.
    pub fn decode(&self) -> Result<(String, String)> {
        let bytes = STANDARD
            .decode(&self.0)
            .map_err(|e| Error::Credential(e.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|e| Error::Credential(e.to_string()))?;
        let (user, pass) = text
            .split_once(':')
            .ok_or_else(|| Error::Credential("missing ':' separator".into()))?;
        Ok((user.to_string(), pass.to_string()))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Display-only information about the signed-in admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub username: String,
    pub role: String,
}

impl AdminUser {
    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: ADMIN_ROLE.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct AdminSession {
    credential: Credential,
    user: Option<AdminUser>,
}

/// Shared handle to the admin session and its persisted copy.
pub struct SessionProvider {
    store: Arc<dyn StateStore>,
    state: RwLock<Option<AdminSession>>,
}

impl SessionProvider {
    /// Load any persisted session from `store`.
    ///
    /// A stored credential alone is enough to count as signed in; unreadable
    /// user info is dropped with a warning.
    pub fn hydrate(store: Arc<dyn StateStore>) -> Result<Self> {
        let credential = store
            .get(ADMIN_AUTH_KEY)?
            .filter(|c| !c.is_empty())
            .map(Credential::from_encoded);

        let session = credential.map(|credential| {
            let user = match store.get(ADMIN_USER_KEY) {
                Ok(Some(raw)) => serde_json::from_str::<AdminUser>(&raw)
                    .inspect_err(|e| warn!(error = %e, "Ignoring unreadable admin user info"))
                    .ok(),
                Ok(None) => None,
                Err(e) => {
                    warn!(error = %e, "Failed to read admin user info");
                    None
                }
            };
            AdminSession { credential, user }
        });

        debug!(authenticated = session.is_some(), "Session hydrated");
        Ok(Self {
            store,
            state: RwLock::new(session),
        })
    }

    pub fn credential(&self) -> Option<Credential> {
        self.state
            .read()
            .ok()
            .and_then(|s| s.as_ref().map(|s| s.credential.clone()))
    }

    pub fn user(&self) -> Option<AdminUser> {
        self.state
            .read()
            .ok()
            .and_then(|s| s.as_ref().and_then(|s| s.user.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }

    /// Persist and activate a freshly verified session.
    pub fn establish(&self, credential: Credential, user: AdminUser) -> Result<()> {
        self.store.set(ADMIN_AUTH_KEY, credential.as_str())?;
        self.store
            .set(ADMIN_USER_KEY, &serde_json::to_string(&user)?)?;
        let mut state = self
            .state
            .write()
            .map_err(|_| Error::Store("session lock poisoned".into()))?;
        *state = Some(AdminSession {
            credential,
            user: Some(user),
        });
        Ok(())
    }

    /// Forget the session both in memory and in the store.
    ///
    /// Both keys are always attempted; the first failure is returned.
    pub fn clear(&self) -> Result<()> {
        if let Ok(mut state) = self.state.write() {
            *state = None;
        }
        let auth = self.store.remove(ADMIN_AUTH_KEY);
        let user = self.store.remove(ADMIN_USER_KEY);
        auth.and(user)
    }
}

impl fmt::Debug for SessionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionProvider")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
