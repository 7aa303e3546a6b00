//! Admin login and logout.
//!
//! Login is a plain request: it bypasses the session credential and the 401
//! teardown in [`AdminClient::send`](crate::AdminClient), since the credential
//! under test is not stored yet.

use reqwest::header::AUTHORIZATION;
use shodhan_core::config::LoginProbe;
use shodhan_core::route::Route;
use shodhan_core::session::{AdminUser, Credential};
use thiserror::Error;
use tracing::{debug, info};

use crate::admin::AdminClient;
use crate::error::ApiError;

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Please enter both username and password")]
    MissingFields,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Access denied. Admin privileges required.")]
    AdminRequired,

    #[error("Login failed. Please check your connection and try again.")]
    Connectivity(#[source] ApiError),

    #[error("Failed to store session: {0}")]
    Session(#[from] shodhan_core::Error),
}

impl AdminClient {
    /// Verify `username`/`password` against the backend and, on success,
    /// persist the credential and user info.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        probe: LoginProbe,
    ) -> Result<AdminUser, LoginError> {
        if username.is_empty() || password.is_empty() {
            return Err(LoginError::MissingFields);
        }

        let credential = Credential::from_login(username, password);
        let url = match probe {
            LoginProbe::Dedicated => self.endpoints().admin_login(),
            LoginProbe::BlogList => self.endpoints().blogs_admin(),
        };
        debug!(%url, ?probe, "Login probe");

        let resp = self
            .transport
            .http
            .get(url)
            .header(AUTHORIZATION, credential.header_value())
            .send()
            .await
            .map_err(|e| LoginError::Connectivity(e.into()))?;

        match resp.status().as_u16() {
            200 => {
                let user = AdminUser::admin(username);
                self.session.establish(credential, user.clone())?;
                info!(username, "Admin signed in");
                Ok(user)
            }
            401 => Err(LoginError::InvalidCredentials),
            403 => Err(LoginError::AdminRequired),
            status => Err(LoginError::Connectivity(ApiError::Status {
                status,
                message: None,
            })),
        }
    }

    /// Forget the session and return to the login entry point.
    pub fn logout(&self) -> Result<(), shodhan_core::Error> {
        self.session.clear()?;
        info!("Admin signed out");
        self.navigator.navigate(&Route::admin_login());
        Ok(())
    }
}
