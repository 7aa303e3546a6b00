//! Authenticated admin client.
//!
//! Every request goes through [`AdminClient::send`], which attaches the
//! session credential when one exists and tears the session down on a 401
//! before handing the error back to the caller.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shodhan_core::blog::{BlogForm, BlogPayload};
use shodhan_core::blog_model::validate_blog_form;
use shodhan_core::route::{Navigator, Route};
use shodhan_core::session::SessionProvider;
use shodhan_core::validation::validate_password_change;
use tracing::{debug, warn};

use crate::endpoints::Endpoints;
use crate::error::ApiError;
use crate::http::{ClientOptions, Transport, check_status};
use crate::types::{Blog, PasswordChange, SlugAvailability, SlugSuggestion};

pub struct AdminClient {
    pub(crate) transport: Transport,
    pub(crate) session: Arc<SessionProvider>,
    pub(crate) navigator: Arc<dyn Navigator>,
}

impl AdminClient {
    pub fn new(
        options: &ClientOptions,
        session: Arc<SessionProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            transport: Transport::new(options)?,
            session,
            navigator,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.transport.endpoints
    }

    pub fn session(&self) -> &SessionProvider {
        &self.session
    }

    /// Issue a request with the session credential, if any.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match self.session.credential() {
            Some(credential) => request.header(AUTHORIZATION, credential.header_value()),
            None => request,
        };
        let resp = request.send().await?;
        match check_status(resp).await {
            Err(err) if err.status() == Some(401) => {
                self.on_unauthorized();
                Err(err)
            }
            other => other,
        }
    }

    /// The stored credential was rejected: forget it and go back to login.
    pub(crate) fn on_unauthorized(&self) {
        warn!("Admin credential rejected; clearing session");
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }
        self.navigator.navigate(&Route::admin_login());
    }

    async fn get_json<T: DeserializeOwned>(&self, url: reqwest::Url) -> Result<T, ApiError> {
        debug!(%url, "GET (admin)");
        let resp = self.send(self.transport.http.get(url)).await?;
        Ok(resp.json().await?)
    }

    /// Parse a body that may legitimately be empty.
    async fn optional_blog(resp: Response) -> Result<Option<Blog>, ApiError> {
        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&text)
            .inspect_err(|e| debug!(error = %e, "Response body is not a blog"))
            .ok())
    }

    // =========================================================================
    // Blogs
    // =========================================================================

    pub async fn list_blogs(&self) -> Result<Vec<Blog>, ApiError> {
        self.get_json(self.endpoints().blogs_admin()).await
    }

    pub async fn blog(&self, id: u64) -> Result<Blog, ApiError> {
        self.get_json(self.endpoints().blog_admin(id)).await
    }

    pub async fn blog_by_slug(&self, slug: &str) -> Result<Blog, ApiError> {
        self.get_json(self.endpoints().blog_admin_by_slug(slug)).await
    }

    pub async fn search_blogs(&self, keyword: &str) -> Result<Vec<Blog>, ApiError> {
        self.get_json(self.endpoints().blogs_admin_search(keyword))
            .await
    }

    fn checked_payload(form: &BlogForm) -> Result<BlogPayload, ApiError> {
        let errors = validate_blog_form(form);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(form.to_payload())
    }

    /// Validate, sanitize and create a post.
    pub async fn create_blog(&self, form: &BlogForm) -> Result<Option<Blog>, ApiError> {
        let payload = Self::checked_payload(form)?;
        let url = self.endpoints().blogs_admin();
        debug!(%url, slug = %payload.slug, "POST blog");
        let resp = self.send(self.transport.http.post(url).json(&payload)).await?;
        Self::optional_blog(resp).await
    }

    /// Send raw fields unchanged, bypassing form validation.
    pub async fn create_blog_fields(
        &self,
        fields: &Map<String, Value>,
    ) -> Result<Option<Blog>, ApiError> {
        let url = self.endpoints().blogs_admin();
        debug!(%url, "POST raw blog fields");
        let resp = self.send(self.transport.http.post(url).json(fields)).await?;
        Self::optional_blog(resp).await
    }

    pub async fn update_blog(&self, id: u64, form: &BlogForm) -> Result<Option<Blog>, ApiError> {
        let payload = Self::checked_payload(form)?;
        let url = self.endpoints().blog_admin(id);
        debug!(%url, "PUT blog");
        let resp = self.send(self.transport.http.put(url).json(&payload)).await?;
        Self::optional_blog(resp).await
    }

    pub async fn delete_blog(&self, id: u64) -> Result<(), ApiError> {
        let url = self.endpoints().blog_admin(id);
        debug!(%url, "DELETE blog");
        self.send(self.transport.http.delete(url)).await?;
        Ok(())
    }

    pub async fn generate_slug(&self, title: &str) -> Result<String, ApiError> {
        let suggestion: SlugSuggestion = self.get_json(self.endpoints().generate_slug(title)).await?;
        Ok(suggestion.slug)
    }

    pub async fn check_slug(&self, slug: &str) -> Result<bool, ApiError> {
        let availability: SlugAvailability = self.get_json(self.endpoints().check_slug(slug)).await?;
        Ok(availability.available)
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Ask the backend whether the stored credential is still accepted.
    pub async fn verify(&self) -> Result<(), ApiError> {
        let url = self.endpoints().admin_verify();
        debug!(%url, "GET verify");
        self.send(self.transport.http.get(url)).await?;
        Ok(())
    }

    /// Validate locally, then change the admin password.
    pub async fn change_password(
        &self,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), ApiError> {
        let errors = validate_password_change(current, new, confirm);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        let body = PasswordChange {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        let url = self.endpoints().change_password();
        debug!(%url, "POST change-password");
        self.send(self.transport.http.post(url).json(&body)).await?;
        Ok(())
    }
}

/// User-facing message for a failed password change.
pub fn password_change_message(err: &ApiError) -> String {
    match err {
        ApiError::Validation(_) => err.user_message(&crate::error::Lookup::list("password")),
        ApiError::Status { status: 400, .. } => "Invalid current password".into(),
        ApiError::Status { status: 401, .. } => "Authentication failed. Please login again.".into(),
        ApiError::Status {
            message: Some(message),
            ..
        } => message.clone(),
        _ => "Failed to change password. Please try again.".into(),
    }
}

/// User-facing message for a failed create or update.
pub fn save_blog_message(err: &ApiError) -> String {
    match err {
        ApiError::Validation(_) => err.user_message(&crate::error::Lookup::list("blog")),
        ApiError::Status {
            message: Some(message),
            ..
        } => format!("Failed to save blog: {message}"),
        ApiError::Status { status: 400, .. } => {
            "Invalid data format. Please check your input and try again.".into()
        }
        _ => "Failed to save blog. Please try again.".into(),
    }
}

/// User-facing message for a failed delete.
pub fn delete_blog_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status: 401, .. } => "Authentication failed. Please login again.".into(),
        _ => "Failed to delete blog. Please try again.".into(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn status(code: u16, message: Option<&str>) -> ApiError {
        ApiError::Status {
            status: code,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn password_messages() {
        assert_eq!(
            password_change_message(&status(400, Some("bad"))),
            "Invalid current password"
        );
        assert_eq!(
            password_change_message(&status(401, None)),
            "Authentication failed. Please login again."
        );
        assert_eq!(
            password_change_message(&status(500, Some("Database down"))),
            "Database down"
        );
        assert_eq!(
            password_change_message(&status(500, None)),
            "Failed to change password. Please try again."
        );
    }

    #[test]
    fn save_messages() {
        assert_eq!(
            save_blog_message(&status(409, Some("Slug already exists"))),
            "Failed to save blog: Slug already exists"
        );
        assert_eq!(
            save_blog_message(&status(400, None)),
            "Invalid data format. Please check your input and try again."
        );
        assert_eq!(
            save_blog_message(&status(503, None)),
            "Failed to save blog. Please try again."
        );
    }

    #[test]
    fn delete_messages() {
        assert_eq!(
            delete_blog_message(&status(401, None)),
            "Authentication failed. Please login again."
        );
        assert_eq!(
            delete_blog_message(&status(404, None)),
            "Failed to delete blog. Please try again."
        );
    }

    #[test]
    fn invalid_form_never_builds_payload() {
        let form = BlogForm {
            title: "Title".into(),
            slug: "Bad Slug".into(),
            content: "body".into(),
            author: "Asha".into(),
            ..BlogForm::default()
        };
        let err = AdminClient::checked_payload(&form).unwrap_err();
        match err {
            ApiError::Validation(fields) => assert!(fields.contains_key("slug")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
