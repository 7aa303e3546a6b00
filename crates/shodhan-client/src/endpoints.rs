//! URL construction for every backend route.
//!
//! Path parameters are pushed as individual segments and query values are
//! form-encoded, so identifiers containing `/`, spaces or `&` stay intact.

use reqwest::Url;

use crate::error::ApiError;

/// Builds backend URLs from a base origin.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        if base_url.trim().is_empty() {
            return Err(ApiError::Config("base_url is empty".into()));
        }
        let base = Url::parse(base_url.trim())
            .map_err(|e| ApiError::Config(format!("invalid base_url {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "base_url {base_url:?} cannot carry a path"
            )));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `{base}/api/{segments...}`
    pub(crate) fn api(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    fn with_query(mut url: Url, key: &str, value: &str) -> Url {
        url.query_pairs_mut().append_pair(key, value);
        url
    }

    // =========================================================================
    // Catalogue
    // =========================================================================

    pub fn diseases(&self) -> Url {
        self.api(&["diseases"])
    }

    pub fn diseases_by_category(&self, name: &str) -> Url {
        self.api(&["diseases", "category", name])
    }

    pub fn disease(&self, id: &str) -> Url {
        self.api(&["diseases", id])
    }

    pub fn categories(&self) -> Url {
        self.api(&["categories"])
    }

    pub fn category_with_diseases(&self, id: &str) -> Url {
        Self::with_query(self.api(&["categories", id]), "includeDiseases", "true")
    }

    pub fn services(&self) -> Url {
        self.api(&["services"])
    }

    pub fn service(&self, id: &str) -> Url {
        self.api(&["services", id])
    }

    pub fn clinics(&self) -> Url {
        self.api(&["clinics"])
    }

    pub fn appointments(&self) -> Url {
        self.api(&["appointments"])
    }

    // =========================================================================
    // Public blogs
    // =========================================================================

    pub fn blogs_public(&self) -> Url {
        self.api(&["blogs", "public"])
    }

    pub fn blogs_featured(&self) -> Url {
        self.api(&["blogs", "public", "featured"])
    }

    pub fn blog_by_slug(&self, slug: &str) -> Url {
        self.api(&["blogs", "public", "slug", slug])
    }

    pub fn blogs_search(&self, keyword: &str) -> Url {
        Self::with_query(self.api(&["blogs", "public", "search"]), "keyword", keyword)
    }

    pub fn blogs_by_author(&self, author: &str) -> Url {
        self.api(&["blogs", "public", "author", author])
    }

    // =========================================================================
    // Admin
    // =========================================================================

    pub fn blogs_admin(&self) -> Url {
        self.api(&["blogs", "admin"])
    }

    pub fn blog_admin(&self, id: u64) -> Url {
        self.api(&["blogs", "admin", &id.to_string()])
    }

    pub fn blog_admin_by_slug(&self, slug: &str) -> Url {
        self.api(&["blogs", "admin", "slug", slug])
    }

    pub fn blogs_admin_search(&self, keyword: &str) -> Url {
        Self::with_query(self.api(&["blogs", "admin", "search"]), "keyword", keyword)
    }

    pub fn generate_slug(&self, title: &str) -> Url {
        Self::with_query(self.api(&["blogs", "admin", "generate-slug"]), "title", title)
    }

    pub fn check_slug(&self, slug: &str) -> Url {
        Self::with_query(self.api(&["blogs", "admin", "check-slug"]), "slug", slug)
    }

    pub fn admin_login(&self) -> Url {
        self.api(&["admin", "auth", "login"])
    }

    pub fn admin_verify(&self) -> Url {
        self.api(&["admin", "auth", "verify"])
    }

    pub fn change_password(&self) -> Url {
        self.api(&["admin", "change-password"])
    }
}
