//! Anonymous access to the catalogue, booking and public blog endpoints.

use reqwest::Url;
use serde::de::DeserializeOwned;
use shodhan_core::service_kind::AppointmentRequest;
use tracing::debug;

use crate::endpoints::Endpoints;
use crate::error::ApiError;
use crate::http::{ClientOptions, Transport, check_status, read_json};
use crate::types::{Blog, Category, Clinic, Disease, Service};

#[derive(Debug, Clone)]
pub struct PublicClient {
    transport: Transport,
}

impl PublicClient {
    pub fn new(options: &ClientOptions) -> Result<Self, ApiError> {
        Ok(Self {
            transport: Transport::new(options)?,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.transport.endpoints
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let resp = self.transport.http.get(url).send().await?;
        read_json(resp).await
    }

    // =========================================================================
    // Catalogue
    // =========================================================================

    pub async fn diseases(&self) -> Result<Vec<Disease>, ApiError> {
        self.get(self.endpoints().diseases()).await
    }

    pub async fn diseases_by_category(&self, name: &str) -> Result<Vec<Disease>, ApiError> {
        self.get(self.endpoints().diseases_by_category(name)).await
    }

    pub async fn disease(&self, id: &str) -> Result<Disease, ApiError> {
        self.get(self.endpoints().disease(id)).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get(self.endpoints().categories()).await
    }

    pub async fn category_with_diseases(&self, id: &str) -> Result<Category, ApiError> {
        self.get(self.endpoints().category_with_diseases(id)).await
    }

    /// Every category with its diseases.
    ///
    /// Groups the flat disease list when it is non-empty; otherwise asks for
    /// the categories and then each category's diseases. A category whose
    /// diseases fail to load is kept with an empty list.
    pub async fn categories_with_diseases(&self) -> Result<Vec<Category>, ApiError> {
        let diseases = self.diseases().await?;
        if !diseases.is_empty() {
            return Ok(crate::types::group_by_category(diseases));
        }

        let mut categories = self.categories().await?;
        for category in &mut categories {
            match self.diseases_by_category(&category.name).await {
                Ok(diseases) => category.diseases = diseases,
                Err(e) => {
                    debug!(category = %category.name, error = %e, "Category diseases unavailable");
                    category.diseases.clear();
                }
            }
        }
        Ok(categories)
    }

    pub async fn services(&self) -> Result<Vec<Service>, ApiError> {
        self.get(self.endpoints().services()).await
    }

    pub async fn service(&self, id: &str) -> Result<Service, ApiError> {
        self.get(self.endpoints().service(id)).await
    }

    pub async fn clinics(&self) -> Result<Vec<Clinic>, ApiError> {
        self.get(self.endpoints().clinics()).await
    }

    /// Submit a booking that has already passed local validation.
    pub async fn book_appointment(&self, request: &AppointmentRequest) -> Result<(), ApiError> {
        let url = self.endpoints().appointments();
        debug!(%url, service = %request.service_name, "POST appointment");
        let resp = self.transport.http.post(url).json(request).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    // =========================================================================
    // Blogs
    // =========================================================================

    pub async fn blogs(&self) -> Result<Vec<Blog>, ApiError> {
        self.get(self.endpoints().blogs_public()).await
    }

    pub async fn featured_blogs(&self) -> Result<Vec<Blog>, ApiError> {
        self.get(self.endpoints().blogs_featured()).await
    }

    pub async fn blog_by_slug(&self, slug: &str) -> Result<Blog, ApiError> {
        self.get(self.endpoints().blog_by_slug(slug)).await
    }

    pub async fn search_blogs(&self, keyword: &str) -> Result<Vec<Blog>, ApiError> {
        self.get(self.endpoints().blogs_search(keyword)).await
    }

    pub async fn blogs_by_author(&self, author: &str) -> Result<Vec<Blog>, ApiError> {
        self.get(self.endpoints().blogs_by_author(author)).await
    }
}
