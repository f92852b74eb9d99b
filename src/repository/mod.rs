//! Resource clients: CRUD intents translated to REST calls.

use async_trait::async_trait;

use crate::domain::Resource;
use crate::domain::catalogue::Catalogue;
use crate::domain::types::RecordId;
use crate::domain::user::Credentials;
use crate::dto::auth::LoginResponse;
use crate::dto::envelope::{ApiMessage, Saved};
use crate::pagination::{DEFAULT_PER_PAGE, Page};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
#[cfg(any(test, feature = "test-mocks"))]
pub mod test;

pub use http::HttpRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub pagination: Pagination,
    pub filter: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self {
            pagination: Pagination {
                page: 1,
                per_page: DEFAULT_PER_PAGE,
            },
            filter: None,
        }
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination {
            page: page.max(1),
            per_page: per_page.max(1),
        };
        self
    }

    /// Sets the filter text; blank text means no filter.
    pub fn filter(mut self, text: impl Into<String>) -> Self {
        let text = text.into().trim().to_string();
        self.filter = (!text.is_empty()).then_some(text);
        self
    }

    /// Query-string pairs for resource `T`: paging plus one entry per filter field.
    pub fn params<T: Resource>(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.pagination.page.to_string()),
            ("per_page", self.pagination.per_page.to_string()),
        ];
        if let Some(filter) = &self.filter {
            params.extend(T::FILTER_FIELDS.iter().map(|field| (*field, filter.clone())));
        }
        params
    }
}

#[async_trait]
pub trait ResourceReader<T: Resource>: Send + Sync {
    async fn list(&self, query: &ListQuery) -> RepositoryResult<Page<T>>;
    async fn get(&self, id: RecordId) -> RepositoryResult<T>;
}

#[async_trait]
pub trait ResourceWriter<T: Resource>: Send + Sync {
    async fn create(&self, record: &T) -> RepositoryResult<Saved<T>>;
    async fn update(&self, id: RecordId, record: &T) -> RepositoryResult<Saved<T>>;
    async fn delete(&self, id: RecordId) -> RepositoryResult<Option<ApiMessage>>;
    async fn delete_many(&self, ids: &[RecordId]) -> RepositoryResult<Option<ApiMessage>>;
}

#[async_trait]
pub trait CatalogueReader: Send + Sync {
    /// Lookup entries of one catalogue family, e.g. `IDENTIFICATION_TYPE`.
    async fn list_catalogues(&self, kind: &str) -> RepositoryResult<Vec<Catalogue>>;
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<LoginResponse>;
    async fn logout(&self) -> RepositoryResult<()>;
}

/// A file attached to a record through a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    pub description: Option<String>,
}

#[async_trait]
pub trait FileUploader: Send + Sync {
    async fn upload<T: Resource>(
        &self,
        id: RecordId,
        upload: Upload,
    ) -> RepositoryResult<Option<ApiMessage>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job_board::{Course, Language};

    #[test]
    fn params_append_filter_per_declared_field() {
        let query = ListQuery::new().paginate(2, 5).filter("  rust ");

        assert_eq!(
            query.params::<Course>(),
            vec![
                ("page", "2".to_string()),
                ("per_page", "5".to_string()),
                ("name", "rust".to_string()),
                ("description", "rust".to_string()),
            ]
        );
    }

    #[test]
    fn blank_filter_and_unfilterable_resources_send_paging_only() {
        let blank = ListQuery::new().filter("   ");
        assert_eq!(blank.filter, None);
        assert_eq!(blank.params::<Course>().len(), 2);

        let filtered = ListQuery::new().filter("en");
        assert_eq!(filtered.params::<Language>().len(), 2);
    }

    #[test]
    fn paginate_normalizes_zero_values() {
        let query = ListQuery::new().paginate(0, 0);
        assert_eq!(
            query.pagination,
            Pagination {
                page: 1,
                per_page: 1
            }
        );
    }
}
