//! Mock implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::catalogue::Catalogue;
use crate::domain::user::Credentials;
use crate::dto::auth::LoginResponse;
use crate::repository::errors::RepositoryResult;
use crate::repository::{AuthGateway, CatalogueReader};

mock! {
    pub Gateway {}

    #[async_trait]
    impl AuthGateway for Gateway {
        async fn login(&self, credentials: &Credentials) -> RepositoryResult<LoginResponse>;
        async fn logout(&self) -> RepositoryResult<()>;
    }
}

mock! {
    pub Catalogues {}

    #[async_trait]
    impl CatalogueReader for Catalogues {
        async fn list_catalogues(&self, kind: &str) -> RepositoryResult<Vec<Catalogue>>;
    }
}
