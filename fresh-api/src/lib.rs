pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::FreshApiError;
use repositories::*;
use tower_api_client::{Client as ApiClient, Request as ApiRequest};

const BASE_URL: &str = "https://freshbooksbackend.onrender.com/api";

pub struct Client {
    inner: ApiClient,
}

impl Client {
    /// The backend is unauthenticated; a client needs no credentials.
    pub fn new() -> Self {
        Self {
            inner: ApiClient::new(BASE_URL),
        }
    }

    /// Point the client at a different deployment (local backend, tests).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            inner: ApiClient::new(base_url),
        }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, FreshApiError>
    where
        R: ApiRequest,
    {
        self.inner.send(request).await.map_err(From::from)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Request;

impl Request {
    pub fn bills() -> BillRepository {
        BillRepository::new()
    }

    pub fn providers() -> ProviderRepository {
        ProviderRepository::new()
    }

    pub fn signers() -> SignerRepository {
        SignerRepository::new()
    }

    pub fn vegetables() -> VegetableRepository {
        VegetableRepository::new()
    }
}
