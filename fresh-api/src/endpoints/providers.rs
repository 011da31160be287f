use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListProviders;

impl ListProviders {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListProviders {
    type Data = ();
    type Response = Vec<Provider>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/providers".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetProvider {
    #[serde(skip)]
    provider_id: String,
}

impl GetProvider {
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
        }
    }
}

impl Request for GetProvider {
    type Data = ();
    type Response = Provider;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/providers/{}", self.provider_id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateProvider {
    #[serde(flatten)]
    provider: NewProvider,
}

impl CreateProvider {
    pub fn new(provider: NewProvider) -> Self {
        Self { provider }
    }
}

impl Request for CreateProvider {
    type Data = Self;
    type Response = Provider;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/providers".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

/// Creation payload. The backend names the phone field `contact` on writes
/// and `mobile` on reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProvider {
    pub name: String,
    pub contact: String,
    pub address: String,
}
