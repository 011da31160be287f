use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Signer {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListSigners;

impl ListSigners {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListSigners {
    type Data = ();
    type Response = Vec<Signer>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/signers".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSigner {
    #[serde(flatten)]
    signer: NewSigner,
}

impl CreateSigner {
    pub fn new(signer: NewSigner) -> Self {
        Self { signer }
    }
}

impl Request for CreateSigner {
    type Data = Self;
    type Response = Signer;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/signers".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSigner {
    pub name: String,
}
