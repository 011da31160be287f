use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

/// A catalog entry: a known item name offered for autocomplete when adding
/// bill line items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vegetable {
    pub id: String,
    pub name: String,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListVegetables;

impl ListVegetables {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListVegetables {
    type Data = ();
    type Response = Vec<Vegetable>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/vegetables".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateVegetable {
    #[serde(flatten)]
    vegetable: NewVegetable,
}

impl CreateVegetable {
    pub fn new(vegetable: NewVegetable) -> Self {
        Self { vegetable }
    }
}

impl Request for CreateVegetable {
    type Data = Self;
    type Response = Vegetable;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/vegetables".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVegetable {
    pub name: String,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
}
