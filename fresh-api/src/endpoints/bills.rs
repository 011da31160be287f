use super::{lenient_f64, Amount};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: String,
    #[serde(rename = "providerId")]
    pub provider_id: String,
    #[serde(rename = "providerName")]
    pub provider_name: String,
    pub items: Vec<LineItem>,
    pub signer: String,
    pub total: Amount,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub quantity: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub item_total: f64,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListBills;

impl ListBills {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListBills {
    type Data = ();
    type Response = Vec<Bill>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/bills".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetBill {
    #[serde(skip)]
    bill_id: String,
}

impl GetBill {
    pub fn new(bill_id: impl Into<String>) -> Self {
        Self {
            bill_id: bill_id.into(),
        }
    }
}

impl Request for GetBill {
    type Data = ();
    type Response = Bill;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/bills/{}", self.bill_id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateBill {
    #[serde(flatten)]
    bill: NewBill,
}

impl CreateBill {
    pub fn new(bill: NewBill) -> Self {
        Self { bill }
    }
}

impl Request for CreateBill {
    type Data = Self;
    type Response = Bill;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/bills".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

/// Creation payload. `total` is sent as a number; the backend stores and
/// returns it as a decimal string (see [`Amount`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBill {
    #[serde(rename = "providerId")]
    pub provider_id: String,
    #[serde(rename = "providerName")]
    pub provider_name: String,
    pub items: Vec<NewLineItem>,
    pub total: f64,
    pub signer: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLineItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub price: f64,
    pub item_total: f64,
}

impl NewLineItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: f64, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            price,
            item_total: quantity * price,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateBill {
    #[serde(skip)]
    bill_id: String,
    #[serde(flatten)]
    update: BillUpdate,
}

impl UpdateBill {
    pub fn new(bill_id: impl Into<String>) -> Self {
        Self {
            bill_id: bill_id.into(),
            update: BillUpdate::default(),
        }
    }

    setter!(opt update.signer: String);
    setter!(opt update.date: DateTime<Utc>);

    pub fn items(mut self, items: Vec<NewLineItem>, total: f64) -> Self {
        self.update.items = Some(items);
        self.update.total = Some(total);
        self
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct BillUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NewLineItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Request for UpdateBill {
    type Data = Self;
    type Response = Bill;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/bills/{}", self.bill_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}
