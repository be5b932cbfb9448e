use crate::error::Result;
use crate::models::common::{impl_has_self_link, Link, UpdateOperation};
use crate::query;
use crate::rest::RestContext;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Time>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    NotSet,
    Male,
    Female,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    pub forename: String,
    pub surname: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<Time>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub agent_id: Option<i64>,
    #[serde(default)]
    pub do_not_email: bool,
    #[serde(default)]
    pub do_not_mail: bool,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub external_reference: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub title: String,
    pub forename: String,
    pub surname: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactType {
    #[default]
    Primary,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerContact {
    pub title: String,
    pub forename: String,
    pub surname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address0: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_landline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_landline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_email: Option<String>,
    #[serde(rename = "Type", default)]
    pub contact_type: ContactType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl_has_self_link!(Customer);

/// Customer management API actions
#[derive(Debug, Clone, Copy)]
pub struct CustomersApi<'a> {
    ctx: &'a RestContext,
}

impl<'a> CustomersApi<'a> {
    pub(crate) fn new(ctx: &'a RestContext) -> Self {
        CustomersApi { ctx }
    }

    /// Search existing customers
    pub async fn search(&self, params: &CustomerSearchRequest) -> Result<Vec<Customer>> {
        let path = query::with_query("/sales/customers/search", &query::encode_under("search", params)?);
        self.ctx.get(&path).await
    }

    pub async fn create(&self, params: &CreateCustomerRequest) -> Result<Customer> {
        self.ctx.post("/sales/customers", params).await
    }

    pub async fn create_contact(&self, customer_id: impl Display, contact: &CustomerContact) -> Result<Customer> {
        self.ctx
            .post(&format!("/sales/customers/{}/contacts", customer_id), contact)
            .await
    }
}

/// Actions on a single customer
#[derive(Debug, Clone, Copy)]
pub struct CustomerApi<'a> {
    ctx: &'a RestContext,
    id: i64,
}

impl<'a> CustomerApi<'a> {
    pub(crate) fn new(ctx: &'a RestContext, id: i64) -> Self {
        CustomerApi { ctx, id }
    }

    pub fn path(&self) -> String {
        format!("/sales/customers/{}", self.id)
    }

    pub async fn find(&self) -> Result<Customer> {
        self.ctx.get(&self.path()).await
    }

    pub async fn contacts(&self) -> Result<Vec<CustomerContact>> {
        self.ctx.get(&format!("{}/contacts", self.path())).await
    }

    pub async fn add_contact(&self, contact: &CustomerContact) -> Result<Customer> {
        self.ctx
            .post(&format!("{}/contacts", self.path()), contact)
            .await
    }

    pub async fn update(&self, updates: &[UpdateOperation]) -> Result<()> {
        self.ctx.patch(&self.path(), updates).await
    }
}
