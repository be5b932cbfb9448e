use crate::error::Result;
use crate::models::common::{impl_has_self_link, Link};
use crate::rest::RestContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Agent {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(rename = "Type", default)]
    pub agent_type: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub default_currency_code: Option<String>,
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub is_archived: Option<bool>,
    #[serde(default)]
    pub commission_mode: Option<i32>,
    #[serde(default)]
    pub billing_type: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    #[serde(default)]
    pub external_reference: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AgentStaff {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl_has_self_link!(Agent, AgentStaff);

/// Travel agent lookups
#[derive(Debug, Clone, Copy)]
pub struct AgentsApi<'a> {
    ctx: &'a RestContext,
}

impl<'a> AgentsApi<'a> {
    pub(crate) fn new(ctx: &'a RestContext) -> Self {
        AgentsApi { ctx }
    }

    pub async fn list(&self) -> Result<Vec<Agent>> {
        self.ctx.get("/sales/agents").await
    }

    pub async fn find(&self, id: i64) -> Result<Agent> {
        self.ctx.get(&format!("/sales/agents/{}", id)).await
    }

    /// Staff members of an agency
    pub async fn staff(&self, id: i64) -> Result<Vec<AgentStaff>> {
        self.ctx.get(&format!("/sales/agents/{}/staff", id)).await
    }
}
