use crate::error::Result;
use crate::rest::RestContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketingSource {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subsources: Vec<MarketingSubsource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketingSubsource {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "APIVisible", default)]
    pub api_visible: bool,
}

/// System configuration/setup lookups
#[derive(Debug, Clone, Copy)]
pub struct SetupApi<'a> {
    ctx: &'a RestContext,
}

impl<'a> SetupApi<'a> {
    pub(crate) fn new(ctx: &'a RestContext) -> Self {
        SetupApi { ctx }
    }

    pub async fn marketing_sources(&self) -> Result<Vec<MarketingSource>> {
        self.ctx.get("/setup/marketingSources").await
    }
}
