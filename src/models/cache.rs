use crate::error::Result;
use crate::models::tours::{AccommodationUnit, Inventory};
use crate::query;
use crate::rest::RestContext;
use crate::time::Time;
use serde::{Deserialize, Serialize};

/// Open or closed interval used by departure search filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRange<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<T>,
}

/// Filters for the cached departure search, sent as `searchQuery[...]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_setup_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_date_range: Option<SearchRange<Time>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<SearchRange<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adult_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_points: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<Vec<u32>>,
    #[serde(rename = "passengercount", skip_serializing_if = "Option::is_none")]
    pub passenger_count: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheStats {
    pub item_count: i64,
    pub average_age_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeparturePrice {
    pub value: f64,
    pub currency_code: String,
}

/// Departure as held in the search cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CachedDeparture {
    pub id: String,
    #[serde(default)]
    pub refresh_id: Option<String>,
    #[serde(default)]
    pub departure_setup_id: Option<i64>,
    #[serde(default)]
    pub price_set_id: Option<i64>,
    #[serde(default)]
    pub tour_id: Option<i64>,
    #[serde(default)]
    pub generated: Option<Time>,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub start_date: Option<Time>,
    #[serde(default)]
    pub end_date: Option<Time>,
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub inventory_summary: Option<Inventory>,
    #[serde(default)]
    pub single_traveller_units: Vec<AccommodationUnit>,
    #[serde(default)]
    pub group_traveller_units: Vec<AccommodationUnit>,
    #[serde(default)]
    pub tour_price: Option<DeparturePrice>,
    #[serde(default)]
    pub per_person_single_traveller_total_price: Option<DeparturePrice>,
    #[serde(default)]
    pub per_person_group_traveller_total_price: Option<DeparturePrice>,
    #[serde(default)]
    pub minimum_single_rooms: i32,
    #[serde(default)]
    pub minimum_twin_rooms: i32,
    #[serde(default)]
    pub minimum_triple_rooms: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_guaranteed: bool,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default)]
    pub ttl: i64,
}

/// Search over the pre-computed departure cache
#[derive(Debug, Clone, Copy)]
pub struct CacheApi<'a> {
    ctx: &'a RestContext,
}

impl<'a> CacheApi<'a> {
    pub(crate) fn new(ctx: &'a RestContext) -> Self {
        CacheApi { ctx }
    }

    pub async fn search(&self, params: &CacheSearchRequest) -> Result<Vec<CachedDeparture>> {
        let path = query::with_query(
            "/toursearch/departures",
            &query::encode_under("searchQuery", params)?,
        );
        self.ctx.get(&path).await
    }

    pub async fn status(&self) -> Result<CacheStats> {
        self.ctx.get("/toursearch/cache/status").await
    }

    pub async fn find(&self, id: &str) -> Result<CachedDeparture> {
        self.ctx.get(&format!("/toursearch/departures/{}", id)).await
    }
}
