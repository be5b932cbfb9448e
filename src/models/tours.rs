use crate::error::Result;
use crate::models::common::{impl_has_self_link, DateRange, Link, Price, Warning};
use crate::rest::RestContext;
use crate::time::Time;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TourSearchRequest {
    /// Reservation to make the search against
    pub reservation_id: i64,
    /// SKU/reference of the tour to search for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour_reference: Option<String>,
    /// Range of dates to search for departures in
    pub date_range: DateRange,
    /// Promotional codes to apply to pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotional_codes: Option<Vec<String>>,
    pub sales_channel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TourSearchResponse {
    /// ID of the result set; departures are only valid in context of it
    pub id: String,
    pub reservation_id: i64,
    #[serde(default)]
    pub tour_departures_count: i64,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Departure {
    pub id: String,
    #[serde(default)]
    pub setup_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub duration: Option<DepartureDuration>,
    #[serde(default)]
    pub pricing: Option<DeparturePricing>,
    #[serde(default)]
    pub warnings: Vec<Warning>,
    #[serde(default)]
    pub tour: Option<Tour>,
    #[serde(default)]
    pub start_location_id: Option<i64>,
    #[serde(default)]
    pub end_location_id: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub allocation_on_request: bool,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tour {
    pub setup_id: i64,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeparturePricing {
    #[serde(default)]
    pub total_price: Option<Price>,
    #[serde(default)]
    pub was_price: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepartureDuration {
    pub days: i32,
    #[serde(rename = "NightS", alias = "Nights")]
    pub nights: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub from: Option<Time>,
    #[serde(default)]
    pub to: Option<Time>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateOption {
    Default,
    Optional,
}

/// Flight options for a departure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlightGroup {
    pub id: String,
    #[serde(rename = "MasterGRoupId", alias = "MasterGroupId", default)]
    pub master_group_id: Option<i64>,
    pub rate_option: RateOption,
    #[serde(default)]
    pub more_seats_enabled: bool,
    #[serde(default)]
    pub flights: Vec<FlightLeg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportMode {
    Flight,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlightLeg {
    pub id: String,
    pub flight_number: String,
    #[serde(default)]
    pub setup_id: Option<i64>,
    pub departure_datetime: Time,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub arrival_date_time: Time,
    pub transport_mode: TransportMode,
    #[serde(default)]
    pub seat: Option<String>,
    #[serde(default)]
    pub inventory_details: Option<Inventory>,
    #[serde(default)]
    pub pricing: Option<FlightPricing>,
    #[serde(default)]
    pub operating_carrier: Option<FlightCarrier>,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlightCarrier {
    pub name: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Inventory {
    pub available: i64,
    #[serde(default)]
    pub is_on_request: bool,
    #[serde(default)]
    pub is_free_sell: bool,
    #[serde(default)]
    pub is_closed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlightPricing {
    #[serde(default)]
    pub total_price: Option<Price>,
    #[serde(default)]
    pub was_price: Option<Price>,
    #[serde(default)]
    pub override_rules: Option<OverrideRules>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverrideRuleType {
    PerPerson,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OverrideRules {
    #[serde(rename = "Type")]
    pub rule_type: OverrideRuleType,
    #[serde(default)]
    pub adult_price: Option<Price>,
    #[serde(default)]
    pub child_price: Option<Price>,
    #[serde(default)]
    pub infant_price: Option<Price>,
    #[serde(default)]
    pub unit_price: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccommodationUnit {
    pub id: String,
    #[serde(default)]
    pub setup_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub unit_description: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub unit_number: Option<String>,
    #[serde(default)]
    pub unit_type: Option<String>,
    #[serde(default)]
    pub bed_type: Option<String>,
    #[serde(default)]
    pub occupancy: Option<Occupancy>,
    #[serde(default)]
    pub adult_occupancy: Option<Occupancy>,
    #[serde(default)]
    pub child_occupancy: Option<Occupancy>,
    #[serde(default)]
    pub infant_occupancy: Option<Occupancy>,
    #[serde(default)]
    pub standard_occupancy: Option<i32>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub accommodation_unit_reference: Option<String>,
    #[serde(default)]
    pub duration: Option<DateRange>,
    #[serde(default)]
    pub pricing: Option<FlightPricing>,
    #[serde(default)]
    pub inventory_details: Option<Inventory>,
    #[serde(default)]
    pub accommodation: Option<Accommodation>,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub board_basis_breakdown: Vec<BoardBasis>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoardBasis {
    pub name: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<Time>,
    #[serde(default)]
    pub end_date: Option<Time>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Accommodation {
    pub setup_id: i64,
    #[serde(default)]
    pub reference: Option<String>,
    pub name: String,
    #[serde(rename = "Type", default)]
    pub accommodation_type: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Occupancy {
    pub from: i32,
    pub to: i32,
}

impl_has_self_link!(
    TourSearchResponse,
    Departure,
    Tour,
    FlightLeg,
    AccommodationUnit,
    Accommodation,
);

/// Live tour search against a reservation
#[derive(Debug, Clone, Copy)]
pub struct ToursApi<'a> {
    ctx: &'a RestContext,
}

impl<'a> ToursApi<'a> {
    pub(crate) fn new(ctx: &'a RestContext) -> Self {
        ToursApi { ctx }
    }

    /// Start a search for available departures; results are read with
    /// [`departures`](Self::departures)
    pub async fn search(&self, params: &TourSearchRequest) -> Result<TourSearchResponse> {
        self.ctx.post("/toursSearch/searches", params).await
    }

    pub async fn departures(&self, search_id: &str) -> Result<Vec<Departure>> {
        self.ctx
            .get(&format!("/toursSearch/searches/{}/tourDepartures", search_id))
            .await
    }

    pub async fn flights(&self, search_id: &str, result_id: &str) -> Result<Vec<FlightGroup>> {
        let path = format!(
            "/toursSearch/searches/{}/tourDepartures/{}/flightgroups",
            search_id, result_id
        );
        self.ctx.get(&path).await
    }

    pub async fn accommodation(&self, search_id: &str, result_id: &str) -> Result<Vec<AccommodationUnit>> {
        let path = format!(
            "/toursSearch/searches/{}/tourDepartures/{}/accommodationUnits",
            search_id, result_id
        );
        self.ctx.get(&path).await
    }
}
