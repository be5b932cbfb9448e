use crate::error::Result;
use crate::models::common::{impl_has_self_link, Link, PassengerAssignment, Price, UpdateOperation};
use crate::models::tasks::Task;
use crate::query;
use crate::rest::RestContext;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Filters for finding existing reservations. Unset filters are left out of
/// the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindReservationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_passenger_surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_date_minimum: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_date_maximum: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FindReservationResponse {
    pub id: i64,
    #[serde(default)]
    pub passenger_count: i32,
    #[serde(default)]
    pub component_count: i32,
    #[serde(default)]
    pub quoted_by_user_id: Option<i64>,
    #[serde(default)]
    pub owner_user_id: Option<i64>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Parameters to create a new [`Reservation`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateReservationRequest {
    /// ID of the brand or sales channel
    pub brand_channel_id: i64,
    /// ISO code for the currency
    pub currency_code: String,
}

/// Booking / reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Reservation {
    pub id: i64,
    #[serde(default)]
    pub booking_reference: Option<String>,
    #[serde(default)]
    pub partial_token: Option<String>,
    pub currency_code: String,
    /// Customer who owns the booking, if any
    #[serde(default)]
    pub customer_id: Option<i64>,
    /// Agent who owns the booking, if any
    #[serde(default)]
    pub agent_id: Option<i64>,
    /// Commencement of the first service
    #[serde(default)]
    pub start_date: Option<Time>,
    /// Conclusion of the last service
    #[serde(default)]
    pub end_date: Option<Time>,
    #[serde(default)]
    pub confirmed_date: Option<Time>,
    #[serde(default)]
    pub adult_count: i32,
    #[serde(default)]
    pub child_count: i32,
    #[serde(default)]
    pub infant_count: i32,
    #[serde(default)]
    pub brand_channel_id: Option<i64>,
    /// Date on which the balance is due
    #[serde(default)]
    pub balance_due: Option<Time>,
    #[serde(default)]
    pub location_id: Option<i64>,
    #[serde(default)]
    pub sales_channel_id: Option<i64>,
    #[serde(default)]
    pub conditions_accepted: bool,
    #[serde(default)]
    pub total_price: Option<Price>,
    #[serde(default)]
    pub deposit: Option<Price>,
    /// Total price less payments made
    #[serde(default)]
    pub outstanding_balance: Option<Price>,
    #[serde(default)]
    pub commission: Option<Price>,
    #[serde(default)]
    pub vat: Option<Price>,
    #[serde(default)]
    pub agent_balance: Option<Price>,
    #[serde(default)]
    pub customer_balance: Option<Price>,
    #[serde(default)]
    pub quoted_by_user_id: Option<i64>,
    #[serde(default)]
    pub owner_user_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub principal_component_id: Option<i64>,
    #[serde(default)]
    pub principal_component_name: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassengerType {
    Adult,
    Child,
    Infant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddPassengerRequest {
    #[serde(rename = "Type")]
    pub passenger_type: PassengerType,
    pub title: String,
    pub forename: String,
    pub surname: String,
    pub is_lead: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Time>,
}

/// Passenger as returned when added to a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Passenger {
    pub id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Assignment of passengers to services, keyed by service type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceAssignmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_groups: Option<Vec<PassengerAssignment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodations: Option<Vec<PassengerAssignment>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct AddComponentRequest<'a> {
    cache_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_component_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replace_component_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfirmReservationRequest {
    reservation_id: String,
}

impl_has_self_link!(Reservation, FindReservationResponse);

/// Reservation API actions
#[derive(Debug, Clone, Copy)]
pub struct ReservationsApi<'a> {
    ctx: &'a RestContext,
}

impl<'a> ReservationsApi<'a> {
    pub(crate) fn new(ctx: &'a RestContext) -> Self {
        ReservationsApi { ctx }
    }

    pub async fn create(&self, params: &CreateReservationRequest) -> Result<Reservation> {
        self.ctx.post("/sales/reservations/", params).await
    }

    pub async fn search(&self, params: &FindReservationRequest) -> Result<Vec<FindReservationResponse>> {
        let path = query::with_query("/sales/reservations", &query::encode(params)?);
        self.ctx.get(&path).await
    }

    /// Get an existing reservation by ID
    pub async fn find(&self, id: impl Display) -> Result<Reservation> {
        self.ctx.get(&format!("/sales/reservations/{}", id)).await
    }

    /// Add a new passenger to an existing booking
    pub async fn add_passenger(&self, booking_id: impl Display, passenger: &AddPassengerRequest) -> Result<Passenger> {
        self.ctx
            .post(&format!("/sales/reservations/{}/passengers", booking_id), passenger)
            .await
    }

    /// Assign passengers to the services of a search result
    pub async fn assign(
        &self,
        search_id: &str,
        result_id: &str,
        assignment: &ServiceAssignmentRequest,
    ) -> Result<Map<String, Value>> {
        let path = format!(
            "/toursSearch/searches/{}/tourDepartures/{}/combinations",
            search_id, result_id
        );
        self.ctx.post(&path, assignment).await
    }

    /// Add a cached service component to a reservation, optionally as a
    /// child of `parent_component_id` or in place of `replace_component_id`.
    pub async fn add_component(
        &self,
        reservation_id: impl Display,
        component_id: &str,
        parent_component_id: Option<i64>,
        replace_component_id: Option<i64>,
    ) -> Result<()> {
        let request = AddComponentRequest {
            cache_id: component_id,
            parent_component_id,
            replace_component_id,
        };
        let path = format!("/sales/reservations/{}/components", reservation_id);
        self.ctx
            .do_request(reqwest::Method::POST, &path, Some(&request))
            .await?;
        Ok(())
    }

    /// Perform arbitrary alterations to a booking. Prefer the dedicated
    /// methods where one exists.
    pub async fn update(&self, id: impl Display, updates: &[UpdateOperation]) -> Result<()> {
        self.ctx
            .patch(&format!("/sales/reservations/{}", id), updates)
            .await
    }

    pub async fn update_passenger(
        &self,
        id: impl Display,
        passenger_id: impl Display,
        updates: &[UpdateOperation],
    ) -> Result<()> {
        let path = format!("/sales/reservations/{}/passengers/{}", id, passenger_id);
        self.ctx.patch(&path, updates).await
    }

    /// Tasks attached to a reservation
    pub async fn tasks(&self, id: impl Display) -> Result<Vec<Task>> {
        self.ctx
            .get(&format!("/sales/reservations/{}/tasks", id))
            .await
    }

    pub async fn confirm(&self, id: impl Display) -> Result<()> {
        let request = ConfirmReservationRequest {
            reservation_id: id.to_string(),
        };
        self.ctx
            .do_request(reqwest::Method::POST, "/sales/reservations/confirmations", Some(&request))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::HasSelfLink;
    use serde_json::json;

    #[test]
    fn test_reservation_deserialization() {
        let reservation: Reservation = serde_json::from_value(json!({
            "Id": 4092,
            "BookingReference": "HF4092",
            "CurrencyCode": "GBP",
            "CustomerId": null,
            "StartDate": "2024-06-01T00:00:00",
            "AdultCount": 2,
            "ConditionsAccepted": true,
            "TotalPrice": {"CurrencyCode": "GBP", "Value": 1299.5, "HtmlFormat": "&pound;1,299.50"},
            "Links": [{"Rel": "self", "Href": "/sales/reservations/4092", "Method": "GET"}]
        }))
        .unwrap();

        assert_eq!(reservation.id, 4092);
        assert_eq!(reservation.customer_id, None);
        assert_eq!(reservation.adult_count, 2);
        assert_eq!(reservation.total_price.unwrap().value, 1299.5);
        assert_eq!(reservation.links.self_link().unwrap().href, "/sales/reservations/4092");
    }

    #[test]
    fn test_find_request_encodes_only_set_fields() {
        let request = FindReservationRequest {
            lead_passenger_surname: Some("Smith".to_string()),
            departure_date_minimum: Time::from_ymd(2024, 6, 1),
            ..Default::default()
        };
        let encoded = query::encode(&request).unwrap();
        assert!(encoded.contains("departureDateMinimum=2024-06-01T00%3A00%3A00.000Z"));
        assert_eq!(
            query::parse(&encoded),
            json!({"leadPassengerSurname": "Smith", "departureDateMinimum": "2024-06-01T00:00:00.000Z"})
        );
    }

    #[test]
    fn test_add_component_body_omits_unset_ids() {
        let body = serde_json::to_value(AddComponentRequest {
            cache_id: "abc",
            parent_component_id: Some(7),
            replace_component_id: None,
        })
        .unwrap();
        assert_eq!(body, json!({"CacheId": "abc", "ParentComponentId": 7}));
    }

    #[test]
    fn test_add_passenger_request_field_names() {
        let body = serde_json::to_value(AddPassengerRequest {
            passenger_type: PassengerType::Adult,
            title: "Mr".to_string(),
            forename: "John".to_string(),
            surname: "Smith".to_string(),
            is_lead: true,
            date_of_birth: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"Type": "Adult", "Title": "Mr", "Forename": "John", "Surname": "Smith", "IsLead": true})
        );
    }
}
