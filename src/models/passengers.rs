use crate::error::Result;
use crate::models::customers::CustomerContact;
use crate::rest::RestContext;
use serde::{Deserialize, Serialize};

/// Advance passenger information (travel document details)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PassengerApis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_residence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
}

impl PassengerApis {
    /// Fields set here win; unset fields keep the value from `existing`.
    pub fn merged_over(&self, existing: PassengerApis) -> PassengerApis {
        PassengerApis {
            document_type: self.document_type.clone().or(existing.document_type),
            document_number: self.document_number.clone().or(existing.document_number),
            nationality: self.nationality.clone().or(existing.nationality),
            place_of_issue: self.place_of_issue.clone().or(existing.place_of_issue),
            country_of_residence: self
                .country_of_residence
                .clone()
                .or(existing.country_of_residence),
            issue_date: self.issue_date.clone().or(existing.issue_date),
            expiry_date: self.expiry_date.clone().or(existing.expiry_date),
            date_of_birth: self.date_of_birth.clone().or(existing.date_of_birth),
            place_of_birth: self.place_of_birth.clone().or(existing.place_of_birth),
        }
    }
}

/// Actions on one passenger of a booking
#[derive(Debug, Clone, Copy)]
pub struct PassengerApi<'a> {
    ctx: &'a RestContext,
    booking_id: i64,
    passenger_id: i64,
}

impl<'a> PassengerApi<'a> {
    pub(crate) fn new(ctx: &'a RestContext, booking_id: i64, passenger_id: i64) -> Self {
        PassengerApi {
            ctx,
            booking_id,
            passenger_id,
        }
    }

    /// Path to the passenger resource
    pub fn path(&self) -> String {
        format!("/reservations/{}/passengers/{}", self.booking_id, self.passenger_id)
    }

    pub async fn apis(&self) -> Result<PassengerApis> {
        self.ctx.get(&format!("{}/Apis", self.path())).await
    }

    pub async fn contacts(&self) -> Result<Vec<CustomerContact>> {
        self.ctx.get(&format!("{}/Contacts", self.path())).await
    }

    /// Update the passenger's APIS details. Fields left as `None` in
    /// `updates` keep their current value; this reads the existing record
    /// first and then writes the merged one.
    pub async fn update_apis(&self, updates: &PassengerApis) -> Result<()> {
        let existing = self.apis().await?;
        let payload = updates.merged_over(existing);
        self.ctx
            .do_request(reqwest::Method::PUT, &format!("{}/apis", self.path()), Some(&payload))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_updates() {
        let existing = PassengerApis {
            document_type: Some("Passport".to_string()),
            document_number: Some("111".to_string()),
            nationality: Some("GB".to_string()),
            ..Default::default()
        };
        let updates = PassengerApis {
            document_number: Some("222".to_string()),
            ..Default::default()
        };

        let merged = updates.merged_over(existing);
        assert_eq!(merged.document_type.as_deref(), Some("Passport"));
        assert_eq!(merged.document_number.as_deref(), Some("222"));
        assert_eq!(merged.nationality.as_deref(), Some("GB"));
        assert_eq!(merged.place_of_birth, None);
    }
}
