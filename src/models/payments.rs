use crate::error::Result;
use crate::models::common::{impl_has_self_link, Link};
use crate::rest::RestContext;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Failed,
    Authorised,
    Pending,
    Complete,
    UserCancelled,
    Initialised,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentProvider {
    NotSet,
    GlobalPayments,
    Opayo,
    Test,
    Syntec,
    DataCash,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Manual,
    PaymentProvider,
    #[serde(other)]
    Unknown,
}

/// Free-form key/value pair passed through to the payment provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDatum {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentAmount {
    pub currency_code: String,
    pub value: f64,
}

/// Parameters to create a new payment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePaymentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<PaymentAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorisation_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last4_digits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<PaymentProvider>,
    pub provider_data: Vec<ProviderDatum>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentType {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentUser {
    #[serde(default)]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    pub id: i64,
    #[serde(default)]
    pub created_date_time: Option<Time>,
    #[serde(default)]
    pub created_by: Option<PaymentUser>,
    #[serde(rename = "Type", default)]
    pub payment_type: Option<PaymentType>,
    pub payment_amount: PaymentAmount,
    #[serde(default)]
    pub authorisation_code: Option<String>,
    #[serde(default)]
    pub transaction_reference: Option<String>,
    #[serde(default)]
    pub last4_digits: Option<String>,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub provider_data: Vec<ProviderDatum>,
    #[serde(default)]
    pub provider: Option<PaymentProvider>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub completed_date: Option<Time>,
    #[serde(default)]
    pub is_scheduled: bool,
    #[serde(default)]
    pub scheduled_date: Option<Time>,
    #[serde(default)]
    pub is_scheduled_principal: bool,
    #[serde(default)]
    pub is_scheduled_principal_candidate: bool,
    #[serde(default)]
    pub is_scheduled_final: bool,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl_has_self_link!(Payment);

/// Payments against a reservation
#[derive(Debug, Clone, Copy)]
pub struct PaymentsApi<'a> {
    ctx: &'a RestContext,
}

impl<'a> PaymentsApi<'a> {
    pub(crate) fn new(ctx: &'a RestContext) -> Self {
        PaymentsApi { ctx }
    }

    /// Request a new payment against a reservation
    pub async fn create(&self, reservation_id: impl Display, payment: &CreatePaymentRequest) -> Result<Payment> {
        self.ctx
            .post(&format!("/3/sales/reservations/{}/payments", reservation_id), payment)
            .await
    }

    pub async fn find(&self, reservation_id: impl Display, id: impl Display) -> Result<Payment> {
        self.ctx
            .get(&format!("/3/sales/reservations/{}/payments/{}", reservation_id, id))
            .await
    }

    /// Payments made against a reservation
    pub async fn list(&self, reservation_id: impl Display) -> Result<Vec<Payment>> {
        self.ctx
            .get(&format!("/3/sales/reservations/{}/payments", reservation_id))
            .await
    }

    #[deprecated(note = "completion requests are superseded by creating payments with a final status")]
    pub async fn finalize(&self, reservation_id: impl Display, payment_id: impl Display) -> Result<Payment> {
        let path = format!(
            "/sales/reservations/{}/payments/{}/completionRequest",
            reservation_id, payment_id
        );
        self.ctx.post_empty(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_payment_request_serialization() {
        let request = CreatePaymentRequest {
            amount: Some(PaymentAmount {
                currency_code: "GBP".to_string(),
                value: 250.0,
            }),
            last4_digits: Some("4242".to_string()),
            status: Some(PaymentStatus::Authorised),
            provider: Some(PaymentProvider::Opayo),
            provider_data: vec![ProviderDatum {
                key: "VPSTxId".to_string(),
                value: "{ABC}".to_string(),
            }],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "Amount": {"CurrencyCode": "GBP", "Value": 250.0},
                "Last4Digits": "4242",
                "Status": "Authorised",
                "Provider": "Opayo",
                "ProviderData": [{"key": "VPSTxId", "value": "{ABC}"}]
            })
        );
    }
    #[test]
    fn test_payment_with_unlisted_enum_values() {
        let payment: Payment = serde_json::from_value(json!({
            "Id": 9,
            "PaymentAmount": {"CurrencyCode": "GBP", "Value": 100.0},
            "Status": "Refunded",
            "Provider": "Stripe",
            "Type": {"Id": 2, "Name": "Voucher", "PaymentMethod": "GiftCard"}
        }))
        .unwrap();

        assert_eq!(payment.status, Some(PaymentStatus::Unknown));
        assert_eq!(payment.provider, Some(PaymentProvider::Unknown));
        assert_eq!(
            payment.payment_type.unwrap().payment_method,
            Some(PaymentMethod::Unknown)
        );
    }
}
