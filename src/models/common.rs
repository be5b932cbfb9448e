use crate::time::Time;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Relation naming a resource's own canonical location
pub const SELF_REL: &str = "self";

/// A reference to additional data available
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(default)]
    pub method: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Link {
            rel: rel.into(),
            href: href.into(),
            method: "GET".to_string(),
        }
    }
}

/// Anything carrying a `Links` collection.
///
/// Sub-resources such as notes are addressed relative to the `self` link
/// rather than built from an id, so any linked resource can be passed to
/// [`NotesApi`](crate::models::notes::NotesApi).
pub trait HasSelfLink {
    fn links(&self) -> &[Link];

    fn link(&self, rel: &str) -> Option<&Link> {
        self.links().iter().find(|link| link.rel == rel)
    }

    fn self_link(&self) -> Option<&Link> {
        self.link(SELF_REL)
    }
}

impl HasSelfLink for Vec<Link> {
    fn links(&self) -> &[Link] {
        self
    }
}

impl HasSelfLink for [Link] {
    fn links(&self) -> &[Link] {
        self
    }
}

macro_rules! impl_has_self_link {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::models::common::HasSelfLink for $ty {
                fn links(&self) -> &[$crate::models::common::Link] {
                    &self.links
                }
            }
        )*
    };
}
pub(crate) use impl_has_self_link;

/// A timespan between two dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateRange {
    pub from: Time,
    pub to: Time,
}

/// Warning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Warning {
    pub title: String,
    pub message: String,
}

/// Passengers assigned to one service component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PassengerAssignment {
    pub component_id: String,
    pub passenger_ids: Vec<i64>,
}

/// Price information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Price {
    /// ISO currency code for price
    pub currency_code: String,
    /// Details of the currency itself
    #[serde(default)]
    pub currency_details: Option<CurrencyDetails>,
    pub value: f64,
    /// Currency & value pre-formatted for HTML
    #[serde(default)]
    pub html_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrencyDetails {
    pub code: String,
    pub name: String,
    pub default_rate: f64,
    pub full_name: String,
}

/// Supported partial update operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Replace,
}

/// One entry of a json-patch style update.
///
/// `value` is whatever JSON the target field holds: a number, a flag, a
/// string or a whole object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOperation {
    pub op: PatchOp,
    pub path: String,
    pub value: Value,
}

impl UpdateOperation {
    /// Replace the field at `path` with `value`
    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        UpdateOperation {
            op: PatchOp::Replace,
            path: path.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_self_link_lookup() {
        let links = vec![
            Link::new("passengers", "/sales/reservations/42/passengers"),
            Link::new("self", "/sales/reservations/42"),
        ];
        assert_eq!(links.self_link().unwrap().href, "/sales/reservations/42");
        assert!(links.link("tasks").is_none());
        assert!(Vec::<Link>::new().self_link().is_none());
    }

    #[test]
    fn test_link_deserialization() {
        let link: Link =
            serde_json::from_value(json!({"Rel": "self", "Href": "/sales/customers/7", "Method": "GET"}))
                .unwrap();
        assert_eq!(link, Link::new("self", "/sales/customers/7"));
    }

    #[test]
    fn test_update_operation_serialization() {
        let ops = vec![
            UpdateOperation::replace("/customerId", 4830),
            UpdateOperation::replace("/ConditionsAccepted", true),
            UpdateOperation::replace("/Notes", json!({"Text": "late arrival"})),
        ];
        assert_eq!(
            serde_json::to_value(&ops).unwrap(),
            json!([
                {"op": "replace", "path": "/customerId", "value": 4830},
                {"op": "replace", "path": "/ConditionsAccepted", "value": true},
                {"op": "replace", "path": "/Notes", "value": {"Text": "late arrival"}}
            ])
        );
    }
}
