use crate::error::Result;
use crate::models::common::{impl_has_self_link, Link};
use crate::rest::RestContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentBundle {
    #[serde(default)]
    pub attributes: Vec<ContentAttribute>,
    #[serde(default)]
    pub files: Vec<ContentFile>,
}

impl ContentBundle {
    /// Value of the first attribute with the given key
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentAttribute {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentFile {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link_detail: Option<LinkDetail>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LinkDetail {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl_has_self_link!(ContentFile);

/// CMS content for one bundle reference
#[derive(Debug, Clone)]
pub struct ContentApi<'a> {
    ctx: &'a RestContext,
    bundle_reference: String,
}

impl<'a> ContentApi<'a> {
    pub(crate) fn new(ctx: &'a RestContext, bundle_reference: String) -> Self {
        ContentApi {
            ctx,
            bundle_reference,
        }
    }

    pub async fn bundle(&self) -> Result<ContentBundle> {
        self.ctx
            .get(&format!("/cms/contentBundles/{}", self.bundle_reference))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bundle_attribute_lookup() {
        let bundle: ContentBundle = serde_json::from_value(json!({
            "Attributes": [{"Key": "Grade", "Value": "2"}, {"Key": "Grade", "Value": "3"}],
            "Files": [{"ID": 5, "Tags": ["hero"], "LinkDetail": {"SortOrder": 1}}]
        }))
        .unwrap();

        assert_eq!(bundle.attribute("Grade"), Some("2"));
        assert_eq!(bundle.attribute("Missing"), None);
        assert_eq!(bundle.files[0].link_detail.as_ref().unwrap().sort_order, 1);
    }
}
