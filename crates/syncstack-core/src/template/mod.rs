//! Synthesized deployment template.
//!
//! Resources and outputs live in `BTreeMap`s so the JSON output is
//! byte-identical for identical stacks.

pub mod assertions;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FORMAT_VERSION: &str = "2010-09-09";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,

    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, Resource>,

    #[serde(rename = "Outputs", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Output>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "Type")]
    pub resource_type: String,

    #[serde(rename = "Properties")]
    pub properties: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "Value")]
    pub value: Value,

    #[serde(rename = "Export", default, skip_serializing_if = "Option::is_none")]
    pub export: Option<Export>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Export {
    #[serde(rename = "Name")]
    pub name: String,
}

impl Template {
    pub fn new(description: Option<String>) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            description,
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    /// All resources of the given `Type`, in logical id order.
    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Resource)> + 'a {
        self.resources
            .iter()
            .filter(move |(_, r)| r.resource_type == resource_type)
            .map(|(id, r)| (id.as_str(), r))
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// `{"Ref": id}`
pub fn reference(logical_id: &str) -> Value {
    serde_json::json!({ "Ref": logical_id })
}

/// `{"Fn::GetAtt": [id, attribute]}`
pub fn get_att(logical_id: &str, attribute: &str) -> Value {
    serde_json::json!({ "Fn::GetAtt": [logical_id, attribute] })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_outputs_and_description_are_omitted() {
        let mut template = Template::new(None);
        template.resources.insert(
            "Thing".into(),
            Resource {
                resource_type: "AWS::DataSync::Task".into(),
                properties: json!({}),
            },
        );

        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(
            value,
            json!({
                "AWSTemplateFormatVersion": "2010-09-09",
                "Resources": { "Thing": { "Type": "AWS::DataSync::Task", "Properties": {} } }
            })
        );
    }

    #[test]
    fn json_roundtrip_preserves_template() {
        let mut template = Template::new(Some("demo".into()));
        template.outputs.insert(
            "ThingArn".into(),
            Output {
                description: None,
                value: get_att("Thing", "TaskArn"),
                export: Some(Export { name: "demo-ThingArn".into() }),
            },
        );

        let json = template.to_json_pretty().unwrap();
        assert_eq!(Template::from_json_str(&json).unwrap(), template);
    }

    #[test]
    fn intrinsic_helpers() {
        assert_eq!(reference("Src"), json!({ "Ref": "Src" }));
        assert_eq!(get_att("Src", "LocationArn"), json!({ "Fn::GetAtt": ["Src", "LocationArn"] }));
    }
}
