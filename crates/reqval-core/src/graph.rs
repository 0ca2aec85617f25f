//! # Typed Resource Graph
//!
//! An in-memory representation of the infrastructure template being
//! assembled before deployment: a mapping from logical resource name to a
//! `{ Type, Properties, ... }` record, CloudFormation-shaped on the wire.
//!
//! Resource kinds the merge pass reads or writes get explicit property
//! structs ([`MethodProperties`], [`ValidatorProperties`],
//! [`ModelProperties`]) so shape errors surface at deserialization time
//! instead of mid-merge. Every other kind — and every method property the
//! merge does not touch — passes through as opaque JSON, so a template
//! round-trips without loss.
//!
//! The merge pass only ever inserts new entries or mutates the properties
//! of existing method entries; it never deletes or renames.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Resource type marking the REST-API root.
pub const REST_API_TYPE: &str = "AWS::ApiGateway::RestApi";
/// Resource type of a per-route method entry.
pub const METHOD_TYPE: &str = "AWS::ApiGateway::Method";
/// Resource type of a request validator.
pub const REQUEST_VALIDATOR_TYPE: &str = "AWS::ApiGateway::RequestValidator";
/// Resource type of a request model (JSON schema holder).
pub const MODEL_TYPE: &str = "AWS::ApiGateway::Model";

/// A by-logical-name reference to another resource in the graph.
///
/// Serializes as `{ "Ref": "<logical name>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalRef {
    /// Logical name of the referenced resource.
    #[serde(rename = "Ref")]
    pub target: String,
}

impl LogicalRef {
    /// Reference the resource with the given logical name.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

/// Properties of a request-validator resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorProperties {
    /// Reference to the REST-API root resource.
    #[serde(rename = "RestApiId")]
    pub rest_api_id: LogicalRef,
    /// Whether the gateway validates the request body.
    #[serde(rename = "ValidateRequestBody")]
    pub validate_request_body: bool,
    /// Whether the gateway validates request parameters.
    #[serde(rename = "ValidateRequestParameters")]
    pub validate_request_parameters: bool,
    /// Human-readable validator name (service, stage, path, method).
    #[serde(rename = "Name")]
    pub name: String,
}

/// Properties of a model resource holding one JSON-schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProperties {
    /// Reference to the REST-API root resource.
    #[serde(rename = "RestApiId")]
    pub rest_api_id: LogicalRef,
    /// Content type the schema applies to (e.g. `application/json`).
    #[serde(rename = "ContentType")]
    pub content_type: String,
    /// Human-readable description.
    #[serde(rename = "Description")]
    pub description: String,
    /// The schema document, stored opaquely.
    #[serde(rename = "Schema")]
    pub schema: serde_json::Value,
    /// Model name (same as the logical name).
    #[serde(rename = "Name")]
    pub name: String,
}

/// Properties of a per-route method resource.
///
/// Only the three properties the merge pass wires are typed; everything
/// else (integration, authorization, ...) is preserved untouched in
/// `rest`. The typed maps are omitted from serialization while empty, so
/// an unmodified method serializes exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodProperties {
    /// Reference to the validator enforcing this method's policy.
    #[serde(
        rename = "RequestValidatorId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_validator_id: Option<LogicalRef>,
    /// `method.request.<kind>.<name>` → required flag.
    #[serde(
        rename = "RequestParameters",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub request_parameters: BTreeMap<String, bool>,
    /// Content type → model reference for body validation.
    #[serde(
        rename = "RequestModels",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub request_models: BTreeMap<String, LogicalRef>,
    /// All other method properties, passed through untouched.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// Typed per-kind resource properties.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceProperties {
    /// The REST-API root. Properties are opaque; only presence matters.
    RestApi(serde_json::Value),
    /// A per-route method entry.
    Method(MethodProperties),
    /// A request validator created by the merge pass.
    RequestValidator(ValidatorProperties),
    /// A request model created by the merge pass.
    Model(ModelProperties),
    /// Any other resource kind, preserved opaquely.
    Other {
        /// The record's `Type` string.
        kind: String,
        /// The record's `Properties` value, untouched.
        properties: serde_json::Value,
    },
}

/// One resource record: typed properties plus any extra record-level keys
/// (`DependsOn`, `Condition`, ...) preserved verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// The record's properties, typed by resource kind.
    pub properties: ResourceProperties,
    /// Record-level keys other than `Type` and `Properties`.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Resource {
    /// A REST-API root with empty properties.
    pub fn rest_api() -> Self {
        Self::from_properties(ResourceProperties::RestApi(empty_object()))
    }

    /// A method resource.
    pub fn method(properties: MethodProperties) -> Self {
        Self::from_properties(ResourceProperties::Method(properties))
    }

    /// A request-validator resource.
    pub fn validator(properties: ValidatorProperties) -> Self {
        Self::from_properties(ResourceProperties::RequestValidator(properties))
    }

    /// A model resource.
    pub fn model(properties: ModelProperties) -> Self {
        Self::from_properties(ResourceProperties::Model(properties))
    }

    /// Any other resource kind, properties kept opaque.
    pub fn opaque(kind: impl Into<String>, properties: serde_json::Value) -> Self {
        Self::from_properties(ResourceProperties::Other {
            kind: kind.into(),
            properties,
        })
    }

    fn from_properties(properties: ResourceProperties) -> Self {
        Self {
            properties,
            extra: serde_json::Map::new(),
        }
    }

    /// The record's `Type` string.
    pub fn kind(&self) -> &str {
        match &self.properties {
            ResourceProperties::RestApi(_) => REST_API_TYPE,
            ResourceProperties::Method(_) => METHOD_TYPE,
            ResourceProperties::RequestValidator(_) => REQUEST_VALIDATOR_TYPE,
            ResourceProperties::Model(_) => MODEL_TYPE,
            ResourceProperties::Other { kind, .. } => kind,
        }
    }

    /// Method properties, when this is a method resource.
    pub fn as_method(&self) -> Option<&MethodProperties> {
        match &self.properties {
            ResourceProperties::Method(m) => Some(m),
            _ => None,
        }
    }

    /// Mutable method properties, when this is a method resource.
    pub fn as_method_mut(&mut self) -> Option<&mut MethodProperties> {
        match &mut self.properties {
            ResourceProperties::Method(m) => Some(m),
            _ => None,
        }
    }

    /// Validator properties, when this is a request-validator resource.
    pub fn as_validator(&self) -> Option<&ValidatorProperties> {
        match &self.properties {
            ResourceProperties::RequestValidator(v) => Some(v),
            _ => None,
        }
    }

    /// Model properties, when this is a model resource.
    pub fn as_model(&self) -> Option<&ModelProperties> {
        match &self.properties {
            ResourceProperties::Model(m) => Some(m),
            _ => None,
        }
    }
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("Type", self.kind())?;
        match &self.properties {
            ResourceProperties::RestApi(v) | ResourceProperties::Other { properties: v, .. } => {
                map.serialize_entry("Properties", v)?;
            }
            ResourceProperties::Method(m) => map.serialize_entry("Properties", m)?,
            ResourceProperties::RequestValidator(v) => map.serialize_entry("Properties", v)?,
            ResourceProperties::Model(m) => map.serialize_entry("Properties", m)?,
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawResource {
            #[serde(rename = "Type")]
            kind: String,
            #[serde(rename = "Properties", default = "empty_object")]
            properties: serde_json::Value,
            #[serde(flatten)]
            extra: serde_json::Map<String, serde_json::Value>,
        }

        let raw = RawResource::deserialize(deserializer)?;
        let properties = match raw.kind.as_str() {
            REST_API_TYPE => ResourceProperties::RestApi(raw.properties),
            METHOD_TYPE => ResourceProperties::Method(
                serde_json::from_value(raw.properties).map_err(D::Error::custom)?,
            ),
            REQUEST_VALIDATOR_TYPE => ResourceProperties::RequestValidator(
                serde_json::from_value(raw.properties).map_err(D::Error::custom)?,
            ),
            MODEL_TYPE => ResourceProperties::Model(
                serde_json::from_value(raw.properties).map_err(D::Error::custom)?,
            ),
            _ => ResourceProperties::Other {
                kind: raw.kind,
                properties: raw.properties,
            },
        };
        Ok(Resource {
            properties,
            extra: raw.extra,
        })
    }
}

/// The resource graph: logical name → resource record.
///
/// Backed by a `BTreeMap`, so iteration (and therefore every merge pass)
/// is deterministic for a given key set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceGraph {
    resources: BTreeMap<String, Resource>,
}

impl ResourceGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the resource at `logical_name`.
    pub fn insert(&mut self, logical_name: impl Into<String>, resource: Resource) {
        self.resources.insert(logical_name.into(), resource);
    }

    /// Look up a resource by logical name.
    pub fn get(&self, logical_name: &str) -> Option<&Resource> {
        self.resources.get(logical_name)
    }

    /// Mutable lookup by logical name.
    pub fn get_mut(&mut self, logical_name: &str) -> Option<&mut Resource> {
        self.resources.get_mut(logical_name)
    }

    /// Whether a resource with this logical name exists.
    pub fn contains(&self, logical_name: &str) -> bool {
        self.resources.contains_key(logical_name)
    }

    /// Number of resources in the graph.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the graph has no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterate resources in logical-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Resource)> {
        self.resources.iter()
    }

    /// Logical name of the REST-API root resource, if one exists.
    ///
    /// Templates are expected to carry exactly one; if several exist the
    /// first in name order is used.
    pub fn find_rest_api(&self) -> Option<&str> {
        self.resources
            .iter()
            .find(|(_, resource)| resource.kind() == REST_API_TYPE)
            .map(|(name, _)| name.as_str())
    }

    /// Count resources of a given `Type`.
    pub fn count_kind(&self, kind: &str) -> usize {
        self.resources
            .values()
            .filter(|resource| resource.kind() == kind)
            .count()
    }
}

/// A whole template document: the resource graph plus every other
/// top-level key (`Outputs`, `Parameters`, ...) preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// The `Resources` section.
    #[serde(rename = "Resources", default)]
    pub resources: ResourceGraph,
    /// All other top-level template keys.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
