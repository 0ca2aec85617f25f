//! # Declarative Route Configuration
//!
//! Mirrors the shape of a service configuration's `functions:` section as
//! far as request validation is concerned. A function carries zero or more
//! event triggers; only `http` triggers participate. An `http` trigger may
//! carry a `request:` block with a validator policy, per-content-type JSON
//! schemas, and parameter requiredness maps.
//!
//! ```yaml
//! functions:
//!   createUser:
//!     events:
//!       - http:
//!           path: /users
//!           method: post
//!           request:
//!             validator:
//!               type: ALL
//!             schemas:
//!               application/json: { ... }
//!             parameters:
//!               paths: { id: true }
//! ```
//!
//! Unknown trigger kinds (`sqs`, `schedule`, ...) deserialize with
//! `http = None` and are ignored by the collector. Schema documents are
//! stored opaquely and never interpreted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which parts of a request the gateway validator checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatorType {
    /// Validate both the request body and request parameters.
    #[default]
    #[serde(rename = "ALL")]
    All,
    /// Validate the request body only.
    #[serde(rename = "BODY_ONLY")]
    BodyOnly,
    /// Validate request parameters only.
    #[serde(rename = "PARAMS_ONLY")]
    ParamsOnly,
}

impl ValidatorType {
    /// Whether this policy enables gateway body validation.
    pub fn validates_body(self) -> bool {
        matches!(self, Self::All | Self::BodyOnly)
    }

    /// Whether this policy enables gateway parameter validation.
    pub fn validates_params(self) -> bool {
        matches!(self, Self::All | Self::ParamsOnly)
    }
}

/// Parameter requiredness maps, one per parameter kind.
///
/// Each map goes from parameter name to a required flag. The three kinds
/// are independent; all default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRequirements {
    /// Path parameters (e.g. the `id` in `/users/{id}`).
    #[serde(default)]
    pub paths: BTreeMap<String, bool>,
    /// Query-string parameters.
    #[serde(default)]
    pub querystrings: BTreeMap<String, bool>,
    /// Header parameters.
    #[serde(default)]
    pub headers: BTreeMap<String, bool>,
}

impl ParameterRequirements {
    /// True when no parameter of any kind is configured.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.querystrings.is_empty() && self.headers.is_empty()
    }
}

/// The `validator:` block of an `http` trigger's request configuration.
///
/// An empty block (`validator: {}`) is meaningful: it opts the route into
/// validation with the default `ALL` policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Policy type; defaults to `ALL` when omitted.
    #[serde(rename = "type", default)]
    pub kind: ValidatorType,
}

/// The `request:` block of an `http` trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Opt-in validator policy. Absent means the route is not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<ValidatorConfig>,
    /// Content type → JSON-schema document, stored opaquely.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, serde_json::Value>,
    /// Parameter requiredness configuration.
    #[serde(default, skip_serializing_if = "ParameterRequirements::is_empty")]
    pub parameters: ParameterRequirements,
}

/// An `http` trigger definition: a route plus optional request config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpEvent {
    /// Route path (e.g. `/users/{id}`). Empty means malformed; skipped.
    #[serde(default)]
    pub path: String,
    /// HTTP verb in any case (`get`, `POST`, ...). Empty means malformed.
    #[serde(default)]
    pub method: String,
    /// Request-validation configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestConfig>,
}

/// A single event trigger on a function. Non-HTTP trigger kinds are
/// represented by `http = None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionEvent {
    /// The HTTP trigger, when this event is HTTP-style and mapping-shaped.
    #[serde(
        default,
        deserialize_with = "lenient_http",
        skip_serializing_if = "Option::is_none"
    )]
    pub http: Option<HttpEvent>,
}

/// Accept only mapping-shaped `http` triggers.
///
/// Host tools also allow a string shorthand (`http: GET users`); such a
/// trigger carries no request configuration, so it deserializes as `None`
/// and the route is skipped instead of failing the whole parse.
fn lenient_http<'de, D>(deserializer: D) -> Result<Option<HttpEvent>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_object() {
        serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom)
    } else {
        Ok(None)
    }
}

/// A named function's trigger list. Other function attributes (handler,
/// runtime, memory) are irrelevant to validation and are not modeled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Event triggers, in declaration order.
    #[serde(default)]
    pub events: Vec<FunctionEvent>,
}

/// Normalized validation spec for one route, as produced by the collector.
///
/// A route yields a spec only if its trigger declares both a path and a
/// method and carries a `validator:` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteValidationSpec {
    /// Validation policy; defaulted to `ALL` when the block omitted a type.
    pub policy: ValidatorType,
    /// HTTP verb, normalized to upper case.
    pub method: String,
    /// Content type → opaque JSON-schema document.
    #[serde(default)]
    pub schemas: BTreeMap<String, serde_json::Value>,
    /// Parameter requiredness maps.
    #[serde(default)]
    pub parameters: ParameterRequirements,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validator_type_policy_flags() {
        assert!(ValidatorType::All.validates_body());
        assert!(ValidatorType::All.validates_params());
        assert!(ValidatorType::BodyOnly.validates_body());
        assert!(!ValidatorType::BodyOnly.validates_params());
        assert!(!ValidatorType::ParamsOnly.validates_body());
        assert!(ValidatorType::ParamsOnly.validates_params());
    }

    #[test]
    fn validator_type_serde_names() {
        let all: ValidatorType = serde_json::from_str("\"ALL\"").unwrap();
        assert_eq!(all, ValidatorType::All);
        let body: ValidatorType = serde_json::from_str("\"BODY_ONLY\"").unwrap();
        assert_eq!(body, ValidatorType::BodyOnly);
        let params: ValidatorType = serde_json::from_str("\"PARAMS_ONLY\"").unwrap();
        assert_eq!(params, ValidatorType::ParamsOnly);
        assert!(serde_json::from_str::<ValidatorType>("\"SOME\"").is_err());
    }

    #[test]
    fn empty_validator_block_defaults_to_all() {
        let config: ValidatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.kind, ValidatorType::All);
    }

    #[test]
    fn http_event_parses_full_request_block() {
        let event: HttpEvent = serde_json::from_value(serde_json::json!({
            "path": "/users",
            "method": "post",
            "request": {
                "validator": { "type": "BODY_ONLY" },
                "schemas": {
                    "application/json": { "type": "object" }
                },
                "parameters": {
                    "querystrings": { "page": false }
                }
            }
        }))
        .unwrap();

        assert_eq!(event.path, "/users");
        assert_eq!(event.method, "post");
        let request = event.request.unwrap();
        assert_eq!(request.validator.unwrap().kind, ValidatorType::BodyOnly);
        assert!(request.schemas.contains_key("application/json"));
        assert_eq!(request.parameters.querystrings.get("page"), Some(&false));
        assert!(request.parameters.paths.is_empty());
    }

    #[test]
    fn string_shorthand_http_trigger_is_skipped_not_failed() {
        let function: FunctionDef = serde_json::from_value(serde_json::json!({
            "events": [
                { "http": "GET users" },
                { "http": { "path": "/users", "method": "get" } }
            ]
        }))
        .unwrap();

        assert!(function.events[0].http.is_none());
        assert_eq!(function.events[1].http.as_ref().unwrap().path, "/users");
    }

    #[test]
    fn non_http_trigger_deserializes_without_http() {
        let event: FunctionEvent = serde_json::from_value(serde_json::json!({
            "sqs": { "arn": "arn:aws:sqs:us-east-1:1:queue" }
        }))
        .unwrap();
        assert!(event.http.is_none());
    }

    #[test]
    fn parameter_requirements_emptiness() {
        let mut params = ParameterRequirements::default();
        assert!(params.is_empty());
        params.headers.insert("X-Api-Key".to_string(), true);
        assert!(!params.is_empty());
    }
}
